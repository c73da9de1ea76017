//!
//! Provides the services used for rendering emails, most notably the headless browser used to print HTML to PDF.
//!
#![warn(missing_docs)]

use async_trait::async_trait;

pub use config::*;
pub use html_to_pdf::*;
pub use page_layout::*;

mod config;
mod html_to_pdf;
mod page_layout;

/// Defines a closure that logs an error if the [`anyhow::Result`] passed in is an error.
///
/// Arguments follow the same syntax as [`format!`].
///
#[macro_export]
macro_rules! log_err {
    ($($arg:tt)+) => (
        |res| if let Err(err) = res {
            let msg = format!($($arg)+);
            log::error!("{}: {}", msg, err);
        }
    );
}

/// An engine able to start rendering sessions.
///
/// Starting a session is expected to be expensive (e.g. launching a browser process), so callers should start
/// one session and share it for as many documents as they need to render.
///
#[async_trait]
pub trait PdfEngine: Send + Sync {
    /// The session type started by this engine.
    ///
    type Session: PdfSession;

    /// Start a new rendering session.
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - If the engine started successfully.
    /// * `Err(_)` - If the engine could not be started, e.g. the browser binary is missing.
    ///
    async fn launch(&self) -> anyhow::Result<Self::Session>;
}

/// A running rendering session.
///
/// A session is shared by reference between concurrently rendered documents. Each call to [`PdfSession::render`]
/// owns a private page for its whole duration, so no coordination between callers is needed.
///
#[async_trait]
pub trait PdfSession: Send + Sync {
    /// Render an HTML document into a PDF.
    ///
    /// # Arguments
    ///
    /// * `html` - The complete HTML document to render.
    /// * `layout` - The page layout to apply.
    ///
    /// # Returns
    ///
    /// The bytes of the rendered PDF.
    ///
    async fn render(&self, html: &str, layout: &PageLayout) -> anyhow::Result<Vec<u8>>;

    /// Shut down the session, releasing every resource it holds.
    ///
    async fn close(self) -> anyhow::Result<()>;
}
