//!
//! # Test Utilities
//!
#![warn(missing_docs)]

use std::io::Read;
use std::path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;

use services::{PageLayout, PdfEngine, PdfSession};

/// Directory of the email fixtures, relative to the root of a workspace member.
///
pub const EML_FIXTURES: &str = "../resources/eml";

/// Prefix of every document produced by the [`FakeEngine`].
///
pub const FAKE_PDF_HEADER: &[u8] = b"%PDF-fake\n";

/// Reads the contents of a file into a `Vec<u8>`.
///
/// # Arguments
///
/// * `path` - The path to the file to read.
///
/// # Returns
///
/// Some contents of the file as a `Vec<u8>`, or None if the file could not be read.
///
pub fn read_contents(path: &str) -> Option<Vec<u8>> {
    let mut content = vec![];
    std::fs::File::open(path::PathBuf::from(path))
        .and_then(|mut file| file.read_to_end(&mut content))
        .map(|_| content)
        .ok()
}

/// Path to an email fixture.
///
pub fn eml_path(name: &str) -> path::PathBuf {
    path::Path::new(EML_FIXTURES).join(name)
}

/// Contents of an email fixture.
///
/// Panics if the fixture does not exist.
///
pub fn eml(name: &str) -> Vec<u8> {
    let path = eml_path(name);
    read_contents(&path.to_string_lossy())
        .unwrap_or_else(|| panic!("missing email fixture {:?}", path))
}

/// Returns the HTML a [`FakeEngine`] session was asked to render for the given output.
///
pub fn fake_pdf_html(pdf: &[u8]) -> String {
    let body = pdf.strip_prefix(FAKE_PDF_HEADER).unwrap_or(pdf);
    String::from_utf8_lossy(body).to_string()
}

type DelayFn = dyn Fn(&str) -> Duration + Send + Sync;

/// Counters shared by a [`FakeEngine`] and every session it launched.
///
#[derive(Debug, Default)]
pub struct FakeStats {
    launched: AtomicUsize,
    closed: AtomicUsize,
    rendered: AtomicUsize,
    open_pages: AtomicUsize,
    max_open_pages: AtomicUsize,
    layouts: Mutex<Vec<PageLayout>>,
}

impl FakeStats {
    /// Number of sessions launched.
    ///
    pub fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }

    /// Number of sessions closed.
    ///
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of documents rendered successfully.
    ///
    pub fn rendered(&self) -> usize {
        self.rendered.load(Ordering::SeqCst)
    }

    /// Highest number of documents that were being rendered at the same time.
    ///
    pub fn max_open_pages(&self) -> usize {
        self.max_open_pages.load(Ordering::SeqCst)
    }

    /// Layouts passed to every render call, in call order.
    ///
    pub fn layouts(&self) -> Vec<PageLayout> {
        self.layouts.lock().map(|layouts| layouts.clone()).unwrap_or_default()
    }
}

/// A rendering engine that does not need a browser.
///
/// The "PDF" it produces is [`FAKE_PDF_HEADER`] followed by the rendered HTML, which lets tests check which
/// document ended up where.
///
#[derive(Clone, Default)]
pub struct FakeEngine {
    stats: Arc<FakeStats>,
    delay: Option<Arc<DelayFn>>,
    fail_launch: bool,
    fail_marker: Option<String>,
}

impl FakeEngine {
    /// Counters of this engine and its sessions.
    ///
    pub fn stats(&self) -> Arc<FakeStats> {
        self.stats.clone()
    }

    /// Delay every render by the duration computed from the HTML.
    ///
    pub fn with_delay(mut self, delay: impl Fn(&str) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Some(Arc::new(delay));
        self
    }

    /// Make every launch fail.
    ///
    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    /// Make rendering fail for documents containing `marker`.
    ///
    pub fn failing_on(mut self, marker: impl Into<String>) -> Self {
        self.fail_marker = Some(marker.into());
        self
    }
}

#[async_trait]
impl PdfEngine for FakeEngine {
    type Session = FakeSession;

    async fn launch(&self) -> anyhow::Result<FakeSession> {
        if self.fail_launch {
            return Err(anyhow!("fake browser failed to launch"));
        }
        self.stats.launched.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession { engine: self.clone() })
    }
}

/// A session launched by a [`FakeEngine`].
///
pub struct FakeSession {
    engine: FakeEngine,
}

#[async_trait]
impl PdfSession for FakeSession {
    async fn render(&self, html: &str, layout: &PageLayout) -> anyhow::Result<Vec<u8>> {
        let stats = &self.engine.stats;
        if let Ok(mut layouts) = stats.layouts.lock() {
            layouts.push(layout.clone());
        }

        let open = stats.open_pages.fetch_add(1, Ordering::SeqCst) + 1;
        stats.max_open_pages.fetch_max(open, Ordering::SeqCst);

        if let Some(delay) = &self.engine.delay {
            tokio::time::sleep(delay(html)).await;
        }
        stats.open_pages.fetch_sub(1, Ordering::SeqCst);

        if let Some(marker) = &self.engine.fail_marker {
            if html.contains(marker.as_str()) {
                return Err(anyhow!("fake page failed to render"));
            }
        }

        stats.rendered.fetch_add(1, Ordering::SeqCst);
        let mut pdf = FAKE_PDF_HEADER.to_vec();
        pdf.extend_from_slice(html.as_bytes());
        Ok(pdf)
    }

    async fn close(self) -> anyhow::Result<()> {
        self.engine.stats.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_contents() {
        let contents = read_contents("../resources/eml/plain.eml");
        assert!(contents.is_some());
        assert!(!contents.unwrap().is_empty());
    }

    #[test]
    fn test_read_contents_missing_path() {
        assert!(read_contents("missing").is_none());
    }

    #[tokio::test]
    async fn test_fake_engine_counts_sessions() -> anyhow::Result<()> {
        let engine = FakeEngine::default();
        let session = engine.launch().await?;

        let pdf = session.render("<p>hi</p>", &PageLayout::default()).await?;
        session.close().await?;

        assert_eq!("<p>hi</p>", fake_pdf_html(&pdf));
        assert_eq!(1, engine.stats().launched());
        assert_eq!(1, engine.stats().rendered());
        assert_eq!(1, engine.stats().closed());
        Ok(())
    }

    #[tokio::test]
    async fn test_fake_engine_fails_on_marker() -> anyhow::Result<()> {
        let engine = FakeEngine::default().failing_on("broken");
        let session = engine.launch().await?;

        let result = session.render("<p>broken</p>", &PageLayout::default()).await;
        session.close().await?;

        assert!(result.is_err());
        assert_eq!(0, engine.stats().rendered());
        Ok(())
    }
}
