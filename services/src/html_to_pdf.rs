use std::path::PathBuf;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use futures::StreamExt;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::{config, PageLayout, PdfEngine, PdfSession, CHROME_EXECUTABLE, CHROME_NO_SANDBOX};

/// The type of the singleton instance of the `HtmlToPdf` service.
///
pub type HtmlToPdfService = Box<HtmlToPdf>;

lazy_static! {
    static ref HTML_TO_PDF: HtmlToPdfService = Box::<HtmlToPdf>::default();
}

/// Returns the singleton instance of the `HtmlToPdf` service.
///
pub fn html_to_pdf() -> &'static HtmlToPdfService {
    &HTML_TO_PDF
}

/// The `HtmlToPdf` service, printing HTML documents to PDF with a headless Chromium.
///
#[derive(Debug, Clone)]
pub struct HtmlToPdf {
    executable: Option<PathBuf>,
    no_sandbox: bool,
}

impl Default for HtmlToPdf {
    /// Creates the service from the process-wide configuration.
    ///
    fn default() -> Self {
        Self {
            executable: config().get(CHROME_EXECUTABLE).map(PathBuf::from),
            no_sandbox: config().flag(CHROME_NO_SANDBOX),
        }
    }
}

impl HtmlToPdf {
    /// Use the given browser executable instead of the one found on the `PATH`.
    ///
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Disable the browser sandbox, which is usually required when running as root inside a container.
    ///
    pub fn no_sandbox(mut self, no_sandbox: bool) -> Self {
        self.no_sandbox = no_sandbox;
        self
    }

    fn browser_config(&self) -> anyhow::Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder();
        if let Some(executable) = &self.executable {
            builder = builder.chrome_executable(executable);
        }
        if self.no_sandbox {
            builder = builder.no_sandbox();
        }
        builder.build().map_err(|err| anyhow!(err))
    }
}

#[async_trait]
impl PdfEngine for HtmlToPdf {
    type Session = ChromiumSession;

    async fn launch(&self) -> anyhow::Result<ChromiumSession> {
        let config = self.browser_config()
            .context("invalid browser configuration")?;
        let (browser, mut handler) = Browser::launch(config).await
            .context("failed to launch browser")?;

        // The connection to the browser only makes progress while its events are polled.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    debug!("Browser event error: {}", err);
                }
            }
        });

        info!("Launched headless browser");
        Ok(ChromiumSession { browser, handler })
    }
}

/// A running headless Chromium, owning the browser process and the task driving its connection.
///
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

#[async_trait]
impl PdfSession for ChromiumSession {
    async fn render(&self, html: &str, layout: &PageLayout) -> anyhow::Result<Vec<u8>> {
        let page = self.browser.new_page("about:blank").await
            .context("failed to open page")?;

        let pdf = async {
            page.set_content(html).await
                .context("failed to load page content")?;
            page.pdf(print_params(layout)).await
                .context("failed to print page")
        }.await;

        if let Err(err) = page.close().await {
            warn!("Failed to close page: {}", err);
        }

        pdf
    }

    async fn close(mut self) -> anyhow::Result<()> {
        let closed = self.browser.close().await
            .map(|_| ())
            .context("failed to close browser");

        if closed.is_err() {
            if let Some(Err(err)) = self.browser.kill().await {
                warn!("Failed to kill browser: {}", err);
            }
        }
        if let Err(err) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", err);
        }
        self.handler.await
            .context("browser event handler failed")?;

        info!("Closed headless browser");
        closed
    }
}

/// Translates the page layout into the parameters of the `Page.printToPDF` command.
///
fn print_params(layout: &PageLayout) -> PrintToPdfParams {
    PrintToPdfParams::builder()
        .paper_width(layout.width_in())
        .paper_height(layout.height_in())
        .margin_top(layout.margin_in())
        .margin_bottom(layout.margin_in())
        .margin_left(layout.margin_in())
        .margin_right(layout.margin_in())
        .display_header_footer(layout.display_header_footer)
        .header_template(layout.header_template.clone())
        .footer_template(layout.footer_template.clone())
        .print_background(layout.print_background)
        .build()
}
