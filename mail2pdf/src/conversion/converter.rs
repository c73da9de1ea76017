use std::path::Path;

use futures::future::{join_all, try_join_all};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use tap::Tap;

use services::{html_to_pdf, log_err, HtmlToPdf, PageLayout, PdfEngine, PdfSession};

use crate::assets::{AssetLoader, BundledAssets};
use crate::conversion::{ConvertOptions, PdfOutput};
use crate::error::Error;
use crate::i18n::{Language, LocalizationTable};
use crate::mail::{EmlInput, EmlSource, MailDecoder};
use crate::template::TemplateRenderer;
use crate::view::ViewModel;

lazy_static! {
    static ref CONVERTER: Converter = Converter::default();
}

/// Returns a reference to the global converter, printing with Chromium and the bundled assets.
///
pub fn converter() -> &'static Converter {
    &CONVERTER
}

/// Everything loaded once per call and shared by every email of the call.
///
struct Prepared {
    renderer: TemplateRenderer,
    locale: LocalizationTable,
    fallback: LocalizationTable,
}

/// Converts emails to PDFs.
///
/// Each call loads the template and labels once, launches a single rendering session, and renders every email of
/// the call concurrently on that session. The session is closed before the call returns, whatever the outcome.
///
pub struct Converter<E = HtmlToPdf, A = BundledAssets> {
    engine: E,
    assets: A,
    decoder: MailDecoder,
    layout: PageLayout,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(HtmlToPdf::clone(html_to_pdf()), BundledAssets)
    }
}

impl<E: PdfEngine, A: AssetLoader> Converter<E, A> {
    /// Create a converter rendering with `engine` and reading templates and labels from `assets`.
    ///
    pub fn new(engine: E, assets: A) -> Self {
        Self {
            engine,
            assets,
            decoder: MailDecoder::default(),
            layout: PageLayout::default(),
        }
    }

    /// Use a different page layout.
    ///
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Convert one or several emails.
    ///
    /// A single email, or a list of exactly one, produces [`PdfOutput::Single`]. Anything else produces
    /// [`PdfOutput::Batch`] in the order of the input. The first email that fails fails the whole call.
    ///
    /// # Arguments
    ///
    /// * `input` - The email(s) to convert.
    /// * `options` - Options applied to every email.
    ///
    pub async fn convert(&self, input: impl Into<EmlInput>, options: &ConvertOptions) -> Result<PdfOutput, Error> {
        let sources = input.into().into_sources();
        if sources.is_empty() {
            debug!("No email to convert");
            return Ok(PdfOutput::Batch(vec![]));
        }

        let prepared = self.prepare(options).await?;
        let session = self.engine.launch().await.map_err(Error::render)?;
        info!("Converting {} email(s)", sources.len());

        let renders = sources.into_iter()
            .enumerate()
            .map(|(index, source)| self.render_one(&session, &prepared, index, source));
        let result = try_join_all(renders).await;
        self.release(session).await;

        let mut pdfs = result?;
        let output = if pdfs.len() == 1 {
            PdfOutput::Single(pdfs.remove(0))
        } else {
            PdfOutput::Batch(pdfs)
        };

        if let Some(path) = &options.out_path {
            match &output {
                PdfOutput::Single(pdf) => write_pdf(path, pdf).await?,
                PdfOutput::Batch(pdfs) => warn!("Ignoring output path {:?} for a batch of {} emails", path, pdfs.len()),
            }
        }
        Ok(output)
    }

    /// Convert several emails, reporting the outcome of each email separately.
    ///
    /// Only failing to load the assets or to launch the rendering session fails the whole call. The output path of
    /// the options is not used.
    ///
    pub async fn convert_settled(
        &self,
        input: impl Into<EmlInput>,
        options: &ConvertOptions,
    ) -> Result<Vec<Result<Vec<u8>, Error>>, Error> {
        let sources = input.into().into_sources();
        if sources.is_empty() {
            return Ok(vec![]);
        }
        if let Some(path) = &options.out_path {
            warn!("Ignoring output path {:?} of a settled conversion", path);
        }

        let prepared = self.prepare(options).await?;
        let session = self.engine.launch().await.map_err(Error::render)?;
        info!("Converting {} email(s)", sources.len());

        let renders = sources.into_iter()
            .enumerate()
            .map(|(index, source)| self.render_one(&session, &prepared, index, source));
        let results = join_all(renders).await;
        self.release(session).await;

        Ok(results)
    }

    async fn prepare(&self, options: &ConvertOptions) -> Result<Prepared, Error> {
        let template = options.template_name;
        let source = self.assets.load_template(template).await
            .map_err(|err| Error::asset(format!("templates/{}.hbs", template), err))?;
        let renderer = TemplateRenderer::compile(template, &source)?;

        let fallback = self.load_locale(Language::BASELINE).await?
            .unwrap_or_else(|| {
                warn!("No localization table for {}, labels are shown as keys", Language::BASELINE);
                LocalizationTable::default()
            });
        let locale = if options.language == Language::BASELINE {
            fallback.clone()
        } else {
            self.load_locale(options.language).await?
                .unwrap_or_else(|| {
                    warn!("No localization table for {}, using {}", options.language, Language::BASELINE);
                    LocalizationTable::default()
                })
        };

        Ok(Prepared { renderer, locale, fallback })
    }

    async fn load_locale(&self, language: Language) -> Result<Option<LocalizationTable>, Error> {
        self.assets.load_locale(language).await
            .map_err(|err| Error::asset(format!("i18n/{}.json", language), err))
    }

    async fn render_one(
        &self,
        session: &E::Session,
        prepared: &Prepared,
        index: usize,
        source: EmlSource,
    ) -> Result<Vec<u8>, Error> {
        debug!("Rendering email #{} from {}", index, source.origin());

        let mail = self.decoder.decode_source(source).await?;
        let view = ViewModel::build(&mail, &prepared.locale, &prepared.fallback);
        let html = prepared.renderer.render(&view)?;

        session.render(&html, &self.layout).await
            .map_err(Error::render)
    }

    async fn release(&self, session: E::Session) {
        let _ = session.close().await
            .tap(log_err!("Failed to close the rendering session"));
    }
}

async fn write_pdf(path: &Path, pdf: &[u8]) -> Result<(), Error> {
    tokio::fs::write(path, pdf).await
        .map_err(|source| Error::OutputWrite { path: path.to_path_buf(), source })
}
