use handlebars::Handlebars;

use crate::assets::TemplateName;
use crate::error::Error;
use crate::view::ViewModel;

/// A compiled template, ready to render any number of emails.
///
/// Values are HTML-escaped, except for the body which the template inserts as is.
///
#[derive(Debug)]
pub struct TemplateRenderer {
    name: TemplateName,
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Compile the source of a template.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the template.
    /// * `source` - The Handlebars source of the template.
    ///
    /// # Returns
    ///
    /// * `Ok(TemplateRenderer)` - If the source compiled.
    /// * `Err(Error::Template)` - If the source is not a valid template.
    ///
    pub fn compile(name: TemplateName, source: &str) -> Result<Self, Error> {
        let mut registry = Handlebars::new();
        registry.register_template_string(name.name(), source)
            .map_err(|err| Error::template(name.name(), err))?;

        Ok(Self { name, registry })
    }

    /// The name of the compiled template.
    ///
    pub fn name(&self) -> TemplateName {
        self.name
    }

    /// Render the document of one email.
    ///
    pub fn render(&self, view: &ViewModel) -> Result<String, Error> {
        self.registry.render(self.name.name(), view)
            .map_err(|err| Error::template(self.name.name(), err))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::assets::{AssetLoader, BundledAssets};
    use crate::i18n::Language;
    use crate::view::AttachmentView;

    use super::*;

    fn view() -> ViewModel {
        ViewModel {
            subject: Some("Now THATS A LOT OF RUST".to_string()),
            has_html_body: false,
            body: "<p>Hello</p>".to_string(),
            from: Some("Rusty <rusty@mime.com>".to_string()),
            date: Some("2021-02-21T15:58:00.000Z".to_string()),
            to: Some("First <first@emim.com>".to_string()),
            cc: None,
            bcc: None,
            priority: None,
            priority_label: None,
            attachments: vec![],
            i18n: BTreeMap::new(),
        }
    }

    async fn bundled(language: Language) -> anyhow::Result<(TemplateRenderer, BTreeMap<String, String>)> {
        let source = BundledAssets.load_template(TemplateName::Thunderbird).await?;
        let labels = BundledAssets.load_locale(language).await?.unwrap_or_default();
        let renderer = TemplateRenderer::compile(TemplateName::Thunderbird, &source)?;
        Ok((renderer, labels.merged_over(&Default::default())))
    }

    #[tokio::test]
    async fn test_bundled_template_renders_fields() -> anyhow::Result<()> {
        let (renderer, i18n) = bundled(Language::En).await?;
        let view = ViewModel {
            attachments: vec![AttachmentView {
                filename: "report.txt".to_string(),
                size: 1536,
                pretty_size: "1.54 kB".to_string(),
                content_type: "text/plain".to_string(),
            }],
            i18n,
            ..view()
        };

        let html = renderer.render(&view)?;

        assert!(html.contains("<title>Now THATS A LOT OF RUST</title>"));
        assert!(html.contains("2021-02-21T15:58:00.000Z"));
        assert!(html.contains("<p>Hello</p>"));
        assert!(html.contains("class=\"body plain\""));
        assert!(html.contains("Attachments:"));
        assert!(html.contains("report.txt"));
        assert!(html.contains("1.54 kB"));
        Ok(())
    }

    #[tokio::test]
    async fn test_bundled_template_escapes_header_text() -> anyhow::Result<()> {
        let (renderer, i18n) = bundled(Language::En).await?;

        let html = renderer.render(&ViewModel { i18n, ..view() })?;

        assert!(html.contains("Rusty &lt;rusty@mime.com&gt;"));
        assert!(!html.contains("Rusty <rusty@mime.com>"));
        Ok(())
    }

    #[tokio::test]
    async fn test_bundled_template_omits_empty_rows() -> anyhow::Result<()> {
        let (renderer, i18n) = bundled(Language::De).await?;

        let html = renderer.render(&ViewModel { i18n, ..view() })?;

        assert!(html.contains("Von:"));
        assert!(html.contains("An:"));
        assert!(!html.contains("Kopie (CC):"));
        assert!(!html.contains("Blindkopie (BCC):"));
        assert!(!html.contains("Priorität:"));
        assert!(!html.contains("Anhänge:"));
        Ok(())
    }

    #[tokio::test]
    async fn test_bundled_template_html_body() -> anyhow::Result<()> {
        let (renderer, i18n) = bundled(Language::En).await?;
        let view = ViewModel {
            has_html_body: true,
            body: "<h1 style=\"color: #c33\">Report</h1>".to_string(),
            priority: Some("high".to_string()),
            priority_label: Some("High".to_string()),
            i18n,
            ..view()
        };

        let html = renderer.render(&view)?;

        assert!(html.contains("<h1 style=\"color: #c33\">Report</h1>"));
        assert!(!html.contains("class=\"body plain\""));
        assert!(html.contains("Priority:"));
        Ok(())
    }

    #[test]
    fn test_invalid_template() {
        let result = TemplateRenderer::compile(TemplateName::Thunderbird, "{{#if subject}}unclosed");

        assert!(matches!(result, Err(Error::Template { .. })));
    }
}
