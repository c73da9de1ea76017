use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use lazy_static::lazy_static;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::i18n::{Language, LocalizationTable};

const THUNDERBIRD_TEMPLATE: &str = include_str!("../res/templates/thunderbird.hbs");
const EN_LOCALE: &str = include_str!("../res/i18n/en.json");
const DE_LOCALE: &str = include_str!("../res/i18n/de.json");

lazy_static! {
    static ref BUNDLED_ASSETS: BundledAssets = BundledAssets;
}

/// Returns a reference to the global instance of the bundled assets.
///
pub fn bundled_assets() -> &'static BundledAssets {
    &BUNDLED_ASSETS
}

/// The HTML template used to lay out an email.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateName {
    /// Output similar to Thunderbird's "Print to PDF".
    ///
    #[default]
    Thunderbird,
}

impl TemplateName {
    /// The name of the template, which is also the stem of its file name.
    ///
    pub fn name(&self) -> &'static str {
        match self {
            TemplateName::Thunderbird => "thunderbird",
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of the templates and localization tables.
///
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AssetLoader: Send + Sync {
    /// Load the source of a template.
    ///
    async fn load_template(&self, template: TemplateName) -> anyhow::Result<String>;

    /// Load the localization table of a language.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(table))` - If there is a table for the language.
    /// * `Ok(None)` - If the language has no table.
    /// * `Err(_)` - If the table exists but could not be loaded.
    ///
    async fn load_locale(&self, language: Language) -> anyhow::Result<Option<LocalizationTable>>;
}

/// The templates and localization tables shipped with the library.
///
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BundledAssets;

#[async_trait]
impl AssetLoader for BundledAssets {
    async fn load_template(&self, template: TemplateName) -> anyhow::Result<String> {
        match template {
            TemplateName::Thunderbird => Ok(THUNDERBIRD_TEMPLATE.to_string()),
        }
    }

    async fn load_locale(&self, language: Language) -> anyhow::Result<Option<LocalizationTable>> {
        let json = match language {
            Language::En => EN_LOCALE,
            Language::De => DE_LOCALE,
        };
        LocalizationTable::from_json(json).map(Some)
    }
}

/// Templates and localization tables read from a directory.
///
/// The directory mirrors the bundled assets: `templates/<name>.hbs` and `i18n/<language>.json`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    /// Create a loader reading from `root`.
    ///
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory assets are read from.
    ///
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn template_path(&self, template: TemplateName) -> PathBuf {
        self.root.join("templates").join(format!("{}.hbs", template.name()))
    }

    fn locale_path(&self, language: Language) -> PathBuf {
        self.root.join("i18n").join(format!("{}.json", language.code()))
    }
}

#[async_trait]
impl AssetLoader for DirectoryAssets {
    async fn load_template(&self, template: TemplateName) -> anyhow::Result<String> {
        let path = self.template_path(template);
        tokio::fs::read_to_string(&path).await
            .with_context(|| format!("failed to read template {:?}", path))
    }

    async fn load_locale(&self, language: Language) -> anyhow::Result<Option<LocalizationTable>> {
        let path = self.locale_path(language);
        match tokio::fs::read_to_string(&path).await {
            Ok(json) => LocalizationTable::from_json(&json)
                .with_context(|| format!("failed to parse localization table {:?}", path))
                .map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(anyhow!(err).context(format!("failed to read localization table {:?}", path))),
        }
    }
}
