use std::collections::BTreeMap;
use std::fmt;

use anyhow::Context;
use log::warn;
use serde::{Deserialize, Serialize};

/// The language of the labels in the rendered PDF.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English, the baseline language every other language falls back to.
    ///
    #[default]
    En,

    /// German.
    ///
    De,
}

impl Language {
    /// The language providing every label missing from another language.
    ///
    pub const BASELINE: Language = Language::En;

    /// All supported languages.
    ///
    pub fn all() -> &'static [Language] {
        &[Language::En, Language::De]
    }

    /// The ISO 639-1 code of the language, which is also the name of its localization table.
    ///
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }

    /// Find a supported language by its code, e.g. `de` or `DE`.
    ///
    /// Unsupported codes resolve to the [baseline](Language::BASELINE) language.
    ///
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_lowercase();
        Self::all()
            .iter()
            .find(|language| language.code() == code)
            .copied()
            .unwrap_or_else(|| {
                warn!("Unsupported language {:?}, using {:?}", code, Self::BASELINE.code());
                Self::BASELINE
            })
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Localized labels, keyed by label name.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizationTable(BTreeMap<String, String>);

impl LocalizationTable {
    /// Parse a table from a JSON object of label names to localized strings.
    ///
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid localization table")
    }

    /// The localized string of a label, if this table has one.
    ///
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The localized string of a label, looked up in this table, then in `fallback`.
    ///
    /// A label missing from both tables is rendered as its key.
    ///
    pub fn label<'a>(&'a self, key: &'a str, fallback: &'a LocalizationTable) -> &'a str {
        self.get(key)
            .or_else(|| fallback.get(key))
            .unwrap_or(key)
    }

    /// All labels of `fallback`, overridden by the labels of this table.
    ///
    pub fn merged_over(&self, fallback: &LocalizationTable) -> BTreeMap<String, String> {
        let mut merged = fallback.0.clone();
        merged.extend(self.0.iter().map(|(key, value)| (key.clone(), value.clone())));
        merged
    }

    /// Number of labels in the table.
    ///
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no label.
    ///
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizationTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fallback() -> LocalizationTable {
        LocalizationTable::from_iter([("from", "From"), ("to", "To"), ("subject", "Subject")])
    }

    #[test]
    fn test_language_from_code() {
        assert_eq!(Language::En, Language::from_code("en"));
        assert_eq!(Language::De, Language::from_code("de"));
        assert_eq!(Language::De, Language::from_code(" DE "));
        assert_eq!(Language::En, Language::from_code("fr"));
        assert_eq!(Language::En, Language::from_code(""));
        assert_eq!("de", Language::De.to_string());
    }

    #[test]
    fn test_from_json() -> anyhow::Result<()> {
        let table = LocalizationTable::from_json(r#"{"from": "Von", "to": "An"}"#)?;

        assert_eq!(2, table.len());
        assert_eq!(Some("Von"), table.get("from"));
        assert_eq!(None, table.get("subject"));
        assert!(LocalizationTable::from_json("[1, 2]").is_err());
        Ok(())
    }

    #[test]
    fn test_label_falls_back_per_key() {
        let partial = LocalizationTable::from_iter([("from", "Von")]);
        let fallback = fallback();

        assert_eq!("Von", partial.label("from", &fallback));
        assert_eq!("To", partial.label("to", &fallback));
        assert_eq!("unknown", partial.label("unknown", &fallback));
    }

    #[test]
    fn test_merged_over() {
        let partial = LocalizationTable::from_iter([("from", "Von"), ("extra", "Extra")]);

        let merged = partial.merged_over(&fallback());

        let expected: BTreeMap<String, String> = [
            ("extra", "Extra"),
            ("from", "Von"),
            ("subject", "Subject"),
            ("to", "To"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
        assert_eq!(expected, merged);
    }
}
