use std::path::PathBuf;

use crate::assets::TemplateName;
use crate::i18n::Language;

pub use self::converter::*;

mod converter;

/// Options of a conversion, shared by every email of the call.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Language of the labels in the PDF.
    ///
    pub language: Language,

    /// Template laying out the email.
    ///
    pub template_name: TemplateName,

    /// File the PDF is also written to. Only used when a single PDF is produced.
    ///
    pub out_path: Option<PathBuf>,
}

impl ConvertOptions {
    /// Options for the given language.
    ///
    pub fn language(mut self, language: impl Into<Language>) -> Self {
        self.language = language.into();
        self
    }

    /// Write the PDF to `path` as well.
    ///
    pub fn out_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_path = Some(path.into());
        self
    }
}

/// The PDFs produced by a conversion.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfOutput {
    /// The PDF of a single email.
    ///
    Single(Vec<u8>),

    /// One PDF per email, in the order of the input.
    ///
    Batch(Vec<Vec<u8>>),
}

impl PdfOutput {
    /// Number of PDFs.
    ///
    pub fn len(&self) -> usize {
        match self {
            PdfOutput::Single(_) => 1,
            PdfOutput::Batch(pdfs) => pdfs.len(),
        }
    }

    /// Whether no PDF was produced.
    ///
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The PDF, if a single one was produced.
    ///
    pub fn single(&self) -> Option<&[u8]> {
        match self {
            PdfOutput::Single(pdf) => Some(pdf.as_slice()),
            PdfOutput::Batch(_) => None,
        }
    }

    /// All PDFs, in order.
    ///
    pub fn into_vec(self) -> Vec<Vec<u8>> {
        match self {
            PdfOutput::Single(pdf) => vec![pdf],
            PdfOutput::Batch(pdfs) => pdfs,
        }
    }
}
