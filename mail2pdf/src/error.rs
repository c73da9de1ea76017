use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Reasons why content could not be decoded into a message.
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The parser did not recognize a message at all.
    ///
    #[error("content is not a MIME message")]
    NotAMessage,

    /// The content has no header, so it is not an email.
    ///
    #[error("message has no headers")]
    MissingHeaders,
}

/// All errors produced while converting emails to PDFs.
///
#[derive(Error, Debug)]
pub enum Error {
    /// The file or stream of an email could not be read.
    ///
    #[error("failed to read email from {origin}: {source}")]
    InputRead {
        /// The path of the file, or a description of the stream.
        origin: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The content of an email is not a MIME message.
    ///
    #[error("failed to parse email: {0}")]
    Parse(#[from] ParseError),

    /// A bundled template or localization table could not be loaded.
    ///
    #[error("failed to load asset {name}: {source}")]
    Asset {
        /// The name of the asset.
        name: String,
        /// The underlying error.
        source: BoxError,
    },

    /// The template could not be compiled or rendered.
    ///
    #[error("failed to render template {name}: {source}")]
    Template {
        /// The name of the template.
        name: String,
        /// The template engine's error.
        source: BoxError,
    },

    /// The browser could not be started, or failed to turn a document into a PDF.
    ///
    #[error("failed to render pdf: {0}")]
    Render(#[source] BoxError),

    /// The PDF could not be written to the requested output path.
    ///
    #[error("failed to write pdf to {path:?}: {source}")]
    OutputWrite {
        /// The requested output path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl Error {
    /// Create an `Asset` variant from the name of the asset and the error that occurred while loading it.
    ///
    pub fn asset(name: impl Into<String>, err: anyhow::Error) -> Self {
        Self::Asset {
            name: name.into(),
            source: err.into(),
        }
    }

    /// Create a `Template` variant from the template name and the template engine's error.
    ///
    pub fn template(name: impl Into<String>, err: impl Into<BoxError>) -> Self {
        Self::Template {
            name: name.into(),
            source: err.into(),
        }
    }

    /// Create a `Render` variant from the rendering service's error.
    ///
    pub fn render(err: anyhow::Error) -> Self {
        Self::Render(err.into())
    }
}
