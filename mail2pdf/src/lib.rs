//!
//! Library for rendering emails as PDFs
//!
//! Emails in `.eml` format are decoded, laid out with an HTML template resembling the print output of a desktop mail
//! client, and printed to PDF with a headless Chromium. Several emails can be converted in one call, sharing a
//! single browser.
//!
//! ```no_run
//! # async fn run() -> Result<(), mail2pdf::Error> {
//! use mail2pdf::{mail2pdf, ConvertOptions, PdfOutput};
//!
//! let output = mail2pdf("message.eml", ConvertOptions::default().language("de")).await?;
//! if let PdfOutput::Single(pdf) = output {
//!     println!("rendered {} bytes", pdf.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
#![warn(missing_docs)]

use mail_parser::ContentType;

pub use assets::*;
pub use conversion::*;
pub use error::*;
pub use i18n::*;
pub use mail::*;
pub use template::*;
pub use view::*;

pub use services::PageLayout;

/// Loading of templates and localization tables.
///
pub mod assets;

/// Orchestrates the conversion of one or many emails.
///
pub mod conversion;

/// Decoding of emails.
///
pub mod mail;

/// Values rendered into the templates.
///
pub mod view;

mod error;
mod i18n;
mod template;

/// Convert one or several emails with the [global converter](converter).
///
/// # Arguments
///
/// * `input` - A path, the content of an email, a reader, or a list of those.
/// * `options` - Options applied to every email.
///
/// # Returns
///
/// * `Ok(PdfOutput::Single)` - The PDF of a single email, also written to `options.out_path` if set.
/// * `Ok(PdfOutput::Batch)` - One PDF per email, in the order of the input.
/// * `Err(_)` - The first failure of any email, or of the browser.
///
pub async fn mail2pdf(input: impl Into<EmlInput>, options: ConvertOptions) -> Result<PdfOutput, Error> {
    converter().convert(input, &options).await
}

/// Get the MIME type from a `mail_parser::ContentType`.
///
/// # Arguments
///
/// * `content_type` - The `mail_parser::ContentType` to get the MIME type from.
///
/// # Returns
///
/// The MIME type formatted as a `String`.
///
pub fn mimetype(content_type: &ContentType) -> String {
    match (content_type.ctype(), content_type.subtype()) {
        (ctype, Some(subtype)) => format!("{}/{}", ctype, subtype),
        (ctype, None) => ctype.to_string(),
    }
}
