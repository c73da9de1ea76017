use std::collections::BTreeMap;

use chrono::SecondsFormat;
use humansize::{format_size, FormatSizeOptions, DECIMAL};
use serde::Serialize;

use crate::i18n::LocalizationTable;
use crate::mail::{AttachmentRef, Disposition, ParsedMail};

pub use self::formatter::*;

mod formatter;

/// Shown instead of the file name of attachments that don't have one.
///
pub const UNNAMED_ATTACHMENT: &str = "<unnamed>";

/// Significant digits of a human readable size.
///
const SIZE_PRECISION: u32 = 3;

/// An attachment as listed in the rendered document.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentView {
    /// The file name, or [`UNNAMED_ATTACHMENT`].
    ///
    pub filename: String,

    /// Size in bytes.
    ///
    pub size: usize,

    /// Human readable size in decimal units with three significant digits, e.g. `1.54 kB` or `12.3 kB`.
    ///
    pub pretty_size: String,

    /// MIME type.
    ///
    pub content_type: String,
}

impl From<&AttachmentRef> for AttachmentView {
    fn from(attachment: &AttachmentRef) -> Self {
        Self {
            filename: attachment
                .filename
                .clone()
                .filter(|filename| !filename.is_empty())
                .unwrap_or_else(|| UNNAMED_ATTACHMENT.to_string()),
            size: attachment.size,
            pretty_size: pretty_size(attachment.size),
            content_type: attachment.content_type.clone(),
        }
    }
}

/// Formats `size` in decimal units, rounded to [`SIZE_PRECISION`] significant digits.
///
fn pretty_size(size: usize) -> String {
    let size = size as u64;
    let digits = size.checked_ilog10().unwrap_or(0) + 1;
    let rounded = match digits.checked_sub(SIZE_PRECISION).filter(|excess| *excess > 0) {
        Some(excess) => {
            let factor = 10u64.pow(excess);
            size.saturating_add(factor / 2) / factor * factor
        }
        None => size,
    };

    let mut exponent = 0usize;
    let mut scaled = rounded;
    while scaled >= 1000 {
        scaled /= 1000;
        exponent += 1;
    }
    let mut trailing_zeros = 0;
    let mut rest = rounded;
    while rest > 0 && rest % 10 == 0 {
        rest /= 10;
        trailing_zeros += 1;
    }

    let options = FormatSizeOptions::from(DECIMAL)
        .decimal_places((3 * exponent).saturating_sub(trailing_zeros));
    format_size(rounded, options)
}

/// The values available to a template when rendering one email.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    /// The subject.
    ///
    pub subject: Option<String>,

    /// Whether `body` is the HTML body of the message, rather than its plain text body converted to HTML.
    ///
    pub has_html_body: bool,

    /// The body as HTML, inserted into the document without escaping.
    ///
    pub body: String,

    /// The sender(s).
    ///
    pub from: Option<String>,

    /// The date in ISO 8601 format, in UTC.
    ///
    pub date: Option<String>,

    /// The recipients.
    ///
    pub to: Option<String>,

    /// The carbon copy recipients.
    ///
    pub cc: Option<String>,

    /// The blind carbon copy recipients.
    ///
    pub bcc: Option<String>,

    /// The priority: `high`, `normal` or `low`.
    ///
    pub priority: Option<String>,

    /// The localized priority.
    ///
    pub priority_label: Option<String>,

    /// The attachments offered for download. Inline parts are not listed.
    ///
    pub attachments: Vec<AttachmentView>,

    /// Localized labels.
    ///
    pub i18n: BTreeMap<String, String>,
}

impl ViewModel {
    /// Build the view of a message.
    ///
    /// # Arguments
    ///
    /// * `mail` - The message.
    /// * `locale` - The labels of the requested language.
    /// * `fallback` - The labels of the baseline language, used for every label `locale` lacks.
    ///
    pub fn build(mail: &ParsedMail, locale: &LocalizationTable, fallback: &LocalizationTable) -> Self {
        let formatter = AddressFormatter::default();
        let has_html_body = mail.body_html.is_some();
        let body = mail
            .body_html
            .as_ref()
            .or(mail.body_plain_as_html.as_ref())
            .cloned()
            .unwrap_or_default();

        Self {
            subject: mail.subject.clone(),
            has_html_body,
            body,
            from: formatter.format_field(mail.from.as_ref()),
            date: mail.date.map(|date| date.to_rfc3339_opts(SecondsFormat::Millis, true)),
            to: formatter.format_field(mail.to.as_ref()),
            cc: formatter.format_field(mail.cc.as_ref()),
            bcc: formatter.format_field(mail.bcc.as_ref()),
            priority: mail.priority.map(|priority| priority.as_str().to_string()),
            priority_label: mail.priority.map(|priority| {
                let key = format!("priority_{}", priority.as_str());
                locale.label(&key, fallback).to_string()
            }),
            attachments: mail
                .attachments
                .iter()
                .filter(|attachment| attachment.disposition == Disposition::Attachment)
                .map(AttachmentView::from)
                .collect(),
            i18n: locale.merged_over(fallback),
        }
    }
}
