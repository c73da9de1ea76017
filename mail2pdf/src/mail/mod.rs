use chrono::{DateTime, Utc};

pub use self::decoder::*;
pub use self::source::*;

mod body;
mod decoder;
mod source;

/// A single mailbox of an address header.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mailbox {
    /// The display name, e.g. `Rusty Processing`.
    ///
    pub name: Option<String>,

    /// The address, e.g. `rusty.processing@mime.com`.
    ///
    pub address: Option<String>,
}

/// A named group of mailboxes, e.g. `Crew: first@domain.com, second@domain.com;`.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailboxGroup {
    /// The name of the group.
    ///
    pub name: Option<String>,

    /// The members of the group.
    ///
    pub mailboxes: Vec<Mailbox>,
}

/// The value of an address header.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressField {
    /// A plain list of mailboxes.
    ///
    List(Vec<Mailbox>),

    /// A list of mailbox groups.
    ///
    Groups(Vec<MailboxGroup>),
}

/// Priority of a message, as announced by its `X-Priority`, `Importance` and similar headers.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    /// High or urgent.
    ///
    High,

    /// Normal.
    ///
    Normal,

    /// Low or non-urgent.
    ///
    Low,
}

impl Priority {
    /// Interpret the value of a priority header.
    ///
    /// Numeric values follow the `X-Priority` convention where `3` is normal, lower numbers are more urgent and
    /// higher numbers are less urgent. Anything that can't be interpreted is normal.
    ///
    pub fn from_header(value: &str) -> Self {
        let value = value.trim().to_lowercase();
        let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();

        match digits.parse::<u32>() {
            Ok(3) => Priority::Normal,
            Ok(level) if level > 3 => Priority::Low,
            Ok(_) => Priority::High,
            Err(_) => match value.as_str() {
                "high" | "urgent" => Priority::High,
                "low" | "non-urgent" => Priority::Low,
                _ => Priority::Normal,
            },
        }
    }

    /// The lower-case name of the priority.
    ///
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }
}

/// How a message part wants to be presented, from its `Content-Disposition` header.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Offered as a download.
    ///
    Attachment,

    /// Displayed as part of the message, e.g. an image referenced by the HTML body.
    ///
    Inline,

    /// Any other disposition type.
    ///
    Other(String),
}

impl From<&str> for Disposition {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "attachment" => Disposition::Attachment,
            "inline" => Disposition::Inline,
            other => Disposition::Other(other.to_string()),
        }
    }
}

/// Description of an attachment of a message. The content itself is not kept.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    /// The file name, if the message provides one.
    ///
    pub filename: Option<String>,

    /// Decoded size in bytes.
    ///
    pub size: usize,

    /// MIME type, e.g. `application/pdf`.
    ///
    pub content_type: String,

    /// The content disposition.
    ///
    pub disposition: Disposition,
}

/// The fields of a parsed message needed to render it.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMail {
    /// The subject.
    ///
    pub subject: Option<String>,

    /// The `From` header.
    ///
    pub from: Option<AddressField>,

    /// The `To` header.
    ///
    pub to: Option<AddressField>,

    /// The `Cc` header.
    ///
    pub cc: Option<AddressField>,

    /// The `Bcc` header.
    ///
    pub bcc: Option<AddressField>,

    /// The `Date` header.
    ///
    pub date: Option<DateTime<Utc>>,

    /// The priority, if any priority header is present.
    ///
    pub priority: Option<Priority>,

    /// The HTML body, with inline parts referenced by `cid:` embedded as data URIs.
    ///
    pub body_html: Option<String>,

    /// The plain text body converted to HTML.
    ///
    pub body_plain_as_html: Option<String>,

    /// Every attachment of the message, in message order.
    ///
    pub attachments: Vec<AttachmentRef>,
}
