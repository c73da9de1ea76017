use chrono::{DateTime, Utc};
use log::debug;
use mail_parser::{Addr, Address, Group, HeaderValue, Message, MessageParser, MimeHeaders};

use crate::mail::body::{html_body, plain_body_as_html};
use crate::mail::{AddressField, AttachmentRef, Disposition, EmlSource, Mailbox, MailboxGroup, ParsedMail, Priority};
use crate::{mimetype, Error, ParseError};

/// Headers announcing the priority of a message. When several are present, the last one wins.
///
const PRIORITY_HEADERS: [&str; 4] = ["Priority", "X-Priority", "X-MSMail-Priority", "Importance"];

/// Turns raw message content into a [`ParsedMail`].
///
#[derive(Debug, Default)]
pub struct MailDecoder {
    message_parser: MessageParser,
}

impl MailDecoder {
    /// Decode the content of an `.eml` file.
    ///
    /// # Returns
    ///
    /// * `Ok(ParsedMail)` - If the content is a MIME message.
    /// * `Err(ParseError)` - If the content could not be parsed or does not contain any well-formed header field.
    ///
    pub fn decode(&self, content: &[u8]) -> Result<ParsedMail, ParseError> {
        if !has_header_field(content) {
            return Err(ParseError::MissingHeaders);
        }
        let message = self.message_parser.parse(content)
            .ok_or(ParseError::NotAMessage)?;
        if message.headers().is_empty() {
            return Err(ParseError::MissingHeaders);
        }

        let mail = ParsedMail {
            subject: message.subject().map(str::to_string),
            from: message.from().and_then(address_field),
            to: message.to().and_then(address_field),
            cc: message.cc().and_then(address_field),
            bcc: message.bcc().and_then(address_field),
            date: message.date().and_then(|date| DateTime::<Utc>::from_timestamp(date.to_timestamp(), 0)),
            priority: priority(&message),
            body_html: html_body(&message),
            body_plain_as_html: plain_body_as_html(&message),
            attachments: attachments(&message),
        };
        debug!("Decoded message {:?} with {} attachment(s)", mail.subject, mail.attachments.len());

        Ok(mail)
    }

    /// Read a source completely and decode it.
    ///
    pub async fn decode_source(&self, source: EmlSource) -> Result<ParsedMail, Error> {
        let content = source.read().await?;
        Ok(self.decode(&content)?)
    }
}

/// Whether the header section of `content` holds at least one `name: value` line with an RFC 5322 field name,
/// i.e. printable ASCII without spaces or colons.
///
fn has_header_field(content: &[u8]) -> bool {
    content
        .split(|byte| *byte == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .take_while(|line| !line.is_empty())
        .any(|line| match line.iter().position(|byte| *byte == b':') {
            Some(colon) => colon > 0 && line[..colon].iter().all(|byte| (33..=126).contains(byte)),
            None => false,
        })
}

fn mailbox(addr: &Addr) -> Mailbox {
    Mailbox {
        name: addr.name.as_ref().map(|name| name.to_string()),
        address: addr.address.as_ref().map(|address| address.to_string()),
    }
}

fn mailbox_group(group: &Group) -> MailboxGroup {
    MailboxGroup {
        name: group.name.as_ref().map(|name| name.to_string()),
        mailboxes: group.addresses.iter().map(mailbox).collect(),
    }
}

fn address_field(address: &Address) -> Option<AddressField> {
    match address {
        Address::List(addresses) if !addresses.is_empty() => {
            Some(AddressField::List(addresses.iter().map(mailbox).collect()))
        }
        Address::Group(groups) if !groups.is_empty() => {
            Some(AddressField::Groups(groups.iter().map(mailbox_group).collect()))
        }
        _ => None,
    }
}

fn header_text<'a>(value: &'a HeaderValue) -> Option<&'a str> {
    match value {
        HeaderValue::Text(text) => Some(text.as_ref()),
        HeaderValue::TextList(texts) => texts.first().map(|text| text.as_ref()),
        _ => None,
    }
}

fn priority(message: &Message) -> Option<Priority> {
    message
        .headers()
        .iter()
        .filter(|header| PRIORITY_HEADERS.iter().any(|name| header.name().eq_ignore_ascii_case(name)))
        .filter_map(|header| header_text(header.value()))
        .map(Priority::from_header)
        .last()
}

fn attachments(message: &Message) -> Vec<AttachmentRef> {
    message
        .attachments()
        .map(|part| AttachmentRef {
            filename: part.attachment_name().map(str::to_string),
            size: part.contents().len(),
            content_type: part
                .content_type()
                .map(mimetype)
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            disposition: part
                .content_disposition()
                .map(|disposition| Disposition::from(disposition.ctype()))
                .unwrap_or(Disposition::Attachment),
        })
        .collect()
}
