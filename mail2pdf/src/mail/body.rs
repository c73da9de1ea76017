use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use html_escape::encode_text;
use mail_parser::{Message, MimeHeaders, PartType};

use crate::mimetype;

/// Joins the HTML body parts of the message, if it has any.
///
/// Text parts listed as HTML bodies (which is how a text-only message presents itself) are skipped.
///
pub(crate) fn html_body(message: &Message) -> Option<String> {
    let parts: Vec<&str> = message
        .html_bodies()
        .filter_map(|part| match &part.body {
            PartType::Html(html) => Some(html.as_ref()),
            _ => None,
        })
        .collect();

    (!parts.is_empty()).then(|| embed_inline_parts(message, parts.join("\n")))
}

/// Joins the plain text body parts of the message and converts them to HTML, if it has any.
///
pub(crate) fn plain_body_as_html(message: &Message) -> Option<String> {
    let parts: Vec<&str> = message
        .text_bodies()
        .filter_map(|part| match &part.body {
            PartType::Text(text) => Some(text.as_ref()),
            _ => None,
        })
        .collect();

    (!parts.is_empty()).then(|| text_to_html(&parts.join("\n")))
}

/// Converts plain text into HTML paragraphs.
///
/// Blank lines separate paragraphs, single line breaks become `<br/>`.
///
pub(crate) fn text_to_html(text: &str) -> String {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(|paragraph| paragraph.trim_matches('\n'))
        .filter(|paragraph| !paragraph.trim().is_empty())
        .map(|paragraph| {
            let lines: Vec<String> = paragraph
                .split('\n')
                .map(|line| encode_text(line).to_string())
                .collect();
            format!("<p>{}</p>", lines.join("<br/>"))
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Replaces `cid:` references with data URIs built from the referenced parts.
///
fn embed_inline_parts(message: &Message, html: String) -> String {
    message
        .parts
        .iter()
        .filter_map(|part| part.content_id().map(|id| (id, part)))
        .fold(html, |html, (id, part)| {
            let reference = format!("cid:{}", id.trim_start_matches('<').trim_end_matches('>'));
            if !html.contains(&reference) {
                return html;
            }

            let mimetype = part
                .content_type()
                .map(mimetype)
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let data_uri = format!("data:{};base64,{}", mimetype, STANDARD.encode(part.contents()));
            html.replace(&reference, &data_uri)
        })
}

#[cfg(test)]
mod tests {
    use mail_parser::MessageParser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_text_to_html() {
        let text = "This is a rusty email\r\n\r\nwith <angle brackets> & ampersands\r\nand a second line\r\n";

        let expected = "\
<p>This is a rusty email</p>
<p>with &lt;angle brackets&gt; &amp; ampersands<br/>and a second line</p>";
        assert_eq!(expected, text_to_html(text));
    }

    #[test]
    fn test_text_to_html_collapses_blank_runs() {
        assert_eq!("<p>one</p>\n<p>two</p>", text_to_html("\n\none\n\n\n\n\ntwo\n\n"));
        assert_eq!("", text_to_html("\n\n"));
    }

    #[test]
    fn test_html_body_embeds_inline_images() {
        let content = test_utils::eml("html-attachments.eml");
        let message = MessageParser::default().parse(&content).unwrap();

        let html = html_body(&message).unwrap();

        assert!(html.contains("<h1 style=\"color: #c33\">Report</h1>"));
        assert!(!html.contains("cid:chart@mail2pdf"));
        assert!(html.contains("src=\"data:image/png;base64,"));
    }

    #[test]
    fn test_text_only_message_has_no_html_body() {
        let content = test_utils::eml("plain.eml");
        let message = MessageParser::default().parse(&content).unwrap();

        assert_eq!(None, html_body(&message));
        assert!(plain_body_as_html(&message).is_some());
    }
}
