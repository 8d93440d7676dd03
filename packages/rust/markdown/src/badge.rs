//! shields.io badges and the small HTML fragments built around them.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::form_urlencoded;

use quizdocs_shared::Author;

const SHIELDS_BASE: &str = "https://img.shields.io/badge/";

/// Everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped in a badge segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escape text for use inside HTML element content or attribute values.
pub fn escape_html(unsafe_text: &str) -> String {
    unsafe_text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Static badge URL: `https://img.shields.io/badge/<label>-<text>-<color>`.
///
/// Dashes in `label` and `text` are doubled (shields.io's escape for a
/// literal dash), then both are percent-encoded, leaving only URI
/// unreserved marks as-is. `args` become
/// query pairs, e.g. `[("logo", "typescript")]`.
pub fn badge_url(label: &str, text: &str, color: &str, args: &[(&str, &str)]) -> String {
    let mut url = format!(
        "{SHIELDS_BASE}{}-{}-{color}",
        encode_segment(label),
        encode_segment(text)
    );
    if !args.is_empty() {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(args)
            .finish();
        url.push('?');
        url.push_str(&query);
    }
    url
}

fn encode_segment(part: &str) -> String {
    utf8_percent_encode(&part.replace('-', "--"), SEGMENT).to_string()
}

/// `<img>` tag for a badge; `text` doubles as alt text.
pub fn badge(label: &str, text: &str, color: &str, args: &[(&str, &str)]) -> String {
    format!(
        r#"<img src="{}" alt="{}"/>"#,
        badge_url(label, text, color, args),
        escape_html(text)
    )
}

/// A badge wrapped in a link opening in a new tab, followed by one space.
pub fn badge_link(
    href: &str,
    label: &str,
    text: &str,
    color: &str,
    args: &[(&str, &str)],
) -> String {
    format!(
        r#"<a href="{href}" target="_blank">{}</a> "#,
        badge(label, text, color, args)
    )
}

/// `by <name>` plus a GitHub profile link when the handle is known.
pub fn author_info(author: Option<&Author>) -> String {
    let name = author.map(|a| a.name.as_str()).unwrap_or_default();
    match author.and_then(|a| a.github.as_deref()) {
        Some(gh) => {
            format!(r#"by {name} <a href="https://github.com/{gh}" target="_blank">@{gh}</a>"#)
        }
        None => format!("by {name}"),
    }
}
