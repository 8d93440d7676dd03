//! Markdown fragment rendering and marker-region rewriting.
//!
//! Generated content lives between HTML comment markers
//! (`<!--name-start-->` … `<!--name-end-->`) inside hand-written documents.
//! [`Region`] finds, inserts and replaces those spans; everything outside a
//! region is left byte-for-byte intact. The [`badge`] module renders the
//! shields.io badges placed inside them.

pub mod badge;

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

pub use badge::{author_info, badge, badge_link, badge_url, escape_html};

/// Index document: list of all challenges grouped by difficulty.
pub static CHALLENGES: LazyLock<Region> = LazyLock::new(|| Region::new("challenges"));

/// Per-quiz document: title, badges and author above the body.
pub static INFO_HEADER: LazyLock<Region> = LazyLock::new(|| Region::new("info-header"));

/// Per-quiz document: navigation badges below the body.
pub static INFO_FOOTER: LazyLock<Region> = LazyLock::new(|| Region::new("info-footer"));

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A named, comment-delimited span of generated content.
///
/// A match runs from the first start marker to the last end marker, across
/// lines. Only that first match is ever rewritten.
#[derive(Debug, Clone)]
pub struct Region {
    name: String,
    start: String,
    end: String,
    pattern: Regex,
}

impl Region {
    pub fn new(name: &str) -> Self {
        let start = format!("<!--{name}-start-->");
        let end = format!("<!--{name}-end-->");
        let pattern = Regex::new(&format!(
            "(?s){}.*{}",
            regex::escape(&start),
            regex::escape(&end)
        ))
        .expect("valid regex");

        Self {
            name: name.to_string(),
            start,
            end,
            pattern,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `text` contains a complete start…end span.
    pub fn contains(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Surround `inner` with this region's markers.
    pub fn wrap(&self, inner: &str) -> String {
        format!("{}{inner}{}", self.start, self.end)
    }

    /// Replace the region (markers included) with `wrap(inner)`.
    ///
    /// Returns `None` when `text` has no such region. `inner` is inserted
    /// verbatim; `$` sequences are not expanded.
    pub fn replace(&self, text: &str, inner: &str) -> Option<String> {
        let m = self.pattern.find(text)?;
        let wrapped = self.wrap(inner);

        let mut out = String::with_capacity(text.len() - m.as_str().len() + wrapped.len());
        out.push_str(&text[..m.start()]);
        out.push_str(&wrapped);
        out.push_str(&text[m.end()..]);

        trace!(region = %self.name, replaced_len = m.as_str().len(), "region replaced");
        Some(out)
    }

    /// Prepend an empty region followed by a blank line, unless present.
    pub fn ensure_leading(&self, text: &str) -> String {
        if self.contains(text) {
            text.to_string()
        } else {
            format!("{}\n\n{text}", self.wrap(""))
        }
    }

    /// Append a blank line and an empty region, unless present.
    pub fn ensure_trailing(&self, text: &str) -> String {
        if self.contains(text) {
            text.to_string()
        } else {
            format!("{text}\n\n{}", self.wrap(""))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_uses_named_markers() {
        let region = Region::new("challenges");
        assert_eq!(
            region.wrap("x"),
            "<!--challenges-start-->x<!--challenges-end-->"
        );
        assert_eq!(region.name(), "challenges");
    }

    #[test]
    fn replace_keeps_surrounding_text() {
        let text = "# Title\n\n<!--challenges-start-->\nold\nstuff\n<!--challenges-end-->\n\nFooter\n";
        let out = CHALLENGES.replace(text, "\nnew\n").unwrap();
        assert_eq!(
            out,
            "# Title\n\n<!--challenges-start-->\nnew\n<!--challenges-end-->\n\nFooter\n"
        );
    }

    #[test]
    fn replace_missing_region_is_none() {
        assert!(CHALLENGES.replace("no markers here", "x").is_none());
        // A lone start marker is not a region.
        assert!(CHALLENGES.replace("<!--challenges-start--> dangling", "x").is_none());
    }

    #[test]
    fn replace_spans_to_last_end_marker() {
        let text = "a<!--info-footer-start-->1<!--info-footer-end-->b<!--info-footer-end-->c";
        let out = INFO_FOOTER.replace(text, "X").unwrap();
        assert_eq!(out, "a<!--info-footer-start-->X<!--info-footer-end-->c");
    }

    #[test]
    fn replace_does_not_expand_dollar_signs() {
        let text = "<!--info-header-start--><!--info-header-end-->";
        let out = INFO_HEADER.replace(text, "$0 and $1").unwrap();
        assert_eq!(out, "<!--info-header-start-->$0 and $1<!--info-header-end-->");
    }

    #[test]
    fn ensure_leading_and_trailing_insert_once() {
        let body = "Implement `Pick<T, K>`.";

        let with_header = INFO_HEADER.ensure_leading(body);
        assert_eq!(
            with_header,
            "<!--info-header-start--><!--info-header-end-->\n\nImplement `Pick<T, K>`."
        );
        assert_eq!(INFO_HEADER.ensure_leading(&with_header), with_header);

        let with_footer = INFO_FOOTER.ensure_trailing(&with_header);
        assert!(with_footer.ends_with("\n\n<!--info-footer-start--><!--info-footer-end-->"));
        assert_eq!(INFO_FOOTER.ensure_trailing(&with_footer), with_footer);
    }

    #[test]
    fn regions_do_not_match_each_other() {
        let text = "<!--info-header-start--><!--info-header-end-->";
        assert!(INFO_HEADER.contains(text));
        assert!(!INFO_FOOTER.contains(text));
        assert!(!CHALLENGES.contains(text));
    }
}
