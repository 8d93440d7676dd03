//! Per-quiz documents: header and footer regions around the hand-written body.

use quizdocs_markdown::{
    INFO_FOOTER, INFO_HEADER, author_info, badge, badge_link, escape_html,
};
use quizdocs_shared::Quiz;

use crate::links::Links;

/// Title, difficulty and tag badges, author line and the play button.
pub fn render_header(quiz: &Quiz, locale: &str, links: &Links) -> String {
    let locales = links.locales();
    let info = quiz.resolve_info(locale, &locales.default);

    let title = escape_html(info.title.as_deref().unwrap_or_default());
    let difficulty = badge(
        "",
        &locales.translate(locale, &quiz.difficulty.translation_key()),
        quiz.difficulty.color(),
        &[],
    );
    let tags = quiz
        .tags(locale, &locales.default)
        .iter()
        .map(|tag| badge("", &format!("#{tag}"), "999", &[]))
        .collect::<Vec<_>>()
        .join(" ");
    let play = badge_link(
        &links.play(quiz.no, locale),
        "",
        &locales.translate(locale, "badge.take-the-challenge"),
        "3178c6",
        &[("logo", "typescript")],
    );

    format!(
        "<h1>{title} {difficulty} {tags}</h1><blockquote><p>{}</p></blockquote>{play}<br><br>",
        author_info(info.author.as_ref())
    )
}

/// Back, solutions and share buttons.
pub fn render_footer(quiz: &Quiz, locale: &str, links: &Links) -> String {
    let locales = links.locales();

    let mut out = badge_link(
        &links.back_to_index(locale),
        "",
        &locales.translate(locale, "badge.back"),
        "grey",
        &[],
    );
    out.push_str(&badge_link(
        &links.solutions(quiz.no),
        "",
        &locales.translate(locale, "badge.checkout-solutions"),
        "de5a77",
        &[("logo", "awesome-lists"), ("logoColor", "white")],
    ));
    out.push_str(&badge_link(
        &links.share_answer(quiz.no, locale),
        "",
        &locales.translate(locale, "badge.share-your-solutions"),
        "green",
        &[],
    ));
    out
}

/// Insert missing regions, then replace both with fresh content.
///
/// Running this on its own output with the same header and footer returns
/// the input unchanged.
pub fn update_item(text: &str, header: &str, footer: &str) -> String {
    let text = INFO_HEADER.ensure_leading(text);
    let text = INFO_FOOTER.ensure_trailing(&text);

    let text = INFO_HEADER.replace(&text, header).unwrap_or(text);
    INFO_FOOTER.replace(&text, footer).unwrap_or(text)
}
