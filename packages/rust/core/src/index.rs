//! Index document: the badge list of every challenge, grouped by difficulty.

use quizdocs_markdown::{CHALLENGES, badge, badge_link};
use quizdocs_shared::Quiz;

use crate::links::Links;

/// Render the challenge list for `locale`.
///
/// `quizzes` must already be sorted by difficulty; a group heading badge is
/// emitted each time the difficulty changes.
pub fn render_challenges(quizzes: &[Quiz], locale: &str, links: &Links) -> String {
    let locales = links.locales();
    let mut out = String::new();
    let mut prev = None;

    for quiz in quizzes {
        if prev != Some(quiz.difficulty) {
            if prev.is_some() {
                out.push_str("<br><br>");
            }
            let label = locales.translate(locale, &quiz.difficulty.translation_key());
            out.push_str(&badge(&label, " ", quiz.difficulty.color(), &[]));
            out.push_str("<br>");
        }

        let text = format!("#{}・{}", quiz.no, quiz.title(locale, &locales.default));
        out.push_str(&badge_link(
            &links.quiz_readme(quiz, locale, false),
            "",
            &text,
            quiz.difficulty.color(),
            &[],
        ));

        prev = Some(quiz.difficulty);
    }

    out
}

/// Swap the rendered list into the `challenges` region of an index document.
///
/// Returns `None` when the document has no such region.
pub fn update_index(text: &str, rendered: &str) -> Option<String> {
    CHALLENGES.replace(text, &format!("\n{rendered}\n"))
}
