//! Content cleaning applied to every rendered body.
//!
//! Steps run in a fixed order and the whole transform is idempotent:
//! reference tags, then inline reference tokens, then blank-line runs, then trim.

use regex::Regex;
use rolesmith_core::REFERENCE_TOKEN;
use std::sync::LazyLock;

/// `<reference ...>` and `</reference>`; inner content stays.
static REFERENCE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?reference\b[^>]*>").expect("reference tag regex is valid"));

/// A reference token plus the horizontal whitespace around it.
static INLINE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"[ \t]*{}[ \t]*", REFERENCE_TOKEN)).expect("inline reference regex is valid")
});

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline regex is valid"));

/// Repeats the single pass until the text stops changing. Stripping a tag or
/// token can splice its neighbours into a new one, so one pass is not enough.
/// Every pass that changes the text shortens it, so this terminates.
pub fn clean_content(text: &str) -> String {
    let mut current = clean_pass(text);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(text: &str) -> String {
    let text = REFERENCE_TAG.replace_all(text, "");
    let text = strip_inline_references(&text);
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Drop tokens with their surrounding spaces. A token between two words
/// leaves a single space so the words do not fuse; a run of adjacent tokens
/// leaves one space in total.
fn strip_inline_references(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in INLINE_REFERENCE.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        let line_start = out.is_empty() || out.ends_with('\n');
        let rest = &text[m.end()..];
        let line_end = rest.is_empty() || rest.starts_with('\n') || rest.starts_with('\r');
        if !line_start && !line_end && !out.ends_with(' ') {
            out.push(' ');
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_token() {
        assert_eq!(clean_content("Be concise. @!execution://summarize"), "Be concise.");
    }

    #[test]
    fn token_between_words_leaves_one_space() {
        assert_eq!(clean_content("Use @thought://x  daily"), "Use daily");
    }

    #[test]
    fn adjacent_tokens_leave_one_space() {
        assert_eq!(clean_content("a @x://y @z://w b"), "a b");
        assert_eq!(clean_content("a\n@x://y @z://w b"), "a\nb");
    }

    #[test]
    fn tags_spliced_by_removal_are_stripped() {
        assert_eq!(clean_content("<refer<reference>ence>"), "");
        assert_eq!(clean_content("<ref<reference x>erence>body</reference>"), "body");
    }

    #[test]
    fn token_only_line_disappears() {
        assert_eq!(clean_content("a\n  @!thought://x  \nb"), "a\n\nb");
    }

    #[test]
    fn reference_tags_keep_inner_content() {
        let text = "<reference protocol=\"thought\" resource=\"x\">\n# Expanded\nbody\n</reference>";
        assert_eq!(clean_content(text), "# Expanded\nbody");
    }

    #[test]
    fn collapses_newline_runs() {
        assert_eq!(clean_content("a\n\n\n\n\nb\n\nc"), "a\n\nb\n\nc");
    }

    #[test]
    fn idempotent_on_mixed_input() {
        let inputs = [
            "",
            "   ",
            "plain text",
            "x @a://b y @!c://d\n\n\n\n@e://f\nz",
            "<reference>@!thought://t</reference> tail",
            "<Reference src=\"1\">in</REFERENCE>\n\n\n",
            "@x://y",
            "foo@x://y\r\nbar",
            "\n\n\n  lead and trail  \n\n\n",
            "<refer<reference>ence>",
            "<ref<reference x>erence>body</reference>",
            "<reference@x://y>inner",
            "@x:<reference>//y tail",
            "a @x://y @z://w b",
        ];
        for input in inputs {
            let once = clean_content(input);
            assert_eq!(clean_content(&once), once, "not idempotent for {input:?}");
        }
    }
}
