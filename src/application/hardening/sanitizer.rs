//! Markup stripping for free text
//!
//! Every function here is pure. The cleaner is built once and shared.

use std::collections::HashSet;

use ammonia::Builder;
use once_cell::sync::Lazy;

use crate::domain::entities::Anime;

/// Maximum length, in characters, of a sanitized text
pub const MAX_TEXT_LEN: usize = 100;

/// Replacement for input that sanitizes down to nothing
pub const INVALID_TEXT_MARKER: &str = "CARACTERES OU SIMBOLOS INPROPRIOS";

/// Upper bound on strip/decode rounds. After the first round the text is at
/// most [`MAX_TEXT_LEN`] characters and every round that changes it removes
/// at least one, so only a text that never settles can reach this.
const MAX_PASSES: usize = MAX_TEXT_LEN + 2;

/// No tag survives; `script` and `style` lose their content as well.
static MARKUP_STRIPPER: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::empty();
    builder
        .clean_content_tags(HashSet::from(["script", "style"]))
        .strip_comments(true);
    builder
});

/// Sanitize an optional text. `None` stays `None`.
pub fn sanitize(input: Option<&str>) -> Option<String> {
    input.map(sanitize_text)
}

/// Reduce `input` to plain text of at most [`MAX_TEXT_LEN`] characters.
///
/// Tags are stripped first and entities decoded afterwards. Decoding can
/// surface markup that was entity-encoded in the input, so the round is
/// repeated until the text no longer changes. Text that is still changing
/// when the pass budget runs out is replaced by [`INVALID_TEXT_MARKER`].
pub fn sanitize_text(input: &str) -> String {
    let mut current = truncate(&strip_pass(input));
    let mut settled = false;
    for _ in 1..MAX_PASSES {
        let next = truncate(&strip_pass(&current));
        if next == current {
            settled = true;
            break;
        }
        current = next;
    }

    if !settled || current.is_empty() {
        INVALID_TEXT_MARKER.to_string()
    } else {
        current
    }
}

/// One strip -> decode -> whitespace round
fn strip_pass(input: &str) -> String {
    let cleaned = MARKUP_STRIPPER.clean(input).to_string();
    normalize_whitespace(&decode_text_entities(&cleaned))
}

/// Undo the escaping the HTML serializer applies to text nodes.
///
/// `&amp;` goes last so `&amp;lt;` decodes to the literal `&lt;` and not `<`.
fn decode_text_entities(serialized: &str) -> String {
    serialized
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_TEXT_LEN {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_TEXT_LEN).collect();
    cut.trim_end().to_string()
}

/// Records with free-text fields that must be sanitized before leaving the
/// service. Identifiers are copied through untouched.
pub trait SanitizeRecord: Sized {
    fn sanitized(&self) -> Self;
}

impl SanitizeRecord for Anime {
    fn sanitized(&self) -> Self {
        Anime::reconstruct(self.id(), sanitize_text(self.name()))
    }
}

/// Sanitized copy of an optional record
pub fn sanitize_record<T: SanitizeRecord>(record: Option<&T>) -> Option<T> {
    record.map(SanitizeRecord::sanitized)
}
