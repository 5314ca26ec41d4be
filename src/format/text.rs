//! Text cleanup for provider strings

use super::irc::{self, Color};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static ENTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&#?\w+;").unwrap());

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+)")
        .unwrap()
});

/// Decode HTML entities and flatten line breaks to spaces
///
/// Unknown or invalid entities are left untouched.
pub fn unescape(text: &str) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    ENTITY
        .replace_all(&flat, |caps: &Captures<'_>| {
            let entity = &caps[0];
            decode_entity(entity).unwrap_or_else(|| entity.to_string())
        })
        .into_owned()
}

/// Decode one `&...;` token; `None` when it is not a known entity
fn decode_entity(entity: &str) -> Option<String> {
    let decoded = html_escape::decode_html_entities(entity);
    (decoded != entity).then(|| decoded.into_owned())
}

/// Colour every URL in `text` red
pub fn colorize_urls(text: &str) -> String {
    URL.replace_all(text, |caps: &Captures<'_>| irc::color(&caps[1], Color::Red))
        .into_owned()
}
