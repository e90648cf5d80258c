// Text normalization shared by utterances and product names
use crate::config::ParserConfig;
use std::collections::BTreeSet;

/// Lowercases the text and blanks out everything except ASCII letters, digits and whitespace.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Naive plural stripping, applied only to words longer than three characters.
pub fn singularize(word: &str) -> String {
    if word.len() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        format!("{}y", stem)
    } else if let Some(stem) = word.strip_suffix("es") {
        stem.to_string()
    } else if let Some(stem) = word.strip_suffix('s') {
        stem.to_string()
    } else {
        word.to_string()
    }
}

/// Produces the ordered token list for a piece of text.
///
/// A word is dropped when either its raw or its singular form is a stop word,
/// so plural units like "litres" are filtered even though they singularize oddly.
pub fn tokenize(text: &str, cfg: &ParserConfig) -> Vec<String> {
    normalize_text(text)
        .split_whitespace()
        .filter_map(|raw| {
            let token = singularize(raw);
            if cfg.stop_words.contains(raw) || cfg.stop_words.contains(&token) {
                None
            } else {
                Some(token)
            }
        })
        .collect()
}

pub fn token_set(text: &str, cfg: &ParserConfig) -> BTreeSet<String> {
    tokenize(text, cfg).into_iter().collect()
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
