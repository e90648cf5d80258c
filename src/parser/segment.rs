use crate::config::ParserConfig;

/// Splits an utterance into item phrases on separator symbols and separator words.
/// Empty pieces are dropped; the remaining fragments are whitespace-collapsed.
pub fn split_fragments(utterance: &str, cfg: &ParserConfig) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for chunk in utterance.split(|c: char| cfg.separator_symbols.contains(&c)) {
        for word in chunk.split_whitespace() {
            let bare = word.trim_matches(|c: char| !c.is_alphanumeric());
            if !bare.is_empty() && cfg.is_separator_word(bare) {
                flush(&mut current, &mut fragments);
            } else {
                current.push(word);
            }
        }
        flush(&mut current, &mut fragments);
    }

    fragments
}

fn flush(current: &mut Vec<&str>, fragments: &mut Vec<String>) {
    if !current.is_empty() {
        fragments.push(current.join(" "));
        current.clear();
    }
}
