use crate::config::ParserConfig;

fn is_numeral(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Picks the quantity for a fragment and returns the tokens left for product matching.
///
/// The first numeral wins over any quantity word; with neither present the quantity is 1.
/// A numeral of zero or one too large for `u32` also falls back to 1. Every numeral and
/// quantity word is removed from the returned tokens, not only the one that was used.
pub fn extract_quantity(tokens: Vec<String>, cfg: &ParserConfig) -> (u32, Vec<String>) {
    let numeral = tokens
        .iter()
        .find(|t| is_numeral(t))
        .map(|t| t.parse::<u32>().ok().filter(|n| *n > 0).unwrap_or(1));
    let word = tokens.iter().find_map(|t| cfg.quantity_word(t));
    let quantity = numeral.or(word).unwrap_or(1).max(1);

    let rest = tokens
        .into_iter()
        .filter(|t| !is_numeral(t) && cfg.quantity_word(t).is_none())
        .collect();

    (quantity, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn numeral_beats_word() {
        let cfg = ParserConfig::default();
        let (q, rest) = extract_quantity(toks(&["2", "three", "appl"]), &cfg);
        assert_eq!(q, 2);
        assert_eq!(rest, toks(&["appl"]));
    }

    #[test]
    fn word_used_when_no_numeral() {
        let cfg = ParserConfig::default();
        let (q, rest) = extract_quantity(toks(&["twelve", "egg"]), &cfg);
        assert_eq!(q, 12);
        assert_eq!(rest, toks(&["egg"]));
    }

    #[test]
    fn defaults_to_one() {
        let cfg = ParserConfig::default();
        assert_eq!(extract_quantity(toks(&["milk"]), &cfg).0, 1);
        assert_eq!(extract_quantity(Vec::new(), &cfg).0, 1);
    }

    #[test]
    fn invalid_numerals_become_one() {
        let cfg = ParserConfig::default();
        assert_eq!(extract_quantity(toks(&["0", "milk"]), &cfg).0, 1);
        assert_eq!(extract_quantity(toks(&["99999999999", "milk"]), &cfg).0, 1);
    }

    #[test]
    fn first_numeral_is_used_and_all_are_removed() {
        let cfg = ParserConfig::default();
        let (q, rest) = extract_quantity(toks(&["3", "milk", "5", "two"]), &cfg);
        assert_eq!(q, 3);
        assert_eq!(rest, toks(&["milk"]));
    }
}
