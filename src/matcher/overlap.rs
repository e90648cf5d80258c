use crate::config::ParserConfig;
use crate::model::Product;
use crate::normalizer::token_set;
use std::collections::BTreeSet;

/// A catalog product paired with the token set of its name.
#[derive(Debug)]
pub struct NamedProduct<'a> {
    pub product: &'a Product,
    pub tokens: BTreeSet<String>,
}

impl<'a> NamedProduct<'a> {
    /// Tokenizes every product name once per parse call. Products with an empty name are skipped.
    pub fn index(catalog: &'a [Product], cfg: &ParserConfig) -> Vec<NamedProduct<'a>> {
        catalog
            .iter()
            .filter(|p| !p.name.trim().is_empty())
            .map(|product| NamedProduct {
                product,
                tokens: token_set(&product.name, cfg),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub product: &'a Product,
    pub score: usize,
}

/// Number of tokens shared by the fragment and the product name.
pub fn overlap_score(fragment: &BTreeSet<String>, name: &BTreeSet<String>) -> usize {
    fragment.intersection(name).count()
}

/// Picks the product with the strictly highest overlap; ties keep the earlier catalog entry.
/// Returns `None` when nothing shares a single token with the fragment.
pub fn best_match<'a>(fragment: &BTreeSet<String>, candidates: &[NamedProduct<'a>]) -> Option<Match<'a>> {
    let mut best: Option<Match<'a>> = None;
    for candidate in candidates {
        let score = overlap_score(fragment, &candidate.tokens);
        if score == 0 {
            continue;
        }
        if best.is_none_or(|b| score > b.score) {
            best = Some(Match {
                product: candidate.product,
                score,
            });
        }
    }
    best
}
