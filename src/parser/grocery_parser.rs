// Free-text grocery list parsing against a catalog snapshot
use crate::config::ParserConfig;
use crate::matcher::{best_match, fallback_product, NamedProduct};
use crate::model::{ParseOutcome, ParsedItem, Product, ProductId};
use crate::normalizer::{collapse_whitespace, normalize_text, tokenize};
use crate::parser::quantity::extract_quantity;
use crate::parser::segment::split_fragments;
use std::collections::BTreeSet;
use tracing::debug;

pub trait Parser {
    fn parse(&self, utterance: &str, catalog: &[Product]) -> ParseOutcome;
}

/// Turns an utterance such as "add 2 tomatoes and a dozen bananas" into catalog items.
///
/// Parsing is a pure function of the utterance and the catalog: it never fails, and
/// fragments it cannot place are returned in `ParseOutcome::unmatched`.
#[derive(Debug, Clone, Default)]
pub struct GroceryListParser {
    config: ParserConfig,
}

impl GroceryListParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn category_fallback(&self, utterance: &str, catalog: &[Product]) -> Option<ParsedItem> {
        let cfg = &self.config;
        // whole utterance as one intent, separators dropped
        let joined = split_fragments(utterance, cfg).join(" ");
        let (quantity, rest) = extract_quantity(tokenize(&joined, cfg), cfg);
        let product = fallback_product(&rest, catalog, cfg)?;
        debug!(product = %product.name, quantity, "category fallback");
        Some(ParsedItem {
            product_id: product.id,
            quantity,
        })
    }
}

impl Parser for GroceryListParser {
    fn parse(&self, utterance: &str, catalog: &[Product]) -> ParseOutcome {
        let cfg = &self.config;
        let index = NamedProduct::index(catalog, cfg);
        let mut outcome = ParseOutcome::default();

        for fragment in split_fragments(utterance, cfg) {
            // nothing but punctuation
            if normalize_text(&fragment).trim().is_empty() {
                continue;
            }

            let (quantity, rest) = extract_quantity(tokenize(&fragment, cfg), cfg);
            let tokens: BTreeSet<String> = rest.into_iter().collect();

            match best_match(&tokens, &index) {
                Some(m) => {
                    debug!(fragment = %fragment, product = %m.product.name, score = m.score, quantity, "matched");
                    merge(&mut outcome.items, m.product.id, quantity);
                }
                None => {
                    debug!(fragment = %fragment, "no product matched");
                    outcome
                        .unmatched
                        .push(collapse_whitespace(&fragment.to_lowercase()));
                }
            }
        }

        if outcome.items.len() > cfg.max_items {
            outcome.items.truncate(cfg.max_items);
            outcome.truncated = true;
        }

        if cfg.category_fallback && outcome.items.is_empty() {
            if let Some(item) = self.category_fallback(utterance, catalog) {
                outcome.items.push(item);
                outcome.unmatched.clear();
                outcome.fallback_used = true;
            }
        }

        outcome
    }
}

fn merge(items: &mut Vec<ParsedItem>, product_id: ProductId, quantity: u32) {
    match items.iter_mut().find(|i| i.product_id == product_id) {
        Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
        None => items.push(ParsedItem {
            product_id,
            quantity,
        }),
    }
}
