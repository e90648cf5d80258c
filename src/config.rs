use crate::model::Role;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use thiserror::Error;

const STOP_WORDS: &[&str] = &[
    // articles and fillers
    "a", "an", "the", "some", "of", "for", "to", "me", "my", "i", "please", "also", "few",
    "can", "you", "would", "like", "us", "just", "more", "piece", "pieces", "pack", "packet",
    // adjectives
    "fresh", "organic", "sweet", "whole", "green", "red", "big", "small", "large", "ripe",
    "good", "nice",
    // units
    "kg", "kilo", "kilogram", "g", "gram", "gm", "dozen", "cup", "litre", "litres", "liter", "l",
    "ml", "bunch", "bag", "box", "bottle", "bottles", "per",
    // ordering verbs
    "add", "get", "need", "want", "buy", "order", "give", "put", "send", "bring",
];

const QUANTITY_WORDS: &[(&str, u32)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
];

const SEPARATOR_SYMBOLS: &[char] = &[',', '&', '+'];
const SEPARATOR_WORDS: &[&str] = &["and", "plus", "with"];

const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("vegetable", "vegetables"),
    ("veggie", "vegetables"),
    ("veg", "vegetables"),
    ("fruit", "fruits"),
    ("dairy", "dairy"),
    ("staple", "staples"),
    ("grain", "staples"),
];

pub const DEFAULT_MAX_ITEMS: usize = 15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tables driving the grocery-list parser. Every field can be overridden from the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub stop_words: BTreeSet<String>,
    pub quantity_words: BTreeMap<String, u32>,
    pub separator_symbols: Vec<char>,
    pub separator_words: Vec<String>,
    /// Keyword (singular form) to catalog category.
    pub category_keywords: BTreeMap<String, String>,
    pub max_items: usize,
    pub category_fallback: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            quantity_words: QUANTITY_WORDS
                .iter()
                .map(|(w, n)| (w.to_string(), *n))
                .collect(),
            separator_symbols: SEPARATOR_SYMBOLS.to_vec(),
            separator_words: SEPARATOR_WORDS.iter().map(|w| w.to_string()).collect(),
            category_keywords: CATEGORY_KEYWORDS
                .iter()
                .map(|(k, c)| (k.to_string(), c.to_string()))
                .collect(),
            max_items: DEFAULT_MAX_ITEMS,
            category_fallback: false,
        }
    }
}

impl ParserConfig {
    pub fn with_category_fallback(mut self, enabled: bool) -> Self {
        self.category_fallback = enabled;
        self
    }

    pub fn is_separator_word(&self, word: &str) -> bool {
        self.separator_words.iter().any(|w| w.eq_ignore_ascii_case(word))
    }

    pub fn quantity_word(&self, word: &str) -> Option<u32> {
        self.quantity_words.get(word).copied()
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog_url: Option<String>,
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default = "default_db_path")]
    pub db_path: String,
    pub customer_email: String,
    #[serde(default = "default_customer_name")]
    pub customer_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub parser: ParserConfig,
}

fn default_db_path() -> String {
    "freshcart.db".to_string()
}

fn default_customer_name() -> String {
    "Customer".to_string()
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}
