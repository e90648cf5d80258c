// Matcher module: scores fragments against product names and picks category representatives.

pub mod category;
pub mod overlap;

pub use category::fallback_product;
pub use overlap::{best_match, NamedProduct};
