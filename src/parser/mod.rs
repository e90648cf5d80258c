// Grocery-list parsing: segmentation, quantity extraction and the parser entry point.

pub mod grocery_parser;
pub mod quantity;
pub mod segment;

pub use grocery_parser::{GroceryListParser, Parser};
