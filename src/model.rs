// Core structs: Product, ParsedItem, ParseOutcome, CartLine, Session, CustomerRequest
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ProductId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    pub fn new(id: ProductId, name: &str, price: f64, category: &str, stock: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
            unit: None,
            category: Some(category.to_string()),
            stock,
            image: None,
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }
}

/// Vendor input for creating a product.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub stock: u32,
    pub image: Option<String>,
}

/// Partial product update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub image: Option<String>,
}

/// One product the user asked for, with a quantity of at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Result of a single parse call. No match is a normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub items: Vec<ParsedItem>,
    /// Fragments that matched no product, lowercased with whitespace collapsed.
    pub unmatched: Vec<String>,
    /// Set when more distinct products were found than the item cap allows.
    pub truncated: bool,
    /// Set when the single item came from the category fallback.
    pub fallback_used: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Vendor,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Notified,
    Fulfilled,
}

/// A customer asking to be told when an out-of-stock product is back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRequest {
    pub id: u64,
    pub customer_email: String,
    pub customer_name: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    OutOfStock,
    LowStock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAlert {
    pub product_id: ProductId,
    pub product_name: String,
    pub kind: AlertKind,
    pub stock: u32,
    pub message: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(ProductId),
    #[error("quantity must be positive")]
    InvalidQuantity,
    #[error("insufficient stock for {name}, available: {available}")]
    InsufficientStock { name: String, available: u32 },
    #[error("name is required")]
    MissingName,
    #[error("invalid price: {0}")]
    InvalidPrice(f64),
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("catalog file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog endpoint responded with status {0}")]
    Status(u16),
    #[error("invalid catalog json: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("product {0} not found")]
    NotFound(ProductId),
    #[error("{0} is not out of stock")]
    NotOutOfStock(String),
    #[error("request {0} not found")]
    UnknownRequest(u64),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
