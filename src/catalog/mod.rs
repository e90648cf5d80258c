// Catalog snapshot: products, stock reservations and vendor stock alerts.

pub mod provider;

pub use provider::{CatalogProvider, FileCatalogProvider, HttpCatalogProvider};

use crate::model::{AlertKind, CatalogError, NewProduct, Product, ProductId, ProductUpdate, StockAlert};
use tracing::info;

/// Stock below this level is reported as low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The default shop assortment used when no catalog source is configured.
    pub fn seeded() -> Self {
        Self::new(vec![
            Product::new(1, "Fresh Tomatoes", 40.0, "vegetables", 25).with_unit("per kg").with_image("🍅"),
            Product::new(2, "Organic Spinach", 30.0, "vegetables", 15).with_unit("per bunch").with_image("🥬"),
            Product::new(3, "Sweet Bananas", 60.0, "fruits", 20).with_unit("per dozen").with_image("🍌"),
            Product::new(4, "Fresh Apples", 120.0, "fruits", 18).with_unit("per kg").with_image("🍎"),
            Product::new(5, "Whole Milk", 65.0, "dairy", 30).with_unit("per litre").with_image("🥛"),
            Product::new(6, "Greek Yogurt", 45.0, "dairy", 12).with_unit("per cup").with_image("🥄"),
            Product::new(7, "Basmati Rice", 85.0, "staples", 50).with_unit("per kg").with_image("🌾"),
            Product::new(8, "Wheat Flour", 42.0, "staples", 35).with_unit("per kg").with_image("🌾"),
        ])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: ProductId) -> Result<&mut Product, CatalogError> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    /// Takes `quantity` units out of stock for a cart addition.
    pub fn reserve(&mut self, id: ProductId, quantity: u32) -> Result<&Product, CatalogError> {
        if quantity == 0 {
            return Err(CatalogError::InvalidQuantity);
        }
        let product = self.get_mut(id)?;
        if product.stock < quantity {
            return Err(CatalogError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
            });
        }
        product.stock -= quantity;
        Ok(product)
    }

    /// Puts units back into stock when they leave the cart.
    pub fn release(&mut self, id: ProductId, quantity: u32) -> Result<&Product, CatalogError> {
        if quantity == 0 {
            return Err(CatalogError::InvalidQuantity);
        }
        let product = self.get_mut(id)?;
        product.stock = product.stock.saturating_add(quantity);
        Ok(product)
    }

    /// Adds a vendor product under the next free id (highest id + 1).
    pub fn create(&mut self, new: NewProduct) -> Result<&Product, CatalogError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(CatalogError::MissingName);
        }
        check_price(new.price)?;

        let id = self.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = Product {
            id,
            name: name.to_string(),
            price: new.price,
            unit: new.unit.and_then(non_empty),
            category: new.category.and_then(non_empty),
            stock: new.stock,
            image: new.image.and_then(non_empty),
        };
        info!("Product {} created: {}", id, product.name);
        self.products.push(product);
        Ok(&self.products[self.products.len() - 1])
    }

    /// Applies the fields present in `update`. Nothing changes when validation fails.
    pub fn update(&mut self, id: ProductId, update: ProductUpdate) -> Result<&Product, CatalogError> {
        if let Some(price) = update.price {
            check_price(price)?;
        }
        let product = self.get_mut(id)?;
        // a blank name keeps the current one
        if let Some(name) = update.name.and_then(non_empty) {
            product.name = name;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        if let Some(unit) = update.unit {
            product.unit = non_empty(unit);
        }
        if let Some(category) = update.category {
            product.category = non_empty(category);
        }
        if let Some(image) = update.image {
            product.image = non_empty(image);
        }
        info!("Product {} updated", id);
        Ok(product)
    }

    /// Vendor restock: adds units on top of the current stock.
    pub fn restock(&mut self, id: ProductId, quantity: u32) -> Result<&Product, CatalogError> {
        if quantity == 0 {
            return Err(CatalogError::InvalidQuantity);
        }
        let stock = self.get(id).ok_or(CatalogError::NotFound(id))?.stock;
        self.update(
            id,
            ProductUpdate {
                stock: Some(stock.saturating_add(quantity)),
                ..ProductUpdate::default()
            },
        )
    }

    /// Products that are out of stock or running low, in catalog order.
    pub fn stock_alerts(&self) -> Vec<StockAlert> {
        self.products
            .iter()
            .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
            .map(|p| {
                let (kind, message) = if p.stock == 0 {
                    (AlertKind::OutOfStock, format!("{} is out of stock", p.name))
                } else {
                    (
                        AlertKind::LowStock,
                        format!("{} is running low ({} remaining)", p.name, p.stock),
                    )
                };
                StockAlert {
                    product_id: p.id,
                    product_name: p.name.clone(),
                    kind,
                    stock: p.stock,
                    message,
                }
            })
            .collect()
    }
}

fn check_price(price: f64) -> Result<(), CatalogError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidPrice(price))
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
