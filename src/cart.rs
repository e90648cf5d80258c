// Per-customer cart persisted through the key-value store
use crate::model::{CartLine, Product, ProductId, StorageError};
use crate::storage::{load_json, save_json, KeyValueStore};
use chrono::Utc;

const NAMESPACE: &str = "cart";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn load(store: &dyn KeyValueStore, owner: &str) -> Result<Self, StorageError> {
        let lines: Option<Vec<CartLine>> = load_json(store, NAMESPACE, owner)?;
        Ok(Self {
            lines: lines.unwrap_or_default(),
        })
    }

    pub fn save(&self, store: &mut dyn KeyValueStore, owner: &str) -> Result<(), StorageError> {
        if self.lines.is_empty() {
            return store.remove(NAMESPACE, owner);
        }
        save_json(store, NAMESPACE, owner, &self.lines)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    /// Adds to the existing line for the product, or appends a new one at the current price.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity,
                added_at: Utc::now(),
            }),
        }
    }

    /// Removes up to `quantity` units and returns how many were actually removed.
    /// `None` removes the whole line.
    pub fn remove(&mut self, product_id: ProductId, quantity: Option<u32>) -> u32 {
        let Some(pos) = self.lines.iter().position(|l| l.product_id == product_id) else {
            return 0;
        };
        let line = &mut self.lines[pos];
        let removed = quantity.map_or(line.quantity, |q| q.min(line.quantity));
        line.quantity -= removed;
        if line.quantity == 0 {
            self.lines.remove(pos);
        }
        removed
    }

    /// Empties the cart, returning the lines that were in it.
    pub fn clear(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.unit_price * l.quantity as f64)
            .sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn milk() -> Product {
        Product::new(5, "Whole Milk", 65.0, "dairy", 30)
    }

    fn rice() -> Product {
        Product::new(7, "Basmati Rice", 85.0, "staples", 50)
    }

    #[test]
    fn add_merges_lines() {
        let mut cart = Cart::default();
        cart.add(&milk(), 2);
        cart.add(&rice(), 1);
        cart.add(&milk(), 3);
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.quantity_of(5), 5);
        assert_eq!(cart.item_count(), 6);
        assert!((cart.total() - (5.0 * 65.0 + 85.0)).abs() < 1e-9);
    }

    #[test]
    fn remove_partial_and_whole() {
        let mut cart = Cart::default();
        cart.add(&milk(), 4);
        assert_eq!(cart.remove(5, Some(1)), 1);
        assert_eq!(cart.quantity_of(5), 3);
        assert_eq!(cart.remove(5, Some(10)), 3);
        assert!(cart.is_empty());
        assert_eq!(cart.remove(5, None), 0);
    }

    #[test]
    fn persists_per_owner() {
        let mut store = MemoryStore::new();
        let mut cart = Cart::default();
        cart.add(&rice(), 2);
        cart.save(&mut store, "a@b.com").unwrap();

        let loaded = Cart::load(&store, "a@b.com").unwrap();
        assert_eq!(loaded, cart);
        assert!(Cart::load(&store, "other@b.com").unwrap().is_empty());

        cart.clear();
        cart.save(&mut store, "a@b.com").unwrap();
        assert!(store.get("cart", "a@b.com").unwrap().is_none());
    }
}
