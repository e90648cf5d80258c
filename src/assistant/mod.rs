pub mod command_handler;
pub mod replies;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::model::{
    CatalogError, CustomerRequest, NewProduct, Product, ProductId, RequestError, Role, Session,
    StorageError,
};
use crate::parser::{GroceryListParser, Parser};
use crate::requests;
use crate::storage::KeyValueStore;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct AddedItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// What happened to one utterance: cart additions, restock requests and everything that failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddReport {
    pub added: Vec<AddedItem>,
    pub requested: Vec<CustomerRequest>,
    /// Per-item stock or lookup failures; the other items are still added.
    pub errors: Vec<String>,
    pub unmatched: Vec<String>,
    pub truncated: bool,
    pub fallback_used: bool,
}

/// The voice/chat assistant: runs the parser and applies its output to the customer's cart.
pub struct Assistant<S: KeyValueStore> {
    catalog: Catalog,
    store: S,
    parser: GroceryListParser,
    session: Session,
}

impl<S: KeyValueStore> Assistant<S> {
    pub fn new(
        catalog: Catalog,
        mut store: S,
        parser: GroceryListParser,
        session: Session,
    ) -> Result<Self, StorageError> {
        session.save(&mut store)?;
        info!("Session started for {} ({} products in catalog)", session.email, catalog.len());
        Ok(Self {
            catalog,
            store,
            parser,
            session,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cart(&self) -> Result<Cart, StorageError> {
        Cart::load(&self.store, &self.session.email)
    }

    /// Slash commands go to the command handler, anything else is treated as a grocery list.
    pub fn handle_line(&mut self, line: &str) -> Result<String, StorageError> {
        let line = line.trim();
        if line.starts_with('/') {
            return command_handler::handle_command(self, line);
        }
        let report = self.handle_utterance(line)?;
        Ok(replies::add_report(&report, self.parser.config().max_items))
    }

    /// Parses the utterance and bulk-adds the result: valid items are reserved and added,
    /// out-of-stock items become restock requests, the rest is reported per item.
    pub fn handle_utterance(&mut self, utterance: &str) -> Result<AddReport, StorageError> {
        let outcome = self.parser.parse(utterance, self.catalog.products());
        info!(
            "Parsed {} item(s), {} unmatched fragment(s)",
            outcome.items.len(),
            outcome.unmatched.len()
        );

        let mut report = AddReport {
            unmatched: outcome.unmatched,
            truncated: outcome.truncated,
            fallback_used: outcome.fallback_used,
            ..AddReport::default()
        };
        if report.truncated {
            warn!("Utterance exceeded the item limit, extra items dropped");
        }

        let mut cart = self.cart()?;
        // units taken out of stock by this call, handed back if persisting fails
        let mut reserved: Vec<(ProductId, u32)> = Vec::new();
        for item in &outcome.items {
            match self.catalog.reserve(item.product_id, item.quantity) {
                Ok(product) => {
                    cart.add(product, item.quantity);
                    report.added.push(AddedItem {
                        name: product.name.clone(),
                        quantity: item.quantity,
                        unit_price: product.price,
                    });
                    reserved.push((item.product_id, item.quantity));
                }
                Err(CatalogError::InsufficientStock { available: 0, .. }) => {
                    match requests::submit(
                        &mut self.store,
                        &self.catalog,
                        &self.session,
                        item.product_id,
                        item.quantity,
                    ) {
                        Ok(request) => {
                            info!("Restock request {} filed for {}", request.id, request.product_name);
                            report.requested.push(request);
                        }
                        Err(RequestError::Storage(e)) => {
                            self.release_all(&reserved);
                            return Err(e);
                        }
                        Err(e) => report.errors.push(e.to_string()),
                    }
                }
                Err(e) => {
                    warn!("Cannot add product {}: {}", item.product_id, e);
                    report.errors.push(e.to_string());
                }
            }
        }
        if let Err(e) = cart.save(&mut self.store, &self.session.email) {
            self.release_all(&reserved);
            return Err(e);
        }

        Ok(report)
    }

    fn release_all(&mut self, reserved: &[(ProductId, u32)]) {
        for &(product_id, quantity) in reserved {
            if let Err(e) = self.catalog.release(product_id, quantity) {
                warn!("Stock release failed for {}: {}", product_id, e);
            }
        }
    }

    /// Takes units out of the cart and returns them to stock once the cart is saved.
    pub fn remove_from_cart(
        &mut self,
        product_id: ProductId,
        quantity: Option<u32>,
    ) -> Result<u32, StorageError> {
        let mut cart = self.cart()?;
        let removed = cart.remove(product_id, quantity);
        if removed > 0 {
            cart.save(&mut self.store, &self.session.email)?;
            if let Err(e) = self.catalog.release(product_id, removed) {
                warn!("Stock release failed for {}: {}", product_id, e);
            }
        }
        Ok(removed)
    }

    /// Empties the cart and returns how many units went back to stock.
    pub fn clear_cart(&mut self) -> Result<u32, StorageError> {
        let mut cart = self.cart()?;
        let lines = cart.clear();
        cart.save(&mut self.store, &self.session.email)?;

        let mut released = 0;
        for line in lines {
            match self.catalog.release(line.product_id, line.quantity) {
                Ok(_) => released += line.quantity,
                Err(e) => warn!("Stock release failed for {}: {}", line.product_id, e),
            }
        }
        Ok(released)
    }

    /// Vendors and admins manage the catalog; customers only shop.
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self.session.role, Role::Vendor | Role::Admin)
    }

    pub fn create_product(&mut self, new: NewProduct) -> Result<&Product, CatalogError> {
        self.catalog.create(new)
    }

    pub fn restock(&mut self, product_id: ProductId, quantity: u32) -> Result<&Product, CatalogError> {
        self.catalog.restock(product_id, quantity)
    }

    pub fn pending_requests(&self) -> Result<Vec<CustomerRequest>, RequestError> {
        requests::pending(&self.store)
    }

    pub fn mark_request_notified(&mut self, id: u64) -> Result<CustomerRequest, RequestError> {
        requests::mark_notified(&mut self.store, id)
    }
}
