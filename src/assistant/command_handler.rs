// assistant/command_handler.rs

use crate::assistant::{replies, Assistant};
use crate::model::{NewProduct, RequestError, StorageError};
use crate::storage::KeyValueStore;
use crate::utils::format_inr;
use tracing::{info, warn};

/// Handles a slash command and returns the reply text.
pub fn handle_command<S: KeyValueStore>(
    assistant: &mut Assistant<S>,
    command_text: &str,
) -> Result<String, StorageError> {
    info!("Handling command: {}", command_text);
    let mut parts = command_text.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    let reply = match command {
        "/help" => replies::help(),
        "/cart" => replies::cart(&assistant.cart()?),
        "/catalog" => replies::catalog(assistant.catalog()),
        "/alerts" => replies::alerts(&assistant.catalog().stock_alerts()),
        "/whoami" => replies::session(assistant.session()),
        "/clear" => {
            let released = assistant.clear_cart()?;
            format!("🧹 Cart cleared, {} item(s) returned to stock.", released)
        }
        "/remove" => {
            let product_id = args.first().and_then(|a| a.parse::<u32>().ok());
            let quantity = match args.get(1) {
                Some(a) => a.parse::<u32>().ok().filter(|q| *q > 0).map(Some),
                None => Some(None),
            };
            match (product_id, quantity) {
                (Some(id), Some(quantity)) => match assistant.remove_from_cart(id, quantity)? {
                    0 => format!("🤷 Product {} is not in your cart.", id),
                    n => format!("➖ Removed {} of product {}.", n, id),
                },
                (Some(_), None) => "❌ Quantity must be a positive number.".to_string(),
                (None, _) => "Usage: /remove <product id> [quantity]".to_string(),
            }
        }
        "/restock" if !assistant.can_manage_catalog() => vendor_only(),
        "/restock" => {
            let product_id = args.first().and_then(|a| a.parse::<u32>().ok());
            let quantity = args.get(1).and_then(|a| a.parse::<u32>().ok());
            match (product_id, quantity) {
                (Some(id), Some(quantity)) => restock(assistant, id, quantity)?,
                _ => "Usage: /restock <product id> <quantity>".to_string(),
            }
        }
        "/newproduct" if !assistant.can_manage_catalog() => vendor_only(),
        "/newproduct" => match new_product(&args) {
            Some(new) => match assistant.create_product(new) {
                Ok(p) => format!("🆕 Added [{}] {} at {}.", p.id, p.name, format_inr(p.price)),
                Err(e) => format!("❌ {}", e),
            },
            None => "Usage: /newproduct <price> <stock> <category|-> <name>".to_string(),
        },
        "/requests" => match assistant.pending_requests() {
            Ok(requests) => replies::requests(&requests),
            Err(RequestError::Storage(e)) => return Err(e),
            Err(e) => format!("❌ {}", e),
        },
        "/notify" => match args.first().and_then(|a| a.parse::<u64>().ok()) {
            Some(id) => match assistant.mark_request_notified(id) {
                Ok(r) => format!("🔔 Request #{} for {} marked as notified.", r.id, r.product_name),
                Err(RequestError::Storage(e)) => return Err(e),
                Err(e) => format!("❌ {}", e),
            },
            None => "Usage: /notify <request id>".to_string(),
        },
        _ => {
            warn!("Unknown command: {}", command);
            "🤖 Unknown command. Type /help for a list of commands.".to_string()
        }
    };

    Ok(reply)
}

fn vendor_only() -> String {
    "🔒 Only vendors can change the catalog.".to_string()
}

fn restock<S: KeyValueStore>(
    assistant: &mut Assistant<S>,
    product_id: u32,
    quantity: u32,
) -> Result<String, StorageError> {
    let (name, stock) = match assistant.restock(product_id, quantity) {
        Ok(p) => (p.name.clone(), p.stock),
        Err(e) => return Ok(format!("❌ {}", e)),
    };
    let waiting = match assistant.pending_requests() {
        Ok(requests) => requests.iter().filter(|r| r.product_id == product_id).count(),
        Err(RequestError::Storage(e)) => return Err(e),
        Err(_) => 0,
    };
    let mut msg = format!("📦 {} restocked, {} in stock.", name, stock);
    if waiting > 0 {
        msg.push_str(&format!(" {} customer request(s) waiting, see /requests.", waiting));
    }
    Ok(msg)
}

/// `<price> <stock> <category|-> <name words...>`
fn new_product(args: &[&str]) -> Option<NewProduct> {
    let [price, stock, category, name @ ..] = args else {
        return None;
    };
    if name.is_empty() {
        return None;
    }
    Some(NewProduct {
        name: name.join(" "),
        price: price.parse().ok()?,
        stock: stock.parse().ok()?,
        category: (*category != "-").then(|| category.to_string()),
        ..NewProduct::default()
    })
}

#[cfg(test)]
mod tests {
    use crate::assistant::Assistant;
    use crate::catalog::Catalog;
    use crate::model::{Role, Session};
    use crate::parser::GroceryListParser;
    use crate::storage::MemoryStore;

    fn assistant() -> Assistant<MemoryStore> {
        Assistant::new(
            Catalog::seeded(),
            MemoryStore::new(),
            GroceryListParser::new(),
            Session::start("asha@example.com", "Asha", Role::Customer),
        )
        .unwrap()
    }

    #[test]
    fn cart_command_shows_lines_and_total() {
        let mut a = assistant();
        a.handle_line("2 milk").unwrap();
        let reply = a.handle_line("/cart").unwrap();
        assert!(reply.contains("[5] 2 × Whole Milk"));
        assert!(reply.contains("Total: ₹130.00 (2 items)"));
    }

    #[test]
    fn remove_command_parses_arguments() {
        let mut a = assistant();
        a.handle_line("3 rice").unwrap();
        assert_eq!(a.handle_line("/remove 7 1").unwrap(), "➖ Removed 1 of product 7.");
        assert_eq!(a.handle_line("/remove 1").unwrap(), "🤷 Product 1 is not in your cart.");
        assert!(a.handle_line("/remove").unwrap().starts_with("Usage"));
        assert_eq!(a.handle_line("/remove 7 0").unwrap(), "❌ Quantity must be a positive number.");
        assert_eq!(a.handle_line("/remove 7 lots").unwrap(), "❌ Quantity must be a positive number.");
        assert_eq!(a.cart().unwrap().quantity_of(7), 2);
    }

    #[test]
    fn request_commands_round_trip() {
        let mut a = assistant();
        a.handle_line("12 yogurt").unwrap();
        a.handle_line("yogurt").unwrap();
        assert!(a.handle_line("/requests").unwrap().contains("#1 1 × Greek Yogurt"));
        assert!(a.handle_line("/notify 1").unwrap().contains("marked as notified"));
        assert!(a.handle_line("/requests").unwrap().contains("No pending"));
        assert!(a.handle_line("/notify 9").unwrap().contains("request 9 not found"));
    }

    #[test]
    fn alerts_and_unknown_commands() {
        let mut a = assistant();
        a.handle_line("12 yogurt").unwrap();
        assert!(a.handle_line("/alerts").unwrap().contains("Greek Yogurt is out of stock"));
        assert!(a.handle_line("/frobnicate").unwrap().contains("Unknown command"));
    }

    #[test]
    fn catalog_commands_need_a_vendor() {
        let mut a = assistant();
        assert!(a.handle_line("/restock 6 10").unwrap().contains("Only vendors"));
        assert!(a.handle_line("/newproduct 90 5 dairy Paneer").unwrap().contains("Only vendors"));
        assert_eq!(a.catalog().len(), 8);
    }

    #[test]
    fn vendor_restocks_and_adds_products() {
        let mut a = Assistant::new(
            Catalog::seeded(),
            MemoryStore::new(),
            GroceryListParser::new(),
            Session::start("shop@example.com", "Ravi", Role::Vendor),
        )
        .unwrap();
        a.handle_line("12 yogurt").unwrap();
        a.handle_line("2 yogurt").unwrap();
        assert_eq!(
            a.handle_line("/restock 6 10").unwrap(),
            "📦 Greek Yogurt restocked, 10 in stock. 1 customer request(s) waiting, see /requests."
        );
        assert!(a.handle_line("/restock 99 1").unwrap().contains("product 99 not found"));
        assert!(a.handle_line("/restock 6").unwrap().starts_with("Usage"));

        assert_eq!(
            a.handle_line("/newproduct 90 5 dairy Malai Paneer").unwrap(),
            "🆕 Added [9] Malai Paneer at ₹90.00."
        );
        assert_eq!(a.catalog().get(9).unwrap().category.as_deref(), Some("dairy"));
        assert!(a.handle_line("/newproduct -3 5 - Ghee").unwrap().contains("invalid price"));
        assert!(a.handle_line("/newproduct 10 5 -").unwrap().starts_with("Usage"));
        assert!(a.handle_line("2 paneer").unwrap().contains("2 × Malai Paneer"));
    }
}
