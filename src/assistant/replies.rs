// Text the assistant shows back to the user
use crate::assistant::AddReport;
use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::model::{CustomerRequest, Session, StockAlert};
use crate::utils::format_inr;

pub fn help() -> String {
    "📋 Tell me what you need, e.g. \"2 kg tomatoes, a dozen bananas and milk\".\n\
     Commands:\n\
     /cart — show your cart\n\
     /catalog — list products\n\
     /remove <id> [qty] — remove from cart\n\
     /clear — empty the cart\n\
     /alerts — low and out-of-stock products\n\
     /requests — pending restock requests\n\
     /notify <request id> — mark a request as notified\n\
     /restock <id> <qty> — add stock (vendors)\n\
     /newproduct <price> <stock> <category|-> <name> — add a product (vendors)\n\
     /whoami — current session\n\
     /help — this list"
        .to_string()
}

pub fn add_report(report: &AddReport, max_items: usize) -> String {
    let mut msg = String::new();

    if !report.added.is_empty() {
        msg.push_str("🛒 Added to your cart:\n");
        for item in &report.added {
            msg.push_str(&format!(
                "  {} × {} — {}\n",
                item.quantity,
                item.name,
                format_inr(item.unit_price * item.quantity as f64)
            ));
        }
        if report.fallback_used {
            msg.push_str("  (picked from the category you mentioned)\n");
        }
    }

    for request in &report.requested {
        msg.push_str(&format!(
            "📭 {} is out of stock. The vendor has been asked to restock (request #{}).\n",
            request.product_name, request.id
        ));
    }

    for error in &report.errors {
        msg.push_str(&format!("⚠️ {}\n", error));
    }

    if !report.unmatched.is_empty() {
        msg.push_str(&format!(
            "❓ Not available: {}\n",
            report.unmatched.join(", ")
        ));
    }

    if report.truncated {
        msg.push_str(&format!(
            "✂️ Only the first {} items were added. Please send the rest separately.\n",
            max_items
        ));
    }

    if msg.is_empty() {
        msg.push_str("🤔 I couldn't find any products in that. Try /catalog.");
    }

    msg.trim_end().to_string()
}

pub fn cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "🛒 Your cart is empty.".to_string();
    }
    let mut msg = String::from("🛒 Your cart:\n");
    for line in cart.lines() {
        msg.push_str(&format!(
            "  [{}] {} × {} @ {}\n",
            line.product_id,
            line.quantity,
            line.name,
            format_inr(line.unit_price)
        ));
    }
    msg.push_str(&format!(
        "Total: {} ({} items)",
        format_inr(cart.total()),
        cart.item_count()
    ));
    msg
}

pub fn catalog(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return "📭 The catalog is empty.".to_string();
    }
    let mut msg = String::from("🏪 Products:\n");
    for p in catalog.products() {
        msg.push_str(&format!(
            "  [{}] {} {} — {} {} (stock {})\n",
            p.id,
            p.image.as_deref().unwrap_or("•"),
            p.name,
            format_inr(p.price),
            p.unit.as_deref().unwrap_or(""),
            p.stock
        ));
    }
    msg.trim_end().to_string()
}

pub fn alerts(alerts: &[StockAlert]) -> String {
    if alerts.is_empty() {
        return "✅ All products are well stocked.".to_string();
    }
    let mut msg = String::from("📦 Stock alerts:\n");
    for alert in alerts {
        msg.push_str(&format!("  {}\n", alert.message));
    }
    msg.trim_end().to_string()
}

pub fn requests(requests: &[CustomerRequest]) -> String {
    if requests.is_empty() {
        return "📭 No pending restock requests.".to_string();
    }
    let mut msg = String::from("📝 Pending restock requests:\n");
    for r in requests {
        msg.push_str(&format!(
            "  #{} {} × {} for {} <{}> ({})\n",
            r.id,
            r.quantity,
            r.product_name,
            r.customer_name,
            r.customer_email,
            r.created_at.format("%Y-%m-%d %H:%M")
        ));
    }
    msg.trim_end().to_string()
}

pub fn session(session: &Session) -> String {
    format!(
        "👤 {} <{}> as {:?}, since {}",
        session.name,
        session.email,
        session.role,
        session.started_at.format("%Y-%m-%d %H:%M")
    )
}
