// Utility functions

/// Formats an amount in rupees with two decimals.
pub fn format_inr(amount: f64) -> String {
    format!("₹{:.2}", amount)
}
