//! Customer name extraction.

use super::patterns::CUSTOMER;

/// Extract the customer name following `customer:`.
///
/// The capture stops before `container:` or `port:`; without either it runs
/// to the end of the text. Blank captures count as no match.
pub fn extract_customer(lowered: &str) -> Option<String> {
    CUSTOMER
        .captures(lowered)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}
