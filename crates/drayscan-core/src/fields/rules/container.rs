//! Container number extraction.

use super::patterns::CONTAINER_NUMBER;

/// Extract the container number following `container:`, upper-cased.
pub fn extract_container_number(text: &str) -> Option<String> {
    CONTAINER_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
}
