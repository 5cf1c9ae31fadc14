//! Regex patterns for labeled fields on drayage documents.
//!
//! All patterns run against the normalized, lower-cased text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Customer name: everything after the label up to the next label or the end.
    // Colons end the capture, so an unknown label in between yields no match.
    pub static ref CUSTOMER: Regex = Regex::new(
        r"(?i)customer:\s*([^:]+?)\s*(?:container:|port:|$)"
    ).unwrap();

    // Container number: owner/category code (4 letters) + serial and check digit.
    pub static ref CONTAINER_NUMBER: Regex = Regex::new(
        r"(?i)container:\s*([a-z]{4}[0-9]{6,7})"
    ).unwrap();
}
