//! Ordered rule tables and labeled-field extractors.
//!
//! Each enumerated field is decided by a table of `(needle, value)` rules
//! evaluated top to bottom; the first needle contained in the text wins,
//! regardless of where in the text it occurs.

pub mod container;
pub mod customer;
pub mod load_type;
pub mod patterns;
pub mod port;

pub use container::extract_container_number;
pub use customer::extract_customer;
pub use load_type::{extract_load_type, LOAD_TYPE_RULES};
pub use port::{extract_port, PORT_RULES};

/// A substring rule mapping a needle to a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<T> {
    /// Lower-case substring to look for.
    pub needle: &'static str,
    /// Value produced when the needle is present.
    pub value: T,
}

impl<T: Copy> Rule<T> {
    pub const fn new(needle: &'static str, value: T) -> Self {
        Self { needle, value }
    }

    /// Whether this rule fires on a lower-cased haystack.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.contains(self.needle)
    }
}

/// Evaluate a rule table top to bottom and return the first hit.
pub fn first_match<T: Copy>(rules: &[Rule<T>], haystack: &str) -> Option<T> {
    rules.iter().find(|rule| rule.matches(haystack)).map(|rule| rule.value)
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
