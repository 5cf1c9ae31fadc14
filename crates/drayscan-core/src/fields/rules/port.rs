//! Port detection.

use super::{first_match, Rule};
use crate::models::fields::Port;

/// Port rules in precedence order.
pub const PORT_RULES: &[Rule<Port>] = &[
    Rule::new("port of la", Port::LosAngeles),
    Rule::new("long beach", Port::LongBeach),
    Rule::new("oakland", Port::Oakland),
];

/// Detect the port in lower-cased text.
pub fn extract_port(lowered: &str) -> Option<Port> {
    first_match(PORT_RULES, lowered)
}
