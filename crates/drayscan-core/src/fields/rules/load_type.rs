//! Load type detection.

use super::{first_match, Rule};
use crate::models::fields::LoadType;

/// Load type rules in precedence order.
///
/// "bill only" comes first so a bill-only import is not reported as an import.
pub const LOAD_TYPE_RULES: &[Rule<LoadType>] = &[
    Rule::new("bill only", LoadType::BillOnly),
    Rule::new("import", LoadType::Import),
    Rule::new("export", LoadType::Export),
    Rule::new("road", LoadType::Road),
];

/// Detect the load type in lower-cased text.
pub fn extract_load_type(lowered: &str) -> Option<LoadType> {
    first_match(LOAD_TYPE_RULES, lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_rule() {
        assert_eq!(extract_load_type("type: import"), Some(LoadType::Import));
        assert_eq!(extract_load_type("type: export"), Some(LoadType::Export));
        assert_eq!(extract_load_type("by road"), Some(LoadType::Road));
        assert_eq!(extract_load_type("bill only"), Some(LoadType::BillOnly));
        assert_eq!(extract_load_type("nothing here"), None);
    }

    #[test]
    fn test_bill_only_beats_import() {
        assert_eq!(
            extract_load_type("import container bill only"),
            Some(LoadType::BillOnly)
        );
    }

    #[test]
    fn test_import_beats_export() {
        assert_eq!(extract_load_type("export then import"), Some(LoadType::Import));
    }

    #[test]
    fn test_substring_match() {
        // Substring rules fire inside longer words.
        assert_eq!(extract_load_type("railroad"), Some(LoadType::Road));
    }
}
