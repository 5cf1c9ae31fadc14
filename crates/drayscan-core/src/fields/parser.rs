//! Rule-based parser turning recognized text into load fields.

use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::models::fields::ExtractedFields;

use super::rules::{
    extract_container_number, extract_customer, extract_load_type, extract_port,
    normalize_whitespace,
};

/// Result of field inference over one recognized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Inferred fields.
    pub fields: ExtractedFields,
    /// Text as returned by the OCR engine.
    pub raw_text: String,
    /// Text after whitespace normalization.
    pub normalized_text: String,
    /// One entry per field left undetected.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for load field parsers.
pub trait FieldParser {
    /// Infer load fields from recognized text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Parser applying the ordered rule tables and labeled patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedParser;

impl RuleBasedParser {
    pub fn new() -> Self {
        Self
    }

    /// Infer fields from already normalized text.
    pub fn parse_normalized(&self, normalized: &str) -> ExtractedFields {
        let lowered = normalized.to_lowercase();

        let fields = ExtractedFields::new(
            extract_load_type(&lowered),
            extract_customer(&lowered),
            extract_container_number(normalized),
            extract_port(&lowered),
        );

        debug!(
            load_type = %fields.load_type,
            customer = %fields.customer,
            container_number = %fields.container_number,
            port = %fields.port,
            "Inferred load fields"
        );

        fields
    }
}

impl FieldParser for RuleBasedParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        let normalized_text = normalize_whitespace(text);
        debug!(
            "Normalized {} characters of text to {}",
            text.len(),
            normalized_text.len()
        );

        let fields = self.parse_normalized(&normalized_text);
        let warnings = fields
            .missing_fields()
            .into_iter()
            .map(|name| format!("Could not detect {}", name))
            .collect();

        ExtractionResult {
            fields,
            raw_text: text.to_string(),
            normalized_text,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fields::{LoadType, Port, NOT_DETECTED};
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> ExtractedFields {
        RuleBasedParser::new().parse(text).fields
    }

    #[test]
    fn test_parse_full_document() {
        let text = "BILL OF LADING\n\
                    IMPORT  DELIVERY ORDER\n\
                    Customer:   Acme   Corp\n\
                    Container: MSCU1234567\n\
                    Port: Long Beach\n";

        let fields = parse(text);
        assert_eq!(fields.load_type(), Some(LoadType::Import));
        assert_eq!(fields.customer, "acme corp");
        assert_eq!(fields.container_number, "MSCU1234567");
        assert_eq!(fields.port(), Some(Port::LongBeach));
    }

    #[test]
    fn test_customer_boundary() {
        let fields = parse("customer: Acme Corp container: ABCD123456");
        assert_eq!(fields.customer, "acme corp");
        assert_eq!(fields.container_number, "ABCD123456");
    }

    #[test]
    fn test_case_insensitive_load_type() {
        assert_eq!(parse("IMPORT").load_type, "Import");
        assert_eq!(parse("import").load_type, "Import");
    }

    #[test]
    fn test_bill_only_precedence() {
        assert_eq!(parse("import bill only").load_type, "Bill Only");
    }

    #[test]
    fn test_invalid_container_is_sentinel() {
        assert_eq!(parse("container: AB1234567").container_number, NOT_DETECTED);
    }

    #[test]
    fn test_spaced_letters_do_not_form_label() {
        let result = RuleBasedParser::new().parse("c u s t o m e r :   Acme");
        assert_eq!(result.normalized_text, "c u s t o m e r : Acme");
        assert_eq!(result.fields.customer, NOT_DETECTED);
    }

    #[test]
    fn test_label_split_across_lines() {
        // Line breaks collapse to spaces before matching.
        let fields = parse("customer:\n\n  Harbor Logistics\ncontainer:\nTGHU7654321");
        assert_eq!(fields.customer, "harbor logistics");
        assert_eq!(fields.container_number, "TGHU7654321");
    }

    #[test]
    fn test_empty_text() {
        let result = RuleBasedParser::new().parse("");
        assert_eq!(result.fields, ExtractedFields::undetected());
        assert_eq!(result.warnings.len(), 4);
    }

    #[test]
    fn test_values_stay_in_domain() {
        let samples = [
            "",
            "export to oakland",
            "road customer: x port: y",
            "container: zzzz0000000 port of la bill only",
            "random ocr noise 123 :::: / - .",
        ];
        for text in samples {
            let fields = parse(text);
            for (_, value) in fields.entries() {
                assert!(!value.is_empty());
            }
            assert!(fields.load_type == NOT_DETECTED || fields.load_type().is_some());
            assert!(fields.port == NOT_DETECTED || fields.port().is_some());
        }
    }

    #[test]
    fn test_warnings_name_missing_fields() {
        let result = RuleBasedParser::new().parse("export oakland");
        assert_eq!(
            result.warnings,
            vec![
                "Could not detect customer".to_string(),
                "Could not detect container_number".to_string()
            ]
        );
    }
}
