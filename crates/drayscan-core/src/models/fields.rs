//! Shipment fields inferred from a scanned document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for a field the rules could not recognize.
///
/// Callers compare against this literal to decide whether to leave a form
/// field blank, so it is never replaced by an empty string or `null`.
pub const NOT_DETECTED: &str = "Not detected";

/// Kind of load a document describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadType {
    #[serde(rename = "Import")]
    Import,
    #[serde(rename = "Export")]
    Export,
    #[serde(rename = "Road")]
    Road,
    #[serde(rename = "Bill Only")]
    BillOnly,
}

impl LoadType {
    /// All load types, in display order.
    pub const ALL: [LoadType; 4] = [
        LoadType::Import,
        LoadType::Export,
        LoadType::Road,
        LoadType::BillOnly,
    ];

    /// Display value written into [`ExtractedFields::load_type`].
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadType::Import => "Import",
            LoadType::Export => "Export",
            LoadType::Road => "Road",
            LoadType::BillOnly => "Bill Only",
        }
    }

    /// Parse a display value back into a load type.
    pub fn from_display(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for LoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal a load moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    #[serde(rename = "Port of LA")]
    LosAngeles,
    #[serde(rename = "Long Beach Port")]
    LongBeach,
    #[serde(rename = "Oakland Port")]
    Oakland,
}

impl Port {
    /// All ports, in display order.
    pub const ALL: [Port; 3] = [Port::LosAngeles, Port::LongBeach, Port::Oakland];

    /// Display value written into [`ExtractedFields::port`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Port::LosAngeles => "Port of LA",
            Port::LongBeach => "Long Beach Port",
            Port::Oakland => "Oakland Port",
        }
    }

    /// Parse a display value back into a port.
    pub fn from_display(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four fields inferred from one document.
///
/// Each attribute holds either a recognized value or [`NOT_DETECTED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// One of [`LoadType`]'s display values.
    pub load_type: String,
    /// Customer name as it appears after `customer:` (lower-cased).
    pub customer: String,
    /// Container number, upper-cased.
    pub container_number: String,
    /// One of [`Port`]'s display values.
    pub port: String,
}

impl ExtractedFields {
    /// Build a record, substituting the sentinel for every missing field.
    pub fn new(
        load_type: Option<LoadType>,
        customer: Option<String>,
        container_number: Option<String>,
        port: Option<Port>,
    ) -> Self {
        Self {
            load_type: or_sentinel(load_type.map(|t| t.as_str().to_string())),
            customer: or_sentinel(customer),
            container_number: or_sentinel(container_number),
            port: or_sentinel(port.map(|p| p.as_str().to_string())),
        }
    }

    /// A record with every field undetected.
    pub fn undetected() -> Self {
        Self::new(None, None, None, None)
    }

    /// Typed load type, if detected.
    pub fn load_type(&self) -> Option<LoadType> {
        LoadType::from_display(&self.load_type)
    }

    /// Typed port, if detected.
    pub fn port(&self) -> Option<Port> {
        Port::from_display(&self.port)
    }

    /// Field names paired with their current values, in record order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("load_type", &self.load_type),
            ("customer", &self.customer),
            ("container_number", &self.container_number),
            ("port", &self.port),
        ]
    }

    /// Names of fields still holding the sentinel.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, value)| !is_detected(value))
            .map(|(name, _)| name)
            .collect()
    }

    /// Number of recognized fields (0 - 4).
    pub fn detected_count(&self) -> usize {
        4 - self.missing_fields().len()
    }
}

impl Default for ExtractedFields {
    fn default() -> Self {
        Self::undetected()
    }
}

/// Whether a field value is a real value rather than the sentinel.
pub fn is_detected(value: &str) -> bool {
    value != NOT_DETECTED
}

fn or_sentinel(value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_DETECTED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_values_become_sentinel() {
        let fields = ExtractedFields::new(None, Some(String::new()), None, None);
        assert_eq!(fields, ExtractedFields::undetected());
        assert_eq!(fields.customer, NOT_DETECTED);
    }

    #[test]
    fn test_typed_round_trip() {
        let fields = ExtractedFields::new(
            Some(LoadType::BillOnly),
            Some("acme".to_string()),
            Some("ABCD1234567".to_string()),
            Some(Port::LosAngeles),
        );
        assert_eq!(fields.load_type, "Bill Only");
        assert_eq!(fields.port, "Port of LA");
        assert_eq!(fields.load_type(), Some(LoadType::BillOnly));
        assert_eq!(fields.port(), Some(Port::LosAngeles));
        assert_eq!(fields.detected_count(), 4);
    }

    #[test]
    fn test_missing_fields() {
        let fields = ExtractedFields::new(Some(LoadType::Road), None, None, Some(Port::Oakland));
        assert_eq!(fields.missing_fields(), vec!["customer", "container_number"]);
    }

    #[test]
    fn test_serializes_display_values() {
        let fields = ExtractedFields::new(Some(LoadType::Export), None, None, Some(Port::LongBeach));
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["load_type"], "Export");
        assert_eq!(json["port"], "Long Beach Port");
        assert_eq!(json["customer"], "Not detected");
    }
}
