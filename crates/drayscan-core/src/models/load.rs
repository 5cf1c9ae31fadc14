//! New-load form record filled from extracted fields.

use serde::{Deserialize, Serialize};

use super::fields::{is_detected, ExtractedFields};

/// Workflow state of a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Pending,
    Dispatched,
    InTransit,
    Delivered,
    Cancelled,
}

/// How the load data was entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryMethod {
    /// Typed in by hand.
    #[default]
    Manual,
    /// Filled from an uploaded document.
    Upload,
}

/// Draft of a load before it is submitted.
///
/// `None` means the form field is blank and the user has to fill it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    pub status: LoadStatus,
    pub entry_method: EntryMethod,
}

impl LoadDraft {
    /// Create an empty manual draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a draft from extracted fields.
    pub fn from_extracted(fields: &ExtractedFields) -> Self {
        let mut draft = Self::new();
        draft.merge_extracted(fields);
        draft
    }

    /// Overwrite the four extracted fields.
    ///
    /// Detected values are copied; sentinels clear the field. Fields the
    /// extractor does not produce (consignee, route, status) are untouched.
    pub fn merge_extracted(&mut self, fields: &ExtractedFields) {
        self.load_type = detected(&fields.load_type);
        self.customer = detected(&fields.customer);
        self.container_number = detected(&fields.container_number);
        self.port = detected(&fields.port);
        self.entry_method = EntryMethod::Upload;
    }

    /// Names of the fields a user still has to fill before submitting.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("load_type", &self.load_type),
            ("customer", &self.customer),
            ("port", &self.port),
            ("consignee", &self.consignee),
            ("container_number", &self.container_number),
            ("route", &self.route),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

fn detected(value: &str) -> Option<String> {
    is_detected(value).then(|| value.to_string())
}
