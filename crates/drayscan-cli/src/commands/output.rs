//! Rendering extracted fields and load drafts.

use drayscan_core::{EntryMethod, ExtractedFields, LoadDraft};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for per-document output files.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_fields(fields: &ExtractedFields, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(fields)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            let entries = fields.entries();
            wtr.write_record(entries.iter().map(|(name, _)| *name))?;
            wtr.write_record(entries.iter().map(|(_, value)| *value))?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str(&format!("Load type:        {}\n", fields.load_type));
            output.push_str(&format!("Customer:         {}\n", fields.customer));
            output.push_str(&format!("Container number: {}\n", fields.container_number));
            output.push_str(&format!("Port:             {}\n", fields.port));
            Ok(output)
        }
    }
}

pub fn format_draft(draft: &LoadDraft, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(draft)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(["load_type", "customer", "port", "container_number", "entry_method"])?;
            wtr.write_record([
                draft.load_type.as_deref().unwrap_or(""),
                draft.customer.as_deref().unwrap_or(""),
                draft.port.as_deref().unwrap_or(""),
                draft.container_number.as_deref().unwrap_or(""),
                match draft.entry_method {
                    EntryMethod::Manual => "manual",
                    EntryMethod::Upload => "upload",
                },
            ])?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => {
            let blank = "-";
            let mut output = String::new();
            output.push_str(&format!(
                "Load type:        {}\n",
                draft.load_type.as_deref().unwrap_or(blank)
            ));
            output.push_str(&format!(
                "Customer:         {}\n",
                draft.customer.as_deref().unwrap_or(blank)
            ));
            output.push_str(&format!(
                "Port:             {}\n",
                draft.port.as_deref().unwrap_or(blank)
            ));
            output.push_str(&format!(
                "Container number: {}\n",
                draft.container_number.as_deref().unwrap_or(blank)
            ));

            let blanks = draft.blank_fields();
            if !blanks.is_empty() {
                output.push_str(&format!("\nStill to fill in: {}\n", blanks.join(", ")));
            }
            Ok(output)
        }
    }
}
