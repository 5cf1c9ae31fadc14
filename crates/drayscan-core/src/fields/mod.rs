//! Load field inference from recognized text.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, FieldParser, RuleBasedParser};
