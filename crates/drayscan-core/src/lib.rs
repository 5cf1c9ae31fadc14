//! Core library for drayage document scanning.
//!
//! This crate provides:
//! - Document intake (images, scanned PDFs, base64 data URIs)
//! - A scoped OCR engine session over a pluggable engine, with a
//!   `pure-onnx-ocr` backend
//! - Load field inference (load type, customer, container number, port)
//!   from recognized text
//! - The load draft a form workflow fills from extracted fields

pub mod document;
pub mod error;
pub mod extractor;
pub mod fields;
pub mod models;
pub mod ocr;
pub mod pdf;

pub use document::{Document, DocumentKind};
pub use error::{DocumentError, DrayscanError, ExtractionError, OcrError, PdfError, Result};
pub use extractor::FieldExtractor;
pub use fields::{ExtractionResult, FieldParser, RuleBasedParser};
pub use models::config::DrayscanConfig;
pub use models::fields::{ExtractedFields, LoadType, Port, NOT_DETECTED};
pub use models::load::{EntryMethod, LoadDraft, LoadStatus};
pub use ocr::{EngineFactory, EngineSession, OcrEngine, RecognitionParams};

#[cfg(feature = "native")]
pub use ocr::{PureOnnxEngine, PureOnnxFactory};

/// Build an extractor backed by `pure-onnx-ocr` from a full configuration.
#[cfg(feature = "native")]
pub fn native_extractor(config: &DrayscanConfig) -> FieldExtractor<PureOnnxFactory> {
    FieldExtractor::new(PureOnnxFactory::new(config.models.clone()))
        .with_ocr_config(config.ocr.clone())
        .with_pdf_config(config.pdf.clone())
}
