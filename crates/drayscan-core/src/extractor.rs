//! Document to load fields: OCR followed by rule-based inference.

use std::time::Instant;

use tracing::{debug, info};

use crate::document::Document;
use crate::error::ExtractionError;
use crate::fields::{ExtractionResult, FieldParser, RuleBasedParser};
use crate::models::config::{OcrConfig, PdfConfig};
use crate::models::fields::ExtractedFields;
use crate::ocr::{EngineFactory, EngineSession};

/// Extracts load fields from scanned documents.
///
/// Every call opens its own engine session and releases it before
/// returning, so one extractor can serve concurrent callers as long as the
/// factory is shareable.
pub struct FieldExtractor<F: EngineFactory> {
    factory: F,
    ocr: OcrConfig,
    pdf: PdfConfig,
    parser: RuleBasedParser,
}

impl<F: EngineFactory> FieldExtractor<F> {
    /// Create an extractor with default OCR and PDF settings.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            ocr: OcrConfig::default(),
            pdf: PdfConfig::default(),
            parser: RuleBasedParser::new(),
        }
    }

    /// Set the OCR session configuration.
    pub fn with_ocr_config(mut self, ocr: OcrConfig) -> Self {
        self.ocr = ocr;
        self
    }

    /// Set the PDF configuration.
    pub fn with_pdf_config(mut self, pdf: PdfConfig) -> Self {
        self.pdf = pdf;
        self
    }

    /// Extract the four load fields from a document.
    pub fn extract(&self, document: &Document) -> Result<ExtractedFields, ExtractionError> {
        self.extract_detailed(document).map(|r| r.fields)
    }

    /// Extract load fields along with the recognized text and warnings.
    pub fn extract_detailed(&self, document: &Document) -> Result<ExtractionResult, ExtractionError> {
        let start = Instant::now();
        info!(
            "Extracting load fields from {} document ({} bytes)",
            document.mime_type(),
            document.len()
        );

        let raw_text = self.recognize(document)?;
        debug!("Recognized {} characters", raw_text.len());

        let mut result = self.parser.parse(&raw_text);
        result.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Detected {}/4 load fields in {}ms",
            result.fields.detected_count(),
            result.processing_time_ms
        );

        Ok(result)
    }

    fn recognize(&self, document: &Document) -> Result<String, ExtractionError> {
        let mut session = EngineSession::open(&self.factory, &self.ocr)?;
        let image = document.to_image(&self.pdf)?;
        let text = session.recognize(&image)?;
        session.release();
        Ok(text)
    }
}
