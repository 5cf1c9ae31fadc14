//! Error types for the drayscan-core library.

use thiserror::Error;

/// Main error type for the drayscan library.
#[derive(Error, Debug)]
pub enum DrayscanError {
    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Document could not be constructed.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Failure of a single `extract` call.
///
/// Either the whole call succeeds or it fails with one of these; there is no
/// per-field error. Unmatched fields are reported with the sentinel value.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document cannot be converted to the image the engine consumes.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// The OCR engine failed to start, configure, or recognize.
    #[error("OCR engine failure: {0}")]
    EngineFailure(#[from] OcrError),
}

impl From<PdfError> for ExtractionError {
    fn from(err: PdfError) -> Self {
        ExtractionError::UnsupportedInput(err.to_string())
    }
}

impl From<image::ImageError> for ExtractionError {
    fn from(err: image::ImageError) -> Self {
        ExtractionError::UnsupportedInput(err.to_string())
    }
}

/// Errors raised by an OCR engine session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcrError {
    /// Failed to locate or load recognition models for a language.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Engine initialization failed.
    #[error("engine initialization failed: {0}")]
    Initialization(String),

    /// Recognition parameters were rejected.
    #[error("invalid recognition parameters: {0}")]
    Configuration(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract images from PDF.
    #[error("failed to extract images: {0}")]
    ImageExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors raised while building a [`Document`](crate::Document).
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Reading the document from disk failed.
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    /// The string is not a `data:<mime>;base64,<payload>` URI.
    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),

    /// The data URI payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl From<DocumentError> for ExtractionError {
    fn from(err: DocumentError) -> Self {
        ExtractionError::UnsupportedInput(err.to_string())
    }
}

/// Result type for the drayscan library.
pub type Result<T> = std::result::Result<T, DrayscanError>;
