//! Input documents and their conversion to the image handed to OCR.

use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::error::{DocumentError, ExtractionError};
use crate::models::config::PdfConfig;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Detected payload format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    Webp,
    Pdf,
    Unknown,
}

impl DocumentKind {
    /// Sniff the format from magic bytes.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"%PDF-") {
            return DocumentKind::Pdf;
        }
        match image::guess_format(bytes) {
            Ok(ImageFormat::Png) => DocumentKind::Png,
            Ok(ImageFormat::Jpeg) => DocumentKind::Jpeg,
            Ok(ImageFormat::Gif) => DocumentKind::Gif,
            Ok(ImageFormat::Bmp) => DocumentKind::Bmp,
            Ok(ImageFormat::Tiff) => DocumentKind::Tiff,
            Ok(ImageFormat::WebP) => DocumentKind::Webp,
            _ => DocumentKind::Unknown,
        }
    }

    /// MIME type used in data URIs.
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Png => "image/png",
            DocumentKind::Jpeg => "image/jpeg",
            DocumentKind::Gif => "image/gif",
            DocumentKind::Bmp => "image/bmp",
            DocumentKind::Tiff => "image/tiff",
            DocumentKind::Webp => "image/webp",
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Unknown => "application/octet-stream",
        }
    }

    /// Whether the payload is a raster image.
    pub fn is_image(&self) -> bool {
        !matches!(self, DocumentKind::Pdf | DocumentKind::Unknown)
    }
}

/// An uploaded document: a scanned image or PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    bytes: Vec<u8>,
    kind: DocumentKind,
}

impl Document {
    /// Wrap raw bytes, detecting their format.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let kind = DocumentKind::detect(&bytes);
        Self { bytes, kind }
    }

    /// Read a document from disk.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let bytes = std::fs::read(path)?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(Self::from_bytes(bytes))
    }

    /// Decode a `data:<mime>;base64,<payload>` URI.
    ///
    /// The format is sniffed from the payload; the declared MIME type is not
    /// trusted.
    pub fn from_data_uri(uri: &str) -> Result<Self, DocumentError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| DocumentError::InvalidDataUri("missing 'data:' scheme".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| DocumentError::InvalidDataUri("missing ',' separator".to_string()))?;
        if !header.ends_with(";base64") {
            return Err(DocumentError::InvalidDataUri(
                "only base64 payloads are supported".to_string(),
            ));
        }

        let bytes = general_purpose::STANDARD.decode(payload.trim())?;
        Ok(Self::from_bytes(bytes))
    }

    /// Encode the document as a base64 data URI.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.kind.mime_type(),
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Convert to the raster image the OCR engine consumes.
    pub fn to_image(&self, pdf: &PdfConfig) -> Result<DynamicImage, ExtractionError> {
        match self.kind {
            DocumentKind::Pdf => {
                let mut extractor = PdfExtractor::new();
                extractor.load(&self.bytes)?;
                Ok(extractor.render_page(pdf.page)?)
            }
            kind if kind.is_image() => Ok(image::load_from_memory(&self.bytes)?),
            _ => Err(ExtractionError::UnsupportedInput(format!(
                "unrecognized document format ({} bytes)",
                self.bytes.len()
            ))),
        }
    }
}
