//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DrayscanError, Result};

/// Characters the OCR engine is allowed to emit.
pub const DEFAULT_CHAR_WHITELIST: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789:.-/ ";

/// Main configuration for drayscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrayscanConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Model configuration.
    pub models: ModelConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// OCR session configuration applied before every recognition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Recognition language code.
    pub language: String,

    /// Characters the engine may return; everything else is dropped.
    pub char_whitelist: String,

    /// Keep runs of spaces between words as recognized.
    pub preserve_interword_spaces: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            char_whitelist: DEFAULT_CHAR_WHITELIST.to_string(),
            preserve_interword_spaces: true,
        }
    }
}

/// Model file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

impl ModelConfig {
    /// Full path to the detection model.
    pub fn detection_path(&self) -> PathBuf {
        self.model_dir.join(&self.detection_model)
    }

    /// Full path to the recognition model.
    pub fn recognition_path(&self) -> PathBuf {
        self.model_dir.join(&self.recognition_model)
    }

    /// Full path to the character dictionary.
    pub fn dictionary_path(&self) -> PathBuf {
        self.model_dir.join(&self.dictionary)
    }

    /// Whether every file an engine session loads is present on disk.
    pub fn is_available(&self) -> bool {
        self.missing_files().is_empty()
    }

    /// Model files that do not exist, in load order.
    pub fn missing_files(&self) -> Vec<PathBuf> {
        [
            self.detection_path(),
            self.recognition_path(),
            self.dictionary_path(),
        ]
        .into_iter()
        .filter(|path| !path.exists())
        .collect()
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Page (1-indexed) whose scan is sent to OCR.
    pub page: u32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl DrayscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values no engine session could use.
    pub fn validate(&self) -> Result<()> {
        if self.ocr.language.trim().is_empty() {
            return Err(DrayscanError::Config("ocr.language must not be empty".to_string()));
        }
        if self.ocr.char_whitelist.is_empty() {
            return Err(DrayscanError::Config(
                "ocr.char_whitelist must not be empty".to_string(),
            ));
        }
        if self.pdf.page == 0 {
            return Err(DrayscanError::Config("pdf.page is 1-indexed".to_string()));
        }
        Ok(())
    }
}
