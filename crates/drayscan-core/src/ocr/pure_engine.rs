//! OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).

use std::path::PathBuf;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::ModelConfig;

use super::{reading_order_text, EngineFactory, OcrEngine, RecognitionParams, TextBox};

/// Languages served by the Latin-script recognition model.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "eng", "deu", "fra", "spa", "ita", "por", "nld", "pol", "latin",
];

/// Creates [`PureOnnxEngine`]s from a model directory.
#[derive(Debug, Clone)]
pub struct PureOnnxFactory {
    models: ModelConfig,
}

impl PureOnnxFactory {
    pub fn new(models: ModelConfig) -> Self {
        Self { models }
    }
}

impl EngineFactory for PureOnnxFactory {
    type Engine = PureOnnxEngine;

    fn create(&self) -> Result<PureOnnxEngine, OcrError> {
        Ok(PureOnnxEngine::new(self.models.clone()))
    }
}

struct ModelPaths {
    detection: PathBuf,
    recognition: PathBuf,
    dictionary: PathBuf,
}

/// One `pure-onnx-ocr` engine instance.
pub struct PureOnnxEngine {
    models: ModelConfig,
    paths: Option<ModelPaths>,
    engine: Option<pure_onnx_ocr::engine::OcrEngine>,
    params: RecognitionParams,
}

impl PureOnnxEngine {
    pub fn new(models: ModelConfig) -> Self {
        Self {
            models,
            paths: None,
            engine: None,
            params: RecognitionParams::default(),
        }
    }
}

impl OcrEngine for PureOnnxEngine {
    fn load_language(&mut self, language: &str) -> Result<(), OcrError> {
        if !SUPPORTED_LANGUAGES.contains(&language) {
            return Err(OcrError::ModelLoad(format!(
                "no recognition model for language '{}'",
                language
            )));
        }

        let paths = ModelPaths {
            detection: self.models.detection_path(),
            recognition: self.models.recognition_path(),
            dictionary: self.models.dictionary_path(),
        };

        for path in [&paths.detection, &paths.recognition, &paths.dictionary] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
        }

        debug!(
            "Resolved models for '{}' in {}",
            language,
            self.models.model_dir.display()
        );
        self.paths = Some(paths);
        Ok(())
    }

    fn initialize(&mut self, language: &str) -> Result<(), OcrError> {
        let paths = self.paths.as_ref().ok_or_else(|| {
            OcrError::Initialization(format!("language '{}' is not loaded", language))
        })?;

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&paths.detection)
            .rec_model_path(&paths.recognition)
            .dictionary_path(&paths.dictionary)
            .build()
            .map_err(|e| OcrError::Initialization(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", self.models.model_dir.display());
        self.engine = Some(engine);
        Ok(())
    }

    fn set_parameters(&mut self, params: &RecognitionParams) -> Result<(), OcrError> {
        if params.char_whitelist.is_empty() {
            return Err(OcrError::Configuration(
                "character whitelist is empty".to_string(),
            ));
        }
        self.params = params.clone();
        Ok(())
    }

    fn recognize(&mut self, image: &DynamicImage) -> Result<String, OcrError> {
        let engine = self
            .engine
            .as_ref()
            .ok_or_else(|| OcrError::Recognition("engine is not initialized".to_string()))?;

        let start = Instant::now();
        let (width, height) = image.dimensions();
        debug!("Recognizing image: {}x{}", width, height);

        let results = engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let mut boxes: Vec<TextBox> = results
            .iter()
            .map(|r| TextBox {
                bbox: polygon_to_bbox(&r.bounding_box),
                text: r.text.replace("[UNK]", " "),
                confidence: r.confidence,
            })
            .collect();

        let text = self.params.apply(&reading_order_text(&mut boxes));

        info!(
            "OCR complete: {} text boxes in {}ms",
            boxes.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }

    fn terminate(&mut self) {
        self.engine = None;
        self.paths = None;
    }
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
///
/// Extracts the first 4 exterior points (quadrilateral) as
/// `[x1, y1, x2, y2, x3, y3, x4, y4]`.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}
