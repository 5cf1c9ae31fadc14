//! OCR engine interface and scoped engine sessions.

mod session;

#[cfg(feature = "native")]
mod pure_engine;

pub use session::EngineSession;

#[cfg(feature = "native")]
pub use pure_engine::{PureOnnxEngine, PureOnnxFactory, SUPPORTED_LANGUAGES};

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Capability set consumed from an OCR engine.
///
/// An engine instance backs exactly one session: it is created, configured,
/// used for recognition and terminated, and never shared between calls.
pub trait OcrEngine {
    /// Make recognition data for `language` available.
    fn load_language(&mut self, language: &str) -> Result<(), OcrError>;

    /// Start the engine for `language`.
    fn initialize(&mut self, language: &str) -> Result<(), OcrError>;

    /// Apply recognition parameters.
    fn set_parameters(&mut self, params: &RecognitionParams) -> Result<(), OcrError>;

    /// Recognize the text in an image.
    fn recognize(&mut self, image: &DynamicImage) -> Result<String, OcrError>;

    /// Release the engine. Called exactly once per session.
    fn terminate(&mut self);
}

/// Creates a fresh engine for every session.
pub trait EngineFactory {
    type Engine: OcrEngine;

    fn create(&self) -> Result<Self::Engine, OcrError>;
}

impl<F, E> EngineFactory for F
where
    F: Fn() -> Result<E, OcrError>,
    E: OcrEngine,
{
    type Engine = E;

    fn create(&self) -> Result<E, OcrError> {
        self()
    }
}

/// Parameters set on an engine before recognition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionParams {
    /// Characters the engine may emit.
    pub char_whitelist: String,
    /// Keep runs of spaces between words.
    pub preserve_interword_spaces: bool,
}

impl RecognitionParams {
    /// Filter raw engine output through the whitelist.
    ///
    /// Line breaks always survive. Without interword spacing, runs of spaces
    /// inside a line shrink to one.
    pub fn apply(&self, raw: &str) -> String {
        raw.lines()
            .map(|line| {
                let kept: String = line
                    .chars()
                    .filter(|c| self.char_whitelist.contains(*c))
                    .collect();
                if self.preserve_interword_spaces {
                    kept
                } else {
                    kept.split(' ')
                        .filter(|word| !word.is_empty())
                        .collect::<Vec<_>>()
                        .join(" ")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<&OcrConfig> for RecognitionParams {
    fn from(config: &OcrConfig) -> Self {
        Self {
            char_whitelist: config.char_whitelist.clone(),
            preserve_interword_spaces: config.preserve_interword_spaces,
        }
    }
}

impl Default for RecognitionParams {
    fn default() -> Self {
        Self::from(&OcrConfig::default())
    }
}

/// A recognized text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Sort boxes top-to-bottom in 20px rows, then left-to-right, and join them
/// into one text with a line per box.
pub fn reading_order_text(boxes: &mut [TextBox]) -> String {
    boxes.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();

        let row_a = (ay / 20.0) as i32;
        let row_b = (by / 20.0) as i32;

        row_a
            .cmp(&row_b)
            .then(ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal))
    });

    boxes
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
