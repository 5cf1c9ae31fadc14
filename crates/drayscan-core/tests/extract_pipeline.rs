//! End-to-end extraction through a scripted OCR engine.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use drayscan_core::models::config::{OcrConfig, DEFAULT_CHAR_WHITELIST};
use drayscan_core::{
    Document, ExtractionError, FieldExtractor, LoadDraft, LoadType, OcrEngine, OcrError, Port,
    RecognitionParams, NOT_DETECTED,
};
use image::{DynamicImage, ImageFormat};
use pretty_assertions::assert_eq;

/// Lifecycle counters shared by every engine a factory creates.
#[derive(Default)]
struct Tracker {
    created: AtomicUsize,
    terminated: AtomicUsize,
    params: Mutex<Vec<RecognitionParams>>,
}

struct ScriptedEngine {
    tracker: Arc<Tracker>,
    output: Result<String, OcrError>,
}

impl OcrEngine for ScriptedEngine {
    fn load_language(&mut self, _language: &str) -> Result<(), OcrError> {
        Ok(())
    }

    fn initialize(&mut self, _language: &str) -> Result<(), OcrError> {
        Ok(())
    }

    fn set_parameters(&mut self, params: &RecognitionParams) -> Result<(), OcrError> {
        self.tracker.params.lock().unwrap().push(params.clone());
        Ok(())
    }

    fn recognize(&mut self, _image: &DynamicImage) -> Result<String, OcrError> {
        self.output.clone()
    }

    fn terminate(&mut self) {
        self.tracker.terminated.fetch_add(1, Ordering::SeqCst);
    }
}

fn extractor(
    tracker: &Arc<Tracker>,
    output: Result<&str, OcrError>,
) -> FieldExtractor<impl Fn() -> Result<ScriptedEngine, OcrError> + Sync> {
    let tracker = Arc::clone(tracker);
    let output = output.map(str::to_string);
    FieldExtractor::new(move || {
        tracker.created.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedEngine {
            tracker: Arc::clone(&tracker),
            output: output.clone(),
        })
    })
}

fn scan() -> Document {
    let mut bytes = Vec::new();
    DynamicImage::new_luma8(8, 8)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    Document::from_bytes(bytes)
}

const BILL_OF_LADING: &str = "DELIVERY ORDER\nIMPORT\nCustomer:  Acme Corp\nContainer: mscu1234567\nPort of LA";

#[test]
fn extracts_all_fields_and_releases_session() {
    let tracker = Arc::new(Tracker::default());
    let fields = extractor(&tracker, Ok(BILL_OF_LADING)).extract(&scan()).unwrap();

    assert_eq!(fields.load_type(), Some(LoadType::Import));
    assert_eq!(fields.customer, "acme corp");
    assert_eq!(fields.container_number, "MSCU1234567");
    assert_eq!(fields.port(), Some(Port::LosAngeles));

    assert_eq!(tracker.created.load(Ordering::SeqCst), 1);
    assert_eq!(tracker.terminated.load(Ordering::SeqCst), 1);
}

#[test]
fn session_receives_configured_parameters() {
    let tracker = Arc::new(Tracker::default());
    extractor(&tracker, Ok("")).extract(&scan()).unwrap();

    let params = tracker.params.lock().unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].char_whitelist, DEFAULT_CHAR_WHITELIST);
    assert!(params[0].preserve_interword_spaces);
}

#[test]
fn custom_ocr_config_reaches_engine() {
    let tracker = Arc::new(Tracker::default());
    let config = OcrConfig {
        preserve_interword_spaces: false,
        ..OcrConfig::default()
    };
    extractor(&tracker, Ok(""))
        .with_ocr_config(config)
        .extract(&scan())
        .unwrap();

    assert!(!tracker.params.lock().unwrap()[0].preserve_interword_spaces);
}

#[test]
fn sparse_text_yields_sentinels() {
    let tracker = Arc::new(Tracker::default());
    let result = extractor(&tracker, Ok("export"))
        .extract_detailed(&scan())
        .unwrap();

    assert_eq!(result.fields.load_type, "Export");
    assert_eq!(result.fields.customer, NOT_DETECTED);
    assert_eq!(result.fields.container_number, NOT_DETECTED);
    assert_eq!(result.fields.port, NOT_DETECTED);
    assert_eq!(result.raw_text, "export");
    assert_eq!(result.warnings.len(), 3);
}

#[test]
fn repeated_extraction_is_identical() {
    let tracker = Arc::new(Tracker::default());
    let extractor = extractor(&tracker, Ok(BILL_OF_LADING));
    let document = scan();

    let first = extractor.extract(&document).unwrap();
    let second = extractor.extract(&document).unwrap();

    assert_eq!(first, second);
    assert_eq!(tracker.created.load(Ordering::SeqCst), 2);
    assert_eq!(tracker.terminated.load(Ordering::SeqCst), 2);
}

#[test]
fn recognition_failure_is_engine_failure_and_releases() {
    let tracker = Arc::new(Tracker::default());
    let err = extractor(&tracker, Err(OcrError::Recognition("boom".to_string())))
        .extract(&scan())
        .unwrap_err();

    assert!(matches!(
        err,
        ExtractionError::EngineFailure(OcrError::Recognition(_))
    ));
    assert_eq!(tracker.terminated.load(Ordering::SeqCst), 1);
}

#[test]
fn unconvertible_input_is_unsupported_and_releases() {
    let tracker = Arc::new(Tracker::default());
    let document = Document::from_bytes(b"not an image".to_vec());
    let err = extractor(&tracker, Ok(BILL_OF_LADING))
        .extract(&document)
        .unwrap_err();

    assert!(matches!(err, ExtractionError::UnsupportedInput(_)));
    assert_eq!(tracker.created.load(Ordering::SeqCst), 1);
    assert_eq!(tracker.terminated.load(Ordering::SeqCst), 1);
}

#[test]
fn engine_creation_failure_is_engine_failure() {
    let extractor = FieldExtractor::new(|| -> Result<ScriptedEngine, OcrError> {
        Err(OcrError::ModelLoad("missing det.onnx".to_string()))
    });

    let err = extractor.extract(&scan()).unwrap_err();
    assert!(matches!(
        err,
        ExtractionError::EngineFailure(OcrError::ModelLoad(_))
    ));
}

#[test]
fn data_uri_documents_extract() {
    let tracker = Arc::new(Tracker::default());
    let document = Document::from_data_uri(&scan().to_data_uri()).unwrap();
    let fields = extractor(&tracker, Ok("road customer: blue line port: oakland"))
        .extract(&document)
        .unwrap();

    assert_eq!(fields.load_type(), Some(LoadType::Road));
    assert_eq!(fields.customer, "blue line");
    assert_eq!(fields.port(), Some(Port::Oakland));
}

#[test]
fn concurrent_calls_use_separate_sessions() {
    let tracker = Arc::new(Tracker::default());
    let extractor = extractor(&tracker, Ok(BILL_OF_LADING));
    let document = scan();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| extractor.extract(&document).unwrap());
        }
    });

    assert_eq!(tracker.created.load(Ordering::SeqCst), 4);
    assert_eq!(tracker.terminated.load(Ordering::SeqCst), 4);
}

#[test]
fn extracted_fields_fill_load_draft() {
    let tracker = Arc::new(Tracker::default());
    let fields = extractor(&tracker, Ok("bill only container: tghu7654321"))
        .extract(&scan())
        .unwrap();

    let draft = LoadDraft::from_extracted(&fields);
    assert_eq!(draft.load_type.as_deref(), Some("Bill Only"));
    assert_eq!(draft.container_number.as_deref(), Some("TGHU7654321"));
    assert_eq!(draft.customer, None);
    assert_eq!(draft.port, None);
}
