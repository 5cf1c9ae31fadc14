//! Scoped OCR engine session.

use image::DynamicImage;
use tracing::debug;

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::{EngineFactory, OcrEngine, RecognitionParams};

/// An engine that is configured and owned for the duration of one call.
///
/// The engine is terminated exactly once: by [`release`](Self::release) or,
/// on any other exit path, when the session is dropped.
pub struct EngineSession<E: OcrEngine> {
    engine: E,
    released: bool,
}

impl<E: OcrEngine> EngineSession<E> {
    /// Create an engine and prepare it for recognition.
    ///
    /// If a setup step fails, the engine created so far is terminated before
    /// the error is returned.
    pub fn open<F>(factory: &F, config: &OcrConfig) -> Result<Self, OcrError>
    where
        F: EngineFactory<Engine = E>,
    {
        let engine = factory.create()?;
        let mut session = Self {
            engine,
            released: false,
        };

        session.engine.load_language(&config.language)?;
        session.engine.initialize(&config.language)?;
        session
            .engine
            .set_parameters(&RecognitionParams::from(config))?;

        debug!("Opened OCR session for language '{}'", config.language);
        Ok(session)
    }

    /// Recognize the text in an image.
    pub fn recognize(&mut self, image: &DynamicImage) -> Result<String, OcrError> {
        self.engine.recognize(image)
    }

    /// Terminate the engine now.
    pub fn release(mut self) {
        self.terminate_once();
    }

    fn terminate_once(&mut self) {
        if !self.released {
            self.released = true;
            self.engine.terminate();
            debug!("Released OCR session");
        }
    }
}

impl<E: OcrEngine> Drop for EngineSession<E> {
    fn drop(&mut self) {
        self.terminate_once();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls(RefCell<Vec<&'static str>>);

    struct RecordingEngine {
        calls: Rc<Calls>,
        fail_on: Option<&'static str>,
    }

    impl RecordingEngine {
        fn step(&self, name: &'static str) -> Result<(), OcrError> {
            self.calls.0.borrow_mut().push(name);
            if self.fail_on == Some(name) {
                Err(OcrError::Initialization(name.to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl OcrEngine for RecordingEngine {
        fn load_language(&mut self, _language: &str) -> Result<(), OcrError> {
            self.step("load_language")
        }

        fn initialize(&mut self, _language: &str) -> Result<(), OcrError> {
            self.step("initialize")
        }

        fn set_parameters(&mut self, _params: &RecognitionParams) -> Result<(), OcrError> {
            self.step("set_parameters")
        }

        fn recognize(&mut self, _image: &DynamicImage) -> Result<String, OcrError> {
            self.step("recognize")?;
            if self.fail_on == Some("panic") {
                panic!("engine crashed during recognition");
            }
            Ok("text".to_string())
        }

        fn terminate(&mut self) {
            self.calls.0.borrow_mut().push("terminate");
        }
    }

    fn factory(
        calls: &Rc<Calls>,
        fail_on: Option<&'static str>,
    ) -> impl Fn() -> Result<RecordingEngine, OcrError> {
        let calls = Rc::clone(calls);
        move || {
            Ok(RecordingEngine {
                calls: Rc::clone(&calls),
                fail_on,
            })
        }
    }

    #[test]
    fn test_lifecycle_order() {
        let calls = Rc::new(Calls::default());
        let mut session = EngineSession::open(&factory(&calls, None), &OcrConfig::default()).unwrap();
        session.recognize(&DynamicImage::new_rgb8(1, 1)).unwrap();
        session.release();

        assert_eq!(
            *calls.0.borrow(),
            vec!["load_language", "initialize", "set_parameters", "recognize", "terminate"]
        );
    }

    #[test]
    fn test_drop_terminates_once() {
        let calls = Rc::new(Calls::default());
        {
            let _session =
                EngineSession::open(&factory(&calls, None), &OcrConfig::default()).unwrap();
        }
        let terminated = calls.0.borrow().iter().filter(|c| **c == "terminate").count();
        assert_eq!(terminated, 1);
    }

    #[test]
    fn test_failed_setup_still_terminates() {
        let calls = Rc::new(Calls::default());
        let result = EngineSession::open(&factory(&calls, Some("initialize")), &OcrConfig::default());

        assert!(matches!(result, Err(OcrError::Initialization(_))));
        assert_eq!(
            *calls.0.borrow(),
            vec!["load_language", "initialize", "terminate"]
        );
    }

    #[test]
    fn test_panic_during_recognition_terminates_once() {
        let calls = Rc::new(Calls::default());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut session =
                EngineSession::open(&factory(&calls, Some("panic")), &OcrConfig::default())
                    .unwrap();
            let _ = session.recognize(&DynamicImage::new_rgb8(1, 1));
        }));

        assert!(result.is_err());
        assert_eq!(
            *calls.0.borrow(),
            vec!["load_language", "initialize", "set_parameters", "recognize", "terminate"]
        );
    }
}
