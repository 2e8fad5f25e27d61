//! Browser speech recognition adapter.
//!
//! Chrome still only ships the prefixed `webkitSpeechRecognition`
//! constructor, so the constructor is looked up on `window` at startup and
//! the resulting object is driven through the `web_sys::SpeechRecognition`
//! bindings.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{SpeechRecognition, SpeechRecognitionEvent};

use lingua_core::ports::{SpeechCapability, SpeechRecognizerPort};
use lingua_types::{LinguaError, Result};

const CONSTRUCTORS: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];

/// Errors that mean "nothing was heard" rather than a failure
const QUIET_ERRORS: [&str; 2] = ["no-speech", "aborted"];

type Outcome = Result<Option<String>>;

pub struct BrowserSpeechRecognizer {
    constructor: Function,
    active: RefCell<Option<SpeechRecognition>>,
}

/// Probe the browser for speech recognition support.
pub fn detect_speech_capability() -> SpeechCapability {
    match BrowserSpeechRecognizer::detect() {
        Some(recognizer) => {
            log::info!("Speech recognition available");
            SpeechCapability::Available(Rc::new(recognizer))
        }
        None => {
            log::warn!("Speech recognition not supported by this browser");
            SpeechCapability::Unavailable
        }
    }
}

impl BrowserSpeechRecognizer {
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let constructor = CONSTRUCTORS.iter().find_map(|name| {
            Reflect::get(&window, &JsValue::from_str(name))
                .ok()
                .filter(|value| value.is_function())
                .map(|value| value.unchecked_into::<Function>())
        })?;

        Some(Self {
            constructor,
            active: RefCell::new(None),
        })
    }

    fn create(&self, locale: &str) -> Result<SpeechRecognition> {
        let recognition: SpeechRecognition = Reflect::construct(&self.constructor, &Array::new())
            .map_err(|e| LinguaError::JsInterop(format!("{:?}", e)))?
            .unchecked_into();
        recognition.set_lang(locale);
        recognition.set_continuous(false);
        recognition.set_interim_results(false);
        recognition.set_max_alternatives(1);
        Ok(recognition)
    }

    fn release(&self, recognition: &SpeechRecognition) {
        recognition.set_onresult(None);
        recognition.set_onerror(None);
        recognition.set_onend(None);

        let mut active = self.active.borrow_mut();
        if active.as_ref() == Some(recognition) {
            *active = None;
        }
    }
}

#[async_trait(?Send)]
impl SpeechRecognizerPort for BrowserSpeechRecognizer {
    async fn recognize(&self, locale: &str) -> Result<Option<String>> {
        let recognition = self.create(locale)?;

        let (tx, rx) = oneshot::channel::<Outcome>();
        let tx = Rc::new(RefCell::new(Some(tx)));
        let heard: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

        let heard_on_result = heard.clone();
        let onresult = Closure::wrap(Box::new(move |event: SpeechRecognitionEvent| {
            if let Some(text) = first_transcript(&event) {
                *heard_on_result.borrow_mut() = Some(text);
            }
        }) as Box<dyn FnMut(SpeechRecognitionEvent)>);

        let tx_on_error = tx.clone();
        let onerror = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let code = Reflect::get(&event, &JsValue::from_str("error"))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_else(|| "unknown".to_string());
            let outcome = if QUIET_ERRORS.contains(&code.as_str()) {
                log::debug!("Speech recognition ended quietly ({})", code);
                Ok(None)
            } else {
                Err(LinguaError::JsInterop(format!("speech recognition failed: {}", code)))
            };
            if let Some(tx) = tx_on_error.borrow_mut().take() {
                let _ = tx.send(outcome);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        let tx_on_end = tx.clone();
        let heard_on_end = heard.clone();
        let onend = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            if let Some(tx) = tx_on_end.borrow_mut().take() {
                let _ = tx.send(Ok(heard_on_end.borrow_mut().take()));
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        recognition.set_onresult(Some(onresult.as_ref().unchecked_ref()));
        recognition.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        recognition.set_onend(Some(onend.as_ref().unchecked_ref()));

        if let Err(e) = recognition.start() {
            self.release(&recognition);
            return Err(LinguaError::JsInterop(format!("{:?}", e)));
        }
        *self.active.borrow_mut() = Some(recognition.clone());
        log::debug!("Listening ({})", locale);

        // A dropped sender means the session was torn down without an end event
        let outcome = rx.await.unwrap_or(Ok(None));

        self.release(&recognition);
        drop((onresult, onerror, onend));
        outcome
    }

    fn stop(&self) {
        if let Some(recognition) = self.active.borrow().as_ref() {
            recognition.stop();
        }
    }

    fn abort(&self) {
        if let Some(recognition) = self.active.borrow_mut().take() {
            recognition.abort();
        }
    }

    fn is_listening(&self) -> bool {
        self.active.borrow().is_some()
    }
}

fn first_transcript(event: &SpeechRecognitionEvent) -> Option<String> {
    let results = event.results()?;
    let result = results.get(event.result_index())?;
    let alternative = result.get(0)?;
    Some(alternative.transcript())
}
