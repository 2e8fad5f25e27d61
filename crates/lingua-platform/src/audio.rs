//! Audio playback through an `HTMLAudioElement`.
//!
//! Each clip is wrapped in a `Blob`, exposed through an object URL for the
//! duration of playback and revoked once the clip ends, fails or is stopped.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAudioElement, Url};

use lingua_core::ports::AudioPlaybackPort;
use lingua_types::{LinguaError, Result};

type Done = Rc<RefCell<Option<oneshot::Sender<Result<()>>>>>;

struct Playing {
    element: HtmlAudioElement,
    done: Done,
}

#[derive(Default)]
pub struct HtmlAudioPlayer {
    current: RefCell<Option<Playing>>,
}

impl HtmlAudioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.current.borrow().is_some()
    }

    fn finish(&self, element: &HtmlAudioElement) {
        let mut current = self.current.borrow_mut();
        if current.as_ref().map(|p| &p.element) == Some(element) {
            *current = None;
        }
    }
}

#[async_trait(?Send)]
impl AudioPlaybackPort for HtmlAudioPlayer {
    async fn play(&self, audio: &[u8], mime: &str) -> Result<()> {
        self.stop();

        let url = object_url(audio, mime)?;
        let element = match HtmlAudioElement::new_with_src(&url) {
            Ok(element) => element,
            Err(e) => {
                revoke(&url);
                return Err(LinguaError::Audio(format!("{:?}", e)));
            }
        };

        let (tx, rx) = oneshot::channel::<Result<()>>();
        let done: Done = Rc::new(RefCell::new(Some(tx)));

        let done_on_end = done.clone();
        let onended = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            if let Some(tx) = done_on_end.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        let done_on_error = done.clone();
        let onerror = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            if let Some(tx) = done_on_error.borrow_mut().take() {
                let _ = tx.send(Err(LinguaError::Audio("playback failed".to_string())));
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        element.set_onended(Some(onended.as_ref().unchecked_ref()));
        element.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        *self.current.borrow_mut() = Some(Playing {
            element: element.clone(),
            done,
        });

        let started = match element.play() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| LinguaError::Audio(format!("{:?}", e))),
            Err(e) => Err(LinguaError::Audio(format!("{:?}", e))),
        };

        // Stopping drops the sender; that counts as a normal end
        let result = match started {
            Ok(()) => rx.await.unwrap_or(Ok(())),
            Err(e) => Err(e),
        };

        element.set_onended(None);
        element.set_onerror(None);
        element.remove_attribute("src").ok();
        revoke(&url);
        self.finish(&element);
        drop((onended, onerror));

        if let Err(ref e) = result {
            log::warn!("Audio playback ended with error: {}", e);
        }
        result
    }

    fn stop(&self) {
        if let Some(playing) = self.current.borrow_mut().take() {
            let _ = playing.element.pause();
            if let Some(tx) = playing.done.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        }
    }
}

fn object_url(audio: &[u8], mime: &str) -> Result<String> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(audio));

    let options = BlobPropertyBag::new();
    options.set_type(mime);

    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| LinguaError::Audio(format!("{:?}", e)))?;
    Url::create_object_url_with_blob(&blob).map_err(|e| LinguaError::Audio(format!("{:?}", e)))
}

fn revoke(url: &str) {
    if let Err(e) = Url::revoke_object_url(url) {
        log::debug!("Could not revoke {}: {:?}", url, e);
    }
}
