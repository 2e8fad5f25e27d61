//! HTTP adapter for the Lingua backend.
//!
//! Implements [`ChatPort`] and [`LanguagePort`] over browser `fetch()` via
//! gloo-net. Every request races a gloo-timers timeout; on expiry the fetch
//! is aborted through its `AbortController` and the call fails with
//! [`LinguaError::Timeout`].

use std::future::Future;
use async_trait::async_trait;
use futures::FutureExt;
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::AbortController;

use lingua_core::ports::{ChatPort, LanguagePort};
use lingua_types::{
    LinguaError, Result,
    api::*,
    config::ApiConfig,
    session::ChatSession,
};

pub struct HttpChatApi {
    config: ApiConfig,
}

impl HttpChatApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.endpoint(path);
        let response = self
            .send(|signal| Request::get(&url).abort_signal(signal).build())
            .await?;
        read_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.config.endpoint(path);
        let response = self
            .send(|signal| with_json(Request::post(&url).abort_signal(signal), body))
            .await?;
        read_json(response).await
    }

    /// Build and send a request bounded by the configured timeout.
    async fn send<F>(&self, build: F) -> Result<Response>
    where
        F: FnOnce(Option<&web_sys::AbortSignal>) -> std::result::Result<Request, gloo_net::Error>,
    {
        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());
        let request = build(signal.as_ref()).map_err(|e| LinguaError::Serialization(e.to_string()))?;
        let url = request.url();

        let fetch = async {
            request
                .send()
                .await
                .map_err(|e| LinguaError::Network(e.to_string()))
        };

        match self.bounded(fetch).await {
            Err(LinguaError::Timeout(ms)) => {
                log::warn!("Request to {} timed out after {}ms", url, ms);
                if let Some(controller) = controller {
                    controller.abort();
                }
                Err(LinguaError::Timeout(ms))
            }
            other => other,
        }
    }

    /// Race `fut` against the configured request timeout. A timeout of 0
    /// leaves the future unbounded.
    pub async fn bounded<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        let ms = self.config.request_timeout_ms;
        if ms == 0 {
            return fut.await;
        }

        let fut = fut.fuse();
        let timeout = TimeoutFuture::new(ms).fuse();
        futures::pin_mut!(fut, timeout);

        futures::select! {
            result = fut => result,
            _ = timeout => Err(LinguaError::Timeout(ms)),
        }
    }
}

fn with_json<B: Serialize>(builder: RequestBuilder, body: &B) -> std::result::Result<Request, gloo_net::Error> {
    builder.header("Content-Type", "application/json").json(body)
}

async fn ensure_ok(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    log::error!("HTTP {} from {}: {}", status, response.url(), body);
    Err(LinguaError::Http { status, body })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    ensure_ok(response)
        .await?
        .json()
        .await
        .map_err(|e| LinguaError::Serialization(e.to_string()))
}

#[async_trait(?Send)]
impl ChatPort for HttpChatApi {
    async fn list_sessions(&self) -> Result<Vec<ChatSession>> {
        let data: SessionsResponse = self.get_json("chat-sessions/").await?;
        Ok(data.into_sessions())
    }

    async fn load_history(&self, session_id: &str) -> Result<TextQueryResponse> {
        self.post_json("text-query/", &TextQueryRequest::load_history(session_id))
            .await
    }

    async fn text_query(&self, req: TextQueryRequest) -> Result<TextQueryResponse> {
        self.post_json("text-query/", &req).await
    }

    async fn edit_message(&self, req: EditMessageRequest) -> Result<EditMessageResponse> {
        self.post_json("edit-message/", &req).await
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        let url = self.config.endpoint("chat-session/");
        let body = DeleteSessionRequest {
            session_id: session_id.to_string(),
        };
        let response = self
            .send(|signal| with_json(Request::delete(&url).abort_signal(signal), &body))
            .await?;
        let status: StatusResponse = read_json(response).await?;

        if status.is_success() {
            Ok(())
        } else {
            Err(LinguaError::Rejected(
                status.message.unwrap_or(status.status),
            ))
        }
    }
}

#[async_trait(?Send)]
impl LanguagePort for HttpChatApi {
    async fn text_to_speech(&self, req: TextToSpeechRequest) -> Result<Vec<u8>> {
        let url = self.config.endpoint("text-to-speech");
        let response = self
            .send(|signal| with_json(Request::post(&url).abort_signal(signal), &req))
            .await?;
        let response = ensure_ok(response).await?;

        let audio = self
            .bounded(async {
                response
                    .binary()
                    .await
                    .map_err(|e| LinguaError::Network(e.to_string()))
            })
            .await?;
        if audio.is_empty() {
            return Err(LinguaError::MalformedResponse("audio body".to_string()));
        }
        Ok(audio)
    }

    async fn translate(&self, req: TranslateRequest) -> Result<String> {
        let data: TranslateResponse = self.post_json("translate", &req).await?;
        Ok(data.translated_text)
    }

    async fn languages(&self) -> Result<Vec<String>> {
        let data: LanguagesResponse = self.get_json("languages").await?;
        Ok(data.languages)
    }
}
