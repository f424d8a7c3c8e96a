//! Transport seam between the mapping client and a chat-completions service.

use std::future::Future;
use std::time::Duration;

use fmap_config::OracleConfig;
use serde::Deserialize;

use crate::error::OracleError;
use crate::request::OracleRequest;

/// Something that can answer an [`OracleRequest`] with reply text.
pub trait ChatBackend: Send + Sync {
    /// Send one request and return `choices[0].message.content`.
    fn complete(
        &self,
        request: &OracleRequest,
    ) -> impl Future<Output = Result<String, OracleError>> + Send;
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

/// OpenAI-compatible `POST {endpoint}/chat/completions` over reqwest.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl HttpBackend {
    /// Build a backend with the configured endpoint, key, and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Transport`] if the HTTP client fails to build.
    pub fn new(config: &OracleConfig) -> Result<Self, OracleError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("fmap/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: config.completions_url(),
            api_key: config.api_key.clone(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ChatBackend for HttpBackend {
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError> {
        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(OracleError::Status {
                status: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let body = resp.text().await?;
        extract_content(&body)
    }
}

/// Pull `choices[0].message.content` out of a response body.
fn extract_content(body: &str) -> Result<String, OracleError> {
    let envelope: CompletionResponse =
        serde_json::from_str(body).map_err(|e| OracleError::Envelope(e.to_string()))?;
    envelope
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| OracleError::Envelope("response has no message content".into()))
}
