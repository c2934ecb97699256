//! Tutor Client
//!
//! The concrete client behind the capability traits. Holds the shared
//! `reqwest` client plus configuration, and routes every operation
//! through one buffered POST helper or the stream factory.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::ask::{AskOptions, ask_with_options};
use crate::config::{ClientConfig, HttpConfig};
use crate::defaults::endpoints;
use crate::error::TutorError;
use crate::streaming::{AnswerStream, StreamFactory};
use crate::traits::{QaCapability, QuizCapability, TranscriptionCapability};
use crate::types::{
    Answer, AskMode, AskRequest, Quiz, QuizRequest, Transcript, TranscriptionRequest,
};

/// Client for the tutoring backend.
///
/// Cheap to clone; clones share the underlying HTTP connection pool.
///
/// # Example
/// ```rust,no_run
/// # use tutorwire::prelude::*;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TutorClient::builder()
///     .base_url("https://api.example.com")
///     .api_key("key")
///     .build()?;
///
/// let answer = client
///     .ask(AskRequest::new("bio-101", "What is osmosis?"))
///     .await?;
/// println!("{}", answer.text());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct TutorClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl TutorClient {
    /// Returns a builder for constructing a client.
    pub fn builder() -> TutorClientBuilder {
        TutorClientBuilder::default()
    }

    /// Creates a client from an assembled config, building the HTTP
    /// client from its `HttpConfig`.
    pub fn new(config: ClientConfig) -> Result<Self, TutorError> {
        let http_client = build_http_client(&config.http_config)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Asks with the original callback surface layered over the stream.
    ///
    /// `mode` is sampled by the caller once per call; see
    /// [`AskMode::from_streaming_flag`].
    pub async fn ask_with_options(
        &self,
        request: AskRequest,
        mode: AskMode,
        options: AskOptions,
    ) -> Result<Answer, TutorError> {
        ask_with_options(self, request, mode, options).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn build_headers(&self) -> Result<reqwest::header::HeaderMap, TutorError> {
        let mut headers = reqwest::header::HeaderMap::new();

        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        if let Some(api_key) = &self.config.api_key {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(&format!(
                    "Bearer {}",
                    api_key.expose_secret()
                ))
                .map_err(|e| TutorError::InvalidParameter(format!("Invalid API key: {e}")))?,
            );
        }

        for (key, value) in &self.config.http_config.headers {
            let name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| TutorError::InvalidParameter(format!("Invalid header name: {e}")))?;
            let value = reqwest::header::HeaderValue::from_str(value)
                .map_err(|e| TutorError::InvalidParameter(format!("Invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Shared buffered POST: send, classify, parse.
    ///
    /// Every buffered operation goes through here so status and decode
    /// failures classify identically.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, TutorError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        let url = self.endpoint(path);
        debug!(%request_id, url = %url, "sending request");

        let response = self
            .http_client
            .post(&url)
            .headers(self.build_headers()?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                format!("request failed with status {status}")
            } else {
                text.trim().to_string()
            };
            debug!(%request_id, code = status.as_u16(), "request rejected");
            return Err(TutorError::api_error(status.as_u16(), message));
        }

        let text = response
            .text()
            .await
            .map_err(|e| TutorError::HttpError(format!("Failed to read body: {e}")))?;
        let parsed = serde_json::from_str(&text)
            .map_err(|e| TutorError::ParseError(format!("Unexpected response shape: {e}")))?;
        debug!(%request_id, "request completed");
        Ok(parsed)
    }
}

fn validate_ask(request: &AskRequest) -> Result<(), TutorError> {
    if request.text.trim().is_empty() {
        return Err(TutorError::InvalidParameter(
            "question text must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn build_http_client(config: &HttpConfig) -> Result<reqwest::Client, TutorError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    builder
        .build()
        .map_err(|e| TutorError::HttpError(format!("Failed to build HTTP client: {e}")))
}

#[async_trait]
impl QaCapability for TutorClient {
    async fn ask(&self, request: AskRequest) -> Result<Answer, TutorError> {
        validate_ask(&request)?;
        self.post_json(endpoints::ASK, &request).await
    }

    async fn ask_stream(&self, request: AskRequest) -> Result<AnswerStream, TutorError> {
        validate_ask(&request)?;

        let request_id = Uuid::new_v4();
        let url = self.endpoint(endpoints::ASK_STREAM);
        debug!(%request_id, url = %url, "opening answer stream");

        let mut headers = self.build_headers()?;
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("text/event-stream"),
        );
        if self.config.http_config.stream_disable_compression {
            headers.insert(
                reqwest::header::ACCEPT_ENCODING,
                reqwest::header::HeaderValue::from_static("identity"),
            );
        }

        let builder = self.http_client.post(&url).headers(headers).json(&request);
        StreamFactory::create_answer_stream(builder).await
    }
}

#[async_trait]
impl QuizCapability for TutorClient {
    async fn generate_quiz(&self, request: QuizRequest) -> Result<Quiz, TutorError> {
        if request.question_count == 0 {
            return Err(TutorError::InvalidParameter(
                "question count must be at least 1".to_string(),
            ));
        }
        self.post_json(endpoints::QUIZ, &request).await
    }
}

#[async_trait]
impl TranscriptionCapability for TutorClient {
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<Transcript, TutorError> {
        if request.media_id.trim().is_empty() {
            return Err(TutorError::InvalidParameter(
                "media id must not be empty".to_string(),
            ));
        }
        self.post_json(endpoints::TRANSCRIBE, &request).await
    }
}

/// Builder for [`TutorClient`]
#[derive(Debug, Default)]
pub struct TutorClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    http_config: Option<HttpConfig>,
    http_client: Option<reqwest::Client>,
}

impl TutorClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn http_config(mut self, http_config: HttpConfig) -> Self {
        self.http_config = Some(http_config);
        self
    }

    /// Use a caller-provided `reqwest` client instead of building one.
    /// Timeouts configured on `HttpConfig` do not apply to it.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Validates settings and constructs the client.
    pub fn build(self) -> Result<TutorClient, TutorError> {
        let base_url = self
            .base_url
            .ok_or_else(|| TutorError::InvalidParameter("base_url is required".to_string()))?;
        reqwest::Url::parse(&base_url)
            .map_err(|e| TutorError::InvalidParameter(format!("Invalid base URL: {e}")))?;

        let mut config = ClientConfig::new(base_url);
        if let Some(api_key) = self.api_key {
            config = config.with_api_key(api_key);
        }
        if let Some(http_config) = self.http_config {
            config = config.with_http_config(http_config);
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => build_http_client(&config.http_config)?,
        };

        Ok(TutorClient {
            config,
            http_client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_base_url() {
        let err = TutorClient::builder().build().unwrap_err();
        assert!(matches!(err, TutorError::InvalidParameter(_)));
    }

    #[test]
    fn builder_rejects_unparseable_base_url() {
        let err = TutorClient::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, TutorError::InvalidParameter(_)));
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = TutorClient::builder()
            .base_url("https://api.example.com/")
            .build()
            .unwrap();
        assert_eq!(
            client.endpoint(endpoints::ASK),
            "https://api.example.com/api/tutor/ask"
        );
    }

    #[test]
    fn headers_carry_bearer_and_content_type() {
        let client = TutorClient::builder()
            .base_url("https://api.example.com")
            .api_key("sk-test")
            .build()
            .unwrap();
        let headers = client.build_headers().unwrap();
        assert_eq!(headers[reqwest::header::CONTENT_TYPE], "application/json");
        assert_eq!(headers[reqwest::header::AUTHORIZATION], "Bearer sk-test");
    }

    #[test]
    fn headers_without_api_key_skip_authorization() {
        let client = TutorClient::builder()
            .base_url("https://api.example.com")
            .build()
            .unwrap();
        let headers = client.build_headers().unwrap();
        assert!(!headers.contains_key(reqwest::header::AUTHORIZATION));
    }

    #[tokio::test]
    async fn empty_question_is_rejected_before_any_request() {
        let client = TutorClient::builder()
            .base_url("https://api.example.com")
            .build()
            .unwrap();
        let err = client
            .ask(AskRequest::new("bio-101", "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, TutorError::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn zero_question_quiz_is_rejected() {
        let client = TutorClient::builder()
            .base_url("https://api.example.com")
            .build()
            .unwrap();
        let err = client
            .generate_quiz(QuizRequest::new("bio-101", "mod-3", 0))
            .await
            .unwrap_err();
        assert!(matches!(err, TutorError::InvalidParameter(_)));
    }
}
