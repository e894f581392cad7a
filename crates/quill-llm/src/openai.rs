//! OpenAI-compatible chat-completions client.
//!
//! Each call is a single non-streaming `POST {base_url}/chat/completions`
//! carrying the prompt as one `system` message. The completion text is
//! `choices[0].message.content`.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::client::{CompletionOptions, InferenceClient};
use crate::errors::{InferenceError, Result};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for [`OpenAiClient`].
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API base URL, without the `/chat/completions` path.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Bearer credential. Calls fail with [`InferenceError::Auth`] when absent.
    pub api_key: Option<SecretString>,
    /// Whole-request timeout. `None` never times out.
    pub timeout: Option<Duration>,
}

impl OpenAiConfig {
    /// Config for `model` against the public endpoint.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key: None,
            timeout: None,
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// ── Client ──────────────────────────────────────────────────────────────────

/// Chat-completions client.
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: reqwest::Client,
    endpoint: String,
}

impl OpenAiClient {
    /// Build a client. Fails only if the HTTP client cannot be constructed.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));

        info!(model = %config.model, endpoint = %endpoint, "inference client initialized");

        Ok(Self {
            config,
            client,
            endpoint,
        })
    }

    /// Full request URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceClient for OpenAiClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    #[instrument(skip_all, fields(model = %self.config.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        let Some(key) = &self.config.api_key else {
            return Err(InferenceError::Auth {
                message: "no API key configured (set OPENAI_KEY or OPENAI_API_KEY)".into(),
            });
        };

        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "system",
                content: prompt,
            }],
            temperature: options.temperature,
            top_p: options.top_p,
            frequency_penalty: options.frequency_penalty,
            presence_penalty: options.presence_penalty,
            max_tokens: options.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = parse_api_error(&body, status.as_u16());
            return Err(InferenceError::from_status(status.as_u16(), message));
        }

        let completion = parse_completion(&body)?;
        debug!(completion_len = completion.len(), "completion received");
        Ok(completion)
    }
}

/// Extract `error.message` from an error body, falling back to the raw body.
fn parse_api_error(body: &str, status: u16) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| format!("HTTP {status}: {body}"))
}

fn parse_completion(body: &str) -> Result<String> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| InferenceError::MalformedResponse {
            message: format!("invalid JSON body: {e}"),
        })?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| InferenceError::MalformedResponse {
            message: "response has no choices[0]".into(),
        })?;

    choice
        .message
        .content
        .ok_or_else(|| InferenceError::MalformedResponse {
            message: "choices[0].message.content is null".into(),
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new(
            OpenAiConfig::new("gpt-4o")
                .with_base_url(server.uri())
                .with_api_key("sk-test"),
        )
        .unwrap()
    }

    fn ok_body(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        })
    }

    // ── Pure parsing ────────────────────────────────────────────────

    #[test]
    fn parse_api_error_json() {
        let body = r#"{"error": {"message": "Invalid model", "type": "invalid_request_error"}}"#;
        assert_eq!(parse_api_error(body, 400), "Invalid model");
    }

    #[test]
    fn parse_api_error_non_json() {
        assert_eq!(parse_api_error("gateway down", 502), "HTTP 502: gateway down");
    }

    #[test]
    fn parse_completion_variants() {
        assert_eq!(parse_completion(&ok_body("hi").to_string()).unwrap(), "hi");
        assert_matches!(
            parse_completion(r#"{"choices": []}"#),
            Err(InferenceError::MalformedResponse { .. })
        );
        assert_matches!(
            parse_completion(r#"{"object": "list"}"#),
            Err(InferenceError::MalformedResponse { .. })
        );
        assert_matches!(
            parse_completion(r#"{"choices": [{"message": {"content": null}}]}"#),
            Err(InferenceError::MalformedResponse { .. })
        );
        assert_matches!(
            parse_completion("<html>"),
            Err(InferenceError::MalformedResponse { .. })
        );
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = OpenAiClient::new(OpenAiConfig::new("m").with_base_url("http://x/v1/")).unwrap();
        assert_eq!(client.endpoint(), "http://x/v1/chat/completions");
        assert_eq!(client.model(), "m");
    }

    #[test]
    fn config_debug_redacts_key() {
        let config = OpenAiConfig::new("m").with_api_key("sk-very-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
    }

    // ── Mock server ─────────────────────────────────────────────────

    #[tokio::test]
    async fn sends_system_message_and_sampling_params() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(json!({
                "model": "gpt-4o",
                "messages": [{"role": "system", "content": "Write about entropy"}],
                "temperature": 1.0,
                "top_p": 1.0,
                "frequency_penalty": 0.0,
                "presence_penalty": 0.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("Entropy is...")))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .complete("Write about entropy", &CompletionOptions::default())
            .await
            .unwrap();
        assert_eq!(text, "Entropy is...");
    }

    #[tokio::test]
    async fn max_tokens_sent_when_set() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({
                "model": "gpt-4o",
                "messages": [{"role": "system", "content": "p"}],
                "temperature": 0.5,
                "top_p": 1.0,
                "frequency_penalty": 0.0,
                "presence_penalty": 0.0,
                "max_tokens": 64
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("ok")))
            .mount(&server)
            .await;

        let opts = CompletionOptions::default()
            .with_temperature(0.5)
            .with_max_tokens(64);
        assert_eq!(client_for(&server).complete("p", &opts).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete("p", &CompletionOptions::default())
            .await
            .unwrap_err();
        assert_matches!(err, InferenceError::Auth { ref message } if message == "Incorrect API key provided");
    }

    #[tokio::test]
    async fn server_error_maps_to_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {"message": "The server had an error"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete("p", &CompletionOptions::default())
            .await
            .unwrap_err();
        assert_matches!(err, InferenceError::Api { status: 500, ref message } if message == "The server had an error");
    }

    #[tokio::test]
    async fn missing_choices_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete("p", &CompletionOptions::default())
            .await
            .unwrap_err();
        assert_matches!(err, InferenceError::MalformedResponse { .. });
    }

    #[tokio::test]
    async fn missing_key_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body("x")))
            .expect(0)
            .mount(&server)
            .await;

        let client =
            OpenAiClient::new(OpenAiConfig::new("gpt-4o").with_base_url(server.uri())).unwrap();
        let err = client
            .complete("p", &CompletionOptions::default())
            .await
            .unwrap_err();
        assert_matches!(err, InferenceError::Auth { .. });
    }

    #[tokio::test]
    async fn connection_failure_is_http() {
        // Bind then release a port so nothing is listening on it.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = OpenAiClient::new(
            OpenAiConfig::new("gpt-4o")
                .with_base_url(format!("http://127.0.0.1:{port}"))
                .with_api_key("k"),
        )
        .unwrap();
        let err = client
            .complete("p", &CompletionOptions::default())
            .await
            .unwrap_err();
        assert_matches!(err, InferenceError::Http(_));
        assert_eq!(err.category(), "network");
    }
}
