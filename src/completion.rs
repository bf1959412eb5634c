//! Completion backends: the remote AI call behind the AI service.
//!
//! [`DeepSeekBackend`] talks to DeepSeek's OpenAI-compatible chat completions
//! endpoint. [`EchoBackend`] is the deterministic stand-in used in mock mode.

use crate::config::Config;
use crate::error::CommanderError;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

const SHELL_SYSTEM_PROMPT: &str = "Respond only with a bash script that accomplishes the request. \
No explanations, no markdown code fences, no text outside the script.";

/// One query as seen by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionRequest<'q> {
    pub query: &'q str,
    pub enforce_shell: bool,
}

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, CommanderError>;
}

/// Returns `Response to: <query>` without any network access.
pub struct EchoBackend;

#[async_trait]
impl CompletionBackend for EchoBackend {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, CommanderError> {
        Ok(format!("Response to: {}", request.query))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

pub struct DeepSeekBackend<C: HttpClient = ReqwestHttpClient> {
    client: C,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl<C: HttpClient> DeepSeekBackend<C> {
    pub fn new(client: C, endpoint: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }

    fn build_body(&self, request: &CompletionRequest<'_>) -> serde_json::Value {
        let mut messages = Vec::new();
        if request.enforce_shell {
            messages.push(json!({ "role": "system", "content": SHELL_SYSTEM_PROMPT }));
        }
        messages.push(json!({ "role": "user", "content": request.query }));

        json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        })
    }

    fn parse_response(body: &str) -> Result<String, CommanderError> {
        let parsed: ChatCompletionResponse = serde_json::from_str(body).map_err(|err| {
            warn!("Failed to parse completion response: {}", body);
            CommanderError::Completion(format!("unexpected response format: {}", err))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CommanderError::Completion("no choices in API response".to_string()))?;

        if content.trim().is_empty() {
            return Err(CommanderError::Completion(
                "empty response received from API".to_string(),
            ));
        }
        Ok(content)
    }
}

#[async_trait]
impl<C: HttpClient> CompletionBackend for DeepSeekBackend<C> {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, CommanderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CommanderError::Completion(
                "No DeepSeek API key found. Set one using either:\n\
                 \n\
                 1. The config file ~/.commander/config.toml:\n\
                 \x20  deepseek_api_key = \"sk-your-key-here\"\n\
                 \n\
                 2. An environment variable:\n\
                 \x20  export DEEPSEEK_API_KEY=sk-your-key-here"
                    .to_string(),
            )
        })?;

        let url = self.url();
        let authorization = format!("Bearer {}", api_key);
        let headers = [
            ("Authorization", authorization.as_str()),
            ("Content-Type", "application/json"),
        ];

        info!("Sending completion request to {} (model {})", url, self.model);
        let response = self
            .client
            .post_json(&url, &headers, &self.build_body(request))
            .await
            .map_err(|err| CommanderError::Completion(format!("request to {} failed: {}", url, err)))?;

        if !response.is_success() {
            warn!("Completion API returned status {}: {}", response.status, response.body);
            return Err(CommanderError::Completion(format!(
                "API returned status {}: {}",
                response.status,
                response.body.trim()
            )));
        }

        Self::parse_response(&response.body)
    }
}

/// Picks the backend described by `config`.
///
/// Mock mode wins over any API key. A missing key is reported when the first
/// request is made, so help and empty-query runs work without one.
pub fn backend_from_config(config: &Config) -> Result<Box<dyn CompletionBackend>, CommanderError> {
    if config.is_mock_mode() {
        info!("Using echo backend (mock mode)");
        return Ok(Box::new(EchoBackend));
    }

    let client = ReqwestHttpClient::with_timeout(config.timeout())?;
    Ok(Box::new(DeepSeekBackend::new(
        client,
        &config.endpoint,
        &config.model,
        config.get_api_key().map(str::to_string),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_support::MockHttpClient;

    const OK_BODY: &str = r#"{
        "id": "cmpl-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": "ls -la" } }
        ]
    }"#;

    fn backend(client: MockHttpClient) -> DeepSeekBackend<MockHttpClient> {
        DeepSeekBackend::new(client, "https://api.test/", "deepseek-chat", Some("sk-test".to_string()))
    }

    fn request(query: &str, enforce_shell: bool) -> CompletionRequest<'_> {
        CompletionRequest { query, enforce_shell }
    }

    #[tokio::test]
    async fn test_echo_backend_is_deterministic() {
        let response = EchoBackend.complete(&request("list files", false)).await.unwrap();
        assert_eq!(response, "Response to: list files");
    }

    #[tokio::test]
    async fn test_deepseek_request_shape() {
        let backend = backend(MockHttpClient::replying(200, OK_BODY));
        let response = backend.complete(&request("list files", false)).await.unwrap();
        assert_eq!(response, "ls -la");

        let recorded = backend.client.last_request().unwrap();
        assert_eq!(recorded.url, "https://api.test/chat/completions");
        assert!(recorded
            .headers
            .contains(&("Authorization".to_string(), "Bearer sk-test".to_string())));
        assert_eq!(recorded.body["model"], "deepseek-chat");
        assert_eq!(recorded.body["stream"], false);
        let messages = recorded.body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "list files");
    }

    #[tokio::test]
    async fn test_shell_mode_adds_system_prompt() {
        let backend = backend(MockHttpClient::replying(200, OK_BODY));
        backend.complete(&request("list files", true)).await.unwrap();

        let recorded = backend.client.last_request().unwrap();
        let messages = recorded.body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["content"], "list files");
    }

    #[tokio::test]
    async fn test_missing_api_key_skips_request() {
        let backend =
            DeepSeekBackend::new(MockHttpClient::replying(200, OK_BODY), "https://api.test", "m", None);
        let err = backend.complete(&request("hi", false)).await.unwrap_err();
        assert!(err.to_string().contains("DEEPSEEK_API_KEY"));
        assert!(backend.client.last_request().is_none());
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let backend = backend(MockHttpClient::replying(401, "{\"error\":\"invalid key\"}"));
        let err = backend.complete(&request("hi", false)).await.unwrap_err();
        assert!(matches!(err, CommanderError::Completion(_)));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        let backend = backend(MockHttpClient::failing("operation timed out"));
        let err = backend.complete(&request("hi", false)).await.unwrap_err();
        assert!(err.to_string().contains("operation timed out"));
    }

    #[tokio::test]
    async fn test_unusable_bodies_are_errors() {
        for body in ["not json", r#"{"choices": []}"#, r#"{"choices": [{"message": {"content": "  "}}]}"#] {
            let backend = backend(MockHttpClient::replying(200, body));
            let err = backend.complete(&request("hi", false)).await.unwrap_err();
            assert!(matches!(err, CommanderError::Completion(_)), "body {:?}", body);
        }
    }

    #[tokio::test]
    async fn test_mock_mode_selects_echo_backend() {
        let config = Config {
            use_mock: true,
            deepseek_api_key: Some("sk-unused".to_string()),
            ..Config::default()
        };
        let backend = backend_from_config(&config).unwrap();
        let response = backend.complete(&request("list files", false)).await.unwrap();
        assert_eq!(response, "Response to: list files");
    }
}
