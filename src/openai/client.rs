//! HTTP client for the completion service.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::CompletionConfig;

use super::error::{ApiErrorResponse, CompletionError};
use super::types::{ChatRequest, ChatResponse, Turn};

/// Completion service client.
///
/// Wraps the chat-completions endpoint of a configured deployment. Cheap
/// to clone; the underlying HTTP client and configuration are shared.
#[derive(Clone)]
pub struct CompletionClient {
    inner: Arc<CompletionClientInner>,
}

struct CompletionClientInner {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl CompletionClient {
    /// Create a new completion client.
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint URL, credential, model identifier, and
    ///   optional API version
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &CompletionConfig) -> Self {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Azure-style deployments authenticate with an api-key header and
        // pin the wire format with an api-version query parameter; plain
        // endpoints take a bearer token.
        let url = if let Some(api_version) = &config.api_version {
            headers.insert(
                "api-key",
                HeaderValue::from_str(api_key).expect("Invalid API key for header"),
            );
            format!(
                "{}/chat/completions?api-version={api_version}",
                config.base_url
            )
        } else {
            let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .expect("Invalid API key for header");
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
            format!("{}/chat/completions", config.base_url)
        };

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(CompletionClientInner {
                client,
                url,
                model: config.model.clone(),
            }),
        }
    }

    /// Send the assembled turn list and return the generated reply text,
    /// trimmed of leading/trailing whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with an
    /// error status, the body cannot be parsed, or the reply is empty.
    #[instrument(skip(self, turns), fields(model = %self.inner.model, turns = turns.len()))]
    pub async fn complete(&self, turns: Vec<Turn>) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            messages: turns,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(handle_error_status(status, response).await);
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::Parse(format!("Failed to parse response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(CompletionError::EmptyReply)
    }
}

/// Handle an error status code.
async fn handle_error_status(
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> CompletionError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return CompletionError::RateLimited(retry_after);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return CompletionError::Unauthorized("Invalid API key".to_string());
    }

    match response.text().await {
        Ok(body) => {
            if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                CompletionError::Api {
                    error_type: api_error
                        .error
                        .error_type
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: api_error.error.message,
                }
            } else {
                CompletionError::Api {
                    error_type: "unknown".to_string(),
                    message: body,
                }
            }
        }
        Err(e) => CompletionError::Http(e),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;

    fn config(api_version: Option<&str>) -> CompletionConfig {
        CompletionConfig {
            api_key: SecretString::from("test-key"),
            base_url: "http://localhost:9".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_version: api_version.map(String::from),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_plain_endpoint_url() {
        let client = CompletionClient::new(&config(None));
        assert_eq!(client.inner.url, "http://localhost:9/chat/completions");
    }

    #[test]
    fn test_azure_endpoint_url_carries_api_version() {
        let client = CompletionClient::new(&config(Some("2024-02-01")));
        assert_eq!(
            client.inner.url,
            "http://localhost:9/chat/completions?api-version=2024-02-01"
        );
    }

    #[test]
    fn test_completion_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<CompletionClient>();
    }

    #[test]
    fn test_completion_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompletionClient>();
    }
}
