// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini generateContent API.
//!
//! Handles request construction, authentication headers, and error-body
//! decoding. Failures surface immediately on the affected request; there
//! is no retry loop.

use std::time::Duration;

use brickmov_core::BrickError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateRequest, GenerateResponse};

/// Base URL for the Gemini API.
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key sent via the `x-goog-api-key` header
    /// * `model` - Model identifier (e.g., "gemini-1.5-flash")
    pub fn new(api_key: &str, model: &str) -> Result<Self, BrickError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| BrickError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| BrickError::Upstream {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model: model.to_string(),
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the base URL. Intended for tests against a mock server.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a generateContent request and returns the parsed response.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, BrickError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| BrickError::Upstream {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "generateContent response received");

        let body = response.text().await.map_err(|e| BrickError::Upstream {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "Gemini API error ({}): {}",
                    api_err.error.status, api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(BrickError::Upstream {
                message,
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| BrickError::Upstream {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, GenerationConfig};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new("test-api-key", "gemini-1.5-flash")
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn test_request() -> GenerateRequest {
        GenerateRequest {
            system_instruction: Some(Content::system("persona")),
            contents: vec![Content::text("user", "olá")],
            generation_config: GenerationConfig::fixed(),
        }
    }

    #[tokio::test]
    async fn generate_success() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "oi, tudo bem?"}]}}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate(&test_request()).await.unwrap();
        assert_eq!(result.first_text(), Some("oi, tudo bem?"));
    }

    #[tokio::test]
    async fn generate_decodes_api_error_body() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {
                "code": 400,
                "message": "API key not valid",
                "status": "INVALID_ARGUMENT"
            }
        });

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.generate(&test_request()).await.unwrap_err();
        let err = err.to_string();
        assert!(err.contains("INVALID_ARGUMENT"), "got: {err}");
        assert!(err.contains("API key not valid"), "got: {err}");
    }

    #[tokio::test]
    async fn generate_does_not_retry_transient_errors() {
        let server = MockServer::start().await;

        // A single attempt, even on 503: a failed chat call must stay free
        // and surface immediately.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.generate(&test_request()).await.is_err());
    }

    #[tokio::test]
    async fn client_sends_api_key_header_and_fixed_params() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "ok"}]}}
            ]
        });

        Mock::given(method("POST"))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": {
                    "temperature": 0.9,
                    "topP": 0.95,
                    "topK": 40,
                    "maxOutputTokens": 1024
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate(&test_request()).await;
        assert!(result.is_ok(), "headers and body should match: {result:?}");
    }

    #[tokio::test]
    async fn empty_candidates_is_a_degraded_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.generate(&test_request()).await.unwrap();
        assert_eq!(result.first_text(), None);
    }
}
