// SPDX-FileCopyrightText: 2026 brick.mov
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat proxy between site visitors and the Gemini API.
//!
//! Applies the per-visitor quota, prepends the persona as a system
//! instruction, and maps conversation history onto Gemini's turn format.
//! Visitor messages are forwarded verbatim; the server never stores them.

use brickmov_core::{BrickError, ChatTurn};
use brickmov_gemini::{Content, GenerateRequest, GenerationConfig, GeminiClient};
use tracing::{debug, warn};

use crate::quota::QuotaLedger;

/// Reply sent when the model answers with an empty candidate list.
const EMPTY_REPLY_FALLBACK: &str =
    "O protocolo não retornou resposta. Tente novamente em instantes.";

/// A completed chat exchange: the model's reply and the calls the
/// visitor has left in the current window.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub text: String,
    pub remaining: u32,
}

/// Quota-gated front for the Gemini client.
///
/// `client` is `None` when no API key is configured; the proxy then
/// answers every call with a configuration error instead of panicking
/// at startup, so the rest of the site stays up.
pub struct ChatProxy {
    client: Option<GeminiClient>,
    quota: QuotaLedger,
    persona: String,
    quota_message: String,
}

impl ChatProxy {
    pub fn new(
        client: Option<GeminiClient>,
        quota: QuotaLedger,
        persona: String,
        quota_message: String,
    ) -> Self {
        Self {
            client,
            quota,
            persona,
            quota_message,
        }
    }

    /// Handles one visitor message.
    ///
    /// A quota slot is reserved up front and returned if the upstream
    /// call fails, so only successful exchanges count against the limit.
    pub async fn handle(
        &self,
        session_id: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<ChatReply, BrickError> {
        let Some(remaining) = self.quota.try_begin(session_id) else {
            debug!(session = %session_id, "chat quota exhausted");
            return Err(BrickError::QuotaExceeded {
                message: self.quota_message.clone(),
            });
        };

        let Some(client) = &self.client else {
            self.quota.release(session_id);
            return Err(BrickError::Config(
                "chat is not configured: missing Gemini API key".to_string(),
            ));
        };

        let request = self.build_request(history, message);
        match client.generate(&request).await {
            Ok(response) => {
                let text = response
                    .first_text()
                    .unwrap_or(EMPTY_REPLY_FALLBACK)
                    .to_string();
                Ok(ChatReply { text, remaining })
            }
            Err(err) => {
                self.quota.release(session_id);
                warn!(session = %session_id, error = %err, "upstream chat call failed");
                Err(err)
            }
        }
    }

    fn build_request(&self, history: &[ChatTurn], message: &str) -> GenerateRequest {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| {
                // Anything that is not a user turn maps to "model"; the
                // API accepts no other roles.
                let role = if turn.role == "user" { "user" } else { "model" };
                Content::text(role, turn.content.clone())
            })
            .collect();
        contents.push(Content::text("user", message));

        GenerateRequest {
            system_instruction: Some(Content::system(self.persona.clone())),
            contents,
            generation_config: GenerationConfig::fixed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn proxy_against(server: &MockServer, quota: u32) -> ChatProxy {
        let client = GeminiClient::new("test-key", "gemini-1.5-flash")
            .unwrap()
            .with_base_url(server.uri());
        ChatProxy::new(
            Some(client),
            QuotaLedger::with_window(quota, Duration::from_secs(3600)),
            "Você é o protocolo da brick.mov.".to_string(),
            "Limite atingido.".to_string(),
        )
    }

    fn reply_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": text}]}}
            ]
        })
    }

    #[tokio::test]
    async fn forwards_message_and_counts_down() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "oi"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("olá")))
            .mount(&server)
            .await;

        let proxy = proxy_against(&server, 2);
        let reply = proxy.handle("visitor-1", &[], "oi").await.unwrap();
        assert_eq!(reply.text, "olá");
        assert_eq!(reply.remaining, 1);
    }

    #[tokio::test]
    async fn history_roles_map_onto_user_and_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "primeira"}]},
                    {"role": "model", "parts": [{"text": "resposta"}]},
                    {"role": "user", "parts": [{"text": "segunda"}]}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let history = vec![
            ChatTurn {
                role: "user".to_string(),
                content: "primeira".to_string(),
            },
            ChatTurn {
                role: "assistant".to_string(),
                content: "resposta".to_string(),
            },
        ];

        let proxy = proxy_against(&server, 6);
        proxy.handle("visitor-1", &history, "segunda").await.unwrap();
    }

    #[tokio::test]
    async fn quota_exhaustion_returns_configured_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("olá")))
            .mount(&server)
            .await;

        let proxy = proxy_against(&server, 1);
        proxy.handle("visitor-1", &[], "oi").await.unwrap();

        let err = proxy.handle("visitor-1", &[], "oi de novo").await.unwrap_err();
        match err {
            BrickError::QuotaExceeded { message } => assert_eq!(message, "Limite atingido."),
            other => panic!("expected quota error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_upstream_call_does_not_consume_quota() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("olá")))
            .mount(&server)
            .await;

        let proxy = proxy_against(&server, 1);
        assert!(proxy.handle("visitor-1", &[], "oi").await.is_err());

        // The failed call was released, so the single-call quota is intact.
        let reply = proxy.handle("visitor-1", &[], "oi").await.unwrap();
        assert_eq!(reply.remaining, 0);
    }

    #[tokio::test]
    async fn empty_candidates_fall_back_to_sentinel_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let proxy = proxy_against(&server, 1);
        let reply = proxy.handle("visitor-1", &[], "oi").await.unwrap();
        assert_eq!(reply.text, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn missing_client_is_a_config_error_and_stays_free() {
        let proxy = ChatProxy::new(
            None,
            QuotaLedger::with_window(1, Duration::from_secs(3600)),
            "persona".to_string(),
            "Limite atingido.".to_string(),
        );

        for _ in 0..3 {
            let err = proxy.handle("visitor-1", &[], "oi").await.unwrap_err();
            assert!(matches!(err, BrickError::Config(_)), "got {err:?}");
        }
    }
}
