use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::env;
use crate::error::CommonError;

#[derive(Clone, Debug)]
pub struct ResendClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_error_body_bytes: usize,
}

impl ResendClientConfig {
    /// Optional:
    /// - `RESEND_API_KEY` (default: empty; the provider will reject sends)
    /// - `RESEND_BASE_URL` (default: "https://api.resend.com")
    /// - `RESEND_TIMEOUT_SECS` (default: 15)
    /// - `RESEND_MAX_ERROR_BODY_BYTES` (default: 8192)
    pub fn from_env() -> Result<Self, CommonError> {
        let api_key = std::env::var("RESEND_API_KEY").unwrap_or_default();
        let base_url = env::var_or("RESEND_BASE_URL", "https://api.resend.com");
        let timeout = Duration::from_secs(env::parse_or("RESEND_TIMEOUT_SECS", 15u64)?);
        let max_error_body_bytes = env::parse_or("RESEND_MAX_ERROR_BODY_BYTES", 8 * 1024usize)?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            max_error_body_bytes,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("email request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid provider response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The provider answered with an error envelope. Displays the provider's message as-is.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("email provider returned status={status} body={body}")]
    UnexpectedResponse { status: StatusCode, body: String },
}

/// A single transactional email, shaped the way the provider's send API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SendReceipt {
    pub id: Option<String>,
}

/// Anything that can deliver an [`OutboundEmail`].
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt, MailerError>;
}

/// Resend's `POST /emails` API. Each call is a single attempt; failures are returned
/// to the caller, which decides whether to resubmit.
#[derive(Clone)]
pub struct ResendClient {
    config: ResendClientConfig,
    http: reqwest::Client,
}

impl ResendClient {
    pub fn new(config: ResendClientConfig) -> Result<Self, MailerError> {
        let http = reqwest::Client::builder()
            .user_agent("hiddenpg/lead-intake")
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    /// Parses the provider's error envelope from the full body. Only a body that is not an
    /// envelope is cut down to `max_error_body_bytes`.
    async fn to_provider_error(resp: reqwest::Response, max_error_body_bytes: usize) -> MailerError {
        let status = resp.status();
        let bytes = match resp.bytes().await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "failed to read provider error body");
                return MailerError::UnexpectedResponse {
                    status,
                    body: "<failed to read error body>".to_string(),
                };
            }
        };
        if let Ok(parsed) = serde_json::from_slice::<ResendErrorEnvelope>(&bytes) {
            let message = parsed
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Email send failed".to_string());
            return MailerError::Rejected { status, message };
        }
        MailerError::UnexpectedResponse {
            status,
            body: truncate_lossy(&bytes, max_error_body_bytes),
        }
    }
}

#[async_trait]
impl Mailer for ResendClient {
    async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt, MailerError> {
        let url = format!("{}/emails", self.config.base_url);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(email)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::to_provider_error(resp, self.config.max_error_body_bytes).await);
        }

        let bytes = resp.bytes().await?;
        let receipt = if bytes.is_empty() {
            SendReceipt::default()
        } else {
            serde_json::from_slice::<SendReceipt>(&bytes)?
        };
        debug!(id = ?receipt.id, "email accepted by provider");
        Ok(receipt)
    }
}

fn truncate_lossy(bytes: &[u8], max_bytes: usize) -> String {
    String::from_utf8_lossy(&bytes[..bytes.len().min(max_bytes)]).into_owned()
}

#[derive(Debug, Deserialize)]
struct ResendErrorEnvelope {
    message: Option<String>,
    #[allow(dead_code)]
    name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ResendClient {
        ResendClient::new(ResendClientConfig {
            api_key: "re_test".to_string(),
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
            max_error_body_bytes: 64,
        })
        .unwrap()
    }

    fn sample_email(reply_to: Option<&str>) -> OutboundEmail {
        OutboundEmail {
            from: "Hidden PG <hello@hiddenprincegeorge.ca>".to_string(),
            to: vec!["hello@hiddenprincegeorge.ca".to_string()],
            subject: "Newsletter signup (CTA)".to_string(),
            html: "<h2>Newsletter signup</h2>".to_string(),
            text: "Newsletter signup".to_string(),
            reply_to: reply_to.map(str::to_string),
        }
    }

    #[test]
    fn reply_to_is_omitted_when_absent() {
        let json = serde_json::to_value(sample_email(None)).unwrap();
        assert!(json.get("reply_to").is_none());

        let json = serde_json::to_value(sample_email(Some("a@b.co"))).unwrap();
        assert_eq!(json["reply_to"], "a@b.co");
    }

    #[tokio::test]
    async fn send_posts_to_emails_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer re_test"))
            .and(body_partial_json(serde_json::json!({
                "subject": "Newsletter signup (CTA)",
                "to": ["hello@hiddenprincegeorge.ca"],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "em_123" })))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = client_for(&server).send(&sample_email(None)).await.unwrap();
        assert_eq!(receipt.id.as_deref(), Some("em_123"));
    }

    #[tokio::test]
    async fn provider_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "statusCode": 422,
                "name": "validation_error",
                "message": "Invalid `to` field."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).send(&sample_email(None)).await.unwrap_err();
        match &err {
            MailerError::Rejected { status, message } => {
                assert_eq!(*status, StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(message, "Invalid `to` field.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Invalid `to` field.");
    }

    #[tokio::test]
    async fn long_error_envelope_still_yields_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "name": "validation_error",
                "details": "d".repeat(9000),
                "message": "The `from` domain is not verified."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).send(&sample_email(None)).await.unwrap_err();
        assert!(matches!(err, MailerError::Rejected { .. }), "unexpected error: {err:?}");
        assert_eq!(err.to_string(), "The `from` domain is not verified.");
    }

    #[tokio::test]
    async fn non_json_error_body_is_truncated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(502).set_body_string("x".repeat(500)))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).send(&sample_email(None)).await.unwrap_err();
        match err {
            MailerError::UnexpectedResponse { status, body } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body.len(), 64);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
