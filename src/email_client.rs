//! A thin client for the SMTP2GO `email/send` API.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::email_message::EmailMessage;

/// Used when the response of the email service carries no usable error detail.
pub const FALLBACK_ERROR_DETAIL: &str =
    "Failed to send email - check SMTP2GO API key and sender verification";

#[derive(Debug)]
pub struct EmailClient {
    pub http_client: Client,
    pub url: reqwest::Url,
    api_key: SecretString,
}

impl EmailClient {
    pub fn new<S: AsRef<str>>(
        url: S,
        api_key: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        // `Url::join` replaces the last path segment unless the base ends with a slash.
        let url = url.as_ref();
        let url = if url.ends_with('/') {
            reqwest::Url::parse(url)
        } else {
            reqwest::Url::parse(&format!("{url}/"))
        }
        .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(EmailClient {
            http_client,
            url,
            api_key,
        })
    }

    /// Sends a single email and translates the response of the service into a `DeliveryOutcome`.
    ///
    /// The response body is interpreted regardless of its HTTP status, only transport failures
    /// and unparsable bodies are returned as an `Err`.
    pub async fn send_email(&self, message: &EmailMessage) -> Result<DeliveryOutcome> {
        let url = self
            .url
            .join("email/send")
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let email_content = EmailContent {
            api_key: self.api_key.expose_secret(),
            to: [message.recipient.as_ref()],
            sender: &message.sender,
            subject: &message.subject,
            html_body: &message.html_body,
            text_body: &message.text_body,
        };

        let resp = self
            .http_client
            .post(url)
            .json(&email_content)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        let send_response: SendEmailResponse = serde_json::from_slice(&body)?;
        debug!("{:<20} - status: {status}", "send_email");

        let outcome = DeliveryOutcome::from(send_response);
        if let DeliveryOutcome::Failure { .. } = &outcome {
            error!(
                "SMTP2GO error - status: {status}, response: {}",
                String::from_utf8_lossy(&body)
            );
        }

        Ok(outcome)
    }
}

#[derive(Serialize)]
pub struct EmailContent<'a> {
    pub api_key: &'a str,
    pub to: [&'a str; 1],
    pub sender: &'a str,
    pub subject: &'a str,
    pub html_body: &'a str,
    pub text_body: &'a str,
}

// ###################################
// ->   RESPONSE
// ###################################
/// The JSON body returned by the email service.
#[derive(Debug, Default, Deserialize)]
pub struct SendEmailResponse {
    #[serde(default)]
    pub data: Option<SendEmailData>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// The error fields are kept as raw JSON, the service does not always send them as strings.
#[derive(Debug, Default, Deserialize)]
pub struct SendEmailData {
    #[serde(default)]
    pub succeeded: Option<u64>,
    #[serde(default)]
    pub failed: Option<u64>,
    #[serde(default)]
    pub failures: Option<Vec<Value>>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub error_code: Option<Value>,
}

impl SendEmailResponse {
    pub fn is_success(&self) -> bool {
        self.data
            .as_ref()
            .and_then(|data| data.succeeded)
            .is_some_and(|succeeded| succeeded > 0)
    }

    /// The most specific error detail in the response:
    /// first recipient failure, `data.error`, top-level `error`, `data.error_code`, fallback.
    pub fn error_detail(&self) -> String {
        let data = self.data.as_ref();

        let recipient_failure = data
            .and_then(|data| data.failures.as_deref())
            .and_then(<[Value]>::first)
            .and_then(|failure| failure.get("error"))
            .and_then(detail_text);
        let data_error = data.and_then(|data| data.error.as_ref()).and_then(detail_text);
        let top_error = self.error.as_ref().and_then(detail_text);

        if let Some(detail) = recipient_failure.or(data_error).or(top_error) {
            return detail;
        }

        match data.and_then(|data| data.error_code.as_ref()).and_then(detail_text) {
            Some(code) => format!("Error code: {code}"),
            None => FALLBACK_ERROR_DETAIL.to_string(),
        }
    }
}

/// Renders an error field, `null`, `false`, `0` and `""` carry no detail.
fn detail_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(num) if num.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// What happened to a single send request, as reported by the email service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Success,
    Failure {
        detail: String,
        succeeded: Option<u64>,
        failed: Option<u64>,
    },
}

impl From<SendEmailResponse> for DeliveryOutcome {
    fn from(resp: SendEmailResponse) -> Self {
        if resp.is_success() {
            return DeliveryOutcome::Success;
        }

        let detail = resp.error_detail();
        let (succeeded, failed) = resp
            .data
            .map(|data| (data.succeeded, data.failed))
            .unwrap_or_default();

        DeliveryOutcome::Failure {
            detail,
            succeeded,
            failed,
        }
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid email service url: {0}")]
    UrlParsing(String),
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("failed to parse the email service response: {0}")]
    ResponseDeser(#[from] serde_json::Error),
}
