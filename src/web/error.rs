use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use std::sync::Arc;
use strum_macros::AsRefStr;

use crate::{email_client, utils, web::types::DataParsingError};

pub type WebResult<T> = core::result::Result<T, Error>;

pub const NOT_CONFIGURED_MSG: &str =
    "Email service not configured. SMTP2GO_API_KEY environment variable is missing.";

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("failed to parse the request body: {0}")]
    RequestBody(#[from] serde_json::Error),
    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("email service api key is missing")]
    EmailServiceNotConfigured,
    #[error("email service rejected the email: {detail}")]
    Delivery {
        detail: String,
        succeeded: Option<u64>,
        failed: Option<u64>,
    },

    #[error("email client error: {0}")]
    EmailClient(#[from] email_client::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::DataParsing(data_er) => {
                (StatusCode::BAD_REQUEST, InvalidInput(data_er.to_string()))
            }
            Error::EmailServiceNotConfigured => {
                (StatusCode::INTERNAL_SERVER_ERROR, ServiceNotConfigured)
            }
            Error::Delivery {
                detail,
                succeeded,
                failed,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                DeliveryFailed {
                    detail: detail.clone(),
                    succeeded: *succeeded,
                    failed: *failed,
                },
            ),
            Error::RequestBody(er) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ServiceError(utils::error_chain(er)),
            ),
            Error::EmailClient(er) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ServiceError(utils::error_chain(er)),
            ),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The error the client gets to see, rendered by the response mapper.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("{_0}")]
    InvalidInput(String),
    #[display("{}", NOT_CONFIGURED_MSG)]
    ServiceNotConfigured,
    #[display("{detail}")]
    DeliveryFailed {
        detail: String,
        succeeded: Option<u64>,
        failed: Option<u64>,
    },
    #[display("Internal server error: {_0}")]
    ServiceError(String),
}

impl ClientError {
    /// The JSON body sent back to the client.
    pub fn body(&self) -> Value {
        match self {
            ClientError::DeliveryFailed {
                succeeded, failed, ..
            } => {
                let mut debug = serde_json::Map::new();
                if let Some(succeeded) = succeeded {
                    debug.insert("succeeded".into(), json!(succeeded));
                }
                if let Some(failed) = failed {
                    debug.insert("failed".into(), json!(failed));
                }
                json!({ "error": self.to_string(), "debug": debug })
            }
            _ => json!({ "error": self.to_string() }),
        }
    }
}
