use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    email_client::DeliveryOutcome,
    email_message::EmailMessage,
    web::{
        types::{SignupRequest, SignupResponse, ValidEmail},
        Error, WebResult,
    },
    AppState,
};

/// Validates the signup and sends the waitlist welcome email.
///
/// The body is read as raw bytes, it gets parsed as JSON whatever `Content-Type` the client sent.
#[tracing::instrument(name = "Sending waitlist welcome email", skip(app_state, body))]
pub async fn waitlist(
    State(app_state): State<AppState>,
    body: Bytes,
) -> WebResult<Json<SignupResponse>> {
    let signup = SignupRequest::parse_body(&body)?;
    let email = ValidEmail::try_from(signup)?;

    let email_client = app_state
        .email_client
        .as_ref()
        .ok_or(Error::EmailServiceNotConfigured)?;

    let message = EmailMessage::waitlist_welcome(email, app_state.sender.as_str());

    match email_client.send_email(&message).await? {
        DeliveryOutcome::Success => {
            info!("SUCCESS");
            Ok(Json(SignupResponse::sent()))
        }
        DeliveryOutcome::Failure {
            detail,
            succeeded,
            failed,
        } => Err(Error::Delivery {
            detail,
            succeeded,
            failed,
        }),
    }
}

/// CORS preflight, the allowed origin and headers are added by the router.
pub async fn waitlist_preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        )],
    )
}
