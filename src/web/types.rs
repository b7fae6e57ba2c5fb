//! The structs received by the `web` module and their validation.

use lazy_regex::regex_is_match;
use serde::{de::Error as _, Deserialize, Serialize};
use serde_json::Value;

// ###################################
// ->   STRUCTS
// ###################################
/// The body of `POST /api/waitlist`, the email can still be missing, invalid or not even a string.
#[derive(Debug)]
pub struct SignupRequest {
    pub email: Option<Value>,
}

impl SignupRequest {
    /// Any JSON document is accepted except `null`.
    /// Bodies that are not objects carry no email.
    pub fn parse_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice(body)? {
            Value::Object(mut fields) => Ok(Self {
                email: fields.remove("email"),
            }),
            Value::Null => Err(serde_json::Error::custom(
                "cannot read the email of a null body",
            )),
            _ => Ok(Self { email: None }),
        }
    }
}

/// `null`, `false`, `0` and `""` count as no value at all.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(num) => num.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// The body returned once the email service accepted the email.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
}

impl SignupResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: "Email sent successfully".to_string(),
        }
    }
}

impl TryFrom<SignupRequest> for ValidEmail {
    type Error = DataParsingError;

    fn try_from(signup: SignupRequest) -> Result<Self, Self::Error> {
        match signup.email {
            Some(Value::String(email)) => ValidEmail::parse(email),
            Some(value) if !is_blank(&value) => Err(DataParsingError::EmailInvalid),
            _ => Err(DataParsingError::EmailMissing),
        }
    }
}

/// Validated Email
/// Only a syntactic sanity check: `local@domain.tld` without whitespace or extra `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if value.is_empty() {
            return Err(DataParsingError::EmailMissing);
        }

        if regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", value) {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("Email is required")]
    EmailMissing,
    #[error("Invalid email format")]
    EmailInvalid,
}
