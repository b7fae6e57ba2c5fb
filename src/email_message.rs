//! The welcome email sent to every new waitlist signup.

use crate::web::types::ValidEmail;

pub const WAITLIST_SUBJECT: &str = "Welcome to StudioMind! You're on the waitlist";
const WAITLIST_HTML: &str = include_str!("../templates/html/waitlist_welcome.html");
const WAITLIST_TEXT: &str = include_str!("../templates/plain/waitlist_welcome.txt");

/// A single email, built per request and dropped once it was handed to the `EmailClient`.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub recipient: ValidEmail,
    /// Display form of the sender: `Name <address>`
    pub sender: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

impl EmailMessage {
    pub fn waitlist_welcome(recipient: ValidEmail, sender: impl Into<String>) -> Self {
        EmailMessage {
            recipient,
            sender: sender.into(),
            subject: WAITLIST_SUBJECT.to_string(),
            html_body: WAITLIST_HTML.to_string(),
            text_body: WAITLIST_TEXT.to_string(),
        }
    }
}
