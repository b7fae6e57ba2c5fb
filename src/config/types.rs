//! The configuration structs used to build the AppConfig, and their impls.
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::config::{ConfigError, ConfigResult};
use crate::web::types::ValidEmail;

/// Used when `FROM_EMAIL` is not set (or set to an empty string).
pub const DEFAULT_FROM_ADDR: &str = "hello@studiomind.io";

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub email_config: EmailConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct EmailConfig {
    /// Base url of the SMTP2GO API, the send endpoint is joined onto it.
    pub base_url: String,
    /// `SMTP2GO_API_KEY`
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// `FROM_EMAIL`
    #[serde(default)]
    pub from_addr: Option<String>,
    pub sender_name: String,
    pub timeout_millis: u64,
}

// ###################################
// ->   IMPLs
// ###################################
impl EmailConfig {
    /// Returns the API key, an empty key counts as a missing one.
    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
    }

    pub fn sender_addr(&self) -> &str {
        self.from_addr
            .as_deref()
            .filter(|addr| !addr.is_empty())
            .unwrap_or(DEFAULT_FROM_ADDR)
    }

    pub fn valid_sender(&self) -> ConfigResult<ValidEmail> {
        let addr = ValidEmail::parse(self.sender_addr())
            .map_err(|er| ConfigError::InvalidEmail(er.to_string()))?;
        Ok(addr)
    }

    /// The `sender` field of the outgoing email, e.g. `StudioMind <hello@studiomind.io>`.
    pub fn sender_display(&self) -> ConfigResult<String> {
        let addr = self.valid_sender()?;
        Ok(format!("{} <{}>", self.sender_name, addr.as_ref()))
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_millis)
    }
}

// ###################################
// ->   TRY FROMs
// ###################################
impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}
