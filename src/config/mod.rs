//! Tries to create an `AppConfig` from config files and the environment.
//!
//! Sources, later ones override earlier ones:
//! - `config/base.toml`
//! - `config/{APP_ENVIRONMENT}.toml` (`local` by default)
//! - `APP_` prefixed env variables, `__` separates the nested keys (`APP_NET_CONFIG__APP_PORT`)
//! - `SMTP2GO_API_KEY` and `FROM_EMAIL`, the variables the hosting platform provides

mod error;
mod types;

use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use tracing::info;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use types::{AppConfig, EmailConfig, Environment, NetConfig, DEFAULT_FROM_ADDR};

pub const CONFIG_DIR: &str = "config";

impl AppConfig {
    /// Loads the configuration from `./config` and the environment.
    pub fn load() -> ConfigResult<Self> {
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()?;
        info!(
            "{:<20} - Initializing the configuration ({})",
            "config",
            environment.as_ref()
        );

        let base_path = std::env::current_dir()?;
        let config = Self::figment(base_path.join(CONFIG_DIR), environment).extract()?;

        Ok(config)
    }

    /// All the configuration sources merged, ready to be extracted.
    pub fn figment(config_dir: impl AsRef<Path>, environment: Environment) -> Figment {
        let config_dir = config_dir.as_ref();
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed("APP_").split("__"))
            .merge(platform_env())
    }
}

/// Maps the bare env variables onto their place in `EmailConfig`.
fn platform_env() -> Env {
    Env::raw()
        .only(&["SMTP2GO_API_KEY", "FROM_EMAIL"])
        .map(|key| {
            let key = key.as_str();
            if key.eq_ignore_ascii_case("SMTP2GO_API_KEY") {
                "email_config.api_key".into()
            } else if key.eq_ignore_ascii_case("FROM_EMAIL") {
                "email_config.from_addr".into()
            } else {
                key.to_owned().into()
            }
        })
}
