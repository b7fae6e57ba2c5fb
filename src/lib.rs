//! Accepts waitlist signups and sends the welcome email through SMTP2GO.

pub mod app;
pub mod config;
pub mod email_client;
pub mod email_message;
mod error;
pub mod utils;
pub mod web;

pub use app::{serve, App, AppState};
pub use email_client::EmailClient;
pub use error::{Error, Result};

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Tracing for local development, `RUST_LOG` overrides the default `debug` level.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(env_filter_or("debug"))
        .compact()
        .init();
}

/// Tracing for production, `RUST_LOG` overrides the default `info` level.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter_or("info"))
        .init();
}

fn env_filter_or(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
