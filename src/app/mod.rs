pub mod serve;

// re-export
pub use serve::serve;

use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{config::AppConfig, EmailClient, Result};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let app_state = AppState::from_config(&config)?;

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    /// `None` when no API key is configured, every signup is then answered with an error.
    pub email_client: Option<EmailClient>,
    /// The `sender` of every email, `Name <address>`.
    pub sender: String,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(email_client: Option<EmailClient>, sender: String) -> Self {
        AppState(Arc::new(InternalState {
            email_client,
            sender,
        }))
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let email_config = &config.email_config;
        let sender = email_config.sender_display()?;

        let email_client = match email_config.api_key() {
            Some(api_key) => Some(EmailClient::new(
                &email_config.base_url,
                api_key.clone(),
                email_config.timeout(),
            )?),
            None => {
                warn!("SMTP2GO_API_KEY is not set - signups will be answered with an error");
                None
            }
        };

        Ok(AppState::new(email_client, sender))
    }
}
