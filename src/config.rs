use actix_web::cookie::Key;
use std::env;

use crate::errors::AppError;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_APP_NAME: &str = "Ideaboard";
const MIN_SESSION_KEY_LEN: usize = 64;

/// Values the page templates need from the configuration.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub app_name: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self { app_name: DEFAULT_APP_NAME.to_string() }
    }
}

/// Runtime settings read from the environment (and `.env`, when present).
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub app_name: String,
    pub session_key: Key,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL must be set".to_string()))?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let app_name = env::var("APP_NAME").unwrap_or_else(|_| DEFAULT_APP_NAME.to_string());
        let session_key = session_key_from(env::var("SESSION_KEY").ok());

        Ok(Self { database_url, bind_addr, app_name, session_key })
    }

    pub fn site(&self) -> SiteSettings {
        SiteSettings { app_name: self.app_name.clone() }
    }
}

/// Session cookie signing key. Without a usable SESSION_KEY a random key is
/// generated and sessions do not survive a restart.
fn session_key_from(value: Option<String>) -> Key {
    match value {
        Some(val) if val.len() >= MIN_SESSION_KEY_LEN => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need {}+), generating random key",
                val.len(),
                MIN_SESSION_KEY_LEN
            );
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    }
}
