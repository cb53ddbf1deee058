use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const PLACEHOLDER_BACKEND_URL: &str = "https://example.supabase.co";
pub const PLACEHOLDER_BACKEND_KEY: &str = "example-anon-key";

const DEFAULT_STORY_BASE_URL: &str = "http://127.0.0.1:5173";

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub story_base_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let story_base_url = env::var("STORY_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_STORY_BASE_URL.to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());

        Ok(Config {
            server_addr: parse_server_addr(&host, &port)?,
            story_base_url,
        })
    }
}

fn parse_server_addr(host: &str, port: &str) -> Result<SocketAddr> {
    let port = port
        .parse::<u16>()
        .map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
    let ip = IpAddr::from_str(host)
        .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;
    Ok(SocketAddr::new(ip, port))
}

/// Endpoint and access key of the hosted backend.
///
/// Missing values are replaced by placeholders that never reach a real
/// project, so a misconfigured deployment only notices on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("SUPABASE_URL").ok(),
            env::var("SUPABASE_ANON_KEY").ok(),
        )
    }

    pub fn from_values(url: Option<String>, anon_key: Option<String>) -> Self {
        BackendConfig {
            url: url
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_BACKEND_URL.to_string()),
            anon_key: anon_key
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_BACKEND_KEY.to_string()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.url == PLACEHOLDER_BACKEND_URL || self.anon_key == PLACEHOLDER_BACKEND_KEY
    }
}
