use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_MODEL: &str = "gemma2-9b-it";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_5_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// `None` disables summarization for the whole process lifetime.
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub groq_base_url: String,
    /// Certificate verification for generic page fetches. Off by default,
    /// which leaves fetched content open to tampering by anyone on the
    /// network path; `EXTRACT_VERIFY_TLS=true` turns it on.
    pub verify_tls: bool,
    pub user_agent: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let groq_api_key = lookup("GROQ_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let groq_model = lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let groq_base_url = lookup("GROQ_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let verify_tls = match lookup("EXTRACT_VERIFY_TLS") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AppError::ConfigError(format!("Invalid EXTRACT_VERIFY_TLS value: {}", raw))
            })?,
            None => false,
        };
        let user_agent = lookup("EXTRACT_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        // Load server configuration with defaults
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        Ok(Config {
            server_addr,
            groq_api_key,
            groq_model,
            groq_base_url,
            verify_tls,
            user_agent,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
