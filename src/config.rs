use std::env::{self, VarError};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

/// Placeholder wait standing in for the analysis backend.
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(2000);

#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// `None` means no remote store is configured; the in-memory store is used.
    pub supabase: Option<SupabaseConfig>,
    pub analysis_delay: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        let supabase = match (optional_var("SUPABASE_URL")?, optional_var("SUPABASE_ANON_KEY")?) {
            (Some(url), Some(anon_key)) => Some(SupabaseConfig { url, anon_key }),
            _ => None,
        };

        let analysis_delay = match optional_var("ANALYSIS_DELAY_MS")? {
            Some(ms) => {
                let ms = ms.parse::<u64>().map_err(|e| AppError::ConfigError(format!("Invalid ANALYSIS_DELAY_MS: {}", e)))?;
                Duration::from_millis(ms)
            }
            None => DEFAULT_ANALYSIS_DELAY,
        };

        Ok(Config {
            server_addr,
            supabase,
            analysis_delay,
        })
    }
}

/// Reads a variable, treating unset or blank values as absent.
fn optional_var(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
