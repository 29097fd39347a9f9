use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Base directory for persisted data. Forms live under `<storage_root>/forms`.
    pub storage_root: PathBuf,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("CHATTERFORMS_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid CHATTERFORMS_HOST: {e}"))?;

        let port: u16 = env_or("CHATTERFORMS_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid CHATTERFORMS_PORT: {e}"))?;

        let storage_root = env_or("CHATTERFORMS_STORAGE_ROOT", "data");
        if storage_root.trim().is_empty() {
            return Err("Invalid CHATTERFORMS_STORAGE_ROOT: must not be empty".to_string());
        }

        let max_body_size: usize = env_or("CHATTERFORMS_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid CHATTERFORMS_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("CHATTERFORMS_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            storage_root: PathBuf::from(storage_root),
            max_body_size,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
