// Application configuration
//
// All configuration is read from the environment once at startup so that a
// missing variable is a startup fault, not a first-request fault.

use std::env;
use std::path::PathBuf;

use crate::generation::OpenAiConfig;

/// Configuration error raised during startup validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {message}")]
    InvalidVar { var: &'static str, message: String },
}

/// Object store configuration for transcript upload/download
#[derive(Debug, Clone)]
pub struct TransferConfig {
    pub bucket: String,
    pub region: String,
    /// Presigned URL validity window in seconds
    pub presign_expiry_secs: u64,
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_path: PathBuf,
    pub generation: OpenAiConfig,
    pub transfer: TransferConfig,
}

impl AppConfig {
    /// Load and validate configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        let database_path = env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/meetings.db"));

        let generation = OpenAiConfig {
            api_key: require("OPENAI_API_KEY")?,
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| OpenAiConfig::default().base_url),
            model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| OpenAiConfig::default().model),
            timeout_secs: OpenAiConfig::default().timeout_secs,
        };

        let transfer = TransferConfig {
            bucket: require("S3_BUCKET_NAME")?,
            region: require("AWS_REGION")?,
            presign_expiry_secs: parse_or_default("PRESIGN_EXPIRY_SECS", 3600)?,
        };

        Ok(Self {
            bind_addr,
            database_path,
            generation,
            transfer,
        })
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

fn parse_or_default(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(value) => value.parse().map_err(|e| ConfigError::InvalidVar {
            var,
            message: format!("{}", e),
        }),
        Err(_) => Ok(default),
    }
}
