//! Configuration
//!
//! Google Ads 認証情報と接続設定の読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

pub const DEFAULT_API_VERSION: &str = "v18";
pub const DEFAULT_ENDPOINT: &str = "https://googleads.googleapis.com";
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Construction-time misconfiguration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required config field `{0}`")]
    MissingField(&'static str),
    #[error("invalid customer id `{0}`: expected digits, optionally separated by dashes")]
    InvalidCustomerId(String),
    #[error("request_timeout_secs must be greater than zero")]
    InvalidTimeout,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Manager (MCC) account the uploads are made under
    pub login_customer_id: String,

    // OAuth user credentials
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,

    pub developer_token: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_token_endpoint() -> String {
    DEFAULT_TOKEN_ENDPOINT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Parses a Google Ads customer id, accepting the dashed `123-456-7890` form
pub fn parse_customer_id(raw: &str) -> Result<i64, ConfigError> {
    let digits: String = raw.trim().chars().filter(|c| *c != '-').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidCustomerId(raw.to_string()));
    }
    digits
        .parse::<i64>()
        .map_err(|_| ConfigError::InvalidCustomerId(raw.to_string()))
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(path);
        let content = fs::read_to_string(expanded_path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", expanded_path))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("login_customer_id", &self.login_customer_id),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("refresh_token", &self.refresh_token),
            ("developer_token", &self.developer_token),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(name));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        self.customer_id()?;
        Ok(())
    }

    /// Numeric login customer id; uploads are always made for this account
    pub fn customer_id(&self) -> Result<i64, ConfigError> {
        parse_customer_id(&self.login_customer_id)
    }
}
