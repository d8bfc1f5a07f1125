//! Google Ads API Errors
//!
//! トランスポート層のエラー分類

use thiserror::Error;

use super::retry::{error_chain_to_string, is_connection_error, is_retryable_status};

#[derive(Debug, Error)]
pub enum GoogleAdsApiError {
    /// Non-success HTTP status from the Google Ads API
    #[error("Google Ads API returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// OAuth token endpoint rejected the credentials
    #[error("OAuth token request failed with HTTP {status}: {message}")]
    Auth { status: u16, message: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode Google Ads response: {0}")]
    Decode(String),
}

impl GoogleAdsApiError {
    /// Whether the transport may retry the request
    pub fn is_retryable(&self) -> bool {
        match self {
            GoogleAdsApiError::Http { status, .. } => is_retryable_status(*status),
            GoogleAdsApiError::Auth { status, .. } => *status >= 500,
            GoogleAdsApiError::Transport(e) => {
                e.is_timeout() || e.is_connect() || is_connection_error(&error_chain_to_string(e))
            }
            GoogleAdsApiError::Decode(_) => false,
        }
    }
}
