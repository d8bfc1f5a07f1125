//! Google Ads Retry Logic and Error Classification
//!
//! トランスポート層のリトライ（アップロード層はリトライしない）

use log::warn;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use super::error::GoogleAdsApiError;

pub const MAX_RETRIES: u32 = 5;
pub const INITIAL_RETRY_DELAY_MS: u64 = 1000; // 1 second
pub const MAX_RETRY_DELAY_MS: u64 = 32000; // 32 seconds max

/// Backoff settings for a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            initial_delay_ms: INITIAL_RETRY_DELAY_MS,
            max_delay_ms: MAX_RETRY_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    /// Never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Exponential backoff delay for the given (1-based) retry
    pub fn delay_for(&self, retry_count: u32) -> Duration {
        let exponent = retry_count.saturating_sub(1).min(31);
        let delay = self.initial_delay_ms.saturating_mul(1u64 << exponent);
        Duration::from_millis(delay.min(self.max_delay_ms))
    }
}

/// Calculate retry delay with exponential backoff using the default policy
pub fn calculate_retry_delay(retry_count: u32) -> u64 {
    RetryPolicy::default().delay_for(retry_count).as_millis() as u64
}

/// Convert error chain to string including all causes
pub fn error_chain_to_string(e: &(dyn std::error::Error + 'static)) -> String {
    let mut messages = vec![e.to_string()];
    let mut source = e.source();
    while let Some(cause) = source {
        messages.push(cause.to_string());
        source = cause.source();
    }
    messages.join(" | ")
}

/// Check if an error message indicates a dropped or refused connection
pub fn is_connection_error(error_msg: &str) -> bool {
    let lower = error_msg.to_ascii_lowercase();
    lower.contains("broken pipe")
        || lower.contains("connection reset")
        || lower.contains("connection refused")
        || lower.contains("connection closed")
        || lower.contains("unexpected end of file")
        || error_msg.contains("EOF")
}

/// HTTP statuses the Google Ads API documents as transient
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Runs `attempt` until it succeeds, fails with a non-retryable error, or
/// the policy's retry budget is spent.
pub async fn with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut attempt: F,
) -> Result<T, GoogleAdsApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GoogleAdsApiError>>,
{
    let mut retry_count = 0;

    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && retry_count < policy.max_retries => {
                retry_count += 1;
                let delay = policy.delay_for(retry_count);
                warn!(
                    "{} failed (attempt {}), retrying in {}ms: {}",
                    operation,
                    retry_count,
                    delay.as_millis(),
                    e
                );
                sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
