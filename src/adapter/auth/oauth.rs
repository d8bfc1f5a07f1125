//! OAuth Authentication
//!
//! リフレッシュトークンによるアクセストークンの取得とキャッシュ

use log::{debug, info};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::adapter::google_ads::error::GoogleAdsApiError;
use crate::adapter::google_ads::retry::{with_backoff, RetryPolicy};

/// Tokens are refreshed this long before they expire
pub const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// OAuth installed-app / web credentials for a Google Ads user
#[derive(Clone)]
pub struct UserCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

/// Exchanges the refresh token for access tokens and caches them until
/// shortly before expiry. Shared by every per-batch client.
pub struct TokenProvider {
    http: reqwest::Client,
    token_endpoint: String,
    credentials: UserCredentials,
    retry: RetryPolicy,
    cache: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(
        http: reqwest::Client,
        token_endpoint: impl Into<String>,
        credentials: UserCredentials,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            http,
            token_endpoint: token_endpoint.into(),
            credentials,
            retry,
            cache: Mutex::new(None),
        }
    }

    /// Returns a valid access token, refreshing it if needed
    pub async fn access_token(&self) -> Result<String, GoogleAdsApiError> {
        let mut cache = self.cache.lock().await;

        if let Some(token) = cache.as_ref().filter(|t| t.is_fresh(Instant::now())) {
            return Ok(token.value.clone());
        }

        let this = self;
        let response =
            with_backoff(&self.retry, "OAuth token refresh", move || this.refresh()).await?;
        let lifetime = response.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        debug!("Obtained access token valid for {}s", lifetime);

        let token = CachedToken {
            value: response.access_token,
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        };
        let value = token.value.clone();
        *cache = Some(token);
        Ok(value)
    }

    async fn refresh(&self) -> Result<TokenResponse, GoogleAdsApiError> {
        info!("Refreshing OAuth access token");

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", self.credentials.refresh_token.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GoogleAdsApiError::Auth {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| GoogleAdsApiError::Decode(e.to_string()))
    }
}
