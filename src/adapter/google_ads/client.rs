//! Google Ads Client Abstractions
//!
//! クライアントの抽象化と REST 実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use super::error::GoogleAdsApiError;
use super::failure::describe_status;
use super::models::{ErrorEnvelope, UploadClickConversionsRequest, UploadClickConversionsResponse};
use super::retry::{with_backoff, RetryPolicy};
use crate::adapter::auth::{TokenProvider, UserCredentials};
use crate::adapter::config::Config;

/// Trait for the conversion upload service
/// This enables mocking in tests while using the REST client in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConversionUploadClient: Send + Sync {
    /// Upload one batch of click conversions
    async fn upload_click_conversions(
        &self,
        request: &UploadClickConversionsRequest,
    ) -> Result<UploadClickConversionsResponse>;
}

/// Connection settings shared by every client a factory hands out
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub api_version: String,
    pub developer_token: String,
    pub login_customer_id: i64,
}

impl ClientSettings {
    pub fn upload_url(&self, customer_id: &str) -> String {
        format!(
            "{}/{}/customers/{}:uploadClickConversions",
            self.endpoint.trim_end_matches('/'),
            self.api_version,
            customer_id
        )
    }
}

/// REST implementation of ConversionUploadClient.
/// One instance is created per batch and dropped when the batch is done.
pub struct RestConversionUploadClient {
    http: reqwest::Client,
    tokens: Arc<TokenProvider>,
    settings: Arc<ClientSettings>,
    retry: RetryPolicy,
}

impl RestConversionUploadClient {
    pub fn new(
        http: reqwest::Client,
        tokens: Arc<TokenProvider>,
        settings: Arc<ClientSettings>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            http,
            tokens,
            settings,
            retry,
        }
    }

    async fn send_once(
        &self,
        url: &str,
        request: &UploadClickConversionsRequest,
    ) -> Result<UploadClickConversionsResponse, GoogleAdsApiError> {
        let access_token = self.tokens.access_token().await?;

        let response = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .header("developer-token", &self.settings.developer_token)
            .header(
                "login-customer-id",
                self.settings.login_customer_id.to_string(),
            )
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => describe_status(&envelope.error),
                Err(_) => body,
            };
            return Err(GoogleAdsApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<UploadClickConversionsResponse>()
            .await
            .map_err(|e| GoogleAdsApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ConversionUploadClient for RestConversionUploadClient {
    async fn upload_click_conversions(
        &self,
        request: &UploadClickConversionsRequest,
    ) -> Result<UploadClickConversionsResponse> {
        let url = self.settings.upload_url(&request.customer_id);
        debug!(
            "POST {} ({} conversions, partialFailure={})",
            url,
            request.conversions.len(),
            request.partial_failure
        );

        let this = self;
        let url = url.as_str();
        with_backoff(&self.retry, "uploadClickConversions", move || {
            this.send_once(url, request)
        })
        .await
        .context("uploadClickConversions request failed")
    }
}

/// Factory for creating per-batch upload clients
#[async_trait]
pub trait ConversionClientFactory: Send + Sync {
    async fn create_client(&self) -> Result<Box<dyn ConversionUploadClient>>;
}

/// Production implementation of ConversionClientFactory
///
/// Holds the credentials and the HTTP connection pool; each client it
/// creates borrows them for the duration of one batch.
pub struct GoogleAdsClientFactory {
    http: reqwest::Client,
    tokens: Arc<TokenProvider>,
    settings: Arc<ClientSettings>,
    retry: RetryPolicy,
}

impl GoogleAdsClientFactory {
    /// Builds the factory from configuration.
    /// Misconfiguration surfaces here, before any batch is sent.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_retry_policy(config, RetryPolicy::default())
    }

    pub fn with_retry_policy(config: &Config, retry: RetryPolicy) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let credentials = UserCredentials {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            refresh_token: config.refresh_token.clone(),
        };
        let tokens = Arc::new(TokenProvider::new(
            http.clone(),
            config.token_endpoint.clone(),
            credentials,
            retry,
        ));

        let settings = Arc::new(ClientSettings {
            endpoint: config.endpoint.clone(),
            api_version: config.api_version.clone(),
            developer_token: config.developer_token.clone(),
            login_customer_id: config.customer_id()?,
        });

        Ok(Self {
            http,
            tokens,
            settings,
            retry,
        })
    }

    pub fn login_customer_id(&self) -> i64 {
        self.settings.login_customer_id
    }
}

#[async_trait]
impl ConversionClientFactory for GoogleAdsClientFactory {
    async fn create_client(&self) -> Result<Box<dyn ConversionUploadClient>> {
        Ok(Box::new(RestConversionUploadClient::new(
            self.http.clone(),
            self.tokens.clone(),
            self.settings.clone(),
            self.retry,
        )))
    }
}
