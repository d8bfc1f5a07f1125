//! Google Ads Upload Repository Implementation
//!
//! ConversionUploadRepositoryのGoogle Ads実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::adapter::google_ads::client::ConversionClientFactory;
use crate::adapter::google_ads::failure::decode_partial_failure;
use crate::adapter::google_ads::models::{
    ClickConversionPayload, ClickConversionResultPayload, UploadClickConversionsRequest,
    UploadClickConversionsResponse,
};
use crate::domain::entities::conversion_batch::ConversionBatch;
use crate::domain::entities::upload_outcome::{ConversionResult, UploadOutcome};
use crate::domain::repositories::conversion_upload_repository::ConversionUploadRepository;

/// Google Adsアップロードリポジトリ
pub struct GoogleAdsUploadRepository {
    factory: Arc<dyn ConversionClientFactory>,
}

impl GoogleAdsUploadRepository {
    /// 新しいリポジトリを作成
    pub fn new(factory: Arc<dyn ConversionClientFactory>) -> Self {
        Self { factory }
    }

    /// バッチを uploadClickConversions リクエストに変換（部分失敗は常に有効）
    pub fn build_request(customer_id: i64, batch: &ConversionBatch) -> UploadClickConversionsRequest {
        UploadClickConversionsRequest {
            customer_id: customer_id.to_string(),
            conversions: batch
                .conversions()
                .iter()
                .map(ClickConversionPayload::from)
                .collect(),
            partial_failure: true,
        }
    }

    /// レスポンスをドメインの UploadOutcome に変換
    pub fn to_outcome(response: UploadClickConversionsResponse) -> UploadOutcome {
        UploadOutcome {
            partial_failure: response
                .partial_failure_error
                .as_ref()
                .map(decode_partial_failure),
            results: response
                .results
                .into_iter()
                .map(Self::to_conversion_result)
                .collect(),
        }
    }

    fn to_conversion_result(result: ClickConversionResultPayload) -> ConversionResult {
        ConversionResult {
            conversion_action: result.conversion_action,
            conversion_date_time: result.conversion_date_time,
            gclid: result.gclid,
            wbraid: result.wbraid,
        }
    }
}

#[async_trait]
impl ConversionUploadRepository for GoogleAdsUploadRepository {
    async fn upload_batch(
        &self,
        customer_id: i64,
        batch: &ConversionBatch,
    ) -> Result<UploadOutcome> {
        // クライアントはこのバッチ専用。どの経路で抜けても drop される
        let client = self
            .factory
            .create_client()
            .await
            .context("Failed to create conversion upload client")?;

        let request = Self::build_request(customer_id, batch);
        let response = client.upload_click_conversions(&request).await?;
        debug!(
            "Received {} results for {} conversions",
            response.results.len(),
            batch.len()
        );

        Ok(Self::to_outcome(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::google_ads::client::{ConversionUploadClient, MockConversionUploadClient};
    use crate::adapter::google_ads::models::Status;
    use crate::domain::entities::click_conversion::{ClickConversion, ClickId};
    use serde_json::json;
    use std::sync::Mutex;

    // Hands out prepared mocks one per create_client call
    struct MockClientFactory {
        clients: Mutex<Vec<MockConversionUploadClient>>,
        created: Mutex<usize>,
    }

    impl MockClientFactory {
        fn new(clients: Vec<MockConversionUploadClient>) -> Self {
            Self {
                clients: Mutex::new(clients),
                created: Mutex::new(0),
            }
        }

        fn created(&self) -> usize {
            *self.created.lock().unwrap()
        }
    }

    #[async_trait]
    impl ConversionClientFactory for MockClientFactory {
        async fn create_client(&self) -> Result<Box<dyn ConversionUploadClient>> {
            let mut clients = self.clients.lock().unwrap();
            if clients.is_empty() {
                return Err(anyhow::anyhow!("No more clients available"));
            }
            *self.created.lock().unwrap() += 1;
            Ok(Box::new(clients.remove(0)))
        }
    }

    fn create_test_batch(click_ids: Vec<ClickId>) -> ConversionBatch {
        ConversionBatch::new(
            click_ids
                .into_iter()
                .map(|click_id| ClickConversion {
                    conversion_action: "customers/123/conversionActions/456".to_string(),
                    conversion_date_time: "2024-12-25 10:00:00+00:00".to_string(),
                    click_id,
                    value: None,
                })
                .collect(),
        )
    }

    fn resolved_payload(gclid: &str) -> ClickConversionResultPayload {
        ClickConversionResultPayload {
            gclid: Some(gclid.to_string()),
            wbraid: None,
            conversion_action: Some("customers/123/conversionActions/456".to_string()),
            conversion_date_time: Some("2024-12-25 10:00:00+00:00".to_string()),
        }
    }

    #[test]
    fn test_build_request_always_requests_partial_failure() {
        let batch = create_test_batch(vec![
            ClickId::Gclid("g-1".to_string()),
            ClickId::Wbraid("br-2".to_string()),
        ]);

        let request = GoogleAdsUploadRepository::build_request(123, &batch);

        assert_eq!(request.customer_id, "123");
        assert!(request.partial_failure);
        assert_eq!(request.conversions.len(), 2);
        assert_eq!(request.conversions[0].gclid.as_deref(), Some("g-1"));
        assert!(request.conversions[0].wbraid.is_none());
        assert_eq!(request.conversions[1].wbraid.as_deref(), Some("br-2"));
        assert!(request.conversions[1].gclid.is_none());
    }

    #[test]
    fn test_to_outcome_decodes_partial_failure() {
        let status: Status = serde_json::from_value(json!({
            "code": 3,
            "message": "INVALID_ARGUMENT",
            "details": [{
                "@type": "type.googleapis.com/google.ads.googleads.v18.errors.GoogleAdsFailure",
                "errors": [{"message": "INVALID_ARGUMENT"}]
            }]
        }))
        .unwrap();
        let response = UploadClickConversionsResponse {
            partial_failure_error: Some(status),
            results: vec![ClickConversionResultPayload::default(), resolved_payload("g-2")],
        };

        let outcome = GoogleAdsUploadRepository::to_outcome(response);

        assert_eq!(outcome.partial_failure_errors().len(), 1);
        assert_eq!(outcome.partial_failure_errors()[0].message, "INVALID_ARGUMENT");
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.resolved_results().count(), 1);
    }

    #[test]
    fn test_to_outcome_without_partial_failure() {
        let outcome = GoogleAdsUploadRepository::to_outcome(UploadClickConversionsResponse {
            partial_failure_error: None,
            results: vec![resolved_payload("g-1")],
        });

        assert!(outcome.partial_failure.is_none());
        assert_eq!(outcome.results[0].gclid.as_deref(), Some("g-1"));
    }

    #[tokio::test]
    async fn test_upload_batch_success() {
        let mut mock = MockConversionUploadClient::new();
        mock.expect_upload_click_conversions()
            .withf(|request| {
                request.partial_failure
                    && request.customer_id == "1234567890"
                    && request.conversions.len() == 1
            })
            .times(1)
            .returning(|_| {
                Ok(UploadClickConversionsResponse {
                    partial_failure_error: None,
                    results: vec![resolved_payload("g-1")],
                })
            });

        let factory = Arc::new(MockClientFactory::new(vec![mock]));
        let repo = GoogleAdsUploadRepository::new(factory.clone());
        let batch = create_test_batch(vec![ClickId::Gclid("g-1".to_string())]);

        let outcome = repo.upload_batch(1234567890, &batch).await.unwrap();

        assert_eq!(outcome.resolved_results().count(), 1);
        assert_eq!(factory.created(), 1);
    }

    #[tokio::test]
    async fn test_upload_batch_acquires_fresh_client_per_batch() {
        let mut clients = Vec::new();
        for _ in 0..2 {
            let mut mock = MockConversionUploadClient::new();
            mock.expect_upload_click_conversions()
                .times(1)
                .returning(|_| Ok(UploadClickConversionsResponse::default()));
            clients.push(mock);
        }

        let factory = Arc::new(MockClientFactory::new(clients));
        let repo = GoogleAdsUploadRepository::new(factory.clone());
        let batch = create_test_batch(vec![ClickId::Gclid("g-1".to_string())]);

        repo.upload_batch(1, &batch).await.unwrap();
        repo.upload_batch(1, &batch).await.unwrap();

        assert_eq!(factory.created(), 2);
    }

    #[tokio::test]
    async fn test_upload_batch_propagates_transport_error() {
        let mut mock = MockConversionUploadClient::new();
        mock.expect_upload_click_conversions()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("Google Ads API returned HTTP 401: UNAUTHENTICATED")));

        let factory = Arc::new(MockClientFactory::new(vec![mock]));
        let repo = GoogleAdsUploadRepository::new(factory);
        let batch = create_test_batch(vec![ClickId::Gclid("g-1".to_string())]);

        let result = repo.upload_batch(1, &batch).await;

        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("UNAUTHENTICATED"));
    }

    #[tokio::test]
    async fn test_upload_batch_propagates_client_creation_error() {
        let factory = Arc::new(MockClientFactory::new(vec![]));
        let repo = GoogleAdsUploadRepository::new(factory);
        let batch = create_test_batch(vec![ClickId::Gclid("g-1".to_string())]);

        let result = repo.upload_batch(1, &batch).await;

        assert!(result.is_err());
        let err_msg = format!("{:?}", result.unwrap_err());
        assert!(err_msg.contains("Failed to create conversion upload client"));
    }
}
