//! # Upload Conversions Use Case
//!
//! コンバージョンアップロードユースケース

use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;

use crate::application::dto::upload_config::UploadConfig;
use crate::domain::entities::conversion_batch::ConversionBatch;
use crate::domain::entities::conversion_record::ConversionRecord;
use crate::domain::repositories::conversion_upload_repository::ConversionUploadRepository;
use crate::domain::services::conversion_mapper::ConversionMapper;
use crate::domain::services::outcome_report::OutcomeReport;

/// アップロード結果のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// 送信したバッチ数
    pub batch_count: usize,
    /// 送信したコンバージョン数
    pub submitted_count: usize,
    /// 部分失敗の警告行
    pub warnings: Vec<String>,
    /// 解決済み結果の確認行
    pub confirmations: Vec<String>,
}

/// 記録をマッピングしてバッチに分割する
///
/// ドライランでも同じ分割を使う
pub fn prepare_batches(
    records: &[ConversionRecord],
    conversion_action_id: i64,
    config: &UploadConfig,
) -> Vec<ConversionBatch> {
    let conversions = ConversionMapper::map_all(config.customer_id, conversion_action_id, records);
    ConversionBatch::chunk(conversions, config.batch_size)
}

/// コンバージョンアップロードユースケース
///
/// 記録をマッピングし、50件ずつ順番にアップロードして結果を出力する。
/// いずれかのバッチでエラーが起きた時点で残りのバッチは送信しない。
pub struct UploadConversionsUseCase<U: ConversionUploadRepository + ?Sized> {
    upload_repository: Arc<U>,
}

impl<U: ConversionUploadRepository + ?Sized> UploadConversionsUseCase<U> {
    /// 新しいユースケースを作成
    pub fn new(upload_repository: Arc<U>) -> Self {
        Self { upload_repository }
    }

    /// コンバージョン一覧をアップロード
    ///
    /// # Arguments
    ///
    /// * `records` - コンバージョン記録
    /// * `conversion_action_id` - コンバージョンアクションID
    /// * `config` - アップロード設定（顧客IDは記録ではなくここから取る）
    ///
    /// # Errors
    ///
    /// バッチのアップロードに失敗した場合。送信済みのバッチは取り消さない
    pub async fn execute(
        &self,
        records: &[ConversionRecord],
        conversion_action_id: i64,
        config: &UploadConfig,
    ) -> Result<UploadSummary> {
        let batches = prepare_batches(records, conversion_action_id, config);
        let mut summary = UploadSummary::default();

        if batches.is_empty() {
            info!("No conversions to upload");
            return Ok(summary);
        }

        let total_batches = batches.len();
        info!(
            "Uploading {} conversions in {} batches for customer {}",
            records.len(),
            total_batches,
            config.customer_id
        );

        for (i, batch) in batches.iter().enumerate() {
            info!(
                "Uploading batch {}/{} ({} conversions)",
                i + 1,
                total_batches,
                batch.len()
            );

            let outcome = self
                .upload_repository
                .upload_batch(config.customer_id, batch)
                .await
                .with_context(|| format!("Failed to upload batch {}/{}", i + 1, total_batches))?;

            let warnings = OutcomeReport::warning_lines(&outcome);
            if !warnings.is_empty() {
                warn!(
                    "Batch {} reported {} partial failures",
                    i + 1,
                    warnings.len()
                );
            }
            for line in &warnings {
                println!("{}", line);
            }

            let confirmations = OutcomeReport::confirmation_lines(&outcome);
            for line in &confirmations {
                println!("{}", line);
            }

            summary.batch_count += 1;
            summary.submitted_count += batch.len();
            summary.warnings.extend(warnings);
            summary.confirmations.extend(confirmations);
        }

        info!(
            "Submitted {} conversions ({} partial failures, {} confirmed)",
            summary.submitted_count,
            summary.warnings.len(),
            summary.confirmations.len()
        );

        Ok(summary)
    }
}
