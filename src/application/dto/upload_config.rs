//! # Upload Configuration DTO
//!
//! アップロード設定のData Transfer Object

use crate::domain::entities::conversion_batch::CONVERSION_BATCH_SIZE;

/// アップロード設定
///
/// ユースケースの実行に必要な設定情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// アップロードを実行する顧客ID（ログイン顧客ID）
    pub customer_id: i64,
    /// 1リクエストあたりのコンバージョン数
    pub batch_size: usize,
}

impl UploadConfig {
    /// 新しいアップロード設定を作成します。
    ///
    /// バッチサイズは常に 50 です。
    ///
    /// ```
    /// use oci_uploader::application::dto::upload_config::UploadConfig;
    ///
    /// let config = UploadConfig::new(1234567890);
    ///
    /// assert_eq!(config.customer_id, 1234567890);
    /// assert_eq!(config.batch_size, 50);
    /// ```
    pub fn new(customer_id: i64) -> Self {
        Self {
            customer_id,
            batch_size: CONVERSION_BATCH_SIZE,
        }
    }
}
