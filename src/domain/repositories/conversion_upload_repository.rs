//! # Conversion Upload Repository Trait
//!
//! コンバージョンのアップロードを抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::conversion_batch::ConversionBatch;
use crate::domain::entities::upload_outcome::UploadOutcome;

/// コンバージョンアップロードリポジトリ
///
/// 1バッチを1リクエストとしてアップロードする
#[async_trait]
pub trait ConversionUploadRepository: Send + Sync {
    /// バッチをアップロード
    ///
    /// 部分失敗を常に要求するため、個別の拒否は `UploadOutcome` に含まれる。
    ///
    /// # Arguments
    ///
    /// * `customer_id` - アップロード先の顧客ID
    /// * `batch` - アップロードするバッチ
    ///
    /// # Errors
    ///
    /// 通信・認証・API エラーの場合。呼び出し側はそのまま伝播させる
    async fn upload_batch(&self, customer_id: i64, batch: &ConversionBatch)
        -> Result<UploadOutcome>;
}
