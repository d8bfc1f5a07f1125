//! # ConversionBatch Value Object
//!
//! アップロードバッチのバリューオブジェクト

use super::click_conversion::ClickConversion;

/// 1リクエストあたりのコンバージョン数
pub const CONVERSION_BATCH_SIZE: usize = 50;

/// アップロードバッチ
///
/// 1回の uploadClickConversions 呼び出しで送るコンバージョンの集合
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionBatch {
    conversions: Vec<ClickConversion>,
}

impl ConversionBatch {
    /// 新しいアップロードバッチを作成
    pub fn new(conversions: Vec<ClickConversion>) -> Self {
        Self { conversions }
    }

    /// コンバージョン列をバッチに分割
    ///
    /// 順序を保ったまま `batch_size` 件ずつに分ける。最後のバッチだけが
    /// 小さくなりうる。空の入力からはバッチを作らない。
    ///
    /// # 例
    ///
    /// ```
    /// use oci_uploader::domain::entities::conversion_batch::ConversionBatch;
    ///
    /// let batches = ConversionBatch::chunk(vec![], 50);
    /// assert!(batches.is_empty());
    /// ```
    pub fn chunk(conversions: Vec<ClickConversion>, batch_size: usize) -> Vec<ConversionBatch> {
        if conversions.is_empty() {
            return Vec::new();
        }

        ConversionBatch::new(conversions).split_by_size(batch_size)
    }

    /// バッチ内のコンバージョン数を返す
    #[inline]
    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    /// バッチが空かどうかを返す
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }

    /// コンバージョンへの参照を返す
    pub fn conversions(&self) -> &[ClickConversion] {
        &self.conversions
    }

    /// コンバージョンの所有権を移動して返す
    pub fn into_conversions(self) -> Vec<ClickConversion> {
        self.conversions
    }

    /// バッチをサイズで分割
    ///
    /// `batch_size` が0の場合は分割しない
    pub fn split_by_size(self, batch_size: usize) -> Vec<ConversionBatch> {
        if batch_size == 0 {
            return vec![self];
        }

        let mut batches = Vec::with_capacity(self.conversions.len().div_ceil(batch_size));
        let mut remaining = self.conversions.into_iter().peekable();
        while remaining.peek().is_some() {
            batches.push(ConversionBatch::new(
                remaining.by_ref().take(batch_size).collect(),
            ));
        }
        batches
    }
}

impl From<Vec<ClickConversion>> for ConversionBatch {
    fn from(conversions: Vec<ClickConversion>) -> Self {
        Self::new(conversions)
    }
}
