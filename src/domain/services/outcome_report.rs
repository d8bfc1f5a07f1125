//! # Outcome Report Service
//!
//! アップロード結果を1行ずつのレポートに整形する

use crate::domain::entities::upload_outcome::{ConversionResult, PartialFailureError, UploadOutcome};

/// アップロード結果レポート
pub struct OutcomeReport;

impl OutcomeReport {
    /// 部分失敗1件分の警告行
    pub fn warning_line(error: &PartialFailureError) -> String {
        format!("Partial failure occurred: {}", error.message)
    }

    /// 解決済み結果1件分の確認行
    ///
    /// 欠けているフィールドは空文字として出力する
    pub fn confirmation_line(result: &ConversionResult) -> String {
        format!(
            "Uploaded conversion that occurred at '{}' to '{}', GCLID: '{}', WBRAID: '{}'.",
            result.conversion_date_time.as_deref().unwrap_or_default(),
            result.conversion_action.as_deref().unwrap_or_default(),
            result.gclid.as_deref().unwrap_or_default(),
            result.wbraid.as_deref().unwrap_or_default(),
        )
    }

    /// 部分失敗のエラーごとに1行
    pub fn warning_lines(outcome: &UploadOutcome) -> Vec<String> {
        outcome
            .partial_failure_errors()
            .iter()
            .map(Self::warning_line)
            .collect()
    }

    /// 解決済み結果ごとに1行（拒否された項目は警告側で報告済みのため出さない）
    pub fn confirmation_lines(outcome: &UploadOutcome) -> Vec<String> {
        outcome
            .resolved_results()
            .map(Self::confirmation_line)
            .collect()
    }
}
