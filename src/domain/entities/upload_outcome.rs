//! # UploadOutcome Value Object
//!
//! 1バッチ分のアップロード結果

/// 部分失敗の個別エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialFailureError {
    /// 人が読めるエラーメッセージ
    pub message: String,
    /// エラーコード（例: `conversionUploadError.UNPARSEABLE_GCLID`）
    pub error_code: Option<String>,
    /// 失敗したフィールドのパス（例: `conversions[3].gclid`）
    pub field_path: Option<String>,
}

impl PartialFailureError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_code: None,
            field_path: None,
        }
    }
}

/// 部分失敗
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialFailure {
    pub errors: Vec<PartialFailureError>,
}

/// 1件ごとのアップロード結果
///
/// 拒否された項目はコンバージョンアクションを持たない
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionResult {
    pub conversion_action: Option<String>,
    pub conversion_date_time: Option<String>,
    pub gclid: Option<String>,
    pub wbraid: Option<String>,
}

impl ConversionResult {
    /// コンバージョンアクションが解決されたかどうか
    pub fn is_resolved(&self) -> bool {
        self.conversion_action
            .as_deref()
            .is_some_and(|action| !action.is_empty())
    }
}

/// バッチのアップロード結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOutcome {
    pub partial_failure: Option<PartialFailure>,
    pub results: Vec<ConversionResult>,
}

impl UploadOutcome {
    /// 部分失敗のエラー一覧（部分失敗がなければ空）
    pub fn partial_failure_errors(&self) -> &[PartialFailureError] {
        self.partial_failure
            .as_ref()
            .map(|failure| failure.errors.as_slice())
            .unwrap_or(&[])
    }

    /// 解決済みの結果だけを返す
    pub fn resolved_results(&self) -> impl Iterator<Item = &ConversionResult> {
        self.results.iter().filter(|result| result.is_resolved())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(gclid: &str) -> ConversionResult {
        ConversionResult {
            conversion_action: Some("customers/1/conversionActions/2".to_string()),
            conversion_date_time: Some("2024-12-25 10:00:00+00:00".to_string()),
            gclid: Some(gclid.to_string()),
            wbraid: None,
        }
    }

    #[test]
    fn test_partial_failure_errors_empty_without_failure() {
        let outcome = UploadOutcome::default();
        assert!(outcome.partial_failure_errors().is_empty());
    }

    #[test]
    fn test_resolved_results_skips_rejected_items() {
        let outcome = UploadOutcome {
            partial_failure: Some(PartialFailure {
                errors: vec![PartialFailureError::new("INVALID_ARGUMENT")],
            }),
            results: vec![resolved("g-1"), ConversionResult::default(), resolved("g-3")],
        };

        let gclids: Vec<&str> = outcome
            .resolved_results()
            .filter_map(|r| r.gclid.as_deref())
            .collect();
        assert_eq!(gclids, vec!["g-1", "g-3"]);
        assert_eq!(outcome.partial_failure_errors().len(), 1);
    }

    #[test]
    fn test_empty_conversion_action_is_not_resolved() {
        let result = ConversionResult {
            conversion_action: Some(String::new()),
            ..Default::default()
        };
        assert!(!result.is_resolved());
    }
}
