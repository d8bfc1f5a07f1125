//! # ConversionRecord Entity
//!
//! クリック起点のコンバージョン記録（入力データ）

use serde::{Deserialize, Serialize};

/// コンバージョン記録
///
/// 外部から渡されるアトリビューションデータ。GCLID と WBRAID は
/// 択一の識別子で、どちらを使うかはマッピング時に決まる。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    /// Google Click Identifier
    #[serde(default, alias = "GCLID")]
    pub gclid: Option<String>,
    /// Web Browser Redirect Identifier
    #[serde(default, alias = "WBRAID")]
    pub wbraid: Option<String>,
    /// コンバージョン日時（`yyyy-mm-dd hh:mm:ss+|-hh:mm` 形式、検証しない）
    #[serde(alias = "ConversionDateTime")]
    pub conversion_date_time: String,
    /// 通貨コード
    #[serde(default, alias = "CurrencyCode")]
    pub currency_code: Option<String>,
}

impl ConversionRecord {
    /// 新しいコンバージョン記録を作成
    pub fn new(
        gclid: Option<String>,
        wbraid: Option<String>,
        conversion_date_time: impl Into<String>,
        currency_code: Option<String>,
    ) -> Self {
        Self {
            gclid,
            wbraid,
            conversion_date_time: conversion_date_time.into(),
            currency_code,
        }
    }

    /// GCLID が空でなければ返す
    pub fn non_empty_gclid(&self) -> Option<&str> {
        self.gclid.as_deref().filter(|gclid| !gclid.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_record_deserialization() {
        let json_str = r#"{
            "gclid": "gclid-001",
            "conversionDateTime": "2024-12-25 10:00:00+09:00",
            "currencyCode": "JPY"
        }"#;

        let record: ConversionRecord = serde_json::from_str(json_str).unwrap();

        assert_eq!(record.gclid.as_deref(), Some("gclid-001"));
        assert!(record.wbraid.is_none());
        assert_eq!(record.conversion_date_time, "2024-12-25 10:00:00+09:00");
        assert_eq!(record.currency_code.as_deref(), Some("JPY"));
    }

    #[test]
    fn test_conversion_record_uppercase_aliases() {
        let json_str = r#"{
            "GCLID": "",
            "WBRAID": "br-123",
            "ConversionDateTime": "2024-12-25 10:00:00+00:00",
            "CurrencyCode": "USD"
        }"#;

        let record: ConversionRecord = serde_json::from_str(json_str).unwrap();

        assert_eq!(record.gclid.as_deref(), Some(""));
        assert_eq!(record.wbraid.as_deref(), Some("br-123"));
        assert_eq!(record.currency_code.as_deref(), Some("USD"));
    }

    #[test]
    fn test_conversion_record_missing_timestamp_is_rejected() {
        let json_str = r#"{"gclid": "gclid-001"}"#;
        let result: Result<ConversionRecord, _> = serde_json::from_str(json_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_empty_gclid() {
        let with_gclid = ConversionRecord::new(Some("g".to_string()), None, "ts", None);
        let empty_gclid = ConversionRecord::new(Some(String::new()), None, "ts", None);
        let no_gclid = ConversionRecord::new(None, Some("w".to_string()), "ts", None);

        assert_eq!(with_gclid.non_empty_gclid(), Some("g"));
        assert_eq!(empty_gclid.non_empty_gclid(), None);
        assert_eq!(no_gclid.non_empty_gclid(), None);
    }
}
