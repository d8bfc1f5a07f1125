//! # Conversion Mapper Service
//!
//! コンバージョン記録をアップロード形式に変換するサービス

use crate::domain::entities::click_conversion::{ClickConversion, ClickId, ConversionValue};
use crate::domain::entities::conversion_record::ConversionRecord;

/// コンバージョンアクションのリソース名を組み立てる
///
/// ```
/// use oci_uploader::domain::services::conversion_mapper::conversion_action_resource_name;
///
/// assert_eq!(
///     conversion_action_resource_name(1234567890, 987),
///     "customers/1234567890/conversionActions/987"
/// );
/// ```
pub fn conversion_action_resource_name(customer_id: i64, conversion_action_id: i64) -> String {
    format!(
        "customers/{}/conversionActions/{}",
        customer_id, conversion_action_id
    )
}

/// コンバージョンマッパー
pub struct ConversionMapper;

impl ConversionMapper {
    /// コンバージョン記録を ClickConversion に変換
    ///
    /// GCLID が空でなければ GCLID を、そうでなければ WBRAID を使う。
    /// WBRAID 側は検証しないため、両方とも空なら空の WBRAID になる。
    ///
    /// # Arguments
    ///
    /// * `customer_id` - 顧客ID
    /// * `conversion_action_id` - コンバージョンアクションID
    /// * `record` - 入力のコンバージョン記録
    /// * `value` - コンバージョン値（`None` なら値と通貨は送らない）
    pub fn map(
        customer_id: i64,
        conversion_action_id: i64,
        record: &ConversionRecord,
        value: Option<ConversionValue>,
    ) -> ClickConversion {
        let click_id = match record.non_empty_gclid() {
            Some(gclid) => ClickId::Gclid(gclid.to_string()),
            None => ClickId::Wbraid(record.wbraid.clone().unwrap_or_default()),
        };

        ClickConversion {
            conversion_action: conversion_action_resource_name(customer_id, conversion_action_id),
            conversion_date_time: record.conversion_date_time.clone(),
            click_id,
            value,
        }
    }

    /// 全レコードを順序どおりに変換（コンバージョン値なし）
    pub fn map_all(
        customer_id: i64,
        conversion_action_id: i64,
        records: &[ConversionRecord],
    ) -> Vec<ClickConversion> {
        records
            .iter()
            .map(|record| Self::map(customer_id, conversion_action_id, record, None))
            .collect()
    }
}
