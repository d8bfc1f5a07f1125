//! # ClickConversion Entity
//!
//! コンバージョンアクションに紐付けられたアップロード単位

/// クリック識別子
///
/// GCLID と WBRAID のどちらか一方だけを持つ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickId {
    Gclid(String),
    Wbraid(String),
}

impl ClickId {
    pub fn gclid(&self) -> Option<&str> {
        match self {
            ClickId::Gclid(gclid) => Some(gclid),
            ClickId::Wbraid(_) => None,
        }
    }

    pub fn wbraid(&self) -> Option<&str> {
        match self {
            ClickId::Gclid(_) => None,
            ClickId::Wbraid(wbraid) => Some(wbraid),
        }
    }
}

/// コンバージョン値と通貨
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionValue {
    pub amount: f64,
    pub currency_code: String,
}

/// クリックコンバージョン
///
/// `customers/{customer_id}/conversionActions/{action_id}` を対象とする
/// アップロード対象の1件
#[derive(Debug, Clone, PartialEq)]
pub struct ClickConversion {
    /// コンバージョンアクションのリソース名
    pub conversion_action: String,
    /// コンバージョン日時（入力そのまま）
    pub conversion_date_time: String,
    /// クリック識別子
    pub click_id: ClickId,
    /// コンバージョン値（未指定の場合は送信しない）
    pub value: Option<ConversionValue>,
}
