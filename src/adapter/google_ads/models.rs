//! Google Ads REST Wire Models
//!
//! uploadClickConversions のリクエスト／レスポンス（JSON, camelCase）

use serde::{Deserialize, Serialize};

use crate::domain::entities::click_conversion::ClickConversion;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadClickConversionsRequest {
    /// Part of the URL path, not the body
    #[serde(skip)]
    pub customer_id: String,
    pub conversions: Vec<ClickConversionPayload>,
    pub partial_failure: bool,
}

/// `ClickConversion` as the API expects it; exactly one of gclid/wbraid is set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickConversionPayload {
    pub conversion_action: String,
    pub conversion_date_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gclid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wbraid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

impl From<&ClickConversion> for ClickConversionPayload {
    fn from(conversion: &ClickConversion) -> Self {
        let (conversion_value, currency_code) = match &conversion.value {
            Some(value) => (Some(value.amount), Some(value.currency_code.clone())),
            None => (None, None),
        };

        Self {
            conversion_action: conversion.conversion_action.clone(),
            conversion_date_time: conversion.conversion_date_time.clone(),
            gclid: conversion.click_id.gclid().map(str::to_string),
            wbraid: conversion.click_id.wbraid().map(str::to_string),
            conversion_value,
            currency_code,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadClickConversionsResponse {
    #[serde(default)]
    pub partial_failure_error: Option<Status>,
    #[serde(default)]
    pub results: Vec<ClickConversionResultPayload>,
}

/// Per-item result; rejected items come back as an empty object
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickConversionResultPayload {
    #[serde(default)]
    pub gclid: Option<String>,
    #[serde(default)]
    pub wbraid: Option<String>,
    #[serde(default)]
    pub conversion_action: Option<String>,
    #[serde(default)]
    pub conversion_date_time: Option<String>,
}

/// `google.rpc.Status`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    /// `google.rpc.Status.status` string, only present in HTTP error bodies
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

/// Body of a non-2xx response
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Status,
}

/// `google.ads.googleads.vN.errors.GoogleAdsFailure`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAdsFailure {
    #[serde(default)]
    pub errors: Vec<GoogleAdsErrorPayload>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAdsErrorPayload {
    /// One-entry object, e.g. `{"conversionUploadError": "UNPARSEABLE_GCLID"}`
    #[serde(default)]
    pub error_code: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub location: Option<ErrorLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLocation {
    #[serde(default)]
    pub field_path_elements: Vec<FieldPathElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPathElement {
    pub field_name: String,
    #[serde(default)]
    pub index: Option<i64>,
}
