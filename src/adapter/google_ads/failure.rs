//! Partial Failure Decoding
//!
//! `google.rpc.Status` の details から GoogleAdsFailure を取り出す

use log::debug;

use super::models::{GoogleAdsErrorPayload, GoogleAdsFailure, Status};
use crate::domain::entities::upload_outcome::{PartialFailure, PartialFailureError};

const GOOGLE_ADS_FAILURE_SUFFIX: &str = ".errors.GoogleAdsFailure";

/// Extracts every `GoogleAdsFailure` packed into the status details
pub fn google_ads_failures(status: &Status) -> Vec<GoogleAdsFailure> {
    status
        .details
        .iter()
        .filter(|detail| {
            detail
                .get("@type")
                .and_then(|t| t.as_str())
                .is_some_and(|t| t.ends_with(GOOGLE_ADS_FAILURE_SUFFIX))
        })
        .filter_map(|detail| match serde_json::from_value(detail.clone()) {
            Ok(failure) => Some(failure),
            Err(e) => {
                debug!("Skipping undecodable GoogleAdsFailure detail: {}", e);
                None
            }
        })
        .collect()
}

/// `conversionUploadError.UNPARSEABLE_GCLID`
pub fn format_error_code(error: &GoogleAdsErrorPayload) -> Option<String> {
    let (kind, value) = error.error_code.as_ref()?.iter().next()?;
    match value.as_str() {
        Some(code) => Some(format!("{}.{}", kind, code)),
        None => Some(kind.clone()),
    }
}

/// `conversions[0].gclid`
pub fn format_field_path(error: &GoogleAdsErrorPayload) -> Option<String> {
    let elements = &error.location.as_ref()?.field_path_elements;
    if elements.is_empty() {
        return None;
    }

    let path = elements
        .iter()
        .map(|element| match element.index {
            Some(index) => format!("{}[{}]", element.field_name, index),
            None => element.field_name.clone(),
        })
        .collect::<Vec<_>>()
        .join(".");
    Some(path)
}

/// Decodes a partial failure status into one error per failed item.
///
/// Falls back to the status message when no `GoogleAdsFailure` detail is
/// present.
pub fn decode_partial_failure(status: &Status) -> PartialFailure {
    let mut errors: Vec<PartialFailureError> = google_ads_failures(status)
        .iter()
        .flat_map(|failure| failure.errors.iter())
        .map(|error| PartialFailureError {
            message: error.message.clone(),
            error_code: format_error_code(error),
            field_path: format_field_path(error),
        })
        .collect();

    if errors.is_empty() && !status.message.is_empty() {
        errors.push(PartialFailureError::new(status.message.clone()));
    }

    PartialFailure { errors }
}

/// Human readable summary of an error status, used for non-2xx responses
pub fn describe_status(status: &Status) -> String {
    let messages: Vec<String> = google_ads_failures(status)
        .iter()
        .flat_map(|failure| failure.errors.iter())
        .map(|error| match format_error_code(error) {
            Some(code) => format!("{} ({})", error.message, code),
            None => error.message.clone(),
        })
        .collect();

    let head = match &status.status {
        Some(code) => format!("{}: {}", code, status.message),
        None => status.message.clone(),
    };

    if messages.is_empty() {
        head
    } else {
        format!("{} [{}]", head, messages.join("; "))
    }
}
