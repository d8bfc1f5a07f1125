//! Google Ads Adapter Modules
//!
//! Google Ads API（uploadClickConversions）統合のためのアダプターモジュール

pub mod client;
pub mod error;
pub mod failure;
pub mod models;
pub mod retry;
