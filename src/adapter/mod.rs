//! Adapter Layer
//!
//! 外部システム（Google Ads API, ファイルシステム）との統合

pub mod auth;
pub mod config;
pub mod google_ads;
pub mod repositories;
