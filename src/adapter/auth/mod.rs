//! Authentication Module
//!
//! Google Ads API の OAuth 認証

pub mod oauth;

pub use oauth::{TokenProvider, UserCredentials};
