//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod file_record_repository;
pub mod google_ads_upload_repository;
