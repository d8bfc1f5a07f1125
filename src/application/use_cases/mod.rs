//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **LoadRecordsUseCase**: 記録ファイルの発見と読み込み
//! - **UploadConversionsUseCase**: マッピング・バッチ分割・アップロード・レポート

pub mod load_records;
pub mod upload_conversions;
