//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **ConversionRecord**: 入力のコンバージョン記録
//! - **ClickConversion**: アップロード形式にマッピングされたコンバージョン
//! - **ConversionBatch**: アップロードバッチのバリューオブジェクト
//! - **UploadOutcome**: バッチごとのアップロード結果

pub mod click_conversion;
pub mod conversion_batch;
pub mod conversion_record;
pub mod upload_outcome;
