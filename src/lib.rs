//! # OCI Uploader
//!
//! オフラインのクリックコンバージョンを Google Ads にアップロードするツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: コンバージョンのマッピング、バッチ分割、結果レポート（外部依存なし）
//! - **Application層**: 読み込みとアップロードのユースケース
//! - **Adapter層**: 外部システムとの統合（Google Ads REST API, OAuth, ファイルシステム）
//! - **Driver層**: CLI、プロセス初期化、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
