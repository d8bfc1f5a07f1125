//! # Record Repository Trait
//!
//! コンバージョン記録ファイルの発見とパースを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::entities::conversion_record::ConversionRecord;

/// 記録リポジトリ
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// 入力パス（ファイルまたはディレクトリ）から記録ファイルを発見する
    async fn discover_record_files(&self, input: &str) -> Result<Vec<PathBuf>>;

    /// 記録ファイルをパースする
    async fn parse_record_file(&self, file_path: &Path) -> Result<Vec<ConversionRecord>>;
}
