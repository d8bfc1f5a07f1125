//! File Record Repository Implementation
//!
//! RecordRepositoryのファイルシステム実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::entities::conversion_record::ConversionRecord;
use crate::domain::repositories::record_repository::RecordRepository;

/// ファイルシステムベースの記録リポジトリ
///
/// `.json`（配列）と `.jsonl`（1行1記録）を読む
pub struct FileRecordRepository;

fn is_record_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("json") | Some("jsonl")
    )
}

impl FileRecordRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// 記録ファイルを発見する（内部実装）
    fn discover_record_files_internal(input: &str) -> Result<Vec<PathBuf>> {
        let expanded_path = shellexpand::tilde(input);
        let input_path = PathBuf::from(expanded_path.as_ref());

        if !input_path.exists() {
            anyhow::bail!("Input path does not exist: {}", input_path.display());
        }

        if input_path.is_file() {
            return Ok(vec![input_path]);
        }

        let mut record_files: Vec<PathBuf> = WalkDir::new(&input_path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file() && is_record_file(path))
            .collect();
        // ディレクトリ走査順は不定なのでパス順で固定する
        record_files.sort();

        info!(
            "Found {} record files in {}",
            record_files.len(),
            input_path.display()
        );

        Ok(record_files)
    }

    /// 記録ファイルをパースする
    fn parse_record_file_raw(file_path: &Path) -> Result<Vec<ConversionRecord>> {
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read record file: {}", file_path.display()))?;

        if file_path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            return Ok(Self::parse_jsonl(&content, file_path));
        }

        serde_json::from_str::<Vec<ConversionRecord>>(&content)
            .with_context(|| format!("Failed to parse record file: {}", file_path.display()))
    }

    /// JSONL をパース（壊れた行は警告して読み飛ばす）
    fn parse_jsonl(content: &str, file_path: &Path) -> Vec<ConversionRecord> {
        let mut records = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<ConversionRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {}: {}",
                        line_num + 1,
                        file_path.display(),
                        e
                    );
                }
            }
        }

        records
    }
}

#[async_trait]
impl RecordRepository for FileRecordRepository {
    async fn discover_record_files(&self, input: &str) -> Result<Vec<PathBuf>> {
        let input = input.to_string();
        tokio::task::spawn_blocking(move || Self::discover_record_files_internal(&input))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }

    async fn parse_record_file(&self, file_path: &Path) -> Result<Vec<ConversionRecord>> {
        let file_path = file_path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::parse_record_file_raw(&file_path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for FileRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const JSONL_CONTENT: &str = r#"{"gclid":"g-1","conversionDateTime":"2024-12-25 10:00:00+00:00","currencyCode":"USD"}

{"gclid":"","wbraid":"br-2","conversionDateTime":"2024-12-25 11:00:00+00:00"}
not json at all
{"gclid":"g-3","conversionDateTime":"2024-12-25 12:00:00+00:00"}"#;

    #[tokio::test]
    async fn test_parse_jsonl_skips_invalid_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.jsonl");
        fs::write(&path, JSONL_CONTENT).unwrap();

        let records = FileRecordRepository::new()
            .parse_record_file(&path)
            .await
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].gclid.as_deref(), Some("g-1"));
        assert_eq!(records[1].wbraid.as_deref(), Some("br-2"));
        assert_eq!(records[2].gclid.as_deref(), Some("g-3"));
    }

    #[tokio::test]
    async fn test_parse_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        fs::write(
            &path,
            r#"[
                {"GCLID": "g-1", "ConversionDateTime": "2024-12-25 10:00:00+00:00"},
                {"WBRAID": "br-2", "ConversionDateTime": "2024-12-25 11:00:00+00:00"}
            ]"#,
        )
        .unwrap();

        let records = FileRecordRepository::new()
            .parse_record_file(&path)
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].wbraid.as_deref(), Some("br-2"));
    }

    #[tokio::test]
    async fn test_parse_invalid_json_array_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{ not an array").unwrap();

        let result = FileRecordRepository::new().parse_record_file(&path).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_discover_single_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.jsonl");
        fs::write(&path, JSONL_CONTENT).unwrap();

        let files = FileRecordRepository::new()
            .discover_record_files(path.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(files, vec![path]);
    }

    #[tokio::test]
    async fn test_discover_directory_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("b.jsonl"), "").unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(nested.join("c.jsonl"), "").unwrap();

        let files = FileRecordRepository::new()
            .discover_record_files(dir.path().to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(
            files,
            vec![
                dir.path().join("a.json"),
                dir.path().join("b.jsonl"),
                nested.join("c.jsonl"),
            ]
        );
    }

    #[tokio::test]
    async fn test_discover_missing_path_fails() {
        let result = FileRecordRepository::new()
            .discover_record_files("/nonexistent/conversions")
            .await;

        assert!(result.is_err());
    }
}
