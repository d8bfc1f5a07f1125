//! # Load Records Use Case
//!
//! コンバージョン記録の読み込みユースケース

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::domain::entities::conversion_record::ConversionRecord;
use crate::domain::repositories::record_repository::RecordRepository;

/// 記録読み込みユースケース
///
/// 入力パスから記録ファイルを発見し、ファイル順・行順に記録を読み込む
pub struct LoadRecordsUseCase<R: RecordRepository> {
    record_repository: Arc<R>,
}

impl<R: RecordRepository> LoadRecordsUseCase<R> {
    /// 新しいユースケースを作成
    pub fn new(record_repository: Arc<R>) -> Self {
        Self { record_repository }
    }

    /// 記録を読み込む
    ///
    /// # Arguments
    ///
    /// * `input` - 記録ファイルまたはディレクトリのパス
    ///
    /// # Errors
    ///
    /// ファイルの読み取りに失敗した場合にエラーを返す
    pub async fn execute(&self, input: &str) -> Result<Vec<ConversionRecord>> {
        let files = self.record_repository.discover_record_files(input).await?;

        let mut records = Vec::new();
        for file in &files {
            let parsed = self.record_repository.parse_record_file(file).await?;
            info!("Loaded {} records from {}", parsed.len(), file.display());
            records.extend(parsed);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    struct MockRecordRepository {
        files: Vec<PathBuf>,
        contents: HashMap<PathBuf, Vec<ConversionRecord>>,
    }

    #[async_trait]
    impl RecordRepository for MockRecordRepository {
        async fn discover_record_files(&self, _input: &str) -> Result<Vec<PathBuf>> {
            Ok(self.files.clone())
        }

        async fn parse_record_file(&self, file_path: &Path) -> Result<Vec<ConversionRecord>> {
            self.contents
                .get(file_path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("unreadable: {}", file_path.display()))
        }
    }

    fn record(gclid: &str) -> ConversionRecord {
        ConversionRecord::new(Some(gclid.to_string()), None, "2024-12-25 10:00:00+00:00", None)
    }

    #[tokio::test]
    async fn test_load_records_concatenates_in_file_order() {
        let first = PathBuf::from("/input/a.jsonl");
        let second = PathBuf::from("/input/b.jsonl");
        let mut contents = HashMap::new();
        contents.insert(first.clone(), vec![record("g-1"), record("g-2")]);
        contents.insert(second.clone(), vec![record("g-3")]);

        let use_case = LoadRecordsUseCase::new(Arc::new(MockRecordRepository {
            files: vec![first, second],
            contents,
        }));

        let records = use_case.execute("/input").await.unwrap();

        let gclids: Vec<&str> = records.iter().filter_map(|r| r.gclid.as_deref()).collect();
        assert_eq!(gclids, vec!["g-1", "g-2", "g-3"]);
    }

    #[tokio::test]
    async fn test_load_records_empty() {
        let use_case = LoadRecordsUseCase::new(Arc::new(MockRecordRepository {
            files: vec![],
            contents: HashMap::new(),
        }));

        let records = use_case.execute("/input").await.unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_load_records_propagates_parse_error() {
        let use_case = LoadRecordsUseCase::new(Arc::new(MockRecordRepository {
            files: vec![PathBuf::from("/input/missing.json")],
            contents: HashMap::new(),
        }));

        let result = use_case.execute("/input").await;

        assert!(result.is_err());
    }
}
