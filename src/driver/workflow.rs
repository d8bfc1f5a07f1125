//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::google_ads::client::GoogleAdsClientFactory;
use crate::adapter::repositories::file_record_repository::FileRecordRepository;
use crate::adapter::repositories::google_ads_upload_repository::GoogleAdsUploadRepository;
use crate::application::dto::upload_config::UploadConfig;
use crate::application::use_cases::load_records::LoadRecordsUseCase;
use crate::application::use_cases::upload_conversions::{
    prepare_batches, UploadConversionsUseCase, UploadSummary,
};
use crate::domain::entities::conversion_batch::ConversionBatch;

use super::cli::Args;

/// ドライラン時の1件分の表示
pub fn describe_planned_conversion(batch_num: usize, batch: &ConversionBatch) -> Vec<String> {
    batch
        .conversions()
        .iter()
        .map(|c| {
            format!(
                "    - batch {} | {} | {} | GCLID: '{}' | WBRAID: '{}'",
                batch_num,
                c.conversion_date_time,
                c.conversion_action,
                c.click_id.gclid().unwrap_or_default(),
                c.click_id.wbraid().unwrap_or_default()
            )
        })
        .collect()
}

/// Conversion Upload Workflow
pub struct ConversionUploadWorkflow {
    config: Config,
    load_use_case: Arc<LoadRecordsUseCase<FileRecordRepository>>,
}

impl ConversionUploadWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        let record_repo = Arc::new(FileRecordRepository::new());
        let load_use_case = Arc::new(LoadRecordsUseCase::new(record_repo));

        Self {
            config,
            load_use_case,
        }
    }

    /// Execute the upload workflow
    pub async fn execute(&self, args: Args) -> Result<UploadSummary> {
        info!("Starting conversion uploader...");
        info!("Dry run: {}", args.dry_run);

        // Uploads always go to the configured account, never to anything in the records
        let customer_id = self.config.customer_id()?;
        let upload_config = UploadConfig::new(customer_id);
        info!(
            "Customer: {} | Conversion action: {}",
            customer_id, args.conversion_action_id
        );

        let records = self.load_use_case.execute(&args.input).await?;
        info!("Loaded {} conversion records from {}", records.len(), args.input);

        if records.is_empty() {
            println!("No conversion records to upload. Exiting.");
            return Ok(UploadSummary::default());
        }

        if args.dry_run {
            let batches = prepare_batches(&records, args.conversion_action_id, &upload_config);
            println!("✓ Dry-run mode (not actually uploading)");
            println!(
                "  Would upload {} conversions in {} batches:",
                records.len(),
                batches.len()
            );
            for (i, batch) in batches.iter().enumerate() {
                for line in describe_planned_conversion(i + 1, batch) {
                    println!("{}", line);
                }
            }
            return Ok(UploadSummary {
                batch_count: batches.len(),
                ..UploadSummary::default()
            });
        }

        let factory = Arc::new(GoogleAdsClientFactory::from_config(&self.config)?);
        let upload_repo = Arc::new(GoogleAdsUploadRepository::new(factory));
        let upload_use_case = UploadConversionsUseCase::new(upload_repo);

        let summary = upload_use_case
            .execute(&records, args.conversion_action_id, &upload_config)
            .await?;

        info!(
            "Upload complete: {} conversions in {} batches ({} partial failures)",
            summary.submitted_count,
            summary.batch_count,
            summary.warnings.len()
        );

        Ok(summary)
    }
}
