//! OCI Uploader - Offline Click Conversion Uploader
//!
//! コンバージョン記録を Google Ads にアップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use oci_uploader::adapter::config::Config;
use oci_uploader::driver::{initialize, Args, ConversionUploadWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    // クライアントを作る前に一度だけ
    initialize();

    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Create workflow with injected dependencies
    let workflow = ConversionUploadWorkflow::new(config);

    workflow.execute(args).await?;

    Ok(())
}
