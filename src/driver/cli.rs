//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

/// コンバージョン記録を Google Ads にアップロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "oci-uploader")]
#[command(about = "Upload offline click conversions to Google Ads", long_about = None)]
pub struct Args {
    /// Conversion record file (.json / .jsonl) or a directory of them
    #[arg(short, long)]
    pub input: String,

    /// Conversion action the records are attributed to
    #[arg(long)]
    pub conversion_action_id: i64,

    /// Dry run mode - map and batch, but don't actually upload
    #[arg(long)]
    pub dry_run: bool,

    /// Config file path
    #[arg(short, long, default_value = "./oci-uploader.json")]
    pub config: String,
}
