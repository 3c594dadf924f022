mod batch;
mod manifest;

pub use batch::{FetchOutcome, FetchReport};
pub use manifest::{AssetEntry, builtin_covers, load_manifest};

use std::path::PathBuf;
use std::time::Duration;

/// Browser-like agent so image hosts don't reject the batch as a bot
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Everything one batch run needs
pub struct FetchConfig {
    pub entries: Vec<AssetEntry>,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub throttle: Duration,
}

impl FetchConfig {
    pub fn new(entries: Vec<AssetEntry>, output_dir: PathBuf) -> Self {
        Self {
            entries,
            output_dir,
            user_agent: USER_AGENT.to_string(),
            throttle: Duration::from_millis(500),
        }
    }
}

/// Download every entry that is not already on disk. Individual failures
/// never abort the batch; the report carries the per-entry outcomes.
pub async fn fetch(
    config: &FetchConfig,
) -> Result<FetchReport, Box<dyn std::error::Error + Send + Sync>> {
    tokio::fs::create_dir_all(&config.output_dir).await?;

    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()?;

    Ok(batch::run(&client, &config.entries, &config.output_dir, config.throttle).await)
}
