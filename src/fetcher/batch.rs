use std::path::Path;
use std::time::Duration;

use crate::fetcher::manifest::AssetEntry;

/// What happened to a single entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded,
    Skipped,
    Failed(String),
}

/// Per-entry results of one batch run, in manifest order
#[derive(Debug, Default)]
pub struct FetchReport {
    outcomes: Vec<(String, FetchOutcome)>,
}

impl FetchReport {
    fn record(&mut self, filename: &str, outcome: FetchOutcome) {
        self.outcomes.push((filename.to_string(), outcome));
    }

    pub fn outcomes(&self) -> &[(String, FetchOutcome)] {
        &self.outcomes
    }

    pub fn downloaded(&self) -> usize {
        self.count(|o| matches!(o, FetchOutcome::Downloaded))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FetchOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FetchOutcome::Failed(_)))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn count(&self, pred: impl Fn(&FetchOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

async fn fetch_entry(
    client: &reqwest::Client,
    entry: &AssetEntry,
    target: &Path,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let response = client.get(&entry.url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    tokio::fs::write(target, &bytes).await?;
    tracing::debug!("wrote {} bytes to {}", bytes.len(), target.display());
    Ok(())
}

/// Fetch every entry whose target file is missing. A failed entry is
/// reported and the batch moves on to the next one.
pub async fn run(
    client: &reqwest::Client,
    entries: &[AssetEntry],
    output_dir: &Path,
    throttle: Duration,
) -> FetchReport {
    let mut report = FetchReport::default();

    for entry in entries {
        let target = output_dir.join(&entry.filename);

        if target.exists() {
            println!("✓ {} already exists, skipping...", entry.filename);
            report.record(&entry.filename, FetchOutcome::Skipped);
            continue;
        }

        println!("Downloading {}...", entry.filename);

        match fetch_entry(client, entry, &target).await {
            Ok(()) => {
                println!("✓ Downloaded {}", entry.filename);
                report.record(&entry.filename, FetchOutcome::Downloaded);
                // Be polite to the remote host
                tokio::time::sleep(throttle).await;
            }
            Err(err) => {
                println!("✗ Failed to download {}: {}", entry.filename, err);
                report.record(&entry.filename, FetchOutcome::Failed(err.to_string()));
            }
        }
    }

    println!("\nAll downloads complete!");

    report
}
