/// # The Main Entry Point of Extraction
///
/// Orchestrates a full run: configuration loading, device identity,
/// backup parsing, the fetch pipeline, and the final report.
///
/// # Steps:
/// 1. Loads and validates the configuration
/// 2. Ensures the output directory and device identity exist
/// 3. Extracts the unique tab identifiers from the backup
/// 4. Runs the sequential fetch pipeline
/// 5. Reports final counts and the resolved output location
///
use crate::api_client::{DeviceIdentity, TabApiClient};
use crate::{configuration, process};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub async fn run(config_path: &str, force: bool, refresh_device_id: bool) -> Result<()> {
    let settings = configuration::get_configuration(config_path)
        .context("unable to load configuration")?;

    println!("\x1b[1m\x1b[34mStarting tab extraction...\x1b[0m");
    println!("Backup: {}", settings.json);
    println!("Output: {}", settings.data);

    fs::create_dir_all(&settings.data)
        .with_context(|| format!("failed to create output directory {}", settings.data))?;

    let identity = DeviceIdentity::new(Path::new(&settings.data).join(".device_id"));
    if refresh_device_id {
        identity
            .refresh()
            .context("failed to discard the cached device id")?;
    }

    let tab_ids = process::extract_tab_ids(Path::new(&settings.json))?;
    println!("Found {} unique tab IDs in backup", tab_ids.len());

    let mut client = TabApiClient::new(identity.load());
    let summary = process::extract_all_tabs(&mut client, &settings, &tab_ids, force).await;

    let resolved = fs::canonicalize(&settings.data)
        .unwrap_or_else(|_| Path::new(&settings.data).to_path_buf());

    println!("\n\x1b[1m\x1b[34mExtraction complete!\x1b[0m");
    println!("\x1b[32mSuccessful: {}\x1b[0m", summary.successful);
    println!("Cached: {}", summary.cached);
    if summary.failed > 0 {
        println!("\x1b[31mFailed: {}\x1b[0m", summary.failed);
    } else {
        println!("Failed: 0");
    }
    println!("Output directory: {}", resolved.display());

    Ok(())
}
