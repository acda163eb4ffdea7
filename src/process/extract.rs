//! The extraction pipeline.
//!
//! Walks the identifier list strictly one request at a time, persists each
//! fetched tab, and keeps going past per-tab failures. The upstream
//! service is rate-sensitive, so requests are spaced out and never overlap.

use crate::api_client::{TabRecord, TabSource};
use crate::configuration::Settings;
use crate::foundation::utils::{format_content, generate_filename};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const REQUEST_SPACING: Duration = Duration::from_secs(1);

/// Terminal state of a pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    pub successful: usize,
    pub cached: usize,
    pub failed: usize,
}

enum SaveOutcome {
    Written(PathBuf),
    Cached(PathBuf),
}

/// Fetches every identifier in order and writes one file per tab.
///
/// The API key is derived eagerly so the first fetch already carries a
/// live key. A failing tab is logged and counted, never fatal to the
/// batch; between successive requests (not after the last) the pipeline
/// sleeps to bound the request rate.
pub async fn extract_all_tabs(
    api: &mut dyn TabSource,
    settings: &Settings,
    tab_ids: &[u64],
    force: bool,
) -> ExtractSummary {
    api.update_api_key().await;

    let progress = create_progress_bar(tab_ids.len() as u64);
    let mut summary = ExtractSummary::default();

    for (index, &tab_id) in tab_ids.iter().enumerate() {
        progress.set_message(format!("ID {}", tab_id));

        match api.fetch_tab(tab_id).await {
            Ok(record) => match save_tab(&record, settings, force) {
                Ok(SaveOutcome::Cached(path)) => {
                    progress.println(format!("● Cached: {}", display_name(&path)));
                    summary.cached += 1;
                }
                Ok(SaveOutcome::Written(path)) => {
                    progress.println(format!(
                        "\x1b[32m✓ Saved: {}\x1b[0m",
                        display_name(&path)
                    ));
                    summary.successful += 1;
                }
                Err(e) => {
                    progress.println(format!(
                        "\x1b[31m✗ Failed to save tab {}: {}\x1b[0m",
                        tab_id, e
                    ));
                    summary.failed += 1;
                }
            },
            Err(e) => {
                progress.println(format!(
                    "\x1b[31m✗ Failed to fetch tab {}: {}\x1b[0m",
                    tab_id, e
                ));
                summary.failed += 1;
            }
        }

        progress.inc(1);
        if index < tab_ids.len() - 1 {
            tokio::time::sleep(REQUEST_SPACING).await;
        }
    }

    progress.finish_with_message("extraction complete");
    summary
}

/// Writes a fetched tab to its deterministic output path.
///
/// With caching enabled and no force flag, existence of the path alone is
/// the cache signal. The path is only derivable from the fetched record,
/// so the network cost has already been paid by the time the cache is
/// consulted; a hit saves the formatting and write cost.
fn save_tab(record: &TabRecord, settings: &Settings, force: bool) -> io::Result<SaveOutcome> {
    let filename = generate_filename(record, &settings.filename);
    let path = Path::new(&settings.data).join(filename);

    if !force && settings.cache && path.exists() {
        return Ok(SaveOutcome::Cached(path));
    }

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&path, format_content(record))?;
    Ok(SaveOutcome::Written(path))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let progress = ProgressBar::new(total);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{elapsed_precise} [{bar:40.cyan/blue}] {pos}/{len} tabs {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    progress
}
