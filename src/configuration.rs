use anyhow::Result;
use config::{ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::{env, fs, io};

/// Embedded defaults; a user file layered on top overrides them key by key.
const DEFAULT_CONFIG: &str = include_str!("config_default.yaml");

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path to the backup document.
    pub json: String,
    /// Output directory for extracted tabs.
    pub data: String,
    /// Whether an existing output file counts as a cache hit.
    pub cache: bool,
    pub filename: FilenameSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilenameSettings {
    /// Pattern with `{artist}`, `{song}` and `{id}` placeholders.
    pub format: String,
    pub lowercase: bool,
    /// Substitution for whitespace runs; `null` keeps spaces.
    pub space: Option<String>,
    /// Whether `{id}` expands to the tab id or to nothing.
    pub id: bool,
}

/// Loads the resolved configuration: embedded defaults first, then the
/// user file (which may be absent) deep-merged on top. Required fields are
/// validated here, before any network activity.
pub fn get_configuration(cfg_file: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Yaml))
        .add_source(File::new(cfg_file, FileFormat::Yaml).required(false))
        .build()?;

    let mut settings: Settings = settings.try_deserialize()?;

    if settings.json.trim().is_empty() {
        return Err(ConfigError::Message(
            "config is missing required \"json\" path".to_string(),
        ));
    }
    if settings.data.trim().is_empty() {
        return Err(ConfigError::Message(
            "config is missing required \"data\" path".to_string(),
        ));
    }
    if settings.filename.format.trim().is_empty() {
        return Err(ConfigError::Message(
            "config is missing filename.format".to_string(),
        ));
    }

    settings.json = expand_path(&settings.json);
    settings.data = expand_path(&settings.data);

    Ok(settings)
}

/// Expands a leading `~` against `$HOME`.
fn expand_path(value: &str) -> String {
    if let Some(rest) = value.strip_prefix('~') {
        if let Ok(home) = env::var("HOME") {
            return format!("{}{}", home, rest);
        }
    }
    value.to_string()
}

/// Writes a commented config template for the user to customize.
pub fn create_config(path: &str) -> Result<()> {
    println!("\x1b[1m\x1b[32mCreating configuration...\x1b[0m");

    if Path::new(path).exists() && !confirm_overwrite()? {
        println!("\x1b[33mOperation cancelled.\x1b[0m");
        return Ok(());
    }

    fs::write(path, DEFAULT_CONFIG)?;

    println!("\x1b[32mConfiguration file created at:");
    println!("  -> {}", path);
    println!("\x1b[0mPlease edit it with your backup and output paths.");

    Ok(())
}

fn confirm_overwrite() -> Result<bool, io::Error> {
    println!("\x1b[31mThe configuration file already exists.");
    println!("Do you want to overwrite it? (y/N)\x1b[0m");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y")
}
