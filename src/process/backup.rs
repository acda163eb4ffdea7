use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub enum BackupError {
    IoError(io::Error),
    JsonParseError(serde_json::Error),
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BackupError::IoError(e) => write!(f, "failed to read backup file: {}", e),
            BackupError::JsonParseError(e) => write!(f, "malformed backup file: {}", e),
        }
    }
}

impl std::error::Error for BackupError {}

impl From<io::Error> for BackupError {
    fn from(error: io::Error) -> Self {
        BackupError::IoError(error)
    }
}

impl From<serde_json::Error> for BackupError {
    fn from(error: serde_json::Error) -> Self {
        BackupError::JsonParseError(error)
    }
}

/// Extracts the distinct tab identifiers referenced by a backup document,
/// in first-seen order across all playlists. Later duplicates are dropped,
/// never re-fetched.
///
/// Entries without a usable `tabId` are skipped silently; a playlist is
/// allowed to have no entries at all. Identifiers arrive as JSON numbers in
/// every observed export, but numeric strings are accepted too.
pub fn extract_tab_ids(path: &Path) -> Result<Vec<u64>, BackupError> {
    let raw = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&raw)?;

    let mut seen = HashSet::new();
    let mut tab_ids = Vec::new();

    if let Some(playlists) = document["playlists"].as_array() {
        for playlist in playlists {
            if let Some(entries) = playlist["entries"].as_array() {
                for entry in entries {
                    if let Some(tab_id) = entry_tab_id(entry) {
                        if seen.insert(tab_id) {
                            tab_ids.push(tab_id);
                        }
                    }
                }
            }
        }
    }

    Ok(tab_ids)
}

fn entry_tab_id(entry: &Value) -> Option<u64> {
    let value = &entry["tabId"];
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_backup(content: &str) -> (TempDir, std::path::PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("backup.json");
        File::create(&path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_duplicates_dropped_in_first_seen_order() {
        let (_dir, path) = write_backup(
            r#"{
                "playlists": [
                    {"entries": [{"tabId": 5}, {"tabId": 3}]},
                    {"entries": [{"tabId": 5}, {"tabId": 7}]}
                ]
            }"#,
        );

        assert_eq!(extract_tab_ids(&path).unwrap(), vec![5, 3, 7]);
    }

    #[test]
    fn test_entries_without_tab_id_are_skipped() {
        let (_dir, path) = write_backup(
            r#"{
                "playlists": [
                    {"entries": [{"name": "no id here"}, {"tabId": 2}]},
                    {"name": "empty playlist"}
                ]
            }"#,
        );

        assert_eq!(extract_tab_ids(&path).unwrap(), vec![2]);
    }

    #[test]
    fn test_string_identifiers_are_accepted() {
        let (_dir, path) = write_backup(
            r#"{"playlists": [{"entries": [{"tabId": "42"}, {"tabId": "nope"}]}]}"#,
        );

        assert_eq!(extract_tab_ids(&path).unwrap(), vec![42]);
    }

    #[test]
    fn test_document_without_playlists_yields_nothing() {
        let (_dir, path) = write_backup(r#"{"favorites": []}"#);
        assert_eq!(extract_tab_ids(&path).unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let (_dir, path) = write_backup("{not json");
        assert!(matches!(
            extract_tab_ids(&path),
            Err(BackupError::JsonParseError(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        assert!(matches!(
            extract_tab_ids(&path),
            Err(BackupError::IoError(_))
        ));
    }
}
