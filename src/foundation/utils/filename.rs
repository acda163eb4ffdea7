use crate::api_client::TabRecord;
use crate::configuration::FilenameSettings;
use regex::{NoExpand, Regex};

/// Builds the output filename for a tab from the configured pattern.
///
/// The pattern may contain `{artist}`, `{song}` and `{id}` placeholders.
/// The result is deterministic for a given record and settings, which is
/// what makes existence-based caching meaningful.
///
/// # Examples
///
/// ```
/// use tabgrab::configuration::FilenameSettings;
/// use tabgrab::foundation::utils::generate_filename;
/// use tabgrab::TabRecord;
///
/// let record = TabRecord {
///     artist_name: Some("Pink Floyd".to_string()),
///     song_name: Some("Time".to_string()),
///     tab_id: Some(42),
///     ..Default::default()
/// };
/// let settings = FilenameSettings {
///     format: "{artist} - {song} ({id}).txt".to_string(),
///     lowercase: false,
///     space: None,
///     id: true,
/// };
/// assert_eq!(generate_filename(&record, &settings), "Pink Floyd - Time (42).txt");
/// ```
pub fn generate_filename(record: &TabRecord, settings: &FilenameSettings) -> String {
    let mut artist = record.artist().to_string();
    let mut song = record.song().to_string();
    let mut id = record.identifier();

    if settings.lowercase {
        artist = artist.to_lowercase();
        song = song.to_lowercase();
        id = id.to_lowercase();
    }

    if let Some(space) = &settings.space {
        let whitespace = Regex::new(r"\s+").unwrap();
        artist = whitespace.replace_all(&artist, NoExpand(space)).into_owned();
        song = whitespace.replace_all(&song, NoExpand(space)).into_owned();
    }

    artist = sanitize_filename(&artist);
    song = sanitize_filename(&song);
    id = if settings.id {
        sanitize_filename(&id)
    } else {
        String::new()
    };

    settings
        .format
        .replace("{artist}", &artist)
        .replace("{song}", &song)
        .replace("{id}", &id)
}

/// Replaces characters that are unsafe in filenames with underscores.
pub fn sanitize_filename(text: &str) -> String {
    let unsafe_chars = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
    unsafe_chars.replace_all(text, "_").into_owned()
}
