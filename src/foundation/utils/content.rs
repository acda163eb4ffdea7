use crate::api_client::TabRecord;
use regex::Regex;

/// Renders a tab record as the text that lands on disk: a metadata header
/// followed by the content body, with markup stripped and line endings
/// normalized.
pub fn format_content(record: &TabRecord) -> String {
    let content = format!(
        "Title: {}\n\
         Artist: {}\n\
         Album: {}\n\
         Type: {}\n\
         Capo: {}\n\
         Tuning: {}\n\
         Difficulty: {}\n\
         Rating: {} ({} votes)\n\
         Tab ID: {}\n\
         URL: {}\n\
         \n\
         {}",
        record.song(),
        record.artist(),
        record.album_name.as_deref().unwrap_or("Unknown"),
        record.tab_type.as_deref().unwrap_or("Unknown"),
        record.capo.unwrap_or(0),
        record.tuning.as_deref().unwrap_or("Unknown"),
        record.difficulty.as_deref().unwrap_or("Unknown"),
        record.rating.unwrap_or(0.0),
        record.votes.unwrap_or(0),
        record.identifier(),
        record.url_web.as_deref().unwrap_or("N/A"),
        record.content
    );

    strip_markup(&content)
}

/// Removes the paired `[ch]`/`[tab]` markup tokens, normalizes CRLF and CR
/// to LF, and collapses runs of three or more newlines to a single blank
/// line.
pub fn strip_markup(content: &str) -> String {
    let tags = Regex::new(r"\[/?(?:ch|tab)\]").unwrap();
    let stripped = tags.replace_all(content, "");
    let normalized = stripped.replace("\r\n", "\n").replace('\r', "\n");

    let blank_runs = Regex::new(r"\n{3,}").unwrap();
    blank_runs.replace_all(&normalized, "\n\n").into_owned()
}
