use serde::Deserialize;

/// The decoded response for one tab: structured metadata plus the raw
/// content body, which still carries `[ch]`/`[tab]` markup tokens.
///
/// Every field is optional on the wire; the accessors supply the same
/// placeholder values the output files have always used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TabRecord {
    #[serde(default)]
    pub song_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default, rename = "type")]
    pub tab_type: Option<String>,
    #[serde(default)]
    pub capo: Option<u32>,
    #[serde(default)]
    pub tuning: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub votes: Option<u64>,
    #[serde(default)]
    pub tab_id: Option<u64>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub url_web: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl TabRecord {
    pub fn artist(&self) -> &str {
        non_empty(&self.artist_name).unwrap_or("Unknown Artist")
    }

    pub fn song(&self) -> &str {
        non_empty(&self.song_name).unwrap_or("Unknown Song")
    }

    /// The canonical identifier: `tab_id` when present, else `id`.
    pub fn identifier(&self) -> String {
        self.tab_id
            .or(self.id)
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "song_name": "Wish You Were Here",
            "artist_name": "Pink Floyd",
            "album_name": "Wish You Were Here",
            "type": "Tab",
            "capo": 0,
            "tuning": "E A D G B E",
            "difficulty": "intermediate",
            "rating": 4.9,
            "votes": 12345,
            "tab_id": 44555,
            "url_web": "https://example.com/tab/44555",
            "content": "[tab]e|---[/tab]"
        }"#;

        let record: TabRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.artist(), "Pink Floyd");
        assert_eq!(record.song(), "Wish You Were Here");
        assert_eq!(record.identifier(), "44555");
        assert_eq!(record.content, "[tab]e|---[/tab]");
    }

    #[test]
    fn test_missing_fields_fall_back_to_placeholders() {
        let record: TabRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.artist(), "Unknown Artist");
        assert_eq!(record.song(), "Unknown Song");
        assert_eq!(record.identifier(), "unknown");
        assert_eq!(record.content, "");
    }

    #[test]
    fn test_empty_strings_fall_back_to_placeholders() {
        let record: TabRecord =
            serde_json::from_str(r#"{"artist_name": "", "song_name": ""}"#).unwrap();
        assert_eq!(record.artist(), "Unknown Artist");
        assert_eq!(record.song(), "Unknown Song");
    }

    #[test]
    fn test_identifier_prefers_tab_id_over_id() {
        let record: TabRecord = serde_json::from_str(r#"{"tab_id": 7, "id": 8}"#).unwrap();
        assert_eq!(record.identifier(), "7");

        let record: TabRecord = serde_json::from_str(r#"{"id": 8}"#).unwrap();
        assert_eq!(record.identifier(), "8");
    }
}
