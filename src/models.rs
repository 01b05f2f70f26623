use serde::Serialize;

/// One catalogue entry. `emotion` is always stored lowercase.
///
/// Field order here is the field order of the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub lyrics: String,
    pub emotion: String,
}

/// Counts collected while loading a catalogue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records accepted into the catalogue.
    pub accepted: usize,
    /// Non-blank record lines rejected with a warning.
    pub skipped: usize,
    /// Blank lines ignored after the header.
    pub blank: usize,
}

/// Trim surrounding whitespace and lowercase. Applied to emotion keys on
/// both the load and the query path.
pub fn normalize_emotion(raw: &str) -> String {
    raw.trim().to_lowercase()
}
