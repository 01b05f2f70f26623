use crate::index::EmotionIndex;
use crate::models::{Song, normalize_emotion};
use std::collections::HashSet;

/// Songs matching any of `requested`, in request order.
///
/// An empty request returns the whole catalogue. Otherwise each request is
/// normalized (empty ones dropped) and its bucket appended, skipping songs
/// whose id is already in the result. Unknown emotions contribute nothing.
///
/// `index` must have been built from `songs`; positions it holds past the
/// end of `songs` are skipped.
pub fn filter_by_emotions<S: AsRef<str>>(
    songs: &[Song],
    index: &EmotionIndex,
    requested: &[S],
) -> Vec<Song> {
    if requested.is_empty() {
        return songs.to_vec();
    }

    let mut result = Vec::new();
    let mut seen_ids = HashSet::new();

    for raw in requested {
        let key = normalize_emotion(raw.as_ref());
        if key.is_empty() {
            continue;
        }
        let Some(bucket) = index.bucket(&key) else {
            log::debug!("No songs tagged {key:?}");
            continue;
        };
        for song in bucket.iter().filter_map(|&pos| songs.get(pos)) {
            if seen_ids.insert(song.id) {
                result.push(song.clone());
            }
        }
    }

    result
}

/// Split a comma-separated request string into trimmed emotion names.
///
/// Empty pieces are kept; [`filter_by_emotions`] ignores them, so `""`
/// matches nothing rather than everything.
pub fn parse_emotion_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}
