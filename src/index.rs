use crate::models::Song;
use std::collections::HashMap;

/// Partition of a catalogue by emotion key.
///
/// Buckets hold catalogue positions in catalogue order. Keys are the
/// already-lowercased `Song::emotion` values, so lookups must be given a
/// normalized key.
#[derive(Debug, Clone, Default)]
pub struct EmotionIndex {
    /// Emotion keys in order of first appearance.
    order: Vec<String>,
    buckets: HashMap<String, Vec<usize>>,
}

impl EmotionIndex {
    /// Build the index from scratch.
    pub fn build(songs: &[Song]) -> Self {
        let mut index = Self::default();
        for (pos, song) in songs.iter().enumerate() {
            match index.buckets.get_mut(&song.emotion) {
                Some(bucket) => bucket.push(pos),
                None => {
                    index.order.push(song.emotion.clone());
                    index.buckets.insert(song.emotion.clone(), vec![pos]);
                }
            }
        }
        log::debug!(
            "Indexed {} songs under {} emotions",
            songs.len(),
            index.order.len()
        );
        index
    }

    /// Catalogue positions of the songs tagged `key`. `key` must be lowercase.
    pub fn bucket(&self, key: &str) -> Option<&[usize]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Emotion keys in order of first appearance in the catalogue.
    pub fn emotions(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of distinct emotions.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
