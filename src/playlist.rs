use crate::catalog::{self, Diagnostics, LogDiagnostics};
use crate::index::EmotionIndex;
use crate::models::{LoadSummary, Song, normalize_emotion};
use crate::query;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// A loaded catalogue and its emotion index.
///
/// Both are built together and never change afterwards; [`Playlist::reload`]
/// replaces them wholesale.
#[derive(Debug, Clone)]
pub struct Playlist {
    source: PathBuf,
    songs: Vec<Song>,
    index: EmotionIndex,
    summary: LoadSummary,
}

impl Playlist {
    /// Load from a file, logging skipped records.
    pub fn load(path: &Path) -> catalog::Result<Self> {
        Self::load_with(path, &mut LogDiagnostics)
    }

    pub fn load_with(path: &Path, diagnostics: &mut dyn Diagnostics) -> catalog::Result<Self> {
        let (songs, summary) = catalog::load(path, diagnostics)?;
        Ok(Self::from_songs(path.to_path_buf(), songs, summary))
    }

    /// Load from an in-memory or streamed source. `source` is only a label.
    pub fn from_reader<R: BufRead>(
        reader: R,
        source: &Path,
        diagnostics: &mut dyn Diagnostics,
    ) -> catalog::Result<Self> {
        let (songs, summary) = catalog::load_from_reader(reader, source, diagnostics)?;
        Ok(Self::from_songs(source.to_path_buf(), songs, summary))
    }

    fn from_songs(source: PathBuf, songs: Vec<Song>, summary: LoadSummary) -> Self {
        let index = EmotionIndex::build(&songs);
        Self {
            source,
            songs,
            index,
            summary,
        }
    }

    /// Re-read the source file and rebuild everything.
    /// On error the current catalogue is left untouched.
    pub fn reload(&mut self, diagnostics: &mut dyn Diagnostics) -> catalog::Result<()> {
        let (songs, summary) = catalog::load(&self.source, diagnostics)?;
        self.index = EmotionIndex::build(&songs);
        self.songs = songs;
        self.summary = summary;
        Ok(())
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Every loaded song in file order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn index(&self) -> &EmotionIndex {
        &self.index
    }

    pub fn summary(&self) -> LoadSummary {
        self.summary
    }

    pub fn available_emotions(&self) -> Vec<&str> {
        self.index.emotions().collect()
    }

    /// One bucket of the index. `emotion` is normalized first.
    pub fn songs_with_emotion(&self, emotion: &str) -> Vec<&Song> {
        let key = normalize_emotion(emotion);
        self.index
            .bucket(&key)
            .map(|bucket| bucket.iter().map(|&pos| &self.songs[pos]).collect())
            .unwrap_or_default()
    }

    pub fn filter_by_emotions<S: AsRef<str>>(&self, requested: &[S]) -> Vec<Song> {
        query::filter_by_emotions(&self.songs, &self.index, requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LoadWarning;
    use std::io::{Cursor, Write};

    const CSV: &str = "\
id,title,artist,lyrics,emotion
1,\"Song, Title\",Artist,\"Some lyrics\",happy
2,Title,Artist,\"She said \"\"hi\"\"\",sad
1,OnlyTitle
3,Jump,Band,,Excited
4,Rain,Band,drops,SAD
";

    fn playlist() -> (Playlist, Vec<LoadWarning>) {
        let mut warnings: Vec<LoadWarning> = Vec::new();
        let p = Playlist::from_reader(Cursor::new(CSV), Path::new("songs.csv"), &mut warnings)
            .unwrap();
        (p, warnings)
    }

    #[test]
    fn loads_and_indexes() {
        let (p, warnings) = playlist();
        assert_eq!(p.songs().len(), 4);
        assert_eq!(warnings.len(), 1);
        assert_eq!(p.summary().skipped, 1);
        assert_eq!(p.available_emotions(), vec!["happy", "sad", "excited"]);
        assert_eq!(p.songs()[0].title, "Song, Title");
        assert_eq!(p.songs()[1].lyrics, "She said \"hi\"");
    }

    #[test]
    fn songs_with_emotion_normalizes_key() {
        let (p, _) = playlist();
        let ids: Vec<i64> = p.songs_with_emotion(" Sad ").iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert!(p.songs_with_emotion("angry").is_empty());
    }

    #[test]
    fn filter_and_render() {
        let (p, _) = playlist();
        let got = p.filter_by_emotions(&["Happy", " EXCITED"]);
        let json = crate::output::to_json(&got, true);
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["count"], 2);
        assert_eq!(v["songs"][0]["id"], 1);
        assert_eq!(v["songs"][1]["emotion"], "excited");
    }

    #[test]
    fn repeated_loads_are_identical() {
        let (a, _) = playlist();
        let (b, _) = playlist();
        assert_eq!(a.songs(), b.songs());
        assert_eq!(a.available_emotions(), b.available_emotions());
        assert_eq!(
            a.filter_by_emotions(&["sad", "happy"]),
            b.filter_by_emotions(&["sad", "happy"])
        );
    }

    #[test]
    fn reload_picks_up_changes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{CSV}").unwrap();
        let mut p = Playlist::load_with(file.path(), &mut Vec::<LoadWarning>::new()).unwrap();
        assert_eq!(p.songs().len(), 4);

        writeln!(file, "9,New,Band,,calm").unwrap();
        p.reload(&mut Vec::<LoadWarning>::new()).unwrap();
        assert_eq!(p.songs().len(), 5);
        assert_eq!(p.songs_with_emotion("calm").len(), 1);
    }

    #[test]
    fn failed_reload_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.csv");
        std::fs::write(&path, CSV).unwrap();
        let mut p = Playlist::load_with(&path, &mut Vec::<LoadWarning>::new()).unwrap();

        std::fs::remove_file(&path).unwrap();
        assert!(p.reload(&mut Vec::<LoadWarning>::new()).is_err());
        assert_eq!(p.songs().len(), 4);
        assert_eq!(p.index().len(), 3);
    }
}
