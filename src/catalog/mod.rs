pub mod record;

use crate::models::{LoadSummary, Song, normalize_emotion};
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of positional fields in a record: id, title, artist, lyrics, emotion.
pub const FIELD_COUNT: usize = 5;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Could not open song catalogue {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read {} at line {line}: {source}", path.display())]
    Read {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// A record rejected during load. The load itself carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Line parsed into fewer than [`FIELD_COUNT`] fields.
    TooFewFields { line: usize, found: usize, text: String },
    /// The id field is not an integer.
    InvalidId { line: usize, value: String },
    /// Title, artist or emotion is empty.
    EmptyRequiredField { line: usize, field: &'static str },
    /// Nothing in the source was accepted.
    NoSongs { source: String },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields { line, found, text } => write!(
                f,
                "Skipping malformed line {line} ({found} of {FIELD_COUNT} fields): {text}"
            ),
            Self::InvalidId { line, value } => {
                write!(f, "Skipping line {line}: id {value:?} is not an integer")
            }
            Self::EmptyRequiredField { line, field } => {
                write!(f, "Skipping line {line}: empty {field}")
            }
            Self::NoSongs { source } => write!(f, "No valid songs found in {source}"),
        }
    }
}

/// Receives non-fatal load warnings.
pub trait Diagnostics {
    fn warn(&mut self, warning: LoadWarning);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&mut self, warning: LoadWarning) {
        log::warn!("{warning}");
    }
}

/// Collects warnings in memory.
impl Diagnostics for Vec<LoadWarning> {
    fn warn(&mut self, warning: LoadWarning) {
        self.push(warning);
    }
}

/// Open `path` and load every valid record from it.
pub fn load(path: &Path, diagnostics: &mut dyn Diagnostics) -> Result<(Vec<Song>, LoadSummary)> {
    let file = File::open(path).map_err(|source| CatalogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loading songs from {}", path.display());
    load_from_reader(BufReader::new(file), path, diagnostics)
}

/// Load records from any line source. `source` names it in errors and warnings.
///
/// The first line is a header and is dropped unread. Blank lines are skipped
/// without a warning; malformed records are reported to `diagnostics` and skipped.
pub fn load_from_reader<R: BufRead>(
    mut reader: R,
    source: &Path,
    diagnostics: &mut dyn Diagnostics,
) -> Result<(Vec<Song>, LoadSummary)> {
    let mut songs = Vec::new();
    let mut summary = LoadSummary::default();

    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source_err| CatalogError::Read {
                path: source.to_path_buf(),
                line: line_number + 1,
                source: source_err,
            })?;
        if read == 0 {
            break;
        }
        line_number += 1;

        // Header: dropped without decoding.
        if line_number == 1 {
            continue;
        }

        let line = decode_line(&buf, line_number);
        if line.trim().is_empty() {
            log::debug!("Skipping blank line {line_number}");
            summary.blank += 1;
            continue;
        }

        match parse_song(&line, line_number) {
            Ok(song) => {
                songs.push(song);
                summary.accepted += 1;
            }
            Err(warning) => {
                diagnostics.warn(warning);
                summary.skipped += 1;
            }
        }
    }

    if songs.is_empty() {
        diagnostics.warn(LoadWarning::NoSongs {
            source: source.display().to_string(),
        });
    }

    log::info!(
        "Loaded {} songs from {} ({} skipped, {} blank)",
        summary.accepted,
        source.display(),
        summary.skipped,
        summary.blank
    );

    Ok((songs, summary))
}

/// Strip the line terminator and decode. Invalid UTF-8 sequences become
/// U+FFFD rather than failing the load.
fn decode_line(raw: &[u8], line_number: usize) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    let line = String::from_utf8_lossy(raw);
    if let Cow::Owned(_) = line {
        log::debug!("Line {line_number} is not valid UTF-8, decoded lossily");
    }
    line
}

/// Map one record line onto a [`Song`], or say why it was rejected.
fn parse_song(line: &str, line_number: usize) -> std::result::Result<Song, LoadWarning> {
    let mut fields = record::parse_line(line);
    let found = fields.len();
    fields.truncate(FIELD_COUNT);
    let Ok([id, title, artist, lyrics, emotion]) = <[String; FIELD_COUNT]>::try_from(fields) else {
        return Err(LoadWarning::TooFewFields {
            line: line_number,
            found,
            text: line.to_string(),
        });
    };

    let id = id.parse::<i64>().map_err(|_| LoadWarning::InvalidId {
        line: line_number,
        value: id.clone(),
    })?;

    for (name, value) in [("title", &title), ("artist", &artist), ("emotion", &emotion)] {
        if value.is_empty() {
            return Err(LoadWarning::EmptyRequiredField {
                line: line_number,
                field: name,
            });
        }
    }

    Ok(Song {
        id,
        title,
        artist,
        lyrics,
        emotion: normalize_emotion(&emotion),
    })
}
