//! JSON rendering of song lists.
//!
//! Escaping (quote, backslash, `\b \f \n \r \t`, other control characters as
//! `\u00XX`) is serde_json's string encoding.

use crate::models::Song;
use serde::Serialize;
use std::io::Write;

/// `{ "songs": [...], "count": N }`
#[derive(Serialize)]
struct PlaylistDocument<'a> {
    songs: &'a [Song],
    count: usize,
}

/// Write `songs` as a JSON document to `writer`.
pub fn write_json<W: Write>(writer: W, songs: &[Song], pretty: bool) -> serde_json::Result<()> {
    let doc = PlaylistDocument {
        songs,
        count: songs.len(),
    };
    if pretty {
        serde_json::to_writer_pretty(writer, &doc)
    } else {
        serde_json::to_writer(writer, &doc)
    }
}

/// Render `songs` as a JSON string.
pub fn to_json(songs: &[Song], pretty: bool) -> String {
    let mut buf = Vec::new();
    // Strings and integers into a Vec cannot fail to serialize.
    write_json(&mut buf, songs, pretty).expect("song list serializes to JSON");
    String::from_utf8(buf).expect("serde_json emits UTF-8")
}
