//! Song persistence
//!
//! Two on-disk forms of the same JSON document: plain `.json` for
//! interchange and `.gtab`, the same JSON behind gzip. `save` and `load`
//! dispatch on the path's extension.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;

use crate::error::Result;
use crate::models::Song;

/// Extension of the compressed native format.
pub const GTAB_EXTENSION: &str = "gtab";

/// Save a song, choosing the format from the path's extension. The
/// modified timestamp is refreshed before writing.
pub fn save(song: &mut Song, path: &Path) -> Result<()> {
    song.touch();
    if is_gtab(path) {
        save_gtab(song, path)
    } else {
        save_json(song, path)
    }
}

/// Load a song, choosing the format from the path's extension.
pub fn load(path: &Path) -> Result<Song> {
    if is_gtab(path) {
        load_gtab(path)
    } else {
        load_json(path)
    }
}

fn is_gtab(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(GTAB_EXTENSION))
        .unwrap_or(false)
}

/// Write pretty-printed JSON.
pub fn save_json(song: &Song, path: &Path) -> Result<()> {
    let json = song.to_json()?;
    std::fs::write(path, json)?;
    info!("saved {} measures to {}", song.measures.len(), path.display());
    Ok(())
}

pub fn load_json(path: &Path) -> Result<Song> {
    let json = std::fs::read_to_string(path)?;
    let song = Song::from_json(&json)?;
    info!("loaded {} measures from {}", song.measures.len(), path.display());
    Ok(song)
}

/// Write compact JSON behind gzip.
pub fn save_gtab(song: &Song, path: &Path) -> Result<()> {
    let json = serde_json::to_string(song)?;
    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(file, Compression::best());
    encoder.write_all(json.as_bytes())?;
    encoder.finish()?;
    info!("saved {} measures to {}", song.measures.len(), path.display());
    Ok(())
}

pub fn load_gtab(path: &Path) -> Result<Song> {
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(file);
    let mut json = String::new();
    decoder.read_to_string(&mut json)?;
    let song = Song::from_json(&json)?;
    info!("loaded {} measures from {}", song.measures.len(), path.display());
    Ok(song)
}
