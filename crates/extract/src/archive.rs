//! Subtitle candidates inside a downloaded archive.
//!
//! Only entries with a recognized subtitle extension are candidates;
//! everything else in the archive (info files, artwork) is ignored.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::ExtractError;

/// Recognized subtitle formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    Srt,
    Ass,
}

impl SubtitleFormat {
    pub fn from_entry_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".srt") {
            Some(Self::Srt)
        } else if lower.ends_with(".ass") {
            Some(Self::Ass)
        } else {
            None
        }
    }
}

pub fn is_subtitle_entry(name: &str) -> bool {
    SubtitleFormat::from_entry_name(name).is_some()
}

/// Final path component of an archive entry, for display.
pub fn entry_basename(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Open the archive written at `path`.
pub fn open_archive(path: &Path) -> Result<ZipArchive<File>, ExtractError> {
    let file = File::open(path)?;
    Ok(ZipArchive::new(file)?)
}

/// Names of subtitle entries, lexicographically sorted.
pub fn subtitle_candidates<R: Read + Seek>(archive: &ZipArchive<R>) -> Vec<String> {
    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| is_subtitle_entry(name))
        .map(str::to_string)
        .collect();
    names.sort();
    names
}

/// Raw bytes of a single entry.
pub fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Vec<u8>, ExtractError> {
    let mut entry = archive.by_name(name)?;
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut bytes)?;
    Ok(bytes)
}
