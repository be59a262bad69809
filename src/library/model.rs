use std::path::{Path, PathBuf};
use std::time::Duration;

/// A single playable file in the playlist.
///
/// `path` never changes once the track exists. The display fields start out
/// seeded from the file name and are overwritten when the audio backend
/// reports tags for the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
}

impl Track {
    /// Create a track for `path` with the title taken from the file stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();

        Self {
            path,
            title,
            artist: None,
            album: None,
            duration: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite display fields with whatever non-empty values `meta` carries.
    pub fn apply_metadata(&mut self, meta: &TrackMetadata) {
        if let Some(v) = meta.title.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            self.title = v.to_string();
        }
        if let Some(v) = meta.artist.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            self.artist = Some(v.to_string());
        }
        if let Some(v) = meta.album.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            self.album = Some(v.to_string());
        }
    }
}

/// Tag values discovered for a file. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

impl TrackMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.album.is_none()
    }
}
