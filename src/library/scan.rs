use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::error::LibraryError;
use super::model::Track;

pub(crate) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Build tracks for explicitly chosen files, keeping the given order.
///
/// Paths with an extension outside the allow-list are skipped, the same way a
/// file picker filtered to audio files would never return them.
pub fn tracks_from_paths<I, P>(paths: I, settings: &LibrarySettings) -> Vec<Track>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    paths
        .into_iter()
        .map(Into::into)
        .filter(|p| {
            let keep = is_audio_file(p, settings);
            if !keep {
                tracing::debug!(path = %p.display(), "skipping non-audio file");
            }
            keep
        })
        .map(Track::from_path)
        .collect()
}

/// Scan `dir` for audio files.
///
/// Entries are visited in file-name order, so a flat folder yields tracks
/// sorted lexicographically by name. Only the folder itself is listed unless
/// `settings.recursive` is set.
pub fn scan_folder(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Track>, LibraryError> {
    let meta = fs::metadata(dir).map_err(|source| LibraryError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(LibraryError::NotADirectory(dir.to_path_buf()));
    }

    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut tracks: Vec<Track> = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            tracks.push(Track::from_path(path));
        }
    }

    tracing::debug!(dir = %dir.display(), count = tracks.len(), "scanned folder");
    Ok(tracks)
}
