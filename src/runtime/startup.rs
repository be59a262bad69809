use std::path::PathBuf;

use crate::app::App;
use crate::audio::MediaEngine;

/// Add each command-line path to the playlist: folders are scanned, files
/// are appended as-is. Returns the number of tracks added.
pub fn add_initial_paths<E, I>(app: &mut App<E>, paths: I) -> usize
where
    E: MediaEngine,
    I: IntoIterator<Item = PathBuf>,
{
    let mut total = 0;
    for path in paths {
        match app.add_path(&path) {
            Ok(n) => total += n,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping startup path");
                app.status_message = Some(err.to_string());
            }
        }
    }
    tracing::info!(total, "startup playlist loaded");
    total
}
