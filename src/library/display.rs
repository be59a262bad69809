use crate::config::TrackDisplayField;

use super::model::Track;

/// Build a display string for a track according to the provided `fields` and separator.
///
/// This composes metadata fields (artist, title, album, filename, path) in the
/// configured order and falls back to `title` when no parts were produced.
/// Missing artist/album values are skipped rather than rendered as placeholders.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let title = track.title.trim();
    let artist = track.artist.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let album = track.album.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            TrackDisplayField::Display => {
                // "display" is the classic "Artist - Title" label.
                parts.push(short_label(track));
            }
            TrackDisplayField::Title => {
                if !title.is_empty() {
                    parts.push(title.to_string());
                }
            }
            TrackDisplayField::Artist => {
                if let Some(a) = artist {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Album => {
                if let Some(a) = album {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Filename => {
                if let Some(stem) = track.path().file_stem().and_then(|s| s.to_str()) {
                    if !stem.trim().is_empty() {
                        parts.push(stem.to_string());
                    }
                }
            }
            TrackDisplayField::Path => {
                parts.push(track.path().display().to_string());
            }
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}

/// `Artist - Title` when the artist is known, otherwise just the title.
pub fn short_label(track: &Track) -> String {
    match track.artist.as_deref().map(str::trim) {
        Some(a) if !a.is_empty() => format!("{} - {}", a, track.title.trim()),
        _ => track.title.trim().to_string(),
    }
}
