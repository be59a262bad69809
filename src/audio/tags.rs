use std::path::Path;
use std::time::Duration;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};

use crate::library::TrackMetadata;

/// Read duration and title/artist/album tags from `path`.
///
/// Files without readable tags yield empty metadata; that is not an error.
pub(super) fn read_tags(path: &Path) -> (Option<Duration>, TrackMetadata) {
    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "no readable tags");
            return (None, TrackMetadata::default());
        }
    };

    let duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());

    let mut meta = TrackMetadata::default();
    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        meta.title = non_empty(tag.title().as_deref());
        meta.artist = non_empty(tag.artist().as_deref());
        meta.album = non_empty(tag.album().as_deref());
    }

    (duration, meta)
}

fn non_empty(v: Option<&str>) -> Option<String> {
    v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_tags_on_garbage_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("noise.mp3");
        std::fs::write(&p, b"definitely not audio").unwrap();

        let (duration, meta) = read_tags(&p);
        assert!(duration.is_none());
        assert!(meta.is_empty());
    }

    #[test]
    fn non_empty_trims_and_drops_blank() {
        assert_eq!(non_empty(Some("  a ")), Some("a".to_string()));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }
}
