//! Ordered track list plus the "currently playing" index.

use crate::library::Track;

/// Tracks in insertion order; duplicates allowed.
///
/// `current` is either `None` or a valid index into `tracks`; every mutating
/// method keeps it that way.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Append `tracks`, returning how many were added.
    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) -> usize {
        let before = self.tracks.len();
        self.tracks.extend(tracks);
        self.tracks.len() - before
    }

    /// Make `index` current. Out-of-range indices change nothing.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tracks.len() {
            return false;
        }
        self.current = Some(index);
        true
    }

    /// Index after the current one, wrapping to the first track.
    /// With nothing current, that is the first track.
    pub fn next_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some(match self.current {
            Some(i) => (i + 1) % len,
            None => 0,
        })
    }

    /// Index before the current one, wrapping to the last track.
    /// With nothing current, that is the last track.
    pub fn previous_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some(match self.current {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        })
    }

    /// Remove the track at `index`, shifting the current index to keep
    /// pointing at the same entry. Removing the current entry clears it.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }
        let removed = self.tracks.remove(index);
        self.current = match self.current {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
    }

    /// Copy display fields and duration from `updated` into entry `index`,
    /// provided both refer to the same file.
    pub fn update_track(&mut self, index: usize, updated: &Track) -> bool {
        match self.tracks.get_mut(index) {
            Some(t) if t.path() == updated.path() => {
                t.clone_from(updated);
                true
            }
            _ => false,
        }
    }
}
