//! Application model: the playlist controller.
//!
//! `App` owns the playlist and the playback coordinator, turns user intents
//! (play this row, next, toggle pause...) into coordinator commands and reacts
//! to what the coordinator reports back.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audio::{MediaEngine, MediaStatus, PlaybackCoordinator, PlaybackEvent};
use crate::config::LibrarySettings;
use crate::library::{LibraryError, Track, scan_folder, tracks_from_paths};
use crate::playlist::Playlist;

/// What keystrokes currently mean.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a file or folder path to add.
    AddPath,
}

/// The main application model.
pub struct App<E: MediaEngine> {
    pub playlist: Playlist,
    pub player: PlaybackCoordinator<E>,
    /// Highlighted row; independent of what is playing.
    pub selected: usize,

    pub input_mode: InputMode,
    pub input: String,
    pub metadata_window: bool,
    /// One-line feedback shown in the status box.
    pub status_message: Option<String>,

    library: LibrarySettings,
    needs_redraw: bool,
    /// Position version last drawn.
    drawn_position: u64,
}

impl<E: MediaEngine> App<E> {
    pub fn new(player: PlaybackCoordinator<E>, library: LibrarySettings) -> Self {
        Self {
            playlist: Playlist::new(),
            player,
            selected: 0,
            input_mode: InputMode::Normal,
            input: String::new(),
            metadata_window: false,
            status_message: None,
            library,
            needs_redraw: true,
            drawn_position: 0,
        }
    }

    /// Returns whether something changed since the last call, and resets the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn has_tracks(&self) -> bool {
        !self.playlist.is_empty()
    }

    /// Append the given files, skipping anything that is not audio.
    pub fn add_files<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let added = self
            .playlist
            .extend(tracks_from_paths(paths, &self.library));
        if added > 0 {
            tracing::info!(added, "added files");
            self.request_redraw();
        }
        added
    }

    /// Append every audio file in `dir`, sorted by file name.
    pub fn add_folder(&mut self, dir: &Path) -> Result<usize, LibraryError> {
        let tracks = scan_folder(dir, &self.library)?;
        let added = self.playlist.extend(tracks);
        tracing::info!(dir = %dir.display(), added, "added folder");
        self.request_redraw();
        Ok(added)
    }

    /// Add `path` as a folder when it is a directory, otherwise as a file.
    pub fn add_path(&mut self, path: &Path) -> Result<usize, LibraryError> {
        if path.is_dir() {
            self.add_folder(path)
        } else {
            Ok(self.add_files([path]))
        }
    }

    /// Start playing entry `index`. Out-of-range indices change nothing.
    pub fn play_track(&mut self, index: usize) -> bool {
        if !self.playlist.select(index) {
            return false;
        }
        if let Some(track) = self.playlist.get(index) {
            self.player.play(track);
        }
        self.selected = index;
        self.request_redraw();
        true
    }

    pub fn next_track(&mut self) {
        if let Some(i) = self.playlist.next_index() {
            self.play_track(i);
        }
    }

    pub fn previous_track(&mut self) {
        if let Some(i) = self.playlist.previous_index() {
            self.play_track(i);
        }
    }

    pub fn play_selected(&mut self) {
        self.play_track(self.selected);
    }

    /// Pause when playing, resume when paused, otherwise (re)start the
    /// current track, or the first one if nothing was played yet.
    pub fn toggle_play_pause(&mut self) {
        match self.player.status() {
            MediaStatus::Playing => self.player.pause(),
            MediaStatus::Paused => self.player.resume(),
            _ => {
                if self.has_tracks() {
                    self.play_track(self.playlist.current().unwrap_or(0));
                }
            }
        }
        self.request_redraw();
    }

    pub fn stop(&mut self) {
        self.player.stop();
        self.request_redraw();
    }

    /// Seek to `fraction` of the current track's duration.
    pub fn seek_fraction(&mut self, fraction: f64) {
        let total = self.player.duration();
        if total.is_zero() || fraction.is_nan() {
            return;
        }
        self.player.seek(total.mul_f64(fraction.clamp(0.0, 1.0)));
        self.request_redraw();
    }

    /// Scrub relative to the current position by `secs` seconds.
    pub fn seek_by(&mut self, secs: i64) {
        let pos = self.player.position();
        let delta = Duration::from_secs(secs.unsigned_abs());
        let target = if secs < 0 {
            pos.saturating_sub(delta)
        } else {
            pos.saturating_add(delta)
        };
        self.player.seek(target);
        self.request_redraw();
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        let level = self.player.volume() + delta;
        self.player.set_volume(level);
        self.request_redraw();
    }

    pub fn toggle_mute(&mut self) {
        let muted = !self.player.is_muted();
        self.player.set_muted(muted);
        self.request_redraw();
    }

    /// Remove entry `index`. Removing the playing entry keeps the audio going
    /// but forgets which row it was.
    pub fn remove_track(&mut self, index: usize) -> Option<Track> {
        let removed = self.playlist.remove(index)?;
        self.clamp_selection();
        self.request_redraw();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.player.dispose();
        self.playlist.clear();
        self.selected = 0;
        self.request_redraw();
    }

    /// Drain coordinator events: write back metadata and auto-advance.
    ///
    /// Progress ticks only request a redraw when the position cell actually
    /// moved since the last one was drawn.
    pub fn pump(&mut self) {
        for event in self.player.poll() {
            match event {
                PlaybackEvent::Progress(_) => continue,
                PlaybackEvent::StatusChanged(_) => {}
                PlaybackEvent::MetadataAvailable(track) => {
                    if let Some(i) = self.playlist.current() {
                        self.playlist.update_track(i, &track);
                    }
                }
                PlaybackEvent::EndOfTrack => {
                    tracing::debug!("end of track, advancing");
                    self.next_track();
                }
            }
            self.request_redraw();
        }

        let version = self.player.position_property().version();
        if version != self.drawn_position {
            self.drawn_position = version;
            self.request_redraw();
        }
    }

    /// Release the audio backend's resources.
    pub fn shutdown(&mut self) {
        self.player.dispose();
    }

    /// Move selection to the next row, wrapping around.
    pub fn select_next(&mut self) {
        let len = self.playlist.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
            self.request_redraw();
        }
    }

    /// Move selection to the previous row, wrapping around.
    pub fn select_prev(&mut self) {
        let len = self.playlist.len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
            self.request_redraw();
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.request_redraw();
    }

    pub fn select_last(&mut self) {
        self.selected = self.playlist.len().saturating_sub(1);
        self.request_redraw();
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
        self.request_redraw();
    }

    /// Open the "add path" prompt.
    pub fn begin_add_path(&mut self) {
        self.input_mode = InputMode::AddPath;
        self.input.clear();
        self.request_redraw();
    }

    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
        self.request_redraw();
    }

    pub fn pop_input_char(&mut self) {
        self.input.pop();
        self.request_redraw();
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.request_redraw();
    }

    /// Add whatever path was typed into the prompt and close it.
    pub fn submit_input(&mut self) {
        let raw = std::mem::take(&mut self.input);
        self.input_mode = InputMode::Normal;
        self.request_redraw();

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let path = expand_home(trimmed);
        self.status_message = Some(match self.add_path(&path) {
            Ok(0) => format!("No audio files in {}", path.display()),
            Ok(n) => format!("Added {n} track(s)"),
            Err(err) => {
                tracing::warn!(error = %err, "cannot add path");
                err.to_string()
            }
        });
    }

    fn clamp_selection(&mut self) {
        let len = self.playlist.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

/// Expand a leading `~/` using `$HOME`.
fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(raw)
}
