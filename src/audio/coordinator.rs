//! Playback coordinator: owns the one live media object and mirrors its
//! state into observable cells.

use std::time::Duration;

use crate::library::Track;

use super::backend::{MediaEngine, MediaObject};
use super::observable::Observable;
use super::types::{MediaEvent, MediaStatus, PlaybackEvent};
use super::volume::Volume;

/// Translates transport commands into calls on the active media object.
///
/// At most one media object is alive at a time: `play` drops the previous one
/// before asking the engine for the next. Backend notifications are only
/// processed in [`PlaybackCoordinator::poll`], so every state change happens
/// on the thread that owns the coordinator.
pub struct PlaybackCoordinator<E: MediaEngine> {
    engine: E,
    media: Option<E::Media>,
    /// Copy of the track being played; metadata lands here first.
    track: Option<Track>,
    volume: Volume,
    position: Observable<Duration>,
    duration: Observable<Duration>,
    status: Observable<MediaStatus>,
}

impl<E: MediaEngine> PlaybackCoordinator<E> {
    pub fn new(engine: E, volume: Volume) -> Self {
        Self {
            engine,
            media: None,
            track: None,
            volume,
            position: Observable::new(Duration::ZERO),
            duration: Observable::new(Duration::ZERO),
            status: Observable::new(MediaStatus::Unknown),
        }
    }

    /// Release whatever is playing and start opening `track`.
    ///
    /// Playback begins once the backend reports the media as ready (see
    /// [`PlaybackCoordinator::poll`]).
    pub fn play(&mut self, track: &Track) {
        self.release_current();

        tracing::info!(path = %track.path().display(), "opening track");
        let media = self.engine.open(track.path(), self.volume.effective());
        self.media = Some(media);
        self.track = Some(track.clone());
        self.status.set(MediaStatus::Unknown);
    }

    pub fn pause(&mut self) {
        if self.status.get() != MediaStatus::Playing {
            return;
        }
        if let Some(media) = self.media.as_mut() {
            media.pause();
            self.status.set(MediaStatus::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.status.get() != MediaStatus::Paused {
            return;
        }
        if let Some(media) = self.media.as_mut() {
            media.play();
            self.status.set(MediaStatus::Playing);
        }
    }

    /// Halt and rewind. The media object stays loaded for a later replay.
    pub fn stop(&mut self) {
        if let Some(media) = self.media.as_mut() {
            media.stop();
            self.position.set(Duration::ZERO);
            self.status.set(MediaStatus::Stopped);
        }
    }

    /// Jump to `target`, clamped to the known duration.
    pub fn seek(&mut self, target: Duration) {
        let status = self.status.get();
        if matches!(status, MediaStatus::Unknown | MediaStatus::Disposed) {
            return;
        }
        let Some(media) = self.media.as_mut() else {
            return;
        };

        let total = self.duration.get();
        let target = if total > Duration::ZERO {
            target.min(total)
        } else {
            target
        };
        media.seek(target);
        self.position.set(target);
    }

    /// Store a new volume (clamped) and apply it unless muted.
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.volume.set_muted(muted);
        self.apply_volume();
    }

    /// Release the media object, if any. Calling it again does nothing.
    pub fn dispose(&mut self) {
        self.release_current();
        self.status.set(MediaStatus::Disposed);
    }

    /// Drain backend notifications and update state accordingly.
    pub fn poll(&mut self) -> Vec<PlaybackEvent> {
        let mut out = Vec::new();
        while let Some(event) = self.media.as_mut().and_then(|m| m.try_event()) {
            self.handle_media_event(event, &mut out);
        }
        out
    }

    pub fn status(&self) -> MediaStatus {
        self.status.get()
    }

    pub fn position(&self) -> Duration {
        self.position.get()
    }

    pub fn duration(&self) -> Duration {
        self.duration.get()
    }

    pub fn status_property(&self) -> &Observable<MediaStatus> {
        &self.status
    }

    pub fn position_property(&self) -> &Observable<Duration> {
        &self.position
    }

    pub fn duration_property(&self) -> &Observable<Duration> {
        &self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn effective_volume(&self) -> f32 {
        self.volume.effective()
    }

    pub fn now_playing(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    fn apply_volume(&mut self) {
        let gain = self.volume.effective();
        if let Some(media) = self.media.as_mut() {
            media.set_volume(gain);
        }
    }

    /// Drop the current media object, which releases it in the backend.
    fn release_current(&mut self) {
        let Some(media) = self.media.take() else {
            return;
        };
        drop(media);

        self.track = None;
        self.position.set(Duration::ZERO);
        self.duration.set(Duration::ZERO);
    }

    fn set_status(&mut self, status: MediaStatus, out: &mut Vec<PlaybackEvent>) {
        if self.status.set(status) {
            out.push(PlaybackEvent::StatusChanged(status));
        }
    }

    fn handle_media_event(&mut self, event: MediaEvent, out: &mut Vec<PlaybackEvent>) {
        match event {
            MediaEvent::Ready { duration, metadata } => {
                self.set_status(MediaStatus::Ready, out);

                if let Some(d) = duration {
                    self.duration.set(d);
                }
                if let Some(track) = self.track.as_mut() {
                    if duration.is_some() {
                        track.duration = duration;
                    }
                    track.apply_metadata(&metadata);
                    if duration.is_some() || !metadata.is_empty() {
                        out.push(PlaybackEvent::MetadataAvailable(track.clone()));
                    }
                }

                if let Some(media) = self.media.as_mut() {
                    media.play();
                }
                self.set_status(MediaStatus::Playing, out);
            }
            MediaEvent::Position(pos) => {
                // A tick queued before a stop/pause must not move the cursor.
                match self.status.get() {
                    MediaStatus::Playing => {}
                    MediaStatus::Stalled => self.set_status(MediaStatus::Playing, out),
                    _ => return,
                }
                if self.position.set(pos) {
                    out.push(PlaybackEvent::Progress(pos));
                }
            }
            MediaEvent::Stalled => {
                if self.status.get() == MediaStatus::Playing {
                    tracing::warn!("playback stalled");
                    self.set_status(MediaStatus::Stalled, out);
                }
            }
            MediaEvent::EndOfMedia => {
                // Queued before a stop/pause: the user's command wins.
                if !matches!(
                    self.status.get(),
                    MediaStatus::Playing | MediaStatus::Stalled
                ) {
                    return;
                }
                self.set_status(MediaStatus::Stopped, out);
                out.push(PlaybackEvent::EndOfTrack);
            }
            MediaEvent::Error(err) => {
                tracing::error!(error = %err, "media error");
                self.set_status(MediaStatus::Stopped, out);
            }
        }
    }
}

impl<E: MediaEngine> Drop for PlaybackCoordinator<E> {
    fn drop(&mut self) {
        self.dispose();
    }
}
