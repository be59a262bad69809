//! Audio-related small types.
//!
//! This module defines the playback status model, the notifications a media
//! object reports back to the coordinator, and the events the coordinator
//! hands to the controller.

use std::time::Duration;

use crate::library::{Track, TrackMetadata};

use super::error::AudioError;

/// Playback status of the single active media object.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MediaStatus {
    /// Media is opening; nothing can be done with it yet.
    #[default]
    Unknown,
    Ready,
    Playing,
    Paused,
    Stopped,
    /// Playing, but the backend stopped making progress.
    Stalled,
    /// The media object was released.
    Disposed,
}

impl MediaStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Loading",
            Self::Ready => "Ready",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Stopped => "Stopped",
            Self::Stalled => "Stalled",
            Self::Disposed => "Idle",
        }
    }
}

/// Notifications reported by a media object, drained on the UI loop.
#[derive(Debug)]
pub enum MediaEvent {
    /// The file was opened and decoded; playback can start.
    Ready {
        duration: Option<Duration>,
        metadata: TrackMetadata,
    },
    /// Playback position advanced.
    Position(Duration),
    /// Position stopped advancing while playing.
    Stalled,
    /// The last sample was played.
    EndOfMedia,
    /// Opening, decoding or seeking failed.
    Error(AudioError),
}

/// What the coordinator tells its owner after draining media notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// Current position changed.
    Progress(Duration),
    /// Status changed to the given value.
    StatusChanged(MediaStatus),
    /// Duration and/or tags were discovered for the now-playing track.
    MetadataAvailable(Track),
    /// The now-playing track finished on its own.
    EndOfTrack,
}
