//! Audio playback: the coordinator, its backend seam and the `rodio` backend.

mod backend;
mod coordinator;
mod error;
mod observable;
mod player;
mod sink;
mod tags;
mod thread;
mod types;
mod volume;

pub use backend::{MediaEngine, MediaObject};
pub use coordinator::PlaybackCoordinator;
pub use error::AudioError;
pub use observable::Observable;
pub use player::{RodioEngine, RodioMedia};
pub use types::{MediaEvent, MediaStatus, PlaybackEvent};
pub use volume::Volume;

#[cfg(test)]
pub(crate) mod testing;
