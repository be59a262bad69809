//! The seam between the coordinator and whatever actually produces sound.

use std::path::Path;
use std::time::Duration;

use super::types::MediaEvent;

/// Opens media objects. One engine lives for the whole program.
pub trait MediaEngine {
    type Media: MediaObject;

    /// Open `path` and return a handle immediately.
    ///
    /// Opening is asynchronous: the handle later reports `Ready` or `Error`
    /// through [`MediaObject::try_event`]. Dropping the handle releases
    /// everything the backend holds for it.
    fn open(&mut self, path: &Path, volume: f32) -> Self::Media;
}

/// One opened file. Commands are fire-and-forget.
pub trait MediaObject {
    fn play(&mut self);
    fn pause(&mut self);
    /// Halt and rewind, keeping the media loaded.
    fn stop(&mut self);
    fn seek(&mut self, position: Duration);
    fn set_volume(&mut self, volume: f32);
    /// Next pending notification, if any. Never blocks.
    fn try_event(&mut self) -> Option<MediaEvent>;
}
