//! Track model and helpers to turn files and folders into playlist entries.

mod display;
mod error;
mod model;
mod scan;

pub use display::{display_from_fields, short_label};
pub use error::LibraryError;
pub use model::{Track, TrackMetadata};
pub use scan::{scan_folder, tracks_from_paths};
