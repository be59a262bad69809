//! Application module: exposes the playlist controller used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the playlist, the cursor
//! and the playback coordinator it drives.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
