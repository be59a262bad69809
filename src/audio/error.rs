use std::path::PathBuf;

/// Errors raised by the audio backend. They reach the coordinator as
/// asynchronous notifications, never as return values of its commands.
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    /// No default output device could be opened.
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    /// The file could not be opened.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was opened but is not decodable audio.
    #[error("cannot decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// The audio thread is no longer running.
    #[error("audio thread is not running")]
    Disconnected,
}
