use std::path::PathBuf;

/// Errors raised while adding files or folders to the playlist.
#[derive(thiserror::Error, Debug)]
pub enum LibraryError {
    /// The folder (or its metadata) could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The path exists but is not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}
