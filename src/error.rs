use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The map source could not be opened or read, so the day cannot start.
    #[error("Could not read map file {path:?}: {source}")]
    MapUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No map files configured")]
    NoMaps,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Replay serialization error: {0}")]
    Replay(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
