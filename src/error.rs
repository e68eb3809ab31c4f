use std::path::PathBuf;

use thiserror::Error;

/// Errors at the crate's fallible boundaries: decoding input and reading it.
///
/// Rendering itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode post JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read input from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown style mode {0:?}, expected \"tweet\" or \"article\"")]
    UnknownMode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
