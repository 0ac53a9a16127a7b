//! Simulator errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid value for --{flag}: {value}")]
    InvalidArgument { flag: &'static str, value: String },

    #[error("failed to save snapshot {}: {message}", .path.display())]
    Snapshot { path: PathBuf, message: String },
}
