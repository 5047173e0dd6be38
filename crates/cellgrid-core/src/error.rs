//! Error types for Cellgrid core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur outside the (infallible) action reducer.
#[derive(Error, Debug)]
pub enum CellgridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Refusing to read {}: file too large ({size} bytes, max {max})", path.display())]
    ConfigTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),
}

pub type Result<T> = std::result::Result<T, CellgridError>;
