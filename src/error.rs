use std::path::PathBuf;
use thiserror::Error;

use crate::idx::RecordKind;

/// The main error type for mnistidx operations.
#[derive(Debug, Error)]
pub enum MnistIdxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid magic number for {kind} file: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagicNumber {
        kind: RecordKind,
        expected: i32,
        found: i32,
    },

    #[error("Image file and label file don't contain the same number of items ({images} images, {labels} labels)")]
    CountMismatch { images: usize, labels: usize },

    #[error("Failed to write image to {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid sample parameters: {message}")]
    InvalidSampleParams { message: String },
}

impl MnistIdxError {
    /// Returns true if this is a magic-number mismatch rather than an I/O failure.
    pub fn is_invalid_magic(&self) -> bool {
        matches!(self, MnistIdxError::InvalidMagicNumber { .. })
    }
}
