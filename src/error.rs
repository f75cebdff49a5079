//! Custom error types for gridplot.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the gridplot library.
#[derive(Error, Debug)]
pub enum Error {
    /// Reshape factors do not multiply to the row length.
    #[error("shape mismatch: {d1} x {d2} != {d}")]
    ShapeMismatch { d1: usize, d2: usize, d: usize },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Image dimensions are not supported.
    #[error("unsupported image dimensions {width}x{height}: {reason}")]
    UnsupportedDimensions {
        width: usize,
        height: usize,
        reason: String,
    },

    /// Failed to create the output directory.
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to save an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to read a `.npy` matrix.
    #[error("failed to read npy matrix from {path}: {source}")]
    Npy {
        path: PathBuf,
        #[source]
        source: ndarray_npy::ReadNpyError,
    },

    /// Failed to read a delimited text matrix.
    #[error("failed to read delimited matrix from {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A field of a delimited matrix is not a number.
    #[error("{path}:{line}:{column}: not a number: {value:?}")]
    ParseValue {
        path: PathBuf,
        line: usize,
        column: usize,
        value: String,
    },

    /// A row of a delimited matrix has a different length than the first row.
    #[error("{path}:{line}: expected {expected} columns, found {actual}")]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for gridplot operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_reports_all_dimensions() {
        let err = Error::ShapeMismatch { d1: 2, d2: 4, d: 6 };
        assert_eq!(err.to_string(), "shape mismatch: 2 x 4 != 6");
    }
}
