//! Pipeline error type.

use thiserror::Error;

use crate::data_url::DataUrlError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors surfaced by [`ImgMan`](crate::ImgMan) operations.
///
/// Every error is terminal for the operation that raised it, and the
/// pipeline's state is left as it was before the call.
#[derive(Debug, Error)]
pub enum ImgManError {
    /// No source was provided, or the original source needed for metadata is gone.
    #[error("Pipeline not initialized: {0}")]
    NotInitialized(&'static str),

    /// The input's format has no registered decoder.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The input was a candidate image but could not be decoded.
    #[error("Image decoding failed: {0}")]
    DecodeFailed(String),

    /// The encoder rejected the image.
    #[error("Image encoding failed: {0}")]
    EncodeFailed(#[from] EncodeError),

    /// A materialization was requested before `output()`.
    #[error("No output format specified, call output() first")]
    OutputNotConfigured,

    /// The caller broke an argument contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading the input file or writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DecodeError> for ImgManError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnsupportedFormat(mime) => ImgManError::UnsupportedFormat(mime),
            other => ImgManError::DecodeFailed(other.to_string()),
        }
    }
}

impl From<DataUrlError> for ImgManError {
    fn from(err: DataUrlError) -> Self {
        ImgManError::DecodeFailed(err.to_string())
    }
}

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ImgManError>;
