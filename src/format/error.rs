//! Error types for floor-plan document operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::ZoneId;

/// Errors that can occur while reading or writing floor-plan documents.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base image could not be probed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Zone geometry outside the normalized image space
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinates {
        /// Description of the coordinate error
        message: String,
    },

    /// Two zones share an id
    #[error("Duplicate zone id: {id}")]
    DuplicateZoneId {
        /// The repeated id
        id: ZoneId,
    },

    /// Version mismatch between expected and found
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Expected version string
        expected: String,
        /// Found version string
        found: String,
    },

    /// The base image is not a local file, so its size cannot be read
    #[error("Image dimensions not available for '{image}'")]
    MissingDimensions {
        /// The image reference
        image: String,
    },

    /// Image file not found at expected path
    #[error("Image not found: {path:?}")]
    ImageNotFound {
        /// Path where the image was expected
        path: PathBuf,
    },
}

impl FormatError {
    /// Create an invalid coordinates error.
    pub fn invalid_coordinates(message: impl Into<String>) -> Self {
        Self::InvalidCoordinates {
            message: message.into(),
        }
    }
}
