//! Error types for the car directory.

use thiserror::Error;

/// The main error type for car directory operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No car with the requested id exists.
    #[error("car {id} not found")]
    CarNotFound {
        /// The id that was looked up.
        id: i64,
    },

    /// Filtering by color produced no cars.
    ///
    /// An unknown color and a known color with no matches look the same.
    #[error("no cars found with color: {color}")]
    ColorNotFound {
        /// The color that was filtered on.
        color: String,
    },

    /// Configuration could not be loaded.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}

/// A specialized Result type for car directory operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error means the requested cars do not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CarNotFound { .. } | Self::ColorNotFound { .. })
    }
}
