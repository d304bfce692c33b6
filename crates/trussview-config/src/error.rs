//! Error types for viewer configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// JSON syntax or shape error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML syntax or shape error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The selected preset is not in the `remembered` table.
    #[error("preset '{0}' not found")]
    MissingPreset(String),

    /// A numeric setting is outside the range the control panel allows.
    #[error("{field} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Setting name.
        field: &'static str,
        /// Offending value.
        value: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    /// A near/far clipping pair is not strictly increasing.
    #[error("{camera} camera near plane ({near}) must be closer than far plane ({far})")]
    ClippingPlanes {
        /// Which camera the planes belong to.
        camera: &'static str,
        /// Near plane distance.
        near: f64,
        /// Far plane distance.
        far: f64,
    },

    /// The upwards axis is not one of `x`, `y`, `z`.
    #[error("'{0}' axis does not exist")]
    UnknownAxis(String),

    /// A color is not a `#rrggbb` string.
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
}
