//! Where model descriptions come from.
//!
//! Fetching is the only step that can wait on the outside world. It completes
//! before any model mutation starts.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use trussview_model::ModelDescription;

/// Errors raised while fetching a model description.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The description file does not exist.
    #[error("404 File Not Found: {}", .0.display())]
    NotFound(PathBuf),

    /// The description could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The description is not a valid model document.
    #[error("invalid model description in {origin}: {source}")]
    Parse {
        /// File name or other label of the document.
        origin: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Something that can produce a model description.
pub trait ModelSource {
    /// Fetch and parse the description.
    fn fetch(&self) -> Result<ModelDescription, SourceError>;
}

/// A description stored in a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelSource for FileSource {
    fn fetch(&self) -> Result<ModelDescription, SourceError> {
        let bytes = std::fs::read(&self.path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => SourceError::NotFound(self.path.clone()),
            _ => SourceError::Io {
                path: self.path.clone(),
                source,
            },
        })?;
        ModelDescription::from_slice(&bytes).map_err(|source| SourceError::Parse {
            origin: self.path.display().to_string(),
            source,
        })
    }
}

/// A description already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub ModelDescription);

impl ModelSource for StaticSource {
    fn fetch(&self) -> Result<ModelDescription, SourceError> {
        Ok(self.0.clone())
    }
}

/// A JSON document held in memory, parsed on every fetch.
#[derive(Debug, Clone)]
pub struct JsonSource {
    label: String,
    json: String,
}

impl JsonSource {
    /// Create a source from a JSON document; `label` names it in errors.
    pub fn new(label: impl Into<String>, json: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            json: json.into(),
        }
    }
}

impl ModelSource for JsonSource {
    fn fetch(&self) -> Result<ModelDescription, SourceError> {
        ModelDescription::from_json(&self.json).map_err(|source| SourceError::Parse {
            origin: self.label.clone(),
            source,
        })
    }
}
