//! A model graph together with the settings used to display it.

use thiserror::Error;
use tracing::info;
use trussview_config::{ConfigError, ViewerConfig};
use trussview_model::{CoordinatePolicy, LoadError, LoadReport, ModelGraph};

use crate::scene::SceneLayout;
use crate::source::{ModelSource, SourceError};

/// Errors returned by [`Viewer`] operations.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Fetching the model description failed; the model is unchanged.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Replacing the model failed part way; see [`LoadError`].
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// An owned model plus its display configuration.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    graph: ModelGraph,
    config: ViewerConfig,
}

impl Viewer {
    /// Create a viewer with an empty model.
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            graph: ModelGraph::new(),
            config,
        }
    }

    /// Create a viewer with an empty model using `policy` for joint positions.
    pub fn with_policy(config: ViewerConfig, policy: CoordinatePolicy) -> Self {
        Self {
            graph: ModelGraph::with_policy(policy),
            config,
        }
    }

    /// The model.
    pub fn graph(&self) -> &ModelGraph {
        &self.graph
    }

    /// Mutable access to the model.
    pub fn graph_mut(&mut self) -> &mut ModelGraph {
        &mut self.graph
    }

    /// The display configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Replace the display configuration after validating it.
    pub fn set_config(&mut self, config: ViewerConfig) -> Result<(), ViewerError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Fetch a description from `source`, then replace the model with it.
    ///
    /// A fetch failure leaves the model untouched. Once the description is
    /// in hand the replacement runs to completion; see
    /// [`ModelGraph::load_model`].
    pub fn reload(&mut self, source: &dyn ModelSource) -> Result<LoadReport, ViewerError> {
        let description = source.fetch()?;
        let report = self.graph.load_model(&description)?;
        info!(
            joints = self.graph.joints().len(),
            frames = self.graph.frames().len(),
            "viewer model replaced"
        );
        Ok(report)
    }

    /// Lay out the current model for rendering.
    pub fn layout(&self) -> SceneLayout {
        SceneLayout::build(&self.graph, &self.config)
    }
}
