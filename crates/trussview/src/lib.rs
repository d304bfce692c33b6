#![warn(missing_docs)]

//! trussview — viewer core for joint/frame structural models.
//!
//! Re-exports the model graph and the viewer configuration, and adds the
//! two pieces that sit between them and a renderer: fetching a model
//! description ([`source`]) and laying out a scene ([`scene`]).
//!
//! # Example
//!
//! ```rust,no_run
//! use trussview::{FileSource, Viewer, ViewerConfig};
//!
//! let config = ViewerConfig::load("config.json").unwrap();
//! let mut viewer = Viewer::new(config);
//! let report = viewer.reload(&FileSource::new("bridge.json")).unwrap();
//! for (name, skip) in report.skipped_frames() {
//!     eprintln!("{name}: {skip}");
//! }
//! let layout = viewer.layout();
//! println!("{} frames to draw", layout.frames.len());
//! ```

pub mod scene;
pub mod source;
mod viewer;

pub use scene::{CameraSetup, FramePlacement, JointPlacement, PlaneSetup, SceneLayout};
pub use source::{FileSource, JsonSource, ModelSource, SourceError, StaticSource};
pub use viewer::{Viewer, ViewerError};

pub use trussview_config::{CameraType, Color, ConfigError, UpAxis, ViewerConfig};
pub use trussview_model::{
    CoordinatePolicy, Frame, FrameOutcome, FrameSkip, Joint, JointError, LoadError, LoadReport,
    ModelDescription, ModelGraph,
};
