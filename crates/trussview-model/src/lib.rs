#![warn(missing_docs)]

//! Joint/frame model graph for trussview.
//!
//! A model is a set of named joints (points with unique names and unique
//! positions) and named frames (struts between two joints, referenced by
//! name). Frame geometry is derived once, when the frame is created.
//!
//! # Example
//!
//! ```
//! use trussview_model::{ModelDescription, ModelGraph};
//!
//! let desc = ModelDescription::new()
//!     .with_joint("A", 0.0, 0.0, 0.0)
//!     .with_joint("B", 0.0, 3.0, 0.0)
//!     .with_frame("f1", "A", "B");
//!
//! let mut graph = ModelGraph::new();
//! graph.load_model(&desc).unwrap();
//! assert_eq!(graph.frame("f1").unwrap().length, 3.0);
//! ```

mod description;
mod error;
mod frames;
mod graph;
mod joints;

pub use description::{FrameSpec, JointSpec, ModelDescription};
pub use error::{FrameSkip, JointError, LoadError};
pub use frames::{reference_axis, Frame, FrameOutcome, FrameSet};
pub use graph::{LoadReport, ModelGraph};
pub use joints::{CoordinatePolicy, Joint, JointRegistry};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = nalgebra::Unit<nalgebra::Vector3<f64>>;
