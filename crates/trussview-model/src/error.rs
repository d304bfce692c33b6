//! Error types for the model graph.

use thiserror::Error;

use crate::graph::LoadReport;

/// Errors raised by the joint registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JointError {
    /// A joint with this name is already registered.
    #[error("joint's name '{0}' already exist")]
    DuplicateName(String),

    /// The coordinate triple has already been claimed by a joint.
    ///
    /// Under [`CoordinatePolicy::Retain`](crate::CoordinatePolicy::Retain) this
    /// includes joints that have since been removed.
    #[error("joint's coordinate [{x}, {y}, {z}] already exist")]
    DuplicatePosition {
        /// X component.
        x: f64,
        /// Y component.
        y: f64,
        /// Z component.
        z: f64,
    },

    /// One of the coordinates is NaN or infinite.
    #[error("joint '{name}' has a non-finite coordinate")]
    NonFinite {
        /// Name of the rejected joint.
        name: String,
    },

    /// No joint with this name is registered.
    #[error("joint {0} does not exist")]
    NotFound(String),
}

/// Reasons a frame was not created.
///
/// Frame derivation never fails hard; these are reported through
/// [`FrameOutcome::Skipped`](crate::FrameOutcome::Skipped) so callers can
/// inspect them or escalate with
/// [`FrameOutcome::into_result`](crate::FrameOutcome::into_result).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameSkip {
    /// A frame with this name already exists.
    #[error("frame '{0}' already exists")]
    DuplicateName(String),

    /// An endpoint name does not resolve to a live joint.
    #[error("frame '{frame}': endpoint joint '{endpoint}' does not exist")]
    UnresolvedEndpoint {
        /// Frame being created.
        frame: String,
        /// The endpoint name that failed to resolve.
        endpoint: String,
    },

    /// Both endpoints sit at the same position.
    #[error("frame '{frame}' is degenerate: '{from}' and '{to}' coincide")]
    DegenerateFrame {
        /// Frame being created.
        frame: String,
        /// Start joint name.
        from: String,
        /// End joint name.
        to: String,
    },

    /// The distance between the endpoints is not representable as a finite
    /// `f64`.
    #[error("frame '{frame}' between '{from}' and '{to}' is too long to represent")]
    SpanOverflow {
        /// Frame being created.
        frame: String,
        /// Start joint name.
        from: String,
        /// End joint name.
        to: String,
    },
}

/// Errors raised while replacing the whole model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// Repopulating joints failed; the remaining joints were not added.
    ///
    /// Frames were still cleared and re-derived. `report` describes the
    /// partially applied state; nothing is rolled back.
    #[error("failed to load joint '{name}': {source}")]
    Joint {
        /// Name of the joint entry that failed.
        name: String,
        /// Underlying registry error.
        #[source]
        source: JointError,
        /// What was applied before and after the failure.
        report: LoadReport,
    },
}

impl LoadError {
    /// The partial load report attached to this error.
    pub fn report(&self) -> &LoadReport {
        match self {
            LoadError::Joint { report, .. } => report,
        }
    }
}
