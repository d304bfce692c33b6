//! Frame derivation: named struts between two joints.
//!
//! A frame stores its endpoint joints by name and the geometry computed from
//! their positions at creation time. The geometry is never recomputed.

use std::f64::consts::PI;

use nalgebra::{Unit, UnitQuaternion};
use tracing::{debug, warn};

use crate::error::FrameSkip;
use crate::joints::{Joint, JointRegistry};
use crate::{Dir3, Point3, Vec3};

/// Canonical axis of a frame mesh (a cylinder standing along +Y).
pub fn reference_axis() -> Dir3 {
    Vec3::y_axis()
}

/// A named connector between two joints.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Name, unique among frames.
    pub name: String,
    /// Name of the start joint.
    pub from: String,
    /// Name of the end joint.
    pub to: String,
    /// Start joint position when the frame was created.
    pub start: Point3,
    /// End joint position when the frame was created.
    pub end: Point3,
    /// Distance between the endpoints.
    pub length: f64,
    /// Unit vector from start to end.
    pub direction: Dir3,
    /// Rotation taking [`reference_axis`] onto `direction`.
    pub orientation: UnitQuaternion<f64>,
    /// Midpoint of the endpoints; where the frame mesh is placed.
    pub anchor: Point3,
}

impl Frame {
    /// Derive a frame from two resolved joints.
    ///
    /// The displacement is scaled by its largest component before taking the
    /// norm, so very large or very small spans keep an exact unit direction.
    pub fn derive(name: &str, from: &Joint, to: &Joint) -> Result<Self, FrameSkip> {
        let displacement = to.position - from.position;
        if displacement == Vec3::zeros() {
            return Err(FrameSkip::DegenerateFrame {
                frame: name.to_string(),
                from: from.name.clone(),
                to: to.name.clone(),
            });
        }
        let overflow = || FrameSkip::SpanOverflow {
            frame: name.to_string(),
            from: from.name.clone(),
            to: to.name.clone(),
        };

        let scale = displacement.amax();
        if !scale.is_finite() {
            return Err(overflow());
        }
        let scaled = displacement / scale;
        let length = scaled.norm() * scale;
        if !length.is_finite() {
            return Err(overflow());
        }
        let direction = Unit::new_normalize(scaled);

        Ok(Self {
            name: name.to_string(),
            from: from.name.clone(),
            to: to.name.clone(),
            start: from.position,
            end: to.position,
            length,
            direction,
            orientation: orientation_from_axis(&direction),
            anchor: from.position + displacement * 0.5,
        })
    }

    /// Whether both endpoints still resolve to joints at the positions this
    /// frame was derived from.
    pub fn is_attached(&self, joints: &JointRegistry) -> bool {
        let matches = |name: &str, pos: &Point3| {
            joints.resolve(name).is_some_and(|j| j.position == *pos)
        };
        matches(&self.from, &self.start) && matches(&self.to, &self.end)
    }
}

/// Shortest rotation from [`reference_axis`] onto `dir`.
///
/// Anti-parallel directions have no unique shortest rotation; a half-turn
/// about +X is used.
fn orientation_from_axis(dir: &Dir3) -> UnitQuaternion<f64> {
    UnitQuaternion::rotation_between_axis(&reference_axis(), dir)
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vec3::x_axis(), PI))
}

/// Result of an attempt to add a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was created.
    Created,
    /// The frame was not created; the model is unchanged.
    Skipped(FrameSkip),
}

impl FrameOutcome {
    /// Whether the frame was created.
    pub fn is_created(&self) -> bool {
        matches!(self, FrameOutcome::Created)
    }

    /// Turn a skip into an error.
    pub fn into_result(self) -> Result<(), FrameSkip> {
        match self {
            FrameOutcome::Created => Ok(()),
            FrameOutcome::Skipped(skip) => Err(skip),
        }
    }
}

/// Ordered collection of frames with unique names.
#[derive(Debug, Clone, Default)]
pub struct FrameSet {
    frames: Vec<Frame>,
}

impl FrameSet {
    /// Create an empty frame set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame between `from` and `to`, resolving both through `joints`.
    ///
    /// Conflicts never mutate the set and are reported as
    /// [`FrameOutcome::Skipped`].
    pub fn add(
        &mut self,
        joints: &JointRegistry,
        name: &str,
        from: &str,
        to: &str,
    ) -> FrameOutcome {
        match self.try_add(joints, name, from, to) {
            Ok(()) => {
                debug!(frame = %name, from, to, "added frame");
                FrameOutcome::Created
            }
            Err(skip) => {
                warn!("skipping frame: {skip}");
                FrameOutcome::Skipped(skip)
            }
        }
    }

    fn try_add(
        &mut self,
        joints: &JointRegistry,
        name: &str,
        from: &str,
        to: &str,
    ) -> Result<(), FrameSkip> {
        if self.contains(name) {
            return Err(FrameSkip::DuplicateName(name.to_string()));
        }
        let unresolved = |endpoint: &str| FrameSkip::UnresolvedEndpoint {
            frame: name.to_string(),
            endpoint: endpoint.to_string(),
        };
        let start = joints.resolve(from).ok_or_else(|| unresolved(from))?;
        let end = joints.resolve(to).ok_or_else(|| unresolved(to))?;

        self.frames.push(Frame::derive(name, start, end)?);
        Ok(())
    }

    /// Remove every frame.
    pub fn clear_all(&mut self) {
        self.frames.clear();
    }

    /// Look up a frame by name.
    pub fn get(&self, name: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.name == name)
    }

    /// Whether a frame with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate frames in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Frame names in creation order.
    pub fn names(&self) -> Vec<&str> {
        self.frames.iter().map(|f| f.name.as_str()).collect()
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl<'a> IntoIterator for &'a FrameSet {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
