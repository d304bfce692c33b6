//! The model graph: joints, frames, and whole-model replacement.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::description::ModelDescription;
use crate::error::{JointError, LoadError};
use crate::frames::{Frame, FrameOutcome, FrameSet};
use crate::joints::{CoordinatePolicy, Joint, JointRegistry};

/// What a call to [`ModelGraph::load_model`] applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Joints removed in the first step.
    pub joints_removed: usize,
    /// Joints added, in description order.
    pub joints_added: Vec<String>,
    /// Outcome of every frame entry, in description order.
    pub frames: Vec<(String, FrameOutcome)>,
}

impl LoadReport {
    /// Names of the frames that were created.
    pub fn created_frames(&self) -> impl Iterator<Item = &str> {
        self.frames
            .iter()
            .filter(|(_, outcome)| outcome.is_created())
            .map(|(name, _)| name.as_str())
    }

    /// Frame entries that were skipped, with the reason.
    pub fn skipped_frames(&self) -> impl Iterator<Item = (&str, &crate::FrameSkip)> {
        self.frames.iter().filter_map(|(name, outcome)| match outcome {
            FrameOutcome::Skipped(skip) => Some((name.as_str(), skip)),
            FrameOutcome::Created => None,
        })
    }
}

/// An owned joint/frame model.
///
/// All mutation goes through `&mut self`; separate graphs are fully independent.
#[derive(Debug, Clone, Default)]
pub struct ModelGraph {
    joints: JointRegistry,
    frames: FrameSet,
}

impl ModelGraph {
    /// Create an empty graph using [`CoordinatePolicy::Retain`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with an explicit coordinate policy.
    pub fn with_policy(policy: CoordinatePolicy) -> Self {
        Self {
            joints: JointRegistry::with_policy(policy),
            frames: FrameSet::new(),
        }
    }

    /// Register a joint. See [`JointRegistry::add`].
    pub fn add_joint(
        &mut self,
        name: impl Into<String>,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<(), JointError> {
        self.joints.add(name, x, y, z)
    }

    /// Remove a joint. Frames referencing it keep their geometry.
    pub fn remove_joint(&mut self, name: &str) -> Result<Joint, JointError> {
        self.joints.remove(name)
    }

    /// Look up a joint by name.
    pub fn joint(&self, name: &str) -> Option<&Joint> {
        self.joints.resolve(name)
    }

    /// Names of all registered joints.
    pub fn joint_names(&self) -> BTreeSet<String> {
        self.joints.names()
    }

    /// The joint registry.
    pub fn joints(&self) -> &JointRegistry {
        &self.joints
    }

    /// Add a frame between two registered joints.
    pub fn add_frame(&mut self, name: &str, from: &str, to: &str) -> FrameOutcome {
        self.frames.add(&self.joints, name, from, to)
    }

    /// Look up a frame by name.
    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.frames.get(name)
    }

    /// The frame set.
    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    /// Remove every frame.
    pub fn clear_frames(&mut self) {
        self.frames.clear_all();
    }

    /// Frames whose endpoints no longer resolve to the joints they were
    /// derived from (removed, or re-added elsewhere under the same name).
    pub fn dangling_frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(|f| !f.is_attached(&self.joints))
    }

    /// Replace the whole model with `description`.
    ///
    /// Removes every joint, adds the described joints in order, clears all
    /// frames, then adds the described frames. A joint failure stops joint
    /// insertion but frames are still cleared and re-added before the error
    /// is returned. Nothing is rolled back.
    pub fn load_model(&mut self, description: &ModelDescription) -> Result<LoadReport, LoadError> {
        let mut report = LoadReport::default();

        for name in self.joints.names() {
            self.joints.remove(&name).map_err(|source| LoadError::Joint {
                name: name.clone(),
                source,
                report: LoadReport::default(),
            })?;
            report.joints_removed += 1;
        }

        let mut failure = None;
        for (name, spec) in &description.joints {
            match self.joints.add(name.as_str(), spec.x, spec.y, spec.z) {
                Ok(()) => report.joints_added.push(name.clone()),
                Err(source) => {
                    warn!(joint = %name, "aborting joint load: {source}");
                    failure = Some((name.clone(), source));
                    break;
                }
            }
        }

        self.frames.clear_all();

        for (name, spec) in &description.frames {
            let outcome = self.frames.add(&self.joints, name, &spec.from, &spec.to);
            report.frames.push((name.clone(), outcome));
        }

        match failure {
            Some((name, source)) => Err(LoadError::Joint { name, source, report }),
            None => {
                info!(
                    joints = report.joints_added.len(),
                    frames = self.frames.len(),
                    skipped = report.skipped_frames().count(),
                    "model loaded"
                );
                Ok(report)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameSkip;
    use approx::assert_relative_eq;

    fn two_joint_model() -> ModelDescription {
        ModelDescription::new()
            .with_joint("j1", 0.0, 0.0, 0.0)
            .with_joint("j2", 1.0, 0.0, 0.0)
            .with_frame("fr1", "j1", "j2")
    }

    #[test]
    fn test_remove_joint_keeps_frame_geometry() {
        let mut graph = ModelGraph::new();
        graph.add_joint("A", 0.0, 0.0, 0.0).unwrap();
        graph.add_joint("B", 0.0, 3.0, 0.0).unwrap();
        assert!(graph.add_frame("f1", "A", "B").is_created());

        graph.remove_joint("B").unwrap();
        assert!(graph.joint("B").is_none());

        let f = graph.frame("f1").unwrap();
        assert_relative_eq!(f.length, 3.0);
        let dangling: Vec<_> = graph.dangling_frames().map(|f| f.name.as_str()).collect();
        assert_eq!(dangling, ["f1"]);
    }

    #[test]
    fn test_add_frame_after_removal_is_unresolved() {
        let mut graph = ModelGraph::new();
        graph.add_joint("A", 0.0, 0.0, 0.0).unwrap();
        graph.add_joint("B", 0.0, 3.0, 0.0).unwrap();
        graph.remove_joint("B").unwrap();

        let outcome = graph.add_frame("f", "A", "B");
        assert!(matches!(outcome, FrameOutcome::Skipped(FrameSkip::UnresolvedEndpoint { .. })));
    }

    #[test]
    fn test_load_model() {
        let mut graph = ModelGraph::new();
        let report = graph.load_model(&two_joint_model()).unwrap();

        assert_eq!(report.joints_added, ["j1", "j2"]);
        assert_eq!(report.created_frames().collect::<Vec<_>>(), ["fr1"]);
        assert_eq!(graph.joint_names().into_iter().collect::<Vec<_>>(), ["j1", "j2"]);
        assert_eq!(graph.frames().names(), ["fr1"]);
        assert_relative_eq!(graph.frame("fr1").unwrap().length, 1.0);
    }

    #[test]
    fn test_load_empty_model_clears_everything() {
        let mut graph = ModelGraph::new();
        graph.load_model(&two_joint_model()).unwrap();

        let report = graph.load_model(&ModelDescription::new()).unwrap();
        assert_eq!(report.joints_removed, 2);
        assert!(graph.joints().is_empty());
        assert!(graph.frames().is_empty());
    }

    #[test]
    fn test_load_duplicate_name_is_partial() {
        let desc = ModelDescription::new()
            .with_joint("a", 0.0, 0.0, 0.0)
            .with_joint("b", 1.0, 0.0, 0.0)
            .with_joint("a", 2.0, 0.0, 0.0)
            .with_joint("c", 3.0, 0.0, 0.0)
            .with_frame("ab", "a", "b")
            .with_frame("bc", "b", "c");

        let mut graph = ModelGraph::new();
        let err = graph.load_model(&desc).unwrap_err();

        let LoadError::Joint { name, source, report } = &err;
        assert_eq!(name, "a");
        assert_eq!(*source, JointError::DuplicateName("a".into()));
        assert_eq!(report.joints_added, ["a", "b"]);
        assert_eq!(graph.joint_names().into_iter().collect::<Vec<_>>(), ["a", "b"]);

        // Frames were still derived against the partial joint set.
        assert_eq!(graph.frames().names(), ["ab"]);
        assert_eq!(report.skipped_frames().count(), 1);
    }

    #[test]
    fn test_integer_named_joint_loads_first() {
        let desc = ModelDescription::from_json(
            r#"{ "joints": {
                "b": { "x": 0, "y": 0, "z": 0 },
                "1": { "x": 0, "y": 0, "z": 0 }
            } }"#,
        )
        .unwrap();

        let mut graph = ModelGraph::new();
        let err = graph.load_model(&desc).unwrap_err();

        let LoadError::Joint { name, source, report } = &err;
        assert_eq!(name, "b");
        assert!(matches!(source, JointError::DuplicatePosition { .. }));
        assert_eq!(report.joints_added, ["1"]);
        assert_eq!(graph.joint_names().into_iter().collect::<Vec<_>>(), ["1"]);
    }

    #[test]
    fn test_failed_load_still_clears_old_frames() {
        let mut graph = ModelGraph::new();
        graph.load_model(&two_joint_model()).unwrap();

        let bad = ModelDescription::new()
            .with_joint("p", 5.0, 5.0, 5.0)
            .with_joint("q", 5.0, 5.0, 5.0);
        let err = graph.load_model(&bad).unwrap_err();

        assert!(matches!(err.report().joints_added.as_slice(), [p] if p == "p"));
        assert!(graph.frames().is_empty());
        assert_eq!(graph.joints().len(), 1);
    }

    #[test]
    fn test_reload_same_model_under_retain_policy() {
        let mut graph = ModelGraph::new();
        graph.load_model(&two_joint_model()).unwrap();

        let err = graph.load_model(&two_joint_model()).unwrap_err();
        let LoadError::Joint { source, .. } = err;
        assert!(matches!(source, JointError::DuplicatePosition { .. }));
        assert!(graph.joints().is_empty());
    }

    #[test]
    fn test_reload_same_model_under_reclaim_policy() {
        let mut graph = ModelGraph::with_policy(CoordinatePolicy::Reclaim);
        graph.load_model(&two_joint_model()).unwrap();
        graph.load_model(&two_joint_model()).unwrap();

        assert_eq!(graph.joints().len(), 2);
        assert_eq!(graph.frames().len(), 1);
    }

    #[test]
    fn test_independent_graphs() {
        let mut a = ModelGraph::new();
        let b = ModelGraph::new();
        a.add_joint("x", 0.0, 0.0, 0.0).unwrap();
        assert!(b.joint("x").is_none());
    }
}
