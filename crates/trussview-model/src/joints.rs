//! Joint registry: named points with unique names and unique positions.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::error::JointError;
use crate::Point3;

/// What happens to a joint's coordinate when the joint is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatePolicy {
    /// Coordinates are never freed. A position used once stays claimed for the
    /// lifetime of the registry, even after its joint is removed.
    #[default]
    Retain,
    /// Removing a joint releases its coordinate for reuse.
    Reclaim,
}

/// A named point in 3D space.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    /// Unique name.
    pub name: String,
    /// Position, fixed at creation.
    pub position: Point3,
}

impl Joint {
    fn new(name: String, x: f64, y: f64, z: f64) -> Self {
        Self {
            name,
            position: Point3::new(x, y, z),
        }
    }
}

/// Owns the set of joints and the uniqueness bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct JointRegistry {
    joints: HashMap<String, Joint>,
    /// Insertion order of live joints.
    order: Vec<String>,
    /// Every coordinate claimed so far (pruned only under `Reclaim`).
    used_positions: Vec<Point3>,
    policy: CoordinatePolicy,
}

impl JointRegistry {
    /// Create an empty registry with the default (`Retain`) policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with an explicit coordinate policy.
    pub fn with_policy(policy: CoordinatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The coordinate policy in effect.
    pub fn policy(&self) -> CoordinatePolicy {
        self.policy
    }

    /// Register a joint.
    ///
    /// Fails without mutating the registry if the name is taken, the exact
    /// coordinate triple has been claimed, or a coordinate is not finite.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<(), JointError> {
        let name = name.into();
        if self.joints.contains_key(&name) {
            return Err(JointError::DuplicateName(name));
        }

        let position = Point3::new(x, y, z);
        if self.is_position_used(&position) {
            return Err(JointError::DuplicatePosition { x, y, z });
        }
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(JointError::NonFinite { name });
        }

        debug!(joint = %name, x, y, z, "adding joint");
        self.used_positions.push(position);
        self.order.push(name.clone());
        self.joints.insert(name.clone(), Joint::new(name, x, y, z));
        Ok(())
    }

    /// Remove a joint by name and return it.
    ///
    /// Frames referencing the joint are left untouched.
    pub fn remove(&mut self, name: &str) -> Result<Joint, JointError> {
        let joint = self
            .joints
            .remove(name)
            .ok_or_else(|| JointError::NotFound(name.to_string()))?;
        self.order.retain(|n| n != name);

        if self.policy == CoordinatePolicy::Reclaim {
            if let Some(idx) = self.used_positions.iter().position(|p| *p == joint.position) {
                self.used_positions.swap_remove(idx);
            }
        }

        debug!(joint = %name, "removed joint");
        Ok(joint)
    }

    /// Look up a joint by name.
    pub fn resolve(&self, name: &str) -> Option<&Joint> {
        self.joints.get(name)
    }

    /// Whether a joint with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.joints.contains_key(name)
    }

    /// Names of all registered joints.
    pub fn names(&self) -> BTreeSet<String> {
        self.joints.keys().cloned().collect()
    }

    /// Iterate joints in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Joint> {
        self.order.iter().filter_map(|name| self.joints.get(name))
    }

    /// Number of registered joints.
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Whether the registry has no joints.
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Whether `position` has been claimed (exact component equality).
    pub fn is_position_used(&self, position: &Point3) -> bool {
        self.used_positions.iter().any(|p| p == position)
    }
}
