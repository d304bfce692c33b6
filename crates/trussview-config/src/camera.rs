//! Camera projection and scene orientation settings.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Camera projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraType {
    /// Perspective projection.
    #[default]
    Perspective,
    /// Orthographic projection.
    Orthographic,
}

/// Which world axis points up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UpAxis {
    /// +X is up.
    X,
    /// +Y is up.
    Y,
    /// +Z is up.
    #[default]
    Z,
}

impl UpAxis {
    /// The camera's up vector.
    pub fn camera_up(self) -> Vector3<f64> {
        match self {
            UpAxis::X => Vector3::x(),
            UpAxis::Y => Vector3::y(),
            UpAxis::Z => Vector3::z(),
        }
    }

    /// Rotation of the ground plane so that it lies perpendicular to the up
    /// axis. The unrotated plane lies in XY.
    pub fn plane_rotation(self) -> UnitQuaternion<f64> {
        match self {
            UpAxis::X => UnitQuaternion::from_euler_angles(0.0, FRAC_PI_2, 0.0),
            UpAxis::Y => UnitQuaternion::from_euler_angles(FRAC_PI_2, 0.0, 0.0),
            UpAxis::Z => UnitQuaternion::identity(),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            UpAxis::X => "x",
            UpAxis::Y => "y",
            UpAxis::Z => "z",
        }
    }
}

impl FromStr for UpAxis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(UpAxis::X),
            "y" => Ok(UpAxis::Y),
            "z" => Ok(UpAxis::Z),
            other => Err(ConfigError::UnknownAxis(other.to_string())),
        }
    }
}

impl TryFrom<String> for UpAxis {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<UpAxis> for String {
    fn from(axis: UpAxis) -> Self {
        axis.as_str().to_string()
    }
}

impl fmt::Display for UpAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
