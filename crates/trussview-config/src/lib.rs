#![warn(missing_docs)]

//! Viewer configuration for trussview.
//!
//! The viewer ships its settings as a control-panel preset file:
//!
//! ```json
//! {
//!   "preset": "Default",
//!   "remembered": { "Default": { "0": { "jointSize": 0.1, "axisUpwards": "z" } } }
//! }
//! ```
//!
//! A flat TOML table with the same keys is accepted as well. Every setting
//! has a default, so partial files are fine.

use std::collections::HashMap;
use std::path::Path;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::debug;

mod camera;
mod color;
mod error;

pub use camera::{CameraType, UpAxis};
pub use color::Color;
pub use error::ConfigError;

/// Preset used when a preset file does not name one.
pub const DEFAULT_PRESET: &str = "Default";

/// All visual settings of the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Background gradient, top color.
    pub top_background_color: Color,
    /// Background gradient, bottom color.
    pub bottom_background_color: Color,

    /// Projection used by the camera.
    pub camera_type: CameraType,
    /// Vertical field of view in degrees.
    #[serde(rename = "perspectiveCameraFOV")]
    pub perspective_camera_fov: f64,
    /// Perspective near clipping plane.
    pub perspective_camera_near: f64,
    /// Perspective far clipping plane.
    pub perspective_camera_far: f64,
    /// Orthographic near clipping plane.
    pub orthographic_camera_near: f64,
    /// Orthographic far clipping plane.
    pub orthographic_camera_far: f64,
    /// Camera position, X.
    #[serde(rename = "cameraPosition_x")]
    pub camera_position_x: f64,
    /// Camera position, Y.
    #[serde(rename = "cameraPosition_y")]
    pub camera_position_y: f64,
    /// Camera position, Z.
    #[serde(rename = "cameraPosition_z")]
    pub camera_position_z: f64,
    /// Which axis points up.
    pub axis_upwards: UpAxis,

    /// Orbit controls rotation speed.
    pub rotate_speed: f64,
    /// Orbit controls zoom speed.
    pub zoom_speed: f64,
    /// Orbit controls pan speed.
    pub pan_speed: f64,
    /// Disable damping on the orbit controls.
    pub static_moving: bool,

    /// Half extent of the ground plane.
    pub plane_size: f64,
    /// Number of grid divisions across the plane.
    pub plane_divisions: u32,
    /// Ground plane fill color.
    pub plane_color: Color,
    /// Grid center line color.
    pub plane_color_center_line: Color,
    /// Grid line color.
    pub plane_color_grid: Color,
    /// Whether the ground plane is drawn transparent.
    pub plane_transparent: bool,
    /// Ground plane opacity.
    pub plane_opacity: f64,

    /// Joint sphere radius.
    pub joint_size: f64,
    /// Joint color.
    pub joint_color: Color,
    /// Frame cylinder radius.
    pub frame_size: f64,
    /// Frame color.
    pub frame_color: Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            top_background_color: Color::rgb(0xff, 0xff, 0xff),
            bottom_background_color: Color::rgb(0xb0, 0xc4, 0xde),
            camera_type: CameraType::Perspective,
            perspective_camera_fov: 45.0,
            perspective_camera_near: 0.1,
            perspective_camera_far: 1000.0,
            orthographic_camera_near: 0.1,
            orthographic_camera_far: 1000.0,
            camera_position_x: 4.0,
            camera_position_y: -12.0,
            camera_position_z: 6.0,
            axis_upwards: UpAxis::Z,
            rotate_speed: 1.0,
            zoom_speed: 1.2,
            pan_speed: 0.3,
            static_moving: true,
            plane_size: 20.0,
            plane_divisions: 20,
            plane_color: Color::rgb(0xdd, 0xdd, 0xdd),
            plane_color_center_line: Color::rgb(0x44, 0x44, 0x44),
            plane_color_grid: Color::rgb(0x88, 0x88, 0x88),
            plane_transparent: true,
            plane_opacity: 0.5,
            joint_size: 0.1,
            joint_color: Color::rgb(0xff, 0x00, 0x00),
            frame_size: 0.05,
            frame_color: Color::rgb(0x00, 0x00, 0xff),
        }
    }
}

/// Control-panel preset file.
#[derive(Deserialize)]
struct PresetFile {
    #[serde(default)]
    preset: Option<String>,
    #[serde(default)]
    remembered: HashMap<String, HashMap<String, serde_json::Value>>,
}

impl ViewerConfig {
    /// Read the active preset from a control-panel preset file.
    pub fn from_preset_json(json: &str) -> Result<Self, ConfigError> {
        let file: PresetFile = serde_json::from_str(json)?;
        let name = file.preset.unwrap_or_else(|| DEFAULT_PRESET.to_string());
        let value = file
            .remembered
            .get(&name)
            .and_then(|slots| slots.get("0"))
            .ok_or_else(|| ConfigError::MissingPreset(name.clone()))?;

        debug!(preset = %name, "selected configuration preset");
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Read a flat TOML table of settings.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load and validate a configuration file; `.toml` files are read as TOML,
    /// anything else as a JSON preset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&text)?,
            _ => Self::from_preset_json(&text)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every setting against the range the control panel allows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("jointSize", self.joint_size, 0.01, 1.0)?;
        check_range("frameSize", self.frame_size, 0.01, 1.0)?;
        check_range("rotateSpeed", self.rotate_speed, 0.1, 10.0)?;
        check_range("zoomSpeed", self.zoom_speed, 0.12, 12.0)?;
        check_range("panSpeed", self.pan_speed, 0.03, 3.0)?;
        check_range("planeSize", self.plane_size, 1.0, 100.0)?;
        check_range("planeOpacity", self.plane_opacity, 0.0, 1.0)?;
        check_range("planeDivisions", self.plane_divisions as f64, 1.0, f64::MAX)?;
        check_range("perspectiveCameraFOV", self.perspective_camera_fov, 45.0, 90.0)?;
        check_clipping(
            "perspective",
            self.perspective_camera_near,
            self.perspective_camera_far,
        )?;
        check_clipping(
            "orthographic",
            self.orthographic_camera_near,
            self.orthographic_camera_far,
        )?;
        Ok(())
    }

    /// Camera position as a point.
    pub fn camera_position(&self) -> Point3<f64> {
        Point3::new(self.camera_position_x, self.camera_position_y, self.camera_position_z)
    }

    /// Distance between grid lines on the ground plane.
    pub fn grid_spacing(&self) -> f64 {
        2.0 * self.plane_size / self.plane_divisions.max(1) as f64
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

fn check_clipping(camera: &'static str, near: f64, far: f64) -> Result<(), ConfigError> {
    if near < far {
        Ok(())
    } else {
        Err(ConfigError::ClippingPlanes { camera, near, far })
    }
}
