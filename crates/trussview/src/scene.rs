//! Scene layout: everything a renderer needs to draw a model.
//!
//! Joints are drawn as unit spheres and frames as unit cylinders (radius 1,
//! height 1, standing on +Y around the origin). Placements carry the
//! transform for each mesh, so the renderer never touches model geometry.

use nalgebra::{Isometry3, Matrix4, Translation3, UnitQuaternion, Vector3};
use serde::Serialize;
use trussview_config::{CameraType, Color, ViewerConfig};
use trussview_model::{Frame, Joint, ModelGraph, Point3};

/// Placement of one joint sphere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JointPlacement {
    /// Joint name.
    pub name: String,
    /// Sphere center.
    pub position: Point3,
    /// Uniform sphere scale.
    pub scale: f64,
}

impl JointPlacement {
    fn new(joint: &Joint, config: &ViewerConfig) -> Self {
        Self {
            name: joint.name.clone(),
            position: joint.position,
            scale: config.joint_size,
        }
    }

    /// Model matrix for the unit sphere.
    pub fn model_matrix(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.position.coords) * Matrix4::new_scaling(self.scale)
    }
}

/// Placement of one frame cylinder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FramePlacement {
    /// Frame name.
    pub name: String,
    /// Start joint name.
    pub from: String,
    /// End joint name.
    pub to: String,
    /// Cylinder center.
    pub anchor: Point3,
    /// Rotation taking +Y onto the frame direction.
    pub orientation: UnitQuaternion<f64>,
    /// Frame length.
    pub length: f64,
    /// Per-axis cylinder scale: radius on X/Z, length on Y.
    pub scale: Vector3<f64>,
}

impl FramePlacement {
    fn new(frame: &Frame, config: &ViewerConfig) -> Self {
        Self {
            name: frame.name.clone(),
            from: frame.from.clone(),
            to: frame.to.clone(),
            anchor: frame.anchor,
            orientation: frame.orientation,
            length: frame.length,
            scale: Vector3::new(config.frame_size, frame.length, config.frame_size),
        }
    }

    /// Model matrix for the unit cylinder.
    pub fn model_matrix(&self) -> Matrix4<f64> {
        let pose = Isometry3::from_parts(Translation3::from(self.anchor.coords), self.orientation);
        pose.to_homogeneous() * Matrix4::new_nonuniform_scaling(&self.scale)
    }
}

/// Camera placement and projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraSetup {
    /// Projection.
    pub kind: CameraType,
    /// Eye position.
    pub position: Point3,
    /// Look-at target.
    pub target: Point3,
    /// Up vector.
    pub up: Vector3<f64>,
    /// Vertical field of view in degrees (perspective only).
    pub fov: Option<f64>,
    /// Near clipping plane.
    pub near: f64,
    /// Far clipping plane.
    pub far: f64,
}

impl CameraSetup {
    fn new(config: &ViewerConfig) -> Self {
        let (fov, near, far) = match config.camera_type {
            CameraType::Perspective => (
                Some(config.perspective_camera_fov),
                config.perspective_camera_near,
                config.perspective_camera_far,
            ),
            CameraType::Orthographic => (
                None,
                config.orthographic_camera_near,
                config.orthographic_camera_far,
            ),
        };
        Self {
            kind: config.camera_type,
            position: config.camera_position(),
            target: Point3::origin(),
            up: config.axis_upwards.camera_up(),
            fov,
            near,
            far,
        }
    }
}

/// Ground plane and grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaneSetup {
    /// Full side length of the square plane.
    pub extent: f64,
    /// Distance between grid lines.
    pub grid_spacing: f64,
    /// Rotation of the plane (unrotated plane lies in XY).
    pub rotation: UnitQuaternion<f64>,
    /// Fill color.
    pub color: Color,
    /// Grid center line color.
    pub center_line_color: Color,
    /// Grid line color.
    pub grid_color: Color,
    /// Fill opacity; 1.0 when transparency is off.
    pub opacity: f64,
}

impl PlaneSetup {
    fn new(config: &ViewerConfig) -> Self {
        Self {
            extent: 2.0 * config.plane_size,
            grid_spacing: config.grid_spacing(),
            rotation: config.axis_upwards.plane_rotation(),
            color: config.plane_color,
            center_line_color: config.plane_color_center_line,
            grid_color: config.plane_color_grid,
            opacity: if config.plane_transparent { config.plane_opacity } else { 1.0 },
        }
    }
}

/// Everything to draw for one model under one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneLayout {
    /// Camera.
    pub camera: CameraSetup,
    /// Ground plane.
    pub plane: PlaneSetup,
    /// Joint color.
    pub joint_color: Color,
    /// Frame color.
    pub frame_color: Color,
    /// Joint placements, in insertion order.
    pub joints: Vec<JointPlacement>,
    /// Frame placements, in creation order. Includes dangling frames.
    pub frames: Vec<FramePlacement>,
    /// Names of frames whose endpoints no longer match live joints.
    pub dangling: Vec<String>,
}

impl SceneLayout {
    /// Lay out `graph` using the visual settings in `config`.
    pub fn build(graph: &ModelGraph, config: &ViewerConfig) -> Self {
        Self {
            camera: CameraSetup::new(config),
            plane: PlaneSetup::new(config),
            joint_color: config.joint_color,
            frame_color: config.frame_color,
            joints: graph.joints().iter().map(|j| JointPlacement::new(j, config)).collect(),
            frames: graph.frames().iter().map(|f| FramePlacement::new(f, config)).collect(),
            dangling: graph.dangling_frames().map(|f| f.name.clone()).collect(),
        }
    }
}
