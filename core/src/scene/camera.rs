use crate::math::{MatrixHelper, Vec3};
use crate::prelude::{SceneConfig, Viewport};
use ndarray::Array2;

/// Fixed perspective viewpoint aimed at a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    /// Places the camera `camera_distance` from the origin, raised by
    /// `camera_elevation_deg` above the ground plane, looking at the origin.
    pub fn from_config(config: &SceneConfig, viewport: Viewport) -> Self {
        let elevation = config.camera_elevation_deg.to_radians();
        let position = Vec3::new(
            0.0,
            config.camera_distance * elevation.sin(),
            config.camera_distance * elevation.cos(),
        );
        Self {
            fov_deg: config.fov_deg,
            aspect: viewport.aspect(),
            near: config.near,
            far: config.far,
            position,
            target: Vec3::ZERO,
        }
    }

    pub fn view_matrix(&self) -> Array2<f32> {
        MatrixHelper::look_at(self.position, self.target, Vec3::UP)
    }

    pub fn projection_matrix(&self) -> Array2<f32> {
        MatrixHelper::perspective(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Array2<f32> {
        MatrixHelper::multiply(self.projection_matrix().view(), self.view_matrix().view())
    }

    /// Screen-space pixels per world unit at view depth 1 along the vertical axis.
    pub fn focal_length_px(&self, viewport_height: f32) -> f32 {
        viewport_height / 2.0 / (self.fov_deg.to_radians() / 2.0).tan()
    }
}
