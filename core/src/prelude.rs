use crate::scene::{PerspectiveCamera, SceneGraph};
use serde::{Deserialize, Serialize};

/// Collision prediction settings shared by the controller and the feeder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollisionConfig {
    pub enabled: bool,
    pub min_separation: f32,
    pub horizon: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_separation: 10.0,
            horizon: 5.0,
        }
    }
}

/// Shared configuration for scene construction and stepping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Per-invocation multiplier applied to speed. Not a time delta.
    pub step: f32,
    pub grid_inner_radius: f32,
    pub grid_outer_radius: f32,
    pub grid_segments: u32,
    pub grid_color: u32,
    pub vehicle_radius: f32,
    pub vehicle_segments: u32,
    pub vehicle_color: u32,
    pub warning_color: u32,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,
    pub camera_elevation_deg: f32,
    pub collision: CollisionConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            grid_inner_radius: 95.0,
            grid_outer_radius: 100.0,
            grid_segments: 64,
            grid_color: 0x00ff00,
            vehicle_radius: 3.0,
            vehicle_segments: 16,
            vehicle_color: 0x00ffff,
            warning_color: 0xff0000,
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 200.0,
            camera_elevation_deg: 60.0,
            collision: CollisionConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> RadarResult<()> {
        if !self.step.is_finite() {
            return Err(RadarError::InvalidConfig("step must be finite".into()));
        }
        if self.grid_inner_radius < 0.0 || self.grid_outer_radius <= self.grid_inner_radius {
            return Err(RadarError::InvalidConfig(format!(
                "grid radii must satisfy 0 <= inner < outer (got {} / {})",
                self.grid_inner_radius, self.grid_outer_radius
            )));
        }
        if self.grid_segments < 3 || self.vehicle_segments < 3 {
            return Err(RadarError::InvalidConfig(
                "geometry needs at least 3 segments".into(),
            ));
        }
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(RadarError::InvalidConfig(format!(
                "field of view {} outside (0, 180)",
                self.fov_deg
            )));
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Err(RadarError::InvalidConfig(format!(
                "clip planes must satisfy 0 < near < far (got {} / {})",
                self.near, self.far
            )));
        }
        if !(0.0..90.0).contains(&self.camera_elevation_deg) {
            return Err(RadarError::InvalidConfig(format!(
                "camera elevation {} outside [0, 90)",
                self.camera_elevation_deg
            )));
        }
        let half_extent = self.camera_distance * (self.fov_deg.to_radians() / 2.0).tan();
        if half_extent < self.grid_outer_radius || self.camera_distance >= self.far {
            return Err(RadarError::InvalidConfig(format!(
                "camera distance {} cannot frame a grid of radius {}",
                self.camera_distance, self.grid_outer_radius
            )));
        }
        Ok(())
    }
}

/// Host-provided render area, read once at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Linear RGB colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }
}

/// Common error type for loading, initialization and surface setup.
#[derive(thiserror::Error, Debug)]
pub enum RadarError {
    #[error("data fetch failed: {0}")]
    DataFetch(String),
    #[error("malformed record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
    #[error("render surface unavailable: {0}")]
    RenderSurfaceUnavailable(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type RadarResult<T> = Result<T, RadarError>;

/// Anything that can draw a (scene, camera) pair on demand.
pub trait RenderSurface {
    /// Binds the surface to a viewport. Called once, before the frame loop.
    fn attach(&mut self, viewport: Viewport) -> RadarResult<()>;
    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera);
}
