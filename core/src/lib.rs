//! Core scene and kinematics library for the V2Sense radar visualizer.
//!
//! Vehicle records are decoded from a static snapshot, turned into scene
//! entities around a radar ring, and advanced frame by frame by a single
//! controller that owns all mutable state.

pub mod feed;
pub mod math;
pub mod prelude;
pub mod render;
pub mod scene;
pub mod simulation;
pub mod telemetry;

pub use prelude::{RadarError, RadarResult, RenderSurface, SceneConfig, Viewport};
