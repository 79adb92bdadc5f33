pub mod camera;
pub mod entity;
pub mod graph;
pub mod initializer;

pub use camera::PerspectiveCamera;
pub use entity::{RadarGrid, VisualEntity};
pub use graph::{Geometry, Material, Mesh, NodeId, SceneGraph, Transform};
pub use initializer::initialize;
