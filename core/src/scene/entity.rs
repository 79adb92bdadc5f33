use crate::feed::record::VehicleRecord;
use crate::math::Vec3;
use crate::scene::graph::NodeId;

/// A vehicle in the scene. Heading and speed are fixed at creation; only the
/// position changes, once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualEntity {
    label: String,
    position: Vec3,
    heading_radians: f32,
    heading_degrees: f32,
    speed: f32,
    node: NodeId,
}

impl VisualEntity {
    /// Input `y` becomes the depth axis; the vertical axis stays at zero.
    pub fn from_record(record: &VehicleRecord, label: String, node: NodeId) -> Self {
        Self {
            label,
            position: Vec3::new(record.x, 0.0, record.y),
            heading_radians: record.angle * (std::f32::consts::PI / 180.0),
            heading_degrees: record.angle,
            speed: record.speed,
            node,
        }
    }

    /// Constant-velocity extrapolation along the fixed heading.
    pub fn advance(&mut self, step: f32) {
        let distance = self.speed * step;
        self.position.x += distance * self.heading_radians.cos();
        self.position.z += distance * self.heading_radians.sin();
    }

    /// Velocity on the ground plane as (x, z) units per simulated second.
    pub fn ground_velocity(&self) -> (f32, f32) {
        (
            self.speed * self.heading_radians.cos(),
            self.speed * self.heading_radians.sin(),
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn heading_radians(&self) -> f32 {
        self.heading_radians
    }

    /// Heading as received, kept for reporting.
    pub fn heading_degrees(&self) -> f32 {
        self.heading_degrees
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// The static radar ring. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarGrid {
    inner_radius: f32,
    outer_radius: f32,
    segments: u32,
    node: NodeId,
}

impl RadarGrid {
    pub fn new(inner_radius: f32, outer_radius: f32, segments: u32, node: NodeId) -> Self {
        Self {
            inner_radius,
            outer_radius,
            segments,
            node,
        }
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}
