use crate::scene::VisualEntity;
use serde::{Deserialize, Serialize};

/// Position report for one vehicle, values rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct VehicleBroadcast {
    pub id: String,
    pub x: f32,
    /// Depth coordinate, i.e. the input `y` axis.
    pub y: f32,
    pub speed: f32,
    /// Degrees, as received.
    pub angle: f32,
}

impl VehicleBroadcast {
    pub fn from_entity(entity: &VisualEntity) -> Self {
        let position = entity.position();
        Self {
            id: entity.label().to_string(),
            x: round2(position.x),
            y: round2(position.z),
            speed: round2(entity.speed()),
            angle: round2(entity.heading_degrees()),
        }
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
