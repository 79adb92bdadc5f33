use serde::{Deserialize, Serialize};

/// One vehicle as delivered by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// Heading in degrees.
    pub angle: f32,
}

impl VehicleRecord {
    pub fn new(x: f32, y: f32, speed: f32, angle: f32) -> Self {
        Self {
            id: None,
            x,
            y,
            speed,
            angle,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.speed, self.angle]
            .iter()
            .all(|value| value.is_finite())
    }
}

/// Spreadsheet-style label for the vehicle at `index`: A..Z, AA, AB, ...
pub fn vehicle_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}
