use radarcore::feed::VehicleRecord;

/// The static snapshot handed to visualizers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotModel {
    pub records: Vec<VehicleRecord>,
}

impl SnapshotModel {
    pub fn new(records: Vec<VehicleRecord>) -> Self {
        Self { records }
    }

    /// Pretty JSON array, the same payload `/data.json` serves.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }
}
