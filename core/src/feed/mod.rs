pub mod broadcast;
pub mod decode;
pub mod record;

pub use broadcast::VehicleBroadcast;
pub use decode::{decode_records, FeedBatch, RejectedRecord};
pub use record::{vehicle_label, VehicleRecord};
