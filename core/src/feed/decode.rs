use crate::feed::record::{vehicle_label, VehicleRecord};
use crate::prelude::{RadarError, RadarResult};
use log::warn;
use serde_json::Value;

/// A record that was skipped during decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub index: usize,
    pub reason: String,
}

impl RejectedRecord {
    pub fn to_error(&self) -> RadarError {
        RadarError::MalformedRecord {
            index: self.index,
            reason: self.reason.clone(),
        }
    }
}

/// Records accepted from a payload, in input order, plus the ones skipped.
#[derive(Debug, Clone, Default)]
pub struct FeedBatch {
    pub records: Vec<VehicleRecord>,
    pub rejected: Vec<RejectedRecord>,
}

/// Decodes a JSON array of vehicle records.
///
/// A payload that is not a JSON array fails as a whole; individual elements
/// that do not decode are skipped and reported in [`FeedBatch::rejected`].
/// Records without an `id` are labelled by their position in the payload,
/// so skipped elements do not shift the labels of the ones after them.
pub fn decode_records(bytes: &[u8]) -> RadarResult<FeedBatch> {
    let payload: Value = serde_json::from_slice(bytes)
        .map_err(|err| RadarError::DataFetch(format!("payload is not valid JSON: {err}")))?;
    let elements = match payload {
        Value::Array(elements) => elements,
        other => {
            return Err(RadarError::DataFetch(format!(
                "expected an array of vehicle records, found {}",
                kind_of(&other)
            )))
        }
    };

    let mut batch = FeedBatch::default();
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<VehicleRecord>(element) {
            Ok(mut record) if record.is_finite() => {
                if record.id.is_none() {
                    record.id = Some(vehicle_label(index));
                }
                batch.records.push(record);
            }
            Ok(_) => batch.rejected.push(RejectedRecord {
                index,
                reason: "non-finite value".into(),
            }),
            Err(err) => batch.rejected.push(RejectedRecord {
                index,
                reason: err.to_string(),
            }),
        }
    }

    for rejected in &batch.rejected {
        warn!("skipping {}", rejected.to_error());
    }

    Ok(batch)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
