use log::{info, warn};
use radarcore::feed::{decode_records, VehicleRecord};
use radarcore::prelude::{RadarError, RadarResult};

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch_remote(url: &str) -> RadarResult<Vec<u8>> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| RadarError::DataFetch(format!("{url}: {e}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(RadarError::DataFetch(format!("{url} returned {status}")));
    }
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|e| RadarError::DataFetch(format!("{url}: {e}")))
}

/// Loads the vehicle snapshot once. Malformed records are dropped with a
/// warning; anything that prevents reading the payload is an error.
pub async fn load_data(source: String) -> RadarResult<Vec<VehicleRecord>> {
    let bytes = if is_remote(&source) {
        fetch_remote(&source).await?
    } else {
        tokio::fs::read(&source)
            .await
            .map_err(|e| RadarError::DataFetch(format!("reading {source}: {e}")))?
    };

    let batch = decode_records(&bytes)?;
    if !batch.rejected.is_empty() {
        warn!(
            "{} of {} records in {} were malformed",
            batch.rejected.len(),
            batch.rejected.len() + batch.records.len(),
            source
        );
    }
    info!("loaded {} vehicles from {}", batch.records.len(), source);
    Ok(batch.records)
}
