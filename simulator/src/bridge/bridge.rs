use crate::bridge::model::SnapshotModel;
use anyhow::Result;
use log::{error, info};
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::Filter;

type SharedSnapshot = Arc<RwLock<SnapshotModel>>;

fn routes(
    state: SharedSnapshot,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());
    warp::path("data.json")
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter)
        .map(|state: SharedSnapshot| match state.read() {
            Ok(guard) => warp::reply::json(&guard.records),
            Err(_) => warp::reply::json(&Vec::<serde_json::Value>::new()),
        })
}

/// Bridge that hosts the snapshot HTTP endpoint.
pub struct DataBridge {
    state: SharedSnapshot,
}

impl DataBridge {
    pub fn new(model: SnapshotModel) -> Self {
        Self {
            state: Arc::new(RwLock::new(model)),
        }
    }

    /// Serves `GET /data.json` on a background thread with its own runtime.
    pub fn serve(&self, address: SocketAddr) {
        let routes = routes(self.state.clone());
        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            info!("serving snapshot on http://{}/data.json", address);
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        });
    }

    pub fn publish(&self, model: SnapshotModel) -> Result<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| anyhow::anyhow!("snapshot lock poisoned"))?;
        *guard = model;
        info!("published snapshot with {} vehicles", guard.records.len());
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        info!("[bridge] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> SnapshotModel {
        self.state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
