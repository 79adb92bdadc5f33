use crate::workflow::config::FeederConfig;
use anyhow::Context;
use radarcore::feed::{VehicleBroadcast, VehicleRecord};
use radarcore::prelude::RenderSurface;
use radarcore::render::Rasterizer;
use radarcore::scene::initialize;
use radarcore::simulation::Controller;
use radarcore::telemetry::MetricsSnapshot;

pub struct RunSummary {
    pub broadcasts: Vec<VehicleBroadcast>,
    pub warnings: Vec<String>,
    pub primitives: usize,
    pub metrics: MetricsSnapshot,
}

/// Drives the frame loop a fixed number of times without a window.
#[derive(Clone)]
pub struct Runner {
    config: FeederConfig,
}

impl Runner {
    pub fn new(config: FeederConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, records: &[VehicleRecord], steps: usize) -> anyhow::Result<RunSummary> {
        let viewport = self.config.viewport();
        let mut surface = Rasterizer::new();
        surface
            .attach(viewport)
            .context("attaching headless rasterizer")?;

        let state = initialize(records, &self.config.scene, viewport)
            .context("initializing scene")?;
        let mut controller = Controller::new(state);
        controller.render(&mut surface);
        for _ in 0..steps {
            controller.tick(&mut surface);
        }

        Ok(RunSummary {
            broadcasts: controller.broadcasts(),
            warnings: controller
                .warnings()
                .iter()
                .map(|warning| warning.to_string())
                .collect(),
            primitives: surface.frame().primitives.len(),
            metrics: controller.metrics().snapshot(),
        })
    }
}
