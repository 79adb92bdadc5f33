use crate::generator::fleet::GeneratorConfig;
use anyhow::Context;
use radarcore::prelude::{SceneConfig, Viewport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeederConfig {
    pub generator: GeneratorConfig,
    pub scene: SceneConfig,
    pub bind_address: SocketAddr,
    /// Viewport used by headless runs.
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for FeederConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            scene: SceneConfig::default(),
            bind_address: SocketAddr::from(([127, 0, 0, 1], 9000)),
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

impl FeederConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading feeder config {}", path_ref.display()))?;
        let config: FeederConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing feeder config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(count: usize, seed: u64, speed_min: f32, speed_max: f32) -> Self {
        Self {
            generator: GeneratorConfig {
                count,
                seed,
                speed_min,
                speed_max,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }
}
