use anyhow::Context;
use radarcore::prelude::{SceneConfig, Viewport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Share of the window height given to the radar surface.
const SURFACE_HEIGHT_RATIO: f32 = 0.9;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// File path or http(s) URL of the vehicle snapshot.
    pub source: String,
    pub window_width: f32,
    pub window_height: f32,
    pub scene: SceneConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source: "data.json".into(),
            window_width: 1024.0,
            window_height: 768.0,
            scene: SceneConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading viewer config {}", path_ref.display()))?;
        let config: ViewerConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing viewer config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Config file if given, defaults otherwise; `source` overrides either.
    pub fn resolve(path: Option<&Path>, source: Option<String>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(source) = source {
            config.source = source;
        }
        Ok(config)
    }

    /// Render surface dimensions, read once when the scene is built.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.window_width,
            self.window_height * SURFACE_HEIGHT_RATIO,
        )
    }
}
