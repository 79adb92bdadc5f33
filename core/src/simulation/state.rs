use crate::prelude::{Rgb, SceneConfig};
use crate::scene::{PerspectiveCamera, RadarGrid, SceneGraph, VisualEntity};

/// Everything the frame loop mutates or reads, owned by one controller.
#[derive(Debug, Clone)]
pub struct SimulationState {
    grid: RadarGrid,
    entities: Vec<VisualEntity>,
    scene: SceneGraph,
    camera: PerspectiveCamera,
    config: SceneConfig,
}

impl SimulationState {
    pub fn new(
        grid: RadarGrid,
        entities: Vec<VisualEntity>,
        scene: SceneGraph,
        camera: PerspectiveCamera,
        config: SceneConfig,
    ) -> Self {
        Self {
            grid,
            entities,
            scene,
            camera,
            config,
        }
    }

    pub fn grid(&self) -> &RadarGrid {
        &self.grid
    }

    pub fn entities(&self) -> &[VisualEntity] {
        &self.entities
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn step_size(&self) -> f32 {
        self.config.step
    }

    /// Moves every entity by one fixed step. No bounds, no removal.
    pub(crate) fn advance(&mut self) {
        let step = self.config.step;
        for entity in &mut self.entities {
            entity.advance(step);
        }
    }

    /// Copies entity positions into their meshes; `warned[i]` repaints entity `i`.
    pub(crate) fn sync_scene(&mut self, warned: &[bool]) {
        let normal = Rgb::from_hex(self.config.vehicle_color);
        let warning = Rgb::from_hex(self.config.warning_color);
        for (idx, entity) in self.entities.iter().enumerate() {
            if let Some(mesh) = self.scene.get_mut(entity.node()) {
                mesh.transform.position = entity.position();
                mesh.material.color = if warned.get(idx).copied().unwrap_or(false) {
                    warning
                } else {
                    normal
                };
            }
        }
    }
}
