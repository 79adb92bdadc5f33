use crate::feed::broadcast::VehicleBroadcast;
use crate::prelude::RenderSurface;
use crate::simulation::collision::{scan, CollisionWarning};
use crate::simulation::state::SimulationState;
use crate::telemetry::{FrameMetrics, LogManager};

/// Sole owner of the simulation state. Whatever schedules frames (display
/// refresh, a fixed loop, a test) calls [`Controller::step`] and
/// [`Controller::render`], or [`Controller::tick`] for both in sequence.
pub struct Controller {
    state: SimulationState,
    warnings: Vec<CollisionWarning>,
    metrics: FrameMetrics,
    logger: LogManager,
}

impl Controller {
    pub fn new(state: SimulationState) -> Self {
        let logger = LogManager::new("controller");
        logger.record(&format!(
            "frame loop ready: {} entities, step {}",
            state.entities().len(),
            state.step_size()
        ));
        let mut controller = Self {
            state,
            warnings: Vec::new(),
            metrics: FrameMetrics::new(),
            logger,
        };
        controller.refresh_warnings();
        controller
    }

    /// Advances every entity by one fixed increment.
    pub fn step(&mut self) {
        self.state.advance();
        self.refresh_warnings();
        self.metrics.record_step();
        self.logger.frame(&format!(
            "stepped {} entities",
            self.state.entities().len()
        ));
    }

    /// Draws the current state on `surface`.
    pub fn render<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        let mut warned = vec![false; self.state.entities().len()];
        for warning in &self.warnings {
            warned[warning.first_index] = true;
            warned[warning.second_index] = true;
        }
        self.state.sync_scene(&warned);
        surface.render(self.state.scene(), self.state.camera());
        self.metrics.record_render();
    }

    /// One frame: step, then render.
    pub fn tick<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        self.step();
        self.render(surface);
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Current collision warnings; always empty unless collision checks are enabled.
    pub fn warnings(&self) -> &[CollisionWarning] {
        &self.warnings
    }

    pub fn broadcasts(&self) -> Vec<VehicleBroadcast> {
        self.state
            .entities()
            .iter()
            .map(VehicleBroadcast::from_entity)
            .collect()
    }

    pub fn metrics(&self) -> &FrameMetrics {
        &self.metrics
    }

    fn refresh_warnings(&mut self) {
        let collision = &self.state.config().collision;
        if !collision.enabled {
            return;
        }
        self.warnings = scan(self.state.entities(), collision);
        self.metrics.record_warnings(self.warnings.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::VehicleRecord;
    use crate::math::Vec3;
    use crate::prelude::{CollisionConfig, RadarResult, Rgb, SceneConfig, Viewport};
    use crate::scene::{initialize, PerspectiveCamera, SceneGraph};

    const EPS: f32 = 1e-3;

    fn controller(records: &[VehicleRecord], config: SceneConfig) -> Controller {
        Controller::new(initialize(records, &config, Viewport::new(800.0, 600.0)).unwrap())
    }

    #[derive(Default)]
    struct RecordingSurface {
        frames: Vec<Vec<(String, Vec3, Rgb)>>,
    }

    impl RenderSurface for RecordingSurface {
        fn attach(&mut self, _viewport: Viewport) -> RadarResult<()> {
            Ok(())
        }

        fn render(&mut self, scene: &SceneGraph, _camera: &PerspectiveCamera) {
            self.frames.push(
                scene
                    .iter()
                    .map(|(_, mesh)| {
                        (
                            mesh.name.clone(),
                            mesh.transform.position,
                            mesh.material.color,
                        )
                    })
                    .collect(),
            );
        }
    }

    #[test]
    fn heading_zero_moves_along_x() {
        let mut ctl = controller(
            &[VehicleRecord::new(0.0, 0.0, 10.0, 0.0)],
            SceneConfig::default(),
        );
        ctl.step();
        let p = ctl.state().entities()[0].position();
        assert!((p.x - 1.0).abs() < EPS);
        assert_eq!(p.y, 0.0);
        assert!(p.z.abs() < EPS);
    }

    #[test]
    fn heading_ninety_moves_along_depth() {
        let mut ctl = controller(
            &[VehicleRecord::new(0.0, 0.0, 10.0, 90.0)],
            SceneConfig::default(),
        );
        ctl.step();
        let p = ctl.state().entities()[0].position();
        assert!(p.x.abs() < EPS);
        assert!((p.z - 1.0).abs() < EPS);
    }

    #[test]
    fn n_steps_match_closed_form() {
        let record = VehicleRecord::new(12.0, -7.0, 8.5, 33.0);
        let mut ctl = controller(&[record.clone()], SceneConfig::default());
        let steps = 250;
        for _ in 0..steps {
            ctl.step();
        }
        let theta = record.angle.to_radians();
        let travelled = steps as f32 * record.speed * 0.1;
        let p = ctl.state().entities()[0].position();
        assert!((p.x - (record.x + travelled * theta.cos())).abs() < 1e-2);
        assert!((p.z - (record.y + travelled * theta.sin())).abs() < 1e-2);
        assert_eq!(ctl.metrics().snapshot().frames_stepped, steps);
    }

    #[test]
    fn speeds_diverge_in_proportion() {
        let mut ctl = controller(
            &[
                VehicleRecord::new(5.0, 5.0, 4.0, 120.0),
                VehicleRecord::new(5.0, 5.0, 12.0, 120.0),
            ],
            SceneConfig::default(),
        );
        let mut previous = 0.0;
        for _ in 0..40 {
            ctl.step();
            let entities = ctl.state().entities();
            let slow = entities[0].position() - Vec3::new(5.0, 0.0, 5.0);
            let fast = entities[1].position() - Vec3::new(5.0, 0.0, 5.0);
            assert!((fast.length() / slow.length() - 3.0).abs() < 1e-3);
            let gap = (fast - slow).length();
            assert!(gap > previous);
            previous = gap;
        }
    }

    #[test]
    fn heading_is_captured_once() {
        let mut records = vec![VehicleRecord::new(0.0, 0.0, 1.0, 90.0)];
        let mut ctl = controller(&records, SceneConfig::default());
        records[0].angle = 0.0;
        ctl.step();
        let p = ctl.state().entities()[0].position();
        assert!(p.x.abs() < EPS);
        assert!((p.z - 0.1).abs() < EPS);
        let heading = ctl.state().entities()[0].heading_radians();
        assert!((heading - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(ctl.state().entities()[0].heading_degrees(), 90.0);
    }

    #[test]
    fn grid_is_invariant_across_frames() {
        let mut ctl = controller(
            &[VehicleRecord::new(90.0, 0.0, 50.0, 0.0)],
            SceneConfig::default(),
        );
        let before = ctl.state().grid().clone();
        let grid_mesh = ctl.state().scene().get(before.node()).cloned();
        let mut surface = RecordingSurface::default();
        for _ in 0..100 {
            ctl.tick(&mut surface);
        }
        assert_eq!(ctl.state().grid(), &before);
        assert_eq!(ctl.state().scene().get(before.node()).cloned(), grid_mesh);
        // drifted outside the ring and is still there
        assert!(ctl.state().entities()[0].position().x > 100.0);
        assert_eq!(ctl.state().entities().len(), 1);
    }

    #[test]
    fn empty_scene_renders_grid_alone() {
        let mut ctl = controller(&[], SceneConfig::default());
        let mut surface = RecordingSurface::default();
        ctl.tick(&mut surface);
        assert_eq!(surface.frames.len(), 1);
        assert_eq!(surface.frames[0].len(), 1);
        assert_eq!(surface.frames[0][0].0, "radar-grid");
        assert_eq!(ctl.metrics().snapshot().frames_rendered, 1);
    }

    #[test]
    fn render_syncs_mesh_positions() {
        let mut ctl = controller(
            &[VehicleRecord::new(0.0, 0.0, 10.0, 0.0)],
            SceneConfig::default(),
        );
        let mut surface = RecordingSurface::default();
        ctl.tick(&mut surface);
        ctl.tick(&mut surface);
        let (_, position, _) = &surface.frames[1][1];
        assert!((position.x - 2.0).abs() < EPS);
    }

    #[test]
    fn collision_warnings_repaint_vehicles_when_enabled() {
        let config = SceneConfig {
            collision: CollisionConfig {
                enabled: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut ctl = controller(
            &[
                VehicleRecord::new(-20.0, 0.0, 10.0, 0.0),
                VehicleRecord::new(20.0, 0.0, 10.0, 180.0),
                VehicleRecord::new(0.0, 80.0, 1.0, 90.0),
            ],
            config.clone(),
        );
        assert_eq!(ctl.warnings().len(), 1);
        let mut surface = RecordingSurface::default();
        ctl.render(&mut surface);
        let red = Rgb::from_hex(config.warning_color);
        let cyan = Rgb::from_hex(config.vehicle_color);
        assert_eq!(surface.frames[0][1].2, red);
        assert_eq!(surface.frames[0][2].2, red);
        assert_eq!(surface.frames[0][3].2, cyan);
    }

    #[test]
    fn collision_checks_stay_off_by_default() {
        let ctl = controller(
            &[
                VehicleRecord::new(-20.0, 0.0, 10.0, 0.0),
                VehicleRecord::new(20.0, 0.0, 10.0, 180.0),
            ],
            SceneConfig::default(),
        );
        assert!(ctl.warnings().is_empty());
    }
}
