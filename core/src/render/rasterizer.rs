use crate::math::{MatrixHelper, Vec3};
use crate::prelude::{RadarError, RadarResult, RenderSurface, Viewport};
use crate::render::frame::{Primitive, RenderedFrame, ScreenPoint, Shape};
use crate::scene::{Geometry, Mesh, PerspectiveCamera, SceneGraph};
use crate::telemetry::log::LogManager;
use ndarray::ArrayView2;
use std::f32::consts::TAU;

/// Software render surface that projects the scene into 2D primitives.
pub struct Rasterizer {
    viewport: Option<Viewport>,
    frame: RenderedFrame,
    logger: LogManager,
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            viewport: None,
            frame: RenderedFrame::default(),
            logger: LogManager::new("rasterizer"),
        }
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Most recently rendered frame.
    pub fn frame(&self) -> &RenderedFrame {
        &self.frame
    }

    fn project(
        &self,
        mvp: ArrayView2<f32>,
        point: Vec3,
        viewport: Viewport,
    ) -> Option<(ScreenPoint, f32)> {
        let [x, y, z, w] = MatrixHelper::transform_point(mvp, point);
        if w <= 0.0 {
            return None;
        }
        let depth_ndc = z / w;
        if !(-1.0..=1.0).contains(&depth_ndc) {
            return None;
        }
        let screen = ScreenPoint {
            x: (x / w + 1.0) / 2.0 * viewport.width,
            y: (1.0 - y / w) / 2.0 * viewport.height,
        };
        Some((screen, w))
    }

    fn rasterize_ring(
        &self,
        mesh: &Mesh,
        mvp: ArrayView2<f32>,
        viewport: Viewport,
        (inner, outer, segments): (f32, f32, u32),
        out: &mut Vec<Primitive>,
    ) {
        let ring_point = |radius: f32, i: u32| {
            let theta = i as f32 / segments as f32 * TAU;
            Vec3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
        };

        for i in 0..segments {
            let corners = [
                ring_point(inner, i),
                ring_point(outer, i),
                ring_point(outer, i + 1),
                ring_point(inner, i + 1),
            ];
            let projected: Option<Vec<(ScreenPoint, f32)>> = corners
                .iter()
                .map(|&corner| self.project(mvp, corner, viewport))
                .collect();
            let Some(projected) = projected else {
                continue;
            };
            let points: Vec<ScreenPoint> = projected.iter().map(|(p, _)| *p).collect();
            // counter-clockwise in clip space shows up with negative area once y points down
            if !mesh.material.double_sided && signed_area(&points) >= 0.0 {
                continue;
            }
            let depth = projected.iter().map(|(_, w)| w).sum::<f32>() / projected.len() as f32;
            out.push(Primitive {
                depth,
                color: mesh.material.color,
                shape: Shape::Polygon(points),
            });
        }
    }

    fn rasterize_sphere(
        &self,
        mesh: &Mesh,
        mvp: ArrayView2<f32>,
        viewport: Viewport,
        camera: &PerspectiveCamera,
        radius: f32,
        out: &mut Vec<Primitive>,
    ) {
        if let Some((center, w)) = self.project(mvp, Vec3::ZERO, viewport) {
            out.push(Primitive {
                depth: w,
                color: mesh.material.color,
                shape: Shape::Disc {
                    center,
                    radius: radius * camera.focal_length_px(viewport.height) / w,
                },
            });
        }
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for Rasterizer {
    fn attach(&mut self, viewport: Viewport) -> RadarResult<()> {
        if viewport.is_empty() {
            return Err(RadarError::RenderSurfaceUnavailable(format!(
                "cannot attach to a {}x{} viewport",
                viewport.width, viewport.height
            )));
        }
        self.viewport = Some(viewport);
        self.frame = RenderedFrame::blank(viewport.width, viewport.height);
        self.logger.record(&format!(
            "attached to {}x{} viewport",
            viewport.width, viewport.height
        ));
        Ok(())
    }

    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) {
        let Some(viewport) = self.viewport else {
            self.logger
                .warn("render called before attach; frame left blank");
            return;
        };
        let view_projection = camera.view_projection();
        let mut primitives = Vec::new();

        for (_, mesh) in scene.iter() {
            let mvp = MatrixHelper::multiply(
                view_projection.view(),
                mesh.transform.model_matrix().view(),
            );
            match mesh.geometry {
                Geometry::Ring {
                    inner,
                    outer,
                    segments,
                } => self.rasterize_ring(
                    mesh,
                    mvp.view(),
                    viewport,
                    (inner, outer, segments),
                    &mut primitives,
                ),
                Geometry::Sphere { radius, .. } => self.rasterize_sphere(
                    mesh,
                    mvp.view(),
                    viewport,
                    camera,
                    radius,
                    &mut primitives,
                ),
            }
        }

        primitives.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        self.logger
            .frame(&format!("rasterized {} primitives", primitives.len()));
        self.frame = RenderedFrame {
            primitives,
            ..RenderedFrame::blank(viewport.width, viewport.height)
        };
    }
}

fn signed_area(points: &[ScreenPoint]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f32>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::VehicleRecord;
    use crate::prelude::SceneConfig;
    use crate::scene::initialize;
    use crate::simulation::Controller;

    fn attached(viewport: Viewport) -> Rasterizer {
        let mut rasterizer = Rasterizer::new();
        rasterizer.attach(viewport).unwrap();
        rasterizer
    }

    #[test]
    fn attach_rejects_empty_viewport() {
        let mut rasterizer = Rasterizer::new();
        assert!(matches!(
            rasterizer.attach(Viewport::new(640.0, 0.0)),
            Err(RadarError::RenderSurfaceUnavailable(_))
        ));
        assert!(rasterizer.viewport().is_none());
    }

    #[test]
    fn render_without_attach_leaves_frame_blank() {
        let viewport = Viewport::new(800.0, 600.0);
        let state = initialize(&[], &SceneConfig::default(), viewport).unwrap();
        let mut rasterizer = Rasterizer::new();
        rasterizer.render(state.scene(), state.camera());
        assert!(rasterizer.frame().primitives.is_empty());
        assert!(rasterizer.viewport().is_none());
    }

    #[test]
    fn grid_alone_renders_every_segment() {
        let viewport = Viewport::new(800.0, 600.0);
        let state = initialize(&[], &SceneConfig::default(), viewport).unwrap();
        let mut rasterizer = attached(viewport);
        rasterizer.render(state.scene(), state.camera());
        assert_eq!(rasterizer.frame().polygons().count(), 64);
        assert_eq!(rasterizer.frame().discs().count(), 0);
    }

    #[test]
    fn vehicle_at_origin_lands_at_screen_centre() {
        let viewport = Viewport::new(800.0, 600.0);
        let state = initialize(
            &[VehicleRecord::new(0.0, 0.0, 0.0, 0.0)],
            &SceneConfig::default(),
            viewport,
        )
        .unwrap();
        let mut rasterizer = attached(viewport);
        rasterizer.render(state.scene(), state.camera());
        let disc = rasterizer.frame().discs().next().unwrap();
        match disc.shape {
            Shape::Disc { center, radius } => {
                assert!((center.x - 400.0).abs() < 1e-2);
                assert!((center.y - 300.0).abs() < 1e-2);
                let expected = 3.0 * state.camera().focal_length_px(600.0) / 200.0;
                assert!((radius - expected).abs() < 1e-3);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn primitives_are_ordered_back_to_front() {
        let viewport = Viewport::new(800.0, 600.0);
        let state = initialize(
            &[
                VehicleRecord::new(0.0, 50.0, 0.0, 0.0),
                VehicleRecord::new(0.0, -50.0, 0.0, 0.0),
            ],
            &SceneConfig::default(),
            viewport,
        )
        .unwrap();
        let mut rasterizer = attached(viewport);
        rasterizer.render(state.scene(), state.camera());
        let depths: Vec<f32> = rasterizer
            .frame()
            .primitives
            .iter()
            .map(|p| p.depth)
            .collect();
        assert!(depths.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn vehicles_behind_the_camera_are_clipped() {
        let viewport = Viewport::new(800.0, 600.0);
        let state = initialize(
            &[VehicleRecord::new(0.0, 5000.0, 0.0, 0.0)],
            &SceneConfig::default(),
            viewport,
        )
        .unwrap();
        let mut rasterizer = attached(viewport);
        rasterizer.render(state.scene(), state.camera());
        assert_eq!(rasterizer.frame().discs().count(), 0);
    }

    #[test]
    fn single_sided_ring_facing_away_is_culled() {
        let viewport = Viewport::new(800.0, 600.0);
        let state = initialize(&[], &SceneConfig::default(), viewport).unwrap();
        let mut scene = state.scene().clone();
        let grid = state.grid().node();
        if let Some(mesh) = scene.get_mut(grid) {
            mesh.material.double_sided = false;
        }
        let mut rasterizer = attached(viewport);
        rasterizer.render(&scene, state.camera());
        assert_eq!(rasterizer.frame().polygons().count(), 0);

        if let Some(mesh) = scene.get_mut(grid) {
            mesh.transform.rotation.x = -std::f32::consts::FRAC_PI_2;
        }
        rasterizer.render(&scene, state.camera());
        assert_eq!(rasterizer.frame().polygons().count(), 64);
    }

    #[test]
    fn controller_drives_the_rasterizer() {
        let viewport = Viewport::new(640.0, 480.0);
        let state = initialize(
            &[VehicleRecord::new(0.0, 0.0, 10.0, 0.0)],
            &SceneConfig::default(),
            viewport,
        )
        .unwrap();
        let mut controller = Controller::new(state);
        let mut rasterizer = attached(viewport);
        controller.tick(&mut rasterizer);
        let disc = rasterizer.frame().discs().next().unwrap();
        match disc.shape {
            Shape::Disc { center, .. } => assert!(center.x > 320.0),
            _ => unreachable!(),
        }
    }
}
