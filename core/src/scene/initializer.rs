use crate::feed::record::{vehicle_label, VehicleRecord};
use crate::math::Vec3;
use crate::prelude::{RadarError, RadarResult, Rgb, SceneConfig, Viewport};
use crate::scene::camera::PerspectiveCamera;
use crate::scene::entity::{RadarGrid, VisualEntity};
use crate::scene::graph::{Geometry, Material, Mesh, SceneGraph, Transform};
use crate::simulation::state::SimulationState;
use crate::telemetry::log::LogManager;
use std::f32::consts::FRAC_PI_2;

/// Builds the grid, one entity per record (in input order) and the camera.
///
/// An empty record list is valid and yields a scene holding only the grid.
pub fn initialize(
    records: &[VehicleRecord],
    config: &SceneConfig,
    viewport: Viewport,
) -> RadarResult<SimulationState> {
    if viewport.is_empty() {
        return Err(RadarError::RenderSurfaceUnavailable(format!(
            "viewport {}x{} has no area",
            viewport.width, viewport.height
        )));
    }
    config.validate()?;

    let mut graph = SceneGraph::new();
    let grid_node = graph.add(Mesh {
        name: "radar-grid".into(),
        geometry: Geometry::Ring {
            inner: config.grid_inner_radius,
            outer: config.grid_outer_radius,
            segments: config.grid_segments,
        },
        material: Material::flat(Rgb::from_hex(config.grid_color)).double_sided(),
        transform: Transform {
            position: Vec3::ZERO,
            rotation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
        },
    });
    let grid = RadarGrid::new(
        config.grid_inner_radius,
        config.grid_outer_radius,
        config.grid_segments,
        grid_node,
    );

    let entities = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let label = record.id.clone().unwrap_or_else(|| vehicle_label(index));
            let node = graph.add(Mesh {
                name: format!("vehicle-{label}"),
                geometry: Geometry::Sphere {
                    radius: config.vehicle_radius,
                    width_segments: config.vehicle_segments,
                    height_segments: config.vehicle_segments,
                },
                material: Material::flat(Rgb::from_hex(config.vehicle_color)),
                transform: Transform::at(Vec3::new(record.x, 0.0, record.y)),
            });
            VisualEntity::from_record(record, label, node)
        })
        .collect::<Vec<_>>();

    let camera = PerspectiveCamera::from_config(config, viewport);

    LogManager::new("scene").record(&format!(
        "initialized {} vehicles inside grid r={}..{}",
        entities.len(),
        grid.inner_radius(),
        grid.outer_radius()
    ));

    Ok(SimulationState::new(
        grid,
        entities,
        graph,
        camera,
        config.clone(),
    ))
}
