use crate::prelude::CollisionConfig;
use crate::scene::VisualEntity;
use std::fmt;

/// Predicted close approach between two vehicles.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionWarning {
    pub first_index: usize,
    pub second_index: usize,
    pub first: String,
    pub second: String,
    /// Simulated seconds until closest approach.
    pub seconds: f32,
}

impl fmt::Display for CollisionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicles {} and {} may collide in {:.2}s",
            self.first, self.second, self.seconds
        )
    }
}

/// Time until `a` and `b` reach closest approach, if they are closing and
/// that approach is nearer than `min_separation`.
pub fn time_to_collision(a: &VisualEntity, b: &VisualEntity, min_separation: f32) -> Option<f32> {
    let (pa, pb) = (a.position(), b.position());
    let (vax, vaz) = a.ground_velocity();
    let (vbx, vbz) = b.ground_velocity();

    let (dx, dz) = (pb.x - pa.x, pb.z - pa.z);
    let (dvx, dvz) = (vbx - vax, vbz - vaz);

    let closing = dvx * dx + dvz * dz;
    if closing >= 0.0 {
        return None;
    }
    let dv2 = dvx * dvx + dvz * dvz;
    if dv2 == 0.0 {
        return None;
    }

    let t = -closing / dv2;
    let sep_x = dx + dvx * t;
    let sep_z = dz + dvz * t;
    if (sep_x * sep_x + sep_z * sep_z).sqrt() < min_separation {
        Some(t)
    } else {
        None
    }
}

/// Checks every unordered pair and reports those closing inside the horizon.
pub fn scan(entities: &[VisualEntity], config: &CollisionConfig) -> Vec<CollisionWarning> {
    let mut warnings = Vec::new();
    for i in 0..entities.len() {
        for j in (i + 1)..entities.len() {
            let (a, b) = (&entities[i], &entities[j]);
            if let Some(seconds) = time_to_collision(a, b, config.min_separation) {
                if seconds < config.horizon {
                    warnings.push(CollisionWarning {
                        first_index: i,
                        second_index: j,
                        first: a.label().to_string(),
                        second: b.label().to_string(),
                        seconds,
                    });
                }
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::VehicleRecord;
    use crate::prelude::{SceneConfig, Viewport};
    use crate::scene::initialize;

    fn entities(records: &[VehicleRecord]) -> Vec<VisualEntity> {
        initialize(records, &SceneConfig::default(), Viewport::new(100.0, 100.0))
            .unwrap()
            .entities()
            .to_vec()
    }

    #[test]
    fn head_on_vehicles_meet_halfway() {
        let e = entities(&[
            VehicleRecord::new(-20.0, 0.0, 10.0, 0.0),
            VehicleRecord::new(20.0, 0.0, 10.0, 180.0),
        ]);
        let t = time_to_collision(&e[0], &e[1], 10.0).unwrap();
        assert!((t - 2.0).abs() < 1e-4);
    }

    #[test]
    fn diverging_vehicles_never_collide() {
        let e = entities(&[
            VehicleRecord::new(-20.0, 0.0, 10.0, 180.0),
            VehicleRecord::new(20.0, 0.0, 10.0, 0.0),
        ]);
        assert!(time_to_collision(&e[0], &e[1], 10.0).is_none());
    }

    #[test]
    fn matching_velocities_never_collide() {
        let e = entities(&[
            VehicleRecord::new(0.0, 0.0, 5.0, 30.0),
            VehicleRecord::new(3.0, 0.0, 5.0, 30.0),
        ]);
        assert!(time_to_collision(&e[0], &e[1], 10.0).is_none());
    }

    #[test]
    fn wide_passes_are_not_reported() {
        let e = entities(&[
            VehicleRecord::new(-20.0, 0.0, 10.0, 0.0),
            VehicleRecord::new(20.0, 30.0, 10.0, 180.0),
        ]);
        assert!(time_to_collision(&e[0], &e[1], 10.0).is_none());
    }

    #[test]
    fn scan_applies_horizon_and_pair_order() {
        let e = entities(&[
            VehicleRecord::new(-20.0, 0.0, 10.0, 0.0),
            VehicleRecord::new(20.0, 0.0, 10.0, 180.0),
            VehicleRecord::new(-500.0, 5.0, 10.0, 0.0),
        ]);
        let warnings = scan(&e, &CollisionConfig::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!((warnings[0].first_index, warnings[0].second_index), (0, 1));
        assert_eq!(
            warnings[0].to_string(),
            "Vehicles A and B may collide in 2.00s"
        );
    }
}
