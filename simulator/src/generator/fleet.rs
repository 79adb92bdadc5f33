use anyhow::ensure;
use radarcore::feed::{vehicle_label, VehicleRecord};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic vehicle snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub count: usize,
    /// Vehicles spawn with x and y uniform in `[-spawn_extent, spawn_extent]`.
    pub spawn_extent: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 4,
            spawn_extent: 80.0,
            speed_min: 5.0,
            speed_max: 15.0,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.spawn_extent > 0.0,
            "spawn extent must be positive (got {})",
            self.spawn_extent
        );
        ensure!(
            self.speed_min <= self.speed_max,
            "speed range {}..{} is inverted",
            self.speed_min,
            self.speed_max
        );
        Ok(())
    }
}

/// Builds `config.count` vehicles labelled A, B, C, ... from a seeded RNG.
pub fn generate_records(config: &GeneratorConfig) -> anyhow::Result<Vec<VehicleRecord>> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let extent = config.spawn_extent;

    let records = (0..config.count)
        .map(|index| {
            let x = rng.gen_range(-extent..=extent);
            let y = rng.gen_range(-extent..=extent);
            let speed = rng.gen_range(config.speed_min..=config.speed_max);
            let angle = rng.gen_range(0.0..360.0);
            VehicleRecord::new(x, y, speed, angle).with_id(vehicle_label(index))
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_respects_ranges() {
        let config = GeneratorConfig {
            count: 50,
            ..Default::default()
        };
        let records = generate_records(&config).unwrap();
        assert_eq!(records.len(), 50);
        for record in &records {
            assert!(record.x.abs() <= 80.0 && record.y.abs() <= 80.0);
            assert!((5.0..=15.0).contains(&record.speed));
            assert!((0.0..360.0).contains(&record.angle));
        }
        assert_eq!(records[0].id.as_deref(), Some("A"));
        assert_eq!(records[27].id.as_deref(), Some("AB"));
    }

    #[test]
    fn same_seed_reproduces_the_snapshot() {
        let config = GeneratorConfig {
            seed: 42,
            ..Default::default()
        };
        assert_eq!(
            generate_records(&config).unwrap(),
            generate_records(&config).unwrap()
        );
    }

    #[test]
    fn fixed_speed_range_is_allowed() {
        let config = GeneratorConfig {
            speed_min: 7.0,
            speed_max: 7.0,
            ..Default::default()
        };
        let records = generate_records(&config).unwrap();
        assert!(records.iter().all(|r| r.speed == 7.0));
    }

    #[test]
    fn inverted_speed_range_is_rejected() {
        let config = GeneratorConfig {
            speed_min: 20.0,
            speed_max: 10.0,
            ..Default::default()
        };
        assert!(generate_records(&config).is_err());
    }

    #[test]
    fn empty_fleet_is_valid() {
        let config = GeneratorConfig {
            count: 0,
            ..Default::default()
        };
        assert!(generate_records(&config).unwrap().is_empty());
    }
}
