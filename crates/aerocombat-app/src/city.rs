//! Static building layout for headless sessions.

use aerocombat_core::components::Building;
use aerocombat_core::DVec3;

/// Lot spacing between building centers.
const BLOCK: f64 = 600.0;

/// A square grid of towers around the origin with the center lot left
/// open under the player spawn. Heights vary by lot but stay below spawn
/// altitude.
pub fn downtown(half_width: i32) -> Vec<Building> {
    let mut buildings = Vec::new();
    for gx in -half_width..=half_width {
        for gz in -half_width..=half_width {
            if gx == 0 && gz == 0 {
                continue;
            }
            let lot = (gx * 7 + gz * 13).rem_euclid(5) as f64;
            let height = 120.0 + lot * 60.0;
            let footprint = 100.0 + (gx - gz).rem_euclid(3) as f64 * 30.0;
            buildings.push(Building::new(
                DVec3::new(gx as f64 * BLOCK, 0.0, gz as f64 * BLOCK),
                footprint,
                height,
                footprint,
            ));
        }
    }
    buildings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downtown_leaves_spawn_clear() {
        let buildings = downtown(2);
        assert_eq!(buildings.len(), 24);
        let spawn = DVec3::new(0.0, 500.0, 0.0);
        for b in &buildings {
            assert!(!b.bounds().expanded(20.0).contains(spawn));
            assert!(b.height < 500.0);
        }
    }

    #[test]
    fn test_empty_grid() {
        assert!(downtown(0).is_empty());
    }
}
