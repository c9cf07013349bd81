//! Patrol point selection.

use glam::DVec3;
use rand::Rng;

/// Draw a patrol point around `home`. Each horizontal axis is offset by up
/// to a radius drawn from `radius_min..=radius_max`; altitude varies by a
/// fifth of that and never drops below `min_altitude`.
pub fn random_patrol_point<R: Rng + ?Sized>(
    rng: &mut R,
    home: DVec3,
    radius_min: f64,
    radius_max: f64,
    min_altitude: f64,
) -> DVec3 {
    let radius = rng.gen_range(radius_min..=radius_max);
    let dx = rng.gen_range(-radius..=radius);
    let dz = rng.gen_range(-radius..=radius);
    let dy = rng.gen_range(-radius..=radius) * 0.2;
    let point = home + DVec3::new(dx, dy, dz);
    DVec3::new(point.x, point.y.max(min_altitude), point.z)
}
