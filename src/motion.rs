//! The transform engine: elapsed time in, world matrices out.
//!
//! Everything here is a pure function of (body identity, elapsed ms). There
//! is no per-frame state to carry between calls; any body's placement can be
//! re-derived at any instant, which is what makes the whole animation model
//! trivially testable.
//!
//! Matrices follow glam's column-vector convention: in a product the
//! rightmost factor applies to the model first. A planet's world matrix is
//!
//! ```text
//! world = revolution(Y) * spin(own axis) * translation(orbit radius)
//! ```
//!
//! so the body is pushed out to its orbital radius, spins in place there,
//! and the whole arrangement sweeps around the origin last. A satellite
//! nests the same way under its parent's world matrix instead of the origin.

use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

use crate::bodies::{Planet, Satellite, SpinAxis};

/// Angle of a cyclic motion with the given period, in radians.
///
/// `elapsed_ms` wraps modulo the period, so a whole number of cycles lands
/// exactly back on 0.
pub fn cycle_angle(elapsed_ms: u64, period_ms: u32) -> f32 {
    (elapsed_ms % period_ms as u64) as f32 * TAU / period_ms as f32
}

/// The planet's current orbit angle around the system origin.
///
/// The sun orbits nothing; its angle is fixed at 0.
pub fn revolution_angle(planet: Planet, elapsed_ms: u64) -> f32 {
    match planet.record().revolution_ms {
        Some(period) => cycle_angle(elapsed_ms, period),
        None => 0.0,
    }
}

/// The planet's current angle about its own axis.
///
/// Negated for retrograde bodies (Venus, Uranus).
pub fn spin_angle(planet: Planet, elapsed_ms: u64) -> f32 {
    let rec = planet.record();
    let angle = cycle_angle(elapsed_ms, rec.spin_ms);
    if rec.retrograde { -angle } else { angle }
}

/// The planet's self-rotation as a matrix, about its catalog spin axis.
pub fn spin_rotation(planet: Planet, elapsed_ms: u64) -> Mat4 {
    let angle = spin_angle(planet, elapsed_ms);
    match planet.record().spin_axis {
        SpinAxis::Y => Mat4::from_rotation_y(angle),
        SpinAxis::X => Mat4::from_rotation_x(angle),
    }
}

/// The satellite's current orbit angle around its parent.
pub fn satellite_revolution_angle(satellite: Satellite, elapsed_ms: u64) -> f32 {
    cycle_angle(elapsed_ms, satellite.record().revolution_ms)
}

/// The planet's world matrix at the given instant.
pub fn planet_world(planet: Planet, elapsed_ms: u64) -> Mat4 {
    let orbit = Mat4::from_translation(Vec3::new(planet.record().orbit_radius, 0.0, 0.0));
    let revolution = Mat4::from_rotation_y(revolution_angle(planet, elapsed_ms));
    revolution * spin_rotation(planet, elapsed_ms) * orbit
}

/// The satellite's world matrix, nested under its parent's world matrix.
///
/// `parent_world` must be the parent's matrix for the same instant; the
/// satellite is offset and revolved in the parent's local frame, then
/// carried wherever the parent went.
pub fn satellite_world(satellite: Satellite, elapsed_ms: u64, parent_world: Mat4) -> Mat4 {
    let rec = satellite.record();
    let offset = Mat4::from_translation(Vec3::new(rec.orbit_radius, 0.0, 0.0));
    let revolution = Mat4::from_rotation_y(satellite_revolution_angle(satellite, elapsed_ms));
    parent_world * revolution * offset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        assert!(a.abs_diff_eq(b, 1e-5), "matrices differ:\n{a}\nvs\n{b}");
    }

    #[test]
    fn angles_are_periodic() {
        for planet in Planet::ALL {
            let rec = planet.record();
            let t = 1_234;
            assert_eq!(
                spin_angle(planet, t),
                spin_angle(planet, t + 7 * rec.spin_ms as u64)
            );
            if let Some(period) = rec.revolution_ms {
                assert_eq!(
                    revolution_angle(planet, t),
                    revolution_angle(planet, t + 3 * period as u64)
                );
            }
        }
        for sat in Satellite::ALL {
            let period = sat.record().revolution_ms as u64;
            assert_eq!(
                satellite_revolution_angle(sat, 500),
                satellite_revolution_angle(sat, 500 + period)
            );
        }
    }

    #[test]
    fn all_angles_zero_at_epoch() {
        for planet in Planet::ALL {
            assert_eq!(revolution_angle(planet, 0), 0.0);
            assert_eq!(spin_angle(planet, 0), 0.0);
        }
        for sat in Satellite::ALL {
            assert_eq!(satellite_revolution_angle(sat, 0), 0.0);
        }
    }

    #[test]
    fn whole_period_wraps_to_zero() {
        // 2000 ms is exactly one Mercury year.
        assert_eq!(revolution_angle(Planet::Mercury, 2_000), 0.0);
        assert_eq!(revolution_angle(Planet::Mercury, 6_000), 0.0);
    }

    #[test]
    fn the_sun_does_not_orbit() {
        for t in [0, 999, 50_000, 123_456_789] {
            assert_eq!(revolution_angle(Planet::Sun, t), 0.0);
        }
    }

    #[test]
    fn retrograde_negates_the_spin_angle() {
        for t in [1, 777, 60_000, 3_600_000] {
            let venus = Planet::Venus.record();
            assert_eq!(spin_angle(Planet::Venus, t), -cycle_angle(t, venus.spin_ms));
            let uranus = Planet::Uranus.record();
            assert_eq!(
                spin_angle(Planet::Uranus, t),
                -cycle_angle(t, uranus.spin_ms)
            );
            // A prograde control.
            let earth = Planet::Earth.record();
            assert_eq!(spin_angle(Planet::Earth, t), cycle_angle(t, earth.spin_ms));
        }
    }

    #[test]
    fn uranus_spins_about_x_not_y() {
        // A quarter of Uranus's 8000 ms spin period, retrograde: -tau/4
        // about X sends +Y to -Z and leaves +X untouched.
        let rot = spin_rotation(Planet::Uranus, 2_000);
        let y = rot.transform_vector3(Vec3::Y);
        assert!(y.abs_diff_eq(Vec3::NEG_Z, 1e-5), "got {y}");
        assert!(rot.transform_vector3(Vec3::X).abs_diff_eq(Vec3::X, 1e-5));

        // Earth a quarter into its 10000 ms spin: +tau/4 about Y sends +X
        // to -Z and leaves +Y untouched.
        let rot = spin_rotation(Planet::Earth, 2_500);
        let x = rot.transform_vector3(Vec3::X);
        assert!(x.abs_diff_eq(Vec3::NEG_Z, 1e-5), "got {x}");
        assert!(rot.transform_vector3(Vec3::Y).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn planet_world_composes_orbit_last() {
        // Earth a quarter into its 10000 ms year. Revolution and spin share
        // the period, so both factors are quarter turns about Y, applied
        // after the push out to (15, 0, 0).
        let world = planet_world(Planet::Earth, 2_500);
        let expected = Mat4::from_rotation_y(TAU / 4.0)
            * Mat4::from_rotation_y(TAU / 4.0)
            * Mat4::from_translation(Vec3::new(15.0, 0.0, 0.0));
        assert_mat_eq(world, expected);
    }

    #[test]
    fn moon_nests_under_earth() {
        let t = 7_300;
        // Earth's world, built from raw catalog numbers rather than through
        // planet_world.
        let earth = Mat4::from_rotation_y(TAU * 7_300.0 / 10_000.0)
            * Mat4::from_rotation_y(TAU * 7_300.0 / 10_000.0)
            * Mat4::from_translation(Vec3::new(15.0, 0.0, 0.0));
        let expected = earth
            * Mat4::from_rotation_y(TAU * 7_300.0 / 30_000.0)
            * Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0));
        let actual = satellite_world(Satellite::Moon, t, planet_world(Planet::Earth, t));
        assert_mat_eq(actual, expected);
    }

    #[test]
    fn mercury_returns_home_after_one_revolution() {
        // At exactly one revolution period the orbit angle has wrapped to 0,
        // so the revolution-and-translation part of the world matrix is the
        // same translation-only matrix as at t = 0.
        let period = 2_000u64;
        assert_eq!(revolution_angle(Planet::Mercury, period), 0.0);

        let orbit_only = |t: u64| {
            Mat4::from_rotation_y(revolution_angle(Planet::Mercury, t))
                * Mat4::from_translation(Vec3::new(8.5, 0.0, 0.0))
        };
        assert_mat_eq(orbit_only(period), orbit_only(0));
        assert_mat_eq(
            orbit_only(0),
            Mat4::from_translation(Vec3::new(8.5, 0.0, 0.0)),
        );
    }
}
