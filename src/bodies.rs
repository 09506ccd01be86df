//! The body catalog: every constant that defines the solar system.
//!
//! Each planet and satellite is described by a single record holding all of
//! its per-body constants. Records are returned by value from `const fn`
//! lookups keyed on the body enum, so there are no parallel arrays to keep
//! in sync by index. A satellite's parent is part of its record; nothing
//! outside this module decides who orbits whom.
//!
//! Distances are scene units (loosely astronomical), periods are wall-clock
//! milliseconds for one full cycle. The values are tuned for a readable
//! animation, not derived from physical law: inner planets revolve fastest,
//! Neptune takes five minutes per lap.

/// The nine primary bodies, sun included, in fixed catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Planet {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// The three satellites. Each is bound to exactly one parent planet for its
/// entire lifetime; the binding lives in [`SatelliteRecord::parent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Satellite {
    Moon,
    Titan,
    Io,
}

/// Which local axis a body spins about.
///
/// Every body spins about +Y except Uranus, whose tilted axis is modeled as
/// a spin about +X. Axis choice and spin direction are independent
/// attributes; a body never composes both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinAxis {
    Y,
    X,
}

/// All per-planet constants in one record.
#[derive(Clone, Copy, Debug)]
pub struct PlanetRecord {
    /// Distance from the system origin, in scene units.
    pub orbit_radius: f32,
    /// One full orbit around the origin, in ms. `None` for the sun, which
    /// orbits nothing and holds revolution angle 0.
    pub revolution_ms: Option<u32>,
    /// One full turn about the body's own axis, in ms.
    pub spin_ms: u32,
    /// Spin runs opposite the revolution sense (Venus, Uranus).
    pub retrograde: bool,
    /// Axis of self-rotation.
    pub spin_axis: SpinAxis,
    /// Radius of the rendered sphere, in scene units.
    pub mesh_radius: f32,
}

/// All per-satellite constants in one record.
///
/// No independent spin is modeled; the revolution period stands in for both
/// motions.
#[derive(Clone, Copy, Debug)]
pub struct SatelliteRecord {
    /// The planet this satellite orbits. Fixed for the satellite's lifetime.
    pub parent: Planet,
    /// Distance from the parent's center, in scene units.
    pub orbit_radius: f32,
    /// One full orbit around the parent, in ms.
    pub revolution_ms: u32,
    /// Radius of the rendered sphere, in scene units.
    pub mesh_radius: f32,
}

impl Planet {
    /// Every planet in catalog order. Indices are stable across frames and
    /// match the enum discriminants.
    pub const ALL: [Planet; 9] = [
        Planet::Sun,
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    /// The planet's catalog record.
    pub const fn record(self) -> PlanetRecord {
        match self {
            Planet::Sun => PlanetRecord {
                orbit_radius: 0.0,
                revolution_ms: None,
                spin_ms: 100_000,
                retrograde: false,
                spin_axis: SpinAxis::Y,
                mesh_radius: 5.0,
            },
            Planet::Mercury => PlanetRecord {
                orbit_radius: 8.5,
                revolution_ms: Some(2_000),
                spin_ms: 200_000,
                retrograde: false,
                spin_axis: SpinAxis::Y,
                mesh_radius: 0.3,
            },
            Planet::Venus => PlanetRecord {
                orbit_radius: 10.0,
                revolution_ms: Some(6_000),
                spin_ms: 240_000,
                retrograde: true,
                spin_axis: SpinAxis::Y,
                mesh_radius: 0.8,
            },
            Planet::Earth => PlanetRecord {
                orbit_radius: 15.0,
                revolution_ms: Some(10_000),
                spin_ms: 10_000,
                retrograde: false,
                spin_axis: SpinAxis::Y,
                mesh_radius: 1.0,
            },
            Planet::Mars => PlanetRecord {
                orbit_radius: 20.0,
                revolution_ms: Some(18_000),
                spin_ms: 11_000,
                retrograde: false,
                spin_axis: SpinAxis::Y,
                mesh_radius: 1.2,
            },
            Planet::Jupiter => PlanetRecord {
                orbit_radius: 27.0,
                revolution_ms: Some(50_000),
                spin_ms: 3_000,
                retrograde: false,
                spin_axis: SpinAxis::Y,
                mesh_radius: 3.0,
            },
            Planet::Saturn => PlanetRecord {
                orbit_radius: 33.0,
                revolution_ms: Some(100_000),
                spin_ms: 3_500,
                retrograde: false,
                spin_axis: SpinAxis::Y,
                mesh_radius: 2.5,
            },
            Planet::Uranus => PlanetRecord {
                orbit_radius: 37.0,
                revolution_ms: Some(200_000),
                spin_ms: 8_000,
                retrograde: true,
                spin_axis: SpinAxis::X,
                mesh_radius: 1.8,
            },
            Planet::Neptune => PlanetRecord {
                orbit_radius: 40.0,
                revolution_ms: Some(300_000),
                spin_ms: 8_000,
                retrograde: false,
                spin_axis: SpinAxis::Y,
                mesh_radius: 1.7,
            },
        }
    }

    /// The satellite orbiting this planet, if any.
    pub fn satellite(self) -> Option<Satellite> {
        Satellite::ALL.into_iter().find(|s| s.record().parent == self)
    }
}

impl Satellite {
    /// Every satellite in catalog order.
    pub const ALL: [Satellite; 3] = [Satellite::Moon, Satellite::Titan, Satellite::Io];

    /// The satellite's catalog record.
    pub const fn record(self) -> SatelliteRecord {
        match self {
            Satellite::Moon => SatelliteRecord {
                parent: Planet::Earth,
                orbit_radius: 3.0,
                revolution_ms: 30_000,
                mesh_radius: 0.25,
            },
            Satellite::Titan => SatelliteRecord {
                parent: Planet::Saturn,
                orbit_radius: 5.0,
                revolution_ms: 15_000,
                mesh_radius: 0.6,
            },
            Satellite::Io => SatelliteRecord {
                parent: Planet::Jupiter,
                orbit_radius: 5.0,
                revolution_ms: 10_000,
                mesh_radius: 0.5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sizes_are_fixed() {
        assert_eq!(Planet::ALL.len(), 9);
        assert_eq!(Satellite::ALL.len(), 3);
    }

    #[test]
    fn satellite_bindings() {
        assert_eq!(Satellite::Moon.record().parent, Planet::Earth);
        assert_eq!(Satellite::Titan.record().parent, Planet::Saturn);
        assert_eq!(Satellite::Io.record().parent, Planet::Jupiter);

        assert_eq!(Planet::Earth.satellite(), Some(Satellite::Moon));
        assert_eq!(Planet::Saturn.satellite(), Some(Satellite::Titan));
        assert_eq!(Planet::Jupiter.satellite(), Some(Satellite::Io));
        assert_eq!(Planet::Mercury.satellite(), None);
        assert_eq!(Planet::Sun.satellite(), None);
    }

    #[test]
    fn only_the_sun_skips_revolution() {
        for planet in Planet::ALL {
            let rec = planet.record();
            if planet == Planet::Sun {
                assert!(rec.revolution_ms.is_none());
            } else {
                assert!(rec.revolution_ms.unwrap() > 0);
            }
            assert!(rec.spin_ms > 0);
            assert!(rec.mesh_radius > 0.0);
        }
        for sat in Satellite::ALL {
            let rec = sat.record();
            assert!(rec.revolution_ms > 0);
            assert!(rec.orbit_radius > 0.0);
        }
    }

    #[test]
    fn uranus_is_the_only_tilted_body() {
        for planet in Planet::ALL {
            let expected = if planet == Planet::Uranus {
                SpinAxis::X
            } else {
                SpinAxis::Y
            };
            assert_eq!(planet.record().spin_axis, expected);
        }
    }

    #[test]
    fn retrograde_bodies() {
        for planet in Planet::ALL {
            let expected = planet == Planet::Venus || planet == Planet::Uranus;
            assert_eq!(planet.record().retrograde, expected);
        }
    }
}
