//! The free-flying spacecraft: the only state that survives across frames.

use glam::Vec3;

/// Where the spacecraft starts every run.
pub const START_POSITION: Vec3 = Vec3::new(20.0, 0.0, 0.0);

/// How far one thruster pulse moves the spacecraft, in scene units.
pub const MOVE_STEP: f32 = 0.5;

/// The four thruster directions. Each pulse moves exactly one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Thruster {
    PosX,
    NegX,
    PosY,
    NegY,
}

/// Current spacecraft position.
///
/// Initialized to [`START_POSITION`], mutated only by thruster pulses, never
/// reset while the app runs. Movement is unconstrained; there is no
/// collision with the planets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpacecraftState {
    pub position: Vec3,
}

impl Default for SpacecraftState {
    fn default() -> Self {
        Self {
            position: START_POSITION,
        }
    }
}

impl SpacecraftState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one thruster pulse.
    pub fn apply(&mut self, thruster: Thruster) {
        match thruster {
            Thruster::PosX => self.position.x += MOVE_STEP,
            Thruster::NegX => self.position.x -= MOVE_STEP,
            Thruster::PosY => self.position.y += MOVE_STEP,
            Thruster::NegY => self.position.y -= MOVE_STEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulses_step_one_axis_at_a_time() {
        let mut craft = SpacecraftState::new();
        assert_eq!(craft.position, Vec3::new(20.0, 0.0, 0.0));

        for thruster in [Thruster::PosX, Thruster::PosX, Thruster::NegY] {
            craft.apply(thruster);
        }
        assert_eq!(craft.position, Vec3::new(21.0, -0.5, 0.0));
    }

    #[test]
    fn opposite_pulses_cancel() {
        let mut craft = SpacecraftState::new();
        craft.apply(Thruster::PosY);
        craft.apply(Thruster::NegY);
        assert_eq!(craft.position, START_POSITION);
    }
}
