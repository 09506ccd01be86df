//! The scene composer: one catalog walk per frame, one ordered draw list out.
//!
//! Composition owns no state. Given the elapsed time and the spacecraft
//! position it produces the full list of (mesh, world matrix) commands for
//! the frame: nine planets in catalog order, each satellite emitted
//! immediately before its parent using the parent's just-computed world
//! matrix, and the spacecraft last. The renderer depth-tests, so the order
//! only defines how the list is built, not what ends up on screen.

use glam::Mat4;

use crate::bodies::{Planet, Satellite};
use crate::motion;
use crate::spacecraft::SpacecraftState;

/// Which of the scene's meshes a draw command refers to.
///
/// Meshes are created once at startup; commands carry keys, not buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyMesh {
    Planet(Planet),
    Satellite(Satellite),
    Spacecraft,
}

/// One mesh to draw with its world transform for this frame.
#[derive(Clone, Copy, Debug)]
pub struct DrawCommand {
    pub mesh: BodyMesh,
    pub world: Mat4,
}

/// Number of commands in every frame's draw list.
pub const DRAW_COUNT: usize = Planet::ALL.len() + Satellite::ALL.len() + 1;

/// Build the frame's draw list.
pub fn compose(elapsed_ms: u64, spacecraft: &SpacecraftState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(DRAW_COUNT);

    for planet in Planet::ALL {
        let world = motion::planet_world(planet, elapsed_ms);
        if let Some(satellite) = planet.satellite() {
            commands.push(DrawCommand {
                mesh: BodyMesh::Satellite(satellite),
                world: motion::satellite_world(satellite, elapsed_ms, world),
            });
        }
        commands.push(DrawCommand { mesh: BodyMesh::Planet(planet), world });
    }

    // Pure translation; the spacecraft never rotates.
    commands.push(DrawCommand {
        mesh: BodyMesh::Spacecraft,
        world: Mat4::from_translation(spacecraft.position),
    });

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn draw_list_has_every_body_once() {
        let commands = compose(0, &SpacecraftState::new());
        assert_eq!(commands.len(), DRAW_COUNT);
        assert_eq!(commands.len(), 13);

        for planet in Planet::ALL {
            let n = commands
                .iter()
                .filter(|c| c.mesh == BodyMesh::Planet(planet))
                .count();
            assert_eq!(n, 1, "{planet:?} drawn {n} times");
        }
        for sat in Satellite::ALL {
            let n = commands
                .iter()
                .filter(|c| c.mesh == BodyMesh::Satellite(sat))
                .count();
            assert_eq!(n, 1, "{sat:?} drawn {n} times");
        }
    }

    #[test]
    fn satellites_come_right_before_their_parents() {
        let commands = compose(4_321, &SpacecraftState::new());
        for sat in Satellite::ALL {
            let at = commands
                .iter()
                .position(|c| c.mesh == BodyMesh::Satellite(sat))
                .unwrap();
            assert_eq!(
                commands[at + 1].mesh,
                BodyMesh::Planet(sat.record().parent),
                "{sat:?} not followed by its parent"
            );
        }
    }

    #[test]
    fn spacecraft_is_last_and_never_rotates() {
        let mut craft = SpacecraftState::new();
        craft.position = Vec3::new(21.0, -0.5, 0.0);
        let commands = compose(99_999, &craft);

        let last = commands.last().unwrap();
        assert_eq!(last.mesh, BodyMesh::Spacecraft);
        // Rotation block is the identity, translation is the position.
        assert_eq!(last.world.x_axis, Vec4::X);
        assert_eq!(last.world.y_axis, Vec4::Y);
        assert_eq!(last.world.z_axis, Vec4::Z);
        assert_eq!(last.world.w_axis.truncate(), craft.position);
    }

    #[test]
    fn satellite_worlds_use_the_parent_frame() {
        let t = 12_345;
        let commands = compose(t, &SpacecraftState::new());
        for sat in Satellite::ALL {
            let cmd = commands
                .iter()
                .find(|c| c.mesh == BodyMesh::Satellite(sat))
                .unwrap();
            let parent_world = motion::planet_world(sat.record().parent, t);
            let expected = motion::satellite_world(sat, t, parent_world);
            assert!(cmd.world.abs_diff_eq(expected, 1e-6));
        }
    }
}
