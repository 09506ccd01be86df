//! Keyboard handling: four keys, four thruster pulses.

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::spacecraft::Thruster;

/// Maps a key to its thruster, if it is one of the four designated keys.
///
/// `W`/`S` move the spacecraft up and down, `A`/`D` left and right.
pub fn thruster_for_key(key: KeyCode) -> Option<Thruster> {
    match key {
        KeyCode::KeyD => Some(Thruster::PosX),
        KeyCode::KeyA => Some(Thruster::NegX),
        KeyCode::KeyW => Some(Thruster::PosY),
        KeyCode::KeyS => Some(Thruster::NegY),
        _ => None,
    }
}

/// Collects thruster pulses from window events until the frame loop drains
/// them.
///
/// Only key-down events count; the host's native key-repeat shows up as
/// additional key-down events and passes through untouched, so holding a
/// key keeps the spacecraft moving at the host's repeat rate.
#[derive(Default)]
pub struct Input {
    pending: Vec<Thruster>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event, queuing a pulse for recognized key-downs.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if event.state == ElementState::Pressed {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(thruster) = thruster_for_key(key) {
                        self.pending.push(thruster);
                    }
                }
            }
        }
    }

    /// Drain all pulses queued since the last drain, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Thruster> + '_ {
        self.pending.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_four_movement_keys_map() {
        assert_eq!(thruster_for_key(KeyCode::KeyD), Some(Thruster::PosX));
        assert_eq!(thruster_for_key(KeyCode::KeyA), Some(Thruster::NegX));
        assert_eq!(thruster_for_key(KeyCode::KeyW), Some(Thruster::PosY));
        assert_eq!(thruster_for_key(KeyCode::KeyS), Some(Thruster::NegY));
        assert_eq!(thruster_for_key(KeyCode::Space), None);
        assert_eq!(thruster_for_key(KeyCode::ArrowUp), None);
    }
}
