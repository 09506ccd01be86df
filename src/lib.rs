//! # Orrery
//!
//! A stylized real-time solar system: the sun, eight planets, three moons,
//! and a free-flying spacecraft cube, animated from wall-clock time and
//! rendered with wgpu.
//!
//! The interesting part lives in three pure modules: [`bodies`] holds the
//! catalog of per-body constants, [`motion`] turns elapsed milliseconds
//! into world matrices (orbits compose around the origin, moons nest under
//! their parents), and [`scene`] walks the catalog into an ordered draw
//! list once per frame. Everything else is the glue that puts that list on
//! screen.
//!
//! ```no_run
//! fn main() {
//!     orrery::run().unwrap();
//! }
//! ```
//!
//! Fly the spacecraft with `W`/`A`/`S`/`D`.

mod app;
pub mod bodies;
mod camera;
mod gpu;
mod input;
mod mesh;
pub mod motion;
pub mod scene;
mod scene_pass;
mod spacecraft;

pub use app::{AppConfig, run, run_with_config};
pub use bodies::{Planet, PlanetRecord, Satellite, SatelliteRecord, SpinAxis};
pub use camera::Camera;
pub use gpu::{GpuContext, InitError};
pub use input::{Input, thruster_for_key};
pub use mesh::{Mesh, SceneMeshes, Vertex3d, box_geometry, sphere_geometry};
pub use scene::{BodyMesh, DrawCommand, compose};
pub use scene_pass::{Material, PointLight, ScenePass};
pub use spacecraft::{SpacecraftState, Thruster};

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec3, Vec4};

// Re-export the winit key type input mapping speaks in
pub use winit::keyboard::KeyCode;
