//! The fixed viewpoint over the system.

use glam::{Mat4, Vec3};

/// Camera state: eye, look-at target, up vector, and projection parameters.
///
/// The demo never animates the camera; [`Camera::default`] is the one view
/// used for the whole run, floating above the ecliptic and looking at the
/// sun. Aspect ratio is supplied per frame from the surface so resizing the
/// window keeps spheres round.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 70.0, -155.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 1.0,
            far: 300.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// World-to-camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Camera-to-clip transform for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    /// Combined world-to-clip transform.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_moves_the_eye_to_the_origin() {
        let camera = Camera::new();
        let eye_in_view = camera.view_matrix().transform_point3(camera.eye);
        assert!(eye_in_view.abs_diff_eq(Vec3::ZERO, 1e-3), "got {eye_in_view}");
    }

    #[test]
    fn target_projects_to_screen_center() {
        let camera = Camera::new();
        let clip = camera.view_projection(2.0).project_point3(camera.target);
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
    }
}
