//! Orbit camera.
//!
//! Drag to orbit, wheel to zoom, distance and polar angle clamped so the
//! viewer can never dive under the floor or fly into the tree. While the
//! scene is formed the camera drifts slowly around the axis on its own.

use glam::{Mat4, Vec3};

const FOV_Y: f32 = 50.0;
const MIN_DISTANCE: f32 = 10.0;
const MAX_DISTANCE: f32 = 50.0;
/// Elevation limits: a little below the horizon up to nearly overhead.
const MIN_PITCH: f32 = -0.52;
const MAX_PITCH: f32 = 1.5;
/// Auto-orbit speed while the tree is formed, radians per second.
const AUTO_ROTATE_SPEED: f32 = 0.05;

pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 35.0,
            target: Vec3::ZERO,
        }
    }

    /// Apply a mouse drag in screen pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Apply scroll wheel zoom.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * 1.5).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Slow drift around the axis; called each frame while formed.
    pub fn auto_rotate(&mut self, dt: f32) {
        self.yaw += AUTO_ROTATE_SPEED * dt;
    }

    /// Camera world position on the orbit sphere.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(FOV_Y.to_radians(), aspect, 0.1, 200.0);
        proj * self.view_matrix()
    }

    /// Camera-space right and up axes in world coordinates, for billboards.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_front_of_the_scene() {
        let camera = OrbitCamera::new();
        let p = camera.position();
        assert!((p - Vec3::new(0.0, 0.0, 35.0)).length() < 1e-4);
    }

    #[test]
    fn zoom_respects_limits() {
        let mut camera = OrbitCamera::new();
        for _ in 0..100 {
            camera.zoom(5.0);
        }
        assert_eq!(camera.distance, MIN_DISTANCE);
        for _ in 0..100 {
            camera.zoom(-5.0);
        }
        assert_eq!(camera.distance, MAX_DISTANCE);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = OrbitCamera::new();
        camera.orbit(0.0, 10_000.0);
        assert_eq!(camera.pitch, MAX_PITCH);
        camera.orbit(0.0, -20_000.0);
        assert_eq!(camera.pitch, MIN_PITCH);
    }

    #[test]
    fn auto_rotate_advances_yaw() {
        let mut camera = OrbitCamera::new();
        let before = camera.yaw;
        camera.auto_rotate(1.0);
        assert!(camera.yaw > before);
    }
}
