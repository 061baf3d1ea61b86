//! Pointer-to-ray conversion.
//!
//! Pointer positions are normalized device coordinates: x and y in `[-1, 1]`,
//! y pointing up.

use bevy::math::{Mat4, Vec2, Vec3};

use crate::hit_test::Ray;

/// Supplies world-space rays for normalized pointer positions.
pub trait RayProvider {
    /// `None` when no ray can be formed (no camera, degenerate projection).
    fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray>;
}

/// Minimal right-handed perspective camera looking at a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 2.5),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 25f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect.max(0.01), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

impl RayProvider for PerspectiveCamera {
    fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        if !ndc.is_finite() {
            return None;
        }
        let view_proj = self.view_projection();
        if view_proj.determinant().abs() < f32::EPSILON {
            return None;
        }
        let inverse = view_proj.inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }
}

/// Convert a window position in logical pixels (origin top-left, y down) to NDC.
pub fn window_to_ndc(position: Vec2, window_size: Vec2) -> Option<Vec2> {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        position.x / window_size.x * 2.0 - 1.0,
        1.0 - position.y / window_size.y * 2.0,
    ))
}
