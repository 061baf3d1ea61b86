//! Classifying what a pointer ray is over: a handle, the decal body, or the host surface.

use bevy::math::{Mat4, Vec3};

use crate::config::InteractionMode;
use crate::hit_test::{Ray, invert_affine, resolve};
use crate::mesh::TargetMesh;
use crate::orientation::euler_to_quat;
use crate::state::PlacementState;

/// Axis a rotate handle turns the decal about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationAxis {
    Y,
    Z,
}

/// A discrete manipulation handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Move,
    Scale,
    Rotate(RotationAxis),
}

/// The element a pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionTarget {
    DecalBody,
    Handle(HandleKind),
    /// The host object, outside the decal.
    Surface,
}

/// Handle positions in the decal's own frame, derived from the decal scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLayout {
    pub scale: f32,
}

impl HandleLayout {
    /// Edge length of each handle cube.
    pub const HANDLE_SIZE: f32 = 0.03;
    /// Handles hover slightly in front of the decal plane.
    const LIFT: f32 = 0.01;
    /// Offset of the edge handles as a fraction of the decal scale.
    const REACH: f32 = 0.7;

    pub fn for_scale(scale: f32) -> Self {
        Self { scale }
    }

    pub fn center(&self, kind: HandleKind) -> Vec3 {
        let reach = self.scale * Self::REACH;
        match kind {
            HandleKind::Move => Vec3::new(0.0, 0.0, Self::LIFT),
            HandleKind::Scale => Vec3::new(0.0, reach, Self::LIFT),
            HandleKind::Rotate(RotationAxis::Z) => Vec3::new(reach, 0.0, Self::LIFT),
            HandleKind::Rotate(RotationAxis::Y) => Vec3::new(0.0, -reach, Self::LIFT),
        }
    }

    pub fn handles(&self) -> [(HandleKind, Vec3); 4] {
        [
            HandleKind::Move,
            HandleKind::Scale,
            HandleKind::Rotate(RotationAxis::Z),
            HandleKind::Rotate(RotationAxis::Y),
        ]
        .map(|kind| (kind, self.center(kind)))
    }

    /// Nearest handle hit by a ray given in the decal's frame, with its ray parameter.
    pub fn hit_test(&self, origin: Vec3, direction: Vec3) -> Option<(HandleKind, f32)> {
        let half = Vec3::splat(Self::HANDLE_SIZE * 0.5);
        self.handles()
            .into_iter()
            .filter_map(|(kind, center)| {
                ray_aabb(origin, direction, center - half, center + half).map(|t| (kind, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Decal frame (position and rotation, no scale) in host-local space.
pub fn decal_frame(state: &PlacementState) -> Mat4 {
    Mat4::from_rotation_translation(euler_to_quat(state.rotation), state.position)
}

/// Classify `ray` against the decal and host.
///
/// Handles take priority when visible, then the decal body, then the host
/// surface. `None` when the ray hits nothing.
pub fn pick_target(
    ray: &Ray,
    host: &TargetMesh,
    state: &PlacementState,
    mode: InteractionMode,
) -> Option<InteractionTarget> {
    if state.is_slot_placed() {
        if let Some(to_decal) = invert_affine(host.world * decal_frame(state)) {
            let origin = to_decal.transform_point3(ray.origin);
            let direction = to_decal.transform_vector3(ray.direction);

            if state.handles_visible(mode) {
                let layout = HandleLayout::for_scale(state.scale);
                if let Some((kind, _)) = layout.hit_test(origin, direction) {
                    return Some(InteractionTarget::Handle(kind));
                }
            }
            if hits_decal_body(origin, direction, state.scale) {
                return Some(InteractionTarget::DecalBody);
            }
        }
    }

    resolve(ray, host).map(|_| InteractionTarget::Surface)
}

/// The decal body is a `scale`-sized square in the decal's XY plane.
fn hits_decal_body(origin: Vec3, direction: Vec3, scale: f32) -> bool {
    if direction.z.abs() < f32::EPSILON {
        return false;
    }
    let t = -origin.z / direction.z;
    if t < 0.0 {
        return false;
    }
    let point = origin + direction * t;
    let half = scale * 0.5;
    point.x.abs() <= half && point.y.abs() <= half
}

/// Slab test. Returns the entry parameter, or zero when the origin is inside the box.
fn ray_aabb(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (t0, t1) = ((min[axis] - o) * inv, (max[axis] - o) * inv);
        let (near, far) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
        t_min = t_min.max(near);
        t_max = t_max.min(far);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray_down_z(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 3.0), Vec3::NEG_Z).unwrap()
    }

    fn shirt_host() -> TargetMesh {
        TargetMesh::cuboid(Vec3::new(0.5, 0.6, 0.3))
    }

    #[test]
    fn test_handle_layout_follows_scale() {
        let layout = HandleLayout::for_scale(0.2);
        assert!(layout.center(HandleKind::Scale).abs_diff_eq(Vec3::new(0.0, 0.14, 0.01), 1e-6));
        assert!(
            layout
                .center(HandleKind::Rotate(RotationAxis::Z))
                .abs_diff_eq(Vec3::new(0.14, 0.0, 0.01), 1e-6)
        );
    }

    #[test]
    fn test_layout_hit_test_picks_scale_handle() {
        let layout = HandleLayout::for_scale(0.2);
        let hit = layout.hit_test(Vec3::new(0.0, 0.14, 1.0), Vec3::NEG_Z);
        assert_eq!(hit.map(|(kind, _)| kind), Some(HandleKind::Scale));
        assert!(layout.hit_test(Vec3::new(0.5, 0.5, 1.0), Vec3::NEG_Z).is_none());
    }

    #[test]
    fn test_pick_handle_before_body() {
        let state = PlacementState::default();
        let scale_handle = state.position + HandleLayout::for_scale(state.scale).center(HandleKind::Scale);
        let ray = ray_down_z(scale_handle.x, scale_handle.y);

        let target = pick_target(&ray, &shirt_host(), &state, InteractionMode::Handles);
        assert_eq!(target, Some(InteractionTarget::Handle(HandleKind::Scale)));
    }

    #[test]
    fn test_handles_not_pickable_outside_handle_mode() {
        let state = PlacementState::default();
        let ray = ray_down_z(state.position.x, state.position.y);

        assert_eq!(
            pick_target(&ray, &shirt_host(), &state, InteractionMode::DragAnywhere),
            Some(InteractionTarget::DecalBody)
        );
        assert_eq!(
            pick_target(&ray, &shirt_host(), &state, InteractionMode::Handles),
            Some(InteractionTarget::Handle(HandleKind::Move))
        );
    }

    #[test]
    fn test_surface_and_miss() {
        let state = PlacementState::default();
        assert_eq!(
            pick_target(&ray_down_z(-0.2, -0.25), &shirt_host(), &state, InteractionMode::Handles),
            Some(InteractionTarget::Surface)
        );
        assert_eq!(
            pick_target(&ray_down_z(2.0, 2.0), &shirt_host(), &state, InteractionMode::Handles),
            None
        );
    }

    #[test]
    fn test_unplaced_decal_is_not_pickable() {
        let mut state = PlacementState::default();
        state.clear_placement();
        let ray = ray_down_z(state.position.x, state.position.y);
        assert_eq!(
            pick_target(&ray, &shirt_host(), &state, InteractionMode::DragAnywhere),
            Some(InteractionTarget::Surface)
        );
    }

    #[test]
    fn test_ray_aabb_inside_and_parallel() {
        let min = Vec3::splat(-1.0);
        let max = Vec3::splat(1.0);
        assert_eq!(ray_aabb(Vec3::ZERO, Vec3::X, min, max), Some(0.0));
        assert!(ray_aabb(Vec3::new(0.0, 2.0, -5.0), Vec3::Z, min, max).is_none());
        let t = ray_aabb(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, min, max).unwrap();
        assert!((t - 4.0).abs() < 1e-6);
    }
}
