//! Surface-normal alignment for newly placed decals.

use std::f32::consts::PI;

use bevy::math::{EulerRot, Quat, Vec3};

/// Canonical facing direction of a decal quad.
pub const DECAL_FORWARD: Vec3 = Vec3::Z;

/// Euler order used for every rotation stored in placement state.
pub const EULER_ORDER: EulerRot = EulerRot::XYZ;

const ANTIPARALLEL_EPSILON: f32 = 1e-6;

/// Shortest-arc rotation taking [`DECAL_FORWARD`] onto `normal_local`.
///
/// When the normal points straight back along -Z the arc is undefined, so the
/// decal is turned half a revolution about the up axis instead. A zero or
/// non-finite normal yields the identity.
pub fn align_quat(normal_local: Vec3) -> Quat {
    let Some(normal) = normal_local.try_normalize() else {
        return Quat::IDENTITY;
    };
    if DECAL_FORWARD.dot(normal) < -1.0 + ANTIPARALLEL_EPSILON {
        return Quat::from_axis_angle(Vec3::Y, PI);
    }
    Quat::from_rotation_arc(DECAL_FORWARD, normal)
}

/// [`align_quat`] expressed as Euler XYZ radians.
pub fn align(normal_local: Vec3) -> Vec3 {
    let (x, y, z) = align_quat(normal_local).to_euler(EULER_ORDER);
    Vec3::new(x, y, z)
}

/// Quaternion for an Euler XYZ rotation from placement state.
pub fn euler_to_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(EULER_ORDER, rotation.x, rotation.y, rotation.z)
}
