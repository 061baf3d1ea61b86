//! Frame-rate independent damping used for camera easing.

use bevy::math::Vec3;

/// Move `current` toward `target` by the fraction `1 - e^(-rate * dt)`.
///
/// `rate` is in 1/seconds. Non-positive `dt` or `rate` leaves `current` unchanged.
pub fn lerp_toward(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    if dt <= 0.0 || rate <= 0.0 {
        return current;
    }
    current + (target - current) * (1.0 - (-rate * dt).exp())
}

/// Component-wise [`lerp_toward`].
pub fn damp_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    Vec3::new(
        lerp_toward(current.x, target.x, rate, dt),
        lerp_toward(current.y, target.y, rate, dt),
        lerp_toward(current.z, target.z, rate, dt),
    )
}
