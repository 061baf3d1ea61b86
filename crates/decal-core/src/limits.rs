//! Clamp & limits policy applied before any value reaches the placement store.
//!
//! Every function here is pure: it returns the value that may be committed and
//! leaves writing it to the caller. Out-of-range input is pinned to the limit
//! rather than rejected, so a drag keeps moving smoothly along the boundary.

use std::f32::consts::{FRAC_PI_4, FRAC_PI_6};

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// Smallest uniform decal scale.
pub const MIN_SCALE: f32 = 0.05;
/// Largest uniform decal scale.
pub const MAX_SCALE: f32 = 0.5;

/// Inclusive bounds for the uniform decal scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleLimits {
    pub min: f32,
    pub max: f32,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min: MIN_SCALE,
            max: MAX_SCALE,
        }
    }
}

/// Per-axis rotation limits used when the host object is the thing being rotated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostLimits {
    /// Limit for rotation about X (radians).
    pub pitch: f32,
    /// Limit for rotation about Y (radians).
    pub yaw: f32,
}

impl Default for HostLimits {
    fn default() -> Self {
        Self {
            pitch: FRAC_PI_6,
            yaw: FRAC_PI_4,
        }
    }
}

/// How a rotation candidate is treated on commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationPolicy {
    /// Decal rotation: passed through unmodified.
    Free,
    /// Host rotation: pitch and yaw pinned to `[-limit, +limit]`, roll untouched.
    Constrained(HostLimits),
    /// Direct numeric edits: every axis pinned to `[-bound, +bound]`.
    Bounded(f32),
}

/// Pin a scale candidate to `limits`.
///
/// NaN collapses to `limits.min` so the committed scale is always inside the bounds.
pub fn commit_scale(value: f32, limits: ScaleLimits) -> f32 {
    if value.is_nan() {
        return limits.min;
    }
    value.clamp(limits.min, limits.max)
}

/// Apply `policy` to a rotation candidate (Euler radians).
pub fn commit_rotation(value: Vec3, policy: RotationPolicy) -> Vec3 {
    let value = finite_or_zero(value);
    match policy {
        RotationPolicy::Free => value,
        RotationPolicy::Constrained(limits) => Vec3::new(
            value.x.clamp(-limits.pitch, limits.pitch),
            value.y.clamp(-limits.yaw, limits.yaw),
            value.z,
        ),
        RotationPolicy::Bounded(bound) => value.clamp(Vec3::splat(-bound), Vec3::splat(bound)),
    }
}

/// Keep a position candidate within the object's normalized local bounds.
pub fn commit_position(value: Vec3, bound: f32) -> Vec3 {
    finite_or_zero(value).clamp(Vec3::splat(-bound), Vec3::splat(bound))
}

/// Replace non-finite components with zero. Infinities are kept so the clamp
/// above pins them to the boundary.
fn finite_or_zero(value: Vec3) -> Vec3 {
    Vec3::new(
        if value.x.is_nan() { 0.0 } else { value.x },
        if value.y.is_nan() { 0.0 } else { value.y },
        if value.z.is_nan() { 0.0 } else { value.z },
    )
}
