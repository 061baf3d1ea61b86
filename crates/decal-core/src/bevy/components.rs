//! ECS Components for decal rendering.

use bevy::prelude::*;

/// Marker for the decal quad entity. Expected to be a child of the host object.
#[derive(Component, Debug, Clone, Default)]
pub struct DecalMarker;

/// Marker for the decorated object.
#[derive(Component, Debug, Clone, Default)]
pub struct HostObject;

/// Marker for the camera pointer rays are cast from.
#[derive(Component, Debug, Clone, Default)]
pub struct MainCamera;

/// Damped camera motion toward a home position. Orientation is left untouched,
/// so the intro offset slides the host object sideways in view.
#[derive(Component, Debug, Clone)]
pub struct CameraRig {
    /// Resting camera position.
    pub home: Vec3,
    /// Added to `home` while the intro is showing.
    pub intro_offset: Vec3,
    /// Damping rate in 1/seconds.
    pub rate: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            home: Vec3::new(0.0, 0.0, 2.0),
            intro_offset: Vec3::new(-0.6, 0.0, 0.0),
            rate: 4.0,
        }
    }
}

impl CameraRig {
    pub fn target(&self, intro: bool) -> Vec3 {
        if intro {
            self.home + self.intro_offset
        } else {
            self.home
        }
    }
}
