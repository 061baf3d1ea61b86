//! Camera rig easing.

use bevy::prelude::*;

use crate::bevy::{CameraRig, PlacementStoreRes};
use crate::easing::damp_vec3;

/// System to ease the camera toward its rig target.
pub fn ease_camera_rig(
    time: Res<Time>,
    store: Res<PlacementStoreRes>,
    mut cameras: Query<(&CameraRig, &mut Transform)>,
) {
    let intro = store.read(|state| state.intro);
    let dt = time.delta_secs();
    for (rig, mut transform) in &mut cameras {
        let target = rig.target(intro);
        transform.translation = damp_vec3(transform.translation, target, rig.rate, dt);
    }
}
