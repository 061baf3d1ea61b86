//! Render binding and host-target sync.
//!
//! Both systems poll the store revision and do nothing while it is unchanged.

use bevy::prelude::*;

use crate::bevy::{DecalMarker, HostObject, HostTarget, PlacementStoreRes};
use crate::mesh::TargetMesh;
use crate::orientation::{DECAL_FORWARD, euler_to_quat};

/// Lift of the decal quad off the surface along its facing axis.
const DECAL_SURFACE_OFFSET: f32 = 0.001;

/// System to keep the hit-test geometry in step with the store's model and host rotation.
pub fn sync_host_target(
    store: Res<PlacementStoreRes>,
    mut host: ResMut<HostTarget>,
    mut last_revision: Local<Option<u64>>,
) {
    let snapshot = store.snapshot();
    if *last_revision == Some(snapshot.revision) {
        return;
    }
    *last_revision = Some(snapshot.revision);

    let state = snapshot.state;
    if host.model != state.model {
        host.model = state.model;
        host.mesh = TargetMesh::cuboid(state.model.host_size());
    }
    let world = Mat4::from_rotation_translation(euler_to_quat(state.host_rotation), host.origin);
    if host.mesh.world != world {
        host.mesh.world = world;
    }
}

/// System to copy the placement snapshot onto the decal and host entities.
pub fn apply_placement(
    store: Res<PlacementStoreRes>,
    mut last_revision: Local<Option<u64>>,
    mut decals: Query<(&mut Transform, &mut Visibility), (With<DecalMarker>, Without<HostObject>)>,
    mut hosts: Query<&mut Transform, (With<HostObject>, Without<DecalMarker>)>,
) {
    let snapshot = store.snapshot();
    if *last_revision == Some(snapshot.revision) {
        return;
    }
    *last_revision = Some(snapshot.revision);

    let state = snapshot.state;
    let rotation = euler_to_quat(state.rotation);
    for (mut transform, mut visibility) in &mut decals {
        transform.translation = state.position + rotation * DECAL_FORWARD * DECAL_SURFACE_OFFSET;
        transform.rotation = rotation;
        transform.scale = Vec3::splat(state.scale);
        *visibility = if state.is_slot_placed() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    for mut transform in &mut hosts {
        transform.rotation = euler_to_quat(state.host_rotation);
    }
}
