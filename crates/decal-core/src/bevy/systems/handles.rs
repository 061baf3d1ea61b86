//! Gizmo rendering of the manipulation handles.

use bevy::prelude::*;

use crate::bevy::{DecalConfigRes, HostObject, PlacementStoreRes};
use crate::picking::{HandleKind, HandleLayout, decal_frame};
use crate::state::ActiveManipulation;

fn handle_color(kind: HandleKind) -> Color {
    match kind {
        HandleKind::Move => Color::srgb(0.29, 0.56, 0.89),
        HandleKind::Scale => Color::srgb(0.31, 0.78, 0.47),
        HandleKind::Rotate(_) => Color::srgb(0.94, 0.33, 0.31),
    }
}

fn is_active(kind: HandleKind, active: ActiveManipulation) -> bool {
    matches!(
        (kind, active),
        (HandleKind::Move, ActiveManipulation::Moving)
            | (HandleKind::Scale, ActiveManipulation::Scaling)
            | (HandleKind::Rotate(_), ActiveManipulation::Rotating)
    )
}

/// System to draw handle cubes around the decal while handles are visible.
pub fn render_handles(
    mut gizmos: Gizmos,
    store: Res<PlacementStoreRes>,
    config: Res<DecalConfigRes>,
    hosts: Query<&GlobalTransform, With<HostObject>>,
) {
    let state = store.snapshot().state;
    if !state.handles_visible(config.interaction_mode) || !state.is_slot_placed() {
        return;
    }
    let Ok(host) = hosts.single() else {
        return;
    };

    let frame = Mat4::from(host.affine()) * decal_frame(&state);
    let layout = HandleLayout::for_scale(state.scale);
    let size = Vec3::splat(HandleLayout::HANDLE_SIZE);
    for (kind, center) in layout.handles() {
        let world = frame * Mat4::from_scale_rotation_translation(size, Quat::IDENTITY, center);
        let color = if is_active(kind, state.active_manipulation) {
            Color::srgb(1.0, 0.85, 0.2)
        } else {
            handle_color(kind)
        };
        gizmos.cube(Transform::from_matrix(world), color);
    }
}
