//! Keyboard shortcuts standing in for the settings panel.

use bevy::prelude::*;
use decal_core::bevy::{CommandQueue, DecalCommand, PlacementStoreRes};
use decal_core::{BuiltInDecalId, DirectEdit, SlotId, TargetModel};

const BUILTIN_KEYS: [(KeyCode, &str); 3] = [
    (KeyCode::Digit1, "react"),
    (KeyCode::Digit2, "three2"),
    (KeyCode::Digit3, "pmndrs"),
];

/// Rotation step for the bracket keys, in radians.
const ROTATE_STEP: f32 = 0.1;

/// Slot after (or before, when `forward` is false) `current` on `model`.
fn cycle_slot(model: TargetModel, current: SlotId, forward: bool) -> Option<SlotId> {
    let slots = model.slots();
    if slots.is_empty() {
        return None;
    }
    let index = slots.iter().position(|slot| *slot == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % slots.len()
    } else {
        (index + slots.len() - 1) % slots.len()
    };
    Some(slots[next])
}

/// System translating key presses into decal commands.
pub fn keyboard_controls(keys: Res<ButtonInput<KeyCode>>, queue: Res<CommandQueue>, store: Res<PlacementStoreRes>) {
    if keys.just_pressed(KeyCode::KeyM) {
        queue.push(DecalCommand::ToggleMovement);
    }
    if keys.just_pressed(KeyCode::Tab) {
        queue.push(DecalCommand::NextModel);
    }
    if keys.just_pressed(KeyCode::KeyC) {
        queue.push(DecalCommand::ClearPlacement);
    }
    if keys.any_just_pressed([KeyCode::Delete, KeyCode::Backspace]) {
        queue.push(DecalCommand::RemoveCustomImage);
    }
    for (key, id) in BUILTIN_KEYS {
        if keys.just_pressed(key) {
            queue.push(DecalCommand::SelectBuiltin(BuiltInDecalId(id.to_string())));
        }
    }

    let (intro, model, slot, rotation) = store.read(|state| (state.intro, state.model, state.slot, state.rotation));
    if keys.just_pressed(KeyCode::KeyI) {
        queue.push(DecalCommand::SetIntro(!intro));
    }
    for (key, forward) in [(KeyCode::PageDown, true), (KeyCode::PageUp, false)] {
        if keys.just_pressed(key) {
            if let Some(next) = cycle_slot(model, slot, forward) {
                queue.push(DecalCommand::SelectSlot(next));
            }
        }
    }
    for (key, step) in [(KeyCode::BracketLeft, -ROTATE_STEP), (KeyCode::BracketRight, ROTATE_STEP)] {
        if keys.just_pressed(key) {
            queue.push(DecalCommand::DirectEdit(DirectEdit {
                rotation: Some(Vec3::new(rotation.x, rotation.y, rotation.z + step)),
                ..Default::default()
            }));
        }
    }
}
