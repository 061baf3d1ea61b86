//! Command processing system.
//!
//! Applies control-panel commands to the placement store.

use bevy::prelude::*;

use crate::bevy::{CommandQueue, DecalCommand, DecalConfigRes, ModelChangedEvent, PlacementStoreRes};

/// System to process all commands from the external command queue.
pub fn process_commands(
    command_queue: Res<CommandQueue>,
    store: Res<PlacementStoreRes>,
    config: Res<DecalConfigRes>,
    mut model_events: MessageWriter<ModelChangedEvent>,
) {
    for command in command_queue.drain() {
        match command {
            DecalCommand::ToggleMovement => {
                let enabled = store.update(|state| {
                    state.toggle_movement();
                    state.movement_enabled
                });
                tracing::info!("[command] ToggleMovement: enabled={}", enabled);
            }
            DecalCommand::NextModel => {
                let model = store.update(|state| {
                    state.next_model();
                    state.model
                });
                tracing::info!("[command] NextModel: {}", model);
                model_events.write(ModelChangedEvent { model });
            }
            DecalCommand::SelectModel(model) => {
                store.update(|state| state.select_model(model));
                tracing::info!("[command] SelectModel: {}", model);
                model_events.write(ModelChangedEvent { model });
            }
            DecalCommand::SelectSlot(slot) => {
                if store.update(|state| state.select_slot(slot)) {
                    tracing::info!("[command] SelectSlot: {:?}", slot);
                } else {
                    tracing::warn!("[command] SelectSlot: {:?} does not exist on this model", slot);
                }
            }
            DecalCommand::SelectBuiltin(id) => {
                tracing::info!("[command] SelectBuiltin: {}", id.0);
                store.update(|state| state.select_builtin(id));
            }
            DecalCommand::SetCustomImage(image) => {
                tracing::info!("[command] SetCustomImage: {}", image.0);
                store.update(|state| state.set_custom_image(image));
            }
            DecalCommand::RemoveCustomImage => {
                tracing::info!("[command] RemoveCustomImage");
                store.update(|state| state.remove_custom_image());
            }
            DecalCommand::SetIntro(intro) => {
                tracing::info!("[command] SetIntro: {}", intro);
                store.update(|state| state.intro = intro);
            }
            DecalCommand::DirectEdit(edit) => {
                if !store.update(|state| state.apply_direct_edit(&edit, &config)) {
                    tracing::debug!("[command] DirectEdit dropped: manipulation in progress");
                }
            }
            DecalCommand::ClearPlacement => {
                tracing::info!("[command] ClearPlacement");
                store.update(|state| state.clear_placement());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bevy::test_utils::TestApp;
    use crate::bevy::DecalCommand;
    use crate::slots::{CubeKind, SlotId, TargetModel};
    use crate::state::{BuiltInDecalId, DirectEdit, ImageRef, ImageSource};

    #[test]
    fn test_next_model_switches_host_target() {
        let mut app = TestApp::new();
        app.push_command(DecalCommand::NextModel);
        app.update();

        let state = app.snapshot().state;
        assert_eq!(state.model, TargetModel::Cube(CubeKind::Standard));
        assert_eq!(app.host_target().model, state.model);
        assert_eq!(app.recorded().models, vec![state.model]);
    }

    #[test]
    fn test_image_commands() {
        let mut app = TestApp::new();
        app.push_command(DecalCommand::SetCustomImage(ImageRef("upload://a.png".to_string())));
        app.update();
        assert!(app.snapshot().state.image_source.is_custom());

        app.push_command(DecalCommand::SelectBuiltin(BuiltInDecalId("three2".to_string())));
        app.update();
        let state = app.snapshot().state;
        assert_eq!(state.image_source, ImageSource::BuiltIn(BuiltInDecalId("three2".to_string())));
        assert!((state.scale - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_slot_keeps_state() {
        let mut app = TestApp::new();
        let before = app.snapshot().state;
        app.push_command(DecalCommand::SelectSlot(SlotId::Bottom));
        app.update();
        assert_eq!(app.snapshot().state, before);
    }

    #[test]
    fn test_direct_edit_is_clamped() {
        let mut app = TestApp::new();
        app.push_command(DecalCommand::DirectEdit(DirectEdit {
            scale: Some(3.0),
            ..DirectEdit::default()
        }));
        app.update();
        assert!((app.snapshot().state.scale - 0.5).abs() < 1e-6);
    }
}
