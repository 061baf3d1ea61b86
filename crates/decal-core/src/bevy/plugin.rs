//! Bevy plugins for decal placement.
//!
//! Provides:
//! - `DecalHeadlessPlugin`: Logic-only plugin (no rendering/window dependencies) for headless testing
//! - `DecalViewerPlugin`: `DecalHeadlessPlugin` + window input, render binding and gizmos

use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::resources::*;
use crate::bevy::systems;
use crate::config::DecalConfig;
use crate::manipulation::Manipulator;
use crate::store::PlacementStore;

/// Per-frame ordering: input is collected, then applied, then rendered.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecalSet {
    Input,
    Logic,
    Binding,
}

// ============================================================================
// Headless Plugin (logic only, no rendering/window dependencies)
// ============================================================================

/// Headless plugin containing the placement logic without rendering or window dependencies.
///
/// Use this plugin in tests with `MinimalPlugins` to run the manipulation
/// systems without a windowing or rendering backend. Pointer events are fed
/// through `PointerQueue` and commands through `CommandQueue`.
#[derive(Default)]
pub struct DecalHeadlessPlugin {
    pub config: DecalConfig,
    pub store: Option<PlacementStore>,
    pub command_queue: Option<CommandQueue>,
    pub pointer_queue: Option<PointerQueue>,
}

impl DecalHeadlessPlugin {
    pub fn new(config: DecalConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

impl Plugin for DecalHeadlessPlugin {
    fn build(&self, app: &mut App) {
        let store = self
            .store
            .clone()
            .unwrap_or_else(|| PlacementStore::from_config(&self.config));
        let model = store.read(|state| state.model);

        // ====================================================================
        // Resources
        // ====================================================================
        app.insert_resource(DecalConfigRes(self.config.clone()))
            .insert_resource(PlacementStoreRes(store))
            .insert_resource(ManipulatorRes(Manipulator::new(self.config.clone())))
            .insert_resource(HostTarget::for_model(model))
            .insert_resource(self.command_queue.clone().unwrap_or_default())
            .insert_resource(self.pointer_queue.clone().unwrap_or_default());

        // ====================================================================
        // Messages
        // ====================================================================
        app.add_message::<DecalPlacedEvent>()
            .add_message::<ManipulationEndedEvent>()
            .add_message::<ModelChangedEvent>();

        // ====================================================================
        // Systems
        // ====================================================================
        app.configure_sets(
            Update,
            (DecalSet::Input, DecalSet::Logic, DecalSet::Binding).chain(),
        );

        app.add_systems(
            Update,
            (
                systems::process_commands,
                systems::sync_host_target,
                systems::process_pointer_input,
            )
                .chain()
                .in_set(DecalSet::Logic),
        );

        tracing::info!(
            "[plugin] decal placement ready (mode={:?})",
            self.config.interaction_mode
        );
    }
}

// ============================================================================
// Viewer Plugin (headless + window input + rendering)
// ============================================================================

/// Windowed plugin: the headless logic plus cursor tracking, render binding,
/// handle gizmos and camera easing.
///
/// Expects entities tagged `MainCamera`, `HostObject` and `DecalMarker`.
#[derive(Default)]
pub struct DecalViewerPlugin {
    pub config: DecalConfig,
    pub store: Option<PlacementStore>,
    pub command_queue: Option<CommandQueue>,
}

impl DecalViewerPlugin {
    pub fn new(config: DecalConfig, store: PlacementStore, command_queue: CommandQueue) -> Self {
        Self {
            config,
            store: Some(store),
            command_queue: Some(command_queue),
        }
    }
}

impl Plugin for DecalViewerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DecalHeadlessPlugin {
            config: self.config.clone(),
            store: self.store.clone(),
            command_queue: self.command_queue.clone(),
            pointer_queue: None,
        });

        app.init_resource::<PointerTracker>();

        app.add_systems(Update, systems::track_pointer.in_set(DecalSet::Input));
        app.add_systems(
            Update,
            (
                systems::apply_placement,
                systems::render_handles,
                systems::ease_camera_rig,
            )
                .in_set(DecalSet::Binding),
        );
    }
}
