//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `DecalHeadlessPlugin` for testing placement logic
//! without a rendering or windowing backend.

use bevy::prelude::*;

use crate::bevy::plugin::{DecalHeadlessPlugin, DecalSet};
use crate::bevy::{
    CommandQueue, DecalCommand, DecalPlacedEvent, HostTarget, ManipulationEndedEvent, ModelChangedEvent,
    PlacementStoreRes, PointerQueue,
};
use crate::config::DecalConfig;
use crate::hit_test::HitResult;
use crate::manipulation::{PointerEvent, SessionKind};
use crate::slots::TargetModel;
use crate::store::{PlacementSnapshot, PlacementStore};

/// Messages observed since the app was created.
#[derive(Resource, Debug, Default)]
pub(crate) struct Recorded {
    pub placed: Vec<HitResult>,
    pub ended: Vec<SessionKind>,
    pub models: Vec<TargetModel>,
}

fn record_messages(
    mut recorded: ResMut<Recorded>,
    mut placed: MessageReader<DecalPlacedEvent>,
    mut ended: MessageReader<ManipulationEndedEvent>,
    mut models: MessageReader<ModelChangedEvent>,
) {
    recorded.placed.extend(placed.read().map(|event| event.hit));
    recorded.ended.extend(ended.read().map(|event| event.kind));
    recorded.models.extend(models.read().map(|event| event.model));
}

/// A headless Bevy app wrapper for testing.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Create a new test app with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DecalConfig::default())
    }

    pub fn with_config(config: DecalConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(DecalHeadlessPlugin::new(config));
        app.init_resource::<Recorded>();
        app.add_systems(Update, record_messages.after(DecalSet::Logic));
        // Run one update to initialize all resources
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Push a command to the command queue.
    pub fn push_command(&mut self, command: DecalCommand) {
        self.app.world().resource::<CommandQueue>().push(command);
    }

    /// Push a pointer event for the next update.
    pub fn push_pointer(&mut self, event: PointerEvent) {
        self.app.world().resource::<PointerQueue>().push(event);
    }

    pub fn store(&self) -> PlacementStore {
        self.app.world().resource::<PlacementStoreRes>().0.clone()
    }

    pub fn snapshot(&self) -> PlacementSnapshot {
        self.store().snapshot()
    }

    pub fn host_target(&self) -> &HostTarget {
        self.app.world().resource::<HostTarget>()
    }

    pub fn recorded(&self) -> &Recorded {
        self.app.world().resource::<Recorded>()
    }

    /// Get a reference to the World.
    pub fn world(&self) -> &World {
        self.app.world()
    }

    /// Get a mutable reference to the World.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
