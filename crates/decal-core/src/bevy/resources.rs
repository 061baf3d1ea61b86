//! ECS Resources for decal placement.
//!
//! The plain-data types live in the crate root; these wrap them so systems can
//! reach them through `Res`/`ResMut`.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::config::DecalConfig;
use crate::manipulation::{Manipulator, PointerEvent};
use crate::mesh::TargetMesh;
use crate::slots::{SlotId, TargetModel};
use crate::state::{BuiltInDecalId, DirectEdit, ImageRef};
use crate::store::PlacementStore;

/// Active decal configuration.
#[derive(Resource, Debug, Clone, Default, Deref)]
pub struct DecalConfigRes(pub DecalConfig);

/// Shared placement store. Clones of the inner store can be handed to UI code.
#[derive(Resource, Debug, Clone, Default, Deref)]
pub struct PlacementStoreRes(pub PlacementStore);

/// The drag state machine.
#[derive(Resource, Debug, Clone, Default, Deref, DerefMut)]
pub struct ManipulatorRes(pub Manipulator);

/// Geometry and world transform of the object being decorated.
///
/// Kept in step with the store's model and host rotation by `sync_host_target`.
#[derive(Resource, Debug, Clone)]
pub struct HostTarget {
    pub model: TargetModel,
    /// World-space position of the host origin.
    pub origin: Vec3,
    pub mesh: TargetMesh,
}

impl HostTarget {
    pub fn for_model(model: TargetModel) -> Self {
        Self {
            model,
            origin: Vec3::ZERO,
            mesh: TargetMesh::cuboid(model.host_size()),
        }
    }
}

impl Default for HostTarget {
    fn default() -> Self {
        Self::for_model(TargetModel::default())
    }
}

/// Ordered queue of pointer events waiting for the manipulator.
#[derive(Resource, Clone)]
pub struct PointerQueue {
    inner: Arc<Mutex<VecDeque<PointerEvent>>>,
}

impl PointerQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn push(&self, event: PointerEvent) {
        self.inner.lock().push_back(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&self) -> Vec<PointerEvent> {
        self.inner.lock().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Default for PointerQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Control-panel commands.
#[derive(Debug, Clone, PartialEq)]
pub enum DecalCommand {
    /// Flip between moving the decal and orbiting the host object.
    ToggleMovement,
    /// Switch to the next host model in the cycle.
    NextModel,
    SelectModel(TargetModel),
    SelectSlot(SlotId),
    SelectBuiltin(BuiltInDecalId),
    SetCustomImage(ImageRef),
    RemoveCustomImage,
    /// Show or hide the intro presentation.
    SetIntro(bool),
    /// Numeric field edits, clamped on apply.
    DirectEdit(DirectEdit),
    /// Forget the decal on the current slot so the next click places it.
    ClearPlacement,
}

/// Thread-safe command queue.
///
/// UI code pushes commands that are applied by `process_commands` on the next frame.
#[derive(Resource, Clone)]
pub struct CommandQueue {
    inner: Arc<Mutex<VecDeque<DecalCommand>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Push a command to be processed.
    pub fn push(&self, command: DecalCommand) {
        self.inner.lock().push_back(command);
    }

    /// Drain all pending commands.
    pub fn drain(&self) -> Vec<DecalCommand> {
        self.inner.lock().drain(..).collect()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Mouse-button bookkeeping for telling clicks from drags.
#[derive(Resource, Debug, Default)]
pub struct PointerTracker {
    /// NDC position where the primary button went down.
    pub press_origin: Option<Vec2>,
    /// Last NDC position forwarded as a move.
    pub last_position: Option<Vec2>,
    /// Set once the pointer travels past the click slop while pressed.
    pub dragged: bool,
}
