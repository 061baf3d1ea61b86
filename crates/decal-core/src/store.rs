//! Versioned shared placement state.
//!
//! One store is shared by the manipulator, the control panel and the renderer.
//! Writers go through [`PlacementStore::update`], which applies the whole change
//! under one write lock and bumps the revision once, so readers never observe a
//! half-applied edit.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::DecalConfig;
use crate::state::PlacementState;

/// A consistent copy of the state taken under one read lock.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSnapshot {
    pub revision: u64,
    pub state: PlacementState,
}

/// Cheaply clonable handle to the shared placement state.
#[derive(Clone, Default)]
pub struct PlacementStore {
    inner: Arc<RwLock<PlacementStoreInner>>,
}

#[derive(Default)]
struct PlacementStoreInner {
    state: PlacementState,
    revision: u64,
}

impl PlacementStore {
    pub fn new(state: PlacementState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(PlacementStoreInner { state, revision: 0 })),
        }
    }

    pub fn from_config(config: &DecalConfig) -> Self {
        Self::new(PlacementState::new(config))
    }

    /// Get a copy of the current state with its revision.
    pub fn snapshot(&self) -> PlacementSnapshot {
        let inner = self.inner.read();
        PlacementSnapshot {
            revision: inner.revision,
            state: inner.state.clone(),
        }
    }

    /// Get revision for change detection.
    pub fn revision(&self) -> u64 {
        self.inner.read().revision
    }

    /// Read a value out of the state without cloning all of it.
    pub fn read<R>(&self, f: impl FnOnce(&PlacementState) -> R) -> R {
        f(&self.inner.read().state)
    }

    /// Apply `f` atomically. The revision is bumped exactly once per call.
    pub fn update<R>(&self, f: impl FnOnce(&mut PlacementState) -> R) -> R {
        let mut inner = self.inner.write();
        let result = f(&mut inner.state);
        inner.revision += 1;
        result
    }
}

impl std::fmt::Debug for PlacementStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("PlacementStore")
            .field("revision", &inner.revision)
            .field("state", &inner.state)
            .finish()
    }
}
