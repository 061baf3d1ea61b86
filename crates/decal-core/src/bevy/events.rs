//! ECS Messages for decal placement.
//!
//! Note: In Bevy 0.18+, buffered events use Message trait instead of Event.

use bevy::prelude::*;

use crate::hit_test::HitResult;
use crate::manipulation::SessionKind;
use crate::slots::TargetModel;

/// Message fired when a click placed the decal on the host surface.
#[derive(Message, Debug, Clone)]
pub struct DecalPlacedEvent {
    pub hit: HitResult,
}

/// Message fired when a drag session ends (pointer up or cancel).
#[derive(Message, Debug, Clone)]
pub struct ManipulationEndedEvent {
    pub kind: SessionKind,
}

/// Message fired when the host model changes, so renderers can swap meshes.
#[derive(Message, Debug, Clone)]
pub struct ModelChangedEvent {
    pub model: TargetModel,
}
