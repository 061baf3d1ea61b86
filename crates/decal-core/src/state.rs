//! Placement state: the decal transform and mode flags.
//!
//! `PlacementState` is plain data. Shared access goes through
//! [`PlacementStore`](crate::store::PlacementStore), which versions every write.

use std::collections::BTreeSet;

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{DecalConfig, InteractionMode};
use crate::limits::{RotationPolicy, commit_position, commit_rotation, commit_scale};
use crate::slots::{SlotId, TargetModel, slot_pose};

/// Position every image-source reset returns to.
const RESET_POSITION: Vec3 = Vec3::new(0.0, 0.04, 0.15);
/// Scale after removing a custom image.
const CUSTOM_REMOVED_SCALE: f32 = 0.2;
/// Scale after picking a built-in decal.
const BUILTIN_SELECTED_SCALE: f32 = 0.25;

/// Opaque reference to a user-provided image (URL, data URI or asset path).
///
/// Image bytes are owned by the upload collaborator; only the reference lives here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef(pub String);

/// Identifier of a decal image shipped with the application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuiltInDecalId(pub String);

impl Default for BuiltInDecalId {
    fn default() -> Self {
        Self("react".to_string())
    }
}

/// Which image the decal shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    BuiltIn(BuiltInDecalId),
    Custom(ImageRef),
}

impl Default for ImageSource {
    fn default() -> Self {
        ImageSource::BuiltIn(BuiltInDecalId::default())
    }
}

impl ImageSource {
    pub fn is_custom(&self) -> bool {
        matches!(self, ImageSource::Custom(_))
    }
}

/// Current drag session as seen by readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActiveManipulation {
    #[default]
    None,
    Moving,
    Scaling,
    Rotating,
}

/// A set of numeric field edits from a control panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectEdit {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub scale: Option<f32>,
}

/// The decal transform (host-local space) and interaction flags.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementState {
    /// Decal origin in host-local space.
    pub position: Vec3,
    /// Euler XYZ radians, host-local space.
    pub rotation: Vec3,
    /// Uniform decal scale.
    pub scale: f32,
    pub image_source: ImageSource,
    /// When false, decal-body drags orbit the host object instead of moving the decal.
    pub movement_enabled: bool,
    pub active_manipulation: ActiveManipulation,
    /// Host object orientation (Euler XYZ radians), edited by host-orbit drags.
    pub host_rotation: Vec3,
    pub model: TargetModel,
    pub slot: SlotId,
    /// Model/slot pairs that already carry a decal; clicks on these do not re-place.
    pub placed_slots: BTreeSet<(TargetModel, SlotId)>,
    /// Switching model places the decal on the new model's default slot.
    /// Off in click-to-place mode, where the first click does.
    pub place_on_model_change: bool,
    /// Intro presentation is showing; handles are hidden.
    pub intro: bool,
}

impl PlacementState {
    /// Startup state derived from `config`.
    ///
    /// In click-to-place mode the decal starts unplaced so the first click places it.
    pub fn new(config: &DecalConfig) -> Self {
        let pose = config.default_pose;
        let model = TargetModel::default();
        let place_on_model_change = config.interaction_mode != InteractionMode::ClickToPlace;
        let mut placed_slots = BTreeSet::new();
        if place_on_model_change {
            placed_slots.insert((model, SlotId::Front));
        }
        Self {
            position: Vec3::from_array(pose.position),
            rotation: Vec3::from_array(pose.rotation),
            scale: pose.scale,
            image_source: ImageSource::default(),
            movement_enabled: true,
            active_manipulation: ActiveManipulation::None,
            host_rotation: Vec3::ZERO,
            model,
            slot: SlotId::default(),
            placed_slots,
            place_on_model_change,
            intro: false,
        }
    }

    /// Whether the current slot of the current model carries the decal.
    pub fn is_slot_placed(&self) -> bool {
        self.placed_slots.contains(&(self.model, self.slot))
    }

    /// Record the decal as placed on the current slot.
    pub fn mark_placed(&mut self) {
        self.placed_slots.insert((self.model, self.slot));
    }

    /// Whether move/scale/rotate handles are shown and interactive.
    ///
    /// Handles are only hit-testable while drawn, so with movement disabled
    /// the move handle is unavailable even in handle mode and body drags
    /// orbit the host instead.
    pub fn handles_visible(&self, mode: InteractionMode) -> bool {
        !self.intro && self.movement_enabled && mode == InteractionMode::Handles
    }

    pub fn toggle_movement(&mut self) {
        self.movement_enabled = !self.movement_enabled;
    }

    /// Switch host model and jump to its default slot.
    ///
    /// The shirt keeps the current slot when it exists on the shirt; cubes
    /// always start at the front face. Scale is left untouched.
    pub fn select_model(&mut self, model: TargetModel) {
        self.model = model;
        let slot = match model {
            TargetModel::Shirt if model.has_slot(self.slot) => self.slot,
            _ => SlotId::Front,
        };
        if self.apply_slot(slot) && self.place_on_model_change {
            self.mark_placed();
        }
    }

    pub fn next_model(&mut self) {
        self.select_model(self.model.next());
    }

    /// Place the decal on `slot` of the current model at the slot's
    /// precomputed pose. Returns false when the model has no such slot.
    pub fn select_slot(&mut self, slot: SlotId) -> bool {
        if !self.apply_slot(slot) {
            return false;
        }
        self.mark_placed();
        true
    }

    fn apply_slot(&mut self, slot: SlotId) -> bool {
        let Some(pose) = slot_pose(self.model, slot) else {
            return false;
        };
        self.slot = slot;
        self.position = pose.position;
        self.rotation = pose.rotation;
        true
    }

    pub fn set_custom_image(&mut self, image: ImageRef) {
        self.image_source = ImageSource::Custom(image);
    }

    pub fn remove_custom_image(&mut self) {
        self.image_source = ImageSource::default();
        self.reset_pose(CUSTOM_REMOVED_SCALE);
    }

    pub fn select_builtin(&mut self, id: BuiltInDecalId) {
        self.image_source = ImageSource::BuiltIn(id);
        self.reset_pose(BUILTIN_SELECTED_SCALE);
    }

    fn reset_pose(&mut self, scale: f32) {
        self.position = RESET_POSITION;
        self.rotation = Vec3::ZERO;
        self.scale = scale;
    }

    /// Forget the decal on the current slot so the next surface click places it again.
    pub fn clear_placement(&mut self) {
        self.placed_slots.remove(&(self.model, self.slot));
    }

    /// Apply numeric edits through the limits policy.
    ///
    /// Returns false (and changes nothing) while a drag session is active.
    pub fn apply_direct_edit(&mut self, edit: &DirectEdit, config: &DecalConfig) -> bool {
        if self.active_manipulation != ActiveManipulation::None {
            return false;
        }
        if let Some(position) = edit.position {
            self.position = commit_position(position, config.position_bound);
        }
        if let Some(rotation) = edit.rotation {
            self.rotation = commit_rotation(rotation, RotationPolicy::Bounded(config.rotation_bound));
        }
        if let Some(scale) = edit.scale {
            self.scale = commit_scale(scale, config.scale_limits);
        }
        true
    }
}

impl Default for PlacementState {
    fn default() -> Self {
        Self::new(&DecalConfig::default())
    }
}
