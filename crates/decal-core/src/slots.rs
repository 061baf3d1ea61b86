//! Named placement slots on the supported host models.
//!
//! Slots are the deterministic alternative to raycast placement: each one
//! carries a fixed local position and a precomputed orientation.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// Box-shaped host variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CubeKind {
    Standard,
    RectangularPrism,
    Tall,
}

impl CubeKind {
    /// Edge lengths in host-local units.
    pub fn size(self) -> Vec3 {
        match self {
            CubeKind::Standard => Vec3::new(0.3, 0.3, 0.3),
            CubeKind::RectangularPrism => Vec3::new(0.4, 0.2, 0.2),
            CubeKind::Tall => Vec3::new(0.2, 0.4, 0.2),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CubeKind::Standard => "Standard Cube",
            CubeKind::RectangularPrism => "Rectangular Prism",
            CubeKind::Tall => "Tall Cube",
        }
    }
}

/// The object being decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetModel {
    #[default]
    Shirt,
    Cube(CubeKind),
}

impl TargetModel {
    /// Cycle order of the model switcher.
    pub const CYCLE: [TargetModel; 4] = [
        TargetModel::Shirt,
        TargetModel::Cube(CubeKind::Standard),
        TargetModel::Cube(CubeKind::RectangularPrism),
        TargetModel::Cube(CubeKind::Tall),
    ];

    pub fn next(self) -> Self {
        let index = Self::CYCLE.iter().position(|m| *m == self).unwrap_or(0);
        Self::CYCLE[(index + 1) % Self::CYCLE.len()]
    }

    /// Extents of the box used as the hit-test stand-in for this model.
    pub fn host_size(self) -> Vec3 {
        match self {
            // The garment mesh itself comes from the asset collaborator; the
            // front slot sits on the +Z face of this box.
            TargetModel::Shirt => Vec3::new(0.5, 0.6, 0.3),
            TargetModel::Cube(kind) => kind.size(),
        }
    }

    /// Slots available on this model.
    pub fn slots(self) -> &'static [SlotId] {
        match self {
            TargetModel::Shirt => &[SlotId::Front, SlotId::LeftShoulder, SlotId::RightShoulder],
            TargetModel::Cube(_) => &[
                SlotId::Front,
                SlotId::Back,
                SlotId::Top,
                SlotId::Bottom,
                SlotId::Left,
                SlotId::Right,
            ],
        }
    }

    pub fn has_slot(self, slot: SlotId) -> bool {
        self.slots().contains(&slot)
    }
}

impl fmt::Display for TargetModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetModel::Shirt => write!(f, "Shirt"),
            TargetModel::Cube(kind) => write!(f, "{}", kind.display_name()),
        }
    }
}

/// A named mounting position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotId {
    #[default]
    Front,
    Back,
    Top,
    Bottom,
    Left,
    Right,
    LeftShoulder,
    RightShoulder,
}

/// Position and orientation of a slot in host-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotPose {
    pub position: Vec3,
    /// Euler XYZ radians.
    pub rotation: Vec3,
}

/// Look up the pose of `slot` on `model`. `None` when the model has no such slot.
pub fn slot_pose(model: TargetModel, slot: SlotId) -> Option<SlotPose> {
    match model {
        TargetModel::Shirt => shirt_slot(slot),
        TargetModel::Cube(kind) => cube_slot(kind.size(), slot),
    }
}

fn shirt_slot(slot: SlotId) -> Option<SlotPose> {
    let (position, rotation) = match slot {
        SlotId::Front => (Vec3::new(0.0, 0.04, 0.15), Vec3::ZERO),
        SlotId::LeftShoulder => (Vec3::new(-0.1, 0.1, 0.08), Vec3::new(-0.5, -0.3, 0.0)),
        SlotId::RightShoulder => (Vec3::new(0.1, 0.1, 0.08), Vec3::new(-0.5, 0.3, 0.0)),
        _ => return None,
    };
    Some(SlotPose { position, rotation })
}

fn cube_slot(size: Vec3, slot: SlotId) -> Option<SlotPose> {
    let half = size * 0.5;
    let (position, rotation) = match slot {
        SlotId::Front => (Vec3::new(0.0, 0.0, half.z), Vec3::ZERO),
        SlotId::Back => (Vec3::new(0.0, 0.0, -half.z), Vec3::new(0.0, PI, 0.0)),
        SlotId::Top => (Vec3::new(0.0, half.y, 0.0), Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
        SlotId::Bottom => (Vec3::new(0.0, -half.y, 0.0), Vec3::new(FRAC_PI_2, 0.0, 0.0)),
        SlotId::Left => (Vec3::new(-half.x, 0.0, 0.0), Vec3::new(0.0, -FRAC_PI_2, 0.0)),
        SlotId::Right => (Vec3::new(half.x, 0.0, 0.0), Vec3::new(0.0, FRAC_PI_2, 0.0)),
        SlotId::LeftShoulder | SlotId::RightShoulder => return None,
    };
    Some(SlotPose { position, rotation })
}
