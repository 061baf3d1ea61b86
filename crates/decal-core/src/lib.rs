//! Decal-Live Core Library
//!
//! Places a flat image on the surface of a 3D object and lets the user move,
//! scale and rotate it from pointer input.
//!
//! The library is split in two layers:
//! - Plain modules: placement state, hit testing, orientation, limits and the
//!   drag state machine. No ECS involvement, usable from any event loop.
//! - `bevy`: resources, messages and systems that wire the plain modules into
//!   a Bevy app (headless for tests, windowed for the viewer).

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod camera;
pub mod config;
pub mod easing;
pub mod hit_test;
pub mod limits;
pub mod manipulation;
pub mod mesh;
pub mod orientation;
pub mod picking;
pub mod slots;
pub mod state;
pub mod store;

// Bevy integration
pub mod bevy;

pub use camera::{PerspectiveCamera, RayProvider, window_to_ndc};
pub use config::{ConfigError, DecalConfig, DefaultPose, InteractionMode};
pub use easing::{damp_vec3, lerp_toward};
pub use hit_test::{HitResult, Ray, resolve};
pub use limits::{
    HostLimits, MAX_SCALE, MIN_SCALE, RotationPolicy, ScaleLimits, commit_position, commit_rotation,
    commit_scale,
};
pub use manipulation::{
    AnchorValue, DragAnchor, IgnoreReason, Manipulator, Outcome, PointerEvent, PointerKind, SessionKind,
};
pub use mesh::TargetMesh;
pub use orientation::{DECAL_FORWARD, align, align_quat, euler_to_quat};
pub use picking::{HandleKind, HandleLayout, InteractionTarget, RotationAxis, pick_target};
pub use slots::{CubeKind, SlotId, SlotPose, TargetModel, slot_pose};
pub use state::{ActiveManipulation, BuiltInDecalId, DirectEdit, ImageRef, ImageSource, PlacementState};
pub use store::{PlacementSnapshot, PlacementStore};
