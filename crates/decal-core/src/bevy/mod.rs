//! Bevy integration for decal placement.
//!
//! Wraps the placement store and manipulator in ECS resources and provides
//! systems for command processing, pointer handling and the render binding.

pub mod components;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

pub use components::*;
pub use events::*;
pub use plugin::{DecalHeadlessPlugin, DecalSet, DecalViewerPlugin};
pub use resources::*;
pub use systems::{
    apply_placement, ease_camera_rig, process_commands, process_pointer_input, render_handles,
    sync_host_target, track_pointer,
};
