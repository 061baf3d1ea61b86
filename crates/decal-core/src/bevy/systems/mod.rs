//! Systems for decal placement.
//!
//! Organized by functionality:
//! - command: Control-panel command processing
//! - pointer: Feeding queued pointer events to the manipulator
//! - binding: Keeping the host target and rendered entities in step with the store
//! - input: Window cursor to pointer events (windowed only)
//! - handles: Gizmo rendering of manipulation handles (windowed only)
//! - camera: Damped camera rig (windowed only)

pub mod binding;
pub mod camera;
pub mod command;
pub mod handles;
pub mod input;
pub mod pointer;

pub use binding::*;
pub use camera::*;
pub use command::*;
pub use handles::*;
pub use input::*;
pub use pointer::*;
