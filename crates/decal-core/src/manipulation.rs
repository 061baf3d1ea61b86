//! Pointer-driven drag state machine.
//!
//! A [`Manipulator`] turns an ordered stream of [`PointerEvent`]s into edits of
//! the shared [`PlacementStore`]. At most one session is active at a time, and
//! the drag anchor lives here rather than in the store: only the manipulator
//! needs it.
//!
//! Drags integrate pointer deltas in normalized device coordinates against the
//! value captured on pointer-down. Only a place click raycasts the host mesh.

use bevy::math::{Vec2, Vec3};

use crate::config::{DecalConfig, InteractionMode};
use crate::hit_test::{HitResult, Ray, resolve};
use crate::limits::{RotationPolicy, commit_position, commit_rotation, commit_scale};
use crate::mesh::TargetMesh;
use crate::orientation::align;
use crate::picking::{HandleKind, InteractionTarget, RotationAxis};
use crate::state::{ActiveManipulation, PlacementState};
use crate::store::PlacementStore;

/// Why a pointer event was dropped. None of these are errors: interactive input
/// is best-effort and the state machine always stays consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IgnoreReason {
    #[error("pointer position is not finite")]
    NoPointerContext,
    #[error("no world ray for the pointer")]
    MissingRay,
    #[error("nothing under the pointer")]
    NoTarget,
    #[error("target cannot be dragged")]
    NotDraggable,
    #[error("handle is hidden or not used in this mode")]
    HandleUnavailable,
    #[error("a manipulation session is already active")]
    SessionBusy,
    #[error("no active manipulation session")]
    InvalidSession,
    #[error("click arrived right after a drag release")]
    ClickSuppressed,
    #[error("slot already holds a decal")]
    SlotOccupied,
    #[error("ray missed the target mesh")]
    NoHit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Pointer capture lost or window blurred. Handled exactly like `Up`.
    Cancel,
    Click,
}

/// One pointer event.
///
/// `screen_pos` is in normalized device coordinates (y up). `target` and `ray`
/// are filled in by the input layer where it could resolve them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub screen_pos: Vec2,
    pub target: Option<InteractionTarget>,
    pub ray: Option<Ray>,
    /// Seconds on a monotonic clock.
    pub time_secs: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, screen_pos: Vec2, time_secs: f64) -> Self {
        Self {
            kind,
            screen_pos,
            target: None,
            ray: None,
            time_secs,
        }
    }

    pub fn down(screen_pos: Vec2, target: InteractionTarget, time_secs: f64) -> Self {
        Self::new(PointerKind::Down, screen_pos, time_secs).with_target(Some(target))
    }

    pub fn moved(screen_pos: Vec2, time_secs: f64) -> Self {
        Self::new(PointerKind::Move, screen_pos, time_secs)
    }

    pub fn up(screen_pos: Vec2, time_secs: f64) -> Self {
        Self::new(PointerKind::Up, screen_pos, time_secs)
    }

    pub fn cancel(time_secs: f64) -> Self {
        Self::new(PointerKind::Cancel, Vec2::ZERO, time_secs)
    }

    pub fn click(screen_pos: Vec2, target: InteractionTarget, ray: Ray, time_secs: f64) -> Self {
        Self::new(PointerKind::Click, screen_pos, time_secs)
            .with_target(Some(target))
            .with_ray(Some(ray))
    }

    pub fn with_target(mut self, target: Option<InteractionTarget>) -> Self {
        self.target = target;
        self
    }

    pub fn with_ray(mut self, ray: Option<Ray>) -> Self {
        self.ray = ray;
        self
    }
}

/// What a session is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Move,
    Scale,
    Rotate(RotationAxis),
    /// Decal-body drag with movement disabled: rotates the host object instead.
    OrbitHost,
}

impl SessionKind {
    /// How the session is reported in the shared state. Host orbits are not
    /// decal manipulations.
    pub fn manipulation(self) -> ActiveManipulation {
        match self {
            SessionKind::Move => ActiveManipulation::Moving,
            SessionKind::Scale => ActiveManipulation::Scaling,
            SessionKind::Rotate(_) => ActiveManipulation::Rotating,
            SessionKind::OrbitHost => ActiveManipulation::None,
        }
    }
}

/// Value captured at pointer-down, tagged by what is being edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorValue {
    Position(Vec3),
    Scale(f32),
    Rotation { start: Vec3, axis: RotationAxis },
    HostRotation(Vec3),
}

/// Pointer position and edited value at the start of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub pointer_start: Vec2,
    pub value_start: AnchorValue,
}

impl DragAnchor {
    pub fn kind(&self) -> SessionKind {
        match self.value_start {
            AnchorValue::Position(_) => SessionKind::Move,
            AnchorValue::Scale(_) => SessionKind::Scale,
            AnchorValue::Rotation { axis, .. } => SessionKind::Rotate(axis),
            AnchorValue::HostRotation(_) => SessionKind::OrbitHost,
        }
    }
}

/// Result of feeding one event to the manipulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Started(SessionKind),
    Updated(SessionKind),
    Released(SessionKind),
    Placed(HitResult),
    Ignored(IgnoreReason),
}

/// The drag state machine. Sole writer of the placement store while a session is active.
#[derive(Debug, Clone)]
pub struct Manipulator {
    config: DecalConfig,
    anchor: Option<DragAnchor>,
    last_release: Option<f64>,
}

impl Manipulator {
    pub fn new(config: DecalConfig) -> Self {
        Self {
            config,
            anchor: None,
            last_release: None,
        }
    }

    pub fn anchor(&self) -> Option<&DragAnchor> {
        self.anchor.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Feed one pointer event. `host` is only consulted by place clicks.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        store: &PlacementStore,
        host: Option<&TargetMesh>,
    ) -> Outcome {
        let outcome = match event.kind {
            PointerKind::Down => self.pointer_down(event, store),
            PointerKind::Move => self.pointer_move(event, store),
            PointerKind::Up | PointerKind::Cancel => self.release(event, store),
            PointerKind::Click => self.click(event, store, host),
        };

        match outcome {
            Outcome::Ignored(reason) => {
                tracing::debug!("[manipulation] dropped {:?}: {reason}", event.kind);
            }
            Outcome::Started(kind) => tracing::debug!("[manipulation] started {kind:?}"),
            Outcome::Released(kind) => tracing::debug!("[manipulation] released {kind:?}"),
            Outcome::Placed(hit) => tracing::info!(
                "[placement] placed decal at {:?} (normal {:?})",
                hit.point_local,
                hit.normal_local
            ),
            Outcome::Updated(_) => {}
        }
        outcome
    }

    fn pointer_down(&mut self, event: &PointerEvent, store: &PlacementStore) -> Outcome {
        if self.anchor.is_some() {
            return Outcome::Ignored(IgnoreReason::SessionBusy);
        }
        if !event.screen_pos.is_finite() {
            return Outcome::Ignored(IgnoreReason::NoPointerContext);
        }
        let Some(target) = event.target else {
            return Outcome::Ignored(IgnoreReason::NoTarget);
        };

        let mode = self.config.interaction_mode;
        let value_start = match store.read(|state| Self::anchor_value(target, state, mode)) {
            Ok(value) => value,
            Err(reason) => return Outcome::Ignored(reason),
        };
        let anchor = DragAnchor {
            pointer_start: event.screen_pos,
            value_start,
        };
        let kind = anchor.kind();
        if kind.manipulation() != ActiveManipulation::None {
            store.update(|state| state.active_manipulation = kind.manipulation());
        }
        self.anchor = Some(anchor);
        Outcome::Started(kind)
    }

    fn anchor_value(
        target: InteractionTarget,
        state: &PlacementState,
        mode: InteractionMode,
    ) -> Result<AnchorValue, IgnoreReason> {
        match target {
            InteractionTarget::DecalBody if !state.is_slot_placed() => Err(IgnoreReason::NotDraggable),
            InteractionTarget::DecalBody if state.movement_enabled => {
                Ok(AnchorValue::Position(state.position))
            }
            InteractionTarget::DecalBody => Ok(AnchorValue::HostRotation(state.host_rotation)),
            InteractionTarget::Handle(_) if !state.handles_visible(mode) => {
                Err(IgnoreReason::HandleUnavailable)
            }
            InteractionTarget::Handle(HandleKind::Move) => Ok(AnchorValue::Position(state.position)),
            InteractionTarget::Handle(HandleKind::Scale) => Ok(AnchorValue::Scale(state.scale)),
            InteractionTarget::Handle(HandleKind::Rotate(axis)) => Ok(AnchorValue::Rotation {
                start: state.rotation,
                axis,
            }),
            InteractionTarget::Surface => Err(IgnoreReason::NotDraggable),
        }
    }

    fn pointer_move(&mut self, event: &PointerEvent, store: &PlacementStore) -> Outcome {
        let Some(anchor) = self.anchor else {
            return Outcome::Ignored(IgnoreReason::InvalidSession);
        };
        if !event.screen_pos.is_finite() {
            return Outcome::Ignored(IgnoreReason::NoPointerContext);
        }

        let delta = event.screen_pos - anchor.pointer_start;
        let config = &self.config;
        match anchor.value_start {
            AnchorValue::Position(start) => {
                let candidate = Vec3::new(
                    start.x + delta.x * config.move_sensitivity,
                    start.y + delta.y * config.move_sensitivity,
                    start.z,
                );
                let position = commit_position(candidate, config.position_bound);
                store.update(|state| state.position = position);
            }
            AnchorValue::Scale(start) => {
                let scale = commit_scale(start + delta.y * config.scale_sensitivity, config.scale_limits);
                store.update(|state| state.scale = scale);
            }
            AnchorValue::Rotation { start, axis } => {
                let turn = delta.y * config.rotate_sensitivity;
                let candidate = match axis {
                    RotationAxis::Z => Vec3::new(start.x, start.y, start.z + turn),
                    RotationAxis::Y => Vec3::new(start.x, start.y + turn, start.z),
                };
                let rotation = commit_rotation(candidate, RotationPolicy::Free);
                store.update(|state| state.rotation = rotation);
            }
            AnchorValue::HostRotation(start) => {
                let candidate = Vec3::new(
                    start.x - delta.y * config.host_rotate_sensitivity,
                    start.y + delta.x * config.host_rotate_sensitivity,
                    start.z,
                );
                let rotation = commit_rotation(candidate, RotationPolicy::Constrained(config.host_limits));
                store.update(|state| state.host_rotation = rotation);
            }
        }
        Outcome::Updated(anchor.kind())
    }

    fn release(&mut self, event: &PointerEvent, store: &PlacementStore) -> Outcome {
        let anchor = self.anchor.take();
        if store.read(|state| state.active_manipulation != ActiveManipulation::None) {
            store.update(|state| state.active_manipulation = ActiveManipulation::None);
        }
        match anchor {
            Some(anchor) => {
                self.last_release = Some(event.time_secs);
                Outcome::Released(anchor.kind())
            }
            None => Outcome::Ignored(IgnoreReason::InvalidSession),
        }
    }

    fn click(
        &mut self,
        event: &PointerEvent,
        store: &PlacementStore,
        host: Option<&TargetMesh>,
    ) -> Outcome {
        if self.anchor.is_some() {
            return Outcome::Ignored(IgnoreReason::SessionBusy);
        }
        let window = self.config.click_suppression_secs();
        if self
            .last_release
            .is_some_and(|released| event.time_secs - released < window)
        {
            return Outcome::Ignored(IgnoreReason::ClickSuppressed);
        }
        match event.target {
            None => return Outcome::Ignored(IgnoreReason::NoTarget),
            Some(InteractionTarget::Surface) => {}
            Some(_) => return Outcome::Ignored(IgnoreReason::SlotOccupied),
        }
        if store.read(PlacementState::is_slot_placed) {
            return Outcome::Ignored(IgnoreReason::SlotOccupied);
        }
        let Some(ray) = event.ray else {
            return Outcome::Ignored(IgnoreReason::MissingRay);
        };
        let Some(host) = host else {
            return Outcome::Ignored(IgnoreReason::NoTarget);
        };
        let Some(hit) = resolve(&ray, host) else {
            return Outcome::Ignored(IgnoreReason::NoHit);
        };

        let position = commit_position(hit.point_local, self.config.position_bound);
        let rotation = align(hit.normal_local);
        store.update(|state| {
            state.position = position;
            state.rotation = rotation;
            state.mark_placed();
        });
        Outcome::Placed(hit)
    }
}

impl Default for Manipulator {
    fn default() -> Self {
        Self::new(DecalConfig::default())
    }
}
