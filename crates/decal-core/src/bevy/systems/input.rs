//! Window input to pointer events.
//!
//! Converts the primary window's cursor and left mouse button into the ordered
//! `PointerEvent` stream the manipulator expects. A press-release that never
//! travelled past the click slop also produces a `Click`.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowFocused};

use crate::bevy::{DecalConfigRes, HostTarget, MainCamera, PlacementStoreRes, PointerQueue, PointerTracker};
use crate::camera::{RayProvider, window_to_ndc};
use crate::hit_test::Ray;
use crate::manipulation::{PointerEvent, PointerKind};
use crate::picking::pick_target;

/// Maximum NDC travel between press and release that still counts as a click.
const CLICK_SLOP: f32 = 0.01;

/// Rays through a Bevy camera that covers the whole window.
struct ViewportRays<'a> {
    camera: &'a Camera,
    transform: &'a GlobalTransform,
    window_size: Vec2,
}

impl RayProvider for ViewportRays<'_> {
    fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let position = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.window_size.x,
            (1.0 - ndc.y) * 0.5 * self.window_size.y,
        );
        let ray = self.camera.viewport_to_world(self.transform, position).ok()?;
        Ray::new(ray.origin, *ray.direction)
    }
}

/// System to translate cursor and mouse-button state into pointer events.
#[allow(clippy::too_many_arguments)]
pub fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mouse: Res<ButtonInput<MouseButton>>,
    time: Res<Time<Real>>,
    store: Res<PlacementStoreRes>,
    config: Res<DecalConfigRes>,
    host: Res<HostTarget>,
    pointer_queue: Res<PointerQueue>,
    mut tracker: ResMut<PointerTracker>,
    mut focus_events: MessageReader<WindowFocused>,
) {
    let now = time.elapsed_secs_f64();

    // Losing focus mid-drag must not leave a session dangling.
    if focus_events.read().any(|event| !event.focused) && tracker.press_origin.is_some() {
        tracing::debug!("[input] window lost focus, cancelling pointer");
        pointer_queue.push(PointerEvent::cancel(now));
        *tracker = PointerTracker::default();
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let window_size = window.size();
    let ndc = window
        .cursor_position()
        .and_then(|position| window_to_ndc(position, window_size));

    let ray = match (ndc, cameras.single()) {
        (Some(ndc), Ok((camera, transform))) => ViewportRays {
            camera,
            transform,
            window_size,
        }
        .ray_from_ndc(ndc),
        _ => None,
    };
    let target = ray.and_then(|ray| {
        store.read(|state| pick_target(&ray, &host.mesh, state, config.interaction_mode))
    });

    // A press and its release can land in the same frame, so fall through to
    // the release handling below.
    if mouse.just_pressed(MouseButton::Left) {
        if let Some(ndc) = ndc {
            pointer_queue.push(
                PointerEvent::new(PointerKind::Down, ndc, now)
                    .with_target(target)
                    .with_ray(ray),
            );
            tracker.press_origin = Some(ndc);
            tracker.last_position = Some(ndc);
            tracker.dragged = false;
        }
    }

    let Some(press_origin) = tracker.press_origin else {
        return;
    };

    if let Some(ndc) = ndc.filter(|ndc| tracker.last_position != Some(*ndc)) {
        pointer_queue.push(PointerEvent::moved(ndc, now));
        tracker.last_position = Some(ndc);
        if ndc.distance(press_origin) > CLICK_SLOP {
            tracker.dragged = true;
        }
    }

    if mouse.just_released(MouseButton::Left) {
        let position = ndc.or(tracker.last_position).unwrap_or(press_origin);
        pointer_queue.push(PointerEvent::up(position, now));
        if !tracker.dragged {
            pointer_queue.push(
                PointerEvent::new(PointerKind::Click, position, now)
                    .with_target(target)
                    .with_ray(ray),
            );
        }
        *tracker = PointerTracker::default();
    }
}
