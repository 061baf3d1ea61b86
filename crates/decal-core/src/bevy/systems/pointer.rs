//! Pointer event processing.

use bevy::prelude::*;

use crate::bevy::{
    DecalPlacedEvent, HostTarget, ManipulationEndedEvent, ManipulatorRes, PlacementStoreRes, PointerQueue,
};
use crate::manipulation::Outcome;

/// System to feed queued pointer events to the manipulator, in arrival order.
pub fn process_pointer_input(
    pointer_queue: Res<PointerQueue>,
    store: Res<PlacementStoreRes>,
    host: Res<HostTarget>,
    mut manipulator: ResMut<ManipulatorRes>,
    mut placed_events: MessageWriter<DecalPlacedEvent>,
    mut ended_events: MessageWriter<ManipulationEndedEvent>,
) {
    for event in pointer_queue.drain() {
        match manipulator.handle(&event, &store, Some(&host.mesh)) {
            Outcome::Placed(hit) => {
                placed_events.write(DecalPlacedEvent { hit });
            }
            Outcome::Released(kind) => {
                ended_events.write(ManipulationEndedEvent { kind });
            }
            Outcome::Started(_) | Outcome::Updated(_) | Outcome::Ignored(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::{Vec2, Vec3};

    use crate::bevy::test_utils::TestApp;
    use crate::config::{DecalConfig, InteractionMode};
    use crate::hit_test::Ray;
    use crate::manipulation::{PointerEvent, SessionKind};
    use crate::picking::{HandleKind, InteractionTarget};
    use crate::state::ActiveManipulation;

    #[test]
    fn test_drag_across_frames() {
        let mut app = TestApp::new();
        app.push_pointer(PointerEvent::down(Vec2::new(0.5, 0.5), InteractionTarget::DecalBody, 0.0));
        app.update();
        assert_eq!(app.snapshot().state.active_manipulation, ActiveManipulation::Moving);

        app.push_pointer(PointerEvent::moved(Vec2::new(0.6, 0.5), 0.016));
        app.update();
        let position = app.snapshot().state.position;
        assert!(position.abs_diff_eq(Vec3::new(0.05, 0.04, 0.15), 1e-5), "{position:?}");

        app.push_pointer(PointerEvent::up(Vec2::new(0.6, 0.5), 0.032));
        app.update();
        assert_eq!(app.snapshot().state.active_manipulation, ActiveManipulation::None);
        assert_eq!(app.recorded().ended, vec![SessionKind::Move]);
    }

    #[test]
    fn test_events_in_one_frame_keep_order() {
        let mut app = TestApp::new();
        let scale = InteractionTarget::Handle(HandleKind::Scale);
        app.push_pointer(PointerEvent::down(Vec2::ZERO, scale, 0.0));
        app.push_pointer(PointerEvent::moved(Vec2::new(0.0, 0.5), 0.0));
        app.push_pointer(PointerEvent::cancel(0.0));
        app.update();

        let state = app.snapshot().state;
        assert!((state.scale - 0.3).abs() < 1e-6);
        assert_eq!(state.active_manipulation, ActiveManipulation::None);
        assert_eq!(app.recorded().ended, vec![SessionKind::Scale]);
    }

    #[test]
    fn test_click_to_place_emits_event() {
        let config = DecalConfig {
            interaction_mode: InteractionMode::ClickToPlace,
            ..DecalConfig::default()
        };
        let mut app = TestApp::with_config(config);
        let ray = Ray::new(Vec3::new(0.1, 0.1, 3.0), Vec3::NEG_Z).unwrap();
        app.push_pointer(PointerEvent::click(Vec2::ZERO, InteractionTarget::Surface, ray, 0.0));
        app.update();

        let placed = &app.recorded().placed;
        assert_eq!(placed.len(), 1);
        // Shirt stand-in box: front face at z = 0.15.
        assert!(placed[0].point_local.abs_diff_eq(Vec3::new(0.1, 0.1, 0.15), 1e-5));
        assert!(app.snapshot().state.is_slot_placed());
    }
}
