// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

//! Event-routing scenarios: touch identity tracking, double-click detection,
//! keyboard re-dispatch, and the drag session.

use std::time::Duration;

use i_webembed_backend_testing::{EngineCall, Fixture, HostEvent};
use i_webembed_core::drag::{DragAction, DragData, DragOperation};
use i_webembed_core::input::{
    AccessibilityHoverEvent, EngineAxisEvent, EngineFlingEvent, EngineTouchPoint, HoverSource,
    KeyAction, KeyInput, KeyboardModifiers, MouseAction, MouseButton, MouseInput,
};

fn touch_calls(fixture: &Fixture) -> Vec<EngineCall> {
    fixture.engine().calls_matching(|call| {
        matches!(
            call,
            EngineCall::TouchPress { .. }
                | EngineCall::TouchMove { .. }
                | EngineCall::TouchMoveBatch { .. }
                | EngineCall::TouchRelease { .. }
                | EngineCall::TouchCancel
        )
    })
}

fn mouse(x: f64, y: f64, action: MouseAction, at_ms: u64) -> MouseInput {
    MouseInput {
        x,
        y,
        button: MouseButton::Left,
        action,
        modifiers: KeyboardModifiers::default(),
        pressed_codes: Vec::new(),
        timestamp: Duration::from_millis(at_ms),
    }
}

fn key(code: i32) -> KeyInput {
    KeyInput {
        code,
        action: KeyAction::Down,
        modifiers: KeyboardModifiers::default(),
        pressed_codes: vec![code],
    }
}

#[test]
fn touch_events_track_their_identifier() {
    let fixture = Fixture::created();
    fixture.delegate.handle_touch_down(1, 10., 10., false);
    fixture.delegate.handle_touch_move(1, 20., 20., false);
    fixture.delegate.handle_touch_up(1, 20., 20., false);
    assert_eq!(
        touch_calls(&fixture),
        vec![
            EngineCall::TouchPress { id: 1, x: 10., y: 10. },
            EngineCall::TouchMove { id: 1, x: 20., y: 20. },
            EngineCall::TouchRelease { id: 1 },
        ]
    );
    assert!(!fixture.delegate.is_touch_active(1));
}

#[test]
fn moves_for_untracked_identifiers_are_dropped() {
    let fixture = Fixture::created();
    fixture.delegate.handle_touch_move(5, 10., 10., false);
    fixture.delegate.handle_touch_up(5, 10., 10., false);
    assert!(touch_calls(&fixture).is_empty());
}

#[test]
fn touch_cancel_clears_every_active_identifier() {
    let fixture = Fixture::created();
    fixture.delegate.handle_touch_down(1, 10., 10., false);
    fixture.delegate.handle_touch_cancel();
    // id 1 was cleared by the cancel; this move must be dropped.
    fixture.delegate.handle_touch_move(1, 30., 30., false);
    assert_eq!(
        touch_calls(&fixture),
        vec![EngineCall::TouchPress { id: 1, x: 10., y: 10. }, EngineCall::TouchCancel]
    );
}

#[test]
fn a_second_down_for_an_active_identifier_is_dropped() {
    let fixture = Fixture::created();
    fixture.delegate.handle_touch_down(1, 10., 10., false);
    fixture.delegate.handle_touch_down(1, 50., 50., false);
    assert_eq!(touch_calls(&fixture), vec![EngineCall::TouchPress { id: 1, x: 10., y: 10. }]);
}

#[test]
fn batched_moves_preserve_order_and_drop_untracked_points() {
    let fixture = Fixture::created();
    fixture.delegate.handle_touch_down(1, 0., 0., false);
    fixture.delegate.handle_touch_down(3, 0., 0., false);
    fixture.delegate.handle_touch_move_batch(
        &[
            EngineTouchPoint { id: 3, x: 5., y: 5. },
            EngineTouchPoint { id: 2, x: 6., y: 6. },
            EngineTouchPoint { id: 1, x: 7., y: 7. },
        ],
        false,
    );
    let batches = fixture
        .engine()
        .calls_matching(|call| matches!(call, EngineCall::TouchMoveBatch { .. }));
    assert_eq!(batches, vec![EngineCall::TouchMoveBatch { ids: vec![3, 1] }]);
}

#[test]
fn two_quick_clicks_become_a_double_click() {
    let fixture = Fixture::created();
    fixture.delegate.handle_mouse_event(&mouse(100., 100., MouseAction::Press, 0));
    fixture.delegate.handle_mouse_event(&mouse(102., 101., MouseAction::Press, 180));
    let clicks: Vec<i32> = fixture
        .engine()
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            EngineCall::Mouse { click_count, .. } => Some(click_count),
            _ => None,
        })
        .collect();
    assert_eq!(clicks, vec![1, 2]);
}

#[test]
fn clicks_outside_the_thresholds_stay_single() {
    let fixture = Fixture::created();
    fixture.delegate.handle_mouse_event(&mouse(100., 100., MouseAction::Press, 0));
    // Too late.
    fixture.delegate.handle_mouse_event(&mouse(100., 100., MouseAction::Press, 800));
    // Too far.
    fixture.delegate.handle_mouse_event(&mouse(300., 100., MouseAction::Press, 900));
    let clicks: Vec<i32> = fixture
        .engine()
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            EngineCall::Mouse { click_count, .. } => Some(click_count),
            _ => None,
        })
        .collect();
    assert_eq!(clicks, vec![1, 1, 1]);
}

#[test]
fn declined_key_events_can_be_taken_for_redispatch() {
    let fixture = Fixture::created();
    fixture.engine().consume_keys.set(false);
    assert!(!fixture.delegate.handle_key_event(key(65)));
    let replay = fixture.delegate.take_unhandled_key_event().expect("declined event kept");
    assert_eq!(replay.code, 65);
    assert!(fixture.delegate.take_unhandled_key_event().is_none());

    fixture.engine().consume_keys.set(true);
    assert!(fixture.delegate.handle_key_event(key(66)));
    assert!(fixture.delegate.take_unhandled_key_event().is_none());
}

#[test]
fn axis_fling_and_accessibility_hover_forward() {
    let fixture = Fixture::created();
    fixture.delegate.handle_axis_event(&EngineAxisEvent {
        x: 10.,
        y: 10.,
        delta_x: 0.,
        delta_y: -120.,
        pressed_codes: Vec::new(),
    });
    fixture.delegate.handle_fling_event(&EngineFlingEvent {
        x: 10.,
        y: 10.,
        velocity_x: 0.,
        velocity_y: 900.,
        pressed_codes: Vec::new(),
    });
    fixture.delegate.handle_accessibility_hover(&AccessibilityHoverEvent {
        x: 4,
        y: 5,
        source: HoverSource::Touch,
        timestamp: Duration::from_millis(10),
    });
    let calls = fixture.engine().calls();
    assert!(calls.contains(&EngineCall::Axis { delta_x: 0., delta_y: -120. }));
    assert!(calls.contains(&EngineCall::Fling { velocity_x: 0., velocity_y: 900. }));
    assert!(calls.contains(&EngineCall::AccessibilityHover { x: 4, y: 5 }));
}

#[test]
fn drag_events_need_a_session() {
    let fixture = Fixture::created();
    assert_eq!(fixture.delegate.handle_drag_event(10, 10, DragAction::Over), None);
    assert!(fixture
        .engine()
        .calls_matching(|call| matches!(call, EngineCall::Drag { .. }))
        .is_empty());
}

#[test]
fn a_drag_session_spans_start_to_end() {
    let fixture = Fixture::created();
    let data = DragData { plain_text: "hello".into(), ..DragData::default() };
    assert!(fixture.delegate.start_drag_session(data));
    // A second session cannot start before the first ended.
    assert!(!fixture.delegate.start_drag_session(DragData::default()));

    fixture.delegate.handle_drag_event(10, 10, DragAction::Enter);
    fixture.delegate.handle_drag_event(12, 14, DragAction::Over);
    let status = fixture.delegate.handle_drag_event(12, 14, DragAction::Drop);
    assert_eq!(status, Some(DragOperation::Copy));
    assert_eq!(fixture.host.events(), vec![HostEvent::DragStatus(DragOperation::Copy)]);

    fixture.delegate.handle_drag_event(12, 14, DragAction::End);
    assert!(!fixture.delegate.drag_in_progress());
    // The session is gone; further events are dropped.
    assert_eq!(fixture.delegate.handle_drag_event(12, 14, DragAction::Over), None);

    let actions: Vec<DragAction> = fixture
        .engine()
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            EngineCall::Drag { action } => Some(action),
            _ => None,
        })
        .collect();
    assert_eq!(
        actions,
        vec![DragAction::Enter, DragAction::Over, DragAction::Drop, DragAction::End]
    );
}

#[test]
fn a_cancelled_drag_leaves_no_state_behind() {
    let fixture = Fixture::created();
    assert!(fixture.delegate.start_drag_session(DragData::default()));
    fixture.delegate.handle_drag_event(10, 10, DragAction::Enter);
    fixture.delegate.handle_drag_event(10, 10, DragAction::Cancel);
    assert!(!fixture.delegate.drag_in_progress());
    assert!(fixture.delegate.start_drag_session(DragData::default()));
}

#[test]
fn input_before_creation_and_after_release_is_dropped() {
    let waiting = Fixture::new();
    waiting.delegate.handle_touch_down(1, 10., 10., false);
    waiting.delegate.handle_mouse_event(&mouse(1., 1., MouseAction::Press, 0));
    assert_eq!(waiting.backend.engines_created(), 0);

    let fixture = Fixture::created();
    fixture.delegate.handle_touch_down(1, 10., 10., false);
    fixture.delegate.release();
    fixture.delegate.handle_touch_move(1, 20., 20., false);
    fixture.delegate.handle_mouse_event(&mouse(1., 1., MouseAction::Press, 0));
    // Only the pre-release press reached the engine.
    assert_eq!(touch_calls(&fixture), vec![EngineCall::TouchPress { id: 1, x: 10., y: 10. }]);
}
