// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

/*! Module handling the translation of host input events into engine events.
*/

#![warn(missing_docs)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use crate::api::SharedConfig;
use crate::drag::{DragAction, DragData, DragOperation, DragSession, EngineDragEvent};
use crate::engine::WebEngine;

/// A mouse button of a host pointer event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MouseButton {
    /// No button, e.g. for pure moves.
    #[default]
    None,
    /// The left button.
    Left,
    /// The right button.
    Right,
    /// The middle button.
    Middle,
    /// The navigate-backward button.
    Back,
    /// The navigate-forward button.
    Forward,
}

/// What a mouse event reports.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseAction {
    /// A button went down.
    Press,
    /// A button went up.
    Release,
    /// The pointer moved.
    Move,
    /// The pointer hovers without buttons.
    Hover,
}

/// What a keyboard event reports.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// The key went down.
    Down,
    /// The key went up.
    Up,
}

/// KeyboardModifiers provides booleans to indicate possible modifier keys on
/// a keyboard, such as Shift, Control, etc.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyboardModifiers {
    /// Indicates the alt key on a keyboard.
    pub alt: bool,
    /// Indicates the control key on a keyboard.
    pub control: bool,
    /// Indicates the logo/meta key.
    pub meta: bool,
    /// Indicates the shift key on a keyboard.
    pub shift: bool,
}

/// The input device that produced an accessibility hover.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HoverSource {
    /// A touch screen.
    Touch,
    /// A mouse.
    Mouse,
    /// Another device.
    Other,
}

/// One touch point in a batched move, in the order the host reported it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EngineTouchPoint {
    /// The host's identifier of the touch point.
    pub id: i32,
    /// The x coordinate, component-relative.
    pub x: f64,
    /// The y coordinate, component-relative.
    pub y: f64,
}

/// A mouse event as dispatched to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineMouseEvent {
    /// The x coordinate, component-relative.
    pub x: f64,
    /// The y coordinate, component-relative.
    pub y: f64,
    /// The button the event is about.
    pub button: MouseButton,
    /// What happened.
    pub action: MouseAction,
    /// 1 for a single click, 2 for the second click of a double click.
    pub click_count: i32,
    /// Key codes held down while the event happened.
    pub pressed_codes: Vec<i32>,
}

/// A keyboard event as dispatched to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineKeyEvent {
    /// The platform key code.
    pub code: i32,
    /// Whether the key went down or up.
    pub action: KeyAction,
    /// Key codes held down while the event happened.
    pub pressed_codes: Vec<i32>,
}

/// A scroll-wheel or axis event as dispatched to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineAxisEvent {
    /// Pointer x coordinate.
    pub x: f64,
    /// Pointer y coordinate.
    pub y: f64,
    /// Horizontal scroll delta in logical pixels.
    pub delta_x: f64,
    /// Vertical scroll delta in logical pixels.
    pub delta_y: f64,
    /// Key codes held down while scrolling.
    pub pressed_codes: Vec<i32>,
}

/// A touchpad fling as dispatched to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineFlingEvent {
    /// Pointer x coordinate.
    pub x: f64,
    /// Pointer y coordinate.
    pub y: f64,
    /// Horizontal velocity in logical pixels per second.
    pub velocity_x: f64,
    /// Vertical velocity in logical pixels per second.
    pub velocity_y: f64,
    /// Key codes held down while flinging.
    pub pressed_codes: Vec<i32>,
}

/// An accessibility hover forwarded to the engine's accessibility tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibilityHoverEvent {
    /// The x coordinate, component-relative.
    pub x: i32,
    /// The y coordinate, component-relative.
    pub y: i32,
    /// The device that produced the hover.
    pub source: HoverSource,
    /// The host event timestamp.
    pub timestamp: Duration,
}

/// A mouse event as received from the host, before click counting.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseInput {
    /// The x coordinate, component-relative.
    pub x: f64,
    /// The y coordinate, component-relative.
    pub y: f64,
    /// The button the event is about.
    pub button: MouseButton,
    /// What happened.
    pub action: MouseAction,
    /// The modifier keys held down.
    pub modifiers: KeyboardModifiers,
    /// Key codes held down while the event happened.
    pub pressed_codes: Vec<i32>,
    /// The host event timestamp, monotonic.
    pub timestamp: Duration,
}

/// A keyboard event as received from the host.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyInput {
    /// The platform key code.
    pub code: i32,
    /// Whether the key went down or up.
    pub action: KeyAction,
    /// The modifier keys held down.
    pub modifiers: KeyboardModifiers,
    /// Key codes held down while the event happened.
    pub pressed_codes: Vec<i32>,
}

#[derive(Debug, Clone, Copy)]
struct ClickInfo {
    button: MouseButton,
    x: f64,
    y: f64,
    timestamp: Duration,
}

/// Pairs a press with the immediately preceding one when both happen within
/// the configured time and distance thresholds. Anything else resets the
/// queue, so two slow clicks stay two independent single clicks.
pub(crate) struct ClickTracker {
    recent: RefCell<VecDeque<ClickInfo>>,
    last_count: Cell<i32>,
}

impl ClickTracker {
    pub(crate) fn new() -> Self {
        Self { recent: RefCell::new(VecDeque::new()), last_count: Cell::new(1) }
    }

    /// The click count for `input`. Only presses advance the detection;
    /// releases repeat the count of the press they belong to, moves and
    /// hovers count zero.
    pub(crate) fn click_count(&self, input: &MouseInput, config: &SharedConfig) -> i32 {
        match input.action {
            MouseAction::Press => {}
            MouseAction::Release => return self.last_count.get(),
            MouseAction::Move | MouseAction::Hover => return 0,
        }

        let mut recent = self.recent.borrow_mut();
        if let Some(prev) = recent.back() {
            let close_in_time = input
                .timestamp
                .checked_sub(prev.timestamp)
                .is_some_and(|elapsed| elapsed <= config.click_interval);
            let distance = config.click_distance as f64;
            let close_in_space =
                euclid::default::Vector2D::new(input.x - prev.x, input.y - prev.y).square_length()
                    <= distance * distance;
            if prev.button == input.button && close_in_time && close_in_space {
                // The pair is consumed: a third fast click starts a fresh
                // single click, it does not chain onto this pair.
                recent.clear();
                self.last_count.set(2);
                return 2;
            }
            // The previous click does not pair: reset the queue and let this
            // press start over.
            recent.clear();
        }
        recent.push_back(ClickInfo {
            button: input.button,
            x: input.x,
            y: input.y,
            timestamp: input.timestamp,
        });
        self.last_count.set(1);
        1
    }

    pub(crate) fn reset(&self) {
        self.recent.borrow_mut().clear();
        self.last_count.set(1);
    }
}

/// Bidirectional event translation between the host and the engine, with
/// per-touch identity tracking.
///
/// The router owns the transient input state of one delegate: the set of
/// active touch identifiers, the double-click queue, the key event held for
/// host re-dispatch, and the drag session. It dispatches into the engine that
/// is attached to it; with no engine attached every event is dropped and
/// logged, never an error.
pub struct EventRouter {
    engine: RefCell<Option<Rc<dyn WebEngine>>>,
    active_touches: RefCell<HashMap<i32, (f64, f64)>>,
    click: ClickTracker,
    unhandled_key: RefCell<Option<KeyInput>>,
    drag: RefCell<Option<DragSession>>,
}

impl EventRouter {
    pub(crate) fn new() -> Self {
        Self {
            engine: RefCell::new(None),
            active_touches: RefCell::new(HashMap::new()),
            click: ClickTracker::new(),
            unhandled_key: RefCell::new(None),
            drag: RefCell::new(None),
        }
    }

    pub(crate) fn attach_engine(&self, engine: Rc<dyn WebEngine>) {
        *self.engine.borrow_mut() = Some(engine);
    }

    pub(crate) fn detach_engine(&self) {
        *self.engine.borrow_mut() = None;
        self.reset();
    }

    /// Drops all transient input state: touch identifiers, click queue, the
    /// re-dispatch slot and the drag session.
    pub(crate) fn reset(&self) {
        self.active_touches.borrow_mut().clear();
        self.click.reset();
        self.unhandled_key.borrow_mut().take();
        self.drag.borrow_mut().take();
    }

    fn engine(&self) -> Option<Rc<dyn WebEngine>> {
        self.engine.borrow().clone()
    }

    /// Whether the given touch identifier currently has a session.
    pub fn is_touch_active(&self, id: i32) -> bool {
        self.active_touches.borrow().contains_key(&id)
    }

    /// A touch point went down. A second down for an already active
    /// identifier is dropped: a session must pass through up or cancel
    /// before the identifier can go down again.
    pub fn handle_touch_down(&self, id: i32, x: f64, y: f64, from_overlay: bool) {
        let Some(engine) = self.engine() else {
            log::debug!("touch down without engine dropped");
            return;
        };
        let mut touches = self.active_touches.borrow_mut();
        if touches.contains_key(&id) {
            log::warn!("touch down for already active identifier {id} dropped");
            return;
        }
        touches.insert(id, (x, y));
        drop(touches);
        engine.on_touch_press(id, x, y, from_overlay);
    }

    /// A touch point moved. Moves for untracked identifiers are dropped.
    pub fn handle_touch_move(&self, id: i32, x: f64, y: f64, from_overlay: bool) {
        let Some(engine) = self.engine() else {
            log::debug!("touch move without engine dropped");
            return;
        };
        let mut touches = self.active_touches.borrow_mut();
        match touches.get_mut(&id) {
            Some(record) => *record = (x, y),
            None => {
                log::warn!("touch move for untracked identifier {id} dropped");
                return;
            }
        }
        drop(touches);
        engine.on_touch_move(id, x, y, from_overlay);
    }

    /// Several touch points moved at once. Untracked identifiers are dropped
    /// from the batch; the order of the remaining points is preserved, since
    /// it affects the engine's gesture recognition.
    pub fn handle_touch_move_batch(&self, points: &[EngineTouchPoint], from_overlay: bool) {
        let Some(engine) = self.engine() else {
            log::debug!("touch batch move without engine dropped");
            return;
        };
        let mut touches = self.active_touches.borrow_mut();
        let mut tracked = Vec::with_capacity(points.len());
        for point in points {
            match touches.get_mut(&point.id) {
                Some(record) => {
                    *record = (point.x, point.y);
                    tracked.push(*point);
                }
                None => log::warn!("touch move for untracked identifier {} dropped", point.id),
            }
        }
        drop(touches);
        if !tracked.is_empty() {
            engine.on_touch_move_batch(&tracked, from_overlay);
        }
    }

    /// A touch point was lifted. Ups for untracked identifiers are dropped.
    pub fn handle_touch_up(&self, id: i32, x: f64, y: f64, from_overlay: bool) {
        let Some(engine) = self.engine() else {
            log::debug!("touch up without engine dropped");
            return;
        };
        if self.active_touches.borrow_mut().remove(&id).is_none() {
            log::warn!("touch up for untracked identifier {id} dropped");
            return;
        }
        engine.on_touch_release(id, x, y, from_overlay);
    }

    /// The touch session was cancelled: every active identifier is cleared.
    pub fn handle_touch_cancel(&self) {
        self.active_touches.borrow_mut().clear();
        if let Some(engine) = self.engine() {
            engine.on_touch_cancel();
        }
    }

    /// Convert and dispatch a mouse event, running double-click detection for
    /// presses.
    pub fn handle_mouse_event(&self, input: &MouseInput, config: &SharedConfig) {
        let Some(engine) = self.engine() else {
            log::debug!("mouse event without engine dropped");
            return;
        };
        let click_count = self.click.click_count(input, config);
        engine.send_mouse_event(&EngineMouseEvent {
            x: input.x,
            y: input.y,
            button: input.button,
            action: input.action,
            click_count,
            pressed_codes: input.pressed_codes.clone(),
        });
    }

    /// Convert and dispatch a keyboard event. Returns whether the engine
    /// consumed it; a declined event is kept for [`Self::take_unhandled_key_event`]
    /// so the host focus chain can replay it.
    pub fn handle_key_event(&self, input: KeyInput) -> bool {
        let Some(engine) = self.engine() else {
            log::debug!("key event without engine dropped");
            return false;
        };
        let consumed = engine.send_key_event(&EngineKeyEvent {
            code: input.code,
            action: input.action,
            pressed_codes: input.pressed_codes.clone(),
        });
        if !consumed {
            *self.unhandled_key.borrow_mut() = Some(input);
        }
        consumed
    }

    /// The most recent key event the engine declined, for replay by the host
    /// focus chain. Taking it clears the slot.
    pub fn take_unhandled_key_event(&self) -> Option<KeyInput> {
        self.unhandled_key.borrow_mut().take()
    }

    /// Dispatch a scroll-wheel/axis event.
    pub fn handle_axis_event(&self, event: &EngineAxisEvent) {
        match self.engine() {
            Some(engine) => engine.send_axis_event(event),
            None => log::debug!("axis event without engine dropped"),
        }
    }

    /// Dispatch a touchpad fling.
    pub fn handle_fling_event(&self, event: &EngineFlingEvent) {
        match self.engine() {
            Some(engine) => engine.send_fling_event(event),
            None => log::debug!("fling event without engine dropped"),
        }
    }

    /// Forward an accessibility hover to the engine's accessibility tree.
    pub fn handle_accessibility_hover(&self, event: &AccessibilityHoverEvent) {
        match self.engine() {
            Some(engine) => engine.send_accessibility_hover(event),
            None => log::debug!("accessibility hover without engine dropped"),
        }
    }

    /// Begin a drag session carrying `data`. Returns false (and drops the
    /// request) when a session is already in progress: a session must pass
    /// through end or cancel before a new one can start.
    pub fn start_drag_session(&self, data: DragData) -> bool {
        let mut drag = self.drag.borrow_mut();
        if drag.is_some() {
            log::warn!("drag start while a drag session is in progress dropped");
            return false;
        }
        *drag = Some(DragSession::new(data));
        true
    }

    /// Dispatch a drag event into the engine. Events outside a session are
    /// dropped. On [`DragAction::Drop`] the operation the engine accepted is
    /// read back and returned; end and cancel destroy the session.
    pub fn handle_drag_event(&self, x: i32, y: i32, action: DragAction) -> Option<DragOperation> {
        let Some(engine) = self.engine() else {
            log::debug!("drag event without engine dropped");
            return None;
        };
        let mut drag = self.drag.borrow_mut();
        if drag.is_none() {
            log::warn!("drag event {action} outside a drag session dropped");
            return None;
        }

        engine.send_drag_event(&EngineDragEvent { x, y, action });
        match action {
            DragAction::Drop => {
                let status = engine.drag_acceptable_status();
                if let Some(session) = drag.as_ref() {
                    session.set_accepted_operation(status);
                }
                Some(status)
            }
            DragAction::End | DragAction::Cancel => {
                drag.take();
                None
            }
            DragAction::Enter | DragAction::Over | DragAction::Leave => None,
        }
    }

    /// The payload of the drag session in progress, if any.
    pub fn current_drag_data(&self) -> Option<DragData> {
        self.drag.borrow().as_ref().map(|session| session.data().clone())
    }

    /// Whether a drag session is in progress.
    pub fn drag_in_progress(&self) -> bool {
        self.drag.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(x: f64, y: f64, at_ms: u64) -> MouseInput {
        MouseInput {
            x,
            y,
            button: MouseButton::Left,
            action: MouseAction::Press,
            modifiers: KeyboardModifiers::default(),
            pressed_codes: Vec::new(),
            timestamp: Duration::from_millis(at_ms),
        }
    }

    #[test]
    fn two_fast_close_clicks_pair_up() {
        let tracker = ClickTracker::new();
        let config = SharedConfig::default();
        assert_eq!(tracker.click_count(&press(10., 10., 0), &config), 1);
        assert_eq!(tracker.click_count(&press(12., 11., 200), &config), 2);
    }

    #[test]
    fn slow_clicks_stay_single() {
        let tracker = ClickTracker::new();
        let config = SharedConfig::default();
        assert_eq!(tracker.click_count(&press(10., 10., 0), &config), 1);
        assert_eq!(tracker.click_count(&press(10., 10., 900), &config), 1);
    }

    #[test]
    fn distant_clicks_stay_single() {
        let tracker = ClickTracker::new();
        let config = SharedConfig::default();
        assert_eq!(tracker.click_count(&press(10., 10., 0), &config), 1);
        assert_eq!(tracker.click_count(&press(200., 10., 100), &config), 1);
    }

    #[test]
    fn third_fast_click_starts_a_fresh_pair() {
        let tracker = ClickTracker::new();
        let config = SharedConfig::default();
        assert_eq!(tracker.click_count(&press(10., 10., 0), &config), 1);
        assert_eq!(tracker.click_count(&press(10., 10., 100), &config), 2);
        // The pair was consumed; this press starts over.
        assert_eq!(tracker.click_count(&press(10., 10., 200), &config), 1);
        assert_eq!(tracker.click_count(&press(10., 10., 300), &config), 2);
    }

    #[test]
    fn differing_buttons_do_not_pair() {
        let tracker = ClickTracker::new();
        let config = SharedConfig::default();
        assert_eq!(tracker.click_count(&press(10., 10., 0), &config), 1);
        let mut right = press(10., 10., 100);
        right.button = MouseButton::Right;
        assert_eq!(tracker.click_count(&right, &config), 1);
    }

    #[test]
    fn release_repeats_the_count_of_its_press() {
        let tracker = ClickTracker::new();
        let config = SharedConfig::default();
        assert_eq!(tracker.click_count(&press(10., 10., 0), &config), 1);
        assert_eq!(tracker.click_count(&press(10., 10., 100), &config), 2);
        let mut release = press(10., 10., 150);
        release.action = MouseAction::Release;
        assert_eq!(tracker.click_count(&release, &config), 2);
    }

    #[test]
    fn out_of_order_timestamps_do_not_pair() {
        let tracker = ClickTracker::new();
        let config = SharedConfig::default();
        assert_eq!(tracker.click_count(&press(10., 10., 500), &config), 1);
        assert_eq!(tracker.click_count(&press(10., 10., 100), &config), 1);
    }
}
