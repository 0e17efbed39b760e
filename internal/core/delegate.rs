// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

/*!
The delegate: single authoritative owner of one engine instance's lifecycle.

A [`WebDelegate`] is created when the UI pattern attaches, waits for
geometry, creates the surface and the engine exactly once, routes input into
the engine and engine callbacks back to the host, and tears everything down
on release. All of its state lives on the UI thread; engine threads reach it
only through tasks posted by the [`EngineClient`](crate::engine::EngineClient)
that resolve the delegate by id in a registry of weak references.
*/

#![warn(missing_docs)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::api::{CreateParams, LogicalPosition, LogicalSize, WebContext, WebHost};
use crate::drag::{DragAction, DragData, DragOperation};
use crate::embed::EmbedDataRegistry;
use crate::engine::{
    AccessibilityNode, BlurReason, EngineClient, EngineCreateParams, EngineNotice, FocusReason,
    HitTestResult, WebEngine, WebEngineBackend,
};
use crate::input::{
    AccessibilityHoverEvent, EngineAxisEvent, EngineFlingEvent, EngineTouchPoint, EventRouter,
    KeyInput, MouseInput,
};
use crate::script::{InjectionPoint, ScriptInjectionSet, ScriptItem};
use crate::settings::{CacheMode, DarkMode, MixedContentMode, WebSettings};
use crate::sinks;
use crate::surface::{SurfaceConfig, SurfaceManager};

/// Identifies one delegate in the UI-thread registry. Engine threads hold
/// this id instead of a reference, so they can never keep a released
/// delegate alive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DelegateId(u64);

thread_local! {
    static ALL_DELEGATES: RefCell<HashMap<DelegateId, Weak<WebDelegate>>> =
        RefCell::new(HashMap::new());
    static NEXT_DELEGATE_ID: Cell<u64> = const { Cell::new(1) };
}

fn allocate_delegate_id() -> DelegateId {
    NEXT_DELEGATE_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        DelegateId(id)
    })
}

pub(crate) fn register_delegate(id: DelegateId, delegate: Weak<WebDelegate>) {
    ALL_DELEGATES.with(|delegates| {
        delegates.borrow_mut().insert(id, delegate);
    });
}

pub(crate) fn unregister_delegate(id: DelegateId) {
    let _ = ALL_DELEGATES.try_with(|delegates| {
        delegates.borrow_mut().remove(&id);
    });
}

/// Resolve a delegate by id. `None` once the delegate was released.
pub fn delegate_by_id(id: DelegateId) -> Option<Rc<WebDelegate>> {
    ALL_DELEGATES
        .with(|delegates| delegates.borrow().get(&id).and_then(|delegate| delegate.upgrade()))
}

/// The lifecycle state of a delegate. Exactly one state at a time; no
/// transition leaves [`DelegateState::Released`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DelegateState {
    /// Attached, geometry not yet known.
    WaitingForSize,
    /// A creation request is running.
    Creating,
    /// The engine instance exists.
    Created,
    /// Creation failed; reported once, no automatic retry.
    CreateFailed,
    /// Everything was torn down.
    Released,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct PendingResize {
    width: f64,
    height: f64,
    keyboard: bool,
}

/// The adapter object owning one native engine instance and mediating all
/// I/O between it and the host UI tree.
pub struct WebDelegate {
    self_weak: Weak<WebDelegate>,
    id: DelegateId,
    state: Cell<DelegateState>,
    host: Rc<dyn WebHost>,
    backend: Rc<dyn WebEngineBackend>,
    context: WebContext,
    engine: RefCell<Option<Rc<dyn WebEngine>>>,
    surface: SurfaceManager,
    router: EventRouter,
    settings: RefCell<WebSettings>,
    scripts: ScriptInjectionSet,
    embed_data: Arc<EmbedDataRegistry>,
    /// Liveness token of this session; decisions hold a weak reference and
    /// become no-ops once the token is replaced on release.
    session_token: RefCell<Rc<()>>,
    created_callbacks: RefCell<Vec<Box<dyn Fn()>>>,
    released_callbacks: RefCell<Vec<Box<dyn Fn()>>>,
    pending_resize: Cell<Option<PendingResize>>,
    resize_hold: Cell<bool>,
    held_resize: Cell<Option<PendingResize>>,
    last_size: Cell<Option<(f64, f64)>>,
    last_drag_size: Cell<Option<(f64, f64)>>,
    scale_factor: Cell<f32>,
    position: Cell<LogicalPosition>,
}

impl WebDelegate {
    /// Creates a delegate with default [`WebSettings`]. The delegate starts
    /// in [`DelegateState::WaitingForSize`]; nothing native exists until
    /// [`Self::request_create`] succeeds.
    pub fn new(
        host: Rc<dyn WebHost>,
        backend: Rc<dyn WebEngineBackend>,
        context: WebContext,
    ) -> Rc<Self> {
        Self::with_settings(host, backend, context, WebSettings::default())
    }

    /// Creates a delegate with explicit initial settings.
    pub fn with_settings(
        host: Rc<dyn WebHost>,
        backend: Rc<dyn WebEngineBackend>,
        context: WebContext,
        settings: WebSettings,
    ) -> Rc<Self> {
        Rc::new_cyclic(|self_weak| Self {
            self_weak: self_weak.clone(),
            id: allocate_delegate_id(),
            state: Cell::new(DelegateState::WaitingForSize),
            host,
            backend: backend.clone(),
            context,
            engine: RefCell::new(None),
            surface: SurfaceManager::new(backend),
            router: EventRouter::new(),
            settings: RefCell::new(settings),
            scripts: ScriptInjectionSet::new(),
            embed_data: Arc::new(EmbedDataRegistry::new()),
            session_token: RefCell::new(Rc::new(())),
            created_callbacks: RefCell::new(Vec::new()),
            released_callbacks: RefCell::new(Vec::new()),
            pending_resize: Cell::new(None),
            resize_hold: Cell::new(false),
            held_resize: Cell::new(None),
            last_size: Cell::new(None),
            last_drag_size: Cell::new(None),
            scale_factor: Cell::new(1.),
            position: Cell::new(LogicalPosition::default()),
        })
    }

    /// The registry id of this delegate.
    pub fn id(&self) -> DelegateId {
        self.id
    }

    /// The current lifecycle state.
    pub fn state(&self) -> DelegateState {
        self.state.get()
    }

    /// The registry of native-embed records reported by the engine.
    pub fn embed_data(&self) -> &Arc<EmbedDataRegistry> {
        &self.embed_data
    }

    /// The scale factor used to map logical component sizes to physical
    /// surface pixels.
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor.get()
    }

    /// Update the scale factor. Takes effect on the next resize.
    pub fn set_scale_factor(&self, scale_factor: f32) {
        if scale_factor > 0. {
            self.scale_factor.set(scale_factor);
        }
    }

    fn engine(&self) -> Option<Rc<dyn WebEngine>> {
        self.engine.borrow().clone()
    }

    fn session(&self) -> Weak<()> {
        Rc::downgrade(&self.session_token.borrow())
    }

    // ---- lifecycle ------------------------------------------------------

    /// Register a callback fired once the engine instance exists, in
    /// registration order. Ignored on a released delegate.
    pub fn add_created_callback(&self, callback: impl Fn() + 'static) {
        if self.state.get() == DelegateState::Released {
            log::warn!("created callback registered on a released delegate ignored");
            return;
        }
        self.created_callbacks.borrow_mut().push(Box::new(callback));
    }

    /// Remove the most recently registered created callback.
    pub fn remove_last_created_callback(&self) {
        self.created_callbacks.borrow_mut().pop();
    }

    /// Register a callback fired after release completed, in registration
    /// order. Ignored on a released delegate.
    pub fn add_released_callback(&self, callback: impl Fn() + 'static) {
        if self.state.get() == DelegateState::Released {
            log::warn!("released callback registered on a released delegate ignored");
            return;
        }
        self.released_callbacks.borrow_mut().push(Box::new(callback));
    }

    /// Remove the most recently registered released callback.
    pub fn remove_last_released_callback(&self) {
        self.released_callbacks.borrow_mut().pop();
    }

    /// Request creation of the surface and the engine instance.
    ///
    /// Valid from [`DelegateState::WaitingForSize`] or after a previous
    /// failure; anything else returns `false` without side effects — in
    /// particular, a request arriving while one is already running or
    /// after one succeeded can never construct a second engine instance.
    /// An empty size keeps the delegate waiting.
    ///
    /// On success the state is [`DelegateState::Created`] and the registered
    /// created callbacks have fired in order; on failure the state is
    /// [`DelegateState::CreateFailed`] and no callback fires.
    pub fn request_create(&self, params: &CreateParams) -> bool {
        match self.state.get() {
            DelegateState::WaitingForSize | DelegateState::CreateFailed => {}
            state @ (DelegateState::Creating | DelegateState::Created) => {
                log::warn!("create request while {state:?} rejected");
                return false;
            }
            DelegateState::Released => {
                log::warn!("create request on a released delegate rejected");
                return false;
            }
        }
        if params.size.is_empty() {
            log::debug!("create request without geometry; still waiting for size");
            self.state.set(DelegateState::WaitingForSize);
            return false;
        }

        self.state.set(DelegateState::Creating);
        let physical = params.size.to_physical(self.scale_factor.get());
        let surface =
            match self.surface.acquire(params.window, &SurfaceConfig::default(), physical) {
                Ok(surface) => surface,
                Err(err) => {
                    log::warn!("surface acquisition failed: {err}");
                    self.state.set(DelegateState::CreateFailed);
                    return false;
                }
            };

        let client =
            EngineClient::new(self.id, self.context.proxy().clone(), self.embed_data.clone());
        let create = EngineCreateParams {
            surface,
            size: physical,
            incognito: params.incognito,
            client,
        };
        match self.backend.create_engine(create) {
            Ok(engine) => {
                self.settings.borrow().apply_to(&*engine.preferences());
                self.router.attach_engine(engine.clone());
                *self.engine.borrow_mut() = Some(engine);
                self.forward_staged_scripts();
                self.position.set(params.position);
                self.forward_screen_offset();
                self.last_size.set(Some((params.size.width as f64, params.size.height as f64)));
                self.state.set(DelegateState::Created);
                register_delegate(self.id, self.self_weak.clone());
                self.fire_created_callbacks();
                true
            }
            Err(err) => {
                log::warn!("engine creation failed: {err}");
                self.surface.release();
                self.state.set(DelegateState::CreateFailed);
                false
            }
        }
    }

    fn fire_created_callbacks(&self) {
        // Take the list out while firing, so a callback registering another
        // callback does not trip the RefCell. The guard restores the list
        // and keeps registrations made while firing.
        let callbacks = std::mem::take(&mut *self.created_callbacks.borrow_mut());
        let callbacks = scopeguard::guard(callbacks, |callbacks| {
            let mut slot = self.created_callbacks.borrow_mut();
            let added_while_firing = std::mem::take(&mut *slot);
            *slot = callbacks;
            slot.extend(added_while_firing);
        });
        for callback in callbacks.iter() {
            callback();
        }
    }

    /// Forward new component bounds to the surface and the engine.
    ///
    /// Only valid while created. Requests are coalesced: a resize issued
    /// while one is still pending replaces the pending value, so exactly one
    /// resize with the final size reaches the engine. Identical dimensions
    /// are a no-op. During a drag-resize the request is held back and
    /// flushed when the drag-resize ends. `keyboard` marks resizes caused by
    /// the soft keyboard appearing.
    pub fn resize(&self, width: f64, height: f64, keyboard: bool) {
        if self.state.get() != DelegateState::Created {
            log::debug!("resize while not created dropped");
            return;
        }
        if width <= 0. || height <= 0. {
            return;
        }
        if self.last_size.get() == Some((width, height)) {
            return;
        }
        self.last_size.set(Some((width, height)));
        let pending = PendingResize { width, height, keyboard };
        if self.resize_hold.get() {
            self.held_resize.set(Some(pending));
            return;
        }
        self.schedule_resize(pending);
    }

    fn schedule_resize(&self, pending: PendingResize) {
        // Coalescing: only the first pending value schedules the flush task;
        // later requests merely replace the value it will pick up.
        if self.pending_resize.replace(Some(pending)).is_some() {
            return;
        }
        let id = self.id;
        let posted = self.context.proxy().post(Box::new(move || {
            if let Some(delegate) = delegate_by_id(id) {
                delegate.flush_pending_resize();
            }
        }));
        if posted.is_err() {
            log::warn!("event loop terminated; resize dropped");
        }
    }

    fn flush_pending_resize(&self) {
        let Some(pending) = self.pending_resize.take() else { return };
        if self.state.get() != DelegateState::Created {
            return;
        }
        let physical = LogicalSize::new(pending.width as f32, pending.height as f32)
            .to_physical(self.scale_factor.get());
        self.surface.resize(physical);
        if let Some(engine) = self.engine() {
            engine.resize(physical.width, physical.height, pending.keyboard);
        }
        self.forward_screen_offset();
    }

    fn forward_screen_offset(&self) {
        if let Some(engine) = self.engine() {
            let position = self.position.get();
            engine.set_screen_offset(position.x as f64, position.y as f64);
        }
    }

    /// The component moved within its window.
    pub fn set_position(&self, position: LogicalPosition) {
        if self.position.replace(position) != position {
            self.forward_screen_offset();
        }
    }

    /// Resize interactively while the user drags the component edge. Plain
    /// resizes arriving during the drag are deferred until
    /// [`Self::drag_resize_end`].
    pub fn drag_resize(&self, width: f64, height: f64) {
        if self.state.get() != DelegateState::Created || width <= 0. || height <= 0. {
            return;
        }
        self.resize_hold.set(true);
        let previous = self
            .last_drag_size
            .replace(Some((width, height)))
            .or(self.last_size.get())
            .unwrap_or((width, height));
        let physical =
            LogicalSize::new(width as f32, height as f32).to_physical(self.scale_factor.get());
        let pre = LogicalSize::new(previous.0 as f32, previous.1 as f32)
            .to_physical(self.scale_factor.get());
        self.surface.resize(physical);
        if let Some(engine) = self.engine() {
            engine.drag_resize(physical.width, physical.height, pre.width, pre.height);
        }
    }

    /// The drag-resize finished; any resize held back during it is flushed
    /// now.
    pub fn drag_resize_end(&self) {
        self.resize_hold.set(false);
        self.last_drag_size.set(None);
        if let Some(held) = self.held_resize.take() {
            self.schedule_resize(held);
        }
    }

    /// Make the surface visible and resume engine rendering.
    pub fn show(&self) {
        if self.state.get() != DelegateState::Created {
            log::debug!("show while not created dropped");
            return;
        }
        self.surface.set_visible(true);
        if let Some(engine) = self.engine() {
            engine.on_show();
        }
    }

    /// Hide the surface and suspend engine rendering. The engine instance
    /// stays alive.
    pub fn hide(&self) {
        if self.state.get() != DelegateState::Created {
            log::debug!("hide while not created dropped");
            return;
        }
        self.surface.set_visible(false);
        if let Some(engine) = self.engine() {
            engine.on_hide();
        }
    }

    /// The component gained keyboard focus.
    pub fn focus(&self, reason: FocusReason) {
        if let Some(engine) = self.engine() {
            engine.on_focus(reason);
        }
    }

    /// The component lost keyboard focus.
    pub fn blur(&self, reason: BlurReason) {
        if let Some(engine) = self.engine() {
            engine.on_blur(reason);
        }
    }

    /// Tear everything down: outstanding decisions become orphans, the
    /// surface and then the engine handle are destroyed, and the state
    /// transitions to [`DelegateState::Released`]. Registered released
    /// callbacks fire in order once the teardown completed. Idempotent.
    pub fn release(&self) {
        if self.state.get() == DelegateState::Released {
            return;
        }
        // Replacing the token invalidates the weak references every pending
        // decision holds; their terminal operations turn into no-ops.
        *self.session_token.borrow_mut() = Rc::new(());
        self.router.detach_engine();
        self.pending_resize.take();
        self.held_resize.take();
        self.resize_hold.set(false);
        self.surface.release();
        if let Some(engine) = self.engine.borrow_mut().take() {
            engine.destroy();
        }
        unregister_delegate(self.id);
        self.state.set(DelegateState::Released);
        let callbacks = std::mem::take(&mut *self.released_callbacks.borrow_mut());
        for callback in &callbacks {
            callback();
        }
        self.created_callbacks.borrow_mut().clear();
    }

    // ---- input dispatch -------------------------------------------------

    /// A touch point went down.
    pub fn handle_touch_down(&self, id: i32, x: f64, y: f64, from_overlay: bool) {
        self.router.handle_touch_down(id, x, y, from_overlay);
    }

    /// A touch point moved.
    pub fn handle_touch_move(&self, id: i32, x: f64, y: f64, from_overlay: bool) {
        self.router.handle_touch_move(id, x, y, from_overlay);
    }

    /// Several touch points moved at once; ordering is preserved.
    pub fn handle_touch_move_batch(&self, points: &[EngineTouchPoint], from_overlay: bool) {
        self.router.handle_touch_move_batch(points, from_overlay);
    }

    /// A touch point was lifted.
    pub fn handle_touch_up(&self, id: i32, x: f64, y: f64, from_overlay: bool) {
        self.router.handle_touch_up(id, x, y, from_overlay);
    }

    /// The touch session was cancelled.
    pub fn handle_touch_cancel(&self) {
        self.router.handle_touch_cancel();
    }

    /// Whether the given touch identifier currently has a session.
    pub fn is_touch_active(&self, id: i32) -> bool {
        self.router.is_touch_active(id)
    }

    /// Dispatch a mouse event, running double-click detection for presses.
    pub fn handle_mouse_event(&self, input: &MouseInput) {
        self.router.handle_mouse_event(input, self.context.config());
    }

    /// Dispatch a keyboard event. Returns whether the engine consumed it.
    pub fn handle_key_event(&self, input: KeyInput) -> bool {
        self.router.handle_key_event(input)
    }

    /// The most recent key event the engine declined, for replay by the
    /// host focus chain.
    pub fn take_unhandled_key_event(&self) -> Option<KeyInput> {
        self.router.take_unhandled_key_event()
    }

    /// Dispatch a scroll-wheel/axis event.
    pub fn handle_axis_event(&self, event: &EngineAxisEvent) {
        self.router.handle_axis_event(event);
    }

    /// Dispatch a touchpad fling.
    pub fn handle_fling_event(&self, event: &EngineFlingEvent) {
        self.router.handle_fling_event(event);
    }

    /// Forward an accessibility hover.
    pub fn handle_accessibility_hover(&self, event: &AccessibilityHoverEvent) {
        self.router.handle_accessibility_hover(event);
    }

    /// Begin a drag session carrying `data`.
    pub fn start_drag_session(&self, data: DragData) -> bool {
        self.router.start_drag_session(data)
    }

    /// Dispatch a drag event. On a drop, the operation the engine accepted
    /// is surfaced through [`WebHost::on_drag_status`] and returned.
    pub fn handle_drag_event(&self, x: i32, y: i32, action: DragAction) -> Option<DragOperation> {
        let status = self.router.handle_drag_event(x, y, action);
        if let Some(operation) = status {
            self.host.on_drag_status(operation);
        }
        status
    }

    /// Whether a drag session is in progress.
    pub fn drag_in_progress(&self) -> bool {
        self.router.drag_in_progress()
    }

    // ---- navigation and scripting ---------------------------------------

    /// Navigate to `url` with additional request headers.
    pub fn load_url(&self, url: &str, headers: &[(String, String)]) {
        match self.engine() {
            Some(engine) => engine.load_url(url, headers),
            None => log::debug!("load_url while not created dropped"),
        }
    }

    /// Load `data` directly, resolving relative URLs against `base_url`.
    pub fn load_data(&self, base_url: &str, data: &str, mime_type: &str, encoding: &str) {
        match self.engine() {
            Some(engine) => engine.load_data(base_url, data, mime_type, encoding),
            None => log::debug!("load_data while not created dropped"),
        }
    }

    /// Go back one history entry.
    pub fn backward(&self) {
        if let Some(engine) = self.engine() {
            engine.backward();
        }
    }

    /// Go forward one history entry.
    pub fn forward(&self) {
        if let Some(engine) = self.engine() {
            engine.forward();
        }
    }

    /// Whether a back entry exists.
    pub fn can_go_back(&self) -> bool {
        self.engine().is_some_and(|engine| engine.can_go_back())
    }

    /// Whether a forward entry exists.
    pub fn can_go_forward(&self) -> bool {
        self.engine().is_some_and(|engine| engine.can_go_forward())
    }

    /// Whether the history can move by `step` entries.
    pub fn access_step(&self, step: i32) -> bool {
        self.engine().is_some_and(|engine| engine.access_step(step))
    }

    /// Move the history by `step` entries.
    pub fn back_or_forward(&self, step: i32) {
        if let Some(engine) = self.engine() {
            engine.back_or_forward(step);
        }
    }

    /// Reload the current page.
    pub fn reload(&self) {
        if let Some(engine) = self.engine() {
            engine.reload();
        }
    }

    /// Stop the current load.
    pub fn stop_loading(&self) {
        if let Some(engine) = self.engine() {
            engine.stop_loading();
        }
    }

    /// Run `code` in the page. The result arrives through `callback` later;
    /// without an engine the callback is dropped.
    pub fn execute_script(&self, code: &str, callback: impl FnOnce(String) + 'static) {
        match self.engine() {
            Some(engine) => engine.execute_script(code, Box::new(callback)),
            None => log::debug!("execute_script while not created dropped"),
        }
    }

    /// Post a message over the JavaScript bridge.
    pub fn post_web_message(&self, message: &str, uri: &str) {
        match self.engine() {
            Some(engine) => engine.post_web_message(message, uri),
            None => log::debug!("post_web_message while not created dropped"),
        }
    }

    /// Stage script snippets for `point`. Sets staged before creation are
    /// handed over when the engine is created; later stagings are handed
    /// over immediately. The engine applies a handed-over set on every
    /// following navigation.
    pub fn set_script_items(&self, point: InjectionPoint, items: Vec<ScriptItem>) {
        self.scripts.stage(point, items);
        if self.state.get() == DelegateState::Created {
            self.forward_staged_scripts();
        }
    }

    fn forward_staged_scripts(&self) {
        let Some(engine) = self.engine() else { return };
        for point in self.scripts.staged_points() {
            if let Some(items) = self.scripts.take(point) {
                engine.inject_scripts(point, &items);
            }
        }
    }

    /// Answer an autofill request with filled form data.
    pub fn autofill_fill(&self, view_data: &str) {
        match self.engine() {
            Some(engine) => engine.fill_autofill_data(view_data),
            None => log::debug!("autofill data while not created dropped"),
        }
    }

    /// Tell the engine no autofill data is coming.
    pub fn autofill_cancel(&self) {
        if let Some(engine) = self.engine() {
            engine.cancel_autofill();
        }
    }

    // ---- queries --------------------------------------------------------

    /// The current URL, empty while not created.
    pub fn url(&self) -> String {
        self.engine().map(|engine| engine.url()).unwrap_or_default()
    }

    /// The current document title, empty while not created.
    pub fn title(&self) -> String {
        self.engine().map(|engine| engine.title()).unwrap_or_default()
    }

    /// The current load progress in percent, 0 while not created.
    pub fn progress(&self) -> i32 {
        self.engine().map(|engine| engine.progress()).unwrap_or_default()
    }

    /// The current page height in physical pixels, 0 while not created.
    pub fn page_height(&self) -> i32 {
        self.engine().map(|engine| engine.page_height()).unwrap_or_default()
    }

    /// Classify what lies under the last pointer position.
    pub fn hit_test(&self) -> HitTestResult {
        self.engine().map(|engine| engine.hit_test()).unwrap_or_default()
    }

    /// Query one node of the engine's accessibility tree.
    pub fn accessibility_node_by_id(&self, id: i64) -> Option<AccessibilityNode> {
        self.engine().and_then(|engine| engine.accessibility_node_by_id(id))
    }

    /// Whether the engine is still applying a resize.
    pub fn pending_size_status(&self) -> bool {
        self.engine().is_some_and(|engine| engine.pending_size_status())
    }

    // ---- cookies --------------------------------------------------------

    /// Set a cookie for `url`. False while not created.
    pub fn set_cookie(&self, url: &str, value: &str, incognito: bool) -> bool {
        self.engine()
            .is_some_and(|engine| engine.cookie_manager().set_cookie(url, value, incognito))
    }

    /// The cookie header value for `url`, empty while not created.
    pub fn cookie_value(&self, url: &str, incognito: bool) -> String {
        self.engine()
            .map(|engine| engine.cookie_manager().cookie_value(url, incognito))
            .unwrap_or_default()
    }

    /// Remove every cookie.
    pub fn delete_all_cookies(&self, incognito: bool) {
        if let Some(engine) = self.engine() {
            engine.cookie_manager().delete_all(incognito);
        }
    }

    // ---- settings -------------------------------------------------------

    /// The current settings of this component.
    pub fn settings(&self) -> WebSettings {
        self.settings.borrow().clone()
    }

    fn update_setting(&self, update: impl FnOnce(&mut WebSettings)) {
        update(&mut self.settings.borrow_mut());
    }

    /// Enable or disable JavaScript.
    pub fn update_javascript_enabled(&self, enabled: bool) {
        self.update_setting(|s| s.javascript_enabled = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_javascript_enabled(enabled);
        }
    }

    /// Allow `file://` access.
    pub fn update_file_access(&self, enabled: bool) {
        self.update_setting(|s| s.file_access = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_file_access(enabled);
        }
    }

    /// Block images loaded over the network.
    pub fn update_block_network_image(&self, blocked: bool) {
        self.update_setting(|s| s.block_network_image = blocked);
        if let Some(engine) = self.engine() {
            engine.preferences().set_block_network_image(blocked);
        }
    }

    /// Load images automatically.
    pub fn update_loads_images_automatically(&self, enabled: bool) {
        self.update_setting(|s| s.loads_images_automatically = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_loads_images_automatically(enabled);
        }
    }

    /// How mixed http/https content is treated.
    pub fn update_mixed_content_mode(&self, mode: MixedContentMode) {
        self.update_setting(|s| s.mixed_content_mode = mode);
        if let Some(engine) = self.engine() {
            engine.preferences().set_mixed_content_mode(mode);
        }
    }

    /// Allow pinch zoom.
    pub fn update_zoom_access(&self, enabled: bool) {
        self.update_setting(|s| s.zoom_access = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_zoom_access(enabled);
        }
    }

    /// Enable DOM storage.
    pub fn update_dom_storage_enabled(&self, enabled: bool) {
        self.update_setting(|s| s.dom_storage_enabled = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_dom_storage_enabled(enabled);
        }
    }

    /// Enable the Web SQL database.
    pub fn update_database_enabled(&self, enabled: bool) {
        self.update_setting(|s| s.database_enabled = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_database_enabled(enabled);
        }
    }

    /// Enable geolocation.
    pub fn update_geolocation_enabled(&self, enabled: bool) {
        self.update_setting(|s| s.geolocation_enabled = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_geolocation_enabled(enabled);
        }
    }

    /// Require a user gesture for media playback.
    pub fn update_media_play_gesture_access(&self, required: bool) {
        self.update_setting(|s| s.media_play_gesture_access = required);
        if let Some(engine) = self.engine() {
            engine.preferences().set_media_play_gesture_access(required);
        }
    }

    /// Allow `window.open` to create sibling components.
    pub fn update_multi_window_access(&self, enabled: bool) {
        self.update_setting(|s| s.multi_window_access = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_multi_window_access(enabled);
        }
    }

    /// Allow `window.open` without a user gesture.
    pub fn update_allow_window_open_method(&self, enabled: bool) {
        self.update_setting(|s| s.allow_window_open_method = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_allow_window_open_method(enabled);
        }
    }

    /// The HTTP cache strategy.
    pub fn update_cache_mode(&self, mode: CacheMode) {
        self.update_setting(|s| s.cache_mode = mode);
        if let Some(engine) = self.engine() {
            engine.preferences().set_cache_mode(mode);
        }
    }

    /// The dark-mode strategy.
    pub fn update_dark_mode(&self, mode: DarkMode) {
        self.update_setting(|s| s.dark_mode = mode);
        if let Some(engine) = self.engine() {
            engine.preferences().set_dark_mode(mode);
        }
    }

    /// Force algorithmic darkening in dark mode.
    pub fn update_force_dark_access(&self, enabled: bool) {
        self.update_setting(|s| s.force_dark_access = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_force_dark_access(enabled);
        }
    }

    /// Text zoom in percent.
    pub fn update_text_zoom_ratio(&self, ratio: i32) {
        self.update_setting(|s| s.text_zoom_ratio = ratio);
        if let Some(engine) = self.engine() {
            engine.preferences().set_text_zoom_ratio(ratio);
        }
    }

    /// Initial page scale in percent.
    pub fn update_initial_scale(&self, scale: f32) {
        self.update_setting(|s| s.initial_scale = scale);
        if let Some(engine) = self.engine() {
            engine.preferences().set_initial_scale(scale);
        }
    }

    /// Override the user agent.
    pub fn update_user_agent(&self, user_agent: &str) {
        self.update_setting(|s| s.user_agent = user_agent.into());
        if let Some(engine) = self.engine() {
            engine.preferences().set_user_agent(user_agent);
        }
    }

    /// Allow remote debugging.
    pub fn update_web_debugging(&self, enabled: bool) {
        self.update_setting(|s| s.web_debugging = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_web_debugging(enabled);
        }
    }

    /// Load pages zoomed out to overview.
    pub fn update_overview_mode(&self, enabled: bool) {
        self.update_setting(|s| s.overview_mode = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_overview_mode(enabled);
        }
    }

    /// Smooth pinch-zoom rendering.
    pub fn update_pinch_smooth_mode(&self, enabled: bool) {
        self.update_setting(|s| s.pinch_smooth_mode = enabled);
        if let Some(engine) = self.engine() {
            engine.preferences().set_pinch_smooth_mode(enabled);
        }
    }

    // ---- engine notices -------------------------------------------------

    /// Dispatch one engine notice to the host. Runs on the UI thread, inside
    /// the task the [`EngineClient`] posted.
    pub(crate) fn handle_notice(&self, notice: EngineNotice) {
        if self.state.get() == DelegateState::Released {
            // The registry entry is gone by then, but a task already queued
            // when release ran can still get here.
            log::debug!("engine notice after release dropped");
            return;
        }
        let host = &self.host;
        match notice {
            EngineNotice::PageStarted { url } => host.on_page_started(&url),
            EngineNotice::PageFinished { url } => host.on_page_finished(&url),
            EngineNotice::ProgressChanged { progress } => host.on_progress_changed(progress),
            EngineNotice::TitleChanged { title } => host.on_title_changed(&title),
            EngineNotice::PageError(error) => host.on_page_error(&error),
            EngineNotice::ConsoleMessage(message) => host.on_console_message(&message),
            EngineNotice::CursorChanged(kind) => host.on_cursor_changed(kind),
            EngineNotice::ScrollOffsetChanged { x, y } => host.on_scroll_offset_changed(x, y),
            EngineNotice::Overscroll { delta_x, delta_y } => host.on_overscroll(delta_x, delta_y),
            EngineNotice::OverScrollFlingVelocity { velocity_x, velocity_y } => {
                host.on_over_scroll_fling_velocity(velocity_x, velocity_y)
            }
            EngineNotice::ScrollState { scrolling } => host.on_scroll_state(scrolling),
            EngineNotice::SelectionBoundsChanged { x, y, width, height } => {
                host.on_selection_bounds_changed(x, y, width, height)
            }
            EngineNotice::RootLayerChanged { width, height } => {
                host.on_root_layer_changed(width, height)
            }
            EngineNotice::FullScreenEnter => host.on_full_screen_enter(),
            EngineNotice::FullScreenExit => host.on_full_screen_exit(),
            EngineNotice::JsDialog { kind, url, message, responder } => {
                let decision = Rc::new(sinks::JsDialogDecision::new(responder, self.session()));
                if !host.on_js_dialog(kind, &url, &message, decision.clone()) {
                    decision.cancel();
                }
            }
            EngineNotice::HttpAuthRequest { host: server, realm, responder } => {
                let decision = Rc::new(sinks::HttpAuthDecision::new(responder, self.session()));
                if !host.on_http_auth_request(&server, &realm, decision.clone()) {
                    decision.cancel();
                }
            }
            EngineNotice::SslError { error, responder } => {
                let decision = Rc::new(sinks::SslErrorDecision::new(responder, self.session()));
                if !host.on_ssl_error(error, decision.clone()) {
                    decision.handle_cancel();
                }
            }
            EngineNotice::AllSslErrors { errors, responder } => {
                let decision =
                    Rc::new(sinks::AggregateSslErrorDecision::new(responder, self.session()));
                if !host.on_all_ssl_errors(&errors, decision.clone()) {
                    decision.handle_cancel();
                }
            }
            EngineNotice::ClientCertRequest { host: server, port, responder } => {
                let decision = Rc::new(sinks::ClientCertDecision::new(responder, self.session()));
                if !host.on_client_cert_request(&server, port, decision.clone()) {
                    decision.ignore();
                }
            }
            EngineNotice::GeolocationShow { origin, responder } => {
                let decision =
                    Rc::new(sinks::GeolocationDecision::new(origin.clone(), responder, self.session()));
                host.on_geolocation_show(&origin, decision);
            }
            EngineNotice::GeolocationHide => host.on_geolocation_hide(),
            EngineNotice::PermissionRequest { origin, resources, responder } => {
                let decision = Rc::new(sinks::PermissionDecision::new(
                    origin.clone(),
                    resources.clone(),
                    responder,
                    self.session(),
                ));
                host.on_permission_request(&origin, &resources, decision);
            }
            EngineNotice::PermissionRequestCancelled => host.on_permission_request_cancelled(),
            EngineNotice::ScreenCaptureRequest { origin, responder } => {
                let decision = Rc::new(sinks::ScreenCaptureDecision::new(
                    origin.clone(),
                    responder,
                    self.session(),
                ));
                host.on_screen_capture_request(&origin, decision);
            }
            EngineNotice::FileSelector { params, responder } => {
                let decision =
                    Rc::new(sinks::FileSelectionDecision::new(responder, self.session()));
                if !host.on_file_selector(&params, decision.clone()) {
                    decision.cancel();
                }
            }
            EngineNotice::ContextMenu { params, responder } => {
                let decision = Rc::new(sinks::ContextMenuDecision::new(responder, self.session()));
                if !host.on_context_menu(&params, decision.clone()) {
                    decision.cancel();
                }
            }
            EngineNotice::WindowNew { target_url, user_gesture, responder } => {
                let decision = Rc::new(sinks::WindowDecision::new(responder, self.session()));
                host.on_window_new(&target_url, user_gesture, decision);
            }
            EngineNotice::WindowExit => host.on_window_exit(),
            EngineNotice::AppLink { url, responder } => {
                let decision = Rc::new(sinks::AppLinkDecision::new(responder, self.session()));
                host.on_app_link(&url, decision);
            }
            EngineNotice::DataResubmission { responder } => {
                let decision =
                    Rc::new(sinks::DataResubmissionDecision::new(responder, self.session()));
                host.on_data_resubmission(decision);
            }
            EngineNotice::JsBridgeMessage { message } => host.on_js_bridge_message(&message),
            EngineNotice::AutofillRequest { view_data } => host.on_autofill_request(&view_data),
            EngineNotice::EmbedLifecycle { id, .. } => {
                // The registry was updated on the reporting thread already.
                host.on_native_embed_changed(&id)
            }
        }
    }
}

impl Drop for WebDelegate {
    fn drop(&mut self) {
        self.release();
    }
}
