// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

#![doc = include_str!("README.md")]
#![deny(unsafe_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use i_webembed_core::api::{
    CreateParams, EngineError, LogicalPosition, LogicalSize, NativeWindow, PhysicalSize,
    SurfaceError, WebContext, WebHost,
};
use i_webembed_core::drag::{DragAction, DragOperation, EngineDragEvent};
use i_webembed_core::engine::{
    AccessibilityNode, AppLinkResponder, BlurReason, ClientCertResponder, ConsoleMessage,
    ContextMenuAction, ContextMenuParams, ContextMenuResponder, CookieManager, CursorKind,
    DataResubmissionResponder, DialogResponder, EngineClient, EngineCreateParams,
    EnginePreferences, FileSelectionResponder, FileSelectorParams, FocusReason,
    GeolocationResponder, HitTestResult, HttpAuthResponder, JsDialogKind, PageError,
    PermissionKind, PermissionResponder, ScreenCaptureConfig, ScreenCaptureResponder,
    SslError, SslErrorResponder, WebEngine, WebEngineBackend, WindowResponder,
};
use i_webembed_core::input::{
    AccessibilityHoverEvent, EngineAxisEvent, EngineFlingEvent, EngineKeyEvent, EngineMouseEvent,
    EngineTouchPoint, KeyAction, MouseAction, MouseButton,
};
use i_webembed_core::script::{InjectionPoint, ScriptItem};
use i_webembed_core::settings::{CacheMode, DarkMode, MixedContentMode};
use i_webembed_core::sinks::{
    AggregateSslErrorDecision, AppLinkDecision, ClientCertDecision, ContextMenuDecision,
    DataResubmissionDecision, FileSelectionDecision, GeolocationDecision, HttpAuthDecision,
    JsDialogDecision, PermissionDecision, ScreenCaptureDecision, SslErrorDecision, WindowDecision,
};
use i_webembed_core::surface::{SurfaceBundle, SurfaceConfig};
use i_webembed_core::task::TaskQueue;
use i_webembed_core::WebDelegate;

/// One call the delegate made into the mock engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    TouchPress { id: i32, x: f64, y: f64 },
    TouchMove { id: i32, x: f64, y: f64 },
    TouchMoveBatch { ids: Vec<i32> },
    TouchRelease { id: i32 },
    TouchCancel,
    Mouse { action: MouseAction, button: MouseButton, click_count: i32 },
    Key { code: i32, action: KeyAction },
    Axis { delta_x: f64, delta_y: f64 },
    Fling { velocity_x: f64, velocity_y: f64 },
    Drag { action: DragAction },
    AccessibilityHover { x: i32, y: i32 },
    Resize { width: u32, height: u32, keyboard: bool },
    ScreenOffset { x: f64, y: f64 },
    DragResize { width: u32, height: u32 },
    Show,
    Hide,
    Focus,
    Blur,
    Destroy,
    LoadUrl { url: String },
    LoadData { mime_type: String },
    Backward,
    Forward,
    BackOrForward { step: i32 },
    Reload,
    StopLoading,
    ExecuteScript { code: String },
    InjectScripts { point: InjectionPoint, count: usize },
    PostWebMessage { message: String },
    AutofillFill { view_data: String },
    AutofillCancel,
}

/// A surface operation the delegate drove through the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Created { handle: u64, window: NativeWindow },
    Resized { handle: u64, size: PhysicalSize },
    Visible { handle: u64, visible: bool },
    Destroyed { handle: u64 },
}

/// Records every preference value pushed by the delegate, as `name=value`
/// strings in push order.
#[derive(Default)]
pub struct MockPreferences {
    calls: RefCell<Vec<String>>,
}

impl MockPreferences {
    /// The recorded `name=value` entries.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, name: &str, value: impl std::fmt::Debug) {
        self.calls.borrow_mut().push(format!("{name}={value:?}"));
    }
}

impl EnginePreferences for MockPreferences {
    fn set_javascript_enabled(&self, enabled: bool) {
        self.record("javascript_enabled", enabled);
    }
    fn set_file_access(&self, enabled: bool) {
        self.record("file_access", enabled);
    }
    fn set_block_network_image(&self, blocked: bool) {
        self.record("block_network_image", blocked);
    }
    fn set_loads_images_automatically(&self, enabled: bool) {
        self.record("loads_images_automatically", enabled);
    }
    fn set_mixed_content_mode(&self, mode: MixedContentMode) {
        self.record("mixed_content_mode", mode);
    }
    fn set_zoom_access(&self, enabled: bool) {
        self.record("zoom_access", enabled);
    }
    fn set_dom_storage_enabled(&self, enabled: bool) {
        self.record("dom_storage_enabled", enabled);
    }
    fn set_database_enabled(&self, enabled: bool) {
        self.record("database_enabled", enabled);
    }
    fn set_geolocation_enabled(&self, enabled: bool) {
        self.record("geolocation_enabled", enabled);
    }
    fn set_media_play_gesture_access(&self, required: bool) {
        self.record("media_play_gesture_access", required);
    }
    fn set_multi_window_access(&self, enabled: bool) {
        self.record("multi_window_access", enabled);
    }
    fn set_allow_window_open_method(&self, enabled: bool) {
        self.record("allow_window_open_method", enabled);
    }
    fn set_cache_mode(&self, mode: CacheMode) {
        self.record("cache_mode", mode);
    }
    fn set_dark_mode(&self, mode: DarkMode) {
        self.record("dark_mode", mode);
    }
    fn set_force_dark_access(&self, enabled: bool) {
        self.record("force_dark_access", enabled);
    }
    fn set_text_zoom_ratio(&self, ratio: i32) {
        self.record("text_zoom_ratio", ratio);
    }
    fn set_initial_scale(&self, scale: f32) {
        self.record("initial_scale", scale);
    }
    fn set_user_agent(&self, user_agent: &str) {
        self.record("user_agent", user_agent);
    }
    fn set_web_debugging(&self, enabled: bool) {
        self.record("web_debugging", enabled);
    }
    fn set_overview_mode(&self, enabled: bool) {
        self.record("overview_mode", enabled);
    }
    fn set_pinch_smooth_mode(&self, enabled: bool) {
        self.record("pinch_smooth_mode", enabled);
    }
}

/// An in-memory cookie store keyed by URL.
#[derive(Default)]
pub struct MockCookieManager {
    cookies: RefCell<std::collections::HashMap<String, String>>,
}

impl CookieManager for MockCookieManager {
    fn set_cookie(&self, url: &str, value: &str, _incognito: bool) -> bool {
        self.cookies.borrow_mut().insert(url.into(), value.into());
        true
    }

    fn cookie_value(&self, url: &str, _incognito: bool) -> String {
        self.cookies.borrow().get(url).cloned().unwrap_or_default()
    }

    fn delete_all(&self, _incognito: bool) {
        self.cookies.borrow_mut().clear();
    }
}

/// A scripted engine instance recording every call the delegate makes.
pub struct MockEngine {
    calls: RefCell<Vec<EngineCall>>,
    client: EngineClient,
    prefs: Rc<MockPreferences>,
    cookies: Rc<MockCookieManager>,
    /// Whether [`WebEngine::send_key_event`] reports the event as consumed.
    pub consume_keys: Cell<bool>,
    /// The status reported for drops.
    pub drag_status: Cell<DragOperation>,
    /// The URL reported by queries.
    pub current_url: RefCell<String>,
    /// The title reported by queries.
    pub current_title: RefCell<String>,
    /// The progress reported by queries.
    pub current_progress: Cell<i32>,
    /// The hit-test result reported by queries.
    pub hit_test_result: RefCell<HitTestResult>,
    /// The accessibility node reported for any queried id.
    pub accessibility_node: RefCell<Option<AccessibilityNode>>,
    /// Whether the engine pretends a resize is still pending.
    pub pending_size: Cell<bool>,
    destroyed: Cell<bool>,
}

impl MockEngine {
    fn new(params: &EngineCreateParams) -> Rc<Self> {
        Rc::new(Self {
            calls: RefCell::new(Vec::new()),
            client: params.client.clone(),
            prefs: Rc::new(MockPreferences::default()),
            cookies: Rc::new(MockCookieManager::default()),
            consume_keys: Cell::new(true),
            drag_status: Cell::new(DragOperation::Copy),
            current_url: RefCell::new(String::new()),
            current_title: RefCell::new(String::new()),
            current_progress: Cell::new(0),
            hit_test_result: RefCell::new(HitTestResult::default()),
            accessibility_node: RefCell::new(None),
            pending_size: Cell::new(false),
            destroyed: Cell::new(false),
        })
    }

    fn record(&self, call: EngineCall) {
        self.calls.borrow_mut().push(call);
    }

    /// Every call recorded so far, in order.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().clone()
    }

    /// The calls matching `filter`, in order.
    pub fn calls_matching(&self, filter: impl Fn(&EngineCall) -> bool) -> Vec<EngineCall> {
        self.calls.borrow().iter().filter(|call| filter(call)).cloned().collect()
    }

    /// The client handed to this engine at creation. Clone it into other
    /// threads to emit notices the way a real engine would.
    pub fn client(&self) -> EngineClient {
        self.client.clone()
    }

    /// The preference recorder of this instance.
    pub fn preferences_log(&self) -> Rc<MockPreferences> {
        self.prefs.clone()
    }

    /// Whether [`WebEngine::destroy`] ran.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }
}

impl WebEngine for MockEngine {
    fn on_touch_press(&self, id: i32, x: f64, y: f64, _from_overlay: bool) {
        self.record(EngineCall::TouchPress { id, x, y });
    }
    fn on_touch_move(&self, id: i32, x: f64, y: f64, _from_overlay: bool) {
        self.record(EngineCall::TouchMove { id, x, y });
    }
    fn on_touch_move_batch(&self, points: &[EngineTouchPoint], _from_overlay: bool) {
        self.record(EngineCall::TouchMoveBatch { ids: points.iter().map(|p| p.id).collect() });
    }
    fn on_touch_release(&self, id: i32, _x: f64, _y: f64, _from_overlay: bool) {
        self.record(EngineCall::TouchRelease { id });
    }
    fn on_touch_cancel(&self) {
        self.record(EngineCall::TouchCancel);
    }
    fn send_mouse_event(&self, event: &EngineMouseEvent) {
        self.record(EngineCall::Mouse {
            action: event.action,
            button: event.button,
            click_count: event.click_count,
        });
    }
    fn send_key_event(&self, event: &EngineKeyEvent) -> bool {
        self.record(EngineCall::Key { code: event.code, action: event.action });
        self.consume_keys.get()
    }
    fn send_axis_event(&self, event: &EngineAxisEvent) {
        self.record(EngineCall::Axis { delta_x: event.delta_x, delta_y: event.delta_y });
    }
    fn send_fling_event(&self, event: &EngineFlingEvent) {
        self.record(EngineCall::Fling {
            velocity_x: event.velocity_x,
            velocity_y: event.velocity_y,
        });
    }
    fn send_drag_event(&self, event: &EngineDragEvent) {
        self.record(EngineCall::Drag { action: event.action });
    }
    fn drag_acceptable_status(&self) -> DragOperation {
        self.drag_status.get()
    }
    fn send_accessibility_hover(&self, event: &AccessibilityHoverEvent) {
        self.record(EngineCall::AccessibilityHover { x: event.x, y: event.y });
    }

    fn resize(&self, width: u32, height: u32, keyboard: bool) {
        self.record(EngineCall::Resize { width, height, keyboard });
    }
    fn set_screen_offset(&self, x: f64, y: f64) {
        self.record(EngineCall::ScreenOffset { x, y });
    }
    fn drag_resize(&self, width: u32, height: u32, _pre_width: u32, _pre_height: u32) {
        self.record(EngineCall::DragResize { width, height });
    }
    fn on_show(&self) {
        self.record(EngineCall::Show);
    }
    fn on_hide(&self) {
        self.record(EngineCall::Hide);
    }
    fn on_focus(&self, _reason: FocusReason) {
        self.record(EngineCall::Focus);
    }
    fn on_blur(&self, _reason: BlurReason) {
        self.record(EngineCall::Blur);
    }
    fn destroy(&self) {
        self.destroyed.set(true);
        self.record(EngineCall::Destroy);
    }

    fn load_url(&self, url: &str, _headers: &[(String, String)]) {
        *self.current_url.borrow_mut() = url.into();
        self.record(EngineCall::LoadUrl { url: url.into() });
    }
    fn load_data(&self, _base_url: &str, _data: &str, mime_type: &str, _encoding: &str) {
        self.record(EngineCall::LoadData { mime_type: mime_type.into() });
    }
    fn backward(&self) {
        self.record(EngineCall::Backward);
    }
    fn forward(&self) {
        self.record(EngineCall::Forward);
    }
    fn can_go_back(&self) -> bool {
        true
    }
    fn can_go_forward(&self) -> bool {
        false
    }
    fn access_step(&self, step: i32) -> bool {
        step.abs() <= 1
    }
    fn back_or_forward(&self, step: i32) {
        self.record(EngineCall::BackOrForward { step });
    }
    fn reload(&self) {
        self.record(EngineCall::Reload);
    }
    fn stop_loading(&self) {
        self.record(EngineCall::StopLoading);
    }

    fn execute_script(&self, code: &str, callback: Box<dyn FnOnce(String)>) {
        self.record(EngineCall::ExecuteScript { code: code.into() });
        callback(format!("result of {code}"));
    }
    fn inject_scripts(&self, point: InjectionPoint, items: &[ScriptItem]) {
        self.record(EngineCall::InjectScripts { point, count: items.len() });
    }
    fn post_web_message(&self, message: &str, _uri: &str) {
        self.record(EngineCall::PostWebMessage { message: message.into() });
    }
    fn fill_autofill_data(&self, view_data: &str) {
        self.record(EngineCall::AutofillFill { view_data: view_data.into() });
    }
    fn cancel_autofill(&self) {
        self.record(EngineCall::AutofillCancel);
    }

    fn url(&self) -> String {
        self.current_url.borrow().clone()
    }
    fn title(&self) -> String {
        self.current_title.borrow().clone()
    }
    fn progress(&self) -> i32 {
        self.current_progress.get()
    }
    fn page_height(&self) -> i32 {
        2000
    }
    fn hit_test(&self) -> HitTestResult {
        self.hit_test_result.borrow().clone()
    }
    fn accessibility_node_by_id(&self, _id: i64) -> Option<AccessibilityNode> {
        self.accessibility_node.borrow().clone()
    }
    fn pending_size_status(&self) -> bool {
        self.pending_size.get()
    }

    fn preferences(&self) -> Rc<dyn EnginePreferences> {
        self.prefs.clone()
    }
    fn cookie_manager(&self) -> Rc<dyn CookieManager> {
        self.cookies.clone()
    }
}

/// A backend whose surfaces and engines are scripted: creation can be made
/// to fail, every surface operation is recorded, and a hook can run inside
/// engine creation to provoke re-entrancy.
pub struct MockBackend {
    /// Fail the next surface allocation.
    pub fail_surface: Cell<bool>,
    /// Fail the next engine creation.
    pub fail_engine: Cell<bool>,
    /// Runs at the start of every engine creation.
    pub on_create_engine: RefCell<Option<Box<dyn Fn()>>>,
    surface_ops: RefCell<Vec<SurfaceOp>>,
    engines: RefCell<Vec<Rc<MockEngine>>>,
    next_surface: Cell<u64>,
}

impl MockBackend {
    /// Creates a backend that succeeds at everything.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Every surface operation recorded so far, in order.
    pub fn surface_ops(&self) -> Vec<SurfaceOp> {
        self.surface_ops.borrow().clone()
    }

    /// How many engine instances were created over this backend's lifetime.
    pub fn engines_created(&self) -> usize {
        self.engines.borrow().len()
    }

    /// The most recently created engine.
    pub fn last_engine(&self) -> Option<Rc<MockEngine>> {
        self.engines.borrow().last().cloned()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            fail_surface: Cell::new(false),
            fail_engine: Cell::new(false),
            on_create_engine: RefCell::new(None),
            surface_ops: RefCell::new(Vec::new()),
            engines: RefCell::new(Vec::new()),
            next_surface: Cell::new(1),
        }
    }
}

impl WebEngineBackend for MockBackend {
    fn create_surface(
        &self,
        window: NativeWindow,
        _config: &SurfaceConfig,
    ) -> Result<SurfaceBundle, SurfaceError> {
        if self.fail_surface.get() {
            return Err(SurfaceError::ConfigRejected);
        }
        let handle = self.next_surface.get();
        self.next_surface.set(handle + 1);
        self.surface_ops.borrow_mut().push(SurfaceOp::Created { handle, window });
        Ok(SurfaceBundle { display: 1, context: 2, surface: handle, window })
    }

    fn resize_surface(&self, surface: &SurfaceBundle, size: PhysicalSize) {
        self.surface_ops.borrow_mut().push(SurfaceOp::Resized { handle: surface.surface, size });
    }

    fn set_surface_visible(&self, surface: &SurfaceBundle, visible: bool) {
        self.surface_ops.borrow_mut().push(SurfaceOp::Visible {
            handle: surface.surface,
            visible,
        });
    }

    fn destroy_surface(&self, surface: SurfaceBundle) {
        self.surface_ops.borrow_mut().push(SurfaceOp::Destroyed { handle: surface.surface });
    }

    fn create_engine(&self, params: EngineCreateParams) -> Result<Rc<dyn WebEngine>, EngineError> {
        if let Some(hook) = self.on_create_engine.borrow().as_ref() {
            hook();
        }
        if self.fail_engine.get() {
            return Err(EngineError::Creation("scripted failure".into()));
        }
        let engine = MockEngine::new(&params);
        self.engines.borrow_mut().push(engine.clone());
        Ok(engine)
    }
}

/// A callback the recording host observed, in delivery order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    PageStarted(String),
    PageFinished(String),
    Progress(i32),
    Title(String),
    PageError(i32),
    Console(String),
    Cursor(CursorKind),
    Scroll(f64, f64),
    Overscroll(f64, f64),
    FlingVelocity(f64, f64),
    ScrollState(bool),
    SelectionBounds(i32, i32, i32, i32),
    RootLayer(i32, i32),
    FullScreenEnter,
    FullScreenExit,
    JsDialog(JsDialogKind, String),
    HttpAuth(String, String),
    SslErrorSeen(SslError),
    AllSslErrors(usize),
    ClientCert(String, i32),
    GeolocationShow(String),
    GeolocationHide,
    Permission(String, Vec<PermissionKind>),
    PermissionCancelled,
    ScreenCapture(String),
    FileSelector(String),
    ContextMenu(String),
    WindowNew(String),
    WindowExit,
    AppLink(String),
    DataResubmission,
    JsBridgeMessage(String),
    Autofill(String),
    EmbedChanged(String),
    DragStatus(DragOperation),
}

/// A [`WebHost`] that records every callback and stores every decision it is
/// handed, so tests can resolve them later.
#[derive(Default)]
pub struct TestHost {
    events: RefCell<Vec<HostEvent>>,
    /// Whether the dialog/auth/ssl/file/menu callbacks claim responsibility.
    pub handle_decisions: Cell<bool>,
    /// Decisions stored for later resolution.
    pub dialogs: RefCell<Vec<Rc<JsDialogDecision>>>,
    pub auth_requests: RefCell<Vec<Rc<HttpAuthDecision>>>,
    pub ssl_errors: RefCell<Vec<Rc<SslErrorDecision>>>,
    pub aggregate_ssl_errors: RefCell<Vec<Rc<AggregateSslErrorDecision>>>,
    pub client_certs: RefCell<Vec<Rc<ClientCertDecision>>>,
    pub geolocations: RefCell<Vec<Rc<GeolocationDecision>>>,
    pub permissions: RefCell<Vec<Rc<PermissionDecision>>>,
    pub screen_captures: RefCell<Vec<Rc<ScreenCaptureDecision>>>,
    pub file_selections: RefCell<Vec<Rc<FileSelectionDecision>>>,
    pub context_menus: RefCell<Vec<Rc<ContextMenuDecision>>>,
    pub windows: RefCell<Vec<Rc<WindowDecision>>>,
    pub app_links: RefCell<Vec<Rc<AppLinkDecision>>>,
    pub resubmissions: RefCell<Vec<Rc<DataResubmissionDecision>>>,
}

impl TestHost {
    /// Creates a host that stores decisions and claims responsibility for
    /// them.
    pub fn new() -> Rc<Self> {
        let host = Self::default();
        host.handle_decisions.set(true);
        Rc::new(host)
    }

    /// Every callback recorded so far, in order.
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    fn record(&self, event: HostEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl WebHost for TestHost {
    fn on_page_started(&self, url: &str) {
        self.record(HostEvent::PageStarted(url.into()));
    }
    fn on_page_finished(&self, url: &str) {
        self.record(HostEvent::PageFinished(url.into()));
    }
    fn on_progress_changed(&self, progress: i32) {
        self.record(HostEvent::Progress(progress));
    }
    fn on_title_changed(&self, title: &str) {
        self.record(HostEvent::Title(title.into()));
    }
    fn on_page_error(&self, error: &PageError) {
        self.record(HostEvent::PageError(error.code));
    }
    fn on_console_message(&self, message: &ConsoleMessage) {
        self.record(HostEvent::Console(message.message.clone()));
    }
    fn on_cursor_changed(&self, cursor: CursorKind) {
        self.record(HostEvent::Cursor(cursor));
    }
    fn on_scroll_offset_changed(&self, x: f64, y: f64) {
        self.record(HostEvent::Scroll(x, y));
    }
    fn on_overscroll(&self, delta_x: f64, delta_y: f64) {
        self.record(HostEvent::Overscroll(delta_x, delta_y));
    }
    fn on_over_scroll_fling_velocity(&self, velocity_x: f64, velocity_y: f64) {
        self.record(HostEvent::FlingVelocity(velocity_x, velocity_y));
    }
    fn on_scroll_state(&self, scrolling: bool) {
        self.record(HostEvent::ScrollState(scrolling));
    }
    fn on_selection_bounds_changed(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(HostEvent::SelectionBounds(x, y, width, height));
    }
    fn on_root_layer_changed(&self, width: i32, height: i32) {
        self.record(HostEvent::RootLayer(width, height));
    }
    fn on_full_screen_enter(&self) {
        self.record(HostEvent::FullScreenEnter);
    }
    fn on_full_screen_exit(&self) {
        self.record(HostEvent::FullScreenExit);
    }

    fn on_js_dialog(
        &self,
        kind: JsDialogKind,
        _url: &str,
        message: &str,
        decision: Rc<JsDialogDecision>,
    ) -> bool {
        self.record(HostEvent::JsDialog(kind, message.into()));
        self.dialogs.borrow_mut().push(decision);
        self.handle_decisions.get()
    }
    fn on_http_auth_request(
        &self,
        host: &str,
        realm: &str,
        decision: Rc<HttpAuthDecision>,
    ) -> bool {
        self.record(HostEvent::HttpAuth(host.into(), realm.into()));
        self.auth_requests.borrow_mut().push(decision);
        self.handle_decisions.get()
    }
    fn on_ssl_error(&self, error: SslError, decision: Rc<SslErrorDecision>) -> bool {
        self.record(HostEvent::SslErrorSeen(error));
        self.ssl_errors.borrow_mut().push(decision);
        self.handle_decisions.get()
    }
    fn on_all_ssl_errors(
        &self,
        errors: &[SslError],
        decision: Rc<AggregateSslErrorDecision>,
    ) -> bool {
        self.record(HostEvent::AllSslErrors(errors.len()));
        self.aggregate_ssl_errors.borrow_mut().push(decision);
        self.handle_decisions.get()
    }
    fn on_client_cert_request(
        &self,
        host: &str,
        port: i32,
        decision: Rc<ClientCertDecision>,
    ) -> bool {
        self.record(HostEvent::ClientCert(host.into(), port));
        self.client_certs.borrow_mut().push(decision);
        self.handle_decisions.get()
    }
    fn on_geolocation_show(&self, origin: &str, decision: Rc<GeolocationDecision>) {
        self.record(HostEvent::GeolocationShow(origin.into()));
        self.geolocations.borrow_mut().push(decision);
    }
    fn on_geolocation_hide(&self) {
        self.record(HostEvent::GeolocationHide);
    }
    fn on_permission_request(
        &self,
        origin: &str,
        resources: &[PermissionKind],
        decision: Rc<PermissionDecision>,
    ) {
        self.record(HostEvent::Permission(origin.into(), resources.to_vec()));
        self.permissions.borrow_mut().push(decision);
    }
    fn on_permission_request_cancelled(&self) {
        self.record(HostEvent::PermissionCancelled);
    }
    fn on_screen_capture_request(&self, origin: &str, decision: Rc<ScreenCaptureDecision>) {
        self.record(HostEvent::ScreenCapture(origin.into()));
        self.screen_captures.borrow_mut().push(decision);
    }
    fn on_file_selector(
        &self,
        params: &FileSelectorParams,
        decision: Rc<FileSelectionDecision>,
    ) -> bool {
        self.record(HostEvent::FileSelector(params.title.clone()));
        self.file_selections.borrow_mut().push(decision);
        self.handle_decisions.get()
    }
    fn on_context_menu(
        &self,
        params: &ContextMenuParams,
        decision: Rc<ContextMenuDecision>,
    ) -> bool {
        self.record(HostEvent::ContextMenu(params.selection_text.clone()));
        self.context_menus.borrow_mut().push(decision);
        self.handle_decisions.get()
    }
    fn on_window_new(&self, target_url: &str, _user_gesture: bool, decision: Rc<WindowDecision>) {
        self.record(HostEvent::WindowNew(target_url.into()));
        self.windows.borrow_mut().push(decision);
    }
    fn on_window_exit(&self) {
        self.record(HostEvent::WindowExit);
    }
    fn on_app_link(&self, url: &str, decision: Rc<AppLinkDecision>) {
        self.record(HostEvent::AppLink(url.into()));
        self.app_links.borrow_mut().push(decision);
    }
    fn on_data_resubmission(&self, decision: Rc<DataResubmissionDecision>) {
        self.record(HostEvent::DataResubmission);
        self.resubmissions.borrow_mut().push(decision);
    }

    fn on_js_bridge_message(&self, message: &str) {
        self.record(HostEvent::JsBridgeMessage(message.into()));
    }
    fn on_autofill_request(&self, view_data: &str) {
        self.record(HostEvent::Autofill(view_data.into()));
    }
    fn on_native_embed_changed(&self, embed_id: &str) {
        self.record(HostEvent::EmbedChanged(embed_id.into()));
    }
    fn on_drag_status(&self, operation: DragOperation) {
        self.record(HostEvent::DragStatus(operation));
    }
}

/// A responder implementing every responder trait, recording terminal calls
/// into a shared log. [`ResponderLog::responder`] mints fresh boxes for
/// notices; [`ResponderLog::entries`] shows what reached the engine side.
#[derive(Clone, Default)]
pub struct ResponderLog(Arc<Mutex<Vec<String>>>);

impl ResponderLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh responder feeding this log.
    pub fn responder(&self) -> Box<Recorder> {
        Box::new(Recorder(self.0.clone()))
    }

    /// The recorded terminal calls, in order.
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// The responder type minted by [`ResponderLog`].
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }
}

impl DialogResponder for Recorder {
    fn confirm(self: Box<Self>) {
        self.push("dialog:confirm");
    }
    fn confirm_with_message(self: Box<Self>, message: &str) {
        self.push(format!("dialog:confirm:{message}"));
    }
    fn cancel(self: Box<Self>) {
        self.push("dialog:cancel");
    }
}

impl HttpAuthResponder for Recorder {
    fn confirm(self: Box<Self>, user: &str, _password: &str) -> bool {
        self.push(format!("auth:confirm:{user}"));
        true
    }
    fn is_saved(&self) -> bool {
        false
    }
    fn cancel(self: Box<Self>) {
        self.push("auth:cancel");
    }
}

impl SslErrorResponder for Recorder {
    fn handle_confirm(self: Box<Self>) {
        self.push("ssl:confirm");
    }
    fn handle_cancel(self: Box<Self>) {
        self.push("ssl:cancel");
    }
}

impl ClientCertResponder for Recorder {
    fn confirm(self: Box<Self>, private_key_file: &str, _cert_chain_file: &str) {
        self.push(format!("cert:confirm:{private_key_file}"));
    }
    fn cancel(self: Box<Self>) {
        self.push("cert:cancel");
    }
    fn ignore(self: Box<Self>) {
        self.push("cert:ignore");
    }
}

impl GeolocationResponder for Recorder {
    fn invoke(self: Box<Self>, origin: &str, allow: bool, retain: bool) {
        self.push(format!("geolocation:{origin}:{allow}:{retain}"));
    }
}

impl PermissionResponder for Recorder {
    fn grant(self: Box<Self>, resources: &[PermissionKind]) {
        self.push(format!("permission:grant:{}", resources.len()));
    }
    fn deny(self: Box<Self>) {
        self.push("permission:deny");
    }
}

impl ScreenCaptureResponder for Recorder {
    fn grant(self: Box<Self>, config: &ScreenCaptureConfig) {
        self.push(format!("capture:grant:{}:{}", config.mode, config.source_id));
    }
    fn deny(self: Box<Self>) {
        self.push("capture:deny");
    }
}

impl FileSelectionResponder for Recorder {
    fn handle_file_list(self: Box<Self>, files: &[String]) {
        self.push(format!("files:{}", files.join(",")));
    }
}

impl ContextMenuResponder for Recorder {
    fn execute(self: Box<Self>, action: ContextMenuAction) {
        self.push(format!("menu:{action:?}"));
    }
    fn cancel(self: Box<Self>) {
        self.push("menu:cancel");
    }
}

impl WindowResponder for Recorder {
    fn set_controller(self: Box<Self>, engine_id: i32) {
        self.push(format!("window:controller:{engine_id}"));
    }
    fn cancel(self: Box<Self>) {
        self.push("window:cancel");
    }
}

impl AppLinkResponder for Recorder {
    fn continue_navigation(self: Box<Self>) {
        self.push("applink:continue");
    }
    fn cancel(self: Box<Self>) {
        self.push("applink:cancel");
    }
}

impl DataResubmissionResponder for Recorder {
    fn resend(self: Box<Self>) {
        self.push("resubmit:resend");
    }
    fn cancel(self: Box<Self>) {
        self.push("resubmit:cancel");
    }
}

/// Everything a scenario test needs: a delegate over the mock backend, the
/// recording host, and the task queue standing in for the UI thread's loop.
pub struct Fixture {
    pub delegate: Rc<WebDelegate>,
    pub host: Rc<TestHost>,
    pub backend: Rc<MockBackend>,
    pub queue: Arc<TaskQueue>,
}

impl Fixture {
    /// A delegate still waiting for its size.
    pub fn new() -> Self {
        let queue = TaskQueue::new();
        let host = TestHost::new();
        let backend = MockBackend::new();
        let delegate = WebDelegate::new(
            host.clone(),
            backend.clone(),
            WebContext::new(queue.clone()),
        );
        Self { delegate, host, backend, queue }
    }

    /// A delegate whose engine instance already exists.
    pub fn created() -> Self {
        let fixture = Self::new();
        assert!(fixture.delegate.request_create(&default_create_params()));
        fixture
    }

    /// The engine instance backing the delegate.
    pub fn engine(&self) -> Rc<MockEngine> {
        self.backend.last_engine().expect("no engine was created")
    }

    /// Run the tasks queued for the UI thread.
    pub fn pump(&self) -> usize {
        self.queue.drain()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Creation parameters good enough for most tests.
pub fn default_create_params() -> CreateParams {
    CreateParams {
        size: LogicalSize::new(800., 600.),
        position: LogicalPosition::new(0., 0.),
        window: NativeWindow(7),
        incognito: false,
    }
}
