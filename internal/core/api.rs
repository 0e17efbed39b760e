// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

/*!
This module contains types that are public and re-exported towards the UI
pattern that embeds a web view: geometry, errors, the shared context passed
to every delegate, and the [`WebHost`] callback surface.
*/

#![warn(missing_docs)]

use std::sync::Arc;
use std::time::Duration;

use crate::drag::DragOperation;
use crate::engine::{
    ConsoleMessage, ContextMenuParams, CursorKind, FileSelectorParams, JsDialogKind, PageError,
    PermissionKind, SslError,
};
use std::rc::Rc;

use crate::sinks::{
    AggregateSslErrorDecision, AppLinkDecision, ClientCertDecision, ContextMenuDecision,
    DataResubmissionDecision, FileSelectionDecision, GeolocationDecision, HttpAuthDecision,
    JsDialogDecision, PermissionDecision, ScreenCaptureDecision, SslErrorDecision, WindowDecision,
};
use crate::task::EventLoopProxy;

/// A position represented in the coordinate space of the UI tree, supplied by
/// the layout pass of the host.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct LogicalPosition {
    /// The x coordinate.
    pub x: f32,
    /// The y coordinate.
    pub y: f32,
}

impl LogicalPosition {
    /// Construct a new logical position from the given x and y coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert this logical position to a physical position by multiplying it
    /// with the specified scale factor.
    pub fn to_physical(self, scale_factor: f32) -> PhysicalPosition {
        PhysicalPosition::new(
            (self.x * scale_factor).round() as i32,
            (self.y * scale_factor).round() as i32,
        )
    }
}

/// A position represented in physical pixel coordinates.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PhysicalPosition {
    /// The x coordinate.
    pub x: i32,
    /// The y coordinate.
    pub y: i32,
}

impl PhysicalPosition {
    /// Construct a new physical position from the given x and y coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A size represented in the coordinate space of the UI tree.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct LogicalSize {
    /// The width.
    pub width: f32,
    /// The height.
    pub height: f32,
}

impl LogicalSize {
    /// Construct a new logical size from the given width and height.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert this logical size to a physical size by multiplying it with the
    /// specified scale factor. Fractional sizes are rounded up, so that the
    /// surface never ends up one pixel short of the layout bounds.
    pub fn to_physical(self, scale_factor: f32) -> PhysicalSize {
        PhysicalSize::new(
            (self.width * scale_factor).ceil() as u32,
            (self.height * scale_factor).ceil() as u32,
        )
    }

    /// Returns true if either dimension is zero or negative. Such a size
    /// cannot back a surface.
    pub fn is_empty(self) -> bool {
        self.width <= 0. || self.height <= 0.
    }
}

/// A size represented in physical pixels.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PhysicalSize {
    /// The width in physical pixels.
    pub width: u32,
    /// The height in physical pixels.
    pub height: u32,
}

impl PhysicalSize {
    /// Construct a new physical size from the given width and height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The native window of the host component, identified the way the platform's
/// surface broker identifies it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NativeWindow(pub u32);

/// Error returned when the surface lifecycle manager cannot satisfy a
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SurfaceError {
    /// The platform cannot satisfy the requested pixel configuration.
    ConfigRejected,
    /// The display connection or the surface allocation failed.
    Unavailable(String),
    /// `acquire()` was called while a surface is already held.
    AlreadyAcquired,
}

impl core::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SurfaceError::ConfigRejected => {
                f.write_str("the requested surface pixel configuration was rejected")
            }
            SurfaceError::Unavailable(reason) => {
                write!(f, "the surface could not be allocated: {reason}")
            }
            SurfaceError::AlreadyAcquired => f.write_str("a surface is already acquired"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Error scenarios of engine-instance creation. A failed creation transitions
/// the delegate to [`DelegateState::CreateFailed`](crate::DelegateState) and
/// is reported exactly once; there is no automatic retry.
#[derive(Debug)]
#[non_exhaustive]
pub enum EngineError {
    /// The surface the engine renders into could not be created.
    Surface(SurfaceError),
    /// The engine factory refused to create an instance.
    Creation(String),
    /// Another unspecified error.
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::Surface(err) => write!(f, "surface error: {err}"),
            EngineError::Creation(reason) => write!(f, "engine creation failed: {reason}"),
            EngineError::Other(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<SurfaceError> for EngineError {
    fn from(err: SurfaceError) -> Self {
        Self::Surface(err)
    }
}

impl From<String> for EngineError {
    fn from(reason: String) -> Self {
        Self::Creation(reason)
    }
}

impl From<&str> for EngineError {
    fn from(reason: &str) -> Self {
        Self::Creation(reason.into())
    }
}

/// Error returned when a task cannot be posted to the UI thread's queue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventLoopError {
    /// The event loop was terminated; the task was dropped.
    EventLoopTerminated,
}

impl core::fmt::Display for EventLoopError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EventLoopError::EventLoopTerminated => {
                f.write_str("the event loop was already terminated")
            }
        }
    }
}

impl std::error::Error for EventLoopError {}

/// Configuration shared across sibling delegates. This replaces process-wide
/// statics: hosts that want a different double-click policy pass their own
/// copy through the [`WebContext`].
#[derive(Debug, Clone)]
pub struct SharedConfig {
    /// Two clicks closer together than this pair up to a double click.
    pub click_interval: Duration,
    /// Maximum distance in logical pixels between two clicks of a double
    /// click.
    pub click_distance: f32,
}

impl Default for SharedConfig {
    fn default() -> Self {
        // 500ms is the common double-click delay across platforms.
        Self { click_interval: Duration::from_millis(500), click_distance: 15. }
    }
}

/// Everything a delegate needs from its surroundings: the proxy used to
/// marshal engine callbacks onto the UI thread, and the shared configuration.
#[derive(Clone)]
pub struct WebContext {
    proxy: Arc<dyn EventLoopProxy>,
    config: SharedConfig,
}

impl WebContext {
    /// Creates a context with the default [`SharedConfig`].
    pub fn new(proxy: Arc<dyn EventLoopProxy>) -> Self {
        Self { proxy, config: SharedConfig::default() }
    }

    /// Creates a context with an explicit configuration.
    pub fn with_config(proxy: Arc<dyn EventLoopProxy>, config: SharedConfig) -> Self {
        Self { proxy, config }
    }

    /// The proxy posting tasks onto the UI thread's queue.
    pub fn proxy(&self) -> &Arc<dyn EventLoopProxy> {
        &self.proxy
    }

    /// The configuration shared across sibling delegates.
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }
}

/// The parameters of an engine-creation request, supplied by the UI pattern
/// once geometry is known.
#[derive(Debug, Clone)]
pub struct CreateParams {
    /// The initial size of the component, in logical coordinates.
    pub size: LogicalSize,
    /// The position of the component within its window.
    pub position: LogicalPosition,
    /// The native window the surface is allocated from.
    pub window: NativeWindow,
    /// Whether the engine instance runs without persistent storage.
    pub incognito: bool,
}

/// The callback surface of the delegate towards the UI pattern.
///
/// Every method has a no-op default implementation, so hosts implement only
/// what they surface. All methods are invoked on the UI thread; engine
/// callbacks originating on other threads have already been marshaled when
/// they arrive here.
///
/// Methods handing over a decision object return `bool` when the engine needs
/// to know whether the host took responsibility; returning `false` makes the
/// delegate cancel the decision on the host's behalf, so the engine-side
/// continuation is never left dangling.
#[allow(unused_variables)]
pub trait WebHost {
    /// The engine started loading `url`.
    fn on_page_started(&self, url: &str) {}
    /// The engine finished loading `url`.
    fn on_page_finished(&self, url: &str) {}
    /// Load progress changed, in percent.
    fn on_progress_changed(&self, progress: i32) {}
    /// The document title changed.
    fn on_title_changed(&self, title: &str) {}
    /// A main-frame load failed.
    fn on_page_error(&self, error: &PageError) {}
    /// A console message was emitted by the page.
    fn on_console_message(&self, message: &ConsoleMessage) {}

    /// The engine requests a different mouse cursor.
    fn on_cursor_changed(&self, cursor: CursorKind) {}
    /// The root scroll offset changed.
    fn on_scroll_offset_changed(&self, x: f64, y: f64) {}
    /// The page overscrolled by the given deltas.
    fn on_overscroll(&self, delta_x: f64, delta_y: f64) {}
    /// A fling reached the edge of the page with the given leftover velocity.
    fn on_over_scroll_fling_velocity(&self, velocity_x: f64, velocity_y: f64) {}
    /// The engine entered or left a scroll gesture.
    fn on_scroll_state(&self, scrolling: bool) {}
    /// The text-selection bounds changed (component coordinates).
    fn on_selection_bounds_changed(&self, x: i32, y: i32, width: i32, height: i32) {}
    /// The size of the engine's root layer changed.
    fn on_root_layer_changed(&self, width: i32, height: i32) {}
    /// A page element entered full screen.
    fn on_full_screen_enter(&self) {}
    /// Full screen was left.
    fn on_full_screen_exit(&self) {}

    /// A JavaScript dialog wants an answer. Return `true` when the host shows
    /// the dialog and will resolve `decision`.
    fn on_js_dialog(
        &self,
        kind: JsDialogKind,
        url: &str,
        message: &str,
        decision: Rc<JsDialogDecision>,
    ) -> bool {
        false
    }
    /// The page requests HTTP authentication.
    fn on_http_auth_request(&self, host: &str, realm: &str, decision: Rc<HttpAuthDecision>) -> bool {
        false
    }
    /// A certificate error occurred for one request.
    fn on_ssl_error(&self, error: SslError, decision: Rc<SslErrorDecision>) -> bool {
        false
    }
    /// Certificate errors occurred for the main frame load.
    fn on_all_ssl_errors(
        &self,
        errors: &[SslError],
        decision: Rc<AggregateSslErrorDecision>,
    ) -> bool {
        false
    }
    /// The server requests a client certificate.
    fn on_client_cert_request(&self, host: &str, port: i32, decision: Rc<ClientCertDecision>) -> bool {
        false
    }
    /// The page asks for geolocation access.
    fn on_geolocation_show(&self, origin: &str, decision: Rc<GeolocationDecision>) {}
    /// A previously shown geolocation prompt is no longer needed.
    fn on_geolocation_hide(&self) {}
    /// The page asks for access to the given resources.
    fn on_permission_request(
        &self,
        origin: &str,
        resources: &[PermissionKind],
        decision: Rc<PermissionDecision>,
    ) {
    }
    /// A pending permission request was withdrawn by the engine.
    fn on_permission_request_cancelled(&self) {}
    /// The page asks to capture the screen.
    fn on_screen_capture_request(&self, origin: &str, decision: Rc<ScreenCaptureDecision>) {}
    /// The page opened a file chooser. Return `true` when the host shows one.
    fn on_file_selector(&self, params: &FileSelectorParams, decision: Rc<FileSelectionDecision>) -> bool {
        false
    }
    /// A context menu should be shown. Return `true` when the host shows one.
    fn on_context_menu(&self, params: &ContextMenuParams, decision: Rc<ContextMenuDecision>) -> bool {
        false
    }
    /// The page wants to open a new window; the host binds a controller to
    /// the decision or cancels it.
    fn on_window_new(&self, target_url: &str, user_gesture: bool, decision: Rc<WindowDecision>) {}
    /// The page asked to close its window.
    fn on_window_exit(&self) {}
    /// Navigation matched an application link.
    fn on_app_link(&self, url: &str, decision: Rc<AppLinkDecision>) {}
    /// A POST form would be resubmitted.
    fn on_data_resubmission(&self, decision: Rc<DataResubmissionDecision>) {}

    /// A raw message arrived over the JavaScript bridge.
    fn on_js_bridge_message(&self, message: &str) {}
    /// The engine requests form data for autofill.
    fn on_autofill_request(&self, view_data: &str) {}
    /// A native-embed record was added, updated or removed.
    fn on_native_embed_changed(&self, embed_id: &str) {}
    /// A drop was accepted or declined by the engine.
    fn on_drag_status(&self, operation: DragOperation) {}
}
