// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

/*!
The boundary towards the native web-rendering engine.

The adapter never links the engine directly: it drives it through
[`WebEngine`] and receives everything the engine initiates through
[`EngineNotice`] values reported via the [`EngineClient`]. The client is the
only object handed to engine threads; it owns no delegate state and marshals
every notice onto the UI thread before any delegate or host code runs.
*/

#![warn(missing_docs)]

use std::rc::Rc;
use std::sync::Arc;

use crate::api::{EngineError, NativeWindow, PhysicalSize, SurfaceError};
use crate::delegate::DelegateId;
use crate::embed::{EmbedData, EmbedDataRegistry};
use crate::input::{
    AccessibilityHoverEvent, EngineAxisEvent, EngineFlingEvent, EngineKeyEvent, EngineMouseEvent,
    EngineTouchPoint,
};
use crate::drag::{DragOperation, EngineDragEvent};
use crate::script::{InjectionPoint, ScriptItem};
use crate::settings::{CacheMode, DarkMode, MixedContentMode};
use crate::surface::{SurfaceBundle, SurfaceConfig};
use crate::task::EventLoopProxy;

/// The mouse cursor shapes the engine can request from the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CursorKind {
    /// The default arrow cursor.
    Default,
    /// No cursor.
    None,
    /// A hand, hovering a link.
    Pointer,
    /// An I-beam over editable text.
    Text,
    /// A crosshair.
    Crosshair,
    /// The help cursor.
    Help,
    /// Busy, input blocked.
    Wait,
    /// Busy, input still possible.
    Progress,
    /// An open hand over a panable area.
    Grab,
    /// A closed hand while panning.
    Grabbing,
    /// The move cursor.
    Move,
    /// The drop is not allowed here.
    NoDrop,
    /// The action is not allowed.
    NotAllowed,
    /// Column resize.
    ColResize,
    /// Row resize.
    RowResize,
    /// Zoom in.
    ZoomIn,
    /// Zoom out.
    ZoomOut,
}

/// Severity of a [`ConsoleMessage`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConsoleLevel {
    /// `console.debug`
    Debug,
    /// `console.log`
    Log,
    /// `console.info`
    Info,
    /// `console.warn`
    Warn,
    /// `console.error`
    Error,
}

/// A message the page logged to the console.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    /// The logged text.
    pub message: String,
    /// The source file that logged it.
    pub source_id: String,
    /// The line number within the source.
    pub line: i32,
    /// The severity.
    pub level: ConsoleLevel,
}

/// A failed main-frame load.
#[derive(Debug, Clone)]
pub struct PageError {
    /// The engine's error code.
    pub code: i32,
    /// A human readable description.
    pub description: String,
    /// The URL that failed to load.
    pub url: String,
}

/// The kind of JavaScript dialog requesting an answer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum JsDialogKind {
    /// `window.alert()`
    Alert,
    /// `window.confirm()`
    Confirm,
    /// `window.prompt()`
    Prompt,
    /// The `beforeunload` confirmation.
    BeforeUnload,
}

/// A certificate validation failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum SslError {
    /// The certificate is malformed.
    Invalid,
    /// The certificate does not match the host name.
    HostMismatch,
    /// The certificate is expired or not yet valid.
    DateInvalid,
    /// The certificate authority is not trusted.
    Untrusted,
}

/// A resource a page can request access to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PermissionKind {
    /// Camera access.
    VideoCapture,
    /// Microphone access.
    AudioCapture,
    /// DRM-protected media identifiers.
    ProtectedMediaId,
    /// MIDI system-exclusive messages.
    MidiSysex,
    /// Reading and writing the clipboard.
    ClipboardReadWrite,
    /// Motion and orientation sensors.
    Sensors,
}

/// Selection mode of a file chooser.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FileSelectorMode {
    /// Pick a single existing file.
    OpenFile,
    /// Pick several existing files.
    OpenMultipleFiles,
    /// Pick a folder.
    OpenFolder,
    /// Pick a path to save to.
    Save,
}

/// The parameters of a file-chooser request.
#[derive(Debug, Clone)]
pub struct FileSelectorParams {
    /// The dialog title suggested by the page.
    pub title: String,
    /// The selection mode.
    pub mode: FileSelectorMode,
    /// The file name preselected by the page.
    pub default_file_name: String,
    /// Accepted MIME types or extensions.
    pub accept_types: Vec<String>,
    /// Whether capture from a camera/microphone is requested.
    pub capture: bool,
}

/// What a context menu was opened on.
#[derive(Debug, Clone, Default)]
pub struct ContextMenuParams {
    /// Pointer x coordinate, component-relative.
    pub x: i32,
    /// Pointer y coordinate, component-relative.
    pub y: i32,
    /// The link under the pointer, filtered to safe schemes.
    pub link_url: String,
    /// The link under the pointer, unfiltered.
    pub unfiltered_link_url: String,
    /// The media source under the pointer.
    pub source_url: String,
    /// The selected text.
    pub selection_text: String,
    /// Whether the element carries image contents.
    pub has_image_contents: bool,
    /// Whether the element is editable.
    pub is_editable: bool,
}

/// An action the host picked from a context menu.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContextMenuAction {
    /// Cut the selection.
    Cut,
    /// Copy the selection.
    Copy,
    /// Paste the clipboard.
    Paste,
    /// Select all.
    SelectAll,
    /// Copy the link address.
    CopyLink,
    /// Open the link in a new window.
    OpenInNewWindow,
}

/// Mutable part of a screen-capture request, set by the host before granting.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ScreenCaptureConfig {
    /// The capture mode chosen by the host.
    pub mode: i32,
    /// The display or window to capture.
    pub source_id: i32,
}

/// Classification of what lies under a point of the page.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum HitTestKind {
    /// Nothing special.
    #[default]
    Unknown,
    /// An editable text field.
    EditText,
    /// A `mailto:` link.
    Email,
    /// An http(s) link.
    HttpAnchor,
    /// An http(s) link wrapping an image.
    HttpAnchorImage,
    /// An image.
    Image,
    /// A geographical address.
    Map,
    /// A phone number.
    Phone,
}

/// The result of a hit test at the current pointer position.
#[derive(Debug, Clone, Default)]
pub struct HitTestResult {
    /// What was hit.
    pub kind: HitTestKind,
    /// The associated data, e.g. the link target.
    pub extra: String,
}

/// A node of the engine's accessibility tree, queried by id on demand.
#[derive(Debug, Clone)]
pub struct AccessibilityNode {
    /// The engine-side accessibility id.
    pub id: i64,
    /// The accessible text of the node.
    pub text: String,
    /// Bounding rectangle, component-relative: x, y, width, height.
    pub rect: (i32, i32, i32, i32),
    /// Ids of the child nodes.
    pub child_ids: Vec<i64>,
}

/// Why the engine gains keyboard focus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FocusReason {
    /// No specific source.
    Unspecified,
    /// Focus moved in by keyboard navigation.
    Navigation,
    /// The system assigned focus.
    System,
    /// A pointer gesture assigned focus.
    Gesture,
}

/// Why the engine loses keyboard focus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BlurReason {
    /// The hosting frame goes away.
    FrameDestroyed,
    /// The host window lost activation.
    WindowBlurred,
    /// Focus moved to another component.
    FocusSwitched,
}

/// One-shot continuation of a JavaScript dialog.
pub trait DialogResponder: Send {
    /// Accept the dialog.
    fn confirm(self: Box<Self>);
    /// Accept a prompt with the entered text.
    fn confirm_with_message(self: Box<Self>, message: &str);
    /// Dismiss the dialog.
    fn cancel(self: Box<Self>);
}

/// One-shot continuation of an HTTP authentication request.
pub trait HttpAuthResponder: Send {
    /// Supply credentials. Returns false when the engine rejected them
    /// outright (e.g. malformed).
    fn confirm(self: Box<Self>, user: &str, password: &str) -> bool;
    /// Whether the engine has stored credentials for this host/realm.
    fn is_saved(&self) -> bool;
    /// Abort the authentication.
    fn cancel(self: Box<Self>);
}

/// One-shot continuation of a certificate-error report.
pub trait SslErrorResponder: Send {
    /// Proceed despite the error.
    fn handle_confirm(self: Box<Self>);
    /// Abort the load.
    fn handle_cancel(self: Box<Self>);
}

/// One-shot continuation of a client-certificate request.
pub trait ClientCertResponder: Send {
    /// Answer with the chosen key and certificate chain files.
    fn confirm(self: Box<Self>, private_key_file: &str, cert_chain_file: &str);
    /// Continue without a certificate.
    fn cancel(self: Box<Self>);
    /// Ignore the request; the engine treats the connection as failed.
    fn ignore(self: Box<Self>);
}

/// One-shot continuation of a geolocation prompt.
pub trait GeolocationResponder: Send {
    /// Deliver the user's choice for `origin`; `retain` keeps it for the
    /// session.
    fn invoke(self: Box<Self>, origin: &str, allow: bool, retain: bool);
}

/// One-shot continuation of a generic permission request.
pub trait PermissionResponder: Send {
    /// Grant the listed resources (a subset of the requested ones).
    fn grant(self: Box<Self>, resources: &[PermissionKind]);
    /// Deny the request.
    fn deny(self: Box<Self>);
}

/// One-shot continuation of a screen-capture request.
pub trait ScreenCaptureResponder: Send {
    /// Grant the capture with the given configuration.
    fn grant(self: Box<Self>, config: &ScreenCaptureConfig);
    /// Deny the capture.
    fn deny(self: Box<Self>);
}

/// One-shot continuation of a file-chooser request.
pub trait FileSelectionResponder: Send {
    /// Deliver the chosen paths; an empty list cancels the chooser.
    fn handle_file_list(self: Box<Self>, files: &[String]);
}

/// One-shot continuation of a context-menu request.
pub trait ContextMenuResponder: Send {
    /// Execute the picked action.
    fn execute(self: Box<Self>, action: ContextMenuAction);
    /// Dismiss the menu without action.
    fn cancel(self: Box<Self>);
}

/// One-shot continuation of a new-window request.
pub trait WindowResponder: Send {
    /// Bind the engine id of the newly created web component.
    fn set_controller(self: Box<Self>, engine_id: i32);
    /// Refuse to open a window.
    fn cancel(self: Box<Self>);
}

/// One-shot continuation of an application-link navigation.
pub trait AppLinkResponder: Send {
    /// Continue the in-page navigation.
    fn continue_navigation(self: Box<Self>);
    /// Cancel the navigation; the host handled the link.
    fn cancel(self: Box<Self>);
}

/// One-shot continuation of a form-resubmission prompt.
pub trait DataResubmissionResponder: Send {
    /// Resend the POST data.
    fn resend(self: Box<Self>);
    /// Abort the reload.
    fn cancel(self: Box<Self>);
}

/// Everything the engine reports back to the adapter.
///
/// Every variant is `Send`: notices are created on engine threads and cross
/// onto the UI thread inside a posted task.
#[non_exhaustive]
pub enum EngineNotice {
    /// Loading of a page started.
    PageStarted {
        /// The URL being loaded.
        url: String,
    },
    /// Loading of a page finished.
    PageFinished {
        /// The URL that finished loading.
        url: String,
    },
    /// Load progress changed.
    ProgressChanged {
        /// Progress in percent.
        progress: i32,
    },
    /// The document title changed.
    TitleChanged {
        /// The new title.
        title: String,
    },
    /// A main-frame load failed.
    PageError(PageError),
    /// The page logged to the console.
    ConsoleMessage(ConsoleMessage),
    /// The engine requests a cursor shape.
    CursorChanged(CursorKind),
    /// The root scroll offset changed.
    ScrollOffsetChanged {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
    },
    /// The page overscrolled.
    Overscroll {
        /// Horizontal leftover delta.
        delta_x: f64,
        /// Vertical leftover delta.
        delta_y: f64,
    },
    /// A fling hit the page edge with leftover velocity.
    OverScrollFlingVelocity {
        /// Horizontal leftover velocity.
        velocity_x: f64,
        /// Vertical leftover velocity.
        velocity_y: f64,
    },
    /// The engine entered or left a scroll gesture.
    ScrollState {
        /// Whether a scroll is in progress.
        scrolling: bool,
    },
    /// The text-selection bounds changed.
    SelectionBoundsChanged {
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
        /// Width of the bounds.
        width: i32,
        /// Height of the bounds.
        height: i32,
    },
    /// The root layer was resized by the engine.
    RootLayerChanged {
        /// New width.
        width: i32,
        /// New height.
        height: i32,
    },
    /// A page element entered full screen.
    FullScreenEnter,
    /// Full screen was left.
    FullScreenExit,
    /// A JavaScript dialog wants an answer.
    JsDialog {
        /// Which dialog function ran.
        kind: JsDialogKind,
        /// The URL of the page showing the dialog.
        url: String,
        /// The dialog message.
        message: String,
        /// The engine-side continuation.
        responder: Box<dyn DialogResponder>,
    },
    /// The page requests HTTP authentication.
    HttpAuthRequest {
        /// The authenticating host.
        host: String,
        /// The authentication realm.
        realm: String,
        /// The engine-side continuation.
        responder: Box<dyn HttpAuthResponder>,
    },
    /// A certificate error occurred for a single request.
    SslError {
        /// The validation failure.
        error: SslError,
        /// The engine-side continuation.
        responder: Box<dyn SslErrorResponder>,
    },
    /// Certificate errors occurred for the main frame.
    AllSslErrors {
        /// Every validation failure found.
        errors: Vec<SslError>,
        /// The engine-side continuation.
        responder: Box<dyn SslErrorResponder>,
    },
    /// The server requests a client certificate.
    ClientCertRequest {
        /// The requesting host.
        host: String,
        /// The requesting port.
        port: i32,
        /// The engine-side continuation.
        responder: Box<dyn ClientCertResponder>,
    },
    /// The page asks for geolocation access.
    GeolocationShow {
        /// The requesting origin.
        origin: String,
        /// The engine-side continuation.
        responder: Box<dyn GeolocationResponder>,
    },
    /// The geolocation prompt is obsolete.
    GeolocationHide,
    /// The page asks for resource access.
    PermissionRequest {
        /// The requesting origin.
        origin: String,
        /// The requested resources.
        resources: Vec<PermissionKind>,
        /// The engine-side continuation.
        responder: Box<dyn PermissionResponder>,
    },
    /// A pending permission request was withdrawn.
    PermissionRequestCancelled,
    /// The page asks to capture the screen.
    ScreenCaptureRequest {
        /// The requesting origin.
        origin: String,
        /// The engine-side continuation.
        responder: Box<dyn ScreenCaptureResponder>,
    },
    /// The page opened a file chooser.
    FileSelector {
        /// The chooser parameters.
        params: FileSelectorParams,
        /// The engine-side continuation.
        responder: Box<dyn FileSelectionResponder>,
    },
    /// A context menu should be shown.
    ContextMenu {
        /// What the menu was opened on.
        params: ContextMenuParams,
        /// The engine-side continuation.
        responder: Box<dyn ContextMenuResponder>,
    },
    /// The page wants to open a new window.
    WindowNew {
        /// The URL the new window should load.
        target_url: String,
        /// Whether a user gesture triggered this.
        user_gesture: bool,
        /// The engine-side continuation.
        responder: Box<dyn WindowResponder>,
    },
    /// The page asked to close its window.
    WindowExit,
    /// Navigation matched an application link.
    AppLink {
        /// The matched URL.
        url: String,
        /// The engine-side continuation.
        responder: Box<dyn AppLinkResponder>,
    },
    /// A POST form would be resubmitted.
    DataResubmission {
        /// The engine-side continuation.
        responder: Box<dyn DataResubmissionResponder>,
    },
    /// A raw message arrived over the JavaScript bridge.
    JsBridgeMessage {
        /// The message payload.
        message: String,
    },
    /// The engine requests form data for autofill.
    AutofillRequest {
        /// The serialized view data of the form.
        view_data: String,
    },
    /// A native-embed record appeared, changed or vanished. `None` removes
    /// the record.
    EmbedLifecycle {
        /// The embed identifier.
        id: String,
        /// The new record, or `None` on removal.
        data: Option<EmbedData>,
    },
}

/// The handle the engine threads use to reach back into the adapter.
///
/// Cloneable and cheap; holds no strong reference to the delegate, only its
/// id. Notices reported after the delegate was released resolve to nothing
/// and are dropped with a debug log.
#[derive(Clone)]
pub struct EngineClient {
    delegate: DelegateId,
    proxy: Arc<dyn EventLoopProxy>,
    embed_data: Arc<EmbedDataRegistry>,
}

impl EngineClient {
    pub(crate) fn new(
        delegate: DelegateId,
        proxy: Arc<dyn EventLoopProxy>,
        embed_data: Arc<EmbedDataRegistry>,
    ) -> Self {
        Self { delegate, proxy, embed_data }
    }

    /// The id of the delegate this client reports to.
    pub fn delegate_id(&self) -> DelegateId {
        self.delegate
    }

    /// Report `notice`. Callable from any thread; the notice reaches the
    /// delegate as a task on the UI thread. Embed records are applied to the
    /// shared registry on the calling thread, which is why that registry is
    /// lock-guarded.
    pub fn notify(&self, notice: EngineNotice) {
        if let EngineNotice::EmbedLifecycle { id, data } = &notice {
            match data {
                Some(data) => self.embed_data.insert(id.clone(), data.clone()),
                None => {
                    self.embed_data.remove(id);
                }
            }
        }
        let id = self.delegate;
        let posted = self.proxy.post(Box::new(move || {
            match crate::delegate::delegate_by_id(id) {
                Some(delegate) => delegate.handle_notice(notice),
                None => log::debug!("engine notice for released delegate {id:?} dropped"),
            }
        }));
        if posted.is_err() {
            log::warn!("event loop terminated; engine notice dropped");
        }
    }
}

/// The parameters the backend receives when creating an engine instance.
pub struct EngineCreateParams {
    /// The surface the engine composites into.
    pub surface: SurfaceBundle,
    /// The initial size in physical pixels.
    pub size: PhysicalSize,
    /// Whether the instance runs without persistent storage.
    pub incognito: bool,
    /// The handle engine threads report notices through.
    pub client: EngineClient,
}

/// Factory and surface broker of the native engine; one per process or per
/// engine flavor, shared by every delegate.
pub trait WebEngineBackend {
    /// Allocate the graphics bundle for `window`. Failing loudly here is
    /// fatal to the enclosing creation request.
    fn create_surface(
        &self,
        window: NativeWindow,
        config: &SurfaceConfig,
    ) -> Result<SurfaceBundle, SurfaceError>;
    /// Resize an allocated surface.
    fn resize_surface(&self, surface: &SurfaceBundle, size: PhysicalSize);
    /// Show or hide an allocated surface without destroying it.
    fn set_surface_visible(&self, surface: &SurfaceBundle, visible: bool);
    /// Destroy an allocated surface.
    fn destroy_surface(&self, surface: SurfaceBundle);

    /// Create one engine instance rendering into `params.surface`.
    fn create_engine(&self, params: EngineCreateParams) -> Result<Rc<dyn WebEngine>, EngineError>;
}

/// One native engine instance. Exclusively owned by its delegate; all methods
/// are called on the UI thread and are fire-and-forget from the adapter's
/// point of view unless they return a value.
pub trait WebEngine {
    /// A touch point went down.
    fn on_touch_press(&self, id: i32, x: f64, y: f64, from_overlay: bool);
    /// A touch point moved.
    fn on_touch_move(&self, id: i32, x: f64, y: f64, from_overlay: bool);
    /// Several touch points moved at once; ordering is significant for the
    /// engine's gesture recognition.
    fn on_touch_move_batch(&self, points: &[EngineTouchPoint], from_overlay: bool);
    /// A touch point was lifted.
    fn on_touch_release(&self, id: i32, x: f64, y: f64, from_overlay: bool);
    /// The touch session was cancelled.
    fn on_touch_cancel(&self);
    /// Dispatch a mouse event.
    fn send_mouse_event(&self, event: &EngineMouseEvent);
    /// Dispatch a keyboard event. Returns whether the engine consumed it.
    fn send_key_event(&self, event: &EngineKeyEvent) -> bool;
    /// Dispatch a scroll-wheel/axis event.
    fn send_axis_event(&self, event: &EngineAxisEvent);
    /// Dispatch a touchpad fling.
    fn send_fling_event(&self, event: &EngineFlingEvent);
    /// Dispatch a drag-and-drop event.
    fn send_drag_event(&self, event: &EngineDragEvent);
    /// The operation the engine accepted for the current drop.
    fn drag_acceptable_status(&self) -> DragOperation;
    /// Forward an accessibility hover.
    fn send_accessibility_hover(&self, event: &AccessibilityHoverEvent);

    /// Resize the page to the given physical size. `keyboard` marks resizes
    /// caused by the soft keyboard appearing.
    fn resize(&self, width: u32, height: u32, keyboard: bool);
    /// The position of the component within its window, used by the engine
    /// to place popups and selection handles.
    fn set_screen_offset(&self, x: f64, y: f64);
    /// Resize during an interactive drag-resize, with the previous size for
    /// interpolation.
    fn drag_resize(&self, width: u32, height: u32, pre_width: u32, pre_height: u32);
    /// Resume rendering.
    fn on_show(&self);
    /// Suspend rendering without destroying the instance.
    fn on_hide(&self);
    /// The component gained keyboard focus.
    fn on_focus(&self, reason: FocusReason);
    /// The component lost keyboard focus.
    fn on_blur(&self, reason: BlurReason);
    /// Tear the instance down. Called exactly once, from release.
    fn destroy(&self);

    /// Navigate to `url` with additional request headers.
    fn load_url(&self, url: &str, headers: &[(String, String)]);
    /// Load `data` directly, resolving relative URLs against `base_url`.
    fn load_data(&self, base_url: &str, data: &str, mime_type: &str, encoding: &str);
    /// Go back one history entry.
    fn backward(&self);
    /// Go forward one history entry.
    fn forward(&self);
    /// Whether a back entry exists.
    fn can_go_back(&self) -> bool;
    /// Whether a forward entry exists.
    fn can_go_forward(&self) -> bool;
    /// Whether the history can move by `step` entries.
    fn access_step(&self, step: i32) -> bool;
    /// Move the history by `step` entries.
    fn back_or_forward(&self, step: i32);
    /// Reload the current page.
    fn reload(&self);
    /// Stop the current load.
    fn stop_loading(&self);

    /// Run `code` in the page; the result arrives through `callback` as a
    /// posted task later.
    fn execute_script(&self, code: &str, callback: Box<dyn FnOnce(String)>);
    /// Hand over an injection set; the engine applies it on each following
    /// navigation.
    fn inject_scripts(&self, point: InjectionPoint, items: &[ScriptItem]);
    /// Post a message over the JavaScript bridge.
    fn post_web_message(&self, message: &str, uri: &str);
    /// Fill the form the engine requested autofill data for.
    fn fill_autofill_data(&self, view_data: &str);
    /// Tell the engine no autofill data is coming.
    fn cancel_autofill(&self);

    /// The current URL.
    fn url(&self) -> String;
    /// The current document title.
    fn title(&self) -> String;
    /// The current load progress in percent.
    fn progress(&self) -> i32;
    /// The current page height in physical pixels.
    fn page_height(&self) -> i32;
    /// Classify what lies under the last pointer position.
    fn hit_test(&self) -> HitTestResult;
    /// Query one node of the accessibility tree.
    fn accessibility_node_by_id(&self, id: i64) -> Option<AccessibilityNode>;
    /// Whether a resize is still being applied by the engine.
    fn pending_size_status(&self) -> bool;

    /// The settings object of this instance.
    fn preferences(&self) -> Rc<dyn EnginePreferences>;
    /// The cookie manager of this instance.
    fn cookie_manager(&self) -> Rc<dyn CookieManager>;
}

/// The per-instance settings object of the engine. Setters are one-way; the
/// engine applies them asynchronously.
pub trait EnginePreferences {
    /// Enable or disable JavaScript.
    fn set_javascript_enabled(&self, enabled: bool);
    /// Allow `file://` access.
    fn set_file_access(&self, enabled: bool);
    /// Block images loaded over the network.
    fn set_block_network_image(&self, blocked: bool);
    /// Load images automatically.
    fn set_loads_images_automatically(&self, enabled: bool);
    /// How mixed http/https content is treated.
    fn set_mixed_content_mode(&self, mode: MixedContentMode);
    /// Allow pinch zoom.
    fn set_zoom_access(&self, enabled: bool);
    /// Enable DOM storage.
    fn set_dom_storage_enabled(&self, enabled: bool);
    /// Enable the Web SQL database.
    fn set_database_enabled(&self, enabled: bool);
    /// Enable geolocation.
    fn set_geolocation_enabled(&self, enabled: bool);
    /// Require a user gesture for media playback.
    fn set_media_play_gesture_access(&self, required: bool);
    /// Allow `window.open` to create new components.
    fn set_multi_window_access(&self, enabled: bool);
    /// Allow `window.open` without user gesture.
    fn set_allow_window_open_method(&self, enabled: bool);
    /// The HTTP cache mode.
    fn set_cache_mode(&self, mode: CacheMode);
    /// The page dark-mode strategy.
    fn set_dark_mode(&self, mode: DarkMode);
    /// Force algorithmic darkening when dark mode is on.
    fn set_force_dark_access(&self, enabled: bool);
    /// The text zoom ratio in percent.
    fn set_text_zoom_ratio(&self, ratio: i32);
    /// The initial page scale in percent.
    fn set_initial_scale(&self, scale: f32);
    /// Override the user agent.
    fn set_user_agent(&self, user_agent: &str);
    /// Allow remote debugging.
    fn set_web_debugging(&self, enabled: bool);
    /// Load pages zoomed out to overview.
    fn set_overview_mode(&self, enabled: bool);
    /// Smooth pinch-zoom rendering.
    fn set_pinch_smooth_mode(&self, enabled: bool);
}

/// The cookie store of an engine instance.
pub trait CookieManager {
    /// Set a cookie for `url`. Returns whether the cookie was accepted.
    fn set_cookie(&self, url: &str, value: &str, incognito: bool) -> bool;
    /// The cookie header value for `url`.
    fn cookie_value(&self, url: &str, incognito: bool) -> String;
    /// Remove every cookie.
    fn delete_all(&self, incognito: bool);
}
