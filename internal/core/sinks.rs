// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

/*!
One-shot decision objects handed to the host.

Every engine-initiated question (a dialog, a certificate error, a permission
prompt, …) reaches the host wrapped in one of these narrow types. They share
a contract, not a base type: the underlying engine continuation is consumed
by the first terminal call; any further call — and any call after the owning
delegate was released — is a silent no-op, never an error. The engine side is
fire-and-forget once answered.
*/

#![warn(missing_docs)]

use std::cell::{Cell, RefCell};
use std::rc::Weak;

use crate::engine::{
    AppLinkResponder, ClientCertResponder, ContextMenuAction, ContextMenuResponder,
    DataResubmissionResponder, DialogResponder, FileSelectionResponder, GeolocationResponder,
    HttpAuthResponder, PermissionKind, PermissionResponder, ScreenCaptureConfig,
    ScreenCaptureResponder, SslErrorResponder, WindowResponder,
};

/// Consumes the wrapped responder for a terminal call.
///
/// `None` when the decision was already resolved (silent no-op), or when the
/// owning delegate is gone — then the responder is dropped unused, so an
/// orphaned decision never reaches the engine.
fn take_live<T: ?Sized>(
    responder: &RefCell<Option<Box<T>>>,
    session: &Weak<()>,
    what: &str,
) -> Option<Box<T>> {
    let responder = responder.borrow_mut().take()?;
    if session.upgrade().is_none() {
        log::debug!("{what} resolved after its delegate was released; ignored");
        return None;
    }
    Some(responder)
}

/// The answer to a JavaScript dialog (`alert`, `confirm`, `prompt`,
/// `beforeunload`).
pub struct JsDialogDecision {
    responder: RefCell<Option<Box<dyn DialogResponder>>>,
    session: Weak<()>,
}

impl JsDialogDecision {
    pub(crate) fn new(responder: Box<dyn DialogResponder>, session: Weak<()>) -> Self {
        Self { responder: RefCell::new(Some(responder)), session }
    }

    /// Accept the dialog.
    pub fn confirm(&self) {
        if let Some(responder) = take_live(&self.responder, &self.session, "dialog decision") {
            responder.confirm();
        }
    }

    /// Accept a prompt with the entered text.
    pub fn confirm_with_message(&self, message: &str) {
        if let Some(responder) = take_live(&self.responder, &self.session, "dialog decision") {
            responder.confirm_with_message(message);
        }
    }

    /// Dismiss the dialog.
    pub fn cancel(&self) {
        if let Some(responder) = take_live(&self.responder, &self.session, "dialog decision") {
            responder.cancel();
        }
    }
}

/// The answer to an HTTP authentication challenge.
pub struct HttpAuthDecision {
    responder: RefCell<Option<Box<dyn HttpAuthResponder>>>,
    session: Weak<()>,
}

impl HttpAuthDecision {
    pub(crate) fn new(responder: Box<dyn HttpAuthResponder>, session: Weak<()>) -> Self {
        Self { responder: RefCell::new(Some(responder)), session }
    }

    /// Supply credentials. Returns false when the decision was already
    /// resolved or the engine rejected the credentials outright.
    pub fn confirm(&self, user: &str, password: &str) -> bool {
        match take_live(&self.responder, &self.session, "http auth decision") {
            Some(responder) => responder.confirm(user, password),
            None => false,
        }
    }

    /// Whether the engine has stored credentials for this host and realm.
    pub fn is_saved(&self) -> bool {
        self.responder.borrow().as_ref().is_some_and(|responder| responder.is_saved())
    }

    /// Abort the authentication.
    pub fn cancel(&self) {
        if let Some(responder) = take_live(&self.responder, &self.session, "http auth decision") {
            responder.cancel();
        }
    }
}

/// The answer to a certificate error on a single request.
pub struct SslErrorDecision {
    responder: RefCell<Option<Box<dyn SslErrorResponder>>>,
    session: Weak<()>,
}

impl SslErrorDecision {
    pub(crate) fn new(responder: Box<dyn SslErrorResponder>, session: Weak<()>) -> Self {
        Self { responder: RefCell::new(Some(responder)), session }
    }

    /// Proceed despite the error.
    pub fn handle_confirm(&self) {
        if let Some(responder) = take_live(&self.responder, &self.session, "ssl error decision") {
            responder.handle_confirm();
        }
    }

    /// Abort the load.
    pub fn handle_cancel(&self) {
        if let Some(responder) = take_live(&self.responder, &self.session, "ssl error decision") {
            responder.handle_cancel();
        }
    }
}

/// The answer to the aggregated certificate errors of a main-frame load.
pub struct AggregateSslErrorDecision {
    responder: RefCell<Option<Box<dyn SslErrorResponder>>>,
    session: Weak<()>,
}

impl AggregateSslErrorDecision {
    pub(crate) fn new(responder: Box<dyn SslErrorResponder>, session: Weak<()>) -> Self {
        Self { responder: RefCell::new(Some(responder)), session }
    }

    /// Proceed despite the errors.
    pub fn handle_confirm(&self) {
        if let Some(responder) =
            take_live(&self.responder, &self.session, "aggregate ssl error decision")
        {
            responder.handle_confirm();
        }
    }

    /// Abort the load.
    pub fn handle_cancel(&self) {
        if let Some(responder) =
            take_live(&self.responder, &self.session, "aggregate ssl error decision")
        {
            responder.handle_cancel();
        }
    }
}

/// The answer to a client-certificate request.
pub struct ClientCertDecision {
    responder: RefCell<Option<Box<dyn ClientCertResponder>>>,
    session: Weak<()>,
}

impl ClientCertDecision {
    pub(crate) fn new(responder: Box<dyn ClientCertResponder>, session: Weak<()>) -> Self {
        Self { responder: RefCell::new(Some(responder)), session }
    }

    /// Answer with the chosen key and certificate chain files.
    pub fn confirm(&self, private_key_file: &str, cert_chain_file: &str) {
        if let Some(responder) = take_live(&self.responder, &self.session, "client cert decision") {
            responder.confirm(private_key_file, cert_chain_file);
        }
    }

    /// Continue without a certificate.
    pub fn cancel(&self) {
        if let Some(responder) = take_live(&self.responder, &self.session, "client cert decision") {
            responder.cancel();
        }
    }

    /// Ignore the request.
    pub fn ignore(&self) {
        if let Some(responder) = take_live(&self.responder, &self.session, "client cert decision") {
            responder.ignore();
        }
    }
}

/// The answer to a geolocation prompt.
pub struct GeolocationDecision {
    origin: String,
    responder: RefCell<Option<Box<dyn GeolocationResponder>>>,
    session: Weak<()>,
}

impl GeolocationDecision {
    pub(crate) fn new(
        origin: String,
        responder: Box<dyn GeolocationResponder>,
        session: Weak<()>,
    ) -> Self {
        Self { origin, responder: RefCell::new(Some(responder)), session }
    }

    /// The origin asking for location access.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Deliver the user's choice; `retain` keeps it for the session.
    pub fn invoke(&self, allow: bool, retain: bool) {
        if let Some(responder) = take_live(&self.responder, &self.session, "geolocation decision") {
            responder.invoke(&self.origin, allow, retain);
        }
    }
}

/// The answer to a generic permission request.
pub struct PermissionDecision {
    origin: String,
    resources: Vec<PermissionKind>,
    responder: RefCell<Option<Box<dyn PermissionResponder>>>,
    session: Weak<()>,
}

impl PermissionDecision {
    pub(crate) fn new(
        origin: String,
        resources: Vec<PermissionKind>,
        responder: Box<dyn PermissionResponder>,
        session: Weak<()>,
    ) -> Self {
        Self { origin, resources, responder: RefCell::new(Some(responder)), session }
    }

    /// The origin asking for access.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The requested resources.
    pub fn resources(&self) -> &[PermissionKind] {
        &self.resources
    }

    /// Grant a subset of the requested resources.
    pub fn grant(&self, resources: &[PermissionKind]) {
        if let Some(responder) = take_live(&self.responder, &self.session, "permission decision") {
            responder.grant(resources);
        }
    }

    /// Deny the request.
    pub fn deny(&self) {
        if let Some(responder) = take_live(&self.responder, &self.session, "permission decision") {
            responder.deny();
        }
    }
}

/// The answer to a screen-capture request. The capture configuration stays
/// mutable until the grant.
pub struct ScreenCaptureDecision {
    origin: String,
    config: Cell<ScreenCaptureConfig>,
    responder: RefCell<Option<Box<dyn ScreenCaptureResponder>>>,
    session: Weak<()>,
}

impl ScreenCaptureDecision {
    pub(crate) fn new(
        origin: String,
        responder: Box<dyn ScreenCaptureResponder>,
        session: Weak<()>,
    ) -> Self {
        Self {
            origin,
            config: Cell::new(ScreenCaptureConfig::default()),
            responder: RefCell::new(Some(responder)),
            session,
        }
    }

    /// The origin asking to capture.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Choose the capture mode before granting.
    pub fn set_capture_mode(&self, mode: i32) {
        self.config.set(ScreenCaptureConfig { mode, ..self.config.get() });
    }

    /// Choose the capture source before granting.
    pub fn set_source_id(&self, source_id: i32) {
        self.config.set(ScreenCaptureConfig { source_id, ..self.config.get() });
    }

    /// Grant the capture with the configuration set so far.
    pub fn grant(&self) {
        if let Some(responder) =
            take_live(&self.responder, &self.session, "screen capture decision")
        {
            responder.grant(&self.config.get());
        }
    }

    /// Deny the capture.
    pub fn deny(&self) {
        if let Some(responder) =
            take_live(&self.responder, &self.session, "screen capture decision")
        {
            responder.deny();
        }
    }
}

/// The answer to a file-chooser request.
pub struct FileSelectionDecision {
    responder: RefCell<Option<Box<dyn FileSelectionResponder>>>,
    session: Weak<()>,
}

impl FileSelectionDecision {
    pub(crate) fn new(responder: Box<dyn FileSelectionResponder>, session: Weak<()>) -> Self {
        Self { responder: RefCell::new(Some(responder)), session }
    }

    /// Deliver the chosen paths.
    pub fn handle_file_list(&self, files: &[String]) {
        if let Some(responder) =
            take_live(&self.responder, &self.session, "file selection decision")
        {
            responder.handle_file_list(files);
        }
    }

    /// Cancel the chooser; the page sees an empty selection.
    pub fn cancel(&self) {
        self.handle_file_list(&[]);
    }
}

/// The action picked from a context menu.
pub struct ContextMenuDecision {
    responder: RefCell<Option<Box<dyn ContextMenuResponder>>>,
    session: Weak<()>,
}

impl ContextMenuDecision {
    pub(crate) fn new(responder: Box<dyn ContextMenuResponder>, session: Weak<()>) -> Self {
        Self { responder: RefCell::new(Some(responder)), session }
    }

    /// Execute the picked action.
    pub fn execute(&self, action: ContextMenuAction) {
        if let Some(responder) = take_live(&self.responder, &self.session, "context menu decision")
        {
            responder.execute(action);
        }
    }

    /// Dismiss the menu without action.
    pub fn cancel(&self) {
        if let Some(responder) = take_live(&self.responder, &self.session, "context menu decision")
        {
            responder.cancel();
        }
    }
}

/// The handoff of a new-window request: either bind the engine id of the
/// freshly created component, or refuse.
pub struct WindowDecision {
    responder: RefCell<Option<Box<dyn WindowResponder>>>,
    session: Weak<()>,
}

impl WindowDecision {
    pub(crate) fn new(responder: Box<dyn WindowResponder>, session: Weak<()>) -> Self {
        Self { responder: RefCell::new(Some(responder)), session }
    }

    /// Bind the engine id of the new web component.
    pub fn set_controller(&self, engine_id: i32) {
        if let Some(responder) = take_live(&self.responder, &self.session, "window decision") {
            responder.set_controller(engine_id);
        }
    }

    /// Refuse to open a window.
    pub fn cancel(&self) {
        if let Some(responder) = take_live(&self.responder, &self.session, "window decision") {
            responder.cancel();
        }
    }
}

/// The answer to an application-link navigation.
pub struct AppLinkDecision {
    responder: RefCell<Option<Box<dyn AppLinkResponder>>>,
    session: Weak<()>,
}

impl AppLinkDecision {
    pub(crate) fn new(responder: Box<dyn AppLinkResponder>, session: Weak<()>) -> Self {
        Self { responder: RefCell::new(Some(responder)), session }
    }

    /// Continue the in-page navigation.
    pub fn continue_navigation(&self) {
        if let Some(responder) = take_live(&self.responder, &self.session, "app link decision") {
            responder.continue_navigation();
        }
    }

    /// Cancel the navigation; the host handled the link.
    pub fn cancel(&self) {
        if let Some(responder) = take_live(&self.responder, &self.session, "app link decision") {
            responder.cancel();
        }
    }
}

/// The answer to a form-resubmission prompt.
pub struct DataResubmissionDecision {
    responder: RefCell<Option<Box<dyn DataResubmissionResponder>>>,
    session: Weak<()>,
}

impl DataResubmissionDecision {
    pub(crate) fn new(responder: Box<dyn DataResubmissionResponder>, session: Weak<()>) -> Self {
        Self { responder: RefCell::new(Some(responder)), session }
    }

    /// Resend the POST data.
    pub fn resend(&self) {
        if let Some(responder) =
            take_live(&self.responder, &self.session, "data resubmission decision")
        {
            responder.resend();
        }
    }

    /// Abort the reload.
    pub fn cancel(&self) {
        if let Some(responder) =
            take_live(&self.responder, &self.session, "data resubmission decision")
        {
            responder.cancel();
        }
    }
}
