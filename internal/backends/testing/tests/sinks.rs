// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

//! Result-sink scenarios: one-shot resolution, default answers for
//! unhandled decisions, and orphaning on release.

use i_webembed_backend_testing::{Fixture, HostEvent, ResponderLog};
use i_webembed_core::engine::{EngineNotice, JsDialogKind, PermissionKind, SslError};

fn dialog_notice(log: &ResponderLog, message: &str) -> EngineNotice {
    EngineNotice::JsDialog {
        kind: JsDialogKind::Confirm,
        url: "https://example.com/".into(),
        message: message.into(),
        responder: log.responder(),
    }
}

#[test]
fn a_dialog_decision_resolves_exactly_once() {
    let fixture = Fixture::created();
    let log = ResponderLog::new();
    fixture.engine().client().notify(dialog_notice(&log, "sure?"));
    fixture.pump();

    assert_eq!(
        fixture.host.events(),
        vec![HostEvent::JsDialog(JsDialogKind::Confirm, "sure?".into())]
    );
    let decision = fixture.host.dialogs.borrow()[0].clone();
    decision.confirm();
    decision.confirm();
    decision.cancel();
    assert_eq!(log.entries(), vec!["dialog:confirm"]);
}

#[test]
fn an_unhandled_dialog_is_cancelled_by_the_delegate() {
    let fixture = Fixture::created();
    fixture.host.handle_decisions.set(false);
    let log = ResponderLog::new();
    fixture.engine().client().notify(dialog_notice(&log, "unattended"));
    fixture.pump();
    assert_eq!(log.entries(), vec!["dialog:cancel"]);
}

#[test]
fn resolution_after_release_is_a_silent_no_op() {
    let fixture = Fixture::created();
    let log = ResponderLog::new();
    fixture.engine().client().notify(dialog_notice(&log, "pending"));
    fixture.pump();
    let decision = fixture.host.dialogs.borrow()[0].clone();

    fixture.delegate.release();
    decision.confirm();
    decision.confirm();
    assert!(log.entries().is_empty());
}

#[test]
fn permission_requests_carry_origin_and_resources() {
    let fixture = Fixture::created();
    let log = ResponderLog::new();
    fixture.engine().client().notify(EngineNotice::PermissionRequest {
        origin: "https://call.example".into(),
        resources: vec![PermissionKind::VideoCapture, PermissionKind::AudioCapture],
        responder: log.responder(),
    });
    fixture.pump();

    let decision = fixture.host.permissions.borrow()[0].clone();
    assert_eq!(decision.origin(), "https://call.example");
    assert_eq!(decision.resources().len(), 2);
    decision.grant(&[PermissionKind::VideoCapture]);
    decision.deny();
    assert_eq!(log.entries(), vec!["permission:grant:1"]);
}

#[test]
fn screen_capture_config_is_mutable_until_granted() {
    let fixture = Fixture::created();
    let log = ResponderLog::new();
    fixture.engine().client().notify(EngineNotice::ScreenCaptureRequest {
        origin: "https://cast.example".into(),
        responder: log.responder(),
    });
    fixture.pump();

    let decision = fixture.host.screen_captures.borrow()[0].clone();
    decision.set_capture_mode(1);
    decision.set_source_id(42);
    decision.grant();
    decision.set_source_id(43);
    decision.grant();
    assert_eq!(log.entries(), vec!["capture:grant:1:42"]);
}

#[test]
fn geolocation_answers_carry_the_origin_back() {
    let fixture = Fixture::created();
    let log = ResponderLog::new();
    fixture.engine().client().notify(EngineNotice::GeolocationShow {
        origin: "https://maps.example".into(),
        responder: log.responder(),
    });
    fixture.pump();

    let decision = fixture.host.geolocations.borrow()[0].clone();
    assert_eq!(decision.origin(), "https://maps.example");
    decision.invoke(true, false);
    assert_eq!(log.entries(), vec!["geolocation:https://maps.example:true:false"]);
}

#[test]
fn http_auth_confirm_consumes_the_decision() {
    let fixture = Fixture::created();
    let log = ResponderLog::new();
    fixture.engine().client().notify(EngineNotice::HttpAuthRequest {
        host: "example.com".into(),
        realm: "site".into(),
        responder: log.responder(),
    });
    fixture.pump();

    let decision = fixture.host.auth_requests.borrow()[0].clone();
    assert!(!decision.is_saved());
    assert!(decision.confirm("user", "secret"));
    // Consumed: a second confirm reports failure, a cancel is a no-op.
    assert!(!decision.confirm("user", "secret"));
    decision.cancel();
    assert_eq!(log.entries(), vec!["auth:confirm:user"]);
}

#[test]
fn unhandled_ssl_errors_cancel_and_unhandled_cert_requests_ignore() {
    let fixture = Fixture::created();
    fixture.host.handle_decisions.set(false);
    let ssl_log = ResponderLog::new();
    let cert_log = ResponderLog::new();
    let client = fixture.engine().client();
    client.notify(EngineNotice::SslError {
        error: SslError::Untrusted,
        responder: ssl_log.responder(),
    });
    client.notify(EngineNotice::ClientCertRequest {
        host: "example.com".into(),
        port: 443,
        responder: cert_log.responder(),
    });
    fixture.pump();
    assert_eq!(ssl_log.entries(), vec!["ssl:cancel"]);
    assert_eq!(cert_log.entries(), vec!["cert:ignore"]);
}

#[test]
fn aggregate_ssl_errors_resolve_once_for_the_whole_load() {
    let fixture = Fixture::created();
    let log = ResponderLog::new();
    fixture.engine().client().notify(EngineNotice::AllSslErrors {
        errors: vec![SslError::DateInvalid, SslError::HostMismatch],
        responder: log.responder(),
    });
    fixture.pump();
    assert_eq!(fixture.host.events(), vec![HostEvent::AllSslErrors(2)]);
    let decision = fixture.host.aggregate_ssl_errors.borrow()[0].clone();
    decision.handle_confirm();
    decision.handle_cancel();
    assert_eq!(log.entries(), vec!["ssl:confirm"]);
}

#[test]
fn unhandled_file_selection_reports_an_empty_choice() {
    let fixture = Fixture::created();
    fixture.host.handle_decisions.set(false);
    let log = ResponderLog::new();
    fixture.engine().client().notify(EngineNotice::FileSelector {
        params: i_webembed_core::engine::FileSelectorParams {
            title: "Open".into(),
            mode: i_webembed_core::engine::FileSelectorMode::OpenFile,
            default_file_name: String::new(),
            accept_types: vec![".png".into()],
            capture: false,
        },
        responder: log.responder(),
    });
    fixture.pump();
    assert_eq!(log.entries(), vec!["files:"]);
}

#[test]
fn window_handoff_binds_the_new_controller() {
    let fixture = Fixture::created();
    let log = ResponderLog::new();
    fixture.engine().client().notify(EngineNotice::WindowNew {
        target_url: "https://example.com/popup".into(),
        user_gesture: true,
        responder: log.responder(),
    });
    fixture.pump();
    assert_eq!(
        fixture.host.events(),
        vec![HostEvent::WindowNew("https://example.com/popup".into())]
    );
    let decision = fixture.host.windows.borrow()[0].clone();
    decision.set_controller(99);
    decision.cancel();
    assert_eq!(log.entries(), vec!["window:controller:99"]);
}

#[test]
fn app_link_and_resubmission_decisions_are_one_shot() {
    let fixture = Fixture::created();
    let link_log = ResponderLog::new();
    let resubmit_log = ResponderLog::new();
    let client = fixture.engine().client();
    client.notify(EngineNotice::AppLink {
        url: "myapp://open".into(),
        responder: link_log.responder(),
    });
    client.notify(EngineNotice::DataResubmission { responder: resubmit_log.responder() });
    fixture.pump();

    let link = fixture.host.app_links.borrow()[0].clone();
    link.continue_navigation();
    link.cancel();
    let resubmit = fixture.host.resubmissions.borrow()[0].clone();
    resubmit.resend();
    resubmit.resend();
    assert_eq!(link_log.entries(), vec!["applink:continue"]);
    assert_eq!(resubmit_log.entries(), vec!["resubmit:resend"]);
}

#[test]
fn decisions_are_delivered_in_posting_order() {
    let fixture = Fixture::created();
    let log = ResponderLog::new();
    let client = fixture.engine().client();
    client.notify(dialog_notice(&log, "first"));
    client.notify(dialog_notice(&log, "second"));
    fixture.pump();
    assert_eq!(
        fixture.host.events(),
        vec![
            HostEvent::JsDialog(JsDialogKind::Confirm, "first".into()),
            HostEvent::JsDialog(JsDialogKind::Confirm, "second".into()),
        ]
    );
}
