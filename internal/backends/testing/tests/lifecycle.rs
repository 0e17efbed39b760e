// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

//! Lifecycle scenarios: creation, resizing, visibility, release, and the
//! marshaling of engine notices onto the UI thread.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use i_webembed_backend_testing::{
    default_create_params, EngineCall, Fixture, HostEvent, SurfaceOp,
};
use i_webembed_core::api::{CreateParams, LogicalSize};
use i_webembed_core::embed::EmbedData;
use i_webembed_core::engine::EngineNotice;
use i_webembed_core::script::{InjectionPoint, ScriptItem};
use i_webembed_core::DelegateState;

#[test]
fn waits_for_size_then_creates_exactly_once() {
    let fixture = Fixture::new();
    assert_eq!(fixture.delegate.state(), DelegateState::WaitingForSize);

    let empty = CreateParams { size: LogicalSize::new(0., 0.), ..default_create_params() };
    assert!(!fixture.delegate.request_create(&empty));
    assert_eq!(fixture.delegate.state(), DelegateState::WaitingForSize);
    assert_eq!(fixture.backend.engines_created(), 0);

    assert!(fixture.delegate.request_create(&default_create_params()));
    assert_eq!(fixture.delegate.state(), DelegateState::Created);
    assert_eq!(fixture.backend.engines_created(), 1);

    // A second request returns immediately and never constructs a second
    // engine instance.
    assert!(!fixture.delegate.request_create(&default_create_params()));
    assert_eq!(fixture.delegate.state(), DelegateState::Created);
    assert_eq!(fixture.backend.engines_created(), 1);
}

#[test]
fn reentrant_create_during_creation_is_rejected() {
    let fixture = Fixture::new();
    let delegate = fixture.delegate.clone();
    let inner_result = Rc::new(Cell::new(None));
    {
        let delegate = delegate.clone();
        let inner_result = inner_result.clone();
        *fixture.backend.on_create_engine.borrow_mut() = Some(Box::new(move || {
            // Invoked while the outer request is still in Creating.
            inner_result.set(Some(delegate.request_create(&default_create_params())));
        }));
    }
    assert!(delegate.request_create(&default_create_params()));
    assert_eq!(inner_result.get(), Some(false));
    assert_eq!(fixture.backend.engines_created(), 1);
}

#[test]
fn surface_failure_is_fatal_and_allows_retry() {
    let fixture = Fixture::new();
    fixture.backend.fail_surface.set(true);
    assert!(!fixture.delegate.request_create(&default_create_params()));
    assert_eq!(fixture.delegate.state(), DelegateState::CreateFailed);
    assert_eq!(fixture.backend.engines_created(), 0);

    fixture.backend.fail_surface.set(false);
    assert!(fixture.delegate.request_create(&default_create_params()));
    assert_eq!(fixture.delegate.state(), DelegateState::Created);
}

#[test]
fn engine_failure_releases_the_acquired_surface() {
    let fixture = Fixture::new();
    fixture.backend.fail_engine.set(true);
    assert!(!fixture.delegate.request_create(&default_create_params()));
    assert_eq!(fixture.delegate.state(), DelegateState::CreateFailed);
    let ops = fixture.backend.surface_ops();
    assert!(ops.contains(&SurfaceOp::Destroyed { handle: 1 }));
}

#[test]
fn created_callbacks_fire_in_registration_order() {
    let fixture = Fixture::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second", "third"] {
        let order = order.clone();
        fixture.delegate.add_created_callback(move || order.borrow_mut().push(tag));
    }
    // Creation failure must not fire them.
    fixture.backend.fail_engine.set(true);
    assert!(!fixture.delegate.request_create(&default_create_params()));
    assert!(order.borrow().is_empty());

    fixture.backend.fail_engine.set(false);
    assert!(fixture.delegate.request_create(&default_create_params()));
    assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn release_is_idempotent_and_fires_released_callbacks_once() {
    let fixture = Fixture::created();
    let engine = fixture.engine();
    let releases = Rc::new(RefCell::new(Vec::new()));
    for tag in ["a", "b"] {
        let releases = releases.clone();
        fixture.delegate.add_released_callback(move || releases.borrow_mut().push(tag));
    }

    fixture.delegate.release();
    assert_eq!(fixture.delegate.state(), DelegateState::Released);
    assert!(engine.is_destroyed());
    assert_eq!(*releases.borrow(), vec!["a", "b"]);

    fixture.delegate.release();
    assert_eq!(*releases.borrow(), vec!["a", "b"]);
    let destroys = fixture
        .backend
        .surface_ops()
        .into_iter()
        .filter(|op| matches!(op, SurfaceOp::Destroyed { .. }))
        .count();
    assert_eq!(destroys, 1);

    // No transition leaves Released.
    assert!(!fixture.delegate.request_create(&default_create_params()));
    assert_eq!(fixture.delegate.state(), DelegateState::Released);
}

#[test]
fn resize_requests_coalesce_to_the_latest_value() {
    let fixture = Fixture::created();
    fixture.delegate.resize(900., 700., false);
    fixture.delegate.resize(1000., 800., false);
    fixture.delegate.resize(1100., 850., true);
    fixture.pump();
    let resizes = fixture.engine().calls_matching(|call| matches!(call, EngineCall::Resize { .. }));
    assert_eq!(resizes, vec![EngineCall::Resize { width: 1100, height: 850, keyboard: true }]);
}

#[test]
fn resize_with_unchanged_dimensions_is_a_no_op() {
    let fixture = Fixture::created();
    // 800x600 is what the component was created with.
    fixture.delegate.resize(800., 600., false);
    fixture.pump();
    assert!(fixture
        .engine()
        .calls_matching(|call| matches!(call, EngineCall::Resize { .. }))
        .is_empty());
}

#[test]
fn resizes_during_a_drag_resize_are_held_until_it_ends() {
    let fixture = Fixture::created();
    fixture.delegate.drag_resize(850., 650.);
    assert_eq!(
        fixture.engine().calls_matching(|call| matches!(call, EngineCall::DragResize { .. })),
        vec![EngineCall::DragResize { width: 850, height: 650 }]
    );

    fixture.delegate.resize(1000., 800., false);
    fixture.pump();
    assert!(fixture
        .engine()
        .calls_matching(|call| matches!(call, EngineCall::Resize { .. }))
        .is_empty());

    fixture.delegate.drag_resize_end();
    fixture.pump();
    assert_eq!(
        fixture.engine().calls_matching(|call| matches!(call, EngineCall::Resize { .. })),
        vec![EngineCall::Resize { width: 1000, height: 800, keyboard: false }]
    );
}

#[test]
fn show_and_hide_toggle_surface_and_engine_without_teardown() {
    let fixture = Fixture::created();
    fixture.delegate.hide();
    fixture.delegate.show();
    let engine_calls = fixture
        .engine()
        .calls_matching(|call| matches!(call, EngineCall::Show | EngineCall::Hide));
    assert_eq!(engine_calls, vec![EngineCall::Hide, EngineCall::Show]);
    assert!(!fixture.engine().is_destroyed());
    let ops = fixture.backend.surface_ops();
    assert!(ops.contains(&SurfaceOp::Visible { handle: 1, visible: false }));
    assert!(!ops.contains(&SurfaceOp::Destroyed { handle: 1 }));
}

#[test]
fn notices_from_engine_threads_arrive_via_the_task_queue() {
    let fixture = Fixture::created();
    let client = fixture.engine().client();
    let worker = std::thread::spawn(move || {
        client.notify(EngineNotice::ProgressChanged { progress: 30 });
        client.notify(EngineNotice::TitleChanged { title: "hello".into() });
    });
    worker.join().unwrap();

    // Nothing reaches the host before the UI thread drains its queue.
    assert!(fixture.host.events().is_empty());
    fixture.pump();
    assert_eq!(
        fixture.host.events(),
        vec![HostEvent::Progress(30), HostEvent::Title("hello".into())]
    );
}

#[test]
fn notices_after_release_are_dropped() {
    let fixture = Fixture::created();
    let client = fixture.engine().client();
    fixture.delegate.release();
    client.notify(EngineNotice::TitleChanged { title: "late".into() });
    fixture.pump();
    assert!(fixture.host.events().is_empty());
}

#[test]
fn queries_forward_to_the_engine_and_default_when_absent() {
    let waiting = Fixture::new();
    assert_eq!(waiting.delegate.url(), "");
    assert_eq!(waiting.delegate.progress(), 0);
    assert!(!waiting.delegate.can_go_back());

    let fixture = Fixture::created();
    *fixture.engine().current_url.borrow_mut() = "https://example.com/".into();
    fixture.engine().current_progress.set(80);
    assert_eq!(fixture.delegate.url(), "https://example.com/");
    assert_eq!(fixture.delegate.progress(), 80);
    assert!(fixture.delegate.can_go_back());
    assert!(!fixture.delegate.can_go_forward());
    assert_eq!(fixture.delegate.page_height(), 2000);
}

#[test]
fn settings_are_applied_at_creation_and_forwarded_on_update() {
    let fixture = Fixture::created();
    let prefs = fixture.engine().preferences_log();
    assert!(prefs.calls().contains(&"javascript_enabled=true".to_string()));

    fixture.delegate.update_javascript_enabled(false);
    fixture.delegate.update_text_zoom_ratio(120);
    assert!(prefs.calls().contains(&"javascript_enabled=false".to_string()));
    assert!(prefs.calls().contains(&"text_zoom_ratio=120".to_string()));
    assert!(!fixture.delegate.settings().javascript_enabled);
}

#[test]
fn script_sets_staged_before_creation_are_handed_over_once() {
    let fixture = Fixture::new();
    fixture.delegate.set_script_items(
        InjectionPoint::DocumentStart,
        vec![ScriptItem { script: "init()".into(), rules: Vec::new() }],
    );
    assert!(fixture.delegate.request_create(&default_create_params()));
    let handovers = fixture
        .engine()
        .calls_matching(|call| matches!(call, EngineCall::InjectScripts { .. }));
    assert_eq!(
        handovers,
        vec![EngineCall::InjectScripts { point: InjectionPoint::DocumentStart, count: 1 }]
    );

    // Re-staging while created hands over immediately.
    fixture.delegate.set_script_items(
        InjectionPoint::DocumentEnd,
        vec![
            ScriptItem { script: "a()".into(), rules: Vec::new() },
            ScriptItem { script: "b()".into(), rules: Vec::new() },
        ],
    );
    let handovers = fixture
        .engine()
        .calls_matching(|call| matches!(call, EngineCall::InjectScripts { .. }));
    assert_eq!(handovers.len(), 2);
    assert_eq!(
        handovers[1],
        EngineCall::InjectScripts { point: InjectionPoint::DocumentEnd, count: 2 }
    );
}

#[test]
fn embed_records_are_visible_before_the_notice_is_dispatched() {
    let fixture = Fixture::created();
    let client = fixture.engine().client();
    let worker = std::thread::spawn(move || {
        client.notify(EngineNotice::EmbedLifecycle {
            id: "embed-1".into(),
            data: Some(EmbedData {
                tag: "object".into(),
                src: "movie.mp4".into(),
                width: 320,
                height: 240,
            }),
        });
    });
    worker.join().unwrap();

    // The registry was written on the engine thread, before the UI thread
    // ran any task.
    assert!(fixture.delegate.embed_data().contains("embed-1"));
    fixture.pump();
    assert_eq!(fixture.host.events(), vec![HostEvent::EmbedChanged("embed-1".into())]);

    let client = fixture.engine().client();
    client.notify(EngineNotice::EmbedLifecycle { id: "embed-1".into(), data: None });
    assert!(!fixture.delegate.embed_data().contains("embed-1"));
}

#[test]
fn cookie_calls_pass_through_to_the_engine_store() {
    let fixture = Fixture::created();
    assert!(fixture.delegate.set_cookie("https://example.com", "a=b", false));
    assert_eq!(fixture.delegate.cookie_value("https://example.com", false), "a=b");
    fixture.delegate.delete_all_cookies(false);
    assert_eq!(fixture.delegate.cookie_value("https://example.com", false), "");

    let waiting = Fixture::new();
    assert!(!waiting.delegate.set_cookie("https://example.com", "a=b", false));
}

#[test]
fn execute_script_delivers_its_result_through_the_callback() {
    let fixture = Fixture::created();
    let result = Rc::new(RefCell::new(String::new()));
    {
        let result = result.clone();
        fixture
            .delegate
            .execute_script("document.title", move |value| *result.borrow_mut() = value);
    }
    assert_eq!(*result.borrow(), "result of document.title");
    assert_eq!(
        fixture
            .engine()
            .calls_matching(|call| matches!(call, EngineCall::ExecuteScript { .. }))
            .len(),
        1
    );
}

#[test]
fn navigation_commands_forward_and_default_defensively() {
    let fixture = Fixture::created();
    fixture.delegate.load_url("https://example.com/", &[]);
    fixture.delegate.reload();
    fixture.delegate.back_or_forward(-1);
    fixture.delegate.stop_loading();
    let calls = fixture.engine().calls_matching(|call| {
        matches!(
            call,
            EngineCall::LoadUrl { .. }
                | EngineCall::Reload
                | EngineCall::BackOrForward { .. }
                | EngineCall::StopLoading
        )
    });
    assert_eq!(calls.len(), 4);

    // Without an engine these are silent no-ops.
    let waiting = Fixture::new();
    waiting.delegate.load_url("https://example.com/", &[]);
    waiting.delegate.reload();
    assert_eq!(waiting.backend.engines_created(), 0);
}

#[test]
fn autofill_bridge_round_trip() {
    let fixture = Fixture::created();
    let client = fixture.engine().client();
    client.notify(EngineNotice::AutofillRequest { view_data: "{form}".into() });
    fixture.pump();
    assert_eq!(fixture.host.events(), vec![HostEvent::Autofill("{form}".into())]);

    fixture.delegate.autofill_fill("{filled}");
    assert_eq!(
        fixture.engine().calls_matching(|call| matches!(call, EngineCall::AutofillFill { .. })),
        vec![EngineCall::AutofillFill { view_data: "{filled}".into() }]
    );
}
