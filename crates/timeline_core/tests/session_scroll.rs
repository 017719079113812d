mod common;

use common::{ymd, RecordingSink, ScriptedProvider};
use timeline_core::{FixedClock, ScrollMetrics, ScrollResponse, TimelineConfig, TimelineSession};

type Session = TimelineSession<ScriptedProvider, RecordingSink, FixedClock>;

fn open_session(provider: ScriptedProvider) -> Session {
    let mut session = TimelineSession::with_clock(
        provider,
        RecordingSink::default(),
        FixedClock(ymd(2025, 6, 15)),
        TimelineConfig::default(),
    );
    session.open().unwrap();
    session
}

fn metrics(scroll_top: f64, scroll_height: f64, client_height: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top,
        scroll_height,
        client_height,
    }
}

#[test]
fn scrolling_near_top_loads_older_days() {
    let mut session = open_session(ScriptedProvider::new());

    let response = session.on_scroll(metrics(100.0, 5000.0, 800.0));

    assert_eq!(
        response,
        ScrollResponse {
            extended_backward: true,
            extended_forward: false,
        }
    );
    assert_eq!(session.window().min_offset(), Some(-6));
    assert_eq!(session.window().resolve(-6).unwrap().date(), ymd(2025, 6, 9));
}

#[test]
fn scrolling_near_bottom_loads_newer_days() {
    let mut session = open_session(ScriptedProvider::new());

    let response = session.on_scroll(metrics(3900.0, 5000.0, 800.0));

    assert!(response.extended_forward);
    assert!(!response.extended_backward);
    assert_eq!(session.window().max_offset(), Some(9));
}

#[test]
fn scrolling_mid_document_does_nothing() {
    let mut session = open_session(ScriptedProvider::new());

    let response = session.on_scroll(metrics(2000.0, 5000.0, 800.0));

    assert_eq!(response, ScrollResponse::default());
    assert_eq!(session.window().len(), 10);
}

#[test]
fn short_document_extends_both_edges() {
    let mut session = open_session(ScriptedProvider::new());

    let response = session.on_scroll(metrics(0.0, 900.0, 800.0));

    assert!(response.extended_backward && response.extended_forward);
    assert_eq!(session.window().len(), 16);
}

#[test]
fn extension_batch_follows_config() {
    let mut session = open_session(ScriptedProvider::new());
    session.update_config(TimelineConfig {
        extension_batch: 5,
        ..TimelineConfig::default()
    });

    session.on_scroll(metrics(0.0, 5000.0, 800.0));

    assert_eq!(session.window().min_offset(), Some(-8));
}

#[test]
fn failed_days_surface_as_notices() {
    let provider = ScriptedProvider::new().failing_create("2025-06-11.md");
    let mut session = open_session(provider);

    let report = session.extend_backward(3);

    assert_eq!(report.inserted, vec![-6, -5, -4]);
    assert_eq!(report.failures.len(), 1);
    let notices = &session.sink().notices;
    assert_eq!(notices.len(), 1);
    assert!(notices[0].starts_with("Failed to load note for 2025-06-11"));
}

#[test]
fn close_releases_every_day_and_forgets_active_day() {
    let provider = ScriptedProvider::new();
    let state = provider.state();
    let mut session = open_session(provider);
    session.extend_forward(3);

    session.close();

    assert!(session.window().is_empty());
    assert_eq!(session.active_day(), None);
    assert_eq!(state.open_editors.get(), 0);
    assert_eq!(state.released_paths().len(), 13);
}
