mod common;

use common::{ymd, ScriptedProvider};
use timeline_core::{
    DailyNoteConfig, DayError, DayStatus, DayWindowManager, ExtensionDirection, WindowError,
};

fn manager(provider: ScriptedProvider) -> DayWindowManager<ScriptedProvider> {
    DayWindowManager::new(provider, DailyNoteConfig::default(), ymd(2025, 6, 15))
}

#[test]
fn initialize_materializes_every_offset_in_range() {
    let provider = ScriptedProvider::new();
    let state = provider.state();
    let mut windows = manager(provider);

    let report = windows.initialize(-3, 6).unwrap();

    assert_eq!(report.inserted, (-3..=6).collect::<Vec<_>>());
    assert!(report.failures.is_empty());
    let window = windows.window();
    assert_eq!(window.offsets().collect::<Vec<_>>(), (-3..=6).collect::<Vec<_>>());
    assert_eq!(window.resolve(-3).unwrap().date(), ymd(2025, 6, 12));
    assert_eq!(window.resolve(6).unwrap().date(), ymd(2025, 6, 21));
    assert_eq!(state.created_count(), 10);
    assert_eq!(state.open_editors.get(), 10);
}

#[test]
fn initialize_rejects_inverted_range_and_keeps_window() {
    let mut windows = manager(ScriptedProvider::new());
    windows.initialize(0, 1).unwrap();

    let err = windows.initialize(2, 1).unwrap_err();

    assert_eq!(err, WindowError::InvalidRange { min: 2, max: 1 });
    assert_eq!(windows.window().offsets().collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn rebuild_releases_every_previous_record() {
    let provider = ScriptedProvider::new();
    let state = provider.state();
    let mut windows = manager(provider);
    windows.initialize(-1, 1).unwrap();

    windows.initialize(0, 0).unwrap();

    assert_eq!(
        state.released_paths(),
        vec![
            "2025-06-14.md".to_string(),
            "2025-06-15.md".to_string(),
            "2025-06-16.md".to_string(),
        ]
    );
    assert_eq!(state.open_editors.get(), 1);
    assert_eq!(windows.window().len(), 1);
}

#[test]
fn extend_backward_prepends_older_days_in_ascending_order() {
    let mut windows = manager(ScriptedProvider::new());
    windows.initialize(0, 2).unwrap();

    let report = windows.extend_backward(3);

    assert_eq!(report.inserted, vec![-3, -2, -1]);
    let window = windows.window();
    assert_eq!(window.offsets().collect::<Vec<_>>(), vec![-3, -2, -1, 0, 1, 2]);
    let dates = window.iter().map(|day| day.date()).collect::<Vec<_>>();
    assert_eq!(dates.first(), Some(&ymd(2025, 6, 12)));
    assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn extend_forward_appends_after_maximum() {
    let mut windows = manager(ScriptedProvider::new());
    windows.initialize(-1, 0).unwrap();

    let report = windows.extend_forward(2);

    assert_eq!(report.inserted, vec![1, 2]);
    assert_eq!(windows.window().max_offset(), Some(2));
    assert_eq!(windows.window().resolve(2).unwrap().date(), ymd(2025, 6, 17));
}

#[test]
fn second_extension_before_first_completes_is_dropped() {
    let mut windows = manager(ScriptedProvider::new());
    windows.initialize(0, 2).unwrap();

    let plan = windows
        .begin_extension(ExtensionDirection::Backward, 3)
        .unwrap()
        .expect("non-empty window should plan an extension");
    assert!(windows.is_extending());

    let dropped = windows.extend_backward(3);
    assert!(dropped.is_empty());
    assert!(windows
        .begin_extension(ExtensionDirection::Forward, 1)
        .is_err());

    let records = plan
        .offsets()
        .map(|offset| windows.materialize(&plan, offset))
        .collect();
    let report = windows.complete_extension(plan, records);

    assert_eq!(report.inserted, vec![-3, -2, -1]);
    assert_eq!(windows.window().len(), 6);
    assert!(!windows.is_extending());

    windows.extend_backward(3);
    assert_eq!(windows.window().min_offset(), Some(-6));
}

#[test]
fn extension_completed_after_rebuild_is_released_not_inserted() {
    let provider = ScriptedProvider::new();
    let state = provider.state();
    let mut windows = manager(provider);
    windows.initialize(0, 2).unwrap();

    let plan = windows
        .begin_extension(ExtensionDirection::Forward, 3)
        .unwrap()
        .unwrap();
    let records = plan
        .offsets()
        .map(|offset| windows.materialize(&plan, offset))
        .collect();

    windows.rebuild_at(ymd(2025, 1, 1), -3, 6).unwrap();
    assert!(!windows.is_extending());

    let report = windows.complete_extension(plan, records);

    assert!(report.inserted.is_empty());
    assert_eq!(report.discarded, vec![3, 4, 5]);
    assert_eq!(windows.window().offsets().collect::<Vec<_>>(), (-3..=6).collect::<Vec<_>>());
    assert_eq!(windows.window().resolve(0).unwrap().date(), ymd(2025, 1, 1));
    assert_eq!(state.open_editors.get(), 10);
    assert!(state.released_paths().contains(&"2025-06-18.md".to_string()));
}

#[test]
fn missing_record_in_backward_batch_stops_attachment_at_the_gap() {
    let provider = ScriptedProvider::new();
    let state = provider.state();
    let mut windows = manager(provider);
    windows.initialize(0, 2).unwrap();

    let plan = windows
        .begin_extension(ExtensionDirection::Backward, 3)
        .unwrap()
        .unwrap();
    let records = vec![
        windows.materialize(&plan, -3),
        windows.materialize(&plan, -1),
    ];
    let report = windows.complete_extension(plan, records);

    assert_eq!(report.inserted, vec![-1]);
    assert_eq!(report.discarded, vec![-3]);
    assert_eq!(windows.window().offsets().collect::<Vec<_>>(), vec![-1, 0, 1, 2]);
    assert_eq!(state.open_editors.get(), 4);
}

#[test]
fn creation_failure_degrades_only_that_day() {
    let provider = ScriptedProvider::new().failing_create("2025-06-16.md");
    let mut windows = manager(provider);

    let report = windows.initialize(-1, 2).unwrap();

    assert_eq!(report.inserted, vec![-1, 0, 1, 2]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].offset, 1);
    assert!(matches!(report.failures[0].error, DayError::Creation(_)));

    let failed = windows.window().resolve(1).unwrap();
    assert!(failed.content().is_none());
    assert!(matches!(failed.status(), DayStatus::ContentUnavailable(_)));
    for offset in [-1, 0, 2] {
        assert_eq!(windows.window().resolve(offset).unwrap().status(), &DayStatus::Ready);
    }
}

#[test]
fn bind_failure_keeps_content_without_editor() {
    let provider = ScriptedProvider::new().failing_bind("2025-06-15.md");
    let mut windows = manager(provider);

    let report = windows.initialize(0, 1).unwrap();

    assert!(matches!(report.failures[0].error, DayError::Bind(_)));
    let day = windows.window().resolve(0).unwrap();
    assert_eq!(day.content().map(|doc| doc.path.as_str()), Some("2025-06-15.md"));
    assert!(day.editor().is_none());
    assert!(day.is_degraded());
}

#[test]
fn new_notes_are_seeded_from_template() {
    let provider =
        ScriptedProvider::new().with_note("templates/daily.md", "# {{date}} ({{day}})\n");
    let state = provider.state();
    let config = DailyNoteConfig {
        template_path: Some("templates/daily.md".to_string()),
        ..DailyNoteConfig::default()
    };
    let mut windows = DayWindowManager::new(provider, config, ymd(2025, 6, 15));

    windows.initialize(0, 0).unwrap();

    assert_eq!(
        state.note("2025-06-15.md").as_deref(),
        Some("# 2025-06-15 (Sunday)\n")
    );
}

#[test]
fn missing_template_falls_back_to_blank_body() {
    let provider = ScriptedProvider::new();
    let state = provider.state();
    let config = DailyNoteConfig {
        template_path: Some("templates/missing.md".to_string()),
        ..DailyNoteConfig::default()
    };
    let mut windows = DayWindowManager::new(provider, config, ymd(2025, 6, 15));

    let report = windows.initialize(0, 0).unwrap();

    assert!(report.failures.is_empty());
    assert_eq!(state.note("2025-06-15.md"), Some("\n".repeat(10)));
}

#[test]
fn existing_note_is_opened_not_recreated() {
    let provider = ScriptedProvider::new().with_note("2025-06-15.md", "kept");
    let state = provider.state();
    let mut windows = manager(provider);

    windows.initialize(0, 0).unwrap();

    assert_eq!(state.created_count(), 0);
    assert_eq!(state.note("2025-06-15.md").as_deref(), Some("kept"));
}

#[test]
fn config_update_applies_to_later_materializations() {
    let provider = ScriptedProvider::new();
    let state = provider.state();
    let config = DailyNoteConfig {
        folder: "daily/".to_string(),
        ..DailyNoteConfig::default()
    };
    let mut windows = DayWindowManager::new(provider, config, ymd(2025, 6, 15));
    windows.initialize(0, 0).unwrap();

    windows.update_config(DailyNoteConfig {
        folder: "journal".to_string(),
        ..DailyNoteConfig::default()
    });
    windows.extend_forward(1);

    assert!(state.note("daily/2025-06-15.md").is_some());
    assert!(state.note("journal/2025-06-16.md").is_some());
}

#[test]
fn extension_of_empty_window_is_a_noop() {
    let mut windows = manager(ScriptedProvider::new());

    assert!(windows.extend_forward(3).is_empty());
    assert!(windows.extend_backward(0).is_empty());
    assert!(windows.window().is_empty());
    assert!(!windows.is_extending());
}

#[test]
fn clear_and_drop_release_all_handles() {
    let provider = ScriptedProvider::new();
    let state = provider.state();
    let mut windows = manager(provider);
    windows.initialize(-2, 2).unwrap();

    windows.clear();
    assert!(windows.window().is_empty());
    assert_eq!(state.open_editors.get(), 0);

    windows.initialize(0, 1).unwrap();
    drop(windows);
    assert_eq!(state.open_editors.get(), 0);
    assert_eq!(state.released_paths().len(), 7);
}

#[test]
fn replayed_plan_cannot_release_the_pending_extension() {
    let provider = ScriptedProvider::new();
    let state = provider.state();
    let mut windows = manager(provider);
    windows.initialize(0, 1).unwrap();

    let first = windows
        .begin_extension(ExtensionDirection::Forward, 2)
        .unwrap()
        .unwrap();
    let replay = first.clone();
    let records = first
        .offsets()
        .map(|offset| windows.materialize(&first, offset))
        .collect();
    windows.complete_extension(first, records);
    assert_eq!(windows.window().max_offset(), Some(3));

    let pending = windows
        .begin_extension(ExtensionDirection::Forward, 2)
        .unwrap()
        .unwrap();
    assert_ne!(pending.id(), replay.id());

    let replayed = windows.complete_extension(replay, Vec::new());
    assert!(replayed.inserted.is_empty());
    assert!(windows.is_extending());
    assert!(windows.extend_forward(2).is_empty());
    let created_before = state.created_count();

    let records = pending
        .offsets()
        .map(|offset| windows.materialize(&pending, offset))
        .collect();
    let report = windows.complete_extension(pending, records);

    assert_eq!(report.inserted, vec![4, 5]);
    assert!(report.discarded.is_empty());
    assert_eq!(state.created_count(), created_before + 2);
    assert!(!windows.is_extending());
}

#[test]
fn completing_a_plan_twice_discards_the_second_batch() {
    let provider = ScriptedProvider::new();
    let state = provider.state();
    let mut windows = manager(provider);
    windows.initialize(0, 0).unwrap();

    let plan = windows
        .begin_extension(ExtensionDirection::Backward, 1)
        .unwrap()
        .unwrap();
    let again = plan.clone();
    let records = vec![windows.materialize(&plan, -1)];
    windows.complete_extension(plan, records);

    let duplicate = vec![windows.materialize(&again, -1)];
    let report = windows.complete_extension(again, duplicate);

    assert!(report.inserted.is_empty());
    assert_eq!(report.discarded, vec![-1]);
    assert_eq!(windows.window().offsets().collect::<Vec<_>>(), vec![-1, 0]);
    assert_eq!(state.open_editors.get(), 2);
}
