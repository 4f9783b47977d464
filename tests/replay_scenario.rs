mod support;

use bases_kanban::board::HostCall;
use bases_kanban::scenario::{EventKind, Replay, ReplayReport, ScenarioError};
use bases_kanban::settings::KanbanSettings;
use support::scenarios::board_with_events;

fn run(events: &str) -> ReplayReport {
    let scenario = board_with_events(events);
    Replay::run(&scenario, KanbanSettings::default()).expect("replay scenario")
}

fn column<'a>(report: &'a ReplayReport, name: &str) -> Vec<&'a str> {
    report
        .columns
        .iter()
        .find(|column| column.name == name)
        .map(|column| column.entries.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

fn assert_clean(report: &ReplayReport) {
    assert!(report.idle, "drag should have ended");
    assert!(!report.indicator_visible, "indicator should be hidden");
    assert_eq!(report.lingering_markers, 0);
}

#[test]
fn column_drag_reorders_board() {
    let report = run(r#"
[[events]]
kind = "drag_start"
target = "header:Todo"

[[events]]
kind = "animation_frame"

[[events]]
kind = "drag_over"
target = "column:Done"
at = "right"

[[events]]
kind = "drop"
target = "column:Done"
at = "right"

[[events]]
kind = "drag_end"
target = "header:Todo"
"#);

    assert_eq!(
        report.calls,
        vec![HostCall::ColumnReorder {
            new_order: vec![
                "Doing".into(),
                "Done".into(),
                "Todo".into(),
                "(No value)".into()
            ],
        }]
    );
    assert!(report.steps[2].accepted);
    assert!(report.steps[3].accepted);
    assert_clean(&report);
}

#[test]
fn card_dropped_below_later_card_gets_next_rank() {
    let report = run(r#"
[[events]]
kind = "drag_start"
target = "card:tasks/a.md"

[[events]]
kind = "drag_over"
target = "card:tasks/c.md"
at = "bottom"

[[events]]
kind = "drop"
target = "card:tasks/c.md"
at = "bottom"

[[events]]
kind = "drag_end"
target = "card:tasks/a.md"
"#);

    assert_eq!(
        report.calls,
        vec![HostCall::CardReorder {
            file: "tasks/a.md".into(),
            target_column: "Todo".into(),
            target_index: 2,
            sort_value: "4".into(),
        }]
    );
    assert_eq!(
        column(&report, "Todo"),
        vec!["tasks/b.md", "tasks/c.md", "tasks/a.md"]
    );
    assert_clean(&report);
}

#[test]
fn card_dropped_on_other_column_changes_group() {
    let report = run(r#"
[[events]]
kind = "drag_start"
target = "card:tasks/x.md"

[[events]]
kind = "drag_over"
target = "cards:Doing"

[[events]]
kind = "drop"
target = "cards:Doing"
"#);

    assert_eq!(
        report.calls,
        vec![HostCall::CardMoveToColumn {
            file: "tasks/x.md".into(),
            new_value: "Doing".into(),
        }]
    );
    assert_eq!(column(&report, "Doing"), vec!["tasks/x.md"]);
    assert!(column(&report, "Done").is_empty());
    assert_clean(&report);
}

#[test]
fn drop_into_no_value_column_clears_status() {
    let scenario = board_with_events(
        r#"
[[events]]
kind = "drag_start"
target = "card:tasks/b.md"

[[events]]
kind = "drag_over"
target = "cards:(No value)"

[[events]]
kind = "drop"
target = "cards:(No value)"
"#,
    );
    let mut replay = Replay::new(&scenario, KanbanSettings::default());
    for (index, event) in scenario.events.iter().enumerate() {
        replay.step(index, event).expect("replay step");
    }

    assert_eq!(replay.host().property("tasks/b.md", "status"), None);
    assert!(replay.rendered().column("(No value)").is_some_and(|column| {
        column
            .card_elements
            .iter()
            .any(|(path, _)| path == "tasks/b.md")
    }));
}

#[test]
fn drop_without_accepted_hover_is_skipped() {
    let report = run(r#"
[[events]]
kind = "drag_start"
target = "card:tasks/a.md"

[[events]]
kind = "drop"
target = "cards:Done"

[[events]]
kind = "drag_end"
target = "card:tasks/a.md"
"#);

    assert!(report.calls.is_empty());
    assert_eq!(report.steps[1].kind, EventKind::Drop);
    assert!(report.steps[1].skipped.is_some());
    assert_clean(&report);
}

#[test]
fn abandoned_drag_leaves_no_markers() {
    let report = run(r#"
[[events]]
kind = "drag_start"
target = "card:tasks/a.md"

[[events]]
kind = "animation_frame"

[[events]]
kind = "drag_over"
target = "cards:Done"

[[events]]
kind = "drag_leave"
target = "cards:Done"
related = "card:tasks/x.md"

[[events]]
kind = "drag_end"
target = "card:tasks/a.md"
"#);

    assert!(report.calls.is_empty());
    assert_clean(&report);
}

#[test]
fn report_serializes_calls_with_tags() {
    let report = run(r#"
[[events]]
kind = "drag_start"
target = "header:Doing"

[[events]]
kind = "drag_over"
target = "column:Todo"
at = "left"

[[events]]
kind = "drop"
target = "column:Todo"
at = "left"
"#);

    let json = serde_json::to_value(&report).expect("encode report");
    assert_eq!(json["calls"][0]["call"], "column_reorder");
    assert_eq!(json["calls"][0]["new_order"][0], "Doing");
    assert_eq!(json["idle"], true);
    assert!(json["steps"][0].get("skipped").is_none());
}

#[test]
fn unknown_targets_are_reported() {
    let scenario = board_with_events(
        r#"
[[events]]
kind = "drag_start"
target = "card:tasks/missing.md"
"#,
    );
    let err = Replay::run(&scenario, KanbanSettings::default()).unwrap_err();
    assert!(matches!(err, ScenarioError::UnknownTarget(path) if path == "card:tasks/missing.md"));
}

#[test]
fn events_other_than_frames_need_a_target() {
    let scenario = board_with_events(
        r#"
[[events]]
kind = "drag_over"
"#,
    );
    let err = Replay::run(&scenario, KanbanSettings::default()).unwrap_err();
    assert!(matches!(err, ScenarioError::MissingTarget { index: 0, .. }));
}
