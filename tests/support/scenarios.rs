use bases_kanban::scenario::Scenario;

/// Four columns, two cards in Todo and one in Done, ranked for reordering.
pub const BOARD: &str = r#"
columns = ["Todo", "Doing", "Done", "(No value)"]
group_by = "status"
sort_by = "rank"

[[entries]]
path = "tasks/a.md"
properties = { status = "Todo", rank = 1 }

[[entries]]
path = "tasks/b.md"
properties = { status = "Todo", rank = 2 }

[[entries]]
path = "tasks/c.md"
properties = { status = "Todo", rank = 3 }

[[entries]]
path = "tasks/x.md"
properties = { status = "Done", rank = 1 }
"#;

/// `BOARD` followed by the given `[[events]]` tables.
pub fn board_with_events(events: &str) -> Scenario {
    let text = format!("{BOARD}\n{events}");
    Scenario::from_toml_str(&text, "inline").expect("parse scenario")
}
