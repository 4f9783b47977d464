//! Translating a resolved drop into one semantic board mutation.

use tracing::{debug, info, warn};

use super::DragDropManager;
use super::host::{BoardHost, NoticeTone};
use super::state::{Entry, EntryFile};

/// The single outcome of a completed drag, as handed to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardMutation {
    ReorderColumns {
        new_order: Vec<String>,
    },
    MoveCardToColumn {
        file: EntryFile,
        new_value: String,
    },
    ReorderCard {
        file: EntryFile,
        target_column: String,
        target_index: usize,
    },
}

/// Reasons a card drop is refused outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropRejection {
    /// Cross-column move without a grouping property to rewrite.
    MissingGroupBy,
}

/// A card released over a target position.
#[derive(Clone, Debug, PartialEq)]
pub struct CardDrop<'a> {
    pub entry: &'a Entry,
    pub source_column: &'a str,
    pub target_column: &'a str,
    pub source_index: usize,
    /// Insertion index in the target column, counted with the dragged card
    /// still in place.
    pub target_index: usize,
}

/// Move `source` next to `target` in `order`.
///
/// Returns `None` when nothing should change: a self-drop, or either column
/// missing from the live order.
pub fn reorder_columns(
    order: &[String],
    source: &str,
    target: &str,
    is_left: bool,
) -> Option<Vec<String>> {
    if source == target {
        return None;
    }
    let source_index = order.iter().position(|name| name == source)?;
    let target_index = order.iter().position(|name| name == target)?;
    let mut new_index = (target_index + usize::from(!is_left)).min(order.len());

    let mut new_order = order.to_vec();
    let removed = new_order.remove(source_index);
    if source_index < new_index {
        new_index -= 1;
    }
    new_order.insert(new_index, removed);
    Some(new_order)
}

/// Decide what a card drop means for the data model.
///
/// `Ok(None)` covers the supported no-effect cases: dropping in place, and
/// reordering inside a column when no sort property is configured.
pub fn resolve_card_drop(
    drop: &CardDrop<'_>,
    group_by: Option<&str>,
    sort_by: Option<&str>,
    no_value_column: &str,
) -> Result<Option<BoardMutation>, DropRejection> {
    if drop.source_column != drop.target_column {
        if group_by.is_none() {
            return Err(DropRejection::MissingGroupBy);
        }
        let new_value = if drop.target_column == no_value_column {
            String::new()
        } else {
            drop.target_column.to_string()
        };
        return Ok(Some(BoardMutation::MoveCardToColumn {
            file: drop.entry.file.clone(),
            new_value,
        }));
    }
    if drop.source_index == drop.target_index {
        return Ok(None);
    }
    // TODO: offer an explicit "unordered column" mode instead of ignoring
    // reorders when no sort property is set.
    if sort_by.is_none() {
        return Ok(None);
    }
    let mut target_index = drop.target_index;
    if drop.source_index < target_index {
        target_index -= 1;
    }
    Ok(Some(BoardMutation::ReorderCard {
        file: drop.entry.file.clone(),
        target_column: drop.target_column.to_string(),
        target_index,
    }))
}

impl DragDropManager {
    pub(super) fn process_card_drop(&mut self, host: &mut dyn BoardHost, drop: CardDrop<'_>) {
        let group_by = host.group_by_property();
        let sort_by = host.sort_property();
        match resolve_card_drop(
            &drop,
            group_by.as_deref(),
            sort_by.as_deref(),
            &self.settings.board.no_value_column,
        ) {
            Ok(Some(mutation)) => self.apply_mutation(host, mutation),
            Ok(None) => debug!(
                entry = %drop.entry.file,
                column = drop.target_column,
                from = drop.source_index,
                to = drop.target_index,
                sort_by = ?sort_by,
                "card drop has no effect"
            ),
            Err(DropRejection::MissingGroupBy) => {
                warn!(entry = %drop.entry.file, "cross-column drop without groupBy property");
                host.notify(&self.settings.board.missing_group_by_notice, NoticeTone::Warning);
            }
        }
    }

    /// Hand the mutation to the host without waiting on its outcome.
    pub(super) fn apply_mutation(&mut self, host: &mut dyn BoardHost, mutation: BoardMutation) {
        info!(?mutation, "applying board mutation");
        let result = match &mutation {
            BoardMutation::ReorderColumns { new_order } => host.on_column_reorder(new_order.clone()),
            BoardMutation::MoveCardToColumn { file, new_value } => {
                host.on_card_move_to_column(file, new_value)
            }
            BoardMutation::ReorderCard {
                file,
                target_column,
                target_index,
            } => host.on_card_reorder(file, target_column, *target_index),
        };
        if let Err(err) = result {
            warn!(?mutation, "host failed to apply board mutation: {err}");
        }
        self.last_mutation = Some(mutation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reorder_columns_right_half_places_after_target() {
        let order = names(&["A", "B", "C", "D"]);
        assert_eq!(
            reorder_columns(&order, "A", "C", false),
            Some(names(&["B", "C", "A", "D"]))
        );
    }

    #[test]
    fn reorder_columns_left_half_places_before_target() {
        let order = names(&["A", "B", "C", "D"]);
        assert_eq!(
            reorder_columns(&order, "A", "C", true),
            Some(names(&["B", "A", "C", "D"]))
        );
    }

    #[test]
    fn reorder_columns_moves_leftwards() {
        let order = names(&["A", "B", "C", "D"]);
        assert_eq!(
            reorder_columns(&order, "D", "A", true),
            Some(names(&["D", "A", "B", "C"]))
        );
        assert_eq!(
            reorder_columns(&order, "D", "B", false),
            Some(names(&["A", "B", "D", "C"]))
        );
    }

    #[test]
    fn reorder_columns_right_of_last_appends() {
        let order = names(&["A", "B", "C"]);
        assert_eq!(
            reorder_columns(&order, "A", "C", false),
            Some(names(&["B", "C", "A"]))
        );
    }

    #[test]
    fn reorder_columns_ignores_self_and_stale_names() {
        let order = names(&["A", "B"]);
        assert_eq!(reorder_columns(&order, "A", "A", false), None);
        assert_eq!(reorder_columns(&order, "Gone", "B", true), None);
        assert_eq!(reorder_columns(&order, "A", "Gone", true), None);
    }

    fn drop<'a>(entry: &'a Entry, from: (&'a str, usize), to: (&'a str, usize)) -> CardDrop<'a> {
        CardDrop {
            entry,
            source_column: from.0,
            target_column: to.0,
            source_index: from.1,
            target_index: to.1,
        }
    }

    #[test]
    fn cross_column_drop_maps_no_value_column_to_empty() {
        let entry = Entry::new("notes/a.md");
        let resolved = resolve_card_drop(
            &drop(&entry, ("Todo", 0), ("(No value)", 0)),
            Some("status"),
            None,
            "(No value)",
        );
        assert_eq!(
            resolved,
            Ok(Some(BoardMutation::MoveCardToColumn {
                file: EntryFile::new("notes/a.md"),
                new_value: String::new(),
            }))
        );
    }

    #[test]
    fn cross_column_drop_requires_group_by() {
        let entry = Entry::new("a.md");
        let resolved =
            resolve_card_drop(&drop(&entry, ("Todo", 0), ("Done", 1)), None, Some("rank"), "(No value)");
        assert_eq!(resolved, Err(DropRejection::MissingGroupBy));
    }

    #[test]
    fn same_column_downward_drop_compensates_for_removal() {
        let entry = Entry::new("a.md");
        let resolved = resolve_card_drop(
            &drop(&entry, ("Todo", 0), ("Todo", 3)),
            Some("status"),
            Some("rank"),
            "(No value)",
        );
        assert_eq!(
            resolved,
            Ok(Some(BoardMutation::ReorderCard {
                file: EntryFile::new("a.md"),
                target_column: "Todo".into(),
                target_index: 2,
            }))
        );
    }

    #[test]
    fn same_column_upward_drop_keeps_index() {
        let entry = Entry::new("a.md");
        let resolved = resolve_card_drop(
            &drop(&entry, ("Todo", 3), ("Todo", 1)),
            None,
            Some("rank"),
            "(No value)",
        );
        assert!(matches!(
            resolved,
            Ok(Some(BoardMutation::ReorderCard { target_index: 1, .. }))
        ));
    }

    #[test]
    fn same_column_without_sort_or_same_index_is_no_op() {
        let entry = Entry::new("a.md");
        assert_eq!(
            resolve_card_drop(&drop(&entry, ("Todo", 0), ("Todo", 2)), Some("status"), None, "(No value)"),
            Ok(None)
        );
        assert_eq!(
            resolve_card_drop(
                &drop(&entry, ("Todo", 1), ("Todo", 1)),
                Some("status"),
                Some("rank"),
                "(No value)"
            ),
            Ok(None)
        );
    }
}
