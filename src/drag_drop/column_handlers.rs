use tracing::debug;

use super::DragDropManager;
use super::drop_processing::{BoardMutation, reorder_columns};
use super::event::{DragEvent, DropEffect};
use super::host::BoardHost;
use super::state::DragState;
use super::tree::{BoardTree, ElementId};

impl DragDropManager {
    pub(super) fn handle_column_drag_start(
        &mut self,
        tree: &mut dyn BoardTree,
        event: &mut DragEvent,
        column_el: ElementId,
        column_name: &str,
        index: usize,
    ) {
        let Some(transfer) = event.data_transfer.as_mut() else {
            return;
        };
        transfer.effect_allowed = DropEffect::Move;
        transfer.set_data("text/plain", format!("column:{column_name}"));
        self.begin_column_drag(tree, column_name, index, column_el);
    }

    pub(super) fn handle_column_drag_over(
        &mut self,
        tree: &mut dyn BoardTree,
        event: &mut DragEvent,
        column_el: ElementId,
        column_name: &str,
    ) {
        let DragState::DraggingColumn(drag) = &self.state else {
            return;
        };
        if drag.column_name == column_name {
            return;
        }
        event.prevent_default();
        event.stop_propagation();
        event.set_drop_effect(DropEffect::Move);

        let rect = tree.bounding_rect(column_el);
        let is_left = event.client.x < rect.center().x;
        self.show_column_drop_indicator(tree, column_el, is_left);
        tree.add_class(column_el, &self.classes.drag_over);
    }

    pub(super) fn handle_column_drop(
        &mut self,
        tree: &mut dyn BoardTree,
        host: &mut dyn BoardHost,
        event: &mut DragEvent,
        column_el: ElementId,
        target_column: &str,
    ) {
        event.prevent_default();
        event.stop_propagation();

        let DragState::DraggingColumn(drag) = &self.state else {
            return;
        };
        if drag.column_name == target_column {
            return;
        }
        let source = drag.column_name.clone();

        let order = host.column_names();
        let rect = tree.bounding_rect(column_el);
        let is_left = event.client.x < rect.center().x;
        match reorder_columns(&order, &source, target_column, is_left) {
            Some(new_order) => {
                self.apply_mutation(host, BoardMutation::ReorderColumns { new_order });
            }
            None => debug!(
                source = %source,
                target = target_column,
                ?order,
                "column drop ignored; stale column order"
            ),
        }
        self.end_drag(tree);
    }
}
