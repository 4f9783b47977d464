
use egui::{Pos2, pos2};

use super::*;
use crate::board::{BoardLayout, HostCall, MemoryHost, MemoryTree, RenderedBoard};

/// A rendered in-memory board wired to a coordinator.
pub(super) struct Fixture {
    pub host: MemoryHost,
    pub tree: MemoryTree,
    pub manager: DragDropManager,
    pub board: RenderedBoard,
}

impl Fixture {
    /// Board with `columns`; each entry is `(path, column)` and gets a rank
    /// matching its position within the column.
    pub fn new(
        columns: &[&str],
        group_by: Option<&str>,
        sort_by: Option<&str>,
        entries: &[(&str, &str)],
    ) -> Self {
        let mut host = MemoryHost::new(
            columns.iter().map(|c| c.to_string()).collect(),
            "(No value)",
        )
        .with_group_by(group_by.map(str::to_string))
        .with_sort_by(sort_by.map(str::to_string));
        for (position, (path, column)) in entries.iter().enumerate() {
            let mut properties = vec![("rank".to_string(), position.to_string())];
            if let Some(group_by) = group_by
                && *column != "(No value)"
            {
                properties.push((group_by.to_string(), column.to_string()));
            }
            host.add_entry(path, properties);
        }
        let mut tree = MemoryTree::new();
        let mut manager = DragDropManager::default();
        let board = BoardLayout::default().render(&host, &mut tree, &mut manager);
        Self {
            host,
            tree,
            manager,
            board,
        }
    }

    /// Empty columns, for column reordering.
    pub fn columns(names: &[&str]) -> Self {
        Self::new(names, Some("status"), None, &[])
    }

    pub fn column(&self, name: &str) -> ElementId {
        self.board.column(name).expect("column rendered").element
    }

    pub fn header(&self, name: &str) -> ElementId {
        self.board.column(name).expect("column rendered").header
    }

    pub fn cards(&self, name: &str) -> ElementId {
        self.board.column(name).expect("column rendered").cards
    }

    pub fn card(&self, path: &str) -> ElementId {
        self.board.card(path).expect("card rendered")
    }

    /// Point at fractions `(fx, fy)` of the element's rectangle.
    pub fn point(&self, element: ElementId, fx: f32, fy: f32) -> Pos2 {
        let rect = self.tree.bounding_rect(element);
        pos2(
            rect.left() + rect.width() * fx,
            rect.top() + rect.height() * fy,
        )
    }

    pub fn send(&mut self, kind: DragEventKind, target: ElementId, client: Pos2) -> DragEvent {
        self.send_event(DragEvent::new(kind, target, client))
    }

    pub fn send_event(&mut self, mut event: DragEvent) -> DragEvent {
        self.manager
            .dispatch(&mut self.tree, &mut self.host, &mut event);
        event
    }

    pub fn start_column_drag(&mut self, name: &str) -> DragEvent {
        let header = self.header(name);
        let at = self.point(header, 0.5, 0.5);
        self.send(DragEventKind::DragStart, header, at)
    }

    pub fn start_card_drag(&mut self, path: &str) -> DragEvent {
        let card = self.card(path);
        let at = self.point(card, 0.5, 0.5);
        self.send(DragEventKind::DragStart, card, at)
    }

    /// Drag over then drop on `target` at the given fractions.
    pub fn drop_on(&mut self, target: ElementId, fx: f32, fy: f32) -> DragEvent {
        let at = self.point(target, fx, fy);
        let over = self.send(DragEventKind::DragOver, target, at);
        assert!(over.is_default_prevented(), "target should accept the drop");
        self.send(DragEventKind::Drop, target, at)
    }

    pub fn mutations(&self) -> Vec<&HostCall> {
        self.host
            .calls()
            .iter()
            .filter(|call| !matches!(call, HostCall::Notice { .. }))
            .collect()
    }

    /// Elements still carrying dragging, drag-over or drop-zone-active.
    pub fn lingering_markers(&self) -> usize {
        let classes = self.manager.classes();
        [&classes.dragging, &classes.drag_over, &classes.drop_zone_active]
            .into_iter()
            .map(|class| self.tree.elements_with_class(class).len())
            .sum()
    }

    pub fn indicator(&self) -> &DropIndicator {
        self.manager.indicator().expect("indicator created")
    }

    pub fn assert_clean(&self) {
        assert!(self.manager.state().is_idle(), "drag state should be idle");
        assert_eq!(self.lingering_markers(), 0, "no drag markers should remain");
        assert!(!self.indicator().is_visible(), "indicator should be hidden");
    }
}

/// Host whose mutation callbacks always fail.
#[derive(Default)]
pub(super) struct FailingHost {
    pub attempts: usize,
}

impl BoardHost for FailingHost {
    fn column_names(&self) -> Vec<String> {
        vec!["Todo".into(), "Done".into()]
    }

    fn group_by_property(&self) -> Option<String> {
        Some("status".into())
    }

    fn sort_property(&self) -> Option<String> {
        Some("rank".into())
    }

    fn on_column_reorder(&mut self, _new_order: Vec<String>) -> Result<(), HostError> {
        self.attempts += 1;
        Err(HostError::Rejected("vault is read-only".into()))
    }

    fn on_card_move_to_column(
        &mut self,
        file: &EntryFile,
        _new_value: &str,
    ) -> Result<(), HostError> {
        self.attempts += 1;
        Err(HostError::EntryNotFound(file.clone()))
    }

    fn on_card_reorder(
        &mut self,
        _file: &EntryFile,
        target_column: &str,
        _target_index: usize,
    ) -> Result<(), HostError> {
        self.attempts += 1;
        Err(HostError::ColumnNotFound(target_column.to_string()))
    }

    fn notify(&mut self, _message: &str, _tone: NoticeTone) {}
}
