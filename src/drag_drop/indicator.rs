//! The shared drop indicator.
//!
//! One indicator element exists per board. Hover handlers move it under the
//! hovered target and update its geometry instead of creating new elements;
//! leaving a target only hides it.

use tracing::trace;

use super::DragDropManager;
use super::tree::{BoardTree, ElementId};

/// Which kind of drop the indicator currently previews.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorOrientation {
    /// Vertical bar between columns.
    Column,
    /// Horizontal bar between cards.
    Card,
}

/// Size of one indicator axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Extent {
    /// Left to the renderer's stylesheet.
    Auto,
    Px(f32),
    /// Fill the parent, leaving `inset` on both sides.
    Fill { inset: f32 },
}

/// Geometry and placement of the drop indicator, relative to its parent.
#[derive(Clone, Debug, PartialEq)]
pub struct DropIndicator {
    element: ElementId,
    orientation: Option<IndicatorOrientation>,
    visible: bool,
    parent: Option<ElementId>,
    left: f32,
    top: f32,
    width: Extent,
    height: Extent,
}

impl DropIndicator {
    fn new(element: ElementId) -> Self {
        Self {
            element,
            orientation: None,
            visible: false,
            parent: None,
            left: 0.0,
            top: 0.0,
            width: Extent::Auto,
            height: Extent::Auto,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn orientation(&self) -> Option<IndicatorOrientation> {
        self.orientation
    }

    /// Element the indicator was last appended to.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn width(&self) -> Extent {
        self.width
    }

    pub fn height(&self) -> Extent {
        self.height
    }
}

impl DragDropManager {
    pub(super) fn create_drop_indicator(&mut self, tree: &mut dyn BoardTree) {
        if let Some(existing) = self.indicator.take() {
            tree.remove_element(existing.element);
        }
        let element = tree.create_element(&self.classes.drop_indicator);
        self.indicator = Some(DropIndicator::new(element));
    }

    pub(super) fn show_column_drop_indicator(
        &mut self,
        tree: &mut dyn BoardTree,
        column_el: ElementId,
        is_left: bool,
    ) {
        let Some(board) = self.board else {
            return;
        };
        let inset = self.settings.indicator.column_inset;
        let rect = tree.bounding_rect(column_el);
        let board_rect = tree.bounding_rect(board);
        let edge = if is_left { rect.left() } else { rect.right() };
        self.place_indicator(
            tree,
            board,
            IndicatorOrientation::Column,
            edge - board_rect.left() - inset,
            rect.top() - board_rect.top(),
            Extent::Auto,
            Extent::Px(rect.height()),
        );
    }

    pub(super) fn show_card_drop_indicator(
        &mut self,
        tree: &mut dyn BoardTree,
        card_el: ElementId,
        is_above: bool,
    ) {
        let Some(parent) = tree.parent(card_el) else {
            return;
        };
        let inset = self.settings.indicator.card_inset;
        let rect = tree.bounding_rect(card_el);
        let parent_rect = tree.bounding_rect(parent);
        let top = if is_above {
            rect.top() - parent_rect.top() - inset
        } else {
            rect.bottom() - parent_rect.top()
        };
        self.place_indicator(
            tree,
            parent,
            IndicatorOrientation::Card,
            rect.left() - parent_rect.left(),
            top,
            Extent::Px(rect.width()),
            Extent::Auto,
        );
    }

    pub(super) fn show_card_drop_indicator_at_end(
        &mut self,
        tree: &mut dyn BoardTree,
        cards_el: ElementId,
    ) {
        let padding = self.settings.indicator.end_zone_padding;
        let inset = self.settings.indicator.card_inset;
        let rect = tree.bounding_rect(cards_el);
        let last_card = tree
            .children(cards_el)
            .into_iter()
            .rev()
            .find(|child| tree.has_class(*child, &self.classes.card));
        let top = match last_card {
            Some(card) => tree.bounding_rect(card).bottom() - rect.top() + inset,
            None => padding,
        };
        self.place_indicator(
            tree,
            cards_el,
            IndicatorOrientation::Card,
            padding,
            top,
            Extent::Fill { inset: padding },
            Extent::Auto,
        );
    }

    pub(super) fn hide_drop_indicator(&mut self) {
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.visible = false;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn place_indicator(
        &mut self,
        tree: &mut dyn BoardTree,
        parent: ElementId,
        orientation: IndicatorOrientation,
        left: f32,
        top: f32,
        width: Extent,
        height: Extent,
    ) {
        let Some(indicator) = self.indicator.as_mut() else {
            return;
        };
        let (add, remove) = match orientation {
            IndicatorOrientation::Column => (
                &self.classes.drop_indicator_column,
                &self.classes.drop_indicator_card,
            ),
            IndicatorOrientation::Card => (
                &self.classes.drop_indicator_card,
                &self.classes.drop_indicator_column,
            ),
        };
        tree.remove_class(indicator.element, remove);
        tree.add_class(indicator.element, add);
        indicator.orientation = Some(orientation);
        indicator.visible = true;
        indicator.left = left;
        indicator.top = top;
        indicator.width = width;
        indicator.height = height;
        tree.append_child(parent, indicator.element);
        indicator.parent = Some(parent);
        trace!(?orientation, ?parent, left, top, "drop indicator placed");
    }
}
