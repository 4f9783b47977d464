use egui::Pos2;

use super::tree::ElementId;

/// Native drag event types routed through the coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEventKind {
    DragStart,
    DragOver,
    DragLeave,
    Drop,
    DragEnd,
}

/// Operation advertised through the data transfer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropEffect {
    #[default]
    None,
    Move,
}

/// Payload carried by a native drag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataTransfer {
    pub effect_allowed: DropEffect,
    pub drop_effect: DropEffect,
    data: Option<(String, String)>,
}

impl DataTransfer {
    pub fn set_data(&mut self, format: &str, value: impl Into<String>) {
        self.data = Some((format.to_string(), value.into()));
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.data
            .as_ref()
            .filter(|(stored, _)| stored == format)
            .map(|(_, value)| value.as_str())
    }
}

/// A single drag event as delivered by the host platform.
///
/// `current_target` is filled in while the event bubbles through registered
/// elements. Handlers mark the event with [`DragEvent::prevent_default`] to
/// accept a drop and [`DragEvent::stop_propagation`] to keep ancestors from
/// seeing it.
#[derive(Clone, Debug)]
pub struct DragEvent {
    pub kind: DragEventKind,
    /// Innermost element under the pointer.
    pub target: ElementId,
    pub current_target: Option<ElementId>,
    /// For leave events, the element the pointer moved into.
    pub related_target: Option<ElementId>,
    /// Pointer position in client coordinates.
    pub client: Pos2,
    pub data_transfer: Option<DataTransfer>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DragEvent {
    pub fn new(kind: DragEventKind, target: ElementId, client: Pos2) -> Self {
        Self {
            kind,
            target,
            current_target: None,
            related_target: None,
            client,
            data_transfer: Some(DataTransfer::default()),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn with_related_target(mut self, related: Option<ElementId>) -> Self {
        self.related_target = related;
        self
    }

    pub fn without_data_transfer(mut self) -> Self {
        self.data_transfer = None;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// True when a handler accepted the drop (or otherwise claimed the
    /// default action).
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn set_drop_effect(&mut self, effect: DropEffect) {
        if let Some(transfer) = self.data_transfer.as_mut() {
            transfer.drop_effect = effect;
        }
    }
}
