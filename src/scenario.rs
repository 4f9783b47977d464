//! Scripted drag sessions replayed against the in-memory board.
//!
//! A scenario describes a board (columns, entries, grouping and sort
//! properties, optional layout overrides) and a list of native drag events
//! addressed by element path:
//!
//! - `board`
//! - `column:<name>`, `header:<name>`, `title:<name>`, `cards:<name>`
//! - `card:<entry path>`
//! - `indicator`
//!
//! Pointer positions come from explicit `x`/`y` values or from an anchor
//! inside the target's rectangle.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use egui::{Pos2, Rect, pos2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::board::{BoardLayout, HostCall, MemoryHost, MemoryTree, RenderedBoard};
use crate::drag_drop::{BoardTree, DragDropManager, DragEvent, DragEventKind, DragState, ElementId};
use crate::settings::KanbanSettings;

/// Errors raised while loading or replaying a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid scenario {origin}: {source}")]
    Parse {
        origin: String,
        source: toml::de::Error,
    },
    #[error("Event {index} ({kind:?}) needs a target")]
    MissingTarget { index: usize, kind: EventKind },
    #[error("Unknown element path {0:?}")]
    UnknownTarget(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    pub columns: Vec<String>,
    #[serde(default)]
    pub group_by: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub entries: Vec<ScenarioEntry>,
    #[serde(default)]
    pub layout: BoardLayout,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScenarioEntry {
    pub path: String,
    /// Property values; non-string TOML values are stored in their TOML form.
    #[serde(default)]
    pub properties: BTreeMap<String, toml::Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    DragStart,
    DragOver,
    DragLeave,
    Drop,
    DragEnd,
    /// Next animation frame; carries no target.
    AnimationFrame,
}

/// Pointer placement inside the target rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

impl Anchor {
    fn point_in(self, rect: Rect) -> Pos2 {
        let center = rect.center();
        match self {
            Anchor::Center => center,
            Anchor::Top => pos2(center.x, rect.top() + rect.height() * 0.25),
            Anchor::Bottom => pos2(center.x, rect.top() + rect.height() * 0.75),
            Anchor::Left => pos2(rect.left() + rect.width() * 0.25, center.y),
            Anchor::Right => pos2(rect.left() + rect.width() * 0.75, center.y),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScenarioEvent {
    pub kind: EventKind,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub at: Anchor,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    /// Element the pointer moved into, for leave events.
    #[serde(default)]
    pub related: Option<String>,
}

impl Scenario {
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ScenarioError> {
        toml::from_str(text).map_err(|source| ScenarioError::Parse {
            origin: origin.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    fn build_host(&self, settings: &KanbanSettings) -> MemoryHost {
        let mut host = MemoryHost::new(self.columns.clone(), settings.board.no_value_column.clone())
            .with_group_by(self.group_by.clone())
            .with_sort_by(self.sort_by.clone());
        for entry in &self.entries {
            host.add_entry(
                &entry.path,
                entry.properties.iter().map(|(key, value)| {
                    let value = match value {
                        toml::Value::String(text) => text.clone(),
                        other => other.to_string(),
                    };
                    (key.clone(), value)
                }),
            );
        }
        host
    }
}

/// Outcome of one replayed event.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub kind: EventKind,
    pub target: Option<String>,
    /// A handler accepted the event (drop allowed / drop handled).
    pub accepted: bool,
    /// Set when the event was not delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnReport {
    pub name: String,
    pub entries: Vec<String>,
}

/// Everything observable after a replay.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub calls: Vec<HostCall>,
    pub columns: Vec<ColumnReport>,
    pub idle: bool,
    pub indicator_visible: bool,
    /// Elements still carrying a drag marker after the last event.
    pub lingering_markers: usize,
}

/// Live replay session: the host, its element tree and the coordinator.
#[derive(Debug)]
pub struct Replay {
    host: MemoryHost,
    tree: MemoryTree,
    manager: DragDropManager,
    layout: BoardLayout,
    rendered: RenderedBoard,
    drop_allowed: bool,
}

impl Replay {
    pub fn new(scenario: &Scenario, settings: KanbanSettings) -> Self {
        let host = scenario.build_host(&settings);
        let mut tree = MemoryTree::new();
        let mut manager = DragDropManager::new(settings);
        let layout = scenario.layout.clone();
        let rendered = layout.render(&host, &mut tree, &mut manager);
        Self {
            host,
            tree,
            manager,
            layout,
            rendered,
            drop_allowed: false,
        }
    }

    /// Replay every event of `scenario` and summarize the result.
    pub fn run(scenario: &Scenario, settings: KanbanSettings) -> Result<ReplayReport, ScenarioError> {
        let mut replay = Self::new(scenario, settings);
        let mut steps = Vec::with_capacity(scenario.events.len());
        for (index, event) in scenario.events.iter().enumerate() {
            steps.push(replay.step(index, event)?);
        }
        info!(steps = steps.len(), calls = replay.host.calls().len(), "replay finished");
        Ok(replay.report(steps))
    }

    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    pub fn tree(&self) -> &MemoryTree {
        &self.tree
    }

    pub fn manager(&self) -> &DragDropManager {
        &self.manager
    }

    pub fn rendered(&self) -> &RenderedBoard {
        &self.rendered
    }

    pub fn step(&mut self, index: usize, event: &ScenarioEvent) -> Result<StepReport, ScenarioError> {
        let mut report = StepReport {
            index,
            kind: event.kind,
            target: event.target.clone(),
            accepted: false,
            skipped: None,
        };
        let kind = match event.kind {
            EventKind::AnimationFrame => {
                self.manager.on_animation_frame(&mut self.tree);
                return Ok(report);
            }
            EventKind::DragStart => DragEventKind::DragStart,
            EventKind::DragOver => DragEventKind::DragOver,
            EventKind::DragLeave => DragEventKind::DragLeave,
            EventKind::Drop => DragEventKind::Drop,
            EventKind::DragEnd => DragEventKind::DragEnd,
        };
        let path = event.target.as_deref().ok_or(ScenarioError::MissingTarget {
            index,
            kind: event.kind,
        })?;
        if kind == DragEventKind::Drop && !self.drop_allowed {
            report.skipped = Some("last dragover did not accept a drop".into());
            return Ok(report);
        }

        let target = self.resolve(path)?;
        let related = event
            .related
            .as_deref()
            .map(|path| self.resolve(path))
            .transpose()?;
        let anchor_point = event.at.point_in(self.tree.bounding_rect(target));
        let client = pos2(
            event.x.unwrap_or(anchor_point.x),
            event.y.unwrap_or(anchor_point.y),
        );

        let mutations_before = self.mutation_count();
        let mut drag_event = DragEvent::new(kind, target, client).with_related_target(related);
        self.manager
            .dispatch(&mut self.tree, &mut self.host, &mut drag_event);
        report.accepted = drag_event.is_default_prevented();

        match kind {
            DragEventKind::DragOver => self.drop_allowed = report.accepted,
            DragEventKind::DragStart | DragEventKind::Drop | DragEventKind::DragEnd => {
                self.drop_allowed = false
            }
            DragEventKind::DragLeave => {}
        }
        if self.mutation_count() != mutations_before {
            self.rerender();
        }
        debug!(index, ?kind, path, accepted = report.accepted, "replayed event");
        Ok(report)
    }

    fn mutation_count(&self) -> usize {
        self.host
            .calls()
            .iter()
            .filter(|call| !matches!(call, HostCall::Notice { .. }))
            .count()
    }

    /// Rebuild the board after the data changed, as a view would.
    fn rerender(&mut self) {
        self.manager.destroy(&mut self.tree);
        self.tree = MemoryTree::new();
        self.rendered = self.layout.render(&self.host, &mut self.tree, &mut self.manager);
    }

    fn resolve(&self, path: &str) -> Result<ElementId, ScenarioError> {
        let unknown = || ScenarioError::UnknownTarget(path.to_string());
        if path == "board" {
            return Ok(self.rendered.board);
        }
        if path == "indicator" {
            return self
                .manager
                .indicator()
                .map(|indicator| indicator.element())
                .ok_or_else(unknown);
        }
        let (kind, name) = path.split_once(':').ok_or_else(unknown)?;
        let column = || self.rendered.column(name).ok_or_else(unknown);
        match kind {
            "column" => Ok(column()?.element),
            "header" => Ok(column()?.header),
            "title" => self
                .tree
                .children(column()?.header)
                .first()
                .copied()
                .ok_or_else(unknown),
            "cards" => Ok(column()?.cards),
            "card" => self.rendered.card(name).ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }

    fn report(&self, steps: Vec<StepReport>) -> ReplayReport {
        let columns = self
            .host
            .columns()
            .iter()
            .map(|name| ColumnReport {
                name: name.clone(),
                entries: self
                    .host
                    .column_entries(name)
                    .into_iter()
                    .map(|entry| entry.file.path.clone())
                    .collect(),
            })
            .collect();
        let classes = self.manager.classes();
        let lingering_markers = [&classes.dragging, &classes.drag_over, &classes.drop_zone_active]
            .into_iter()
            .map(|class| self.tree.elements_with_class(class).len())
            .sum();
        ReplayReport {
            steps,
            calls: self.host.calls().to_vec(),
            columns,
            idle: matches!(self.manager.state(), DragState::Idle),
            indicator_visible: self
                .manager
                .indicator()
                .is_some_and(|indicator| indicator.is_visible()),
            lingering_markers,
        }
    }
}
