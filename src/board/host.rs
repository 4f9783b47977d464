use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::drag_drop::{BoardHost, EntryFile, HostError, NoticeTone};

/// One record on the in-memory board.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryEntry {
    pub file: EntryFile,
    pub properties: BTreeMap<String, String>,
}

/// A callback received from the coordinator, in arrival order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HostCall {
    ColumnReorder {
        new_order: Vec<String>,
    },
    CardMoveToColumn {
        file: String,
        new_value: String,
    },
    CardReorder {
        file: String,
        target_column: String,
        target_index: usize,
        /// Sort value written for the entry.
        sort_value: String,
    },
    Notice {
        message: String,
        tone: String,
    },
}

/// Board data model held in memory.
///
/// Column membership comes from the grouping property; entries without a value
/// land in the no-value column. Within a column, entries are ordered by the
/// numeric sort property, falling back to insertion order.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    columns: Vec<String>,
    entries: Vec<MemoryEntry>,
    group_by: Option<String>,
    sort_by: Option<String>,
    no_value_column: String,
    calls: Vec<HostCall>,
}

impl MemoryHost {
    pub fn new(columns: Vec<String>, no_value_column: impl Into<String>) -> Self {
        Self {
            columns,
            entries: Vec::new(),
            group_by: None,
            sort_by: None,
            no_value_column: no_value_column.into(),
            calls: Vec::new(),
        }
    }

    pub fn with_group_by(mut self, property: Option<String>) -> Self {
        self.group_by = property;
        self
    }

    pub fn with_sort_by(mut self, property: Option<String>) -> Self {
        self.sort_by = property;
        self
    }

    pub fn add_entry<I, K, V>(&mut self, path: &str, properties: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.push(MemoryEntry {
            file: EntryFile::new(path),
            properties: properties
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        });
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn entry(&self, path: &str) -> Option<&MemoryEntry> {
        self.entries.iter().find(|entry| entry.file.path == path)
    }

    pub fn property(&self, path: &str, property: &str) -> Option<&str> {
        self.entry(path)
            .and_then(|entry| entry.properties.get(property))
            .map(String::as_str)
    }

    /// Callbacks and notices received so far.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn notices(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Notice { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Column an entry currently belongs to.
    pub fn column_of<'a>(&'a self, entry: &'a MemoryEntry) -> &'a str {
        self.group_by
            .as_ref()
            .and_then(|property| entry.properties.get(property))
            .filter(|value| !value.is_empty())
            .map(String::as_str)
            .unwrap_or(self.no_value_column.as_str())
    }

    /// Entries of `column` in display order.
    pub fn column_entries(&self, column: &str) -> Vec<&MemoryEntry> {
        let mut entries: Vec<(usize, &MemoryEntry)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| self.column_of(entry) == column)
            .collect();
        entries.sort_by(|(a_idx, a), (b_idx, b)| {
            let a_key = self.sort_value(a);
            let b_key = self.sort_value(b);
            match (a_key, b_key) {
                (Some(a_key), Some(b_key)) => a_key.total_cmp(&b_key),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
            .then(a_idx.cmp(b_idx))
        });
        entries.into_iter().map(|(_, entry)| entry).collect()
    }

    fn sort_value(&self, entry: &MemoryEntry) -> Option<f64> {
        let property = self.sort_by.as_ref()?;
        entry.properties.get(property)?.trim().parse().ok()
    }

    fn entry_mut(&mut self, file: &EntryFile) -> Result<&mut MemoryEntry, HostError> {
        self.entries
            .iter_mut()
            .find(|entry| &entry.file == file)
            .ok_or_else(|| HostError::EntryNotFound(file.clone()))
    }

    /// Sort value placing an entry at `index` among `neighbours`.
    fn sort_value_between(&self, neighbours: &[&MemoryEntry], index: usize) -> f64 {
        let index = index.min(neighbours.len());
        let before = index
            .checked_sub(1)
            .and_then(|i| neighbours.get(i))
            .and_then(|entry| self.sort_value(entry));
        let after = neighbours.get(index).and_then(|entry| self.sort_value(entry));
        match (before, after) {
            (Some(before), Some(after)) => (before + after) / 2.0,
            (Some(before), None) => before + 1.0,
            (None, Some(after)) => after - 1.0,
            (None, None) => index as f64,
        }
    }
}

fn format_sort_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

impl BoardHost for MemoryHost {
    fn column_names(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn group_by_property(&self) -> Option<String> {
        self.group_by.clone()
    }

    fn sort_property(&self) -> Option<String> {
        self.sort_by.clone()
    }

    fn on_column_reorder(&mut self, new_order: Vec<String>) -> Result<(), HostError> {
        info!(?new_order, "columns reordered");
        self.calls.push(HostCall::ColumnReorder {
            new_order: new_order.clone(),
        });
        self.columns = new_order;
        Ok(())
    }

    fn on_card_move_to_column(
        &mut self,
        file: &EntryFile,
        new_value: &str,
    ) -> Result<(), HostError> {
        self.calls.push(HostCall::CardMoveToColumn {
            file: file.path.clone(),
            new_value: new_value.to_string(),
        });
        let property = self
            .group_by
            .clone()
            .ok_or_else(|| HostError::Rejected("no groupBy property configured".into()))?;
        let entry = self.entry_mut(file)?;
        if new_value.is_empty() {
            entry.properties.remove(&property);
        } else {
            entry.properties.insert(property, new_value.to_string());
        }
        info!(%file, value = new_value, "entry moved to column");
        Ok(())
    }

    fn on_card_reorder(
        &mut self,
        file: &EntryFile,
        target_column: &str,
        target_index: usize,
    ) -> Result<(), HostError> {
        let property = self
            .sort_by
            .clone()
            .ok_or_else(|| HostError::Rejected("no sort property configured".into()))?;
        if !self.columns.iter().any(|column| column == target_column) {
            return Err(HostError::ColumnNotFound(target_column.to_string()));
        }
        let neighbours: Vec<&MemoryEntry> = self
            .column_entries(target_column)
            .into_iter()
            .filter(|entry| &entry.file != file)
            .collect();
        let sort_value = format_sort_value(self.sort_value_between(&neighbours, target_index));
        debug!(%file, column = target_column, target_index, %sort_value, "computed sort value");

        self.calls.push(HostCall::CardReorder {
            file: file.path.clone(),
            target_column: target_column.to_string(),
            target_index,
            sort_value: sort_value.clone(),
        });
        self.entry_mut(file)?.properties.insert(property, sort_value);
        Ok(())
    }

    fn notify(&mut self, message: &str, tone: NoticeTone) {
        info!(?tone, "notice: {message}");
        self.calls.push(HostCall::Notice {
            message: message.to_string(),
            tone: format!("{tone:?}").to_lowercase(),
        });
    }
}
