//! In-memory board host: data model, element tree and grid layout.
//!
//! Used by the replay tool and by tests to drive the coordinator without a
//! real renderer.

mod host;
mod layout;
mod tree;

pub use host::{HostCall, MemoryEntry, MemoryHost};
pub use layout::{BoardLayout, RenderedBoard, RenderedColumn};
pub use tree::MemoryTree;
