//! The document model: the current sheet (instances, wires, text, free
//! geometry per layer, the symbol cache) and its undo/redo snapshot
//! stack.
//!
//! This crate owns *storage and invariants*, not behavior: placement,
//! hit-testing, and rendering live in `xschem-actions`, `xschem-spatial`,
//! and `xschem-render` respectively, all building on the types here.

pub mod geometry;
pub mod instance;
pub mod sheet;
pub mod text;
pub mod undo;
pub mod wire;

pub use geometry::GeometryItem;
pub use instance::{Instance, InstanceFlags};
pub use sheet::{Layer, Sheet};
pub use text::{TextFlags, TextItem};
pub use undo::{UNDO_HISTORY_MAX, UndoEngine};
pub use wire::Wire;
