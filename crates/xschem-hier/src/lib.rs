//! The hierarchy navigator (spec §4.9) and the floater text cache (spec
//! §4.12): descending into a subcircuit instance, building its port map,
//! and resolving per-instance template-substituted annotation text.

pub mod error;
pub mod floater;
pub mod hierarchy;

pub use error::HierError;
pub use floater::{InstanceNameIndex, get_text_floater};
pub use hierarchy::{DescendResult, HierarchyFrame, HierarchyNavigator, ViewportSnapshot};
