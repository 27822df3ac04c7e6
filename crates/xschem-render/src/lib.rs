//! Rendering support: the dirty-rectangle accumulator, the selection
//! set, the viewport pan/zoom transform, and the sheet-to-`Renderer`
//! draw dispatch (spec §4.8/§4.11).
//!
//! This crate holds no backend of its own -- it only knows how to turn a
//! `Sheet` and a `Viewport` into calls against `xschem_io::Renderer`,
//! leaving the actual pixels to whatever implements that trait.

pub mod bbox;
pub mod draw;
pub mod selection;
pub mod viewport;

pub use bbox::BboxController;
pub use draw::draw_sheet;
pub use selection::{Selected, SelectedKind, rebuild_selected_array};
pub use viewport::Viewport;
