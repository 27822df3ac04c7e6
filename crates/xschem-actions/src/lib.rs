//! The interaction state machine (spec §4.7): wire/line/rect/arc/polygon
//! placement FSMs and Manhattan routing, plus the two batch-mutation
//! gestures that read the spatial index rather than clicking through an
//! FSM -- kissing-pin auto-wire (§4.5) and label-attachment (§4.6).

pub mod interactor;
pub mod kissing;
pub mod label;
pub mod manhattan;
pub mod shape_fsm;
pub mod wire_fsm;

pub use interactor::{Interactor, LayerConfig};
pub use kissing::{connect_by_kissing, find_kissing_points};
pub use label::{LabelPlacement, RotationMode, compute_label_placements};
pub use manhattan::{Manhattan, route};
pub use shape_fsm::{ArcPlacement, LinePlacement, PolygonPlacement, RectPlacement};
pub use wire_fsm::WirePlacement;
