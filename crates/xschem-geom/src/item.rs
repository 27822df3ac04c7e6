//! Shared geometry-item scaffolding reused by both symbol definitions and
//! the per-sheet free-form geometry layers.
//!
//! Every drawable geometry primitive (line, rect, arc, polygon) carries the
//! same three pieces of bookkeeping -- which layer it lives on, whether it
//! is currently selected, and a free-form attribute string -- so that
//! bookkeeping is factored into `ItemMeta` and embedded by value rather
//! than repeated per variant.

use crate::{Arc, Point, Polygon, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct ItemMeta {
    pub layer: u8,
    pub selected: bool,
    pub attr: String,
}

impl ItemMeta {
    pub fn new(layer: u8) -> Self {
        Self {
            layer,
            selected: false,
            attr: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub meta: ItemMeta,
    pub p1: Point,
    pub p2: Point,
}

impl LineItem {
    pub fn new(layer: u8, p1: Point, p2: Point) -> Self {
        Self {
            meta: ItemMeta::new(layer),
            p1,
            p2,
        }
    }

    pub fn bbox(&self) -> Rect {
        Rect::from_point(self.p1).union(&Rect::from_point(self.p2))
    }
}

/// Rect flag bits, derived from the attribute string (see
/// `xschem_symbols::attr::derive_rect_flags`) and cached here.
pub mod rect_flags {
    pub const GRAPH: u16 = 1 << 0;
    pub const UNLOCKED_GRAPH: u16 = 1 << 1;
    pub const EMBEDDED_IMAGE: u16 = 1 << 10;
    pub const IMAGE_UNSCALED: u16 = 1 << 11;
}

/// A raster surface embedded in a rect (spec §3: bit10 of the rect flags).
/// Owned uniquely by its rect; dropped along with it.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub width: u32,
    pub height: u32,
    /// Base64-decoded pixel data, opaque to this crate.
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectItem {
    pub meta: ItemMeta,
    pub rect: Rect,
    pub flags: u16,
    pub image: Option<EmbeddedImage>,
}

impl RectItem {
    pub fn new(layer: u8, rect: Rect) -> Self {
        Self {
            meta: ItemMeta::new(layer),
            rect,
            flags: 0,
            image: None,
        }
    }

    pub fn bbox(&self) -> Rect {
        self.rect.normalized()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcItem {
    pub meta: ItemMeta,
    pub arc: Arc,
}

impl ArcItem {
    pub fn new(layer: u8, arc: Arc) -> Self {
        Self {
            meta: ItemMeta::new(layer),
            arc,
        }
    }

    pub fn bbox(&self) -> Rect {
        let c = self.arc.center;
        let r = self.arc.radius;
        Rect::new(c.x - r, c.y - r, c.x + r, c.y + r)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonItem {
    pub meta: ItemMeta,
    pub polygon: Polygon,
}

impl PolygonItem {
    pub fn new(layer: u8, polygon: Polygon) -> Self {
        Self {
            meta: ItemMeta::new(layer),
            polygon,
        }
    }

    pub fn bbox(&self) -> Option<Rect> {
        self.polygon.bbox()
    }
}
