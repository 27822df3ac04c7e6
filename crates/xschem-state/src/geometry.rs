//! The tagged union of free-form geometry a sheet can hold per layer.

use xschem_geom::{ArcItem, LineItem, PolygonItem, Rect, RectItem};

use crate::text::TextItem;

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryItem {
    Line(LineItem),
    Rect(RectItem),
    Arc(ArcItem),
    Polygon(PolygonItem),
    Text(TextItem),
}

impl GeometryItem {
    pub fn layer(&self) -> u8 {
        match self {
            GeometryItem::Line(l) => l.meta.layer,
            GeometryItem::Rect(r) => r.meta.layer,
            GeometryItem::Arc(a) => a.meta.layer,
            GeometryItem::Polygon(p) => p.meta.layer,
            GeometryItem::Text(t) => t.layer,
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            GeometryItem::Line(l) => l.meta.selected,
            GeometryItem::Rect(r) => r.meta.selected,
            GeometryItem::Arc(a) => a.meta.selected,
            GeometryItem::Polygon(p) => p.meta.selected,
            GeometryItem::Text(t) => t.selected,
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        match self {
            GeometryItem::Line(l) => l.meta.selected = selected,
            GeometryItem::Rect(r) => r.meta.selected = selected,
            GeometryItem::Arc(a) => a.meta.selected = selected,
            GeometryItem::Polygon(p) => p.meta.selected = selected,
            GeometryItem::Text(t) => t.selected = selected,
        }
    }

    pub fn bbox(&self) -> Option<Rect> {
        match self {
            GeometryItem::Line(l) => Some(l.bbox()),
            GeometryItem::Rect(r) => Some(r.bbox()),
            GeometryItem::Arc(a) => Some(a.bbox()),
            GeometryItem::Polygon(p) => p.bbox(),
            GeometryItem::Text(t) => Some(Rect::from_point(xschem_geom::Point::new(t.x, t.y))),
        }
    }
}
