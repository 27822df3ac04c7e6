//! The current schematic document: one [`Sheet`] is current per editor
//! window (spec §3).

use xschem_geom::{ArcItem, LineItem, PolygonItem, Rect, RectItem, union_all};
use xschem_symbols::SymbolCache;

use crate::instance::Instance;
use crate::text::TextItem;
use crate::wire::Wire;

/// Free-form (non-text) geometry kept on one layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    pub lines: Vec<LineItem>,
    pub rects: Vec<RectItem>,
    pub arcs: Vec<ArcItem>,
    pub polygons: Vec<PolygonItem>,
}

impl Layer {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.arcs.is_empty() && self.polygons.is_empty()
    }

    pub fn bbox(&self) -> Option<Rect> {
        let line_boxes = self.lines.iter().map(LineItem::bbox).collect::<Vec<_>>();
        let rect_boxes = self.rects.iter().map(RectItem::bbox).collect::<Vec<_>>();
        let arc_boxes = self.arcs.iter().map(ArcItem::bbox).collect::<Vec<_>>();
        let poly_boxes = self.polygons.iter().filter_map(PolygonItem::bbox).collect::<Vec<_>>();
        let all: Vec<Rect> = line_boxes
            .into_iter()
            .chain(rect_boxes)
            .chain(arc_boxes)
            .chain(poly_boxes)
            .collect();
        union_all(&all)
    }
}

/// The current schematic document (spec calls this "Sheet (Document)").
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub wires: Vec<Wire>,
    pub instances: Vec<Instance>,
    pub texts: Vec<TextItem>,
    /// Free geometry, indexed by layer number (0..RESERVED_LAYERS are the
    /// built-in wire/pin/text layers, user layers follow).
    pub layers: Vec<Layer>,
    pub symbols: SymbolCache,
    pub spice_attr: String,
    pub vhdl_attr: String,
    pub verilog_attr: String,
    pub tedax_attr: String,
    /// Whether the document has unsaved changes.
    pub modified: bool,
    /// Freshness bits for derived state (spec §3/§4.4): `true` means the
    /// corresponding index still matches the document; clearing is always
    /// safe and forces a lazy rebuild at the next query.
    pub prep_hash_inst: bool,
    pub prep_hash_wires: bool,
    pub prep_net_structs: bool,
    pub prep_hi_structs: bool,
}

impl Sheet {
    pub fn new(layer_count: u8) -> Self {
        Self {
            layers: vec![Layer::default(); layer_count as usize],
            ..Default::default()
        }
    }

    pub fn layer(&self, layer: u8) -> Option<&Layer> {
        self.layers.get(layer as usize)
    }

    pub fn layer_mut(&mut self, layer: u8) -> Option<&mut Layer> {
        self.layers.get_mut(layer as usize)
    }

    /// Bounding box of everything on the sheet, or `None` if it's empty.
    pub fn bbox(&self) -> Option<Rect> {
        let mut boxes: Vec<Rect> = Vec::new();
        boxes.extend(self.wires.iter().map(Wire::bbox));
        boxes.extend(self.instances.iter().map(|i| i.bbox));
        boxes.extend(
            self.texts
                .iter()
                .map(|t| Rect::from_point(xschem_geom::Point::new(t.x, t.y))),
        );
        boxes.extend(self.layers.iter().filter_map(Layer::bbox));
        union_all(&boxes)
    }

    /// Bounding box restricted to selected items, used by zoom-to-fit's
    /// "over selection only" mode (spec §4.11).
    pub fn selection_bbox(&self) -> Option<Rect> {
        let mut boxes: Vec<Rect> = Vec::new();
        boxes.extend(self.wires.iter().filter(|w| w.selected).map(Wire::bbox));
        boxes.extend(self.instances.iter().filter(|i| i.selected).map(|i| i.bbox));
        union_all(&boxes)
    }

    /// Marks every item's (and the sheet's own) derived state stale, and
    /// clears every floater's cache -- the effect spec §8 names as
    /// `set_modify(1)`. Spec's testable invariant: "after `set_modify(1)`,
    /// all floater caches are null."
    pub fn set_modify(&mut self, value: bool) {
        self.modified = value;
        if value {
            self.prep_hash_inst = false;
            self.prep_hash_wires = false;
            self.prep_net_structs = false;
            self.prep_hi_structs = false;
            for text in &mut self.texts {
                text.invalidate_floater_cache();
            }
        }
    }

    /// Removes symbol `index` from the cache by shift-compaction and
    /// relinks every instance's `symbol_index` so references stay valid
    /// (spec §4.1: "callers must either clear all instances first or
    /// relink them" -- this performs the relink).
    pub fn remove_symbol_and_relink(&mut self, index: usize) {
        self.symbols.remove_symbol(index);
        for inst in &mut self.instances {
            match inst.symbol_index {
                Some(i) if i == index => inst.symbol_index = None,
                Some(i) if i > index => inst.symbol_index = Some(i - 1),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xschem_geom::Point;

    #[test]
    fn new_sheet_has_requested_layer_count() {
        let sheet = Sheet::new(23);
        assert_eq!(sheet.layers.len(), 23);
    }

    #[test]
    fn bbox_unions_wires_instances_and_texts() {
        let mut sheet = Sheet::new(8);
        sheet.wires.push(Wire::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        sheet.texts.push(TextItem::new("x", -5.0, 2.0, 2));
        let b = sheet.bbox().unwrap();
        assert_eq!(b.x1, -5.0);
        assert_eq!(b.x2, 10.0);
    }

    #[test]
    fn set_modify_true_clears_floater_caches() {
        let mut sheet = Sheet::new(8);
        let mut text = TextItem::new("@name", 0.0, 0.0, 2);
        text.flags.insert(crate::text::TextFlags::FLOATER);
        text.floater_cache = Some("R1".to_string());
        sheet.texts.push(text);
        sheet.set_modify(true);
        assert!(sheet.texts[0].floater_cache.is_none());
    }

    #[test]
    fn remove_symbol_relinks_instance_indices_above_removed() {
        let mut sheet = Sheet::new(8);
        sheet.symbols.push(xschem_symbols::Symbol::new("a"));
        sheet.symbols.push(xschem_symbols::Symbol::new("b"));
        sheet.symbols.push(xschem_symbols::Symbol::new("c"));
        let mut inst_b = Instance::new("U1", Point::origin());
        inst_b.symbol_index = Some(1);
        let mut inst_c = Instance::new("U2", Point::origin());
        inst_c.symbol_index = Some(2);
        sheet.instances.push(inst_b);
        sheet.instances.push(inst_c);

        sheet.remove_symbol_and_relink(0);
        assert_eq!(sheet.instances[0].symbol_index, Some(0));
        assert_eq!(sheet.instances[1].symbol_index, Some(1));
    }

    #[test]
    fn remove_symbol_clears_references_to_the_removed_entry() {
        let mut sheet = Sheet::new(8);
        sheet.symbols.push(xschem_symbols::Symbol::new("a"));
        let mut inst = Instance::new("U1", Point::origin());
        inst.symbol_index = Some(0);
        sheet.instances.push(inst);
        sheet.remove_symbol_and_relink(0);
        assert_eq!(sheet.instances[0].symbol_index, None);
    }
}
