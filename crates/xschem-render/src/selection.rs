//! The selection set (spec §4.8): a packed array of `(kind, index,
//! layer)` tuples rebuilt on demand from each object's own `sel` flag,
//! rather than maintained incrementally -- the source's
//! `rebuild_selected_array`, kept as a pull rather than a push so every
//! direct flag mutation (rubber-band select, click-toggle, "select all")
//! stays a single-field write with no separate bookkeeping to forget.

use xschem_state::Sheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedKind {
    Wire,
    Instance,
    Text,
    Geometry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selected {
    pub kind: SelectedKind,
    pub index: usize,
    pub layer: u8,
}

/// Rebuilds the selection set by scanning every selectable collection's
/// `sel`/`selected` flag. Geometry layers are walked in layer order so
/// the result's ordering is stable and reproducible across rebuilds.
pub fn rebuild_selected_array(sheet: &Sheet) -> Vec<Selected> {
    let mut out = Vec::new();
    for (i, w) in sheet.wires.iter().enumerate() {
        if w.selected {
            out.push(Selected {
                kind: SelectedKind::Wire,
                index: i,
                layer: 0,
            });
        }
    }
    for (i, inst) in sheet.instances.iter().enumerate() {
        if inst.selected {
            out.push(Selected {
                kind: SelectedKind::Instance,
                index: i,
                layer: 0,
            });
        }
    }
    for (i, t) in sheet.texts.iter().enumerate() {
        if t.selected {
            out.push(Selected {
                kind: SelectedKind::Text,
                index: i,
                layer: t.layer,
            });
        }
    }
    for (layer_num, layer) in sheet.layers.iter().enumerate() {
        for (i, l) in layer.lines.iter().enumerate() {
            if l.meta.selected {
                out.push(Selected {
                    kind: SelectedKind::Geometry,
                    index: i,
                    layer: layer_num as u8,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use xschem_geom::Point;
    use xschem_state::{Instance, Wire};

    #[test]
    fn rebuild_collects_only_selected_items() {
        let mut sheet = Sheet::new(8);
        let mut w = Wire::new(Point::origin(), Point::new(1.0, 0.0));
        w.selected = true;
        sheet.wires.push(w);
        sheet.wires.push(Wire::new(Point::origin(), Point::new(2.0, 0.0)));
        let mut inst = Instance::new("U1", Point::origin());
        inst.selected = true;
        sheet.instances.push(inst);

        let sel = rebuild_selected_array(&sheet);
        assert_eq!(sel.len(), 2);
        assert_eq!(sel[0].kind, SelectedKind::Wire);
        assert_eq!(sel[0].index, 0);
        assert_eq!(sel[1].kind, SelectedKind::Instance);
    }

    #[test]
    fn rebuild_on_empty_sheet_is_empty() {
        let sheet = Sheet::new(8);
        assert!(rebuild_selected_array(&sheet).is_empty());
    }
}
