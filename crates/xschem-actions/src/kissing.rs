//! Kissing-pin auto-wire (spec §4.5), grounded on
//! `actions.c::connect_by_kissing`: for every pin of a selected instance,
//! a degenerate (zero-length) wire is dropped at the pin's world point
//! when another *unselected* instance pin or wire meets it there, giving
//! the net a connection point the netlister will pick up. A selected
//! wire incident at the point suppresses the connection -- the user is
//! presumably about to move or delete it.

use xschem_geom::{Orientation, Point, rotate_flip};
use xschem_spatial::SpatialIndex;
use xschem_state::{Sheet, Wire};

/// Every point at which a kissing connection should be made, across the
/// currently selected instances.
pub fn find_kissing_points(sheet: &Sheet, spatial: &SpatialIndex, pin_layer: u8) -> Vec<Point> {
    let mut points = Vec::new();
    for (inst_idx, inst) in sheet.instances.iter().enumerate() {
        if !inst.selected {
            continue;
        }
        let Some(symbol) = inst.resolve(&sheet.symbols) else {
            continue;
        };
        let orientation = Orientation::new(inst.rotation, inst.flip);
        for pin in symbol.pins(pin_layer) {
            let local = pin.rect.center();
            let world = rotate_flip(orientation, Point::origin(), local, inst.position);

            let mut kissing = false;
            for pin_ref in spatial.pins_at_point(world) {
                if pin_ref.instance == inst_idx {
                    continue;
                }
                if !sheet.instances[pin_ref.instance].selected {
                    kissing = true;
                    break;
                }
            }
            for wire_idx in spatial.wires_at_point(sheet, world) {
                let wire = &sheet.wires[wire_idx];
                if wire.selected {
                    kissing = false;
                    break;
                } else if !wire.is_own_endpoint(world) {
                    kissing = true;
                    break;
                }
            }
            if kissing {
                points.push(world);
            }
        }
    }
    points
}

/// Inserts a degenerate wire at every kissing point found for the
/// currently selected instances. Returns whether anything changed, the
/// signal callers use to decide whether to push an undo snapshot.
pub fn connect_by_kissing(sheet: &mut Sheet, spatial: &SpatialIndex, pin_layer: u8) -> bool {
    let points = find_kissing_points(sheet, spatial, pin_layer);
    for p in &points {
        sheet.wires.push(Wire::new(*p, *p));
    }
    !points.is_empty()
}
