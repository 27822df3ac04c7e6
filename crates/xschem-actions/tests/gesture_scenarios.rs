//! End-to-end scenarios over `Interactor`: a sequence of `Command`s and
//! pointer phases against a fresh `Sheet`, asserting on the resulting
//! document rather than on any one FSM in isolation.

use pretty_assertions::assert_eq;

use xschem_actions::{Interactor, LayerConfig, Manhattan, RotationMode};
use xschem_events::Phase;
use xschem_geom::{Point, Rect, RectItem};
use xschem_io::NoopRenderer;
use xschem_render::BboxController;
use xschem_spatial::SpatialIndex;
use xschem_state::{Instance, Sheet, UndoEngine};

fn layers() -> LayerConfig {
    LayerConfig { wire: 0, line: 2, rect: 2, arc: 3, polygon: 4, pin: 1 }
}

fn place_wire(it: &mut Interactor, sheet: &mut Sheet, spatial: &mut SpatialIndex, undo: &mut UndoEngine, from: Point, to: Point) {
    let mut bbox = BboxController::new();
    let mut r = NoopRenderer;
    assert!(it.start(xschem_keymap::Command::StartWire));
    it.handle_phase(sheet, spatial, undo, &mut bbox, &mut r, from, Phase::Place);
    it.handle_phase(sheet, spatial, undo, &mut bbox, &mut r, to, Phase::Set);
}

#[test]
fn placing_two_wires_then_undoing_both_empties_the_sheet() {
    let mut it = Interactor::new(layers(), Manhattan::Direct);
    let mut sheet = Sheet::new(8);
    let mut spatial = SpatialIndex::new(20.0, 1);
    let mut undo = UndoEngine::new();

    place_wire(&mut it, &mut sheet, &mut spatial, &mut undo, Point::origin(), Point::new(10.0, 0.0));
    place_wire(&mut it, &mut sheet, &mut spatial, &mut undo, Point::new(10.0, 0.0), Point::new(10.0, 10.0));
    assert_eq!(sheet.wires.len(), 2);

    assert!(undo.undo(&mut sheet));
    assert_eq!(sheet.wires.len(), 1);
    assert!(undo.undo(&mut sheet));
    assert_eq!(sheet.wires.len(), 0);
}

#[test]
fn escape_mid_wire_discards_the_rubber_band_and_leaves_the_sheet_untouched() {
    let mut it = Interactor::new(layers(), Manhattan::Direct);
    let mut sheet = Sheet::new(8);
    let mut spatial = SpatialIndex::new(20.0, 1);
    let mut undo = UndoEngine::new();
    let mut bbox = BboxController::new();
    let mut r = NoopRenderer;

    it.start(xschem_keymap::Command::StartWire);
    it.handle_phase(&mut sheet, &mut spatial, &mut undo, &mut bbox, &mut r, Point::origin(), Phase::Place);
    it.handle_phase(&mut sheet, &mut spatial, &mut undo, &mut bbox, &mut r, Point::new(5.0, 5.0), Phase::Rubber);
    it.handle_phase(&mut sheet, &mut spatial, &mut undo, &mut bbox, &mut r, Point::origin(), Phase::Clear);

    assert!(sheet.wires.is_empty());
    assert_eq!(undo.undo_depth(), 0);
    assert!(it.start(xschem_keymap::Command::StartRect), "ending the cleared gesture frees the interactor for a new one");
}

#[test]
fn kissing_two_coincident_pins_connects_them_as_one_undo_step() {
    let it = Interactor::new(layers(), Manhattan::Direct);
    let mut sheet = Sheet::new(8);
    let sym_idx = {
        let mut s = xschem_symbols::Symbol::new("pin1");
        s.rects.push(RectItem::new(1, Rect::new(0.0, 0.0, 0.0, 0.0)));
        sheet.symbols.push(s)
    };

    let mut a = Instance::new("U1", Point::new(20.0, 20.0));
    a.symbol_index = Some(sym_idx);
    a.selected = true;
    sheet.instances.push(a);
    let mut b = Instance::new("U2", Point::new(20.0, 20.0));
    b.symbol_index = Some(sym_idx);
    sheet.instances.push(b);

    let mut spatial = SpatialIndex::new(20.0, 1);
    spatial.rebuild(&sheet);
    let mut undo = UndoEngine::new();

    let changed = it.connect_by_kissing(&mut sheet, &spatial, &mut undo);
    assert!(changed);
    assert_eq!(undo.undo_depth(), 1);
    assert!(undo.undo(&mut sheet));
    assert_eq!(sheet.wires.len(), 0);
}

#[test]
fn attaching_labels_to_a_subcircuit_instance_places_one_label_per_unconnected_pin() {
    let it = Interactor::new(layers(), Manhattan::Direct);
    let mut sheet = Sheet::new(8);
    let label_sym = sheet.symbols.push(xschem_symbols::Symbol::new("lab_pin"));
    let subckt_sym = {
        let mut s = xschem_symbols::Symbol::new("inv");
        s.sym_type = Some("subcircuit".to_string());
        let mut pin_a = RectItem::new(1, Rect::new(-10.0, 0.0, -10.0, 0.0));
        pin_a.meta.attr = "name=a dir=in".to_string();
        s.rects.push(pin_a);
        let mut pin_y = RectItem::new(1, Rect::new(10.0, 0.0, 10.0, 0.0));
        pin_y.meta.attr = "name=y dir=out".to_string();
        s.rects.push(pin_y);
        sheet.symbols.push(s)
    };

    let mut inst = Instance::new("x1", Point::origin());
    inst.symbol_index = Some(subckt_sym);
    inst.selected = true;
    sheet.instances.push(inst);

    let mut spatial = SpatialIndex::new(20.0, 1);
    spatial.rebuild(&sheet);
    let mut undo = UndoEngine::new();

    let n = it.attach_labels(&mut sheet, &spatial, &mut undo, label_sym, RotationMode::Auto, None);
    assert_eq!(n, 2);
    assert_eq!(sheet.instances.len(), 3);
    assert_eq!(undo.undo_depth(), 1);
}
