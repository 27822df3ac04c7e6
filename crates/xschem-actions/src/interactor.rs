//! Ties the placement FSMs, the reentrancy guard, and the batch-mutation
//! helpers (kissing-pin, label-attach) together behind one dispatcher
//! driven by [`xschem_keymap::Command`], following spec §4.7/§4.8's
//! ordering contract: mutate, then invalidate derived indices, then
//! compute the dirty bbox, then repaint; and its cancellation contract:
//! `Phase::Clear` never touches the Document, only the in-progress
//! rubber-band state.

use xschem_events::{Event, GestureKind, Phase, ReentrancyGuard, UiState};
use xschem_geom::Point;
use xschem_io::Renderer;
use xschem_keymap::Command;
use xschem_render::BboxController;
use xschem_spatial::SpatialIndex;
use xschem_state::{Instance, Sheet, UndoEngine};

use crate::kissing;
use crate::label::{self, RotationMode};
use crate::manhattan::Manhattan;
use crate::shape_fsm::{ArcPlacement, LinePlacement, PolygonPlacement, RectPlacement};
use crate::wire_fsm::WirePlacement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveGesture {
    None,
    Wire,
    Line,
    Rect,
    Arc,
    Polygon,
}

/// Per-layer routing for the five placement primitives; callers supply
/// these once at construction, matching the document's fixed wire/line/
/// rect/arc/polygon layer assignment.
#[derive(Debug, Clone, Copy)]
pub struct LayerConfig {
    pub wire: u8,
    pub line: u8,
    pub rect: u8,
    pub arc: u8,
    pub polygon: u8,
    pub pin: u8,
}

pub struct Interactor {
    ui_state: UiState,
    guard: ReentrancyGuard,
    active: ActiveGesture,
    wire: WirePlacement,
    line: LinePlacement,
    rect: RectPlacement,
    arc: ArcPlacement,
    polygon: PolygonPlacement,
    layers: LayerConfig,
    force_full_circle: bool,
}

impl Interactor {
    pub fn new(layers: LayerConfig, manhattan: Manhattan) -> Self {
        Self {
            ui_state: UiState::empty(),
            guard: ReentrancyGuard::new(),
            active: ActiveGesture::None,
            wire: WirePlacement::new(manhattan, layers.wire),
            line: LinePlacement::new(),
            rect: RectPlacement::new(),
            arc: ArcPlacement::new(),
            polygon: PolygonPlacement::new(),
            layers,
            force_full_circle: false,
        }
    }

    pub fn ui_state(&self) -> UiState {
        self.ui_state
    }

    pub fn set_force_full_circle(&mut self, force: bool) {
        self.force_full_circle = force;
    }

    /// Attempts to begin a placement gesture. Rejected (returns `false`,
    /// `ui_state`/guard untouched) if a different placement is already in
    /// flight -- these five gestures are mutually exclusive in this
    /// engine, a stricter rule than the bitmask's bit-per-gesture
    /// independence, which only forbids re-entering the *same* kind.
    pub fn start(&mut self, command: Command) -> bool {
        let (gesture, kind, bit) = match command {
            Command::StartWire => (ActiveGesture::Wire, GestureKind::Wire, UiState::STARTWIRE),
            Command::StartLine => (ActiveGesture::Line, GestureKind::Line, UiState::STARTLINE),
            Command::StartRect => (ActiveGesture::Rect, GestureKind::Rect, UiState::STARTRECT),
            Command::StartArc => (ActiveGesture::Arc, GestureKind::Arc, UiState::STARTARC),
            Command::StartPolygon => (ActiveGesture::Polygon, GestureKind::Polygon, UiState::STARTPOLYGON),
            _ => return false,
        };
        if self.active != ActiveGesture::None {
            return false;
        }
        if !self.guard.try_start(kind) {
            return false;
        }
        self.active = gesture;
        self.ui_state.insert(bit);
        true
    }

    /// Routes a `Place`/`Rubber`/`Set`/`Clear` phase to whichever
    /// placement is active. Returns whether a document mutation
    /// committed. A no-op (returns `false`) if nothing is active.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_phase(
        &mut self,
        sheet: &mut Sheet,
        spatial: &mut SpatialIndex,
        undo: &mut UndoEngine,
        bbox: &mut BboxController,
        renderer: &mut dyn Renderer,
        point: Point,
        phase: Phase,
    ) -> bool {
        let committed = match self.active {
            ActiveGesture::None => false,
            ActiveGesture::Wire => self.wire.handle(sheet, spatial, undo, bbox, renderer, point, phase),
            ActiveGesture::Line => self.line.handle(sheet, undo, bbox, renderer, self.layers.line, point, phase),
            ActiveGesture::Rect => self.rect.handle(sheet, undo, bbox, renderer, self.layers.rect, point, phase),
            ActiveGesture::Arc => self.arc.handle(
                sheet,
                undo,
                bbox,
                renderer,
                self.layers.arc,
                point,
                phase,
                self.force_full_circle,
            ),
            ActiveGesture::Polygon => {
                self.polygon.handle(sheet, undo, bbox, renderer, self.layers.polygon, point, phase)
            }
        };

        if matches!(phase, Phase::Set | Phase::Clear) && !self.is_armed() {
            self.end_active();
        }
        committed
    }

    /// Dispatches one top-level event. Convenience wrapper over
    /// `start`/`handle_phase` for callers driving a plain event queue.
    #[allow(clippy::too_many_arguments)]
    pub fn dispatch(
        &mut self,
        event: Event,
        sheet: &mut Sheet,
        spatial: &mut SpatialIndex,
        undo: &mut UndoEngine,
        bbox: &mut BboxController,
        renderer: &mut dyn Renderer,
    ) -> bool {
        match event {
            Event::Pointer(p, phase) => {
                self.handle_phase(sheet, spatial, undo, bbox, renderer, Point::new(p.snapped_x, p.snapped_y), phase)
            }
            Event::KeyEscape => self.handle_phase(sheet, spatial, undo, bbox, renderer, Point::origin(), Phase::Clear),
            Event::Tick => false,
        }
    }

    fn is_armed(&self) -> bool {
        match self.active {
            ActiveGesture::None => false,
            ActiveGesture::Wire => self.wire.is_armed(),
            ActiveGesture::Line => self.line.is_armed(),
            ActiveGesture::Rect => self.rect.is_armed(),
            ActiveGesture::Arc => self.arc.is_armed(),
            ActiveGesture::Polygon => self.polygon.is_armed(),
        }
    }

    fn end_active(&mut self) {
        let (kind, bit) = match self.active {
            ActiveGesture::None => return,
            ActiveGesture::Wire => (GestureKind::Wire, UiState::STARTWIRE),
            ActiveGesture::Line => (GestureKind::Line, UiState::STARTLINE),
            ActiveGesture::Rect => (GestureKind::Rect, UiState::STARTRECT),
            ActiveGesture::Arc => (GestureKind::Arc, UiState::STARTARC),
            ActiveGesture::Polygon => (GestureKind::Polygon, UiState::STARTPOLYGON),
        };
        self.guard.end(kind);
        self.ui_state.remove(bit);
        self.active = ActiveGesture::None;
    }

    /// Connects kissing pins across the selected instances as one undo
    /// transaction (spec §4.5: "all insertions within one call are a
    /// single undo transaction").
    pub fn connect_by_kissing(&self, sheet: &mut Sheet, spatial: &SpatialIndex, undo: &mut UndoEngine) -> bool {
        undo.begin_batch(sheet);
        let changed = kissing::connect_by_kissing(sheet, spatial, self.layers.pin);
        undo.end_batch();
        if changed {
            sheet.set_modify(true);
        }
        changed
    }

    /// Places a label instance (of `label_symbol_index`) at every
    /// unconnected pin of the selected instances, as one undo transaction
    /// (spec §4.6's "first call ... begins ... the last call ends it").
    pub fn attach_labels(
        &self,
        sheet: &mut Sheet,
        spatial: &SpatialIndex,
        undo: &mut UndoEngine,
        label_symbol_index: usize,
        mode: RotationMode,
        label_prefix: Option<&str>,
    ) -> usize {
        let placements = label::compute_label_placements(sheet, spatial, self.layers.pin, mode, label_prefix);
        if placements.is_empty() {
            return 0;
        }
        undo.begin_batch(sheet);
        for p in &placements {
            let mut inst = Instance::new(p.pin_name.clone(), p.position);
            inst.symbol_index = Some(label_symbol_index);
            inst.rotation = p.rotation;
            inst.flip = p.dir_out;
            inst.attr = p.label_text.clone();
            inst.selected = true;
            sheet.instances.push(inst);
        }
        undo.end_batch();
        sheet.set_modify(true);
        placements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xschem_io::NoopRenderer;

    fn layers() -> LayerConfig {
        LayerConfig { wire: 0, line: 2, rect: 2, arc: 3, polygon: 4, pin: 1 }
    }

    #[test]
    fn starting_wire_sets_the_bit_and_blocks_a_second_start() {
        let mut it = Interactor::new(layers(), Manhattan::Direct);
        assert!(it.start(Command::StartWire));
        assert!(it.ui_state().contains(UiState::STARTWIRE));
        assert!(!it.start(Command::StartWire));
        assert!(!it.start(Command::StartRect));
    }

    #[test]
    fn completing_a_wire_chain_clears_the_bit_and_allows_a_new_gesture() {
        let mut it = Interactor::new(layers(), Manhattan::Direct);
        let mut sheet = Sheet::new(8);
        let mut spatial = SpatialIndex::new(20.0, 1);
        let mut undo = UndoEngine::new();
        let mut bbox = BboxController::new();
        let mut r = NoopRenderer;

        it.start(Command::StartWire);
        it.handle_phase(&mut sheet, &mut spatial, &mut undo, &mut bbox, &mut r, Point::origin(), Phase::Place);
        let committed = it.handle_phase(
            &mut sheet,
            &mut spatial,
            &mut undo,
            &mut bbox,
            &mut r,
            Point::new(5.0, 0.0),
            Phase::Set,
        );
        assert!(committed);
        assert!(!it.ui_state().contains(UiState::STARTWIRE));
        assert!(it.start(Command::StartRect));
    }

    #[test]
    fn escape_cancels_without_mutating_the_document() {
        let mut it = Interactor::new(layers(), Manhattan::Direct);
        let mut sheet = Sheet::new(8);
        let mut spatial = SpatialIndex::new(20.0, 1);
        let mut undo = UndoEngine::new();
        let mut bbox = BboxController::new();
        let mut r = NoopRenderer;

        it.start(Command::StartWire);
        it.handle_phase(&mut sheet, &mut spatial, &mut undo, &mut bbox, &mut r, Point::origin(), Phase::Place);
        it.dispatch(Event::KeyEscape, &mut sheet, &mut spatial, &mut undo, &mut bbox, &mut r);
        assert!(sheet.wires.is_empty());
        assert!(!it.ui_state().contains(UiState::STARTWIRE));
    }

    #[test]
    fn connect_by_kissing_pushes_a_single_undo_snapshot() {
        let it = Interactor::new(layers(), Manhattan::Direct);
        let mut sheet = Sheet::new(8);
        let sym_idx = {
            let mut s = xschem_symbols::Symbol::new("pin1");
            s.rects.push(xschem_geom::RectItem::new(1, xschem_geom::Rect::new(0.0, 0.0, 0.0, 0.0)));
            sheet.symbols.push(s)
        };
        let mut a = Instance::new("U1", Point::new(10.0, 10.0));
        a.symbol_index = Some(sym_idx);
        a.selected = true;
        sheet.instances.push(a);
        let b = {
            let mut b = Instance::new("U2", Point::new(10.0, 10.0));
            b.symbol_index = Some(sym_idx);
            b
        };
        sheet.instances.push(b);

        let mut spatial = SpatialIndex::new(20.0, 1);
        spatial.rebuild(&sheet);
        let mut undo = UndoEngine::new();
        let changed = it.connect_by_kissing(&mut sheet, &spatial, &mut undo);
        assert!(changed);
        assert_eq!(undo.undo_depth(), 1);
    }
}
