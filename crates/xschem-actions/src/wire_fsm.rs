//! Wire placement (spec §4.7): idle -> armed -> commit, chaining back to
//! armed from the committed endpoint so a run of clicks lays a connected
//! path, until the gesture is explicitly finished or cancelled.

use xschem_events::Phase;
use xschem_geom::Point;
use xschem_io::Renderer;
use xschem_render::BboxController;
use xschem_spatial::SpatialIndex;
use xschem_state::{Sheet, UndoEngine, Wire};

use crate::manhattan::{self, Manhattan};

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Armed { start: Point },
}

pub struct WirePlacement {
    state: State,
    mode: Manhattan,
    wire_layer: u8,
}

impl WirePlacement {
    pub fn new(mode: Manhattan, wire_layer: u8) -> Self {
        Self { state: State::Idle, mode, wire_layer }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, State::Armed { .. })
    }

    /// Drives the FSM one step. Returns `true` if a commit happened
    /// (wires were appended to `sheet`).
    pub fn handle(
        &mut self,
        sheet: &mut Sheet,
        spatial: &mut SpatialIndex,
        undo: &mut UndoEngine,
        bbox: &mut BboxController,
        renderer: &mut dyn Renderer,
        point: Point,
        phase: Phase,
    ) -> bool {
        match phase {
            Phase::Place => match self.state {
                State::Idle => {
                    self.state = State::Armed { start: point };
                    bbox.start(xschem_geom::Rect::from_point(point));
                    false
                }
                State::Armed { start } => {
                    self.commit(sheet, spatial, undo, bbox, start, point);
                    self.state = State::Armed { start: point };
                    true
                }
            },
            Phase::Rubber => {
                if let State::Armed { start } = self.state {
                    for (p1, p2) in manhattan::route(start, point, self.mode) {
                        renderer.drawtemp_line(self.wire_layer, xschem_io::Phase::Add, p1, p2);
                    }
                }
                false
            }
            Phase::Set => {
                if let State::Armed { start } = self.state
                    && start != point
                {
                    self.commit(sheet, spatial, undo, bbox, start, point);
                    bbox.set();
                    self.state = State::Idle;
                    return true;
                }
                bbox.end();
                self.state = State::Idle;
                false
            }
            Phase::Clear => {
                bbox.end();
                self.state = State::Idle;
                false
            }
        }
    }

    fn commit(
        &self,
        sheet: &mut Sheet,
        spatial: &mut SpatialIndex,
        undo: &mut UndoEngine,
        bbox: &mut BboxController,
        start: Point,
        end: Point,
    ) {
        undo.push_snapshot(sheet);
        for (p1, p2) in manhattan::route(start, end, self.mode) {
            let idx = sheet.wires.len();
            sheet.wires.push(Wire::new(p1, p2));
            spatial.insert_new_wire(idx, p1, p2);
            bbox.add(xschem_geom::Rect::from_point(p1).union(&xschem_geom::Rect::from_point(p2)));
        }
        sheet.prep_net_structs = false;
        sheet.prep_hi_structs = false;
    }
}
