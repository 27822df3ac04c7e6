//! Full-document-snapshot undo/redo stack (spec §4.10), grounded directly
//! on `core-state::UndoEngine`: a bounded `Vec` of
//! snapshots for undo and one for redo, a content-hash dedupe guard so an
//! operation that leaves the document byte-identical doesn't grow the
//! stack, and a "batch" mode so a compound gesture (label-attach across
//! many pins, §4.6) pushes exactly one snapshot at its outer call instead
//! of one per pin.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::sheet::Sheet;

/// Maximum number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 200;

#[derive(Clone)]
struct Snapshot {
    sheet: Sheet,
    hash: u64,
}

/// Whether a batched gesture is in progress; while active, `push_snapshot`
/// is a no-op after the first call, mirroring `InsertRun::Active`'s
/// coalescing of a run of keystrokes into one undo
/// step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Batch {
    Inactive,
    Active,
}

pub struct UndoEngine {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    batch: Batch,
    snapshots_skipped: u64,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoEngine {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            batch: Batch::Inactive,
            snapshots_skipped: 0,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn snapshots_skipped(&self) -> u64 {
        self.snapshots_skipped
    }

    /// Pushes a snapshot of `sheet` before a mutation, unless its content
    /// hash is identical to the last pushed snapshot (a true no-op, e.g.
    /// a placement cancelled back to its start) or a batch is already
    /// open. Clears the redo stack, since a fresh edit invalidates it.
    pub fn push_snapshot(&mut self, sheet: &Sheet) {
        if self.batch == Batch::Active {
            return;
        }
        self.push_snapshot_unconditionally(sheet);
    }

    fn push_snapshot_unconditionally(&mut self, sheet: &Sheet) {
        let hash = content_hash(sheet);
        if let Some(last) = self.undo_stack.last()
            && last.hash == hash
        {
            self.snapshots_skipped += 1;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), hash, "snapshot_dedupe_skip");
            return;
        }
        self.undo_stack.push(Snapshot {
            sheet: sheet.clone(),
            hash,
        });
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), hash, "push_snapshot");
        if self.undo_stack.len() > UNDO_HISTORY_MAX {
            self.undo_stack.remove(0);
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
        self.redo_stack.clear();
    }

    /// Opens a batch: the first `push_snapshot` call in it is recorded,
    /// every subsequent one until `end_batch` is suppressed.
    pub fn begin_batch(&mut self, sheet: &Sheet) {
        if self.batch == Batch::Inactive {
            self.push_snapshot_unconditionally(sheet);
            self.batch = Batch::Active;
        }
    }

    pub fn end_batch(&mut self) {
        self.batch = Batch::Inactive;
    }

    /// Restores the previous snapshot into `sheet`, pushing the current
    /// state onto the redo stack. Returns `false` if there's nothing to
    /// undo.
    pub fn undo(&mut self, sheet: &mut Sheet) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        let current_hash = content_hash(sheet);
        self.redo_stack.push(Snapshot {
            sheet: sheet.clone(),
            hash: current_hash,
        });
        *sheet = previous.sheet;
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo");
        true
    }

    /// Restores the next redo snapshot into `sheet`, pushing the current
    /// state back onto the undo stack. Returns `false` if there's nothing
    /// to redo.
    pub fn redo(&mut self, sheet: &mut Sheet) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current_hash = content_hash(sheet);
        self.undo_stack.push(Snapshot {
            sheet: sheet.clone(),
            hash: current_hash,
        });
        *sheet = next.sheet;
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "redo");
        true
    }
}

/// Content hash of a sheet's user-visible state, used only for the
/// no-op-edit dedupe above. Deliberately excludes purely-derived caches
/// (floater_cache, prep_hash_* freshness bits) so rebuilding a cache
/// never looks like an edit. Floats are hashed via `to_bits` since `f64`
/// has no `Hash` impl.
fn content_hash(sheet: &Sheet) -> u64 {
    let mut h = DefaultHasher::new();
    hash_f64(&mut h, sheet.wires.len() as f64);
    for wire in &sheet.wires {
        hash_f64(&mut h, wire.p1.x);
        hash_f64(&mut h, wire.p1.y);
        hash_f64(&mut h, wire.p2.x);
        hash_f64(&mut h, wire.p2.y);
        wire.is_bus.hash(&mut h);
        wire.selected.hash(&mut h);
        wire.attr.hash(&mut h);
    }
    for inst in &sheet.instances {
        inst.symbol_index.hash(&mut h);
        inst.name.hash(&mut h);
        inst.instance_name.hash(&mut h);
        hash_f64(&mut h, inst.position.x);
        hash_f64(&mut h, inst.position.y);
        inst.rotation.hash(&mut h);
        inst.flip.hash(&mut h);
        inst.selected.hash(&mut h);
        inst.attr.hash(&mut h);
        for net in &inst.pin_nets {
            net.hash(&mut h);
        }
    }
    for text in &sheet.texts {
        text.text.hash(&mut h);
        hash_f64(&mut h, text.x);
        hash_f64(&mut h, text.y);
        text.selected.hash(&mut h);
        text.attr.hash(&mut h);
    }
    for layer in &sheet.layers {
        for l in &layer.lines {
            hash_f64(&mut h, l.p1.x);
            hash_f64(&mut h, l.p1.y);
            hash_f64(&mut h, l.p2.x);
            hash_f64(&mut h, l.p2.y);
            l.meta.attr.hash(&mut h);
        }
        for r in &layer.rects {
            hash_f64(&mut h, r.rect.x1);
            hash_f64(&mut h, r.rect.y1);
            hash_f64(&mut h, r.rect.x2);
            hash_f64(&mut h, r.rect.y2);
            r.meta.attr.hash(&mut h);
        }
        for a in &layer.arcs {
            hash_f64(&mut h, a.arc.center.x);
            hash_f64(&mut h, a.arc.center.y);
            hash_f64(&mut h, a.arc.radius);
            hash_f64(&mut h, a.arc.start_deg);
            hash_f64(&mut h, a.arc.sweep_deg);
        }
        for p in &layer.polygons {
            (p.polygon.len() as u64).hash(&mut h);
        }
    }
    sheet.spice_attr.hash(&mut h);
    sheet.vhdl_attr.hash(&mut h);
    sheet.verilog_attr.hash(&mut h);
    sheet.tedax_attr.hash(&mut h);
    h.finish()
}

fn hash_f64(h: &mut impl Hasher, value: f64) {
    value.to_bits().hash(h);
}

#[cfg(test)]
mod tests {
    use super::*;
    use xschem_geom::Point;

    #[test]
    fn undo_restores_prior_wire_count() {
        let mut engine = UndoEngine::new();
        let mut sheet = Sheet::new(8);
        engine.push_snapshot(&sheet);
        sheet.wires.push(crate::wire::Wire::new(Point::origin(), Point::new(1.0, 0.0)));
        assert_eq!(sheet.wires.len(), 1);
        assert!(engine.undo(&mut sheet));
        assert_eq!(sheet.wires.len(), 0);
    }

    #[test]
    fn redo_replays_the_undone_mutation() {
        let mut engine = UndoEngine::new();
        let mut sheet = Sheet::new(8);
        engine.push_snapshot(&sheet);
        sheet.wires.push(crate::wire::Wire::new(Point::origin(), Point::new(1.0, 0.0)));
        engine.undo(&mut sheet);
        assert!(engine.redo(&mut sheet));
        assert_eq!(sheet.wires.len(), 1);
    }

    #[test]
    fn identical_consecutive_snapshots_are_deduped() {
        let mut engine = UndoEngine::new();
        let sheet = Sheet::new(8);
        engine.push_snapshot(&sheet);
        engine.push_snapshot(&sheet);
        assert_eq!(engine.undo_depth(), 1);
        assert_eq!(engine.snapshots_skipped(), 1);
    }

    #[test]
    fn new_edit_clears_redo_stack() {
        let mut engine = UndoEngine::new();
        let mut sheet = Sheet::new(8);
        engine.push_snapshot(&sheet);
        sheet.wires.push(crate::wire::Wire::new(Point::origin(), Point::new(1.0, 0.0)));
        engine.undo(&mut sheet);
        assert_eq!(engine.redo_depth(), 1);
        engine.push_snapshot(&sheet);
        sheet.wires.push(crate::wire::Wire::new(Point::origin(), Point::new(2.0, 0.0)));
        assert_eq!(engine.redo_depth(), 0);
    }

    #[test]
    fn batch_coalesces_multiple_pushes_into_one_snapshot() {
        let mut engine = UndoEngine::new();
        let mut sheet = Sheet::new(8);
        engine.begin_batch(&sheet);
        for i in 0..5 {
            sheet.wires.push(crate::wire::Wire::new(Point::origin(), Point::new(i as f64, 0.0)));
            engine.push_snapshot(&sheet);
        }
        engine.end_batch();
        assert_eq!(engine.undo_depth(), 1);
        assert!(engine.undo(&mut sheet));
        assert_eq!(sheet.wires.len(), 0);
    }

    #[test]
    fn history_is_bounded_at_undo_history_max() {
        let mut engine = UndoEngine::new();
        let mut sheet = Sheet::new(8);
        for i in 0..(UNDO_HISTORY_MAX + 10) {
            engine.push_snapshot(&sheet);
            sheet.wires.push(crate::wire::Wire::new(Point::origin(), Point::new(i as f64, 0.0)));
        }
        assert_eq!(engine.undo_depth(), UNDO_HISTORY_MAX);
    }
}
