//! The uniform-grid spatial index (spec §4.4): buckets the plane into
//! square cells of side `BUCKET = k*snap` and chains wires/instance pins
//! through each bucket they overlap, giving O(1)-expected neighborhood
//! queries for hit-testing, kissing-pin detection, and windowed
//! selection.
//!
//! The index is derived state -- `xschem-state::Sheet` owns the
//! `prep_hash_*` freshness bits this crate's [`SpatialIndex::rebuild_if_stale`]
//! consults and clears, per spec §3/§4.4 ("rebuild is lazy: the index is
//! recomputed at the next query after a clear").

mod grid;

use ahash::AHashMap;
use tracing::trace;
use xschem_geom::Point;
use xschem_state::Sheet;
use xschem_symbols::Symbol;

pub use grid::BucketCoord;
use grid::{bucket_of, buckets_overlapping};

/// A symbol pin resolved to its world-space position for one instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinRef {
    pub instance: usize,
    pub pin: usize,
    pub world: Point,
}

#[derive(Debug, Clone, Default)]
struct Bucket {
    wires: Vec<usize>,
    pins: Vec<PinRef>,
}

pub struct SpatialIndex {
    bucket_side: f64,
    pin_layer: u8,
    buckets: AHashMap<BucketCoord, Bucket>,
    fresh: bool,
}

impl SpatialIndex {
    pub fn new(bucket_side: f64, pin_layer: u8) -> Self {
        Self {
            bucket_side,
            pin_layer,
            buckets: AHashMap::default(),
            fresh: false,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn mark_stale(&mut self) {
        self.fresh = false;
    }

    /// Full rebuild: every wire is inserted into every bucket its
    /// segment overlaps; every pin's world position is inserted into its
    /// owning bucket (spec §4.4).
    pub fn rebuild(&mut self, sheet: &Sheet) {
        self.buckets.clear();
        for (idx, wire) in sheet.wires.iter().enumerate() {
            self.insert_wire_bbox(idx, wire.bbox());
        }
        for (inst_idx, inst) in sheet.instances.iter().enumerate() {
            let Some(symbol) = inst.resolve(&sheet.symbols) else {
                continue;
            };
            self.insert_instance_pins(inst_idx, inst, symbol);
        }
        self.fresh = true;
        trace!(target: "spatial", buckets = self.buckets.len(), "rebuild");
    }

    /// Rebuilds only if `sheet`'s freshness bits say the index is stale,
    /// matching spec §4.4's lazy-rebuild-on-next-query contract.
    pub fn rebuild_if_stale(&mut self, sheet: &Sheet) {
        if !self.fresh || !sheet.prep_hash_wires || !sheet.prep_hash_inst {
            self.rebuild(sheet);
        }
    }

    fn insert_wire_bbox(&mut self, idx: usize, bbox: xschem_geom::Rect) {
        for coord in buckets_overlapping(&bbox, self.bucket_side) {
            self.buckets.entry(coord).or_default().wires.push(idx);
        }
    }

    fn insert_instance_pins(&mut self, inst_idx: usize, inst: &xschem_state::Instance, symbol: &Symbol) {
        for (pin_idx, pin) in symbol.pins(self.pin_layer).enumerate() {
            let local = pin.rect.center();
            let orientation = xschem_geom::Orientation::new(inst.rotation, inst.flip);
            let world = xschem_geom::rotate_flip(orientation, Point::origin(), local, inst.position);
            let coord = bucket_of(world, self.bucket_side);
            self.buckets.entry(coord).or_default().pins.push(PinRef {
                instance: inst_idx,
                pin: pin_idx,
                world,
            });
        }
    }

    /// Incremental insertion of a single freshly-appended wire (spec
    /// §4.4 `XINSERT`), avoiding a full rebuild.
    pub fn insert_new_wire(&mut self, idx: usize, p1: Point, p2: Point) {
        let b = xschem_geom::Rect::from_point(p1).union(&xschem_geom::Rect::from_point(p2));
        self.insert_wire_bbox(idx, b);
    }

    /// Every wire index whose segment touches `p` exactly (spec §4.4
    /// query (b)).
    pub fn wires_at_point(&self, sheet: &Sheet, p: Point) -> Vec<usize> {
        let coord = bucket_of(p, self.bucket_side);
        let Some(bucket) = self.buckets.get(&coord) else {
            return Vec::new();
        };
        bucket
            .wires
            .iter()
            .copied()
            .filter(|&idx| sheet.wires[idx].touches_point(p))
            .collect()
    }

    /// Every instance pin at exactly `p` (spec §4.4 query (a)).
    pub fn pins_at_point(&self, p: Point) -> Vec<PinRef> {
        let coord = bucket_of(p, self.bucket_side);
        let Some(bucket) = self.buckets.get(&coord) else {
            return Vec::new();
        };
        bucket.pins.iter().copied().filter(|pin| pin.world == p).collect()
    }

    /// Wire indices whose bucket-span overlaps the window `rect` (spec
    /// §4.4 query (c), wire half); a precise segment/rect intersection
    /// test is left to the caller since windowed selection also needs
    /// each wire's own bbox for the final filter.
    pub fn wires_in_window(&self, rect: &xschem_geom::Rect) -> Vec<usize> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for coord in buckets_overlapping(rect, self.bucket_side) {
            if let Some(bucket) = self.buckets.get(&coord) {
                for &idx in &bucket.wires {
                    if seen.insert(idx) {
                        out.push(idx);
                    }
                }
            }
        }
        out
    }

    /// Instance indices with at least one pin in the window (spec §4.4
    /// query (c), instance half).
    pub fn instances_in_window(&self, rect: &xschem_geom::Rect) -> Vec<usize> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for coord in buckets_overlapping(rect, self.bucket_side) {
            if let Some(bucket) = self.buckets.get(&coord) {
                for pin in &bucket.pins {
                    if seen.insert(pin.instance) {
                        out.push(pin.instance);
                    }
                }
            }
        }
        out
    }
}
