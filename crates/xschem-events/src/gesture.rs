//! Reentrancy guard for modal input gestures (spec §5).
//!
//! The engine is single-threaded cooperative, so this is not a true
//! semaphore in the OS sense: it is a small set of in-flight gesture kinds
//! checked synchronously before a new FSM is allowed to start. Its only
//! job is to reject a nested start of the *same* gesture kind (e.g.
//! beginning a rubber-band select while one is already active) while
//! still allowing independent gestures (a nested rubber-band zoom during
//! wire placement) to proceed, matching `UiState`'s independent bits.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Wire,
    Line,
    Rect,
    Arc,
    Polygon,
    Select,
    Zoom,
    SymbolPin,
}

#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    active: HashSet<GestureKind>,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to start `kind`. Returns `true` if the gesture was not
    /// already active (and is now marked active); `false` if it was
    /// already in flight, in which case the caller must reject the start.
    pub fn try_start(&mut self, kind: GestureKind) -> bool {
        self.active.insert(kind)
    }

    pub fn end(&mut self, kind: GestureKind) {
        self.active.remove(&kind);
    }

    pub fn is_active(&self, kind: GestureKind) -> bool {
        self.active.contains(&kind)
    }
}
