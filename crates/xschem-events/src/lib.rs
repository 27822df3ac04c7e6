//! Event types and the modal interaction-mode bitmask shared across the
//! editing engine.
//!
//! `UiState` is the `ui_state` bitmask from the interaction state machine
//! (spec §4.7): each placement mode owns one independent bit so a rubber-
//! band zoom can be nested while a wire is mid-placement. `ReentrancyGuard`
//! is the semaphore from spec §5 that rejects a nested start of the same
//! FSM (e.g. rubber-band select triggered while already rubber-band
//! selecting).

use bitflags::bitflags;

pub mod gesture;
pub use gesture::ReentrancyGuard;

bitflags! {
    /// Independent modal-placement bits. More than one may be set at once
    /// (e.g. STARTZOOM nested inside STARTWIRE).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct UiState: u32 {
        const STARTWIRE    = 1 << 0;
        const STARTLINE    = 1 << 1;
        const STARTRECT    = 1 << 2;
        const STARTARC     = 1 << 3;
        const STARTPOLYGON = 1 << 4;
        const STARTSELECT  = 1 << 5;
        const STARTZOOM    = 1 << 6;
        const STARTSYMPIN  = 1 << 7;
        const SELECTION    = 1 << 8;
    }
}

/// The phase of a single modal-placement input, driving each FSM forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Commit the first or next vertex/endpoint.
    Place,
    /// Cursor moved while a primitive is being placed; redraw the rubber.
    Rubber,
    /// Finish the current primitive (explicit SET/END keypress).
    Set,
    /// Cancel the in-progress primitive, discarding rubber-band state.
    Clear,
}

/// A point in device-independent world coordinates, paired with the
/// snapped (grid-aligned) coordinates the placement FSMs actually act on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub world_x: f64,
    pub world_y: f64,
    pub snapped_x: f64,
    pub snapped_y: f64,
}

/// Top-level input event consumed by the interaction dispatcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Pointer(PointerEvent, Phase),
    KeyEscape,
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_independent() {
        let mut s = UiState::empty();
        s.insert(UiState::STARTWIRE);
        s.insert(UiState::STARTZOOM);
        assert!(s.contains(UiState::STARTWIRE));
        assert!(s.contains(UiState::STARTZOOM));
        assert!(!s.contains(UiState::STARTLINE));
    }

    #[test]
    fn clearing_one_bit_preserves_others() {
        let mut s = UiState::STARTWIRE | UiState::SELECTION;
        s.remove(UiState::STARTWIRE);
        assert_eq!(s, UiState::SELECTION);
    }
}
