//! Translation of raw key/mouse tokens into the commands the interaction
//! state machine (spec §4.7, `xschem-actions`) consumes.
//!
//! Resolution is pure and deterministic: the same `(KeyToken, UiState)`
//! pair always yields the same `Command`, with no hidden timer or
//! history state, mirroring `core-keymap`'s resolution contract ("depends
//! only on buffer + context"). Unlike `core-keymap`'s multi-key trie,
//! every mapping here is a single token -- the editing engine's modal
//! gestures are driven by distinct keys/clicks rather than chorded
//! sequences -- so a flat match is the right amount of machinery; a trie
//! would be solving a problem this input model doesn't have.

use xschem_events::{Phase, UiState};

/// A raw input token before it's been interpreted against the active
/// `UiState`. Mouse clicks are modeled as a single `Click` token because
/// their left/middle/right distinction is already folded in by the
/// caller (the core doesn't need to know which physical button, only
/// "primary action" vs "cancel").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyToken {
    Char(char),
    Escape,
    Click,
    MouseMove,
    Return,
}

/// The command a translated token produces. `Phase` commands
/// (`Place`/`Rubber`/`Set`/`Clear`) are only meaningful while some
/// placement mode bit is already set in `UiState`; starting a new
/// gesture is a distinct command so the dispatcher can reject it via the
/// reentrancy guard before ever reaching a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartWire,
    StartLine,
    StartRect,
    StartArc,
    StartPolygon,
    StartSelect,
    StartZoom,
    StartSymPin,
    Phase(Phase),
    Undo,
    Redo,
    Descend,
    Ascend,
    Delete,
    ConnectByKissing,
    AttachLabels,
}

/// Translate one token. `active` is the current `UiState`: while any
/// placement-mode bit is set, a bare click is a `Phase::Place`/`Rubber`
/// commit rather than the start of a new gesture; `Escape` always maps to
/// `Phase::Clear` so a cancel reaches whichever gesture is live.
pub fn translate(token: KeyToken, active: UiState) -> Option<Command> {
    let any_placement_active = active.intersects(
        UiState::STARTWIRE
            | UiState::STARTLINE
            | UiState::STARTRECT
            | UiState::STARTARC
            | UiState::STARTPOLYGON
            | UiState::STARTSELECT
            | UiState::STARTZOOM,
    );

    match token {
        KeyToken::Escape => Some(Command::Phase(Phase::Clear)),
        KeyToken::Return if any_placement_active => Some(Command::Phase(Phase::Set)),
        KeyToken::Click if any_placement_active => Some(Command::Phase(Phase::Place)),
        KeyToken::MouseMove if any_placement_active => Some(Command::Phase(Phase::Rubber)),
        KeyToken::MouseMove => None,
        KeyToken::Click => None,
        KeyToken::Return => None,
        KeyToken::Char(c) => translate_char(c),
    }
}

fn translate_char(c: char) -> Option<Command> {
    match c {
        'w' => Some(Command::StartWire),
        'l' => Some(Command::StartLine),
        'r' => Some(Command::StartRect),
        'a' => Some(Command::StartArc),
        'g' => Some(Command::StartPolygon),
        'm' => Some(Command::StartSelect),
        'z' => Some(Command::StartZoom),
        'p' => Some(Command::StartSymPin),
        'u' => Some(Command::Undo),
        'U' => Some(Command::Redo),
        'e' => Some(Command::Descend),
        'i' => Some(Command::Ascend),
        'x' | '\u{7f}' => Some(Command::Delete),
        'k' => Some(Command::ConnectByKissing),
        'K' => Some(Command::AttachLabels),
        _ => None,
    }
}
