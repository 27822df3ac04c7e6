//! The embedded scripting bridge (spec §6): a byte-string evaluator used
//! for filesystem path resolution, modal dialogs, and reading/writing
//! user preferences by name. The core only ever issues a command string
//! and consumes a result string -- it never inspects the interpreter's
//! internal state -- so the seam is a single narrow trait, mirroring how
//! `core-plugin::PluginHost` keeps the plugin boundary to name/load/
//! event_sources and nothing more.

use std::collections::HashMap;

/// The three outcomes a modal save/load dialog can report (spec §5: "Save
/// dialogs return a tri-state {yes, no, cancel}; cancel propagates
/// upward and aborts the enclosing gesture").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAnswer {
    Yes,
    No,
    Cancel,
}

pub trait ScriptBridge {
    /// Evaluates a bounded command string, returning its result string.
    /// Used for `abs_sym_path`/`rel_sym_path` resolution, preference
    /// get/set, and any command that isn't a modal dialog.
    fn eval(&mut self, cmd: &str) -> String;

    /// Asks a yes/no/cancel question (save-before-close, overwrite
    /// confirmation, etc).
    fn ask_dialog(&mut self, prompt: &str) -> DialogAnswer;

    /// Prompts for a single line of free text (e.g. "which sub-instance
    /// to descend into"); `None` means the user cancelled.
    fn input_line(&mut self, prompt: &str) -> Option<String>;
}

/// Bridge used by headless tooling and by any test that doesn't care
/// about dialog plumbing: `eval` always returns an empty string, dialogs
/// always answer `No`/cancel so a gesture that requires confirmation
/// never silently proceeds.
#[derive(Debug, Default)]
pub struct NoopScriptBridge;

impl ScriptBridge for NoopScriptBridge {
    fn eval(&mut self, _cmd: &str) -> String {
        String::new()
    }

    fn ask_dialog(&mut self, _prompt: &str) -> DialogAnswer {
        DialogAnswer::No
    }

    fn input_line(&mut self, _prompt: &str) -> Option<String> {
        None
    }
}

/// Bridge for tests that need to script specific answers and/or assert
/// on which commands were issued. Canned `eval` responses are matched by
/// exact command string; an unmatched command returns `""`, same as
/// `NoopScriptBridge`.
#[derive(Debug, Default)]
pub struct RecordingScriptBridge {
    pub eval_log: Vec<String>,
    pub dialog_log: Vec<String>,
    canned_eval: HashMap<String, String>,
    canned_dialog: Vec<DialogAnswer>,
    canned_input_line: Vec<Option<String>>,
}

impl RecordingScriptBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_eval_response(mut self, cmd: impl Into<String>, result: impl Into<String>) -> Self {
        self.canned_eval.insert(cmd.into(), result.into());
        self
    }

    /// Queues dialog answers to be returned in order, one per `ask_dialog` call.
    pub fn queue_dialog_answer(mut self, answer: DialogAnswer) -> Self {
        self.canned_dialog.push(answer);
        self
    }

    pub fn queue_input_line(mut self, line: Option<String>) -> Self {
        self.canned_input_line.push(line);
        self
    }
}

impl ScriptBridge for RecordingScriptBridge {
    fn eval(&mut self, cmd: &str) -> String {
        self.eval_log.push(cmd.to_string());
        self.canned_eval.get(cmd).cloned().unwrap_or_default()
    }

    fn ask_dialog(&mut self, prompt: &str) -> DialogAnswer {
        self.dialog_log.push(prompt.to_string());
        if self.canned_dialog.is_empty() {
            DialogAnswer::No
        } else {
            self.canned_dialog.remove(0)
        }
    }

    fn input_line(&mut self, prompt: &str) -> Option<String> {
        self.dialog_log.push(prompt.to_string());
        if self.canned_input_line.is_empty() {
            None
        } else {
            self.canned_input_line.remove(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_bridge_never_confirms() {
        let mut bridge = NoopScriptBridge;
        assert_eq!(bridge.ask_dialog("save?"), DialogAnswer::No);
        assert_eq!(bridge.eval("abs_sym_path foo"), "");
    }

    #[test]
    fn recording_bridge_replays_canned_eval_by_exact_command() {
        let mut bridge = RecordingScriptBridge::new().with_eval_response("abs_sym_path foo", "/lib/foo.sym");
        assert_eq!(bridge.eval("abs_sym_path foo"), "/lib/foo.sym");
        assert_eq!(bridge.eval("unrelated"), "");
        assert_eq!(bridge.eval_log, vec!["abs_sym_path foo", "unrelated"]);
    }

    #[test]
    fn recording_bridge_replays_dialog_answers_in_order() {
        let mut bridge = RecordingScriptBridge::new()
            .queue_dialog_answer(DialogAnswer::Yes)
            .queue_dialog_answer(DialogAnswer::Cancel);
        assert_eq!(bridge.ask_dialog("save?"), DialogAnswer::Yes);
        assert_eq!(bridge.ask_dialog("save?"), DialogAnswer::Cancel);
        // Exhausted queue falls back to the no-op default.
        assert_eq!(bridge.ask_dialog("save?"), DialogAnswer::No);
    }
}
