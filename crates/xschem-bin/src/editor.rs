//! The explicit `Editor` value spec §9's "global `xctx` world pointer"
//! redesign flag asks for: everything the interaction layer, the
//! hierarchy navigator, and the viewport need is a field here rather
//! than a process-wide handle, so multiple editor windows are
//! independent values instead of aliases into one global.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use xschem_config::Config;
use xschem_events::{Event, Phase, UiState};
use xschem_geom::Point;
use xschem_hier::{HierarchyNavigator, ViewportSnapshot};
use xschem_io::{DialogAnswer, Outcome, Renderer, SchematicIo, ScriptBridge};
use xschem_keymap::Command;
use xschem_render::{BboxController, Viewport, draw_sheet};
use xschem_spatial::SpatialIndex;
use xschem_state::{Sheet, UndoEngine};

use xschem_actions::{Interactor, LayerConfig, Manhattan};

const DEFAULT_AREA_W: f64 = 1000.0;
const DEFAULT_AREA_H: f64 = 700.0;

/// One open schematic window: the document, the indexes derived from it,
/// and the interactive machinery that mutates it. Everything an
/// operation needs is reached through `&mut Editor` rather than a
/// process-wide handle.
pub struct Editor {
    pub sheet: Sheet,
    pub spatial: SpatialIndex,
    pub undo: UndoEngine,
    pub interactor: Interactor,
    pub hierarchy: HierarchyNavigator,
    pub viewport: Viewport,
    pub bbox: BboxController,
    pub config: Config,
    pub current_path: Option<PathBuf>,
    /// Last pointer position fed through the console, so a bare `set`/
    /// `clear` command has a point to carry.
    pub last_point: Point,
    /// Spec §9 Open Question: the "previous set_modify value" dedupe,
    /// kept here rather than as a process global so it scopes to this
    /// `Editor` the way every other piece of state does.
    prev_modify: bool,
}

impl Editor {
    pub fn new(config: Config) -> Self {
        let layer_count = config.file.layers.count;
        let bucket_side = config.file.grid.bucket_side();
        let layers = LayerConfig {
            wire: xschem_config::layers::WIRE,
            line: xschem_config::layers::OUTLINE,
            rect: xschem_config::layers::OUTLINE,
            arc: xschem_config::layers::OUTLINE,
            polygon: xschem_config::layers::OUTLINE,
            pin: xschem_config::layers::PIN,
        };
        Self {
            sheet: Sheet::new(layer_count),
            spatial: SpatialIndex::new(bucket_side, xschem_config::layers::PIN),
            undo: UndoEngine::new(),
            interactor: Interactor::new(layers, Manhattan::Direct),
            hierarchy: HierarchyNavigator::new(""),
            viewport: Viewport::new(DEFAULT_AREA_W, DEFAULT_AREA_H),
            bbox: BboxController::new(),
            config,
            current_path: None,
            last_point: Point::origin(),
            prev_modify: false,
        }
    }

    /// Non-fatal load (spec §4.13): a missing or malformed file is
    /// logged and the sheet is left as-is (the "placeholder" the source
    /// substitutes). The window's title-update dedupe is refreshed
    /// either way, matching `set_modify`'s "previous value" guard.
    pub fn load_schematic(&mut self, io: &dyn SchematicIo, path: &Path) {
        match io.load_schematic(path, self.sheet.layers.len() as u8) {
            Ok(loaded) => {
                self.sheet = loaded.sheet;
                self.current_path = Some(loaded.source_path);
                self.spatial.mark_stale();
                self.refresh_modify_title(false);
                info!(target: "editor", path = %path.display(), "schematic_loaded");
            }
            Err(err) => {
                warn!(target: "editor", path = %path.display(), error = %err, "schematic_load_failed_using_placeholder");
            }
        }
    }

    /// Saves the current sheet, first asking the bridge to resolve a
    /// concurrent-modification tri-state the way spec §7 error kind 6
    /// describes: a stale mtime forces a save-as confirmation before
    /// the write proceeds.
    pub fn save_schematic(&mut self, io: &dyn SchematicIo, bridge: &mut dyn ScriptBridge, path: &Path) -> bool {
        if io.changed_since(path, None) && bridge.ask_dialog("file changed on disk, overwrite?") != DialogAnswer::Yes
        {
            return false;
        }
        match io.save_schematic(path, &self.sheet) {
            Ok(()) => {
                self.sheet.set_modify(false);
                self.refresh_modify_title(false);
                true
            }
            Err(err) => {
                warn!(target: "editor", path = %path.display(), error = %err, "schematic_save_failed");
                false
            }
        }
    }

    /// Dispatches one top-level interaction event, following spec §5's
    /// ordering contract (mutate, invalidate derived indices, compute
    /// dirty bbox, redraw) which `Interactor::dispatch` already
    /// implements internally.
    pub fn dispatch(&mut self, event: Event, renderer: &mut dyn Renderer) -> bool {
        let committed = self.interactor.dispatch(
            event,
            &mut self.sheet,
            &mut self.spatial,
            &mut self.undo,
            &mut self.bbox,
            renderer,
        );
        if committed {
            self.sheet.set_modify(true);
            self.refresh_modify_title(true);
        }
        committed
    }

    pub fn start_gesture(&mut self, command: Command) -> bool {
        self.interactor.start(command)
    }

    /// Drives the active gesture at the last point the console moved to
    /// (spec §4.7's `PLACE`/`RUBBER`/`SET`/`CLEAR` phases).
    pub fn phase(&mut self, renderer: &mut dyn Renderer, phase: Phase) -> bool {
        let p = self.last_point;
        let pointer = xschem_events::PointerEvent {
            world_x: p.x,
            world_y: p.y,
            snapped_x: p.x,
            snapped_y: p.y,
        };
        self.dispatch(Event::Pointer(pointer, phase), renderer)
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.last_point = Point::new(x, y);
    }

    pub fn undo(&mut self) -> bool {
        self.undo.undo(&mut self.sheet)
    }

    pub fn redo(&mut self) -> bool {
        self.undo.redo(&mut self.sheet)
    }

    pub fn connect_by_kissing(&mut self) -> bool {
        let changed = self.interactor.connect_by_kissing(&mut self.sheet, &self.spatial, &mut self.undo);
        if changed {
            self.refresh_modify_title(true);
        }
        changed
    }

    /// Descends into the first selected instance, mirroring the source's
    /// "act on the current selection" convention for commands that don't
    /// take an explicit target.
    pub fn descend_selected(&mut self, bridge: &mut dyn ScriptBridge) -> bool {
        let Some(inst_index) = self.sheet.instances.iter().position(|i| i.selected) else {
            return false;
        };
        let snapshot = ViewportSnapshot {
            xorigin: self.viewport.xorigin,
            yorigin: self.viewport.yorigin,
            zoom: self.viewport.zoom,
        };
        let pin_layer = xschem_config::layers::PIN;
        match self.hierarchy.descend(&self.sheet, inst_index, None, pin_layer, snapshot, bridge) {
            Outcome::Ok(result) => {
                info!(target: "editor", child = %result.child_filename, path = %result.child_sheet_path, "descend");
                true
            }
            Outcome::Cancel => false,
            Outcome::Error(err) => {
                warn!(target: "editor", error = %err, "descend_failed");
                false
            }
        }
    }

    /// Attaches a `lab_pin`/`lab_wire`-style label to every unconnected
    /// pin of the currently selected instances (spec §4.6).
    pub fn attach_labels(&mut self, label_symbol_index: usize) -> usize {
        let n = self.interactor.attach_labels(
            &mut self.sheet,
            &self.spatial,
            &mut self.undo,
            label_symbol_index,
            xschem_actions::RotationMode::Auto,
            None,
        );
        if n > 0 {
            self.refresh_modify_title(true);
        }
        n
    }

    pub fn ascend(&mut self) -> bool {
        match self.hierarchy.ascend() {
            Ok(frame) => {
                self.viewport.xorigin = frame.parent_viewport.xorigin;
                self.viewport.yorigin = frame.parent_viewport.yorigin;
                self.viewport.zoom = frame.parent_viewport.zoom;
                true
            }
            Err(err) => {
                warn!(target: "editor", error = %err, "ascend_failed");
                false
            }
        }
    }

    pub fn zoom_to_fit(&mut self) {
        let Some(bbox) = self.sheet.bbox() else { return };
        self.viewport.zoom_to_fit(bbox, &self.config.file.viewport);
    }

    pub fn redraw(&self, renderer: &mut dyn Renderer) {
        draw_sheet(&self.sheet, renderer);
    }

    /// Spec §5's "process-wide previous set_modify value ... safe under
    /// the single-thread model" recast per §9's Open-Question decision
    /// as a field scoped to this `Editor`: only log the title-worthy
    /// transition, not every call.
    fn refresh_modify_title(&mut self, modified: bool) {
        if self.prev_modify != modified {
            self.prev_modify = modified;
            info!(target: "editor.title", modified, "title_dedupe_transition");
        }
    }

    pub fn ui_state(&self) -> UiState {
        self.interactor.ui_state()
    }
}
