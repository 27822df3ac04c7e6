//! Descend/ascend through the instance hierarchy (spec §4.9), grounded on
//! `actions.c::descend_schematic`/`go_back`.
//!
//! Each descent pushes a [`HierarchyFrame`] capturing what's needed to
//! restore the level being left (its path, its viewport) plus the
//! port-map built for the level being entered, used both to translate
//! hilighted net names forward into the child and, while at that level,
//! to resolve any further descent's net references.

use std::collections::HashMap;

use xschem_geom::names::{expand_label, find_nth};
use xschem_io::{Outcome, ScriptBridge};
use xschem_state::Sheet;
use xschem_symbols::Symbol;

use crate::error::HierError;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportSnapshot {
    pub xorigin: f64,
    pub yorigin: f64,
    pub zoom: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyFrame {
    /// Path and viewport of the level being left, restored on ascend.
    pub parent_sheet_path: String,
    pub parent_viewport: ViewportSnapshot,
    /// Index of the instance descended through, within the parent sheet.
    pub parent_instance_index: usize,
    /// `pin -> net` map for the level being entered.
    pub port_map: HashMap<String, String>,
    /// The descended instance's own attribute blob, kept so hilights can
    /// be propagated back through it on ascend.
    pub parent_attr_snapshot: String,
}

#[derive(Debug, Clone)]
pub struct DescendResult {
    pub child_sheet_path: String,
    pub child_filename: String,
}

#[derive(Debug, Default)]
pub struct HierarchyNavigator {
    stack: Vec<HierarchyFrame>,
    current_path: String,
}

impl HierarchyNavigator {
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            stack: Vec::new(),
            current_path: root_path.into(),
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The port map active at the current level, or `None` at the root
    /// (the root has no enclosing instance to have built one from).
    pub fn active_port_map(&self) -> Option<&HashMap<String, String>> {
        self.stack.last().map(|f| &f.port_map)
    }

    /// Descends into `sheet.instances[inst_index]`. Only `subcircuit` and
    /// `primitive` symbol types are valid descent targets; anything else
    /// returns `Outcome::Cancel`, matching the source's silent no-op.
    /// `explicit_sub_instance` supplies a pre-chosen 1-based index
    /// (negative counts from the right); when `None` and the instance
    /// expands to more than one sub-instance, `bridge.input_line` is
    /// consulted, and a user cancel there also yields `Outcome::Cancel`.
    pub fn descend(
        &mut self,
        sheet: &Sheet,
        inst_index: usize,
        explicit_sub_instance: Option<i64>,
        pin_layer: u8,
        viewport: ViewportSnapshot,
        bridge: &mut dyn ScriptBridge,
    ) -> Outcome<DescendResult> {
        let Some(inst) = sheet.instances.get(inst_index) else {
            return Outcome::Cancel;
        };
        let Some(symbol) = inst.resolve(&sheet.symbols) else {
            return Outcome::Cancel;
        };
        match symbol.sym_type.as_deref() {
            Some("subcircuit") | Some("primitive") => {}
            _ => return Outcome::Cancel,
        }

        let expanded_labels = if inst.instance_name.is_empty() {
            vec![String::new()]
        } else {
            expand_label(&inst.instance_name)
        };
        let inst_mult = expanded_labels.len() as i64;

        let inst_number = if inst_mult > 1 {
            let chosen = match explicit_sub_instance {
                Some(n) => n,
                None => {
                    let Some(answer) = bridge.input_line(
                        "input instance number (leftmost = 1) to descend into:\n\
                         negative numbers select instance starting from the right (rightmost = -1)",
                    ) else {
                        return Outcome::Cancel;
                    };
                    let Ok(n) = answer.trim().parse::<i64>() else {
                        return Outcome::Cancel;
                    };
                    n
                }
            };
            let mut n = chosen;
            if n < 0 {
                n += inst_mult + 1;
            }
            if n < 1 || n > inst_mult {
                n = 1;
            }
            n
        } else {
            1
        };

        let port_map = build_port_map(inst, symbol, pin_layer, inst_mult, inst_number);

        let segment = find_nth(&expanded_labels.join(","), inst_number as usize).unwrap_or("");
        let child_sheet_path = format!("{}{}.", self.current_path, segment);

        let child_filename = child_schematic_filename(&inst.attr, &symbol.name);

        self.stack.push(HierarchyFrame {
            parent_sheet_path: std::mem::replace(&mut self.current_path, child_sheet_path.clone()),
            parent_viewport: viewport,
            parent_instance_index: inst_index,
            port_map,
            parent_attr_snapshot: inst.attr.clone(),
        });

        Outcome::Ok(DescendResult {
            child_sheet_path,
            child_filename,
        })
    }

    /// Pops the current frame, restoring the parent's path and viewport.
    /// `.xschem_embedded_` paths are the caller's cue to reload the
    /// embedded symbol definition before this call so it survives the pop
    /// (spec §4.9's special case).
    pub fn ascend(&mut self) -> Result<HierarchyFrame, HierError> {
        let frame = self.stack.pop().ok_or(HierError::AtRoot)?;
        self.current_path = frame.parent_sheet_path.clone();
        Ok(frame)
    }

    pub fn is_embedded_path(path: &str) -> bool {
        path.contains(".xschem_embedded_")
    }
}

/// Builds the `pin -> net` map for one descent, following
/// `descend_schematic`'s exact indexing: pin and net names are each
/// expanded to vectors, matched by sub-instance index modulo the net's
/// own multiplicity, and an auto net name (`#...`) picks up an
/// `[index]` suffix before the leading `#` is stripped.
fn build_port_map(
    inst: &xschem_state::Instance,
    symbol: &Symbol,
    pin_layer: u8,
    inst_mult: i64,
    inst_number: i64,
) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (pin_idx, pin) in symbol.pins(pin_layer).enumerate() {
        let pin_name = Symbol::pin_name(pin);
        if pin_name.is_empty() {
            continue;
        }
        let Some(Some(net)) = inst.pin_nets.get(pin_idx) else {
            continue;
        };

        let pin_node = expand_label(pin_name);
        let net_node = expand_label(net);
        let mult = pin_node.len() as i64;
        let net_mult = net_node.len() as i64;
        if mult == 0 || net_mult == 0 {
            continue;
        }

        for k in 1..=mult {
            let single_p = &pin_node[(k - 1) as usize];
            let idx = (((inst_number - 1) * mult + k - 1).rem_euclid(net_mult)) as usize;
            let mut single_n = net_node[idx].clone();
            if let Some(rest) = single_n.strip_prefix('#') {
                let mut body = rest.to_string();
                if mult > 1 {
                    let suffix = (inst_mult - inst_number + 1) * mult - k;
                    body.push_str(&format!("[{suffix}]"));
                }
                single_n = body;
            }
            map.insert(single_p.clone(), single_n);
        }
    }
    map
}

/// Resolves the child schematic's filename: the instance's own
/// `schematic=` attribute (with `@symname` substituted) if present,
/// otherwise `<symbolname>.sch`.
fn child_schematic_filename(inst_attr: &str, symbol_name: &str) -> String {
    if let Some(explicit) = xschem_symbols::get(inst_attr, "schematic", xschem_symbols::GetMode::Unquoted) {
        xschem_symbols::str_replace(explicit, "@symname", symbol_name, false)
    } else {
        format!("{symbol_name}.sch")
    }
}
