//! Label attachment (spec §4.6), grounded on
//! `actions.c::attach_labels_to_inst`: stamps a label-pin symbol at every
//! unconnected pin of the selected instances, oriented so the label text
//! reads away from the pin.

use xschem_geom::{Orientation, Point, rotate_flip};
use xschem_spatial::SpatialIndex;
use xschem_state::{InstanceFlags, Sheet};
use xschem_symbols::{GetMode, attr};

/// How the label's own rotation is derived from the pin's orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    /// `rotated_text == -1`: flip-and-rotate so the label always reads
    /// upright, swapping `dir` whenever that requires a 180-degree turn.
    Auto,
    /// `rotated_text == N`: a fixed rotation offset added to the
    /// instance's own rotation, `dir` left as computed from the pin.
    Fixed(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub pin_name: String,
    pub position: Point,
    pub rotation: u8,
    /// `true` for an output/inout pin's label (text faces outward),
    /// `false` for an input pin's.
    pub dir_out: bool,
    pub label_text: String,
}

/// Every label placement implied by the currently selected instances'
/// unconnected pins. Instances classified pin-or-label (the symbol's own
/// `type=pin`/`type=label` primitives) are skipped, matching
/// `IS_LABEL_OR_PIN`.
pub fn compute_label_placements(
    sheet: &Sheet,
    spatial: &SpatialIndex,
    pin_layer: u8,
    mode: RotationMode,
    label_prefix: Option<&str>,
) -> Vec<LabelPlacement> {
    let mut out = Vec::new();
    for (inst_idx, inst) in sheet.instances.iter().enumerate() {
        if !inst.selected || inst.flags.contains(InstanceFlags::PIN_OR_LABEL) {
            continue;
        }
        let Some(symbol) = inst.resolve(&sheet.symbols) else {
            continue;
        };
        let orientation = Orientation::new(inst.rotation, inst.flip);

        for pin in symbol.pins(pin_layer) {
            let local = pin.rect.center();
            let pin_name = attr::get(&pin.meta.attr, "name", GetMode::Unquoted).unwrap_or("").to_string();
            let mut dir_out = attr::get(&pin.meta.attr, "dir", GetMode::Unquoted) != Some("in");
            if mode == RotationMode::Auto && dir_out && local.x < 0.0 {
                dir_out = false;
            }

            let world = rotate_flip(orientation, Point::origin(), local, inst.position);

            let mut skip = false;
            for pin_ref in spatial.pins_at_point(world) {
                if pin_ref.instance != inst_idx {
                    skip = true;
                    break;
                }
            }
            if !skip {
                for wire_idx in spatial.wires_at_point(sheet, world) {
                    if sheet.wires[wire_idx].touches_point(world) {
                        skip = true;
                        break;
                    }
                }
            }
            if skip {
                continue;
            }

            dir_out ^= inst.flip;
            let rotation = match mode {
                RotationMode::Auto => {
                    let rot = inst.rotation % 4;
                    if rot == 1 || rot == 2 {
                        dir_out = !dir_out;
                        (rot + 2) % 4
                    } else {
                        rot
                    }
                }
                RotationMode::Fixed(extra) => (inst.rotation + extra) % 4,
            };

            let mut label_text = String::from("name=p1 lab=");
            if let Some(prefix) = label_prefix {
                label_text.push_str(prefix);
            }
            label_text.push_str(&pin_name);

            out.push(LabelPlacement { pin_name, position: world, rotation, dir_out, label_text });
        }
    }
    out
}
