//! Symbol definitions: the reusable drawings instances refer to.

use bitflags::bitflags;
use xschem_geom::{ArcItem, LineItem, PolygonItem, Point, Rect, RectItem, union_all};

use crate::attr::{self, GetMode};

bitflags! {
    /// Cached derivation of a symbol's attribute string (spec §4.3: `flags`
    /// on Instance/Symbol/Rect/Text are recomputed from the attribute
    /// string by a single pass, never hand-set independently). Mirrors the
    /// subset of `InstanceFlags` the source's `set_sym_flags` derives from
    /// a symbol's own `prop_ptr`, before any per-instance override applies.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SymbolFlags: u16 {
        const HIGHLIGHT        = 1 << 0;
        const HIDE             = 1 << 1;
        const IGNORE_SPICE     = 1 << 2;
        const IGNORE_VERILOG   = 1 << 3;
        const IGNORE_VHDL      = 1 << 4;
        const IGNORE_TEDAX     = 1 << 5;
        const LVS_IGNORE_OPEN  = 1 << 6;
        const LVS_IGNORE_SHORT = 1 << 7;
    }
}

/// A symbol's own text labels. Unlike a sheet's `TextItem`, a symbol text
/// never floats (floating is a property of an *instance* of the symbol on
/// a sheet, resolved by `xschem-hier`), so it only needs placement and
/// rendering fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotation: u8,
    pub flip: bool,
    pub hscale: f64,
    pub vscale: f64,
    pub layer: u8,
}

/// Distinguishes an ordinary symbol from a polymorphic clone created to
/// satisfy a net/pin-multiplicity mismatch (spec §4.2). A clone keeps a
/// back-reference to the symbol it was stamped from so the cache can tell
/// generated entries apart from user-authored ones when compacting.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Primary,
    Clone { base_index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    pub sym_type: Option<String>,
    /// Raw attribute string for the whole symbol (`type=subcircuit ...`).
    pub attr: String,
    /// Attribute-string template applied to an instance at placement time,
    /// may contain `@symname`/`@#N:net_name`-style placeholders.
    pub template: String,
    pub flags: SymbolFlags,
    pub bbox: Rect,
    pub lines: Vec<LineItem>,
    pub rects: Vec<RectItem>,
    pub arcs: Vec<ArcItem>,
    pub polygons: Vec<PolygonItem>,
    pub texts: Vec<SymbolText>,
}

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            kind: SymbolKind::Primary,
            name: name.into(),
            sym_type: None,
            attr: String::new(),
            template: String::new(),
            flags: SymbolFlags::empty(),
            bbox: Rect::from_point(Point::origin()),
            lines: Vec::new(),
            rects: Vec::new(),
            arcs: Vec::new(),
            polygons: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn is_clone(&self) -> bool {
        matches!(self.kind, SymbolKind::Clone { .. })
    }

    /// Recomputes `flags` from `attr`, same boolean-token rule
    /// `InstanceFlags::recompute_flags` uses for the per-instance bits this
    /// set mirrors (`actions.c::set_sym_flags`). Must be called after every
    /// attribute-string mutation.
    pub fn recompute_flags(&mut self) {
        let is_set = |key: &str| {
            attr::get(&self.attr, key, GetMode::Unquoted)
                .map(|v| v == "true")
                .unwrap_or(false)
        };
        let mut flags = SymbolFlags::empty();
        flags.set(SymbolFlags::HIGHLIGHT, is_set("highlight"));
        flags.set(SymbolFlags::HIDE, is_set("hide"));
        flags.set(SymbolFlags::IGNORE_SPICE, is_set("spice_ignore"));
        flags.set(SymbolFlags::IGNORE_VERILOG, is_set("verilog_ignore"));
        flags.set(SymbolFlags::IGNORE_VHDL, is_set("vhdl_ignore"));
        flags.set(SymbolFlags::IGNORE_TEDAX, is_set("tedax_ignore"));
        flags.set(
            SymbolFlags::LVS_IGNORE_OPEN,
            attr::get(&self.attr, "lvs_ignore", GetMode::Unquoted) == Some("open"),
        );
        flags.set(
            SymbolFlags::LVS_IGNORE_SHORT,
            attr::get(&self.attr, "lvs_ignore", GetMode::Unquoted) == Some("short"),
        );
        self.flags = flags;
    }

    /// Recomputes the cached `bbox` as the union of every layered geometry
    /// item and text label's own bounding box. Must be called whenever the
    /// symbol's geometry arrays change.
    pub fn recompute_bbox(&mut self) {
        let mut boxes: Vec<Rect> = Vec::new();
        boxes.extend(self.lines.iter().map(LineItem::bbox));
        boxes.extend(self.rects.iter().map(RectItem::bbox));
        boxes.extend(self.arcs.iter().map(ArcItem::bbox));
        boxes.extend(self.polygons.iter().filter_map(PolygonItem::bbox));
        boxes.extend(self.texts.iter().map(|t| Rect::from_point(Point::new(t.x, t.y))));
        self.bbox = union_all(&boxes).unwrap_or_else(|| Rect::from_point(Point::origin()));
    }

    /// Pins are encoded as rectangles on the dedicated pin layer (spec
    /// §3 glossary: "Pin -- a named connection point on a symbol
    /// (encoded as a rectangle on a dedicated layer)"). Order matches
    /// the rect array, which is also the pin order an `Instance`'s
    /// `pin_nets` array is indexed by (spec §3 invariant).
    pub fn pins(&self, pin_layer: u8) -> impl Iterator<Item = &RectItem> {
        self.rects.iter().filter(move |r| r.meta.layer == pin_layer)
    }

    pub fn pin_count(&self, pin_layer: u8) -> usize {
        self.pins(pin_layer).count()
    }

    /// The pin's declared name (`name=...` token in its attribute
    /// string), or `""` if unset -- a pin without a name is skipped by
    /// the hierarchy navigator's port-map construction, matching
    /// `descend_schematic`'s `if(!pin_name[0]) continue;`.
    pub fn pin_name(pin: &RectItem) -> &str {
        attr::get(&pin.meta.attr, "name", GetMode::Unquoted).unwrap_or("")
    }

    /// The pin's `dir` token (`in`, `out`, `inout`), defaulting to `"in"`
    /// when unset.
    pub fn pin_dir(pin: &RectItem) -> &str {
        attr::get(&pin.meta.attr, "dir", GetMode::Unquoted).unwrap_or("in")
    }
}
