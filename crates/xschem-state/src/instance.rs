//! A placement of a symbol on a sheet.

use bitflags::bitflags;
use xschem_geom::{Point, Rect};
use xschem_symbols::{GetMode, SymbolCache, attr};

bitflags! {
    /// Cached derivation of an instance's attribute string (spec §4.3: the
    /// attribute string is canonical, `flags` is recomputed from it by a
    /// single pass after every mutation, never hand-set independently).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InstanceFlags: u16 {
        const HIGHLIGHT        = 1 << 0;
        const HIDE             = 1 << 1;
        const HIDE_TEXTS       = 1 << 2;
        const PIN_OR_LABEL     = 1 << 3;
        const EMBEDDED         = 1 << 4;
        const IGNORE_SPICE     = 1 << 5;
        const IGNORE_VERILOG   = 1 << 6;
        const IGNORE_VHDL      = 1 << 7;
        const IGNORE_TEDAX     = 1 << 8;
        const LVS_IGNORE_OPEN  = 1 << 9;
        const LVS_IGNORE_SHORT = 1 << 10;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub symbol_index: Option<usize>,
    pub name: String,
    pub instance_name: String,
    pub label: String,
    pub position: Point,
    pub rotation: u8,
    pub flip: bool,
    pub color: Option<u8>,
    pub selected: bool,
    pub flags: InstanceFlags,
    pub attr: String,
    pub bbox: Rect,
    /// One entry per symbol pin; `None` where no net has been resolved yet.
    pub pin_nets: Vec<Option<String>>,
}

impl Instance {
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Self {
            symbol_index: None,
            name: name.into(),
            instance_name: String::new(),
            label: String::new(),
            position,
            rotation: 0,
            flip: false,
            color: None,
            selected: false,
            flags: InstanceFlags::empty(),
            attr: String::new(),
            bbox: Rect::from_point(position),
            pin_nets: Vec::new(),
        }
    }

    /// Encapsulates index access into the symbol cache (spec §9: preserve
    /// indices as the canonical reference but never dereference one
    /// directly, so shift-compaction can later be replaced with a
    /// free-list without touching call sites).
    pub fn resolve<'a>(&self, cache: &'a SymbolCache) -> Option<&'a xschem_symbols::Symbol> {
        cache.get(self.symbol_index?)
    }

    /// Rotation normalized to the 0..=3 quadrant convention.
    pub fn rotation_quadrant(&self) -> u8 {
        self.rotation % 4
    }

    /// Recomputes `flags` from `attr` and, where classification depends on
    /// the referenced symbol (pin-or-label), from the resolved `Symbol`.
    /// Must be called after every attribute-string mutation; never set a
    /// bit without going through this so the string stays canonical and
    /// the bitmask stays a pure cache of it.
    pub fn recompute_flags(&mut self, cache: &SymbolCache) {
        let mut flags = InstanceFlags::empty();
        let is_set = |key: &str| {
            attr::get(&self.attr, key, GetMode::Unquoted)
                .map(|v| v != "0")
                .unwrap_or(false)
        };
        flags.set(InstanceFlags::HIGHLIGHT, is_set("highlight"));
        flags.set(InstanceFlags::HIDE, is_set("hide"));
        flags.set(InstanceFlags::HIDE_TEXTS, is_set("hide_texts"));
        flags.set(InstanceFlags::EMBEDDED, is_set("embed"));
        flags.set(InstanceFlags::IGNORE_SPICE, is_set("spice_ignore"));
        flags.set(InstanceFlags::IGNORE_VERILOG, is_set("verilog_ignore"));
        flags.set(InstanceFlags::IGNORE_VHDL, is_set("vhdl_ignore"));
        flags.set(InstanceFlags::IGNORE_TEDAX, is_set("tedax_ignore"));
        flags.set(InstanceFlags::LVS_IGNORE_OPEN, is_set("lvs_ignore_open"));
        flags.set(InstanceFlags::LVS_IGNORE_SHORT, is_set("lvs_ignore_short"));
        if let Some(symbol) = self.resolve(cache) {
            let is_pin_or_label = matches!(symbol.sym_type.as_deref(), Some("pin") | Some("label"));
            flags.set(InstanceFlags::PIN_OR_LABEL, is_pin_or_label);
        }
        self.flags = flags;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xschem_symbols::Symbol;

    #[test]
    fn recompute_flags_reads_boolean_tokens_from_attr() {
        let cache = SymbolCache::new();
        let mut inst = Instance::new("r1", Point::origin());
        inst.attr = "hide=1 highlight=0 spice_ignore=1".to_string();
        inst.recompute_flags(&cache);
        assert!(inst.flags.contains(InstanceFlags::HIDE));
        assert!(!inst.flags.contains(InstanceFlags::HIGHLIGHT));
        assert!(inst.flags.contains(InstanceFlags::IGNORE_SPICE));
    }

    #[test]
    fn recompute_flags_detects_pin_or_label_from_resolved_symbol() {
        let mut cache = SymbolCache::new();
        let idx = cache.push(Symbol {
            sym_type: Some("pin".to_string()),
            ..Symbol::new("ipin")
        });
        let mut inst = Instance::new("p1", Point::origin());
        inst.symbol_index = Some(idx);
        inst.recompute_flags(&cache);
        assert!(inst.flags.contains(InstanceFlags::PIN_OR_LABEL));
    }

    #[test]
    fn unresolved_symbol_index_leaves_resolve_none() {
        let cache = SymbolCache::new();
        let inst = Instance::new("x", Point::origin());
        assert!(inst.resolve(&cache).is_none());
    }
}
