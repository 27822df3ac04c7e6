//! Annotation text, including "floater" text whose visible string is
//! computed by template substitution from another instance's attributes
//! (spec §4.12; the cache itself is evaluated by `xschem-hier`, this crate
//! only owns the storage and the invalidation rule).

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TextFlags: u8 {
        const BOLD    = 1 << 0;
        const ITALIC  = 1 << 1;
        const OBLIQUE = 1 << 2;
        const HIDDEN  = 1 << 3;
        const FLOATER = 1 << 4;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotation: u8,
    pub flip: bool,
    pub hscale: f64,
    pub vscale: f64,
    pub hcenter: bool,
    pub vcenter: bool,
    pub layer: u8,
    pub flags: TextFlags,
    pub font: String,
    pub attr: String,
    pub selected: bool,
    /// Name of the instance a floater's template substitutes from.
    pub floater_instname: Option<String>,
    /// Cached resolved string for a floater; `None` means "needs
    /// recomputation before the next draw".
    pub floater_cache: Option<String>,
}

impl TextItem {
    pub fn new(text: impl Into<String>, x: f64, y: f64, layer: u8) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            rotation: 0,
            flip: false,
            hscale: 1.0,
            vscale: 1.0,
            hcenter: false,
            vcenter: false,
            layer,
            flags: TextFlags::empty(),
            font: String::new(),
            attr: String::new(),
            selected: false,
            floater_instname: None,
            floater_cache: None,
        }
    }

    pub fn is_floater(&self) -> bool {
        self.flags.contains(TextFlags::FLOATER)
    }

    /// Invalidates the cached resolved string. Spec §4.12's contract:
    /// callers must do this for every floater before the next draw
    /// following a document modification.
    pub fn invalidate_floater_cache(&mut self) {
        self.floater_cache = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floater_flag_gates_is_floater() {
        let mut t = TextItem::new("@name", 0.0, 0.0, 2);
        assert!(!t.is_floater());
        t.flags.insert(TextFlags::FLOATER);
        assert!(t.is_floater());
    }

    #[test]
    fn invalidate_clears_cache() {
        let mut t = TextItem::new("@name", 0.0, 0.0, 2);
        t.floater_cache = Some("R1".to_string());
        t.invalidate_floater_cache();
        assert!(t.floater_cache.is_none());
    }
}
