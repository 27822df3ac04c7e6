//! The dirty-rectangle controller (spec §4.8): accumulates a union of
//! rectangles across a `START`, `ADD`*, `SET`, `END` bracket that bounds
//! the region a gesture needs redrawn, so a single pin drag or wire
//! commit repaints a handful of pixels instead of the whole viewport.

use xschem_geom::Rect;

#[derive(Debug, Default)]
pub struct BboxController {
    accumulating: Option<Rect>,
    active_clip: Option<Rect>,
}

impl BboxController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new accumulation, seeded with `rect`.
    pub fn start(&mut self, rect: Rect) {
        self.accumulating = Some(rect);
    }

    /// Unions `rect` into the in-progress accumulation. A no-op if
    /// `start` hasn't been called (nothing to redraw yet).
    pub fn add(&mut self, rect: Rect) {
        self.accumulating = Some(match self.accumulating {
            Some(acc) => acc.union(&rect),
            None => rect,
        });
    }

    /// Installs the accumulated union as the active redraw clip.
    pub fn set(&mut self) {
        self.active_clip = self.accumulating.take();
    }

    /// Clears the active clip; the next frame redraws unclipped.
    pub fn end(&mut self) {
        self.active_clip = None;
    }

    pub fn active_clip(&self) -> Option<Rect> {
        self.active_clip
    }

    pub fn is_accumulating(&self) -> bool {
        self.accumulating.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_add_set_installs_the_union() {
        let mut c = BboxController::new();
        c.start(Rect::new(0.0, 0.0, 1.0, 1.0));
        c.add(Rect::new(5.0, 5.0, 6.0, 6.0));
        c.set();
        assert_eq!(c.active_clip(), Some(Rect::new(0.0, 0.0, 6.0, 6.0)));
    }

    #[test]
    fn end_clears_the_clip() {
        let mut c = BboxController::new();
        c.start(Rect::new(0.0, 0.0, 1.0, 1.0));
        c.set();
        c.end();
        assert_eq!(c.active_clip(), None);
    }

    #[test]
    fn add_without_start_still_seeds_the_accumulation() {
        let mut c = BboxController::new();
        c.add(Rect::new(2.0, 2.0, 3.0, 3.0));
        assert!(c.is_accumulating());
        c.set();
        assert_eq!(c.active_clip(), Some(Rect::new(2.0, 2.0, 3.0, 3.0)));
    }

    #[test]
    fn set_without_accumulation_installs_no_clip() {
        let mut c = BboxController::new();
        c.set();
        assert_eq!(c.active_clip(), None);
    }
}
