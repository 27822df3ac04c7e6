//! The pan/zoom transform between world coordinates and the drawing
//! surface (spec §4.11), grounded on the source's `zoom_full`/`view_zoom`/
//! `view_unzoom`: world-to-screen is `screen = (world + origin) / zoom`,
//! so zooming in divides `zoom` by a factor and re-centers `origin` on a
//! pivot point so that the pivot's screen position doesn't move.

use xschem_config::ViewportConfig;
use xschem_geom::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub xorigin: f64,
    pub yorigin: f64,
    /// Drawing-surface size in device pixels.
    pub area_w: f64,
    pub area_h: f64,
    pub linewidth: f64,
}

impl Viewport {
    pub fn new(area_w: f64, area_h: f64) -> Self {
        Self {
            zoom: 1.0,
            xorigin: 0.0,
            yorigin: 0.0,
            area_w,
            area_h,
            linewidth: 1.0,
        }
    }

    pub fn world_to_screen(&self, p: Point) -> (f64, f64) {
        ((p.x + self.xorigin) / self.zoom, (p.y + self.yorigin) / self.zoom)
    }

    pub fn screen_to_world(&self, sx: f64, sy: f64) -> Point {
        Point::new(sx * self.zoom - self.xorigin, sy * self.zoom - self.yorigin)
    }

    /// Slides the view by a screen-space delta, converted to world units.
    pub fn pan(&mut self, dx_screen: f64, dy_screen: f64) {
        self.xorigin -= dx_screen * self.zoom;
        self.yorigin -= dy_screen * self.zoom;
    }

    /// Zooms in around `pivot` (world coords) by `factor` (default step if
    /// `factor` is `0.0`, matching the source's `z!=0.0 ? z : CADZOOMSTEP`).
    /// The pivot's screen position is unchanged by construction.
    pub fn zoom_in(&mut self, pivot: Point, factor: f64, min_zoom: f64) {
        let factor = if factor != 0.0 { factor } else { 2.0 };
        if self.zoom < min_zoom {
            return;
        }
        self.zoom /= factor;
        self.xorigin = -pivot.x + (pivot.x + self.xorigin) / factor;
        self.yorigin = -pivot.y + (pivot.y + self.yorigin) / factor;
    }

    /// Zooms out around `pivot`. When `nodrift` is set the same pivot
    /// formula runs in reverse, making `zoom_in` then `zoom_out` with the
    /// same pivot and factor an exact round trip (spec §8's
    /// `unzoom_nodrift` invariant); otherwise the area center is held
    /// fixed instead of the pivot.
    pub fn zoom_out(&mut self, pivot: Point, factor: f64, max_zoom: f64, nodrift: bool) {
        let factor = if factor != 0.0 { factor } else { 2.0 };
        if self.zoom > max_zoom {
            return;
        }
        self.zoom *= factor;
        if nodrift {
            self.xorigin = -pivot.x + (pivot.x + self.xorigin) * factor;
            self.yorigin = -pivot.y + (pivot.y + self.yorigin) * factor;
        } else {
            self.xorigin += self.area_w * self.zoom * (1.0 - 1.0 / factor) / 2.0;
            self.yorigin += self.area_h * self.zoom * (1.0 - 1.0 / factor) / 2.0;
        }
    }

    /// Fits `bbox` into the viewport (spec §4.11/§C.2), grounded on
    /// `zoom_full`. `centered` selects between the two origin-placement
    /// modes: geometric centering vs. a `(1-shrink)/2` margin split that
    /// anchors toward the bottom-left.
    pub fn zoom_to_rect(&mut self, bbox: Rect, shrink: f64, centered: bool) {
        let n = bbox.normalized();
        let bbox_w = n.x2 - n.x1;
        let bbox_h = n.y2 - n.y1;
        if bbox_w <= 0.0 && bbox_h <= 0.0 {
            return;
        }
        let zoom_w = bbox_w / self.area_w;
        let zoom_h = bbox_h / self.area_h;
        self.zoom = zoom_w.max(zoom_h) / shrink;
        if centered {
            self.xorigin = -n.x1 + (self.zoom * self.area_w - bbox_w) / 2.0;
            self.yorigin = -n.y1 + (self.zoom * self.area_h - bbox_h) / 2.0;
        } else {
            self.xorigin = -n.x1 + (1.0 - shrink) / 2.0 * self.zoom * self.area_w;
            self.yorigin = -n.y1 + self.zoom * self.area_h - bbox_h - (1.0 - shrink) / 2.0 * self.zoom * self.area_h;
        }
    }

    /// Fits the whole document (or just the selection) per `cfg`.
    pub fn zoom_to_fit(&mut self, bbox: Rect, cfg: &ViewportConfig) {
        self.zoom_to_rect(bbox, cfg.shrink, cfg.centered);
    }

    /// Recomputes the stroke width for the current zoom, clamping to a
    /// minimum of one device pixel the way `change_linewidth` does.
    pub fn change_linewidth(&mut self, requested: f64) {
        self.linewidth = if requested < 0.0 {
            (1.0 / self.zoom).max(1.0)
        } else {
            requested
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_in_then_zoom_out_with_nodrift_round_trips() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.xorigin = 13.0;
        vp.yorigin = -7.0;
        vp.zoom = 4.0;
        let pivot = Point::new(100.0, 50.0);
        let before = (vp.xorigin, vp.yorigin, vp.zoom);
        vp.zoom_in(pivot, 2.0, 0.001);
        vp.zoom_out(pivot, 2.0, 1e9, true);
        assert!((vp.xorigin - before.0).abs() < 1e-9);
        assert!((vp.yorigin - before.1).abs() < 1e-9);
        assert!((vp.zoom - before.2).abs() < 1e-9);
    }

    #[test]
    fn zoom_in_keeps_pivot_screen_position_fixed() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.zoom = 2.0;
        let pivot = Point::new(40.0, 40.0);
        let before = vp.world_to_screen(pivot);
        vp.zoom_in(pivot, 2.0, 0.001);
        let after = vp.world_to_screen(pivot);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn zoom_in_below_min_zoom_is_a_noop() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.zoom = 0.5;
        let before = vp;
        vp.zoom_in(Point::origin(), 2.0, 1.0);
        assert_eq!(vp, before);
    }

    #[test]
    fn zoom_to_rect_centered_places_bbox_center_at_area_center() {
        let mut vp = Viewport::new(100.0, 100.0);
        vp.zoom_to_rect(Rect::new(0.0, 0.0, 50.0, 50.0), 1.0, true);
        let (sx, sy) = vp.world_to_screen(Point::new(25.0, 25.0));
        assert!((sx - 50.0).abs() < 1e-9);
        assert!((sy - 50.0).abs() < 1e-9);
    }

    #[test]
    fn change_linewidth_negative_derives_from_zoom() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.zoom = 4.0;
        vp.change_linewidth(-1.0);
        assert_eq!(vp.linewidth, 1.0);
        vp.zoom = 0.1;
        vp.change_linewidth(-1.0);
        assert!((vp.linewidth - 10.0).abs() < 1e-9);
    }
}
