//! Line/Rect/Arc/Polygon placement (spec §4.7): each follows the same
//! idle/armed/commit shape as wire placement, but with its own click
//! count and geometry-building rule.

use xschem_events::Phase;
use xschem_geom::{ArcFromThreePoints, ArcItem, LineItem, Point, Polygon, PolygonItem, Rect, RectItem};
use xschem_io::Renderer;
use xschem_render::BboxController;
use xschem_state::{Sheet, UndoEngine};

/// Line placement: two clicks, no intermediate rubber geometry beyond the
/// single segment from the first click to the cursor.
#[derive(Debug, Default)]
pub struct LinePlacement {
    start: Option<Point>,
}

impl LinePlacement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.start.is_some()
    }

    pub fn handle(
        &mut self,
        sheet: &mut Sheet,
        undo: &mut UndoEngine,
        bbox: &mut BboxController,
        renderer: &mut dyn Renderer,
        layer: u8,
        point: Point,
        phase: Phase,
    ) -> bool {
        match phase {
            Phase::Place => match self.start.take() {
                None => {
                    self.start = Some(point);
                    bbox.start(Rect::from_point(point));
                    false
                }
                Some(start) => {
                    undo.push_snapshot(sheet);
                    let item = LineItem::new(layer, start, point);
                    bbox.add(item.bbox());
                    if let Some(l) = sheet.layer_mut(layer) {
                        l.lines.push(item);
                    }
                    true
                }
            },
            Phase::Rubber => {
                if let Some(start) = self.start {
                    renderer.drawtemp_line(layer, xschem_io::Phase::Add, start, point);
                }
                false
            }
            Phase::Set | Phase::Clear => {
                self.start = None;
                bbox.end();
                false
            }
        }
    }
}

/// Rect placement: two clicks at opposite corners.
#[derive(Debug, Default)]
pub struct RectPlacement {
    corner: Option<Point>,
}

impl RectPlacement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.corner.is_some()
    }

    pub fn handle(
        &mut self,
        sheet: &mut Sheet,
        undo: &mut UndoEngine,
        bbox: &mut BboxController,
        renderer: &mut dyn Renderer,
        layer: u8,
        point: Point,
        phase: Phase,
    ) -> bool {
        match phase {
            Phase::Place => match self.corner.take() {
                None => {
                    self.corner = Some(point);
                    bbox.start(Rect::from_point(point));
                    false
                }
                Some(corner) => {
                    undo.push_snapshot(sheet);
                    let item = RectItem::new(layer, Rect::new(corner.x, corner.y, point.x, point.y));
                    bbox.add(item.bbox());
                    if let Some(l) = sheet.layer_mut(layer) {
                        l.rects.push(item);
                    }
                    true
                }
            },
            Phase::Rubber => {
                if let Some(corner) = self.corner {
                    renderer.drawrect(layer, xschem_io::Phase::Add, Rect::new(corner.x, corner.y, point.x, point.y));
                }
                false
            }
            Phase::Set | Phase::Clear => {
                self.corner = None;
                bbox.end();
                false
            }
        }
    }
}

/// Arc placement: three clicks (start, midpoint, end), producing a closed
/// form (center, radius, start angle, sweep) via
/// [`ArcFromThreePoints::compute`]. A `force_full_circle` flag overrides
/// the computed sweep to exactly 360 degrees.
#[derive(Debug, Default)]
pub struct ArcPlacement {
    clicks: Vec<Point>,
}

impl ArcPlacement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        !self.clicks.is_empty()
    }

    pub fn handle(
        &mut self,
        sheet: &mut Sheet,
        undo: &mut UndoEngine,
        bbox: &mut BboxController,
        renderer: &mut dyn Renderer,
        layer: u8,
        point: Point,
        phase: Phase,
        force_full_circle: bool,
    ) -> bool {
        match phase {
            Phase::Place => {
                if self.clicks.is_empty() {
                    bbox.start(Rect::from_point(point));
                }
                self.clicks.push(point);
                if self.clicks.len() < 3 {
                    return false;
                }
                let (start, mid, end) = (self.clicks[0], self.clicks[1], self.clicks[2]);
                self.clicks.clear();
                let Some(mut arc) = ArcFromThreePoints::compute(start, mid, end) else {
                    bbox.end();
                    return false;
                };
                if force_full_circle {
                    arc.force_full_circle();
                }
                undo.push_snapshot(sheet);
                let item = ArcItem::new(layer, arc);
                bbox.add(item.bbox());
                if let Some(l) = sheet.layer_mut(layer) {
                    l.arcs.push(item);
                }
                true
            }
            Phase::Rubber => {
                if let Some(&last) = self.clicks.last() {
                    renderer.drawtemp_line(layer, xschem_io::Phase::Add, last, point);
                }
                false
            }
            Phase::Set | Phase::Clear => {
                self.clicks.clear();
                bbox.end();
                false
            }
        }
    }
}

/// Polygon placement: vertices accumulate until the user explicitly
/// finishes (SET/END) or the newly added vertex closes the loop back to
/// vertex 0.
#[derive(Debug, Default)]
pub struct PolygonPlacement {
    polygon: Polygon,
}

impl PolygonPlacement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        !self.polygon.is_empty()
    }

    pub fn handle(
        &mut self,
        sheet: &mut Sheet,
        undo: &mut UndoEngine,
        bbox: &mut BboxController,
        renderer: &mut dyn Renderer,
        layer: u8,
        point: Point,
        phase: Phase,
    ) -> bool {
        match phase {
            Phase::Place => {
                if self.polygon.is_empty() {
                    bbox.start(Rect::from_point(point));
                } else {
                    bbox.add(Rect::from_point(point));
                }
                self.polygon.push_vertex(point);
                if self.polygon.closes_on_last_vertex() {
                    return self.finish(sheet, undo, bbox, layer);
                }
                false
            }
            Phase::Rubber => {
                if let Some(last) = self.last_vertex() {
                    renderer.drawtemp_line(layer, xschem_io::Phase::Add, last, point);
                }
                false
            }
            Phase::Set => self.finish(sheet, undo, bbox, layer),
            Phase::Clear => {
                self.polygon = Polygon::new();
                bbox.end();
                false
            }
        }
    }

    fn last_vertex(&self) -> Option<Point> {
        if self.polygon.is_empty() {
            None
        } else {
            Some(self.polygon.vertex(self.polygon.len() - 1))
        }
    }

    fn finish(&mut self, sheet: &mut Sheet, undo: &mut UndoEngine, bbox: &mut BboxController, layer: u8) -> bool {
        if self.polygon.len() < 3 {
            self.polygon = Polygon::new();
            bbox.end();
            return false;
        }
        undo.push_snapshot(sheet);
        let polygon = std::mem::replace(&mut self.polygon, Polygon::new());
        let item = PolygonItem::new(layer, polygon);
        if let Some(b) = item.bbox() {
            bbox.add(b);
        }
        if let Some(l) = sheet.layer_mut(layer) {
            l.polygons.push(item);
        }
        bbox.set();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xschem_io::NoopRenderer;

    fn harness() -> (Sheet, UndoEngine, BboxController, NoopRenderer) {
        (Sheet::new(8), UndoEngine::new(), BboxController::new(), NoopRenderer)
    }

    #[test]
    fn line_commits_on_second_click() {
        let (mut sheet, mut undo, mut bbox, mut r) = harness();
        let mut fsm = LinePlacement::new();
        assert!(!fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 2, Point::origin(), Phase::Place));
        assert!(fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 2, Point::new(3.0, 3.0), Phase::Place));
        assert_eq!(sheet.layer(2).unwrap().lines.len(), 1);
        assert!(!fsm.is_armed());
    }

    #[test]
    fn rect_commits_opposite_corners() {
        let (mut sheet, mut undo, mut bbox, mut r) = harness();
        let mut fsm = RectPlacement::new();
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 2, Point::origin(), Phase::Place);
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 2, Point::new(4.0, 4.0), Phase::Place);
        assert_eq!(sheet.layer(2).unwrap().rects.len(), 1);
    }

    #[test]
    fn arc_commits_on_third_click() {
        let (mut sheet, mut undo, mut bbox, mut r) = harness();
        let mut fsm = ArcPlacement::new();
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 3, Point::new(1.0, 0.0), Phase::Place, false);
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 3, Point::new(0.0, 1.0), Phase::Place, false);
        let committed =
            fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 3, Point::new(-1.0, 0.0), Phase::Place, false);
        assert!(committed);
        assert_eq!(sheet.layer(3).unwrap().arcs.len(), 1);
    }

    #[test]
    fn arc_force_full_circle_overrides_sweep() {
        let (mut sheet, mut undo, mut bbox, mut r) = harness();
        let mut fsm = ArcPlacement::new();
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 3, Point::new(1.0, 0.0), Phase::Place, true);
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 3, Point::new(0.0, 1.0), Phase::Place, true);
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 3, Point::new(-1.0, 0.0), Phase::Place, true);
        assert_eq!(sheet.layer(3).unwrap().arcs[0].arc.sweep_deg, 360.0);
    }

    #[test]
    fn polygon_closes_when_vertex_repeats_the_first() {
        let (mut sheet, mut undo, mut bbox, mut r) = harness();
        let mut fsm = PolygonPlacement::new();
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 4, Point::new(0.0, 0.0), Phase::Place);
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 4, Point::new(1.0, 0.0), Phase::Place);
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 4, Point::new(1.0, 1.0), Phase::Place);
        let committed = fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 4, Point::new(0.0, 0.0), Phase::Place);
        assert!(committed);
        assert_eq!(sheet.layer(4).unwrap().polygons.len(), 1);
        assert!(!fsm.is_armed());
    }

    #[test]
    fn polygon_explicit_set_closes_with_three_vertices() {
        let (mut sheet, mut undo, mut bbox, mut r) = harness();
        let mut fsm = PolygonPlacement::new();
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 4, Point::new(0.0, 0.0), Phase::Place);
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 4, Point::new(1.0, 0.0), Phase::Place);
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 4, Point::new(1.0, 1.0), Phase::Place);
        let committed = fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 4, Point::new(1.0, 1.0), Phase::Set);
        assert!(committed);
        assert_eq!(sheet.layer(4).unwrap().polygons.len(), 1);
    }

    #[test]
    fn clear_discards_the_in_progress_polygon() {
        let (mut sheet, mut undo, mut bbox, mut r) = harness();
        let mut fsm = PolygonPlacement::new();
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 4, Point::new(0.0, 0.0), Phase::Place);
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 4, Point::new(1.0, 0.0), Phase::Place);
        fsm.handle(&mut sheet, &mut undo, &mut bbox, &mut r, 4, Point::origin(), Phase::Clear);
        assert!(!fsm.is_armed());
        assert!(sheet.layer(4).unwrap().polygons.is_empty());
    }
}
