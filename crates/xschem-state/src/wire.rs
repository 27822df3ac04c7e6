//! A conductor segment between two points.

use xschem_geom::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub p1: Point,
    pub p2: Point,
    pub is_bus: bool,
    pub selected: bool,
    pub attr: String,
    /// Resolved electrical net name, filled in by netlisting (out of
    /// scope here); `None` until then.
    pub net_name: Option<String>,
}

impl Wire {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self {
            p1,
            p2,
            is_bus: false,
            selected: false,
            attr: String::new(),
            net_name: None,
        }
    }

    /// A zero-length wire is a legal placeholder left by the kissing-pin
    /// feature (spec §4.5), not a malformed edge to reject.
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    pub fn bbox(&self) -> Rect {
        Rect::from_point(self.p1).union(&Rect::from_point(self.p2))
    }

    /// True if `p` lies on the segment (inclusive of endpoints), the
    /// `touch()` test `actions.c` uses for kissing-pin detection and wire
    /// trimming. Degenerate (zero-length) wires only touch their own
    /// single point.
    pub fn touches_point(&self, p: xschem_geom::Point) -> bool {
        if self.is_degenerate() {
            return self.p1 == p;
        }
        let b = self.bbox();
        if !b.contains_point(p) {
            return false;
        }
        let (dx, dy) = (self.p2.x - self.p1.x, self.p2.y - self.p1.y);
        let (px, py) = (p.x - self.p1.x, p.y - self.p1.y);
        // Collinearity via the cross product; bbox containment above
        // already ensures `p` is between the endpoints along that line.
        (dx * py - dy * px).abs() < 1e-9
    }

    pub fn is_own_endpoint(&self, p: xschem_geom::Point) -> bool {
        p == self.p1 || p == self.p2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_wire_is_degenerate() {
        let w = Wire::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        assert!(w.is_degenerate());
    }

    #[test]
    fn distinct_endpoints_are_not_degenerate() {
        let w = Wire::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        assert!(!w.is_degenerate());
    }

    #[test]
    fn touches_point_on_segment_interior() {
        let w = Wire::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!(w.touches_point(Point::new(5.0, 0.0)));
        assert!(!w.touches_point(Point::new(5.0, 1.0)));
    }

    #[test]
    fn touches_point_rejects_collinear_but_out_of_range() {
        let w = Wire::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!(!w.touches_point(Point::new(15.0, 0.0)));
    }

    #[test]
    fn degenerate_wire_only_touches_its_own_point() {
        let w = Wire::new(Point::new(3.0, 3.0), Point::new(3.0, 3.0));
        assert!(w.touches_point(Point::new(3.0, 3.0)));
        assert!(!w.touches_point(Point::new(3.0, 4.0)));
    }

    #[test]
    fn is_own_endpoint_checks_either_end() {
        let w = Wire::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!(w.is_own_endpoint(Point::new(0.0, 0.0)));
        assert!(w.is_own_endpoint(Point::new(10.0, 0.0)));
        assert!(!w.is_own_endpoint(Point::new(5.0, 0.0)));
    }
}
