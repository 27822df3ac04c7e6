//! Three-point arc construction.
//!
//! Wire, line, rect and polygon placement are all driven by simple click
//! sequences; arcs are the one primitive whose parameters (center, radius,
//! start angle, sweep) are *derived* rather than stored directly as clicked
//! coordinates. The derivation is a closed-form circumcircle computation
//! followed by picking the sweep direction that actually passes through
//! the middle click point.

use crate::Point;

/// A circular arc: `sweep_deg` is signed (positive = counter-clockwise) and
/// may exceed +/-360 only in the forced full-circle case, where it is
/// exactly 360.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
}

impl Arc {
    /// Force this arc to a full circle, keeping center/radius/start but
    /// setting the sweep to exactly 360 degrees, regardless of how the
    /// three click points were actually laid out.
    pub fn force_full_circle(&mut self) {
        self.sweep_deg = 360.0;
    }
}

/// Namespace for the three-point-to-arc closed form; kept as a unit struct
/// so the conversion reads as `ArcFromThreePoints::compute(..)` at call
/// sites, mirroring how the source keeps this as a standalone helper
/// rather than a method on a half-built arc value.
pub struct ArcFromThreePoints;

impl ArcFromThreePoints {
    /// `start`, `mid`, `end` are the three clicks, in click order. Returns
    /// `None` for (near-)collinear points, which cannot form a circle.
    pub fn compute(start: Point, mid: Point, end: Point) -> Option<Arc> {
        let (ax, ay) = (start.x, start.y);
        let (bx, by) = (mid.x, mid.y);
        let (cx, cy) = (end.x, end.y);

        let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        if d.abs() < 1e-9 {
            return None;
        }

        let a2 = ax * ax + ay * ay;
        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;

        let ux = (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) / d;
        let uy = (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) / d;
        let center = Point::new(ux, uy);
        let radius = center.distance(start);
        if radius < 1e-9 {
            return None;
        }

        let angle_of = |p: Point| (p.y - center.y).atan2(p.x - center.x).to_degrees();
        let a1 = normalize_deg(angle_of(start));
        let a2deg = normalize_deg(angle_of(mid));
        let a3 = normalize_deg(angle_of(end));

        let ccw_sweep = normalize_deg(a3 - a1);
        let mid_rel = normalize_deg(a2deg - a1);
        let sweep_deg = if mid_rel <= ccw_sweep {
            ccw_sweep
        } else {
            ccw_sweep - 360.0
        };

        Some(Arc {
            center,
            radius,
            start_deg: a1,
            sweep_deg,
        })
    }
}

fn normalize_deg(a: f64) -> f64 {
    let r = a % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}
