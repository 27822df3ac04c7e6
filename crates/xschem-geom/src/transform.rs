//! Instance placement transform: flip-then-rotate around an origin.
//!
//! Matches the source `ROTATION` macro convention: a point local to a
//! symbol is first mirrored across the vertical axis if `flip` is set,
//! then rotated by `rot` quadrants (each one 90 degrees counter-clockwise),
//! then translated by the instance origin. Keeping flip and rotation as
//! two small pure steps (rather than a single baked rotation matrix) keeps
//! the 8 possible orientations easy to enumerate and test individually.

use crate::Point;

/// One of the 8 placement orientations an instance can have: 4 rotations,
/// each with or without a horizontal flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    pub rotation: u8,
    pub flip: bool,
}

impl Orientation {
    pub fn new(rotation: u8, flip: bool) -> Self {
        Self {
            rotation: rotation % 4,
            flip,
        }
    }

    pub const fn identity() -> Self {
        Self {
            rotation: 0,
            flip: false,
        }
    }
}

/// Apply flip-then-rotate-then-translate to a point local to a symbol,
/// around the given translation origin. `center` is the pivot for the
/// flip/rotation step (normally the symbol's own origin, i.e. (0,0)).
pub fn rotate_flip(orientation: Orientation, center: Point, p: Point, translate: Point) -> Point {
    let mut x = p.x - center.x;
    let mut y = p.y - center.y;

    if orientation.flip {
        x = -x;
    }

    let (rx, ry) = match orientation.rotation % 4 {
        0 => (x, y),
        1 => (-y, x),
        2 => (-x, -y),
        3 => (y, -x),
        _ => unreachable!(),
    };

    Point::new(rx + center.x + translate.x, ry + center.y + translate.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_noop_plus_translate() {
        let p = Point::new(3.0, 4.0);
        let out = rotate_flip(Orientation::identity(), Point::origin(), p, Point::new(1.0, 1.0));
        assert_eq!(out, Point::new(4.0, 5.0));
    }

    #[test]
    fn rotate_90_swaps_axes() {
        let p = Point::new(1.0, 0.0);
        let out = rotate_flip(Orientation::new(1, false), Point::origin(), p, Point::origin());
        assert_eq!(out, Point::new(0.0, 1.0));
    }

    #[test]
    fn flip_mirrors_before_rotate() {
        let p = Point::new(1.0, 0.0);
        let out = rotate_flip(Orientation::new(0, true), Point::origin(), p, Point::origin());
        assert_eq!(out, Point::new(-1.0, 0.0));
    }

    #[test]
    fn rotation_wraps_modulo_four() {
        let o = Orientation::new(5, false);
        assert_eq!(o.rotation, 1);
    }

    #[test]
    fn four_rotations_are_identity() {
        let p = Point::new(3.0, -2.0);
        let mut cur = p;
        for _ in 0..4 {
            cur = rotate_flip(Orientation::new(1, false), Point::origin(), cur, Point::origin());
        }
        assert!((cur.x - p.x).abs() < 1e-9);
        assert!((cur.y - p.y).abs() < 1e-9);
    }
}
