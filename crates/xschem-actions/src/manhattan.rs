//! Manhattan routing (spec §4.7/§C.6), grounded on `actions.c::new_wire`'s
//! `manhattan_lines` handling: a clicked start/end pair is split into one
//! or two orthogonal segments, dropping whichever leg would be
//! zero-length rather than emitting a degenerate wire.

use xschem_geom::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Manhattan {
    Direct,
    HorizontalThenVertical,
    VerticalThenHorizontal,
}

impl Manhattan {
    pub fn from_mode(mode: u8) -> Self {
        match mode {
            1 => Manhattan::HorizontalThenVertical,
            2 => Manhattan::VerticalThenHorizontal,
            _ => Manhattan::Direct,
        }
    }
}

/// Splits `start..end` into its constituent segments under `mode`,
/// dropping any leg whose endpoints coincide.
pub fn route(start: Point, end: Point, mode: Manhattan) -> Vec<(Point, Point)> {
    match mode {
        Manhattan::Direct => vec![(start, end)],
        Manhattan::HorizontalThenVertical => {
            let corner = Point::new(end.x, start.y);
            let mut out = Vec::with_capacity(2);
            if corner.x != start.x {
                out.push((start, corner));
            }
            if end.y != corner.y {
                out.push((corner, end));
            }
            out
        }
        Manhattan::VerticalThenHorizontal => {
            let corner = Point::new(start.x, end.y);
            let mut out = Vec::with_capacity(2);
            if corner.y != start.y {
                out.push((start, corner));
            }
            if end.x != corner.x {
                out.push((corner, end));
            }
            out
        }
    }
}
