//! Bucket coordinate math for the uniform-grid spatial index.

use xschem_geom::{Point, Rect};

pub type BucketCoord = (i64, i64);

/// Maps a world point to the bucket it falls in, given a bucket side
/// length. Uses floor division (not truncation) so negative coordinates
/// bucket consistently with positive ones.
pub fn bucket_of(p: Point, bucket_side: f64) -> BucketCoord {
    ((p.x / bucket_side).floor() as i64, (p.y / bucket_side).floor() as i64)
}

/// Every bucket coordinate overlapping `rect`, inclusive of the edges.
pub fn buckets_overlapping(rect: &Rect, bucket_side: f64) -> Vec<BucketCoord> {
    let n = rect.normalized();
    let (x1, y1) = bucket_of(Point::new(n.x1, n.y1), bucket_side);
    let (x2, y2) = bucket_of(Point::new(n.x2, n.y2), bucket_side);
    let mut out = Vec::with_capacity(((x2 - x1 + 1) * (y2 - y1 + 1)) as usize);
    for bx in x1..=x2 {
        for by in y1..=y2 {
            out.push((bx, by));
        }
    }
    out
}
