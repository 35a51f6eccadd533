use crate::shape::Point;

/// Extent multiple for the supertriangle, large enough that its own
/// circumcircle does not re-enter the sweep.
pub const DEFAULT_SUPERTRIANGLE_SCALE: f64 = 20.;

/// Three points forming a triangle that strictly encloses the bounding box
/// of `points`: one below-left, one above the box center, one below-right,
/// each offset by `scale` times the larger box extent.
///
/// `points` must be non empty. A zero-extent box (all points equal) still
/// yields a triangle, offset by one unit.
pub fn supertriangle(points: &[Point], scale: f64) -> [Point; 3] {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let dx = max_x - min_x;
    let dy = max_y - min_y;
    let mut d_max = dx.max(dy);
    if d_max <= 0. {
        d_max = 1.;
    }
    let mid_x = min_x + dx * 0.5;
    let mid_y = min_y + dy * 0.5;

    [
        Point::new(mid_x - scale * d_max, mid_y - d_max),
        Point::new(mid_x, mid_y + scale * d_max),
        Point::new(mid_x + scale * d_max, mid_y - d_max),
    ]
}
