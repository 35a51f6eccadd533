use crate::{
    points::{Points, SortAxis},
    shape::{Point, Triangle},
    PointId,
};

/// Relative tolerance of the geometric tests. A point counts as on a circle
/// when its squared distance to the center is within `epsilon * r²` of the
/// radius (capped at the squared bounding box extent), and two vertices
/// closer than `epsilon` times that extent are treated as one. The default
/// holds at any coordinate scale.
pub const DEFAULT_EPSILON: f64 = 1.0 / 1048576.0;

/// A candidate triangle together with its circumscribed circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    pub points: [PointId; 3],
    pub center: Point,
    /// squared radius, saves the square root
    pub radius_squared: f64,
    /// how far past the radius, in squared distance, still counts as on the circle
    pub slack: f64,
}

impl Circumcircle {
    /// Circle through points `i`, `j` and `k`, found by intersecting
    /// perpendicular bisectors.
    ///
    /// Returns `None` for a degenerate triple: all three points on one
    /// horizontal line, two points closer than `epsilon` times the bounding
    /// box extent, or a collinear triple whose bisectors never meet.
    pub fn new(
        points: &Points,
        i: PointId,
        j: PointId,
        k: PointId,
        epsilon: f64,
    ) -> Option<Self> {
        let p1 = points.point(i);
        let p2 = points.point(j);
        let p3 = points.point(k);

        let extent_squared = points.extent() * points.extent();
        let min_squared = epsilon * epsilon * extent_squared;
        if p1.distance_squared(p2) <= min_squared
            || p2.distance_squared(p3) <= min_squared
            || p3.distance_squared(p1) <= min_squared
        {
            return None;
        }

        let center = circumcenter(p1, p2, p3, epsilon)?;
        if !center.is_finite() {
            return None;
        }

        let radius_squared = p2.distance_squared(center);
        Some(Self {
            points: [i, j, k],
            center,
            radius_squared,
            slack: epsilon * radius_squared.min(extent_squared),
        })
    }

    /// `point` lies inside the circle or on its border
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.distance_squared(self.center) - self.radius_squared <= self.slack
    }

    /// `point` is ahead of the whole circle along `axis`. Every later point
    /// in sweep order is further ahead, so the circle can never be
    /// invalidated again.
    #[inline]
    pub fn is_left_behind(&self, point: Point, axis: SortAxis) -> bool {
        let d = axis.primary(point) - axis.primary(self.center);
        d > 0. && d * d - self.radius_squared > self.slack
    }

    /// none of the vertices is a supertriangle vertex
    pub fn is_real(&self, points: &Points) -> bool {
        self.points.iter().all(|id| points.is_real(*id))
    }

    pub fn triangle(&self) -> Triangle {
        Triangle {
            points: self.points,
        }
    }
}

fn circumcenter(p1: Point, p2: Point, p3: Point, epsilon: f64) -> Option<Point> {
    let (x1, y1) = (p1.x, p1.y);
    let (x2, y2) = (p2.x, p2.y);
    let (x3, y3) = (p3.x, p3.y);

    let abs_y1y2 = (y1 - y2).abs();
    let abs_y2y3 = (y2 - y3).abs();
    // slope below epsilon
    let flat_12 = abs_y1y2 <= epsilon * (x1 - x2).abs();
    let flat_23 = abs_y2y3 <= epsilon * (x2 - x3).abs();

    if flat_12 && flat_23 {
        return None;
    }

    let (xc, yc) = if flat_12 {
        // 1-2 horizontal, its bisector is the vertical through the midpoint
        let m2 = -((x3 - x2) / (y3 - y2));
        let mx2 = (x2 + x3) / 2.;
        let my2 = (y2 + y3) / 2.;
        let xc = (x2 + x1) / 2.;
        (xc, m2 * (xc - mx2) + my2)
    } else if flat_23 {
        let m1 = -((x2 - x1) / (y2 - y1));
        let mx1 = (x1 + x2) / 2.;
        let my1 = (y1 + y2) / 2.;
        let xc = (x3 + x2) / 2.;
        (xc, m1 * (xc - mx1) + my1)
    } else {
        let m1 = -((x2 - x1) / (y2 - y1));
        let m2 = -((x3 - x2) / (y3 - y2));
        if m1 == m2 {
            return None;
        }
        let mx1 = (x1 + x2) / 2.;
        let my1 = (y1 + y2) / 2.;
        let mx2 = (x2 + x3) / 2.;
        let my2 = (y2 + y3) / 2.;
        let xc = (m1 * mx1 - m2 * mx2 + my2 - my1) / (m1 - m2);
        // finish on the bisector of the pair with the larger y gap
        let yc = if abs_y1y2 > abs_y2y3 {
            m1 * (xc - mx1) + my1
        } else {
            m2 * (xc - mx2) + my2
        };
        (xc, yc)
    };

    Some(Point::new(xc, yc))
}

/// Arena id of a [`Circumcircle`]
#[derive(Debug, Hash, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CircleId(usize);

impl CircleId {
    pub fn as_usize(&self) -> usize {
        self.0
    }

    pub fn get<'b>(&self, circles: &'b Circles) -> &'b Circumcircle {
        &circles.circles[self.0]
    }
}

/// Circle store. Records are never removed, open/closed membership is
/// tracked by id lists in the run context.
#[derive(Debug, Default)]
pub struct Circles {
    circles: Vec<Circumcircle>,
}

impl Circles {
    pub fn new() -> Self {
        Self { circles: vec![] }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            circles: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, circle: Circumcircle) -> CircleId {
        let id = CircleId(self.circles.len());
        self.circles.push(circle);
        id
    }

    pub fn get(&self, id: CircleId) -> Option<&Circumcircle> {
        self.circles.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }
}
