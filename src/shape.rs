use crate::PointId;

/// An undirected edge between two points. Construction keeps the
/// direction it was found in, use [`Edge::canonical`] for comparisons.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Edge {
    pub p: PointId,
    pub q: PointId,
}

impl Edge {
    pub fn new(p: PointId, q: PointId) -> Self {
        Self { p, q }
    }

    /// same edge with the lower id first, so (a, b) and (b, a) compare equal
    pub fn canonical(&self) -> Self {
        if self.p <= self.q {
            *self
        } else {
            Self {
                p: self.q,
                q: self.p,
            }
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            p: self.q,
            q: self.p,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Default for Point {
    fn default() -> Self {
        Self { x: 0., y: 0. }
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// both coordinates are finite, the precondition for triangulation
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// One output triangle, ids refer back into the caller's point slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub points: [PointId; 3],
}

impl Triangle {
    pub fn new(a: PointId, b: PointId, c: PointId) -> Self {
        Self { points: [a, b, c] }
    }

    /// whether contains the point
    pub fn contains(&self, point_id: PointId) -> bool {
        self.points[0] == point_id || self.points[1] == point_id || self.points[2] == point_id
    }

    /// The three edges in vertex order: p0p1, p1p2, p2p0
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.points;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }

    /// The point following `point` in vertex order
    pub fn point_ccw(&self, point: PointId) -> Option<PointId> {
        let index = self.point_index(point)?;
        Some(self.points[(index + 1) % 3])
    }

    /// get point index
    pub fn point_index(&self, point: PointId) -> Option<usize> {
        if self.points[0] == point {
            Some(0)
        } else if self.points[1] == point {
            Some(1)
        } else if self.points[2] == point {
            Some(2)
        } else {
            None
        }
    }

    /// same triangle with the last two vertices swapped
    pub fn flipped(&self) -> Self {
        let [a, b, c] = self.points;
        Self { points: [a, c, b] }
    }
}
