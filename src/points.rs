use std::borrow::Cow;

use crate::shape::Point;

/// new type for point id, it is the index in the caller's point slice.
/// Ids at or past the real point count belong to the supertriangle.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PointId(pub(crate) usize);

impl PointId {
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl From<PointId> for usize {
    fn from(value: PointId) -> Self {
        value.0
    }
}

/// Coordinate the sweep advances along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortAxis {
    #[default]
    X,
    Y,
}

impl SortAxis {
    /// coordinate along the sweep direction
    #[inline]
    pub fn primary(&self, point: Point) -> f64 {
        match self {
            SortAxis::X => point.x,
            SortAxis::Y => point.y,
        }
    }
}

/// Point store, real points are borrowed (or owned) as given, the three
/// supertriangle vertices live after them.
#[derive(Debug, Clone)]
pub struct Points<'a> {
    points: Cow<'a, [Point]>,
    supertriangle: [Point; 3],
    extent: f64,
}

impl<'a> Points<'a> {
    pub fn new(points: Cow<'a, [Point]>, supertriangle: [Point; 3]) -> Self {
        let extent = bounding_extent(&points);
        Self {
            points,
            supertriangle,
            extent,
        }
    }

    /// Larger side of the real points' bounding box, 1 when the box is
    /// empty or flat in both directions. Tolerances scale with it.
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// number of real points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// real point slice, in caller order
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn get_point(&self, point_id: PointId) -> Option<Point> {
        let n = self.points.len();
        if point_id.0 < n {
            Some(self.points[point_id.0])
        } else {
            self.supertriangle.get(point_id.0 - n).copied()
        }
    }

    /// Point by id. Ids are only handed out by this store, an unknown id is a bug.
    #[inline]
    pub(crate) fn point(&self, point_id: PointId) -> Point {
        let n = self.points.len();
        if point_id.0 < n {
            self.points[point_id.0]
        } else {
            self.supertriangle[point_id.0 - n]
        }
    }

    /// whether the id refers to a caller point rather than a supertriangle vertex
    #[inline]
    pub fn is_real(&self, point_id: PointId) -> bool {
        point_id.0 < self.points.len()
    }

    pub fn supertriangle_ids(&self) -> [PointId; 3] {
        let n = self.points.len();
        [PointId(n), PointId(n + 1), PointId(n + 2)]
    }

    /// Ids of real points in sweep order: ascending along `axis`, ties keep
    /// caller order.
    pub fn sorted_ids(&self, axis: SortAxis) -> Vec<PointId> {
        let mut ids = (0..self.points.len()).map(PointId).collect::<Vec<_>>();
        ids.sort_by(|a, b| {
            axis.primary(self.points[a.0])
                .total_cmp(&axis.primary(self.points[b.0]))
        });
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointId, Point)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(idx, p)| (PointId(idx), *p))
    }
}

fn bounding_extent(points: &[Point]) -> f64 {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min = Point::new(min.x.min(p.x), min.y.min(p.y));
        max = Point::new(max.x.max(p.x), max.y.max(p.y));
    }

    let extent = (max.x - min.x).max(max.y - min.y);
    if extent > 0. && extent.is_finite() {
        extent
    } else {
        1.
    }
}
