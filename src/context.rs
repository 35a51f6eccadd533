use crate::{
    circumcircle::{CircleId, Circles},
    edge::EdgeBuffer,
    points::Points,
    Triangle,
};

/// Working state of one triangulation run. Owned by a single call, which is
/// what keeps [`crate::Sweeper`] reentrant.
pub struct Context<'a> {
    pub points: &'a Points<'a>,
    pub circles: Circles,
    /// circles that a later point may still invalidate
    pub open: Vec<CircleId>,
    /// circles proven final
    pub closed: Vec<CircleId>,
    pub edges: EdgeBuffer,

    // reusable scratch list for the open scan to reduce alloc overhead
    pub(crate) next_open: Vec<CircleId>,
}

impl<'a> Context<'a> {
    pub fn new(points: &'a Points<'a>) -> Self {
        // a planar triangulation of n points has fewer than 2n triangles,
        // and each insertion creates a handful of short lived circles
        let circle_capacity = points.len() * 6 + 1;
        Self {
            points,
            circles: Circles::with_capacity(circle_capacity),
            open: Vec::with_capacity(64),
            closed: Vec::with_capacity(points.len() * 2),
            edges: EdgeBuffer::with_capacity(32),

            next_open: Vec::with_capacity(64),
        }
    }

    /// Triangles of closed then open circles whose vertices are all real
    /// points, the sweep's raw result.
    pub fn real_triangles(&self) -> Vec<Triangle> {
        self.closed
            .iter()
            .chain(self.open.iter())
            .map(|id| id.get(&self.circles))
            .filter(|circle| circle.is_real(self.points))
            .map(|circle| circle.triangle())
            .collect()
    }
}
