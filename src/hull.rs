//! Hull-closing pass.
//!
//! With a finite supertriangle, a circle through a supertriangle vertex can
//! swallow nearly collinear hull points, and the triangles along that stretch
//! of the hull never make it into the result. This pass walks the boundary of
//! the mesh the sweep produced, fills every concave notch with an ear and
//! restores the Delaunay property around each ear by edge flips.

use rustc_hash::FxHashMap;

use crate::{
    points::Points,
    shape::{Edge, Point, Triangle},
    utils::{in_circle, in_triangle, orient_2d, orient_2d_value, Orientation},
    PointId,
};

/// Same triangle with counter clockwise vertex order, `None` when the three
/// points are collinear.
pub(crate) fn orient_ccw(points: &Points, triangle: Triangle) -> Option<Triangle> {
    let [a, b, c] = triangle.points;
    match orient_2d(points.point(a), points.point(b), points.point(c)) {
        Orientation::CCW => Some(triangle),
        Orientation::CW => Some(triangle.flipped()),
        Orientation::Collinear => None,
    }
}

/// Triangle mesh with a directed edge index. Every triangle is counter
/// clockwise, so an edge `p -> q` belongs to at most one triangle and its
/// twin `q -> p` to the neighbor across it.
struct Mesh<'a, 'p> {
    points: &'a Points<'p>,
    triangles: Vec<Triangle>,
    edges: FxHashMap<Edge, usize>,
}

impl<'a, 'p> Mesh<'a, 'p> {
    fn new(points: &'a Points<'p>, triangles: Vec<Triangle>) -> Self {
        let mut mesh = Self {
            points,
            edges: FxHashMap::with_capacity_and_hasher(triangles.len() * 3, Default::default()),
            triangles: Vec::with_capacity(triangles.len() + 16),
        };
        for triangle in triangles {
            mesh.insert(triangle);
        }
        mesh
    }

    fn insert(&mut self, triangle: Triangle) -> usize {
        let index = self.triangles.len();
        self.triangles.push(triangle);
        for edge in triangle.edges() {
            self.edges.insert(edge, index);
        }
        index
    }

    fn replace(&mut self, index: usize, triangle: Triangle) {
        for edge in self.triangles[index].edges() {
            if self.edges.get(&edge) == Some(&index) {
                self.edges.remove(&edge);
            }
        }
        self.triangles[index] = triangle;
        for edge in triangle.edges() {
            self.edges.insert(edge, index);
        }
    }

    /// directed edges without a twin, in triangle order
    fn boundary(&self) -> Vec<Edge> {
        self.triangles
            .iter()
            .flat_map(|t| t.edges())
            .filter(|e| !self.edges.contains_key(&e.reversed()))
            .collect()
    }

    /// Lawson flips until every edge on the stack is locally Delaunay.
    fn legalize(&mut self, mut stack: Vec<Edge>) {
        let mut budget = self.triangles.len() * 64 + 1024;

        while let Some(edge) = stack.pop() {
            if budget == 0 {
                log::warn!("hull pass: flip budget exhausted, mesh may not be Delaunay");
                return;
            }

            let (Some(&t1), Some(&t2)) = (self.edges.get(&edge), self.edges.get(&edge.reversed()))
            else {
                continue;
            };
            // t1 runs u -> v -> w, t2 runs v -> u -> x
            let (u, v) = (edge.p, edge.q);
            let (Some(w), Some(x)) = (
                self.triangles[t1].point_ccw(v),
                self.triangles[t2].point_ccw(u),
            ) else {
                continue;
            };

            let p = |id: PointId| self.points.point(id);
            if !in_circle(p(w), p(u), p(v), p(x)) {
                continue;
            }

            budget -= 1;
            self.replace(t1, Triangle::new(w, u, x));
            self.replace(t2, Triangle::new(w, x, v));
            stack.extend([
                Edge::new(u, x),
                Edge::new(x, v),
                Edge::new(v, w),
                Edge::new(w, u),
            ]);
        }
    }
}

/// No other input point lies in or on counter clockwise ear `a b c`.
/// Points within `epsilon` times the extent of a corner are duplicates of
/// it and do not count.
fn ear_is_empty(points: &Points, ear: [PointId; 3], epsilon: f64) -> bool {
    let min_squared = (epsilon * points.extent()).powi(2);
    let corners = ear.map(|id| points.point(id));
    let [pa, pb, pc] = corners;
    !points.iter().any(|(id, p)| {
        !ear.contains(&id)
            && corners.iter().all(|v| v.distance_squared(p) > min_squared)
            && in_triangle(p, pa, pb, pc)
    })
}

/// Seed for a run where no triangle survived: the widest triangle over the
/// lexicographically first and last points, if it is empty.
fn seed_triangle(points: &Points, epsilon: f64) -> Option<Triangle> {
    let lex = |a: &(PointId, Point), b: &(PointId, Point)| {
        a.1.x.total_cmp(&b.1.x).then(a.1.y.total_cmp(&b.1.y))
    };
    let (a, pa) = points.iter().min_by(lex)?;
    let (b, pb) = points.iter().max_by(lex)?;

    let (c, area) = points
        .iter()
        .filter(|(id, _)| *id != a && *id != b)
        .map(|(id, p)| (id, orient_2d_value(pa, pb, p)))
        .max_by(|x, y| x.1.abs().total_cmp(&y.1.abs()))?;
    if area == 0. {
        return None;
    }

    let triangle = if area > 0. {
        Triangle::new(a, b, c)
    } else {
        Triangle::new(a, c, b)
    };
    ear_is_empty(points, triangle.points, epsilon).then_some(triangle)
}

/// Fill concave notches along the mesh boundary. Triangles must be counter
/// clockwise.
pub(crate) fn close_hull(points: &Points, triangles: Vec<Triangle>, epsilon: f64) -> Vec<Triangle> {
    let mut triangles = triangles;
    if triangles.is_empty() {
        match seed_triangle(points, epsilon) {
            Some(seed) => triangles.push(seed),
            None => return triangles,
        }
    }

    let mut mesh = Mesh::new(points, triangles);

    let mut next = FxHashMap::<PointId, PointId>::default();
    let mut prev = FxHashMap::<PointId, PointId>::default();
    let boundary = mesh.boundary();
    for edge in boundary.iter() {
        if next.insert(edge.p, edge.q).is_some() || prev.insert(edge.q, edge.p).is_some() {
            log::warn!(
                "hull pass: boundary pinched at point {}, skipped",
                edge.p.as_usize()
            );
            return mesh.triangles;
        }
    }

    let mut work = boundary.iter().map(|e| e.p).collect::<Vec<_>>();
    while let Some(b) = work.pop() {
        let (Some(&a), Some(&c)) = (prev.get(&b), next.get(&b)) else {
            continue;
        };
        if a == c {
            continue;
        }

        if !orient_2d(points.point(a), points.point(b), points.point(c)).is_cw() {
            continue;
        }

        // reflex corner, the notch a -> c -> b is outside the mesh
        let ear = [a, c, b];
        if !ear_is_empty(points, ear, epsilon) {
            continue;
        }

        mesh.insert(Triangle::new(a, c, b));
        next.remove(&b);
        prev.remove(&b);
        next.insert(a, c);
        prev.insert(c, a);
        mesh.legalize(vec![Edge::new(c, b), Edge::new(b, a)]);

        work.push(a);
        work.push(c);
    }

    let blocked = next
        .iter()
        .filter(|&(b, c)| {
            prev.get(b).map_or(false, |a| {
                orient_2d(points.point(*a), points.point(*b), points.point(*c)).is_cw()
            })
        })
        .count();
    if blocked > 0 {
        log::warn!("hull pass: {blocked} notches blocked by points outside the mesh");
    }

    mesh.triangles
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::DEFAULT_EPSILON;

    fn store(raw: Vec<Point>) -> Points<'static> {
        Points::new(Cow::Owned(raw), [Point::default(); 3])
    }

    fn t(a: usize, b: usize, c: usize) -> Triangle {
        Triangle::new(PointId(a), PointId(b), PointId(c))
    }

    #[test]
    fn test_orient_ccw() {
        let points = store(vec![
            Point::new(0., 0.),
            Point::new(1., 0.),
            Point::new(0., 1.),
            Point::new(2., 0.),
        ]);
        assert_eq!(orient_ccw(&points, t(0, 1, 2)), Some(t(0, 1, 2)));
        assert_eq!(orient_ccw(&points, t(0, 2, 1)), Some(t(0, 1, 2)));
        assert_eq!(orient_ccw(&points, t(0, 1, 3)), None);
    }

    #[test]
    fn test_fill_notch() {
        //
        //  3 ------- 2
        //  |       / |
        //  |     /   |
        //  |   4     |
        //  0 ------- 1
        //
        // mesh covers 0-2-3, 4-1-2 and 0-4-2, the notch 0-1-4 is missing
        let points = store(vec![
            Point::new(0., 0.),
            Point::new(10., 0.),
            Point::new(10., 10.),
            Point::new(0., 10.),
            Point::new(5., 2.),
        ]);
        let triangles = vec![t(0, 2, 3), t(4, 1, 2), t(0, 4, 2)];

        let closed = close_hull(&points, triangles, DEFAULT_EPSILON);
        assert_eq!(closed.len(), 4);
        assert!(closed.iter().any(|tri| {
            tri.contains(PointId(0)) && tri.contains(PointId(1)) && tri.contains(PointId(4))
        }));
    }

    #[test]
    fn test_notch_blocked_at_small_scale() {
        // the notch layout above shrunk to 1e-3 across, 5 sits inside notch 0-1-4
        let s = 1e-4;
        let raw = vec![
            Point::new(0., 0.),
            Point::new(10. * s, 0.),
            Point::new(10. * s, 10. * s),
            Point::new(0., 10. * s),
            Point::new(5. * s, 2. * s),
            Point::new(5. * s, 1. * s),
        ];
        let triangles = vec![t(0, 2, 3), t(4, 1, 2), t(0, 4, 2)];

        let closed = close_hull(&store(raw.clone()), triangles.clone(), DEFAULT_EPSILON);
        assert_eq!(closed, triangles);

        // without 5 the notch fills
        let closed = close_hull(&store(raw[..5].to_vec()), triangles, DEFAULT_EPSILON);
        assert_eq!(closed.len(), 4);
    }

    #[test]
    fn test_legalize_flips_illegal_edge() {
        //
        //        2
        //  0 --------- 1
        //        3
        //
        let points = store(vec![
            Point::new(0., 0.),
            Point::new(10., 0.),
            Point::new(5., 1.),
            Point::new(5., -1.),
        ]);
        let mut mesh = Mesh::new(&points, vec![t(0, 1, 2), t(1, 0, 3)]);
        mesh.legalize(vec![Edge::new(PointId(0), PointId(1))]);

        for tri in mesh.triangles.iter() {
            assert!(tri.contains(PointId(2)) && tri.contains(PointId(3)));
            assert_eq!(orient_ccw(&points, *tri), Some(*tri));
        }
        assert!(mesh.edges.contains_key(&Edge::new(PointId(2), PointId(3)))
            || mesh.edges.contains_key(&Edge::new(PointId(3), PointId(2))));
        assert!(!mesh.edges.contains_key(&Edge::new(PointId(0), PointId(1))));
    }

    #[test]
    fn test_fill_notch_under_fan() {
        // fan from 0 leaves the notch 1-2-3 open
        let points = store(vec![
            Point::new(0., 10.),
            Point::new(-10., 0.),
            Point::new(0., 1.),
            Point::new(10., 0.),
        ]);
        let triangles = vec![t(0, 1, 2), t(0, 2, 3)];

        let closed = close_hull(&points, triangles, DEFAULT_EPSILON);
        assert_eq!(closed.len(), 3);
        // 1-2-3 notch is filled
        assert!(closed.iter().any(|tri| {
            tri.contains(PointId(1)) && tri.contains(PointId(2)) && tri.contains(PointId(3))
        }));
    }

    #[test]
    fn test_seed_triangle() {
        // thin but not collinear
        let points = store(vec![
            Point::new(0., 0.),
            Point::new(50., 0.1),
            Point::new(100., 0.),
        ]);
        let closed = close_hull(&points, vec![], DEFAULT_EPSILON);
        assert_eq!(closed, vec![t(0, 2, 1)]);

        let collinear = store(vec![
            Point::new(0., 0.),
            Point::new(5., 0.),
            Point::new(10., 0.),
        ]);
        assert!(close_hull(&collinear, vec![], DEFAULT_EPSILON).is_empty());
    }

    #[test]
    fn test_convex_mesh_untouched() {
        let points = store(vec![
            Point::new(0., 0.),
            Point::new(10., 0.),
            Point::new(10., 10.),
            Point::new(0., 10.),
        ]);
        let triangles = vec![t(0, 1, 2), t(0, 2, 3)];
        assert_eq!(close_hull(&points, triangles.clone(), DEFAULT_EPSILON), triangles);
    }
}
