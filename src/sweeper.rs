use std::borrow::Cow;

use crate::circumcircle::{CircleId, Circumcircle, DEFAULT_EPSILON};
use crate::points::{Points, SortAxis};
use crate::supertriangle::{supertriangle, DEFAULT_SUPERTRIANGLE_SCALE};
use crate::{hull, shape::*, Context, Error, PointId};

/// Observer for sweeper, used to monitor how sweeper works, quite useful
/// for visual debugging when things goes wrong. Check the shatter demo.
#[allow(unused_variables)]
pub trait Observer {
    /// About to insert a point, open circles not yet scanned
    fn point_event(&mut self, point_id: PointId, context: &Context) {}

    /// A circle moved to the closed set, the sweep has passed it
    fn circle_closed(&mut self, circle_id: CircleId, context: &Context) {}

    /// The cavity around `point_id` was retriangulated from `boundary`
    fn cavity(&mut self, point_id: PointId, boundary: &[Edge], context: &Context) {}

    /// All points inserted, before the final filter
    fn sweep_done(&mut self, context: &Context) {}

    /// The result finalized, supertriangle removed and hull closed.
    fn finalized(&mut self, triangulation: &Triangulation) {}
}

/// Default dummy observer, blank impl, so all calls should be optimized out by compiler.
impl Observer for () {}

const MIN_SUPERTRIANGLE_SCALE: f64 = 2.;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Options {
    epsilon: f64,
    sort_axis: SortAxis,
    supertriangle_scale: f64,
    close_hull: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            sort_axis: SortAxis::X,
            supertriangle_scale: DEFAULT_SUPERTRIANGLE_SCALE,
            close_hull: true,
        }
    }
}

/// Sweeper Builder
///
/// # Example
/// ```rust
///    use delaunay_sweep::{Point, SortAxis, SweeperBuilder};
///
///    let sweeper = SweeperBuilder::new(vec![
///        Point::new(0., 0.),
///        Point::new(800., 0.),
///        Point::new(800., 600.),
///        Point::new(0., 600.),
///    ])
///    .add_point(Point::new(120., 340.))
///    .sort_axis(SortAxis::Y)
///    .epsilon(1e-9)
///    .build()
///    .unwrap();
///
///    assert_eq!(sweeper.triangulate().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SweeperBuilder<'a> {
    points: Cow<'a, [Point]>,
    options: Options,
}

impl<'a> SweeperBuilder<'a> {
    /// Create a new Builder. A slice is borrowed, a `Vec` is taken over.
    pub fn new(points: impl Into<Cow<'a, [Point]>>) -> Self {
        Self {
            points: points.into(),
            options: Options::default(),
        }
    }

    /// Add a single `Point`, its id is the current point count
    pub fn add_point(mut self, point: Point) -> Self {
        self.points.to_mut().push(point);
        self
    }

    /// Add multiple [`Point`], batch version for `Self::add_point`
    pub fn add_points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.points.to_mut().extend(points);
        self
    }

    /// Relative tolerance for "on the circumcircle", "horizontal segment"
    /// and "same point" tests, in `(0, 1)`, see [`DEFAULT_EPSILON`]
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.options.epsilon = epsilon;
        self
    }

    /// Coordinate the sweep advances along
    pub fn sort_axis(mut self, sort_axis: SortAxis) -> Self {
        self.options.sort_axis = sort_axis;
        self
    }

    /// Supertriangle size as a multiple of the larger bounding box extent,
    /// at least 2
    pub fn supertriangle_scale(mut self, scale: f64) -> Self {
        self.options.supertriangle_scale = scale;
        self
    }

    /// Whether to fill hull notches the supertriangle left behind, on by default
    pub fn close_hull(mut self, close_hull: bool) -> Self {
        self.options.close_hull = close_hull;
        self
    }

    /// build the sweeper
    pub fn build(self) -> Result<Sweeper<'a>, Error> {
        let Options {
            epsilon,
            supertriangle_scale,
            ..
        } = self.options;

        if !(epsilon > 0. && epsilon < 1.) {
            return Err(Error::InvalidConfig {
                name: "epsilon",
                value: epsilon,
            });
        }
        // below ~1.37 the box corners fall outside the supertriangle
        if !supertriangle_scale.is_finite() || supertriangle_scale < MIN_SUPERTRIANGLE_SCALE {
            return Err(Error::InvalidConfig {
                name: "supertriangle_scale",
                value: supertriangle_scale,
            });
        }

        Ok(Sweeper::with_options(self.points, self.options))
    }
}

/// Main interface, grab one by [`Sweeper::new`] or [`SweeperBuilder::build`].
///
/// Point coordinates must be finite, NaN or infinite values give an
/// unspecified (but non panicking) result.
#[derive(Debug, Clone)]
pub struct Sweeper<'a> {
    points: Points<'a>,
    options: Options,
}

impl<'a> Sweeper<'a> {
    /// Sweeper with default settings
    pub fn new(points: impl Into<Cow<'a, [Point]>>) -> Self {
        Self::with_options(points.into(), Options::default())
    }

    fn with_options(points: Cow<'a, [Point]>, options: Options) -> Self {
        let st = if points.is_empty() {
            [Point::default(); 3]
        } else {
            supertriangle(&points, options.supertriangle_scale)
        };

        Self {
            points: Points::new(points, st),
            options,
        }
    }

    pub fn points(&self) -> &[Point] {
        self.points.as_slice()
    }

    /// Run triangulate with dummy observer
    pub fn triangulate(&self) -> Triangulation {
        self.triangulate_with_observer(&mut ())
    }

    /// Run triangulate with observer
    pub fn triangulate_with_observer(&self, observer: &mut impl Observer) -> Triangulation {
        if self.points.len() < 3 {
            let triangulation = Triangulation::default();
            observer.finalized(&triangulation);
            return triangulation;
        }

        let mut context = Context::new(&self.points);

        let [s0, s1, s2] = self.points.supertriangle_ids();
        if let Some(circle) = Circumcircle::new(&self.points, s0, s1, s2, self.options.epsilon) {
            let circle_id = context.circles.insert(circle);
            context.open.push(circle_id);
        }

        for point_id in self.points.sorted_ids(self.options.sort_axis) {
            self.point_event(point_id, &mut context, observer);
        }
        observer.sweep_done(&context);

        log::debug!(
            "sweep done: points: {} circles: {} closed: {} open: {}",
            self.points.len(),
            context.circles.len(),
            context.closed.len(),
            context.open.len()
        );

        let triangulation = self.finalize(&context);
        observer.finalized(&triangulation);
        triangulation
    }

    fn point_event(&self, point_id: PointId, context: &mut Context, observer: &mut impl Observer) {
        let Options {
            epsilon, sort_axis, ..
        } = self.options;
        let point = context.points.point(point_id);

        observer.point_event(point_id, context);

        let closed_before = context.closed.len();
        let open = std::mem::take(&mut context.open);
        let mut next_open = std::mem::take(&mut context.next_open);
        next_open.clear();

        for circle_id in open.iter().copied() {
            let circle = circle_id.get(&context.circles);

            if circle.is_left_behind(point, sort_axis) {
                context.closed.push(circle_id);
                continue;
            }

            if circle.contains(point) {
                // triangle invalidated, its edges go to the cavity
                context.edges.push_triangle(circle.points);
                continue;
            }

            next_open.push(circle_id);
        }

        context.open = next_open;
        context.next_open = open;

        for index in closed_before..context.closed.len() {
            observer.circle_closed(context.closed[index], context);
        }

        let mut skipped = 0usize;
        let boundary = context.edges.dedup();
        for edge in boundary.iter() {
            match Circumcircle::new(context.points, edge.p, edge.q, point_id, epsilon) {
                Some(circle) => {
                    let circle_id = context.circles.insert(circle);
                    context.open.push(circle_id);
                }
                None => skipped += 1,
            }
        }

        log::trace!(
            "point {}: cavity edges {} boundary {} degenerate {}",
            point_id.as_usize(),
            context.edges.len(),
            context.edges.boundary().len(),
            skipped
        );

        observer.cavity(point_id, context.edges.boundary(), context);
        context.edges.clear();
    }

    fn finalize(&self, context: &Context) -> Triangulation {
        let triangles = context
            .real_triangles()
            .into_iter()
            .filter_map(|t| hull::orient_ccw(&self.points, t))
            .collect::<Vec<_>>();
        let swept = triangles.len();

        let triangles = if self.options.close_hull {
            hull::close_hull(&self.points, triangles, self.options.epsilon)
        } else {
            triangles
        };

        log::debug!(
            "finalized: triangles: {} (hull pass added {})",
            triangles.len(),
            triangles.len() - swept
        );

        Triangulation { triangles }
    }
}

/// The result of triangulate. Triangles are counter clockwise, their ids
/// index the point slice the sweeper was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Triangulation {
    triangles: Vec<Triangle>,
}

impl Triangulation {
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Flat index list, three consecutive entries per triangle
    pub fn indices(&self) -> Vec<usize> {
        self.triangles
            .iter()
            .flat_map(|t| t.points.map(|p| p.as_usize()))
            .collect()
    }

    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }
}

impl IntoIterator for Triangulation {
    type Item = Triangle;
    type IntoIter = std::vec::IntoIter<Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.into_iter()
    }
}

impl<'t> IntoIterator for &'t Triangulation {
    type Item = &'t Triangle;
    type IntoIter = std::slice::Iter<'t, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}
