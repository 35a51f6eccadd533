//! Incremental planar Delaunay triangulation.
//!
//! Points are swept in sorted order and inserted one at a time into a set of
//! open circumcircles seeded by a supertriangle. A circle the sweep has left
//! behind can never be invalidated again and is closed, so each insertion
//! only scans the circles near the sweep line.
//!
//! ```rust
//! use delaunay_sweep::{triangulate, Point};
//!
//! let points = [
//!     Point::new(0., 0.),
//!     Point::new(10., 0.),
//!     Point::new(0., 10.),
//!     Point::new(10., 10.),
//!     Point::new(5., 5.),
//! ];
//! let triangulation = triangulate(&points);
//! assert_eq!(triangulation.len(), 4);
//! ```
//!
//! All coordinates must be finite. NaN or infinite coordinates never panic
//! but the resulting mesh is unspecified.

mod circumcircle;
mod context;
mod edge;
mod error;
mod hull;
pub mod loader;
mod points;
mod shape;
mod supertriangle;
mod sweeper;
mod utils;

pub use circumcircle::{CircleId, Circles, Circumcircle, DEFAULT_EPSILON};
pub use edge::EdgeBuffer;
pub use error::Error;
pub use points::{PointId, Points, SortAxis};
pub use shape::{Edge, Point, Triangle};
pub use supertriangle::DEFAULT_SUPERTRIANGLE_SCALE;
pub use sweeper::{Observer, Sweeper, SweeperBuilder, Triangulation};
pub use utils::{orient_2d, Orientation};

/// exported to enable observer
pub use context::Context;

/// Triangulate `points` with the default settings.
pub fn triangulate(points: &[Point]) -> Triangulation {
    Sweeper::new(points).triangulate()
}

/// Triangulate records that carry a point, `key` extracts it. Triangle ids
/// index `items`.
pub fn triangulate_by<T, F>(items: &[T], key: F) -> Triangulation
where
    F: Fn(&T) -> Point,
{
    let points = items.iter().map(key).collect::<Vec<_>>();
    Sweeper::new(points).triangulate()
}
