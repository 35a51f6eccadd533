use rustc_hash::FxHashMap;

use crate::{Edge, PointId};

/// Boundary edge buffer for one point insertion. Collects the edges of every
/// invalidated triangle; an edge seen twice is shared by two of them and so
/// lies inside the cavity.
///
/// Edges keep their insertion order, which keeps the retriangulation, and
/// therefore the whole run, deterministic.
#[derive(Debug, Clone, Default)]
pub struct EdgeBuffer {
    edges: Vec<Edge>,
    counts: FxHashMap<Edge, u32>,
    boundary: Vec<Edge>,
}

impl EdgeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
            counts: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            boundary: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, edge: Edge) {
        self.edges.push(edge);
        *self.counts.entry(edge.canonical()).or_insert(0) += 1;
    }

    /// push the three edges of triangle `a b c`
    pub fn push_triangle(&mut self, [a, b, c]: [PointId; 3]) {
        self.push(Edge::new(a, b));
        self.push(Edge::new(b, c));
        self.push(Edge::new(c, a));
    }

    /// Drop every edge that appeared more than once, leaving the cavity's
    /// outer polygon. Returns the boundary in insertion order.
    pub fn dedup(&mut self) -> &[Edge] {
        self.boundary.clear();
        for edge in self.edges.iter() {
            if self.counts.get(&edge.canonical()).copied() == Some(1) {
                self.boundary.push(*edge);
            }
        }
        &self.boundary
    }

    /// boundary found by the last [`Self::dedup`]
    pub fn boundary(&self) -> &[Edge] {
        &self.boundary
    }

    /// number of raw edges pushed since the last clear
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.counts.clear();
        self.boundary.clear();
    }
}
