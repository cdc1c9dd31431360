//! Per-drawable hit collection, ordered by distance along the segment.

use crate::triangle::TriangleHit;

/// Hits collected while testing one drawable, keyed by ratio along the
/// segment.
///
/// Equal ratios are all retained (a segment through a shared edge or vertex
/// hits every adjacent triangle); their relative order is unspecified.
#[derive(Debug, Clone, Default)]
pub struct TriangleIntersections {
    entries: Vec<(f64, TriangleHit)>,
}

impl TriangleIntersections {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hit at `ratio`.
    pub fn insert(&mut self, ratio: f64, hit: TriangleHit) {
        self.entries.push((ratio, hit));
    }

    /// Number of hits.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was hit.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hits in ascending ratio order.
    pub fn into_sorted(mut self) -> Vec<(f64, TriangleHit)> {
        self.entries.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.entries
    }
}
