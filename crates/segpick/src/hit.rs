//! Hit records and their accumulation.

use segpick_math::{Point3, Transform, Vec3};
use segpick_mesh::DrawableId;

use crate::frame::NodeId;

/// A vertex contributing to a hit, with its barycentric weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexWeight {
    /// Index into the drawable's vertex storage.
    pub index: u32,
    /// Barycentric weight.
    pub weight: f64,
}

/// One confirmed triangle intersection.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Position along the unclipped query segment in `[0, 1]`.
    pub ratio: f64,
    /// Local-to-world transform of the drawable, if any.
    pub matrix: Option<Transform>,
    /// Nodes traversed to reach the drawable.
    pub node_path: Vec<NodeId>,
    /// Drawable that was hit.
    pub drawable: DrawableId,
    /// Sequential index of the triangle within the drawable.
    pub primitive_index: usize,
    /// Intersection point in the drawable's local frame.
    pub local_point: Point3,
    /// Unit triangle normal in the drawable's local frame.
    pub local_normal: Vec3,
    /// Vertices with persistent storage and their weights.
    pub vertex_weights: Vec<VertexWeight>,
}

impl Hit {
    /// Intersection point in world space.
    pub fn world_point(&self) -> Point3 {
        match &self.matrix {
            Some(m) => m.apply_point(&self.local_point),
            None => self.local_point,
        }
    }

    /// Unit normal in world space.
    pub fn world_normal(&self) -> Vec3 {
        match &self.matrix {
            Some(m) => m
                .apply_normal(&self.local_normal)
                .try_normalize(0.0)
                .unwrap_or(self.local_normal),
            None => self.local_normal,
        }
    }
}

/// Receives hit records as they are produced.
pub trait HitSink {
    /// Take ownership of one hit.
    fn insert_intersection(&mut self, hit: Hit);
}

impl HitSink for Vec<Hit> {
    fn insert_intersection(&mut self, hit: Hit) {
        self.push(hit);
    }
}

/// Hits accumulated across drawables, ordered by ratio.
///
/// Hits with equal ratios keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct Intersections {
    hits: Vec<Hit>,
}

impl Intersections {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a hit after any existing hits with the same ratio.
    pub fn insert(&mut self, hit: Hit) {
        let at = self.hits.partition_point(|h| h.ratio <= hit.ratio);
        self.hits.insert(at, hit);
    }

    /// Merge a batch already sorted by ratio.
    ///
    /// Existing hits stay ahead of new hits with the same ratio, as with
    /// [`insert`](Self::insert).
    pub fn merge_sorted(&mut self, batch: Vec<Hit>) {
        let appends = match (self.hits.last(), batch.first()) {
            (Some(last), Some(first)) => last.ratio <= first.ratio,
            _ => true,
        };
        if appends {
            self.hits.extend(batch);
            return;
        }

        let old = std::mem::take(&mut self.hits);
        self.hits.reserve(old.len() + batch.len());
        let mut old = old.into_iter().peekable();
        let mut new = batch.into_iter().peekable();
        loop {
            let take_old = match (old.peek(), new.peek()) {
                (Some(a), Some(b)) => a.ratio <= b.ratio,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let next = if take_old { old.next() } else { new.next() };
            self.hits.extend(next);
        }
    }

    /// Nearest hit to the segment start.
    pub fn first(&self) -> Option<&Hit> {
        self.hits.first()
    }

    /// Hits in ascending ratio order.
    pub fn iter(&self) -> std::slice::Iter<'_, Hit> {
        self.hits.iter()
    }

    /// Number of hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// True when nothing has been hit.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Forget every hit.
    pub fn clear(&mut self) {
        self.hits.clear();
    }
}

impl HitSink for Intersections {
    fn insert_intersection(&mut self, hit: Hit) {
        self.insert(hit);
    }
}

impl<'a> IntoIterator for &'a Intersections {
    type Item = &'a Hit;
    type IntoIter = std::slice::Iter<'a, Hit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
