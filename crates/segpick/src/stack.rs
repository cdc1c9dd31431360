//! Query stack mirroring a scene traversal.

use segpick_mesh::Drawable;

use crate::error::Result;
use crate::frame::{NodeBounds, TraversalContext};
use crate::hit::{Hit, Intersections};
use crate::intersector::{IntersectorId, LineSegmentIntersector};

/// Derived queries for the scopes currently entered, with the user's query at
/// the bottom.
///
/// The traversal context carries cumulative transforms, so every scope's query
/// is derived from the root. Hits found by a derived query are routed back
/// along the parent chain and recorded on the root.
#[derive(Debug, Clone)]
pub struct IntersectorStack {
    entries: Vec<LineSegmentIntersector>,
}

impl IntersectorStack {
    /// Stack holding only `root`.
    ///
    /// Any parent link `root` carries from an earlier derivation is dropped.
    pub fn new(mut root: LineSegmentIntersector) -> Self {
        root.detach();
        Self {
            entries: vec![root],
        }
    }

    /// The user's query.
    pub fn root(&self) -> &LineSegmentIntersector {
        &self.entries[0]
    }

    /// Query for the innermost scope.
    pub fn top(&self) -> &LineSegmentIntersector {
        // never empty: pop keeps the root
        &self.entries[self.entries.len() - 1]
    }

    /// Handle of the innermost query.
    pub fn top_id(&self) -> IntersectorId {
        IntersectorId(self.entries.len() - 1)
    }

    /// Look up a query by handle.
    pub fn get(&self, id: IntersectorId) -> Option<&LineSegmentIntersector> {
        self.entries.get(id.0)
    }

    /// Number of queries, including the root.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Enter a scope, deriving a query for it from the root.
    pub fn push(&mut self, ctx: &TraversalContext) -> Result<IntersectorId> {
        let derived = self.root().derive(ctx, IntersectorId(0))?;
        self.entries.push(derived);
        Ok(self.top_id())
    }

    /// Leave the innermost scope. The root is never removed.
    pub fn pop(&mut self) -> Option<LineSegmentIntersector> {
        if self.entries.len() > 1 {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Whether the traversal should descend into a node of the current scope.
    pub fn enter(&self, bounds: &NodeBounds) -> bool {
        self.top().enter(bounds)
    }

    /// Called when the traversal leaves a node of the current scope.
    pub fn leave(&self) {
        self.top().leave();
    }

    /// Intersect a drawable with the innermost query and record the hits on
    /// the root. Returns the number of hits.
    pub fn intersect(&mut self, ctx: &TraversalContext, drawable: &dyn Drawable) -> usize {
        let mut found: Vec<Hit> = Vec::new();
        let n = self.top().intersect_into(ctx, drawable, &mut found);
        if n == 0 {
            return 0;
        }

        let root = self.root_of(self.top_id());
        self.entries[root.0].merge_intersections(found);
        n
    }

    /// Follow parent links from `id` to the query with no parent.
    ///
    /// Parents always sit below their children, so a link that does not move
    /// down the stack ends the walk.
    fn root_of(&self, mut id: IntersectorId) -> IntersectorId {
        while let Some(parent) = self.entries.get(id.0).and_then(|q| q.parent()) {
            if parent.0 >= id.0 {
                break;
            }
            id = parent;
        }
        id
    }

    /// Hits recorded on the root.
    pub fn intersections(&self) -> &Intersections {
        self.root().intersections()
    }

    /// Drop every derived query and forget the root's hits.
    pub fn reset(&mut self) {
        self.entries.truncate(1);
        self.entries[0].reset();
    }

    /// Give back the root query with its hits.
    pub fn into_root(mut self) -> LineSegmentIntersector {
        self.entries.truncate(1);
        self.entries.swap_remove(0)
    }
}
