//! Traversal state consumed when adapting a query to the current scope.

use segpick_math::Transform;
use segpick_mesh::BoundingSphere;

use crate::segment::Frame;

/// Identifier of a node on the traversal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Transforms and node path supplied by the traversal at the current scope.
///
/// Absent transforms are treated as identity.
#[derive(Debug, Clone, Default)]
pub struct TraversalContext {
    /// Normalized device coordinates to window coordinates.
    pub window: Option<Transform>,
    /// View space to normalized device coordinates.
    pub projection: Option<Transform>,
    /// World space to view space.
    pub view: Option<Transform>,
    /// Local space of the current scope to world space.
    pub model: Option<Transform>,
    /// Nodes visited from the root down to the current one.
    pub node_path: Vec<NodeId>,
}

impl TraversalContext {
    /// Context with no transforms and an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model transform.
    pub fn with_model(mut self, model: Transform) -> Self {
        self.model = Some(model);
        self
    }

    /// Set the view transform.
    pub fn with_view(mut self, view: Transform) -> Self {
        self.view = Some(view);
        self
    }

    /// Set the projection transform.
    pub fn with_projection(mut self, projection: Transform) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Set the window transform.
    pub fn with_window(mut self, window: Transform) -> Self {
        self.window = Some(window);
        self
    }

    /// Transform that leads out of model space into `frame`.
    pub fn matrix(&self, frame: Frame) -> Option<&Transform> {
        match frame {
            Frame::Window => self.window.as_ref(),
            Frame::Projection => self.projection.as_ref(),
            Frame::View => self.view.as_ref(),
            Frame::Model => self.model.as_ref(),
        }
    }

    /// Compose every present transform between model space and `frame`.
    ///
    /// Returns `None` when the chain is empty, i.e. `frame` coincides with
    /// the current model space.
    pub fn model_to_frame(&self, frame: Frame) -> Option<Transform> {
        frame
            .chain()
            .iter()
            .filter_map(|&f| self.matrix(f))
            .fold(None, |acc: Option<Transform>, m| {
                Some(match acc {
                    Some(acc) => acc.then(m),
                    None => *m,
                })
            })
    }
}

/// Culling information of a node about to be entered.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeBounds {
    /// Bounding sphere of the node's subtree.
    pub sphere: BoundingSphere,
    /// When false the node is always entered.
    pub culling_active: bool,
}

impl NodeBounds {
    /// Bounds with culling enabled.
    pub fn culled(sphere: BoundingSphere) -> Self {
        Self {
            sphere,
            culling_active: true,
        }
    }
}
