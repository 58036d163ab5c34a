//! Hit-testing: resolve a point to the leaf whose tile contains it.

use std::fmt;

use generational_arena::Index;
use tracing::{instrument, trace};

use crate::domain::arena::TreeArena;
use crate::domain::error::DomainResult;
use crate::domain::geometry::{Point, Rect};
use crate::domain::layout::ensure_valid_viewport;

/// Leaf found under a point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafHit {
    pub node: Index,
    /// Root-to-leaf display path
    pub path: String,
    pub size: u64,
}

impl fmt::Display for LeafHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.path, self.size)
    }
}

impl TreeArena {
    /// Finds the leaf whose tile in `layout(rect)` contains `point`.
    ///
    /// Follows the same partitioning as [`TreeArena::layout`], descending
    /// only into the first child whose slice contains the point.
    #[instrument(level = "debug", skip(self))]
    pub fn locate(&self, point: Point, rect: Rect) -> DomainResult<Option<LeafHit>> {
        ensure_valid_viewport(rect)?;
        if !rect.contains(point) {
            return Ok(None);
        }
        Ok(self.root().and_then(|root| self.locate_in(root, point, rect)))
    }

    fn locate_in(&self, idx: Index, point: Point, rect: Rect) -> Option<LeafHit> {
        let node = self.get_node(idx)?;
        if node.size == 0 {
            return None;
        }
        if node.is_leaf() {
            return Some(LeafHit {
                node: idx,
                path: self.display_path(idx)?,
                size: node.size,
            });
        }
        let (child, sub) = self
            .partition(node, rect)
            .into_iter()
            .find(|(_, sub)| sub.contains(point))?;
        trace!("locate: descending into {}", sub);
        self.locate_in(child, point, sub)
    }
}
