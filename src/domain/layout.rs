//! Treemap layout: proportional, recursive subdivision of a rectangle.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{TreeArena, TreeNode};
use crate::domain::color::Rgb;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::geometry::{Axis, Rect};

/// One leaf's rectangle in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub rect: Rect,
    pub color: Rgb,
    pub node: Index,
}

pub(crate) fn ensure_valid_viewport(rect: Rect) -> DomainResult<()> {
    if rect.is_square() {
        return Err(DomainError::InvalidRectangle {
            width: rect.width,
            height: rect.height,
        });
    }
    Ok(())
}

impl TreeArena {
    /// Lays out the whole tree inside `rect`, one tile per non-empty leaf.
    ///
    /// `rect` must not be square. An empty tree or one whose sizes are all
    /// zero yields no tiles.
    #[instrument(level = "debug", skip(self))]
    pub fn layout(&self, rect: Rect) -> DomainResult<Vec<Tile>> {
        ensure_valid_viewport(rect)?;
        let mut tiles = Vec::new();
        if let Some(root) = self.root() {
            self.layout_into(root, rect, &mut tiles);
        }
        debug!("layout: {} tiles", tiles.len());
        Ok(tiles)
    }

    /// Lays out the subtree at `idx`; no viewport check.
    pub fn layout_node(&self, idx: Index, rect: Rect) -> Vec<Tile> {
        let mut tiles = Vec::new();
        self.layout_into(idx, rect, &mut tiles);
        tiles
    }

    fn layout_into(&self, idx: Index, rect: Rect, tiles: &mut Vec<Tile>) {
        let Some(node) = self.get_node(idx) else {
            return;
        };
        if node.size == 0 {
            return;
        }
        if node.is_leaf() {
            tiles.push(Tile {
                rect,
                color: node.color,
                node: idx,
            });
            return;
        }
        for (child, sub) in self.partition(node, rect) {
            self.layout_into(child, sub, tiles);
        }
    }

    /// Splits `rect` among the node's children in child order.
    ///
    /// Every child gets `floor(extent * child.size / node.size)` along the
    /// longer side, except the last child with a positive size, which takes
    /// whatever is left so the pieces tile `rect` exactly. Zero-size children
    /// get a zero-extent slice at the current offset. Spans never run past
    /// the end of `rect`, even when a saturated parent size is smaller than
    /// its children's true sum.
    pub(crate) fn partition(&self, node: &TreeNode, rect: Rect) -> Vec<(Index, Rect)> {
        let axis = Axis::for_rect(rect);
        let extent = axis.extent(rect);
        let last_sized = node.children.iter().rposition(|&c| self.size(c) > 0);

        let mut offset = 0u32;
        let mut parts = Vec::with_capacity(node.children.len());
        for (position, &child) in node.children.iter().enumerate() {
            let span = if Some(position) == last_sized {
                extent.saturating_sub(offset)
            } else {
                proportional_span(extent, self.size(child), node.size)
                    .min(extent.saturating_sub(offset))
            };
            parts.push((child, axis.slice(rect, offset, span)));
            offset = offset.saturating_add(span);
        }
        parts
    }
}

/// `floor(extent * part / whole)` in exact integer arithmetic.
fn proportional_span(extent: u32, part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let span = u128::from(extent) * u128::from(part) / u128::from(whole);
    u32::try_from(span).unwrap_or(extent)
}
