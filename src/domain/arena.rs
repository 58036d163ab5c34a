use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::color::Rgb;
use crate::domain::path::PathFormatter;

/// Whether a node still carries a label or has been deleted in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
    Populated { label: String },
    /// Tombstone left behind by deletion; contributes nothing to sizes or layout.
    Empty,
}

impl NodeState {
    pub fn label(&self) -> Option<&str> {
        match self {
            NodeState::Populated { label } => Some(label),
            NodeState::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, NodeState::Empty)
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Populated { label } => write!(f, "{}", label),
            NodeState::Empty => write!(f, "<empty>"),
        }
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    pub state: NodeState,
    /// Leaf: own size. Internal: sum of the children's sizes.
    pub size: u64,
    /// Assigned once at insertion
    pub color: Rgb,
    /// Index of parent node in the arena, None for the root and for tombstones
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in construction order
    pub children: Vec<Index>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn label(&self) -> Option<&str> {
        self.state.label()
    }
}

/// Arena-based tree of sized, labelled nodes.
///
/// Children are owned through the arena; the parent link is a plain index, so
/// walking from a leaf to the root never fights the borrow checker. The tree
/// also owns the formatter that renders its display paths.
#[derive(Debug)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    root: Option<Index>,
    formatter: Box<dyn PathFormatter>,
}

impl TreeArena {
    pub fn new(formatter: Box<dyn PathFormatter>) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            formatter,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_node(
        &mut self,
        label: String,
        size: u64,
        color: Rgb,
        parent: Option<Index>,
    ) -> Index {
        let node = TreeNode {
            state: NodeState::Populated { label },
            size,
            color,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub(crate) fn remove_node(&mut self, idx: Index) -> Option<TreeNode> {
        self.arena.remove(idx)
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub(crate) fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn formatter(&self) -> &dyn PathFormatter {
        self.formatter.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Stored size of a node; 0 for stale handles.
    pub fn size(&self, idx: Index) -> u64 {
        self.get_node(idx).map_or(0, |node| node.size)
    }

    pub fn label(&self, idx: Index) -> Option<&str> {
        self.get_node(idx).and_then(TreeNode::label)
    }

    /// Stored size of the root; 0 for an empty tree.
    pub fn total(&self) -> u64 {
        self.root.map_or(0, |root| self.size(root))
    }

    /// Recomputes a subtree's size from its leaves without touching stored sizes.
    #[instrument(level = "trace", skip(self))]
    pub fn total_size(&self, idx: Index) -> u64 {
        match self.get_node(idx) {
            Some(node) if node.is_leaf() => node.size,
            Some(node) => node
                .children
                .iter()
                .map(|&child| self.total_size(child))
                .fold(0u64, u64::saturating_add),
            None => 0,
        }
    }

    /// Recomputes every internal node's size bottom-up.
    #[instrument(level = "debug", skip(self))]
    pub fn refresh_sizes(&mut self) {
        let order: Vec<Index> = self.iter_postorder().map(|(idx, _)| idx).collect();
        for idx in order {
            self.refresh_node(idx);
        }
    }

    /// Re-sums the node at `idx` and every ancestor up to the root.
    #[instrument(level = "trace", skip(self))]
    pub fn repair_ancestors(&mut self, idx: Index) {
        let mut current = Some(idx);
        while let Some(node_idx) = current {
            self.refresh_node(node_idx);
            current = self.get_node(node_idx).and_then(|node| node.parent);
        }
    }

    fn refresh_node(&mut self, idx: Index) {
        let Some(node) = self.get_node(idx) else {
            return;
        };
        if node.is_leaf() {
            return;
        }
        let sum = self.children_sum(node);
        if let Some(node) = self.get_node_mut(idx) {
            node.size = sum;
        }
    }

    /// Sum of the children's stored sizes, saturating at `u64::MAX`.
    fn children_sum(&self, node: &TreeNode) -> u64 {
        node.children
            .iter()
            .map(|&child| self.size(child))
            .fold(0u64, u64::saturating_add)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Populated leaves in pre-order.
    pub fn leaves(&self) -> Vec<Index> {
        self.iter()
            .filter(|(_, node)| node.is_leaf() && !node.state.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Root-to-node labels joined by the tree's formatter.
    ///
    /// Returns `None` for tombstones and stale handles.
    pub fn display_path(&self, idx: Index) -> Option<String> {
        let mut labels = Vec::new();
        let mut current = Some(idx);
        while let Some(node_idx) = current {
            let node = self.get_node(node_idx)?;
            labels.push(node.label()?);
            current = node.parent;
        }
        labels.reverse();
        Some(self.formatter.format(&labels))
    }

    /// Checks the structural invariants on every reachable node:
    /// sizes of internal nodes equal their children's sum, tombstones are
    /// bare, and populated children point back at their parent.
    pub fn is_consistent(&self) -> bool {
        self.iter().all(|(idx, node)| {
            if node.state.is_empty() {
                return node.size == 0 && node.children.is_empty() && node.parent.is_none();
            }
            if Some(idx) == self.root && node.parent.is_some() {
                return false;
            }
            let children_ok = node.children.iter().all(|&child| match self.get_node(child) {
                Some(c) => c.state.is_empty() || c.parent == Some(idx),
                None => false,
            });
            let size_ok = node.is_leaf()
                || node.size == self.children_sum(node);
            children_ok && size_ok
        })
    }
}

/// Pre-order traversal in child order.
pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Post-order traversal: children before their parent.
pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
