//! Tree builder: assembles a `TreeArena` node by node and aggregates sizes.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::color::ColorSource;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path::PathFormatter;

/// Declarative description of a subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSpec {
    Leaf { label: String, size: u64 },
    /// Size is computed from the children; with no children this is a zero-size leaf.
    Branch { label: String, children: Vec<NodeSpec> },
}

impl NodeSpec {
    pub fn leaf(label: impl Into<String>, size: u64) -> Self {
        NodeSpec::Leaf {
            label: label.into(),
            size,
        }
    }

    pub fn branch(label: impl Into<String>, children: Vec<NodeSpec>) -> Self {
        NodeSpec::Branch {
            label: label.into(),
            children,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NodeSpec::Leaf { label, .. } | NodeSpec::Branch { label, .. } => label,
        }
    }
}

/// Constructs a tree, coloring every node as it is inserted.
///
/// Sizes passed for nodes that end up with children are ignored: `finish`
/// re-sums every internal node.
pub struct TreeBuilder {
    tree: TreeArena,
    colors: Box<dyn ColorSource>,
}

impl TreeBuilder {
    pub fn new(formatter: Box<dyn PathFormatter>, colors: Box<dyn ColorSource>) -> Self {
        Self {
            tree: TreeArena::new(formatter),
            colors,
        }
    }

    /// Inserts the root. A tree has exactly one.
    pub fn root(&mut self, label: impl Into<String>, size: u64) -> DomainResult<Index> {
        let label = label.into();
        if self.tree.root().is_some() {
            return Err(DomainError::InvalidParent(format!(
                "root already set, cannot add second root {}",
                label
            )));
        }
        let color = self.colors.next_color();
        Ok(self.tree.insert_node(label, size, color, None))
    }

    /// Appends a child after the parent's existing children.
    pub fn child(
        &mut self,
        parent: Index,
        label: impl Into<String>,
        size: u64,
    ) -> DomainResult<Index> {
        let label = label.into();
        match self.tree.get_node(parent) {
            Some(node) if !node.state.is_empty() => {}
            _ => {
                return Err(DomainError::InvalidParent(format!(
                    "unknown parent for {}",
                    label
                )))
            }
        }
        let color = self.colors.next_color();
        Ok(self.tree.insert_node(label, size, color, Some(parent)))
    }

    /// Inserts a whole subtree under `parent` (or as the root).
    ///
    /// Iterative, so deep specs do not grow the call stack.
    #[instrument(level = "debug", skip(self, spec), fields(label = spec.label()))]
    pub fn add_spec(&mut self, parent: Option<Index>, spec: NodeSpec) -> DomainResult<Index> {
        let top = self.insert_one(parent, &spec)?;
        let mut stack = vec![(top, spec)];

        while let Some((idx, spec)) = stack.pop() {
            if let NodeSpec::Branch { children, .. } = spec {
                // Insert in order so child order matches the NodeSpec
                let mut inserted = Vec::with_capacity(children.len());
                for child in children {
                    let child_idx = self.insert_one(Some(idx), &child)?;
                    inserted.push((child_idx, child));
                }
                stack.extend(inserted);
            }
        }
        Ok(top)
    }

    fn insert_one(&mut self, parent: Option<Index>, spec: &NodeSpec) -> DomainResult<Index> {
        let (label, size) = match spec {
            NodeSpec::Leaf { label, size } => (label.clone(), *size),
            NodeSpec::Branch { label, .. } => (label.clone(), 0),
        };
        match parent {
            Some(parent) => self.child(parent, label, size),
            None => self.root(label, size),
        }
    }

    /// Aggregates sizes and hands over the finished tree.
    pub fn finish(mut self) -> TreeArena {
        self.tree.refresh_sizes();
        debug!(
            "finish: total={}, depth={}",
            self.tree.total(),
            self.tree.depth()
        );
        self.tree
    }

    /// One-shot construction from a `NodeSpec`.
    pub fn build(
        spec: NodeSpec,
        formatter: Box<dyn PathFormatter>,
        colors: Box<dyn ColorSource>,
    ) -> DomainResult<TreeArena> {
        let mut builder = Self::new(formatter, colors);
        builder.add_spec(None, spec)?;
        Ok(builder.finish())
    }
}
