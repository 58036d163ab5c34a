//! Growing, shrinking and deleting nodes while keeping sizes consistent.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{NodeState, TreeArena};
use crate::domain::error::{DomainError, DomainResult};

/// Percentage applied by `grow` and `shrink`.
pub const DEFAULT_STEP_PERCENT: u32 = 1;

/// Smallest size `shrink` leaves behind; 0 is reserved for deleted nodes.
pub const MIN_LEAF_SIZE: u64 = 1;

/// `ceil(size * percent / 100)`.
fn step(size: u64, percent: u32) -> u64 {
    let scaled = u128::from(size) * u128::from(percent);
    u64::try_from(scaled.div_ceil(100)).unwrap_or(u64::MAX)
}

impl TreeArena {
    /// First populated leaf, in pre-order, whose label is the base name of `identifier`.
    pub fn find_leaf(&self, identifier: &str) -> Option<Index> {
        let name = self.formatter().base_name(identifier);
        self.iter()
            .find(|(_, node)| node.is_leaf() && node.label() == Some(name))
            .map(|(idx, _)| idx)
    }

    /// First populated node of any kind, in pre-order, whose label is the base name of `identifier`.
    pub fn find_node(&self, identifier: &str) -> Option<Index> {
        let name = self.formatter().base_name(identifier);
        self.iter()
            .find(|(_, node)| node.label() == Some(name))
            .map(|(idx, _)| idx)
    }

    fn require_leaf(&self, identifier: &str) -> DomainResult<Index> {
        self.find_leaf(identifier)
            .ok_or_else(|| DomainError::LeafNotFound(identifier.to_string()))
    }

    pub fn grow(&mut self, identifier: &str) -> DomainResult<u64> {
        self.grow_by(identifier, DEFAULT_STEP_PERCENT)
    }

    pub fn shrink(&mut self, identifier: &str) -> DomainResult<u64> {
        self.shrink_by(identifier, DEFAULT_STEP_PERCENT)
    }

    /// Grows the named leaf by `percent` (rounded up). Returns the new size.
    pub fn grow_by(&mut self, identifier: &str, percent: u32) -> DomainResult<u64> {
        let idx = self.require_leaf(identifier)?;
        self.grow_node(idx, percent)
    }

    /// Shrinks the named leaf by `percent` (rounded up), never below 1.
    pub fn shrink_by(&mut self, identifier: &str, percent: u32) -> DomainResult<u64> {
        let idx = self.require_leaf(identifier)?;
        self.shrink_node(idx, percent)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn grow_node(&mut self, idx: Index, percent: u32) -> DomainResult<u64> {
        self.resize_leaf(idx, |size| size.saturating_add(step(size, percent)))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn shrink_node(&mut self, idx: Index, percent: u32) -> DomainResult<u64> {
        self.resize_leaf(idx, |size| {
            size.saturating_sub(step(size, percent)).max(MIN_LEAF_SIZE)
        })
    }

    fn resize_leaf(&mut self, idx: Index, resize: impl FnOnce(u64) -> u64) -> DomainResult<u64> {
        let node = self.get_node_mut(idx).ok_or(DomainError::AlreadyEmpty)?;
        if node.state.is_empty() {
            return Err(DomainError::AlreadyEmpty);
        }
        if !node.is_leaf() {
            return Err(DomainError::NotALeaf(node.state.to_string()));
        }
        let old = node.size;
        node.size = resize(old);
        let new = node.size;
        debug!("resize: {} -> {}", old, new);

        self.repair_ancestors(idx);
        debug_assert!(self.is_consistent());
        Ok(new)
    }

    /// Deletes the first node whose label matches `identifier`. Returns its handle,
    /// which now refers to a tombstone.
    pub fn delete(&mut self, identifier: &str) -> DomainResult<Index> {
        let idx = self
            .find_node(identifier)
            .ok_or_else(|| DomainError::LeafNotFound(identifier.to_string()))?;
        self.delete_node(idx)?;
        Ok(idx)
    }

    /// Turns the node into a tombstone in place and frees its descendants.
    ///
    /// The tombstone keeps its slot in the parent's child list.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node(&mut self, idx: Index) -> DomainResult<()> {
        let node = self.get_node_mut(idx).ok_or(DomainError::AlreadyEmpty)?;
        if node.state.is_empty() {
            return Err(DomainError::AlreadyEmpty);
        }
        let label = std::mem::replace(&mut node.state, NodeState::Empty);
        let children = std::mem::take(&mut node.children);
        let parent = node.parent.take();
        node.size = 0;
        debug!("delete: {}", label);

        let mut stack = children;
        while let Some(child) = stack.pop() {
            if let Some(removed) = self.remove_node(child) {
                stack.extend(removed.children);
            }
        }

        if let Some(parent) = parent {
            self.repair_ancestors(parent);
        }
        debug_assert!(self.is_consistent());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_rounds_up() {
        assert_eq!(step(100, 1), 1);
        assert_eq!(step(101, 1), 2);
        assert_eq!(step(1, 1), 1);
        assert_eq!(step(0, 1), 0);
        assert_eq!(step(250, 10), 25);
    }
}
