use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::TreeArena;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

// Tombstones are left out; every other node shows as "label (size)".
impl TreeNodeConvert for TreeArena {
    fn to_tree_string(&self) -> Tree<String> {
        fn caption(arena: &TreeArena, node_idx: Index) -> Option<String> {
            let node = arena.get_node(node_idx)?;
            node.label().map(|label| format!("{} ({})", label, node.size))
        }

        fn build_tree(arena: &TreeArena, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get_node(node_idx) {
                for &child_idx in &node.children {
                    if let Some(text) = caption(arena, child_idx) {
                        let mut child_tree = Tree::new(text);
                        build_tree(arena, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        match self.root().and_then(|root| caption(self, root).map(|text| (root, text))) {
            Some((root_idx, text)) => {
                let mut tree = Tree::new(text);
                build_tree(self, root_idx, &mut tree);
                tree
            }
            None => Tree::new("Empty tree".to_string()),
        }
    }
}
