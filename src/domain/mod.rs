//! Domain layer: the sized tree and its algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod color;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod locate;
pub mod mutation;
pub mod path;
pub mod tree_traits;

pub use arena::{NodeState, TreeArena, TreeNode};
pub use builder::{NodeSpec, TreeBuilder};
pub use color::{ColorSource, RandomColors, Rgb};
pub use error::{DomainError, DomainResult};
pub use geometry::{Axis, Point, Rect};
pub use layout::Tile;
pub use locate::LeafHit;
pub use mutation::{DEFAULT_STEP_PERCENT, MIN_LEAF_SIZE};
pub use path::{DatasetPaths, FileSystemPaths, PathFormatter};
pub use tree_traits::TreeNodeConvert;
