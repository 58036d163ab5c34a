//! Size-aggregating trees with treemap layout.
//!
//! A tree is built once from a data source (a directory on disk, or world
//! population by region), every internal node carries the sum of its leaves,
//! and the whole tree can be laid out as a treemap, hit-tested at a point,
//! and edited in place (grow, shrink, delete) with sizes kept consistent.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
