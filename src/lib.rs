//! Cluster-aware 2D layout for memory relationship graphs.
//!
//! The crate takes a materialized snapshot of memory nodes and weighted
//! similarity edges and returns one position per node plus styling hints for
//! the edges. Drawing, hit-testing and pan/zoom belong to the caller.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use error::LayoutError;
pub use ir::{MemoryEdge, MemoryGraph, MemoryNode};
pub use layout::{Layout, compute_layout, compute_layout_with_rng};
pub use theme::Theme;
