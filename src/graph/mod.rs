//! Graph module for module requirement modeling.
//!
//! This module provides the [`ModuleGraph`] struct, built once from the
//! requirement edges of a project, and [`GraphView`], its forward or
//! reverse adjacency.
//!
//! # Example
//!
//! ```rust
//! use modtree::graph::ModuleGraph;
//!
//! let mut graph = ModuleGraph::new();
//! graph.add_edge("example.com/app", "pkg/foo@v1.0.0");
//! graph.add_edge("pkg/foo@v1.0.0", "pkg/bar@v0.2.0");
//!
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_count(), 2);
//! assert_eq!(graph.reverse().neighbors("pkg/bar@v0.2.0"), vec!["pkg/foo@v1.0.0"]);
//! ```

mod module_graph;

pub use module_graph::{GraphView, ModuleGraph};
pub use petgraph::Direction;
