//! Parser module for modtree.
//!
//! Turns the raw text printed by the Go toolchain into edges and module
//! sets, and normalizes versioned identifiers to bare module names.
//!
//! # Example
//!
//! ```
//! use modtree::parser::{bare_name, parse_edges};
//!
//! let edges = parse_edges("example.com/app github.com/pkg/errors@v0.9.1\n");
//! assert_eq!(bare_name(&edges[0].child), "github.com/pkg/errors");
//! ```

pub mod go_mod_graph;
pub mod types;

// Re-export commonly used items for convenience
pub use go_mod_graph::{parse_edges, parse_module_list};
pub use types::{bare_name, Edge, VERSION_SEPARATOR};
