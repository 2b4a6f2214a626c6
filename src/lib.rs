//! modtree - print a Go module dependency graph as a tree
//!
//! This crate builds a module graph from `go mod graph` output and renders
//! it as a forward (requires) or reverse (required by) tree, with cycle
//! truncation, an optional depth limit and optional indirect annotations.

pub mod cli;
pub mod export;
pub mod graph;
pub mod logging;
pub mod parser;
pub mod query;
pub mod source;
pub mod tree;
