//! Sources of module graph data.
//!
//! The tree renderer never talks to the Go toolchain directly. Everything it
//! needs (the requirement edges, the indirect module set and the root module
//! path) comes through a [`GraphSource`].
//!
//! - [`GoToolchain`] runs `go mod graph` and `go list` in a project directory
//! - [`StaticSource`] serves pre-captured text, for tests and embedding

mod go;

use std::collections::HashSet;
use std::process::ExitStatus;
use std::string::FromUtf8Error;

use crate::parser::{parse_edges, parse_module_list, Edge};

pub use go::GoToolchain;

/// Errors that can occur while fetching graph data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The command could not be started (missing binary, bad working directory).
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran but exited unsuccessfully.
    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The command printed something that is not UTF-8.
    #[error("`{command}` produced non UTF-8 output")]
    InvalidOutput {
        command: String,
        #[source]
        source: FromUtf8Error,
    },

    /// The root module listing was empty.
    #[error("`{command}` did not report a root module")]
    EmptyRoot { command: String },
}

/// Result type alias for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Provides the raw inputs of a dependency tree report.
pub trait GraphSource {
    /// The full requirement graph as ordered edges.
    fn edges(&self) -> SourceResult<Vec<Edge>>;

    /// Bare names of the modules that are only required indirectly.
    fn indirect_modules(&self) -> SourceResult<HashSet<String>>;

    /// The path of the main module.
    fn root_module(&self) -> SourceResult<String>;
}

/// A [`GraphSource`] backed by pre-captured toolchain output.
///
/// # Example
///
/// ```
/// use modtree::source::{GraphSource, StaticSource};
///
/// let source = StaticSource::new("example.com/app", "example.com/app pkg/foo@v1.0.0\n");
/// assert_eq!(source.root_module().unwrap(), "example.com/app");
/// assert_eq!(source.edges().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    root: String,
    graph: String,
    indirect: String,
}

impl StaticSource {
    /// Creates a source from a root module path and `go mod graph` text.
    pub fn new(root: impl Into<String>, graph: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            graph: graph.into(),
            indirect: String::new(),
        }
    }

    /// Sets the line-delimited indirect module listing.
    pub fn with_indirect(mut self, indirect: impl Into<String>) -> Self {
        self.indirect = indirect.into();
        self
    }
}

impl GraphSource for StaticSource {
    fn edges(&self) -> SourceResult<Vec<Edge>> {
        Ok(parse_edges(&self.graph))
    }

    fn indirect_modules(&self) -> SourceResult<HashSet<String>> {
        Ok(parse_module_list(&self.indirect))
    }

    fn root_module(&self) -> SourceResult<String> {
        let root = self.root.trim();
        if root.is_empty() {
            return Err(SourceError::EmptyRoot {
                command: "static root".to_string(),
            });
        }
        Ok(root.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_edges() {
        let source = StaticSource::new("root", "root a\nbad\na b\n");
        let edges = source.edges().unwrap();
        assert_eq!(edges, vec![Edge::new("root", "a"), Edge::new("a", "b")]);
    }

    #[test]
    fn test_static_source_indirect() {
        let source = StaticSource::new("root", "").with_indirect("pkg/bar\n\npkg/baz\n");
        let indirect = source.indirect_modules().unwrap();
        assert_eq!(indirect.len(), 2);
        assert!(indirect.contains("pkg/bar"));
    }

    #[test]
    fn test_static_source_empty_root() {
        let source = StaticSource::new("  ", "");
        assert!(matches!(
            source.root_module(),
            Err(SourceError::EmptyRoot { .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = SourceError::EmptyRoot {
            command: "go list -m".to_string(),
        };
        assert_eq!(err.to_string(), "`go list -m` did not report a root module");
    }
}
