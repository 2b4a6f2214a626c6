//! Shared types for module graph parsing.
//!
//! Module identifiers are opaque strings such as `golang.org/x/text@v0.3.7`.
//! The part before the first `@` is the bare module name; everything after
//! it is the version.

/// Separates a module path from its version inside an identifier.
pub const VERSION_SEPARATOR: char = '@';

/// Returns the bare module name of an identifier.
///
/// Splits on the first `@` and returns everything before it. Identifiers
/// without a version are returned unchanged.
///
/// # Example
///
/// ```
/// use modtree::parser::bare_name;
///
/// assert_eq!(bare_name("github.com/pkg/errors@v0.9.1"), "github.com/pkg/errors");
/// assert_eq!(bare_name("example.com/app"), "example.com/app");
/// ```
pub fn bare_name(id: &str) -> &str {
    match id.split_once(VERSION_SEPARATOR) {
        Some((name, _)) => name,
        None => id,
    }
}

/// A single `parent child` requirement from the module graph.
///
/// Edges point from the requiring module to the required module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    /// The module that declares the requirement.
    pub parent: String,

    /// The module being required.
    pub child: String,
}

impl Edge {
    /// Creates a new Edge instance.
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}
