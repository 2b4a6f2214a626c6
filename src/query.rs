//! Query orchestration.
//!
//! Decides which modules to render and in which direction, then produces a
//! [`Report`] that the exporters turn into text or JSON.
//!
//! - With no search term the whole project is rendered forward from the
//!   root module, honoring the depth limit.
//! - With a search term every matching module is rendered forward (what it
//!   requires) and every matching module is rendered in reverse (what
//!   requires it). Depth is unlimited in this mode.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::graph::{GraphView, ModuleGraph};
use crate::source::{GraphSource, SourceResult};
use crate::tree::{TreeNode, TreeWalker};

/// What to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Bare or versioned module to scope the report to; `None` or empty
    /// renders the whole project
    pub search: Option<String>,
    /// Maximum depth of the whole-project tree; 0 means unlimited
    pub max_depth: usize,
    /// Flag indirect dependencies in the output
    pub annotate_indirect: bool,
}

impl QueryOptions {
    /// The effective search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }
}

/// The rendered result of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Report {
    /// The whole project, rendered from its root module
    Project {
        /// Root module path
        root: String,
        /// Forward tree from the root
        tree: TreeNode,
    },
    /// The neighborhood of the modules matching a search term
    Search {
        /// The term as given by the user
        term: String,
        /// One forward tree per matching module
        dependencies: Vec<TreeNode>,
        /// One reverse tree per matching module
        dependents: Vec<TreeNode>,
    },
}

/// Fetches everything a query needs from `source` and renders it.
///
/// All collaborator calls complete before any traversal starts; the first
/// failure aborts the query.
pub fn run_query<S>(source: &S, options: &QueryOptions) -> SourceResult<Report>
where
    S: GraphSource + ?Sized,
{
    let graph = ModuleGraph::from_edges(source.edges()?);
    debug!(
        modules = graph.node_count(),
        edges = graph.edge_count(),
        "built module graph"
    );

    let indirect = if options.annotate_indirect {
        Some(source.indirect_modules()?)
    } else {
        None
    };

    let report = match options.search_term() {
        None => {
            let root = source.root_module()?;
            let tree = TreeWalker::new(graph.forward())
                .with_indirect(indirect.as_ref())
                .with_max_depth(options.max_depth)
                .walk(&root);
            Report::Project { root, tree }
        }
        Some(term) => Report::Search {
            term: term.to_string(),
            dependencies: search_trees(graph.forward(), term, indirect.as_ref()),
            dependents: search_trees(graph.reverse(), term, indirect.as_ref()),
        },
    };

    Ok(report)
}

/// Renders one tree per key of `view` matching `term`, each with its own
/// visited set.
fn search_trees(
    view: GraphView<'_>,
    term: &str,
    indirect: Option<&HashSet<String>>,
) -> Vec<TreeNode> {
    let matches = view.find_matching(term);
    debug!(direction = ?view.direction(), matches = matches.len(), term, "matched search term");

    let walker = TreeWalker::new(view).with_indirect(indirect);
    matches.into_iter().map(|id| walker.walk(id)).collect()
}
