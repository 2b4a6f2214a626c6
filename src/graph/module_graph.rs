//! Module graph implementation using petgraph.
//!
//! Stores every requirement edge once in a directed graph. The forward
//! (requires) and reverse (required-by) adjacency are two views over the
//! same edge set, so they are exact transposes of each other by
//! construction.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use crate::parser::{bare_name, parse_edges, Edge};

/// A directed graph of module requirements.
///
/// Nodes are full module identifiers (possibly versioned). Edges point from
/// the requiring module to the required module. Parallel edges and
/// self-loops are kept exactly as they appear in the input.
///
/// # Example
///
/// ```rust
/// use modtree::graph::ModuleGraph;
///
/// let graph = ModuleGraph::parse("root a@v1\nroot b@v2\na@v1 b@v2\n");
///
/// assert_eq!(graph.forward().neighbors("root"), vec!["a@v1", "b@v2"]);
/// assert_eq!(graph.reverse().neighbors("b@v2"), vec!["root", "a@v1"]);
/// ```
#[derive(Debug, Clone)]
pub struct ModuleGraph {
    /// The underlying directed graph
    graph: DiGraph<String, ()>,
    /// Maps module identifiers to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
}

impl Default for ModuleGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleGraph {
    /// Creates a new empty module graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
        }
    }

    /// Creates a new graph with pre-allocated capacity.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            node_indices: HashMap::with_capacity(nodes),
        }
    }

    /// Builds a graph from requirement edges, in order.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        let edges = edges.into_iter();
        let (lower, _) = edges.size_hint();
        let mut graph = Self::with_capacity(lower, lower);

        for edge in edges {
            graph.add_edge(&edge.parent, &edge.child);
        }

        graph
    }

    /// Builds a graph from raw `go mod graph` output.
    ///
    /// Malformed lines are skipped; see [`parse_edges`].
    pub fn parse(content: &str) -> Self {
        Self::from_edges(parse_edges(content))
    }

    /// Adds a module to the graph.
    ///
    /// Returns the existing index if the module is already present.
    pub fn add_module(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(id) {
            return idx;
        }

        let idx = self.graph.add_node(id.to_string());
        self.node_indices.insert(id.to_string(), idx);
        idx
    }

    /// Adds a requirement edge from `parent` to `child`.
    ///
    /// Both modules are created if they don't exist yet. Repeated edges are
    /// not collapsed.
    pub fn add_edge(&mut self, parent: &str, child: &str) {
        let from = self.add_module(parent);
        let to = self.add_module(child);
        self.graph.add_edge(from, to, ());
    }

    /// Returns the view that follows edges from a module to its requirements.
    pub fn forward(&self) -> GraphView<'_> {
        self.view(Direction::Outgoing)
    }

    /// Returns the view that follows edges from a module to its dependents.
    pub fn reverse(&self) -> GraphView<'_> {
        self.view(Direction::Incoming)
    }

    /// Returns the view for an arbitrary direction.
    pub fn view(&self, direction: Direction) -> GraphView<'_> {
        GraphView {
            graph: self,
            direction,
        }
    }

    /// Returns the number of modules in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of requirement edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

/// One direction of a [`ModuleGraph`], viewed as an adjacency mapping.
///
/// The keys of the mapping are the modules with at least one edge in the
/// view's direction; each key maps to its neighbors in edge insertion
/// order.
#[derive(Debug, Clone, Copy)]
pub struct GraphView<'g> {
    graph: &'g ModuleGraph,
    direction: Direction,
}

impl<'g> GraphView<'g> {
    /// Returns the direction this view follows.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Gets the neighbors of a module in this view's direction.
    ///
    /// Children for the forward view, parents for the reverse view. The
    /// order is the order in which the edges were added. Unknown modules
    /// have no neighbors.
    pub fn neighbors(&self, id: &str) -> Vec<&'g str> {
        let graph: &'g ModuleGraph = self.graph;
        let Some(&idx) = graph.node_indices.get(id) else {
            return Vec::new();
        };

        let mut edges: Vec<_> = graph
            .graph
            .edges_directed(idx, self.direction)
            .map(|edge| {
                let other = match self.direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                (edge.id(), other)
            })
            .collect();

        // petgraph walks adjacency lists newest-first
        edges.sort_unstable_by_key(|&(edge, _)| edge);

        edges
            .into_iter()
            .map(|(_, node)| graph.graph[node].as_str())
            .collect()
    }

    /// Returns every key of this adjacency mapping in order of first
    /// appearance.
    pub fn keys(&self) -> Vec<&'g str> {
        let graph: &'g ModuleGraph = self.graph;
        graph
            .graph
            .node_indices()
            .filter(|&idx| self.has_edges(idx))
            .map(|idx| graph.graph[idx].as_str())
            .collect()
    }

    /// Finds the keys matching a search term.
    ///
    /// A key matches when it equals `term` exactly or when its bare name
    /// equals `term`, so `pkg/foo` finds every version of `pkg/foo` while
    /// `pkg/foo@v1.2.0` finds only that version.
    ///
    /// # Example
    ///
    /// ```rust
    /// use modtree::graph::ModuleGraph;
    ///
    /// let graph = ModuleGraph::parse("root pkg/foo@v1.2.0\npkg/foo@v1.2.0 pkg/bar@v0.1.0\n");
    ///
    /// assert_eq!(graph.forward().find_matching("pkg/foo"), vec!["pkg/foo@v1.2.0"]);
    /// assert!(graph.forward().find_matching("pkg/bar").is_empty());
    /// ```
    pub fn find_matching(&self, term: &str) -> Vec<&'g str> {
        self.keys()
            .into_iter()
            .filter(|key| *key == term || bare_name(key) == term)
            .collect()
    }

    fn has_edges(&self, idx: NodeIndex) -> bool {
        self.graph
            .graph
            .edges_directed(idx, self.direction)
            .next()
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_graph() -> ModuleGraph {
        ModuleGraph::from_edges(vec![
            Edge::new("root", "a"),
            Edge::new("a", "b"),
            Edge::new("a", "c"),
            Edge::new("root", "d"),
        ])
    }

    #[test]
    fn test_create_empty_graph() {
        let graph = ModuleGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_empty());
        assert!(graph.forward().keys().is_empty());
    }

    #[test]
    fn test_add_module_is_idempotent() {
        let mut graph = ModuleGraph::new();
        let idx = graph.add_module("pkg/foo@v1.0.0");
        let idx2 = graph.add_module("pkg/foo@v1.0.0");
        assert_eq!(idx, idx2);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.forward().neighbors("pkg/foo@v1.0.0"), Vec::<&str>::new());
    }

    #[test]
    fn test_forward_preserves_insertion_order() {
        let graph = ModuleGraph::parse("root z\nroot a\nroot m\n");
        assert_eq!(graph.forward().neighbors("root"), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_reverse_preserves_insertion_order() {
        let graph = ModuleGraph::parse("x shared\ny shared\nw shared\n");
        assert_eq!(graph.reverse().neighbors("shared"), vec!["x", "y", "w"]);
    }

    #[test]
    fn test_views_are_transposes() {
        let graph = scenario_graph();
        assert_eq!(graph.forward().neighbors("a"), vec!["b", "c"]);
        assert_eq!(graph.reverse().neighbors("b"), vec!["a"]);
        assert_eq!(graph.reverse().neighbors("a"), vec!["root"]);
        assert!(graph.reverse().neighbors("root").is_empty());
    }

    #[test]
    fn test_duplicate_edges_are_kept() {
        let graph = ModuleGraph::parse("root a\nroot a\n");
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.forward().neighbors("root"), vec!["a", "a"]);
        assert_eq!(graph.reverse().neighbors("a"), vec!["root", "root"]);
    }

    #[test]
    fn test_self_loop() {
        let graph = ModuleGraph::parse("a a\n");
        assert_eq!(graph.forward().neighbors("a"), vec!["a"]);
        assert_eq!(graph.reverse().neighbors("a"), vec!["a"]);
    }

    #[test]
    fn test_unknown_module_has_no_neighbors() {
        let graph = scenario_graph();
        assert!(graph.forward().neighbors("nonexistent").is_empty());
    }

    #[test]
    fn test_keys_per_direction() {
        let graph = scenario_graph();
        assert_eq!(graph.forward().keys(), vec!["root", "a"]);
        assert_eq!(graph.reverse().keys(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_find_matching_bare_and_exact() {
        let graph = ModuleGraph::parse("root pkg/foo@v1.2.0\npkg/foo@v1.2.0 pkg/baz@v0.1.0\n");
        let forward = graph.forward();

        assert_eq!(forward.find_matching("pkg/foo"), vec!["pkg/foo@v1.2.0"]);
        assert_eq!(forward.find_matching("pkg/foo@v1.2.0"), vec!["pkg/foo@v1.2.0"]);
        assert!(forward.find_matching("pkg/bar").is_empty());
        assert!(forward.find_matching("pkg/foo@v9.9.9").is_empty());
    }

    #[test]
    fn test_find_matching_multiple_versions() {
        let graph = ModuleGraph::parse(
            "root pkg/foo@v1.0.0\nroot other@v1\nother@v1 pkg/foo@v2.0.0\n\
             pkg/foo@v1.0.0 x\npkg/foo@v2.0.0 y\n",
        );

        assert_eq!(
            graph.forward().find_matching("pkg/foo"),
            vec!["pkg/foo@v1.0.0", "pkg/foo@v2.0.0"]
        );
        assert_eq!(
            graph.reverse().find_matching("pkg/foo"),
            vec!["pkg/foo@v1.0.0", "pkg/foo@v2.0.0"]
        );
    }

    #[test]
    fn test_find_matching_respects_direction_keys() {
        // A leaf is only a key of the reverse mapping
        let graph = ModuleGraph::parse("root leaf@v1\n");
        assert!(graph.forward().find_matching("leaf").is_empty());
        assert_eq!(graph.reverse().find_matching("leaf"), vec!["leaf@v1"]);
    }

    #[test]
    fn test_direction_accessor() {
        let graph = ModuleGraph::new();
        assert_eq!(graph.forward().direction(), Direction::Outgoing);
        assert_eq!(graph.reverse().direction(), Direction::Incoming);
    }
}
