//! Tree data structures for dependency rendering
//!
//! [`TreeWalker`] walks a [`GraphView`] from a starting module and builds a
//! [`TreeNode`] hierarchy. [`TreeNode::lines`] turns that hierarchy into
//! box-drawing text.
//!
//! Requirement chains can be arbitrarily long, so the walk, the rendering,
//! the serialization and the drop of a tree all run on explicit work stacks
//! rather than the call stack.

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::convert::Infallible;
use std::io::{self, Write};

use crate::graph::GraphView;
use crate::parser::bare_name;

/// Suffix appended to the label of an indirect dependency.
pub const INDIRECT_MARKER: &str = " (Indirect)";

/// The pieces of tree prefix contributed by one level of nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connector {
    /// Drawn in front of the child's own line
    pub branch: &'static str,
    /// Carried in front of every line below the child
    pub continuation: &'static str,
}

/// Returns the connector for a child, depending on whether it is the last
/// of its siblings.
pub fn connector(is_last: bool) -> Connector {
    if is_last {
        Connector {
            branch: "└── ",
            continuation: "    ",
        }
    } else {
        Connector {
            branch: "├── ",
            continuation: "│   ",
        }
    }
}

/// Why a node's neighbors were not expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stop {
    /// The module was already expanded earlier in the same walk
    Revisited,
    /// The depth ceiling was reached
    Depth,
}

/// A node in the rendered dependency tree
///
/// Serializes as a flat pre-order list of [`TreeEntry`] values, one per
/// printed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Full module identifier
    pub id: String,
    /// Whether the module is flagged as an indirect dependency
    pub indirect: bool,
    /// Set when the walk did not expand this node
    pub stop: Option<Stop>,
    /// Expanded neighbors, in graph order
    pub children: Vec<TreeNode>,
}

/// One node of a tree, as seen by a pre-order traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeEntry<'t> {
    /// Full module identifier
    pub id: &'t str,
    /// Distance from the root of the tree
    pub depth: usize,
    /// Whether the module is flagged as an indirect dependency
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub indirect: bool,
    /// Set when the walk did not expand this node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Stop>,
}

/// Pre-order iterator over a tree, see [`TreeNode::entries`].
#[derive(Debug, Clone)]
pub struct Entries<'t> {
    stack: Vec<(&'t TreeNode, usize)>,
}

impl<'t> Iterator for Entries<'t> {
    type Item = TreeEntry<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (child, depth + 1)));

        Some(TreeEntry {
            id: &node.id,
            depth,
            indirect: node.indirect,
            stop: node.stop,
        })
    }
}

impl TreeNode {
    /// Create a new leaf node
    pub fn new(id: impl Into<String>, indirect: bool) -> Self {
        Self {
            id: id.into(),
            indirect,
            stop: None,
            children: Vec::new(),
        }
    }

    /// The text shown for this node, without any tree prefix
    pub fn label(&self) -> String {
        if self.indirect {
            format!("{}{}", self.id, INDIRECT_MARKER)
        } else {
            self.id.clone()
        }
    }

    /// Iterate over the nodes of this subtree in the order they are printed
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            stack: vec![(self, 0)],
        }
    }

    /// Total number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        self.entries().count()
    }

    /// Render the tree into one line per node
    pub fn lines(&self) -> Vec<String> {
        let mut result = Vec::new();
        let outcome: Result<(), Infallible> = self.try_for_each_line(|prefix, branch, node| {
            result.push(format!("{}{}{}", prefix, branch, node.label()));
            Ok(())
        });

        match outcome {
            Ok(()) => result,
            Err(never) => match never {},
        }
    }

    /// Write the rendered tree, one node per line
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.try_for_each_line(|prefix, branch, node| {
            let marker = if node.indirect { INDIRECT_MARKER } else { "" };
            writeln!(writer, "{}{}{}{}", prefix, branch, node.id, marker)
        })
    }

    /// Calls `emit` with the continuation prefix, the connector and the node
    /// of every line, top to bottom.
    ///
    /// One prefix buffer is shared by all lines and trimmed back to the
    /// current level before each one.
    fn try_for_each_line<E>(
        &self,
        mut emit: impl FnMut(&str, &str, &TreeNode) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut prefix = String::new();
        // widths[level] is the prefix length in front of lines at that level
        let mut widths = vec![0];
        let mut stack = vec![(self, 0, "", "")];

        while let Some((node, level, branch, continuation)) = stack.pop() {
            widths.truncate(level + 1);
            prefix.truncate(widths[level]);
            emit(&prefix, branch, node)?;

            prefix.push_str(continuation);
            widths.push(prefix.len());

            let last = node.children.len().saturating_sub(1);
            for (i, child) in node.children.iter().enumerate().rev() {
                let connector = connector(i == last);
                stack.push((child, level + 1, connector.branch, connector.continuation));
            }
        }

        Ok(())
    }
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries())
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Walks one direction of a module graph and builds [`TreeNode`]s.
///
/// Every module is expanded at most once per walk: later occurrences are
/// kept as leaves marked [`Stop::Revisited`]. This bounds the output on
/// cyclic graphs and means a shared dependency is expanded only under the
/// first parent that reaches it.
///
/// # Example
///
/// ```rust
/// use modtree::graph::ModuleGraph;
/// use modtree::tree::TreeWalker;
///
/// let graph = ModuleGraph::parse("root a\na b\na c\nroot d\n");
/// let tree = TreeWalker::new(graph.forward()).walk("root");
///
/// assert_eq!(
///     tree.lines(),
///     vec!["root", "├── a", "│   ├── b", "│   └── c", "└── d"]
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeWalker<'a> {
    view: GraphView<'a>,
    indirect: Option<&'a HashSet<String>>,
    max_depth: usize,
}

/// A node whose neighbors are still being walked.
struct Frame<'a> {
    node: TreeNode,
    depth: usize,
    pending: std::vec::IntoIter<&'a str>,
}

enum Step<'a> {
    Leaf(TreeNode),
    Expand(Frame<'a>),
}

impl<'a> TreeWalker<'a> {
    /// Create a walker with no annotation and no depth limit
    pub fn new(view: GraphView<'a>) -> Self {
        Self {
            view,
            indirect: None,
            max_depth: 0,
        }
    }

    /// Flag modules whose bare name is in `indirect`
    pub fn with_indirect(mut self, indirect: Option<&'a HashSet<String>>) -> Self {
        self.indirect = indirect;
        self
    }

    /// Stop expanding below `max_depth` levels; 0 means unlimited
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Walk from `root` with a fresh visited set
    pub fn walk(&self, root: &str) -> TreeNode {
        let mut visited = HashSet::new();
        let mut current = match self.enter(root, 0, &mut visited) {
            Step::Leaf(node) => return node,
            Step::Expand(frame) => frame,
        };
        let mut ancestors: Vec<Frame<'a>> = Vec::new();

        loop {
            match current.pending.next() {
                Some(next) => match self.enter(next, current.depth + 1, &mut visited) {
                    Step::Leaf(node) => current.node.children.push(node),
                    Step::Expand(frame) => ancestors.push(std::mem::replace(&mut current, frame)),
                },
                None => match ancestors.pop() {
                    Some(parent) => {
                        let done = std::mem::replace(&mut current, parent);
                        current.node.children.push(done.node);
                    }
                    None => return current.node,
                },
            }
        }
    }

    /// Emits the node for `id` and decides whether to expand it.
    fn enter(&self, id: &str, depth: usize, visited: &mut HashSet<String>) -> Step<'a> {
        let mut node = TreeNode::new(id, self.is_indirect(id));

        if !visited.insert(id.to_string()) {
            node.stop = Some(Stop::Revisited);
            return Step::Leaf(node);
        }

        let neighbors = self.view.neighbors(id);

        if self.max_depth > 0 && depth >= self.max_depth {
            if !neighbors.is_empty() {
                node.stop = Some(Stop::Depth);
            }
            return Step::Leaf(node);
        }

        Step::Expand(Frame {
            node,
            depth,
            pending: neighbors.into_iter(),
        })
    }

    fn is_indirect(&self, id: &str) -> bool {
        self.indirect
            .is_some_and(|indirect| indirect.contains(bare_name(id)))
    }
}
