//! Parser for `go mod graph` and `go list -m` output.
//!
//! `go mod graph` prints one requirement per line as two whitespace
//! separated identifiers. `go list -m` prints one module path per line.

use std::collections::HashSet;

use tracing::trace;

use super::types::Edge;

/// Parses an edge list into requirement edges.
///
/// Lines that do not split into exactly two whitespace-separated tokens
/// (blank lines, stray single tokens, trailing garbage) are skipped.
/// Edge order follows line order and duplicates are kept.
///
/// # Example
///
/// ```
/// use modtree::parser::parse_edges;
///
/// let edges = parse_edges("example.com/app golang.org/x/text@v0.3.7\n\nbroken line here\n");
/// assert_eq!(edges.len(), 1);
/// assert_eq!(edges[0].parent, "example.com/app");
/// ```
pub fn parse_edges(content: &str) -> Vec<Edge> {
    content
        .lines()
        .enumerate()
        .filter_map(|(line_no, line)| {
            let mut tokens = line.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(parent), Some(child), None) => Some(Edge::new(parent, child)),
                _ => {
                    trace!(line = line_no + 1, "skipping malformed edge line");
                    None
                }
            }
        })
        .collect()
}

/// Parses a line-delimited module listing into a set of module paths.
///
/// Each line is trimmed; empty lines are ignored.
pub fn parse_module_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edges_in_order() {
        let edges = parse_edges("root a@v1\na@v1 b@v2\nroot c@v3\n");
        assert_eq!(
            edges,
            vec![
                Edge::new("root", "a@v1"),
                Edge::new("a@v1", "b@v2"),
                Edge::new("root", "c@v3"),
            ]
        );
    }

    #[test]
    fn test_parse_edges_skips_malformed_lines() {
        let content = "\n   \nlonely\nroot a\none two three\n\troot\t  b  \n";
        let edges = parse_edges(content);
        assert_eq!(edges, vec![Edge::new("root", "a"), Edge::new("root", "b")]);
    }

    #[test]
    fn test_parse_edges_keeps_duplicates() {
        let edges = parse_edges("root a\nroot a\n");
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_parse_edges_empty_input() {
        assert!(parse_edges("").is_empty());
    }

    #[test]
    fn test_parse_module_list() {
        let modules = parse_module_list("pkg/bar\n\n  pkg/baz  \n\n");
        assert_eq!(modules.len(), 2);
        assert!(modules.contains("pkg/bar"));
        assert!(modules.contains("pkg/baz"));
    }

    #[test]
    fn test_parse_module_list_empty() {
        assert!(parse_module_list("\n\n").is_empty());
    }
}
