//! Minimum spanning forests over weighted, undirected edge lists.
//!
//! Edges are read one per line as `<from> <to> <weight>`, ordered in an
//! [`AvlTree`] by weight and joined with Kruskal's algorithm. Vertex names
//! are arbitrary whitespace-free strings.

use std::fmt;
use std::io::BufRead;

use log::debug;
use thiserror::Error;

use crate::types::AvlTree;

/// Comparator ordering edges by weight, then by endpoint names.
pub type EdgeOrder = fn(&Edge, &Edge) -> bool;

/// The set of distinct edges, lightest first.
pub type EdgeSet = AvlTree<Edge, EdgeOrder>;

/// A weighted, undirected edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: u32,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: u32) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    fn sort_key(&self) -> (u32, &str, &str) {
        (self.weight, &self.from, &self.to)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.from, self.to, self.weight)
    }
}

/// Lightest first; ties broken by `from`, then `to`.
pub fn edge_less(a: &Edge, b: &Edge) -> bool {
    a.sort_key() < b.sort_key()
}

/// Errors from reading an edge list.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A line did not have the `<from> <to> <weight>` shape.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("failed to read edges: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}

/// Parse a single `<from> <to> <weight>` line; `line` is 1-based and only
/// used for error reporting.
pub fn parse_edge(text: &str, line: usize) -> Result<Edge, GraphError> {
    let mut fields = text.split_whitespace();
    let (Some(from), Some(to), Some(weight)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(GraphError::parse(line, "expected `<from> <to> <weight>`"));
    };
    if fields.next().is_some() {
        return Err(GraphError::parse(line, "trailing fields after the weight"));
    }
    let weight = weight
        .parse::<u32>()
        .map_err(|e| GraphError::parse(line, format!("bad weight `{}`: {}", weight, e)))?;
    Ok(Edge::new(from, to, weight))
}

/// Read edges until the first blank line or end of input.
pub fn parse_edges<R: BufRead>(reader: R) -> Result<Vec<Edge>, GraphError> {
    let mut edges = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        edges.push(parse_edge(&line, index + 1)?);
    }
    debug!("parsed {} edges", edges.len());
    Ok(edges)
}

/// Collect edges into a set ordered lightest first. Identical edges collapse.
pub fn sorted_edges<I: IntoIterator<Item = Edge>>(edges: I) -> EdgeSet {
    let mut set = EdgeSet::with_comparator(edge_less as EdgeOrder);
    set.extend(edges);
    set
}

// ============================================================================
// UNION-FIND
// ============================================================================

/// Disjoint-set forest over `0..n` with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl DisjointSets {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    /// Representative of the set holding `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is out of range.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets holding `a` and `b`; false if they were already one.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        self.sets -= 1;
        true
    }

    /// Number of disjoint sets.
    pub fn count(&self) -> usize {
        self.sets
    }
}

// ============================================================================
// KRUSKAL
// ============================================================================

/// Result of [`minimum_spanning_forest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningForest {
    /// Chosen edges, lightest first.
    pub edges: Vec<Edge>,
    pub total_weight: u64,
    /// Connected components among the vertices that appear in the input.
    pub components: usize,
}

/// Kruskal's algorithm: a minimum spanning tree for each connected
/// component of the graph. Self-loops are never chosen.
///
/// # Examples
///
/// ```
/// use avltree::graph::{minimum_spanning_forest, Edge};
///
/// let forest = minimum_spanning_forest(vec![
///     Edge::new("a", "b", 1),
///     Edge::new("b", "c", 2),
///     Edge::new("a", "c", 3),
/// ]);
/// assert_eq!(forest.total_weight, 3);
/// assert_eq!(forest.components, 1);
/// ```
pub fn minimum_spanning_forest<I: IntoIterator<Item = Edge>>(edges: I) -> SpanningForest {
    let edges = sorted_edges(edges);

    let mut vertices = AvlTree::<String>::new();
    for edge in &edges {
        vertices.insert(edge.from.clone());
        vertices.insert(edge.to.clone());
    }
    let names: Vec<&str> = vertices.iter().map(String::as_str).collect();
    let index = |name: &str| names.binary_search(&name).ok();
    debug!("{} distinct edges over {} vertices", edges.len(), names.len());

    let mut sets = DisjointSets::new(names.len());
    let mut chosen = Vec::new();
    let mut total_weight = 0u64;
    for edge in &edges {
        let (Some(a), Some(b)) = (index(edge.from.as_str()), index(edge.to.as_str())) else {
            continue;
        };
        if sets.union(a, b) {
            total_weight += u64::from(edge.weight);
            chosen.push(edge.clone());
        }
    }

    SpanningForest {
        edges: chosen,
        total_weight,
        components: sets.count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edges_until_blank_line() {
        let input = "a b 3\nb c 1\n\nc d 9\n";
        let edges = parse_edges(input.as_bytes()).unwrap();
        assert_eq!(edges, vec![Edge::new("a", "b", 3), Edge::new("b", "c", 1)]);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let err = parse_edges("a b 3\na b x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::Parse { line: 2, .. }));
        assert!(err.to_string().starts_with("line 2: bad weight `x`"));

        let err = parse_edges("a b\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::Parse { line: 1, .. }));

        let err = parse_edge("a b 1 extra", 4).unwrap_err();
        assert_eq!(err.to_string(), "line 4: trailing fields after the weight");
    }

    #[test]
    fn test_sorted_edges_order_and_dedup() {
        let set = sorted_edges(vec![
            Edge::new("c", "d", 2),
            Edge::new("a", "b", 2),
            Edge::new("x", "y", 1),
            Edge::new("a", "b", 2),
        ]);
        let order: Vec<String> = set.iter().map(Edge::to_string).collect();
        assert_eq!(order, ["x y 1", "a b 2", "c d 2"]);
        assert!(set.check_invariants());
    }

    #[test]
    fn test_disjoint_sets() {
        let mut sets = DisjointSets::new(5);
        assert_eq!(sets.count(), 5);
        assert!(sets.union(0, 1));
        assert!(sets.union(3, 4));
        assert!(sets.union(1, 4));
        assert!(!sets.union(0, 3));
        assert_eq!(sets.count(), 2);
        assert_eq!(sets.find(0), sets.find(4));
        assert_ne!(sets.find(2), sets.find(0));
    }

    #[test]
    fn test_spanning_tree_of_connected_graph() {
        let forest = minimum_spanning_forest(vec![
            Edge::new("A", "B", 1),
            Edge::new("B", "C", 2),
            Edge::new("A", "C", 3),
            Edge::new("C", "D", 4),
            Edge::new("B", "D", 5),
        ]);
        assert_eq!(
            forest.edges,
            vec![Edge::new("A", "B", 1), Edge::new("B", "C", 2), Edge::new("C", "D", 4)]
        );
        assert_eq!(forest.total_weight, 7);
        assert_eq!(forest.components, 1);
    }

    #[test]
    fn test_spanning_forest_of_disconnected_graph() {
        let forest = minimum_spanning_forest(vec![
            Edge::new("a", "b", 1),
            Edge::new("c", "d", 2),
            Edge::new("e", "e", 0),
        ]);
        assert_eq!(forest.edges.len(), 2);
        assert_eq!(forest.total_weight, 3);
        assert_eq!(forest.components, 3);
    }

    #[test]
    fn test_empty_graph() {
        let forest = minimum_spanning_forest(Vec::new());
        assert!(forest.edges.is_empty());
        assert_eq!(forest.total_weight, 0);
        assert_eq!(forest.components, 0);
    }
}
