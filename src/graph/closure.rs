use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::graph::TermGraph;
use crate::term::{TermGroup, TermId};
use crate::DEFAULT_NUM_ALL_PARENTS;

/// An ancestor of a term and its distance to the term
///
/// The distance is the number of `is_a` edges on the shortest
/// path from the term to the ancestor, direct parents have a distance of 1.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ancestor {
    /// Number of `is_a` edges on the shortest path
    pub distance: usize,
    /// The ID of the ancestor
    pub id: TermId,
}

/// Returns all direct and indirect `is_a` ancestors of a term
///
/// The graph is traversed depth-first using an explicit work stack, so
/// deep hierarchies cannot overflow the call stack. Every term is expanded
/// at most once per call, which guarantees termination for cyclic graphs.
///
/// - A term that is not part of the graph has no ancestors.
/// - A dangling parent (a parent that is not a node of the graph) is part
///   of the result, but has no ancestors itself.
/// - The queried term is never part of its own ancestors, even if it
///   is reachable through a cycle.
///
/// The function only reads the graph, so repeated calls return the same
/// set and results can be cached, e.g. with [`AncestorCache`](crate::AncestorCache).
///
/// # Examples
///
/// ```
/// use goanno::{ancestors, TermGraph};
///
/// let mut graph = TermGraph::default();
/// // A is_a B, A is_a C, B is_a D, C is_a D
/// graph.add_parent("B", "A");
/// graph.add_parent("C", "A");
/// graph.add_parent("D", "B");
/// graph.add_parent("D", "C");
///
/// assert_eq!(ancestors("A", &graph), ["B", "C", "D"]);
/// assert_eq!(ancestors("B", &graph), ["D"]);
/// assert!(ancestors("D", &graph).is_empty());
/// ```
pub fn ancestors(term_id: &str, graph: &TermGraph) -> TermGroup {
    let mut result = TermGroup::with_capacity(DEFAULT_NUM_ALL_PARENTS);

    let Some(parents) = graph.parents(term_id) else {
        trace!("{} is not part of the graph", term_id);
        return result;
    };

    let mut expanded: HashSet<&str> = HashSet::new();
    expanded.insert(term_id);
    let mut stack = vec![parents];

    while let Some(parents) = stack.pop() {
        for parent in parents {
            if !expanded.insert(parent.as_str()) {
                continue;
            }
            result.insert(parent.clone());
            if let Some(grandparents) = graph.parents(parent.as_str()) {
                stack.push(grandparents);
            }
        }
    }
    result
}

/// Returns all ancestors of a term, ordered by their distance to the term
///
/// Ancestors with the same distance are sorted by their ID. The set of
/// returned IDs is identical to [`ancestors`], with the same rules for
/// unknown terms, dangling parents and cycles.
///
/// # Examples
///
/// ```
/// use goanno::TermGraph;
/// use goanno::graph::ancestor_levels;
///
/// let mut graph = TermGraph::default();
/// // GO:3 is_a GO:2 is_a GO:1
/// graph.add_parent("GO:1", "GO:2");
/// graph.add_parent("GO:2", "GO:3");
///
/// let ancestors = ancestor_levels("GO:3", &graph);
/// let levels: Vec<(usize, &str)> = ancestors
///     .iter()
///     .map(|ancestor| (ancestor.distance, ancestor.id.as_str()))
///     .collect();
/// assert_eq!(levels, vec![(1, "GO:2"), (2, "GO:1")]);
/// ```
pub fn ancestor_levels(term_id: &str, graph: &TermGraph) -> Vec<Ancestor> {
    let mut result = Vec::with_capacity(DEFAULT_NUM_ALL_PARENTS);

    let Some(parents) = graph.parents(term_id) else {
        return result;
    };

    let mut expanded: HashSet<&str> = HashSet::new();
    expanded.insert(term_id);
    let mut queue = VecDeque::from([(parents, 1usize)]);

    while let Some((parents, distance)) = queue.pop_front() {
        for parent in parents {
            if !expanded.insert(parent.as_str()) {
                continue;
            }
            result.push(Ancestor {
                distance,
                id: parent.clone(),
            });
            if let Some(grandparents) = graph.parents(parent.as_str()) {
                queue.push_back((grandparents, distance + 1));
            }
        }
    }
    result.sort_unstable();
    result
}
