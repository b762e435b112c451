use std::collections::HashMap;

use tracing::debug;

use crate::graph::{ancestor_levels, ancestors, Ancestor, TermGraph};
use crate::term::{TermGroup, TermId};

/// Caches the ancestors of terms of a [`TermGraph`]
///
/// Building a report queries the same terms over and over again, once
/// for every entity they are annotated to. The cache calculates the
/// ancestors of each term only once.
///
/// The cache borrows the graph, so the graph cannot change while the
/// cache is alive and cached results never get stale.
///
/// # Examples
///
/// ```
/// use goanno::{AncestorCache, TermGraph};
///
/// let mut graph = TermGraph::default();
/// graph.add_parent("GO:1", "GO:2");
/// graph.add_parent("GO:2", "GO:3");
///
/// let mut cache = AncestorCache::new(&graph);
/// assert_eq!(cache.ancestors("GO:3"), &["GO:1", "GO:2"]);
/// assert_eq!(cache.len(), 1);
///
/// // cached now
/// assert_eq!(cache.ancestors("GO:3"), &["GO:1", "GO:2"]);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct AncestorCache<'a> {
    graph: &'a TermGraph,
    cache: HashMap<TermId, TermGroup>,
    levels: HashMap<TermId, Vec<Ancestor>>,
}

impl<'a> AncestorCache<'a> {
    /// Constructs a new, empty cache for the graph
    pub fn new(graph: &'a TermGraph) -> Self {
        Self {
            graph,
            cache: HashMap::new(),
            levels: HashMap::new(),
        }
    }

    /// The underlying graph
    pub fn graph(&self) -> &'a TermGraph {
        self.graph
    }

    /// Returns all ancestors of the term, calculating them on the first call
    pub fn ancestors(&mut self, term_id: &str) -> &TermGroup {
        let graph = self.graph;
        self.cache
            .entry(TermId::from(term_id))
            .or_insert_with(|| ancestors(term_id, graph))
    }

    /// Returns all ancestors of the term ordered by distance, calculating them on the first call
    ///
    /// See [`ancestor_levels`] for details.
    pub fn ancestor_levels(&mut self, term_id: &str) -> &[Ancestor] {
        let graph = self.graph;
        self.levels
            .entry(TermId::from(term_id))
            .or_insert_with(|| ancestor_levels(term_id, graph))
    }

    /// Calculates and caches the ancestors of every term of the graph
    ///
    /// Terms that are cached already are not calculated again.
    pub fn fill(&mut self) {
        let graph = self.graph;
        for term_id in graph.term_ids() {
            if !self.cache.contains_key(term_id) {
                self.cache
                    .insert(term_id.clone(), ancestors(term_id.as_str(), graph));
            }
        }
        debug!("Cached ancestors of {} terms", self.cache.len());
    }

    /// Returns the number of terms with cached ancestors
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if no term is cached yet
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
