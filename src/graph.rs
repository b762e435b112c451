use core::fmt::Debug;
use std::collections::hash_map::Keys;
use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::parser;
use crate::term::{TermGroup, TermId};
use crate::GoResult;

mod cache;
mod closure;
mod node;

pub use cache::AncestorCache;
pub use closure::{ancestor_levels, ancestors, Ancestor};
pub use node::TermNode;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `TermGraph` holds the `is_a` hierarchy of an ontology
///
/// Every term of the source is a node of the graph and knows its
/// direct parents. The graph is built once (e.g. from an OBO file) and
/// only read afterwards.
///
/// The graph does not enforce any consistency:
///
/// - A parent ID does not have to be present as a node itself. Such a
///   dangling parent is treated as a leaf without any further ancestors.
/// - The graph is not required to be acyclic. [`TermGraph::ancestors`]
///   terminates for cyclic graphs as well.
///
/// # Examples
///
/// ```
/// use goanno::TermGraph;
///
/// let obo = "[Term]
/// id: GO:2
/// name: child
/// is_a: GO:1 ! root
///
/// [Term]
/// id: GO:3
/// name: grandchild
/// is_a: GO:2 ! child
/// ";
///
/// let graph = TermGraph::from_obo_str(obo);
/// assert_eq!(graph.len(), 2);
///
/// // GO:1 is only known as a parent
/// assert!(!graph.contains("GO:1"));
/// assert_eq!(graph.name("GO:3"), Some("grandchild"));
///
/// assert_eq!(graph.ancestors("GO:3"), ["GO:1", "GO:2"]);
/// assert!(graph.ancestors("GO:1").is_empty());
/// ```
///
/// # Layout
///
/// ```mermaid
/// erDiagram
///     TERMGRAPH ||--|{ TERM : contains
///     TERM }|--o{ TERM : is_a
///     TERM {
///         TermId id
///         str name
///         TermGroup parents
///     }
/// ```
#[derive(Default, Clone)]
pub struct TermGraph {
    terms: HashMap<TermId, TermNode>,
}

impl Debug for TermGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TermGraph with {} terms", self.terms.len())
    }
}

impl TermGraph {
    /// Builds the graph from the content of an OBO file
    ///
    /// Parsing never fails. Blocks without an `id` and malformed lines
    /// are skipped.
    pub fn from_obo_str(content: &str) -> Self {
        let mut graph = TermGraph::default();
        parser::go_obo::read_obo(content, &mut graph);
        debug!("Parsed {} terms", graph.len());
        graph
    }

    /// Builds the graph from an OBO file
    ///
    /// # Errors
    ///
    /// - [`GoError::CannotOpenFile`](crate::GoError::CannotOpenFile): the file does not exist or is not readable
    pub fn from_obo_file<P: AsRef<Path>>(filename: P) -> GoResult<Self> {
        let content = parser::read_file(filename)?;
        Ok(Self::from_obo_str(&content))
    }

    /// Returns the number of terms in the graph
    ///
    /// Dangling parents are not counted
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the graph does not contain any terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns `true` if the term is a node of the graph
    pub fn contains(&self, term_id: &str) -> bool {
        self.terms.contains_key(term_id)
    }

    /// Returns the [`TermNode`] of the term, or `None` if the term is not part of the graph
    pub fn get(&self, term_id: &str) -> Option<&TermNode> {
        self.terms.get(term_id)
    }

    /// Returns the direct parents of the term
    ///
    /// Returns `None` if the term is not part of the graph. A term
    /// without any `is_a` relationship returns an empty group instead.
    pub fn parents(&self, term_id: &str) -> Option<&TermGroup> {
        self.terms.get(term_id).map(TermNode::parents)
    }

    /// Returns the name of the term, if the term exists and has a name
    pub fn name(&self, term_id: &str) -> Option<&str> {
        self.terms.get(term_id).and_then(TermNode::name)
    }

    /// Returns an iterator of all [`TermId`]s of the graph, in arbitrary order
    pub fn term_ids(&self) -> Keys<'_, TermId, TermNode> {
        self.terms.keys()
    }

    /// Returns all direct and indirect ancestors of the term
    ///
    /// See [`ancestors`] for details.
    pub fn ancestors(&self, term_id: &str) -> TermGroup {
        ancestors(term_id, self)
    }

    /// Adds a term to the graph
    ///
    /// If the term already exists, only its name is updated and all
    /// parent connections are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use goanno::TermGraph;
    ///
    /// let mut graph = TermGraph::default();
    /// graph.insert_term("GO:1", Some("root"));
    /// graph.insert_term("GO:2", None);
    ///
    /// assert_eq!(graph.len(), 2);
    /// assert_eq!(graph.name("GO:1"), Some("root"));
    /// assert_eq!(graph.name("GO:2"), None);
    /// ```
    pub fn insert_term<I: Into<TermId>>(&mut self, term_id: I, name: Option<&str>) {
        let node = self.terms.entry(term_id.into()).or_default();
        if let Some(name) = name {
            node.set_name(name);
        }
    }

    /// Add a connection from a term to its parent
    ///
    /// The child term is added to the graph if it is not present yet.
    /// The parent is **not** added, it stays a dangling reference until
    /// it is inserted itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use goanno::TermGraph;
    ///
    /// let mut graph = TermGraph::default();
    /// graph.add_parent("GO:1", "GO:2");
    ///
    /// assert!(graph.parents("GO:2").unwrap().contains("GO:1"));
    /// assert!(graph.parents("GO:1").is_none());
    /// ```
    pub fn add_parent<I: Into<TermId>, J: Into<TermId>>(&mut self, parent_id: I, child_id: J) {
        self.terms
            .entry(child_id.into())
            .or_default()
            .add_parent(parent_id.into());
    }

    /// Inserts a fully parsed node, replacing a previous node with the same ID
    pub(crate) fn insert_node(&mut self, term_id: TermId, node: TermNode) {
        if self.terms.insert(term_id, node).is_some() {
            debug!("Replaced duplicate term");
        }
    }
}
