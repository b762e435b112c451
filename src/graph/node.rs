use crate::term::{TermGroup, TermId};

/// A single term of the [`TermGraph`](crate::TermGraph)
///
/// The node stores the optional name and the direct parents of the term.
/// The ancestor closure is never stored, it is computed on demand.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TermNode {
    name: Option<String>,
    parents: TermGroup,
}

impl TermNode {
    /// Constructs a new node without any parents
    pub fn new(name: Option<&str>) -> TermNode {
        TermNode {
            name: name.map(str::to_string),
            parents: TermGroup::default(),
        }
    }

    /// The name of the term, e.g. `mitochondrion inheritance`
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The direct `is_a` parents of the term
    pub fn parents(&self) -> &TermGroup {
        &self.parents
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    pub(crate) fn add_parent(&mut self, parent_id: TermId) -> bool {
        self.parents.insert(parent_id)
    }
}
