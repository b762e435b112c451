use smallvec::SmallVec;

use crate::term::TermId;
use crate::DEFAULT_NUM_PARENTS;

/// A set of [`TermId`]s
///
/// Each term can occur only once in the group and the group is always
/// sorted in ascending (lexicographic) order. Iterating a group therefore
/// yields the IDs in a deterministic order, independent of the
/// insertion order.
///
/// This group is used e.g. for the direct parents of a term or
/// for all ancestors of a term.
///
/// # Examples
///
/// ```
/// use goanno::TermGroup;
///
/// let mut group = TermGroup::new();
/// assert!(group.insert("GO:3".into()));
/// assert!(group.insert("GO:1".into()));
/// assert!(!group.insert("GO:3".into()));
///
/// assert_eq!(group.len(), 2);
/// assert_eq!(group, ["GO:1", "GO:3"]);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TermGroup {
    ids: SmallVec<[TermId; DEFAULT_NUM_PARENTS]>,
}

impl TermGroup {
    /// Constructs a new, empty [`TermGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`TermGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`TermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`TermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`TermId`] to the group
    ///
    /// Returns whether the `TermId` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `TermId`, true is returned.
    /// - If the group already contained this `TermId`, false is returned.
    ///
    pub fn insert(&mut self, id: TermId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Returns `true` if the group contains the term
    pub fn contains(&self, id: &str) -> bool {
        self.ids
            .binary_search_by(|probe| probe.as_str().cmp(id))
            .is_ok()
    }

    /// Returns an Iterator of the [`TermId`]s inside the group, in ascending order
    pub fn iter(&self) -> TermIds<'_> {
        TermIds::new(self.ids.iter())
    }
}

impl FromIterator<TermId> for TermGroup {
    fn from_iter<T: IntoIterator<Item = TermId>>(iter: T) -> Self {
        let mut group = TermGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl<'a> IntoIterator for &'a TermGroup {
    type Item = &'a TermId;
    type IntoIter = TermIds<'a>;

    fn into_iter(self) -> TermIds<'a> {
        TermIds::new(self.ids.iter())
    }
}

impl<const N: usize> PartialEq<[&str; N]> for TermGroup {
    fn eq(&self, other: &[&str; N]) -> bool {
        self.ids.len() == N && self.ids.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

/// An iterator over [`TermId`]s
pub struct TermIds<'a> {
    inner: std::slice::Iter<'a, TermId>,
}

impl<'a> TermIds<'a> {
    fn new(inner: std::slice::Iter<'a, TermId>) -> Self {
        Self { inner }
    }
}

impl<'a> Iterator for TermIds<'a> {
    type Item = &'a TermId;
    fn next(&mut self) -> Option<&'a TermId> {
        self.inner.next()
    }
}
