use core::fmt::Debug;
use std::borrow::Borrow;
use std::fmt::Display;

/// The identifier of a single ontology term, e.g. `GO:0008150`
///
/// The ID is treated as an opaque string. It is never validated and
/// two IDs are equal only if their string representation is identical.
/// Ordering is lexicographic.
///
/// # Examples
///
/// ```
/// use goanno::TermId;
///
/// let id = TermId::from("GO:0008150");
/// assert_eq!(id.as_str(), "GO:0008150");
/// assert_eq!(id, "GO:0008150");
/// assert!(TermId::from("GO:0000001") < id);
/// ```
#[derive(Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TermId {
    inner: String,
}

impl TermId {
    /// Returns the string representation of the ID
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl From<&str> for TermId {
    fn from(s: &str) -> Self {
        TermId {
            inner: s.to_string(),
        }
    }
}

impl From<String> for TermId {
    fn from(inner: String) -> Self {
        TermId { inner }
    }
}

impl From<&TermId> for TermId {
    fn from(id: &TermId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for TermId {
    fn borrow(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for TermId {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Debug for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TermId({})", self)
    }
}

impl Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl PartialEq<str> for TermId {
    fn eq(&self, other: &str) -> bool {
        self.inner == other
    }
}

impl PartialEq<&str> for TermId {
    fn eq(&self, other: &&str) -> bool {
        self.inner == *other
    }
}
