//! Identifiers of ontology terms and sets of them
//!
//! A [`TermId`] is the opaque identifier of a single term, e.g. `GO:0008150`.
//! A [`TermGroup`] is a sorted set of [`TermId`]s and is used for both the
//! direct parents of a term and its full ancestor closure.

mod group;
mod termid;

pub use group::{TermGroup, TermIds};
pub use termid::TermId;
