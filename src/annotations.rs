//! Entities (proteins, transcripts) and the terms annotated to them
//!
//! This module contains two mappings that are built from tab separated
//! source files:
//!
//! - [`AnnotationMap`]: entity ID to the set of directly annotated terms (GAF files)
//! - [`DirectMatches`]: query ID to the ID of its best-matching subject (BLAST results)
//!
//! Both mappings are filled once and only read afterwards. Malformed source
//! lines are not fatal, they are skipped and counted.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::parser;
use crate::term::{TermGroup, TermId};
use crate::GoResult;

mod direct_match;
pub use direct_match::{DirectMatchFilter, DirectMatches};

/// The identifier of an annotated entity, e.g. a UniProt accession
pub type EntityId = String;

/// Maps entities to the terms that are directly annotated to them
///
/// # Examples
///
/// ```
/// use goanno::AnnotationMap;
///
/// let gaf = "!gaf-version: 2.1
/// UniProtKB\tQ9HGP0\tpvg4\t\tGO:0005634\tPMID:1\tIDA
/// UniProtKB\tQ9HGP0\tpvg4\tNOT\tGO:0005737\tPMID:1\tIDA
/// UniProtKB\tQ9HGP0\tpvg4\t\tGO:0005634\tPMID:2\tIDA
/// ";
///
/// let annotations = AnnotationMap::from_gaf_str(gaf);
/// assert_eq!(annotations.len(), 1);
/// assert_eq!(
///     annotations.terms("Q9HGP0").unwrap(),
///     &["GO:0005634", "GO:0005737"]
/// );
/// ```
#[derive(Debug, Default, Clone)]
pub struct AnnotationMap {
    entities: HashMap<EntityId, TermGroup>,
    skipped: usize,
}

impl AnnotationMap {
    /// Builds the mapping from the content of a GAF file
    ///
    /// Comment lines (starting with `!`) are ignored. Lines with less
    /// than 5 columns or without entity or term ID are skipped and counted.
    pub fn from_gaf_str(content: &str) -> Self {
        let mut annotations = AnnotationMap::default();
        parser::gaf::parse(content, &mut annotations);
        if annotations.skipped > 0 {
            warn!("Skipped {} invalid annotation lines", annotations.skipped);
        }
        debug!("Parsed annotations of {} entities", annotations.len());
        annotations
    }

    /// Builds the mapping from a GAF file
    ///
    /// # Errors
    ///
    /// - [`GoError::CannotOpenFile`](crate::GoError::CannotOpenFile): the file does not exist or is not readable
    pub fn from_gaf_file<P: AsRef<Path>>(filename: P) -> GoResult<Self> {
        let content = parser::read_file(filename)?;
        Ok(Self::from_gaf_str(&content))
    }

    /// Annotates the term to the entity
    ///
    /// Returns whether the term was newly added to the entity
    pub fn insert<I: Into<TermId>>(&mut self, entity: &str, term_id: I) -> bool {
        self.entry(entity).insert(term_id.into())
    }

    /// Adds the entity without any annotated terms
    ///
    /// Nothing happens if the entity is already present
    pub fn add_entity(&mut self, entity: &str) {
        self.entry(entity);
    }

    /// Returns the terms directly annotated to the entity
    ///
    /// Returns `None` if the entity is unknown
    pub fn terms(&self, entity: &str) -> Option<&TermGroup> {
        self.entities.get(entity)
    }

    /// Returns all entity IDs in ascending order
    pub fn entities(&self) -> Vec<&str> {
        let mut entities: Vec<&str> = self.entities.keys().map(String::as_str).collect();
        entities.sort_unstable();
        entities
    }

    /// Returns the number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity is present
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the number of source lines that were skipped because they were invalid
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    pub(crate) fn skip_line(&mut self) {
        self.skipped += 1;
    }

    fn entry(&mut self, entity: &str) -> &mut TermGroup {
        self.entities.entry(entity.to_string()).or_default()
    }
}
