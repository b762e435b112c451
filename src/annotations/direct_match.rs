use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::annotations::{AnnotationMap, EntityId};
use crate::parser;
use crate::GoResult;
use crate::{DIRECT_MATCH_IDENTITY, STRICT_MATCH_IDENTITY};

/// Selects direct matches from tabular BLAST results
///
/// A hit is a direct match if its percent identity is strictly greater
/// than the threshold. Only the **first** direct match of every query
/// is kept, in input order. Later hits of the same query never replace
/// it, even if they have a higher identity.
///
/// # Examples
///
/// ```
/// use goanno::DirectMatchFilter;
///
/// let hits = "tx1|m.1\tgi|1|sp|PROT1.1|NAME\t99.00\t372\t0\t0\t1\t372\t1\t372\t0.0\t754
/// tx1|m.1\tgi|1|sp|PROT2.1|NAME\t100.00\t372\t0\t0\t1\t372\t1\t372\t0.0\t754
/// tx1|m.1\tgi|1|sp|PROT3.1|NAME\t100.00\t372\t0\t0\t1\t372\t1\t372\t0.0\t754
/// ";
///
/// let matches = DirectMatchFilter::default().filter_str(hits);
/// assert_eq!(matches.subject("tx1"), Some("PROT2"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectMatchFilter {
    threshold: f32,
}

impl Default for DirectMatchFilter {
    /// Filter with a threshold of `99.0`
    fn default() -> Self {
        Self::new(DIRECT_MATCH_IDENTITY)
    }
}

impl DirectMatchFilter {
    /// Constructs a filter with a custom identity threshold (in percent)
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Filter with a threshold of `95.0`
    pub fn strict() -> Self {
        Self::new(STRICT_MATCH_IDENTITY)
    }

    /// The percent identity a hit must exceed
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Selects the direct matches of BLAST results in `-outfmt 6`
    ///
    /// Lines that do not have exactly 12 columns or contain invalid
    /// IDs or identities are skipped and counted.
    pub fn filter_str(&self, content: &str) -> DirectMatches {
        let mut matches = DirectMatches::default();
        parser::outfmt6::parse(content, self.threshold, &mut matches);
        if matches.skipped > 0 {
            warn!("Skipped {} invalid BLAST lines", matches.skipped);
        }
        debug!(
            "Found direct matches for {} queries (identity > {})",
            matches.len(),
            self.threshold
        );
        matches
    }

    /// Selects the direct matches of a BLAST results file
    ///
    /// # Errors
    ///
    /// - [`GoError::CannotOpenFile`](crate::GoError::CannotOpenFile): the file does not exist or is not readable
    pub fn filter_file<P: AsRef<Path>>(&self, filename: P) -> GoResult<DirectMatches> {
        let content = parser::read_file(filename)?;
        Ok(self.filter_str(&content))
    }
}

/// Maps query entities (e.g. transcripts) to the subject of their direct match
#[derive(Debug, Default, Clone)]
pub struct DirectMatches {
    matches: HashMap<EntityId, String>,
    skipped: usize,
}

impl DirectMatches {
    /// Returns the subject ID (e.g. the UniProt accession) matched to the query
    pub fn subject(&self, query: &str) -> Option<&str> {
        self.matches.get(query).map(String::as_str)
    }

    /// Returns all query IDs in ascending order
    pub fn queries(&self) -> Vec<&str> {
        let mut queries: Vec<&str> = self.matches.keys().map(String::as_str).collect();
        queries.sort_unstable();
        queries
    }

    /// Returns the number of queries with a direct match
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` if no query has a direct match
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns the number of source lines that were skipped because they were invalid
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    /// Transfers the annotations of every subject to its query
    ///
    /// Every query is part of the result, queries whose subject
    /// is not annotated get an empty set of terms.
    ///
    /// # Examples
    ///
    /// ```
    /// use goanno::{AnnotationMap, DirectMatchFilter};
    ///
    /// let hits = "tx1|m.1\tgi|1|sp|PROT1.1|NAME\t100.00\t372\t0\t0\t1\t372\t1\t372\t0.0\t754
    /// tx2|m.2\tgi|1|sp|PROT2.1|NAME\t100.00\t372\t0\t0\t1\t372\t1\t372\t0.0\t754
    /// ";
    /// let matches = DirectMatchFilter::default().filter_str(hits);
    ///
    /// let mut annotations = AnnotationMap::default();
    /// annotations.insert("PROT1", "GO:1");
    ///
    /// let transcripts = matches.transfer(&annotations);
    /// assert_eq!(transcripts.terms("tx1").unwrap(), &["GO:1"]);
    /// assert!(transcripts.terms("tx2").unwrap().is_empty());
    /// ```
    pub fn transfer(&self, annotations: &AnnotationMap) -> AnnotationMap {
        let mut result = AnnotationMap::default();
        for (query, subject) in &self.matches {
            result.add_entity(query);
            if let Some(terms) = annotations.terms(subject) {
                for term in terms {
                    result.insert(query, term);
                }
            }
        }
        result
    }

    /// Adds the match unless the query has a match already
    ///
    /// Returns whether the match was added
    pub(crate) fn insert_first(&mut self, query: &str, subject: &str) -> bool {
        match self.matches.entry(query.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(subject.to_string());
                true
            }
        }
    }

    pub(crate) fn skip_line(&mut self) {
        self.skipped += 1;
    }
}
