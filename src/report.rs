//! Flattened, tab separated report of entities, their terms and all ancestors
//!
//! The report contains one block per entity, in ascending order of the
//! entity IDs:
//!
//! ```text
//! P12345  GO:0000003
//!                 GO:0000002
//!                 GO:0000001
//!         GO:0000009
//! Q99999
//! ```
//!
//! - The first row of a block holds the entity ID and its first term.
//! - Every directly annotated term (ascending) is followed by one row
//!   per ancestor. Ancestors are ordered by their distance to the term,
//!   ancestors with the same distance by ID.
//! - Entities without any annotated term are still reported, with a single row.
//!
//! [`ExpressionReport`] joins a differential expression matrix with the
//! directly annotated terms of every transcript instead.

use std::fmt::Display;
use std::io::Write;

use tracing::debug;

use crate::annotations::{AnnotationMap, EntityId};
use crate::graph::{AncestorCache, TermGraph};
use crate::term::TermId;
use crate::{GoError, GoResult};

mod expression;
pub use expression::ExpressionReport;

/// Placeholder for missing values, e.g. terms without a name
const MISSING: &str = "NA";

/// Options for rendering a [`Report`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Adds the name of every term as an extra column
    pub with_names: bool,
    /// Indents ancestors by one column per `is_a` level instead
    /// of placing all of them in the same column
    pub indent_levels: bool,
}

/// A single row of a [`Report`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRow {
    /// An entity without any annotated terms
    Entity(EntityId),
    /// A term that is directly annotated to an entity
    ///
    /// `entity` is only set for the first term of every entity
    Term {
        entity: Option<EntityId>,
        term: TermId,
    },
    /// An ancestor of the preceding term
    Ancestor { term: TermId, distance: usize },
}

/// Report of all entities, their directly annotated terms and the ancestors of those terms
///
/// # Examples
///
/// ```
/// use goanno::{AnnotationMap, Report, TermGraph};
///
/// let graph = TermGraph::from_obo_str(
///     "[Term]\nid: GO:2\nis_a: GO:1\n\n[Term]\nid: GO:3\nis_a: GO:2\n",
/// );
/// let mut annotations = AnnotationMap::default();
/// annotations.insert("E1", "GO:3");
///
/// let report = Report::new(&annotations, &graph);
/// assert_eq!(report.to_string(), "E1\tGO:3\n\t\tGO:2\n\t\tGO:1\n");
/// ```
#[derive(Debug)]
pub struct Report<'a> {
    graph: &'a TermGraph,
    rows: Vec<ReportRow>,
    options: ReportOptions,
}

impl<'a> Report<'a> {
    /// Assembles the report with default options
    pub fn new(annotations: &AnnotationMap, graph: &'a TermGraph) -> Self {
        Self::with_options(annotations, graph, ReportOptions::default())
    }

    /// Assembles the report
    pub fn with_options(
        annotations: &AnnotationMap,
        graph: &'a TermGraph,
        options: ReportOptions,
    ) -> Self {
        let mut cache = AncestorCache::new(graph);
        let mut rows = Vec::new();

        for entity in annotations.entities() {
            let terms = match annotations.terms(entity) {
                Some(terms) if !terms.is_empty() => terms,
                _ => {
                    rows.push(ReportRow::Entity(entity.to_string()));
                    continue;
                }
            };

            for (idx, term) in terms.iter().enumerate() {
                rows.push(ReportRow::Term {
                    entity: (idx == 0).then(|| entity.to_string()),
                    term: term.clone(),
                });
                for ancestor in cache.ancestor_levels(term.as_str()) {
                    rows.push(ReportRow::Ancestor {
                        term: ancestor.id.clone(),
                        distance: ancestor.distance,
                    });
                }
            }
        }
        debug!("Assembled report with {} rows", rows.len());

        Self {
            graph,
            rows,
            options,
        }
    }

    /// All rows of the report, in output order
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Writes the report as tab separated text
    ///
    /// # Errors
    ///
    /// - [`GoError::CannotWrite`]: Writing to `writer` failed
    pub fn write_tsv<W: Write>(&self, mut writer: W) -> GoResult<()> {
        write!(writer, "{self}").map_err(|err| GoError::CannotWrite(err.to_string()))?;
        writer
            .flush()
            .map_err(|err| GoError::CannotWrite(err.to_string()))
    }

    fn name_column(&self, term: &TermId) -> String {
        if self.options.with_names {
            format!("\t{}", self.graph.name(term.as_str()).unwrap_or(MISSING))
        } else {
            String::new()
        }
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            match row {
                ReportRow::Entity(entity) => writeln!(f, "{entity}")?,
                ReportRow::Term { entity, term } => writeln!(
                    f,
                    "{}\t{}{}",
                    entity.as_deref().unwrap_or_default(),
                    term,
                    self.name_column(term)
                )?,
                ReportRow::Ancestor { term, distance } => {
                    let indent = if self.options.indent_levels {
                        *distance
                    } else {
                        1
                    };
                    writeln!(
                        f,
                        "\t{}{}{}",
                        "\t".repeat(indent),
                        term,
                        self.name_column(term)
                    )?
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn chain_graph() -> TermGraph {
        TermGraph::from_obo_str(
            "[Term]
id: GO:1
name: root

[Term]
id: GO:2
name: child
is_a: GO:1 ! root

[Term]
id: GO:3
name: grandchild
is_a: GO:2 ! child
",
        )
    }

    #[test]
    fn end_to_end_order() {
        let graph = chain_graph();
        let annotations =
            AnnotationMap::from_gaf_str("UniProtKB\tE1\tSYM\t\tGO:3\tPMID:1\tIDA\n");

        let report = Report::new(&annotations, &graph);
        assert_eq!(
            report.rows(),
            &[
                ReportRow::Term {
                    entity: Some("E1".to_string()),
                    term: "GO:3".into()
                },
                ReportRow::Ancestor {
                    term: "GO:2".into(),
                    distance: 1
                },
                ReportRow::Ancestor {
                    term: "GO:1".into(),
                    distance: 2
                },
            ]
        );
        assert_eq!(report.to_string(), "E1\tGO:3\n\t\tGO:2\n\t\tGO:1\n");
    }

    #[test]
    fn entities_and_terms_are_sorted() {
        let graph = chain_graph();
        let mut annotations = AnnotationMap::default();
        annotations.insert("P2", "GO:3");
        annotations.insert("P1", "GO:2");
        annotations.insert("P1", "GO:1");

        let report = Report::new(&annotations, &graph);
        assert_eq!(
            report.to_string(),
            "P1\tGO:1\n\tGO:2\n\t\tGO:1\nP2\tGO:3\n\t\tGO:2\n\t\tGO:1\n"
        );
    }

    #[test]
    fn entity_without_terms_is_reported() {
        let graph = chain_graph();
        let mut annotations = AnnotationMap::default();
        annotations.add_entity("P0");
        annotations.insert("P1", "GO:1");

        let report = Report::new(&annotations, &graph);
        assert_eq!(report.rows()[0], ReportRow::Entity("P0".to_string()));
        assert_eq!(report.to_string(), "P0\nP1\tGO:1\n");
    }

    #[test]
    fn unknown_term_is_reported() {
        let graph = chain_graph();
        let mut annotations = AnnotationMap::default();
        annotations.insert("P1", "GO:999");

        let report = Report::new(&annotations, &graph);
        assert_eq!(report.rows().len(), 1);
        assert_eq!(report.to_string(), "P1\tGO:999\n");
    }

    #[test]
    fn with_names() {
        let graph = chain_graph();
        let mut annotations = AnnotationMap::default();
        annotations.insert("P1", "GO:2");
        annotations.insert("P1", "GO:7");
        let options = ReportOptions {
            with_names: true,
            ..Default::default()
        };

        let report = Report::with_options(&annotations, &graph, options);
        assert_eq!(
            report.to_string(),
            "P1\tGO:2\tchild\n\t\tGO:1\troot\n\tGO:7\tNA\n"
        );
    }

    #[test]
    fn indent_levels() {
        let graph = chain_graph();
        let mut annotations = AnnotationMap::default();
        annotations.insert("E1", "GO:3");
        let options = ReportOptions {
            indent_levels: true,
            ..Default::default()
        };

        let report = Report::with_options(&annotations, &graph, options);
        assert_eq!(report.to_string(), "E1\tGO:3\n\t\tGO:2\n\t\t\tGO:1\n");
    }

    #[test]
    fn cyclic_terms() {
        let mut graph = TermGraph::default();
        graph.add_parent("GO:B", "GO:A");
        graph.add_parent("GO:A", "GO:B");
        let mut annotations = AnnotationMap::default();
        annotations.insert("E1", "GO:A");

        let report = Report::new(&annotations, &graph);
        assert_eq!(report.to_string(), "E1\tGO:A\n\t\tGO:B\n");
    }

    #[test]
    fn write_tsv() {
        let graph = chain_graph();
        let mut annotations = AnnotationMap::default();
        annotations.insert("E1", "GO:2");

        let mut buffer: Vec<u8> = Vec::new();
        Report::new(&annotations, &graph)
            .write_tsv(&mut buffer)
            .expect("writing to a Vec cannot fail");
        assert_eq!(String::from_utf8(buffer).unwrap(), "E1\tGO:2\n\t\tGO:1\n");
    }

    #[test]
    fn empty_report() {
        let graph = TermGraph::default();
        let report = Report::new(&AnnotationMap::default(), &graph);
        assert!(report.rows().is_empty());
        assert_eq!(report.to_string(), "");
    }
}
