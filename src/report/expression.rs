use std::fmt::Display;
use std::io::Write;

use crate::annotations::{AnnotationMap, DirectMatches};
use crate::expression::{Expression, ExpressionMatrix};
use crate::graph::TermGraph;
use crate::{GoError, GoResult};

use super::MISSING;

/// Joins differential expression values with the GO terms of every transcript
///
/// The transcripts are linked to proteins through their [`DirectMatches`] and
/// the proteins to their terms through the [`AnnotationMap`]. Rows follow the
/// order of the [`ExpressionMatrix`]:
///
/// ```text
/// c0_g1_i1  Q9HGP0  1.36  0.22  3.02  0.49  GO:0005634  nucleus
///                                           GO:0005737  cytoplasm
/// c1_g1_i1  NA      0.10  2.61  1.25  0.75  NA          NA
/// ```
///
/// - A transcript without a direct match gets `NA` as protein.
/// - A transcript whose protein has no annotated terms gets `NA` as term and name.
/// - Terms are ascending, only the first row of a transcript repeats the transcript,
///   protein and expression values.
///
/// # Examples
///
/// ```
/// use goanno::{AnnotationMap, DirectMatchFilter, ExpressionMatrix, ExpressionReport, TermGraph};
///
/// let graph = TermGraph::from_obo_str("[Term]\nid: GO:1\nname: root\n");
/// let mut annotations = AnnotationMap::default();
/// annotations.insert("PROT1", "GO:1");
/// let matches = DirectMatchFilter::default().filter_str(
///     "tx1|m.1\tgi|1|sp|PROT1.1|NAME\t100.00\t372\t0\t0\t1\t372\t1\t372\t0.0\t754\n",
/// );
/// let matrix = ExpressionMatrix::from_matrix_str("\tSp_ds\ntx1\t1.36\ntx2\t0.22\n");
///
/// let report = ExpressionReport::new(&matrix, &matches, &annotations, &graph);
/// assert_eq!(
///     report.to_string(),
///     "tx1\tPROT1\t1.36\tGO:1\troot\ntx2\tNA\t0.22\tNA\tNA\n"
/// );
/// ```
#[derive(Debug)]
pub struct ExpressionReport<'a> {
    matrix: &'a ExpressionMatrix,
    matches: &'a DirectMatches,
    annotations: &'a AnnotationMap,
    graph: &'a TermGraph,
}

impl<'a> ExpressionReport<'a> {
    /// Constructs the report, the rows are rendered on output
    pub fn new(
        matrix: &'a ExpressionMatrix,
        matches: &'a DirectMatches,
        annotations: &'a AnnotationMap,
        graph: &'a TermGraph,
    ) -> Self {
        Self {
            matrix,
            matches,
            annotations,
            graph,
        }
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

    fn write_transcript(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        expression: &Expression,
    ) -> std::fmt::Result {
        let protein = self.matches.subject(expression.transcript());
        let values = expression.values().join("\t");
        let prefix = if values.is_empty() {
            format!(
                "{}\t{}",
                expression.transcript(),
                protein.unwrap_or(MISSING)
            )
        } else {
            format!(
                "{}\t{}\t{}",
                expression.transcript(),
                protein.unwrap_or(MISSING),
                values
            )
        };

        let terms = protein.and_then(|protein| self.annotations.terms(protein));
        let Some(terms) = terms.filter(|terms| !terms.is_empty()) else {
            return writeln!(f, "{prefix}\t{MISSING}\t{MISSING}");
        };

        // transcript, protein and one column per sample stay empty on follow-up rows
        let empty_columns = "\t".repeat(expression.values().len() + 2);
        for (idx, term) in terms.iter().enumerate() {
            let name = self.graph.name(term.as_str()).unwrap_or(MISSING);
            if idx == 0 {
                writeln!(f, "{prefix}\t{term}\t{name}")?;
            } else {
                writeln!(f, "{empty_columns}{term}\t{name}")?;
            }
        }
        Ok(())
    }
}

impl Display for ExpressionReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for expression in self.matrix {
            self.write_transcript(f, expression)?;
        }
        Ok(())
    }
}
