//! Differential expression values of transcripts
//!
//! An expression matrix is a tab separated file with a header line and
//! one row per transcript. The first column holds the transcript ID, all
//! other columns hold one value per sample:
//!
//! ```text
//!             Sp_ds     Sp_hs     Sp_log    Sp_plat
//! c0_g1_i1    1.36      0.22      3.02      0.49
//! ```
//!
//! Values are kept verbatim, they are only passed through to the
//! [`ExpressionReport`](crate::report::ExpressionReport).

use std::path::Path;

use tracing::{debug, warn};

use crate::annotations::EntityId;
use crate::parser;
use crate::GoResult;

/// The expression values of a single transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    transcript: EntityId,
    values: Vec<String>,
}

impl Expression {
    /// Constructs a new row
    pub fn new(transcript: &str, values: Vec<String>) -> Self {
        Self {
            transcript: transcript.to_string(),
            values,
        }
    }

    /// The transcript ID
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// One value per sample, in the order of [`ExpressionMatrix::samples`]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// All rows of a differential expression matrix, in input order
///
/// # Examples
///
/// ```
/// use goanno::ExpressionMatrix;
///
/// let matrix = ExpressionMatrix::from_matrix_str(
///     "\tSp_ds\tSp_hs\nc0_g1_i1\t1.36\t0.22\nc1_g1_i1\t-2.5\n",
/// );
/// assert_eq!(matrix.samples(), &["Sp_ds", "Sp_hs"]);
/// assert_eq!(matrix.len(), 1);
/// assert_eq!(matrix.skipped_lines(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ExpressionMatrix {
    samples: Vec<String>,
    rows: Vec<Expression>,
    skipped: usize,
}

impl ExpressionMatrix {
    /// Builds the matrix from the content of a matrix file
    ///
    /// Rows whose number of columns differs from the header are skipped and counted.
    pub fn from_matrix_str(content: &str) -> Self {
        let mut matrix = ExpressionMatrix::default();
        parser::diff_exp::parse(content, &mut matrix);
        if matrix.skipped > 0 {
            warn!("Skipped {} invalid expression lines", matrix.skipped);
        }
        debug!(
            "Parsed {} transcripts with {} samples",
            matrix.len(),
            matrix.samples.len()
        );
        matrix
    }

    /// Builds the matrix from a matrix file
    ///
    /// # Errors
    ///
    /// - [`GoError::CannotOpenFile`](crate::GoError::CannotOpenFile): the file does not exist or is not readable
    pub fn from_matrix_file<P: AsRef<Path>>(filename: P) -> GoResult<Self> {
        let content = parser::read_file(filename)?;
        Ok(Self::from_matrix_str(&content))
    }

    /// The sample names of the header
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Returns an iterator of all rows, in input order
    pub fn iter(&self) -> std::slice::Iter<'_, Expression> {
        self.rows.iter()
    }

    /// Returns the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of source lines that were skipped because they were invalid
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    pub(crate) fn set_samples(&mut self, samples: &[&str]) {
        self.samples = samples.iter().map(|sample| sample.to_string()).collect();
    }

    pub(crate) fn push(&mut self, expression: Expression) {
        self.rows.push(expression);
    }

    pub(crate) fn skip_line(&mut self) {
        self.skipped += 1;
    }
}

impl<'a> IntoIterator for &'a ExpressionMatrix {
    type Item = &'a Expression;
    type IntoIter = std::slice::Iter<'a, Expression>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
