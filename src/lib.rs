#![doc = include_str!("../README.md")]
use std::num::ParseFloatError;
use thiserror::Error;

pub mod annotations;
pub mod expression;
pub mod graph;
mod parser;
pub mod report;
pub mod term;

pub use annotations::{AnnotationMap, DirectMatchFilter, DirectMatches, EntityId};
pub use expression::{Expression, ExpressionMatrix};
pub use graph::{ancestor_levels, ancestors, Ancestor, AncestorCache, TermGraph};
pub use report::{ExpressionReport, Report, ReportOptions, ReportRow};
pub use term::{TermGroup, TermId};

/// Header line that opens a term block in an OBO file
pub const TERM_HEADER: &str = "[Term]";

/// Lines of an annotation (GAF) file starting with this char are comments
pub const GAF_COMMENT: char = '!';

/// Qualifier prefixes that shift the GO-ID one column to the right
pub const GAF_QUALIFIERS: [&str; 3] = ["NOT", "contributes_to", "colocalizes_with"];

/// Minimum number of tab separated columns of an annotation line
pub const MIN_GAF_COLUMNS: usize = 5;

/// Number of columns of a tabular BLAST record (`-outfmt 6`)
pub const BLAST_COLUMNS: usize = 12;

/// Percent identity a BLAST hit must exceed to count as a direct match
pub const DIRECT_MATCH_IDENTITY: f32 = 99.0;

/// Percent identity threshold of the stricter downstream filter
pub const STRICT_MATCH_IDENTITY: f32 = 95.0;

const DEFAULT_NUM_PARENTS: usize = 4;
const DEFAULT_NUM_ALL_PARENTS: usize = 30;

/// Main Error type for this crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GoError {
    /// Failed to open a file
    #[error("cannot open file {0}")]
    CannotOpenFile(String),
    /// Failed to write the report
    #[error("cannot write output: {0}")]
    CannotWrite(String),
    /// A line or record does not have the expected format
    #[error("invalid data: {0}")]
    InvalidInput(String),
    /// Failed to parse a float (e.g. the percent identity of a BLAST hit)
    #[error("unable to parse float")]
    ParseFloatError,
}

impl From<ParseFloatError> for GoError {
    fn from(_: ParseFloatError) -> Self {
        GoError::ParseFloatError
    }
}

/// Shortcut for `Result<T, GoError>`
pub type GoResult<T> = Result<T, GoError>;
