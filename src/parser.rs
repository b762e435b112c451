//! Parsing the source files of the annotation pipeline
//!
//! - OBO files with the `is_a` hierarchy of the ontology (`go-basic.obo`)
//! - Tab separated annotation files in GAF format (`*.gaf`)
//! - Tabular BLAST results (`-outfmt 6`)
//!
//! All parsers are tolerant: malformed records are skipped and counted,
//! they never abort the parsing of the whole file.

use std::fs;
use std::path::Path;

use crate::{GoError, GoResult};

/// Module to parse `go-basic.obo` files
pub(crate) mod go_obo;

/// Reads the full content of a file
///
/// # Errors
///
/// - [`GoError::CannotOpenFile`]: File not present or can't be read
pub(crate) fn read_file<P: AsRef<Path>>(file: P) -> GoResult<String> {
    let filename = file.as_ref().display().to_string();
    fs::read_to_string(file).map_err(|_| GoError::CannotOpenFile(filename))
}

/// Module to parse entity - term associations from GAF files
///
/// # Example lines
///
/// ```text
/// !gaf-version: 2.1
/// UniProtKB  Q9HGP0  pvg4        GO:0005634  PMID:16823372  IDA  C  ...
/// UniProtKB  Q9HGP0  pvg4   NOT  GO:0005737  PMID:16823372  IDA  C  ...
/// ```
pub(crate) mod gaf {
    use smallvec::SmallVec;
    use tracing::debug;

    use crate::annotations::AnnotationMap;
    use crate::{GoError, GoResult};
    use crate::{GAF_COMMENT, GAF_QUALIFIERS, MIN_GAF_COLUMNS};

    #[derive(Debug, PartialEq)]
    struct ParsedAnnotation<'a> {
        entity: &'a str,
        term: &'a str,
    }

    /// Returns `true` if `value` is a recognized GAF qualifier, e.g. `NOT`
    pub(crate) fn is_qualifier(value: &str) -> bool {
        GAF_QUALIFIERS
            .iter()
            .any(|qualifier| value.starts_with(qualifier))
    }

    /// Parses a single line of a GAF file
    ///
    /// Columns are positional: the entity is read from the 2nd column. The
    /// 4th column is the qualifier slot. If it is empty or holds a qualifier,
    /// the term ID is read from the 5th column, otherwise from the 4th.
    ///
    /// Returns `Ok(None)` for comments and empty lines
    fn parse_line(line: &str) -> GoResult<Option<ParsedAnnotation<'_>>> {
        if line.starts_with(GAF_COMMENT) || line.trim().is_empty() {
            return Ok(None);
        }

        let cols: SmallVec<[&str; MIN_GAF_COLUMNS]> = line
            .split('\t')
            .map(str::trim)
            .take(MIN_GAF_COLUMNS)
            .collect();

        if cols.len() < MIN_GAF_COLUMNS {
            return Err(GoError::InvalidInput(line.to_string()));
        }

        let entity = cols[1];
        let term = if cols[3].is_empty() || is_qualifier(cols[3]) {
            cols[4]
        } else {
            cols[3]
        };

        if entity.is_empty() || term.is_empty() {
            return Err(GoError::InvalidInput(line.to_string()));
        }

        Ok(Some(ParsedAnnotation { entity, term }))
    }

    /// Adds all annotations of a GAF file to the `AnnotationMap`
    pub(crate) fn parse(content: &str, annotations: &mut AnnotationMap) {
        for line in content.lines() {
            match parse_line(line) {
                Ok(Some(annotation)) => {
                    annotations.insert(annotation.entity, annotation.term);
                }
                Ok(None) => (),
                Err(err) => {
                    debug!("Skipping line: {}", err);
                    annotations.skip_line();
                }
            }
        }
    }

}

/// Module to parse tabular BLAST results (`-outfmt 6`)
///
/// # Example line
///
/// ```text
/// c0_g1_i1|m.1  gi|74665200|sp|Q9HGP0.1|PVG4_SCHPO  100.00  372  0  0  1  372  1  372  0.0  754
/// ```
pub(crate) mod outfmt6 {
    use smallvec::SmallVec;
    use tracing::debug;

    use crate::annotations::DirectMatches;
    use crate::{GoError, GoResult};
    use crate::BLAST_COLUMNS;

    #[derive(Debug, PartialEq)]
    struct BlastHit<'a> {
        query: &'a str,
        subject: &'a str,
        identity: f32,
    }

    /// Parses a single BLAST record
    ///
    /// - The query ID is the part of `qseqid` before the first `|`
    /// - The subject ID is the accession of `sseqid` (4th field), without the `.version` suffix
    fn parse_line(line: &str) -> GoResult<BlastHit<'_>> {
        let cols: SmallVec<[&str; BLAST_COLUMNS]> = line.trim_end().split('\t').collect();
        if cols.len() != BLAST_COLUMNS {
            return Err(GoError::InvalidInput(line.to_string()));
        }

        let Some(query) = cols[0].split('|').next().filter(|id| !id.is_empty()) else {
            return Err(GoError::InvalidInput(line.to_string()));
        };

        let Some(accession) = cols[1].split('|').nth(3).filter(|id| !id.is_empty()) else {
            return Err(GoError::InvalidInput(line.to_string()));
        };
        let subject = accession
            .rsplit_once('.')
            .map_or(accession, |(id, _version)| id);

        let identity = cols[2].trim().parse::<f32>()?;

        Ok(BlastHit {
            query,
            subject,
            identity,
        })
    }

    /// Adds the first hit of every query with an identity above `threshold`
    pub(crate) fn parse(content: &str, threshold: f32, matches: &mut DirectMatches) {
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok(hit) => {
                    if hit.identity > threshold {
                        matches.insert_first(hit.query, hit.subject);
                    }
                }
                Err(err) => {
                    debug!("Skipping line: {}", err);
                    matches.skip_line();
                }
            }
        }
    }

}

/// Module to parse differential expression matrices
///
/// # Example lines
///
/// ```text
/// transcript  Sp_ds     Sp_hs     Sp_log    Sp_plat
/// c0_g1_i1    1.36      0.22      3.02      0.49
/// ```
pub(crate) mod diff_exp {
    use tracing::debug;

    use crate::expression::{Expression, ExpressionMatrix};
    use crate::{GoError, GoResult};

    /// Splits a row into the transcript ID and its sample values
    ///
    /// The row must have exactly `columns` columns, including the transcript
    fn parse_line(line: &str, columns: usize) -> GoResult<Expression> {
        let mut cols = line.trim_end().split('\t');
        let transcript = cols
            .next()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GoError::InvalidInput(line.to_string()))?;

        let values: Vec<String> = cols.map(|value| value.trim().to_string()).collect();
        if values.len() + 1 != columns {
            return Err(GoError::InvalidInput(line.to_string()));
        }
        Ok(Expression::new(transcript, values))
    }

    /// Adds all rows of a matrix to `matrix`
    ///
    /// The first non-empty line is the header, it defines the sample names
    /// and the number of columns of every row.
    pub(crate) fn parse(content: &str, matrix: &mut ExpressionMatrix) {
        let mut lines = content.lines().filter(|line| !line.trim().is_empty());
        let Some(header) = lines.next() else {
            return;
        };
        let samples: Vec<&str> = header.trim_end().split('\t').skip(1).map(str::trim).collect();
        matrix.set_samples(&samples);

        for line in lines {
            match parse_line(line, samples.len() + 1) {
                Ok(expression) => matrix.push(expression),
                Err(err) => {
                    debug!("Skipping line: {}", err);
                    matrix.skip_line();
                }
            }
        }
    }

}
