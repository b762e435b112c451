//! Annotates entities with their GO terms and all ancestors of those terms
//!
//! ```text
//! go_annotate <TERMS.obo> <ANNOTATIONS.gaf> [<OUTPUT.tsv>] [--matches <HITS.outfmt6>] [--expression <DIFF_EXP.matrix>] [--names] [--levels]
//! ```
//!
//! - `--matches`: Report BLAST queries (e.g. transcripts) instead of the
//!   annotated proteins. Every query inherits the terms of its first
//!   subject with an identity above 99%.
//! - `--expression`: Report the rows of a differential expression matrix,
//!   each transcript with its matched protein and the terms of the protein.
//!   Transcripts are linked to proteins through `--matches`.
//! - `--names`: Add the name of every term as an extra column
//! - `--levels`: Indent ancestors by their distance to the annotated term
//!
//! Without `<OUTPUT.tsv>` the report is written to stdout.
//! Input files that cannot be read are reported and treated as empty.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use goanno::{
    AnnotationMap, DirectMatchFilter, DirectMatches, ExpressionMatrix, ExpressionReport, GoError,
    GoResult, Report, ReportOptions, TermGraph,
};

const USAGE: &str = "Arguments: <input_terms> <input_annotations> [<output_filename>] [--matches <blast_results>] [--expression <diff_exp_matrix>] [--names] [--levels]";

#[derive(Debug, Default, PartialEq)]
struct Arguments {
    terms: String,
    annotations: String,
    output: Option<String>,
    matches: Option<String>,
    expression: Option<String>,
    options: ReportOptions,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Option<Arguments> {
    let mut arguments = Arguments::default();
    let mut positional: Vec<String> = Vec::with_capacity(3);

    while let Some(arg) = args.next() {
        if !arg.starts_with("--") {
            positional.push(arg);
            continue;
        }
        match arg.as_str() {
            "--matches" => arguments.matches = Some(args.next()?),
            "--expression" => arguments.expression = Some(args.next()?),
            "--names" => arguments.options.with_names = true,
            "--levels" => arguments.options.indent_levels = true,
            _ => return None,
        }
    }

    let mut positional = positional.into_iter();
    arguments.terms = positional.next()?;
    arguments.annotations = positional.next()?;
    arguments.output = positional.next();
    if positional.next().is_some() {
        return None;
    }
    Some(arguments)
}

fn load_matches(filename: &str) -> DirectMatches {
    DirectMatchFilter::default()
        .filter_file(filename)
        .unwrap_or_else(|err| {
            error!("Failed to open BLAST results file: {}", err);
            DirectMatches::default()
        })
}

fn writer(output: Option<&str>) -> GoResult<Box<dyn Write>> {
    match output {
        Some(filename) => {
            let file = File::create(filename)
                .map_err(|_| GoError::CannotOpenFile(filename.to_string()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn run(arguments: &Arguments) -> GoResult<()> {
    let graph = TermGraph::from_obo_file(&arguments.terms).unwrap_or_else(|err| {
        error!("Failed to open GO terms file: {}", err);
        TermGraph::default()
    });
    info!("Loaded {} terms", graph.len());

    let annotations = AnnotationMap::from_gaf_file(&arguments.annotations).unwrap_or_else(|err| {
        error!("Failed to open GO annotations file: {}", err);
        AnnotationMap::default()
    });
    info!("Loaded annotations of {} entities", annotations.len());

    let matches = arguments.matches.as_deref().map(load_matches);
    let output = writer(arguments.output.as_deref())?;

    if let Some(matrix_file) = &arguments.expression {
        let matrix = ExpressionMatrix::from_matrix_file(matrix_file).unwrap_or_else(|err| {
            error!("Failed to open expression matrix: {}", err);
            ExpressionMatrix::default()
        });
        info!("Loaded expression values of {} transcripts", matrix.len());
        let matches = matches.unwrap_or_default();
        ExpressionReport::new(&matrix, &matches, &annotations, &graph).write_tsv(output)?;
    } else {
        let entities = match matches {
            Some(matches) => {
                info!("Transferring annotations to {} queries", matches.len());
                matches.transfer(&annotations)
            }
            None => annotations,
        };
        Report::with_options(&entities, &graph, arguments.options).write_tsv(output)?;
    }

    if let Some(filename) = &arguments.output {
        info!("Report written to {}", filename);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(arguments) = parse_args(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        process::exit(2);
    };

    if let Err(err) = run(&arguments) {
        error!("{}", err);
        process::exit(1);
    }
}
