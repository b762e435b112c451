use rayon::prelude::*;

use goanno::{
    AncestorCache, AnnotationMap, DirectMatchFilter, ExpressionMatrix, ExpressionReport, GoError,
    Report, ReportOptions, TermGraph, TermId,
};

const TERMS: &str = "tests/small.obo";
const ANNOTATIONS: &str = "tests/small.gaf";
const MATCHES: &str = "tests/small.outfmt6";
const EXPRESSION: &str = "tests/small.matrix";

fn graph() -> TermGraph {
    TermGraph::from_obo_file(TERMS).expect("test ontology must be present")
}

fn annotations() -> AnnotationMap {
    AnnotationMap::from_gaf_file(ANNOTATIONS).expect("test annotations must be present")
}

#[test]
fn load_terms() {
    let graph = graph();
    assert_eq!(graph.len(), 7);
    assert_eq!(graph.name("GO:0000001"), Some("mitochondrion inheritance"));
    assert_eq!(graph.name("GO:0008150"), Some("biological_process"));
    assert!(graph.parents("GO:0008150").unwrap().is_empty());

    // only referenced as a parent
    assert!(!graph.contains("GO:0043231"));
    // [Typedef] blocks are not terms
    assert!(!graph.contains("part_of"));
}

#[test]
fn ancestors_of_fixture_terms() {
    let graph = graph();
    assert_eq!(
        graph.ancestors("GO:0000001"),
        [
            "GO:0006996",
            "GO:0008150",
            "GO:0009987",
            "GO:0048308",
            "GO:0048311"
        ]
    );
    assert_eq!(graph.ancestors("GO:0005634"), ["GO:0043231"]);
    assert!(graph.ancestors("GO:0008150").is_empty());
    assert!(graph.ancestors("GO:0043231").is_empty());
    assert!(graph.ancestors("GO:9999999").is_empty());
}

#[test]
fn ancestor_distances() {
    let graph = graph();
    let levels = goanno::ancestor_levels("GO:0000001", &graph);
    let levels: Vec<(usize, &str)> = levels
        .iter()
        .map(|ancestor| (ancestor.distance, ancestor.id.as_str()))
        .collect();
    assert_eq!(
        levels,
        vec![
            (1, "GO:0048308"),
            (1, "GO:0048311"),
            (2, "GO:0006996"),
            (3, "GO:0009987"),
            (4, "GO:0008150"),
        ]
    );
}

#[test]
fn load_annotations() {
    let annotations = annotations();
    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations.skipped_lines(), 1);
    assert_eq!(annotations.entities(), vec!["SPAC1002.01", "SPBC460.03"]);
    assert_eq!(
        annotations.terms("SPAC1002.01").unwrap(),
        &["GO:0000001", "GO:0005634"]
    );
    assert_eq!(annotations.terms("SPBC460.03").unwrap(), &["GO:0005634"]);
}

#[test]
fn full_report() {
    let graph = graph();
    let annotations = annotations();

    let report = Report::new(&annotations, &graph);
    assert_eq!(
        report.to_string(),
        "SPAC1002.01\tGO:0000001
\t\tGO:0048308
\t\tGO:0048311
\t\tGO:0006996
\t\tGO:0009987
\t\tGO:0008150
\tGO:0005634
\t\tGO:0043231
SPBC460.03\tGO:0005634
\t\tGO:0043231
"
    );
}

#[test]
fn report_with_names_and_levels() {
    let graph = graph();
    let annotations = annotations();
    let options = ReportOptions {
        with_names: true,
        indent_levels: true,
    };

    let report = Report::with_options(&annotations, &graph, options);
    let output = report.to_string();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "SPAC1002.01\tGO:0000001\tmitochondrion inheritance");
    assert_eq!(lines[1], "\t\tGO:0048308\torganelle inheritance");
    assert_eq!(lines[5], "\t\t\t\t\tGO:0008150\tbiological_process");
    assert_eq!(lines[7], "\t\tGO:0043231\tNA");
}

#[test]
fn direct_matches() {
    let matches = DirectMatchFilter::default()
        .filter_file(MATCHES)
        .expect("test BLAST results must be present");

    assert_eq!(matches.len(), 3);
    assert_eq!(matches.skipped_lines(), 1);
    // 99.00 is not above the threshold, the first 100.00 hit wins
    assert_eq!(matches.subject("c0_g1_i1"), Some("SPBC460.03"));
    assert_eq!(matches.subject("c1_g1_i1"), Some("SPAC1002.01"));
    assert_eq!(matches.subject("c2_g1_i1"), Some("Q00000"));
    assert_eq!(matches.queries(), vec!["c0_g1_i1", "c1_g1_i1", "c2_g1_i1"]);
}

#[test]
fn strict_direct_matches() {
    let matches = DirectMatchFilter::strict()
        .filter_file(MATCHES)
        .expect("test BLAST results must be present");

    // 99.00 is above 95.0 now
    assert_eq!(matches.subject("c0_g1_i1"), Some("SPAC1002.01"));
    assert_eq!(matches.subject("c1_g1_i1"), Some("SPAC1002.01"));
    assert_eq!(matches.len(), 3);
}

#[test]
fn transcript_report() {
    let graph = graph();
    let matches = DirectMatchFilter::default().filter_file(MATCHES).unwrap();
    let transcripts = matches.transfer(&annotations());

    assert_eq!(transcripts.len(), 3);
    assert_eq!(transcripts.terms("c0_g1_i1").unwrap(), &["GO:0005634"]);
    assert!(transcripts.terms("c2_g1_i1").unwrap().is_empty());

    let report = Report::new(&transcripts, &graph);
    let output = report.to_string();
    assert!(output.starts_with("c0_g1_i1\tGO:0005634\n\t\tGO:0043231\nc1_g1_i1\tGO:0000001\n"));
    assert!(output.ends_with("\tGO:0005634\n\t\tGO:0043231\nc2_g1_i1\n"));
}

#[test]
fn expression_report() {
    let graph = graph();
    let annotations = annotations();
    let matches = DirectMatchFilter::default().filter_file(MATCHES).unwrap();
    let matrix = ExpressionMatrix::from_matrix_file(EXPRESSION).expect("test matrix must be present");
    assert_eq!(matrix.len(), 4);
    assert_eq!(matrix.skipped_lines(), 1);
    assert_eq!(matrix.samples(), &["Sp_ds", "Sp_hs", "Sp_log", "Sp_plat"]);

    let report = ExpressionReport::new(&matrix, &matches, &annotations, &graph);
    assert_eq!(
        report.to_string(),
        "c0_g1_i1\tSPBC460.03\t1.36\t0.22\t3.02\t0.49\tGO:0005634\tnucleus
c3_g1_i1\tNA\t0.10\t2.61\t1.25\t0.75\tNA\tNA
c1_g1_i1\tSPAC1002.01\t-1.50\t0.75\t2.00\t1.10\tGO:0000001\tmitochondrion inheritance
\t\t\t\t\t\tGO:0005634\tnucleus
c2_g1_i1\tQ00000\t0.5\t0.5\t0.5\t0.5\tNA\tNA
"
    );
}

#[test]
fn missing_files() {
    assert!(matches!(
        TermGraph::from_obo_file("tests/missing.obo"),
        Err(GoError::CannotOpenFile(_))
    ));
    assert!(matches!(
        AnnotationMap::from_gaf_file("tests/missing.gaf"),
        Err(GoError::CannotOpenFile(_))
    ));
    assert!(matches!(
        DirectMatchFilter::default().filter_file("tests/missing.outfmt6"),
        Err(GoError::CannotOpenFile(_))
    ));
    assert!(matches!(
        ExpressionMatrix::from_matrix_file("tests/missing.matrix"),
        Err(GoError::CannotOpenFile(_))
    ));
}

#[test]
fn concurrent_queries() {
    let graph = graph();
    let ids: Vec<&TermId> = graph.term_ids().collect();

    let parallel: Vec<usize> = ids
        .par_iter()
        .map(|id| graph.ancestors(id.as_str()).len())
        .collect();

    let mut cache = AncestorCache::new(&graph);
    for (id, count) in ids.iter().zip(parallel) {
        assert_eq!(cache.ancestors(id.as_str()).len(), count);
    }
}
