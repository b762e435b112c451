use tracing::{trace, warn};

use crate::graph::{TermGraph, TermNode};
use crate::TERM_HEADER;

/// The relevant fields of a single `[Term]` block
#[derive(Debug, Default)]
struct ParsedTerm<'a> {
    id: Option<&'a str>,
    name: Option<&'a str>,
    parents: Vec<&'a str>,
}

impl<'a> ParsedTerm<'a> {
    /// Adds the information of a single `key: value` line
    ///
    /// Unknown keys, lines without a `:` separator and keys
    /// without a value are ignored.
    fn add_line(&mut self, line: &'a str) {
        let Some((key, value)) = parse_line(line) else {
            trace!("Ignoring malformed line: {}", line);
            return;
        };
        match key {
            "id" => {
                if self.id.is_none() {
                    self.id = first_token(value);
                }
            }
            "name" => self.name = Some(value),
            "is_a" => {
                // Everything after the ID is a comment, e.g. `is_a: GO:0048308 ! organelle inheritance`
                if let Some(parent) = first_token(value) {
                    self.parents.push(parent);
                }
            }
            _ => (),
        }
    }

    fn into_node(self) -> Option<(&'a str, TermNode)> {
        let Some(id) = self.id else {
            warn!("Skipping term without id (name: {:?})", self.name);
            return None;
        };
        let mut node = TermNode::new(self.name);
        for parent in self.parents {
            node.add_parent(parent.into());
        }
        Some((id, node))
    }
}

/// Adds all `[Term]` blocks of an OBO file to the graph
///
/// A block starts with a `[Term]` header line and ends with a blank line,
/// the next header line (e.g. `[Typedef]`) or the end of the input.
/// Lines outside of `[Term]` blocks are ignored.
pub(crate) fn read_obo(content: &str, graph: &mut TermGraph) {
    let mut current: Option<ParsedTerm> = None;

    for line in content.lines() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('[') {
            if let Some((id, node)) = current.take().and_then(ParsedTerm::into_node) {
                graph.insert_node(id.into(), node);
            }
            if line == TERM_HEADER {
                current = Some(ParsedTerm::default());
            } else if !line.is_empty() {
                trace!("Ignoring stanza {}", line);
            }
        } else if let Some(term) = current.as_mut() {
            term.add_line(line);
        }
    }

    if let Some((id, node)) = current.and_then(ParsedTerm::into_node) {
        graph.insert_node(id.into(), node);
    }
}

/// Splits a line into key and value
///
/// Returns `None` if the line does not contain a `:` or the value is empty
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((key.trim(), value))
}

fn first_token(value: &str) -> Option<&str> {
    value.split_whitespace().next()
}

#[cfg(test)]
mod test {
    use super::*;

    fn graph_from(content: &str) -> TermGraph {
        let mut graph = TermGraph::default();
        read_obo(content, &mut graph);
        graph
    }

    #[test]
    fn split_terms() {
        let graph = graph_from(
            "format-version: 1.2
ontology: go

[Term]
id: GO:0000001
name: mitochondrion inheritance
namespace: biological_process
def: \"The distribution of mitochondria.\" [GOC:mcc]
synonym: \"mitochondrial inheritance\" EXACT []
is_a: GO:0048308 ! organelle inheritance
is_a: GO:0048311 ! mitochondrion distribution

[Term]
id: GO:0048308
name: organelle inheritance

[Typedef]
id: part_of
name: part of
is_transitive: true
",
        );

        assert_eq!(graph.len(), 2);
        assert_eq!(
            graph.parents("GO:0000001").unwrap(),
            &["GO:0048308", "GO:0048311"]
        );
        assert!(graph.parents("GO:0048308").unwrap().is_empty());
        assert_eq!(graph.name("GO:0000001"), Some("mitochondrion inheritance"));
        assert!(!graph.contains("part_of"));
    }

    #[test]
    fn term_without_id_is_skipped() {
        let graph = graph_from("[Term]\nname: test name\nis_a: GO:1\n\n[Term]\nid: GO:2\n\n");
        assert_eq!(graph.len(), 1);
        assert!(graph.contains("GO:2"));
    }

    #[test]
    fn empty_input() {
        assert!(graph_from("").is_empty());
        assert!(graph_from("[Term]\n").is_empty());
        assert!(graph_from("\n\n\n").is_empty());
    }

    #[test]
    fn malformed_lines_are_ignored() {
        let graph = graph_from(
            "[Term]
id: GO:3
is_a:
this line has no separator
is_a: GO:2 ! valid parent
name:
",
        );
        assert_eq!(graph.parents("GO:3").unwrap(), &["GO:2"]);
        assert_eq!(graph.name("GO:3"), None);
    }

    #[test]
    fn last_block_without_blank_line() {
        let graph = graph_from("[Term]\nid: GO:2\nis_a: GO:1 ! root");
        assert_eq!(graph.parents("GO:2").unwrap(), &["GO:1"]);
    }

    #[test]
    fn header_terminates_block() {
        let graph = graph_from("[Term]\nid: GO:1\n[Term]\nid: GO:2\nis_a: GO:1\n");
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.parents("GO:2").unwrap(), &["GO:1"]);
    }

    #[test]
    fn windows_line_endings() {
        let graph = graph_from("[Term]\r\nid: GO:2\r\nis_a: GO:1 ! root\r\n\r\n");
        assert_eq!(graph.parents("GO:2").unwrap(), &["GO:1"]);
    }

    #[test]
    fn only_first_id_is_used() {
        let graph = graph_from("[Term]\nid: GO:2\nid: GO:5\nis_a: GO:1\n");
        assert!(graph.contains("GO:2"));
        assert!(!graph.contains("GO:5"));
    }

    #[test]
    fn lines_outside_of_terms() {
        let graph = graph_from("id: GO:7\nis_a: GO:1\n\n[Term]\nid: GO:2\n");
        assert_eq!(graph.len(), 1);
        assert!(!graph.contains("GO:7"));
    }

    #[test]
    fn parse_single_line() {
        assert_eq!(parse_line("id: GO:1"), Some(("id", "GO:1")));
        assert_eq!(parse_line("is_a: GO:1 ! foo"), Some(("is_a", "GO:1 ! foo")));
        assert_eq!(parse_line("is_a:"), None);
        assert_eq!(parse_line("is_a:   "), None);
        assert_eq!(parse_line("foobar"), None);
    }
}
