//! RDF 1.1 / Turtle 1.1 validator.
//!
//! Validates that the serialized forms of a shapes graph are well-formed:
//! - Turtle output parses without errors
//! - N-Triples output parses without errors
//! - Both parse to as many triples as the graph model predicts

use sophia_api::graph::Graph;
use sophia_api::source::TripleSource;
use sophia_inmem::graph::LightGraph;
use sophia_turtle::parser::{nt, turtle};

use skg_shapes::serializer::{ntriples, turtle as turtle_out};
use skg_shapes::ShapesGraph;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "shapes/rdf";

/// Serializes `graph` to Turtle and N-Triples and re-parses both.
pub fn validate(graph: &ShapesGraph) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let expected = graph.triple_count();

    let ttl = turtle_out::to_turtle(graph);
    check(
        "Turtle",
        turtle::parse_str(&ttl).collect_triples::<LightGraph>().map_err(|e| e.to_string()),
        expected,
        &mut report,
    );

    let nt_text = ntriples::to_ntriples(graph);
    check(
        "N-Triples",
        nt::parse_str(&nt_text).collect_triples::<LightGraph>().map_err(|e| e.to_string()),
        expected,
        &mut report,
    );

    report
}

fn check(
    format: &str,
    parsed: Result<LightGraph, String>,
    expected: usize,
    report: &mut ConformanceReport,
) {
    match parsed {
        Ok(parsed) => {
            let found = parsed.triples().count();
            tracing::debug!(format, found, expected, "re-parsed shapes graph");
            if found == expected {
                report.push(TestResult::pass(
                    VALIDATOR,
                    format!("{} output parses to {} triples", format, found),
                ));
            } else {
                report.push(TestResult::fail(
                    VALIDATOR,
                    format!(
                        "{} output parses to {} triples, expected {}",
                        format, found, expected
                    ),
                ));
            }
        }
        Err(err) => report.push(TestResult::fail_with_details(
            VALIDATOR,
            format!("{} output does not parse", format),
            vec![err],
        )),
    }
}
