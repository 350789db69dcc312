//! Conformance suite for compiled SHACL shapes graphs.
//!
//! Runs after compilation and before the shapes graph is written out.
//!
//! # Conformance Scope
//!
//! | Check | Standard |
//! |-------|----------|
//! | Prefixes, node shapes, cardinality | SHACL Core structure |
//! | Turtle / N-Triples rendering | RDF 1.1, Turtle 1.1 |
//!
//! # Entry Point
//!
//! ```no_run
//! use skg_conformance::run_all;
//! use skg_shapes::{compile_path, CompileOptions};
//! use std::path::Path;
//!
//! let options = CompileOptions::default();
//! let shapes = compile_path(Path::new("skg-o.ttl"), &options).expect("compile");
//! let report = run_all(&shapes, &options.shape_suffix);
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod report;
pub mod validators;

pub use report::{ConformanceReport, Severity, TestResult};

use skg_shapes::ShapesGraph;

/// Runs all validators against a compiled shapes graph.
///
/// Validators are run in this order:
/// 1. Structure (prefixes, node shapes, property cardinality)
/// 2. RDF serialization (Turtle and N-Triples re-parse)
pub fn run_all(graph: &ShapesGraph, shape_suffix: &str) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    report.extend(validators::shapes::validate(graph, shape_suffix));
    report.extend(validators::rdf::validate(graph));

    tracing::debug!(
        results = report.results.len(),
        failures = report.failure_count(),
        "conformance run complete"
    );
    report
}
