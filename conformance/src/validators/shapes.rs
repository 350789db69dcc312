//! Structural validator for compiled shapes graphs.
//!
//! Checks the invariants every compiled graph must satisfy:
//! - `sh` is bound to the SHACL namespace
//! - node shape IRIs are unique and derived from their target class
//! - each class is the target of at most one node shape
//! - `sh:minCount` never exceeds `sh:maxCount`
//!
//! Property shapes without `sh:path` are reported as warnings: they come from
//! unbound prefixes in the source descriptions and validate nothing.

use std::collections::HashSet;

use skg_shapes::model::iris;
use skg_shapes::ShapesGraph;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "shapes/structure";

/// Validates the structure of `graph`. `shape_suffix` is the suffix the
/// compiler appended to class IRIs.
pub fn validate(graph: &ShapesGraph, shape_suffix: &str) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    validate_prefixes(graph, &mut report);
    validate_node_shapes(graph, shape_suffix, &mut report);
    validate_property_shapes(graph, &mut report);

    report
}

fn validate_prefixes(graph: &ShapesGraph, report: &mut ConformanceReport) {
    let sh = graph.prefixes.iter().find(|b| b.prefix == "sh");
    match sh {
        Some(binding) if binding.iri == iris::SH => report.push(TestResult::pass(
            VALIDATOR,
            format!("sh: prefix bound ({} prefixes total)", graph.prefixes.len()),
        )),
        Some(binding) => report.push(TestResult::fail(
            VALIDATOR,
            format!("sh: prefix bound to {} instead of {}", binding.iri, iris::SH),
        )),
        None => report.push(TestResult::fail(VALIDATOR, "sh: prefix missing")),
    }
}

fn validate_node_shapes(graph: &ShapesGraph, shape_suffix: &str, report: &mut ConformanceReport) {
    let mut seen = HashSet::new();
    let mut issues = Vec::new();

    for shape in &graph.node_shapes {
        if !seen.insert(shape.id.as_str()) {
            issues.push(format!("duplicate node shape {}", shape.id));
        }
        let first = graph.find_by_target(&shape.target_class);
        if first.is_some_and(|first| !std::ptr::eq(first, shape)) {
            issues.push(format!("class {} targeted by more than one shape", shape.target_class));
        }
        let expected = format!("{}{}", shape.target_class, shape_suffix);
        if shape.id != expected {
            issues.push(format!(
                "node shape {} does not derive from target class {}",
                shape.id, shape.target_class
            ));
        }
    }

    if issues.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("{} node shapes, one per target class", graph.node_shapes.len()),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "node shapes are malformed",
            issues,
        ));
    }
}

fn validate_property_shapes(graph: &ShapesGraph, report: &mut ConformanceReport) {
    let mut inverted = Vec::new();
    let mut pathless = Vec::new();

    for shape in &graph.node_shapes {
        for (index, property) in shape.properties.iter().enumerate() {
            if let (Some(min), Some(max)) = (property.min_count, property.max_count) {
                if min > max {
                    inverted.push(format!(
                        "{} property #{}: minCount {} > maxCount {}",
                        shape.id, index, min, max
                    ));
                }
            }
            if property.path.is_none() {
                pathless.push(format!("{} property #{} has no sh:path", shape.id, index));
            }
        }
    }

    if inverted.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!(
                "{} property shapes have consistent cardinality",
                graph.property_shape_count()
            ),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "property shapes with minCount above maxCount",
            inverted,
        ));
    }

    if !pathless.is_empty() {
        report.push(TestResult::warn_with_details(
            VALIDATOR,
            format!("{} property shapes lack sh:path (unbound prefix)", pathless.len()),
            pathless,
        ));
    }
}
