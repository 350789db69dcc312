//! Turtle 1.1 serializer for shapes graphs.
//!
//! Produces the prefix block followed by one statement per node shape, with
//! its property shapes inlined as blank-node property lists.

use crate::model::{iris, PrefixBinding, PropertyShape, ShapesGraph, ValueConstraint};

use super::compact;

/// Serializes a shapes graph to a Turtle string.
#[must_use]
pub fn to_turtle(graph: &ShapesGraph) -> String {
    let mut out = String::with_capacity(256 + graph.triple_count() * 48);

    for binding in &graph.prefixes {
        out.push_str(&format!("@prefix {}: <{}> .\n", binding.prefix, binding.iri));
    }

    for shape in &graph.node_shapes {
        out.push('\n');
        out.push_str(&format!(
            "{}\n    a sh:NodeShape ;\n    sh:targetClass {}",
            term(&shape.id, &graph.prefixes),
            term(&shape.target_class, &graph.prefixes)
        ));
        if !shape.properties.is_empty() {
            let blocks: Vec<String> = shape
                .properties
                .iter()
                .map(|p| property_block(p, &graph.prefixes))
                .collect();
            out.push_str(" ;\n    sh:property ");
            out.push_str(&blocks.join(" , "));
        }
        out.push_str(" .\n");
    }

    out
}

fn property_block(property: &PropertyShape, prefixes: &[PrefixBinding]) -> String {
    let mut lines: Vec<String> = Vec::new();
    if let Some(path) = &property.path {
        lines.push(format!("sh:path {}", term(path, prefixes)));
    }
    if let Some(min) = property.min_count {
        lines.push(format!("sh:minCount {}", min));
    }
    if let Some(max) = property.max_count {
        lines.push(format!("sh:maxCount {}", max));
    }
    match &property.value {
        Some(ValueConstraint::Class(iri)) => {
            lines.push(format!("sh:class {}", term(iri, prefixes)));
        }
        Some(ValueConstraint::Datatype(iri)) => {
            lines.push(format!("sh:datatype {}", term(iri, prefixes)));
        }
        Some(ValueConstraint::LiteralKind) => {
            lines.push(format!("sh:nodeKind {}", term(iris::SH_LITERAL, prefixes)));
        }
        None => {}
    }

    if lines.is_empty() {
        return "[ ]".to_owned();
    }
    format!("[\n        {}\n    ]", lines.join(" ;\n        "))
}

fn term(iri: &str, prefixes: &[PrefixBinding]) -> String {
    compact(iri, prefixes).unwrap_or_else(|| format!("<{}>", iri))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeShape;

    fn graph() -> ShapesGraph {
        ShapesGraph {
            prefixes: vec![
                PrefixBinding {
                    prefix: "sh".to_owned(),
                    iri: iris::SH.to_owned(),
                },
                PrefixBinding {
                    prefix: "xsd".to_owned(),
                    iri: iris::XSD.to_owned(),
                },
                PrefixBinding {
                    prefix: "ex".to_owned(),
                    iri: "http://example.org/".to_owned(),
                },
            ],
            node_shapes: vec![
                NodeShape {
                    id: "http://example.org/TestClassShape".to_owned(),
                    target_class: "http://example.org/TestClass".to_owned(),
                    properties: vec![
                        PropertyShape {
                            path: Some("http://example.org/stringProp".to_owned()),
                            min_count: Some(1),
                            max_count: Some(1),
                            value: Some(ValueConstraint::Datatype(format!("{}string", iris::XSD))),
                        },
                        PropertyShape::default(),
                    ],
                },
                NodeShape {
                    id: "http://elsewhere.example/a/BShape".to_owned(),
                    target_class: "http://elsewhere.example/a/B".to_owned(),
                    properties: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn renders_prefixes_and_shapes() {
        let turtle = to_turtle(&graph());
        assert!(turtle.starts_with("@prefix sh: <http://www.w3.org/ns/shacl#> .\n"));
        assert!(turtle.contains("@prefix ex: <http://example.org/> ."));
        assert!(turtle.contains("ex:TestClassShape\n    a sh:NodeShape ;\n    sh:targetClass ex:TestClass"));
        assert!(turtle.contains("sh:path ex:stringProp ;"));
        assert!(turtle.contains("sh:minCount 1 ;"));
        assert!(turtle.contains("sh:datatype xsd:string"));
        assert!(turtle.contains(" , [ ] ."));
    }

    #[test]
    fn falls_back_to_full_iris() {
        let turtle = to_turtle(&graph());
        assert!(turtle.contains(
            "<http://elsewhere.example/a/BShape>\n    a sh:NodeShape ;\n    sh:targetClass <http://elsewhere.example/a/B> .\n"
        ));
    }

    #[test]
    fn empty_graph_has_only_prefixes() {
        let mut empty = graph();
        empty.node_shapes.clear();
        let turtle = to_turtle(&empty);
        assert_eq!(turtle.lines().count(), 3);
    }
}
