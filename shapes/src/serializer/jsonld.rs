//! JSON-LD 1.1 serializer for shapes graphs.
//!
//! Produces a single JSON-LD document with an `@context` built from the
//! prefix table and an `@graph` array holding one object per node shape.
//! Property shapes are nested objects (anonymous nodes).

use serde_json::{json, Map, Value};

use crate::model::{iris, NodeShape, PropertyShape, ShapesGraph, ValueConstraint};

/// Serializes a shapes graph to a JSON-LD `Value`.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
/// The default prefix (`:`) has no JSON-LD term form and becomes `@vocab`.
#[must_use]
pub fn to_json_ld(graph: &ShapesGraph) -> Value {
    let mut context = Map::new();
    for binding in &graph.prefixes {
        let term = if binding.prefix.is_empty() {
            "@vocab".to_owned()
        } else {
            binding.prefix.clone()
        };
        context.insert(term, json!(binding.iri));
    }
    let nodes: Vec<Value> = graph.node_shapes.iter().map(node_shape_to_json).collect();
    json!({
        "@context": Value::Object(context),
        "@graph": nodes
    })
}

/// Pretty-printed JSON-LD text.
#[must_use]
pub fn to_json_ld_string(graph: &ShapesGraph) -> String {
    let value = to_json_ld(graph);
    let mut text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    text.push('\n');
    text
}

fn node_shape_to_json(shape: &NodeShape) -> Value {
    let mut node = json!({
        "@id": shape.id,
        "@type": iris::SH_NODE_SHAPE
    });
    node[iris::SH_TARGET_CLASS] = json!({ "@id": shape.target_class });
    if !shape.properties.is_empty() {
        let properties: Vec<Value> = shape.properties.iter().map(property_to_json).collect();
        node[iris::SH_PROPERTY] = Value::Array(properties);
    }
    node
}

fn property_to_json(property: &PropertyShape) -> Value {
    let mut node = Map::new();
    if let Some(path) = &property.path {
        node.insert(iris::SH_PATH.to_owned(), json!({ "@id": path }));
    }
    if let Some(min) = property.min_count {
        node.insert(iris::SH_MIN_COUNT.to_owned(), json!(min));
    }
    if let Some(max) = property.max_count {
        node.insert(iris::SH_MAX_COUNT.to_owned(), json!(max));
    }
    match &property.value {
        Some(ValueConstraint::Class(iri)) => {
            node.insert(iris::SH_CLASS.to_owned(), json!({ "@id": iri }));
        }
        Some(ValueConstraint::Datatype(iri)) => {
            node.insert(iris::SH_DATATYPE.to_owned(), json!({ "@id": iri }));
        }
        Some(ValueConstraint::LiteralKind) => {
            node.insert(iris::SH_NODE_KIND.to_owned(), json!({ "@id": iris::SH_LITERAL }));
        }
        None => {}
    }
    Value::Object(node)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::PrefixBinding;

    #[test]
    fn context_and_graph() {
        let graph = ShapesGraph {
            prefixes: vec![PrefixBinding {
                prefix: "sh".to_owned(),
                iri: iris::SH.to_owned(),
            }],
            node_shapes: vec![NodeShape {
                id: "http://example.org/AShape".to_owned(),
                target_class: "http://example.org/A".to_owned(),
                properties: vec![PropertyShape {
                    path: Some("http://example.org/p".to_owned()),
                    min_count: Some(1),
                    max_count: Some(1),
                    value: Some(ValueConstraint::Datatype(format!("{}string", iris::XSD))),
                }],
            }],
        };
        let doc = to_json_ld(&graph);
        assert_eq!(doc["@context"]["sh"], json!(iris::SH));
        let shape = &doc["@graph"][0];
        assert_eq!(shape["@id"], json!("http://example.org/AShape"));
        assert_eq!(shape[iris::SH_TARGET_CLASS]["@id"], json!("http://example.org/A"));
        let prop = &shape[iris::SH_PROPERTY][0];
        assert_eq!(prop[iris::SH_MIN_COUNT], json!(1));
        assert_eq!(
            prop[iris::SH_DATATYPE]["@id"],
            json!("http://www.w3.org/2001/XMLSchema#string")
        );
        assert!(prop.get(iris::SH_CLASS).is_none());
    }

    #[test]
    fn default_prefix_becomes_vocab() {
        let graph = ShapesGraph {
            prefixes: vec![
                PrefixBinding {
                    prefix: "sh".to_owned(),
                    iri: iris::SH.to_owned(),
                },
                PrefixBinding {
                    prefix: String::new(),
                    iri: "http://default.example/".to_owned(),
                },
            ],
            node_shapes: Vec::new(),
        };
        let doc = to_json_ld(&graph);
        let context = doc["@context"].as_object().unwrap();
        assert!(!context.contains_key(""));
        assert_eq!(context["@vocab"], json!("http://default.example/"));
        assert_eq!(context.len(), 2);
    }

    #[test]
    fn string_form_is_pretty_and_terminated() {
        let text = to_json_ld_string(&ShapesGraph::default());
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"@graph\": []"));
    }
}
