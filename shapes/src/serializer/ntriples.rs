//! N-Triples serializer for shapes graphs.
//!
//! Produces a valid N-Triples document (one triple per line, absolute IRIs).
//! Property shapes are labelled `_:p0`, `_:p1`, … in emission order.

use crate::model::{iris, ShapesGraph, ValueConstraint};

/// Serializes a shapes graph to an N-Triples string.
#[must_use]
pub fn to_ntriples(graph: &ShapesGraph) -> String {
    let mut out = String::with_capacity(graph.triple_count() * 96);
    let mut next_bnode = 0usize;

    for shape in &graph.node_shapes {
        let subject = iri(&shape.id);
        triple(&mut out, &subject, iris::RDF_TYPE, &iri(iris::SH_NODE_SHAPE));
        triple(&mut out, &subject, iris::SH_TARGET_CLASS, &iri(&shape.target_class));

        for property in &shape.properties {
            let bnode = format!("_:p{}", next_bnode);
            next_bnode += 1;
            triple(&mut out, &subject, iris::SH_PROPERTY, &bnode);

            if let Some(path) = &property.path {
                triple(&mut out, &bnode, iris::SH_PATH, &iri(path));
            }
            if let Some(min) = property.min_count {
                triple(&mut out, &bnode, iris::SH_MIN_COUNT, &integer(min));
            }
            if let Some(max) = property.max_count {
                triple(&mut out, &bnode, iris::SH_MAX_COUNT, &integer(max));
            }
            match &property.value {
                Some(ValueConstraint::Class(class)) => {
                    triple(&mut out, &bnode, iris::SH_CLASS, &iri(class));
                }
                Some(ValueConstraint::Datatype(datatype)) => {
                    triple(&mut out, &bnode, iris::SH_DATATYPE, &iri(datatype));
                }
                Some(ValueConstraint::LiteralKind) => {
                    triple(&mut out, &bnode, iris::SH_NODE_KIND, &iri(iris::SH_LITERAL));
                }
                None => {}
            }
        }
    }

    out
}

/// `subj` is already rendered (`<iri>` or `_:label`); `pred` is a bare IRI.
fn triple(out: &mut String, subj: &str, pred: &str, obj: &str) {
    out.push_str(subj);
    out.push_str(" <");
    out.push_str(pred);
    out.push_str("> ");
    out.push_str(obj);
    out.push_str(" .\n");
}

fn iri(s: &str) -> String {
    format!("<{}>", s)
}

fn integer(n: u64) -> String {
    format!("\"{}\"^^<{}>", n, iris::XSD_INTEGER)
}
