//! Core shapes-graph model types.
//!
//! These types represent a compiled SHACL shapes graph as typed Rust data.
//! The compiler builds one [`ShapesGraph`] per run; the serializers in
//! [`crate::serializer`] render it as Turtle, N-Triples or JSON-LD.

/// A prefix binding carried into the output document (e.g. `sh:` or `ex:`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixBinding {
    /// The prefix without its colon (may be empty for the default prefix).
    pub prefix: String,
    /// The absolute namespace IRI the prefix expands to.
    pub iri: String,
}

/// The value-type half of a property constraint.
///
/// A property shape carries at most one of these, so a `sh:class` constraint
/// can never coexist with `sh:datatype` or `sh:nodeKind` on the same shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueConstraint {
    /// `sh:class <iri>`: values must be instances of an ontology class.
    Class(String),
    /// `sh:nodeKind sh:Literal`: values must be literals.
    LiteralKind,
    /// `sh:datatype <iri>`: values must be literals of an XML Schema datatype.
    Datatype(String),
}

/// An anonymous `sh:property` node owned by exactly one [`NodeShape`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyShape {
    /// Full IRI of the constrained property, or `None` when its prefix did
    /// not resolve.
    pub path: Option<String>,
    /// `sh:minCount`.
    pub min_count: Option<u64>,
    /// `sh:maxCount`.
    pub max_count: Option<u64>,
    /// `sh:class`, `sh:datatype` or `sh:nodeKind`.
    pub value: Option<ValueConstraint>,
}

/// A `sh:NodeShape` targeting one ontology class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeShape {
    /// Full IRI of the shape (class IRI plus the shape suffix).
    pub id: String,
    /// Full IRI of the `sh:targetClass`.
    pub target_class: String,
    /// Property constraints, in the order their bullet lines appeared.
    pub properties: Vec<PropertyShape>,
}

/// A complete SHACL shapes graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapesGraph {
    /// Prefix table for serialization: `sh` first, then the input prefixes.
    pub prefixes: Vec<PrefixBinding>,
    /// Node shapes ordered by target class IRI.
    pub node_shapes: Vec<NodeShape>,
}

impl ShapesGraph {
    /// Looks up a node shape by the IRI of its target class.
    #[must_use]
    pub fn find_by_target(&self, class_iri: &str) -> Option<&NodeShape> {
        self.node_shapes
            .iter()
            .find(|shape| shape.target_class == class_iri)
    }

    /// Returns the total number of property shapes across all node shapes.
    #[must_use]
    pub fn property_shape_count(&self) -> usize {
        self.node_shapes.iter().map(|s| s.properties.len()).sum()
    }

    /// Returns the number of RDF triples this graph serializes to.
    ///
    /// Each node shape contributes `rdf:type` and `sh:targetClass`; each
    /// property shape contributes its `sh:property` link plus one triple per
    /// populated field.
    #[must_use]
    pub fn triple_count(&self) -> usize {
        self.node_shapes
            .iter()
            .map(|shape| {
                2 + shape
                    .properties
                    .iter()
                    .map(|p| {
                        1 + usize::from(p.path.is_some())
                            + usize::from(p.min_count.is_some())
                            + usize::from(p.max_count.is_some())
                            + usize::from(p.value.is_some())
                    })
                    .sum::<usize>()
            })
            .sum()
    }
}

/// Standard IRI constants used by the loader, compiler and serializers.
pub mod iris {
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    /// XML namespace.
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    /// SHACL namespace.
    pub const SH: &str = "http://www.w3.org/ns/shacl#";

    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `owl:Class`.
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    /// `rdfs:Literal`.
    pub const RDFS_LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";
    /// `xsd:integer`.
    pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    /// `dc:description`.
    pub const DC_DESCRIPTION: &str = "http://purl.org/dc/elements/1.1/description";
    /// `dcterms:description`.
    pub const DCTERMS_DESCRIPTION: &str = "http://purl.org/dc/terms/description";

    // SHACL terms
    /// `sh:NodeShape`.
    pub const SH_NODE_SHAPE: &str = "http://www.w3.org/ns/shacl#NodeShape";
    /// `sh:targetClass`.
    pub const SH_TARGET_CLASS: &str = "http://www.w3.org/ns/shacl#targetClass";
    /// `sh:property`.
    pub const SH_PROPERTY: &str = "http://www.w3.org/ns/shacl#property";
    /// `sh:path`.
    pub const SH_PATH: &str = "http://www.w3.org/ns/shacl#path";
    /// `sh:minCount`.
    pub const SH_MIN_COUNT: &str = "http://www.w3.org/ns/shacl#minCount";
    /// `sh:maxCount`.
    pub const SH_MAX_COUNT: &str = "http://www.w3.org/ns/shacl#maxCount";
    /// `sh:class`.
    pub const SH_CLASS: &str = "http://www.w3.org/ns/shacl#class";
    /// `sh:datatype`.
    pub const SH_DATATYPE: &str = "http://www.w3.org/ns/shacl#datatype";
    /// `sh:nodeKind`.
    pub const SH_NODE_KIND: &str = "http://www.w3.org/ns/shacl#nodeKind";
    /// `sh:Literal`.
    pub const SH_LITERAL: &str = "http://www.w3.org/ns/shacl#Literal";
}
