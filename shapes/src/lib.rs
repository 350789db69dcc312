//! OWL ontology → SHACL shapes compiler.
//!
//! Ontology authors describe the relationships of each class inside its
//! `dc:description`, one bullet per property:
//!
//! ```text
//! The properties that can be used with this class are:
//! - ex:hasPart -[1..*]-> ex:Component
//! - ex:label -[1]-> xsd:string
//! ```
//!
//! The `skg-shapes` crate loads the ontology, parses those bullets, resolves
//! their names against the document's prefixes and classes, and builds a
//! [`ShapesGraph`] with one `sh:NodeShape` per described class. Serializers
//! render the result as Turtle, N-Triples or JSON-LD.
//!
//! # Entry Point
//!
//! ```
//! let source = r#"
//! @prefix owl: <http://www.w3.org/2002/07/owl#> .
//! @prefix dc: <http://purl.org/dc/elements/1.1/> .
//! @prefix ex: <http://example.org/> .
//!
//! ex:Part a owl:Class .
//! ex:Machine a owl:Class ;
//!     dc:description """Machines are built from parts:
//! - ex:hasPart -[1..*]-> ex:Part
//! """ .
//! "#;
//! let shapes = skg_shapes::compile_turtle(source, &Default::default())?;
//! assert_eq!(shapes.node_shapes.len(), 1);
//!
//! let turtle = skg_shapes::serializer::turtle::to_turtle(&shapes);
//! assert!(turtle.contains("sh:class ex:Part"));
//! # Ok::<(), skg_shapes::ShapesError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod compiler;
pub mod error;
pub mod model;
pub mod namespace;
pub mod ontology;
pub mod relationship;
pub mod serializer;

pub use compiler::{classify_target, compile, CompileOptions, ShapeCompiler, TargetKind};
pub use error::{Result, ShapesError};
pub use model::{NodeShape, PrefixBinding, PropertyShape, ShapesGraph, ValueConstraint};
pub use namespace::{resolve, NamespaceTable, QName};
pub use ontology::Ontology;
pub use relationship::{
    match_line, parse_relationships, segments, Bound, Cardinality, LineMatch, Relationship,
};

/// Parses a Turtle ontology and compiles it in one step.
///
/// # Errors
///
/// Returns [`ShapesError::Parse`] if `source` is not valid Turtle.
pub fn compile_turtle(source: &str, options: &CompileOptions) -> Result<ShapesGraph> {
    let ontology = Ontology::from_turtle(source)?;
    compile(&ontology, options)
}

/// Reads, parses and compiles a Turtle ontology file.
///
/// # Errors
///
/// Returns [`ShapesError::Io`] if the file cannot be read and
/// [`ShapesError::Parse`] if it is not valid Turtle.
pub fn compile_path(path: &std::path::Path, options: &CompileOptions) -> Result<ShapesGraph> {
    let ontology = Ontology::from_path(path)?;
    compile(&ontology, options)
}
