//! Ontology → SHACL shapes compiler.
//!
//! For every described `owl:Class` the compiler emits one `sh:NodeShape`
//! whose property shapes come from the bullet relationships in the class
//! description. Nothing here fails on bad input text: an unbound prefix, an
//! unknown target or a non-matching bullet only drops the constraint it
//! would have produced.

use crate::error::Result;
use crate::model::{iris, NodeShape, PrefixBinding, PropertyShape, ShapesGraph, ValueConstraint};
use crate::namespace::{resolve, NamespaceTable, QName};
use crate::ontology::Ontology;
use crate::relationship::{match_line, segments, LineMatch, Relationship};

/// Default suffix appended to a class IRI to name its node shape.
pub const DEFAULT_SHAPE_SUFFIX: &str = "Shape";

/// Knobs for a compilation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Appended to the class IRI to form the node shape IRI.
    pub shape_suffix: String,
    /// Annotation predicates holding the description text, tried in order.
    pub description_predicates: Vec<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            shape_suffix: DEFAULT_SHAPE_SUFFIX.to_owned(),
            description_predicates: vec![iris::DC_DESCRIPTION.to_owned()],
        }
    }
}

/// How a relationship target constrains values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    /// The target is a class of the ontology.
    Class(String),
    /// The target is `rdfs:Literal`.
    Literal,
    /// The target lives in the XML Schema namespace.
    Datatype(String),
    /// Unbound prefix or a type the compiler does not know.
    Unrecognized,
}

impl TargetKind {
    /// The SHACL value constraint for this target, if any.
    #[must_use]
    pub fn into_constraint(self) -> Option<ValueConstraint> {
        match self {
            TargetKind::Class(iri) => Some(ValueConstraint::Class(iri)),
            TargetKind::Literal => Some(ValueConstraint::LiteralKind),
            TargetKind::Datatype(iri) => Some(ValueConstraint::Datatype(iri)),
            TargetKind::Unrecognized => None,
        }
    }
}

/// Classifies a relationship target.
///
/// Checked in priority order: ontology class, `rdfs:Literal`, XML Schema
/// datatype. A known class wins even when it sits in the XSD namespace.
#[must_use]
pub fn classify_target(
    target: &QName<'_>,
    namespaces: &NamespaceTable,
    is_class: impl Fn(&str) -> bool,
) -> TargetKind {
    let Some(iri) = resolve(target, namespaces) else {
        return TargetKind::Unrecognized;
    };
    if is_class(&iri) {
        TargetKind::Class(iri)
    } else if iri == iris::RDFS_LITERAL {
        TargetKind::Literal
    } else if namespaces.get(target.prefix) == Some(iris::XSD) {
        TargetKind::Datatype(format!("{}{}", iris::XSD, target.local))
    } else {
        TargetKind::Unrecognized
    }
}

/// Compiles one loaded ontology into a shapes graph.
pub struct ShapeCompiler<'a> {
    ontology: &'a Ontology,
    options: &'a CompileOptions,
}

impl<'a> ShapeCompiler<'a> {
    /// Creates a compiler over `ontology`.
    #[must_use]
    pub fn new(ontology: &'a Ontology, options: &'a CompileOptions) -> Self {
        Self { ontology, options }
    }

    /// Runs the compilation.
    ///
    /// # Errors
    ///
    /// Returns an error only if the underlying triple store fails while
    /// looking up descriptions; text-level problems never surface here.
    pub fn compile(&self) -> Result<ShapesGraph> {
        let mut graph = ShapesGraph {
            prefixes: self.output_prefixes(),
            node_shapes: Vec::new(),
        };

        for class in self.ontology.classes() {
            let Some(description) = self
                .ontology
                .description(class, &self.options.description_predicates)?
            else {
                tracing::trace!(class, "no description, no shape");
                continue;
            };
            graph.node_shapes.push(self.node_shape(class, &description));
        }

        tracing::debug!(
            node_shapes = graph.node_shapes.len(),
            property_shapes = graph.property_shape_count(),
            "compiled shapes graph"
        );
        Ok(graph)
    }

    fn node_shape(&self, class: &str, description: &str) -> NodeShape {
        let mut shape = NodeShape {
            id: format!("{}{}", class, self.options.shape_suffix),
            target_class: class.to_owned(),
            properties: Vec::new(),
        };

        for segment in segments(description) {
            match match_line(segment) {
                LineMatch::Matched(rel) => shape.properties.push(self.property_shape(class, &rel)),
                LineMatch::Skipped => tracing::trace!(class, segment, "skipped bullet"),
            }
        }

        tracing::debug!(shape = %shape.id, properties = shape.properties.len(), "node shape");
        shape
    }

    fn property_shape(&self, class: &str, rel: &Relationship<'_>) -> PropertyShape {
        let namespaces = self.ontology.namespaces();

        let path = resolve(&rel.property, namespaces);
        if path.is_none() {
            tracing::warn!(
                class,
                property = %rel.property,
                "unbound prefix in property name, sh:path omitted"
            );
        }

        let target = classify_target(&rel.target, namespaces, |iri| self.ontology.is_class(iri));
        if target == TargetKind::Unrecognized {
            if namespaces.get(rel.target.prefix).is_none() {
                tracing::warn!(class, target = %rel.target, "unbound prefix in target type");
            } else {
                tracing::debug!(class, target = %rel.target, "unrecognized target type");
            }
        }

        PropertyShape {
            path,
            min_count: rel.cardinality.min_count(),
            max_count: rel.cardinality.max_count(),
            value: target.into_constraint(),
        }
    }

    /// `sh` first, then every binding of the source document. A source
    /// binding of `sh` itself is dropped in favour of the fixed one.
    fn output_prefixes(&self) -> Vec<PrefixBinding> {
        let mut prefixes = vec![PrefixBinding {
            prefix: "sh".to_owned(),
            iri: iris::SH.to_owned(),
        }];
        prefixes.extend(
            self.ontology
                .namespaces()
                .iter()
                .filter(|binding| binding.prefix != "sh")
                .cloned(),
        );
        prefixes
    }
}

/// Compiles `ontology` with `options`.
///
/// # Errors
///
/// See [`ShapeCompiler::compile`].
pub fn compile(ontology: &Ontology, options: &CompileOptions) -> Result<ShapesGraph> {
    ShapeCompiler::new(ontology, options).compile()
}
