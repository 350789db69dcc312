//! Source ontology loaded into an in-memory triple store.
//!
//! Turtle is parsed once by `rio_turtle`, whose triples are stored in a
//! `sophia` graph and whose prefix map becomes the namespace table. On top of
//! that this module adds the class registry (every IRI typed `owl:Class`) and
//! per-class description text.

use std::collections::BTreeSet;
use std::path::Path;

use rio_turtle::TurtleParser;
use sophia_api::graph::{Graph, MutableGraph};
use sophia_api::source::{StreamError, TripleSource};
use sophia_api::term::matcher::Any;
use sophia_api::term::{IriRef, Term};
use sophia_api::triple::Triple;
use sophia_inmem::graph::LightGraph;
use sophia_rio::parser::StrictRioSource;

use crate::error::{Result, ShapesError};
use crate::model::iris;
use crate::namespace::NamespaceTable;

/// A parsed OWL ontology with its namespace table and class registry.
pub struct Ontology {
    graph: LightGraph,
    namespaces: NamespaceTable,
    classes: BTreeSet<String>,
}

impl std::fmt::Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ontology")
            .field("namespaces", &self.namespaces)
            .field("classes", &self.classes)
            .finish_non_exhaustive()
    }
}

impl Ontology {
    /// Parses a Turtle document.
    ///
    /// # Errors
    ///
    /// Returns [`ShapesError::Parse`] if the text is not valid Turtle and
    /// [`ShapesError::Store`] if the triple store rejects a triple.
    pub fn from_turtle(source: &str) -> Result<Self> {
        let mut parser = StrictRioSource(TurtleParser::new(source.as_bytes(), None));
        let mut graph = LightGraph::new();
        parser
            .try_for_each_triple(|triple| graph.insert_triple(triple).map(|_| ()))
            .map_err(|e| match e {
                StreamError::SourceError(e) => ShapesError::Parse(e.to_string()),
                StreamError::SinkError(e) => ShapesError::Store(e.to_string()),
            })?;
        let namespaces = NamespaceTable::with_document_prefixes(parser.0.prefixes());
        let classes = class_registry(&graph)?;

        tracing::debug!(
            prefixes = namespaces.len(),
            classes = classes.len(),
            "loaded ontology"
        );

        Ok(Self {
            graph,
            namespaces,
            classes,
        })
    }

    /// Reads and parses a UTF-8 Turtle file.
    ///
    /// # Errors
    ///
    /// Returns [`ShapesError::Io`] if the file cannot be read and
    /// [`ShapesError::Parse`] if its content is not valid Turtle.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| ShapesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_turtle(&source)
    }

    /// The prefix table: core bindings plus the document's directives.
    #[must_use]
    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    /// Every IRI asserted to be an `owl:Class`, once each, in sorted order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Whether `iri` is in the class registry.
    #[must_use]
    pub fn is_class(&self, iri: &str) -> bool {
        self.classes.contains(iri)
    }

    /// Returns the description text of a class.
    ///
    /// Predicates are tried in order; the first one with a non-blank literal
    /// value wins. Empty or whitespace-only literals count as no description.
    /// When a predicate has several literal values the lexicographically
    /// smallest is returned so repeated runs agree.
    ///
    /// # Errors
    ///
    /// Returns [`ShapesError::Store`] if the triple store fails while iterating.
    pub fn description(&self, class_iri: &str, predicates: &[String]) -> Result<Option<String>> {
        for predicate in predicates {
            let subject = IriRef::new_unchecked(class_iri);
            let predicate = IriRef::new_unchecked(predicate.as_str());
            let mut values = Vec::new();
            for triple in self.graph.triples_matching([subject], [predicate], Any) {
                let triple = triple.map_err(|e| ShapesError::Store(e.to_string()))?;
                match triple.o().lexical_form() {
                    Some(text) if !text.trim().is_empty() => values.push(text.to_string()),
                    _ => {}
                }
            }
            if let Some(text) = values.into_iter().min() {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }

}

/// Collects the IRI subjects of `rdf:type owl:Class`. Blank-node classes
/// (anonymous unions, restrictions) are left out.
fn class_registry(graph: &LightGraph) -> Result<BTreeSet<String>> {
    let rdf_type = IriRef::new_unchecked(iris::RDF_TYPE);
    let owl_class = IriRef::new_unchecked(iris::OWL_CLASS);
    let mut classes = BTreeSet::new();
    for triple in graph.triples_matching(Any, [rdf_type], [owl_class]) {
        let triple = triple.map_err(|e| ShapesError::Store(e.to_string()))?;
        if let Some(iri) = triple.s().iri() {
            classes.insert(iri.as_str().to_owned());
        }
    }
    Ok(classes)
}
