//! Namespace table and qualified-name resolution.
//!
//! The table maps short prefixes to absolute namespace IRIs. It is seeded with
//! the core vocabularies every RDF toolkit binds implicitly and then extended
//! with the prefixes the Turtle parser collected from the ontology document.

use std::collections::HashMap;
use std::fmt;

use crate::model::{iris, PrefixBinding};

/// Prefixes bound before any document directive is read.
const CORE_PREFIXES: &[(&str, &str)] = &[
    ("rdf", iris::RDF),
    ("rdfs", iris::RDFS),
    ("owl", iris::OWL),
    ("xsd", iris::XSD),
    ("xml", iris::XML),
];

/// A compact `prefix:local` name, borrowed from the text it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QName<'a> {
    /// The prefix (may be empty, as in `:Thing`).
    pub prefix: &'a str,
    /// The local part.
    pub local: &'a str,
}

impl<'a> QName<'a> {
    /// Splits `prefix:local` at its single colon.
    ///
    /// Returns `None` when there is no colon, more than one colon, or the
    /// local part is empty.
    #[must_use]
    pub fn parse(text: &'a str) -> Option<Self> {
        let (prefix, local) = text.split_once(':')?;
        if local.is_empty() || local.contains(':') {
            return None;
        }
        Some(Self { prefix, local })
    }
}

impl fmt::Display for QName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

/// Ordered prefix → namespace IRI table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceTable {
    bindings: Vec<PrefixBinding>,
    index: HashMap<String, usize>,
}

impl NamespaceTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding only the core `rdf`, `rdfs`, `owl`, `xsd` and
    /// `xml` bindings.
    #[must_use]
    pub fn with_core_prefixes() -> Self {
        let mut table = Self::new();
        for (prefix, iri) in CORE_PREFIXES {
            table.bind(*prefix, *iri);
        }
        table
    }

    /// Builds the table for a parsed document: core prefixes first, then the
    /// document's bindings sorted by prefix name. A document binding of a core
    /// prefix replaces its IRI but keeps its position.
    #[must_use]
    pub fn with_document_prefixes(declared: &HashMap<String, String>) -> Self {
        let mut table = Self::with_core_prefixes();
        let mut declared: Vec<_> = declared.iter().collect();
        declared.sort();
        for (prefix, iri) in declared {
            table.bind(prefix.as_str(), iri.as_str());
        }
        table
    }

    /// Binds `prefix` to `iri`, replacing any earlier binding of that prefix.
    pub fn bind(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        let prefix = prefix.into();
        let iri = iri.into();
        match self.index.get(&prefix) {
            Some(&slot) => self.bindings[slot].iri = iri,
            None => {
                self.index.insert(prefix.clone(), self.bindings.len());
                self.bindings.push(PrefixBinding { prefix, iri });
            }
        }
    }

    /// Returns the namespace IRI bound to `prefix`, if any.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.index
            .get(prefix)
            .map(|&slot| self.bindings[slot].iri.as_str())
    }

    /// Iterates bindings in table order.
    pub fn iter(&self) -> impl Iterator<Item = &PrefixBinding> {
        self.bindings.iter()
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if the table has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Expands a qualified name to an absolute IRI.
///
/// Returns `None` when the prefix is not bound. Property names and target
/// names both go through this function, so the unknown-prefix policy lives in
/// exactly one place.
#[must_use]
pub fn resolve(qname: &QName<'_>, table: &NamespaceTable) -> Option<String> {
    table
        .get(qname.prefix)
        .map(|namespace| format!("{}{}", namespace, qname.local))
}
