//! Serializers for compiled shapes graphs.
//!
//! Three serialization formats are supported:
//! - **Turtle** ([`turtle`]): the default output, prefixed names and inline
//!   `[ ... ]` property shapes
//! - **N-Triples** ([`ntriples`]): one triple per line, absolute IRIs
//! - **JSON-LD** ([`jsonld`]): `@context` from the prefix table plus `@graph`
//!
//! All three are pure functions of the [`ShapesGraph`](crate::ShapesGraph), so
//! compiling the same ontology twice yields byte-identical text.

#[cfg(feature = "serializers")]
pub mod jsonld;
pub mod ntriples;
pub mod turtle;

use crate::model::PrefixBinding;

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Turtle 1.1.
    #[default]
    Turtle,
    /// N-Triples.
    NTriples,
    /// JSON-LD 1.1.
    #[cfg(feature = "serializers")]
    JsonLd,
}

impl Format {
    /// Conventional file extension for the format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Format::Turtle => "ttl",
            Format::NTriples => "nt",
            #[cfg(feature = "serializers")]
            Format::JsonLd => "jsonld",
        }
    }
}

/// Renders `graph` in the requested format.
#[must_use]
pub fn render(graph: &crate::ShapesGraph, format: Format) -> String {
    match format {
        Format::Turtle => turtle::to_turtle(graph),
        Format::NTriples => ntriples::to_ntriples(graph),
        #[cfg(feature = "serializers")]
        Format::JsonLd => jsonld::to_json_ld_string(graph),
    }
}

/// Shortens `iri` to `prefix:local` using the first binding whose namespace
/// is a prefix of it and whose remainder is a plain local name.
pub(crate) fn compact(iri: &str, prefixes: &[PrefixBinding]) -> Option<String> {
    prefixes.iter().find_map(|binding| {
        let local = iri.strip_prefix(binding.iri.as_str())?;
        is_plain_local(local).then(|| format!("{}:{}", binding.prefix, local))
    })
}

fn is_plain_local(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    }
}
