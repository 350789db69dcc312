//! Shapes-graph validators (structure, RDF serialization).

pub mod rdf;
pub mod shapes;
