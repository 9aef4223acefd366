//! This crate aims to provide a toolkit
//! for comparing [RDF] graphs in Rust.
//!
//! Two RDF graphs are *isomorphic* when they are equal
//! up to a renaming of their blank nodes.
//! Since blank node labels are local to each graph,
//! this is the notion of equality that matters when comparing,
//! for example, the result of a parser with an expected output.
//!
//! This crate re-exports the other crates of the toolkit:
//! * [`api`] defines the [`Term`](api::term::Term), [`Triple`](api::triple::Triple)
//!   and [`Graph`](api::graph::Graph) traits,
//!   implemented by standard collections of triples;
//! * [`inmem`] provides in-memory implementations of graphs;
//! * [`isomorphism`] provides the graph matcher.
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/
//!
//! # Getting Started
//!
//! ```
//! use rdfeq::prelude::*;
//! use rdfeq::inmem::graph::LightGraph;
//!
//! let knows = SimpleTerm::iri_unchecked("http://xmlns.com/foaf/0.1/knows");
//! let name = SimpleTerm::iri_unchecked("http://xmlns.com/foaf/0.1/name");
//! let alice = SimpleTerm::literal_unchecked("Alice", "http://www.w3.org/2001/XMLSchema#string");
//! let (x, y) = (SimpleTerm::bnode_unchecked("x"), SimpleTerm::bnode_unchecked("y"));
//! let (p, q) = (SimpleTerm::bnode_unchecked("p"), SimpleTerm::bnode_unchecked("q"));
//!
//! let g1 = vec![[x.clone(), knows.clone(), y.clone()], [x, name.clone(), alice.clone()]];
//! let g2 = LightGraph::from_triples(vec![[p.clone(), knows, q], [p, name, alice]])?;
//!
//! assert!(g1.equals(&g2)?);
//! let mapping = g1.find_isomorphism(&g2)?.unwrap();
//! let x: BnodeId<std::sync::Arc<str>> = BnodeId::new_unchecked("x".into());
//! assert_eq!(mapping[&x], BnodeId::new_unchecked("p"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(missing_docs)]

pub use rdfeq_api as api;
pub use rdfeq_inmem as inmem;
pub use rdfeq_isomorphism as isomorphism;

/// General-use types and traits.
pub mod prelude {
    pub use rdfeq_api::prelude::*;
    pub use rdfeq_isomorphism::{BnodeMapping, GraphDiff, GraphMatchExt, MatchError};
}
