//! This crate defines the data model used by the rdfeq toolkit:
//! generic traits for RDF [terms](term::Term), [triples](triple::Triple)
//! and [graphs](graph::Graph),
//! implemented by standard collections as well as by [`rdfeq_inmem`].
//!
//! Graphs are only required to expose their triples;
//! blank nodes are identified by a label that is local to each graph.
//!
//! [`rdfeq_inmem`]: https://docs.rs/rdfeq_inmem
#![deny(missing_docs)]

pub mod graph;
pub mod prelude;
pub mod term;
pub mod triple;
