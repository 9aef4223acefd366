//! This crate is part of rdfeq,
//! a toolkit for comparing [RDF] graphs containing blank nodes.
//!
//! It provides in-memory implementations of graphs,
//! and the [term index](index::TermIndex) they rely on,
//! also used by the matcher to intern the terms of the graphs it compares.
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/
#![deny(missing_docs)]

pub mod graph;
pub mod index;
