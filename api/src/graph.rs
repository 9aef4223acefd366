//! An RDF graph, the central notion of the RDF data model,
//! is a collection of triples.
//!
//! This module provides [reusable abstractions](#traits)
//! for different kinds of graph,
//! as well as implementations for standard collections of triples.


mod _foreign_impl;
mod _traits;
pub use self::_traits::*;
