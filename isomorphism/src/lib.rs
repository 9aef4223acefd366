//! This crate is part of rdfeq,
//! a toolkit for comparing [RDF] graphs in Rust.
//!
//! This crate provides functions to check if two graphs are [isomorphic],
//! i.e. equal up to the renaming of their blank nodes,
//! if one graph is isomorphic to a subset of another,
//! and to describe the differences between two graphs.
//!
//! Matching proceeds in stages of increasing cost:
//! cheap necessary conditions (triple counts, ground triples, blank node degrees),
//! then rules committing only forced choices,
//! then a decomposition into isolated sub-graphs matched recursively,
//! and finally a backtracking search.
//! The worst case is exponential, but typical graphs never reach the last stage.
//!
//! Graphs containing a triple made of three blank nodes are not supported.
//!
//! [RDF]: https://www.w3.org/TR/rdf12-primer/
//! [isomorphic]: https://www.w3.org/TR/rdf12-concepts/#graph-isomorphism
#![deny(missing_docs)]

mod brute;
mod classify;
mod diff;
mod divide;
mod graph;
mod mapping;
mod matcher;
mod msg;
mod pair;
mod rules;
mod snapshot;

pub use diff::{graph_diff, GraphDiff};
pub use graph::{
    find_isomorphism, has_subgraph, is_subgraph_of, isomorphic_graphs, BnodeMapping,
    GraphMatchExt, MatchResult,
};

use rdfeq_inmem::index::TermIndexFullError;
use thiserror::Error;

/// Graph matching error.
///
/// Note that two graphs being different is *not* an error:
/// it is reported as `Ok(false)` or `Ok(None)` by the functions of this crate.
#[derive(Debug, Error)]
pub enum MatchError<E1, E2>
where
    E1: std::error::Error + Send + Sync + 'static,
    E2: std::error::Error + Send + Sync + 'static,
{
    /// The first graph raised an error while being read
    #[error("Error from source graph: {0}")]
    SourceGraph(#[source] E1),
    /// The second graph raised an error while being read
    #[error("Error from target graph: {0}")]
    TargetGraph(#[source] E2),
    /// One of the graphs contains a triple whose three components are blank nodes,
    /// which the matching algorithm does not support
    #[error("Unsupported triple shape (all components are blank nodes): {0}")]
    UnsupportedTripleShape(String),
    /// The graphs contain more distinct terms than the matcher can index
    #[error("Graphs are too big: {0}")]
    TooManyTerms(#[from] TermIndexFullError),
}

impl<E1, E2> MatchError<E1, E2>
where
    E1: std::error::Error + Send + Sync + 'static,
    E2: std::error::Error + Send + Sync + 'static,
{
    /// Exchange the roles of the source and target graph in this error.
    pub fn swap(self) -> MatchError<E2, E1> {
        match self {
            MatchError::SourceGraph(e) => MatchError::TargetGraph(e),
            MatchError::TargetGraph(e) => MatchError::SourceGraph(e),
            MatchError::UnsupportedTripleShape(msg) => MatchError::UnsupportedTripleShape(msg),
            MatchError::TooManyTerms(e) => MatchError::TooManyTerms(e),
        }
    }

    /// Whether this error is caused by a fully-blank triple.
    pub fn is_unsupported_triple_shape(&self) -> bool {
        matches!(self, MatchError::UnsupportedTripleShape(_))
    }
}

#[cfg(test)]
fn test_setup() {
    TEST_SETUP.call_once(|| {
        env_logger::init();
    });
}

#[cfg(test)]
static TEST_SETUP: std::sync::Once = std::sync::Once::new();

#[cfg(test)]
mod test;
