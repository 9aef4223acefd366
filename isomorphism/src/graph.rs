use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use rdfeq_api::graph::Graph;
use rdfeq_api::term::{BnodeId, Term};

use crate::diff::{graph_diff, GraphDiff};
use crate::matcher::{Matcher, Mode};
use crate::snapshot::Snapshot;
use crate::MatchError;

/// A mapping from the blank nodes of one graph to the blank nodes of another graph.
pub type BnodeMapping = BTreeMap<BnodeId<Arc<str>>, BnodeId<Arc<str>>>;

/// Type alias for the results of the functions of this module.
pub type MatchResult<T, G1, G2> =
    Result<T, MatchError<<G1 as Graph>::Error, <G2 as Graph>::Error>>;

/// Computes whether two graphs are isomorphic.
///
/// # Error
/// If an error occurs while traversing `g1` (resp. `g2`),
/// a [`MatchError::SourceGraph`] (resp. [`MatchError::TargetGraph`]) is returned.
///
/// If any of the graphs contains a triple made of three blank nodes,
/// a [`MatchError::UnsupportedTripleShape`] is returned.
pub fn isomorphic_graphs<G1, G2>(g1: &G1, g2: &G2) -> MatchResult<bool, G1, G2>
where
    G1: Graph + ?Sized,
    G2: Graph + ?Sized,
{
    Ok(find_isomorphism(g1, g2)?.is_some())
}

/// Computes an isomorphism between two graphs, if any.
///
/// The returned mapping associates each blank node of `g1`
/// to a blank node of `g2`.
/// When several isomorphisms exist, which one is returned is unspecified.
///
/// # Error
/// See [`isomorphic_graphs`].
pub fn find_isomorphism<G1, G2>(g1: &G1, g2: &G2) -> MatchResult<Option<BnodeMapping>, G1, G2>
where
    G1: Graph + ?Sized,
    G2: Graph + ?Sized,
{
    match_graphs(g1, g2, Mode::Isomorphism)
}

/// Checks whether `sub` is isomorphic to a subset of `sup`.
///
/// If so, returns a mapping from the blank nodes of `sub` to blank nodes of `sup`.
///
/// # Error
/// See [`isomorphic_graphs`].
pub fn is_subgraph_of<G1, G2>(sub: &G1, sup: &G2) -> MatchResult<Option<BnodeMapping>, G1, G2>
where
    G1: Graph + ?Sized,
    G2: Graph + ?Sized,
{
    match_graphs(sub, sup, Mode::SubGraph)
}

/// Checks whether a subset of `sup` is isomorphic to `sub`.
///
/// This is [`is_subgraph_of`] with the arguments swapped:
/// the returned mapping still goes from the blank nodes of `sub` to blank nodes of `sup`.
///
/// # Error
/// See [`isomorphic_graphs`].
pub fn has_subgraph<G1, G2>(sup: &G1, sub: &G2) -> MatchResult<Option<BnodeMapping>, G1, G2>
where
    G1: Graph + ?Sized,
    G2: Graph + ?Sized,
{
    is_subgraph_of(sub, sup).map_err(MatchError::swap)
}

fn match_graphs<G1, G2>(g1: &G1, g2: &G2, mode: Mode) -> MatchResult<Option<BnodeMapping>, G1, G2>
where
    G1: Graph + ?Sized,
    G2: Graph + ?Sized,
{
    if same_graph(g1, g2) {
        debug!("[{}] same graph", mode.label());
        let bnodes = g1.blank_nodes().map_err(MatchError::SourceGraph)?;
        return Ok(Some(
            bnodes
                .iter()
                .filter_map(|b| b.bnode_id())
                .map(|id| {
                    let id = id.map_unchecked(Arc::from);
                    (id.clone(), id)
                })
                .collect(),
        ));
    }
    let n1 = g1.triple_count().map_err(MatchError::SourceGraph)?;
    let n2 = g2.triple_count().map_err(MatchError::TargetGraph)?;
    if !mode.count_compatible(n1, n2) {
        debug!("[NOT {}] {} triples vs {} triples", mode.label(), n1, n2);
        return Ok(None);
    }
    let snapshot = Snapshot::new(g1, g2)?;
    let matcher = Matcher::new(&snapshot.terms, mode);
    Ok(matcher
        .run(&snapshot.source, &snapshot.target, 0)
        .map(|mapping| snapshot.to_bnode_mapping(&mapping)))
}

/// Whether `g1` and `g2` are the very same graph.
fn same_graph<G1, G2>(g1: &G1, g2: &G2) -> bool
where
    G1: ?Sized,
    G2: ?Sized,
{
    std::ptr::eq(g1 as *const G1 as *const u8, g2 as *const G2 as *const u8)
        && std::mem::size_of_val(g1) == std::mem::size_of_val(g2)
        && std::any::type_name::<G1>() == std::any::type_name::<G2>()
}

/// Graph matching methods, available on every [`Graph`].
///
/// # Example
/// ```
/// # use rdfeq_api::term::SimpleTerm;
/// use rdfeq_isomorphism::GraphMatchExt;
///
/// let p = SimpleTerm::iri_unchecked("https://example.org/p");
/// let g1 = vec![[SimpleTerm::bnode_unchecked("a"), p.clone(), SimpleTerm::bnode_unchecked("b")]];
/// let g2 = vec![[SimpleTerm::bnode_unchecked("x"), p.clone(), SimpleTerm::bnode_unchecked("y")]];
/// assert!(g1.equals(&g2)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait GraphMatchExt: Graph {
    /// Whether this graph is isomorphic to `other`.
    ///
    /// See [`isomorphic_graphs`].
    fn equals<G: Graph + ?Sized>(&self, other: &G) -> MatchResult<bool, Self, G> {
        isomorphic_graphs(self, other)
    }

    /// An isomorphism from this graph to `other`, if any.
    ///
    /// See [`find_isomorphism`](crate::find_isomorphism).
    fn find_isomorphism<G: Graph + ?Sized>(
        &self,
        other: &G,
    ) -> MatchResult<Option<BnodeMapping>, Self, G> {
        find_isomorphism(self, other)
    }

    /// Whether this graph is isomorphic to a subset of `other`.
    ///
    /// See [`is_subgraph_of`](crate::is_subgraph_of).
    fn is_subgraph_of<G: Graph + ?Sized>(
        &self,
        other: &G,
    ) -> MatchResult<Option<BnodeMapping>, Self, G> {
        is_subgraph_of(self, other)
    }

    /// Whether a subset of this graph is isomorphic to `other`.
    ///
    /// See [`has_subgraph`](crate::has_subgraph).
    fn has_subgraph<G: Graph + ?Sized>(
        &self,
        other: &G,
    ) -> MatchResult<Option<BnodeMapping>, Self, G> {
        has_subgraph(self, other)
    }

    /// The changes turning this graph into `other`.
    ///
    /// See [`graph_diff`].
    fn difference<G: Graph + ?Sized>(&self, other: &G) -> MatchResult<GraphDiff, Self, G> {
        graph_diff(self, other)
    }
}

impl<T: Graph + ?Sized> GraphMatchExt for T {}
