//! Describing the differences between two graphs.
use std::sync::Arc;

use log::debug;
use rdfeq_api::graph::Graph;
use rdfeq_api::term::{BnodeId, SimpleTerm};

use crate::graph::{BnodeMapping, MatchResult};
use crate::mapping::Mapping;
use crate::matcher::{Matcher, Mode};
use crate::msg::isolated_subgraphs;
use crate::snapshot::{BlankAware, Snapshot, TripleSet};

/// The changes turning a graph into another one, as computed by [`graph_diff`].
///
/// Ground triples are compared individually.
/// Triples containing blank nodes are compared by isolated sub-graphs
/// (connected through shared blank nodes):
/// a sub-graph is either matched as a whole with a sub-graph of the other graph,
/// or reported as added/removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphDiff {
    are_equal: bool,
    mapping: BnodeMapping,
    added_triples: Vec<[SimpleTerm; 3]>,
    removed_triples: Vec<[SimpleTerm; 3]>,
    added_subgraphs: Vec<Vec<[SimpleTerm; 3]>>,
    removed_subgraphs: Vec<Vec<[SimpleTerm; 3]>>,
}

impl GraphDiff {
    /// Whether the two graphs are isomorphic.
    pub fn are_equal(&self) -> bool {
        self.are_equal
    }

    /// The mapping of the blank nodes of the first graph
    /// that could be matched with blank nodes of the second graph.
    pub fn mapping(&self) -> &BnodeMapping {
        &self.mapping
    }

    /// Ground triples present in the second graph but not in the first.
    pub fn added_triples(&self) -> &[[SimpleTerm; 3]] {
        &self.added_triples
    }

    /// Ground triples present in the first graph but not in the second.
    pub fn removed_triples(&self) -> &[[SimpleTerm; 3]] {
        &self.removed_triples
    }

    /// Isolated sub-graphs of the second graph with no counterpart in the first.
    pub fn added_subgraphs(&self) -> &[Vec<[SimpleTerm; 3]>] {
        &self.added_subgraphs
    }

    /// Isolated sub-graphs of the first graph with no counterpart in the second.
    pub fn removed_subgraphs(&self) -> &[Vec<[SimpleTerm; 3]>] {
        &self.removed_subgraphs
    }

    /// The image of blank node `b` of the first graph, if any.
    pub fn map_bnode(&self, b: &BnodeId<Arc<str>>) -> Option<&BnodeId<Arc<str>>> {
        self.mapping.get(b)
    }
}

/// Computes the changes turning `g1` into `g2`.
///
/// # Error
/// See [`isomorphic_graphs`](crate::isomorphic_graphs).
pub fn graph_diff<G1, G2>(g1: &G1, g2: &G2) -> MatchResult<GraphDiff, G1, G2>
where
    G1: Graph + ?Sized,
    G2: Graph + ?Sized,
{
    if let Some(mapping) = crate::find_isomorphism(g1, g2)? {
        return Ok(GraphDiff {
            are_equal: true,
            mapping,
            ..GraphDiff::default()
        });
    }

    let snapshot = Snapshot::new(g1, g2)?;
    let terms = &snapshot.terms;
    let (src_ground, src_rest): (TripleSet, TripleSet) =
        snapshot.source.iter().partition(|t| terms.is_ground(t));
    let (tgt_ground, tgt_rest): (TripleSet, TripleSet) =
        snapshot.target.iter().partition(|t| terms.is_ground(t));

    let removed_triples = snapshot.to_simple_triples(src_ground.difference(&tgt_ground));
    let added_triples = snapshot.to_simple_triples(tgt_ground.difference(&src_ground));

    let matcher = Matcher::new(terms, Mode::Isomorphism);
    let mut mapping = Mapping::new();
    let mut removed = vec![];
    let mut tgt_comps: Vec<Option<TripleSet>> = isolated_subgraphs(terms, &tgt_rest)
        .into_iter()
        .map(Some)
        .collect();
    for comp in isolated_subgraphs(terms, &src_rest) {
        let found = tgt_comps.iter_mut().find_map(|slot| {
            let cand = slot.as_ref().filter(|cand| cand.len() == comp.len())?;
            let sub = matcher.run(&comp, cand, 1)?;
            slot.take();
            Some(sub)
        });
        match found {
            Some(sub) => {
                let extended = mapping.extend(&sub);
                debug_assert!(extended, "isolated sub-graphs share no blank node");
            }
            None => removed.push(snapshot.to_simple_triples(&comp)),
        }
    }
    let added: Vec<_> = tgt_comps
        .into_iter()
        .flatten()
        .map(|comp| snapshot.to_simple_triples(&comp))
        .collect();
    debug!(
        "diff: -{} +{} triples, -{} +{} sub-graphs",
        removed_triples.len(),
        added_triples.len(),
        removed.len(),
        added.len()
    );

    Ok(GraphDiff {
        are_equal: false,
        mapping: snapshot.to_bnode_mapping(&mapping),
        added_triples,
        removed_triples,
        added_subgraphs: added,
        removed_subgraphs: removed,
    })
}
