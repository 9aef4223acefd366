//! Dependency pairs: two distinct blank nodes sharing a triple.
use std::collections::{BTreeMap, BTreeSet};

use crate::snapshot::{BlankAware, ITriple, Idx, TripleSet};

/// The [`MappingPair`]s of a set of triples,
/// each with the triples sharing it.
pub(crate) type PairIndex = BTreeMap<MappingPair, Vec<ITriple>>;

/// The two positions occupied by the nodes of a [`MappingPair`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum PairPosition {
    SubjectPredicate,
    SubjectObject,
    PredicateObject,
}

impl PairPosition {
    /// The indices of the two positions, and of the remaining one.
    pub fn indices(self) -> (usize, usize, usize) {
        match self {
            PairPosition::SubjectPredicate => (0, 1, 2),
            PairPosition::SubjectObject => (0, 2, 1),
            PairPosition::PredicateObject => (1, 2, 0),
        }
    }
}

/// Two distinct blank nodes of the same graph, co-occurring in a triple.
///
/// Such nodes can not be mapped independently of each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct MappingPair {
    pub x: Idx,
    pub y: Idx,
    pub position: PairPosition,
}

impl MappingPair {
    /// The pair of `t`, if it has exactly two distinct blank nodes.
    pub fn of_triple<B: BlankAware + ?Sized>(terms: &B, t: &ITriple) -> Option<Self> {
        use PairPosition::*;
        let [s, p, o] = t.map(|i| terms.is_blank(i));
        let (position, x, y) = if s && p && t[0] != t[1] {
            (SubjectPredicate, t[0], t[1])
        } else if s && o && t[0] != t[2] {
            (SubjectObject, t[0], t[2])
        } else if p && o && t[1] != t[2] {
            (PredicateObject, t[1], t[2])
        } else {
            return None;
        };
        Some(MappingPair { x, y, position })
    }
}

/// All the [`MappingPair`]s of `triples`, deduplicated and ordered.
pub(crate) fn extract_pairs<B: BlankAware + ?Sized>(terms: &B, triples: &TripleSet) -> PairIndex {
    let mut ret = PairIndex::new();
    for t in triples {
        if let Some(pair) = MappingPair::of_triple(terms, t) {
            ret.entry(pair).or_default().push(*t);
        }
    }
    ret
}

/// The blank nodes involved in at least one of `pairs`.
pub(crate) fn dependent_nodes(pairs: &PairIndex) -> BTreeSet<Idx> {
    pairs.keys().flat_map(|p| [p.x, p.y]).collect()
}
