//! Blank node degrees, and their distribution.
use std::collections::BTreeMap;

use crate::snapshot::{BlankAware, ITriple, Idx};

/// Maps each blank node to its degree,
/// i.e. the number of positions it occupies in the classified triples.
pub(crate) type NodeClassification = BTreeMap<Idx, usize>;

/// Maps each degree to the number of blank nodes having that degree.
pub(crate) type DegreeClassification = BTreeMap<usize, usize>;

pub(crate) fn classify_nodes<'a, B, I>(terms: &B, triples: I) -> NodeClassification
where
    B: BlankAware + ?Sized,
    I: IntoIterator<Item = &'a ITriple>,
{
    let mut ret = NodeClassification::new();
    for t in triples {
        for b in terms.blanks_of(t) {
            *ret.entry(b).or_default() += 1;
        }
    }
    ret
}

pub(crate) fn classify_degrees(nodes: &NodeClassification) -> DegreeClassification {
    let mut ret = DegreeClassification::new();
    for d in nodes.values() {
        *ret.entry(*d).or_default() += 1;
    }
    ret
}

/// The triples of `triples` involving each blank node.
pub(crate) fn triples_by_node<'a, B, I>(terms: &B, triples: I) -> BTreeMap<Idx, Vec<ITriple>>
where
    B: BlankAware + ?Sized,
    I: IntoIterator<Item = &'a ITriple>,
{
    let mut ret = BTreeMap::<Idx, Vec<ITriple>>::new();
    for t in triples {
        let mut blanks: Vec<_> = terms.blanks_of(t).collect();
        blanks.sort_unstable();
        blanks.dedup();
        for b in blanks {
            ret.entry(b).or_default().push(*t);
        }
    }
    ret
}

/// The blank nodes having degree `degree`.
pub(crate) fn nodes_with_degree(
    nodes: &NodeClassification,
    degree: usize,
) -> impl Iterator<Item = Idx> + '_ {
    nodes
        .iter()
        .filter(move |(_, d)| **d == degree)
        .map(|(n, _)| *n)
}
