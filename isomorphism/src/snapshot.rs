//! Interned, ordered copies of the graphs being matched.
use std::collections::BTreeSet;
use std::sync::Arc;

use rdfeq_api::graph::Graph;
use rdfeq_api::term::{BnodeId, SimpleTerm, Term};
use rdfeq_inmem::index::{SimpleTermIndex, TermIndex};

use crate::mapping::Mapping;
use crate::{BnodeMapping, MatchError};

/// Numeric identifier of a term in a [`Snapshot`].
pub(crate) type Idx = u32;
/// An interned triple.
pub(crate) type ITriple = [Idx; 3];
/// An ordered set of interned triples.
pub(crate) type TripleSet = BTreeSet<ITriple>;

/// The triples of two graphs, interned in a single index space,
/// so that ground terms of both graphs compare by index.
#[derive(Clone, Debug)]
pub(crate) struct Snapshot {
    pub terms: SimpleTermIndex<Idx>,
    pub source: TripleSet,
    pub target: TripleSet,
}

impl Snapshot {
    /// Read both graphs once.
    ///
    /// Fails on any triple whose three components are blank nodes.
    pub fn new<G1, G2>(g1: &G1, g2: &G2) -> Result<Self, MatchError<G1::Error, G2::Error>>
    where
        G1: Graph + ?Sized,
        G2: Graph + ?Sized,
    {
        let mut terms = SimpleTermIndex::new();
        let source = intern(g1, &mut terms, MatchError::SourceGraph)?;
        let target = intern(g2, &mut terms, MatchError::TargetGraph)?;
        Ok(Snapshot {
            terms,
            source,
            target,
        })
    }

    /// Convert an interned mapping into a mapping of blank node identifiers.
    pub fn to_bnode_mapping(&self, mapping: &Mapping) -> BnodeMapping {
        mapping
            .iter()
            .filter_map(|(x, y)| Some((self.terms.bnode_id_of(x)?, self.terms.bnode_id_of(y)?)))
            .collect()
    }

    /// Convert interned triples back into [`SimpleTerm`] triples.
    pub fn to_simple_triples<'a, I>(&self, triples: I) -> Vec<[SimpleTerm; 3]>
    where
        I: IntoIterator<Item = &'a ITriple>,
    {
        triples
            .into_iter()
            .map(|t| t.map(|i| self.terms.get_term(i).clone()))
            .collect()
    }
}

fn intern<G, E1, E2, F>(
    g: &G,
    terms: &mut SimpleTermIndex<Idx>,
    wrap_err: F,
) -> Result<TripleSet, MatchError<E1, E2>>
where
    G: Graph + ?Sized,
    E1: std::error::Error + Send + Sync + 'static,
    E2: std::error::Error + Send + Sync + 'static,
    F: Fn(G::Error) -> MatchError<E1, E2>,
{
    let mut triples = TripleSet::new();
    for t in g.triples() {
        let [s, p, o] = t.map_err(&wrap_err)?;
        if s.is_blank_node() && p.is_blank_node() && o.is_blank_node() {
            let msg = format!("{} {} {} .", s.as_simple(), p.as_simple(), o.as_simple());
            log::debug!("rejecting fully blank triple {}", msg);
            return Err(MatchError::UnsupportedTripleShape(msg));
        }
        triples.insert([
            terms.ensure_index(s)?,
            terms.ensure_index(p)?,
            terms.ensure_index(o)?,
        ]);
    }
    Ok(triples)
}

/// Blank node discrimination over interned terms.
pub(crate) trait BlankAware {
    /// Whether the term with index `i` is a blank node.
    fn is_blank(&self, i: Idx) -> bool;

    /// The blank node identifier of the term with index `i`, if it is a blank node.
    fn bnode_id_of(&self, i: Idx) -> Option<BnodeId<Arc<str>>>;

    /// Whether no component of `t` is a blank node.
    fn is_ground(&self, t: &ITriple) -> bool {
        !t.iter().any(|i| self.is_blank(*i))
    }

    /// The blank nodes of `t`, in position order (possibly repeated).
    fn blanks_of<'a>(&'a self, t: &'a ITriple) -> Box<dyn Iterator<Item = Idx> + 'a> {
        Box::new(t.iter().copied().filter(|i| self.is_blank(*i)))
    }
}

impl BlankAware for SimpleTermIndex<Idx> {
    fn is_blank(&self, i: Idx) -> bool {
        self.get_term(i).is_blank_node()
    }

    fn bnode_id_of(&self, i: Idx) -> Option<BnodeId<Arc<str>>> {
        self.get_term(i)
            .bnode_id()
            .map(|id| id.map_unchecked(Arc::from))
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    pub(crate) fn st(txt: &str) -> SimpleTerm {
        if let Some(id) = txt.strip_prefix("_:") {
            SimpleTerm::bnode_unchecked(id)
        } else if let Some(lex) = txt.strip_prefix('"') {
            SimpleTerm::literal_unchecked(
                lex.trim_end_matches('"'),
                "http://www.w3.org/2001/XMLSchema#string",
            )
        } else {
            SimpleTerm::iri_unchecked(&format!("tag:{txt}"))
        }
    }

    /// Parse a tiny whitespace-separated triple notation, one triple per line.
    pub(crate) fn graph(txt: &str) -> Vec<[SimpleTerm; 3]> {
        txt.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| {
                let v: Vec<_> = l.split_whitespace().map(st).collect();
                [v[0].clone(), v[1].clone(), v[2].clone()]
            })
            .collect()
    }

    /// Snapshot two graphs in the tiny notation above.
    pub(crate) fn snapshot(g1: &str, g2: &str) -> Snapshot {
        Snapshot::new(&graph(g1), &graph(g2)).unwrap()
    }

    /// Index of a term already present in the snapshot.
    pub(crate) fn idx(snap: &Snapshot, txt: &str) -> Idx {
        snap.terms.get_index(&st(txt)).unwrap()
    }

    #[test]
    fn shared_index_space() {
        let snap = snapshot("_:a p x", "_:b p x\n_:b q y");
        assert_eq!(snap.source.len(), 1);
        assert_eq!(snap.target.len(), 2);
        // ground terms are shared
        let p = idx(&snap, "p");
        assert!(snap.source.iter().all(|t| t[1] == p));
        assert!(snap.target.iter().any(|t| t[1] == p));
        assert!(snap.terms.is_blank(idx(&snap, "_:a")));
        assert!(snap.terms.is_blank(idx(&snap, "_:b")));
        assert!(!snap.terms.is_blank(p));
    }

    #[test]
    fn fully_blank_triple_is_rejected() {
        let g1 = graph("_:a _:b _:c");
        let g2 = graph("x p y");
        let err = Snapshot::new(&g1, &g2).unwrap_err();
        assert!(err.is_unsupported_triple_shape());
        let err = Snapshot::new(&g2, &g1).unwrap_err();
        assert!(err.is_unsupported_triple_shape());
    }

    #[test]
    fn ground_and_blanks() {
        let snap = snapshot("_:a p _:b\nx p y", "");
        for t in &snap.source {
            let n = snap.terms.blanks_of(t).count();
            assert_eq!(snap.terms.is_ground(t), n == 0);
        }
    }
}
