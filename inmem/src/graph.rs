//! In-memory implementations of RDF graphs.
//!
//! Terms are stored once in a [`TermIndex`],
//! and triples are stored as arrays of [indices](crate::index::Index)
//! in one or several sorted sets.
use std::collections::BTreeSet;
use std::iter::{empty, once};
use std::ops::RangeInclusive;

use rdfeq_api::graph::{CollectibleGraph, GResult, GTripleSource, Graph, MGResult, MutableGraph};
use rdfeq_api::term::matcher::TermMatcher;
use rdfeq_api::term::{SimpleTerm, Term};

use crate::index::*;

/// A graph with a single triple index (SPO).
/// Fast to load but slow to query, with a relatively low memory footprint.
#[derive(Clone, Debug)]
pub struct GenericLightGraph<TI: TermIndex> {
    terms: TI,
    triples: BTreeSet<[TI::Index; 3]>,
}

impl<TI: TermIndex + Default> GenericLightGraph<TI> {
    /// Build an empty graph.
    pub fn new() -> Self {
        Self {
            terms: TI::default(),
            triples: BTreeSet::new(),
        }
    }
}

impl<TI: TermIndex + Default> Default for GenericLightGraph<TI> {
    fn default() -> Self {
        Self::new()
    }
}

impl<TI: TermIndex> Graph for GenericLightGraph<TI> {
    type Term = SimpleTerm;
    type Error = TI::Error;

    fn triples(&self) -> GTripleSource<'_, Self> {
        Box::new(
            self.triples
                .iter()
                .map(|ti| Ok(ti.map(|i| self.terms.get_term(i)))),
        )
    }

    fn triples_matching<'s, S, P, O>(&'s self, sm: S, pm: P, om: O) -> GTripleSource<'s, Self>
    where
        S: TermMatcher + 's,
        P: TermMatcher + 's,
        O: TermMatcher + 's,
    {
        let Some([si, pi, oi]) = constant_indices(&self.terms, &sm, &pm, &om) else {
            return Box::new(empty());
        };
        match (si, pi, oi) {
            (Some(si), Some(pi), Some(oi)) => contained(&self.terms, &self.triples, [si, pi, oi]),
            (Some(si), Some(pi), None) => {
                filtered(&self.terms, self.triples.range(range2(si, pi)), sm, pm, om, |spo| spo)
            }
            (Some(si), None, _) => {
                filtered(&self.terms, self.triples.range(range1(si)), sm, pm, om, |spo| spo)
            }
            (None, _, _) => filtered(&self.terms, self.triples.iter(), sm, pm, om, |spo| spo),
        }
    }

    fn contains<TS, TP, TO>(&self, s: &TS, p: &TP, o: &TO) -> GResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        Ok(triple_indices(&self.terms, s, p, o).is_some_and(|ti| self.triples.contains(&ti)))
    }

    fn triple_count(&self) -> GResult<Self, usize> {
        Ok(self.triples.len())
    }
}

impl<TI: TermIndex> MutableGraph for GenericLightGraph<TI> {
    type MutationError = TI::Error;

    fn insert<TS, TP, TO>(&mut self, s: &TS, p: &TP, o: &TO) -> MGResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        let is = self.terms.ensure_index(s)?;
        let ip = self.terms.ensure_index(p)?;
        let io = self.terms.ensure_index(o)?;
        Ok(self.triples.insert([is, ip, io]))
    }

    fn remove<TS, TP, TO>(&mut self, s: &TS, p: &TP, o: &TO) -> MGResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        let Some(ti) = triple_indices(&self.terms, s, p, o) else {
            return Ok(false);
        };
        Ok(self.triples.remove(&ti))
    }
}

impl<TI: TermIndex + Default> CollectibleGraph for GenericLightGraph<TI> {}

//

/// A heavily indexed graph.
/// Fast to query but slow to load, with a relatively high memory footprint.
#[derive(Clone, Debug)]
pub struct GenericFastGraph<TI: TermIndex> {
    terms: TI,
    spo: BTreeSet<[TI::Index; 3]>,
    pos: BTreeSet<[TI::Index; 3]>,
    osp: BTreeSet<[TI::Index; 3]>,
}

impl<TI: TermIndex + Default> GenericFastGraph<TI> {
    /// Build an empty graph.
    pub fn new() -> Self {
        Self {
            terms: TI::default(),
            spo: BTreeSet::new(),
            pos: BTreeSet::new(),
            osp: BTreeSet::new(),
        }
    }
}

impl<TI: TermIndex + Default> Default for GenericFastGraph<TI> {
    fn default() -> Self {
        Self::new()
    }
}

impl<TI: TermIndex> Graph for GenericFastGraph<TI> {
    type Term = SimpleTerm;
    type Error = TI::Error;

    fn triples(&self) -> GTripleSource<'_, Self> {
        Box::new(
            self.spo
                .iter()
                .map(|ti| Ok(ti.map(|i| self.terms.get_term(i)))),
        )
    }

    fn triples_matching<'s, S, P, O>(&'s self, sm: S, pm: P, om: O) -> GTripleSource<'s, Self>
    where
        S: TermMatcher + 's,
        P: TermMatcher + 's,
        O: TermMatcher + 's,
    {
        let Some([si, pi, oi]) = constant_indices(&self.terms, &sm, &pm, &om) else {
            return Box::new(empty());
        };
        let terms = &self.terms;
        match (si, pi, oi) {
            (Some(si), Some(pi), Some(oi)) => contained(terms, &self.spo, [si, pi, oi]),
            (Some(si), Some(pi), None) => {
                filtered(terms, self.spo.range(range2(si, pi)), sm, pm, om, |spo| spo)
            }
            (Some(si), None, None) => {
                filtered(terms, self.spo.range(range1(si)), sm, pm, om, |spo| spo)
            }
            (None, Some(pi), Some(oi)) => {
                filtered(terms, self.pos.range(range2(pi, oi)), sm, pm, om, |[p, o, s]| {
                    [s, p, o]
                })
            }
            (None, Some(pi), None) => {
                filtered(terms, self.pos.range(range1(pi)), sm, pm, om, |[p, o, s]| {
                    [s, p, o]
                })
            }
            (Some(si), None, Some(oi)) => {
                filtered(terms, self.osp.range(range2(oi, si)), sm, pm, om, |[o, s, p]| {
                    [s, p, o]
                })
            }
            (None, None, Some(oi)) => {
                filtered(terms, self.osp.range(range1(oi)), sm, pm, om, |[o, s, p]| {
                    [s, p, o]
                })
            }
            (None, None, None) => filtered(terms, self.spo.iter(), sm, pm, om, |spo| spo),
        }
    }

    fn contains<TS, TP, TO>(&self, s: &TS, p: &TP, o: &TO) -> GResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        Ok(triple_indices(&self.terms, s, p, o).is_some_and(|ti| self.spo.contains(&ti)))
    }

    fn triple_count(&self) -> GResult<Self, usize> {
        Ok(self.spo.len())
    }
}

impl<TI: TermIndex> MutableGraph for GenericFastGraph<TI> {
    type MutationError = TI::Error;

    fn insert<TS, TP, TO>(&mut self, s: &TS, p: &TP, o: &TO) -> MGResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        let is = self.terms.ensure_index(s)?;
        let ip = self.terms.ensure_index(p)?;
        let io = self.terms.ensure_index(o)?;
        if self.spo.insert([is, ip, io]) {
            let i = self.pos.insert([ip, io, is]);
            debug_assert!(i);
            let i = self.osp.insert([io, is, ip]);
            debug_assert!(i);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn remove<TS, TP, TO>(&mut self, s: &TS, p: &TP, o: &TO) -> MGResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        let Some([is, ip, io]) = triple_indices(&self.terms, s, p, o) else {
            return Ok(false);
        };
        if self.spo.remove(&[is, ip, io]) {
            let i = self.pos.remove(&[ip, io, is]);
            debug_assert!(i);
            let i = self.osp.remove(&[io, is, ip]);
            debug_assert!(i);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

impl<TI: TermIndex + Default> CollectibleGraph for GenericFastGraph<TI> {}

/// A graph with a single triple index (SPO), using `u32` indices.
pub type LightGraph = GenericLightGraph<SimpleTermIndex<u32>>;
/// A heavily indexed graph, using `u32` indices.
pub type FastGraph = GenericFastGraph<SimpleTermIndex<u32>>;

//

/// Look up the index of each constant matcher.
///
/// Returns `None` if some constant is not in `terms` (then nothing can match),
/// otherwise the index of each position that has a constant.
fn constant_indices<TI, S, P, O>(
    terms: &TI,
    sm: &S,
    pm: &P,
    om: &O,
) -> Option<[Option<TI::Index>; 3]>
where
    TI: TermIndex,
    S: TermMatcher,
    P: TermMatcher,
    O: TermMatcher,
{
    fn lookup<TI: TermIndex, M: TermMatcher>(terms: &TI, m: &M) -> Option<Option<TI::Index>> {
        match m.constant() {
            None => Some(None),
            Some(c) => terms.get_index(c).map(Some),
        }
    }
    Some([lookup(terms, sm)?, lookup(terms, pm)?, lookup(terms, om)?])
}

fn triple_indices<TI, TS, TP, TO>(terms: &TI, s: &TS, p: &TP, o: &TO) -> Option<[TI::Index; 3]>
where
    TI: TermIndex,
    TS: Term + ?Sized,
    TP: Term + ?Sized,
    TO: Term + ?Sized,
{
    Some([terms.get_index(s)?, terms.get_index(p)?, terms.get_index(o)?])
}

fn range1<I: Index>(a: I) -> RangeInclusive<[I; 3]> {
    [a, I::ZERO, I::ZERO]..=[a, I::MAX, I::MAX]
}

fn range2<I: Index>(a: I, b: I) -> RangeInclusive<[I; 3]> {
    [a, b, I::ZERO]..=[a, b, I::MAX]
}

fn contained<'a, TI, E>(
    terms: &'a TI,
    index: &BTreeSet<[TI::Index; 3]>,
    spo: [TI::Index; 3],
) -> Box<dyn Iterator<Item = Result<[&'a SimpleTerm; 3], E>> + 'a>
where
    TI: TermIndex,
    E: 'a,
{
    if index.contains(&spo) {
        Box::new(once(Ok(spo.map(|i| terms.get_term(i)))))
    } else {
        Box::new(empty())
    }
}

/// Iterate over index-triples of some index (SPO, POS or OSP),
/// reorder them to SPO with `to_spo`,
/// and keep those matched by the given matchers.
fn filtered<'a, TI, It, S, P, O, F, E>(
    terms: &'a TI,
    index_triples: It,
    sm: S,
    pm: P,
    om: O,
    to_spo: F,
) -> Box<dyn Iterator<Item = Result<[&'a SimpleTerm; 3], E>> + 'a>
where
    TI: TermIndex,
    It: Iterator<Item = &'a [TI::Index; 3]> + 'a,
    S: TermMatcher + 'a,
    P: TermMatcher + 'a,
    O: TermMatcher + 'a,
    F: Fn([TI::Index; 3]) -> [TI::Index; 3] + 'a,
    E: 'a,
{
    Box::new(
        index_triples
            .map(move |abc| to_spo(*abc).map(|i| terms.get_term(i)))
            .filter(move |[s, p, o]| sm.matches(*s) && pm.matches(*p) && om.matches(*o))
            .map(Ok),
    )
}

#[cfg(test)]
mod test {
    use super::{FastGraph, LightGraph};
    use rdfeq_api::graph::{CollectibleGraph, Graph, MutableGraph};
    use rdfeq_api::term::matcher::Any;
    use rdfeq_api::term::SimpleTerm;

    rdfeq_api::test_graph_impl!(light_graph, LightGraph);
    rdfeq_api::test_graph_impl!(fast_graph, FastGraph);

    #[test]
    fn new_available() {
        // ::new() is only available if the underlying TermIndex implements Default,
        // so let's check that FastGraph and LightGraph do have it.
        let _ = FastGraph::new();
        let _ = LightGraph::new();
    }

    fn collect_generic<G: CollectibleGraph>(triples: &[[SimpleTerm; 3]]) -> Result<G, G::MutationError> {
        G::from_triples(triples.iter().map(|t| t.each_ref()))
    }

    #[test]
    fn default_for_any_index() -> Result<(), Box<dyn std::error::Error>> {
        let s = SimpleTerm::iri_unchecked("tag:s");
        let triples = [[s.clone(), s.clone(), s]];
        assert_eq!(LightGraph::default().triple_count()?, 0);
        assert_eq!(FastGraph::default().triple_count()?, 0);
        let g: super::small::LightGraph = collect_generic(&triples)?;
        assert_eq!(g.triple_count()?, 1);
        let g: super::small::FastGraph = collect_generic(&triples)?;
        assert_eq!(g.triple_count()?, 1);
        Ok(())
    }

    #[test]
    fn unknown_constant_matches_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let s = SimpleTerm::iri_unchecked("tag:s");
        let unknown = SimpleTerm::iri_unchecked("tag:unknown");
        let g = FastGraph::from_triples([[&s, &s, &s]])?;
        assert_eq!(g.triples_matching(&unknown, Any, Any).count(), 0);
        assert_eq!(g.triples_matching(Any, Any, &unknown).count(), 0);
        assert!(!g.contains(&s, &s, &unknown)?);
        Ok(())
    }

    #[test]
    fn terms_survive_removal() -> Result<(), Box<dyn std::error::Error>> {
        let s = SimpleTerm::iri_unchecked("tag:s");
        let o = SimpleTerm::bnode_unchecked("o");
        let mut g = LightGraph::from_triples([[&s, &s, &o]])?;
        assert!(g.remove(&s, &s, &o)?);
        assert_eq!(g.triple_count()?, 0);
        assert!(g.insert(&s, &s, &o)?);
        assert_eq!(g.blank_nodes()?.len(), 1);
        Ok(())
    }
}

/// Flavors of Graph implementations with a smaller memory-footprint.
///
/// The trade-off is that these implementations can only contain a small number (2^16) of terms.
///
pub mod small {
    use crate::index::SimpleTermIndex;

    /// A graph with a single triple index (SPO).
    /// Fast to load but slow to query, with a relatively low memory footprint.
    pub type LightGraph = super::GenericLightGraph<SimpleTermIndex<u16>>;
    /// A heavily indexed graph.
    /// Fast to query but slow to load, with a relatively high memory footprint.
    pub type FastGraph = super::GenericFastGraph<SimpleTermIndex<u16>>;

}
