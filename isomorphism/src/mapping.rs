//! Partial injective mappings from source blank nodes to target blank nodes.
use std::collections::{BTreeMap, BTreeSet};

use crate::matcher::Mode;
use crate::snapshot::{BlankAware, ITriple, Idx, TripleSet};

/// An injective partial function from source blank nodes to target blank nodes.
///
/// The set of target nodes already used as values (the *bound* nodes)
/// is maintained alongside, so that injectivity checks are cheap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Mapping {
    map: BTreeMap<Idx, Idx>,
    bound: BTreeSet<Idx>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity mapping on the given nodes.
    pub fn identity<I: IntoIterator<Item = Idx>>(nodes: I) -> Self {
        let map: BTreeMap<_, _> = nodes.into_iter().map(|i| (i, i)).collect();
        let bound = map.keys().copied().collect();
        Mapping { map, bound }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, x: Idx) -> Option<Idx> {
        self.map.get(&x).copied()
    }

    pub fn is_mapped(&self, x: Idx) -> bool {
        self.map.contains_key(&x)
    }

    pub fn is_bound(&self, y: Idx) -> bool {
        self.bound.contains(&y)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Idx, Idx)> + '_ {
        self.map.iter().map(|(x, y)| (*x, *y))
    }

    /// Whether `x -> y` can be added without breaking injectivity
    /// (or is already present).
    pub fn accepts(&self, x: Idx, y: Idx) -> bool {
        match self.get(x) {
            Some(y2) => y2 == y,
            None => !self.is_bound(y),
        }
    }

    /// Add `x -> y` to this mapping.
    ///
    /// Returns `false`, leaving the mapping unchanged,
    /// if `x` is already mapped to another node, or `y` is already bound.
    pub fn insert(&mut self, x: Idx, y: Idx) -> bool {
        if !self.accepts(x, y) {
            return false;
        }
        self.map.insert(x, y);
        self.bound.insert(y);
        true
    }

    /// Remove the entry for `x`, if any.
    pub fn remove(&mut self, x: Idx) {
        if let Some(y) = self.map.remove(&x) {
            self.bound.remove(&y);
        }
    }

    /// Add all entries of `other`.
    ///
    /// Returns `false`, leaving the mapping unchanged, if any entry conflicts.
    pub fn extend(&mut self, other: &Mapping) -> bool {
        let mut tmp = self.clone();
        for (x, y) in other.iter() {
            if !tmp.insert(x, y) {
                return false;
            }
        }
        *self = tmp;
        true
    }

    /// Whether every key of `nodes` is mapped.
    pub fn covers<'a, I: IntoIterator<Item = &'a Idx>>(&self, nodes: I) -> bool {
        nodes.into_iter().all(|x| self.is_mapped(*x))
    }

    /// Substitute the blank nodes of `t` with their image.
    ///
    /// Returns `None` if some blank node of `t` is not mapped.
    pub fn remap<B: BlankAware + ?Sized>(&self, terms: &B, t: &ITriple) -> Option<ITriple> {
        self.remap_with(terms, t, &[])
    }

    /// Same as [`remap`](Mapping::remap),
    /// as if the entries of `extra` were added to this mapping.
    pub fn remap_with<B: BlankAware + ?Sized>(
        &self,
        terms: &B,
        t: &ITriple,
        extra: &[(Idx, Idx)],
    ) -> Option<ITriple> {
        let mut ret = *t;
        for i in ret.iter_mut() {
            if terms.is_blank(*i) {
                *i = match extra.iter().find(|(x, _)| x == i) {
                    Some((_, y)) => *y,
                    None => self.get(*i)?,
                };
            }
        }
        Some(ret)
    }

    /// Whether every triple of `triples` remaps into `target`.
    pub fn maps_into<'a, B, I>(&self, terms: &B, triples: I, target: &TripleSet) -> bool
    where
        B: BlankAware + ?Sized,
        I: IntoIterator<Item = &'a ITriple>,
    {
        triples.into_iter().all(|t| {
            self.remap(terms, t)
                .map(|t2| target.contains(&t2))
                .unwrap_or(false)
        })
    }

    /// Check that this mapping turns `source` into `target`
    /// (or into a subset of `target` in [`Mode::SubGraph`]).
    pub fn validate<B: BlankAware + ?Sized>(
        &self,
        terms: &B,
        source: &TripleSet,
        target: &TripleSet,
        mode: Mode,
    ) -> bool {
        // remapping is injective on triples, so counting is enough
        // to ensure that every target triple is reached
        mode.count_compatible(source.len(), target.len()) && self.maps_into(terms, source, target)
    }
}
