use super::*;
use crate::term::matcher::TermMatcher;
use crate::term::{SimpleTerm, Term};
use crate::triple::Triple;
use std::collections::{BTreeSet, HashSet};
use std::convert::Infallible;
use std::hash::{BuildHasher, Hash};

//
// foreign implementations
//

// reference to Graph

impl<'a, G: Graph + ?Sized> Graph for &'a G {
    type Term = G::Term;
    type Error = G::Error;

    fn triples(&self) -> GTripleSource<'_, Self> {
        G::triples(*self)
    }

    fn triples_matching<'s, S, P, O>(&'s self, sm: S, pm: P, om: O) -> GTripleSource<'s, Self>
    where
        S: TermMatcher + 's,
        P: TermMatcher + 's,
        O: TermMatcher + 's,
    {
        G::triples_matching(*self, sm, pm, om)
    }

    fn contains<TS, TP, TO>(&self, s: &TS, p: &TP, o: &TO) -> GResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        G::contains(*self, s, p, o)
    }

    fn triple_count(&self) -> GResult<Self, usize> {
        G::triple_count(*self)
    }
}

// slice of triples

impl<T> Graph for [T]
where
    T: Triple,
{
    type Term = T::Term;
    type Error = Infallible;

    fn triples(&self) -> GTripleSource<'_, Self> {
        Box::new(self.iter().map(|t| Ok(t.spo())))
    }

    fn triple_count(&self) -> GResult<Self, usize> {
        Ok(self.len())
    }
}

// Vec of triples

impl<T> Graph for Vec<T>
where
    T: Triple,
{
    type Term = T::Term;
    type Error = Infallible;

    fn triples(&self) -> GTripleSource<'_, Self> {
        self[..].triples()
    }

    fn triple_count(&self) -> GResult<Self, usize> {
        Ok(self.len())
    }
}

/// A `Vec` is used as a set of triples:
/// inserting a triple that is already present is a no-op.
impl<T> MutableGraph for Vec<[T; 3]>
where
    T: Term + From<SimpleTerm>,
{
    type MutationError = Infallible;

    fn insert<TS, TP, TO>(&mut self, s: &TS, p: &TP, o: &TO) -> MGResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        if self.iter().any(|t| t.matched_by(&s, &p, &o)) {
            return Ok(false);
        }
        self.push(convert_triple(s, p, o));
        Ok(true)
    }

    fn remove<TS, TP, TO>(&mut self, s: &TS, p: &TP, o: &TO) -> MGResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        let before = self.len();
        self.retain(|t| !t.matched_by(&s, &p, &o));
        Ok(self.len() < before)
    }
}

impl<T> CollectibleGraph for Vec<[T; 3]> where T: Term + From<SimpleTerm> {}

// HashSet of triples

impl<T, BH> Graph for HashSet<T, BH>
where
    T: Eq + Hash + Triple,
    BH: BuildHasher,
{
    type Term = T::Term;
    type Error = Infallible;

    fn triples(&self) -> GTripleSource<'_, Self> {
        Box::new(self.iter().map(|t| Ok(t.spo())))
    }

    fn triple_count(&self) -> GResult<Self, usize> {
        Ok(self.len())
    }
}

impl<T, BH> MutableGraph for HashSet<[T; 3], BH>
where
    T: Eq + Hash + Term + From<SimpleTerm>,
    BH: BuildHasher,
{
    type MutationError = Infallible;

    fn insert<TS, TP, TO>(&mut self, s: &TS, p: &TP, o: &TO) -> MGResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        Ok(HashSet::insert(self, convert_triple(s, p, o)))
    }

    fn remove<TS, TP, TO>(&mut self, s: &TS, p: &TP, o: &TO) -> MGResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        let triple: [T; 3] = convert_triple(s, p, o);
        Ok(HashSet::remove(self, &triple))
    }
}

impl<T, BH> CollectibleGraph for HashSet<[T; 3], BH>
where
    T: Eq + Hash + Term + From<SimpleTerm>,
    BH: BuildHasher + Default,
{
}

// BTreeSet of triples

impl<T> Graph for BTreeSet<T>
where
    T: Ord + Triple,
{
    type Term = T::Term;
    type Error = Infallible;

    fn triples(&self) -> GTripleSource<'_, Self> {
        Box::new(self.iter().map(|t| Ok(t.spo())))
    }

    fn triple_count(&self) -> GResult<Self, usize> {
        Ok(self.len())
    }
}

impl<T> MutableGraph for BTreeSet<[T; 3]>
where
    T: Ord + Term + From<SimpleTerm>,
{
    type MutationError = Infallible;

    fn insert<TS, TP, TO>(&mut self, s: &TS, p: &TP, o: &TO) -> MGResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        Ok(BTreeSet::insert(self, convert_triple(s, p, o)))
    }

    fn remove<TS, TP, TO>(&mut self, s: &TS, p: &TP, o: &TO) -> MGResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        let triple: [T; 3] = convert_triple(s, p, o);
        Ok(BTreeSet::remove(self, &triple))
    }
}

impl<T> CollectibleGraph for BTreeSet<[T; 3]> where T: Ord + Term + From<SimpleTerm> {}

fn convert_triple<T, TS, TP, TO>(s: &TS, p: &TP, o: &TO) -> [T; 3]
where
    T: From<SimpleTerm>,
    TS: Term + ?Sized,
    TP: Term + ?Sized,
    TO: Term + ?Sized,
{
    [s.as_simple().into(), p.as_simple().into(), o.as_simple().into()]
}
