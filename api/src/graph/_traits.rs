// this module is transparently re-exported by its parent `graph`

use std::collections::BTreeSet;
use std::error::Error;

use resiter::Filter;

use crate::term::matcher::TermMatcher;
use crate::term::{SimpleTerm, Term};
use crate::triple::Triple;

/// Type alias for the terms returned by a graph.
pub type GTerm<G> = <G as Graph>::Term;
/// Type alias for the triples returned by a graph.
pub type GTriple<'a, G> = [&'a GTerm<G>; 3];
/// Type alias for results produced by a graph.
pub type GResult<G, T> = Result<T, <G as Graph>::Error>;
/// Type alias for fallible triple iterators produced by a graph.
///
/// See [`Graph::triples`] for more information about how to use it.
pub type GTripleSource<'a, G> = Box<dyn Iterator<Item = GResult<G, GTriple<'a, G>>> + 'a>;
/// Type alias for results produced by a mutable graph.
pub type MGResult<G, T> = Result<T, <G as MutableGraph>::MutationError>;

/// Generic trait for RDF graphs.
///
/// For convenience, this trait is implemented
/// by [standard collections of triples](#foreign-impls).
///
/// Graphs are considered as *sets* of triples:
/// implementations are expected not to yield the same triple twice.
pub trait Graph {
    /// The type of [`Term`] contained by the triples of this graph.
    type Term: Term;
    /// The error type that this graph may raise.
    type Error: Error + Send + Sync + 'static;

    /// An iterator visiting all triples of this graph in arbitrary order.
    ///
    /// This iterator is fallible:
    /// its items are `Result`s,
    /// an error may occur at any time during the iteration.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rdfeq_api::graph::Graph;
    /// # use rdfeq_api::term::SimpleTerm;
    /// # fn foo() -> Result<(), std::convert::Infallible> {
    /// # let graph = Vec::<[SimpleTerm; 3]>::new();
    /// for t in graph.triples() {
    ///     let t = t?; // rethrow error if any
    ///     // do something with t
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn triples(&self) -> GTripleSource<'_, Self>;

    /// An iterator visiting all triples matching the given subject, predicate and object.
    ///
    /// Each parameter is a [`TermMatcher`]:
    /// a reference to a term, [`Any`](crate::term::matcher::Any),
    /// a [`TermKind`](crate::term::TermKind)...
    ///
    /// The default implementation filters [`triples`](Graph::triples);
    /// indexed implementations should override it.
    fn triples_matching<'s, S, P, O>(&'s self, sm: S, pm: P, om: O) -> GTripleSource<'s, Self>
    where
        S: TermMatcher + 's,
        P: TermMatcher + 's,
        O: TermMatcher + 's,
    {
        Box::new(
            self.triples()
                .filter_ok(move |t| t.matched_by(&sm, &pm, &om)),
        )
    }

    /// Return `true` if this graph contains the given triple.
    fn contains<TS, TP, TO>(&self, s: &TS, p: &TP, o: &TO) -> GResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized,
    {
        match self.triples_matching(s, p, o).next() {
            None => Ok(false),
            Some(Ok(_)) => Ok(true),
            Some(Err(e)) => Err(e),
        }
    }

    /// The number of triples in this graph.
    ///
    /// The default implementation consumes [`triples`](Graph::triples).
    fn triple_count(&self) -> GResult<Self, usize> {
        let mut n = 0;
        for t in self.triples() {
            t?;
            n += 1;
        }
        Ok(n)
    }

    /// The set of blank nodes occurring in this graph, in any position.
    fn blank_nodes(&self) -> GResult<Self, BTreeSet<SimpleTerm>> {
        let mut res = BTreeSet::new();
        for t in self.triples() {
            for c in t?.spo() {
                if c.is_blank_node() {
                    res.insert(c.as_simple());
                }
            }
        }
        Ok(res)
    }
}

/// Generic trait for mutable RDF graphs.
pub trait MutableGraph: Graph {
    /// The error type that this graph may raise during mutations.
    type MutationError: Error + Send + Sync + 'static;

    /// Insert the given triple in this graph.
    ///
    /// Return `true` iff the triple was actually inserted
    /// (i.e. it was not already present).
    fn insert<TS, TP, TO>(&mut self, s: &TS, p: &TP, o: &TO) -> MGResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized;

    /// Remove the given triple from this graph.
    ///
    /// Return `true` iff the triple was actually removed
    /// (i.e. it was present).
    fn remove<TS, TP, TO>(&mut self, s: &TS, p: &TP, o: &TO) -> MGResult<Self, bool>
    where
        TS: Term + ?Sized,
        TP: Term + ?Sized,
        TO: Term + ?Sized;

    /// Insert the given triple in this graph.
    fn insert_triple<T: Triple>(&mut self, triple: T) -> MGResult<Self, bool> {
        let [s, p, o] = triple.spo();
        self.insert(s, p, o)
    }

    /// Insert all the given triples in this graph,
    /// and return the number of triples actually inserted.
    fn insert_all<I, T>(&mut self, triples: I) -> MGResult<Self, usize>
    where
        I: IntoIterator<Item = T>,
        T: Triple,
    {
        let mut n = 0;
        for t in triples {
            if self.insert_triple(t)? {
                n += 1;
            }
        }
        Ok(n)
    }

    /// Remove all the given triples from this graph,
    /// and return the number of triples actually removed.
    fn remove_all<I, T>(&mut self, triples: I) -> MGResult<Self, usize>
    where
        I: IntoIterator<Item = T>,
        T: Triple,
    {
        let mut n = 0;
        for t in triples {
            let [s, p, o] = t.spo();
            if self.remove(s, p, o)? {
                n += 1;
            }
        }
        Ok(n)
    }
}

/// A graph that can be built from a collection of triples.
///
/// [`from_triples`](CollectibleGraph::from_triples) has a default implementation,
/// so implementors usually only need an empty `impl` block.
pub trait CollectibleGraph: MutableGraph + Default {
    /// Build a graph containing the given triples.
    fn from_triples<I, T>(triples: I) -> MGResult<Self, Self>
    where
        I: IntoIterator<Item = T>,
        T: Triple,
    {
        let mut g = Self::default();
        g.insert_all(triples)?;
        Ok(g)
    }
}
