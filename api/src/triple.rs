//! An RDF triple expresses a single fact.
//! Its formed of three terms called *subject*, *predicate* and *object*.
//!
//! You can think of a triple as a sentence of the form
//! "subject verb complement"
//! (although the *predicate* is often better expressed as a relationship than a verb).
//! Examples :
//!
//! * John is a person.
//! * John was born in Paris.
//! * John knows Jane.
//! * John's family name is "Doe".
//!
use crate::term::matcher::TermMatcher;
use crate::term::{term_eq, SimpleTerm, Term};

/// This trait represents an abstract RDF triple,
/// and provide convenient methods for working with triples.
pub trait Triple {
    /// The type of [`Term`] contained by this triple
    type Term: Term;

    /// The subject of this triple.
    fn s(&self) -> &Self::Term;
    /// The predicate of this triple.
    fn p(&self) -> &Self::Term;
    /// The object of this triple.
    fn o(&self) -> &Self::Term;

    /// The three components of this triple, as an array.
    fn spo(&self) -> [&Self::Term; 3] {
        [self.s(), self.p(), self.o()]
    }

    /// Whether none of the components of this triple is a blank node.
    fn is_ground(&self) -> bool {
        !(self.s().is_blank_node() || self.p().is_blank_node() || self.o().is_blank_node())
    }

    /// Whether all the components of this triple are blank nodes.
    fn is_fully_blank(&self) -> bool {
        self.s().is_blank_node() && self.p().is_blank_node() && self.o().is_blank_node()
    }

    /// Whether `t` is one of the components of this triple.
    fn involves<T: Term + ?Sized>(&self, t: &T) -> bool {
        self.spo().into_iter().any(|c| term_eq(c, t))
    }

    /// Check whether each component of this triple
    /// is matched by the corresponding matcher.
    fn matched_by<S, P, O>(&self, sm: &S, pm: &P, om: &O) -> bool
    where
        S: TermMatcher + ?Sized,
        P: TermMatcher + ?Sized,
        O: TermMatcher + ?Sized,
    {
        sm.matches(self.s()) && pm.matches(self.p()) && om.matches(self.o())
    }

    /// Copy this triple into an array of [`SimpleTerm`]s.
    fn to_simple(&self) -> [SimpleTerm; 3] {
        self.spo().map(Term::as_simple)
    }
}

impl<T> Triple for [T; 3]
where
    T: Term,
{
    type Term = T;
    #[inline]
    fn s(&self) -> &Self::Term {
        &self[0]
    }
    #[inline]
    fn p(&self) -> &Self::Term {
        &self[1]
    }
    #[inline]
    fn o(&self) -> &Self::Term {
        &self[2]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::term::matcher::Any;
    use crate::term::{BnodeId, IriRef, TermKind};

    const S: IriRef<&str> = IriRef::new_unchecked_const("tag:s");
    const P: IriRef<&str> = IriRef::new_unchecked_const("tag:p");
    const B: BnodeId<&str> = BnodeId::new_unchecked_const("b");

    #[test]
    fn ground_and_fully_blank() {
        let ground = [S, P, S].map(|t| t.as_simple());
        let one_blank = [B.as_simple(), P.as_simple(), S.as_simple()];
        let all_blank = [B, B, B];
        assert!(ground.is_ground());
        assert!(!ground.is_fully_blank());
        assert!(!one_blank.is_ground());
        assert!(!one_blank.is_fully_blank());
        assert!(!all_blank.is_ground());
        assert!(all_blank.is_fully_blank());
    }

    #[test]
    fn involves() {
        let t = [B.as_simple(), P.as_simple(), S.as_simple()];
        assert!(t.involves(&B));
        assert!(t.involves(&S));
        assert!(!t.involves(&BnodeId::new_unchecked("c")));
    }

    #[test]
    fn matched_by() {
        let t = [B.as_simple(), P.as_simple(), S.as_simple()];
        assert!(t.matched_by(&Any, &Any, &Any));
        assert!(t.matched_by(&TermKind::BlankNode, &&P, &Any));
        assert!(!t.matched_by(&Any, &&S, &Any));
        assert!(t.matched_by(&Any, &[S, P], &Some(S)));
    }

    #[test]
    fn triple_of_references() {
        let s = S.as_simple();
        let p = P.as_simple();
        let t = [&s, &p, &s];
        assert!(t.is_ground());
        assert_eq!(t.to_simple(), [s.clone(), p.clone(), s.clone()]);
    }
}
