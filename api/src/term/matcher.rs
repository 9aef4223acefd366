//! I define generic traits and default implementations for *matchers*,
//! objects that can be used to match zero, one or several terms.
//!
//! For methods using matchers, see for example
//! [`Triple::matched_by`](crate::triple::Triple::matched_by) and
//! [`Graph::triples_matching`](crate::graph::Graph::triples_matching).

use super::*;

/// Generic trait for matching [`Term`]s.
pub trait TermMatcher {
    /// The type of term that this TermMatcher contains
    type Term: Term + ?Sized;

    /// Check whether this matcher matches `t`.
    fn matches<T2: Term + ?Sized>(&self, term: &T2) -> bool;

    /// Return `None`, unless this matcher can only match a single term,
    /// in which case this method may return that term.
    ///
    /// This method is provided for optimization purposes,
    /// so implementing it is optional.
    fn constant(&self) -> Option<&Self::Term> {
        None
    }
}

#[derive(Clone, Copy, Debug)]
/// A universal matcher: it matches any [`Term`].
pub struct Any;

impl TermMatcher for Any {
    type Term = SimpleTerm; // not actually used

    fn matches<T2: Term + ?Sized>(&self, _: &T2) -> bool {
        true
    }
}

/// Matches exactly the given term.
impl<T> TermMatcher for &T
where
    T: Term + ?Sized,
{
    type Term = T;

    fn matches<T2: Term + ?Sized>(&self, term: &T2) -> bool {
        term_eq(*self, term)
    }
    fn constant(&self) -> Option<&Self::Term> {
        Some(*self)
    }
}

/// Matches the wrapped term if any, otherwise matches nothing.
impl<T> TermMatcher for Option<T>
where
    T: Term,
{
    type Term = T;

    fn matches<T2: Term + ?Sized>(&self, term: &T2) -> bool {
        match self {
            Some(mine) => term_eq(mine, term),
            None => false,
        }
    }
    fn constant(&self) -> Option<&Self::Term> {
        self.as_ref()
    }
}

/// Matches any of the terms in the array.
impl<T, const N: usize> TermMatcher for [T; N]
where
    T: Term,
{
    type Term = T;

    fn matches<T2: Term + ?Sized>(&self, term: &T2) -> bool {
        self.iter().any(|mine| term_eq(mine, term))
    }
    fn constant(&self) -> Option<&Self::Term> {
        if N == 1 {
            Some(&self[0])
        } else {
            None
        }
    }
}

/// Matches any term of the given kind
impl TermMatcher for TermKind {
    type Term = SimpleTerm; // not actually used

    fn matches<T2: Term + ?Sized>(&self, term: &T2) -> bool {
        term.kind() == *self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const T1: IriRef<&str> = IriRef::new_unchecked_const("tag:t1");
    const T2: IriRef<&str> = IriRef::new_unchecked_const("tag:t2");
    const T3: IriRef<&str> = IriRef::new_unchecked_const("tag:t3");

    #[test]
    fn any() {
        assert!(Any.matches(&T1));
        assert!(Any.matches("a literal"));
        assert!(Any.constant().is_none());
    }

    #[test]
    fn reference() {
        let m = &T1;
        assert!(m.matches(&T1));
        assert!(m.matches(&SimpleTerm::iri_unchecked("tag:t1")));
        assert!(!m.matches(&T2));
        assert!(term_eq(m.constant().unwrap(), &T1));
    }

    #[test]
    fn option() {
        let none: Option<IriRef<&str>> = None;
        assert!(!none.matches(&T1));
        assert!(!none.matches(&T2));
        assert_eq!(none.constant(), None);

        let some = Some(T1);
        assert!(some.matches(&T1));
        assert!(!some.matches(&T2));
        assert_eq!(some.constant(), Some(&T1));
    }

    #[test]
    fn array() {
        let empty: [IriRef<&str>; 0] = [];
        assert!(!empty.matches(&T1));
        assert_eq!(empty.constant(), None);

        let single = [T1];
        assert!(single.matches(&T1));
        assert!(!single.matches(&T2));
        assert_eq!(single.constant(), Some(&T1));

        let several = [T1, T2];
        assert!(several.matches(&T1));
        assert!(several.matches(&T2));
        assert!(!several.matches(&T3));
        assert_eq!(several.constant(), None);
    }

    #[test]
    fn term_kind() {
        assert!(TermKind::Iri.matches(&T1));
        assert!(!TermKind::BlankNode.matches(&T1));
        assert!(TermKind::BlankNode.matches(&BnodeId::new_unchecked("b")));
        assert!(TermKind::Literal.matches("x"));
        assert!(TermKind::Iri.constant().is_none());
    }
}
