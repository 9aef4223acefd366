//! I define how RDF terms
//! (such as [IRIs](https://www.w3.org/TR/rdf11-concepts/#section-IRIs),
//! [blank nodes](https://www.w3.org/TR/rdf11-concepts/#section-blank-nodes)
//! and [literals](https://www.w3.org/TR/rdf11-concepts/#section-Graph-Literal))
//! are represented in rdfeq.
//!
//! I provide the main trait [`Term`],
//! the free functions [`term_eq`] and [`term_hash`] comparing terms of different types,
//! and the owned implementation [`SimpleTerm`].
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

mod _simple;
pub use _simple::*;
mod _wrap_macro;

pub mod bnode_id;
pub mod iri_ref;
pub mod language_tag;
pub mod matcher;
pub mod var_name;

pub use bnode_id::{BnodeId, InvalidBnodeId};
pub use iri_ref::{InvalidIri, IriRef};
pub use language_tag::{InvalidLanguageTag, LanguageTag};
pub use var_name::{InvalidVarName, VarName};

/// The different kinds of terms that a [`Term`] can represent.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum TermKind {
    /// An [RDF IRI](https://www.w3.org/TR/rdf11-concepts/#section-IRIs)
    Iri,
    /// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#section-Graph-Literal)
    Literal,
    /// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#section-blank-nodes)
    BlankNode,
    /// A SPARQL or Notation3 variable
    Variable,
}

/// A [generalized] RDF term.
///
/// # Implementation
///
/// The only method without a default implementation is [`kind`](Term::kind),
/// which indicates what kind of RDF term a given [`Term`] represents.
///
/// While all accessors have a default implementation (returning `None`),
/// those corresponding to the kind returned by [`kind`](Term::kind) MUST be overridden,
/// otherwise they will panic.
///
/// [generalized]: https://www.w3.org/TR/rdf11-concepts/#section-generalized-rdf
pub trait Term: Debug {
    /// Return the kind of RDF term that this [`Term`] represents.
    fn kind(&self) -> TermKind;

    /// Return true if this [`Term`] is an IRI,
    /// i.e. if [`kind`](Term::kind) returns [`TermKind::Iri`].
    #[inline]
    fn is_iri(&self) -> bool {
        self.kind() == TermKind::Iri
    }

    /// Return true if this [`Term`] is a blank node,
    /// i.e. if [`kind`](Term::kind) returns [`TermKind::BlankNode`].
    #[inline]
    fn is_blank_node(&self) -> bool {
        self.kind() == TermKind::BlankNode
    }

    /// Return true if this [`Term`] is a literal,
    /// i.e. if [`kind`](Term::kind) returns [`TermKind::Literal`].
    #[inline]
    fn is_literal(&self) -> bool {
        self.kind() == TermKind::Literal
    }

    /// Return true if this [`Term`] is a variable,
    /// i.e. if [`kind`](Term::kind) returns [`TermKind::Variable`].
    #[inline]
    fn is_variable(&self) -> bool {
        self.kind() == TermKind::Variable
    }

    /// If [`kind`](Term::kind) returns [`TermKind::Iri`],
    /// return this IRI.
    /// Otherwise return `None`.
    ///
    /// # Note to implementors
    /// The default implementation assumes that [`Term::is_iri`] always return false.
    /// If that is not the case, this method must be explicitly implemented.
    #[inline]
    fn iri(&self) -> Option<IriRef<&str>> {
        self.is_iri()
            .then(|| unimplemented!("Default implementation should have been overridden"))
    }

    /// If [`kind`](Term::kind) returns [`TermKind::BlankNode`],
    /// return the locally unique label of this blank node.
    /// Otherwise return `None`.
    ///
    /// # Note to implementors
    /// The default implementation assumes that [`Term::is_blank_node`] always return false.
    /// If that is not the case, this method must be explicitly implemented.
    #[inline]
    fn bnode_id(&self) -> Option<BnodeId<&str>> {
        self.is_blank_node()
            .then(|| unimplemented!("Default implementation should have been overridden"))
    }

    /// If [`kind`](Term::kind) returns [`TermKind::Literal`],
    /// return the lexical form of this literal.
    /// Otherwise return `None`.
    ///
    /// # Note to implementors
    /// The default implementation assumes that [`Term::is_literal`] always return false.
    /// If that is not the case, this method must be explicitly implemented.
    #[inline]
    fn lexical_form(&self) -> Option<&str> {
        self.is_literal()
            .then(|| unimplemented!("Default implementation should have been overridden"))
    }

    /// If [`kind`](Term::kind) returns [`TermKind::Literal`],
    /// return the datatype IRI of this literal.
    /// Otherwise return `None`.
    ///
    /// NB: language-tagged strings have the datatype `rdf:langString`.
    ///
    /// # Note to implementors
    /// The default implementation assumes that [`Term::is_literal`] always return false.
    /// If that is not the case, this method must be explicitly implemented.
    #[inline]
    fn datatype(&self) -> Option<IriRef<&str>> {
        self.is_literal()
            .then(|| unimplemented!("Default implementation should have been overridden"))
    }

    /// If [`kind`](Term::kind) returns [`TermKind::Literal`],
    /// and if this literal is a language-tagged string,
    /// return its language tag.
    /// Otherwise return `None`.
    ///
    /// # Note to implementors
    /// The default implementation assumes that [`Term::is_literal`] always return false.
    /// If that is not the case, this method must be explicitly implemented.
    #[inline]
    fn language_tag(&self) -> Option<LanguageTag<&str>> {
        self.is_literal()
            .then(|| unimplemented!("Default implementation should have been overridden"))
    }

    /// If [`kind`](Term::kind) returns [`TermKind::Variable`],
    /// return the name of this variable.
    /// Otherwise return `None`.
    ///
    /// # Note to implementors
    /// The default implementation assumes that [`Term::is_variable`] always return false.
    /// If that is not the case, this method must be explicitly implemented.
    #[inline]
    fn variable(&self) -> Option<VarName<&str>> {
        self.is_variable()
            .then(|| unimplemented!("Default implementation should have been overridden"))
    }

    /// Copy this term into a [`SimpleTerm`].
    fn as_simple(&self) -> SimpleTerm {
        SimpleTerm::from_term(self)
    }
}

impl<T: Term + ?Sized> Term for &T {
    fn kind(&self) -> TermKind {
        (*self).kind()
    }
    fn is_iri(&self) -> bool {
        (*self).is_iri()
    }
    fn is_blank_node(&self) -> bool {
        (*self).is_blank_node()
    }
    fn is_literal(&self) -> bool {
        (*self).is_literal()
    }
    fn is_variable(&self) -> bool {
        (*self).is_variable()
    }
    fn iri(&self) -> Option<IriRef<&str>> {
        (*self).iri()
    }
    fn bnode_id(&self) -> Option<BnodeId<&str>> {
        (*self).bnode_id()
    }
    fn lexical_form(&self) -> Option<&str> {
        (*self).lexical_form()
    }
    fn datatype(&self) -> Option<IriRef<&str>> {
        (*self).datatype()
    }
    fn language_tag(&self) -> Option<LanguageTag<&str>> {
        (*self).language_tag()
    }
    fn variable(&self) -> Option<VarName<&str>> {
        (*self).variable()
    }
}

/// A `str` is interpreted as a simple literal (of datatype `xsd:string`).
impl Term for str {
    fn kind(&self) -> TermKind {
        TermKind::Literal
    }
    fn lexical_form(&self) -> Option<&str> {
        Some(self)
    }
    fn datatype(&self) -> Option<IriRef<&str>> {
        Some(XSD_STRING)
    }
    fn language_tag(&self) -> Option<LanguageTag<&str>> {
        None
    }
}

/// Check whether two terms, possibly of different types, represent the same RDF term.
pub fn term_eq<T1, T2>(t1: &T1, t2: &T2) -> bool
where
    T1: Term + ?Sized,
    T2: Term + ?Sized,
{
    let k1 = t1.kind();
    if k1 != t2.kind() {
        return false;
    }
    match k1 {
        TermKind::Iri => t1.iri() == t2.iri(),
        TermKind::BlankNode => t1.bnode_id() == t2.bnode_id(),
        TermKind::Literal => {
            t1.lexical_form() == t2.lexical_form()
                && t1.datatype() == t2.datatype()
                && t1.language_tag() == t2.language_tag()
        }
        TermKind::Variable => t1.variable() == t2.variable(),
    }
}

/// Hash a term, consistently with [`term_eq`].
pub fn term_hash<T, H>(t: &T, state: &mut H)
where
    T: Term + ?Sized,
    H: Hasher,
{
    let k = t.kind();
    k.hash(state);
    match k {
        TermKind::Iri => t.iri().hash(state),
        TermKind::BlankNode => t.bnode_id().hash(state),
        TermKind::Literal => {
            t.lexical_form().hash(state);
            t.datatype().hash(state);
            t.language_tag().hash(state);
        }
        TermKind::Variable => t.variable().hash(state),
    }
}
