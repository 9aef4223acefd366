//! General-use types and traits from the rdfeq API.

pub use crate::graph::{CollectibleGraph, Graph, MutableGraph};
pub use crate::term::{
    matcher::{Any, TermMatcher},
    term_eq, BnodeId, IriRef, SimpleTerm, Term, TermKind,
};
pub use crate::triple::Triple;
