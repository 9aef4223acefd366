//! I define the [`IriRef`] wrapper type,
//! which guarantees that the underlying `str`
//! is syntactically usable as an IRI reference in RDF concrete syntaxes.
use super::*;
use crate::wrap;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Borrow;
use thiserror::Error;

lazy_static! {
    /// Characters allowed in an `IRIREF` production of N-Triples / Turtle
    /// (before resolution and without the enclosing `<` `>`).
    ///
    /// This is a purely lexical check:
    /// it does not verify the structure of the IRI (scheme, authority...).
    static ref IRIREF: Regex = Regex::new(r#"^[^\x00-\x20<>"{}|^`\\]*$"#).unwrap();
}

wrap! { IriRef borrowing str :
    /// This wrapper guarantees that the underlying `str`
    /// contains no character forbidden in an
    /// [`IRIREF`](https://www.w3.org/TR/n-triples/#grammar-production-IRIREF).
    ///
    /// Absolute and relative IRI references are both accepted.
    pub fn new(iri: T) -> Result<Self, InvalidIri> {
        if IRIREF.is_match(iri.borrow()) {
            Ok(IriRef(iri))
        } else {
            Err(InvalidIri(iri.borrow().to_string()))
        }
    }

    /// Whether this IRI reference has a scheme, i.e. is absolute.
    pub fn is_absolute(&self) -> bool {
        let txt = self.as_str();
        match txt.find(':') {
            Some(0) | None => false,
            Some(i) => {
                let scheme = &txt[..i];
                scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
            }
        }
    }
}

/// This error is raised when trying to parse an invalid IRI reference.
#[derive(Debug, Error)]
#[error("The given IRI reference '{0}' contains forbidden characters")]
pub struct InvalidIri(pub String);

impl<T> Term for IriRef<T>
where
    T: Borrow<str> + Debug,
{
    fn kind(&self) -> TermKind {
        TermKind::Iri
    }
    fn iri(&self) -> Option<IriRef<&str>> {
        Some(self.as_ref())
    }
}
