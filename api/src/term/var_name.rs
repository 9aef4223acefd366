//! I define the [`VarName`] wrapper type,
//! which guarantees that the underlying `str`
//! satisfies the `VARNAME` rule in [SPARQL](https://www.w3.org/TR/sparql11-query/#rVARNAME).
use super::*;
use crate::wrap;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Borrow;
use thiserror::Error;

lazy_static! {
    /// SPARQL's VARNAME production, matching the whole input.
    ///
    /// `VARNAME ::= ( PN_CHARS_U | [0-9] ) ( PN_CHARS_U | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040] )*`
    static ref VARNAME: Regex = Regex::new(r"(?x)
      ^
      [_A-Za-z0-9\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{10000}-\U{EFFFF}]
      [_A-Za-z0-9\u{B7}\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{300}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{10000}-\U{EFFFF}]*
      $
    ").unwrap();
}

wrap! { VarName borrowing str :
    /// This wrapper guarantees that the underlying `str`
    /// satisfies the `VARNAME` rule in [SPARQL](https://www.w3.org/TR/sparql11-query/#rVARNAME).
    ///
    /// Variables are never mapped by the matcher: they compare by name, like IRIs.
    pub fn new(name: T) -> Result<Self, InvalidVarName> {
        if VARNAME.is_match(name.borrow()) {
            Ok(VarName(name))
        } else {
            Err(InvalidVarName(name.borrow().to_string()))
        }
    }
}

/// This error is raised when trying to parse an invalid variable name.
#[derive(Debug, Error)]
#[error("The given variable name '{0}' does not comply with SPARQL's VARNAME")]
pub struct InvalidVarName(pub String);

impl<T> Term for VarName<T>
where
    T: Borrow<str> + Debug,
{
    fn kind(&self) -> TermKind {
        TermKind::Variable
    }
    fn variable(&self) -> Option<VarName<&str>> {
        Some(self.as_ref())
    }
}
