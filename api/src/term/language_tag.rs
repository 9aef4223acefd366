//! I define the [`LanguageTag`] wrapper type,
//! which guarantees that the underlying `str`
//! has the shape of a [BCP47](https://tools.ietf.org/search/bcp47) language tag.
use crate::wrap;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// The `LANGTAG` production of N-Triples / Turtle (without the leading `@`).
    ///
    /// NB: it is more permissive than BCP47,
    /// as it does not check that subtags are registered codes.
    static ref LANG_TAG: Regex = Regex::new(r"^[A-Za-z]{1,8}(-[A-Za-z0-9]{1,8})*$").unwrap();
}

wrap! { LanguageTag borrowing str :
    /// This wrapper guarantees that the underlying `str`
    /// has the shape of a [BCP47](https://tools.ietf.org/search/bcp47) language tag.
    ///
    /// Language tags are compared as given;
    /// use [`LanguageTag::to_lowercase`] to normalize them beforehand if needed.
    pub fn new(tag: T) -> Result<Self, InvalidLanguageTag> {
        if LANG_TAG.is_match(tag.borrow()) {
            Ok(LanguageTag(tag))
        } else {
            Err(InvalidLanguageTag(tag.borrow().to_string()))
        }
    }

    /// Return a lowercased copy of this language tag.
    pub fn to_lowercase(&self) -> LanguageTag<String> {
        LanguageTag(self.as_str().to_ascii_lowercase())
    }
}

/// This error is raised when trying to parse an invalid language tag.
#[derive(Debug, Error)]
#[error("The given language tag '{0}' does not comply with BCP47")]
pub struct InvalidLanguageTag(pub String);
