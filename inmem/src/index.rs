//! A [`TermIndex`] is a bidirectional association of [terms](`Term`) with short numeric [indices](`Index`).
use rdfeq_api::term::{SimpleTerm, Term};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::error::Error;
use std::hash::Hash;
use thiserror::Error;

/// Abstraction of the short numeric indices representing [terms](`Term`) in a [`TermIndex`].
pub trait Index: Copy + std::fmt::Debug + Ord + Hash {
    /// The smallest index
    const ZERO: Self;
    /// The greatest index
    const MAX: Self;
    /// Convert a `usize` into an index, if it fits.
    fn try_from_usize(other: usize) -> Option<Self>;
    /// Convert this index into a `usize`.
    fn into_usize(self) -> usize;
}

impl Index for usize {
    const ZERO: Self = 0;
    const MAX: Self = usize::MAX;
    fn try_from_usize(other: usize) -> Option<Self> {
        Some(other)
    }
    fn into_usize(self) -> usize {
        self
    }
}

impl Index for u32 {
    const ZERO: Self = 0;
    const MAX: Self = u32::MAX;
    fn try_from_usize(other: usize) -> Option<Self> {
        other.try_into().ok()
    }
    fn into_usize(self) -> usize {
        self as usize
    }
}

impl Index for u16 {
    const ZERO: Self = 0;
    const MAX: Self = u16::MAX;
    fn try_from_usize(other: usize) -> Option<Self> {
        other.try_into().ok()
    }
    fn into_usize(self) -> usize {
        self as usize
    }
}

//

/// A [`TermIndex`] is a bidirectional association of [terms](`Term`) with short numeric [indices](`Index`).
pub trait TermIndex {
    /// The type of indices used by this term-index
    type Index: Index;
    /// The error raised when a term can not be added to this term-index
    type Error: Error + Send + Sync + 'static;

    /// Get the index corresponding to term `t`, if it exists.
    ///
    /// Return `None` if this term-index does not contain a term equivalent to `t`.
    fn get_index<T: Term + ?Sized>(&self, t: &T) -> Option<Self::Index>;
    /// Get the index corresponding to term `t`, adding it in the term-index if necessary.
    ///
    /// Returns an error if `t` can not be added in this term-index
    /// (typically because all indices are already in use).
    fn ensure_index<T: Term + ?Sized>(&mut self, t: &T) -> Result<Self::Index, Self::Error>;
    /// Get the term corresponding to index `i`.
    ///
    /// # Precondition
    /// `i` must have been returned previously by [`get_index`](TermIndex::get_index) or (`ensure_index`)(TermIndex::ensure_index),
    /// otherwise this method may panic.
    fn get_term(&self, i: Self::Index) -> &SimpleTerm;
}

/// A generic implementation of [`TermIndex`].
///
/// Indices are assigned densely, in insertion order, starting from [`Index::ZERO`].
#[derive(Clone, Debug)]
pub struct SimpleTermIndex<I: Index> {
    t2i: HashMap<SimpleTerm, I>,
    i2t: Vec<SimpleTerm>,
}

impl<I: Index> SimpleTermIndex<I> {
    /// Build an empty term-index.
    pub fn new() -> Self {
        SimpleTermIndex {
            t2i: HashMap::new(),
            i2t: vec![],
        }
    }

    /// The number of terms in this term-index.
    pub fn len(&self) -> usize {
        self.i2t.len()
    }

    /// Whether this term-index is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all the terms of this term-index, with their index, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &SimpleTerm)> + '_ {
        self.i2t.iter().enumerate().filter_map(|(i, t)| Some((I::try_from_usize(i)?, t)))
    }
}

impl<I: Index> Default for SimpleTermIndex<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Index> TermIndex for SimpleTermIndex<I> {
    type Index = I;
    type Error = TermIndexFullError;

    fn get_index<T: Term + ?Sized>(&self, t: &T) -> Option<Self::Index> {
        self.t2i.get(&t.as_simple()).copied()
    }

    fn ensure_index<T: Term + ?Sized>(&mut self, t: &T) -> Result<Self::Index, Self::Error> {
        match self.t2i.entry(t.as_simple()) {
            Entry::Vacant(e) => {
                let i = I::try_from_usize(self.i2t.len())
                    .ok_or_else(|| TermIndexFullError(I::MAX.into_usize()))?;
                self.i2t.push(e.key().clone());
                e.insert(i);
                Ok(i)
            }
            Entry::Occupied(e) => Ok(*e.get()),
        }
    }

    fn get_term(&self, i: Self::Index) -> &SimpleTerm {
        &self.i2t[i.into_usize()]
    }
}

/// This error is raised when a [`TermIndex`] has no more index available for a new term.
#[derive(Clone, Copy, Debug, Error)]
#[error("This term index can not contain more than {0} terms")]
pub struct TermIndexFullError(pub usize);
