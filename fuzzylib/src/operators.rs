//! Term combinators
//!
//! Each combinator takes its operands by value and wraps them in a new node.
//! Operands are never evaluated or mutated here.

use crate::FuzzyTerm;
use std::ops::{BitAnd, BitOr};

/// `a AND b`: minimum of both DOMs
pub fn and(a: FuzzyTerm, b: FuzzyTerm) -> FuzzyTerm {
    FuzzyTerm::And(Box::new(a), Box::new(b))
}

/// `a OR b`: maximum of both DOMs
pub fn or(a: FuzzyTerm, b: FuzzyTerm) -> FuzzyTerm {
    FuzzyTerm::Or(Box::new(a), Box::new(b))
}

/// `very term`: DOM squared
pub fn very(term: FuzzyTerm) -> FuzzyTerm {
    FuzzyTerm::Very(Box::new(term))
}

/// `fairly term`: square root of the DOM
pub fn fairly(term: FuzzyTerm) -> FuzzyTerm {
    FuzzyTerm::Fairly(Box::new(term))
}

/// AND of every term, left-nested. `None` when `terms` is empty.
pub fn all(terms: impl IntoIterator<Item = FuzzyTerm>) -> Option<FuzzyTerm> {
    terms.into_iter().reduce(and)
}

/// OR of every term, left-nested. `None` when `terms` is empty.
pub fn any(terms: impl IntoIterator<Item = FuzzyTerm>) -> Option<FuzzyTerm> {
    terms.into_iter().reduce(or)
}

impl FuzzyTerm {
    pub fn and(self, other: FuzzyTerm) -> FuzzyTerm {
        and(self, other)
    }

    pub fn or(self, other: FuzzyTerm) -> FuzzyTerm {
        or(self, other)
    }

    pub fn very(self) -> FuzzyTerm {
        very(self)
    }

    pub fn fairly(self) -> FuzzyTerm {
        fairly(self)
    }
}

impl BitAnd for FuzzyTerm {
    type Output = FuzzyTerm;

    fn bitand(self, rhs: FuzzyTerm) -> FuzzyTerm {
        and(self, rhs)
    }
}

impl BitOr for FuzzyTerm {
    type Output = FuzzyTerm;

    fn bitor(self, rhs: FuzzyTerm) -> FuzzyTerm {
        or(self, rhs)
    }
}
