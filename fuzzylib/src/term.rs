//! Fuzzy terms
//!
//! A `FuzzyTerm` is either a leaf naming one canonical fuzzy set or an
//! operator node owning its operands. Every node answers the same three
//! operations: `degree_of_membership`, `clear_dom` and `merge_dom`.
//!
//! Leaves are handles (`SetId`), not copies of a set: the DOM of a set lives
//! in exactly one place, its `FuzzyVariable`. Cloning a term copies the tree
//! structure; a cloned leaf still names the same canonical set.

use crate::variable::FuzzyVariable;
use crate::FuzzySet;
use serde::Serialize;
use std::fmt;

/// Handle of a variable registered in a `FuzzyModule`.
///
/// Carries the identity of the module that issued it; clones of that module
/// share the identity, so a handle stays valid in every clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VariableId {
    pub(crate) module: u64,
    pub(crate) index: usize,
}

impl VariableId {
    pub fn index(self) -> usize {
        self.index
    }
}

/// Handle of one fuzzy set: its variable plus its position in that variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SetId {
    pub(crate) variable: VariableId,
    pub(crate) index: usize,
}

impl SetId {
    pub fn variable(self) -> VariableId {
        self.variable
    }

    pub fn index(self) -> usize {
        self.index
    }

    fn resolve(self, variables: &[FuzzyVariable]) -> Option<&FuzzySet> {
        variables.get(self.variable.index)?.set_at(self.index)
    }

    fn resolve_mut(self, variables: &mut [FuzzyVariable]) -> Option<&mut FuzzySet> {
        variables.get_mut(self.variable.index)?.set_at_mut(self.index)
    }
}

/// Composite fuzzy term
#[derive(Debug, Clone, PartialEq)]
pub enum FuzzyTerm {
    /// Leaf: a canonical fuzzy set
    Set(SetId),
    /// Minimum of both operands
    And(Box<FuzzyTerm>, Box<FuzzyTerm>),
    /// Maximum of both operands
    Or(Box<FuzzyTerm>, Box<FuzzyTerm>),
    /// Square of the operand (concentration)
    Very(Box<FuzzyTerm>),
    /// Square root of the operand (dilation)
    Fairly(Box<FuzzyTerm>),
}

impl FuzzyTerm {
    /// Degree of membership of this term, computed bottom-up.
    ///
    /// A leaf whose handle does not resolve counts as zero.
    pub fn degree_of_membership(&self, variables: &[FuzzyVariable]) -> f64 {
        match self {
            FuzzyTerm::Set(id) => id.resolve(variables).map_or(0.0, FuzzySet::dom),
            FuzzyTerm::And(a, b) => a
                .degree_of_membership(variables)
                .min(b.degree_of_membership(variables)),
            FuzzyTerm::Or(a, b) => a
                .degree_of_membership(variables)
                .max(b.degree_of_membership(variables)),
            FuzzyTerm::Very(term) => term.degree_of_membership(variables).powi(2),
            FuzzyTerm::Fairly(term) => term.degree_of_membership(variables).sqrt(),
        }
    }

    /// Clear the DOM of every set reachable from this node
    pub fn clear_dom(&self, variables: &mut [FuzzyVariable]) {
        match self {
            FuzzyTerm::Set(id) => {
                if let Some(set) = id.resolve_mut(variables) {
                    set.clear_dom();
                }
            }
            FuzzyTerm::And(a, b) | FuzzyTerm::Or(a, b) => {
                a.clear_dom(variables);
                b.clear_dom(variables);
            }
            FuzzyTerm::Very(term) | FuzzyTerm::Fairly(term) => term.clear_dom(variables),
        }
    }

    /// Raise every reachable set's DOM to at least `value`
    pub fn merge_dom(&self, variables: &mut [FuzzyVariable], value: f64) {
        match self {
            FuzzyTerm::Set(id) => {
                if let Some(set) = id.resolve_mut(variables) {
                    set.merge_dom(value);
                }
            }
            FuzzyTerm::And(a, b) | FuzzyTerm::Or(a, b) => {
                a.merge_dom(variables, value);
                b.merge_dom(variables, value);
            }
            FuzzyTerm::Very(term) | FuzzyTerm::Fairly(term) => term.merge_dom(variables, value),
        }
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            FuzzyTerm::Set(_) => 1,
            FuzzyTerm::And(a, b) | FuzzyTerm::Or(a, b) => 1 + a.depth().max(b.depth()),
            FuzzyTerm::Very(term) | FuzzyTerm::Fairly(term) => 1 + term.depth(),
        }
    }

    /// Leaf handles, left to right
    pub fn set_ids(&self) -> Vec<SetId> {
        let mut ids = Vec::new();
        self.collect_set_ids(&mut ids);
        ids
    }

    fn collect_set_ids(&self, ids: &mut Vec<SetId>) {
        match self {
            FuzzyTerm::Set(id) => ids.push(*id),
            FuzzyTerm::And(a, b) | FuzzyTerm::Or(a, b) => {
                a.collect_set_ids(ids);
                b.collect_set_ids(ids);
            }
            FuzzyTerm::Very(term) | FuzzyTerm::Fairly(term) => term.collect_set_ids(ids),
        }
    }

    /// Render the term with variable and set names
    pub fn display<'a>(&'a self, variables: &'a [FuzzyVariable]) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            variables,
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            FuzzyTerm::Or(..) => 1,
            FuzzyTerm::And(..) => 2,
            FuzzyTerm::Set(_) | FuzzyTerm::Very(_) | FuzzyTerm::Fairly(_) => 3,
        }
    }
}

/// `Display` adapter returned by [`FuzzyTerm::display`]
pub struct TermDisplay<'a> {
    term: &'a FuzzyTerm,
    variables: &'a [FuzzyVariable],
}

impl TermDisplay<'_> {
    fn write_term(&self, f: &mut fmt::Formatter<'_>, term: &FuzzyTerm, min: u8) -> fmt::Result {
        if term.precedence() < min {
            write!(f, "(")?;
            self.write_term(f, term, 0)?;
            return write!(f, ")");
        }

        match term {
            FuzzyTerm::Set(id) => match self.variables.get(id.variable.index) {
                Some(variable) => match variable.name_at(id.index) {
                    Some(set_name) => write!(f, "{}.{}", variable.name(), set_name),
                    None => write!(f, "{}.#{}", variable.name(), id.index),
                },
                None => write!(f, "#{}.#{}", id.variable.index, id.index),
            },
            FuzzyTerm::And(a, b) => {
                self.write_term(f, a, 2)?;
                write!(f, " AND ")?;
                self.write_term(f, b, 2)
            }
            FuzzyTerm::Or(a, b) => {
                self.write_term(f, a, 1)?;
                write!(f, " OR ")?;
                self.write_term(f, b, 1)
            }
            FuzzyTerm::Very(inner) => {
                write!(f, "very ")?;
                self.write_term(f, inner, 3)
            }
            FuzzyTerm::Fairly(inner) => {
                write!(f, "fairly ")?;
                self.write_term(f, inner, 3)
            }
        }
    }
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_term(f, self.term, 0)
    }
}
