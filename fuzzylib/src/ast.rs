//! Rule-language syntax tree
//!
//! The parser produces these unresolved, name-based structures; the module
//! resolves names into set handles when the source is loaded.
//! - `Span` tracks source locations for diagnostics
//! - `TermExpr` is a term tree that still refers to sets by name
//! - `RuleBaseSource` is everything declared in one source text

use std::fmt;
use std::sync::Arc;

/// Span representing a location in source code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

/// Membership function kinds accepted by the rule language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Triangle,
    LeftShoulder,
    RightShoulder,
    Trapezoid,
    Singleton,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Triangle => "triangle",
            ShapeKind::LeftShoulder => "left_shoulder",
            ShapeKind::RightShoulder => "right_shoulder",
            ShapeKind::Trapezoid => "trapezoid",
            ShapeKind::Singleton => "singleton",
        };
        write!(f, "{}", name)
    }
}

/// `name = kind(params...)` inside a variable block
#[derive(Debug, Clone, PartialEq)]
pub struct SetDecl {
    pub name: String,
    pub kind: ShapeKind,
    pub params: Vec<f64>,
    pub span: Span,
}

/// `variable name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: String,
    pub sets: Vec<SetDecl>,
    pub span: Span,
}

/// A term tree whose leaves are still `variable.set` names
#[derive(Debug, Clone, PartialEq)]
pub enum TermExpr {
    Set {
        variable: String,
        set: String,
        span: Span,
    },
    And(Box<TermExpr>, Box<TermExpr>),
    Or(Box<TermExpr>, Box<TermExpr>),
    Very(Box<TermExpr>),
    Fairly(Box<TermExpr>),
}

impl TermExpr {
    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            TermExpr::Set { .. } => 1,
            TermExpr::And(a, b) | TermExpr::Or(a, b) => 1 + a.depth().max(b.depth()),
            TermExpr::Very(term) | TermExpr::Fairly(term) => 1 + term.depth(),
        }
    }

    /// Span of the leftmost set reference
    pub fn span(&self) -> &Span {
        match self {
            TermExpr::Set { span, .. } => span,
            TermExpr::And(a, _) | TermExpr::Or(a, _) => a.span(),
            TermExpr::Very(term) | TermExpr::Fairly(term) => term.span(),
        }
    }
}

/// `rule IF <antecedent> THEN <consequence>`
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDecl {
    pub antecedent: TermExpr,
    pub consequence: TermExpr,
    pub span: Span,
}

/// Everything declared in one rule-language source
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBaseSource {
    pub source_id: String,
    pub source_text: Arc<str>,
    pub variables: Vec<VariableDecl>,
    pub rules: Vec<RuleDecl>,
}
