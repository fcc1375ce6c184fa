//! # Fuzzylib Engine
//!
//! **Fuzzy rule-based inference**
//!
//! Fuzzylib turns crisp inputs into crisp outputs through linguistic rules
//! such as "IF the target is close AND ammo is low THEN desirability is high".
//!
//! ## Quick Start
//!
//! ```rust
//! use fuzzylib::{DefuzzifyMethod, FuzzyModule, FuzzyResult};
//!
//! fn main() -> FuzzyResult<()> {
//!     let mut module = FuzzyModule::new();
//!
//!     module.load_source(r#"
//!         variable distance {
//!             close  = left_shoulder(0, 25, 150)
//!             medium = triangle(25, 150, 300)
//!             far    = right_shoulder(150, 300, 1000)
//!         }
//!         variable desirability {
//!             undesirable = left_shoulder(0, 25, 50)
//!             desirable   = triangle(25, 50, 75)
//!             very_desirable = right_shoulder(50, 75, 100)
//!         }
//!         rule IF distance.close  THEN desirability.very_desirable
//!         rule IF distance.medium THEN desirability.desirable
//!         rule IF distance.far    THEN desirability.undesirable
//!     "#, "weapon.fuzzy")?;
//!
//!     let value = module.infer(
//!         &[("distance", 20.0)],
//!         "desirability",
//!         DefuzzifyMethod::MeanOfMaxima,
//!     )?;
//!     assert_eq!(value, 87.5);
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Variables and sets
//! A `FuzzyVariable` is a named domain such as `distance`, split into
//! overlapping fuzzy sets (`close`, `medium`, `far`). Fuzzifying a crisp value
//! gives every set a degree of membership (DOM) in [0, 1].
//!
//! ### Terms
//! A `FuzzyTerm` names a set or combines terms with `AND` (min), `OR` (max),
//! `very` (square) and `fairly` (square root). Build them in code with the
//! functions in [`operators`] or write them in the rule language.
//!
//! ### Rules
//! `IF antecedent THEN consequence`: running the rules merges each
//! antecedent's DOM into the sets its consequence names.
//!
//! ### Defuzzification
//! Output variables are reduced to one crisp value by centroid,
//! mean of maxima, or weighted average.

pub mod ast;
pub mod binding;
pub mod config;
pub mod defuzzify;
pub mod error;
pub mod module;
pub mod operators;
pub mod parser;
pub mod rule;
pub mod set;
pub mod term;
pub mod trace;
pub mod variable;

pub use ast::Span;
pub use binding::PropertyBinding;
pub use config::InferenceConfig;
pub use defuzzify::{DefuzzifyMethod, EmptyOutputPolicy};
pub use error::{ErrorDetails, FuzzyError, NameKind};
pub use module::FuzzyModule;
pub use operators::{all, and, any, fairly, or, very};
pub use parser::{parse, parse_rule};
pub use rule::FuzzyRule;
pub use set::{FuzzySet, Shape};
pub use term::{FuzzyTerm, SetId, VariableId};
pub use trace::{InferenceTrace, RuleFiring};
pub use variable::FuzzyVariable;

/// Result type for fuzzy engine operations
pub type FuzzyResult<T> = Result<T, FuzzyError>;

#[cfg(test)]
mod tests;
