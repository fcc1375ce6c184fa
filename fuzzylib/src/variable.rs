//! Linguistic variables
//!
//! A `FuzzyVariable` owns an ordered collection of named fuzzy sets over one
//! input domain. It is the only place a set's DOM is stored.

use crate::defuzzify::{self, DefuzzifyMethod, EmptyOutputPolicy};
use crate::error::NameKind;
use crate::{FuzzyError, FuzzyResult, FuzzySet, InferenceConfig};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A named collection of fuzzy sets sharing one domain
#[derive(Debug, Clone, Serialize)]
pub struct FuzzyVariable {
    name: String,
    names: Vec<String>,
    sets: Vec<FuzzySet>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    range: Option<(f64, f64)>,
}

impl FuzzyVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            names: Vec::new(),
            sets: Vec::new(),
            index: HashMap::new(),
            range: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a named set and widen the domain to cover its support.
    ///
    /// Returns the set's position, which stays stable for the variable's lifetime.
    pub fn add_term(&mut self, name: impl Into<String>, set: FuzzySet) -> FuzzyResult<usize> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(FuzzyError::DuplicateName {
                kind: NameKind::Term,
                name,
            });
        }

        let (left, right) = set.support();
        self.range = Some(match self.range {
            Some((min, max)) => (min.min(left), max.max(right)),
            None => (left, right),
        });

        let position = self.sets.len();
        self.index.insert(name.clone(), position);
        self.names.push(name);
        self.sets.push(set);
        Ok(position)
    }

    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn set(&self, name: &str) -> Option<&FuzzySet> {
        self.term_index(name).and_then(|i| self.sets.get(i))
    }

    pub fn set_at(&self, index: usize) -> Option<&FuzzySet> {
        self.sets.get(index)
    }

    pub(crate) fn set_at_mut(&mut self, index: usize) -> Option<&mut FuzzySet> {
        self.sets.get_mut(index)
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Term names in registration order
    pub fn term_names(&self) -> &[String] {
        &self.names
    }

    /// `(name, set)` pairs in registration order
    pub fn sets(&self) -> impl Iterator<Item = (&str, &FuzzySet)> {
        self.names.iter().map(String::as_str).zip(self.sets.iter())
    }

    /// `(name, DOM)` pairs in registration order
    pub fn doms(&self) -> Vec<(String, f64)> {
        self.sets()
            .map(|(name, set)| (name.to_string(), set.dom()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Smallest interval covering every set's support, `None` until a set is added
    pub fn range(&self) -> Option<(f64, f64)> {
        self.range
    }

    /// Set every set's DOM to its membership of `value`
    pub fn fuzzify(&mut self, value: f64) -> FuzzyResult<()> {
        if !value.is_finite() {
            return Err(FuzzyError::InvalidValue {
                variable: self.name.clone(),
                value,
            });
        }

        for set in &mut self.sets {
            let dom = set.membership(value);
            set.set_dom(dom);
        }
        Ok(())
    }

    /// Reduce the current DOMs to one crisp value
    pub fn defuzzify(&self, method: DefuzzifyMethod, config: &InferenceConfig) -> FuzzyResult<f64> {
        let range = self.range.unwrap_or((0.0, 0.0));
        let result = defuzzify::defuzzify(
            method,
            &self.sets,
            range,
            config.centroid_samples,
            config.tie_epsilon,
        );

        match result {
            Some(value) => {
                debug!(variable = %self.name, %method, value, "defuzzified");
                Ok(value)
            }
            None => match config.empty_output {
                EmptyOutputPolicy::Error => Err(FuzzyError::NoActiveSets(self.name.clone())),
                EmptyOutputPolicy::Midpoint => {
                    let midpoint = (range.0 + range.1) / 2.0;
                    warn!(
                        variable = %self.name,
                        midpoint,
                        "no active sets, defuzzifying to the midpoint of the range"
                    );
                    Ok(midpoint)
                }
            },
        }
    }

    pub fn clear_doms(&mut self) {
        for set in &mut self.sets {
            set.clear_dom();
        }
    }
}
