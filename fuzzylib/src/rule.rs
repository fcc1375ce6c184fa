//! Fuzzy rules
//!
//! A rule owns private copies of its antecedent and consequence trees. The
//! caller's trees stay free to be dropped, reused or recombined. The copies'
//! leaves still name the canonical sets, which is where evaluation writes.

use crate::term::VariableId;
use crate::variable::FuzzyVariable;
use crate::FuzzyTerm;

/// `IF antecedent THEN consequence`
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyRule {
    antecedent: FuzzyTerm,
    consequence: FuzzyTerm,
}

impl FuzzyRule {
    pub fn new(antecedent: &FuzzyTerm, consequence: &FuzzyTerm) -> Self {
        Self {
            antecedent: antecedent.clone(),
            consequence: consequence.clone(),
        }
    }

    pub fn antecedent(&self) -> &FuzzyTerm {
        &self.antecedent
    }

    pub fn consequence(&self) -> &FuzzyTerm {
        &self.consequence
    }

    /// Reset the DOM of every set the consequence names
    pub fn clear_consequence_confidence(&self, variables: &mut [FuzzyVariable]) {
        self.consequence.clear_dom(variables);
    }

    /// Merge the antecedent's DOM into the consequence and return it
    pub fn evaluate(&self, variables: &mut [FuzzyVariable]) -> f64 {
        let confidence = self.antecedent.degree_of_membership(variables);
        self.consequence.merge_dom(variables, confidence);
        confidence
    }

    /// Variables written by this rule, without duplicates, in leaf order
    pub fn consequence_variables(&self) -> Vec<VariableId> {
        let mut ids: Vec<VariableId> = Vec::new();
        for set in self.consequence.set_ids() {
            if !ids.contains(&set.variable()) {
                ids.push(set.variable());
            }
        }
        ids
    }

    /// Render as `IF ... THEN ...`
    pub fn display(&self, variables: &[FuzzyVariable]) -> String {
        format!(
            "IF {} THEN {}",
            self.antecedent.display(variables),
            self.consequence.display(variables)
        )
    }
}
