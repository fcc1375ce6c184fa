use serde::Serialize;

/// One rule's contribution to an inference pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleFiring {
    /// Position of the rule in registration order
    pub index: usize,
    /// DOM of the antecedent, merged into the consequence
    pub confidence: f64,
}

/// Result of `FuzzyModule::run_rules`
///
/// Holds every rule in registration order, including rules that did not
/// fire (confidence zero). Use `FuzzyModule::display_rule` to render one.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InferenceTrace {
    pub firings: Vec<RuleFiring>,
}

impl InferenceTrace {
    pub fn add_firing(&mut self, firing: RuleFiring) {
        self.firings.push(firing);
    }

    /// Rules whose antecedent had a non-zero DOM
    pub fn fired(&self) -> impl Iterator<Item = &RuleFiring> {
        self.firings.iter().filter(|f| f.confidence > 0.0)
    }

    pub fn len(&self) -> usize {
        self.firings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.firings.is_empty()
    }
}
