use crate::ast::{RuleDecl, Span, TermExpr, VariableDecl};
use crate::error::NameKind;
use crate::parser::{self, declarations::build_shape};
use crate::term::{SetId, VariableId};
use crate::trace::{InferenceTrace, RuleFiring};
use crate::{
    DefuzzifyMethod, FuzzyError, FuzzyResult, FuzzyRule, FuzzySet, FuzzyTerm, FuzzyVariable,
    InferenceConfig,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// The fuzzy inference engine.
///
/// Owns the variables, their sets and the rule base. One inference cycle is
/// `fuzzify` for each input, `run_rules`, then `defuzzify` for each output;
/// `infer` does all three. The module does not track where it is in the
/// cycle: calling the steps out of order reads stale or zero DOMs.
///
/// A module is mutated in place by inference, so concurrent callers each
/// need their own (`FuzzyModule` is `Clone`). Handles issued by a module are
/// accepted by it and by its clones, and rejected everywhere else.
#[derive(Debug, Clone)]
pub struct FuzzyModule {
    id: u64,
    variables: Vec<FuzzyVariable>,
    index: HashMap<String, VariableId>,
    rules: Vec<FuzzyRule>,
    config: InferenceConfig,
}

static NEXT_MODULE_ID: AtomicU64 = AtomicU64::new(0);

impl Default for FuzzyModule {
    fn default() -> Self {
        Self {
            id: NEXT_MODULE_ID.fetch_add(1, Ordering::Relaxed),
            variables: Vec::new(),
            index: HashMap::new(),
            rules: Vec::new(),
            config: InferenceConfig::default(),
        }
    }
}

impl FuzzyModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a module with custom numeric settings and limits
    pub fn with_config(config: InferenceConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn create_variable(&mut self, name: impl Into<String>) -> FuzzyResult<VariableId> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(FuzzyError::DuplicateName {
                kind: NameKind::Variable,
                name,
            });
        }

        let id = VariableId {
            module: self.id,
            index: self.variables.len(),
        };
        self.variables.push(FuzzyVariable::new(name.clone()));
        self.index.insert(name, id);
        Ok(id)
    }

    pub fn variable_id(&self, name: &str) -> Option<VariableId> {
        self.index.get(name).copied()
    }

    pub fn variable(&self, name: &str) -> Option<&FuzzyVariable> {
        self.variable_id(name).map(|id| &self.variables[id.index])
    }

    /// Variables in creation order
    pub fn variables(&self) -> &[FuzzyVariable] {
        &self.variables
    }

    /// Add a named set to a variable and return the leaf term naming it
    pub fn add_term(
        &mut self,
        variable: &str,
        name: impl Into<String>,
        set: FuzzySet,
    ) -> FuzzyResult<FuzzyTerm> {
        let id = self.require(variable)?;
        let index = self.variables[id.index].add_term(name, set)?;
        Ok(FuzzyTerm::Set(SetId {
            variable: id,
            index,
        }))
    }

    /// Leaf term for an existing set
    pub fn term(&self, variable: &str, name: &str) -> FuzzyResult<FuzzyTerm> {
        let id = self.require(variable)?;
        let var = &self.variables[id.index];
        let index = var.term_index(name).ok_or_else(|| FuzzyError::UnknownTerm {
            variable: variable.to_string(),
            term: name.to_string(),
            known: var.term_names().to_vec(),
        })?;
        Ok(FuzzyTerm::Set(SetId {
            variable: id,
            index,
        }))
    }

    /// Register `IF antecedent THEN consequence` and return its position.
    ///
    /// Both terms are cloned; every leaf must name a set of this module.
    pub fn add_rule(&mut self, antecedent: &FuzzyTerm, consequence: &FuzzyTerm) -> FuzzyResult<usize> {
        for term in [antecedent, consequence] {
            self.check_term(term)?;
        }

        self.rules.push(FuzzyRule::new(antecedent, consequence));
        let index = self.rules.len() - 1;
        debug!(
            rule = index,
            text = %self.rules[index].display(&self.variables),
            "rule added"
        );
        Ok(index)
    }

    /// Register one rule written in the rule language, e.g.
    /// `IF distance.close AND ammo.low THEN desirability.high`
    pub fn add_rule_text(&mut self, text: &str) -> FuzzyResult<usize> {
        let decl = parser::parse_rule(text, &self.config)?;
        let source = SourceRef {
            id: "<rule>",
            text: Arc::from(text),
        };
        self.add_rule_decl(&decl, &source)
    }

    /// Load variables, sets and rules from one rule-language source
    pub fn load_source(&mut self, text: &str, source_id: &str) -> FuzzyResult<()> {
        self.load_sources([(text, source_id)])
    }

    /// Load several `(text, source_id)` sources as one rule base.
    ///
    /// Every variable of every source is declared before any rule is
    /// resolved, so a rule may name a variable declared in a later source.
    /// On error the module is left unchanged.
    pub fn load_sources<'a>(
        &mut self,
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> FuzzyResult<()> {
        let parsed = sources
            .into_iter()
            .map(|(text, source_id)| parser::parse(text, source_id, &self.config))
            .collect::<FuzzyResult<Vec<_>>>()?;

        let mut staged = self.clone();
        for source in &parsed {
            let source_ref = SourceRef {
                id: &source.source_id,
                text: source.source_text.clone(),
            };
            for decl in &source.variables {
                staged.declare_variable(decl, &source_ref)?;
            }
        }
        for source in &parsed {
            let source_ref = SourceRef {
                id: &source.source_id,
                text: source.source_text.clone(),
            };
            for decl in &source.rules {
                staged.add_rule_decl(decl, &source_ref)?;
            }
        }

        debug!(
            sources = parsed.len(),
            variables = staged.variables.len(),
            rules = staged.rules.len(),
            "rule base loaded"
        );
        *self = staged;
        Ok(())
    }

    /// Rules in registration order
    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }

    /// Variables written by at least one rule, in creation order
    pub fn output_variables(&self) -> Vec<&FuzzyVariable> {
        let mut ids: Vec<VariableId> = self
            .rules
            .iter()
            .flat_map(FuzzyRule::consequence_variables)
            .collect();
        ids.sort();
        ids.dedup();
        ids.into_iter()
            .filter_map(|id| self.variables.get(id.index))
            .collect()
    }

    pub fn fuzzify(&mut self, variable: &str, value: f64) -> FuzzyResult<()> {
        let id = self.require(variable)?;
        self.variables[id.index].fuzzify(value)
    }

    /// Evaluate the rule base against the current input DOMs.
    ///
    /// Every consequence is cleared before any rule is evaluated, and
    /// evaluation merges with `max`, so the outcome does not depend on the
    /// order rules were added in.
    pub fn run_rules(&mut self) -> InferenceTrace {
        for rule in &self.rules {
            rule.clear_consequence_confidence(&mut self.variables);
        }

        let mut inference_trace = InferenceTrace::default();
        for (index, rule) in self.rules.iter().enumerate() {
            let confidence = rule.evaluate(&mut self.variables);
            trace!(rule = index, confidence, "rule evaluated");
            inference_trace.add_firing(RuleFiring { index, confidence });
        }

        debug!(
            rules = inference_trace.len(),
            fired = inference_trace.fired().count(),
            "inference pass complete"
        );
        inference_trace
    }

    pub fn defuzzify(&self, variable: &str, method: DefuzzifyMethod) -> FuzzyResult<f64> {
        let id = self.require(variable)?;
        self.variables[id.index].defuzzify(method, &self.config)
    }

    /// Full cycle: fuzzify every input, run the rules, defuzzify `output`
    pub fn infer(
        &mut self,
        inputs: &[(&str, f64)],
        output: &str,
        method: DefuzzifyMethod,
    ) -> FuzzyResult<f64> {
        for (name, value) in inputs {
            self.fuzzify(name, *value)?;
        }
        self.run_rules();
        self.defuzzify(output, method)
    }

    /// Reset the DOM of every set of every variable
    pub fn clear_doms(&mut self) {
        for variable in &mut self.variables {
            variable.clear_doms();
        }
    }

    pub fn display_term(&self, term: &FuzzyTerm) -> String {
        term.display(&self.variables).to_string()
    }

    /// Render the rule at `index` as `IF ... THEN ...`
    pub fn display_rule(&self, index: usize) -> Option<String> {
        self.rules
            .get(index)
            .map(|rule| rule.display(&self.variables))
    }

    fn require(&self, name: &str) -> FuzzyResult<VariableId> {
        self.variable_id(name)
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_string()))
    }

    fn check_term(&self, term: &FuzzyTerm) -> FuzzyResult<()> {
        let depth = term.depth();
        if depth > self.config.max_term_depth {
            return Err(FuzzyError::LimitExceeded {
                limit_name: "max_term_depth".to_string(),
                limit_value: self.config.max_term_depth.to_string(),
                actual_value: depth.to_string(),
                suggestion: "Simplify nested terms to reduce depth".to_string(),
            });
        }

        for id in term.set_ids() {
            let variable = self
                .variables
                .get(id.variable.index)
                .filter(|_| id.variable.module == self.id)
                .ok_or_else(|| FuzzyError::UnknownVariable(format!("#{}", id.variable.index)))?;
            if variable.set_at(id.index).is_none() {
                return Err(FuzzyError::UnknownTerm {
                    variable: variable.name().to_string(),
                    term: format!("#{}", id.index),
                    known: variable.term_names().to_vec(),
                });
            }
        }
        Ok(())
    }

    fn declare_variable(&mut self, decl: &VariableDecl, source: &SourceRef) -> FuzzyResult<()> {
        self.create_variable(decl.name.clone())
            .map_err(|e| source.locate(e, &decl.span))?;

        for set_decl in &decl.sets {
            build_shape(set_decl.kind, &set_decl.params)
                .and_then(FuzzySet::new)
                .and_then(|set| self.add_term(&decl.name, set_decl.name.clone(), set))
                .map_err(|e| source.locate(e, &set_decl.span))?;
        }
        Ok(())
    }

    fn add_rule_decl(&mut self, decl: &RuleDecl, source: &SourceRef) -> FuzzyResult<usize> {
        let antecedent = self.resolve(&decl.antecedent, source)?;
        let consequence = self.resolve(&decl.consequence, source)?;
        self.add_rule(&antecedent, &consequence)
            .map_err(|e| source.locate(e, &decl.span))
    }

    fn resolve(&self, expr: &TermExpr, source: &SourceRef) -> FuzzyResult<FuzzyTerm> {
        Ok(match expr {
            TermExpr::Set {
                variable,
                set,
                span,
            } => self
                .term(variable, set)
                .map_err(|e| source.locate(e, span))?,
            TermExpr::And(a, b) => self.resolve(a, source)?.and(self.resolve(b, source)?),
            TermExpr::Or(a, b) => self.resolve(a, source)?.or(self.resolve(b, source)?),
            TermExpr::Very(term) => self.resolve(term, source)?.very(),
            TermExpr::Fairly(term) => self.resolve(term, source)?.fairly(),
        })
    }
}

/// Where a declaration came from, for locating resolution errors
struct SourceRef<'a> {
    id: &'a str,
    text: Arc<str>,
}

impl SourceRef<'_> {
    fn locate(&self, error: FuzzyError, span: &Span) -> FuzzyError {
        error.in_source(span.clone(), self.id, self.text.clone())
    }
}
