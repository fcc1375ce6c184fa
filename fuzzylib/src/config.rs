//! Inference settings
//!
//! `InferenceConfig` holds the numeric knobs of defuzzification and the
//! limits applied to rule-language sources before they are parsed.

use crate::defuzzify::EmptyOutputPolicy;

/// Numeric settings and input limits for a `FuzzyModule`
///
/// The defaults suit rule bases of a few dozen variables and rules; none of
/// them need changing for typical control or game-AI use.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    /// Number of sampling intervals used by centroid defuzzification.
    /// The domain is sampled at `centroid_samples + 1` evenly spaced points.
    pub centroid_samples: usize,

    /// DOMs within this distance of the maximum count as maxima
    /// during mean-of-maxima defuzzification
    pub tie_epsilon: f64,

    /// What defuzzification returns when every DOM is zero
    pub empty_output: EmptyOutputPolicy,

    /// Maximum nesting depth of a term tree
    /// Real usage: ~4 levels, Limit: 64
    pub max_term_depth: usize,

    /// Maximum size of one rule-language source in bytes
    pub max_source_bytes: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            centroid_samples: 100,
            tie_epsilon: 1e-9,
            empty_output: EmptyOutputPolicy::Error,
            max_term_depth: 64,
            max_source_bytes: 1024 * 1024, // 1 MB
        }
    }
}

impl InferenceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_centroid_samples(mut self, samples: usize) -> Self {
        self.centroid_samples = samples.max(1);
        self
    }

    pub fn with_tie_epsilon(mut self, epsilon: f64) -> Self {
        self.tie_epsilon = epsilon.abs();
        self
    }

    pub fn with_empty_output(mut self, policy: EmptyOutputPolicy) -> Self {
        self.empty_output = policy;
        self
    }

    pub fn with_max_term_depth(mut self, depth: usize) -> Self {
        self.max_term_depth = depth;
        self
    }

    pub fn with_max_source_bytes(mut self, bytes: usize) -> Self {
        self.max_source_bytes = bytes;
        self
    }
}
