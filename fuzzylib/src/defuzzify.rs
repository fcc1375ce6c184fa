//! Defuzzification methods
//!
//! Each method reduces the DOMs of a variable's sets to one crisp value, or
//! returns `None` when nothing is active. The caller decides what an empty
//! result means (see [`EmptyOutputPolicy`]).

use crate::FuzzySet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Defuzzification method selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefuzzifyMethod {
    /// Center of gravity of the union of the truncated set shapes
    #[default]
    Centroid,
    /// Average representative value of the sets holding the maximum DOM
    #[serde(alias = "mom")]
    MeanOfMaxima,
    /// Representative values weighted by DOM
    #[serde(alias = "max-av")]
    WeightedAverage,
}

impl fmt::Display for DefuzzifyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DefuzzifyMethod::Centroid => "centroid",
            DefuzzifyMethod::MeanOfMaxima => "mean-of-maxima",
            DefuzzifyMethod::WeightedAverage => "weighted-average",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for DefuzzifyMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "centroid" | "cog" => Ok(DefuzzifyMethod::Centroid),
            "mean-of-maxima" | "mom" => Ok(DefuzzifyMethod::MeanOfMaxima),
            "weighted-average" | "max-av" => Ok(DefuzzifyMethod::WeightedAverage),
            other => Err(format!(
                "unknown defuzzification method '{}' (expected centroid, mean-of-maxima or weighted-average)",
                other
            )),
        }
    }
}

/// Outcome of defuzzifying a variable whose DOMs are all zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyOutputPolicy {
    /// Fail with `FuzzyError::NoActiveSets`
    #[default]
    Error,
    /// Return the midpoint of the variable's range
    Midpoint,
}

pub fn defuzzify(
    method: DefuzzifyMethod,
    sets: &[FuzzySet],
    range: (f64, f64),
    samples: usize,
    epsilon: f64,
) -> Option<f64> {
    match method {
        DefuzzifyMethod::Centroid => centroid(sets, range, samples),
        DefuzzifyMethod::MeanOfMaxima => mean_of_maxima(sets, epsilon),
        DefuzzifyMethod::WeightedAverage => weighted_average(sets),
    }
}

/// Centroid by sampling `[min, max]` at `samples + 1` evenly spaced points.
///
/// Each set contributes its membership capped at its DOM. An active set that
/// no grid point lands on (a singleton off the grid, or any set narrower than
/// one step) gets one extra sample at its representative value, where its
/// membership is 1.
pub fn centroid(sets: &[FuzzySet], range: (f64, f64), samples: usize) -> Option<f64> {
    let (min, max) = range;
    let samples = samples.max(1);
    let mut hit = vec![false; sets.len()];

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for i in 0..=samples {
        let x = min + (max - min) * i as f64 / samples as f64;
        let weight = sample(sets, x, &mut hit);
        numerator += x * weight;
        denominator += weight;
    }

    for (index, set) in sets.iter().enumerate() {
        if set.dom() > 0.0 && !hit[index] {
            let x = set.representative_value();
            let weight = sample(sets, x, &mut hit);
            numerator += x * weight;
            denominator += weight;
        }
    }

    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// Summed capped membership at `x`, marking every set that contributed
fn sample(sets: &[FuzzySet], x: f64, hit: &mut [bool]) -> f64 {
    let mut total = 0.0;
    for (set, hit) in sets.iter().zip(hit.iter_mut()) {
        let weight = set.membership(x).min(set.dom());
        if weight > 0.0 {
            *hit = true;
            total += weight;
        }
    }
    total
}

/// Mean of the representative values of every set at the maximum DOM
pub fn mean_of_maxima(sets: &[FuzzySet], epsilon: f64) -> Option<f64> {
    let max_dom = sets.iter().map(FuzzySet::dom).fold(0.0, f64::max);
    if max_dom <= 0.0 {
        return None;
    }

    let (sum, count) = sets
        .iter()
        .filter(|set| max_dom - set.dom() <= epsilon)
        .fold((0.0, 0usize), |(sum, count), set| {
            (sum + set.representative_value(), count + 1)
        });

    Some(sum / count as f64)
}

/// Σ representative·DOM / Σ DOM
pub fn weighted_average(sets: &[FuzzySet]) -> Option<f64> {
    let (numerator, denominator) = sets.iter().fold((0.0, 0.0), |(num, den), set| {
        (num + set.representative_value() * set.dom(), den + set.dom())
    });

    if denominator > 0.0 {
        Some(numerator / denominator)
    } else {
        None
    }
}
