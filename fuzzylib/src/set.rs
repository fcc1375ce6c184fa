//! Fuzzy sets and their membership functions
//!
//! A `FuzzySet` pairs a `Shape` with the degree of membership (DOM) computed
//! during the current inference pass.

use crate::{FuzzyError, FuzzyResult};
use serde::Serialize;
use std::fmt;

/// Membership function of a fuzzy set.
///
/// Every shape is 1.0 on its peak (or plateau), 0.0 at and outside its
/// support boundaries, and linear in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Rises from `left` to `peak`, falls to `right`
    Triangle { left: f64, peak: f64, right: f64 },
    /// Plateau from `left` to `peak`, falls to `right`
    LeftShoulder { left: f64, peak: f64, right: f64 },
    /// Rises from `left` to `peak`, plateau to `right`
    RightShoulder { left: f64, peak: f64, right: f64 },
    /// Rises from `left`, plateau between the two peaks, falls to `right`
    Trapezoid {
        left: f64,
        left_peak: f64,
        right_peak: f64,
        right: f64,
    },
    /// Full membership on `[left, right]`, represented by `peak`
    Singleton { left: f64, peak: f64, right: f64 },
}

impl Shape {
    /// Check that the parameters are finite and ordered
    pub fn validate(&self) -> FuzzyResult<()> {
        let points: Vec<f64> = match *self {
            Shape::Triangle { left, peak, right }
            | Shape::LeftShoulder { left, peak, right }
            | Shape::RightShoulder { left, peak, right }
            | Shape::Singleton { left, peak, right } => vec![left, peak, right],
            Shape::Trapezoid {
                left,
                left_peak,
                right_peak,
                right,
            } => vec![left, left_peak, right_peak, right],
        };

        if points.iter().any(|p| !p.is_finite()) {
            return Err(FuzzyError::InvalidShape(format!(
                "{} has a parameter that is not a finite number",
                self
            )));
        }
        if points.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(FuzzyError::InvalidShape(format!(
                "{} parameters must be in non-decreasing order",
                self
            )));
        }

        let (left, right) = self.support();
        if !matches!(self, Shape::Singleton { .. }) && left >= right {
            return Err(FuzzyError::InvalidShape(format!(
                "{} has an empty support",
                self
            )));
        }
        Ok(())
    }

    /// Degree of membership of `x`, in [0, 1]
    pub fn membership(&self, x: f64) -> f64 {
        let dom = match *self {
            Shape::Triangle { left, peak, right } => {
                if x == peak {
                    1.0
                } else if x <= left || x >= right {
                    0.0
                } else if x < peak {
                    (x - left) / (peak - left)
                } else {
                    (right - x) / (right - peak)
                }
            }
            Shape::LeftShoulder { left, peak, right } => {
                if x >= left && x <= peak {
                    1.0
                } else if x > peak && x < right {
                    (right - x) / (right - peak)
                } else {
                    0.0
                }
            }
            Shape::RightShoulder { left, peak, right } => {
                if x >= peak && x <= right {
                    1.0
                } else if x > left && x < peak {
                    (x - left) / (peak - left)
                } else {
                    0.0
                }
            }
            Shape::Trapezoid {
                left,
                left_peak,
                right_peak,
                right,
            } => {
                if x >= left_peak && x <= right_peak {
                    1.0
                } else if x > left && x < left_peak {
                    (x - left) / (left_peak - left)
                } else if x > right_peak && x < right {
                    (right - x) / (right - right_peak)
                } else {
                    0.0
                }
            }
            Shape::Singleton { left, right, .. } => {
                if x >= left && x <= right {
                    1.0
                } else {
                    0.0
                }
            }
        };
        clamp_dom(dom)
    }

    /// Crisp value that stands for the whole set during defuzzification
    pub fn representative_value(&self) -> f64 {
        match *self {
            Shape::Triangle { peak, .. } | Shape::Singleton { peak, .. } => peak,
            Shape::LeftShoulder { left, peak, .. } => (left + peak) / 2.0,
            Shape::RightShoulder { peak, right, .. } => (peak + right) / 2.0,
            Shape::Trapezoid {
                left_peak,
                right_peak,
                ..
            } => (left_peak + right_peak) / 2.0,
        }
    }

    /// Outer bounds of the set: `(left, right)`
    pub fn support(&self) -> (f64, f64) {
        match *self {
            Shape::Triangle { left, right, .. }
            | Shape::LeftShoulder { left, right, .. }
            | Shape::RightShoulder { left, right, .. }
            | Shape::Trapezoid { left, right, .. }
            | Shape::Singleton { left, right, .. } => (left, right),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Triangle { left, peak, right } => {
                write!(f, "triangle({}, {}, {})", left, peak, right)
            }
            Shape::LeftShoulder { left, peak, right } => {
                write!(f, "left_shoulder({}, {}, {})", left, peak, right)
            }
            Shape::RightShoulder { left, peak, right } => {
                write!(f, "right_shoulder({}, {}, {})", left, peak, right)
            }
            Shape::Trapezoid {
                left,
                left_peak,
                right_peak,
                right,
            } => write!(
                f,
                "trapezoid({}, {}, {}, {})",
                left, left_peak, right_peak, right
            ),
            Shape::Singleton { left, peak, right } => {
                if left == peak && peak == right {
                    write!(f, "singleton({})", peak)
                } else {
                    write!(f, "singleton({}, {}, {})", left, peak, right)
                }
            }
        }
    }
}

/// A membership function plus its current degree of membership
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzySet {
    shape: Shape,
    dom: f64,
}

impl FuzzySet {
    /// Create a set after validating its shape. The DOM starts at zero.
    pub fn new(shape: Shape) -> FuzzyResult<Self> {
        shape.validate()?;
        Ok(Self { shape, dom: 0.0 })
    }

    pub fn triangle(left: f64, peak: f64, right: f64) -> FuzzyResult<Self> {
        Self::new(Shape::Triangle { left, peak, right })
    }

    pub fn left_shoulder(left: f64, peak: f64, right: f64) -> FuzzyResult<Self> {
        Self::new(Shape::LeftShoulder { left, peak, right })
    }

    pub fn right_shoulder(left: f64, peak: f64, right: f64) -> FuzzyResult<Self> {
        Self::new(Shape::RightShoulder { left, peak, right })
    }

    pub fn trapezoid(left: f64, left_peak: f64, right_peak: f64, right: f64) -> FuzzyResult<Self> {
        Self::new(Shape::Trapezoid {
            left,
            left_peak,
            right_peak,
            right,
        })
    }

    /// Singleton at exactly `value`
    pub fn singleton(value: f64) -> FuzzyResult<Self> {
        Self::new(Shape::Singleton {
            left: value,
            peak: value,
            right: value,
        })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Degree of membership of a crisp input; does not touch the cached DOM
    pub fn membership(&self, x: f64) -> f64 {
        self.shape.membership(x)
    }

    pub fn representative_value(&self) -> f64 {
        self.shape.representative_value()
    }

    pub fn support(&self) -> (f64, f64) {
        self.shape.support()
    }

    /// Current degree of membership
    pub fn dom(&self) -> f64 {
        self.dom
    }

    /// Overwrite the DOM, clamped to [0, 1]
    pub fn set_dom(&mut self, value: f64) {
        self.dom = clamp_dom(value);
    }

    pub fn clear_dom(&mut self) {
        self.dom = 0.0;
    }

    /// Keep the larger of the current DOM and `value`
    pub fn merge_dom(&mut self, value: f64) {
        self.dom = self.dom.max(clamp_dom(value));
    }
}

// NaN compares false everywhere, so it would otherwise survive `clamp`.
fn clamp_dom(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
