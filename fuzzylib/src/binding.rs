//! Binding fuzzy variables to fields of a host object
//!
//! A `PropertyBinding` is an explicit list of accessors: for each input
//! variable a getter reading a crisp value from the object, for each output
//! variable a setter writing the defuzzified value back.
//!
//! ```rust
//! use fuzzylib::{DefuzzifyMethod, FuzzyModule, PropertyBinding};
//!
//! struct Heater {
//!     temperature: f64,
//!     power: f64,
//! }
//!
//! let mut module = FuzzyModule::new();
//! module.load_source(r#"
//!     variable temperature {
//!         cold = left_shoulder(0, 10, 20)
//!         warm = right_shoulder(10, 20, 30)
//!     }
//!     variable power {
//!         low  = left_shoulder(0, 20, 50)
//!         high = right_shoulder(50, 80, 100)
//!     }
//!     rule IF temperature.cold THEN power.high
//!     rule IF temperature.warm THEN power.low
//! "#, "heater.fuzzy")?;
//!
//! let binding = PropertyBinding::new()
//!     .input("temperature", |h: &Heater| h.temperature)
//!     .output("power", |h: &mut Heater, value| h.power = value);
//!
//! let mut heater = Heater { temperature: 5.0, power: 0.0 };
//! binding.infer(&mut module, &mut heater, DefuzzifyMethod::MeanOfMaxima)?;
//! assert_eq!(heater.power, 90.0);
//! # Ok::<(), fuzzylib::FuzzyError>(())
//! ```

use crate::{DefuzzifyMethod, FuzzyModule, FuzzyResult, InferenceTrace};
use std::fmt;

type Getter<T> = Box<dyn Fn(&T) -> f64 + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, f64) + Send + Sync>;

pub struct PropertyBinding<T> {
    inputs: Vec<(String, Getter<T>)>,
    outputs: Vec<(String, Setter<T>)>,
}

impl<T> Default for PropertyBinding<T> {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }
}

impl<T> PropertyBinding<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `variable`'s crisp input from the object
    pub fn input(
        mut self,
        variable: impl Into<String>,
        get: impl Fn(&T) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.inputs.push((variable.into(), Box::new(get)));
        self
    }

    /// Write `variable`'s defuzzified value into the object
    pub fn output(
        mut self,
        variable: impl Into<String>,
        set: impl Fn(&mut T, f64) + Send + Sync + 'static,
    ) -> Self {
        self.outputs.push((variable.into(), Box::new(set)));
        self
    }

    /// Both directions for one variable
    pub fn bind(
        self,
        variable: impl Into<String>,
        get: impl Fn(&T) -> f64 + Send + Sync + 'static,
        set: impl Fn(&mut T, f64) + Send + Sync + 'static,
    ) -> Self {
        let variable = variable.into();
        self.input(variable.clone(), get).output(variable, set)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|(name, _)| name.as_str())
    }

    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|(name, _)| name.as_str())
    }

    pub fn fuzzify(&self, module: &mut FuzzyModule, object: &T) -> FuzzyResult<()> {
        for (variable, get) in &self.inputs {
            module.fuzzify(variable, get(object))?;
        }
        Ok(())
    }

    /// Defuzzify every output; the object is only written once all succeed.
    pub fn defuzzify(
        &self,
        module: &FuzzyModule,
        object: &mut T,
        method: DefuzzifyMethod,
    ) -> FuzzyResult<()> {
        let values = self
            .outputs
            .iter()
            .map(|(variable, _)| module.defuzzify(variable, method))
            .collect::<FuzzyResult<Vec<_>>>()?;

        for ((_, set), value) in self.outputs.iter().zip(values) {
            set(object, value);
        }
        Ok(())
    }

    pub fn infer(
        &self,
        module: &mut FuzzyModule,
        object: &mut T,
        method: DefuzzifyMethod,
    ) -> FuzzyResult<InferenceTrace> {
        self.fuzzify(module, object)?;
        let trace = module.run_rules();
        self.defuzzify(module, object, method)?;
        Ok(trace)
    }
}

impl<T> fmt::Debug for PropertyBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyBinding")
            .field("inputs", &self.inputs().collect::<Vec<_>>())
            .field("outputs", &self.outputs().collect::<Vec<_>>())
            .finish()
    }
}
