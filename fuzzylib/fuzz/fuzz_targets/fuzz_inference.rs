#![no_main]

use fuzzylib::{DefuzzifyMethod, FuzzyModule};
use libfuzzer_sys::fuzz_target;

const SOURCE: &str = r#"
variable x {
    low  = left_shoulder(-10, 0, 10)
    mid  = trapezoid(0, 5, 15, 20)
    high = right_shoulder(10, 20, 30)
    one  = singleton(7)
}
variable y {
    low  = triangle(0, 0, 50)
    high = triangle(50, 100, 100)
}
rule IF x.low OR fairly x.one THEN y.low
rule IF very x.high AND x.mid THEN y.high
"#;

fuzz_target!(|input: (f64, u8)| {
    let mut module = FuzzyModule::new();
    if module.load_source(SOURCE, "fuzz_inference").is_err() {
        return;
    }

    let method = match input.1 % 3 {
        0 => DefuzzifyMethod::Centroid,
        1 => DefuzzifyMethod::MeanOfMaxima,
        _ => DefuzzifyMethod::WeightedAverage,
    };

    if let Ok(value) = module.infer(&[("x", input.0)], "y", method) {
        assert!((0.0..=100.0).contains(&value));
    }
});
