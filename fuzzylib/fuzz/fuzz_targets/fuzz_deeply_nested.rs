#![no_main]

use fuzzylib::FuzzyModule;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, u8, u16, bool)| {
    let mut module = FuzzyModule::new();

    let parens = input.0 as usize % 100 + 1;
    let hedges = input.1 as usize % 100;
    let chain = input.2 as usize;
    let operator = if input.3 { " AND " } else { " OR " };

    let mut term = format!("{}v.a", "very ".repeat(hedges));
    for _ in 0..parens {
        term = format!("(fairly {} OR v.b)", term);
    }
    let flat = vec!["v.a"; chain + 1].join(operator);

    let code = format!(
        "variable v {{ a = triangle(0, 1, 2) b = triangle(1, 2, 3) }}\nrule IF {} THEN v.b\nrule IF {} THEN v.a",
        term, flat
    );

    let _ = module.load_source(&code, "fuzz_nested");
});
