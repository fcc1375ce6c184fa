#![no_main]

use fuzzylib::FuzzyModule;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut module = FuzzyModule::new();

        let _ = module.load_source(s, "fuzz_input");
        let _ = module.add_rule_text(s);
    }
});
