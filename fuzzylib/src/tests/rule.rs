use crate::{FuzzyModule, FuzzyRule, FuzzySet, FuzzyTerm};

struct Fixture {
    module: FuzzyModule,
    close: FuzzyTerm,
    far: FuzzyTerm,
    low: FuzzyTerm,
    high: FuzzyTerm,
}

fn fixture() -> Fixture {
    let mut module = FuzzyModule::new();
    module.create_variable("distance").unwrap();
    module.create_variable("desirability").unwrap();

    let close = module
        .add_term("distance", "close", FuzzySet::left_shoulder(0.0, 25.0, 150.0).unwrap())
        .unwrap();
    let far = module
        .add_term("distance", "far", FuzzySet::right_shoulder(25.0, 150.0, 300.0).unwrap())
        .unwrap();
    let low = module
        .add_term("desirability", "low", FuzzySet::left_shoulder(0.0, 25.0, 50.0).unwrap())
        .unwrap();
    let high = module
        .add_term("desirability", "high", FuzzySet::right_shoulder(50.0, 75.0, 100.0).unwrap())
        .unwrap();

    Fixture {
        module,
        close,
        far,
        low,
        high,
    }
}

#[test]
fn test_evaluate_merges_confidence_into_consequence() {
    let mut f = fixture();
    f.module.fuzzify("distance", 87.5).unwrap();
    let mut vars = f.module.variables().to_vec();

    let rule = FuzzyRule::new(&f.close, &f.high);
    let confidence = rule.evaluate(&mut vars);
    assert_eq!(confidence, 0.5);
    assert_eq!(vars[1].set("high").unwrap().dom(), 0.5);
    assert_eq!(vars[1].set("low").unwrap().dom(), 0.0);
}

#[test]
fn test_evaluate_never_lowers_a_dom() {
    let mut f = fixture();
    f.module.fuzzify("distance", 25.0).unwrap();
    let mut vars = f.module.variables().to_vec();

    FuzzyRule::new(&f.close, &f.high).evaluate(&mut vars);
    FuzzyRule::new(&f.far, &f.high).evaluate(&mut vars);
    assert_eq!(vars[1].set("high").unwrap().dom(), 1.0);
}

#[test]
fn test_clear_consequence_confidence() {
    let mut f = fixture();
    f.module.fuzzify("distance", 10.0).unwrap();
    let mut vars = f.module.variables().to_vec();

    let rule = FuzzyRule::new(&f.close, &f.low.clone().or(f.high.clone()));
    rule.evaluate(&mut vars);
    assert_eq!(vars[1].set("low").unwrap().dom(), 1.0);
    assert_eq!(vars[1].set("high").unwrap().dom(), 1.0);

    rule.clear_consequence_confidence(&mut vars);
    assert!(vars[1].sets().all(|(_, set)| set.dom() == 0.0));
    // The antecedent's variable is untouched
    assert_eq!(vars[0].set("close").unwrap().dom(), 1.0);
}

#[test]
fn test_rule_owns_copies_of_its_terms() {
    let f = fixture();
    let antecedent = f.close.clone().very();
    let rule = FuzzyRule::new(&antecedent, &f.high);
    drop(antecedent);

    assert_eq!(rule.antecedent(), &f.close.clone().very());
    assert_eq!(rule.consequence(), &f.high);
}

#[test]
fn test_consequence_variables_are_deduplicated() {
    let f = fixture();
    let rule = FuzzyRule::new(&f.close, &f.low.clone().or(f.high.clone()));
    let ids = rule.consequence_variables();
    assert_eq!(ids.len(), 1);
    assert_eq!(ids[0], f.module.variable_id("desirability").unwrap());
}

#[test]
fn test_rule_display() {
    let f = fixture();
    let rule = FuzzyRule::new(&f.close.clone().very().and(f.far.clone().fairly()), &f.low);
    insta::assert_snapshot!(
        rule.display(f.module.variables()),
        @"IF very distance.close AND fairly distance.far THEN desirability.low"
    );
}
