use crate::error::NameKind;
use crate::{DefuzzifyMethod, EmptyOutputPolicy, FuzzyError, FuzzySet, FuzzyVariable, InferenceConfig};

fn temperature() -> FuzzyVariable {
    let mut variable = FuzzyVariable::new("temperature");
    variable
        .add_term("cold", FuzzySet::triangle(0.0, 0.0, 20.0).unwrap())
        .unwrap();
    variable
        .add_term("warm", FuzzySet::triangle(10.0, 25.0, 40.0).unwrap())
        .unwrap();
    variable
        .add_term("hot", FuzzySet::triangle(30.0, 50.0, 50.0).unwrap())
        .unwrap();
    variable
}

#[test]
fn test_fuzzify_sets_every_dom() {
    let mut variable = temperature();
    variable.fuzzify(25.0).unwrap();

    assert_eq!(
        variable.doms(),
        vec![
            ("cold".to_string(), 0.0),
            ("warm".to_string(), 1.0),
            ("hot".to_string(), 0.0),
        ]
    );
}

#[test]
fn test_fuzzify_overwrites_previous_doms() {
    let mut variable = temperature();
    variable.fuzzify(35.0).unwrap();
    assert_eq!(variable.set("hot").unwrap().dom(), 0.25);

    variable.fuzzify(5.0).unwrap();
    assert_eq!(variable.set("hot").unwrap().dom(), 0.0);
    assert_eq!(variable.set("cold").unwrap().dom(), 0.75);
}

#[test]
fn test_fuzzify_rejects_non_finite_values() {
    let mut variable = temperature();
    let err = variable.fuzzify(f64::NAN).unwrap_err();
    assert!(matches!(err, FuzzyError::InvalidValue { ref variable, .. } if variable == "temperature"));
    assert!(variable.fuzzify(f64::INFINITY).is_err());
    assert!(variable.fuzzify(f64::NEG_INFINITY).is_err());
}

#[test]
fn test_range_covers_every_set() {
    let mut variable = FuzzyVariable::new("v");
    assert_eq!(variable.range(), None);

    variable
        .add_term("mid", FuzzySet::triangle(10.0, 20.0, 30.0).unwrap())
        .unwrap();
    assert_eq!(variable.range(), Some((10.0, 30.0)));

    variable
        .add_term("low", FuzzySet::left_shoulder(-5.0, 0.0, 15.0).unwrap())
        .unwrap();
    variable
        .add_term("high", FuzzySet::right_shoulder(25.0, 40.0, 60.0).unwrap())
        .unwrap();
    assert_eq!(variable.range(), Some((-5.0, 60.0)));
}

#[test]
fn test_duplicate_term_is_rejected() {
    let mut variable = temperature();
    let err = variable
        .add_term("warm", FuzzySet::triangle(0.0, 1.0, 2.0).unwrap())
        .unwrap_err();
    assert_eq!(
        err,
        FuzzyError::DuplicateName {
            kind: NameKind::Term,
            name: "warm".to_string(),
        }
    );
    assert_eq!(variable.len(), 3);
}

#[test]
fn test_term_lookup_keeps_insertion_order() {
    let variable = temperature();
    assert_eq!(variable.term_names(), ["cold", "warm", "hot"]);
    assert_eq!(variable.term_index("hot"), Some(2));
    assert_eq!(variable.term_index("tepid"), None);
    assert_eq!(variable.name_at(1), Some("warm"));

    let names: Vec<&str> = variable.sets().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["cold", "warm", "hot"]);
}

#[test]
fn test_defuzzify_mean_of_maxima() {
    let mut variable = temperature();
    variable.fuzzify(25.0).unwrap();
    let value = variable
        .defuzzify(DefuzzifyMethod::MeanOfMaxima, &InferenceConfig::default())
        .unwrap();
    assert_eq!(value, 25.0);
}

#[test]
fn test_defuzzify_with_no_active_sets() {
    let variable = temperature();

    let err = variable
        .defuzzify(DefuzzifyMethod::Centroid, &InferenceConfig::default())
        .unwrap_err();
    assert_eq!(err, FuzzyError::NoActiveSets("temperature".to_string()));

    let config = InferenceConfig::default().with_empty_output(EmptyOutputPolicy::Midpoint);
    for method in [
        DefuzzifyMethod::Centroid,
        DefuzzifyMethod::MeanOfMaxima,
        DefuzzifyMethod::WeightedAverage,
    ] {
        assert_eq!(variable.defuzzify(method, &config).unwrap(), 25.0);
    }
}

#[test]
fn test_defuzzify_empty_variable() {
    let variable = FuzzyVariable::new("nothing");
    assert!(matches!(
        variable.defuzzify(DefuzzifyMethod::Centroid, &InferenceConfig::default()),
        Err(FuzzyError::NoActiveSets(_))
    ));
}

#[test]
fn test_clear_doms() {
    let mut variable = temperature();
    variable.fuzzify(15.0).unwrap();
    assert!(variable.sets().any(|(_, set)| set.dom() > 0.0));

    variable.clear_doms();
    assert!(variable.sets().all(|(_, set)| set.dom() == 0.0));
}
