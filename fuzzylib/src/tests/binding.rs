use crate::{DefuzzifyMethod, FuzzyError, FuzzyModule, PropertyBinding};

#[derive(Debug, Default)]
struct Agent {
    health: f64,
    threat: f64,
    aggression: f64,
    caution: f64,
}

fn module() -> FuzzyModule {
    let mut module = FuzzyModule::new();
    module
        .load_source(
            r#"
            variable health {
                low  = left_shoulder(0, 20, 60)
                high = right_shoulder(40, 80, 100)
            }
            variable threat {
                low  = left_shoulder(0, 30, 70)
                high = right_shoulder(30, 70, 100)
            }
            variable aggression {
                passive = left_shoulder(0, 20, 50)
                hostile = right_shoulder(50, 80, 100)
            }
            variable caution {
                calm  = left_shoulder(0, 20, 50)
                alert = right_shoulder(50, 80, 100)
            }
            rule IF health.high AND threat.low THEN aggression.hostile
            rule IF health.low OR threat.high THEN aggression.passive
            rule IF threat.high THEN caution.alert
            rule IF threat.low THEN caution.calm
            "#,
            "agent.fuzzy",
        )
        .unwrap();
    module
}

fn binding() -> PropertyBinding<Agent> {
    PropertyBinding::new()
        .input("health", |a: &Agent| a.health)
        .input("threat", |a: &Agent| a.threat)
        .output("aggression", |a: &mut Agent, v| a.aggression = v)
        .output("caution", |a: &mut Agent, v| a.caution = v)
}

#[test]
fn test_infer_writes_every_output() {
    let mut module = module();
    let mut agent = Agent {
        health: 90.0,
        threat: 10.0,
        ..Agent::default()
    };

    let trace = binding()
        .infer(&mut module, &mut agent, DefuzzifyMethod::MeanOfMaxima)
        .unwrap();

    assert_eq!(agent.aggression, 90.0);
    assert_eq!(agent.caution, 10.0);
    assert_eq!(trace.fired().count(), 2);
}

#[test]
fn test_fuzzify_reads_inputs() {
    let mut module = module();
    let agent = Agent {
        health: 10.0,
        threat: 50.0,
        ..Agent::default()
    };

    binding().fuzzify(&mut module, &agent).unwrap();
    let health = module.variable("health").unwrap();
    assert_eq!(health.set("low").unwrap().dom(), 1.0);
    assert_eq!(health.set("high").unwrap().dom(), 0.0);
    assert_eq!(module.variable("threat").unwrap().set("high").unwrap().dom(), 0.5);
}

#[test]
fn test_failed_defuzzify_leaves_object_untouched() {
    let mut module = module();
    let mut agent = Agent {
        health: 50.0,
        threat: 50.0,
        aggression: -1.0,
        caution: -1.0,
    };

    // No rule concludes anything about these sets for a fresh module
    let err = binding()
        .defuzzify(&module, &mut agent, DefuzzifyMethod::Centroid)
        .unwrap_err();
    assert_eq!(err, FuzzyError::NoActiveSets("aggression".to_string()));
    assert_eq!(agent.aggression, -1.0);
    assert_eq!(agent.caution, -1.0);

    module.fuzzify("health", 50.0).unwrap();
    module.fuzzify("threat", 50.0).unwrap();
    module.run_rules();
    binding()
        .defuzzify(&module, &mut agent, DefuzzifyMethod::Centroid)
        .unwrap();
    assert!(agent.aggression >= 0.0);
    assert!(agent.caution >= 0.0);
}

#[test]
fn test_bind_registers_both_directions() {
    struct Dial {
        level: f64,
    }

    let binding = PropertyBinding::new().bind(
        "level",
        |d: &Dial| d.level,
        |d: &mut Dial, v| d.level = v,
    );
    assert_eq!(binding.inputs().collect::<Vec<_>>(), vec!["level"]);
    assert_eq!(binding.outputs().collect::<Vec<_>>(), vec!["level"]);

    let mut module = FuzzyModule::new();
    module
        .load_source(
            "variable level { low = triangle(0, 0, 10) high = triangle(0, 10, 10) }\n\
             rule IF level.low THEN level.high",
            "dial.fuzzy",
        )
        .unwrap();

    let mut dial = Dial { level: 0.0 };
    binding
        .infer(&mut module, &mut dial, DefuzzifyMethod::WeightedAverage)
        .unwrap();
    // low stays fully active after the pass, high gains the same DOM
    assert_eq!(dial.level, 5.0);
}

#[test]
fn test_unknown_variable_in_binding() {
    let mut module = module();
    let binding = PropertyBinding::new().input("speed", |a: &Agent| a.health);
    let err = binding.fuzzify(&mut module, &Agent::default()).unwrap_err();
    assert_eq!(err, FuzzyError::UnknownVariable("speed".to_string()));
}
