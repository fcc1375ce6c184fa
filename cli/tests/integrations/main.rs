mod run;
mod server;
mod show;

use std::fs;
use std::path::Path;

pub const ROCKET_LAUNCHER_VARIABLES: &str = r#"
variable distance {
    close  = left_shoulder(0, 25, 150)
    medium = triangle(25, 150, 300)
    far    = right_shoulder(150, 300, 1000)
}

variable ammo {
    low   = triangle(0, 0, 10)
    okay  = triangle(0, 10, 30)
    loads = right_shoulder(10, 30, 40)
}

variable desirability {
    undesirable    = left_shoulder(0, 25, 50)
    desirable      = triangle(25, 50, 75)
    very_desirable = right_shoulder(50, 75, 100)
}
"#;

pub const ROCKET_LAUNCHER_RULES: &str = r#"
rule IF distance.far AND ammo.loads THEN desirability.desirable
rule IF distance.far AND ammo.okay  THEN desirability.undesirable
rule IF distance.far AND ammo.low   THEN desirability.undesirable
rule IF distance.medium AND ammo.loads THEN desirability.very_desirable
rule IF distance.medium AND ammo.okay  THEN desirability.very_desirable
rule IF distance.medium AND ammo.low   THEN desirability.desirable
rule IF distance.close AND ammo.loads THEN desirability.undesirable
rule IF distance.close AND ammo.okay  THEN desirability.undesirable
rule IF distance.close AND ammo.low   THEN desirability.undesirable
"#;

/// Rules live in a file sorted before the variables they use
pub fn write_rocket_launcher(dir: &Path) {
    fs::write(dir.join("a_rules.fuzzy"), ROCKET_LAUNCHER_RULES).unwrap();
    fs::write(dir.join("b_variables.fuzzy"), ROCKET_LAUNCHER_VARIABLES).unwrap();
}
