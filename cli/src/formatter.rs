use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use fuzzylib::{FuzzyModule, FuzzyVariable};
use serde::Serialize;

/// Outcome of one `fuzzy run` inference cycle
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub outputs: Vec<OutputReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<FiredRule>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputReport {
    pub variable: String,
    pub value: f64,
    pub doms: Vec<SetDom>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetDom {
    pub set: String,
    pub dom: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FiredRule {
    pub index: usize,
    pub rule: String,
    pub confidence: f64,
}

impl OutputReport {
    pub fn new(variable: &FuzzyVariable, value: f64) -> Self {
        Self {
            variable: variable.name().to_string(),
            value,
            doms: variable
                .doms()
                .into_iter()
                .map(|(set, dom)| SetDom { set, dom })
                .collect(),
        }
    }
}

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_report(&self, report: &RunReport, raw: bool) -> String {
        if raw {
            return report
                .outputs
                .iter()
                .map(|output| format!("{}\n", format_number(output.value)))
                .collect();
        }

        let mut output = self.format_outputs_table(&report.outputs);
        output.push('\n');

        if let Some(trace) = &report.trace {
            output.push('\n');
            output.push_str(&self.format_trace_table(trace));
            output.push('\n');
        }

        output
    }

    pub fn format_json(&self, report: &RunReport) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(report)?;
        json.push('\n');
        Ok(json)
    }

    fn format_outputs_table(&self, outputs: &[OutputReport]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Variable").set_alignment(CellAlignment::Left),
            Cell::new("Value").set_alignment(CellAlignment::Right),
            Cell::new("Degrees of membership").set_alignment(CellAlignment::Left),
        ]));

        for output in outputs {
            let doms = output
                .doms
                .iter()
                .map(|d| format!("{}: {}", d.set, format_number(d.dom)))
                .collect::<Vec<_>>()
                .join("\n");
            table.add_row(Row::from(vec![
                Cell::new(&output.variable),
                Cell::new(format_number(output.value)).set_alignment(CellAlignment::Right),
                Cell::new(doms),
            ]));
        }

        table.to_string()
    }

    fn format_trace_table(&self, trace: &[FiredRule]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("#").set_alignment(CellAlignment::Right),
            Cell::new("Fired rule").set_alignment(CellAlignment::Left),
            Cell::new("Confidence").set_alignment(CellAlignment::Right),
        ]));

        if trace.is_empty() {
            table.add_row(Row::from(vec![
                Cell::new(""),
                Cell::new("(no rule fired)"),
                Cell::new(""),
            ]));
        }
        for fired in trace {
            table.add_row(Row::from(vec![
                Cell::new(fired.index + 1).set_alignment(CellAlignment::Right),
                Cell::new(&fired.rule),
                Cell::new(format_number(fired.confidence)).set_alignment(CellAlignment::Right),
            ]));
        }

        table.to_string()
    }

    pub fn format_module_inspection(&self, module: &FuzzyModule) -> String {
        let mut output = String::new();

        output.push_str(&format!("variables ({}):\n", module.variables().len()));
        for variable in module.variables() {
            output.push_str(&format!(
                "\n{} {}\n",
                variable.name(),
                format_range(variable.range())
            ));

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(Row::from(vec![
                Cell::new("Set").set_alignment(CellAlignment::Left),
                Cell::new("Shape").set_alignment(CellAlignment::Left),
                Cell::new("Representative").set_alignment(CellAlignment::Right),
            ]));
            for (name, set) in variable.sets() {
                table.add_row(Row::from(vec![
                    Cell::new(name),
                    Cell::new(set.shape().to_string()),
                    Cell::new(format_number(set.representative_value()))
                        .set_alignment(CellAlignment::Right),
                ]));
            }
            output.push_str(&table.to_string());
            output.push('\n');
        }

        output.push_str(&format!("\nrules ({}):\n", module.rules().len()));
        for index in 0..module.rules().len() {
            if let Some(rule) = module.display_rule(index) {
                output.push_str(&format!("  {}. {}\n", index + 1, rule));
            }
        }
        output
    }

    pub fn format_check_summary(&self, file_count: usize, module: &FuzzyModule) -> String {
        let outputs: Vec<&str> = module
            .output_variables()
            .iter()
            .map(|v| v.name())
            .collect();
        let inputs: Vec<&str> = module
            .variables()
            .iter()
            .map(|v| v.name())
            .filter(|name| !outputs.contains(name))
            .collect();
        let set_count: usize = module.variables().iter().map(FuzzyVariable::len).sum();

        let mut output = String::new();
        output.push_str(&format!(
            "Rule base contains {} files, {} variables, {} sets, {} rules\n\n",
            file_count,
            module.variables().len(),
            set_count,
            module.rules().len()
        ));
        output.push_str(&format!("inputs: {}\n", join_or_none(&inputs)));
        output.push_str(&format!("outputs: {}\n", join_or_none(&outputs)));
        output
    }
}

/// Four decimals at most, without trailing zeros
pub fn format_number(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn format_range(range: Option<(f64, f64)>) -> String {
    match range {
        Some((min, max)) => format!("[{}, {}]", format_number(min), format_number(max)),
        None => "(no sets)".to_string(),
    }
}

fn join_or_none(names: &[&str]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
