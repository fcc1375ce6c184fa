mod error_formatter;
mod formatter;
mod server;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use formatter::{FiredRule, Formatter, OutputReport, RunReport};
use fuzzylib::{DefuzzifyMethod, EmptyOutputPolicy, FuzzyModule, InferenceConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "fuzzy")]
#[command(about = "Fuzzy-logic inference over linguistic variables.")]
#[command(
    long_about = "Evaluates fuzzy rule bases written in .fuzzy files.\nThe CLI runs one inference cycle from the command line, inspects and validates rule bases, or serves them over HTTP."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one inference cycle and display the crisp outputs
    ///
    /// Loads every .fuzzy file from the workspace, fuzzifies the given inputs,
    /// evaluates all rules and defuzzifies the requested outputs.
    Run {
        /// Crisp inputs (format: name=value)
        ///
        /// Examples: distance=200 ammo=8
        #[arg(value_name = "NAME=VALUE")]
        inputs: Vec<String>,
        /// Workspace root directory (or single file) containing .fuzzy files
        #[arg(short = 'd', long = "dir", default_value = ".")]
        workdir: PathBuf,
        /// Output variable to defuzzify (repeatable, default: every rule consequence)
        #[arg(short = 'o', long = "output")]
        outputs: Vec<String>,
        /// Defuzzification method: centroid, mean-of-maxima or weighted-average
        #[arg(short = 'm', long, default_value = "centroid")]
        method: DefuzzifyMethod,
        /// Sampling intervals used by the centroid method
        #[arg(long)]
        samples: Option<usize>,
        /// Answer the domain midpoint instead of failing when an output has no active set
        #[arg(long)]
        midpoint: bool,
        /// Output raw values only (for piping to other tools)
        #[arg(short = 'r', long, conflicts_with = "json")]
        raw: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
        /// Also list the rules that fired and their confidence
        #[arg(short = 't', long)]
        trace: bool,
    },
    /// Show variables, sets and rules of a rule base
    Show {
        /// Workspace root directory (or single file) containing .fuzzy files
        #[arg(short = 'd', long = "dir", default_value = ".")]
        workdir: PathBuf,
    },
    /// Load and validate a rule base, then print a summary
    Check {
        /// Workspace root directory (or single file) containing .fuzzy files
        #[arg(short = 'd', long = "dir", default_value = ".")]
        workdir: PathBuf,
    },
    /// Start HTTP REST API server (default: localhost:3000)
    ///
    /// Serves the loaded rule base over HTTP.
    /// API: GET /health, GET /variables, POST /infer with {inputs, outputs?, method?}
    Server {
        /// Workspace root directory containing .fuzzy files
        #[arg(short = 'd', long = "dir", default_value = ".")]
        workdir: PathBuf,
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Server { .. } => "fuzzylib=info,fuzzy=info,tower_http=info",
        _ => "fuzzylib=warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Run {
            inputs,
            workdir,
            outputs,
            method,
            samples,
            midpoint,
            raw,
            json,
            trace,
        } => {
            let mut config = InferenceConfig::default();
            if let Some(samples) = samples {
                config = config.with_centroid_samples(*samples);
            }
            if *midpoint {
                config = config.with_empty_output(EmptyOutputPolicy::Midpoint);
            }
            let options = RunOptions {
                method: *method,
                raw: *raw,
                json: *json,
                trace: *trace,
            };
            run_command(workdir, config, inputs, outputs, options)
        }
        Commands::Show { workdir } => show_command(workdir),
        Commands::Check { workdir } => check_command(workdir),
        Commands::Server {
            workdir,
            host,
            port,
        } => server_command(workdir, host, *port),
    };

    if let Err(e) = result {
        if let Some(fuzzy_err) = e.downcast_ref::<fuzzylib::FuzzyError>() {
            eprintln!("{}", error_formatter::format_error(fuzzy_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

struct RunOptions {
    method: DefuzzifyMethod,
    raw: bool,
    json: bool,
    trace: bool,
}

fn run_command(
    workdir: &Path,
    config: InferenceConfig,
    inputs: &[String],
    outputs: &[String],
    options: RunOptions,
) -> Result<()> {
    let (mut module, _) = load_workspace(workdir, config)?;

    for (name, value) in parse_inputs(inputs)? {
        module.fuzzify(&name, value)?;
    }
    let trace = module.run_rules();

    let targets: Vec<String> = if outputs.is_empty() {
        module
            .output_variables()
            .iter()
            .map(|v| v.name().to_string())
            .collect()
    } else {
        outputs.to_vec()
    };
    if targets.is_empty() {
        bail!("No output variables: the rule base has no rules");
    }

    let mut reports = Vec::with_capacity(targets.len());
    for name in &targets {
        let value = module.defuzzify(name, options.method)?;
        let variable = module
            .variable(name)
            .ok_or_else(|| fuzzylib::FuzzyError::UnknownVariable(name.clone()))?;
        reports.push(OutputReport::new(variable, value));
    }

    let fired: Option<Vec<FiredRule>> = options.trace.then(|| {
        trace
            .fired()
            .map(|firing| FiredRule {
                index: firing.index,
                rule: module.display_rule(firing.index).unwrap_or_default(),
                confidence: firing.confidence,
            })
            .collect()
    });

    let report = RunReport {
        outputs: reports,
        trace: fired,
    };
    let formatter = Formatter::default();
    if options.json {
        print!("{}", formatter.format_json(&report)?);
    } else {
        print!("{}", formatter.format_report(&report, options.raw));
    }

    Ok(())
}

fn show_command(workdir: &Path) -> Result<()> {
    let (module, _) = load_workspace(workdir, InferenceConfig::default())?;

    let formatter = Formatter::default();
    print!("{}", formatter.format_module_inspection(&module));

    Ok(())
}

fn check_command(workdir: &Path) -> Result<()> {
    let (module, file_count) = load_workspace(workdir, InferenceConfig::default())?;

    let formatter = Formatter::default();
    print!("{}", formatter.format_check_summary(file_count, &module));

    Ok(())
}

fn server_command(workdir: &Path, host: &str, port: u16) -> Result<()> {
    #[cfg(feature = "server")]
    {
        use tokio::runtime::Runtime;
        let rt = Runtime::new()?;
        rt.block_on(async {
            let (module, _) = load_workspace(workdir, InferenceConfig::default())?;

            println!(
                "Starting HTTP server with {} variable(s) and {} rule(s) loaded",
                module.variables().len(),
                module.rules().len()
            );
            server::http::start_server(module, host, port).await
        })?;
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (workdir, host, port);
        eprintln!("Error: Server feature not enabled");
        eprintln!("Recompile with: cargo build --features server");
        std::process::exit(1);
    }

    Ok(())
}

/// Parse `name=value` pairs into crisp inputs
fn parse_inputs(inputs: &[String]) -> Result<Vec<(String, f64)>> {
    inputs
        .iter()
        .map(|input| {
            let (name, value) = input
                .split_once('=')
                .ok_or_else(|| anyhow!("Invalid input '{}': expected NAME=VALUE", input))?;
            let value: f64 = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid input '{}': value is not a number", input))?;
            Ok((name.trim().to_string(), value))
        })
        .collect()
}

/// Load every `.fuzzy` file under `workdir` (or `workdir` itself when it is
/// a file) into one module. Returns the module and the number of files read.
fn load_workspace(workdir: &Path, config: InferenceConfig) -> Result<(FuzzyModule, usize)> {
    let mut sources = Vec::new();
    for entry in WalkDir::new(workdir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|s| s.to_str()) == Some("fuzzy")
        {
            let path = entry.path();
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            sources.push((path.to_string_lossy().to_string(), text));
        }
    }

    if sources.is_empty() {
        bail!("No .fuzzy files found in {}", workdir.display());
    }

    let mut module = FuzzyModule::with_config(config);
    module.load_sources(
        sources
            .iter()
            .map(|(source_id, text)| (text.as_str(), source_id.as_str())),
    )?;

    Ok((module, sources.len()))
}
