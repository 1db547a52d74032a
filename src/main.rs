use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use permission_expr::{EngineConfig, ExpressionPool, Report};
use tracing::Level;

/// Validate and evaluate permission expressions given on the command line.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Permission expressions, e.g. "(1 < 2) && ('ko' == 'ko')"
    #[arg(required = true)]
    expressions: Vec<String>,
    /// Print one JSON report per line
    #[arg(long)]
    json: bool,
    /// Engine configuration as a JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum parenthesis nesting depth (overrides the config file)
    #[arg(long)]
    max_depth: Option<usize>,
    /// Log to stderr; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match args.config.as_deref().map(load_config).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };
    if let Some(depth) = args.max_depth {
        config = config.with_max_nesting_depth(depth);
    }

    let pool = ExpressionPool::with_config(config);
    let reports: Vec<Report> = args
        .expressions
        .iter()
        .map(|expr| pool.get(expr).report())
        .collect();

    for report in &reports {
        if args.json {
            match serde_json::to_string(report) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("cannot encode report: {e}");
                    return ExitCode::from(2);
                }
            }
        } else {
            println!("{}", render(report));
        }
    }

    let invalid = reports.iter().filter(|r| !r.valid).collect::<Vec<_>>();
    if invalid.is_empty() {
        ExitCode::SUCCESS
    } else {
        eprintln!(
            "{} invalid: {}",
            invalid.len(),
            invalid.iter().map(|r| r.expression.as_str()).join(" | ")
        );
        ExitCode::FAILURE
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<EngineConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
    EngineConfig::from_json(&raw).map_err(|e| format!("invalid config {}: {e}", path.display()))
}

fn render(report: &Report) -> String {
    match (&report.error, report.granted) {
        (Some(error), _) => format!("invalid  {}  ({error})", report.expression),
        (None, true) => format!("granted  {}", report.expression),
        (None, false) => format!("denied   {}", report.expression),
    }
}
