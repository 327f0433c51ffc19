//! CLI for the door-control hardware sizing engine.
//!
//! Pipeline: load project -> edit lines -> size controllers + expansion -> license -> report/export.

use clap::{Parser, Subcommand};
use dcsize_core::{
    DeviceKind, DeviceTally, FleetResult, LicenseOutcome, LicensePricing, LineId, SizingError,
};
use dcsize_engine::sink::csv_export::{export_path, CsvSink};
use dcsize_engine::sink::json_stream::JsonStreamSink;
use dcsize_engine::{calculate, calculate_line, license, reporter, Catalog, LineBook, Report};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "dcsize", version, about = "Door-control line hardware and license sizing")]
struct Cli {
    /// Project file holding the configured DC lines.
    #[arg(short, long, env = "DCSIZE_PROJECT", default_value = "dc_lines.json", global = true)]
    project: PathBuf,

    /// Gateway license add-on cost for redundant systems.
    #[arg(long, env = "DCSIZE_GATEWAY_COST", default_value_t = LicensePricing::default().gateway, global = true)]
    gateway_cost: u64,

    /// Redundancy license add-on cost for redundant systems.
    #[arg(long, env = "DCSIZE_REDUNDANCY_COST", default_value_t = LicensePricing::default().redundancy, global = true)]
    redundancy_cost: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a DC line. Unset devices default to 0.
    Add {
        /// Device count as `kind=value`, e.g. `smart_card=2`. Repeatable.
        #[arg(short, long = "set", value_parser = parse_assignment)]
        set: Vec<(DeviceKind, u32)>,
    },

    /// Change device counts on an existing DC line.
    Edit {
        #[arg(short, long)]
        line: LineId,

        #[arg(short, long = "set", value_parser = parse_assignment, required = true)]
        set: Vec<(DeviceKind, u32)>,
    },

    /// Show every line's devices and derived demand.
    Show,

    /// Size controllers and expansion modules.
    Calc {
        /// Only size this line.
        #[arg(short, long)]
        line: Option<LineId>,

        /// The system needs failover (global license with add-ons).
        #[arg(long, env = "DCSIZE_REDUNDANCY", default_value_t = false)]
        redundancy: bool,

        #[arg(long, default_value_t = false)]
        json: bool,

        /// Export the tabular layout; defaults to `dc_lines.csv`.
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        csv: Option<String>,

        /// Sink output: "ndjson" writes NDJSON to stdout,
        /// "ndjson:/path/to/file" writes to file.
        #[arg(long)]
        sink: Option<String>,
    },

    /// Resolve the license tier for the whole fleet.
    License {
        #[arg(long, env = "DCSIZE_REDUNDANCY", default_value_t = false)]
        redundancy: bool,
    },

    /// Remove every configured line.
    Clear,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let pricing = LicensePricing {
        gateway: cli.gateway_cost,
        redundancy: cli.redundancy_cost,
    };

    match run(&cli, &pricing) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Engine outcomes (unknown line, infeasible sizing) are reported, not raised.
        Err(e) => match e.downcast_ref::<SizingError>() {
            Some(sizing) => {
                eprintln!("error: {sizing}");
                Ok(ExitCode::FAILURE)
            }
            None => Err(e),
        },
    }
}

fn run(cli: &Cli, pricing: &LicensePricing) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::standard();
    let mut book = load_book(&cli.project)?;

    match &cli.command {
        Commands::Add { set } => {
            let tally = set
                .iter()
                .fold(DeviceTally::default(), |t, (kind, value)| t.with(*kind, *value));
            let id = book.add(tally);
            save_book(&cli.project, &book)?;
            let d = tally.demand();
            println!(
                "DC Line {id} added: {} readers, {} inputs, {} outputs",
                d.readers, d.inputs, d.outputs
            );
        }

        Commands::Edit { line, set } => {
            // Nothing is saved unless every assignment lands.
            for (kind, value) in set {
                book.set_device(*line, *kind, *value)?;
            }
            save_book(&cli.project, &book)?;
            if let Some(updated) = book.get(*line) {
                let d = updated.tally.demand();
                println!(
                    "DC Line {line} updated: {} readers, {} inputs, {} outputs",
                    d.readers, d.inputs, d.outputs
                );
            }
        }

        Commands::Show => print!("{}", reporter::render_lines(&book)),

        Commands::Calc {
            line,
            redundancy,
            json,
            csv,
            sink,
        } => {
            let fleet = match line {
                Some(id) => {
                    let dc = book.get(*id).ok_or(SizingError::LineNotFound(*id))?;
                    let mut fleet = FleetResult::new();
                    fleet.push(calculate_line(dc, catalog)?);
                    fleet
                }
                None => calculate(book.lines(), catalog)?,
            };

            // A single line is not a fleet; licensing needs every line.
            let outcome = line
                .is_none()
                .then(|| license::resolve(fleet.total_controllers(), *redundancy, pricing));
            let report = Report::build(&fleet, outcome.as_ref());

            if let Some(requested) = csv {
                let path = export_path(Some(requested));
                let file = std::fs::File::create(&path)?;
                let mut s = CsvSink::new(file);
                s.write_rows(&report.to_export_rows())?;
                let n = s.finish()?;
                tracing::info!(rows = n, path = %path.display(), "csv export written");
            }

            if let Some(sink_spec) = sink {
                let (summary, lines) = report.to_rows();

                if sink_spec == "ndjson" {
                    let mut s = JsonStreamSink::stdout();
                    s.write_summary(&summary)?;
                    s.write_lines(&lines)?;
                    let n = s.finish()?;
                    tracing::info!(rows = n, "ndjson sink: wrote to stdout");
                } else if let Some(path) = sink_spec.strip_prefix("ndjson:") {
                    let file = std::fs::File::create(path)?;
                    let mut s = JsonStreamSink::new(file);
                    s.write_summary(&summary)?;
                    s.write_lines(&lines)?;
                    let n = s.finish()?;
                    tracing::info!(rows = n, path, "ndjson sink: wrote to file");
                } else {
                    return Err(SizingError::InvalidInput(format!(
                        "unknown sink {sink_spec:?}, use 'ndjson' or 'ndjson:/path'"
                    ))
                    .into());
                }

                // Still print report to stderr so it's visible.
                eprint!("{}", report.render());
            } else if *json {
                let doc = serde_json::json!({
                    "fleet": fleet,
                    "license": outcome,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print!("{}", report.render());
            }
        }

        Commands::License { redundancy } => {
            let fleet = calculate(book.lines(), catalog)?;
            let outcome = license::resolve(fleet.total_controllers(), *redundancy, pricing);
            match &outcome {
                LicenseOutcome::NotApplicable => {
                    println!("No controllers configured! Add DC lines first.");
                }
                LicenseOutcome::Licensed(decision) => {
                    println!(
                        "{} for {} controllers ({})",
                        decision.tier.display_name(),
                        decision.total_controllers,
                        if decision.redundancy {
                            "redundant"
                        } else {
                            "non-redundant"
                        }
                    );
                    for add_on in &decision.add_ons {
                        println!("  + {} ${}", add_on.kind.display_name(), add_on.cost);
                    }
                    println!("Total license cost: ${}", decision.total_license_cost);
                }
            }
        }

        Commands::Clear => {
            book.clear();
            save_book(&cli.project, &book)?;
            println!("All DC lines cleared.");
        }
    }

    Ok(())
}

/// `kind=value` with a whole count from 0 to `MAX_DEVICE_COUNT`.
fn parse_assignment(s: &str) -> Result<(DeviceKind, u32), SizingError> {
    let (kind, value) = s
        .split_once('=')
        .ok_or_else(|| SizingError::InvalidInput(format!("expected kind=value, got {s:?}")))?;
    let kind: DeviceKind = kind.parse()?;
    let value = value.trim().parse::<u32>().map_err(|_| {
        SizingError::InvalidInput(format!(
            "{kind}: enter 0 or a positive whole number, got {:?}",
            value.trim()
        ))
    })?;
    Ok((kind, kind.check_count(value)?))
}

fn load_book(path: &Path) -> Result<LineBook, Box<dyn std::error::Error>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no project file, starting empty");
        return Ok(LineBook::new());
    }
    let text = std::fs::read_to_string(path)?;
    let book: LineBook = serde_json::from_str(&text)?;
    book.validate()?;
    tracing::debug!(path = %path.display(), lines = book.len(), "project loaded");
    Ok(book)
}

fn save_book(path: &Path, book: &LineBook) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, serde_json::to_string_pretty(book)?)?;
    Ok(())
}
