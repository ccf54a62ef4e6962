use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use paper_packer::input::PackingRequest;
use paper_packer::report::Report;
use paper_packer::solver::{Solver, SolverConfig};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "paper_packer",
    about = "Count how many pieces fit on a sheet using up to one cross cut"
)]
struct Cli {
    /// Sheet dimensions (LxW, e.g. 100x70)
    #[arg(long, required_unless_present = "request", conflicts_with = "request")]
    sheet: Option<String>,

    /// Piece dimensions (LxW, e.g. 30x20)
    #[arg(long, required_unless_present = "request", conflicts_with = "request")]
    piece: Option<String>,

    /// Margin added on both ends of the piece length (default: 0)
    #[arg(long, default_value = "")]
    margin_length: String,

    /// Margin added on both ends of the piece width (default: 0)
    #[arg(long, default_value = "")]
    margin_width: String,

    /// Read the request fields from a JSON file instead
    #[arg(long, value_name = "FILE")]
    request: Option<PathBuf>,

    /// Scan split positions on all cores
    #[arg(long)]
    parallel: bool,

    /// Abort the search after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Show the per-region breakdown
    #[arg(long)]
    layout: bool,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

fn split_dimensions(s: &str) -> Result<(&str, &str), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid dimensions '{}', expected LxW", s));
    }
    Ok((parts[0], parts[1]))
}

fn build_request(cli: &Cli) -> Result<PackingRequest, String> {
    if let Some(path) = &cli.request {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {}", path.display(), e))?;
        return serde_json::from_str(&text)
            .map_err(|e| format!("could not parse {}: {}", path.display(), e));
    }
    let sheet = split_dimensions(cli.sheet.as_deref().unwrap_or_default())?;
    let piece = split_dimensions(cli.piece.as_deref().unwrap_or_default())?;
    Ok(PackingRequest::new(sheet, piece).with_margins(&cli.margin_length, &cli.margin_width))
}

fn run(cli: &Cli) -> Result<Report, String> {
    let request = build_request(cli)?;
    let job = request.prepare().map_err(|e| e.to_string())?;
    tracing::info!(sheet = %job.sheet, piece = %job.piece, "prepared job");

    let config = SolverConfig {
        parallel: cli.parallel,
        time_limit: cli.timeout_ms.map(Duration::from_millis),
    };
    let solver = Solver::new(job.sheet, job.piece, config).map_err(|e| e.to_string())?;
    let packing = solver.solve().map_err(|e| e.to_string())?;
    Ok(Report::new(&job, &packing))
}

fn print_report(report: &Report, show_layout: bool) {
    println!("Sheet: {}", report.sheet);
    println!("Piece: {}", report.piece);
    if report.simple_mode {
        println!("Split: none");
    } else {
        println!("Split: {}", report.best_split);
    }
    println!("Horizontal stacking: {}", report.horizontal_stacking);
    println!("Vertical stacking: {}", report.vertical_stacking);

    if show_layout {
        for (i, region) in report.layout.regions.iter().enumerate() {
            println!(
                "  Region {}: {} @ ({}, {}) {:?} {}x{} = {}",
                i + 1,
                region.area,
                region.x,
                region.y,
                region.orientation,
                region.columns,
                region.rows,
                region.count(),
            );
        }
    }

    println!();
    println!(
        "Summary: {} piece{}, {:.2} residue, {:.1}% waste",
        report.max_fit,
        if report.max_fit == 1 { "" } else { "s" },
        report.residue,
        report.waste_percent,
    );
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(cli.log_level)
        .init();

    let report = run(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_report(&report, cli.layout);
    }
}
