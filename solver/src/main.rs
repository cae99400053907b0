use std::fs;
use std::num::NonZero;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use flowlink::loader::{expectation_from_file_name, parse_board};
use flowlink::{SolveOutcome, SolverConfig};

use crate::report::{log_summary, write_csv, CaseReport};

mod report;

/// Solve Flow Free boards and report how the solver fared on each.
#[derive(Parser, Debug)]
#[command(name = "flowlink-solver", version)]
struct Args {
    /// Board files, or directories whose `*.txt` files are boards
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Most candidate paths enumerated per pair at each search state
    #[arg(long, default_value_t = SolverConfig::DEFAULT_PATH_LIMIT)]
    limit: NonZero<usize>,

    /// Search on a single thread
    #[arg(long)]
    sequential: bool,

    /// Print every solved board
    #[arg(long)]
    print: bool,

    /// Write one CSV row per board to this file
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = SolverConfig {
        path_limit: args.limit,
        parallel: !args.sequential,
    };

    let files = collect_board_files(&args.paths)?;
    info!("solving {} boards with {:?}", files.len(), config);

    let reports = files.iter()
        .map(|file| run_case(file, &config, args.print))
        .collect::<Vec<_>>();

    if let Some(csv_path) = &args.csv {
        write_csv(csv_path, &reports)?;
        info!("CSV written to {}", csv_path.display());
    }

    log_summary(&reports);
    Ok(())
}

/// Expand directories into their `*.txt` files, sorted by name.
fn collect_board_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found = fs::read_dir(path)
                .with_context(|| format!("reading directory {}", path.display()))?
                .map(|entry| entry.map(|entry| entry.path()))
                .collect::<std::io::Result<Vec<_>>>()
                .with_context(|| format!("listing directory {}", path.display()))?;
            found.retain(|file| file.extension().is_some_and(|ext| ext == "txt"));
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }

    Ok(files)
}

/// Load, solve and time one board. Failures to read or parse it are recorded rather than propagated.
fn run_case(file: &Path, config: &SolverConfig, print: bool) -> CaseReport {
    let name = file.file_name().map_or_else(|| file.display().to_string(), |name| name.to_string_lossy().into_owned());
    let mut report = CaseReport::new(name.clone(), expectation_from_file_name(&name));

    let loaded = fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))
        .and_then(|text| parse_board(&text).with_context(|| format!("parsing {}", file.display())));

    let board = match loaded {
        Ok(board) => board,
        Err(err) => {
            warn!("{name}: {err:#}");
            report.error = Some(format!("{err:#}"));
            return report;
        }
    };

    report.board_size = board.size();
    report.colors = board.pairs().len();

    let started = Instant::now();
    let (outcome, stats) = board.solve_with_statistics(config);
    report.seconds = started.elapsed().as_secs_f64();

    match outcome {
        SolveOutcome::Found(solution) => {
            report.solved = true;
            info!("{name}: solved in {:.3}s ({} states, {} backtracks)", report.seconds, stats.states, stats.backtracks);
            if print {
                println!("{name}\n{solution}");
            }
        }
        SolveOutcome::Exhausted => {
            info!("{name}: no solution found in {:.3}s ({} states)", report.seconds, stats.states);
        }
    }

    report
}
