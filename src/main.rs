use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    thread,
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{debug, info};

use pet_detective::{Puzzle, Solution};

/// Finds the shortest drive that brings every pet home.
#[derive(Parser)]
#[command(name = "pet-detective")]
#[command(version)]
struct Cli {
    /// Map files to solve
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Only print the summary line for each map
    #[arg(short, long)]
    quiet: bool,

    /// How many maps to solve at the same time
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,
}

fn load_and_solve(path: &Path) -> Result<(Puzzle, Solution)> {
    let puzzle = Puzzle::read_from_file(path)
        .with_context(|| format!("cannot load {}", path.display()))?;

    info!("solving {}", path.display());
    let solution = puzzle.solve();

    Ok((puzzle, solution))
}

fn report(path: &Path, puzzle: &Puzzle, solution: &Solution, quiet: bool) {
    println!("--- {} ---", path.display());

    if !quiet {
        for (i, step) in solution.steps().enumerate() {
            println!("step #{}", i);
            println!("{}", step.display(&puzzle.grid));
            println!();
        }
    }

    let stats = solution.stats;
    debug!(
        "{}: expanded {}, generated {}, {} distinct states",
        path.display(),
        stats.expanded,
        stats.generated,
        stats.states
    );

    match solution.moves() {
        Some(moves) => println!("{}: solved in {}", path.display(), moves),
        None => println!("{}: no solution", path.display()),
    }
    println!();
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut failed = false;

    // each map gets its own grid, registry and search; nothing is shared
    for batch in cli.files.chunks(cli.jobs.max(1)) {
        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = batch
                .iter()
                .map(|path| s.spawn(move || load_and_solve(path)))
                .collect();

            handles
                .into_iter()
                .map(|h| {
                    h.join()
                        .unwrap_or_else(|_| Err(anyhow!("solver thread panicked")))
                })
                .collect()
        });

        for (path, result) in batch.iter().zip(results) {
            match result {
                Ok((puzzle, solution)) => report(path, &puzzle, &solution, cli.quiet),
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    failed = true;
                }
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
