//! Hua Rong Dao Puzzle Solver
//!
//! Reads a puzzle file, searches for a move sequence that brings the 2x2
//! goal piece to the exit, and writes the board sequence to a solution
//! file. The search algorithm is selected on the command line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::info;

use klotski::persistence;
use klotski::solver::{self, Algorithm, Options};

/// Solves the 4x5 Hua Rong Dao sliding-block puzzle.
#[derive(Parser)]
#[command(name = "klotski")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The input file that contains the puzzle.
    #[arg(long)]
    inputfile: PathBuf,
    /// The output file the solution is written to.
    #[arg(long)]
    outputfile: PathBuf,
    /// The search algorithm.
    #[arg(long, value_enum)]
    algo: Algo,
}

#[derive(Clone, Copy, ValueEnum)]
enum Algo {
    Astar,
    Dfs,
}

impl From<Algo> for Algorithm {
    fn from(algo: Algo) -> Self {
        match algo {
            Algo::Astar => Algorithm::Astar,
            Algo::Dfs => Algorithm::Dfs,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let board = match persistence::load_puzzle(&cli.inputfile) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let options = Options {
        algorithm: cli.algo.into(),
        ..Options::default()
    };

    match solver::solve(&board, options) {
        Ok(solution) => {
            info!(
                "solved in {} moves ({} states expanded, {} generated)",
                solution.depth, solution.stats.expanded, solution.stats.generated
            );
            if let Err(e) = persistence::write_solution(&cli.outputfile, &solution.boards) {
                eprintln!("failed to write {}: {e}", cli.outputfile.display());
                return ExitCode::FAILURE;
            }
            println!("Solved in {} moves", solution.depth);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
