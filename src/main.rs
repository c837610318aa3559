//! Cube Solver
//!
//! Scrambles a 3x3x3 cube from a seed and solves it layer by layer, printing
//! every step's turns.

use clap::{Parser, Subcommand};
use log::error;

use cubist::scramble::{self, DEFAULT_LENGTH};
use cubist::session::{self, SessionConfig, SessionReport};
use cubist::{Cube, CubeError, RotationEngine, Solver, Stage, Turn};

/// Scrambles and solves a 3x3x3 cube.
#[derive(Parser)]
#[command(name = "cubist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scramble a cube and solve it step by step.
    Solve {
        /// Seed for the scramble.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Number of scramble turns.
        #[arg(long, default_value_t = DEFAULT_LENGTH)]
        length: usize,
        /// Stop once this stage is reached.
        #[arg(long, value_enum, default_value_t = Stage::Solved)]
        until: Stage,
        /// Give up after this many solve steps.
        #[arg(long, default_value_t = SessionConfig::default().max_steps)]
        max_steps: usize,
    },
    /// Print a scramble without solving it.
    Scramble {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = DEFAULT_LENGTH)]
        length: usize,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Solve {
            seed,
            length,
            until,
            max_steps,
        }) => run_solve(seed, length, SessionConfig { until, max_steps }),
        Some(Command::Scramble { seed, length }) => {
            println!("{}", format_turns(&scramble::seeded(seed, length)));
            Ok(())
        }
        // default: solve a standard scramble
        None => run_solve(0, DEFAULT_LENGTH, SessionConfig::default()),
    };

    if let Err(e) = result {
        error!("{e}");
        eprintln!("Failed to solve: {e}");
        std::process::exit(1);
    }
}

/// Scrambles from `seed`, solves up to `config.until` and prints the steps.
fn run_solve(seed: u64, length: usize, config: SessionConfig) -> Result<(), CubeError> {
    let turns = scramble::seeded(seed, length);
    println!("Scramble: {}", format_turns(&turns));

    let mut cube = Cube::new();
    cube.apply_all(&turns)?;
    let mut solver = Solver::new();
    let report = session::run(&mut cube, &mut solver, &config)?;
    print!("{}", format_report(&report));
    Ok(())
}

/// Comma-separated turn notation, e.g. `X0 +180, Y+1 -90`.
fn format_turns(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(Turn::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per non-empty step, then a summary line.
fn format_report(report: &SessionReport) -> String {
    let mut output = String::new();
    for (i, step) in report
        .steps
        .iter()
        .enumerate()
        .filter(|(_, step)| !step.turns.is_empty())
    {
        output.push_str(&format!(
            "#{} {}: {}\n",
            i + 1,
            step.stage,
            format_turns(&step.turns)
        ));
    }
    output.push_str(&format!(
        "Reached {} in {} steps, {} turns\n",
        report.stage,
        report.steps.len(),
        report.turn_count()
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubist::geometry::{Axis, Direction};
    use cubist::Slice;

    #[test]
    fn test_format_turns_snapshot() {
        let turns = [
            Turn::new(Slice::new(Axis::X, 0), 180),
            Turn::on(Direction::Up, -90),
            Turn::clockwise(Direction::Left, 1),
        ];
        insta::assert_snapshot!(format_turns(&turns), @"X0 +180, Y+1 -90, X-1 +90");
    }

    #[test]
    fn test_fresh_cube_report_snapshot() {
        let mut cube = Cube::new();
        let mut solver = Solver::new();
        let report = session::run(&mut cube, &mut solver, &SessionConfig::default())
            .expect("fresh cube solves");
        insta::assert_snapshot!(format_report(&report), @r"
        #1 white-center: X0 +180
        #2 white-cross: X-1 +180
        #3 white-cross: X+1 +180
        Reached solved in 3 steps, 3 turns
        ");
    }

    #[test]
    fn test_seeded_solve_is_reproducible() {
        let mut cube = Cube::new();
        cube.apply_all(&scramble::seeded(0, DEFAULT_LENGTH))
            .expect("valid turns");
        let mut solver = Solver::new();
        let first = session::run(&mut cube, &mut solver, &SessionConfig::default())
            .expect("solvable");
        assert!(cube.is_solved());

        let mut again = Cube::new();
        again
            .apply_all(&scramble::seeded(0, DEFAULT_LENGTH))
            .expect("valid turns");
        let second = session::run(&mut again, &mut Solver::new(), &SessionConfig::default())
            .expect("solvable");
        assert_eq!(first, second);
    }
}
