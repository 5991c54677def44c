use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use taquin_solver::engine::Board;
use taquin_solver::heuristics::HeuristicKind;
use taquin_solver::solver::{
    solve_with_observer, AlgorithmKind, SearchLimits, SearchObserver, SolutionHolder,
};
use taquin_solver::utils::board_from_str;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search algorithm: astar, greedy-astar, uniform-cost or idastar
    #[clap(short, long, default_value = "astar")]
    algorithm: String,

    /// Heuristic: uniform-cost, displaced-tiles, manhattan or linear-conflict
    #[clap(short = 'e', long, default_value = "manhattan")]
    heuristic: String,

    /// Board edge length for generated scrambles
    #[clap(short, long, default_value_t = 3)]
    #[clap(value_parser = clap::value_parser!(u16).range(2..=255))]
    size: u16,

    /// Number of random moves in a generated scramble
    #[clap(short = 'd', long, default_value_t = 20)]
    shuffle_depth: usize,

    /// Seed for the scramble generator
    #[clap(long, default_value_t = 514514)]
    seed: u64,

    /// Abandon the search after this many milliseconds (0 = unbounded)
    #[clap(long, default_value_t = 0)]
    max_runtime_ms: u64,

    /// Abandon the search once the frontier exceeds this size (0 = unbounded)
    #[clap(long, default_value_t = 0)]
    max_frontier_size: usize,

    /// Print a progress line every this many expansions (0 = silent)
    #[clap(short, long, default_value_t = 0)]
    progress_every: u64,

    /// Print the board after every step of the solution
    #[clap(long)]
    show_boards: bool,

    /// Path to a board file; overrides the generated scramble
    board_file: Option<PathBuf>,
}

/// Observer that prints one line every `every` expansions.
struct ProgressPrinter {
    every: u64,
}

impl SearchObserver for ProgressPrinter {
    fn on_expansion(&mut self, expansions: u64, frontier_size: usize, depth: u32) {
        if self.every > 0 && expansions % self.every == 0 {
            println!(
                "  ... {} expansions, frontier size {}, depth {}",
                expansions, frontier_size, depth
            );
        }
    }
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    board_from_str(&content).map_err(|e| format!("Invalid board format: {}", e))
}

fn report_solution(holder: &SolutionHolder, show_boards: bool) {
    if holder.expired_runtime {
        println!("Gave up: the runtime limit expired before a solution was found.");
    } else if holder.expired_frontier_size {
        println!("Gave up: the frontier grew beyond the configured limit.");
    } else if holder.already_solved {
        println!("The board is already solved.");
    } else if holder.steps.is_empty() {
        println!("No solution exists for this board.");
    } else {
        println!("Solution found:\n");
        for (i, step) in holder.steps.iter().enumerate() {
            let action = step
                .action()
                .expect("Solution steps should always carry an action");
            println!("  Step {}: {}", i + 1, action);
            if show_boards {
                println!("{}\n", step.state());
            }
        }
    }

    println!();
    println!("Solution length: {}", holder.steps.len());
    println!("Elapsed runtime: {} ms", holder.elapsed.as_millis());
    println!("Peak frontier size: {}", holder.peak_frontier_size);
    println!("Number of expansions: {}", holder.expansions);
}

fn main() {
    let args = Args::parse();

    let algorithm = args
        .algorithm
        .parse::<AlgorithmKind>()
        .expect(&format!("Unusable --algorithm value '{}'", args.algorithm));
    let heuristic = args
        .heuristic
        .parse::<HeuristicKind>()
        .expect(&format!("Unusable --heuristic value '{}'", args.heuristic));

    let board = match &args.board_file {
        Some(path) => {
            let board = read_board_file(path)
                .expect(&format!("Failed to read board from file: {}", path.display()));
            println!("Loaded a {0}x{0} board from {1}\n", board.size(), path.display());
            board
        }
        None => {
            let board = Board::new_shuffled_by_depth_with_seed(
                args.size as usize,
                args.shuffle_depth,
                args.seed,
            );
            println!(
                "Generated a {0}x{0} board with {1} scramble moves (seed: {2})\n",
                args.size, args.shuffle_depth, args.seed
            );
            board
        }
    };

    println!("Initial board state:\n{}\n", board);
    println!("Searching with {} / {}...\n", algorithm, heuristic);

    let limits = SearchLimits {
        max_runtime: (args.max_runtime_ms > 0)
            .then(|| Duration::from_millis(args.max_runtime_ms)),
        max_frontier_size: (args.max_frontier_size > 0).then_some(args.max_frontier_size),
    };
    let mut progress = ProgressPrinter {
        every: args.progress_every,
    };

    let holder = solve_with_observer(&board, algorithm, heuristic, &limits, &mut progress);
    report_solution(&holder, args.show_boards);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_argument_rejects_out_of_range_values() {
        assert!(Args::try_parse_from(["ai_solver", "--size", "1"]).is_err());
        assert!(Args::try_parse_from(["ai_solver", "--size", "256"]).is_err());

        let args = Args::try_parse_from(["ai_solver", "--size", "4"]).unwrap();
        assert_eq!(args.size, 4);
        let args = Args::try_parse_from(["ai_solver"]).unwrap();
        assert_eq!(args.size, 3);
    }
}
