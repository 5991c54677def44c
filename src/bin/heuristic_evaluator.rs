use std::collections::HashMap;
use taquin_solver::engine::Board;
use taquin_solver::heuristics::HeuristicKind;
use taquin_solver::solver::{solve, AlgorithmKind, SearchLimits};

const NUM_RANDOM_BOARDS_FOR_EVALUATION: usize = 20;
const START_SEED: u64 = 0;
const EVAL_BOARD_SIZE: usize = 3;
const EVAL_SHUFFLE_DEPTH: usize = 30;

fn main() {
    let pairings: Vec<(&str, AlgorithmKind, HeuristicKind)> = vec![
        (
            "astar/manhattan",
            AlgorithmKind::AStar,
            HeuristicKind::ManhattanDistance,
        ),
        (
            "astar/linear-conflict",
            AlgorithmKind::AStar,
            HeuristicKind::LinearConflict,
        ),
        (
            "astar/displaced-tiles",
            AlgorithmKind::AStar,
            HeuristicKind::DisplacedTiles,
        ),
        (
            "greedy/manhattan",
            AlgorithmKind::GreedyAStar,
            HeuristicKind::ManhattanDistance,
        ),
        (
            "idastar/manhattan",
            AlgorithmKind::IdaStar,
            HeuristicKind::ManhattanDistance,
        ),
        (
            "uniform-cost",
            AlgorithmKind::UniformCost,
            HeuristicKind::UniformCost,
        ),
    ];

    let mut all_expansions: HashMap<String, Vec<u64>> = HashMap::new();
    let mut all_lengths: HashMap<String, Vec<usize>> = HashMap::new();
    for (name, _, _) in &pairings {
        all_expansions.insert(name.to_string(), Vec::new());
        all_lengths.insert(name.to_string(), Vec::new());
    }

    println!(
        "Starting evaluation over {} scrambled {}x{} boards...",
        NUM_RANDOM_BOARDS_FOR_EVALUATION, EVAL_BOARD_SIZE, EVAL_BOARD_SIZE
    );

    let limits = SearchLimits::default();
    for board_idx in 0..NUM_RANDOM_BOARDS_FOR_EVALUATION {
        let current_seed = START_SEED + board_idx as u64;
        let board = Board::new_shuffled_by_depth_with_seed(
            EVAL_BOARD_SIZE,
            EVAL_SHUFFLE_DEPTH,
            current_seed,
        );

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        for (name, algorithm, heuristic) in &pairings {
            let holder = solve(&board, *algorithm, *heuristic, &limits);
            if !holder.is_solved() {
                eprintln!(
                    "Warning: {} failed on board {} (Seed: {}). This should not happen on a depth-bounded scramble.",
                    name, board_idx, current_seed
                );
                continue;
            }
            println!(
                "  Pairing: {:<22} Length: {:<4} Expansions: {:<8} Elapsed: {} ms",
                name,
                holder.steps.len(),
                holder.expansions,
                holder.elapsed.as_millis()
            );
            all_expansions.get_mut(*name).unwrap().push(holder.expansions);
            all_lengths.get_mut(*name).unwrap().push(holder.steps.len());
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", NUM_RANDOM_BOARDS_FOR_EVALUATION);
    println!(
        "Pairings evaluated: {}",
        pairings
            .iter()
            .map(|(name, _, _)| *name)
            .collect::<Vec<&str>>()
            .join(", ")
    );
    println!("\n--- Averages ---");

    let mut sorted_averages: Vec<(&str, f64, f64)> = Vec::new();

    for (name, _, _) in &pairings {
        let expansions = &all_expansions[*name];
        if expansions.is_empty() {
            println!("Pairing {}: No results recorded.", name);
            continue;
        }
        let total_expansions: u64 = expansions.iter().sum();
        let avg_expansions = total_expansions as f64 / expansions.len() as f64;
        let lengths = &all_lengths[*name];
        let total_length: usize = lengths.iter().sum();
        let avg_length = total_length as f64 / lengths.len() as f64;
        sorted_averages.push((*name, avg_expansions, avg_length));
    }

    // Sort by average expansions ascending: fewer expansions means a
    // better-informed search.
    sorted_averages.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    for (name, avg_expansions, avg_length) in sorted_averages {
        println!(
            "Pairing {:<22}: Average Expansions = {:>10.2}, Average Length = {:>6.2}",
            name, avg_expansions, avg_length
        );
    }
}
