//! # Taquin Solver Library
//!
//! This library provides the core state model for the sliding-tile puzzle
//! (the "taquin", or N-puzzle) and a family of search algorithms for
//! finding a sequence of blank-swaps that reaches the solved arrangement.
//!
//! It is used by three binaries:
//! - `human_player`: Allows interactive play via the command line.
//! - `ai_solver`: Takes a board (from a file or a seeded scramble), an
//!   algorithm and a heuristic, then reports the solution steps and the
//!   search statistics.
//! - `heuristic_evaluator`: Benchmarks algorithm/heuristic pairings over a
//!   set of scrambled boards.
//!
//! ## Modules
//! - `engine`: Contains the board representation (`Board`), the coordinate
//!   and move primitives (`Position`, `Direction`, `Action`), and all state
//!   mechanics (move application, goal test, solvability analysis).
//! - `heuristics`: Defines the cost-estimation strategies used to order the
//!   search (uniform cost, displaced tiles, Manhattan distance, linear
//!   conflict).
//! - `solver`: Provides the `solve` entry point, the four search algorithms
//!   (A*, Greedy-A*, Uniform-Cost, IDA*), and the solution/statistics
//!   containers.
//! - `utils`: Provides utility functions, such as parsing board
//!   descriptions from text.

pub mod engine;
pub mod heuristics;
pub mod solver;
pub mod utils;

// Items from sub-modules, if public, should be accessed via their full
// path, e.g. `taquin_solver::solver::solve(...)`. This keeps the top-level
// library namespace cleaner.
