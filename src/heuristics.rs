//! Cost estimators that order the solver's frontier.
//!
//! Every estimator folds the path cost into the returned score, so a score
//! is always `depth + estimate` and never less than the depth alone:
//! - `UniformCost`: no estimate, the score is the depth itself.
//! - `DisplacedTiles`: counts tiles away from their goal cell.
//! - `ManhattanDistance`: sums per-tile grid distances to the goal cell.
//! - `LinearConflict`: Manhattan distance plus two per conflicting pair in
//!   a goal row or column.
//!
//! The blank never contributes to an estimate. A [`Heuristic`] is built
//! once per search against a fixed goal board and precomputes the goal
//! position of every tile id, so scoring a state never searches the goal.
use crate::engine::{Board, Cell, Position, BLANK};
use std::fmt;
use std::str::FromStr;

/// The available estimator families, selectable by name on the command
/// line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    UniformCost,
    DisplacedTiles,
    ManhattanDistance,
    LinearConflict,
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeuristicKind::UniformCost => "uniform-cost",
            HeuristicKind::DisplacedTiles => "displaced-tiles",
            HeuristicKind::ManhattanDistance => "manhattan",
            HeuristicKind::LinearConflict => "linear-conflict",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform-cost" | "uniform" => Ok(HeuristicKind::UniformCost),
            "displaced-tiles" | "displaced" => Ok(HeuristicKind::DisplacedTiles),
            "manhattan" => Ok(HeuristicKind::ManhattanDistance),
            "linear-conflict" | "linear" => Ok(HeuristicKind::LinearConflict),
            _ => Err(format!(
                "Unknown heuristic '{}'. Expected one of: uniform-cost, displaced-tiles, manhattan, linear-conflict",
                s
            )),
        }
    }
}

/// A scoring function bound to a fixed goal board.
///
/// `goal_positions[id]` caches where tile `id` belongs, so every estimate
/// is a table lookup away.
pub struct Heuristic {
    kind: HeuristicKind,
    goal: Board,
    goal_positions: Vec<Position>,
}

impl Heuristic {
    /// Builds an estimator of the given kind against `goal`.
    pub fn new(kind: HeuristicKind, goal: &Board) -> Self {
        let tile_count = goal.size() * goal.size() - 1;
        let mut goal_positions = Vec::with_capacity(tile_count);
        for id in 0..tile_count as Cell {
            goal_positions.push(goal.position_of(id));
        }
        Heuristic {
            kind,
            goal: goal.clone(),
            goal_positions,
        }
    }

    pub fn kind(&self) -> HeuristicKind {
        self.kind
    }

    /// Scores `state` at the given search depth. Scores are comparable
    /// only between states evaluated by the same estimator.
    pub fn score(&self, state: &Board, depth: u32) -> u32 {
        match self.kind {
            HeuristicKind::UniformCost => depth,
            HeuristicKind::DisplacedTiles => self.displaced_tiles(state) + depth,
            HeuristicKind::ManhattanDistance => self.manhattan_distance(state) + depth,
            HeuristicKind::LinearConflict => {
                self.manhattan_distance(state) + 2 * self.linear_conflicts(state) + depth
            }
        }
    }

    /// Counts the tiles that are not on their goal cell.
    fn displaced_tiles(&self, state: &Board) -> u32 {
        let mut displaced = 0;
        for y in 0..state.size() {
            for x in 0..state.size() {
                let position = Position::new(x, y);
                let cell = state.at(position);
                if cell != BLANK && cell != self.goal.at(position) {
                    displaced += 1;
                }
            }
        }
        displaced
    }

    /// Sums the horizontal plus vertical distance of every tile to its
    /// goal cell.
    fn manhattan_distance(&self, state: &Board) -> u32 {
        let mut distance = 0;
        for y in 0..state.size() {
            for x in 0..state.size() {
                let cell = state.at(Position::new(x, y));
                if cell == BLANK {
                    continue;
                }
                let goal = self.goal_positions[cell as usize];
                distance += (x as i32 - goal.x as i32).unsigned_abs()
                    + (y as i32 - goal.y as i32).unsigned_abs();
            }
        }
        distance
    }

    /// Counts conflicting pairs line by line. Two tiles conflict when both
    /// sit in their goal row (or column) but in reversed relative order, so
    /// one must step aside for the other to pass.
    fn linear_conflicts(&self, state: &Board) -> u32 {
        let mut conflicts = 0;
        let size = state.size();

        for y in 0..size {
            // (current column, goal column) of tiles already in their goal row.
            let mut tiles_in_row: Vec<(usize, usize)> = Vec::new();
            for x in 0..size {
                let cell = state.at(Position::new(x, y));
                if cell != BLANK && self.goal_positions[cell as usize].y == y {
                    tiles_in_row.push((x, self.goal_positions[cell as usize].x));
                }
            }
            conflicts += count_reversed_pairs(&tiles_in_row);
        }

        for x in 0..size {
            let mut tiles_in_column: Vec<(usize, usize)> = Vec::new();
            for y in 0..size {
                let cell = state.at(Position::new(x, y));
                if cell != BLANK && self.goal_positions[cell as usize].x == x {
                    tiles_in_column.push((y, self.goal_positions[cell as usize].y));
                }
            }
            conflicts += count_reversed_pairs(&tiles_in_column);
        }

        conflicts
    }
}

/// Counts the pairs in `tiles` whose current order along the line disagrees
/// with their goal order.
fn count_reversed_pairs(tiles: &[(usize, usize)]) -> u32 {
    let mut reversed = 0;
    for i in 0..tiles.len() {
        for j in (i + 1)..tiles.len() {
            let (current_i, goal_i) = tiles[i];
            let (current_j, goal_j) = tiles[j];
            if (current_i < current_j) != (goal_i < goal_j) {
                reversed += 1;
            }
        }
    }
    reversed
}
