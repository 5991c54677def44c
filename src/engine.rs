//! Core state model for the taquin (sliding-tile) puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Position`, `Direction`, `Action`: coordinate and move primitives.
//! - `Board`: the N×N grid of tile values plus one blank, with methods for
//!   move application, neighbor queries, the goal test, and the
//!   inversion-parity solvability test.
//!
//! Boards are created from the canonical goal arrangement, from random
//! shuffles (a full permutation shuffle or a bounded-depth walk from the
//! goal), or from explicit per-cell contents.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// A tile value on the board. Tiles carry the distinct ids `0..N*N-1`
/// (exclusive), with [`BLANK`] reserved for the empty cell.
pub type Cell = u16;

/// The reserved sentinel value for the blank cell. It sits outside the
/// tile-id range of every supported board size.
pub const BLANK: Cell = u16::MAX;

/// Largest supported board edge length. Tile ids must stay clear of the
/// blank sentinel, which caps the grid at 255x255.
pub const MAX_SIZE: usize = 255;

/// A column/row index pair into the grid. `x` selects the column, `y` the
/// row; `(0, 0)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

/// One of the four cardinal directions on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Every direction, in the order searches enumerate them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// The `(dx, dy)` offset one step in this direction adds to a position.
    /// Row indices grow downward, so `Up` is `(0, -1)`.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        write!(f, "{}", name)
    }
}

/// A move: swap the value at a target position with its neighbor in the
/// named direction. The target is conventionally the blank's position, so
/// `SwapUp` slides the tile above the blank down into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    SwapUp,
    SwapRight,
    SwapDown,
    SwapLeft,
}

impl Action {
    /// The direction this action swaps toward.
    pub fn direction(self) -> Direction {
        match self {
            Action::SwapUp => Direction::Up,
            Action::SwapRight => Direction::Right,
            Action::SwapDown => Direction::Down,
            Action::SwapLeft => Direction::Left,
        }
    }

    /// The action that undoes this one, applied at the swap destination.
    pub fn opposite(self) -> Action {
        Action::from(self.direction().opposite())
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Action::SwapUp,
            Direction::Right => Action::SwapRight,
            Direction::Down => Action::SwapDown,
            Direction::Left => Action::SwapLeft,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swap {}", self.direction())
    }
}

/// An N×N taquin board.
///
/// The grid is stored row-major. Invariants: exactly one cell holds
/// [`BLANK`], the remaining cells hold the distinct ids `{0 … N²-2}`, and
/// every position in `[0,N)×[0,N)` is populated. Equality and hashing are
/// derived over the size and cell contents, so two boards with identical
/// tile placement are the same state however they were reached. `Clone` is
/// the deep copy handed to search frontiers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    grid: Vec<Cell>,
}

impl Board {
    /// Creates the canonical solved board: tile ids ascending row-major
    /// with the blank in the bottom-right corner.
    ///
    /// # Panics
    /// Panics if `size` is outside `2..=MAX_SIZE`.
    ///
    /// # Examples
    /// ```
    /// use taquin_solver::engine::{Board, Position, BLANK};
    /// let board = Board::goal(3);
    /// assert!(board.is_goal());
    /// assert_eq!(board.at(Position::new(0, 0)), 0);
    /// assert_eq!(board.at(Position::new(2, 2)), BLANK);
    /// ```
    pub fn goal(size: usize) -> Self {
        assert!(
            (2..=MAX_SIZE).contains(&size),
            "board size must be between 2 and {}, got {}",
            MAX_SIZE,
            size
        );
        let mut grid: Vec<Cell> = (0..(size * size - 1) as Cell).collect();
        grid.push(BLANK);
        Board { size, grid }
    }

    /// Creates a board whose cells are a full random permutation of the
    /// tile values. The resulting board may be unsolvable; callers that
    /// need a solvable scramble should use [`Board::new_shuffled_by_depth`]
    /// or check [`Board::is_solvable`] first.
    ///
    /// This method uses a fixed internal seed (`514514`) so that repeated
    /// calls are deterministic. Use [`Board::new_shuffled_with_seed`] for
    /// other permutations.
    pub fn new_shuffled(size: usize) -> Self {
        Board::new_shuffled_with_seed(size, 514514)
    }

    /// Creates a board whose cells are a full random permutation of the
    /// tile values, driven by the provided seed. The same seed always
    /// produces the same board. The result may be unsolvable.
    ///
    /// # Panics
    /// Panics if `size` is outside `2..=MAX_SIZE`.
    pub fn new_shuffled_with_seed(size: usize, seed: u64) -> Self {
        let mut board = Board::goal(size);
        let mut rng = SmallRng::seed_from_u64(seed);
        board.grid.shuffle(&mut rng);
        board
    }

    /// Creates a board by walking `move_count` random swaps away from the
    /// goal state, so the result is always solvable and its optimal
    /// solution is at most `move_count` moves long. The walk never
    /// immediately undoes its previous swap.
    ///
    /// Uses the same fixed internal seed as [`Board::new_shuffled`]; see
    /// [`Board::new_shuffled_by_depth_with_seed`] for other scrambles.
    pub fn new_shuffled_by_depth(size: usize, move_count: usize) -> Self {
        Board::new_shuffled_by_depth_with_seed(size, move_count, 514514)
    }

    /// Seeded variant of [`Board::new_shuffled_by_depth`].
    ///
    /// # Panics
    /// Panics if `size` is outside `2..=MAX_SIZE`.
    pub fn new_shuffled_by_depth_with_seed(size: usize, move_count: usize, seed: u64) -> Self {
        let mut board = Board::goal(size);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut last_direction: Option<Direction> = None;

        for _ in 0..move_count {
            let blank = board.empty_position();
            let candidates: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|&direction| board.has_neighbor(direction, blank))
                .filter(|&direction| last_direction != Some(direction.opposite()))
                .collect();
            // The blank always has at least two neighbors, so excluding the
            // undo direction leaves at least one candidate.
            let direction = candidates[rng.gen_range(0..candidates.len())];
            board.apply(Action::from(direction), blank);
            last_direction = Some(direction);
        }
        board
    }

    /// Builds a board from explicit per-cell contents, where `None` denotes
    /// the blank cell. Rows are given top to bottom, cells left to right.
    ///
    /// # Returns
    /// * `Ok(Board)` when the contents describe a valid board.
    /// * `Err(String)` when the size is unsupported, the row or cell counts
    ///   do not match `size`, a value is out of range or duplicated, or the
    ///   number of blank cells is not exactly one.
    ///
    /// # Examples
    /// ```
    /// use taquin_solver::engine::Board;
    ///
    /// let rows = vec![vec![Some(0), Some(1)], vec![Some(2), None]];
    /// let board = Board::from_contents(2, &rows).unwrap();
    /// assert!(board.is_goal());
    ///
    /// let short = rows[..1].to_vec();
    /// assert!(Board::from_contents(2, &short).is_err());
    /// ```
    pub fn from_contents(size: usize, rows: &[Vec<Option<Cell>>]) -> Result<Board, String> {
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(format!(
                "Board size must be between 2 and {}, found {}",
                MAX_SIZE, size
            ));
        }
        if rows.len() != size {
            return Err(format!(
                "Invalid number of rows. Expected {}, found {}",
                size,
                rows.len()
            ));
        }

        let max_id = (size * size - 2) as Cell;
        let mut grid = Vec::with_capacity(size * size);
        let mut seen = vec![false; size * size - 1];
        let mut blanks = 0;

        for (y, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(format!(
                    "Row {} has {} cells. Expected {}",
                    y,
                    row.len(),
                    size
                ));
            }
            for (x, content) in row.iter().enumerate() {
                match content {
                    None => {
                        blanks += 1;
                        grid.push(BLANK);
                    }
                    Some(value) => {
                        if *value > max_id {
                            return Err(format!(
                                "Cell value {} at ({}, {}) is out of range. Expected at most {}",
                                value, x, y, max_id
                            ));
                        }
                        if seen[*value as usize] {
                            return Err(format!("Duplicate cell value {} at ({}, {})", value, x, y));
                        }
                        seen[*value as usize] = true;
                        grid.push(*value);
                    }
                }
            }
        }

        if blanks != 1 {
            return Err(format!(
                "Expected exactly one blank cell, found {}",
                blanks
            ));
        }

        Ok(Board { size, grid })
    }

    /// Returns the board's edge length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns whether `position` lies inside the grid.
    pub fn in_bounds(&self, position: Position) -> bool {
        position.x < self.size && position.y < self.size
    }

    /// Returns the cell value at `position`.
    ///
    /// # Panics
    /// Panics if `position` is outside the grid.
    pub fn at(&self, position: Position) -> Cell {
        assert!(
            self.in_bounds(position),
            "position ({}, {}) outside the {}x{} board",
            position.x,
            position.y,
            self.size,
            self.size
        );
        self.grid[self.index(position)]
    }

    /// Returns the position one step from `position` in `direction`, or
    /// `None` if that step leaves the grid. This is the guard callers use
    /// to enumerate only legal moves.
    pub fn neighbor_position(&self, direction: Direction, position: Position) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = position.x as isize + dx;
        let y = position.y as isize + dy;
        if x < 0 || y < 0 || x >= self.size as isize || y >= self.size as isize {
            return None;
        }
        Some(Position::new(x as usize, y as usize))
    }

    /// Returns the cell value one step from `position` in `direction`, or
    /// `None` if that step leaves the grid.
    pub fn neighbor(&self, direction: Direction, position: Position) -> Option<Cell> {
        self.neighbor_position(direction, position)
            .map(|neighbor| self.at(neighbor))
    }

    /// Returns whether `position` has a neighbor in `direction`.
    pub fn has_neighbor(&self, direction: Direction, position: Position) -> bool {
        self.neighbor_position(direction, position).is_some()
    }

    /// Swaps the value at `target` with its neighbor in the action's
    /// direction. The target is conventionally the blank's position.
    ///
    /// # Panics
    /// Panics if `target` is outside the grid or has no neighbor in the
    /// action's direction; callers guard with [`Board::has_neighbor`] or
    /// [`Board::neighbor_position`] first.
    pub fn apply(&mut self, action: Action, target: Position) {
        assert!(
            self.in_bounds(target),
            "position ({}, {}) outside the {}x{} board",
            target.x,
            target.y,
            self.size,
            self.size
        );
        let destination = self
            .neighbor_position(action.direction(), target)
            .expect("apply target has no neighbor in the action's direction");
        let from = self.index(target);
        let to = self.index(destination);
        self.grid.swap(from, to);
    }

    /// Returns the blank cell's position by linear scan.
    ///
    /// # Panics
    /// Panics if the board has no blank cell, which indicates a broken
    /// invariant rather than a recoverable condition.
    pub fn empty_position(&self) -> Position {
        match self.grid.iter().position(|&cell| cell == BLANK) {
            Some(index) => Position::new(index % self.size, index / self.size),
            None => panic!("board has no blank cell"),
        }
    }

    /// Returns the position of `value` by linear scan.
    ///
    /// # Panics
    /// Panics if `value` is not present on the board.
    pub fn position_of(&self, value: Cell) -> Position {
        match self.grid.iter().position(|&cell| cell == value) {
            Some(index) => Position::new(index % self.size, index / self.size),
            None => panic!("value {} is not present on the board", value),
        }
    }

    /// Returns whether the board is in the solved arrangement: scanning
    /// row-major, values ascend and the final cell is the blank.
    pub fn is_goal(&self) -> bool {
        let last = self.grid.len() - 1;
        self.grid[last] == BLANK && self.grid[..last].windows(2).all(|pair| pair[0] < pair[1])
    }

    /// Returns whether the solved arrangement is reachable from this board.
    ///
    /// The test counts inversions over the row-major flattening of the
    /// non-blank values. On odd-sized boards the blank's moves never change
    /// inversion parity, so the board is solvable iff the inversion count
    /// is even. On even-sized boards every vertical blank move flips the
    /// parity, so the board is solvable iff the inversion count plus the
    /// blank's row counted from the bottom (1-indexed) is odd.
    pub fn is_solvable(&self) -> bool {
        let inversions = self.count_inversions();
        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            let row_from_bottom = self.size - self.empty_position().y;
            (inversions + row_from_bottom) % 2 == 1
        }
    }

    fn count_inversions(&self) -> usize {
        let tiles: Vec<Cell> = self
            .grid
            .iter()
            .copied()
            .filter(|&cell| cell != BLANK)
            .collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                tiles[i + 1..]
                    .iter()
                    .filter(|&&later| later < value)
                    .count()
            })
            .sum()
    }

    /// Slides the tile at `target` into the blank, if the two are adjacent.
    ///
    /// Checks the four directions from `target` for the one whose neighbor
    /// is the blank and applies that swap.
    ///
    /// # Returns
    /// * `true` if the tile was adjacent to the blank and was moved.
    /// * `false` if `target` is outside the grid or has no blank neighbor;
    ///   the board is left unchanged.
    ///
    /// # Examples
    /// ```
    /// use taquin_solver::engine::{Board, Position};
    /// let mut board = Board::goal(3);
    /// // The tile left of the blank can slide into it.
    /// assert!(board.apply_user_move(Position::new(1, 2)));
    /// assert!(!board.is_goal());
    /// // A tile nowhere near the blank cannot.
    /// assert!(!board.apply_user_move(Position::new(0, 0)));
    /// ```
    pub fn apply_user_move(&mut self, target: Position) -> bool {
        if !self.in_bounds(target) {
            return false;
        }
        for direction in Direction::ALL {
            if self.neighbor(direction, target) == Some(BLANK) {
                self.apply(Action::from(direction), target);
                return true;
            }
        }
        false
    }

    /// Generates a string representation of the board with an optional
    /// highlighted position.
    ///
    /// The output includes column and row indices; the blank is printed as
    /// `.`. If `highlight` is `Some(position)`, that cell is rendered in
    /// reverse video for terminal display.
    pub fn to_string_with_highlight(&self, highlight: Option<Position>) -> String {
        let cell_width = (self.size * self.size - 2).to_string().len().max(2);
        let mut output = String::new();

        output.push_str(&" ".repeat(cell_width + 1));
        for x in 0..self.size {
            output.push_str(&format!("{:>width$} ", x, width = cell_width));
        }
        output.push('\n');

        for y in 0..self.size {
            output.push_str(&format!("{:>width$} ", y, width = cell_width));
            for x in 0..self.size {
                let position = Position::new(x, y);
                let cell = self.at(position);
                let text = if cell == BLANK {
                    ".".to_string()
                } else {
                    cell.to_string()
                };
                if highlight == Some(position) {
                    output.push_str(&format!("\x1b[7m{:>width$}\x1b[m ", text, width = cell_width));
                } else {
                    output.push_str(&format!("{:>width$} ", text, width = cell_width));
                }
            }
            if y < self.size - 1 {
                output.push('\n');
            }
        }

        output
    }

    fn index(&self, position: Position) -> usize {
        position.y * self.size + position.x
    }
}

impl fmt::Display for Board {
    /// Formats the board for display using `to_string_with_highlight(None)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str;
    use std::collections::{HashSet, VecDeque};

    #[test]
    fn test_goal_board_satisfies_goal_test() {
        for size in [2, 3, 4, 5, 8] {
            let board = Board::goal(size);
            assert!(board.is_goal(), "goal board of size {} must be solved", size);
            assert_eq!(board.at(Position::new(size - 1, size - 1)), BLANK);
            assert_eq!(board.at(Position::new(0, 0)), 0);
        }
    }

    #[test]
    fn test_goal_board_values_are_row_major() {
        let board = Board::goal(3);
        let mut expected = 0;
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(board.at(Position::new(x, y)), expected);
                expected += 1;
            }
        }
        assert_eq!(board.at(Position::new(0, 2)), 6);
        assert_eq!(board.at(Position::new(1, 2)), 7);
    }

    #[test]
    fn test_one_move_perturbation_is_not_goal() {
        for size in [2, 3, 4] {
            let goal = Board::goal(size);
            let blank = goal.empty_position();
            for direction in Direction::ALL {
                if !goal.has_neighbor(direction, blank) {
                    continue;
                }
                let mut perturbed = goal.clone();
                perturbed.apply(Action::from(direction), blank);
                assert!(
                    !perturbed.is_goal(),
                    "a one-move perturbation of the {}x{} goal must not be the goal",
                    size,
                    size
                );
            }
        }
    }

    #[test]
    fn test_apply_then_opposite_restores_the_board() {
        let board = Board::new_shuffled_by_depth_with_seed(4, 18, 99);
        for direction in Direction::ALL {
            let blank = board.empty_position();
            if !board.has_neighbor(direction, blank) {
                continue;
            }
            let mut moved = board.clone();
            moved.apply(Action::from(direction), blank);
            assert_ne!(moved, board);
            let new_blank = moved.empty_position();
            moved.apply(Action::from(direction).opposite(), new_blank);
            assert_eq!(
                moved, board,
                "applying {:?} and then its opposite must restore the board",
                direction
            );
        }
    }

    #[test]
    fn test_neighbor_queries_at_the_corners() {
        let board = Board::goal(3);

        let origin = Position::new(0, 0);
        assert!(!board.has_neighbor(Direction::Up, origin));
        assert!(!board.has_neighbor(Direction::Left, origin));
        assert_eq!(board.neighbor(Direction::Right, origin), Some(1));
        assert_eq!(board.neighbor(Direction::Down, origin), Some(3));

        let bottom_right = Position::new(2, 2);
        assert!(!board.has_neighbor(Direction::Down, bottom_right));
        assert!(!board.has_neighbor(Direction::Right, bottom_right));
        assert_eq!(board.neighbor(Direction::Left, bottom_right), Some(7));
        assert_eq!(board.neighbor(Direction::Up, bottom_right), Some(5));
    }

    #[test]
    fn test_empty_position_and_position_of() {
        let board = board_from_str("3,1,2\n0,,5\n6,7,4").unwrap();
        assert_eq!(board.empty_position(), Position::new(1, 1));
        assert_eq!(board.position_of(3), Position::new(0, 0));
        assert_eq!(board.position_of(4), Position::new(2, 2));
        assert_eq!(board.position_of(0), Position::new(0, 1));
    }

    #[test]
    fn test_direction_opposites() {
        for direction in Direction::ALL {
            assert_ne!(direction, direction.opposite());
            assert_eq!(direction, direction.opposite().opposite());
        }
        assert_eq!(Action::SwapUp.opposite(), Action::SwapDown);
        assert_eq!(Action::SwapLeft.opposite(), Action::SwapRight);
    }

    #[test]
    fn test_new_shuffled_is_a_permutation() {
        let board = Board::new_shuffled_with_seed(4, 7);
        let mut cells = board.grid.clone();
        cells.sort_unstable();
        assert_eq!(cells, Board::goal(4).grid);
    }

    #[test]
    fn test_new_shuffled_determinism() {
        let seed = 123;
        let board1 = Board::new_shuffled_with_seed(3, seed);
        let board2 = Board::new_shuffled_with_seed(3, seed);
        assert_eq!(board1, board2, "boards with the same seed must be identical");

        let board3 = Board::new_shuffled_with_seed(3, seed + 1);
        assert_ne!(board1, board3, "boards with different seeds should differ");

        assert_eq!(
            Board::new_shuffled(3),
            Board::new_shuffled(3),
            "new_shuffled() should be deterministic"
        );
    }

    #[test]
    fn test_new_shuffled_by_depth_is_always_solvable() {
        for size in [3, 4] {
            for seed in 0..10 {
                let board = Board::new_shuffled_by_depth_with_seed(size, 40, seed);
                assert!(
                    board.is_solvable(),
                    "depth-bounded scramble (size {}, seed {}) must stay solvable",
                    size,
                    seed
                );
                let mut cells = board.grid.clone();
                cells.sort_unstable();
                assert_eq!(cells, Board::goal(size).grid);
            }
        }
    }

    #[test]
    fn test_new_shuffled_by_depth_moves_off_the_goal() {
        for seed in 0..5 {
            let board = Board::new_shuffled_by_depth_with_seed(3, 1, seed);
            assert!(!board.is_goal(), "a single swap must leave the goal state");
        }
        assert!(Board::new_shuffled_by_depth_with_seed(3, 0, 0).is_goal());
    }

    #[test]
    fn test_new_shuffled_by_depth_never_undoes_its_previous_swap() {
        // A two-move walk can only end at the goal by reversing its first
        // swap, so depth 2 observes the no-undo rule directly.
        for seed in 0..200 {
            let board = Board::new_shuffled_by_depth_with_seed(3, 2, seed);
            assert!(
                !board.is_goal(),
                "seed {} undid its first swap and landed back on the goal",
                seed
            );
        }
    }

    #[test]
    fn test_from_contents_rejects_invalid_input() {
        let valid = vec![vec![Some(0), Some(1)], vec![Some(2), None]];
        assert!(Board::from_contents(2, &valid).is_ok());

        let err = Board::from_contents(1, &valid[..1].to_vec()).unwrap_err();
        assert!(err.contains("Board size must be between"));

        let err = Board::from_contents(2, &valid[..1].to_vec()).unwrap_err();
        assert!(err.contains("Invalid number of rows"));

        let ragged = vec![vec![Some(0), Some(1)], vec![Some(2)]];
        let err = Board::from_contents(2, &ragged).unwrap_err();
        assert!(err.contains("Row 1 has 1 cells"));

        let duplicated = vec![vec![Some(0), Some(0)], vec![Some(2), None]];
        let err = Board::from_contents(2, &duplicated).unwrap_err();
        assert!(err.contains("Duplicate cell value 0"));

        let out_of_range = vec![vec![Some(0), Some(9)], vec![Some(2), None]];
        let err = Board::from_contents(2, &out_of_range).unwrap_err();
        assert!(err.contains("out of range"));

        let two_blanks = vec![vec![Some(0), None], vec![Some(2), None]];
        let err = Board::from_contents(2, &two_blanks).unwrap_err();
        assert!(err.contains("exactly one blank cell, found 2"));

        let no_blank = vec![vec![Some(0), Some(1)], vec![Some(2), Some(3)]];
        assert!(Board::from_contents(2, &no_blank).is_err());
    }

    #[test]
    fn test_apply_user_move() {
        let mut board = Board::goal(3);

        // Blank is at (2, 2); the tile at (2, 1) sits above it.
        assert!(board.apply_user_move(Position::new(2, 1)));
        assert_eq!(board.empty_position(), Position::new(2, 1));
        assert_eq!(board.at(Position::new(2, 2)), 5);

        // The tile at (0, 0) is nowhere near the blank.
        let before = board.clone();
        assert!(!board.apply_user_move(Position::new(0, 0)));
        assert_eq!(board, before);

        // Out-of-bounds targets are a no-op.
        assert!(!board.apply_user_move(Position::new(5, 5)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_is_solvable_known_cases() {
        assert!(Board::goal(3).is_solvable());
        assert!(Board::goal(4).is_solvable());

        // One inversion on an odd board: unsolvable.
        let board = board_from_str("0,1,2\n3,4,5\n7,6,").unwrap();
        assert!(!board.is_solvable());

        // Swapping two adjacent tiles of the 4x4 goal flips one inversion
        // without moving the blank: unsolvable.
        let mut board = Board::goal(4);
        let from = board.index(Position::new(0, 0));
        let to = board.index(Position::new(1, 0));
        board.grid.swap(from, to);
        assert!(!board.is_solvable());
    }

    #[test]
    fn test_solvability_matches_reachability_for_all_2x2_permutations() {
        assert_solvability_matches_reachability(2);
    }

    #[test]
    fn test_solvability_matches_reachability_for_all_3x3_permutations() {
        assert_solvability_matches_reachability(3);
    }

    /// Exhaustively compares the parity rule against BFS reachability from
    /// the goal over every permutation of the cell values.
    fn assert_solvability_matches_reachability(size: usize) {
        let goal = Board::goal(size);
        let mut reachable: HashSet<Board> = HashSet::new();
        let mut queue = VecDeque::new();
        reachable.insert(goal.clone());
        queue.push_back(goal);
        while let Some(board) = queue.pop_front() {
            let blank = board.empty_position();
            for direction in Direction::ALL {
                if !board.has_neighbor(direction, blank) {
                    continue;
                }
                let mut next = board.clone();
                next.apply(Action::from(direction), blank);
                if reachable.insert(next.clone()) {
                    queue.push_back(next);
                }
            }
        }

        let mut values: Vec<Cell> = (0..(size * size - 1) as Cell).collect();
        values.push(BLANK);
        let mut checked = 0usize;
        permute(&mut values, 0, &mut |permutation| {
            let board = Board {
                size,
                grid: permutation.to_vec(),
            };
            assert_eq!(
                board.is_solvable(),
                reachable.contains(&board),
                "parity rule disagrees with reachability for {:?}",
                permutation
            );
            checked += 1;
        });

        let expected: usize = (1..=size * size).product();
        assert_eq!(checked, expected);
        // Exactly half of all permutations are reachable.
        assert_eq!(reachable.len(), expected / 2);
    }

    fn permute(values: &mut Vec<Cell>, start: usize, visit: &mut impl FnMut(&[Cell])) {
        if start == values.len() {
            visit(values);
            return;
        }
        for i in start..values.len() {
            values.swap(start, i);
            permute(values, start + 1, visit);
            values.swap(start, i);
        }
    }

    #[test]
    fn test_display_board_formatting() {
        let board = Board::goal(3);
        let display = format!("{}", board);
        println!("---Board Display Test:\n{}---", display);

        // One header line plus one line per row.
        assert_eq!(display.trim_end().lines().count(), 4);
        // Column indices appear in the header.
        assert!(display.lines().next().unwrap().contains('2'));
        // The blank renders as a dot.
        assert!(display.contains('.'));
    }

    #[test]
    fn test_display_highlights_requested_cell() {
        let board = Board::goal(3);
        let highlighted = board.to_string_with_highlight(Some(Position::new(2, 2)));
        assert!(highlighted.contains("\x1b[7m"));
        assert!(!board.to_string_with_highlight(None).contains("\x1b[7m"));
    }

    #[test]
    fn test_equality_ignores_how_a_state_was_reached() {
        let mut left = Board::goal(3);
        let mut right = Board::goal(3);

        // Reach the same arrangement through different move sequences.
        let blank = left.empty_position();
        left.apply(Action::SwapUp, blank);
        let blank = left.empty_position();
        left.apply(Action::SwapDown, blank);

        let blank = right.empty_position();
        right.apply(Action::SwapLeft, blank);
        let blank = right.empty_position();
        right.apply(Action::SwapRight, blank);

        assert_eq!(left, right);
        assert_eq!(left, Board::goal(3));
    }
}
