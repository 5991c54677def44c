//! Search algorithms that solve a taquin board.
//!
//! Four algorithm families share one contract:
//! - `AStar`: best-first on the full score (depth folded into the score).
//! - `GreedyAStar`: best-first on the estimate alone (score minus depth).
//! - `UniformCost`: FIFO expansion, equivalent to breadth-first search.
//! - `IdaStar`: iterative deepening on the score bound; only the current
//!   path is kept in memory.
//!
//! Every search runs against the canonical goal for the board's size,
//! refuses unsolvable boards up front, honors optional runtime and
//! frontier-size limits, and reports its outcome in a [`SolutionHolder`].
//! Expanded states are recorded in an arena of [`SolutionStep`]s linked by
//! parent indices, so reconstructing the move sequence is a walk up the
//! arena followed by one reversal.
use crate::engine::{Action, Board, Direction};
use crate::heuristics::{Heuristic, HeuristicKind};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::time::{Duration, Instant};

/// The available search algorithms, selectable by name on the command
/// line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgorithmKind {
    AStar,
    GreedyAStar,
    UniformCost,
    IdaStar,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlgorithmKind::AStar => "astar",
            AlgorithmKind::GreedyAStar => "greedy-astar",
            AlgorithmKind::UniformCost => "uniform-cost",
            AlgorithmKind::IdaStar => "idastar",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for AlgorithmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a*" => Ok(AlgorithmKind::AStar),
            "greedy-astar" | "greedy" => Ok(AlgorithmKind::GreedyAStar),
            "uniform-cost" | "ucs" => Ok(AlgorithmKind::UniformCost),
            "idastar" | "ida*" => Ok(AlgorithmKind::IdaStar),
            _ => Err(format!(
                "Unknown algorithm '{}'. Expected one of: astar, greedy-astar, uniform-cost, idastar",
                s
            )),
        }
    }
}

/// One search node: a board state plus how the search reached it.
///
/// The score is computed once, when the step is constructed, and never
/// changes afterwards. Equality and hashing consider the contained state
/// only, so steps that reach the same arrangement through different move
/// sequences count as the same node.
#[derive(Clone, Debug)]
pub struct SolutionStep {
    state: Board,
    parent: Option<usize>,
    action: Option<Action>,
    depth: u32,
    score: u32,
}

impl SolutionStep {
    fn root(state: Board, heuristic: &Heuristic) -> Self {
        let score = heuristic.score(&state, 0);
        SolutionStep {
            state,
            parent: None,
            action: None,
            depth: 0,
            score,
        }
    }

    fn successor(
        state: Board,
        parent: Option<usize>,
        action: Action,
        depth: u32,
        heuristic: &Heuristic,
    ) -> Self {
        let score = heuristic.score(&state, depth);
        SolutionStep {
            state,
            parent,
            action: Some(action),
            depth,
            score,
        }
    }

    /// The board arrangement this step reached.
    pub fn state(&self) -> &Board {
        &self.state
    }

    /// The move that produced this step, applied at the previous blank
    /// position. `None` only for a search root.
    pub fn action(&self) -> Option<Action> {
        self.action
    }

    /// Number of moves from the initial board to this step.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The heuristic score assigned when the step was created.
    pub fn score(&self) -> u32 {
        self.score
    }
}

impl PartialEq for SolutionStep {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl Eq for SolutionStep {}

impl Hash for SolutionStep {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.state.hash(hasher);
    }
}

/// Append-only store of every step a search has created. Parent links are
/// indices into this arena.
struct StepArena {
    steps: Vec<SolutionStep>,
}

impl StepArena {
    fn new() -> Self {
        StepArena { steps: Vec::new() }
    }

    fn push(&mut self, step: SolutionStep) -> usize {
        self.steps.push(step);
        self.steps.len() - 1
    }

    fn get(&self, id: usize) -> &SolutionStep {
        &self.steps[id]
    }

    /// Walks the parent links from `goal_id` back to the root and returns
    /// the steps in first-move-first order. The root itself is excluded,
    /// so the result's length equals the number of moves.
    fn unwind(&self, goal_id: usize) -> Vec<SolutionStep> {
        let mut steps = Vec::new();
        let mut id = goal_id;
        while let Some(parent) = self.steps[id].parent {
            steps.push(self.steps[id].clone());
            id = parent;
        }
        steps.reverse();
        steps
    }
}

/// Optional caps on a search. `None` means unbounded. Both caps are
/// checked once per expansion.
#[derive(Clone, Copy, Debug)]
pub struct SearchLimits {
    /// Abandon the search once it has run longer than this.
    pub max_runtime: Option<Duration>,
    /// Abandon the search once the frontier grows beyond this many states.
    pub max_frontier_size: Option<usize>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_runtime: None,
            max_frontier_size: None,
        }
    }
}

impl SearchLimits {
    fn runtime_expired(&self, started: Instant) -> bool {
        self.max_runtime
            .map_or(false, |limit| started.elapsed() > limit)
    }

    fn frontier_expired(&self, frontier_size: usize) -> bool {
        self.max_frontier_size
            .map_or(false, |limit| frontier_size > limit)
    }
}

/// The outcome of one solve call.
///
/// `steps` holds the move sequence excluding the initial board, so its
/// length is the number of moves. An empty `steps` means one of four
/// things, distinguished by the flags: the board was already solved
/// (`already_solved`), a limit fired (`expired_runtime` or
/// `expired_frontier_size`), or the search exhausted its frontier without
/// reaching the goal (all flags false).
#[derive(Clone, Debug)]
pub struct SolutionHolder {
    pub steps: Vec<SolutionStep>,
    pub already_solved: bool,
    pub elapsed: Duration,
    pub peak_frontier_size: usize,
    pub expansions: u64,
    pub expired_runtime: bool,
    pub expired_frontier_size: bool,
}

impl SolutionHolder {
    fn unsolvable() -> Self {
        SolutionHolder {
            steps: Vec::new(),
            already_solved: false,
            elapsed: Duration::ZERO,
            peak_frontier_size: 0,
            expansions: 0,
            expired_runtime: false,
            expired_frontier_size: false,
        }
    }

    /// Whether the search ended at the goal, either by finding a move
    /// sequence or because the board was already solved.
    pub fn is_solved(&self) -> bool {
        self.already_solved || !self.steps.is_empty()
    }
}

/// Receives a notification after every node expansion. Implementations
/// can report progress, collect statistics, or drive a UI.
pub trait SearchObserver {
    fn on_expansion(&mut self, expansions: u64, frontier_size: usize, depth: u32);
}

/// Observer that ignores every notification.
pub struct NullObserver;

impl SearchObserver for NullObserver {
    fn on_expansion(&mut self, _expansions: u64, _frontier_size: usize, _depth: u32) {}
}

/// Solves `board` with the requested algorithm and heuristic.
///
/// Unsolvable boards are rejected by the parity test before any expansion,
/// yielding an empty holder with zero expansions. A board that is already
/// the goal yields an empty holder with `already_solved` set.
pub fn solve(
    board: &Board,
    algorithm: AlgorithmKind,
    heuristic: HeuristicKind,
    limits: &SearchLimits,
) -> SolutionHolder {
    solve_with_observer(board, algorithm, heuristic, limits, &mut NullObserver)
}

/// Variant of [`solve`] that reports each expansion to `observer`.
pub fn solve_with_observer(
    board: &Board,
    algorithm: AlgorithmKind,
    heuristic: HeuristicKind,
    limits: &SearchLimits,
    observer: &mut dyn SearchObserver,
) -> SolutionHolder {
    let goal = Board::goal(board.size());
    let heuristic = Heuristic::new(heuristic, &goal);
    if !board.is_solvable() {
        return SolutionHolder::unsolvable();
    }
    match algorithm {
        AlgorithmKind::AStar => {
            frontier_search(board, &heuristic, FrontierOrder::Score, limits, observer)
        }
        AlgorithmKind::GreedyAStar => frontier_search(
            board,
            &heuristic,
            FrontierOrder::ScoreMinusDepth,
            limits,
            observer,
        ),
        AlgorithmKind::UniformCost => {
            frontier_search(board, &heuristic, FrontierOrder::Fifo, limits, observer)
        }
        AlgorithmKind::IdaStar => ida_star(board, &heuristic, limits, observer),
    }
}

/// How a frontier search ranks the states waiting to be expanded.
#[derive(Clone, Copy, PartialEq, Eq)]
enum FrontierOrder {
    /// Lowest full score first.
    Score,
    /// Lowest estimate first, ignoring the depth already travelled.
    ScoreMinusDepth,
    /// Insertion order; with unit move costs this finds shortest paths.
    Fifo,
}

/// A frontier entry for the ordered queues. The ordering is reversed so
/// that `BinaryHeap`, a max-heap, pops the lowest priority first; ties
/// break toward the earliest-created step.
#[derive(PartialEq, Eq)]
struct OpenEntry {
    priority: u32,
    id: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

enum Frontier {
    Ordered(BinaryHeap<OpenEntry>),
    Fifo(VecDeque<usize>),
}

impl Frontier {
    fn new(order: FrontierOrder) -> Self {
        match order {
            FrontierOrder::Fifo => Frontier::Fifo(VecDeque::new()),
            _ => Frontier::Ordered(BinaryHeap::new()),
        }
    }

    fn push(&mut self, id: usize, priority: u32) {
        match self {
            Frontier::Ordered(heap) => heap.push(OpenEntry { priority, id }),
            Frontier::Fifo(queue) => queue.push_back(id),
        }
    }

    fn pop(&mut self) -> Option<usize> {
        match self {
            Frontier::Ordered(heap) => heap.pop().map(|entry| entry.id),
            Frontier::Fifo(queue) => queue.pop_front(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Frontier::Ordered(heap) => heap.len(),
            Frontier::Fifo(queue) => queue.len(),
        }
    }
}

/// Running totals shared by every algorithm, consumed into the final
/// holder by exactly one of the terminal constructors.
struct Tally {
    expansions: u64,
    peak_frontier_size: usize,
}

impl Tally {
    fn new() -> Self {
        Tally {
            expansions: 0,
            peak_frontier_size: 1,
        }
    }

    fn success(self, steps: Vec<SolutionStep>, started: Instant) -> SolutionHolder {
        SolutionHolder {
            already_solved: steps.is_empty(),
            steps,
            elapsed: started.elapsed(),
            peak_frontier_size: self.peak_frontier_size,
            expansions: self.expansions,
            expired_runtime: false,
            expired_frontier_size: false,
        }
    }

    fn exhausted(self, started: Instant) -> SolutionHolder {
        SolutionHolder {
            steps: Vec::new(),
            already_solved: false,
            elapsed: started.elapsed(),
            peak_frontier_size: self.peak_frontier_size,
            expansions: self.expansions,
            expired_runtime: false,
            expired_frontier_size: false,
        }
    }

    fn timed_out(self, started: Instant) -> SolutionHolder {
        SolutionHolder {
            steps: Vec::new(),
            already_solved: false,
            elapsed: started.elapsed(),
            peak_frontier_size: self.peak_frontier_size,
            expansions: self.expansions,
            expired_runtime: true,
            expired_frontier_size: false,
        }
    }

    fn overflowed(self, started: Instant) -> SolutionHolder {
        SolutionHolder {
            steps: Vec::new(),
            already_solved: false,
            elapsed: started.elapsed(),
            peak_frontier_size: self.peak_frontier_size,
            expansions: self.expansions,
            expired_runtime: false,
            expired_frontier_size: true,
        }
    }
}

fn priority_for(order: FrontierOrder, step: &SolutionStep) -> u32 {
    match order {
        FrontierOrder::Score => step.score,
        FrontierOrder::ScoreMinusDepth => step.score - step.depth,
        FrontierOrder::Fifo => 0,
    }
}

/// Best-first (or FIFO) search over an explicit frontier.
///
/// States are marked seen when first inserted, and a state reached again
/// later is never re-opened even if the later path scores better. This
/// keeps the frontier small; with consistent estimators the first path to
/// a state is already the cheapest.
fn frontier_search(
    board: &Board,
    heuristic: &Heuristic,
    order: FrontierOrder,
    limits: &SearchLimits,
    observer: &mut dyn SearchObserver,
) -> SolutionHolder {
    let started = Instant::now();
    let mut tally = Tally::new();
    let mut arena = StepArena::new();
    let mut seen: HashSet<Board> = HashSet::new();
    let mut frontier = Frontier::new(order);

    let root = SolutionStep::root(board.clone(), heuristic);
    let root_priority = priority_for(order, &root);
    seen.insert(board.clone());
    let root_id = arena.push(root);
    frontier.push(root_id, root_priority);

    while let Some(id) = frontier.pop() {
        if arena.get(id).state.is_goal() {
            return tally.success(arena.unwind(id), started);
        }

        tally.expansions += 1;
        let depth = arena.get(id).depth;
        let blank = arena.get(id).state.empty_position();
        for direction in Direction::ALL {
            if !arena.get(id).state.has_neighbor(direction, blank) {
                continue;
            }
            let mut state = arena.get(id).state.clone();
            state.apply(Action::from(direction), blank);
            if seen.contains(&state) {
                continue;
            }
            seen.insert(state.clone());
            let step =
                SolutionStep::successor(state, Some(id), Action::from(direction), depth + 1, heuristic);
            let priority = priority_for(order, &step);
            let child_id = arena.push(step);
            frontier.push(child_id, priority);
        }

        tally.peak_frontier_size = tally.peak_frontier_size.max(frontier.len());
        observer.on_expansion(tally.expansions, frontier.len(), depth);
        if limits.frontier_expired(frontier.len()) {
            return tally.overflowed(started);
        }
        if limits.runtime_expired(started) {
            return tally.timed_out(started);
        }
    }

    // Unreachable after the solvability pre-check, but the contract for an
    // emptied frontier is a plain failure result.
    tally.exhausted(started)
}

/// Outcome of one depth-first probe under a score bound.
enum Probe {
    /// The goal is the last step on the path.
    Found,
    /// No goal under the bound; the value is the smallest score that
    /// exceeded it, or `u32::MAX` if nothing did.
    Bound(u32),
    TimedOut,
    Overflowed,
}

/// Iterative-deepening variant: repeats a depth-first probe with a rising
/// score bound until the goal turns up. Only the current path is stored,
/// so the frontier-size limit applies to the path length.
fn ida_star(
    board: &Board,
    heuristic: &Heuristic,
    limits: &SearchLimits,
    observer: &mut dyn SearchObserver,
) -> SolutionHolder {
    let started = Instant::now();
    let mut tally = Tally::new();
    let root = SolutionStep::root(board.clone(), heuristic);
    let mut bound = root.score;
    let mut path = vec![root];

    loop {
        match probe(
            &mut path, bound, heuristic, limits, started, &mut tally, observer,
        ) {
            Probe::Found => {
                let steps = path[1..].to_vec();
                return tally.success(steps, started);
            }
            Probe::Bound(next) => {
                if next == u32::MAX {
                    return tally.exhausted(started);
                }
                bound = next;
            }
            Probe::TimedOut => return tally.timed_out(started),
            Probe::Overflowed => return tally.overflowed(started),
        }
    }
}

fn probe(
    path: &mut Vec<SolutionStep>,
    bound: u32,
    heuristic: &Heuristic,
    limits: &SearchLimits,
    started: Instant,
    tally: &mut Tally,
    observer: &mut dyn SearchObserver,
) -> Probe {
    tally.peak_frontier_size = tally.peak_frontier_size.max(path.len());
    let step = path.last().expect("search path is never empty");
    if step.state.is_goal() {
        return Probe::Found;
    }
    if step.score > bound {
        return Probe::Bound(step.score);
    }

    tally.expansions += 1;
    let depth = step.depth;
    let blank = step.state.empty_position();
    observer.on_expansion(tally.expansions, path.len(), depth);
    if limits.frontier_expired(path.len()) {
        return Probe::Overflowed;
    }
    if limits.runtime_expired(started) {
        return Probe::TimedOut;
    }

    let mut min_bound = u32::MAX;
    for direction in Direction::ALL {
        let parent = path.last().expect("search path is never empty");
        if !parent.state.has_neighbor(direction, blank) {
            continue;
        }
        let mut state = parent.state.clone();
        state.apply(Action::from(direction), blank);
        let candidate =
            SolutionStep::successor(state, None, Action::from(direction), depth + 1, heuristic);
        // A state already on the path would close a cycle; skip it.
        if path.contains(&candidate) {
            continue;
        }
        path.push(candidate);
        match probe(path, bound, heuristic, limits, started, tally, observer) {
            Probe::Found => return Probe::Found,
            Probe::Bound(next) => min_bound = min_bound.min(next),
            Probe::TimedOut => return Probe::TimedOut,
            Probe::Overflowed => return Probe::Overflowed,
        }
        path.pop();
    }

    Probe::Bound(min_bound)
}
