use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use tracing::debug;

use super::grid::{Cell, Mountain};
use super::heuristic::octile_distance;
use super::{Algorithm, PathOutcome, SearchStats};

/// Runs one search strategy over every lodge of a mountain.
///
/// Each lodge is an independent search from the start cell; results come back
/// in lodge file order.
pub struct Pathfinder {
    algorithm: Algorithm,
    stats: SearchStats,
}

impl Pathfinder {
    pub fn new(algorithm: Algorithm) -> Self { Self { algorithm, stats: SearchStats::default() } }

    #[inline]
    pub fn algorithm(&self) -> Algorithm { self.algorithm }

    /// Search every lodge in file order.
    pub fn solve(&mut self, mountain: &Mountain) -> Vec<PathOutcome> {
        mountain.lodges().iter().map(|&lodge| self.find(mountain, lodge)).collect()
    }

    /// Search a single goal cell.
    pub fn find(&mut self, mountain: &Mountain, goal: Cell) -> PathOutcome {
        let mut stats = SearchStats::default();
        let outcome = match self.algorithm {
            Algorithm::Bfs => bfs(mountain, goal, &mut stats),
            Algorithm::Ucs => ucs(mountain, goal, &mut stats),
            Algorithm::AStar => astar(mountain, goal, &mut stats),
        };
        debug!(
            algorithm = ?self.algorithm,
            goal = %goal,
            expanded = stats.expanded,
            found = outcome.is_found(),
            "lodge search finished"
        );
        self.stats.expanded += stats.expanded;
        self.stats.generated += stats.generated;
        outcome
    }

    /// Totals accumulated since construction or the last [`Self::reset_stats`].
    #[inline]
    pub fn last_stats(&self) -> SearchStats { self.stats }

    #[inline]
    pub fn reset_stats(&mut self) { self.stats = SearchStats::default(); }
}

/// Uphill moves are limited by stamina alone. Any `u64` stamina is accepted,
/// so the bound saturates.
#[inline]
fn within_stamina(mountain: &Mountain, from: Cell, to: Cell) -> bool {
    mountain.height_at(to) <= mountain.height_at(from).saturating_add(mountain.stamina())
}

fn bfs(mountain: &Mountain, goal: Cell, stats: &mut SearchStats) -> PathOutcome {
    let start = mountain.start();
    if start == goal {
        return PathOutcome::Found(vec![start]);
    }
    let mut frontier = VecDeque::from([start]);
    let mut reached = HashSet::from([start]);
    let mut parent: HashMap<Cell, Cell> = HashMap::new();

    while let Some(node) = frontier.pop_front() {
        stats.expanded += 1;
        for (child, _) in mountain.neighbours(node) {
            if reached.contains(&child) || !within_stamina(mountain, node, child) {
                continue;
            }
            stats.generated += 1;
            parent.insert(child, node);
            if child == goal {
                return PathOutcome::Found(walk_back(&parent, goal, |&c| c));
            }
            reached.insert(child);
            frontier.push_back(child);
        }
    }
    PathOutcome::Fail
}

fn ucs(mountain: &Mountain, goal: Cell, stats: &mut SearchStats) -> PathOutcome {
    let start = mountain.start();
    // (cost, insertion sequence, cell): equal costs pop in FIFO order.
    let mut frontier: BinaryHeap<Reverse<(u64, u64, Cell)>> = BinaryHeap::new();
    let mut best: HashMap<Cell, u64> = HashMap::from([(start, 0)]);
    let mut parent: HashMap<Cell, Cell> = HashMap::new();
    let mut closed: HashSet<Cell> = HashSet::new();
    let mut seq = 0u64;
    frontier.push(Reverse((0, seq, start)));

    while let Some(Reverse((cost, _, node))) = frontier.pop() {
        if !closed.insert(node) {
            continue;
        }
        stats.expanded += 1;
        if node == goal {
            return PathOutcome::Found(walk_back(&parent, goal, |&c| c));
        }
        for (child, step) in mountain.neighbours(node) {
            if closed.contains(&child) || !within_stamina(mountain, node, child) {
                continue;
            }
            let next_cost = cost.saturating_add(step);
            if best.get(&child).map_or(true, |&known| next_cost < known) {
                stats.generated += 1;
                best.insert(child, next_cost);
                parent.insert(child, node);
                seq += 1;
                frontier.push(Reverse((next_cost, seq, child)));
            }
        }
    }
    PathOutcome::Fail
}

/// A* search node. Momentum is part of the state because it changes which
/// uphill moves are legal from the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct State {
    cell: Cell,
    momentum: u64,
}

fn astar(mountain: &Mountain, goal: Cell, stats: &mut SearchStats) -> PathOutcome {
    let start = State { cell: mountain.start(), momentum: 0 };
    // (f, g, insertion sequence, state)
    let mut frontier: BinaryHeap<Reverse<(u64, u64, u64, State)>> = BinaryHeap::new();
    let mut best: HashMap<State, u64> = HashMap::from([(start, 0)]);
    let mut parent: HashMap<State, State> = HashMap::new();
    let mut closed: HashSet<State> = HashSet::new();
    let mut seq = 0u64;
    frontier.push(Reverse((octile_distance(start.cell, goal), 0, seq, start)));

    while let Some(Reverse((_, cost, _, state))) = frontier.pop() {
        if !closed.insert(state) {
            continue;
        }
        stats.expanded += 1;
        if state.cell == goal {
            return PathOutcome::Found(walk_back(&parent, state, |s| s.cell));
        }
        let here = mountain.height_at(state.cell);
        for (next_cell, step) in mountain.neighbours(state.cell) {
            let there = mountain.height_at(next_cell);
            if there > here.saturating_add(mountain.stamina()).saturating_add(state.momentum) {
                continue;
            }
            let climb = if there > here { (there - here).saturating_sub(state.momentum) } else { 0 };
            let next = State { cell: next_cell, momentum: here.saturating_sub(there) };
            if closed.contains(&next) {
                continue;
            }
            let next_cost = cost.saturating_add(step).saturating_add(climb);
            if best.get(&next).map_or(true, |&known| next_cost < known) {
                stats.generated += 1;
                best.insert(next, next_cost);
                parent.insert(next, state);
                seq += 1;
                let f = next_cost.saturating_add(octile_distance(next_cell, goal));
                frontier.push(Reverse((f, next_cost, seq, next)));
            }
        }
    }
    PathOutcome::Fail
}

fn walk_back<K, F>(parent: &HashMap<K, K>, goal: K, cell_of: F) -> Vec<Cell>
where
    K: Copy + Eq + std::hash::Hash,
    F: Fn(&K) -> Cell,
{
    let mut path = vec![cell_of(&goal)];
    let mut cur = goal;
    while let Some(&prev) = parent.get(&cur) {
        path.push(cell_of(&prev));
        cur = prev;
    }
    path.reverse();
    path
}

/// Total horizontal plus climbing cost of a path, as A* scores it.
pub fn path_cost(mountain: &Mountain, path: &[Cell]) -> u64 {
    let mut momentum = 0u64;
    let mut total = 0u64;
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let diagonal = a.row != b.row && a.col != b.col;
        total += if diagonal { super::grid::DIAGONAL_COST } else { super::grid::STRAIGHT_COST };
        let (here, there) = (mountain.height_at(a), mountain.height_at(b));
        if there > here {
            total += (there - here).saturating_sub(momentum);
        }
        momentum = here.saturating_sub(there);
    }
    total
}
