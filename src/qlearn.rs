use crate::action::Action;
use crate::astar::{reconstruct_path, FxIndexMap};
use crate::error::Error;
use crate::grid::MazeGrid;
use crate::math::to_doubled;
use bevy_math::IVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Learning rate `α` of the Q-update.
pub const LEARNING_RATE: f64 = 0.9;

/// Discount factor `γ` of the Q-update.
pub const DISCOUNT: f64 = 0.98;

/// Exploration probability `ε` at the top of the decay curve.
pub const INITIAL_EXPLORATION: f64 = 1.0;

/// Exponential decay rate `λ` applied to `ε` per episode.
pub const EXPLORATION_DECAY: f64 = 0.01;

/// Step budget of the greedy rollout before the policy is declared lost.
pub const MAX_ROLLOUT_STEPS: u32 = 40_000;

const REWARD_GOAL: f64 = 10.0;
const REWARD_WALL: f64 = -10.0;
const REWARD_STEP: f64 = -0.1;

/// A dense table of Q-values, one `[f64; 4]` action row per doubled cell.
/// Rows start at zero and the table lives for a single training call.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Vec<[f64; 4]>,
    cols: usize,
}

impl QTable {
    #[must_use]
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            values: vec![[0.0; 4]; cols * rows],
            cols,
        }
    }

    #[inline]
    fn index(&self, cell: IVec2) -> usize {
        cell.y as usize * self.cols + cell.x as usize
    }

    /// Get the largest Q-value of the given cell's row.
    #[inline]
    #[must_use]
    pub fn max_value(&self, cell: IVec2) -> f64 {
        let row = &self.values[self.index(cell)];
        row.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b))
    }

    /// Get the greedy action for the given cell, breaking ties in favor of
    /// the earliest action index.
    #[inline]
    #[must_use]
    pub fn best_action(&self, cell: IVec2) -> Action {
        let row = &self.values[self.index(cell)];
        let mut best = 0;
        for (index, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = index;
            }
        }
        Action::from_index(best)
    }

    #[inline]
    fn update(&mut self, cell: IVec2, action: Action, target: f64) {
        let index = self.index(cell);
        let value = &mut self.values[index][action.index()];
        *value += LEARNING_RATE * (target - *value);
    }
}

/// Find a path between two logical cells by training a tabular Q-Learning
/// agent on the doubled grid and extracting its greedy policy.
///
/// The exploration generator is seeded from entropy once per call; use
/// [q_search_with_rng] for reproducible runs.
pub fn q_search(grid: &MazeGrid, start: IVec2, goal: IVec2) -> Result<Vec<IVec2>, Error> {
    q_search_with_rng(grid, start, goal, &mut StdRng::from_entropy())
}

/// [q_search] with an injected exploration generator. With a fixed seed and
/// fixed inputs, the learned table and the extracted path are identical
/// across runs.
///
/// # Returns
///
/// The path in doubled coordinates, goal-first, or [Error::IncorrectPoint]
/// for an endpoint outside the logical bounds, or [Error::PathNotFound] when
/// the greedy rollout exceeds [MAX_ROLLOUT_STEPS].
pub fn q_search_with_rng<R: Rng>(
    grid: &MazeGrid,
    start: IVec2,
    goal: IVec2,
    rng: &mut R,
) -> Result<Vec<IVec2>, Error> {
    if !in_logical_bounds(grid, start) || !in_logical_bounds(grid, goal) {
        return Err(Error::IncorrectPoint);
    }

    let mut table = QTable::new(grid.cols(), grid.rows());
    train(grid, &mut table, to_doubled(start), to_doubled(goal), rng);
    extract_path(grid, &table, to_doubled(start), to_doubled(goal))
}

#[inline]
fn in_logical_bounds(grid: &MazeGrid, cell: IVec2) -> bool {
    cell.x >= 0
        && cell.y >= 0
        && (cell.x as usize) < grid.logical_cols()
        && (cell.y as usize) < grid.logical_rows()
}

/// The per-maze episode budget, stepped on `M = max(R, C)` logical cells.
#[must_use]
pub fn episode_budget(grid: &MazeGrid) -> u32 {
    let m = grid.logical_rows().max(grid.logical_cols()) as u32;
    if m <= 30 {
        (f64::from(m) * 1.55 * 100.0).floor() as u32
    } else if m > 40 {
        m * 200 + 500
    } else {
        m * 200
    }
}

fn train<R: Rng>(grid: &MazeGrid, table: &mut QTable, start: IVec2, goal: IVec2, rng: &mut R) {
    let episodes = episode_budget(grid);
    debug!(episodes, "training");

    // Decay is applied after each episode, so the first episode runs fully
    // greedy over the all-zero table.
    let mut epsilon = 0.0;

    for episode in 0..episodes {
        let mut current = start;
        loop {
            let action = select_action(table, current, epsilon, rng);
            let mut next = action.apply(current);

            let (reward, done) = if next == goal {
                (REWARD_GOAL, true)
            } else if !grid.is_passage(next) {
                // Bound the terminal bootstrap on the current cell's own row.
                next = current;
                (REWARD_WALL, true)
            } else {
                (REWARD_STEP, false)
            };

            let target = reward + DISCOUNT * table.max_value(next);
            table.update(current, action, target);

            current = next;
            if done {
                break;
            }
        }
        epsilon = INITIAL_EXPLORATION * (-EXPLORATION_DECAY * f64::from(episode)).exp();
        trace!(episode, epsilon, "episode done");
    }
}

#[inline]
fn select_action<R: Rng>(table: &QTable, cell: IVec2, epsilon: f64, rng: &mut R) -> Action {
    if rng.gen::<f64>() < epsilon {
        Action::from_index(rng.gen_range(0..4))
    } else {
        table.best_action(cell)
    }
}

/// Roll the greedy policy out from `start`, recording parents, until `goal`
/// is reached or the step budget runs out. A greedy action into a wall
/// leaves the agent in place, which burns a step and converges on the
/// budget instead of leaving the grid.
fn extract_path(
    grid: &MazeGrid,
    table: &QTable,
    start: IVec2,
    goal: IVec2,
) -> Result<Vec<IVec2>, Error> {
    let mut parents: FxIndexMap<IVec2, IVec2> = FxIndexMap::default();
    let mut current = start;

    for step in 0..MAX_ROLLOUT_STEPS {
        let next = table.best_action(current).apply(current);
        if next != goal && !grid.is_passage(next) {
            continue;
        }
        parents.insert(next, current);
        if next == goal {
            debug!(step, "policy reached goal");
            return Ok(reconstruct_path(&parents, goal, start));
        }
        current = next;
    }

    debug!(steps = MAX_ROLLOUT_STEPS, "rollout budget exceeded");
    Err(Error::PathNotFound)
}
