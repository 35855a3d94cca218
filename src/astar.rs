use crate::action::Action;
use crate::error::Error;
use crate::grid::MazeGrid;
use crate::math::{manhattan_distance, to_doubled};
use bevy_math::IVec2;
use fxhash::{FxHashSet, FxHasher};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::BuildHasherDefault;
use tracing::debug;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Find a path between two logical cells with an A* search over the doubled
/// grid, using the Manhattan heuristic and unit 4-neighbor steps.
///
/// A cell enters the discovered set the moment it is first enqueued and is
/// never re-opened, and the per-node cost accumulator approximates the path
/// length by the straight-line distance back to the start. The first path
/// that pops the goal is the one returned.
///
/// # Parameters
///
/// - `grid`: The maze, in doubled form.
/// - `start`: The logical start cell.
/// - `goal`: The logical goal cell.
///
/// # Returns
///
/// The path in doubled coordinates, ordered from the goal back to the start,
/// or [Error::PathNotFound] once the open set is exhausted.
pub fn astar_search(grid: &MazeGrid, start: IVec2, goal: IVec2) -> Result<Vec<IVec2>, Error> {
    let start = to_doubled(start);
    let goal = to_doubled(goal);

    let mut open = BinaryHeap::with_capacity(128);
    let mut discovered: FxHashSet<IVec2> = FxHashSet::default();
    let mut parents: FxIndexMap<IVec2, IVec2> = FxIndexMap::default();

    open.push(OpenCell {
        estimated_cost: manhattan_distance(start, goal),
        cell: start,
    });
    discovered.insert(start);

    while let Some(OpenCell { cell, .. }) = open.pop() {
        if cell == goal {
            debug!(expanded = discovered.len(), "goal reached");
            return Ok(reconstruct_path(&parents, goal, start));
        }

        for action in Action::ALL {
            let next = action.apply(cell);
            if !grid.is_passage(next) || discovered.contains(&next) {
                continue;
            }
            discovered.insert(next);
            parents.insert(next, cell);

            let cost = manhattan_distance(cell, next) + manhattan_distance(start, cell);
            open.push(OpenCell {
                estimated_cost: cost + manhattan_distance(next, goal),
                cell: next,
            });
        }
    }

    debug!(expanded = discovered.len(), "open set exhausted");
    Err(Error::PathNotFound)
}

/// Walk a parent map back from `goal`, collecting the path goal-first.
/// A missing predecessor truncates the walk silently; `start` is always the
/// final entry.
pub(crate) fn reconstruct_path(
    parents: &FxIndexMap<IVec2, IVec2>,
    goal: IVec2,
    start: IVec2,
) -> Vec<IVec2> {
    let mut path = Vec::with_capacity(parents.len() / 2 + 1);
    let mut current = goal;
    while current != start {
        path.push(current);
        match parents.get(&current) {
            Some(&parent) => current = parent,
            None => break,
        }
    }
    path.push(start);
    path
}

struct OpenCell {
    estimated_cost: i32,
    cell: IVec2,
}

impl PartialEq for OpenCell {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.cell.eq(&other.cell)
    }
}

impl Eq for OpenCell {}

impl PartialOrd for OpenCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenCell {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; ties break on a fixed cell order so runs
        // over identical input pop in the same sequence.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => (other.cell.x, other.cell.y).cmp(&(self.cell.x, self.cell.y)),
            s => s,
        }
    }
}
