//! Best-first search over the cost state of a [MazeGrid]. The frontier is a [BinaryHeap] that may
//! hold several entries for the same cell; entries whose cost no longer matches the cell are
//! discarded when popped.
use grid_util::point::Point;
use log::debug;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::Result;
use crate::maze_grid::MazeGrid;
use crate::solver::{PathResult, SearchStats};

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    sequence: usize,
    position: Point,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.sequence == other.sequence
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the smallest estimate wins, equal estimates are served
        // first in, first out
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Follows the parent links from `goal` back to the cell without a parent and returns the
/// positions in start to goal order.
pub(crate) fn reverse_path(grid: &MazeGrid, goal: Point) -> Vec<Point> {
    let mut path: Vec<Point> =
        std::iter::successors(Some(goal), |p| grid.cell(p).and_then(|c| c.parent)).collect();
    path.reverse();
    path
}

/// Runs a single-goal search from `start` to `goal`. Costs of all cells are reset first, after
/// which the run owns the cost state of `grid`. Every move costs `step_cost`; `heuristic` must not
/// overestimate the remaining cost for the returned path to be shortest.
pub fn best_first<FH>(
    grid: &mut MazeGrid,
    start: Point,
    goal: Point,
    step_cost: i32,
    heuristic: FH,
) -> Result<(PathResult, SearchStats)>
where
    FH: Fn(&Point) -> i32,
{
    grid.check_open(&goal)?;
    grid.reset_costs(&start, &heuristic)?;

    let mut stats = SearchStats::default();
    let mut sequence = 0;
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(&start),
        cost: 0,
        sequence,
        position: start,
    });
    stats.pushed += 1;

    while let Some(SmallestCostHolder { cost, position, .. }) = to_see.pop() {
        if position == goal {
            let path = reverse_path(grid, goal);
            debug!(
                "Reached {} from {} with cost {}: {:?}",
                goal, start, cost, stats
            );
            return Ok((PathResult::Found { path, cost }, stats));
        }
        let current = match grid.cell(&position) {
            Some(cell) => cell,
            None => continue,
        };
        // A cheaper entry for this cell was pushed after this one; it has already been or will
        // be expanded instead.
        if cost > current.g {
            stats.stale += 1;
            continue;
        }
        stats.expanded += 1;
        for neighbour in grid.neighbours(&position) {
            let new_g = current.g + step_cost;
            let mut cell = match grid.cell(&neighbour) {
                Some(cell) => cell,
                None => continue,
            };
            if new_g < cell.g {
                cell.g = new_g;
                cell.h = heuristic(&neighbour);
                cell.f = new_g + cell.h;
                cell.parent = Some(position);
                grid.set_cell(neighbour, cell);
                sequence += 1;
                to_see.push(SmallestCostHolder {
                    estimated_cost: cell.f,
                    cost: new_g,
                    sequence,
                    position: neighbour,
                });
                stats.pushed += 1;
            }
        }
    }
    debug!("Frontier exhausted before reaching {} from {}: {:?}", goal, start, stats);
    Ok((PathResult::Unreachable, stats))
}
