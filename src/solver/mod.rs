use crate::error::Result;
use crate::maze_grid::MazeGrid;
use crate::STEP_COST;
use core::fmt;
use grid_util::point::Point;
use log::warn;
use std::str::FromStr;

pub mod astar;
pub mod dijkstra;
pub mod search;

use astar::AstarSolver;
use dijkstra::DijkstraSolver;

/// Outcome of a single-goal search. An unreachable goal is a regular outcome, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// Positions from start to goal, both included, and the cost of the path.
    Found { path: Vec<Point>, cost: i32 },
    Unreachable,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found { .. })
    }

    pub fn path(&self) -> Option<&[Point]> {
        match self {
            PathResult::Found { path, .. } => Some(path),
            PathResult::Unreachable => None,
        }
    }

    pub fn into_path(self) -> Option<Vec<Point>> {
        match self {
            PathResult::Found { path, .. } => Some(path),
            PathResult::Unreachable => None,
        }
    }

    /// Number of moves along the path.
    pub fn steps(&self) -> Option<usize> {
        self.path().map(|p| p.len() - 1)
    }
}

/// Counters of one search run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells whose neighbours were generated.
    pub expanded: usize,
    /// Entries pushed onto the frontier, the start included.
    pub pushed: usize,
    /// Popped entries discarded because the cell was already reached more cheaply.
    pub stale: usize,
}

/// A single-goal search strategy over a [MazeGrid]. Implementors choose the heuristic and the
/// step cost; the best-first loop, cost bookkeeping and path reconstruction are shared.
pub trait GridSolver {
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32;

    fn step_cost(&self) -> i32 {
        STEP_COST
    }

    /// Searches from `start` to `goal`, resetting and then overwriting the cost state of `grid`.
    /// Fails only if `start` or `goal` is a wall or lies outside the grid.
    fn search(
        &self,
        grid: &mut MazeGrid,
        start: Point,
        goal: Point,
    ) -> Result<(PathResult, SearchStats)> {
        search::best_first(grid, start, goal, self.step_cost(), |p| {
            self.heuristic(p, &goal)
        })
    }

    fn get_path_single_goal(
        &self,
        grid: &mut MazeGrid,
        start: Point,
        goal: Point,
    ) -> Result<Option<Vec<Point>>> {
        Ok(self.search(grid, start, goal)?.0.into_path())
    }

    /// Total cost of moving along `path`.
    fn get_path_cost(&self, path: &[Point]) -> i32 {
        path.len().saturating_sub(1) as i32 * self.step_cost()
    }
}

/// The search algorithms a route can be planned with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchMode {
    #[default]
    AStar,
    Dijkstra,
}

impl SearchMode {
    /// Parses an algorithm name, falling back to [SearchMode::AStar] with a warning for names
    /// that are not recognised.
    pub fn from_name(name: &str) -> SearchMode {
        name.parse().unwrap_or_else(|_| {
            warn!("Invalid algorithm '{}', defaulting to A*", name.trim());
            SearchMode::AStar
        })
    }
}

impl FromStr for SearchMode {
    type Err = String;

    /// Accepts `A*`/`astar` and `Dijkstra` in any letter case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a*" | "astar" | "a-star" => Ok(SearchMode::AStar),
            "dijkstra" => Ok(SearchMode::Dijkstra),
            other => Err(format!("unknown search algorithm '{other}'")),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchMode::AStar => write!(f, "A*"),
            SearchMode::Dijkstra => write!(f, "Dijkstra"),
        }
    }
}

/// Runs one search with the solver selected by `mode`.
pub fn search(
    grid: &mut MazeGrid,
    start: Point,
    goal: Point,
    mode: SearchMode,
) -> Result<(PathResult, SearchStats)> {
    match mode {
        SearchMode::AStar => AstarSolver::new().search(grid, start, goal),
        SearchMode::Dijkstra => DijkstraSolver.search(grid, start, goal),
    }
}
