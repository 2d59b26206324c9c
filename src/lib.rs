//! # ward_pathfinding
//!
//! Delivery routing for a single agent on a fixed ward grid. A [GoalScheduler](scheduler::GoalScheduler)
//! orders destinations by priority and drives a single-goal search
//! ([A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) or uniform-cost
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)) once per destination over a
//! shared [MazeGrid](maze_grid::MazeGrid). Movement is 4-connected and every step costs
//! [STEP_COST].
//!
//! Positions are [Point]s with `x` as the column and `y` as the row; use [point_at] to build them
//! from row/column pairs.
pub mod cell;
pub mod error;
pub mod maze_grid;
pub mod request;
pub mod scheduler;
pub mod solver;
pub mod wards;

pub use error::{Result, RoutingError};
pub use grid_util::point::Point;
pub use maze_grid::MazeGrid;
pub use scheduler::{Destination, GoalScheduler, GoalState, RouteObserver, RunSummary};
pub use solver::{search, PathResult, SearchMode, SearchStats};

/// Cost of a single orthogonal move.
pub const STEP_COST: i32 = 1;
/// Cost value of a cell that has not been reached in the current search run.
pub const UNREACHED: i32 = i32::MAX;

/// Column/row offsets of the four neighbours in expansion order: East, West, South, North.
/// The order is fixed so that tie-breaking between equal cost paths is deterministic.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Builds the [Point] for a row/column pair.
pub fn point_at(row: i32, col: i32) -> Point {
    Point::new(col, row)
}

/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two positions.
pub fn manhattan(p1: &Point, p2: &Point) -> i32 {
    (p1.x - p2.x).abs() + (p1.y - p2.y).abs()
}
