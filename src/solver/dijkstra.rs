use grid_util::point::Point;

use crate::solver::GridSolver;

/// Uniform-cost search: A* with a zero heuristic, so cells are expanded in order of their cost
/// from the start.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &Point, _: &Point) -> i32 {
        0
    }
}
