use grid_util::point::Point;

use crate::{manhattan, solver::GridSolver, STEP_COST};

/// A* with the Manhattan distance, which is admissible and consistent for 4-connected unit-cost
/// moves.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

impl GridSolver for AstarSolver {
    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        manhattan(p1, p2) * STEP_COST
    }
}
