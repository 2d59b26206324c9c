use ward_pathfinding::solver::{astar::AstarSolver, GridSolver};
use ward_pathfinding::{point_at, MazeGrid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut maze = MazeGrid::from_zone_rows(&[vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]])
        .expect("valid zone matrix");
    println!("{}", maze);
    let start = point_at(0, 0);
    let end = point_at(2, 2);
    let path = AstarSolver::new()
        .get_path_single_goal(&mut maze, start, end)
        .expect("start and end are open cells")
        .expect("end is reachable");
    println!("Path:");
    for p in path {
        let cell = maze.cell(&p).expect("path stays on the grid");
        println!("({}, {}) g={} h={}", p.y, p.x, cell.g, cell.h);
    }
}
