use core::fmt;
use grid_util::grid::{SimpleValueGrid, ValueGrid};
use grid_util::point::Point;
use itertools::Itertools;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::Cell;
use crate::error::{Result, RoutingError};
use crate::NEIGHBOUR_OFFSETS;

/// Zone code of an open floor cell.
pub const FLOOR: u8 = 0;
/// Zone code of a wall cell. Every other code above it names a ward zone.
pub const WALL: u8 = 1;

/// [MazeGrid] holds the static zone matrix of the maze together with the per-cell search state
/// ([Cell]) that each search run resets and then mutates. Connected components of the open cells
/// are kept in a [UnionFind] so that reachability can be checked without searching.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    pub zones: SimpleValueGrid<u8>,
    pub(crate) cells: SimpleValueGrid<Cell>,
    pub components: UnionFind<usize>,
}

impl MazeGrid {
    /// Builds a grid from rows of zone codes. Zone code [WALL] marks walls, everything else is
    /// traversable.
    pub fn from_zone_rows(rows: &[Vec<u8>]) -> Result<MazeGrid> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if width == 0 || height == 0 {
            return Err(RoutingError::EmptyMaze);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(RoutingError::RaggedMaze {
                row,
                found: r.len(),
                expected: width,
            });
        }
        let mut maze = MazeGrid::open(width, height);
        for (y, r) in rows.iter().enumerate() {
            for (x, &code) in r.iter().enumerate() {
                let p = Point::new(x as i32, y as i32);
                maze.zones.set_point(p, code);
                maze.cells.set_point(p, Cell::new(code == WALL));
            }
        }
        maze.generate_components();
        Ok(maze)
    }

    /// An all-floor grid with the given number of columns and rows.
    pub fn open(width: usize, height: usize) -> MazeGrid {
        let mut maze = MazeGrid {
            zones: SimpleValueGrid::new(width, height, FLOOR),
            cells: SimpleValueGrid::new(width, height, Cell::default()),
            components: UnionFind::new(width * height),
        };
        maze.generate_components();
        maze
    }

    /// Places or removes a wall. Meant for building grids; regenerates the components.
    pub fn set_wall(&mut self, pos: Point, wall: bool) {
        if !self.in_bounds(&pos) {
            return;
        }
        self.zones.set_point(pos, if wall { WALL } else { FLOOR });
        self.cells.set_point(pos, Cell::new(wall));
        self.generate_components();
    }

    pub fn width(&self) -> usize {
        self.zones.width()
    }

    pub fn height(&self) -> usize {
        self.zones.height()
    }

    pub fn in_bounds(&self, pos: &Point) -> bool {
        self.zones.point_in_bounds(*pos)
    }

    /// Positions outside the grid count as walls.
    pub fn is_wall(&self, pos: &Point) -> bool {
        !self.in_bounds(pos) || self.cells.get_point(*pos).is_wall
    }

    pub fn zone(&self, pos: &Point) -> Option<u8> {
        self.in_bounds(pos).then(|| self.zones.get_point(*pos))
    }

    pub fn cell(&self, pos: &Point) -> Option<Cell> {
        self.in_bounds(pos).then(|| self.cells.get_point(*pos))
    }

    pub(crate) fn set_cell(&mut self, pos: Point, cell: Cell) {
        self.cells.set_point(pos, cell);
    }

    /// The in-bounds, non-wall orthogonal neighbours of `pos` in East, West, South, North order.
    pub fn neighbours(&self, pos: &Point) -> SmallVec<[Point; 4]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(pos.x + dx, pos.y + dy))
            .filter(|p| !self.is_wall(p))
            .collect()
    }

    /// Checks that `pos` can host the agent: inside the grid and not a wall.
    pub fn check_open(&self, pos: &Point) -> Result<()> {
        if !self.in_bounds(pos) {
            Err(RoutingError::OutOfBounds(*pos, self.width(), self.height()))
        } else if self.is_wall(pos) {
            Err(RoutingError::Wall(*pos))
        } else {
            Ok(())
        }
    }

    /// Clears `g`, `h`, `f` and `parent` of every cell, then seeds `start` with `g = 0` and
    /// `f = h = heuristic(start)`. Fails without touching any cell if `start` is not open.
    pub fn reset_costs<F>(&mut self, start: &Point, heuristic: F) -> Result<()>
    where
        F: Fn(&Point) -> i32,
    {
        self.check_open(start)?;
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let p = Point::new(x, y);
                let mut cell = self.cells.get_point(p);
                cell.reset();
                self.cells.set_point(p, cell);
            }
        }
        let h = heuristic(start);
        let mut start_cell = self.cells.get_point(*start);
        start_cell.g = 0;
        start_cell.h = h;
        start_cell.f = h;
        self.cells.set_point(*start, start_cell);
        Ok(())
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.zones.get_ix_point(point))
    }

    /// Checks if start and goal are open cells on the same connected component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Walls and out-of-bounds positions
    /// are unreachable from everywhere.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.is_wall(start) || self.is_wall(goal) {
            true
        } else {
            let start_ix = self.zones.get_ix_point(start);
            let goal_ix = self.zones.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        }
    }

    /// Generates a new [UnionFind] structure and links up open orthogonal neighbours.
    pub fn generate_components(&mut self) {
        let w = self.width();
        let h = self.height();
        debug!("Generating connected components for a {w}x{h} maze");
        self.components = UnionFind::new(w * h);
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                let point = Point::new(x, y);
                if self.is_wall(&point) {
                    continue;
                }
                let parent_ix = self.zones.get_ix_point(&point);
                // East and South suffice, the other two directions are covered from the neighbour.
                for p in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if !self.is_wall(&p) {
                        let ix = self.zones.get_ix_point(&p);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Maze:")?;
        for y in 0..self.height() as i32 {
            let values = (0..self.width() as i32)
                .map(|x| self.zones.get(x, y))
                .join(",");
            writeln!(f, "{}", values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{point_at, UNREACHED};

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 3x2 grid:
        //  ___
        // | # |
        // | # |
        //  ___
        let maze = MazeGrid::from_zone_rows(&[vec![0, 1, 0], vec![0, 1, 0]]).unwrap();
        assert!(maze.reachable(&point_at(0, 0), &point_at(1, 0)));
        assert!(maze.unreachable(&point_at(0, 0), &point_at(0, 2)));
        assert!(maze.unreachable(&point_at(0, 0), &point_at(0, 1)));
        assert_eq!(
            maze.get_component(&point_at(0, 2)),
            maze.get_component(&point_at(1, 2))
        );
    }

    /// Diagonal contact does not connect cells on a 4-grid.
    #[test]
    fn diagonal_cells_are_not_connected() {
        //  __
        // | #|
        // |# |
        //  __
        let maze = MazeGrid::from_zone_rows(&[vec![0, 1], vec![1, 0]]).unwrap();
        assert!(maze.unreachable(&point_at(0, 0), &point_at(1, 1)));
    }

    #[test]
    fn walls_come_from_zone_code_one() {
        let maze = MazeGrid::from_zone_rows(&[vec![0, 1, 2], vec![13, 0, 1]]).unwrap();
        assert_eq!(maze.width(), 3);
        assert_eq!(maze.height(), 2);
        assert!(maze.is_wall(&point_at(0, 1)));
        assert!(maze.is_wall(&point_at(1, 2)));
        assert!(!maze.is_wall(&point_at(0, 2)));
        assert!(!maze.is_wall(&point_at(1, 0)));
        assert_eq!(maze.zone(&point_at(1, 0)), Some(13));
        assert_eq!(maze.zone(&point_at(2, 0)), None);
        assert!(maze.is_wall(&point_at(-1, 0)));
    }

    #[test]
    fn rejects_empty_and_ragged_matrices() {
        assert!(matches!(
            MazeGrid::from_zone_rows(&[]),
            Err(RoutingError::EmptyMaze)
        ));
        assert!(matches!(
            MazeGrid::from_zone_rows(&[vec![0, 0], vec![0]]),
            Err(RoutingError::RaggedMaze {
                row: 1,
                found: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn set_wall_splits_components() {
        let mut maze = MazeGrid::open(3, 1);
        assert!(maze.reachable(&point_at(0, 0), &point_at(0, 2)));
        maze.set_wall(point_at(0, 1), true);
        assert!(maze.unreachable(&point_at(0, 0), &point_at(0, 2)));
        maze.set_wall(point_at(0, 1), false);
        assert!(maze.reachable(&point_at(0, 0), &point_at(0, 2)));
    }

    #[test]
    fn neighbours_follow_east_west_south_north() {
        let maze = MazeGrid::open(3, 3);
        let centre = point_at(1, 1);
        let expected = [point_at(1, 2), point_at(1, 0), point_at(2, 1), point_at(0, 1)];
        assert_eq!(maze.neighbours(&centre).as_slice(), &expected);
    }

    #[test]
    fn neighbours_skip_walls_and_edges() {
        let mut maze = MazeGrid::open(3, 3);
        maze.set_wall(point_at(0, 1), true);
        let corner = point_at(0, 0);
        assert_eq!(maze.neighbours(&corner).as_slice(), &[point_at(1, 0)]);
    }

    #[test]
    fn reset_costs_seeds_only_the_start() {
        let mut maze = MazeGrid::open(4, 3);
        let start = point_at(1, 1);
        let goal = point_at(2, 3);
        maze.reset_costs(&start, |p| crate::manhattan(p, &goal)).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                let p = Point::new(x, y);
                let cell = maze.cell(&p).unwrap();
                assert_eq!(cell.parent, None);
                if p == start {
                    assert_eq!((cell.g, cell.h, cell.f), (0, 3, 3));
                } else {
                    assert_eq!((cell.g, cell.h, cell.f), (UNREACHED, 0, UNREACHED));
                }
            }
        }
    }

    #[test]
    fn reset_costs_rejects_walls_and_outside_positions() {
        let mut maze = MazeGrid::open(2, 2);
        maze.set_wall(point_at(0, 0), true);
        assert!(matches!(
            maze.reset_costs(&point_at(0, 0), |_| 0),
            Err(RoutingError::Wall(_))
        ));
        assert!(matches!(
            maze.reset_costs(&point_at(5, 0), |_| 0),
            Err(RoutingError::OutOfBounds(_, 2, 2))
        ));
    }
}
