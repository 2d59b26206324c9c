use grid_util::point::Point;

use crate::UNREACHED;

/// Search state of one grid cell. `parent` refers to the neighbouring cell the current search run
/// reached this cell from and is cleared whenever costs are reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub is_wall: bool,
    /// Cost so far.
    pub g: i32,
    /// Heuristic estimate of the remaining cost.
    pub h: i32,
    /// Evaluation priority, `g + h`.
    pub f: i32,
    pub parent: Option<Point>,
}

impl Cell {
    pub fn new(is_wall: bool) -> Cell {
        Cell {
            is_wall,
            ..Cell::default()
        }
    }

    /// Whether the current search run has assigned a finite cost to this cell.
    pub fn is_reached(&self) -> bool {
        self.g != UNREACHED
    }

    /// Clears the search state, keeping the wall flag.
    pub fn reset(&mut self) {
        *self = Cell::new(self.is_wall);
    }
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            is_wall: false,
            g: UNREACHED,
            h: 0,
            f: UNREACHED,
            parent: None,
        }
    }
}
