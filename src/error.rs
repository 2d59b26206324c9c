use grid_util::point::Point;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by grid construction, configuration loading and search preconditions.
///
/// Unreachable goals and unknown ward names are not errors: the first is a
/// [PathResult::Unreachable](crate::PathResult::Unreachable), the second is logged and skipped.
#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("position {0} lies outside the {1}x{2} maze")]
    OutOfBounds(Point, usize, usize),

    #[error("position {0} is a wall")]
    Wall(Point),

    #[error("zone matrix has no cells")]
    EmptyMaze,

    #[error("zone matrix row {row} has {found} columns, expected {expected}")]
    RaggedMaze {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ward table: {0}")]
    WardTable(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, RoutingError>;
