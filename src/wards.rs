//! Ward directory: which zone codes exist, what they are called, how urgent deliveries to them
//! are and where their drop-off points lie. Loaded from TOML:
//!
//! ```toml
//! default_start = [8, 3]
//!
//! [[ward]]
//! code = 4
//! names = ["EMERGENCY", "ER"]
//! priority = 5
//! locations = [[7, 22], [8, 21]]
//! ```
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, RoutingError};
use crate::maze_grid::MazeGrid;
use crate::point_at;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Priority of wards that do not declare one.
pub const DEFAULT_PRIORITY: i32 = 1;

#[derive(Clone, Debug, Deserialize)]
pub struct WardSpec {
    pub code: u8,
    pub names: Vec<String>,
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// `[row, col]` pairs.
    #[serde(default)]
    pub locations: Vec<[i32; 2]>,
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

#[derive(Clone, Debug, Deserialize)]
struct WardFile {
    default_start: [i32; 2],
    #[serde(default, rename = "ward")]
    wards: Vec<WardSpec>,
}

/// Lookup tables built from a ward file. Names are stored upper-cased.
#[derive(Clone, Debug)]
pub struct WardDirectory {
    default_start: Point,
    codes: FxIndexMap<String, u8>,
    priorities: FxIndexMap<u8, i32>,
    locations: FxIndexMap<u8, Vec<Point>>,
}

/// Normalises a ward name for lookups.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

impl WardDirectory {
    pub fn new(default_start: Point, wards: Vec<WardSpec>) -> WardDirectory {
        let mut directory = WardDirectory {
            default_start,
            codes: FxIndexMap::default(),
            priorities: FxIndexMap::default(),
            locations: FxIndexMap::default(),
        };
        for ward in wards {
            for name in &ward.names {
                directory.codes.insert(normalize_name(name), ward.code);
            }
            directory.priorities.insert(ward.code, ward.priority);
            directory
                .locations
                .entry(ward.code)
                .or_default()
                .extend(ward.locations.iter().map(|&[row, col]| point_at(row, col)));
        }
        directory
    }

    pub fn from_toml_str(source: &str) -> Result<WardDirectory> {
        let file: WardFile = toml::from_str(source)?;
        let [row, col] = file.default_start;
        Ok(WardDirectory::new(point_at(row, col), file.wards))
    }

    pub fn load(path: &Path) -> Result<WardDirectory> {
        let source = fs::read_to_string(path).map_err(|source| RoutingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        WardDirectory::from_toml_str(&source)
    }

    pub fn default_start(&self) -> Point {
        self.default_start
    }

    /// Zone code for a ward name, ignoring letter case and surrounding whitespace.
    pub fn code_of(&self, name: &str) -> Option<u8> {
        self.codes.get(&normalize_name(name)).copied()
    }

    pub fn priority_of(&self, code: u8) -> i32 {
        self.priorities
            .get(&code)
            .copied()
            .unwrap_or(DEFAULT_PRIORITY)
    }

    /// Candidate drop-off points of a ward, in declaration order.
    pub fn locations_of(&self, code: u8) -> &[Point] {
        self.locations
            .get(&code)
            .map(|l| l.as_slice())
            .unwrap_or(&[])
    }

    /// All known ward names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(|k| k.as_str())
    }

    /// Warns about the default start and every candidate location that the agent could never
    /// stand on. Returns the number of such positions.
    pub fn validate(&self, grid: &MazeGrid) -> usize {
        let mut invalid = 0;
        if let Err(e) = grid.check_open(&self.default_start) {
            warn!("Default start is not usable: {e}");
            invalid += 1;
        }
        for (code, locations) in &self.locations {
            for location in locations {
                if let Err(e) = grid.check_open(location) {
                    warn!("Ward {code} drop-off is not usable: {e}");
                    invalid += 1;
                }
            }
        }
        invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WARDS: &str = r#"
default_start = [0, 0]

[[ward]]
code = 2
names = ["Admissions"]
locations = [[0, 3], [2, 0]]

[[ward]]
code = 4
names = ["EMERGENCY", "er"]
priority = 5
locations = [[1, 1]]

[[ward]]
code = 12
names = ["HEMATOLOGY"]
priority = 3
"#;

    #[test]
    fn parses_ward_tables() {
        let directory = WardDirectory::from_toml_str(WARDS).unwrap();
        assert_eq!(directory.default_start(), point_at(0, 0));
        assert_eq!(directory.code_of("admissions"), Some(2));
        assert_eq!(directory.code_of("  Er "), Some(4));
        assert_eq!(directory.code_of("ICU"), None);
        assert_eq!(directory.priority_of(2), DEFAULT_PRIORITY);
        assert_eq!(directory.priority_of(4), 5);
        assert_eq!(directory.priority_of(99), DEFAULT_PRIORITY);
        assert_eq!(
            directory.locations_of(2),
            &[point_at(0, 3), point_at(2, 0)]
        );
        assert!(directory.locations_of(12).is_empty());
        assert_eq!(
            directory.names().collect::<Vec<_>>(),
            vec!["ADMISSIONS", "EMERGENCY", "ER", "HEMATOLOGY"]
        );
    }

    #[test]
    fn rejects_malformed_tables() {
        let result = WardDirectory::from_toml_str("default_start = \"lobby\"");
        assert!(matches!(result, Err(RoutingError::WardTable(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = WardDirectory::load(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(RoutingError::Io { .. })));
    }

    #[test]
    fn validate_counts_unusable_locations() {
        let directory = WardDirectory::from_toml_str(WARDS).unwrap();
        let mut grid = MazeGrid::open(4, 3);
        grid.set_wall(point_at(1, 1), true);
        assert_eq!(directory.validate(&grid), 1);
    }
}
