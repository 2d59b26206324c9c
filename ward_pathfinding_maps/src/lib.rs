use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use walkdir::WalkDir;

/// A start/goal pair on a map together with its shortest 4-connected step count.
/// A negative distance marks a goal that cannot be reached from the start.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct Scenario {
    pub start_row: i32,
    pub start_col: i32,
    pub goal_row: i32,
    pub goal_col: i32,
    pub distance: i32,
}

impl Scenario {
    pub fn reachable(&self) -> bool {
        self.distance >= 0
    }
}

/// Reads a headerless comma separated matrix of zone codes, one maze row per line.
pub fn load_zone_rows(path: &Path) -> Vec<Vec<u8>> {
    let file = File::open(path).expect("Could not open map file");
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(file);
    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.expect("Could not parse map row");
        let row = record
            .iter()
            .map(|v| v.parse::<u8>().expect("Could not parse zone code"))
            .collect::<Vec<u8>>();
        rows.push(row);
    }
    rows
}

/// Reads a scenario file with a `start_row,start_col,goal_row,goal_col,distance` header.
pub fn load_scenarios(path: &Path) -> Vec<Scenario> {
    let file = File::open(path).expect("Could not open scenario file");
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);
    csv_reader
        .deserialize()
        .map(|result| result.expect("Could not parse scenario record"))
        .collect()
}

/// Names of all maps under `maps/`, without extension.
pub fn get_map_names() -> Vec<String> {
    let root = Path::new("maps/");
    let root = root
        .canonicalize()
        .expect("Failed to canonicalize root path");
    let mut names = Vec::new();
    for entry in WalkDir::new(&root).max_depth(1).into_iter() {
        let entry = entry.expect("Could not get dir entry");
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "csv") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_owned());
            }
        }
    }
    names.sort();
    names
}

/// Loads the zone matrix of a map and its scenarios. Maps without a scenario file
/// yield an empty scenario list.
pub fn get_map(name: &str) -> (Vec<Vec<u8>>, Vec<Scenario>) {
    if !get_map_names().iter().any(|n| n == name) {
        panic!("Could not load map {name}!");
    }
    let rows = load_zone_rows(Path::new(&format!("./maps/{}.csv", name)));
    let scen_path = format!("./maps/{}.scen", name);
    let scenarios = if Path::new(&scen_path).exists() {
        load_scenarios(Path::new(&scen_path))
    } else {
        Vec::new()
    };
    (rows, scenarios)
}
