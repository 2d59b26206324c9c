use std::path::Path;
use ward_pathfinding::request::DeliveryRequest;
use ward_pathfinding::scheduler::{build_destinations, LogObserver};
use ward_pathfinding::wards::WardDirectory;
use ward_pathfinding::{
    point_at, GoalScheduler, GoalState, MazeGrid, Point, RouteObserver, RunSummary, SearchMode,
};
use ward_pathfinding_maps::get_map;

/// Keeps the step count of every delivered path and checks each path is walkable.
#[derive(Default)]
struct PathLog {
    steps: Vec<usize>,
    unreachable: Vec<String>,
}

impl RouteObserver for PathLog {
    fn on_path_found(&mut self, path: &[Point], grid: &MazeGrid) {
        assert!(path.iter().all(|p| !grid.is_wall(p)));
        for (i, p) in path.iter().enumerate() {
            assert_eq!(grid.cell(p).unwrap().g, i as i32);
        }
        self.steps.push(path.len() - 1);
    }

    fn on_goal_unreachable(&mut self, label: &str) {
        self.unreachable.push(label.to_owned());
    }
}

fn hospital() -> (MazeGrid, WardDirectory) {
    let _ = env_logger::builder().is_test(true).try_init();
    let (rows, _) = get_map("hospital");
    let grid = MazeGrid::from_zone_rows(&rows).unwrap();
    let directory = WardDirectory::load(Path::new("maps/hospital_wards.toml")).unwrap();
    (grid, directory)
}

fn request(name: &str) -> DeliveryRequest {
    DeliveryRequest::load(&Path::new("requests").join(name)).unwrap()
}

#[test]
fn ward_locations_are_open_cells() {
    let (grid, directory) = hospital();
    assert_eq!(directory.validate(&grid), 0);
}

#[test]
fn nearest_ward_location_prefers_earlier_entries() {
    let (_, directory) = hospital();
    let wards = ["General".to_owned(), "Surgical".to_owned()];
    // (6, 6) and (7, 5) are twelve steps from the corner, (20, 19) and (21, 18) are 39
    let destinations = build_destinations(&directory, point_at(0, 0), &wards);
    let locations = destinations.iter().map(|d| d.location).collect::<Vec<_>>();
    assert_eq!(locations, vec![point_at(6, 6), point_at(20, 19)]);
}

#[test]
fn priority_route_skips_walled_off_ward() {
    let (mut grid, directory) = hospital();
    for mode in [SearchMode::AStar, SearchMode::Dijkstra] {
        let mut request = request("inputfile1.txt");
        request.mode = mode;
        let mut scheduler = GoalScheduler::from_request(&request, &directory);
        assert_eq!(scheduler.mode(), mode);
        assert_eq!(scheduler.agent_position(), point_at(8, 3));
        let labels = scheduler
            .destinations()
            .iter()
            .map(|d| d.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["ICU", "MATERNITY", "HEMATOLOGY", "ADMISSIONS"]);

        let mut log = PathLog::default();
        let summary = scheduler.run(&mut grid, &mut log).unwrap();
        assert_eq!(
            summary,
            RunSummary::PartialSuccess {
                reached: 3,
                total: 4
            }
        );
        assert_eq!(log.steps, vec![27, 26, 20]);
        assert_eq!(log.unreachable, vec!["HEMATOLOGY".to_owned()]);
        assert_eq!(
            scheduler.states(),
            &[
                GoalState::Reached,
                GoalState::Reached,
                GoalState::Skipped,
                GoalState::Reached
            ]
        );
        assert_eq!(scheduler.agent_position(), point_at(20, 10));
    }
}

#[test]
fn start_ward_and_unknown_names() {
    let (mut grid, directory) = hospital();
    let request = request("inputfile2.txt");
    assert_eq!(request.mode, SearchMode::Dijkstra);
    let mut scheduler = GoalScheduler::from_request(&request, &directory);
    assert_eq!(scheduler.agent_position(), point_at(6, 27));
    assert_eq!(scheduler.destinations().len(), 2);
    let mut log = PathLog::default();
    let summary = scheduler.run(&mut grid, &mut log).unwrap();
    assert_eq!(summary, RunSummary::AllSuccess { reached: 2 });
    assert_eq!(log.steps, vec![19, 19]);
    assert_eq!(scheduler.agent_position(), point_at(13, 10));
}

#[test]
fn starting_on_the_goal_needs_no_moves() {
    let (mut grid, directory) = hospital();
    let mut scheduler = GoalScheduler::from_request(&request("inputfile_ER.txt"), &directory);
    let mut log = PathLog::default();
    let summary = scheduler.run(&mut grid, &mut log).unwrap();
    assert_eq!(summary, RunSummary::AllSuccess { reached: 1 });
    assert_eq!(log.steps, vec![0]);
    assert_eq!(scheduler.agent_position(), point_at(7, 22));
}

#[test]
fn only_blocked_wards_is_total_failure() {
    let (mut grid, directory) = hospital();
    let mut scheduler = GoalScheduler::from_request(&request("inputfile3.txt"), &directory);
    let summary = scheduler.run(&mut grid, &mut LogObserver).unwrap();
    assert_eq!(summary, RunSummary::TotalFailure { total: 1 });
    assert_eq!(scheduler.agent_position(), point_at(8, 3));
}
