use std::env;
use std::path::{Path, PathBuf};
use ward_pathfinding::request::{request_file_name, DeliveryRequest};
use ward_pathfinding::wards::WardDirectory;
use ward_pathfinding::{GoalScheduler, MazeGrid, Point, RouteObserver, RunSummary};
use ward_pathfinding_maps::get_map;

// Routes the deliveries of a request file over the hospital map and prints every path.
//
//     cargo run --example route_deliveries -- 1
//     cargo run --example route_deliveries -- er
//     cargo run --example route_deliveries -- requests/inputfile2.txt
//
// Set RUST_LOG=debug to see per-search statistics.

const PATH_MARKS: [char; 6] = ['*', '+', 'o', '~', '%', '='];

/// Draws the maze as text after every delivery, marking the walked path and the agent.
struct TextRenderer {
    trips: usize,
    agent: Option<Point>,
}

impl TextRenderer {
    fn draw(&self, grid: &MazeGrid, path: &[Point], mark: char) {
        for y in 0..grid.height() as i32 {
            let line = (0..grid.width() as i32)
                .map(|x| {
                    let p = Point::new(x, y);
                    if Some(p) == self.agent {
                        'A'
                    } else if path.contains(&p) {
                        mark
                    } else if grid.is_wall(&p) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            println!("{line}");
        }
    }
}

impl RouteObserver for TextRenderer {
    fn on_goal_started(&mut self, label: &str, location: Point) {
        println!("\n>> {label} at ({}, {})", location.y, location.x);
    }

    fn on_path_found(&mut self, path: &[Point], grid: &MazeGrid) {
        let mark = PATH_MARKS[self.trips % PATH_MARKS.len()];
        self.trips += 1;
        let steps = path
            .iter()
            .filter_map(|p| grid.cell(p).map(|c| format!("({},{}) g={} h={}", p.y, p.x, c.g, c.h)))
            .collect::<Vec<_>>();
        println!("{}", steps.join(" -> "));
        self.draw(grid, path, mark);
    }

    fn on_goal_unreachable(&mut self, label: &str) {
        println!("{label} cannot be reached, skipped");
    }

    fn on_agent_moved(&mut self, position: Point) {
        self.agent = Some(position);
    }

    fn on_schedule_finished(&mut self, summary: &RunSummary) {
        println!("\n{}", "#".repeat(50));
        println!("#### PROGRAM TERMINATION: {summary}");
        println!("{}", "#".repeat(50));
    }
}

fn request_path(arg: &str) -> PathBuf {
    let path = Path::new(arg);
    if path.exists() {
        path.to_path_buf()
    } else {
        Path::new("requests").join(request_file_name(arg))
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arg = env::args().nth(1).unwrap_or_else(|| "1".to_owned());
    let request = match DeliveryRequest::load(&request_path(&arg)) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let directory = WardDirectory::load(Path::new("maps/hospital_wards.toml"))
        .expect("Could not load the ward directory");
    let (rows, _) = get_map("hospital");
    let mut grid = MazeGrid::from_zone_rows(&rows).expect("Invalid hospital map");
    directory.validate(&grid);

    let mut scheduler = GoalScheduler::from_request(&request, &directory);
    let mut renderer = TextRenderer {
        trips: 0,
        agent: Some(scheduler.agent_position()),
    };
    if let Err(e) = scheduler.run(&mut grid, &mut renderer) {
        eprintln!("Routing aborted: {e}");
        std::process::exit(1);
    }
}
