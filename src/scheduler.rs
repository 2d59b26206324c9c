use core::fmt;
use grid_util::point::Point;
use log::{debug, info, warn};
use std::cmp::Reverse;

use crate::error::Result;
use crate::manhattan;
use crate::maze_grid::MazeGrid;
use crate::request::DeliveryRequest;
use crate::solver::{search, PathResult, SearchMode};
use crate::wards::{normalize_name, WardDirectory};

/// A delivery target: one drop-off location of a ward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    pub location: Point,
    pub priority: i32,
    pub label: String,
}

impl Destination {
    pub fn new(label: &str, location: Point, priority: i32) -> Destination {
        Destination {
            location,
            priority,
            label: label.to_owned(),
        }
    }
}

/// Progress of a single destination. [GoalState::Reached] and [GoalState::Skipped] are final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalState {
    Pending,
    Routing,
    Reached,
    Skipped,
}

/// Overall outcome of a schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunSummary {
    AllSuccess { reached: usize },
    PartialSuccess { reached: usize, total: usize },
    TotalFailure { total: usize },
    NoGoals,
}

impl RunSummary {
    pub fn classify(reached: usize, total: usize) -> RunSummary {
        if total == 0 {
            RunSummary::NoGoals
        } else if reached == total {
            RunSummary::AllSuccess { reached }
        } else if reached == 0 {
            RunSummary::TotalFailure { total }
        } else {
            RunSummary::PartialSuccess { reached, total }
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunSummary::AllSuccess { reached } => write!(
                f,
                "SUCCESS (All Tasks Completed): all {reached} delivery requests were successfully completed"
            ),
            RunSummary::PartialSuccess { reached, total } => write!(
                f,
                "SUCCESS (Partial Completion): {reached} out of {total} requests were successfully completed"
            ),
            RunSummary::TotalFailure { total } => write!(
                f,
                "FAILURE (Blocked Paths): all {total} delivery paths were blocked, please check the maze input"
            ),
            RunSummary::NoGoals => write!(
                f,
                "No Goals Defined: no delivery requests were found in the input"
            ),
        }
    }
}

/// Receives the events of a schedule, typically to draw or animate them. Every method defaults
/// to doing nothing.
pub trait RouteObserver {
    /// Called before searching for a destination.
    fn on_goal_started(&mut self, _label: &str, _location: Point) {}

    /// Called with the start to goal path of a reached destination. The cost state of `grid`
    /// still belongs to that search.
    fn on_path_found(&mut self, _path: &[Point], _grid: &MazeGrid) {}

    fn on_goal_unreachable(&mut self, _label: &str) {}

    /// Called after the agent has been moved onto a reached destination.
    fn on_agent_moved(&mut self, _position: Point) {}

    fn on_schedule_finished(&mut self, _summary: &RunSummary) {}
}

impl RouteObserver for () {}

/// Logs every event.
pub struct LogObserver;

impl RouteObserver for LogObserver {
    fn on_goal_started(&mut self, label: &str, location: Point) {
        info!("Goal {label} started at ({}, {})", location.y, location.x);
    }

    fn on_path_found(&mut self, path: &[Point], _grid: &MazeGrid) {
        info!("Path found with {} steps", path.len().saturating_sub(1));
    }

    fn on_goal_unreachable(&mut self, label: &str) {
        info!("Goal {label} unreachable");
    }

    fn on_agent_moved(&mut self, position: Point) {
        info!("Agent moved to ({}, {})", position.y, position.x);
    }

    fn on_schedule_finished(&mut self, summary: &RunSummary) {
        info!("Schedule finished: {summary}");
    }
}

/// Visits destinations one at a time in descending priority, moving the agent onto every
/// destination it reaches. Unreachable destinations are skipped and leave the agent in place.
#[derive(Clone, Debug)]
pub struct GoalScheduler {
    mode: SearchMode,
    agent: Point,
    destinations: Vec<Destination>,
    states: Vec<GoalState>,
    next: usize,
}

impl GoalScheduler {
    /// Orders `destinations` by descending priority, keeping the given order among equal
    /// priorities.
    pub fn new(
        start: Point,
        mut destinations: Vec<Destination>,
        mode: SearchMode,
    ) -> GoalScheduler {
        destinations.sort_by_key(|d| Reverse(d.priority));
        let states = vec![GoalState::Pending; destinations.len()];
        GoalScheduler {
            mode,
            agent: start,
            destinations,
            states,
            next: 0,
        }
    }

    /// Resolves the start and the ward names of `request` against `directory`. Unknown names and
    /// wards without locations are logged and left out.
    pub fn from_request(request: &DeliveryRequest, directory: &WardDirectory) -> GoalScheduler {
        let start = resolve_start(directory, &request.start_wards);
        let destinations = build_destinations(directory, start, &request.wards);
        GoalScheduler::new(start, destinations, request.mode)
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn agent_position(&self) -> Point {
        self.agent
    }

    /// Destinations in visiting order.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// States of the destinations, indexed like [destinations](Self::destinations).
    pub fn states(&self) -> &[GoalState] {
        &self.states
    }

    pub fn reached(&self) -> usize {
        self.count(GoalState::Reached)
    }

    pub fn skipped(&self) -> usize {
        self.count(GoalState::Skipped)
    }

    fn count(&self, state: GoalState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.destinations.len()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::classify(self.reached(), self.destinations.len())
    }

    /// Routes the next pending destination and returns its final state, or [None] once all
    /// destinations are done. An error means the agent or the destination is not an open cell;
    /// the destination stays [GoalState::Routing] and the schedule should be abandoned.
    pub fn step<O: RouteObserver>(
        &mut self,
        grid: &mut MazeGrid,
        observer: &mut O,
    ) -> Result<Option<GoalState>> {
        if self.is_finished() {
            return Ok(None);
        }
        let index = self.next;
        let Destination {
            location,
            priority,
            ref label,
        } = self.destinations[index];
        self.states[index] = GoalState::Routing;
        info!(
            "Routing to {} at ({}, {}) with priority {} (Goal {})",
            label,
            location.y,
            location.x,
            priority,
            index + 1
        );
        observer.on_goal_started(label, location);

        let (result, stats) = search(grid, self.agent, location, self.mode)?;
        debug!("{} search for {}: {:?}", self.mode, label, stats);
        let state = match result {
            PathResult::Found { path, .. } => {
                observer.on_path_found(&path, grid);
                self.agent = location;
                observer.on_agent_moved(location);
                GoalState::Reached
            }
            PathResult::Unreachable => {
                warn!(
                    "Unable to reach {} (Goal {}) at ({}, {}) with priority {}. Goal skipped.",
                    label,
                    index + 1,
                    location.y,
                    location.x,
                    priority
                );
                debug!(
                    "Agent component {} differs from goal component {}",
                    grid.get_component(&self.agent),
                    grid.get_component(&location)
                );
                observer.on_goal_unreachable(label);
                GoalState::Skipped
            }
        };
        self.states[index] = state;
        self.next += 1;
        Ok(Some(state))
    }

    /// Routes every remaining destination and reports the outcome.
    pub fn run<O: RouteObserver>(
        &mut self,
        grid: &mut MazeGrid,
        observer: &mut O,
    ) -> Result<RunSummary> {
        while self.step(grid, observer)?.is_some() {}
        let summary = self.summary();
        info!("Program termination: {summary}");
        observer.on_schedule_finished(&summary);
        Ok(summary)
    }
}

/// The start position selected by `start_wards`: the first location of the last ward that can be
/// resolved, or the directory's default start.
pub fn resolve_start(directory: &WardDirectory, start_wards: &[String]) -> Point {
    let mut start = directory.default_start();
    for name in start_wards {
        let name = normalize_name(name);
        let Some(code) = directory.code_of(&name) else {
            warn!(
                "Unknown start ward name '{}', using start ({}, {})",
                name, start.y, start.x
            );
            continue;
        };
        match directory.locations_of(code).first() {
            Some(&location) => {
                start = location;
                info!(
                    "Start location set to ward '{}' at ({}, {})",
                    name, start.y, start.x
                );
            }
            None => warn!(
                "No locations mapped for start ward '{}', using start ({}, {})",
                name, start.y, start.x
            ),
        }
    }
    start
}

/// One destination per known ward name, at the ward location closest to `start` by Manhattan
/// distance. Earlier locations win ties. The result is in request order.
pub fn build_destinations(
    directory: &WardDirectory,
    start: Point,
    wards: &[String],
) -> Vec<Destination> {
    let mut destinations = Vec::new();
    for name in wards {
        let label = normalize_name(name);
        let Some(code) = directory.code_of(&label) else {
            warn!("Unknown ward name '{}', skipping", name.trim());
            continue;
        };
        let Some(&location) = directory
            .locations_of(code)
            .iter()
            .min_by_key(|p| manhattan(p, &start))
        else {
            warn!("No locations mapped for ward '{label}', skipping");
            continue;
        };
        destinations.push(Destination::new(&label, location, directory.priority_of(code)));
    }
    destinations
}
