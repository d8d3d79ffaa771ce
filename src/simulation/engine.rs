//! The tick loop.
//!
//! One tick runs, in order: the strategy's state update over all robots; one move per
//! robot, planning the way to the collection point for robots that just picked up a task;
//! removal of delivered tasks from the active set; and a refresh of the grid overlay.

use std::fmt;
use std::path::Path as FsPath;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::Span;

use super::config::SimConfig;
use super::error::SimError;
use super::report::RunReport;
use crate::grid::{self, GridModel, LoadedMap, MapError, Position};
use crate::pathfinding::search;
use crate::robot::{Robot, RobotState};
use crate::strategy::{CoordinationStrategy, Mode, TickContext};
use crate::task::{TaskBoard, TaskId};
use crate::{generate_id, Id};

/// A running simulation over one loaded map.
///
/// # Lifecycle
///
/// 1. Build with [`Simulation::new`], [`Simulation::from_source`] or [`Simulation::from_file`].
/// 2. Call [`Simulation::step`] until it returns `true`, reading
///    [`Simulation::grid_snapshot`] between ticks to render; or call [`Simulation::run`].
/// 3. Inspect [`Simulation::report`].
pub struct Simulation {
    run_id: Id,
    config: SimConfig,
    grid: GridModel,
    robots: Vec<Robot>,
    tasks: TaskBoard,
    collection_point: Position,
    strategy: Box<dyn CoordinationStrategy>,
    rng: StdRng,
    steps_taken: u64,
    finished: bool,
    unreachable_tasks: Vec<TaskId>,
    span: Span,
}

impl Simulation {
    /// Creates a simulation over `map` with the strategy selected by `config.mode`.
    ///
    /// Tasks and robots that cannot reach the collection point are logged as warnings; such
    /// a run cannot finish and will stop at the tick limit.
    pub fn new(map: LoadedMap, config: SimConfig) -> Self {
        let LoadedMap {
            grid,
            robots,
            tasks,
            collection_point,
        } = map;
        let tasks = TaskBoard::new(tasks);
        let run_id = generate_id();
        let span = tracing::info_span!("simulation", run_id = %run_id, mode = %config.mode);

        let reachable = grid.reachable_from(collection_point);
        let unreachable_tasks: Vec<TaskId> = tasks
            .active()
            .iter()
            .copied()
            .filter(|id| !reachable.contains(&tasks.position(*id)))
            .collect();
        {
            let _enter = span.enter();
            for id in &unreachable_tasks {
                tracing::warn!(
                    task = %id,
                    at = %tasks.position(*id),
                    "Task cannot reach the collection point"
                );
            }
            for robot in robots.iter().filter(|r| !reachable.contains(&r.position())) {
                tracing::warn!(
                    robot = %robot.id(),
                    at = %robot.position(),
                    "Robot cannot reach the collection point"
                );
            }
            tracing::info!(
                robots = robots.len(),
                tasks = tasks.len(),
                collection_point = %collection_point,
                "Simulation created"
            );
        }

        let strategy = config.mode.strategy(&tasks);
        let rng = StdRng::seed_from_u64(config.seed);
        let finished = tasks.is_finished();
        Self {
            run_id,
            config,
            grid,
            robots,
            tasks,
            collection_point,
            strategy,
            rng,
            steps_taken: 0,
            finished,
            unreachable_tasks,
            span,
        }
    }

    /// Parses map-source text and creates a simulation over it.
    pub fn from_source(source: &str, config: SimConfig) -> Result<Self, MapError> {
        Ok(Self::new(grid::parse(source)?, config))
    }

    /// Loads a map file and creates a simulation over it.
    pub fn from_file<P: AsRef<FsPath>>(path: P, config: SimConfig) -> Result<Self, MapError> {
        Ok(Self::new(grid::load(path)?, config))
    }

    /// Advances one tick and returns whether every task has been delivered.
    ///
    /// Once finished, further calls do nothing and keep returning `true`.
    pub fn step(&mut self) -> bool {
        if self.finished {
            return true;
        }
        let span = self.span.clone();
        let _enter = span.enter();
        self.steps_taken += 1;

        let mut ctx = TickContext {
            grid: &self.grid,
            robots: &mut self.robots,
            tasks: &mut self.tasks,
            rng: &mut self.rng,
        };
        self.strategy.update(&mut ctx);

        self.move_robots();

        for task in self.tasks.reconcile() {
            tracing::debug!(task = %task, tick = self.steps_taken, "Task retired");
        }
        self.grid.refresh_overlay(
            self.robots.iter().map(Robot::position),
            self.tasks.open_positions(),
            self.collection_point,
        );

        self.finished = self.tasks.is_finished();
        if self.finished {
            tracing::info!(ticks = self.steps_taken, "All tasks delivered");
        }
        self.finished
    }

    /// Movement phase: every robot takes at most one step, in robot order.
    fn move_robots(&mut self) {
        let collection_point = self.collection_point;
        for robot in self.robots.iter_mut() {
            let delivering = robot.state() == RobotState::Delivering;

            if delivering && !robot.has_route() && robot.position() != collection_point {
                match search(&self.grid, robot.position(), collection_point) {
                    Some(path) => robot.set_route(path),
                    None => {
                        tracing::trace!(robot = %robot.id(), "No route to the collection point");
                    }
                }
            }

            if let Some(next) = robot.next_step() {
                self.strategy.record_step(robot, next);
                let from = robot.position();
                robot.advance();
                tracing::trace!(robot = %robot.id(), from = %from, to = %next, "Moved");
            }

            if delivering && !robot.has_route() && robot.position() == collection_point {
                let next = self.strategy.state_after_delivery(robot);
                if let Some(task) = robot.finish_delivery(next) {
                    self.tasks.deliver(task);
                    tracing::debug!(
                        robot = %robot.id(),
                        task = %task,
                        tick = self.steps_taken,
                        "Task delivered"
                    );
                }
            }
        }
    }

    /// Steps until finished or until the configured tick limit is reached.
    pub fn run(&mut self) -> Result<RunReport, SimError> {
        let span = self.span.clone();
        let _enter = span.enter();
        tracing::info!(tick_limit = ?self.config.tick_limit, "Run started");

        while !self.finished {
            if let Some(limit) = self.config.tick_limit {
                if self.steps_taken >= limit {
                    let remaining = self.tasks.active().len();
                    tracing::warn!(limit, remaining, "Tick limit reached");
                    return Err(SimError::TickLimitReached { limit, remaining });
                }
            }
            self.step();
        }

        let report = self.report();
        tracing::info!(
            ticks = report.steps_taken,
            moves = report.total_moves,
            "Run finished"
        );
        Ok(report)
    }

    /// Summary of the run so far.
    pub fn report(&self) -> RunReport {
        RunReport {
            run_id: self.run_id.clone(),
            mode: self.config.mode,
            steps_taken: self.steps_taken,
            tasks_total: self.tasks.len(),
            tasks_delivered: self.tasks.delivered_count(),
            total_moves: self.robots.iter().map(Robot::cells_travelled).sum(),
            deliveries_per_robot: self.robots.iter().map(Robot::deliveries).collect(),
        }
    }

    /// Read-only view of the grid as of the last completed tick.
    pub fn grid_snapshot(&self) -> &GridModel {
        &self.grid
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn tasks(&self) -> &TaskBoard {
        &self.tasks
    }

    /// Ticks executed so far.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn collection_point(&self) -> Position {
        self.collection_point
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Returns a human-readable name for the active strategy.
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Tasks with no route to the collection point, found at construction.
    pub fn unreachable_tasks(&self) -> &[TaskId] {
        &self.unreachable_tasks
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("run_id", &self.run_id)
            .field("mode", &self.config.mode)
            .field("steps_taken", &self.steps_taken)
            .field("finished", &self.finished)
            .field("robots", &self.robots.len())
            .field("active_tasks", &self.tasks.active().len())
            .finish_non_exhaustive()
    }
}
