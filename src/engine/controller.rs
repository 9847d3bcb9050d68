use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use log::{debug, info};

use crate::engine::constants::GROUPS_PER_HEARTBEAT;
use crate::engine::expand::evolve_group;
use crate::engine::frontier::Frontier;
use crate::engine::group::Group;
use crate::engine::pool::SolutionPool;
use crate::engine::settings::Settings;
use crate::engine::snapshot::Snapshot;

/// Result of one scheduling batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// More work remains; call again.
    Continue,
    /// The yield window elapsed; the host should re-enter promptly after
    /// attending to its own loop. No logical state changed.
    Yielded,
    /// The duration budget was exceeded; the run self-paused and is fully
    /// resumable.
    Paused,
    /// The frontier is exhausted. Terminal for this run.
    Done,
}

/// Drives one run of the search: dequeues groups, expands them, updates the
/// solution pool, and time-slices the work against the heartbeat, yield and
/// duration windows.
///
/// The controller is a step function: the host calls [`step_batch`] until
/// it returns [`StepOutcome::Done`], honoring pauses in between. The
/// frontier and pool survive pause/resume untouched, so an interrupted run
/// finds exactly the solutions an unbroken one would.
///
/// [`step_batch`]: RunController::step_batch
#[derive(Debug)]
pub struct RunController {
    settings: Settings,
    run_id: u64,
    frontier: Frontier,
    pool: SolutionPool,
    processed_total: u64,
    // accumulated processing time, excluding paused intervals
    processing_time: Duration,
    current_start: Option<Instant>,
    next_heartbeat: u64,
    next_yield: u64,
    snapshot_due: bool,
}

impl RunController {
    pub fn new(settings: Settings) -> Self {
        let run_id = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64);
        let mut frontier = Frontier::new(&settings);
        frontier.offer(Group::of_digits(&settings.digits));
        info!(
            "Run {}: searching {} digits with {} operators",
            run_id,
            settings.digits.len(),
            settings.unary_operators.len() + settings.binary_operators.len()
        );
        Self {
            settings,
            run_id,
            frontier,
            pool: SolutionPool::new(),
            processed_total: 0,
            processing_time: Duration::ZERO,
            current_start: None,
            next_heartbeat: 1,
            next_yield: 1,
            snapshot_due: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn pool(&self) -> &SolutionPool {
        &self.pool
    }

    /// Process up to one heartbeat's worth of groups, then check the
    /// timing windows.
    pub fn step_batch(&mut self) -> StepOutcome {
        self.start_processing();
        for _ in 0..GROUPS_PER_HEARTBEAT {
            let Some(group) = self.frontier.next() else {
                self.stop_processing();
                info!("Run {}: frontier exhausted", self.run_id);
                return StepOutcome::Done;
            };
            self.process_group(&group);
        }
        self.heartbeat()
    }

    /// Suspend processing-time accounting. The frontier and pool are left
    /// untouched, so the run resumes exactly where it left off.
    pub fn pause(&mut self) {
        self.stop_processing();
        // a heartbeat that fired in the final batch must not surface as a
        // stale snapshot after resuming
        self.snapshot_due = false;
    }

    pub fn resume(&mut self) {
        self.start_processing();
    }

    /// True once per due heartbeat: the host should emit a progress
    /// snapshot.
    pub fn take_snapshot_due(&mut self) -> bool {
        std::mem::take(&mut self.snapshot_due)
    }

    pub fn snapshot(&self, include_formulas: bool) -> Snapshot {
        Snapshot {
            run_id: self.run_id,
            queue_size: self.frontier.queue_size(),
            cache_size: self.frontier.cache_size(),
            processing_time_ms: self.processing_time_ms(),
            queued_total: self.frontier.queued_total(),
            cache_hit_total: self.frontier.cache_hit_total(),
            processed_total: self.processed_total,
            solution_count: self.pool.len(),
            solutions: self.pool.solutions(),
            formula_map: include_formulas.then(|| self.pool.formula_map()),
        }
    }

    /// Cumulative processing time in milliseconds, excluding paused
    /// intervals.
    pub fn processing_time_ms(&self) -> u64 {
        let current = self
            .current_start
            .map_or(Duration::ZERO, |start| start.elapsed());
        (self.processing_time + current).as_millis() as u64
    }

    fn process_group(&mut self, group: &Group) {
        // a fully-combined group is a solution; with partial-digit
        // solutions allowed, every member of every group is
        if group.formulas.len() == 1 || !self.settings.use_all_digits {
            for formula in &group.formulas {
                self.pool.offer(formula, &self.settings);
            }
        }
        for child in evolve_group(group, &self.settings) {
            self.frontier.offer(child);
        }
        self.processed_total += 1;
    }

    fn start_processing(&mut self) {
        if self.current_start.is_none() {
            self.current_start = Some(Instant::now());
            self.next_heartbeat = 1;
            self.next_yield = 1;
        }
    }

    fn stop_processing(&mut self) {
        if let Some(start) = self.current_start.take() {
            self.processing_time += start.elapsed();
        }
    }

    // Check the heartbeat, duration-budget and yield windows against the
    // start of the current running stretch.
    fn heartbeat(&mut self) -> StepOutcome {
        let Some(start) = self.current_start else {
            return StepOutcome::Continue;
        };
        let elapsed = start.elapsed().as_millis() as u64;

        if elapsed >= self.settings.heartbeat_ms * self.next_heartbeat {
            self.snapshot_due = true;
            self.next_heartbeat = elapsed / self.settings.heartbeat_ms + 1;
            // after enough heartbeats, a projected overrun of the duration
            // budget pauses the run rather than letting it grow unbounded
            if self.settings.min_heartbeats < self.next_heartbeat
                && self.next_heartbeat * self.settings.heartbeat_ms > self.settings.max_duration_ms
            {
                info!(
                    "Run {}: duration budget reached after {} ms",
                    self.run_id, elapsed
                );
                self.pause();
                return StepOutcome::Paused;
            }
        }
        if elapsed >= self.settings.yield_ms * self.next_yield {
            self.next_yield = elapsed / self.settings.yield_ms + 1;
            debug!("Run {}: yielding at {} ms", self.run_id, elapsed);
            return StepOutcome::Yielded;
        }
        StepOutcome::Continue
    }
}
