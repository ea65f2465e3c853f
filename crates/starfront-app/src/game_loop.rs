//! Game loop thread: fixed-rate updates with bounded catch-up and a render
//! interpolation fraction.
//!
//! The engine is moved into the thread and owned there. Commands arrive via
//! `mpsc` channel. Snapshots and the interpolation fraction are published
//! through `SharedState` for the render side to poll.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use thiserror::Error;

use starfront_core::constants::{MAX_UPDATES_BEFORE_RENDER, RENDER_RATE, TICK_RATE};
use starfront_sim::SimulationEngine;

use crate::state::{CommandSender, LoopCommand, SharedState};

/// Time between fixed updates.
pub const UPDATE_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Target time between rendered frames.
pub const RENDER_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / RENDER_RATE as u64);

/// Sleep granularity while idling or paused.
const IDLE_SLEEP: Duration = Duration::from_millis(1);

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Work for one pass of the outer loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlan {
    /// Updates to run now.
    pub updates: u32,
    /// Progress toward the next update after running them, in [0, 1].
    pub interpolation: f64,
}

/// Decides how many fixed updates are due and how far the renderer should
/// blend toward the next one. Takes the current time as an argument so it
/// can be driven by synthetic instants.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    last_update: Instant,
    last_render: Instant,
    update_interval: Duration,
    render_interval: Duration,
    max_updates: u32,
}

impl FixedStepClock {
    pub fn new(now: Instant) -> Self {
        Self::with_intervals(now, UPDATE_INTERVAL, RENDER_INTERVAL, MAX_UPDATES_BEFORE_RENDER)
    }

    pub fn with_intervals(
        now: Instant,
        update_interval: Duration,
        render_interval: Duration,
        max_updates: u32,
    ) -> Self {
        Self {
            last_update: now,
            last_render: now,
            update_interval,
            render_interval,
            max_updates,
        }
    }

    /// Plan the updates due at `now` and mark a render at `now`.
    ///
    /// At most `max_updates` run per call. Any backlog beyond one interval
    /// left after that is dropped rather than carried forward.
    pub fn plan(&mut self, now: Instant) -> FramePlan {
        let mut updates = 0;
        while self.since_update(now) > self.update_interval && updates < self.max_updates {
            self.last_update += self.update_interval;
            updates += 1;
        }

        if self.since_update(now) > self.update_interval {
            if let Some(clamped) = now.checked_sub(self.update_interval) {
                self.last_update = clamped;
            }
        }

        let progress = self.since_update(now).as_secs_f64() / self.update_interval.as_secs_f64();
        self.last_render = now;
        FramePlan {
            updates,
            interpolation: progress.min(1.0),
        }
    }

    /// True while neither a render nor an update is due yet.
    pub fn should_idle(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_render) < self.render_interval
            && self.since_update(now) < self.update_interval
    }

    fn since_update(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_update)
    }
}

/// Per-second loop statistics, logged at info level.
#[derive(Debug)]
struct LoopStats {
    window_start: Instant,
    updates: u32,
    frames: u32,
}

impl LoopStats {
    fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            updates: 0,
            frames: 0,
        }
    }

    fn record(&mut self, now: Instant, updates: u32, engine: &SimulationEngine) {
        self.updates += updates;
        self.frames += 1;
        if now.saturating_duration_since(self.window_start) >= Duration::from_secs(1) {
            log::info!(
                "{} updates, {} frames, {} entities, {} collision checks",
                self.updates,
                self.frames,
                engine.registry().len(),
                engine.collisions_checked()
            );
            *self = Self::new(now);
        }
    }
}

/// Move `engine` onto a new logic thread and start the loop.
///
/// Returns the command sender and the thread handle. The thread exits on
/// `LoopCommand::Shutdown` or when every sender has been dropped.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    shared: SharedState,
) -> Result<(CommandSender, JoinHandle<()>), LoopError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    shared.set_running(true);
    let thread_state = shared.clone();
    let spawned = std::thread::Builder::new()
        .name("starfront-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &thread_state);
            thread_state.set_running(false);
        });

    match spawned {
        Ok(handle) => Ok((cmd_tx, handle)),
        Err(err) => {
            shared.set_running(false);
            Err(err.into())
        }
    }
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    shared: &SharedState,
) {
    log::info!("Game loop started at {TICK_RATE} Hz");
    let start = Instant::now();
    let mut clock = FixedStepClock::new(start);
    let mut stats = LoopStats::new(start);

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::SpawnHostiles { count }) => {
                    let spawned = engine.spawn_hostiles(count);
                    log::info!("Spawned {} hostiles", spawned.len());
                }
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    log::info!("Game loop stopped at tick {}", engine.time().tick);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Pause is sampled once per pass
        if shared.input().pause {
            std::thread::sleep(IDLE_SLEEP);
            continue;
        }

        // 3. Catch-up updates, each sampling fresh input
        let now = Instant::now();
        let plan = clock.plan(now);
        for _ in 0..plan.updates {
            let input = shared.input();
            let snapshot = engine.tick(&input);
            shared.publish_snapshot(snapshot);
        }

        // 4. Publish the blend fraction for the renderer
        shared.publish_interpolation(plan.interpolation);
        stats.record(now, plan.updates, &engine);

        // 5. Idle until a render or update is due
        while clock.should_idle(Instant::now()) {
            std::thread::yield_now();
            std::thread::sleep(IDLE_SLEEP);
        }
    }
}
