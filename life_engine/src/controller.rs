//! Run/pause control and the periodic ticker.
//!
//! While running, a single tokio task advances the engine once per tick
//! interval. The engine sits behind a mutex shared with the front end,
//! which locks it to render. Each ticker owns a run token; a tick only
//! steps while holding the engine lock *and* seeing its token active, and
//! [`SimulationController::pause`] clears the token under that same lock.
//! Once `pause` returns, no further step can happen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::config::SimulationConfig;
use crate::engine::GridEngine;
use crate::error::EngineError;
use crate::grid::Dimensions;

/// Shortest accepted tick interval.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Longest accepted tick interval.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// An engine shared between the ticker and its readers.
pub type SharedEngine = Arc<Mutex<GridEngine>>;

/// Which affordances a front end should offer in the current run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start: bool,
    pub pause: bool,
    pub clear: bool,
    /// Cell toggling and manual stepping.
    pub edit: bool,
}

impl Controls {
    pub const fn for_running(running: bool) -> Self {
        Self {
            start: !running,
            pause: running,
            clear: !running,
            edit: !running,
        }
    }
}

struct Ticker {
    active: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

/// Drives a [`GridEngine`] on a fixed period. Starts paused.
pub struct SimulationController {
    engine: SharedEngine,
    runtime: Handle,
    tick_interval: Duration,
    ticker: Option<Ticker>,
}

impl SimulationController {
    /// Takes ownership of `engine`; tickers are spawned on `runtime`. The
    /// interval is clamped to `MIN_TICK_INTERVAL..=MAX_TICK_INTERVAL`.
    pub fn new(engine: GridEngine, runtime: Handle, tick_interval: Duration) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            runtime,
            tick_interval: tick_interval.clamp(MIN_TICK_INTERVAL, MAX_TICK_INTERVAL),
            ticker: None,
        }
    }

    pub fn from_config(engine: GridEngine, runtime: Handle, config: &SimulationConfig) -> Self {
        Self::new(engine, runtime, config.tick_interval())
    }

    /// Locks the engine for reading. Holding the guard delays the next tick.
    pub fn engine(&self) -> MutexGuard<'_, GridEngine> {
        lock(&self.engine)
    }

    pub fn shared_engine(&self) -> SharedEngine {
        Arc::clone(&self.engine)
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn controls(&self) -> Controls {
        Controls::for_running(self.is_running())
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Changes the period, restarting the ticker if it is running. The new
    /// period is measured from this call.
    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval.clamp(MIN_TICK_INTERVAL, MAX_TICK_INTERVAL);
        if let Some(ticker) = self.ticker.take() {
            self.stop_ticker(ticker);
            self.ticker = Some(self.spawn_ticker());
        }
        debug!(tick_interval_ms = self.tick_interval.as_millis() as u64, "tick interval changed");
    }

    /// Starts ticking; the first step comes one interval from now.
    /// Starting while already running changes nothing.
    pub fn start(&mut self) -> Controls {
        if self.ticker.is_none() {
            self.ticker = Some(self.spawn_ticker());
            info!(tick_interval_ms = self.tick_interval.as_millis() as u64, "simulation started");
        }
        self.controls()
    }

    /// Stops ticking. Idempotent.
    pub fn pause(&mut self) -> Controls {
        if let Some(ticker) = self.ticker.take() {
            self.stop_ticker(ticker);
            info!(generation = self.engine().generation(), "simulation paused");
        }
        self.controls()
    }

    /// Start if paused, pause if running.
    pub fn toggle_running(&mut self) -> Controls {
        if self.is_running() { self.pause() } else { self.start() }
    }

    /// Advances one generation by hand and returns the new generation number.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SimulationRunning`] while the ticker owns
    /// stepping.
    pub fn step(&mut self) -> Result<u64, EngineError> {
        self.ensure_paused()?;
        let mut engine = self.engine();
        engine.step();
        Ok(engine.generation())
    }

    /// Flips a cell and returns its new state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SimulationRunning`] while running, or
    /// [`EngineError::CellOutOfBounds`] for an off-grid cell.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<bool, EngineError> {
        self.ensure_paused()?;
        self.engine().toggle(x, y)
    }

    /// Kills every cell.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SimulationRunning`] while running.
    pub fn clear(&mut self) -> Result<(), EngineError> {
        self.ensure_paused()?;
        self.engine().clear();
        Ok(())
    }

    /// Resizes from text input. A valid request pauses a running
    /// simulation first; an invalid one changes nothing at all.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimensions`] for a rejected size.
    pub fn resize(&mut self, width: &str, height: &str) -> Result<Dimensions, EngineError> {
        let dims = self.engine().limits().parse(width, height)?;
        self.pause();
        self.engine().resize_to(dims)?;
        info!(%dims, "grid resized");
        Ok(dims)
    }

    fn ensure_paused(&self) -> Result<(), EngineError> {
        if self.is_running() {
            return Err(EngineError::SimulationRunning);
        }
        Ok(())
    }

    fn spawn_ticker(&self) -> Ticker {
        let active = Arc::new(AtomicBool::new(true));
        let first = Instant::now() + self.tick_interval;
        let task = self.runtime.spawn(run_ticker(
            Arc::clone(&self.engine),
            Arc::clone(&active),
            first,
            self.tick_interval,
        ));
        Ticker { active, task }
    }

    fn stop_ticker(&self, ticker: Ticker) {
        {
            let _engine = self.engine();
            ticker.active.store(false, Ordering::Release);
        }
        ticker.task.abort();
    }
}

impl Drop for SimulationController {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            self.stop_ticker(ticker);
        }
    }
}

async fn run_ticker(shared: SharedEngine, active: Arc<AtomicBool>, first: Instant, period: Duration) {
    let mut interval = time::interval_at(first, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        let mut engine = lock(&shared);
        if !active.load(Ordering::Acquire) {
            break;
        }
        engine.step();
        trace!(generation = engine.generation(), "tick");
    }
}

// The engine is never left half-updated, so a poisoned lock is still usable.
fn lock(engine: &Mutex<GridEngine>) -> MutexGuard<'_, GridEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}
