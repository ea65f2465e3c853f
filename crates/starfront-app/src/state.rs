//! State shared between the game loop thread and the render/input side.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};

use starfront_core::input::InputState;
use starfront_core::state::ArenaSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopCommand {
    /// Add hostile ships to the running match.
    SpawnHostiles { count: usize },
    /// Stop the game loop thread.
    Shutdown,
}

/// Handles to the state the loop thread publishes and the input it samples.
///
/// Every field is replaced as a whole value under its lock, so a reader sees
/// either the previous tick or the next one, never a mix.
#[derive(Clone, Default)]
pub struct SharedState {
    /// Snapshot after the most recent update. `None` until the first update.
    pub latest_snapshot: Arc<Mutex<Option<ArenaSnapshot>>>,
    /// Progress toward the next update, in [0, 1].
    pub interpolation: Arc<Mutex<f64>>,
    /// Latest device state, written by the input side.
    pub input: Arc<Mutex<InputState>>,
    /// Whether the loop thread is running.
    pub running: Arc<Mutex<bool>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&self, input: InputState) {
        *self.input.lock().unwrap_or_else(PoisonError::into_inner) = input;
    }

    /// Copy of the current input.
    pub fn input(&self) -> InputState {
        *self.input.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Option<ArenaSnapshot> {
        self.latest_snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn interpolation(&self) -> f64 {
        *self.interpolation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_running(&self) -> bool {
        *self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn publish_snapshot(&self, snapshot: ArenaSnapshot) {
        if let Ok(mut lock) = self.latest_snapshot.lock() {
            *lock = Some(snapshot);
        }
    }

    pub(crate) fn publish_interpolation(&self, alpha: f64) {
        if let Ok(mut lock) = self.interpolation.lock() {
            *lock = alpha;
        }
    }

    pub(crate) fn set_running(&self, running: bool) {
        *self.running.lock().unwrap_or_else(PoisonError::into_inner) = running;
    }
}

/// Sending half of the loop's command channel.
pub type CommandSender = mpsc::Sender<LoopCommand>;
