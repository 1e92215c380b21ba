//! Busy indicator controller.
//!
//! `BusyIndicator` owns the single background presentation that tells the
//! user a turn is in progress. Each active indicator is a dedicated thread
//! (the presentation loop) that acquires an `IndicatorFrame` from the
//! surface, ticks it until told to stop, and releases it before exiting.
//!
//! Stopping is a handshake: signal the loop, then join it. Because the loop
//! releases its frame before the thread ends, a returned `hide()` or `show()`
//! means the previous frame no longer owns the terminal.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

/// Interval between frame ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Something that can present a busy indicator (a terminal spinner in the
/// binary, a recorder in tests).
pub trait IndicatorSurface: Send + Sync + 'static {
    /// Take exclusive output rights and start presenting `label`.
    ///
    /// Called on the presentation loop's thread.
    fn acquire(&self, label: &str) -> Box<dyn IndicatorFrame>;
}

/// One acquired presentation. Dropping without `release` is allowed but
/// leaves cleanup to the implementation's `Drop`.
pub trait IndicatorFrame: Send {
    /// Advance the animation by one step.
    fn tick(&mut self);

    /// Clear the presentation and give up output rights.
    fn release(self: Box<Self>);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorState {
    Idle,
    Active(String),
}

struct ActiveLoop {
    label: String,
    stop: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl ActiveLoop {
    /// Signal the loop and wait until it has released its frame.
    ///
    /// Bounded even if the loop already exited: the send fails and the join
    /// returns immediately.
    fn stop(self) {
        let _ = self.stop.send(());
        if self.handle.join().is_err() {
            warn!(label = %self.label, "busy indicator loop panicked");
        }
        debug!(label = %self.label, "busy indicator stopped");
    }
}

/// Controller for the single busy indicator.
///
/// `show` and `hide` may be called from any thread. The internal slot lock
/// is held across the whole stop-then-start sequence, so no two loops are
/// ever alive at once.
///
/// Both calls block the calling thread, including an async worker, until the
/// previous loop has released its frame. The loop wakes on the stop signal
/// rather than at its next tick, so the wait is one frame release plus a
/// thread join.
pub struct BusyIndicator {
    surface: Arc<dyn IndicatorSurface>,
    active: Mutex<Option<ActiveLoop>>,
    tick_interval: Duration,
}

impl BusyIndicator {
    pub fn new(surface: Arc<dyn IndicatorSurface>) -> Self {
        Self {
            surface,
            active: Mutex::new(None),
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Show `label`, replacing any indicator that is currently active.
    pub fn show(&self, label: impl Into<String>) {
        let label = label.into();
        let mut slot = self.slot();
        if let Some(current) = slot.take() {
            current.stop();
        }

        let (stop_tx, stop_rx) = mpsc::channel();
        let surface = Arc::clone(&self.surface);
        let interval = self.tick_interval;
        let loop_label = label.clone();
        let spawned = thread::Builder::new()
            .name("busy-indicator".to_string())
            .spawn(move || present(surface.as_ref(), &loop_label, &stop_rx, interval));

        match spawned {
            Ok(handle) => {
                debug!(label = %label, "busy indicator started");
                *slot = Some(ActiveLoop {
                    label,
                    stop: stop_tx,
                    handle,
                });
            }
            Err(e) => warn!(error = %e, "failed to start busy indicator"),
        }
    }

    /// Stop the active indicator, if any. A no-op when idle.
    pub fn hide(&self) {
        let mut slot = self.slot();
        if let Some(current) = slot.take() {
            current.stop();
        }
    }

    pub fn state(&self) -> IndicatorState {
        match self.slot().as_ref() {
            Some(active) => IndicatorState::Active(active.label.clone()),
            None => IndicatorState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.slot().is_some()
    }

    fn slot(&self) -> MutexGuard<'_, Option<ActiveLoop>> {
        self.active.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for BusyIndicator {
    fn drop(&mut self) {
        self.hide();
    }
}

impl std::fmt::Debug for BusyIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyIndicator")
            .field("state", &self.state())
            .field("tick_interval", &self.tick_interval)
            .finish()
    }
}

/// Body of the presentation loop thread.
fn present(
    surface: &dyn IndicatorSurface,
    label: &str,
    stop: &mpsc::Receiver<()>,
    interval: Duration,
) {
    let mut frame = surface.acquire(label);
    loop {
        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => frame.tick(),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    frame.release();
}
