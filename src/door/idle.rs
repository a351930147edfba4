//! Idle timer.
//!
//! [`IdleWatchdog::arm`] spawns a tokio task that sleeps for the idle threshold and then
//! sends one [`Termination::IdleTimeout`] to the session supervisor. The returned
//! [`IdleTimer`] handle cancels it. Fire and disarm race on a shared atomic state:
//! whichever leaves `ARMED` first wins, so a timer either fires exactly once or never.
//!
//! ```text
//! Unarmed --arm--> Armed --disarm--> Disarmed
//!                    |
//!                    +--threshold--> Fired (session ends)
//! ```
use log::{debug, trace};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use crate::metrics::SessionMetrics;

const ARMED: u8 = 0;
const DISARMED: u8 = 1;
const FIRED: u8 = 2;

/// Requests to end the session, raised by background tasks and acted on by the
/// supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    IdleTimeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Armed,
    Disarmed,
    Fired,
}

/// Factory for idle timers sharing one threshold and one termination channel.
#[derive(Debug, Clone)]
pub struct IdleWatchdog {
    threshold: Duration,
    terminations: mpsc::UnboundedSender<Termination>,
    metrics: Arc<SessionMetrics>,
}

impl IdleWatchdog {
    pub fn new(
        threshold: Duration,
        terminations: mpsc::UnboundedSender<Termination>,
        metrics: Arc<SessionMetrics>,
    ) -> Self {
        Self {
            threshold,
            terminations,
            metrics,
        }
    }

    /// Start a fresh timer. Must be called from within a tokio runtime.
    pub fn arm(&self) -> IdleTimer {
        let state = Arc::new(AtomicU8::new(ARMED));
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let deadline = Instant::now() + self.threshold;
        self.metrics.record_arm();
        trace!("idle timer armed for {:?}", self.threshold);

        let task_state = Arc::clone(&state);
        let metrics = Arc::clone(&self.metrics);
        let terminations = self.terminations.clone();
        let threshold = self.threshold;
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => {
                    if task_state
                        .compare_exchange(ARMED, FIRED, Ordering::SeqCst, Ordering::SeqCst)
                        .is_ok()
                    {
                        metrics.record_fire();
                        debug!("idle timer fired after {:?}", threshold);
                        let _ = terminations.send(Termination::IdleTimeout);
                    }
                }
                _ = cancel_rx => {}
            }
        });

        IdleTimer {
            state,
            cancel: Some(cancel_tx),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Handle to one armed idle timer. Dropping it disarms the timer.
#[derive(Debug)]
pub struct IdleTimer {
    state: Arc<AtomicU8>,
    cancel: Option<oneshot::Sender<()>>,
    metrics: Arc<SessionMetrics>,
}

impl IdleTimer {
    /// Cancel the timer and report how it ended. Safe to call any number of times;
    /// a timer that already fired stays `Fired`.
    pub fn disarm(&mut self) -> TimerState {
        if self
            .state
            .compare_exchange(ARMED, DISARMED, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            self.metrics.record_disarm();
            trace!("idle timer disarmed");
        }
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
        self.state()
    }

    pub fn state(&self) -> TimerState {
        match self.state.load(Ordering::SeqCst) {
            ARMED => TimerState::Armed,
            FIRED => TimerState::Fired,
            _ => TimerState::Disarmed,
        }
    }
}

impl Drop for IdleTimer {
    fn drop(&mut self) {
        let _ = self.disarm();
    }
}
