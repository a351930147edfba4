//! # Menu Dispatcher
//!
//! Single-task state machine driving the interactive part of the session:
//!
//! ```text
//! Rendering --> AwaitingKey --> Dispatching --+--> Terminating
//!     ^                                       |
//!     +---------------------------------------+
//! ```
//!
//! The idle timer is dispatcher-local. It is armed only around the menu key read: a
//! fresh timer right before the read and a disarm as soon as the key arrives, so
//! exactly one timer is live while waiting for a command and none while an action
//! runs. Every action is treated the same way, the modal screen included.
//!
//! A fired timer always wins: a key that arrives after expiry is discarded and the
//! dispatcher parks until the supervisor tears the session down.
use log::{debug, info};
use std::sync::Arc;

use super::actions;
use super::error::DoorError;
use super::idle::{IdleTimer, IdleWatchdog, TimerState};
use super::keys::{KeyEvent, KeySource};
use super::menu::{render_menu, MenuAction};
use super::session::SessionDescriptor;
use super::SessionOutcome;
use crate::logutil::describe_key;
use crate::metrics::SessionMetrics;
use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Rendering,
    AwaitingKey,
    Dispatching(KeyEvent),
    Terminating(SessionOutcome),
}

pub struct MenuDispatcher<K: KeySource, R: Renderer> {
    session: SessionDescriptor,
    keys: K,
    renderer: R,
    watchdog: IdleWatchdog,
    timer: Option<IdleTimer>,
    state: DispatcherState,
    metrics: Arc<SessionMetrics>,
    input_open: bool,
}

impl<K: KeySource, R: Renderer> MenuDispatcher<K, R> {
    pub fn new(
        session: SessionDescriptor,
        keys: K,
        renderer: R,
        watchdog: IdleWatchdog,
        metrics: Arc<SessionMetrics>,
    ) -> Self {
        Self {
            session,
            keys,
            renderer,
            watchdog,
            timer: None,
            state: DispatcherState::Rendering,
            metrics,
            input_open: true,
        }
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Run until Quit or escape. Idle expiry is not observed here: the supervisor
    /// cancels this future instead.
    pub async fn run(&mut self) -> Result<SessionOutcome, DoorError> {
        loop {
            if let DispatcherState::Terminating(outcome) = self.state {
                return Ok(outcome);
            }
            self.step().await?;
        }
    }

    /// Advance the state machine by one transition.
    pub async fn step(&mut self) -> Result<(), DoorError> {
        let next = match self.state {
            DispatcherState::Rendering => {
                self.disarm();
                render_menu(&mut self.renderer).map_err(DoorError::Output)?;
                DispatcherState::AwaitingKey
            }
            DispatcherState::AwaitingKey => {
                self.arm();
                let key = self.keys.read_key().await;
                if self.disarm() == Some(TimerState::Fired) {
                    debug!("input arrived after idle expiry, discarding");
                    return std::future::pending().await;
                }
                let key = key?;
                self.metrics.record_key();
                DispatcherState::Dispatching(key)
            }
            DispatcherState::Dispatching(key) => self.dispatch(key).await?,
            DispatcherState::Terminating(_) => return Ok(()),
        };
        self.state = next;
        Ok(())
    }

    async fn dispatch(&mut self, key: KeyEvent) -> Result<DispatcherState, DoorError> {
        let action = MenuAction::from_key(&key);
        debug!("key {} -> {:?}", describe_key(&key), action);
        match action {
            MenuAction::Quit => {
                let outcome = if key == KeyEvent::Escape {
                    SessionOutcome::Escape
                } else {
                    SessionOutcome::Quit
                };
                Ok(DispatcherState::Terminating(outcome))
            }
            MenuAction::Unrecognized => {
                self.metrics.record_unrecognized();
                Ok(DispatcherState::Rendering)
            }
            _ => {
                self.metrics.record_action();
                let shown = actions::perform(action, &self.session, &mut self.renderer)
                    .map_err(DoorError::Output)?;
                if shown {
                    self.renderer.pause_prompt().map_err(DoorError::Output)?;
                    self.keys.read_key().await?;
                    self.metrics.record_key();
                }
                self.renderer.clear_screen().map_err(DoorError::Output)?;
                Ok(DispatcherState::Rendering)
            }
        }
    }

    fn arm(&mut self) {
        self.disarm();
        self.timer = Some(self.watchdog.arm());
    }

    /// Drop the current timer, returning its final state if one was armed.
    fn disarm(&mut self) -> Option<TimerState> {
        self.timer.take().map(|mut timer| timer.disarm())
    }

    /// Stop the timer and release the keyboard. Runs on every way out of the session
    /// and is safe to call more than once.
    pub fn shutdown(&mut self) {
        self.disarm();
        if self.input_open {
            self.input_open = false;
            self.keys.close();
            self.metrics.record_input_release();
            info!(
                "session for node {} closed: {}",
                self.session.node,
                self.metrics.snapshot()
            );
        }
    }
}

impl<K: KeySource, R: Renderer> Drop for MenuDispatcher<K, R> {
    fn drop(&mut self) {
        if self.input_open {
            self.shutdown();
        }
    }
}
