//! Session supervisor: gate, dispatcher and the termination policy.
//!
//! The dispatcher is raced against the idle-timer channel and the session time budget.
//! A termination request wins over anything the dispatcher is doing; its future is
//! dropped, then the same teardown runs as for Quit.
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::dispatcher::MenuDispatcher;
use super::error::DoorError;
use super::gate::{self, GateDecision};
use super::idle::{IdleWatchdog, Termination};
use super::keys::KeySource;
use super::session::SessionDescriptor;
use super::SessionOutcome;
use crate::config::Config;
use crate::logutil::escape_log;
use crate::metrics::{SessionMetrics, Snapshot};
use crate::render::{Renderer, TextStyle};

pub const IDLE_FAREWELL: &str = "You've been idle for too long... exiting!";
pub const TIME_UP_NOTICE: &str = "Your time for this session has expired.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    pub metrics: Snapshot,
}

/// Run one door session.
///
/// `open_keys` is only called once the caller has passed the capability gate, so a
/// declined caller never has their terminal switched to raw mode.
pub async fn run_session<K, R, F>(
    session: SessionDescriptor,
    config: &Config,
    mut renderer: R,
    open_keys: F,
) -> Result<SessionReport, DoorError>
where
    K: KeySource,
    R: Renderer,
    F: FnOnce() -> Result<K, DoorError>,
{
    let metrics = Arc::new(SessionMetrics::new());
    info!(
        "session start: alias={} node={} emulation={} time_left={} size={}x{}",
        escape_log(&session.alias),
        session.node,
        session.emulation,
        session.time_left_display(),
        session.width,
        session.height
    );

    renderer.clear_screen().map_err(DoorError::Output)?;
    renderer.move_cursor(0, 0).map_err(DoorError::Output)?;

    if gate::check(&session) == GateDecision::Decline {
        gate::decline(&mut renderer, config.door.decline_grace())
            .await
            .map_err(DoorError::Output)?;
        return Ok(SessionReport {
            outcome: SessionOutcome::Declined,
            metrics: metrics.snapshot(),
        });
    }

    let keys = open_keys()?;
    let (term_tx, mut term_rx) = mpsc::unbounded_channel();
    let watchdog = IdleWatchdog::new(config.door.idle_timeout(), term_tx, Arc::clone(&metrics));
    let budget = time_budget(&session, config);
    let mut dispatcher = MenuDispatcher::new(session, keys, renderer, watchdog, Arc::clone(&metrics));

    let result = tokio::select! {
        biased;
        Some(request) = term_rx.recv() => match request {
            Termination::IdleTimeout => Ok(SessionOutcome::IdleTimeout),
        },
        _ = sleep_until_budget(budget) => Ok(SessionOutcome::TimeExpired),
        outcome = dispatcher.run() => outcome,
    };

    dispatcher.shutdown();
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("session aborted: {e}");
            return Err(e);
        }
    };

    match outcome {
        SessionOutcome::IdleTimeout => {
            farewell(dispatcher.renderer_mut(), IDLE_FAREWELL)?;
            tokio::time::sleep(config.door.idle_grace()).await;
        }
        SessionOutcome::TimeExpired => {
            farewell(dispatcher.renderer_mut(), TIME_UP_NOTICE)?;
            tokio::time::sleep(config.door.time_up_grace()).await;
        }
        SessionOutcome::Quit | SessionOutcome::Escape | SessionOutcome::Declined => {}
    }
    info!("session ended: {:?}", outcome);

    Ok(SessionReport {
        outcome,
        metrics: metrics.snapshot(),
    })
}

fn farewell<R: Renderer>(renderer: &mut R, text: &str) -> Result<(), DoorError> {
    renderer
        .print_styled(&format!("\r\n{text}\r\n"), TextStyle::NOTICE)
        .map_err(DoorError::Output)
}

/// Deadline for the whole session, if the time budget is enforced and non-zero.
fn time_budget(session: &SessionDescriptor, config: &Config) -> Option<Instant> {
    if config.door.enforce_time_limit && !session.time_left.is_zero() {
        Some(Instant::now() + session.time_left)
    } else {
        None
    }
}

async fn sleep_until_budget(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
