//! Capability gate: the door only runs on ANSI terminals.
use log::info;
use std::io;
use std::time::Duration;

use super::session::SessionDescriptor;
use crate::logutil::escape_log;
use crate::render::{Renderer, TextStyle};

pub const DECLINE_MESSAGE: &str = "Sorry, ANSI is required to use this...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Decline,
}

pub fn check(session: &SessionDescriptor) -> GateDecision {
    if session.emulation.is_ansi() {
        GateDecision::Pass
    } else {
        info!(
            "declining {} on node {}: emulation {}",
            escape_log(&session.alias),
            session.node,
            session.emulation
        );
        GateDecision::Decline
    }
}

/// Tell the caller why they are being sent back and hold the line long enough for
/// the message to arrive.
pub async fn decline<R: Renderer>(renderer: &mut R, grace: Duration) -> io::Result<()> {
    renderer.print_styled(&format!("{DECLINE_MESSAGE}\r\n"), TextStyle::PLAIN)?;
    tokio::time::sleep(grace).await;
    Ok(())
}
