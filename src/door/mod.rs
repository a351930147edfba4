//! # Door Session Core
//!
//! Turns a DOOR32.SYS handoff into an interactive single-key menu session.
//!
//! ## Components
//!
//! - [`dropfile`] - DOOR32.SYS reader
//! - [`session`] - the immutable [`SessionDescriptor`]
//! - [`gate`] - refuses callers without ANSI
//! - [`idle`] - re-armable idle timer raising termination requests
//! - [`keys`] - raw-mode keystroke source
//! - [`menu`] / [`actions`] - hotkey table and the test screens
//! - [`dispatcher`] - the menu state machine
//! - [`supervisor`] - races the dispatcher against idle and time-budget termination
//!
//! ## Session Lifecycle
//!
//! ```text
//! drop file ──> SessionDescriptor ──> gate ──(decline)──> notice, exit 0
//!                                       │
//!                                     (pass)
//!                                       │
//!                              keyboard raw mode
//!                                       │
//!             ┌──────────── MenuDispatcher loop ◄──── idle timer / time budget
//!             │
//!      Quit / Esc / idle / time up ──> timer stopped, keyboard released, exit 0
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use ansidoor::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let report = ansidoor::door::run_door(Path::new("/bbs/node1"), &config).await?;
//!     println!("{:?}", report.outcome);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod dispatcher;
pub mod dropfile;
pub mod error;
pub mod gate;
pub mod idle;
pub mod keys;
pub mod menu;
pub mod session;
pub mod supervisor;

use std::path::Path;

pub use error::DoorError;
pub use session::SessionDescriptor;
pub use supervisor::{run_session, SessionReport};

use crate::config::Config;
use crate::render::AnsiRenderer;
use keys::TerminalKeys;
use session::TermSize;

/// How a session ended. Every outcome is a clean exit (status 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Quit,
    Escape,
    Declined,
    IdleTimeout,
    TimeExpired,
}

/// Read the drop file at `path`, then run a full session on stdin/stdout.
pub async fn run_door(path: &Path, config: &Config) -> Result<SessionReport, DoorError> {
    let door = dropfile::load(path).await?;
    let size = TermSize::detect(&config.terminal);
    let min_modal = TermSize::new(config.terminal.min_modal_width, config.terminal.min_modal_height);
    let session = door.into_descriptor(size, min_modal);
    let renderer = AnsiRenderer::stdout(size);
    run_session(session, config, renderer, TerminalKeys::open).await
}
