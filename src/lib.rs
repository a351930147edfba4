//! # ansidoor - an ANSI BBS door
//!
//! ansidoor is launched by a BBS with a DOOR32.SYS drop file. It checks that the caller's
//! terminal speaks ANSI, then runs a single-key test menu (art, colors, drop-file
//! contents, SyncTerm fonts, a modal dialog, terminal size) until the caller quits,
//! goes idle, or runs out of session time.
//!
//! ## Features
//!
//! - **DOOR32.SYS**: strict parsing of the standard 11-line drop file, from a file or a node directory.
//! - **Capability Gate**: non-ANSI callers get a short notice and are returned to the BBS.
//! - **Idle Timeout**: a fresh timer per menu prompt; expiry ends the session with a farewell.
//! - **Time Budget**: the drop file's minutes-left bound the whole session.
//! - **Raw Keyboard**: one key per command, no Enter needed, terminal mode always restored.
//!
//! ## Module Organization
//!
//! - [`door`] - session core: drop file, gate, idle timer, keys, dispatcher, supervisor
//! - [`render`] - rendering capability trait and the crossterm implementation
//! - [`config`] - optional TOML configuration
//! - [`metrics`] - per-session counters
//! - [`logutil`] - log escaping helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Supervisor    │ ← gate, termination policy, teardown
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ MenuDispatcher  │ ← state machine, idle timer, key reads
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │    Renderer     │ ← terminal output capabilities
//! └─────────────────┘
//! ```

pub mod config;
pub mod door;
pub mod logutil;
pub mod metrics;
pub mod render;
