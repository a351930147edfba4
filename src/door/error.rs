use thiserror::Error;

use super::dropfile::DropFileError;
use crate::config::ConfigError;

/// Fatal session errors. Idle expiry, running out of time and the non-ANSI
/// decline are outcomes, not errors; see [`super::SessionOutcome`].
#[derive(Debug, Error)]
pub enum DoorError {
    /// Startup configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The drop file was unreadable or malformed.
    #[error(transparent)]
    DropFile(#[from] DropFileError),

    /// The keyboard stream failed or closed mid-session.
    #[error("input stream failed: {0}")]
    Input(#[source] std::io::Error),

    /// Writing to the remote terminal failed.
    #[error("output stream failed: {0}")]
    Output(#[source] std::io::Error),
}
