use std::fmt;
use std::time::Duration;

use crate::config::TerminalConfig;

/// # Session Descriptor
///
/// Everything the door knows about the remote caller and their terminal, built
/// once at startup from the DOOR32.SYS drop file plus the probed terminal size.
/// It is never mutated afterwards; the menu dispatcher owns it for the life of
/// the session.
///
/// ## Usage
///
/// ```rust
/// use std::time::Duration;
/// use ansidoor::door::session::{Emulation, SessionDescriptor, TermSize};
///
/// let session = SessionDescriptor::builder("Sysop")
///     .emulation(Emulation::Ansi)
///     .time_left(Duration::from_secs(30 * 60))
///     .size(TermSize::new(80, 25))
///     .build();
///
/// assert!(session.emulation.is_ansi());
/// assert_eq!(session.width, 80);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescriptor {
    pub alias: String,
    pub real_name: String,
    pub node: u32,
    pub emulation: Emulation,
    pub time_left: Duration,
    pub height: u16,
    pub width: u16,
    pub modal_height: u16,
    pub modal_width: u16,
    pub comm_type: CommType,
    pub comm_handle: u64,
    pub baud_rate: u64,
    pub bbs_id: String,
    pub user_record: u32,
    pub security_level: u32,
}

/// Terminal emulation reported by the BBS (DOOR32.SYS line 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emulation {
    Ascii,
    Ansi,
    /// Avatar, RIP, Max Graphics or an unknown code; kept verbatim.
    Other(u32),
}

impl Emulation {
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Emulation::Ascii,
            1 => Emulation::Ansi,
            other => Emulation::Other(other),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Emulation::Ascii => 0,
            Emulation::Ansi => 1,
            Emulation::Other(code) => *code,
        }
    }

    pub fn is_ansi(&self) -> bool {
        matches!(self, Emulation::Ansi)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Emulation::Ascii => "ASCII",
            Emulation::Ansi => "ANSI",
            Emulation::Other(2) => "Avatar",
            Emulation::Other(3) => "RIP",
            Emulation::Other(4) => "Max Graphics",
            Emulation::Other(_) => "Unknown",
        }
    }
}

impl fmt::Display for Emulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}

/// Connection type (DOOR32.SYS line 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommType {
    Local,
    Serial,
    Telnet,
    Other(u32),
}

impl CommType {
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => CommType::Local,
            1 => CommType::Serial,
            2 => CommType::Telnet,
            other => CommType::Other(other),
        }
    }
}

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub width: u16,
    pub height: u16,
}

impl TermSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Probe the controlling terminal, falling back to configured defaults when the
    /// probe fails or reports a zero dimension.
    pub fn detect(fallback: &TerminalConfig) -> Self {
        match crossterm::terminal::size() {
            Ok((width, height)) if width > 0 && height > 0 => Self { width, height },
            Ok(_) | Err(_) => {
                log::debug!(
                    "terminal size unavailable, using {}x{}",
                    fallback.default_width,
                    fallback.default_height
                );
                Self {
                    width: fallback.default_width,
                    height: fallback.default_height,
                }
            }
        }
    }

    /// Modal box for this terminal: half of each dimension, at least `min`, never
    /// larger than the terminal itself.
    pub fn modal_box(&self, min: TermSize) -> TermSize {
        let width = (self.width / 2).max(min.width).min(self.width);
        let height = (self.height / 2).max(min.height).min(self.height);
        TermSize { width, height }
    }
}

impl SessionDescriptor {
    pub fn builder(alias: impl Into<String>) -> SessionDescriptorBuilder {
        SessionDescriptorBuilder::new(alias)
    }

    /// Remaining time budget formatted the way callers read it, e.g. `30m` or `1h05m`.
    pub fn time_left_display(&self) -> String {
        let minutes = self.time_left.as_secs() / 60;
        if minutes >= 60 {
            format!("{}h{:02}m", minutes / 60, minutes % 60)
        } else {
            format!("{minutes}m")
        }
    }
}

/// Builder used by the drop-file reader and by tests.
#[derive(Debug, Clone)]
pub struct SessionDescriptorBuilder {
    inner: SessionDescriptor,
    min_modal: TermSize,
}

impl SessionDescriptorBuilder {
    fn new(alias: impl Into<String>) -> Self {
        let defaults = TerminalConfig::default();
        let size = TermSize::new(defaults.default_width, defaults.default_height);
        let min_modal = TermSize::new(defaults.min_modal_width, defaults.min_modal_height);
        let modal = size.modal_box(min_modal);
        Self {
            inner: SessionDescriptor {
                alias: alias.into(),
                real_name: String::new(),
                node: 1,
                emulation: Emulation::Ansi,
                time_left: Duration::ZERO,
                height: size.height,
                width: size.width,
                modal_height: modal.height,
                modal_width: modal.width,
                comm_type: CommType::Local,
                comm_handle: 0,
                baud_rate: 0,
                bbs_id: String::new(),
                user_record: 0,
                security_level: 0,
            },
            min_modal,
        }
    }

    pub fn real_name(mut self, name: impl Into<String>) -> Self {
        self.inner.real_name = name.into();
        self
    }

    pub fn node(mut self, node: u32) -> Self {
        self.inner.node = node;
        self
    }

    pub fn emulation(mut self, emulation: Emulation) -> Self {
        self.inner.emulation = emulation;
        self
    }

    pub fn time_left(mut self, time_left: Duration) -> Self {
        self.inner.time_left = time_left;
        self
    }

    pub fn min_modal(mut self, min: TermSize) -> Self {
        self.min_modal = min;
        self
    }

    /// Set the terminal size; the modal box is derived from it at `build`.
    pub fn size(mut self, size: TermSize) -> Self {
        self.inner.width = size.width;
        self.inner.height = size.height;
        self
    }

    pub fn comm(mut self, comm_type: CommType, handle: u64, baud_rate: u64) -> Self {
        self.inner.comm_type = comm_type;
        self.inner.comm_handle = handle;
        self.inner.baud_rate = baud_rate;
        self
    }

    pub fn bbs_id(mut self, bbs_id: impl Into<String>) -> Self {
        self.inner.bbs_id = bbs_id.into();
        self
    }

    pub fn user_record(mut self, record: u32) -> Self {
        self.inner.user_record = record;
        self
    }

    pub fn security_level(mut self, level: u32) -> Self {
        self.inner.security_level = level;
        self
    }

    pub fn build(mut self) -> SessionDescriptor {
        let size = TermSize::new(self.inner.width, self.inner.height);
        let modal = size.modal_box(self.min_modal);
        self.inner.modal_width = modal.width;
        self.inner.modal_height = modal.height;
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emulation_codes_round_trip_names() {
        assert_eq!(Emulation::from_code(1), Emulation::Ansi);
        assert_eq!(Emulation::from_code(0), Emulation::Ascii);
        assert_eq!(Emulation::from_code(3).name(), "RIP");
        assert_eq!(Emulation::from_code(9).to_string(), "9 (Unknown)");
        assert!(!Emulation::Other(2).is_ansi());
    }

    #[test]
    fn modal_box_is_half_size_with_floor() {
        let min = TermSize::new(30, 7);
        assert_eq!(TermSize::new(80, 25).modal_box(min), TermSize::new(40, 12));
        assert_eq!(TermSize::new(132, 50).modal_box(min), TermSize::new(66, 25));
        // Small terminals get the minimum box, clamped to the screen.
        assert_eq!(TermSize::new(40, 10).modal_box(min), TermSize::new(30, 7));
        assert_eq!(TermSize::new(20, 5).modal_box(min), TermSize::new(20, 5));
    }

    #[test]
    fn builder_derives_modal_from_size() {
        let session = SessionDescriptor::builder("Zed")
            .size(TermSize::new(100, 40))
            .build();
        assert_eq!(session.modal_width, 50);
        assert_eq!(session.modal_height, 20);
    }

    #[test]
    fn time_left_formats_hours_and_minutes() {
        let short = SessionDescriptor::builder("a")
            .time_left(Duration::from_secs(30 * 60))
            .build();
        assert_eq!(short.time_left_display(), "30m");
        let long = SessionDescriptor::builder("a")
            .time_left(Duration::from_secs(65 * 60))
            .build();
        assert_eq!(long.time_left_display(), "1h05m");
    }
}
