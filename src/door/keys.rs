//! Keystroke source: one logical key press at a time from the raw terminal.
//!
//! [`KeySource`] is the seam the dispatcher reads through. The production
//! implementation, [`TerminalKeys`], puts the terminal into raw mode when opened and
//! restores it on [`KeySource::close`] or drop, whichever comes first.
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures::StreamExt;
use log::{debug, trace};
use std::io;

use super::error::DoorError;
use crate::logutil::describe_key;

/// A single logical key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Char(char),
    Escape,
    Enter,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Function(u8),
    Other,
}

impl KeyEvent {
    /// Convert a crossterm key code. Ctrl+letter is folded into the matching
    /// control character so it never collides with a menu hotkey.
    pub fn from_crossterm(code: KeyCode, modifiers: KeyModifiers) -> Self {
        match code {
            KeyCode::Char(c) if modifiers.contains(KeyModifiers::CONTROL) && c.is_ascii_alphabetic() => {
                KeyEvent::Char(char::from(c.to_ascii_uppercase() as u8 - b'@'))
            }
            KeyCode::Char(c) => KeyEvent::Char(c),
            KeyCode::Esc => KeyEvent::Escape,
            KeyCode::Enter => KeyEvent::Enter,
            KeyCode::Backspace => KeyEvent::Backspace,
            KeyCode::Tab => KeyEvent::Tab,
            KeyCode::Up => KeyEvent::Up,
            KeyCode::Down => KeyEvent::Down,
            KeyCode::Left => KeyEvent::Left,
            KeyCode::Right => KeyEvent::Right,
            KeyCode::F(n) => KeyEvent::Function(n),
            _ => KeyEvent::Other,
        }
    }
}

/// Source of key presses for the session.
///
/// `read_key` suspends the session task until a key is available. An `Err` means the
/// input stream is gone and the session cannot continue. `close` releases whatever the
/// source holds (raw mode for the terminal) and must be idempotent.
#[allow(async_fn_in_trait)]
pub trait KeySource {
    async fn read_key(&mut self) -> Result<KeyEvent, DoorError>;

    fn close(&mut self);
}

/// Raw-mode terminal keyboard backed by crossterm's async event stream.
pub struct TerminalKeys {
    events: EventStream,
    raw: bool,
}

impl TerminalKeys {
    /// Enter raw mode and start reading terminal events.
    pub fn open() -> Result<Self, DoorError> {
        enable_raw_mode().map_err(DoorError::Input)?;
        debug!("keyboard opened in raw mode");
        Ok(Self {
            events: EventStream::new(),
            raw: true,
        })
    }
}

impl KeySource for TerminalKeys {
    async fn read_key(&mut self) -> Result<KeyEvent, DoorError> {
        loop {
            match self.events.next().await {
                Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                    let event = KeyEvent::from_crossterm(key.code, key.modifiers);
                    trace!("key {}", describe_key(&event));
                    return Ok(event);
                }
                // Resize, focus, mouse and key-release events are not menu input.
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(DoorError::Input(e)),
                None => {
                    return Err(DoorError::Input(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "terminal input closed",
                    )))
                }
            }
        }
    }

    fn close(&mut self) {
        if self.raw {
            self.raw = false;
            let _ = disable_raw_mode();
            debug!("keyboard closed, raw mode released");
        }
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_plain_and_special_keys() {
        assert_eq!(
            KeyEvent::from_crossterm(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyEvent::Char('q')
        );
        assert_eq!(
            KeyEvent::from_crossterm(KeyCode::Char('Q'), KeyModifiers::SHIFT),
            KeyEvent::Char('Q')
        );
        assert_eq!(
            KeyEvent::from_crossterm(KeyCode::Esc, KeyModifiers::NONE),
            KeyEvent::Escape
        );
        assert_eq!(
            KeyEvent::from_crossterm(KeyCode::F(3), KeyModifiers::NONE),
            KeyEvent::Function(3)
        );
        assert_eq!(
            KeyEvent::from_crossterm(KeyCode::Insert, KeyModifiers::NONE),
            KeyEvent::Other
        );
    }

    #[test]
    fn control_letters_become_control_characters() {
        assert_eq!(
            KeyEvent::from_crossterm(KeyCode::Char('q'), KeyModifiers::CONTROL),
            KeyEvent::Char('\u{11}')
        );
        assert_eq!(
            KeyEvent::from_crossterm(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyEvent::Char('\u{3}')
        );
    }
}
