//! Logging helpers for values that arrive from outside the door (drop-file fields,
//! raw key presses) so log lines stay single-line and readable.

use std::fmt::Write;

use crate::door::keys::KeyEvent;

/// Longest preview written for a single value before it is cut with an ellipsis.
const MAX_PREVIEW: usize = 120;

/// Escape a string for single-line logging.
///
/// Backslash, `\n`, `\r` and `\t` become two-character escapes, other control
/// characters become `\xNN`. Values longer than 120 characters are truncated.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Short description of a key press for trace logs, e.g. `'q'` or `<esc>`.
pub fn describe_key(key: &KeyEvent) -> String {
    match key {
        KeyEvent::Char(c) if c.is_control() => format!("<ctrl 0x{:02X}>", *c as u32),
        KeyEvent::Char(c) => format!("'{c}'"),
        KeyEvent::Escape => "<esc>".to_string(),
        KeyEvent::Enter => "<enter>".to_string(),
        KeyEvent::Backspace => "<backspace>".to_string(),
        KeyEvent::Tab => "<tab>".to_string(),
        KeyEvent::Up => "<up>".to_string(),
        KeyEvent::Down => "<down>".to_string(),
        KeyEvent::Left => "<left>".to_string(),
        KeyEvent::Right => "<right>".to_string(),
        KeyEvent::Function(n) => format!("<f{n}>"),
        KeyEvent::Other => "<other>".to_string(),
    }
}
