//! # Rendering Collaborator
//!
//! The door core never writes escape sequences itself. Everything visible goes through
//! the [`Renderer`] capability trait, and the core treats each call as an opaque effect.
//!
//! - [`ansi`] - [`AnsiRenderer`], the crossterm-backed implementation used by the binary
//! - [`art`] - generated art, the modal frame and the SyncTerm font table
//!
//! Lines end in `\r\n` because the terminal is in raw mode while the menu runs.

pub mod ansi;
pub mod art;

use crossterm::style::Color;
use std::io;

pub use ansi::AnsiRenderer;
pub use art::Font;

/// Foreground/background pair plus weight for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub fg: Color,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl TextStyle {
    pub const fn fg(fg: Color) -> Self {
        Self {
            fg,
            bg: None,
            bold: false,
        }
    }

    pub const fn on(self, bg: Color) -> Self {
        Self {
            bg: Some(bg),
            ..self
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const PLAIN: TextStyle = TextStyle::fg(Color::Reset);
    pub const HEADING: TextStyle = TextStyle::fg(Color::Cyan).bold();
    pub const BRACKET: TextStyle = TextStyle::fg(Color::DarkCyan);
    pub const HOTKEY: TextStyle = TextStyle::fg(Color::Yellow).bold();
    pub const LABEL: TextStyle = TextStyle::fg(Color::DarkMagenta);
    pub const NOTICE: TextStyle = TextStyle::fg(Color::White).bold();
}

/// Terminal capabilities consumed by the door core.
///
/// Rows and columns are zero-based. Implementations should flush before returning
/// so output reaches the remote caller even if the door exits right after.
pub trait Renderer {
    fn clear_screen(&mut self) -> io::Result<()>;

    fn move_cursor(&mut self, row: u16, col: u16) -> io::Result<()>;

    fn print_styled(&mut self, text: &str, style: TextStyle) -> io::Result<()>;

    /// Draw pre-rendered ANSI art with its top-left corner at (`row`, `col`).
    fn print_ansi_art_at(&mut self, art: &str, row: u16, col: u16) -> io::Result<()>;

    /// Print text that may carry BBS pipe color codes, starting in `default`.
    fn print_color_coded(&mut self, text: &str, default: Color) -> io::Result<()>;

    /// Draw `content` as a centered dialog with `prompt` centered inside a field of
    /// `prompt_width` cells.
    fn show_modal(&mut self, content: &str, prompt: &str, prompt_width: u16) -> io::Result<()>;

    /// Show the "press any key" prompt; the caller reads the acknowledging key.
    fn pause_prompt(&mut self) -> io::Result<()>;

    fn select_font(&mut self, font: Font) -> io::Result<()>;
}
