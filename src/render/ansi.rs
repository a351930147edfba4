use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Stdout, Write};

use super::{Font, Renderer, TextStyle};
use crate::door::session::TermSize;

const PAUSE_TEXT: &str = "[ Press any key to continue ]";

/// crossterm-backed renderer writing to any byte sink (stdout in production, a
/// `Vec<u8>` in tests).
pub struct AnsiRenderer<W: Write> {
    out: W,
    size: TermSize,
}

impl AnsiRenderer<Stdout> {
    pub fn stdout(size: TermSize) -> Self {
        Self::new(io::stdout(), size)
    }
}

impl<W: Write> AnsiRenderer<W> {
    pub fn new(out: W, size: TermSize) -> Self {
        Self { out, size }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn apply(&mut self, style: TextStyle) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(style.fg))?;
        if let Some(bg) = style.bg {
            queue!(self.out, SetBackgroundColor(bg))?;
        }
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)
    }

    /// Top-left corner that centers a `width` x `height` block on screen.
    fn centered(&self, width: u16, height: u16) -> (u16, u16) {
        let row = self.size.height.saturating_sub(height) / 2;
        let col = self.size.width.saturating_sub(width) / 2;
        (row, col)
    }
}

impl<W: Write> Renderer for AnsiRenderer<W> {
    fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(col, row))?;
        self.out.flush()
    }

    fn print_styled(&mut self, text: &str, style: TextStyle) -> io::Result<()> {
        self.apply(style)?;
        queue!(self.out, Print(text))?;
        self.reset()?;
        self.out.flush()
    }

    fn print_ansi_art_at(&mut self, art: &str, row: u16, col: u16) -> io::Result<()> {
        for (offset, line) in art.lines().enumerate() {
            let target = row.saturating_add(offset as u16);
            if target >= self.size.height {
                break;
            }
            queue!(self.out, MoveTo(col, target), Print(line))?;
        }
        self.reset()?;
        self.out.flush()
    }

    fn print_color_coded(&mut self, text: &str, default: Color) -> io::Result<()> {
        // Pipe codes are written through untouched; translating them is the
        // hosting BBS's job.
        queue!(self.out, SetForegroundColor(default), Print(text))?;
        self.reset()?;
        self.out.flush()
    }

    fn show_modal(&mut self, content: &str, prompt: &str, prompt_width: u16) -> io::Result<()> {
        let lines: Vec<&str> = content.lines().collect();
        let width = lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0) as u16;
        let height = lines.len() as u16;
        let (top, left) = self.centered(width, height);

        queue!(
            self.out,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Color::DarkBlue)
        )?;
        for (offset, line) in lines.iter().enumerate() {
            queue!(self.out, MoveTo(left, top + offset as u16), Print(line))?;
        }

        let field = prompt_width.max(prompt.chars().count() as u16);
        let prompt_row = top + height / 2;
        let prompt_col = left + width.saturating_sub(field) / 2;
        queue!(
            self.out,
            MoveTo(prompt_col, prompt_row),
            SetForegroundColor(Color::Yellow),
            SetAttribute(Attribute::Bold),
            Print(format!("{:^width$}", prompt, width = field as usize))
        )?;
        self.reset()?;
        queue!(self.out, MoveTo(0, self.size.height.saturating_sub(1)))?;
        self.out.flush()
    }

    fn pause_prompt(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\r\n"))?;
        self.apply(TextStyle::BRACKET)?;
        queue!(self.out, Print(PAUSE_TEXT))?;
        self.reset()?;
        self.out.flush()
    }

    fn select_font(&mut self, font: Font) -> io::Result<()> {
        queue!(self.out, Print(font.escape()))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(f: impl FnOnce(&mut AnsiRenderer<Vec<u8>>)) -> String {
        let mut renderer = AnsiRenderer::new(Vec::new(), TermSize::new(80, 25));
        f(&mut renderer);
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn clear_screen_homes_cursor() {
        let out = rendered(|r| r.clear_screen().unwrap());
        assert!(out.contains("\x1b[2J"));
        assert!(out.contains("\x1b[1;1H"));
    }

    #[test]
    fn move_cursor_is_one_based_on_the_wire() {
        let out = rendered(|r| r.move_cursor(4, 9).unwrap());
        assert_eq!(out, "\x1b[5;10H");
    }

    #[test]
    fn color_coded_text_passes_through() {
        let out = rendered(|r| r.print_color_coded("|04Hi|07", Color::White).unwrap());
        assert!(out.contains("|04Hi|07"));
    }

    #[test]
    fn modal_prompt_is_centered_in_frame() {
        let frame = super::super::art::modal_frame(40, 12);
        let out = rendered(|r| r.show_modal(&frame, "Continue? Y/n", 14).unwrap());
        // 40x12 on 80x25: top-left (6, 20); prompt row 12, field of 14 at column 33.
        assert!(out.contains("\x1b[7;21H╔"));
        assert!(out.contains("\x1b[13;34H"));
        assert!(out.contains("Continue? Y/n "));
    }

    #[test]
    fn art_is_clipped_to_screen_height() {
        let art = "a\nb\nc";
        let mut renderer = AnsiRenderer::new(Vec::new(), TermSize::new(80, 2));
        renderer.print_ansi_art_at(art, 0, 0).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.contains('a') && out.contains('b'));
        assert!(!out.contains('c'));
    }
}
