//! Test screens run from the menu. Each one clears the screen and draws through the
//! renderer; the dispatcher handles the acknowledgement key afterwards.
use crossterm::style::Color;
use std::io;

use super::menu::MenuAction;
use super::session::SessionDescriptor;
use crate::render::{art, Font, Renderer, TextStyle};

pub const MODAL_PROMPT: &str = "Continue? Y/n";
pub const MODAL_PROMPT_WIDTH: u16 = 14;

const PIPE_SAMPLE: &str = "|04Hello |02I contain |03Pipe |06codes...|07";

/// Draw the screen for `action`. Returns `false` for actions with no screen
/// (`Quit`, `Unrecognized`), which need no acknowledgement.
pub fn perform<R: Renderer>(
    action: MenuAction,
    session: &SessionDescriptor,
    renderer: &mut R,
) -> io::Result<bool> {
    match action {
        MenuAction::ArtTest => art_test(session, renderer)?,
        MenuAction::ColorTest => color_test(renderer)?,
        MenuAction::DropFileTest => drop_file_test(session, renderer)?,
        MenuAction::FontTest => font_test(renderer)?,
        MenuAction::ModalTest => modal_test(session, renderer)?,
        MenuAction::TermSizeTest => term_size_test(session, renderer)?,
        MenuAction::Quit | MenuAction::Unrecognized => return Ok(false),
    }
    Ok(true)
}

fn heading<R: Renderer>(renderer: &mut R, title: &str) -> io::Result<()> {
    renderer.clear_screen()?;
    renderer.print_styled(&format!("\r\n{title}\r\n"), TextStyle::HEADING)
}

fn field<R: Renderer>(renderer: &mut R, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
    renderer.print_styled(&format!("{label}: "), TextStyle::LABEL)?;
    renderer.print_styled(&format!("{value}\r\n"), TextStyle::PLAIN)
}

fn art_test<R: Renderer>(session: &SessionDescriptor, renderer: &mut R) -> io::Result<()> {
    heading(renderer, "ART TEST:")?;
    let width = session.width.min(79);
    let height = session.height.saturating_sub(4).clamp(1, 16);
    renderer.print_ansi_art_at(&art::gradient(width, height), 2, 0)?;
    renderer.move_cursor(2 + height, 0)
}

fn color_test<R: Renderer>(renderer: &mut R) -> io::Result<()> {
    heading(renderer, "COLOR TEST:")?;
    renderer.print_styled(" White Text on Blue ", TextStyle::fg(Color::White).on(Color::DarkBlue))?;
    renderer.print_styled("\r\n", TextStyle::PLAIN)?;
    renderer.print_styled(" Bright Red Text on Red ", TextStyle::fg(Color::Red).on(Color::DarkRed))?;
    renderer.print_styled("\r\n", TextStyle::PLAIN)?;
    renderer.print_color_coded(PIPE_SAMPLE, Color::White)?;
    renderer.print_styled("\r\n", TextStyle::PLAIN)
}

fn drop_file_test<R: Renderer>(session: &SessionDescriptor, renderer: &mut R) -> io::Result<()> {
    heading(renderer, "DROP FILE:")?;
    field(renderer, "Alias", &session.alias)?;
    field(renderer, "Node", session.node)?;
    field(renderer, "Emulation", session.emulation)?;
    field(renderer, "Time Left", session.time_left_display())
}

fn font_test<R: Renderer>(renderer: &mut R) -> io::Result<()> {
    heading(renderer, "FONT TEST (SyncTerm):")?;
    for font in Font::SHOWCASE {
        renderer.select_font(font)?;
        renderer.print_styled(&format!("{}\r\n", font.name()), TextStyle::PLAIN)?;
    }
    renderer.select_font(Font::Cp437)
}

fn modal_test<R: Renderer>(session: &SessionDescriptor, renderer: &mut R) -> io::Result<()> {
    renderer.clear_screen()?;
    let frame = art::modal_frame(session.modal_width, session.modal_height);
    renderer.show_modal(&frame, MODAL_PROMPT, MODAL_PROMPT_WIDTH)
}

fn term_size_test<R: Renderer>(session: &SessionDescriptor, renderer: &mut R) -> io::Result<()> {
    heading(renderer, "TERMINAL SIZE DETECT:")?;
    field(renderer, "Height", session.height)?;
    field(renderer, "Width", session.width)?;
    field(renderer, "Modal Height", session.modal_height)?;
    field(renderer, "Modal Width", session.modal_width)
}
