//! Main menu: the hotkey table, key-to-action mapping and menu rendering.
//!
//! Keys are case-folded once and looked up in [`MENU`]; anything not in the table is
//! [`MenuAction::Unrecognized`]. Escape always quits.
use std::io;

use super::keys::KeyEvent;
use crate::render::{Renderer, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    ArtTest,
    ColorTest,
    DropFileTest,
    FontTest,
    ModalTest,
    TermSizeTest,
    Quit,
    Unrecognized,
}

/// One line of the menu.
#[derive(Debug, Clone, Copy)]
pub struct MenuEntry {
    pub hotkey: char,
    pub label: &'static str,
    pub action: MenuAction,
}

/// Menu entries in display order. Hotkeys are stored upper case.
pub const MENU: [MenuEntry; 7] = [
    MenuEntry { hotkey: 'A', label: "Art Test", action: MenuAction::ArtTest },
    MenuEntry { hotkey: 'C', label: "Color Test", action: MenuAction::ColorTest },
    MenuEntry { hotkey: 'D', label: "Drop File Test", action: MenuAction::DropFileTest },
    MenuEntry { hotkey: 'F', label: "Font Test", action: MenuAction::FontTest },
    MenuEntry { hotkey: 'M', label: "Modal Test", action: MenuAction::ModalTest },
    MenuEntry { hotkey: 'T', label: "Term Size Test", action: MenuAction::TermSizeTest },
    MenuEntry { hotkey: 'Q', label: "Quit", action: MenuAction::Quit },
];

pub const MENU_TITLE: &str = "ANSIDOOR TEST MENU";

impl MenuAction {
    pub fn from_key(key: &KeyEvent) -> Self {
        match key {
            KeyEvent::Escape => MenuAction::Quit,
            KeyEvent::Char(c) => {
                let folded = c.to_ascii_uppercase();
                MENU.iter()
                    .find(|entry| entry.hotkey == folded)
                    .map(|entry| entry.action)
                    .unwrap_or(MenuAction::Unrecognized)
            }
            _ => MenuAction::Unrecognized,
        }
    }
}

/// Write the menu and the `Command?` prompt.
pub fn render_menu<R: Renderer>(renderer: &mut R) -> io::Result<()> {
    renderer.print_styled("\r\n", TextStyle::PLAIN)?;
    renderer.print_styled("→ ", TextStyle::HEADING)?;
    renderer.print_styled(&format!("{MENU_TITLE}\r\n\r\n"), TextStyle::fg(crossterm::style::Color::DarkCyan))?;
    for entry in MENU.iter() {
        renderer.print_styled("[", TextStyle::BRACKET)?;
        renderer.print_styled(&entry.hotkey.to_string(), TextStyle::HOTKEY)?;
        renderer.print_styled("] ", TextStyle::BRACKET)?;
        renderer.print_styled(&format!("{}\r\n", entry.label), TextStyle::LABEL)?;
    }
    renderer.print_styled("\r\nCommand? ", TextStyle::PLAIN)
}
