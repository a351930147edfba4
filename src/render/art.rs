//! Generated art for the test screens and the SyncTerm font table.
//!
//! Nothing here is loaded from disk; the art is built from block characters so the
//! art and modal screens work without any bundled assets.
use crossterm::style::{Color, Stylize};

/// Shading ramp from light to solid.
const RAMP: [char; 4] = ['░', '▒', '▓', '█'];

const BANDS: [Color; 6] = [
    Color::DarkBlue,
    Color::Blue,
    Color::DarkCyan,
    Color::Cyan,
    Color::DarkMagenta,
    Color::Magenta,
];

/// A smooth diagonal color band `width` x `height` cells, as ANSI text with one
/// `\n`-separated line per row.
pub fn gradient(width: u16, height: u16) -> String {
    let mut lines = Vec::with_capacity(height as usize);
    for row in 0..height {
        let mut line = String::new();
        for col in 0..width {
            let step = (col as usize + row as usize * 2) % (RAMP.len() * BANDS.len());
            let color = BANDS[step / RAMP.len()];
            let shade = RAMP[step % RAMP.len()];
            line.push_str(&shade.with(color).to_string());
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Plain box-drawing frame for a dialog. The renderer supplies the colors.
pub fn modal_frame(width: u16, height: u16) -> String {
    let width = width.max(2) as usize;
    let height = height.max(2) as usize;
    let inner = width - 2;
    let mut lines = Vec::with_capacity(height);
    lines.push(format!("╔{}╗", "═".repeat(inner)));
    for _ in 0..height - 2 {
        lines.push(format!("║{}║", " ".repeat(inner)));
    }
    lines.push(format!("╚{}╝", "═".repeat(inner)));
    lines.join("\n")
}

/// Fonts selectable on SyncTerm-compatible terminals (`CSI 0 ; n SP D`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Cp437,
    Cp437Thin,
    Topaz,
    TopazPlus,
    MicroKnight,
    MicroKnightPlus,
    MoSoul,
}

impl Font {
    /// Order shown on the font test screen.
    pub const SHOWCASE: [Font; 7] = [
        Font::Topaz,
        Font::TopazPlus,
        Font::MicroKnight,
        Font::MicroKnightPlus,
        Font::MoSoul,
        Font::Cp437,
        Font::Cp437Thin,
    ];

    /// SyncTerm font slot.
    pub fn slot(&self) -> u8 {
        match self {
            Font::Cp437 => 0,
            Font::Cp437Thin => 26,
            Font::MoSoul => 42,
            Font::MicroKnightPlus => 43,
            Font::TopazPlus => 44,
            Font::MicroKnight => 45,
            Font::Topaz => 46,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Font::Cp437 => "IBM CP437",
            Font::Cp437Thin => "IBM CP437 Thin",
            Font::Topaz => "Topaz",
            Font::TopazPlus => "Topaz+",
            Font::MicroKnight => "Microknight",
            Font::MicroKnightPlus => "Microknight+",
            Font::MoSoul => "mO'sOul",
        }
    }

    pub fn escape(&self) -> String {
        format!("\x1b[0;{} D", self.slot())
    }
}
