//! Test doubles & fixtures shared by the integration tests.
#![allow(dead_code)] // Each test binary uses a different subset.

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ansidoor::door::error::DoorError;
use ansidoor::door::keys::{KeyEvent, KeySource};
use ansidoor::door::session::{Emulation, SessionDescriptor, TermSize};
use ansidoor::metrics::SessionMetrics;
use ansidoor::render::{Font, Renderer, TextStyle};
use crossterm::style::Color;

/// One scripted input step.
#[derive(Debug, Clone)]
pub enum Step {
    Key(KeyEvent),
    /// Wait (on the tokio clock) before delivering the key.
    After(Duration, KeyEvent),
    /// Fail the read as if the connection dropped.
    Fail,
}

#[derive(Debug, Default)]
pub struct ProbeState {
    pub reads: usize,
    pub closes: usize,
    /// Live idle timers observed at the start of each read.
    pub live_timers_at_read: Vec<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct KeyProbe(pub Arc<Mutex<ProbeState>>);

impl KeyProbe {
    pub fn reads(&self) -> usize {
        self.0.lock().unwrap().reads
    }
    pub fn closes(&self) -> usize {
        self.0.lock().unwrap().closes
    }
    pub fn live_timers_at_read(&self) -> Vec<u64> {
        self.0.lock().unwrap().live_timers_at_read.clone()
    }
}

/// Key source fed from a script. Once the script runs out, reads never complete,
/// like a caller who walked away.
pub struct ScriptedKeys {
    steps: VecDeque<Step>,
    probe: KeyProbe,
    metrics: Option<Arc<SessionMetrics>>,
}

impl ScriptedKeys {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> (Self, KeyProbe) {
        let probe = KeyProbe::default();
        (
            Self {
                steps: steps.into_iter().collect(),
                probe: probe.clone(),
                metrics: None,
            },
            probe,
        )
    }

    /// Script of plain key presses.
    pub fn chars(keys: &str) -> (Self, KeyProbe) {
        Self::new(keys.chars().map(|c| Step::Key(KeyEvent::Char(c))))
    }

    /// Record the live-timer gauge of `metrics` on every read.
    pub fn watching(mut self, metrics: Arc<SessionMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

impl KeySource for ScriptedKeys {
    async fn read_key(&mut self) -> Result<KeyEvent, DoorError> {
        {
            let mut state = self.probe.0.lock().unwrap();
            state.reads += 1;
            if let Some(metrics) = &self.metrics {
                state.live_timers_at_read.push(metrics.live_timers());
            }
        }
        match self.steps.pop_front() {
            Some(Step::Key(key)) => Ok(key),
            Some(Step::After(delay, key)) => {
                tokio::time::sleep(delay).await;
                Ok(key)
            }
            Some(Step::Fail) => Err(DoorError::Input(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "caller hung up",
            ))),
            None => std::future::pending().await,
        }
    }

    fn close(&mut self) {
        self.probe.0.lock().unwrap().closes += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Clear,
    Move(u16, u16),
    Text(String),
    Art { row: u16, col: u16, lines: usize },
    ColorCoded(String),
    Modal { prompt: String, width: u16, lines: usize },
    Pause,
    Font(Font),
}

/// Renderer that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub ops: Arc<Mutex<Vec<Op>>>,
}

impl RecordingRenderer {
    pub fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    /// All printed text concatenated.
    pub fn text(&self) -> String {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn menu_renders(&self) -> usize {
        self.text().matches("Command? ").count()
    }

    fn push(&self, op: Op) -> io::Result<()> {
        self.ops.lock().unwrap().push(op);
        Ok(())
    }
}

impl Renderer for RecordingRenderer {
    fn clear_screen(&mut self) -> io::Result<()> {
        self.push(Op::Clear)
    }

    fn move_cursor(&mut self, row: u16, col: u16) -> io::Result<()> {
        self.push(Op::Move(row, col))
    }

    fn print_styled(&mut self, text: &str, _style: TextStyle) -> io::Result<()> {
        self.push(Op::Text(text.to_string()))
    }

    fn print_ansi_art_at(&mut self, art: &str, row: u16, col: u16) -> io::Result<()> {
        self.push(Op::Art {
            row,
            col,
            lines: art.lines().count(),
        })
    }

    fn print_color_coded(&mut self, text: &str, _default: Color) -> io::Result<()> {
        self.push(Op::ColorCoded(text.to_string()))
    }

    fn show_modal(&mut self, content: &str, prompt: &str, prompt_width: u16) -> io::Result<()> {
        self.push(Op::Modal {
            prompt: prompt.to_string(),
            width: prompt_width,
            lines: content.lines().count(),
        })
    }

    fn pause_prompt(&mut self) -> io::Result<()> {
        self.push(Op::Pause)
    }

    fn select_font(&mut self, font: Font) -> io::Result<()> {
        self.push(Op::Font(font))
    }
}

/// ANSI caller with 30 minutes left on an 80x25 screen.
pub fn ansi_session() -> SessionDescriptor {
    SessionDescriptor::builder("ZeroCool")
        .node(3)
        .emulation(Emulation::Ansi)
        .time_left(Duration::from_secs(30 * 60))
        .size(TermSize::new(80, 25))
        .build()
}

pub fn session_with(emulation: Emulation, time_left: Duration) -> SessionDescriptor {
    SessionDescriptor::builder("ZeroCool")
        .node(3)
        .emulation(emulation)
        .time_left(time_left)
        .size(TermSize::new(80, 25))
        .build()
}

pub const DOOR32_ANSI: &str =
    "2\r\n7\r\n38400\r\nMystic BBS 1.12\r\n42\r\nJane Doe\r\nZeroCool\r\n20\r\n30\r\n1\r\n3\r\n";

/// Write a drop file named `name` into a fresh temp dir.
pub fn drop_file_dir(name: &str, content: &str) -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join(name);
    std::fs::write(&path, content).expect("write drop file");
    (tmp, path)
}
