//! DOOR32.SYS drop-file reader.
//!
//! The hosting BBS writes one field per line before launching the door:
//!
//! ```text
//!  1  comm type (0=local, 1=serial, 2=telnet)
//!  2  comm or socket handle
//!  3  baud rate
//!  4  BBS software name and version
//!  5  user record position (1-based)
//!  6  real name
//!  7  alias / handle
//!  8  security level
//!  9  time left in minutes
//! 10  emulation (0=ASCII, 1=ANSI, 2=Avatar, 3=RIP, 4=Max Graphics)
//! 11  node number
//! ```
//!
//! Any missing line or unparsable number is fatal: there is no safe default for a
//! caller's time budget or emulation.
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use thiserror::Error;
use tokio::fs;

use super::session::{CommType, Emulation, SessionDescriptor, TermSize};
use crate::logutil::escape_log;

/// File name looked up when the door is pointed at a directory.
pub const DROP_FILE_NAME: &str = "door32.sys";

const FIELD_COUNT: usize = 11;

#[derive(Debug, Error)]
pub enum DropFileError {
    #[error("failed to read drop file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("drop file is missing line {line} ({field})")]
    MissingField { line: usize, field: &'static str },

    #[error("drop file line {line} ({field}) is not a number: {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Raw DOOR32.SYS contents, before terminal size is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Door32 {
    pub comm_type: CommType,
    pub comm_handle: u64,
    pub baud_rate: u64,
    pub bbs_id: String,
    pub user_record: u32,
    pub real_name: String,
    pub alias: String,
    pub security_level: u32,
    pub time_left_minutes: u32,
    pub emulation: Emulation,
    pub node: u32,
}

impl Door32 {
    /// Parse drop-file text. Accepts CRLF or LF line endings and ignores anything
    /// after line 11 (some BBSes append extra fields).
    pub fn parse(content: &str) -> Result<Self, DropFileError> {
        let lines: Vec<&str> = content
            .lines()
            .map(|l| l.trim_end_matches('\r').trim())
            .collect();

        let text = |line: usize, field: &'static str| -> Result<String, DropFileError> {
            lines
                .get(line - 1)
                .map(|s| s.to_string())
                .ok_or(DropFileError::MissingField { line, field })
        };
        let number = |line: usize, field: &'static str| -> Result<u64, DropFileError> {
            let raw = text(line, field)?;
            raw.parse::<u64>().map_err(|_| DropFileError::InvalidNumber {
                line,
                field,
                value: raw,
            })
        };
        let small = |line: usize, field: &'static str| -> Result<u32, DropFileError> {
            let value = number(line, field)?;
            u32::try_from(value).map_err(|_| DropFileError::InvalidNumber {
                line,
                field,
                value: value.to_string(),
            })
        };

        if lines.len() < FIELD_COUNT {
            // Report the first absent line rather than a generic short-file error.
            let field = FIELD_NAMES[lines.len()];
            return Err(DropFileError::MissingField {
                line: lines.len() + 1,
                field,
            });
        }

        Ok(Door32 {
            comm_type: CommType::from_code(small(1, FIELD_NAMES[0])?),
            comm_handle: number(2, FIELD_NAMES[1])?,
            baud_rate: number(3, FIELD_NAMES[2])?,
            bbs_id: text(4, FIELD_NAMES[3])?,
            user_record: small(5, FIELD_NAMES[4])?,
            real_name: text(6, FIELD_NAMES[5])?,
            alias: text(7, FIELD_NAMES[6])?,
            security_level: small(8, FIELD_NAMES[7])?,
            time_left_minutes: small(9, FIELD_NAMES[8])?,
            emulation: Emulation::from_code(small(10, FIELD_NAMES[9])?),
            node: small(11, FIELD_NAMES[10])?,
        })
    }

    /// Combine the drop file with the terminal size into the session descriptor.
    pub fn into_descriptor(self, size: TermSize, min_modal: TermSize) -> SessionDescriptor {
        SessionDescriptor::builder(self.alias)
            .real_name(self.real_name)
            .node(self.node)
            .emulation(self.emulation)
            .time_left(Duration::from_secs(u64::from(self.time_left_minutes) * 60))
            .comm(self.comm_type, self.comm_handle, self.baud_rate)
            .bbs_id(self.bbs_id)
            .user_record(self.user_record)
            .security_level(self.security_level)
            .min_modal(min_modal)
            .size(size)
            .build()
    }
}

const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "comm type",
    "comm handle",
    "baud rate",
    "bbs id",
    "user record",
    "real name",
    "alias",
    "security level",
    "time left",
    "emulation",
    "node number",
];

/// Resolve the `--path` argument: a directory means `door32.sys` inside it (either
/// case), anything else is taken as the drop file itself.
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        let lower = path.join(DROP_FILE_NAME);
        if lower.exists() {
            return lower;
        }
        let upper = path.join(DROP_FILE_NAME.to_uppercase());
        if upper.exists() {
            return upper;
        }
        lower
    } else {
        path.to_path_buf()
    }
}

/// Read and parse the drop file at `path` (file or directory).
pub async fn load(path: &Path) -> Result<Door32, DropFileError> {
    let file = resolve_path(path);
    let bytes = fs::read(&file).await.map_err(|source| DropFileError::Io {
        path: file.clone(),
        source,
    })?;
    // Drop files written by DOS-era BBSes are CP437; keep whatever decodes.
    let content = String::from_utf8_lossy(&bytes);
    let door = Door32::parse(&content)?;
    debug!(
        "drop file {} parsed: alias={} node={} emulation={} time_left={}m",
        file.display(),
        escape_log(&door.alias),
        door.node,
        door.emulation,
        door.time_left_minutes
    );
    Ok(door)
}
