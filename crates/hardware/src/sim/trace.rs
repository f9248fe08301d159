//! Memory access trace loading and generation.
//!
//! Traces are plain text, one access per line:
//!
//! ```text
//! # kind  address     [pc]
//! R       0x80001000  0x400120
//! W       0x80001040
//! 0x80001080
//! ```
//!
//! The kind is one of `R`/`L` (read) or `W`/`S` (write) and may be omitted.
//! Numbers are hex with a `0x` prefix or decimal. Blank lines and text after
//! `#` are ignored.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::common::error::TraceError;

/// Direction of a traced access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessKind {
    /// Load.
    #[default]
    Read,
    /// Store.
    Write,
}

impl AccessKind {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "R" | "r" | "L" | "l" => Some(Self::Read),
            "W" | "w" | "S" | "s" => Some(Self::Write),
            _ => None,
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "R"),
            Self::Write => write!(f, "W"),
        }
    }
}

/// One access from a trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceRecord {
    /// Read or write.
    pub kind: AccessKind,
    /// Accessed byte address.
    pub addr: u64,
    /// Program counter, 0 when the trace does not carry one.
    pub pc: u64,
}

impl TraceRecord {
    /// A read of `addr` with no program counter.
    pub const fn read(addr: u64) -> Self {
        Self {
            kind: AccessKind::Read,
            addr,
            pc: 0,
        }
    }
}

fn parse_number(token: &str) -> Option<u64> {
    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        u64::from_str_radix(&hex.replace('_', ""), 16).ok()
    } else {
        token.replace('_', "").parse().ok()
    }
}

/// Parses one trace line.
///
/// # Returns
///
/// `Ok(None)` for blank and comment-only lines.
fn parse_line(line_no: usize, raw: &str) -> Result<Option<TraceRecord>, TraceError> {
    let text = raw.split('#').next().unwrap_or("").trim();
    if text.is_empty() {
        return Ok(None);
    }

    let malformed = || TraceError::Malformed {
        line: line_no,
        text: text.to_string(),
    };

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let starts_numeric = tokens[0].starts_with(|c: char| c.is_ascii_digit());
    let (kind, rest) = if starts_numeric {
        (AccessKind::Read, &tokens[..])
    } else {
        let kind = AccessKind::parse(tokens[0]).ok_or_else(|| TraceError::UnknownKind {
            line: line_no,
            kind: tokens[0].to_string(),
        })?;
        (kind, &tokens[1..])
    };

    let (addr, pc) = match rest {
        [addr] => (parse_number(addr).ok_or_else(malformed)?, 0),
        [addr, pc] => (
            parse_number(addr).ok_or_else(malformed)?,
            parse_number(pc).ok_or_else(malformed)?,
        ),
        _ => return Err(malformed()),
    };

    Ok(Some(TraceRecord { kind, addr, pc }))
}

/// Parses a whole trace from a reader.
///
/// # Errors
///
/// Returns the first I/O failure or malformed line.
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<TraceRecord>, TraceError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        if let Some(record) = parse_line(idx + 1, &line?)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Opens and parses a trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be opened or read, and the
/// parse errors of [`parse_trace`].
pub fn load_trace(path: &Path) -> Result<Vec<TraceRecord>, TraceError> {
    let file = File::open(path)?;
    parse_trace(BufReader::new(file))
}

/// Writes records in the text trace format.
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_trace<W: Write>(mut writer: W, records: &[TraceRecord]) -> std::io::Result<()> {
    for record in records {
        if record.pc == 0 {
            writeln!(writer, "{} {:#x}", record.kind, record.addr)?;
        } else {
            writeln!(writer, "{} {:#x} {:#x}", record.kind, record.addr, record.pc)?;
        }
    }
    writer.flush()
}

/// Generates a constant-stride read stream.
///
/// # Arguments
///
/// * `base` - Address of the first access.
/// * `stride_blocks` - Distance between consecutive accesses, in blocks.
/// * `count` - Number of accesses.
/// * `block_size` - Block size in bytes.
pub fn stride_trace(base: u64, stride_blocks: u64, count: usize, block_size: u64) -> Vec<TraceRecord> {
    let step = stride_blocks.wrapping_mul(block_size);
    (0..count as u64)
        .map(|k| TraceRecord::read(base.wrapping_add(k.wrapping_mul(step))))
        .collect()
}
