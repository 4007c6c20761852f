//! File-backed JSONL match journal with a SHA-256 hash chain.
//!
//! The file format is line-delimited JSON (`.jsonl`):
//! - Line 1: header with `format_version`, `build_id` and the match `config`.
//! - Lines 2+: one entry per simulated tick, optionally closed by a single
//!   abort entry. Each line carries `prev_sha256_hex` and `sha256_hex` so
//!   edits, reordering and deletions are detected on load.
//!
//! Every entry is flushed as soon as it is written, so a crashed session
//! still leaves a loadable prefix behind.

use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use lightcycle_core::journal::JOURNAL_FORMAT_VERSION;
use lightcycle_core::{DecisionJournal, MatchConfig, SteerRecord, TickRecord};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JournalEntry {
    Tick(TickRecord),
    /// The match was stopped from outside; closes the journal.
    Abort { trailing_steers: Vec<SteerRecord> },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct FileHeader {
    format_version: u16,
    build_id: String,
    config: MatchConfig,
}

/// Canonical hash input for one entry.
#[derive(Serialize)]
struct RecordBody<'a> {
    seq: u64,
    payload: &'a JournalEntry,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    payload: JournalEntry,
    prev_sha256_hex: String,
    sha256_hex: String,
}

const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// `hex(SHA-256(body_json || prev_sha256_hex))`
fn compute_record_sha256(body_json: &str, prev_sha256_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    format!("{:064x}", hasher.finalize())
}

pub struct JournalWriter {
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_seq: u64,
}

impl JournalWriter {
    /// Creates the file and writes the header line immediately.
    pub fn create(path: &Path, config: &MatchConfig, build_id: &str) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);

        let header = FileHeader {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: build_id.to_string(),
            config: config.clone(),
        };
        let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
        writeln!(writer, "{header_json}")?;
        writer.flush()?;

        Ok(Self { writer, last_sha256_hex: INITIAL_HASH.to_string(), next_seq: 0 })
    }

    pub fn append(&mut self, payload: &JournalEntry) -> io::Result<()> {
        let body = RecordBody { seq: self.next_seq, payload };
        let body_json = serde_json::to_string(&body).map_err(io::Error::other)?;
        let sha256_hex = compute_record_sha256(&body_json, &self.last_sha256_hex);

        let record = FileRecord {
            seq: self.next_seq,
            payload: payload.clone(),
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };
        let record_json = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(self.writer, "{record_json}")?;
        self.writer.flush()?;

        self.last_sha256_hex = sha256_hex;
        self.next_seq += 1;
        Ok(())
    }
}

/// Writes a complete in-memory journal to `path`.
pub fn save_journal(path: &Path, journal: &DecisionJournal, build_id: &str) -> io::Result<()> {
    let mut writer = JournalWriter::create(path, &journal.config, build_id)?;
    for record in &journal.ticks {
        writer.append(&JournalEntry::Tick(record.clone()))?;
    }
    if journal.aborted {
        writer.append(&JournalEntry::Abort { trailing_steers: journal.trailing_steers.clone() })?;
    }
    Ok(())
}

#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: DecisionJournal,
    pub build_id: String,
}

#[derive(Debug)]
pub enum JournalLoadError {
    Io(io::Error),
    EmptyFile,
    InvalidHeader { line: usize, message: String },
    InvalidRecord { line: usize, message: String },
    /// The file ended without a trailing newline.
    IncompleteLine { line: usize },
    HashChainBroken { line: usize },
}

impl fmt::Display for JournalLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "journal I/O error: {e}"),
            Self::EmptyFile => write!(f, "journal file is empty"),
            Self::InvalidHeader { line, message } => {
                write!(f, "invalid journal header at line {line}: {message}")
            }
            Self::InvalidRecord { line, message } => {
                write!(f, "invalid journal record at line {line}: {message}")
            }
            Self::IncompleteLine { line } => write!(f, "incomplete journal line at line {line}"),
            Self::HashChainBroken { line } => write!(f, "SHA-256 hash chain broken at line {line}"),
        }
    }
}

impl Error for JournalLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Loads and validates a JSONL journal, stopping at the first bad line.
pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let content = fs::read_to_string(path).map_err(JournalLoadError::Io)?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(JournalLoadError::EmptyFile);
    }
    if !content.ends_with('\n') {
        return Err(JournalLoadError::IncompleteLine { line: lines.len() });
    }

    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })?;
    if header.format_version != JOURNAL_FORMAT_VERSION {
        return Err(JournalLoadError::InvalidHeader {
            line: 1,
            message: format!("unsupported format version {}", header.format_version),
        });
    }

    let mut journal = DecisionJournal::new(header.config);
    let mut prev_sha256_hex = INITIAL_HASH.to_string();
    let mut next_seq: u64 = 0;

    for (line_index, line) in lines.iter().skip(1).enumerate() {
        let line_number = line_index + 2;
        let invalid =
            |message: String| JournalLoadError::InvalidRecord { line: line_number, message };

        if line.is_empty() {
            return Err(invalid("empty line".to_string()));
        }
        let record: FileRecord =
            serde_json::from_str(line).map_err(|e| invalid(e.to_string()))?;
        if record.seq != next_seq {
            return Err(invalid(format!("expected seq {next_seq}, found {}", record.seq)));
        }
        if record.prev_sha256_hex != prev_sha256_hex {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }
        let body = RecordBody { seq: record.seq, payload: &record.payload };
        let body_json = serde_json::to_string(&body).map_err(|e| invalid(e.to_string()))?;
        if record.sha256_hex != compute_record_sha256(&body_json, &prev_sha256_hex) {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        if journal.aborted {
            return Err(invalid("entry after abort".to_string()));
        }
        match record.payload {
            JournalEntry::Tick(tick) => {
                let expected = journal.ticks.len() as u64;
                if tick.tick != expected {
                    return Err(invalid(format!("expected tick {expected}, found {}", tick.tick)));
                }
                journal.ticks.push(tick);
            }
            JournalEntry::Abort { trailing_steers } => {
                journal.aborted = true;
                journal.trailing_steers = trailing_steers;
            }
        }

        prev_sha256_hex = record.sha256_hex;
        next_seq += 1;
    }

    Ok(LoadedJournal { journal, build_id: header.build_id })
}
