//! JSONL session event log
//!
//! One JSON object per line, appended to the file named by
//! `BLOCKFALL_LOG_PATH`. Logging is best effort: the first write failure is
//! reported on stderr and the log switches itself off, the game keeps going.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::session::Statistics;
use crate::types::{GameAction, PieceKind};

/// Something a session did that is worth recording
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    GameStarted {
        best_score: u32,
    },
    PieceLocked {
        piece: Option<PieceKind>,
        lines_cleared: u32,
        points: u32,
        score: u32,
        level: u32,
    },
    /// Hard drop pressed while disabled in settings
    ActionIgnored {
        action: GameAction,
    },
    Paused,
    Resumed,
    GameOver {
        block_out: bool,
        stats: Statistics,
    },
}

#[derive(Serialize)]
struct Record<'a> {
    seq: u64,
    #[serde(flatten)]
    event: &'a SessionEvent,
}

pub struct EventLog {
    writer: Option<BufWriter<File>>,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog {
    /// A log that drops everything
    pub fn disabled() -> Self {
        Self {
            writer: None,
            seq: 0,
            buf: Vec::new(),
        }
    }

    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            seq: 0,
            buf: Vec::with_capacity(256),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Number of records written so far
    pub fn written(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, event: &SessionEvent) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        self.buf.clear();
        let record = Record {
            seq: self.seq,
            event,
        };
        if let Err(e) = serde_json::to_writer(&mut self.buf, &record) {
            eprintln!("[EventLog] skipping unserializable event: {}", e);
            return;
        }
        self.buf.push(b'\n');

        let written = writer.write_all(&self.buf).and_then(|_| writer.flush());
        if let Err(e) = written {
            eprintln!("[EventLog] write failed, disabling log: {}", e);
            self.writer = None;
            return;
        }
        self.seq += 1;
    }
}
