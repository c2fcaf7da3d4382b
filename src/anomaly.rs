//! Non-fatal parsing irregularities.
//!
//! The parser never aborts on a bad line. Anything it had to skip, reinterpret
//! or drop is recorded as an [`Anomaly`] and returned next to the records,
//! so the caller decides whether to log, surface or ignore it.

use serde::{Deserialize, Serialize};

/// Kind of irregularity encountered while parsing or analysing a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Line starts like a header (date and time) but is not a valid header.
    /// It was kept as continuation text.
    UnparsableHeaderLine,
    /// Continuation line with no open message. It was dropped.
    OrphanContinuationLine,
    /// Header whose date/time matched no supported format. The message was dropped.
    InvalidTimestamp,
    /// Header with no message text and no continuation. The message was dropped.
    EmptyBody,
    /// The whole input produced no valid message.
    EmptyInput,
}

impl AnomalyKind {
    /// Short human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            AnomalyKind::UnparsableHeaderLine => "malformed header treated as text",
            AnomalyKind::OrphanContinuationLine => "text before the first message dropped",
            AnomalyKind::InvalidTimestamp => "message with invalid date/time dropped",
            AnomalyKind::EmptyBody => "message with empty text dropped",
            AnomalyKind::EmptyInput => "no valid messages found",
        }
    }
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// One recorded irregularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    /// 1-based line number in the input; `0` when not tied to a line.
    pub line: usize,
    /// What went wrong.
    pub kind: AnomalyKind,
    /// The offending input line, verbatim. For header problems this is the full
    /// header line, not just its date/time fields.
    pub raw: String,
}

impl Anomaly {
    /// Creates an anomaly.
    pub fn new(line: usize, kind: AnomalyKind, raw: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            raw: raw.into(),
        }
    }
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "line {}: {}: {}", self.line, self.kind, self.raw)
        }
    }
}

/// Counts anomalies of one kind.
pub fn count_kind(anomalies: &[Anomaly], kind: AnomalyKind) -> usize {
    anomalies.iter().filter(|a| a.kind == kind).count()
}
