//! Message parser: rebuilds structured records from raw chat-log lines.
//!
//! The parser walks the input once, holding at most one open message. A
//! header line commits the open message (if any) and opens a new one; a
//! continuation line is appended to the open message, or dropped as an
//! orphan when nothing is open. Timestamps are resolved when a message is
//! committed, and messages whose timestamp fails are dropped.
//!
//! Nothing in here fails on bad input: every irregularity becomes an
//! [`Anomaly`] in the returned [`ParseOutput`].
//!
//! # Example
//!
//! ```rust
//! use chatpulse::parser::parse;
//! use chatpulse::Category;
//!
//! let output = parse("1/1/23, 10:00 am - Alice: Hello\nworld");
//!
//! assert_eq!(output.records.len(), 1);
//! assert_eq!(output.records[0].body, "Hello world");
//! assert_eq!(output.records[0].category, Category::Mentor);
//! assert!(output.anomalies.is_empty());
//! ```

use std::fs;
use std::path::Path;

use crate::MessageRecord;
use crate::anomaly::{Anomaly, AnomalyKind};
use crate::category::{NameOrNumber, ParticipantClassifier};
use crate::config::ParserConfig;
use crate::error::{ChatpulseError, Result};
use crate::parsing::{HeaderLine, LineClassifier, LineKind};

/// Records and anomalies produced by one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutput {
    /// Valid records, in order of appearance in the input.
    pub records: Vec<MessageRecord>,
    /// Irregularities, ordered by line number.
    pub anomalies: Vec<Anomaly>,
}

impl ParseOutput {
    /// Returns `true` if the input parsed without any anomaly.
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Parses a chat log with the built-in grammars and default classifier.
pub fn parse(text: &str) -> ParseOutput {
    LogParser::new().parse_str(text)
}

/// Chat-log parser with a configurable grammar table and sender classifier.
///
/// # Example
///
/// ```rust
/// use chatpulse::parser::LogParser;
/// use chatpulse::category::{Category, NameOrNumber, Roster};
///
/// let parser = LogParser::new()
///     .with_classifier(Roster::new(NameOrNumber).with_student("Priya"));
///
/// let output = parser.parse_str("1/1/23, 10:00 am - Priya: Hi");
/// assert_eq!(output.records[0].category, Category::Student);
/// ```
#[derive(Debug, Clone)]
pub struct LogParser<C = NameOrNumber> {
    lines: LineClassifier,
    participants: C,
}

impl LogParser {
    /// Creates a parser with the built-in grammars and [`NameOrNumber`].
    pub fn new() -> Self {
        Self {
            lines: LineClassifier::builtin(),
            participants: NameOrNumber,
        }
    }

    /// Creates a parser from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidPattern`] if a grammar does not compile.
    pub fn with_config(config: &ParserConfig) -> Result<Self> {
        Ok(Self {
            lines: LineClassifier::new(&config.header_formats)?,
            participants: NameOrNumber,
        })
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ParticipantClassifier> LogParser<C> {
    /// Swaps the participant classifier.
    pub fn with_classifier<D: ParticipantClassifier>(self, participants: D) -> LogParser<D> {
        LogParser {
            lines: self.lines,
            participants,
        }
    }

    /// Returns the line classifier.
    pub fn line_classifier(&self) -> &LineClassifier {
        &self.lines
    }

    /// Returns the participant classifier.
    pub fn participant_classifier(&self) -> &C {
        &self.participants
    }

    /// Parses a complete chat log held in memory.
    pub fn parse_str(&self, text: &str) -> ParseOutput {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut assembler = Assembler::new(self);
        for (index, line) in text.lines().enumerate() {
            assembler.push(index + 1, line);
        }
        let output = assembler.finish();

        tracing::debug!(
            records = output.records.len(),
            anomalies = output.anomalies.len(),
            "parsed chat log"
        );

        output
    }

    /// Parses raw bytes, which must be UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::Utf8`] if the bytes are not valid UTF-8.
    pub fn parse_bytes(&self, bytes: Vec<u8>) -> Result<ParseOutput> {
        let text = String::from_utf8(bytes).map_err(|e| ChatpulseError::utf8("chat log", e))?;
        Ok(self.parse_str(&text))
    }

    /// Reads and parses a chat log file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::Io`] if the file cannot be read and
    /// [`ChatpulseError::Utf8`] if it is not UTF-8 text.
    pub fn parse_file(&self, path: &Path) -> Result<ParseOutput> {
        self.parse_bytes(fs::read(path)?)
    }
}

/// A message whose header has been seen but which is not committed yet.
struct OpenRecord<'a> {
    line: usize,
    raw: &'a str,
    header: HeaderLine<'a>,
    body: String,
}

enum State<'a> {
    NoOpenRecord,
    OpenRecord(OpenRecord<'a>),
}

/// Line-by-line state machine behind [`LogParser::parse_str`].
struct Assembler<'p, 'a, C> {
    parser: &'p LogParser<C>,
    state: State<'a>,
    output: ParseOutput,
}

impl<'p, 'a, C: ParticipantClassifier> Assembler<'p, 'a, C> {
    fn new(parser: &'p LogParser<C>) -> Self {
        Self {
            parser,
            state: State::NoOpenRecord,
            output: ParseOutput::default(),
        }
    }

    fn push(&mut self, line_no: usize, line: &'a str) {
        if line.trim().is_empty() {
            return;
        }

        match self.parser.lines.classify(line) {
            LineKind::Header(header) => {
                self.commit();
                self.state = State::OpenRecord(OpenRecord {
                    line: line_no,
                    raw: line,
                    header,
                    body: header.text.to_string(),
                });
            }
            LineKind::Continuation { malformed_header } => {
                if malformed_header {
                    self.report(line_no, AnomalyKind::UnparsableHeaderLine, line);
                }

                match &mut self.state {
                    State::OpenRecord(open) => {
                        if !open.body.is_empty() {
                            open.body.push(' ');
                        }
                        open.body.push_str(line.trim());
                    }
                    State::NoOpenRecord => {
                        self.report(line_no, AnomalyKind::OrphanContinuationLine, line);
                    }
                }
            }
        }
    }

    fn commit(&mut self) {
        let State::OpenRecord(open) = std::mem::replace(&mut self.state, State::NoOpenRecord)
        else {
            return;
        };

        let Some(timestamp) = self.parser.lines.parse_timestamp(&open.header) else {
            self.report(open.line, AnomalyKind::InvalidTimestamp, open.raw);
            return;
        };

        if open.body.is_empty() {
            self.report(open.line, AnomalyKind::EmptyBody, open.raw);
            return;
        }

        let category = self.parser.participants.classify(open.header.sender);
        self.output.records.push(MessageRecord::new(
            timestamp,
            open.header.sender,
            category,
            open.body,
        ));
    }

    fn report(&mut self, line: usize, kind: AnomalyKind, raw: &str) {
        tracing::debug!(line, kind = ?kind, raw, "chat log anomaly");
        self.output.anomalies.push(Anomaly::new(line, kind, raw));
    }

    fn finish(mut self) -> ParseOutput {
        self.commit();
        // commits report late; keep anomalies in input order
        self.output.anomalies.sort_by_key(|a| a.line);
        self.output
    }
}
