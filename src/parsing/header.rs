//! Header-line grammars and the line classifier.
//!
//! A WhatsApp text export starts every message with a stamp like
//! `1/1/23, 10:00 am - Alice: Hello`. Lines that do not start a message
//! continue the previous one. Exports differ by phone locale and platform,
//! so headers are recognised by an ordered table of [`HeaderFormat`]s; the
//! first grammar whose pattern matches wins.
//!
//! Built-in grammars, in order:
//!
//! | Name | Example |
//! |------|---------|
//! | `day-first-12h` | `1/1/23, 10:00 am - Alice: Hello` / `01/01/2023, 9:05 PM - Bob: Hi` |
//! | `day-first-24h` | `15/01/2024, 21:05 - Alice: Hello` |
//! | `bracketed-12h` | `[1/1/23, 10:00:15 AM] Alice: Hello` |
//! | `dotted-24h` | `15.01.24, 21:05 - Alice: Hello` |
//!
//! Adding a grammar means adding a table entry; the classifier and parser
//! have no per-grammar branches.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ChatpulseError, Result};

/// Trailing `Sender: text` part shared by every built-in grammar.
///
/// The sender is the shortest non-empty run before a colon that is followed
/// by whitespace or by the end of the line.
const SENDER_AND_TEXT: &str = r"(.+?):(?:\s(.*))?$";

/// One header grammar.
///
/// `prefix` recognises only the date/time stamp; `header` recognises the
/// whole header line and must capture, in order: date, time, sender and
/// message start (the last group may be absent). A line matching `prefix`
/// but not `header` is reported as a malformed header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderFormat {
    /// Short identifier used in diagnostics.
    pub name: String,
    /// Pattern for the date/time stamp alone.
    pub prefix: String,
    /// Pattern for a complete header line.
    pub header: String,
    /// `chrono` formats tried, in order, on `"{date}, {time}"`.
    pub timestamp_formats: Vec<String>,
}

impl HeaderFormat {
    /// Creates a grammar whose header is `prefix` followed by `Sender: text`.
    pub fn new(name: impl Into<String>, prefix: impl Into<String>, timestamp_formats: &[&str]) -> Self {
        let prefix = prefix.into();
        let header = format!("{prefix}{SENDER_AND_TEXT}");
        Self {
            name: name.into(),
            prefix,
            header,
            timestamp_formats: timestamp_formats.iter().map(|f| (*f).to_string()).collect(),
        }
    }

    /// Returns the built-in grammar table.
    pub fn builtin() -> Vec<HeaderFormat> {
        vec![
            // 1/1/23, 10:00 am - Alice: Hello
            HeaderFormat::new(
                "day-first-12h",
                r"^(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}\s?[aApP][mM])\s[-\x{2013}]\s",
                &["%d/%m/%y, %I:%M %p", "%d/%m/%Y, %I:%M %p"],
            ),
            // 15/01/2024, 21:05 - Alice: Hello
            HeaderFormat::new(
                "day-first-24h",
                r"^(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?)\s[-\x{2013}]\s",
                &[
                    "%d/%m/%y, %H:%M",
                    "%d/%m/%Y, %H:%M",
                    "%d/%m/%y, %H:%M:%S",
                    "%d/%m/%Y, %H:%M:%S",
                ],
            ),
            // [1/1/23, 10:00:15 AM] Alice: Hello
            HeaderFormat::new(
                "bracketed-12h",
                r"^\[(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?\s?[aApP][mM])\]\s",
                &[
                    "%d/%m/%y, %I:%M:%S %p",
                    "%d/%m/%y, %I:%M %p",
                    "%d/%m/%Y, %I:%M:%S %p",
                    "%d/%m/%Y, %I:%M %p",
                ],
            ),
            // 15.01.24, 21:05 - Alice: Hello
            HeaderFormat::new(
                "dotted-24h",
                r"^(\d{1,2}\.\d{1,2}\.\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?)\s[-\x{2013}]\s",
                &[
                    "%d.%m.%y, %H:%M",
                    "%d.%m.%Y, %H:%M",
                    "%d.%m.%y, %H:%M:%S",
                    "%d.%m.%Y, %H:%M:%S",
                ],
            ),
        ]
    }
}

/// Captured parts of a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    /// Index of the matching grammar in the classifier's table.
    pub format: usize,
    /// Date text, e.g. `1/1/23`.
    pub date: &'a str,
    /// Time text, e.g. `10:00 am`.
    pub time: &'a str,
    /// Sender token, trimmed.
    pub sender: &'a str,
    /// Message start, trimmed (may be empty).
    pub text: &'a str,
}

/// Classification of one raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// The line starts a new message.
    Header(HeaderLine<'a>),
    /// The line continues the previous message.
    ///
    /// `malformed_header` is set when the line carries a date/time stamp
    /// but failed full header validation (e.g. no colon after the sender).
    Continuation {
        /// Line looked like a header but was not one.
        malformed_header: bool,
    },
}

impl LineKind<'_> {
    /// Returns `true` for header lines.
    pub fn is_header(&self) -> bool {
        matches!(self, LineKind::Header(_))
    }
}

#[derive(Debug, Clone)]
struct CompiledFormat {
    grammar: HeaderFormat,
    prefix: Regex,
    header: Regex,
}

impl CompiledFormat {
    fn compile(grammar: &HeaderFormat) -> Result<Self> {
        let prefix =
            Regex::new(&grammar.prefix).map_err(|e| ChatpulseError::invalid_pattern(&grammar.name, e))?;
        let header =
            Regex::new(&grammar.header).map_err(|e| ChatpulseError::invalid_pattern(&grammar.name, e))?;

        // group 0 plus date, time, sender, text
        if header.captures_len() < 5 {
            return Err(ChatpulseError::invalid_format(
                "header",
                format!(
                    "grammar '{}' must capture date, time, sender and message text",
                    grammar.name
                ),
            ));
        }

        Ok(Self {
            grammar: grammar.clone(),
            prefix,
            header,
        })
    }
}

static BUILTIN: LazyLock<LineClassifier> = LazyLock::new(|| {
    LineClassifier::new(&HeaderFormat::builtin()).expect("built-in header grammars compile")
});

/// Decides, line by line, whether a message starts or continues.
///
/// Never fails on input: any line that is not a header is a continuation.
///
/// ```
/// use chatpulse::parsing::{LineClassifier, LineKind};
///
/// let classifier = LineClassifier::builtin();
/// match classifier.classify("1/1/23, 10:00 am - Alice: Hello") {
///     LineKind::Header(h) => {
///         assert_eq!(h.sender, "Alice");
///         assert_eq!(h.text, "Hello");
///     }
///     LineKind::Continuation { .. } => unreachable!(),
/// }
/// assert!(!classifier.classify("world").is_header());
/// ```
#[derive(Debug, Clone)]
pub struct LineClassifier {
    formats: Vec<CompiledFormat>,
}

impl LineClassifier {
    /// Compiles a classifier from an ordered grammar table.
    pub fn new(formats: &[HeaderFormat]) -> Result<Self> {
        let formats = formats
            .iter()
            .map(CompiledFormat::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { formats })
    }

    /// Returns a classifier for the built-in grammar table.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Returns the grammar table in match order.
    pub fn formats(&self) -> impl Iterator<Item = &HeaderFormat> {
        self.formats.iter().map(|f| &f.grammar)
    }

    /// Classifies one raw line.
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        for (index, format) in self.formats.iter().enumerate() {
            let Some(caps) = format.header.captures(line) else {
                continue;
            };

            let date = caps.get(1).map_or("", |m| m.as_str());
            let time = caps.get(2).map_or("", |m| m.as_str());
            let sender = caps.get(3).map_or("", |m| m.as_str().trim());
            let text = caps.get(4).map_or("", |m| m.as_str().trim());

            if sender.is_empty() {
                continue;
            }

            return LineKind::Header(HeaderLine {
                format: index,
                date,
                time,
                sender,
                text,
            });
        }

        let malformed_header = self.formats.iter().any(|f| f.prefix.is_match(line));
        LineKind::Continuation { malformed_header }
    }

    /// Returns `true` if the line starts a new message.
    pub fn is_header(&self, line: &str) -> bool {
        self.classify(line).is_header()
    }

    /// Resolves a header's date and time.
    ///
    /// The matching grammar's formats are tried first, then every other
    /// grammar's. Returns `None` if no supported format accepts the text,
    /// including impossible dates such as `31/02/23`.
    pub fn parse_timestamp(&self, header: &HeaderLine<'_>) -> Option<NaiveDateTime> {
        let stamp = format!("{}, {}", header.date, normalize_time(header.time));

        let own = self.formats.get(header.format).into_iter();
        let others = self
            .formats
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != header.format)
            .map(|(_, f)| f);

        own.chain(others)
            .flat_map(|f| f.grammar.timestamp_formats.iter())
            .find_map(|fmt| NaiveDateTime::parse_from_str(&stamp, fmt).ok())
    }
}

/// Canonicalises a time string for `chrono`.
///
/// Collapses whitespace (including NBSP and narrow NBSP) to single spaces
/// and inserts the space `%p` expects before a trailing am/pm marker.
fn normalize_time(time: &str) -> String {
    let collapsed = time.split_whitespace().collect::<Vec<_>>().join(" ");
    let lower = collapsed.to_ascii_lowercase();

    if (lower.ends_with("am") || lower.ends_with("pm")) && collapsed.len() > 2 {
        let (clock, marker) = collapsed.split_at(collapsed.len() - 2);
        let clock = clock.trim_end();
        return format!("{clock} {marker}");
    }

    collapsed
}
