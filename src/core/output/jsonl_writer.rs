//! JSON Lines (JSONL) output writer.
//!
//! One message per line, oldest first. Messages sharing a timestamp keep
//! their order of appearance in the log.

use std::fs::File;
use std::io::{BufWriter, Write};

use serde::Serialize;

use crate::MessageRecord;
use crate::message::sort_chronologically;
use crate::category::Category;
use crate::error::Result;
use crate::pipeline::Analysis;

use super::OutputConfig;

/// Minimal message structure for JSONL output.
#[derive(Serialize)]
struct JsonlMessage<'a> {
    timestamp: String,
    sender: &'a str,
    category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
}

impl<'a> JsonlMessage<'a> {
    fn from_record(record: &'a MessageRecord, config: &OutputConfig) -> Self {
        Self {
            timestamp: record.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            sender: &record.sender_raw,
            category: record.category,
            body: config.include_body.then_some(record.body.as_str()),
        }
    }
}

/// Writes the analysed messages to JSONL (JSON Lines) format.
pub fn write_jsonl(analysis: &Analysis, output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(analysis, &mut writer, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts the analysed messages to a JSONL string.
pub fn to_jsonl(analysis: &Analysis, config: &OutputConfig) -> Result<String> {
    let mut out = Vec::new();
    write_lines(analysis, &mut out, config)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn write_lines<W: Write>(analysis: &Analysis, writer: &mut W, config: &OutputConfig) -> Result<()> {
    let mut records: Vec<&MessageRecord> = analysis.records.iter().collect();
    sort_chronologically(&mut records);

    for record in records {
        let line = serde_json::to_string(&JsonlMessage::from_record(record, config))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analyze;
    use serde_json::Value;
    use std::io::{BufRead, BufReader};
    use tempfile::NamedTempFile;

    const LOG: &str = "1/1/23, 10:00 am - Alice: Hello\nworld\n2/1/23, 9:00 pm - +4412345: Hi";

    #[test]
    fn test_write_jsonl_basic() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        write_jsonl(&analyze(LOG), path, &OutputConfig::new()).unwrap();

        let file = std::fs::File::open(path).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["sender"], "Alice");
        assert_eq!(first["category"], "mentor");
        assert_eq!(first["timestamp"], "2023-01-01T10:00:00");
        assert!(first.get("body").is_none());

        let second: Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["category"], "student");
        assert_eq!(second["timestamp"], "2023-01-02T21:00:00");
    }

    #[test]
    fn test_to_jsonl_with_body() {
        let jsonl = to_jsonl(&analyze(LOG), &OutputConfig::new().with_body()).unwrap();
        let first: Value = serde_json::from_str(jsonl.lines().next().unwrap()).unwrap();
        assert_eq!(first["body"], "Hello world");
    }

    #[test]
    fn test_to_jsonl_is_chronological() {
        let log = "\
3/1/23, 9:00 am - Alice: third
1/1/23, 9:00 am - +4412345: first
1/1/23, 9:00 am - Alice: tied
2/1/23, 9:00 am - Alice: second";
        let analysis = analyze(log);
        let jsonl = to_jsonl(&analysis, &OutputConfig::new().with_body()).unwrap();

        let bodies: Vec<String> = jsonl
            .lines()
            .map(|l| serde_json::from_str::<Value>(l).unwrap()["body"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(bodies, ["first", "tied", "second", "third"]);
        assert_eq!(analysis.records[0].body(), "third");
    }

    #[test]
    fn test_to_jsonl_empty() {
        assert_eq!(to_jsonl(&analyze(""), &OutputConfig::new()).unwrap(), "");
    }
}
