//! Decision Log Sinks
//!
//! One [`DecisionRecord`] per step, appended as a flat structured record.
//! Persistence beyond the sink (shipping, rotation, metrics backends) is an
//! external concern.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::adaptation::record::DecisionRecord;

/// A destination for decision records
pub trait DecisionSink {
    /// Append one record
    fn append(&mut self, record: &DecisionRecord) -> crate::Result<()>;
}

/// File-backed sink writing one JSON object per line
#[derive(Debug)]
pub struct JsonlDecisionLog {
    path: PathBuf,
}

impl JsonlDecisionLog {
    /// Create a sink appending to the given path (parent directories are
    /// created on first write)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this sink appends to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all records back from a JSONL file, for audits and replay
    pub fn load(path: &Path) -> crate::Result<Vec<DecisionRecord>> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}

impl DecisionSink for JsonlDecisionLog {
    fn append(&mut self, record: &DecisionRecord) -> crate::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

/// In-memory sink for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryDecisionLog {
    records: Vec<DecisionRecord>,
}

impl MemoryDecisionLog {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Records appended so far, oldest first
    pub fn records(&self) -> &[DecisionRecord] {
        &self.records
    }
}

impl DecisionSink for MemoryDecisionLog {
    fn append(&mut self, record: &DecisionRecord) -> crate::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{Persona, Stability};
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(action: i64) -> DecisionRecord {
        DecisionRecord {
            timestamp: Utc::now(),
            session: None,
            persona_raw: Persona::Intermediate,
            persona_final: Persona::Intermediate,
            confidence: 0.7,
            stability: Stability::Stable,
            stability_fraction: 1.0,
            action,
            service_error: false,
        }
    }

    #[test]
    fn test_jsonl_append_and_load_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("decisions.jsonl");

        let mut sink = JsonlDecisionLog::new(&path);
        sink.append(&record(1)).unwrap();
        sink.append(&record(2)).unwrap();

        let loaded = JsonlDecisionLog::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].action, 1);
        assert_eq!(loaded[1].action, 2);
    }

    #[test]
    fn test_jsonl_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("logs").join("d.jsonl");

        let mut sink = JsonlDecisionLog::new(&path);
        sink.append(&record(3)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_jsonl_is_one_record_per_line() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("d.jsonl");

        let mut sink = JsonlDecisionLog::new(&path);
        sink.append(&record(1)).unwrap();
        sink.append(&record(2)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        for line in content.lines() {
            assert!(serde_json::from_str::<DecisionRecord>(line).is_ok());
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = JsonlDecisionLog::load(Path::new("/tmp/nonexistent_decisions_12345.jsonl"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let mut sink = MemoryDecisionLog::new();
        sink.append(&record(1)).unwrap();
        sink.append(&record(2)).unwrap();
        assert_eq!(sink.records().len(), 2);
        assert_eq!(sink.records()[0].action, 1);
        assert_eq!(sink.records()[1].action, 2);
    }
}
