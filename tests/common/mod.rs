#![allow(dead_code)]

use std::{collections::HashSet, sync::Mutex};

use logcat::{PlatformSink, Severity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub severity: Severity,
    pub tag: String,
    pub message: String,
}

/// Sink whose loggability answer is scripted per `(tag, severity)` and which
/// keeps every write.
#[derive(Default)]
pub struct RecordingSink {
    loggable: HashSet<(String, Severity)>,
    records: Mutex<Vec<Record>>,
}

impl RecordingSink {
    pub fn rejecting_all() -> Self {
        Self::default()
    }

    pub fn accepting(pairs: &[(&str, Severity)]) -> Self {
        Self {
            loggable: pairs.iter().map(|(t, s)| (t.to_string(), *s)).collect(),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }
}

impl PlatformSink for RecordingSink {
    fn is_loggable(&self, tag: &str, severity: Severity) -> bool {
        self.loggable.contains(&(tag.to_string(), severity))
    }

    fn write(&self, severity: Severity, tag: &str, message: &str) {
        self.records.lock().unwrap().push(Record {
            severity,
            tag: tag.to_string(),
            message: message.to_string(),
        });
    }
}
