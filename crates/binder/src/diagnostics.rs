//! Line-anchored diagnostics and the sinks that carry them to whatever shows
//! them to the author. The resolver only produces values; publishing goes
//! through a `DiagnosticSink` so editors, terminals, and tests can plug in.
use std::sync::Mutex;

use crossbeam_channel::{Receiver, Sender};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: u32,
    pub message: String,
}

/// Messages for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticBatch {
    pub filename: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBatch {
    pub fn single(filename: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            diagnostics: vec![Diagnostic {
                line,
                message: message.into(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    pub severity: Severity,
    pub batch: DiagnosticBatch,
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("diagnostic sink is disconnected")]
    Disconnected,
    #[error("diagnostic sink rejected batch: {0}")]
    Rejected(String),
}

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, batch: DiagnosticBatch, severity: Severity) -> Result<(), SinkError>;
}

/// Keeps every report in memory, in emission order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    reports: Mutex<Vec<DiagnosticReport>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<DiagnosticReport> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }

    pub fn take(&self) -> Vec<DiagnosticReport> {
        self.reports
            .lock()
            .map(|mut reports| std::mem::take(&mut *reports))
            .unwrap_or_default()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, batch: DiagnosticBatch, severity: Severity) -> Result<(), SinkError> {
        let mut reports = self
            .reports
            .lock()
            .map_err(|_| SinkError::Rejected("collector lock poisoned".to_string()))?;
        reports.push(DiagnosticReport { severity, batch });
        Ok(())
    }
}

/// Forwards reports across threads, e.g. from texture loader callbacks to the
/// thread that owns the editor connection.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<DiagnosticReport>,
}

impl ChannelSink {
    pub fn unbounded() -> (Self, Receiver<DiagnosticReport>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self { sender }, receiver)
    }
}

impl DiagnosticSink for ChannelSink {
    fn emit(&self, batch: DiagnosticBatch, severity: Severity) -> Result<(), SinkError> {
        self.sender
            .send(DiagnosticReport { severity, batch })
            .map_err(|_| SinkError::Disconnected)
    }
}
