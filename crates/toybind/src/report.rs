use std::io::Write;
use std::sync::Mutex;

use binder::{DiagnosticBatch, DiagnosticSink, Severity, SinkError};

/// Prints diagnostics to stderr as `file:line: severity: message` and keeps
/// count of what it printed.
#[derive(Debug, Default)]
pub struct TerminalSink {
    counts: Mutex<(usize, usize)>,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of (error, warning) diagnostics printed so far.
    pub fn counts(&self) -> (usize, usize) {
        self.counts.lock().map(|counts| *counts).unwrap_or_default()
    }
}

impl DiagnosticSink for TerminalSink {
    fn emit(&self, batch: DiagnosticBatch, severity: Severity) -> Result<(), SinkError> {
        let label = match severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        let mut stderr = std::io::stderr().lock();
        for diagnostic in &batch.diagnostics {
            // Diagnostic lines are 0-based; editors and terminals count from 1.
            writeln!(
                stderr,
                "{}:{}: {label}: {}",
                batch.filename,
                diagnostic.line + 1,
                diagnostic.message
            )
            .map_err(|error| SinkError::Rejected(error.to_string()))?;
        }

        let mut counts = self
            .counts
            .lock()
            .map_err(|_| SinkError::Rejected("terminal sink lock poisoned".to_string()))?;
        match severity {
            Severity::Error => counts.0 += batch.diagnostics.len(),
            Severity::Warning => counts.1 += batch.diagnostics.len(),
        }
        tracing::debug!(file = %batch.filename, severity = label, "printed diagnostics");
        Ok(())
    }
}
