//! Post-load validation for textures whose size is only known once the
//! rendering runtime has decoded them. The resolver registers one `LoadCheck`
//! per loaded channel; the runtime completes it with the measured size, which
//! may raise a non-power-of-two warning against the lines that declared custom
//! sampler settings.
//!
//! Types:
//!
//! - `LoadCheck` is a one-shot continuation. `complete` consumes it, so a check
//!   cannot fire twice.
//! - `PendingChecks` indexes checks by `BindingId` for runtimes that look them
//!   up from load callbacks.
use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::diagnostics::{Diagnostic, DiagnosticBatch, DiagnosticSink, Severity};
use crate::ops::{BindingId, ChannelResolution};

pub const NON_POWER_OF_TWO_WARNING: &str =
    "Texture is not power of two, custom texture settings may not work.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadCheck {
    id: BindingId,
    filename: String,
    lines: Vec<u32>,
}

impl LoadCheck {
    pub(crate) fn new(id: BindingId, filename: String, lines: Vec<u32>) -> Self {
        Self {
            id,
            filename,
            lines,
        }
    }

    pub fn id(&self) -> BindingId {
        self.id
    }

    /// Lines of the custom sampler settings a warning would point at.
    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    /// Warning batch for a texture of the given size, if one is due.
    pub fn warning_for(&self, width: u32, height: u32) -> Option<DiagnosticBatch> {
        if self.lines.is_empty() || (width.is_power_of_two() && height.is_power_of_two()) {
            return None;
        }
        Some(DiagnosticBatch {
            filename: self.filename.clone(),
            diagnostics: self
                .lines
                .iter()
                .map(|&line| Diagnostic {
                    line,
                    message: NON_POWER_OF_TWO_WARNING.to_string(),
                })
                .collect(),
        })
    }

    /// Reports the loaded size. Sink failures are logged and dropped.
    pub fn complete(
        self,
        width: u32,
        height: u32,
        sink: &dyn DiagnosticSink,
    ) -> ChannelResolution {
        if let Some(batch) = self.warning_for(width, height) {
            if let Err(error) = sink.emit(batch, Severity::Warning) {
                warn!(
                    buffer = self.id.buffer,
                    channel = self.id.channel,
                    error = %error,
                    "failed to deliver texture size warning"
                );
            }
        }
        ChannelResolution {
            width,
            height,
            depth: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChecks {
    checks: BTreeMap<BindingId, LoadCheck>,
}

impl PendingChecks {
    /// Registers `check`, replacing any earlier check for the same binding.
    pub(crate) fn register(&mut self, check: LoadCheck) {
        let id = check.id;
        if let Some(replaced) = self.checks.insert(id, check) {
            debug!(
                buffer = id.buffer,
                channel = id.channel,
                lines = ?replaced.lines,
                "replaced pending load check for rebound channel"
            );
        }
    }

    /// Removes the check for `id`; later calls return `None`.
    pub fn take(&mut self, id: BindingId) -> Option<LoadCheck> {
        self.checks.remove(&id)
    }

    pub fn get(&self, id: BindingId) -> Option<&LoadCheck> {
        self.checks.get(&id)
    }

    pub fn complete(
        &mut self,
        id: BindingId,
        width: u32,
        height: u32,
        sink: &dyn DiagnosticSink,
    ) -> Option<ChannelResolution> {
        self.take(id).map(|check| check.complete(width, height, sink))
    }

    /// Bindings still waiting for their texture, in buffer then channel order.
    pub fn ids(&self) -> impl Iterator<Item = BindingId> + '_ {
        self.checks.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl IntoIterator for PendingChecks {
    type Item = LoadCheck;
    type IntoIter = std::collections::btree_map::IntoValues<BindingId, LoadCheck>;

    fn into_iter(self) -> Self::IntoIter {
        self.checks.into_values()
    }
}
