//! Loads the buffer definitions of a shader from a TOML document so hosts and
//! the command line can feed the resolver without running the directive
//! parser. Validation mirrors what the parser guarantees for well-formed
//! directives and reports anything else as readable issues.
//!
//! Types:
//!
//! - `DocumentError` classifies missing files, TOML errors, and I/O failures.
//! - `ShaderDocument` is the ordered list of buffers plus the path it was read
//!   from, which relative texture paths are anchored to.
//!
//! Functions:
//!
//! - `ShaderDocument::load` reads and parses a document from disk. It does not
//!   validate; callers decide what to do with the issues.
//! - `ShaderDocument::validate` returns every issue found instead of stopping
//!   at the first one.
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::definition::{BufferDefinition, CHANNEL_COUNT};
use crate::path::PathResolver;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("shader document not found at {0}")]
    Missing(PathBuf),

    #[error("failed to parse shader document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ShaderDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "buffer")]
    pub buffers: Vec<BufferDefinition>,
    #[serde(skip)]
    path: PathBuf,
}

impl ShaderDocument {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DocumentError::Missing(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path)?;
        let mut document = Self::from_toml_str(&raw)?;
        document.path = path.to_path_buf();
        tracing::debug!(
            path = %path.display(),
            buffers = document.buffers.len(),
            "loaded shader document"
        );
        Ok(document)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, DocumentError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolver for texture paths written relative to this document.
    pub fn path_resolver(&self) -> PathResolver {
        PathResolver::for_document(&self.path)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.buffers.is_empty() {
            issues.push("document must declare at least one buffer".to_string());
        }

        for (index, buffer) in self.buffers.iter().enumerate() {
            let mut seen = BTreeSet::new();
            for input in &buffer.texture_inputs {
                if input.channel >= CHANNEL_COUNT {
                    issues.push(format!(
                        "buffer '{}' uses channel {} which exceeds the channel limit",
                        buffer.name, input.channel
                    ));
                }
                if !seen.insert(input.channel) {
                    issues.push(format!(
                        "buffer '{}' binds channel {} more than once",
                        buffer.name, input.channel
                    ));
                }
                if let Some(target) = input.buffer_index {
                    if target >= self.buffers.len() {
                        issues.push(format!(
                            "buffer '{}' references buffer {} which is undefined",
                            buffer.name, target
                        ));
                    } else if target == index {
                        issues.push(format!(
                            "buffer '{}' references itself on channel {}; use uses_self",
                            buffer.name, input.channel
                        ));
                    }
                }
            }
            if buffer.uses_self && buffer.self_channel >= CHANNEL_COUNT {
                issues.push(format!(
                    "buffer '{}' feeds back into channel {} which exceeds the channel limit",
                    buffer.name, buffer.self_channel
                ));
            }
        }
        issues
    }
}
