//! Anchors texture paths written in a shader document to the directory the
//! document lives in, so cube-map discovery and resource references see the
//! same file the author meant. `$VAR`, `${VAR}` and a leading `~` are expanded
//! first, matching how shell users write paths in directives.
//!
//! Types:
//!
//! - `PathResolver` remembers the base directory relative paths hang off.
//!
//! Functions:
//!
//! - `PathResolver::expand_path` performs variable and home expansion.
//! - `PathResolver::anchor` expands and then joins relative results onto the
//!   base directory.
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use directories_next::BaseDirs;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PathResolver {
    base: PathBuf,
}

impl PathResolver {
    pub fn with_base<P: Into<PathBuf>>(base: P) -> Self {
        Self { base: base.into() }
    }

    /// Resolver rooted at the directory containing `document`.
    pub fn for_document(document: &Path) -> Self {
        let base = document
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn expand_path(&self, input: &str) -> Result<PathBuf> {
        let expanded = expand_home(&expand_env_vars(input)?)?;
        let path = PathBuf::from(expanded);
        debug!(original = %input, expanded = %path.display(), "expanded texture path");
        Ok(path)
    }

    pub fn anchor(&self, input: &Path) -> Result<PathBuf> {
        let raw = input.to_string_lossy();
        if raw.is_empty() {
            bail!("texture path must not be empty");
        }
        let expanded = self.expand_path(&raw)?;
        if expanded.is_absolute() {
            return Ok(expanded);
        }
        let anchored = self.base.join(&expanded);
        debug!(
            original = %raw,
            anchored = %anchored.display(),
            "anchored texture path to document directory"
        );
        Ok(anchored)
    }
}

fn expand_home(input: &str) -> Result<String> {
    let Some(rest) = input.strip_prefix('~') else {
        return Ok(input.to_string());
    };
    if !rest.is_empty() && !rest.starts_with('/') {
        bail!("user-specific home expansion ('{input}') is not supported");
    }

    let dirs = BaseDirs::new().ok_or_else(|| anyhow!("unable to determine home directory"))?;
    let home = dirs.home_dir().to_string_lossy();
    Ok(format!("{home}{rest}"))
}

fn expand_env_vars(input: &str) -> Result<String> {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(index) = rest.find('$') {
        output.push_str(&rest[..index]);
        let after = &rest[index + 1..];

        let (name, remainder) = if let Some(braced) = after.strip_prefix('{') {
            let close = braced
                .find('}')
                .ok_or_else(|| anyhow!("missing closing '}}' in '{input}'"))?;
            (&braced[..close], &braced[close + 1..])
        } else {
            let end = after
                .find(|ch: char| !(ch == '_' || ch.is_ascii_alphanumeric()))
                .unwrap_or(after.len());
            (&after[..end], &after[end..])
        };

        if name.is_empty() {
            output.push('$');
            rest = after;
            continue;
        }

        let value = env::var(name).map_err(|_| anyhow!("environment variable '{name}' is not set"))?;
        output.push_str(&value);
        rest = remainder;
    }

    output.push_str(rest);
    Ok(output)
}
