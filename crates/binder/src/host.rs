//! Capabilities the resolver borrows from its host: checking that a texture
//! file exists and turning a local path into a reference the rendering
//! runtime can load (a webview resource URI, a `file://` URL, ...).
use std::path::Path;

use shadertoy::PathResolver;
use tracing::debug;

pub trait ResourceHost {
    fn file_exists(&self, path: &Path) -> bool;
    fn make_resource_reference(&self, path: &Path) -> String;
}

/// Host backed by the local filesystem, resolving relative paths against the
/// document directory.
#[derive(Debug, Clone)]
pub struct FsHost {
    resolver: PathResolver,
    scheme: String,
}

impl FsHost {
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            resolver,
            scheme: "file://".to_string(),
        }
    }

    /// Prefix prepended to anchored paths by `make_resource_reference`.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }
}

impl ResourceHost for FsHost {
    fn file_exists(&self, path: &Path) -> bool {
        match self.resolver.anchor(path) {
            Ok(anchored) => anchored.is_file(),
            Err(error) => {
                debug!(path = %path.display(), error = %error, "texture path could not be resolved");
                false
            }
        }
    }

    fn make_resource_reference(&self, path: &Path) -> String {
        let anchored = self
            .resolver
            .anchor(path)
            .unwrap_or_else(|_| path.to_path_buf());
        format!("{}{}", self.scheme, anchored.display())
    }
}
