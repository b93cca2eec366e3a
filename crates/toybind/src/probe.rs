//! Stands in for the rendering runtime's image loader: decodes the size of
//! every bound local texture and completes its post-load check. Remote
//! textures are never fetched.
use std::path::PathBuf;

use binder::{
    discover_faces, BindingId, BindingOp, ChannelResolution, DiagnosticSink, Resolution,
    ResourceHost,
};
use shadertoy::{ShaderDocument, SourceKind, TextureDefinition};
use tracing::{debug, warn};

pub fn probe_images(
    document: &ShaderDocument,
    host: &dyn ResourceHost,
    resolution: &mut Resolution,
    sink: &dyn DiagnosticSink,
) -> Vec<(BindingId, ChannelResolution)> {
    let resolver = document.path_resolver();
    let pending: Vec<BindingId> = resolution.checks.ids().collect();
    let mut loaded = Vec::new();

    for id in pending {
        let Some(op) = bound_texture(resolution, id) else {
            continue;
        };
        if let BindingOp::Remote { url, .. } = op {
            debug!(url = %url, "remote textures are not probed");
            continue;
        }
        let Some(image) = probe_target(document, id, host) else {
            continue;
        };
        let path = match resolver.anchor(&image) {
            Ok(path) => path,
            Err(error) => {
                warn!(
                    path = %image.display(),
                    error = %error,
                    "cannot resolve texture for probing"
                );
                continue;
            }
        };
        match image::image_dimensions(&path) {
            Ok((width, height)) => {
                let lines = resolution
                    .checks
                    .get(id)
                    .map(|check| check.lines().to_vec())
                    .unwrap_or_default();
                debug!(path = %path.display(), width, height, ?lines, "probed texture size");
                if let Some(size) = resolution.checks.complete(id, width, height, sink) {
                    loaded.push((id, size));
                }
            }
            Err(error) => warn!(
                path = %path.display(),
                error = %error,
                "failed loading texture file"
            ),
        }
    }

    loaded
}

/// Image-loading op bound to `id`. A rebound channel keeps its last op.
fn bound_texture(resolution: &Resolution, id: BindingId) -> Option<&BindingOp> {
    resolution
        .ops(id.buffer)
        .iter()
        .rev()
        .find(|op| op.loads_image() && op.channel() == Some(id.channel))
}

/// File whose size stands for the channel, taken from the last local input
/// declared for it.
fn probe_target(
    document: &ShaderDocument,
    id: BindingId,
    host: &dyn ResourceHost,
) -> Option<PathBuf> {
    document
        .buffers
        .get(id.buffer)?
        .texture_inputs
        .iter()
        .rev()
        .filter(|texture| texture.channel == id.channel)
        .find_map(|texture| local_image(texture, host))
}

/// The texture itself, or the first face of a cube map.
fn local_image(texture: &TextureDefinition, host: &dyn ResourceHost) -> Option<PathBuf> {
    match texture.source_kind() {
        SourceKind::LocalFile(path) => Some(path.to_path_buf()),
        SourceKind::CubeMap {
            pattern: Some(pattern),
        } => discover_faces(&pattern.to_string_lossy(), host).map(|[first, ..]| first),
        _ => None,
    }
}
