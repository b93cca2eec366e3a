//! Turns parsed buffer definitions into per-channel binding operations for the
//! multi-pass runtime. Every texture input is classified once, cube maps are
//! assembled from face files on disk, and structural problems become Error
//! diagnostics that drop only the offending input.
//!
//! Types:
//!
//! - `BindingResolver` carries the host capabilities, the shared keyboard
//!   texture, and the standalone flag for one or more resolution passes.
//! - `Resolution` is the complete result of a pass: ops per buffer, the
//!   diagnostics to publish, and the post-load checks to hand to the loader.
//! - `ResolvedBuffer` lists the ops for one buffer, channel inputs first, then
//!   self feedback, then the keyboard.
//!
//! Functions:
//!
//! - `BindingResolver::resolve` runs a pass without touching its inputs.
//! - `Resolution::publish` forwards the collected diagnostics to a sink.
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use shadertoy::{BufferDefinition, SourceKind, TextureDefinition};
use tracing::{debug, warn};

use crate::cubemap::{discover_faces, has_single_wildcard};
use crate::deferred::{LoadCheck, PendingChecks};
use crate::diagnostics::{DiagnosticBatch, DiagnosticReport, DiagnosticSink, Severity};
use crate::host::ResourceHost;
use crate::ops::{BindingId, BindingOp, KeyboardHandle, KeyboardTexture, TextureLocation};
use crate::sampler::SamplerSettings;

pub const CUBEMAP_PATTERN_ERROR: &str =
    "Only local paths with a single wildcard \"{}\" are supported for the CubeMap texture type.";
pub const CUBEMAP_MISSING_ERROR: &str =
    "Could not find all cubemap files for the given path with wildcard.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBuffer {
    pub index: usize,
    pub ops: Vec<BindingOp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub buffers: Vec<ResolvedBuffer>,
    pub diagnostics: Vec<DiagnosticReport>,
    #[serde(skip)]
    pub checks: PendingChecks,
}

impl Resolution {
    /// Sends every diagnostic to `sink`, returning how many were accepted.
    pub fn publish(&self, sink: &dyn DiagnosticSink) -> usize {
        let mut delivered = 0;
        for report in &self.diagnostics {
            match sink.emit(report.batch.clone(), report.severity) {
                Ok(()) => delivered += 1,
                Err(error) => warn!(
                    file = %report.batch.filename,
                    error = %error,
                    "failed to publish diagnostic batch"
                ),
            }
        }
        delivered
    }

    pub fn ops(&self, buffer: usize) -> &[BindingOp] {
        self.buffers
            .get(buffer)
            .map(|resolved| resolved.ops.as_slice())
            .unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|report| report.severity == Severity::Error)
    }
}

pub struct BindingResolver<'a> {
    host: &'a dyn ResourceHost,
    keyboard: KeyboardHandle,
    standalone: bool,
}

impl<'a> BindingResolver<'a> {
    pub fn new(host: &'a dyn ResourceHost) -> Self {
        Self {
            host,
            keyboard: Arc::new(KeyboardTexture::default()),
            standalone: false,
        }
    }

    /// Keep local paths as written instead of asking the host for references.
    pub fn standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn keyboard(mut self, keyboard: KeyboardHandle) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn resolve(&self, buffers: &[BufferDefinition]) -> Resolution {
        let mut pass = Pass::default();
        let resolved = buffers
            .iter()
            .enumerate()
            .map(|(index, buffer)| self.resolve_buffer(index, buffer, &mut pass))
            .collect();
        debug!(
            buffers = buffers.len(),
            diagnostics = pass.diagnostics.len(),
            checks = pass.checks.len(),
            "resolved channel bindings"
        );
        Resolution {
            buffers: resolved,
            diagnostics: pass.diagnostics,
            checks: pass.checks,
        }
    }

    fn resolve_buffer(
        &self,
        index: usize,
        buffer: &BufferDefinition,
        pass: &mut Pass,
    ) -> ResolvedBuffer {
        let mut ops = Vec::with_capacity(buffer.texture_inputs.len() + 2);
        for texture in &buffer.texture_inputs {
            if let Some(op) = self.resolve_input(index, buffer, texture, pass) {
                ops.push(op);
            }
        }

        if buffer.uses_self {
            ops.push(BindingOp::SelfFeedback {
                channel: buffer.self_channel,
            });
        }
        if buffer.uses_keyboard {
            ops.push(BindingOp::Keyboard {
                texture: Arc::clone(&self.keyboard),
            });
        }

        ResolvedBuffer { index, ops }
    }

    fn resolve_input(
        &self,
        index: usize,
        buffer: &BufferDefinition,
        texture: &TextureDefinition,
        pass: &mut Pass,
    ) -> Option<BindingOp> {
        let channel = texture.channel;
        let id = BindingId {
            buffer: index,
            channel,
        };
        let filename = texture
            .file
            .as_deref()
            .unwrap_or(&buffer.file)
            .display()
            .to_string();
        let sampler = SamplerSettings::from_texture(texture);

        let op = match texture.source_kind() {
            SourceKind::CubeMap { pattern } => {
                let line = texture.type_line.unwrap_or(0);
                let pattern = pattern
                    .map(Path::to_string_lossy)
                    .filter(|pattern| has_single_wildcard(pattern));
                let Some(pattern) = pattern else {
                    pass.error(filename, line, CUBEMAP_PATTERN_ERROR);
                    return None;
                };
                let Some(faces) = discover_faces(&pattern, self.host) else {
                    debug!(buffer = index, channel, pattern = %pattern, "cube map faces missing");
                    pass.error(filename, line, CUBEMAP_MISSING_ERROR);
                    return None;
                };
                BindingOp::CubeMap {
                    channel,
                    faces: faces.map(|face| self.locate(&face)),
                    sampler,
                }
            }
            SourceKind::BufferRef(source) => {
                return Some(BindingOp::BufferRef { channel, source });
            }
            SourceKind::LocalFile(path) => BindingOp::File {
                channel,
                location: self.locate(path),
                sampler,
            },
            SourceKind::RemoteUrl(url) => BindingOp::Remote {
                channel,
                url: url.to_string(),
                sampler,
            },
            SourceKind::Unrecognized => {
                debug!(buffer = index, channel, "skipping incomplete texture input");
                return None;
            }
        };

        pass.checks.register(LoadCheck::new(
            id,
            filename,
            texture.custom_setting_lines(),
        ));
        Some(op)
    }

    fn locate(&self, path: &Path) -> TextureLocation {
        if self.standalone {
            TextureLocation::Path(path.to_path_buf())
        } else {
            TextureLocation::Resource(self.host.make_resource_reference(path))
        }
    }
}

#[derive(Default)]
struct Pass {
    diagnostics: Vec<DiagnosticReport>,
    checks: PendingChecks,
}

impl Pass {
    fn error(&mut self, filename: String, line: u32, message: &str) {
        self.diagnostics.push(DiagnosticReport {
            severity: Severity::Error,
            batch: DiagnosticBatch::single(filename, line, message),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::PathBuf;

    use shadertoy::{TextureMagFilter, TextureMinFilter, TextureType, TextureWrapMode};

    use super::*;

    #[derive(Default)]
    struct MemoryHost {
        files: HashSet<PathBuf>,
    }

    impl ResourceHost for MemoryHost {
        fn file_exists(&self, path: &Path) -> bool {
            self.files.contains(path)
        }

        fn make_resource_reference(&self, path: &Path) -> String {
            format!("res://{}", path.display())
        }
    }

    fn file_input(channel: u8, path: &str) -> TextureDefinition {
        TextureDefinition {
            channel,
            local_texture: Some(PathBuf::from(path)),
            mag: Some(TextureMagFilter::Nearest),
            min: Some(TextureMinFilter::Linear),
            wrap: Some(TextureWrapMode::Clamp),
            ..TextureDefinition::default()
        }
    }

    #[test]
    fn appends_self_feedback_and_keyboard_after_inputs() {
        let host = MemoryHost::default();
        let buffers = vec![BufferDefinition {
            name: "A".into(),
            file: PathBuf::from("a.glsl"),
            texture_inputs: vec![file_input(0, "noise.png")],
            uses_self: true,
            self_channel: 2,
            uses_keyboard: true,
        }];
        let resolution = BindingResolver::new(&host).resolve(&buffers);
        let ops = resolution.ops(0);
        assert_eq!(ops.len(), 3);
        assert_eq!(
            ops[0],
            BindingOp::File {
                channel: 0,
                location: TextureLocation::Resource("res://noise.png".into()),
                sampler: SamplerSettings {
                    mag: crate::sampler::MagFilter::Nearest,
                    min: crate::sampler::MinFilter::Linear,
                    wrap: crate::sampler::WrapMode::ClampToEdge,
                },
            }
        );
        assert_eq!(ops[1], BindingOp::SelfFeedback { channel: 2 });
        assert!(matches!(&ops[2], BindingOp::Keyboard { texture } if texture.width == 256));
        assert_eq!(resolution.checks.len(), 1);
    }

    #[test]
    fn standalone_keeps_paths_as_written() {
        let host = MemoryHost::default();
        let buffers = vec![BufferDefinition {
            texture_inputs: vec![file_input(1, "tex/noise.png")],
            ..BufferDefinition::default()
        }];
        let resolution = BindingResolver::new(&host)
            .standalone(true)
            .resolve(&buffers);
        assert!(matches!(
            &resolution.ops(0)[0],
            BindingOp::File { location: TextureLocation::Path(path), .. }
                if path == Path::new("tex/noise.png")
        ));
    }

    #[test]
    fn cube_map_without_local_path_is_an_error() {
        let host = MemoryHost::default();
        let buffers = vec![BufferDefinition {
            file: PathBuf::from("main.glsl"),
            texture_inputs: vec![TextureDefinition {
                channel: 0,
                remote_texture: Some("https://example.com/sky_{}.png".into()),
                texture_type: TextureType::CubeMap,
                type_line: Some(9),
                ..TextureDefinition::default()
            }],
            ..BufferDefinition::default()
        }];
        let resolution = BindingResolver::new(&host).resolve(&buffers);
        assert!(resolution.ops(0).is_empty());
        assert!(resolution.has_errors());
        let batch = &resolution.diagnostics[0].batch;
        assert_eq!(batch.filename, "main.glsl");
        assert_eq!(batch.diagnostics[0].line, 9);
        assert_eq!(batch.diagnostics[0].message, CUBEMAP_PATTERN_ERROR);
    }

    #[test]
    fn incomplete_inputs_are_dropped_silently() {
        let host = MemoryHost::default();
        let mut partial = file_input(0, "noise.png");
        partial.wrap = None;
        let buffers = vec![BufferDefinition {
            texture_inputs: vec![partial, TextureDefinition::default()],
            ..BufferDefinition::default()
        }];
        let resolution = BindingResolver::new(&host).resolve(&buffers);
        assert!(resolution.ops(0).is_empty());
        assert!(resolution.diagnostics.is_empty());
        assert!(resolution.checks.is_empty());
    }

    #[test]
    fn diagnostics_use_the_declaring_file() {
        let host = MemoryHost::default();
        let buffers = vec![BufferDefinition {
            file: PathBuf::from("main.glsl"),
            texture_inputs: vec![TextureDefinition {
                channel: 3,
                file: Some(PathBuf::from("common.glsl")),
                local_texture: Some(PathBuf::from("sky.png")),
                texture_type: TextureType::CubeMap,
                ..TextureDefinition::default()
            }],
            ..BufferDefinition::default()
        }];
        let resolution = BindingResolver::new(&host).resolve(&buffers);
        assert_eq!(resolution.diagnostics[0].batch.filename, "common.glsl");
        assert_eq!(resolution.diagnostics[0].batch.diagnostics[0].line, 0);
    }
}
