//! Describes the buffers of a multi-pass shader and the texture inputs bound to
//! their channels, as produced by the directive parser and consumed by the
//! binding resolver. Everything here is plain data; resolution never mutates it.
//!
//! Types:
//!
//! - `BufferDefinition` is one render pass: its source file, channel inputs,
//!   and whether it samples its own previous frame or the keyboard texture.
//! - `TextureDefinition` binds one channel to exactly one source, together with
//!   optional sampler settings and the lines they were declared on.
//! - `TextureMagFilter`, `TextureMinFilter`, `TextureWrapMode`, and `TextureType`
//!   mirror the inline setting words; unknown words deserialize to
//!   `Unrecognized` so they fall back to defaults instead of failing a document.
//! - `SourceKind` is the one-time classification of a texture input that the
//!   resolver matches on.
//!
//! Functions:
//!
//! - `TextureDefinition::source_kind` performs the classification.
//! - `TextureDefinition::custom_setting_lines` lists the lines a
//!   non-power-of-two warning should point at.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// ShaderToy exposes four sampler slots (`iChannel0-3`).
pub const CHANNEL_COUNT: u8 = 4;

/// Placeholder in a cube-map path that is replaced by each face name.
pub const CUBEMAP_WILDCARD: &str = "{}";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct BufferDefinition {
    pub name: String,
    /// Shader source file of this pass; diagnostics default to it.
    #[serde(default)]
    pub file: PathBuf,
    #[serde(default, rename = "texture")]
    pub texture_inputs: Vec<TextureDefinition>,
    #[serde(default)]
    pub uses_self: bool,
    #[serde(default)]
    pub self_channel: u8,
    #[serde(default)]
    pub uses_keyboard: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct TextureDefinition {
    pub channel: u8,
    /// File the input was declared in, when it differs from the buffer source.
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub buffer_index: Option<usize>,
    #[serde(default)]
    pub local_texture: Option<PathBuf>,
    #[serde(default)]
    pub remote_texture: Option<String>,
    #[serde(default)]
    pub mag: Option<TextureMagFilter>,
    #[serde(default)]
    pub min: Option<TextureMinFilter>,
    #[serde(default)]
    pub wrap: Option<TextureWrapMode>,
    #[serde(default, rename = "type")]
    pub texture_type: TextureType,
    #[serde(default)]
    pub mag_line: Option<u32>,
    #[serde(default)]
    pub min_line: Option<u32>,
    #[serde(default)]
    pub wrap_line: Option<u32>,
    #[serde(default)]
    pub type_line: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum TextureMagFilter {
    Nearest,
    Linear,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum TextureMinFilter {
    Nearest,
    NearestMipMapNearest,
    NearestMipMapLinear,
    Linear,
    LinearMipMapNearest,
    LinearMipMapLinear,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrapMode {
    Clamp,
    Repeat,
    Mirror,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureType {
    #[default]
    Plain,
    CubeMap,
}

/// Where a texture input draws its texels from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind<'a> {
    /// Cube map assembled from six local files; `pattern` is `None` when no
    /// local path was given.
    CubeMap { pattern: Option<&'a Path> },
    BufferRef(usize),
    LocalFile(&'a Path),
    RemoteUrl(&'a str),
    /// Incomplete input: no source, or a file/URL without full sampler settings.
    Unrecognized,
}

impl TextureDefinition {
    pub fn source_kind(&self) -> SourceKind<'_> {
        if self.texture_type == TextureType::CubeMap {
            return SourceKind::CubeMap {
                pattern: self.local_texture.as_deref(),
            };
        }
        if let Some(index) = self.buffer_index {
            return SourceKind::BufferRef(index);
        }
        if !self.has_sampler_settings() {
            return SourceKind::Unrecognized;
        }
        if let Some(path) = self.local_texture.as_deref() {
            return SourceKind::LocalFile(path);
        }
        if let Some(url) = self.remote_texture.as_deref() {
            return SourceKind::RemoteUrl(url);
        }
        SourceKind::Unrecognized
    }

    pub fn has_sampler_settings(&self) -> bool {
        self.mag.is_some() && self.min.is_some() && self.wrap.is_some()
    }

    /// Lines of the explicit MagFilter, MinFilter, WrapMode, and Type settings.
    pub fn custom_setting_lines(&self) -> Vec<u32> {
        [self.mag_line, self.min_line, self.wrap_line, self.type_line]
            .into_iter()
            .flatten()
            .collect()
    }
}
