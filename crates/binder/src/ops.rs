use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::sampler::SamplerSettings;

pub const KEYBOARD_TEXTURE_WIDTH: u32 = 256;
pub const KEYBOARD_TEXTURE_HEIGHT: u32 = 3;

/// Stable identity of one channel of one buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BindingId {
    pub buffer: usize,
    pub channel: u8,
}

/// Where the runtime should load a local texture from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureLocation {
    /// Path as written, for standalone output.
    Path(PathBuf),
    /// Reference produced by the host for embedded previews.
    Resource(String),
}

/// Keyboard state texture shared by every buffer that declares `#iKeyboard`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyboardTexture {
    pub label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for KeyboardTexture {
    fn default() -> Self {
        Self {
            label: "keyboard".to_string(),
            width: KEYBOARD_TEXTURE_WIDTH,
            height: KEYBOARD_TEXTURE_HEIGHT,
        }
    }
}

pub type KeyboardHandle = Arc<KeyboardTexture>;

/// Size reported for a channel once its texture is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelResolution {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

/// Instruction for populating one channel of one buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BindingOp {
    /// Six faces in east, west, up, down, north, south order.
    CubeMap {
        channel: u8,
        faces: [TextureLocation; 6],
        sampler: SamplerSettings,
    },
    /// Samples another buffer's output; its size comes from that buffer's target.
    BufferRef { channel: u8, source: usize },
    File {
        channel: u8,
        location: TextureLocation,
        sampler: SamplerSettings,
    },
    Remote {
        channel: u8,
        url: String,
        sampler: SamplerSettings,
    },
    /// Samples the buffer's own previous frame.
    SelfFeedback { channel: u8 },
    Keyboard { texture: KeyboardHandle },
}

impl BindingOp {
    /// Sampler slot the op binds; the keyboard texture has its own uniform.
    pub fn channel(&self) -> Option<u8> {
        match self {
            Self::CubeMap { channel, .. }
            | Self::BufferRef { channel, .. }
            | Self::File { channel, .. }
            | Self::Remote { channel, .. }
            | Self::SelfFeedback { channel } => Some(*channel),
            Self::Keyboard { .. } => None,
        }
    }

    /// Whether the runtime must load an image and report back its size.
    pub fn loads_image(&self) -> bool {
        matches!(
            self,
            Self::CubeMap { .. } | Self::File { .. } | Self::Remote { .. }
        )
    }
}
