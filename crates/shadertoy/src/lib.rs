mod definition;
mod document;
mod path;

pub use definition::{
    BufferDefinition, SourceKind, TextureDefinition, TextureMagFilter, TextureMinFilter,
    TextureType, TextureWrapMode, CHANNEL_COUNT, CUBEMAP_WILDCARD,
};
pub use document::{DocumentError, ShaderDocument};
pub use path::PathResolver;
