mod cubemap;
mod deferred;
mod diagnostics;
mod host;
mod ops;
mod resolve;
mod sampler;

pub use cubemap::{discover_faces, has_single_wildcard, FACE_NAME_SETS};
pub use deferred::{LoadCheck, PendingChecks, NON_POWER_OF_TWO_WARNING};
pub use diagnostics::{
    ChannelSink, CollectingSink, Diagnostic, DiagnosticBatch, DiagnosticReport, DiagnosticSink,
    Severity, SinkError,
};
pub use host::{FsHost, ResourceHost};
pub use ops::{
    BindingId, BindingOp, ChannelResolution, KeyboardHandle, KeyboardTexture, TextureLocation,
    KEYBOARD_TEXTURE_HEIGHT, KEYBOARD_TEXTURE_WIDTH,
};
pub use resolve::{
    BindingResolver, Resolution, ResolvedBuffer, CUBEMAP_MISSING_ERROR, CUBEMAP_PATTERN_ERROR,
};
pub use sampler::{
    map_mag_filter, map_min_filter, map_wrap_mode, MagFilter, MinFilter, SamplerSettings,
    WrapMode,
};
