use serde::Serialize;
use shadertoy::{TextureDefinition, TextureMagFilter, TextureMinFilter, TextureWrapMode};

/// Magnification filter handed to the rendering runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MagFilter {
    Nearest,
    Linear,
}

/// Minification filter handed to the rendering runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MinFilter {
    Nearest,
    NearestMipNearest,
    NearestMipLinear,
    Linear,
    LinearMipNearest,
    LinearMipLinear,
}

/// Address mode applied to both texture axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WrapMode {
    ClampToEdge,
    MirroredRepeat,
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SamplerSettings {
    pub mag: MagFilter,
    pub min: MinFilter,
    pub wrap: WrapMode,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            mag: MagFilter::Linear,
            min: MinFilter::Linear,
            wrap: WrapMode::Repeat,
        }
    }
}

impl SamplerSettings {
    pub fn from_texture(texture: &TextureDefinition) -> Self {
        Self {
            mag: map_mag_filter(texture.mag),
            min: map_min_filter(texture.min),
            wrap: map_wrap_mode(texture.wrap),
        }
    }
}

pub fn map_mag_filter(filter: Option<TextureMagFilter>) -> MagFilter {
    match filter {
        Some(TextureMagFilter::Nearest) => MagFilter::Nearest,
        _ => MagFilter::Linear,
    }
}

pub fn map_min_filter(filter: Option<TextureMinFilter>) -> MinFilter {
    match filter {
        Some(TextureMinFilter::Nearest) => MinFilter::Nearest,
        Some(TextureMinFilter::NearestMipMapNearest) => MinFilter::NearestMipNearest,
        Some(TextureMinFilter::NearestMipMapLinear) => MinFilter::NearestMipLinear,
        Some(TextureMinFilter::LinearMipMapNearest) => MinFilter::LinearMipNearest,
        Some(TextureMinFilter::LinearMipMapLinear) => MinFilter::LinearMipLinear,
        Some(TextureMinFilter::Linear | TextureMinFilter::Unrecognized) | None => {
            MinFilter::Linear
        }
    }
}

pub fn map_wrap_mode(mode: Option<TextureWrapMode>) -> WrapMode {
    match mode {
        Some(TextureWrapMode::Clamp) => WrapMode::ClampToEdge,
        Some(TextureWrapMode::Mirror) => WrapMode::MirroredRepeat,
        _ => WrapMode::Repeat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_unknown_values_use_defaults() {
        let texture = TextureDefinition {
            mag: Some(TextureMagFilter::Unrecognized),
            wrap: Some(TextureWrapMode::Unrecognized),
            ..TextureDefinition::default()
        };
        assert_eq!(SamplerSettings::from_texture(&texture), SamplerSettings::default());
    }

    #[test]
    fn maps_every_min_filter() {
        let cases = [
            (TextureMinFilter::Nearest, MinFilter::Nearest),
            (TextureMinFilter::NearestMipMapNearest, MinFilter::NearestMipNearest),
            (TextureMinFilter::NearestMipMapLinear, MinFilter::NearestMipLinear),
            (TextureMinFilter::Linear, MinFilter::Linear),
            (TextureMinFilter::LinearMipMapNearest, MinFilter::LinearMipNearest),
            (TextureMinFilter::LinearMipMapLinear, MinFilter::LinearMipLinear),
        ];
        for (input, expected) in cases {
            assert_eq!(map_min_filter(Some(input)), expected);
        }
    }

    #[test]
    fn maps_mag_and_wrap() {
        assert_eq!(map_mag_filter(Some(TextureMagFilter::Nearest)), MagFilter::Nearest);
        assert_eq!(map_mag_filter(Some(TextureMagFilter::Linear)), MagFilter::Linear);
        assert_eq!(map_wrap_mode(Some(TextureWrapMode::Clamp)), WrapMode::ClampToEdge);
        assert_eq!(map_wrap_mode(Some(TextureWrapMode::Mirror)), WrapMode::MirroredRepeat);
        assert_eq!(map_wrap_mode(Some(TextureWrapMode::Repeat)), WrapMode::Repeat);
    }
}
