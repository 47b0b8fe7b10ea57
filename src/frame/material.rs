//! Surface materials for frame parts

use crate::rasterizer::{Color, RasterSettings, ShadingMode};

/// Flat color for hole bottoms and special pieces
pub const HOLE_BOTTOM_COLOR: Color = Color::from_hex(0x96715f);
/// Frame body color
pub const FRAME_COLOR: Color = Color::from_hex(0xf7b594);

/// Material of one frame part
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Flat color, ignores lights
    Unlit { color: Color },
    /// Lit surface. Shadow flags are carried for completeness; the rasterizer has no shadow pass.
    Lit {
        color: Color,
        roughness: f32,
        metalness: f32,
        cast_shadow: bool,
        receive_shadow: bool,
    },
}

impl Material {
    pub fn unlit(color: Color) -> Self {
        Material::Unlit { color }
    }

    /// Rough, non-metallic, shadow casting frame surface
    pub fn frame(color: Color) -> Self {
        Material::Lit {
            color,
            roughness: 0.9,
            metalness: 0.0,
            cast_shadow: true,
            receive_shadow: true,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Material::Unlit { color } | Material::Lit { color, .. } => *color,
        }
    }

    pub fn set_color(&mut self, new_color: Color) {
        match self {
            Material::Unlit { color } | Material::Lit { color, .. } => *color = new_color,
        }
    }

    /// Rasterizer settings for this material given the scene's lit settings
    pub fn raster_settings(&self, lit: &RasterSettings) -> RasterSettings {
        match self {
            Material::Unlit { .. } => RasterSettings::unlit(),
            Material::Lit { roughness, .. } => {
                // Fully rough surfaces show facets; smoother ones get interpolated lighting
                let shading = if *roughness >= 0.5 { ShadingMode::Flat } else { ShadingMode::Gouraud };
                RasterSettings { shading, ..lit.clone() }
            }
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Material::Unlit { color } => write!(f, "unlit {}", color),
            Material::Lit { color, roughness, metalness, cast_shadow, receive_shadow } => write!(
                f,
                "lit {} (roughness {:.2}, metalness {:.2}, cast shadow {}, receive shadow {})",
                color, roughness, metalness, cast_shadow, receive_shadow
            ),
        }
    }
}
