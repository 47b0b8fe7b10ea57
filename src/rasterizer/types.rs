//! Core types for the rasterizer

use super::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color from a 0xRRGGBB literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Per-channel shading, clamped to the 8-bit range
    pub fn shade_rgb(self, r: f32, g: f32, b: f32) -> Self {
        Self {
            r: (self.r as f32 * r).clamp(0.0, 255.0) as u8,
            g: (self.g as f32 * g).clamp(0.0, 255.0) as u8,
            b: (self.b as f32 * b).clamp(0.0, 255.0) as u8,
        }
    }

    /// Convert to [u8; 4] for framebuffer (RGBA, always opaque)
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

/// A vertex with position, texture coordinate and normal
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertex {
    pub pos: Vec3,
    pub uv: Vec2,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(pos: Vec3, uv: Vec2, normal: Vec3) -> Self {
        Self { pos, uv, normal }
    }
}

/// A triangle face (indices into vertex array)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
}

impl Face {
    pub fn new(v0: usize, v1: usize, v2: usize) -> Self {
        Self { v0, v1, v2 }
    }
}

/// Simple texture (array of colors)
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
    pub name: String,
}

impl Texture {
    /// Build from tightly packed RGBA8 rows (alpha is dropped)
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8], name: String) -> Self {
        let pixels = rgba
            .chunks_exact(4)
            .take(width * height)
            .map(|p| Color::new(p[0], p[1], p[2]))
            .collect();
        Self { width, height, pixels, name }
    }

    /// Sample texture at UV coordinates (nearest, no filtering).
    /// v = 0 is the first row; callers flip when their UV origin is bottom-left.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::WHITE;
        }
        let u_wrapped = u.rem_euclid(1.0);
        let v_wrapped = v.rem_euclid(1.0);
        let tx = ((u_wrapped * self.width as f32) as usize).min(self.width - 1);
        let ty = ((v_wrapped * self.height as f32) as usize).min(self.height - 1);
        self.pixels[ty * self.width + tx]
    }

    /// Get pixel at x,y coordinates
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            Color::BLACK
        }
    }
}

/// Shading mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    None,     // Unlit, raw material/texture color
    Flat,     // One light calculation per face
    Gouraud,  // Interpolate per-vertex lighting
}

/// Infinite directional light
#[derive(Debug, Clone)]
pub struct Light {
    /// Direction the light travels (from the light toward the scene)
    pub direction: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub enabled: bool,
}

impl Light {
    pub fn directional(direction: Vec3, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            color: Color::WHITE,
            intensity,
            enabled: true,
        }
    }

    /// Directional light placed at `position` and aimed at the origin
    pub fn from_position(position: Vec3, intensity: f32) -> Self {
        Self::directional(-position, intensity)
    }
}

/// Rasterizer settings
#[derive(Debug, Clone)]
pub struct RasterSettings {
    /// Use Z-buffer (false = painter's algorithm)
    pub use_zbuffer: bool,
    pub shading: ShadingMode,
    /// Skip triangles facing away from the camera
    pub backface_cull: bool,
    pub lights: Vec<Light>,
    /// Ambient light intensity (0.0-1.0)
    pub ambient: f32,
}

impl RasterSettings {
    /// Settings for materials that ignore scene lighting
    pub fn unlit() -> Self {
        Self {
            shading: ShadingMode::None,
            lights: Vec::new(),
            ..Self::default()
        }
    }
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            use_zbuffer: true,
            shading: ShadingMode::Flat,
            backface_cull: false,
            lights: vec![Light::directional(Vec3::new(-1.0, -1.0, -1.0), 0.7)],
            ambient: 0.3,
        }
    }
}
