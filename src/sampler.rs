//! Color sampling from the uploaded image
//!
//! A click on the image plane yields a UV; the UV maps to one pixel of the
//! decoded source image, and that pixel goes into the armed palette slot.
//! Arming is a one-shot latch: a successful sample disarms it, a miss does not.

use crate::rasterizer::{Color, Texture, Vec2};
use log::{debug, info};

/// Number of palette slots
pub const PALETTE_SIZE: usize = 9;

/// Palette colors before anything is sampled
pub const DEFAULT_PALETTE: [Color; PALETTE_SIZE] = [
    Color::from_hex(0x3498db),
    Color::from_hex(0xe74c3c),
    Color::from_hex(0x2ecc71),
    Color::from_hex(0xf39c12),
    Color::from_hex(0x9b59b6),
    Color::from_hex(0x1abc9c),
    Color::from_hex(0xe67e22),
    Color::from_hex(0x95a5a6),
    Color::from_hex(0x34495e),
];

/// Fixed-size palette. Unsampled slots keep their default color.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: [Color; PALETTE_SIZE],
    sampled: [bool; PALETTE_SIZE],
}

impl Palette {
    pub fn new(defaults: [Color; PALETTE_SIZE]) -> Self {
        Self { colors: defaults, sampled: [false; PALETTE_SIZE] }
    }

    /// Build from a list of hex colors; short lists are padded from the
    /// built-in defaults, long ones truncated
    pub fn from_hex_list(hex: &[u32]) -> Self {
        let mut colors = DEFAULT_PALETTE;
        for (slot, &value) in colors.iter_mut().zip(hex) {
            *slot = Color::from_hex(value);
        }
        Self::new(colors)
    }

    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.colors
    }

    pub fn is_sampled(&self, slot: usize) -> bool {
        self.sampled.get(slot).copied().unwrap_or(false)
    }

    pub fn sampled_count(&self) -> usize {
        self.sampled.iter().filter(|&&s| s).count()
    }

    /// Store a sampled color. Out of range slots are ignored.
    pub fn set(&mut self, slot: usize, color: Color) {
        if slot < PALETTE_SIZE {
            self.colors[slot] = color;
            self.sampled[slot] = true;
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE)
    }
}

/// Decoded source image at full resolution
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub name: String,
    texture: Texture,
}

impl SourceImage {
    /// Decode PNG, JPEG or BMP bytes
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, ImageError> {
        let decoded = image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::Empty);
        }
        debug!("decoded '{}' ({}x{})", name, width, height);
        Ok(Self::from_texture(Texture::from_rgba(
            width as usize,
            height as usize,
            rgba.as_raw(),
            name.to_string(),
        )))
    }

    pub fn from_texture(texture: Texture) -> Self {
        Self { name: texture.name.clone(), texture }
    }

    pub fn width(&self) -> usize {
        self.texture.width
    }

    pub fn height(&self) -> usize {
        self.texture.height
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Pixel coordinates and color under a plane UV (origin bottom-left)
    pub fn pixel_at_uv(&self, uv: Vec2) -> ((usize, usize), Color) {
        let (x, y) = uv_to_pixel(uv, self.width(), self.height());
        ((x, y), self.texture.get_pixel(x, y))
    }
}

/// Map a plane UV to image pixel coordinates.
/// `x = floor(u * w)`, `y = floor((1 - v) * h)`, clamped into the image.
pub fn uv_to_pixel(uv: Vec2, width: usize, height: usize) -> (usize, usize) {
    let clamp = |value: f32, size: usize| -> usize {
        let max = size.saturating_sub(1);
        if value <= 0.0 {
            0
        } else {
            (value as usize).min(max)
        }
    };
    let x = clamp((uv.x * width as f32).floor(), width);
    let y = clamp(((1.0 - uv.y) * height as f32).floor(), height);
    (x, y)
}

/// What a successful sample did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleResult {
    pub slot: usize,
    pub color: Color,
    pub pixel: (usize, usize),
}

/// Palette plus the sampling latch and the current image
#[derive(Debug, Clone, Default)]
pub struct ColorSampler {
    pub palette: Palette,
    armed: Option<usize>,
    source: Option<SourceImage>,
}

impl ColorSampler {
    pub fn new(palette: Palette) -> Self {
        Self { palette, armed: None, source: None }
    }

    /// Target `slot` with the next click. Re-arming retargets.
    pub fn arm(&mut self, slot: usize) -> bool {
        if slot >= PALETTE_SIZE {
            return false;
        }
        self.armed = Some(slot);
        true
    }

    pub fn armed(&self) -> Option<usize> {
        self.armed
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Replace the sampling source
    pub fn set_source(&mut self, image: SourceImage) {
        info!("source image '{}' ({}x{})", image.name, image.width(), image.height());
        self.source = Some(image);
    }

    /// Sample at a plane UV. None when not armed or no image is loaded;
    /// the latch stays armed in that case.
    pub fn sample_at(&mut self, uv: Vec2) -> Option<SampleResult> {
        let slot = self.armed?;
        let source = self.source.as_ref()?;

        let (pixel, color) = source.pixel_at_uv(uv);
        self.palette.set(slot, color);
        self.armed = None;

        Some(SampleResult { slot, color, pixel })
    }
}

/// Image upload errors
#[derive(Debug)]
pub enum ImageError {
    Io(String),
    Decode(String),
    Empty,
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ImageError::Io(e) => write!(f, "Could not read image: {}", e),
            ImageError::Decode(e) => write!(f, "Could not decode image: {}", e),
            ImageError::Empty => write!(f, "Image has no pixels"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<std::io::Error> for ImageError {
    fn from(e: std::io::Error) -> Self {
        ImageError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x2 image: top row red, green, blue, white; bottom row black then one dark slate
    fn synthetic() -> SourceImage {
        SourceImage::from_texture(Texture {
            width: 4,
            height: 2,
            pixels: vec![
                Color::new(255, 0, 0),
                Color::new(0, 255, 0),
                Color::new(0, 0, 255),
                Color::WHITE,
                Color::BLACK,
                Color::BLACK,
                Color::BLACK,
                Color::new(10, 20, 30),
            ],
            name: "synthetic".to_string(),
        })
    }

    #[test]
    fn test_uv_to_pixel_flips_y() {
        assert_eq!(uv_to_pixel(Vec2::new(0.0, 1.0), 4, 2), (0, 0));
        assert_eq!(uv_to_pixel(Vec2::new(0.0, 0.0), 4, 2), (0, 1));
        assert_eq!(uv_to_pixel(Vec2::new(0.6, 0.75), 4, 2), (2, 0));
        assert_eq!(uv_to_pixel(Vec2::new(0.99, 0.1), 4, 2), (3, 1));
    }

    #[test]
    fn test_uv_to_pixel_clamps() {
        assert_eq!(uv_to_pixel(Vec2::new(1.0, 0.0), 4, 2), (3, 1));
        assert_eq!(uv_to_pixel(Vec2::new(-0.5, 1.5), 4, 2), (0, 0));
        assert_eq!(uv_to_pixel(Vec2::new(0.5, 0.5), 0, 0), (0, 0));
    }

    #[test]
    fn test_sample_known_pixel() {
        let mut sampler = ColorSampler::default();
        sampler.set_source(synthetic());
        assert!(sampler.arm(4));

        // u in the third column, v in the upper half -> blue
        let result = sampler.sample_at(Vec2::new(0.6, 0.8)).expect("armed with image");
        assert_eq!(result.slot, 4);
        assert_eq!(result.pixel, (2, 0));
        assert_eq!(result.color, Color::new(0, 0, 255));
        assert_eq!(sampler.palette.colors()[4], Color::new(0, 0, 255));
        assert!(sampler.palette.is_sampled(4));
        assert_eq!(sampler.armed(), None);
    }

    #[test]
    fn test_sample_decoded_png() {
        let mut img = image::RgbaImage::new(8, 8);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = image::Rgba([x as u8 * 30, y as u8 * 30, 7, 255]);
        }
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let source = SourceImage::from_bytes("gradient.png", &bytes).unwrap();
        assert_eq!((source.width(), source.height()), (8, 8));
        // u = 0.3 -> x = 2, v = 0.3 -> y = floor(0.7 * 8) = 5
        assert_eq!(source.pixel_at_uv(Vec2::new(0.3, 0.3)), ((2, 5), Color::new(60, 150, 7)));
    }

    #[test]
    fn test_not_armed_is_noop() {
        let mut sampler = ColorSampler::default();
        sampler.set_source(synthetic());
        assert!(sampler.sample_at(Vec2::new(0.1, 0.9)).is_none());
        assert_eq!(sampler.palette, Palette::default());
    }

    #[test]
    fn test_no_image_keeps_latch() {
        let mut sampler = ColorSampler::default();
        sampler.arm(0);
        assert!(sampler.sample_at(Vec2::new(0.1, 0.9)).is_none());
        assert_eq!(sampler.armed(), Some(0));
        assert_eq!(sampler.palette.sampled_count(), 0);
    }

    #[test]
    fn test_rearm_retargets() {
        let mut sampler = ColorSampler::default();
        sampler.set_source(synthetic());
        sampler.arm(0);
        sampler.arm(8);
        sampler.sample_at(Vec2::new(0.1, 0.9)).unwrap();
        assert!(!sampler.palette.is_sampled(0));
        assert_eq!(sampler.palette.colors()[8], Color::new(255, 0, 0));
        assert!(!sampler.arm(PALETTE_SIZE));
    }

    #[test]
    fn test_palette_from_hex_list_pads() {
        let palette = Palette::from_hex_list(&[0x112233, 0x445566]);
        assert_eq!(palette.colors()[0], Color::new(0x11, 0x22, 0x33));
        assert_eq!(palette.colors()[1], Color::new(0x44, 0x55, 0x66));
        assert_eq!(palette.colors()[2], DEFAULT_PALETTE[2]);

        let long: Vec<u32> = (0..12).collect();
        assert_eq!(Palette::from_hex_list(&long).colors().len(), PALETTE_SIZE);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = SourceImage::from_bytes("junk.png", b"not an image").unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }
}
