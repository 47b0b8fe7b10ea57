//! Viewer configuration
//!
//! Optional RON file; every field falls back to the built-in value when
//! missing. A missing or malformed file means the defaults are used.

use crate::assign::DEFAULT_NEIGHBOR_DISTANCE;
use crate::frame::{Classifier, MaterialColors, DEFAULT_HOLE_RANGE, DEFAULT_SPECIAL_NAMES, FRAME_COLOR, HOLE_BOTTOM_COLOR};
use crate::rasterizer::{mat4_rotation, Camera, Color, Light, Mat4, RasterSettings, ShadingMode, Vec3};
use crate::sampler::{Palette, DEFAULT_PALETTE};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Where the viewer looks for its configuration
pub const CONFIG_PATH: &str = "assets/frame_viewer.ron";

/// One directional light, aimed from `position` at the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    pub position: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub model_path: String,
    /// Degrees around X, Y, Z
    pub model_rotation: Vec3,
    pub frame_color: u32,
    pub hole_bottom_color: u32,
    pub background_color: u32,
    pub neighbor_distance: f32,
    /// Inclusive hole number range
    pub hole_range: (u32, u32),
    pub special_names: Vec<String>,
    pub palette: Vec<u32>,
    pub camera_position: Vec3,
    /// Framebuffer pixels per screen pixel, divided
    pub render_scale: usize,
    pub ambient: f32,
    pub lights: Vec<LightConfig>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: "assets/models/frame.obj".to_string(),
            model_rotation: Vec3::new(90.0, 0.0, 0.0),
            frame_color: FRAME_COLOR.to_hex(),
            hole_bottom_color: HOLE_BOTTOM_COLOR.to_hex(),
            background_color: 0xf0f0f0,
            neighbor_distance: DEFAULT_NEIGHBOR_DISTANCE,
            hole_range: (*DEFAULT_HOLE_RANGE.start(), *DEFAULT_HOLE_RANGE.end()),
            special_names: DEFAULT_SPECIAL_NAMES.iter().map(|s| s.to_string()).collect(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_hex()).collect(),
            camera_position: Vec3::new(0.2, 0.0, 10.0),
            render_scale: 2,
            ambient: 0.9,
            lights: vec![
                LightConfig { position: Vec3::new(0.0, -10.0, 10.0), intensity: 0.8 },
                LightConfig { position: Vec3::new(-3.0, 2.0, 3.0), intensity: 0.25 },
            ],
        }
    }
}

impl ViewerConfig {
    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.neighbor_distance <= 0.0 || !self.neighbor_distance.is_finite() {
            return Err(ConfigError::Validation(format!(
                "neighbor_distance must be positive, got {}",
                self.neighbor_distance
            )));
        }
        if self.render_scale == 0 {
            return Err(ConfigError::Validation("render_scale must be at least 1".to_string()));
        }
        if self.hole_range.0 > self.hole_range.1 {
            return Err(ConfigError::Validation(format!(
                "hole_range {}..={} is empty",
                self.hole_range.0, self.hole_range.1
            )));
        }
        if self.model_path.is_empty() {
            return Err(ConfigError::Validation("model_path is empty".to_string()));
        }
        Ok(())
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.hole_range.0..=self.hole_range.1, self.special_names.clone())
    }

    pub fn material_colors(&self) -> MaterialColors {
        MaterialColors {
            frame: Color::from_hex(self.frame_color),
            hole_bottom: Color::from_hex(self.hole_bottom_color),
        }
    }

    pub fn model_transform(&self) -> Mat4 {
        mat4_rotation(self.model_rotation)
    }

    pub fn palette(&self) -> Palette {
        Palette::from_hex_list(&self.palette)
    }

    pub fn camera(&self) -> Camera {
        Camera::facing_negative_z(self.camera_position)
    }

    pub fn background(&self) -> Color {
        Color::from_hex(self.background_color)
    }

    /// Settings for lit materials
    pub fn raster_settings(&self) -> RasterSettings {
        RasterSettings {
            use_zbuffer: true,
            shading: ShadingMode::Flat,
            backface_cull: false,
            lights: self
                .lights
                .iter()
                .map(|l| Light::from_position(l.position, l.intensity))
                .collect(),
            ambient: self.ambient,
        }
    }
}

/// Load the configuration through macroquad's loader, falling back to defaults
pub async fn load_config(path: &str) -> ViewerConfig {
    let contents = match macroquad::prelude::load_string(path).await {
        Ok(contents) => contents,
        Err(_) => {
            info!("no configuration at {}, using defaults", path);
            return ViewerConfig::default();
        }
    };

    match ViewerConfig::from_ron(&contents) {
        Ok(config) => {
            info!("loaded configuration from {}", path);
            config
        }
        Err(e) => {
            warn!("ignoring {}: {}", path, e);
            ViewerConfig::default()
        }
    }
}

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Parse(ron::error::SpannedError),
    Validation(String),
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
