//! Application state and event handlers
//!
//! One state object owns the model, the image plane, the sampler and the
//! render target. Handlers take `&mut self`; nothing here touches the window,
//! so the whole flow runs under tests.

use crate::assign::apply_colors;
use crate::config::ViewerConfig;
use crate::frame::{FrameModel, ModelError};
use crate::image_plane::ImagePlane;
use crate::rasterizer::{screen_to_ray, Camera, Framebuffer, RasterSettings};
use crate::sampler::{ColorSampler, ImageError, SampleResult, SourceImage, PALETTE_SIZE};
use log::{debug, error, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub const STATUS_START: &str = "Upload an image to get started";
pub const STATUS_MODEL_ERROR: &str = "Error: could not load model. Check the path to the model file.";
pub const STATUS_IMAGE_PLACED: &str = "Image placed in the frame!";
pub const STATUS_IMAGE_UPLOADED: &str =
    "Image uploaded! Click a \"Sample\" button, then click the image in the frame to pick colors.";

/// Mouse cursor the viewport should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Crosshair,
}

/// Single status message, mirrored to the log
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    text: String,
}

impl StatusLine {
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        info!("{}", self.text);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Main application state
pub struct AppState {
    pub config: ViewerConfig,
    pub model: FrameModel,
    /// Created once the model has loaded
    pub plane: Option<ImagePlane>,
    pub sampler: ColorSampler,
    pub camera: Camera,
    /// Scene lighting for lit materials
    pub lit_settings: RasterSettings,
    pub framebuffer: Framebuffer,
    pub status: StatusLine,
    rng: SmallRng,
}

impl AppState {
    pub fn new(config: ViewerConfig, seed: u64) -> Self {
        let mut status = StatusLine::default();
        status.set(STATUS_START);

        Self {
            model: FrameModel::default(),
            plane: None,
            sampler: ColorSampler::new(config.palette()),
            camera: config.camera(),
            lit_settings: config.raster_settings(),
            framebuffer: Framebuffer::new(1, 1),
            status,
            rng: SmallRng::seed_from_u64(seed),
            config,
        }
    }

    pub fn on_model_loaded(&mut self, result: Result<FrameModel, ModelError>) {
        match result {
            Ok(model) => {
                self.status.set(format!(
                    "Model loaded! {} holes and {} special objects found.",
                    model.hole_count(),
                    model.special_count()
                ));
                let specials: Vec<&str> = model.specials().map(|p| p.name.as_str()).collect();
                info!("special pieces: {}", specials.join(", "));
                self.model = model;
                self.plane = Some(ImagePlane::default());
            }
            Err(e) => {
                error!("{}", e);
                self.status.set(STATUS_MODEL_ERROR);
            }
        }
    }

    /// Take a decoded upload (or its error) as the new source image
    pub fn on_image(&mut self, result: Result<SourceImage, ImageError>) {
        let image = match result {
            Ok(image) => image,
            Err(e) => {
                warn!("image upload failed: {}", e);
                self.status.set(format!("Error: {}", e));
                return;
            }
        };

        if let Some(plane) = &mut self.plane {
            plane.set_image(image.texture().clone());
            self.status.set(STATUS_IMAGE_PLACED);
        }
        self.sampler.set_source(image);
        self.status.set(STATUS_IMAGE_UPLOADED);
    }

    /// Decode raw file contents, e.g. a file dropped on the window
    pub fn on_image_bytes(&mut self, name: &str, bytes: &[u8]) {
        self.on_image(SourceImage::from_bytes(name, bytes));
    }

    pub fn arm_sampler(&mut self, slot: usize) {
        if self.sampler.arm(slot) {
            self.status.set(format!(
                "Picker {} active - click the image in the frame to pick a color",
                slot + 1
            ));
        }
    }

    /// Click inside the 3D viewport, in viewport pixels
    pub fn on_viewport_click(&mut self, x: f32, y: f32, width: usize, height: usize) -> Option<SampleResult> {
        if self.sampler.armed().is_none() || self.sampler.source().is_none() {
            return None;
        }
        let plane = self.plane.as_ref().filter(|p| p.has_image())?;
        let hit = plane.intersect(&screen_to_ray(x, y, width, height, &self.camera))?;

        let result = self.sampler.sample_at(hit.uv)?;
        debug!(
            "hit {:?} at distance {:.2} -> pixel {:?} {} into slot {}",
            hit.point,
            hit.distance,
            result.pixel,
            result.color,
            result.slot + 1
        );
        self.status.set(format!("Color {} updated!", result.slot + 1));
        Some(result)
    }

    pub fn apply_colors(&mut self) {
        let palette = &self.sampler.palette;
        info!("applying palette with {} of {} slots sampled", palette.sampled_count(), PALETTE_SIZE);
        match apply_colors(&mut self.model, palette.colors(), self.config.neighbor_distance, &mut self.rng) {
            Ok(report) => self.status.set(report.to_string()),
            Err(e) => self.status.set(e.to_string()),
        }
    }

    pub fn cursor(&self) -> CursorHint {
        if self.sampler.armed().is_some() {
            CursorHint::Crosshair
        } else {
            CursorHint::Default
        }
    }

    /// Draw the scene into the framebuffer at `width / render_scale`
    pub fn render(&mut self, width: usize, height: usize) {
        let scale = self.config.render_scale.max(1);
        let (fb_w, fb_h) = ((width / scale).max(1), (height / scale).max(1));
        if self.framebuffer.width != fb_w || self.framebuffer.height != fb_h {
            self.framebuffer.resize(fb_w, fb_h);
        }

        let fb = &mut self.framebuffer;
        fb.clear(self.config.background());

        if let Some(plane) = &self.plane {
            plane.render(fb, &self.camera);
        }
        for part in self.model.parts() {
            let settings = part.material.raster_settings(&self.lit_settings);
            crate::rasterizer::render_mesh(
                fb,
                &part.vertices,
                &part.faces,
                None,
                part.material.color(),
                &self.camera,
                &settings,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Classifier, MaterialColors};
    use crate::rasterizer::math::world_to_screen;
    use crate::rasterizer::{mat4_rotation, Color, Texture, Vec3};
    use crate::sampler::DEFAULT_PALETTE;

    const OBJ: &str = "\
o Frame
v -4 -6 -0.2
v 4 -6 -0.2
v 4 -5.5 -0.2
v -4 -5.5 -0.2
f 1 2 3 4
o hul1
v 3.7 5.7 0
v 3.9 5.7 0
v 3.9 5.9 0
v 3.7 5.9 0
f 5 6 7 8
o hul2
v 3.7 5.2 0
v 3.9 5.2 0
v 3.9 5.4 0
v 3.7 5.4 0
f 9 10 11 12
o C
v 0 -5.3 0
v 0.2 -5.3 0
v 0.2 -5.1 0
f 13 14 15
";

    fn loaded_app() -> AppState {
        let config = ViewerConfig::default();
        let model = FrameModel::parse(
            OBJ,
            &Classifier::default(),
            &mat4_rotation(Vec3::ZERO),
            &MaterialColors::default(),
        );
        let mut app = AppState::new(config, 11);
        app.on_model_loaded(model);
        app
    }

    /// 2x2 image: top row red/green, bottom row blue/white
    fn quad_image() -> SourceImage {
        SourceImage::from_texture(Texture {
            width: 2,
            height: 2,
            pixels: vec![Color::new(255, 0, 0), Color::new(0, 255, 0), Color::new(0, 0, 255), Color::WHITE],
            name: "quad.png".to_string(),
        })
    }

    fn click_world(app: &mut AppState, point: Vec3) -> Option<SampleResult> {
        let (w, h) = (900, 700);
        let cam = &app.camera;
        let (sx, sy) = world_to_screen(point, cam.position, cam.basis_x, cam.basis_y, cam.basis_z, w, h)?;
        app.on_viewport_click(sx, sy, w, h)
    }

    #[test]
    fn test_model_load_status() {
        let app = loaded_app();
        assert_eq!(app.status.text(), "Model loaded! 2 holes and 1 special objects found.");
        assert!(app.plane.is_some());
    }

    #[test]
    fn test_model_error_status() {
        let mut app = AppState::new(ViewerConfig::default(), 1);
        app.on_model_loaded(Err(ModelError::Load("missing.obj".to_string())));
        assert_eq!(app.status.text(), STATUS_MODEL_ERROR);
        assert!(app.plane.is_none());

        app.apply_colors();
        assert_eq!(app.status.text(), "No holes found - wait for the model to load");
    }

    #[test]
    fn test_sample_flow() {
        let mut app = loaded_app();
        app.on_image(Ok(quad_image()));
        assert_eq!(app.status.text(), STATUS_IMAGE_UPLOADED);
        assert!(app.plane.as_ref().unwrap().has_image());

        app.arm_sampler(2);
        assert_eq!(app.cursor(), CursorHint::Crosshair);
        assert!(app.status.text().starts_with("Picker 3 active"));

        // Miss keeps the latch
        assert!(click_world(&mut app, Vec3::new(5.0, 0.0, -0.5)).is_none());
        assert_eq!(app.sampler.armed(), Some(2));

        // Upper-right quadrant of the plane is the green pixel
        let result = click_world(&mut app, Vec3::new(1.5, 2.5, -0.5)).expect("hit");
        assert_eq!(result.color, Color::new(0, 255, 0));
        assert_eq!(app.sampler.palette.colors()[2], Color::new(0, 255, 0));
        assert_eq!(app.status.text(), "Color 3 updated!");
        assert_eq!(app.cursor(), CursorHint::Default);

        // Disarmed: further clicks do nothing
        assert!(click_world(&mut app, Vec3::new(-1.5, -2.5, -0.5)).is_none());
    }

    #[test]
    fn test_click_without_image_is_noop() {
        let mut app = loaded_app();
        app.arm_sampler(0);
        assert!(click_world(&mut app, Vec3::new(0.0, 0.0, -0.5)).is_none());
        assert_eq!(app.sampler.armed(), Some(0));
    }

    #[test]
    fn test_bad_upload_keeps_previous_image() {
        let mut app = loaded_app();
        app.on_image(Ok(quad_image()));
        app.on_image_bytes("broken.png", b"garbage");
        assert!(app.status.text().starts_with("Error: "));
        assert_eq!(app.sampler.source().map(|s| s.name.as_str()), Some("quad.png"));
    }

    #[test]
    fn test_apply_colors_updates_status_and_specials() {
        let mut app = loaded_app();
        app.apply_colors();
        assert!(app.status.text().starts_with("Colors applied to 2 holes!"));

        let hole_one = app.model.holes().next().unwrap().material.color();
        assert!(app.model.specials().all(|s| s.material.color() == hole_one));
    }

    #[test]
    fn test_apply_with_partially_sampled_palette() {
        let mut app = loaded_app();
        app.on_image(Ok(quad_image()));
        app.arm_sampler(0);
        let green = Color::new(0, 255, 0);
        assert_eq!(click_world(&mut app, Vec3::new(1.5, 2.5, -0.5)).map(|r| r.color), Some(green));

        let mut allowed = vec![green];
        allowed.extend_from_slice(&DEFAULT_PALETTE[1..]);

        for _ in 0..20 {
            app.apply_colors();
            for hole in app.model.holes() {
                assert!(allowed.contains(&hole.material.color()), "{}", hole.material.color());
            }
        }

        // Unsampled slots keep their defaults
        let palette = &app.sampler.palette;
        assert!(palette.is_sampled(0));
        assert_eq!(palette.sampled_count(), 1);
        for slot in 1..PALETTE_SIZE {
            assert!(!palette.is_sampled(slot));
            assert_eq!(palette.colors()[slot], DEFAULT_PALETTE[slot]);
        }
    }

    #[test]
    fn test_render_scales_framebuffer() {
        let mut app = loaded_app();
        app.render(800, 600);
        assert_eq!((app.framebuffer.width, app.framebuffer.height), (400, 300));

        // Plane center is white, corner is background
        assert_eq!(app.framebuffer.get_pixel(200, 150), Some(Color::WHITE));
        assert_eq!(app.framebuffer.get_pixel(0, 0), Some(app.config.background()));
    }
}
