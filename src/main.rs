//! Fez frame viewer
//!
//! Shows an uploaded image inside a 3D picture-frame model, samples colors
//! from it by clicking, and paints the frame's 62 holes from the sampled
//! palette so that neighboring holes tend to differ.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod assign;
mod config;
mod frame;
mod image_plane;
mod layout;
mod rasterizer;
mod sampler;
mod ui;

use app::{AppState, CursorHint};
use config::{load_config, CONFIG_PATH};
use frame::load_frame_model;
use layout::{draw_sidebar, split_window, SidebarAction};
use macroquad::prelude::*;
use ui::{MouseState, Rect, UiContext};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Fez Frame v{}", VERSION),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config(CONFIG_PATH).await;
    let seed = (macroquad::miniquad::date::now() * 1000.0) as u64;
    let mut app = AppState::new(config, seed);

    let model = load_frame_model(
        &app.config.model_path,
        &app.config.classifier(),
        &app.config.model_transform(),
        &app.config.material_colors(),
    )
    .await;
    app.on_model_loaded(model);

    let mut ui_ctx = UiContext::new();
    let mut cursor = CursorHint::Default;

    loop {
        clear_background(WHITE);
        ui_ctx.begin_frame(MouseState::poll());

        let (sidebar, viewport) = split_window(Rect::screen(screen_width(), screen_height()));

        let (vw, vh) = (viewport.w as usize, viewport.h as usize);
        if vw > 0 && vh > 0 {
            app.render(vw, vh);

            // Convert framebuffer to texture and draw to viewport
            let fb = &app.framebuffer;
            let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
            texture.set_filter(FilterMode::Nearest);
            draw_texture_ex(
                &texture,
                viewport.x,
                viewport.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(viewport.w, viewport.h)),
                    ..Default::default()
                },
            );

            if ui_ctx.mouse.clicked(&viewport) {
                let mouse = ui_ctx.mouse;
                app.on_viewport_click(mouse.x - viewport.x, mouse.y - viewport.y, vw, vh);
            }
        }

        match draw_sidebar(&ui_ctx, sidebar, &app) {
            SidebarAction::None => {}
            SidebarAction::Upload => prompt_upload(&mut app),
            SidebarAction::Sample(slot) => app.arm_sampler(slot),
            SidebarAction::Apply => app.apply_colors(),
        }

        for file in get_dropped_files() {
            let name = file
                .path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "dropped image".to_string());
            if let Some(bytes) = file.bytes {
                app.on_image_bytes(&name, &bytes);
            }
        }

        let wanted = app.cursor();
        if wanted != cursor {
            macroquad::miniquad::window::set_mouse_cursor(match wanted {
                CursorHint::Default => macroquad::miniquad::CursorIcon::Default,
                CursorHint::Crosshair => macroquad::miniquad::CursorIcon::Crosshair,
            });
            cursor = wanted;
        }

        next_frame().await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn prompt_upload(app: &mut AppState) {
    let dialog = rfd::FileDialog::new().add_filter("Image", &["png", "jpg", "jpeg", "bmp"]);

    if let Some(path) = dialog.pick_file() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let result = std::fs::read(&path)
            .map_err(sampler::ImageError::from)
            .and_then(|bytes| sampler::SourceImage::from_bytes(&name, &bytes));
        app.on_image(result);
    }
}

#[cfg(target_arch = "wasm32")]
fn prompt_upload(app: &mut AppState) {
    app.status.set("File dialog not available in browser - drop an image onto the window");
}
