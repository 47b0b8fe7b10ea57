//! Sidebar layout: upload, palette swatches, sample buttons, apply, status
//!
//! Drawing returns the action the user picked; the caller applies it.

use crate::app::AppState;
use crate::sampler::PALETTE_SIZE;
use crate::ui::{
    label, swatch, text_button, wrapped_text, Rect, UiContext, ACTIVE_COLOR, APPLY_COLOR, BUTTON_COLOR,
    FONT_SIZE_CONTENT, FONT_SIZE_HEADER, FONT_SIZE_SMALL, SIDEBAR_BG, SIDEBAR_BORDER, SIDEBAR_WIDTH, TEXT_COLOR, TEXT_DIM,
};
use macroquad::prelude::*;

/// What the user clicked in the sidebar this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    None,
    Upload,
    Sample(usize),
    Apply,
}

const PADDING: f32 = 16.0;
const BUTTON_HEIGHT: f32 = 32.0;
const SWATCH_HEIGHT: f32 = 44.0;
const SAMPLE_BUTTON_HEIGHT: f32 = 26.0;
const GRID_GAP: f32 = 8.0;
const GRID_COLUMNS: usize = 3;

/// Split the window into (sidebar, viewport)
pub fn split_window(screen: Rect) -> (Rect, Rect) {
    screen.split_h_px(SIDEBAR_WIDTH)
}

fn to_mq_color(c: crate::rasterizer::Color) -> Color {
    Color::from_rgba(c.r, c.g, c.b, 255)
}

pub fn draw_sidebar(ctx: &UiContext, rect: Rect, app: &AppState) -> SidebarAction {
    let mut action = SidebarAction::None;

    draw_rectangle(rect.x, rect.y, rect.w, rect.h, SIDEBAR_BG);
    draw_line(rect.right(), rect.y, rect.right(), rect.bottom(), 1.0, SIDEBAR_BORDER);

    let content = rect.pad(PADDING);
    let (title, rest) = content.take_top(36.0);
    label("Color Sampler", title.x, title.y + 24.0, FONT_SIZE_HEADER, TEXT_COLOR);

    // Upload
    let (upload, rest) = rest.take_top(BUTTON_HEIGHT);
    if text_button(ctx, upload, "Upload image", BUTTON_COLOR, true) {
        action = SidebarAction::Upload;
    }
    let (file_row, rest) = rest.take_top(24.0);
    let file_text = match app.sampler.source() {
        Some(image) => format!("{} ({}x{})", image.name, image.width(), image.height()),
        None => "No image selected".to_string(),
    };
    label(&file_text, file_row.x, file_row.y + 17.0, FONT_SIZE_SMALL, TEXT_DIM);

    // Palette grid
    let (_, rest) = rest.take_top(12.0);
    let rows = PALETTE_SIZE.div_ceil(GRID_COLUMNS);
    let cell_h = SWATCH_HEIGHT + 4.0 + SAMPLE_BUTTON_HEIGHT;
    let grid_h = rows as f32 * cell_h + (rows as f32 - 1.0) * GRID_GAP;
    let (grid, rest) = rest.take_top(grid_h);

    for (slot, &color) in app.sampler.palette.colors().iter().enumerate() {
        let cell = grid.grid_cell(GRID_COLUMNS, rows, slot % GRID_COLUMNS, slot / GRID_COLUMNS, GRID_GAP);
        let (swatch_rect, below) = cell.take_top(SWATCH_HEIGHT);
        let (_, button_rect) = below.take_top(4.0);

        let armed = app.sampler.armed() == Some(slot);
        swatch(swatch_rect, to_mq_color(color), armed, ACTIVE_COLOR);
        // Sampled slots get a corner dot; the rest still show their default
        if app.sampler.palette.is_sampled(slot) {
            draw_circle(swatch_rect.right() - 8.0, swatch_rect.y + 8.0, 3.0, WHITE);
        }

        let button_color = if armed { ACTIVE_COLOR } else { BUTTON_COLOR };
        if text_button(ctx, button_rect, &format!("Sample {}", slot + 1), button_color, true) {
            action = SidebarAction::Sample(slot);
        }
    }

    // Apply
    let (_, rest) = rest.take_top(16.0);
    let (apply, rest) = rest.take_top(BUTTON_HEIGHT + 4.0);
    if text_button(ctx, apply, "Apply colors to holes", APPLY_COLOR, true) {
        action = SidebarAction::Apply;
    }

    // Status
    let (_, rest) = rest.take_top(16.0);
    wrapped_text(app.status.text(), rest.x, rest.y + FONT_SIZE_CONTENT, rest.w, FONT_SIZE_CONTENT);

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_window_sidebar_width() {
        let (sidebar, viewport) = split_window(Rect::screen(1280.0, 720.0));
        assert_eq!(sidebar.w, SIDEBAR_WIDTH);
        assert_eq!(viewport.x, SIDEBAR_WIDTH);
        assert_eq!(viewport.w, 1280.0 - SIDEBAR_WIDTH);
    }

    #[test]
    fn test_narrow_window_has_empty_viewport() {
        let (sidebar, viewport) = split_window(Rect::screen(200.0, 720.0));
        assert_eq!(sidebar.w, 200.0);
        assert_eq!(viewport.w, 0.0);
    }
}
