//! Basic UI widgets

use super::{Rect, UiContext, SWATCH_BORDER, TEXT_COLOR};
use macroquad::prelude::*;

/// Draw a text button, returns true if clicked
pub fn text_button(ctx: &UiContext, rect: Rect, text: &str, bg_color: Color, enabled: bool) -> bool {
    let hovered = enabled && ctx.mouse.inside(&rect);
    let pressed = hovered && ctx.mouse.left_down;
    let clicked = hovered && ctx.mouse.left_pressed;

    let color = if !enabled {
        Color::from_rgba(190, 190, 195, 255)
    } else if pressed {
        Color::new(bg_color.r * 0.85, bg_color.g * 0.85, bg_color.b * 0.85, bg_color.a)
    } else if hovered {
        Color::new(
            (bg_color.r * 1.15).min(1.0),
            (bg_color.g * 1.15).min(1.0),
            (bg_color.b * 1.15).min(1.0),
            bg_color.a,
        )
    } else {
        bg_color
    };

    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, color);

    let font_size = 16.0;
    let dims = measure_text(text, None, font_size as u16, 1.0);
    // Round to integer pixels for crisp text
    let tx = (rect.x + (rect.w - dims.width) / 2.0).round();
    let ty = (rect.y + (rect.h + dims.height) / 2.0 - 2.0).round();
    draw_text(text, tx, ty, font_size, WHITE);

    clicked
}

/// Draw a color swatch; `active` draws a thick highlight outline
pub fn swatch(rect: Rect, color: Color, active: bool, highlight: Color) {
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, color);
    if active {
        draw_rectangle_lines(rect.x - 2.0, rect.y - 2.0, rect.w + 4.0, rect.h + 4.0, 3.0, highlight);
    } else {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, SWATCH_BORDER);
    }
}

/// Draw a single line label
pub fn label(text: &str, x: f32, y: f32, font_size: f32, color: Color) {
    draw_text(text, x.round(), y.round(), font_size, color);
}

/// Draw word-wrapped text starting at baseline `y`, returns the height used
pub fn wrapped_text(text: &str, x: f32, y: f32, max_width: f32, font_size: f32) -> f32 {
    let line_height = font_size * 1.2;
    let lines = wrap_lines(text, max_width, |s| measure_text(s, None, font_size as u16, 1.0).width);
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, x.round(), (y + i as f32 * line_height).round(), font_size, TEXT_COLOR);
    }
    lines.len() as f32 * line_height
}

/// Greedy word wrap. Words wider than `max_width` get a line of their own.
pub fn wrap_lines(text: &str, max_width: f32, width_of: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if width_of(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    // Main body
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    // Corners (circles)
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(s: &str) -> f32 {
        s.len() as f32 * 10.0
    }

    #[test]
    fn test_wrap_lines() {
        let lines = wrap_lines("Color 3 updated and more words here", 150.0, width);
        assert_eq!(lines, vec!["Color 3 updated", "and more words", "here"]);
        assert!(lines.iter().all(|l| width(l) <= 150.0));
    }

    #[test]
    fn test_wrap_long_word_and_empty() {
        assert_eq!(wrap_lines("abcdefghijklmnop x", 50.0, width), vec!["abcdefghijklmnop", "x"]);
        assert!(wrap_lines("   ", 50.0, width).is_empty());
    }
}
