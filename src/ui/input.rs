//! Input state for UI interaction

use super::Rect;
use macroquad::prelude::{is_mouse_button_down, is_mouse_button_pressed, mouse_position, MouseButton};

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool, // Just pressed this frame
}

impl MouseState {
    /// Read the current macroquad mouse state
    pub fn poll() -> Self {
        let (x, y) = mouse_position();
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// UI context passed through the frame
#[derive(Debug, Default)]
pub struct UiContext {
    pub mouse: MouseState,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take this frame's mouse state (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clicked_needs_press_inside() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut mouse = MouseState { x: 5.0, y: 5.0, left_down: true, left_pressed: false };
        assert!(mouse.inside(&rect));
        assert!(!mouse.clicked(&rect));

        mouse.left_pressed = true;
        assert!(mouse.clicked(&rect));
        mouse.x = 20.0;
        assert!(!mouse.clicked(&rect));
    }

    #[test]
    fn test_begin_frame_replaces_mouse() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(MouseState { x: 3.0, y: 4.0, left_down: true, left_pressed: true });
        assert!(ctx.mouse.clicked(&Rect::new(0.0, 0.0, 10.0, 10.0)));

        ctx.begin_frame(MouseState::default());
        assert!(!ctx.mouse.left_down);
        assert!(!ctx.mouse.clicked(&Rect::new(0.0, 0.0, 10.0, 10.0)));
    }
}
