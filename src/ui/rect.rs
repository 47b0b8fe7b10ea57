//! Rectangle type for UI layout

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create from screen dimensions
    pub fn screen(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Check if point is inside
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by padding on all sides
    pub fn pad(&self, padding: f32) -> Self {
        Self::new(
            self.x + padding,
            self.y + padding,
            (self.w - padding * 2.0).max(0.0),
            (self.h - padding * 2.0).max(0.0),
        )
    }

    /// Split horizontally at fixed pixel position from left
    pub fn split_h_px(&self, pixels: f32) -> (Self, Self) {
        let split_x = pixels.clamp(0.0, self.w);
        (
            Self::new(self.x, self.y, split_x, self.h),
            Self::new(self.x + split_x, self.y, self.w - split_x, self.h),
        )
    }

    /// Cut `height` off the top, returns (top, rest)
    pub fn take_top(&self, height: f32) -> (Self, Self) {
        let h = height.clamp(0.0, self.h);
        (
            Self::new(self.x, self.y, self.w, h),
            Self::new(self.x, self.y + h, self.w, self.h - h),
        )
    }

    /// Cell `(col, row)` of an evenly divided grid with `gap` between cells
    pub fn grid_cell(&self, cols: usize, rows: usize, col: usize, row: usize, gap: f32) -> Self {
        let cols_f = cols.max(1) as f32;
        let rows_f = rows.max(1) as f32;
        let cell_w = ((self.w - gap * (cols_f - 1.0)) / cols_f).max(0.0);
        let cell_h = ((self.h - gap * (rows_f - 1.0)) / rows_f).max(0.0);
        Self::new(
            self.x + col as f32 * (cell_w + gap),
            self.y + row as f32 * (cell_h + gap),
            cell_w,
            cell_h,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_h_px() {
        let r = Rect::new(0.0, 0.0, 1000.0, 600.0);
        let (left, right) = r.split_h_px(300.0);
        assert_eq!(left, Rect::new(0.0, 0.0, 300.0, 600.0));
        assert_eq!(right, Rect::new(300.0, 0.0, 700.0, 600.0));
    }

    #[test]
    fn test_take_top_clamps() {
        let r = Rect::new(10.0, 10.0, 100.0, 50.0);
        let (top, rest) = r.take_top(20.0);
        assert_eq!(top.h, 20.0);
        assert_eq!(rest.y, 30.0);
        assert_eq!(rest.h, 30.0);

        let (top, rest) = r.take_top(80.0);
        assert_eq!(top.h, 50.0);
        assert_eq!(rest.h, 0.0);
    }

    #[test]
    fn test_grid_cell() {
        let r = Rect::new(0.0, 0.0, 320.0, 320.0);
        let c = r.grid_cell(3, 3, 2, 1, 10.0);
        assert!((c.w - 100.0).abs() < 0.001);
        assert!((c.x - 220.0).abs() < 0.001);
        assert!((c.y - 110.0).abs() < 0.001);
    }

    #[test]
    fn test_contains() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(50.0, 40.0));
        assert!(!r.contains(5.0, 40.0));
        assert!(!r.contains(50.0, 100.0));
    }
}
