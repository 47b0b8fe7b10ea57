//! UI Theme - Shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Sidebar
// =============================================================================

/// Sidebar width in pixels
pub const SIDEBAR_WIDTH: f32 = 300.0;

/// Sidebar background
pub const SIDEBAR_BG: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Line between sidebar and viewport
pub const SIDEBAR_BORDER: Color = Color::new(0.82, 0.82, 0.84, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.13, 0.13, 0.15, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.45, 0.45, 0.5, 1.0);

// =============================================================================
// Buttons
// =============================================================================

/// Regular button background
pub const BUTTON_COLOR: Color = Color::new(0.2, 0.6, 0.86, 1.0); // #3498db

/// Apply button background
pub const APPLY_COLOR: Color = Color::new(0.18, 0.8, 0.44, 1.0); // #2ecc71

/// Armed sampler button / swatch outline
pub const ACTIVE_COLOR: Color = Color::new(0.91, 0.3, 0.24, 1.0); // #e74c3c

/// Swatch outline
pub const SWATCH_BORDER: Color = Color::new(0.8, 0.8, 0.8, 1.0);

// =============================================================================
// Font Sizes
// =============================================================================

/// Title text size
pub const FONT_SIZE_HEADER: f32 = 24.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 16.0;

/// Small/detail text size
pub const FONT_SIZE_SMALL: f32 = 14.0;
