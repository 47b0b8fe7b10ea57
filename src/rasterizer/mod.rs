//! Software rasterizer
//!
//! Features:
//! - Perspective-correct texture mapping with nearest sampling
//! - Unlit, flat and Gouraud shading with ambient + directional lights
//! - Z-buffer or painter's algorithm
//! - Exact inverse projection for picking
//!
//! # Module Organization
//!
//! - `types` - Color, Texture, Light, Vertex, Face, RasterSettings
//! - `math` - Vec3, Vec2, projection functions, model rotation
//! - `camera` - Camera struct for 3D rendering
//! - `render` - Framebuffer and mesh rendering functions
//! - `ray` - Ray casting utilities

pub mod camera;
pub mod math;
pub mod ray;
pub mod render;
pub mod types;

pub use types::{Color, Face, Light, RasterSettings, ShadingMode, Texture, Vertex};

pub use math::{mat4_rotation, mat4_transform_direction, mat4_transform_point, Mat4, Vec2, Vec3};

pub use camera::Camera;

pub use render::{Framebuffer, render_mesh};

pub use ray::{screen_to_ray, ray_plane_intersection, Ray};
