//! The quad behind the frame that shows the uploaded image
//!
//! The plane faces +Z and is double sided. UV (0,0) is its bottom-left
//! corner and (1,1) its top-right, so a hit's UV addresses the image directly.

use crate::rasterizer::{
    ray_plane_intersection, render_mesh, Camera, Color, Face, Framebuffer, RasterSettings, Ray, Texture,
    Vec2, Vec3, Vertex,
};

pub const PLANE_WIDTH: f32 = 6.0;
pub const PLANE_HEIGHT: f32 = 10.0;
pub const PLANE_CENTER: Vec3 = Vec3 { x: 0.0, y: 0.0, z: -0.5 };

const PLANE_NORMAL: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

/// Where a ray met the plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneHit {
    pub distance: f32,
    pub point: Vec3,
    pub uv: Vec2,
}

pub struct ImagePlane {
    center: Vec3,
    width: f32,
    height: f32,
    vertices: [Vertex; 4],
    faces: [Face; 2],
    texture: Option<Texture>,
}

impl ImagePlane {
    pub fn new(center: Vec3, width: f32, height: f32) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        let corner = |dx: f32, dy: f32, u: f32, v: f32| {
            Vertex::new(Vec3::new(center.x + dx, center.y + dy, center.z), Vec2::new(u, v), PLANE_NORMAL)
        };
        let vertices = [
            corner(-hw, -hh, 0.0, 0.0),
            corner(hw, -hh, 1.0, 0.0),
            corner(hw, hh, 1.0, 1.0),
            corner(-hw, hh, 0.0, 1.0),
        ];
        // Clockwise on screen when seen from +Z
        let faces = [Face::new(0, 2, 1), Face::new(0, 3, 2)];

        Self { center, width, height, vertices, faces, texture: None }
    }

    /// Replace the displayed image
    pub fn set_image(&mut self, texture: Texture) {
        self.texture = Some(texture);
    }

    pub fn has_image(&self) -> bool {
        self.texture.is_some()
    }

    /// First hit of `ray` on the quad, from either side
    pub fn intersect(&self, ray: &Ray) -> Option<PlaneHit> {
        let distance = ray_plane_intersection(ray, self.center, PLANE_NORMAL)?;
        let point = ray.at(distance);

        let u = (point.x - self.center.x) / self.width + 0.5;
        let v = (point.y - self.center.y) / self.height + 0.5;
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }

        Some(PlaneHit { distance, point, uv: Vec2::new(u, v) })
    }

    /// Draw unlit: white until an image is set
    pub fn render(&self, fb: &mut Framebuffer, camera: &Camera) {
        render_mesh(
            fb,
            &self.vertices,
            &self.faces,
            self.texture.as_ref(),
            Color::WHITE,
            camera,
            &RasterSettings::unlit(),
        );
    }
}

impl Default for ImagePlane {
    fn default() -> Self {
        Self::new(PLANE_CENTER, PLANE_WIDTH, PLANE_HEIGHT)
    }
}
