//! Vector math for 3D rendering

use std::ops::{Add, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

/// Distance of the virtual eye behind the camera plane
pub const DISTANCE: f32 = 5.0;
/// Fraction of the half-viewport covered by one projected unit
pub const SCALE: f32 = 0.75;
/// Triangles with any vertex at or closer than this camera-space depth are skipped
pub const NEAR_PLANE: f32 = 0.1;

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Straight-line distance between two points
    pub fn distance(self, other: Vec3) -> f32 {
        (self - other).len()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Component-wise minimum
    pub fn min(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum
    pub fn max(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        self.scale(-1.0)
    }
}

/// 2D Vector (for texture coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Transform a vertex by camera basis vectors (rotation)
pub fn perspective_transform(v: Vec3, cam_x: Vec3, cam_y: Vec3, cam_z: Vec3) -> Vec3 {
    Vec3 {
        x: v.dot(cam_x),
        y: v.dot(cam_y),
        z: v.dot(cam_z),
    }
}

/// Half-viewport scale shared by projection and picking
pub fn viewport_scale(width: usize, height: usize) -> f32 {
    (width.min(height) as f32 / 2.0) * SCALE
}

/// Project a camera-space point to 2D screen coordinates.
/// Returns Vec3 where x,y are screen coords and z is the perspective divide
/// denominator (cam_z + DISTANCE), which interpolates as 1/z across a triangle.
pub fn project(v: Vec3, width: usize, height: usize) -> Vec3 {
    let us = DISTANCE - 1.0;
    let vs = viewport_scale(width, height);

    let denom = v.z + DISTANCE;
    if denom.abs() < 0.001 {
        return Vec3::new(width as f32 / 2.0, height as f32 / 2.0, denom);
    }

    Vec3 {
        x: (v.x * us / denom) * vs + (width as f32 / 2.0),
        y: (v.y * us / denom) * vs + (height as f32 / 2.0),
        z: denom,
    }
}

/// Project a world-space point to framebuffer coordinates.
/// Returns None for points at or behind the near plane.
#[cfg(test)]
pub fn world_to_screen(
    world_pos: Vec3,
    camera_pos: Vec3,
    basis_x: Vec3,
    basis_y: Vec3,
    basis_z: Vec3,
    fb_width: usize,
    fb_height: usize,
) -> Option<(f32, f32)> {
    let rel = world_pos - camera_pos;
    let cam = perspective_transform(rel, basis_x, basis_y, basis_z);

    if cam.z <= NEAR_PLANE {
        return None;
    }

    let screen = project(cam, fb_width, fb_height);
    Some((screen.x, screen.y))
}

// =============================================================================
// 4x4 Matrix operations (for transforms)
// =============================================================================

/// 4x4 transformation matrix type
pub type Mat4 = [[f32; 4]; 4];

/// Build a rotation matrix from euler angles (degrees).
/// Rotation order: Z * Y * X.
pub fn mat4_rotation(rot: Vec3) -> Mat4 {
    let (sx, cx) = rot.x.to_radians().sin_cos();
    let (sy, cy) = rot.y.to_radians().sin_cos();
    let (sz, cz) = rot.z.to_radians().sin_cos();

    [
        [cy * cz, sx * sy * cz - cx * sz, cx * sy * cz + sx * sz, 0.0],
        [cy * sz, sx * sy * sz + cx * cz, cx * sy * sz - sx * cz, 0.0],
        [-sy, sx * cy, cx * cy, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Transform a point by a 4x4 matrix
pub fn mat4_transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3],
        m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3],
        m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3],
    )
}

/// Transform a direction (ignores translation).
/// Only valid for rotation/uniform-scale matrices, which is all the model transform uses.
pub fn mat4_transform_direction(m: &Mat4, d: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * d.x + m[0][1] * d.y + m[0][2] * d.z,
        m[1][0] * d.x + m[1][1] * d.y + m[1][2] * d.z,
        m[2][0] * d.x + m[2][1] * d.y + m[2][2] * d.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_distance() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        assert!((a.distance(b) - 5.0).abs() < 0.0001);
        assert!((b.distance(a) - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_rotation_x_90_lays_y_onto_z() {
        // +90 degrees around X stands a model authored lying flat upright
        let m = mat4_rotation(Vec3::new(90.0, 0.0, 0.0));
        let p = mat4_transform_point(&m, Vec3::new(0.0, 1.0, 0.0));
        assert!(p.x.abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
        assert!((p.z - 1.0).abs() < 1e-5);

        let q = mat4_transform_point(&m, Vec3::new(0.0, 0.0, -2.0));
        assert!((q.y - 2.0).abs() < 1e-5);
        assert!(q.z.abs() < 1e-5);
    }

    #[test]
    fn test_direction_ignores_translation() {
        let mut m = mat4_rotation(Vec3::ZERO);
        m[0][3] = 10.0;
        m[1][3] = 20.0;
        m[2][3] = 30.0;
        let d = mat4_transform_direction(&m, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(d, Vec3::new(0.0, 0.0, 1.0));
        let p = mat4_transform_point(&m, Vec3::ZERO);
        assert_eq!(p, Vec3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_project_center() {
        let p = project(Vec3::new(0.0, 0.0, 3.0), 200, 100);
        assert!((p.x - 100.0).abs() < 0.001);
        assert!((p.y - 50.0).abs() < 0.001);
        assert!((p.z - 8.0).abs() < 0.001);
    }

    #[test]
    fn test_world_to_screen_behind_camera() {
        let r = world_to_screen(
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            320,
            240,
        );
        assert!(r.is_none());
    }
}
