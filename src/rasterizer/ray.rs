//! Ray casting utilities for picking
//!
//! Provides the inverse projection that converts screen coordinates
//! back to 3D rays, matching the forward projection in math.rs.

use super::camera::Camera;
use super::math::{viewport_scale, Vec3, DISTANCE};

/// A 3D ray with origin and direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,  // Normalized
}

impl Ray {
    /// Create a new ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize()
        }
    }

    /// Get point at distance t along ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Generate a ray from framebuffer coordinates through the camera.
///
/// Inverts the projection used in project() and world_to_screen():
/// ```text
/// screen_x = (cam_x * 4 / (cam_z + 5)) * vs + center_x
/// screen_y = (cam_y * 4 / (cam_z + 5)) * vs + center_y
/// ```
///
/// Every projected point lies on a line through the virtual eye at
/// cam_z = -DISTANCE, so the ray starts there rather than at the camera.
pub fn screen_to_ray(
    screen_x: f32,
    screen_y: f32,
    screen_width: usize,
    screen_height: usize,
    camera: &Camera,
) -> Ray {
    let vs = viewport_scale(screen_width, screen_height);
    let us = DISTANCE - 1.0;

    let ndc_x = (screen_x - screen_width as f32 / 2.0) / vs;
    let ndc_y = (screen_y - screen_height as f32 / 2.0) / vs;

    // One unit forward from the eye, the projected point sits at (ndc / us)
    let cam_space_dir = Vec3::new(ndc_x / us, ndc_y / us, 1.0);

    let world_dir = camera.basis_x * cam_space_dir.x
        + camera.basis_y * cam_space_dir.y
        + camera.basis_z * cam_space_dir.z;

    Ray::new(camera.eye(), world_dir)
}

/// Find the intersection of a ray with a plane.
///
/// Returns the distance along the ray to the intersection point,
/// or None if the ray is parallel to the plane or intersection is behind ray origin.
/// Both sides of the plane are hit.
pub fn ray_plane_intersection(
    ray: &Ray,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<f32> {
    let denom = ray.direction.dot(plane_normal);
    if denom.abs() < 0.0001 {
        return None;  // Ray parallel to plane
    }

    let t = (plane_point - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;  // Intersection behind ray origin
    }

    Some(t)
}
