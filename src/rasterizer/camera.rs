//! Camera for 3D rendering
//!
//! Provides camera positioning and orientation for perspective projection.

use super::math::{Vec3, DISTANCE};

/// Camera state for 3D rendering
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub rotation_x: f32, // Pitch
    pub rotation_y: f32, // Yaw

    // Computed basis vectors
    pub basis_x: Vec3,
    pub basis_y: Vec3,
    pub basis_z: Vec3,
}

impl Camera {
    /// Camera at `position` with the given pitch and yaw (radians)
    pub fn with_pose(position: Vec3, rotation_x: f32, rotation_y: f32) -> Self {
        let mut cam = Self {
            position,
            rotation_x,
            rotation_y,
            basis_x: Vec3::new(1.0, 0.0, 0.0),
            basis_y: Vec3::new(0.0, 1.0, 0.0),
            basis_z: Vec3::new(0.0, 0.0, 1.0),
        };
        cam.update_basis();
        cam
    }

    /// Camera at `position` looking down -Z with +Y up on screen
    pub fn facing_negative_z(position: Vec3) -> Self {
        Self::with_pose(position, 0.0, std::f32::consts::PI)
    }

    pub fn update_basis(&mut self) {
        let upward = Vec3::new(0.0, -1.0, 0.0);  // Use -Y as up to match screen coordinates

        // Forward vector based on rotation
        self.basis_z = Vec3 {
            x: self.rotation_x.cos() * self.rotation_y.sin(),
            y: -self.rotation_x.sin(),
            z: self.rotation_x.cos() * self.rotation_y.cos(),
        };

        // Right vector
        self.basis_x = upward.cross(self.basis_z).normalize();

        // Up vector
        self.basis_y = self.basis_z.cross(self.basis_x);
    }

    /// Point all projection rays converge on (DISTANCE behind the camera plane)
    pub fn eye(&self) -> Vec3 {
        self.position - self.basis_z * DISTANCE
    }
}
