//! Core rendering functions
//! Triangle rasterization into an RGBA framebuffer with a z-buffer

use super::camera::Camera;
use super::math::{perspective_transform, project, Vec2, Vec3, NEAR_PLANE};
use super::types::{Color, Face, Light, RasterSettings, ShadingMode, Texture, Vertex};

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,    // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>,  // Depth buffer
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f32::MAX; width * height],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width * height * 4];
            self.zbuffer = vec![f32::MAX; width * height];
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.zbuffer.fill(f32::MAX);
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn set_pixel_with_depth(&mut self, x: usize, y: usize, z: f32, color: Color) -> bool {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if z < self.zbuffer[idx] {
                self.zbuffer[idx] = z;
                let pixel_idx = idx * 4;
                self.pixels[pixel_idx..pixel_idx + 4].copy_from_slice(&color.to_bytes());
                return true;
            }
        }
        false
    }

    /// Read back a pixel (RGB)
    #[cfg(test)]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Some(Color::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
        } else {
            None
        }
    }
}

/// A projected triangle ready for rasterization
struct Surface {
    // Screen-space positions; z holds the perspective denominator
    v1: Vec3,
    v2: Vec3,
    v3: Vec3,
    // World-space normals
    wn1: Vec3,
    wn2: Vec3,
    wn3: Vec3,
    uv1: Vec2,
    uv2: Vec2,
    uv3: Vec2,
}

/// Sum of ambient and directional light contributions, per channel, clamped to 1.0
fn shade_multi_light_color(normal: Vec3, lights: &[Light], ambient: f32) -> (f32, f32, f32) {
    let mut total_r = ambient;
    let mut total_g = ambient;
    let mut total_b = ambient;

    for light in lights.iter().filter(|l| l.enabled) {
        let n_dot_l = normal.dot(-light.direction).max(0.0);
        let contribution = n_dot_l * light.intensity;

        total_r += contribution * light.color.r as f32 / 255.0;
        total_g += contribution * light.color.g as f32 / 255.0;
        total_b += contribution * light.color.b as f32 / 255.0;
    }

    (total_r.min(1.0), total_g.min(1.0), total_b.min(1.0))
}

/// Multiply a texel by the material color (white leaves the texel unchanged)
fn tint(texel: Color, base: Color) -> Color {
    Color::new(
        ((texel.r as u16 * base.r as u16) / 255) as u8,
        ((texel.g as u16 * base.g as u16) / 255) as u8,
        ((texel.b as u16 * base.b as u16) / 255) as u8,
    )
}

/// Rasterize a single triangle using incremental barycentric stepping.
fn rasterize_triangle(
    fb: &mut Framebuffer,
    surface: &Surface,
    texture: Option<&Texture>,
    base_color: Color,
    settings: &RasterSettings,
) {
    let min_x = surface.v1.x.min(surface.v2.x).min(surface.v3.x).max(0.0) as usize;
    let max_x = (surface.v1.x.max(surface.v2.x).max(surface.v3.x) + 1.0).min(fb.width as f32) as usize;
    let min_y = surface.v1.y.min(surface.v2.y).min(surface.v3.y).max(0.0) as usize;
    let max_y = (surface.v1.y.max(surface.v2.y).max(surface.v3.y) + 1.0).min(fb.height as f32) as usize;

    if min_x >= max_x || min_y >= max_y {
        return;
    }

    let flat_shade = if settings.shading == ShadingMode::Flat {
        let world_normal = (surface.wn1 + surface.wn2 + surface.wn3).normalize();
        shade_multi_light_color(world_normal, &settings.lights, settings.ambient)
    } else {
        (1.0, 1.0, 1.0)
    };

    let gouraud_shades = if settings.shading == ShadingMode::Gouraud {
        [
            shade_multi_light_color(surface.wn1, &settings.lights, settings.ambient),
            shade_multi_light_color(surface.wn2, &settings.lights, settings.ambient),
            shade_multi_light_color(surface.wn3, &settings.lights, settings.ambient),
        ]
    } else {
        [(1.0, 1.0, 1.0); 3]
    };

    // Edge function: E(x,y) = (y1-y2)*x + (x2-x1)*y + (x1*y2 - x2*y1)
    // bc.x = E23/area, bc.y = E31/area, bc.z = 1 - bc.x - bc.y
    let v1 = surface.v1;
    let v2 = surface.v2;
    let v3 = surface.v3;

    let area = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);
    if area.abs() < 0.00001 {
        return;
    }
    let inv_area = 1.0 / area;

    let a0 = v2.y - v3.y;
    let b0 = v3.x - v2.x;
    let a1 = v3.y - v1.y;
    let b1 = v1.x - v3.x;

    // Sample at pixel centers
    let start_x = min_x as f32 + 0.5;
    let start_y = min_y as f32 + 0.5;

    let mut w0_row = a0 * (start_x - v3.x) + b0 * (start_y - v3.y);
    let mut w1_row = a1 * (start_x - v3.x) + b1 * (start_y - v3.y);

    let inv_z1 = 1.0 / v1.z;
    let inv_z2 = 1.0 / v2.z;
    let inv_z3 = 1.0 / v3.z;

    for y in min_y..max_y {
        let mut w0 = w0_row;
        let mut w1 = w1_row;

        for x in min_x..max_x {
            let bc_x = w0 * inv_area;
            let bc_y = w1 * inv_area;
            let bc_z = 1.0 - bc_x - bc_y;

            w0 += a0;
            w1 += a1;

            const ERR: f32 = -0.0001;
            if bc_x < ERR || bc_y < ERR || bc_z < ERR {
                continue;
            }

            // 1/z interpolates linearly in screen space
            let inv_z_interp = bc_x * inv_z1 + bc_y * inv_z2 + bc_z * inv_z3;
            let z = 1.0 / inv_z_interp;

            if settings.use_zbuffer && z >= fb.zbuffer[y * fb.width + x] {
                continue;
            }

            let mut color = match texture {
                Some(tex) => {
                    let u = (bc_x * surface.uv1.x * inv_z1
                        + bc_y * surface.uv2.x * inv_z2
                        + bc_z * surface.uv3.x * inv_z3)
                        / inv_z_interp;
                    let v = (bc_x * surface.uv1.y * inv_z1
                        + bc_y * surface.uv2.y * inv_z2
                        + bc_z * surface.uv3.y * inv_z3)
                        / inv_z_interp;
                    // UV origin is bottom-left, texture rows start at the top
                    tint(tex.sample(u, 1.0 - v), base_color)
                }
                None => base_color,
            };

            let (shade_r, shade_g, shade_b) = match settings.shading {
                ShadingMode::None => (1.0, 1.0, 1.0),
                ShadingMode::Flat => flat_shade,
                ShadingMode::Gouraud => {
                    let [(r1, g1, b1), (r2, g2, b2), (r3, g3, b3)] = gouraud_shades;
                    (
                        bc_x * r1 + bc_y * r2 + bc_z * r3,
                        bc_x * g1 + bc_y * g2 + bc_z * g3,
                        bc_x * b1 + bc_y * b2 + bc_z * b3,
                    )
                }
            };
            if settings.shading != ShadingMode::None {
                color = color.shade_rgb(shade_r, shade_g, shade_b);
            }

            if settings.use_zbuffer {
                fb.set_pixel_with_depth(x, y, z, color);
            } else {
                fb.set_pixel(x, y, color);
            }
        }

        w0_row += b0;
        w1_row += b1;
    }
}

/// Render a mesh to the framebuffer in one material.
/// Front faces wind clockwise on screen; see `RasterSettings::backface_cull`.
/// `base_color` is the flat color, or the tint applied to `texture` when present.
/// Returns the number of triangles rasterized.
pub fn render_mesh(
    fb: &mut Framebuffer,
    vertices: &[Vertex],
    faces: &[Face],
    texture: Option<&Texture>,
    base_color: Color,
    camera: &Camera,
    settings: &RasterSettings,
) -> usize {
    let mut cam_space_positions: Vec<Vec3> = Vec::with_capacity(vertices.len());
    let mut projected: Vec<Vec3> = Vec::with_capacity(vertices.len());

    for v in vertices {
        let rel_pos = v.pos - camera.position;
        let cam_pos = perspective_transform(rel_pos, camera.basis_x, camera.basis_y, camera.basis_z);
        cam_space_positions.push(cam_pos);
        projected.push(project(cam_pos, fb.width, fb.height));
    }

    let eye = camera.eye();
    let mut surfaces: Vec<Surface> = Vec::with_capacity(faces.len());

    for face in faces {
        let (Some(cv1), Some(cv2), Some(cv3)) = (
            cam_space_positions.get(face.v0),
            cam_space_positions.get(face.v1),
            cam_space_positions.get(face.v2),
        ) else {
            continue;
        };

        // Skip triangles with any vertex behind the near plane
        if cv1.z <= NEAR_PLANE || cv2.z <= NEAR_PLANE || cv3.z <= NEAR_PLANE {
            continue;
        }

        let v1 = projected[face.v0];
        let v2 = projected[face.v1];
        let v3 = projected[face.v2];

        let signed_area = (v2.x - v1.x) * (v3.y - v1.y) - (v3.x - v1.x) * (v2.y - v1.y);
        let is_backface = signed_area <= 0.0;

        if is_backface && settings.backface_cull {
            continue;
        }

        let (a, b, c) = (&vertices[face.v0], &vertices[face.v1], &vertices[face.v2]);

        // Two-sided lighting: light whichever side of the face the eye sees
        let to_eye = eye - (a.pos + b.pos + c.pos).scale(1.0 / 3.0);
        let ns = if (a.normal + b.normal + c.normal).dot(to_eye) < 0.0 { -1.0 } else { 1.0 };

        if is_backface {
            // Swap v2/v3 to restore positive area
            surfaces.push(Surface {
                v1,
                v2: v3,
                v3: v2,
                wn1: a.normal.scale(ns),
                wn2: c.normal.scale(ns),
                wn3: b.normal.scale(ns),
                uv1: a.uv,
                uv2: c.uv,
                uv3: b.uv,
            });
        } else {
            surfaces.push(Surface {
                v1,
                v2,
                v3,
                wn1: a.normal.scale(ns),
                wn2: b.normal.scale(ns),
                wn3: c.normal.scale(ns),
                uv1: a.uv,
                uv2: b.uv,
                uv3: c.uv,
            });
        }
    }

    // Painter's algorithm fallback: far first
    if !settings.use_zbuffer {
        surfaces.sort_by(|a, b| {
            let a_center_z = a.v1.z + a.v2.z + a.v3.z;
            let b_center_z = b.v1.z + b.v2.z + b.v3.z;
            b_center_z.total_cmp(&a_center_z)
        });
    }

    for surface in &surfaces {
        rasterize_triangle(fb, surface, texture, base_color, settings);
    }

    surfaces.len()
}
