//! OBJ import for the frame model
//! Supports vertices (v), texture coords (vt), normals (vn), faces (f) and
//! splits the file into named objects on `o` / `g` statements.

use crate::rasterizer::{Face, Vec2, Vec3, Vertex};
use std::collections::HashMap;

/// Name given to geometry that appears before any `o` / `g` statement
pub const DEFAULT_OBJECT_NAME: &str = "default";

/// One named object from an OBJ file, with its own vertex list
#[derive(Debug, Clone)]
pub struct ObjObject {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl ObjObject {
    fn new(name: String) -> Self {
        Self { name, vertices: Vec::new(), faces: Vec::new() }
    }
}

/// OBJ file importer
pub struct ObjImporter;

/// Object being filled while parsing, with its (pos, tc, norm) -> vertex cache
struct ObjectBuilder {
    object: ObjObject,
    vertex_cache: HashMap<(usize, usize, usize), usize>,
    named_by_object: bool,
}

impl ObjectBuilder {
    fn new(name: String) -> Self {
        Self { object: ObjObject::new(name), vertex_cache: HashMap::new(), named_by_object: false }
    }
}

impl ObjImporter {
    /// Parse OBJ file contents into named objects.
    /// Objects without faces are dropped.
    pub fn parse(contents: &str) -> Result<Vec<ObjObject>, ObjError> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut tex_coords: Vec<Vec2> = Vec::new();
        let mut normals: Vec<Vec3> = Vec::new();

        let mut objects: Vec<ObjObject> = Vec::new();
        let mut current = ObjectBuilder::new(DEFAULT_OBJECT_NAME.to_string());

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            match parts[0] {
                "v" => {
                    if parts.len() < 4 {
                        return Err(ObjError::Parse(format!(
                            "Line {}: Invalid vertex position (expected 3 values)",
                            line_num + 1
                        )));
                    }
                    let x = Self::parse_float(parts[1], line_num)?;
                    let y = Self::parse_float(parts[2], line_num)?;
                    let z = Self::parse_float(parts[3], line_num)?;
                    positions.push(Vec3::new(x, y, z));
                }

                "vt" => {
                    if parts.len() < 3 {
                        return Err(ObjError::Parse(format!(
                            "Line {}: Invalid texture coordinate (expected 2 values)",
                            line_num + 1
                        )));
                    }
                    let u = Self::parse_float(parts[1], line_num)?;
                    let v = Self::parse_float(parts[2], line_num)?;
                    tex_coords.push(Vec2::new(u, v));
                }

                "vn" => {
                    if parts.len() < 4 {
                        return Err(ObjError::Parse(format!(
                            "Line {}: Invalid normal (expected 3 values)",
                            line_num + 1
                        )));
                    }
                    let x = Self::parse_float(parts[1], line_num)?;
                    let y = Self::parse_float(parts[2], line_num)?;
                    let z = Self::parse_float(parts[3], line_num)?;
                    normals.push(Vec3::new(x, y, z));
                }

                "o" | "g" => {
                    let is_object = parts[0] == "o";
                    let name = parts[1..].join(" ");
                    let name = if name.is_empty() { DEFAULT_OBJECT_NAME.to_string() } else { name };

                    if current.object.faces.is_empty() {
                        // A group directly under an object keeps the object's name
                        if is_object || !current.named_by_object {
                            current.object.name = name;
                            current.named_by_object = is_object;
                        }
                    } else {
                        let mut next = ObjectBuilder::new(name);
                        next.named_by_object = is_object;
                        let done = std::mem::replace(&mut current, next);
                        objects.push(done.object);
                    }
                }

                "f" => {
                    if parts.len() < 4 {
                        return Err(ObjError::Parse(format!(
                            "Line {}: Face must have at least 3 vertices",
                            line_num + 1
                        )));
                    }

                    let mut face_verts = Vec::with_capacity(parts.len() - 1);
                    for part in &parts[1..] {
                        let vertex_idx = Self::parse_face_vertex(
                            part,
                            line_num,
                            &positions,
                            &tex_coords,
                            &normals,
                            &mut current,
                        )?;
                        face_verts.push(vertex_idx);
                    }

                    // Fan triangulation from the first vertex.
                    // OBJ winds CCW, the rasterizer's front faces are CW on screen: swap.
                    for i in 1..(face_verts.len() - 1) {
                        current.object.faces.push(Face::new(
                            face_verts[0],
                            face_verts[i + 1],
                            face_verts[i],
                        ));
                    }
                }

                _ => {
                    // Ignore other OBJ commands (s, usemtl, mtllib, etc.)
                }
            }
        }

        if !current.object.faces.is_empty() {
            objects.push(current.object);
        }

        if positions.is_empty() {
            return Err(ObjError::Parse("No vertices found in OBJ file".to_string()));
        }

        if objects.is_empty() {
            return Err(ObjError::Parse("No faces found in OBJ file".to_string()));
        }

        for object in &mut objects {
            Self::compute_face_normals(object);
        }

        Ok(objects)
    }

    /// Parse a face vertex string like "1/2/3" or "1//3" or "1"
    fn parse_face_vertex(
        corner: &str,
        line_num: usize,
        positions: &[Vec3],
        tex_coords: &[Vec2],
        normals: &[Vec3],
        builder: &mut ObjectBuilder,
    ) -> Result<usize, ObjError> {
        let parts: Vec<&str> = corner.split('/').collect();

        let pos_idx = if !parts[0].is_empty() {
            Self::parse_index(parts[0], positions.len(), line_num)?
        } else {
            return Err(ObjError::Parse(format!(
                "Line {}: Missing position index in face",
                line_num + 1
            )));
        };

        let tc_idx = if parts.len() > 1 && !parts[1].is_empty() {
            Some(Self::parse_index(parts[1], tex_coords.len(), line_num)?)
        } else {
            None
        };

        let norm_idx = if parts.len() > 2 && !parts[2].is_empty() {
            Some(Self::parse_index(parts[2], normals.len(), line_num)?)
        } else {
            None
        };

        let cache_key = (pos_idx, tc_idx.unwrap_or(usize::MAX), norm_idx.unwrap_or(usize::MAX));
        if let Some(&vertex_idx) = builder.vertex_cache.get(&cache_key) {
            return Ok(vertex_idx);
        }

        let uv = tc_idx.map(|i| tex_coords[i]).unwrap_or_default();
        // Zero normal means "compute from the face" later
        let normal = norm_idx.map(|i| normals[i]).unwrap_or(Vec3::ZERO);

        let vertices = &mut builder.object.vertices;
        let vertex_idx = vertices.len();
        vertices.push(Vertex::new(positions[pos_idx], uv, normal));
        builder.vertex_cache.insert(cache_key, vertex_idx);

        Ok(vertex_idx)
    }

    fn parse_float(s: &str, line_num: usize) -> Result<f32, ObjError> {
        s.parse().map_err(|_| {
            ObjError::Parse(format!(
                "Line {}: Invalid float value '{}'",
                line_num + 1,
                s
            ))
        })
    }

    /// Parse an index (handles negative indices for relative indexing)
    fn parse_index(s: &str, count: usize, line_num: usize) -> Result<usize, ObjError> {
        let idx: i64 = s.parse().map_err(|_| {
            ObjError::Parse(format!(
                "Line {}: Invalid index '{}'",
                line_num + 1,
                s
            ))
        })?;

        let result = if idx > 0 {
            idx - 1
        } else if idx < 0 {
            count as i64 + idx
        } else {
            return Err(ObjError::Parse(format!(
                "Line {}: Index cannot be 0",
                line_num + 1
            )));
        };

        if result < 0 || result >= count as i64 {
            return Err(ObjError::Parse(format!(
                "Line {}: Index {} out of range (have {} elements)",
                line_num + 1,
                idx,
                count
            )));
        }

        Ok(result as usize)
    }

    /// Fill in normals for vertices the file gave none.
    /// Faces are stored CW, so the CCW normal is edge2 x edge1.
    pub fn compute_face_normals(object: &mut ObjObject) {
        let face_normals: Vec<([usize; 3], Vec3)> = object
            .faces
            .iter()
            .map(|face| {
                let p0 = object.vertices[face.v0].pos;
                let p1 = object.vertices[face.v1].pos;
                let p2 = object.vertices[face.v2].pos;
                let normal = (p2 - p0).cross(p1 - p0).normalize();
                ([face.v0, face.v1, face.v2], normal)
            })
            .collect();

        for (indices, normal) in face_normals {
            for v_idx in indices {
                let vertex = &mut object.vertices[v_idx];
                if vertex.normal == Vec3::ZERO {
                    vertex.normal = normal;
                }
            }
        }
    }
}

/// Error types for OBJ import
#[derive(Debug)]
pub enum ObjError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ObjError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ObjError::Io(e) => write!(f, "IO error: {}", e),
            ObjError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ObjError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_triangle() {
        let obj = r#"
# Simple triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vn 0.0 0.0 1.0
f 1//1 2//1 3//1
"#;

        let objects = ObjImporter::parse(obj).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, DEFAULT_OBJECT_NAME);
        assert_eq!(objects[0].vertices.len(), 3);
        assert_eq!(objects[0].faces.len(), 1);
    }

    #[test]
    fn test_parse_quad_triangulation() {
        let obj = r#"
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3 4
"#;

        let objects = ObjImporter::parse(obj).unwrap();
        assert_eq!(objects[0].vertices.len(), 4);
        assert_eq!(objects[0].faces.len(), 2);
    }

    #[test]
    fn test_named_objects_split() {
        let obj = r#"
o Frame
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
o hul1
v 2.0 0.0 0.0
v 3.0 0.0 0.0
v 2.0 1.0 0.0
f 4 5 6
o C.001
g C.001_mesh
f -3 -2 -1
g loose
f 1 2 3
"#;

        let objects = ObjImporter::parse(obj).unwrap();
        let names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Frame", "hul1", "C.001", "loose"]);

        // Indices are global, vertex lists are per object
        assert_eq!(objects[1].vertices.len(), 3);
        assert!((objects[1].vertices[0].pos.x - 2.0).abs() < 1e-6);
        assert!((objects[2].vertices[0].pos.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_object_dropped() {
        let obj = r#"
o Empty
o Tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
"#;
        let objects = ObjImporter::parse(obj).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "Tri");
    }

    #[test]
    fn test_computed_normal_follows_obj_winding() {
        // CCW in the XY plane seen from +Z: normal is +Z
        let obj = r#"
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
"#;
        let objects = ObjImporter::parse(obj).unwrap();
        let n = objects[0].vertices[0].normal;
        assert!((n.z - 1.0).abs() < 1e-6, "normal {:?}", n);
    }

    #[test]
    fn test_parse_with_texture_coords() {
        let obj = r#"
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
f 1/1 2/2 3/3
"#;

        let objects = ObjImporter::parse(obj).unwrap();
        assert_eq!(objects[0].vertices[0].uv.x, 0.0);
        assert_eq!(objects[0].vertices[1].uv.x, 1.0);
    }

    #[test]
    fn test_bad_index_errors() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n";
        assert!(matches!(ObjImporter::parse(obj), Err(ObjError::Parse(_))));

        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        assert!(matches!(ObjImporter::parse(obj), Err(ObjError::Parse(_))));
    }

    #[test]
    fn test_no_faces_errors() {
        let obj = "o Lonely\nv 0 0 0\n";
        let err = ObjImporter::parse(obj).unwrap_err();
        assert!(err.to_string().contains("No faces"));
    }
}
