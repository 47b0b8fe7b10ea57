//! Frame model: named parts, their classification and materials

use super::classify::{Classifier, MeshClass};
use super::material::{Material, FRAME_COLOR, HOLE_BOTTOM_COLOR};
use super::obj_import::{ObjError, ObjImporter, ObjObject};
use crate::rasterizer::{mat4_transform_direction, mat4_transform_point, Color, Face, Mat4, Vec3, Vertex};
use log::{debug, info};

/// Colors assigned to parts at load time
#[derive(Debug, Clone, Copy)]
pub struct MaterialColors {
    pub frame: Color,
    pub hole_bottom: Color,
}

impl Default for MaterialColors {
    fn default() -> Self {
        Self { frame: FRAME_COLOR, hole_bottom: HOLE_BOTTOM_COLOR }
    }
}

/// One named mesh of the frame, baked into world space
#[derive(Debug, Clone)]
pub struct FramePart {
    pub name: String,
    pub class: MeshClass,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub material: Material,
    /// Center of the world-space bounding box
    pub position: Vec3,
}

impl FramePart {
    /// Bake `object` through `transform` and give it the material for `class`
    pub fn new(object: ObjObject, class: MeshClass, transform: &Mat4, colors: &MaterialColors) -> Self {
        let vertices: Vec<Vertex> = object
            .vertices
            .into_iter()
            .map(|v| Vertex {
                pos: mat4_transform_point(transform, v.pos),
                normal: mat4_transform_direction(transform, v.normal).normalize(),
                ..v
            })
            .collect();

        let position = bounds_center(&vertices);

        let material = match class {
            MeshClass::Hole(_) | MeshClass::Special(_) => Material::unlit(colors.hole_bottom),
            MeshClass::FrameBody => Material::frame(colors.frame),
        };

        Self {
            name: object.name,
            class,
            vertices,
            faces: object.faces,
            material,
            position,
        }
    }
}

fn bounds_center(vertices: &[Vertex]) -> Vec3 {
    let Some(first) = vertices.first() else {
        return Vec3::ZERO;
    };
    let (min, max) = vertices
        .iter()
        .fold((first.pos, first.pos), |(min, max), v| (min.min(v.pos), max.max(v.pos)));
    (min + max).scale(0.5)
}

/// The loaded frame. Owns the part list and the hole/special index lists;
/// classification never changes after construction.
#[derive(Debug, Clone, Default)]
pub struct FrameModel {
    parts: Vec<FramePart>,
    holes: Vec<usize>,
    specials: Vec<usize>,
}

impl FrameModel {
    /// Classify and bake parsed objects, keeping file order
    pub fn from_objects(
        objects: Vec<ObjObject>,
        classifier: &Classifier,
        transform: &Mat4,
        colors: &MaterialColors,
    ) -> Self {
        let mut model = FrameModel::default();

        for object in objects {
            let class = classifier.classify(&object.name);

            let index = model.parts.len();
            match class {
                MeshClass::Hole(_) => model.holes.push(index),
                MeshClass::Special(_) => model.specials.push(index),
                MeshClass::FrameBody => {}
            }
            let part = FramePart::new(object, class, transform, colors);
            debug!("mesh '{}' -> {:?}, {}", part.name, part.class, part.material);
            model.parts.push(part);
        }

        info!(
            "frame model: {} parts, {} holes, {} special objects",
            model.parts.len(),
            model.holes.len(),
            model.specials.len()
        );
        model
    }

    /// Parse OBJ text and build the model
    pub fn parse(
        contents: &str,
        classifier: &Classifier,
        transform: &Mat4,
        colors: &MaterialColors,
    ) -> Result<Self, ModelError> {
        let objects = ObjImporter::parse(contents)?;
        Ok(Self::from_objects(objects, classifier, transform, colors))
    }

    pub fn parts(&self) -> &[FramePart] {
        &self.parts
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    pub fn special_count(&self) -> usize {
        self.specials.len()
    }

    /// Holes in load order
    pub fn holes(&self) -> impl Iterator<Item = &FramePart> {
        self.holes.iter().map(|&i| &self.parts[i])
    }

    /// Special pieces in load order
    pub fn specials(&self) -> impl Iterator<Item = &FramePart> {
        self.specials.iter().map(|&i| &self.parts[i])
    }

    /// World positions of the holes, in load order
    pub fn hole_positions(&self) -> Vec<Vec3> {
        self.holes().map(|p| p.position).collect()
    }

    /// Hole numbers, in load order
    pub fn hole_numbers(&self) -> Vec<u32> {
        self.holes()
            .filter_map(|p| match p.class {
                MeshClass::Hole(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    /// Recolor the `hole`-th hole (load order)
    pub fn set_hole_color(&mut self, hole: usize, color: Color) {
        if let Some(&index) = self.holes.get(hole) {
            self.parts[index].material.set_color(color);
        }
    }

    /// Recolor every special piece
    pub fn set_special_colors(&mut self, color: Color) {
        for &index in &self.specials {
            self.parts[index].material.set_color(color);
        }
    }
}

/// Load the frame model through macroquad's file loader (native and web)
pub async fn load_frame_model(
    path: &str,
    classifier: &Classifier,
    transform: &Mat4,
    colors: &MaterialColors,
) -> Result<FrameModel, ModelError> {
    let contents = macroquad::prelude::load_string(path)
        .await
        .map_err(|e| ModelError::Load(format!("{}: {}", path, e)))?;
    FrameModel::parse(&contents, classifier, transform, colors)
}

/// Error types for model loading
#[derive(Debug)]
pub enum ModelError {
    Load(String),
    Obj(ObjError),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ModelError::Load(e) => write!(f, "Failed to load model {}", e),
            ModelError::Obj(e) => write!(f, "Invalid model: {}", e),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Obj(e) => Some(e),
            ModelError::Load(_) => None,
        }
    }
}

impl From<ObjError> for ModelError {
    fn from(e: ObjError) -> Self {
        ModelError::Obj(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::mat4_rotation;

    fn square(name: &str, cx: f32, cy: f32) -> String {
        format!(
            "o {name}\nv {x0} {y0} 0\nv {x1} {y0} 0\nv {x1} {y1} 0\nv {x0} {y1} 0\nf -4 -3 -2 -1\n",
            name = name,
            x0 = cx - 0.1,
            x1 = cx + 0.1,
            y0 = cy - 0.1,
            y1 = cy + 0.1,
        )
    }

    fn sample_model() -> FrameModel {
        let obj = [
            square("Frame", 0.0, 0.0),
            square("hul2", 1.0, 0.0),
            square("C.001", 2.0, 0.0),
            square("hul1", 3.0, 0.0),
            square("Z", 4.0, 0.0),
            square("hul70", 5.0, 0.0),
        ]
        .concat();
        FrameModel::parse(&obj, &Classifier::default(), &mat4_rotation(Vec3::ZERO), &MaterialColors::default()).unwrap()
    }

    #[test]
    fn test_classification_lists_keep_load_order() {
        let model = sample_model();
        assert_eq!(model.parts().len(), 6);
        assert_eq!(model.hole_count(), 2);
        assert_eq!(model.special_count(), 2);
        assert_eq!(model.hole_numbers(), vec![2, 1]);
        let specials: Vec<&str> = model.specials().map(|p| p.name.as_str()).collect();
        assert_eq!(specials, vec!["C.001", "Z"]);
    }

    #[test]
    fn test_materials_assigned_by_class() {
        let model = sample_model();
        for part in model.parts() {
            match part.class {
                MeshClass::Hole(_) | MeshClass::Special(_) => {
                    assert_eq!(part.material, Material::unlit(HOLE_BOTTOM_COLOR), "{}", part.name);
                }
                MeshClass::FrameBody => {
                    assert_eq!(part.material, Material::frame(FRAME_COLOR), "{}", part.name);
                }
            }
        }
    }

    #[test]
    fn test_position_is_bounds_center_after_transform() {
        let obj = square("hul5", 1.0, 2.0);
        let transform = mat4_rotation(Vec3::new(90.0, 0.0, 0.0));
        let model = FrameModel::parse(&obj, &Classifier::default(), &transform, &MaterialColors::default()).unwrap();
        let p = model.hole_positions()[0];
        // (1, 2, 0) rotated +90 around X
        assert!((p.x - 1.0).abs() < 1e-5);
        assert!(p.y.abs() < 1e-5);
        assert!((p.z - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_set_colors() {
        let mut model = sample_model();
        let red = Color::new(255, 0, 0);
        model.set_hole_color(1, red);
        model.set_special_colors(Color::WHITE);
        // Out of range index is ignored
        model.set_hole_color(9, red);

        let colors: Vec<Color> = model.parts().iter().map(|p| p.material.color()).collect();
        assert_eq!(
            colors,
            vec![FRAME_COLOR, HOLE_BOTTOM_COLOR, Color::WHITE, red, Color::WHITE, FRAME_COLOR]
        );
    }

    #[test]
    fn test_bundled_frame_model() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/models/frame.obj");
        let contents = std::fs::read_to_string(&path).expect("bundled frame model should exist");
        let transform = mat4_rotation(Vec3::new(90.0, 0.0, 0.0));
        let model = FrameModel::parse(&contents, &Classifier::default(), &transform, &MaterialColors::default())
            .unwrap();

        assert_eq!(model.hole_count(), 62);
        assert_eq!(model.special_count(), 10);

        let mut numbers = model.hole_numbers();
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=62).collect::<Vec<u32>>());

        // Holes sit in front of the image plane once the model stands upright
        assert!(model.hole_positions().iter().all(|p| p.z > -0.5));
    }

    #[test]
    fn test_invalid_model_error() {
        let err = FrameModel::parse("o Broken\n", &Classifier::default(), &mat4_rotation(Vec3::ZERO), &MaterialColors::default())
            .unwrap_err();
        assert!(matches!(err, ModelError::Obj(_)));
        assert!(err.to_string().starts_with("Invalid model"));
    }
}
