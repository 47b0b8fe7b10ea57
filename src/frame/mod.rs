//! Frame model loading and mesh classification
//!
//! - `obj_import` - OBJ parsing into named objects
//! - `classify` - hole / special / frame body naming rules
//! - `material` - unlit and lit part materials
//! - `model` - the loaded frame with its hole and special lists

pub mod classify;
pub mod material;
pub mod model;
pub mod obj_import;

pub use classify::{Classifier, DEFAULT_HOLE_RANGE, DEFAULT_SPECIAL_NAMES};
pub use material::{FRAME_COLOR, HOLE_BOTTOM_COLOR};
pub use model::{load_frame_model, FrameModel, MaterialColors, ModelError};
