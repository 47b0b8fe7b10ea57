//! Neighbor-aware palette assignment for the frame's holes
//!
//! Holes are visited in load order. Each one draws a random palette index,
//! retrying up to `palette_len` times to avoid indices used by neighbors that
//! were already visited, then falls back to an unconstrained draw. The result
//! is usually, not always, free of neighbor collisions; `count_collisions`
//! reports how many adjacent pairs ended up sharing a color.

use crate::frame::FrameModel;
use crate::rasterizer::{Color, Vec3};
use log::{debug, info};
use rand::Rng;
use std::collections::HashSet;

/// Holes closer than this (world units) are neighbors
pub const DEFAULT_NEIGHBOR_DISTANCE: f32 = 0.8;

/// Adjacency lists over hole indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeighborGraph {
    neighbors: Vec<Vec<usize>>,
}

impl NeighborGraph {
    /// All pairs strictly closer than `max_distance`
    pub fn build(positions: &[Vec3], max_distance: f32) -> Self {
        let mut neighbors = vec![Vec::new(); positions.len()];
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                if positions[i].distance(positions[j]) < max_distance {
                    neighbors[i].push(j);
                    neighbors[j].push(i);
                }
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }
        Self { neighbors }
    }

    pub fn neighbors(&self, hole: usize) -> &[usize] {
        self.neighbors.get(hole).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }
}

/// Draw a palette index, retrying `palette_len` times to miss `used`.
/// Draws with replacement, so a free index can still be missed.
pub fn select_color_avoiding<R: Rng>(used: &HashSet<usize>, palette_len: usize, rng: &mut R) -> usize {
    for _ in 0..palette_len {
        let index = rng.gen_range(0..palette_len);
        if !used.contains(&index) {
            return index;
        }
    }
    rng.gen_range(0..palette_len)
}

/// Palette index per hole, in graph order. Empty when there is nothing to pick from.
pub fn assign_colors<R: Rng>(graph: &NeighborGraph, palette_len: usize, rng: &mut R) -> Vec<usize> {
    if graph.is_empty() || palette_len == 0 {
        return Vec::new();
    }
    let mut assigned: Vec<Option<usize>> = vec![None; graph.len()];

    for hole in 0..graph.len() {
        let used: HashSet<usize> = graph
            .neighbors(hole)
            .iter()
            .filter_map(|&n| assigned[n])
            .collect();
        let index = select_color_avoiding(&used, palette_len, rng);
        debug!("hole {} -> palette {} (neighbors use {:?})", hole, index, used);
        assigned[hole] = Some(index);
    }

    assigned.into_iter().flatten().collect()
}

/// Adjacent pairs that share a palette index
pub fn count_collisions(graph: &NeighborGraph, assignment: &[usize]) -> usize {
    (0..graph.len())
        .flat_map(|i| graph.neighbors(i).iter().map(move |&j| (i, j)))
        .filter(|&(i, j)| i < j && assignment.get(i).is_some() && assignment.get(i) == assignment.get(j))
        .count()
}

/// Summary of one apply
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    pub hole_count: usize,
    pub special_count: usize,
    /// Color given to hole #1 (and the specials), if a hole #1 exists
    pub primary_color: Option<Color>,
    pub collisions: usize,
}

impl std::fmt::Display for ApplyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Colors applied to {} holes!", self.hole_count)?;
        match self.collisions {
            0 => write!(f, " No neighboring holes share a color."),
            1 => write!(f, " 1 neighboring pair shares a color."),
            n => write!(f, " {} neighboring pairs share a color.", n),
        }
    }
}

/// Apply failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    NoHoles,
    EmptyPalette,
}

impl std::fmt::Display for AssignError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AssignError::NoHoles => write!(f, "No holes found - wait for the model to load"),
            AssignError::EmptyPalette => write!(f, "No palette colors to apply"),
        }
    }
}

impl std::error::Error for AssignError {}

/// Color every hole from `palette`, then give the specials hole #1's color.
/// Nothing is touched when the model has no holes or the palette is empty.
pub fn apply_colors<R: Rng>(
    model: &mut FrameModel,
    palette: &[Color],
    max_distance: f32,
    rng: &mut R,
) -> Result<ApplyReport, AssignError> {
    if model.hole_count() == 0 {
        return Err(AssignError::NoHoles);
    }
    if palette.is_empty() {
        return Err(AssignError::EmptyPalette);
    }

    let graph = NeighborGraph::build(&model.hole_positions(), max_distance);
    let assignment = assign_colors(&graph, palette.len(), rng);

    let numbers = model.hole_numbers();

    let mut primary_color = None;
    for (hole, &index) in assignment.iter().enumerate() {
        let color = palette[index];
        model.set_hole_color(hole, color);
        if numbers.get(hole) == Some(&1) {
            primary_color = Some(color);
        }
    }

    if let Some(color) = primary_color {
        model.set_special_colors(color);
    }

    let report = ApplyReport {
        hole_count: model.hole_count(),
        special_count: model.special_count(),
        primary_color,
        collisions: count_collisions(&graph, &assignment),
    };
    info!(
        "applied colors: {} holes, {} specials, primary {:?}, {} collisions over {} neighbor pairs",
        report.hole_count,
        report.special_count,
        report.primary_color.map(|c| c.to_string()),
        report.collisions,
        graph.edge_count()
    );
    Ok(report)
}
