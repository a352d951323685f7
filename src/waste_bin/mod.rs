//! # Sorting Bin Geometry
//!
//! Parametric builders for the three-compartment waste-sorting bin. Each
//! builder emits into a [`MeshBuilder`](crate::gfx::geometry::MeshBuilder)
//! under the caller's current transform, leaving the transform and material
//! stacks as it found them.

pub mod body;
pub mod layout;
pub mod lid;
pub mod symbols;

use crate::gfx::resources::material::Rgb;

pub const LID_THICKNESS: f32 = 0.15;
pub const RIM_HEIGHT: f32 = 0.2;

pub const RECYCLABLE: Rgb = [0.0, 0.7, 0.3];
pub const ORGANIC: Rgb = [1.0, 0.6, 0.0];
pub const HAZARDOUS: Rgb = [0.9, 0.1, 0.1];

pub use body::{build_bin_body, corner_disks, CornerDisk};
pub use layout::{build_scene_mesh, Compartment, COMPARTMENTS};
pub use lid::{build_lid, lid_profile_height};
pub use symbols::{draw_hazard_symbol, draw_leaf_symbol, draw_recycle_symbol, SymbolKind};
