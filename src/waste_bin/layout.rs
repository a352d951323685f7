//! Assembles the full sorting bin scene
//!
//! The bin is raised slightly off the ground; the body, dividers and lids are
//! placed relative to the body center, the symbols relative to the bin base.

use log::{debug, info};

use crate::gfx::{
    geometry::{MeshBuilder, SceneMesh},
    resources::material::{Material, Rgb},
};

use super::{
    body::build_bin_body, lid::build_lid, symbols::SymbolKind, HAZARDOUS, LID_THICKNESS,
    ORGANIC, RECYCLABLE, RIM_HEIGHT,
};

pub const BIN_WIDTH: f32 = 12.0;
pub const BIN_HEIGHT: f32 = 5.0;
pub const BIN_DEPTH: f32 = 6.0;

/// Lift of the whole bin above the ground
pub const BASE_LIFT: f32 = 0.25;
/// Lift of the body center above the bin base
pub const BODY_LIFT: f32 = 2.1;

pub const BODY_COLOR: Rgb = [0.7, 0.7, 0.7];
pub const DIVIDER_COLOR: Rgb = [0.5, 0.5, 0.5];
pub const DIVIDER_X: [f32; 2] = [-2.0, 2.0];
const DIVIDER_THICKNESS: f32 = 0.1;

pub const COMPARTMENT_WIDTH: f32 = 3.9;

const LABEL_Y: f32 = 2.1;
const LABEL_Z: f32 = 3.2;
const LABEL_SIZE: f32 = 1.0;

const GROUND_HALF_EXTENT: f32 = 20.0;
const GROUND_COLOR: Rgb = [0.6, 0.6, 0.6];

/// One of the three sorting compartments, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compartment {
    Recyclable,
    Organic,
    Hazardous,
}

pub const COMPARTMENTS: [Compartment; 3] = [
    Compartment::Recyclable,
    Compartment::Organic,
    Compartment::Hazardous,
];

impl Compartment {
    pub fn color(self) -> Rgb {
        match self {
            Compartment::Recyclable => RECYCLABLE,
            Compartment::Organic => ORGANIC,
            Compartment::Hazardous => HAZARDOUS,
        }
    }

    pub fn symbol(self) -> SymbolKind {
        match self {
            Compartment::Recyclable => SymbolKind::Recycle,
            Compartment::Organic => SymbolKind::Leaf,
            Compartment::Hazardous => SymbolKind::Hazard,
        }
    }

    /// Center of the compartment along X
    pub fn x(self) -> f32 {
        match self {
            Compartment::Recyclable => -4.0,
            Compartment::Organic => 0.0,
            Compartment::Hazardous => 4.0,
        }
    }
}

/// Height of a divider, flush with the bottom of the rim
pub fn divider_height() -> f32 {
    BIN_HEIGHT - RIM_HEIGHT
}

/// Lid center height relative to the body center
pub fn lid_height() -> f32 {
    BIN_HEIGHT / 2.0 - RIM_HEIGHT - LID_THICKNESS / 2.0
}

pub fn draw_ground(b: &mut MeshBuilder) {
    let e = GROUND_HALF_EXTENT;
    b.with_material(Material::flat(GROUND_COLOR), |b| {
        b.quad([-e, 0.0, -e], [-e, 0.0, e], [e, 0.0, e], [e, 0.0, -e], [0.0, 1.0, 0.0]);
    });
}

/// Thin upright slab separating two compartments
pub fn draw_divider(b: &mut MeshBuilder, x: f32, y: f32, z: f32, height: f32, depth: f32, color: Rgb) {
    let material = Material::shaded(color).with_specular(0.4).with_shininess(20.0);
    b.with_material(material, |b| {
        b.with_transform(|b| {
            b.translate(x, y, z);
            b.scale(DIVIDER_THICKNESS, height, depth);
            b.unit_cube();
        });
    });
}

/// Emits the body, dividers, lids and compartment symbols
pub fn draw_sorting_bin(b: &mut MeshBuilder) {
    b.with_transform(|b| {
        b.translate(0.0, BASE_LIFT, 0.0);

        b.with_transform(|b| {
            b.translate(0.0, BODY_LIFT, 0.0);
            build_bin_body(b, BIN_WIDTH, BIN_HEIGHT, BIN_DEPTH, BODY_COLOR);

            let height = divider_height();
            let y = -BIN_HEIGHT / 2.0 + height / 2.0;
            for x in DIVIDER_X {
                draw_divider(b, x, y, 0.0, height, BIN_DEPTH * 0.9, DIVIDER_COLOR);
            }

            for compartment in COMPARTMENTS {
                b.with_transform(|b| {
                    b.translate(compartment.x(), lid_height(), 0.0);
                    build_lid(b, COMPARTMENT_WIDTH, BIN_DEPTH, compartment.color());
                });
            }
        });

        for compartment in COMPARTMENTS {
            compartment
                .symbol()
                .draw(b, compartment.x(), LABEL_Y, LABEL_Z, LABEL_SIZE);
        }
    });
}

/// Builds the complete retained scene: ground plus sorting bin
pub fn build_scene_mesh() -> SceneMesh {
    let mut builder = MeshBuilder::new();
    draw_ground(&mut builder);
    draw_sorting_bin(&mut builder);
    let mesh = builder.finish();

    let stats = mesh.stats();
    info!(
        "Scene built: {} batches, {} vertices, {} triangles, {} lines",
        stats.batches, stats.vertices, stats.triangles, stats.lines
    );
    for (i, batch) in mesh.batches.iter().enumerate() {
        debug!(
            "batch {i}: {:?} x{} diffuse {:?}",
            batch.topology,
            batch.primitive_count(),
            batch.material.diffuse_rgb()
        );
    }
    mesh
}
