//! Flat compartment symbols drawn on the front of the bin
//!
//! Every symbol lies in its local XY plane facing +Z and is drawn under the
//! emissive glyph material. The material scope ends with the symbol, so the
//! emission never reaches geometry drawn afterwards.

use std::f32::consts::PI;

use crate::gfx::{
    geometry::MeshBuilder,
    resources::material::{Material, BLACK},
};

const FACING: [f32; 3] = [0.0, 0.0, 1.0];

/// Z separation between stacked layers of one symbol
pub const LAYER_OFFSET: f32 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Recycle,
    Leaf,
    Hazard,
}

impl SymbolKind {
    pub fn draw(self, b: &mut MeshBuilder, x: f32, y: f32, z: f32, size: f32) {
        match self {
            SymbolKind::Recycle => draw_recycle_symbol(b, x, y, z, size),
            SymbolKind::Leaf => draw_leaf_symbol(b, x, y, z, size),
            SymbolKind::Hazard => draw_hazard_symbol(b, x, y, z, size),
        }
    }
}

/// Runs `f` translated to the symbol origin with the glyph material active
fn glyph_scope(b: &mut MeshBuilder, x: f32, y: f32, z: f32, f: impl FnOnce(&mut MeshBuilder)) {
    b.with_transform(|b| {
        b.translate(x, y, z);
        b.with_material(Material::glyph(), f);
    });
}

/// Three arrows at 120 degree intervals around the origin
pub fn draw_recycle_symbol(b: &mut MeshBuilder, x: f32, y: f32, z: f32, size: f32) {
    let arrow = size * 0.3;
    let offset = size * 0.2;

    glyph_scope(b, x, y, z, |b| {
        for i in 0..3 {
            b.with_transform(|b| {
                b.rotate(i as f32 * 120.0, 0.0, 0.0, 1.0);
                b.translate(0.0, offset, 0.0);

                b.triangle(
                    [0.0, arrow, 0.0],
                    [-arrow * 0.5, 0.0, 0.0],
                    [arrow * 0.5, 0.0, 0.0],
                    FACING,
                );
                b.quad(
                    [-arrow * 0.2, 0.0, 0.0],
                    [arrow * 0.2, 0.0, 0.0],
                    [arrow * 0.2, -arrow * 1.5, 0.0],
                    [-arrow * 0.2, -arrow * 1.5, 0.0],
                    FACING,
                );
            });
        }
    });
}

/// Leaf blade with a stem, a spine and four pairs of veins
pub fn draw_leaf_symbol(b: &mut MeshBuilder, x: f32, y: f32, z: f32, size: f32) {
    const BLADE_SEGMENTS: u32 = 12;
    const VEIN_PAIRS: u32 = 4;

    glyph_scope(b, x, y, z, |b| {
        let blade: Vec<[f32; 3]> = (0..=BLADE_SEGMENTS)
            .map(|i| {
                let angle = PI * i as f32 / BLADE_SEGMENTS as f32;
                [angle.sin() * size * 0.4, -angle.cos() * size * 0.8, 0.0]
            })
            .collect();
        b.triangle_fan([0.0, size * 0.5, 0.0], &blade, FACING);

        b.quad(
            [-size * 0.05, -size * 0.3, 0.0],
            [size * 0.05, -size * 0.3, 0.0],
            [size * 0.05, -size * 0.8, 0.0],
            [-size * 0.05, -size * 0.8, 0.0],
            FACING,
        );

        let z = LAYER_OFFSET;
        b.line([0.0, size * 0.5, z], [0.0, -size * 0.3, z], FACING);
        for i in 1..=VEIN_PAIRS {
            let pos = -size * 0.3 + i as f32 * (size * 0.8 / 5.0);
            let reach = (i as f32 * PI / 10.0).sin() * size * 0.35;
            let tip = pos - size * 0.1;
            b.line([0.0, pos, z], [-reach, tip, z], FACING);
            b.line([0.0, pos, z], [reach, tip, z], FACING);
        }
    });
}

/// Warning triangle with a black border and an exclamation mark
pub fn draw_hazard_symbol(b: &mut MeshBuilder, x: f32, y: f32, z: f32, size: f32) {
    let border = size * 0.05;

    glyph_scope(b, x, y, z, |b| {
        b.triangle(
            [0.0, size * 0.6, 0.0],
            [-size * 0.5, -size * 0.4, 0.0],
            [size * 0.5, -size * 0.4, 0.0],
            FACING,
        );

        b.with_material(Material::flat(BLACK), |b| {
            let z = LAYER_OFFSET;
            b.triangle(
                [0.0, size * 0.6 - border, z],
                [-size * 0.5 + border, -size * 0.4 + border, z],
                [size * 0.5 - border, -size * 0.4 + border, z],
                FACING,
            );
        });

        let z = 2.0 * LAYER_OFFSET;
        // Stem
        b.quad(
            [-size * 0.05, size * 0.2, z],
            [size * 0.05, size * 0.2, z],
            [size * 0.05, -size * 0.2, z],
            [-size * 0.05, -size * 0.2, z],
            FACING,
        );
        // Dot
        b.quad(
            [-size * 0.05, -size * 0.25, z],
            [size * 0.05, -size * 0.25, z],
            [size * 0.05, -size * 0.35, z],
            [-size * 0.05, -size * 0.35, z],
            FACING,
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::Topology;

    const UP: [f32; 3] = [0.0, 1.0, 0.0];

    fn draw_then_plain(kind: SymbolKind) -> crate::gfx::geometry::SceneMesh {
        let mut b = MeshBuilder::new();
        kind.draw(&mut b, 0.0, 2.0, 3.2, 1.0);
        assert_eq!(b.transform_depth(), 1);
        assert_eq!(b.material_depth(), 1);
        b.triangle([0.0; 3], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0], UP);
        b.finish()
    }

    #[test]
    fn test_emission_does_not_leak() {
        for kind in [SymbolKind::Recycle, SymbolKind::Leaf, SymbolKind::Hazard] {
            let mesh = draw_then_plain(kind);
            let last = mesh.batches.last().expect("batch");
            assert!(!last.material.is_emissive(), "{kind:?} leaked emission");
            assert_eq!(last.material, Material::default());
        }
    }

    #[test]
    fn test_recycle_has_three_arrows() {
        let mut b = MeshBuilder::new();
        draw_recycle_symbol(&mut b, 0.0, 0.0, 0.0, 1.0);
        let mesh = b.finish();
        assert_eq!(mesh.batches.len(), 1);
        // Head triangle and two shaft triangles per arrow
        assert_eq!(mesh.stats().triangles, 9);

        // Arrow tips sit 0.5 from the center, one every 120 degrees
        let tips: Vec<[f32; 3]> = mesh.batches[0].vertices.iter().step_by(7).map(|v| v.position).collect();
        assert_eq!(tips.len(), 3);
        for tip in tips {
            let r = (tip[0].powi(2) + tip[1].powi(2)).sqrt();
            assert!((r - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_leaf_parts() {
        let mut b = MeshBuilder::new();
        draw_leaf_symbol(&mut b, 0.0, 0.0, 0.0, 1.0);
        let mesh = b.finish();
        let stats = mesh.stats();
        assert_eq!(stats.triangles, 12 + 2);
        assert_eq!(stats.lines, 1 + 4 * 2);
        assert!(mesh.batches.iter().all(|b| b.material.is_emissive()));
    }

    #[test]
    fn test_hazard_layers() {
        let mut b = MeshBuilder::new();
        draw_hazard_symbol(&mut b, 4.0, 2.1, 3.2, 1.0);
        let mesh = b.finish();
        assert_eq!(mesh.batches.len(), 3);
        assert!(mesh.batches[0].material.is_emissive());
        assert_eq!(mesh.batches[1].material.diffuse_rgb(), BLACK);
        assert!(!mesh.batches[1].material.is_emissive());
        assert!(mesh.batches[2].material.is_emissive());

        // Each layer sits in front of the one before it
        let z = |i: usize| mesh.batches[i].vertices[0].position[2];
        assert!(z(0) < z(1) && z(1) < z(2));
        assert!(mesh.batches.iter().all(|b| b.topology == Topology::Triangles));
    }
}
