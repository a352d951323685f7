//! Domed compartment lid with a front grip edge and a highlight outline

use std::f32::consts::PI;

use crate::gfx::{
    geometry::MeshBuilder,
    resources::material::{brighten, scale_rgb, Material, Rgb},
};

use super::LID_THICKNESS;

/// Width-wise subdivisions of the domed top
pub const LID_SEGMENTS: u32 = 10;
/// Peak rise of the dome above the nominal top plane
pub const DOME_HEIGHT: f32 = 0.1;

const GRIP_DEPTH: f32 = 0.2;
const GRIP_SPAN: f32 = 0.8;

const UP: [f32; 3] = [0.0, 1.0, 0.0];
const DOWN: [f32; 3] = [0.0, -1.0, 0.0];
const FRONT: [f32; 3] = [0.0, 0.0, 1.0];
const BACK: [f32; 3] = [0.0, 0.0, -1.0];
const LEFT: [f32; 3] = [-1.0, 0.0, 0.0];
const RIGHT: [f32; 3] = [1.0, 0.0, 0.0];

/// Height of the top surface at segment edge `i`
///
/// A half-sine bulge: both ends sit at `thickness / 2`, the middle rises by
/// [`DOME_HEIGHT`].
pub fn lid_profile_height(i: u32, segments: u32, thickness: f32) -> f32 {
    let t = i as f32 / segments.max(1) as f32;
    thickness / 2.0 + (t * PI).sin() * DOME_HEIGHT
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LidPalette {
    pub main: Material,
    pub edge: Material,
    pub highlight: Material,
}

pub fn lid_palette(color: Rgb) -> LidPalette {
    let lid = brighten(color, 1.6);
    let main = Material::shaded(lid).with_specular(0.8).with_shininess(60.0);
    LidPalette {
        main,
        edge: main.with_diffuse(scale_rgb(lid, 0.9)),
        highlight: Material::glyph(),
    }
}

/// Builds a lid centered on the local origin
pub fn build_lid(b: &mut MeshBuilder, width: f32, depth: f32, color: Rgb) {
    let palette = lid_palette(color);
    let (w, d) = (width / 2.0, depth / 2.0);
    let half = LID_THICKNESS / 2.0;

    b.with_material(palette.main, |b| {
        domed_top(b, w, d);
        // Bottom
        b.quad([-w, -half, -d], [w, -half, -d], [w, -half, d], [-w, -half, d], DOWN);
        // Front
        b.quad([-w, -half, d], [w, -half, d], [w, half, d], [-w, half, d], FRONT);
        // Back
        b.quad([-w, -half, -d], [-w, half, -d], [w, half, -d], [w, -half, -d], BACK);
        // Left
        b.quad([-w, -half, -d], [-w, -half, d], [-w, half, d], [-w, half, -d], LEFT);
        // Right
        b.quad([w, -half, -d], [w, half, -d], [w, half, d], [w, -half, d], RIGHT);
    });

    b.with_material(palette.edge, |b| grip_edge(b, w, d, half));
    b.with_material(palette.highlight, |b| b.line_loop(&outline(w, d), UP));
}

fn profile_x(i: u32, w: f32) -> f32 {
    -w + i as f32 * (2.0 * w / LID_SEGMENTS as f32)
}

fn domed_top(b: &mut MeshBuilder, w: f32, d: f32) {
    for i in 0..LID_SEGMENTS {
        let (x1, x2) = (profile_x(i, w), profile_x(i + 1, w));
        let y1 = lid_profile_height(i, LID_SEGMENTS, LID_THICKNESS);
        let y2 = lid_profile_height(i + 1, LID_SEGMENTS, LID_THICKNESS);

        // Tilt the normal with the local slope of the dome
        let (nx, ny) = (-(y2 - y1), x2 - x1);
        let len = (nx * nx + ny * ny).sqrt();
        let normal = if len > f32::EPSILON { [nx / len, ny / len, 0.0] } else { UP };

        b.quad([x1, y1, -d], [x1, y1, d], [x2, y2, d], [x2, y2, -d], normal);
    }
}

fn grip_edge(b: &mut MeshBuilder, w: f32, d: f32, half: f32) {
    let gw = w * GRIP_SPAN;
    let front = d + GRIP_DEPTH;
    // Top
    b.quad([-gw, half, d], [-gw, half, front], [gw, half, front], [gw, half, d], UP);
    // Front
    b.quad([-gw, -half, front], [gw, -half, front], [gw, half, front], [-gw, half, front], FRONT);
    // Left
    b.quad([-gw, -half, d], [-gw, -half, front], [-gw, half, front], [-gw, half, d], LEFT);
    // Right
    b.quad([gw, -half, d], [gw, half, d], [gw, half, front], [gw, -half, front], RIGHT);
}

/// Silhouette of the top surface: front profile left to right, then the back
/// profile right to left
fn outline(w: f32, d: f32) -> Vec<[f32; 3]> {
    let point = |i: u32, z: f32| [profile_x(i, w), lid_profile_height(i, LID_SEGMENTS, LID_THICKNESS), z];
    let front = (0..=LID_SEGMENTS).map(|i| point(i, d));
    let back = (0..=LID_SEGMENTS).rev().map(|i| point(i, -d));
    front.chain(back).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::Topology;

    #[test]
    fn test_profile_endpoints_are_flush() {
        let half = LID_THICKNESS / 2.0;
        assert_eq!(lid_profile_height(0, LID_SEGMENTS, LID_THICKNESS), half);
        assert!((lid_profile_height(LID_SEGMENTS, LID_SEGMENTS, LID_THICKNESS) - half).abs() < 1e-6);
    }

    #[test]
    fn test_profile_peaks_in_the_middle() {
        let peak = lid_profile_height(LID_SEGMENTS / 2, LID_SEGMENTS, LID_THICKNESS);
        assert!((peak - (LID_THICKNESS / 2.0 + DOME_HEIGHT)).abs() < 1e-6);
        for i in 1..LID_SEGMENTS {
            assert!(lid_profile_height(i, LID_SEGMENTS, LID_THICKNESS) > LID_THICKNESS / 2.0);
            assert!(lid_profile_height(i, LID_SEGMENTS, LID_THICKNESS) <= peak + 1e-6);
        }
    }

    #[test]
    fn test_lid_palette() {
        let p = lid_palette([0.9, 0.1, 0.1]);
        assert_eq!(p.main.diffuse[0], 1.0);
        assert!((p.main.diffuse[1] - 0.16).abs() < 1e-6);
        assert!((p.edge.diffuse[0] - 0.9).abs() < 1e-6);
        assert_eq!(p.main.specular, [0.8, 0.8, 0.8, 1.0]);
        assert_eq!(p.main.shininess, 60.0);
        assert!(p.highlight.is_emissive());
        assert!(!p.main.is_emissive() && !p.edge.is_emissive());
    }

    #[test]
    fn test_lid_parts() {
        let mut b = MeshBuilder::new();
        build_lid(&mut b, 3.9, 6.0, [0.0, 0.7, 0.3]);
        assert_eq!(b.transform_depth(), 1);
        assert_eq!(b.material_depth(), 1);
        let mesh = b.finish();

        assert_eq!(mesh.batches.len(), 3);
        // 10 dome quads and 5 closing faces
        assert_eq!(mesh.batches[0].primitive_count(), 2 * (LID_SEGMENTS as usize + 5));
        // 4 grip faces
        assert_eq!(mesh.batches[1].primitive_count(), 8);
        let highlight = &mesh.batches[2];
        assert_eq!(highlight.topology, Topology::Lines);
        assert_eq!(highlight.primitive_count(), 2 * (LID_SEGMENTS as usize + 1));
    }

    #[test]
    fn test_outline_traces_both_long_edges() {
        let points = outline(1.95, 3.0);
        assert_eq!(points.len(), 2 * (LID_SEGMENTS as usize + 1));
        assert_eq!(points.first().map(|p| p[2]), Some(3.0));
        assert_eq!(points.last().map(|p| p[2]), Some(-3.0));
        // The loop closes across the left end cap
        assert_eq!(points[0][0], points[points.len() - 1][0]);
    }

    #[test]
    fn test_dome_normals_point_up_and_outward() {
        let mut b = MeshBuilder::new();
        domed_top(&mut b, 1.95, 3.0);
        let mesh = b.finish();
        let v = &mesh.batches[0].vertices;
        // First segment rises, so its normal leans toward -X
        assert!(v[0].normal[0] < 0.0 && v[0].normal[1] > 0.9);
        let last = &v[v.len() - 1];
        assert!(last.normal[0] > 0.0);
    }
}
