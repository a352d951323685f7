//! # Primitive Shape Generation
//!
//! Quadric-style primitives emitted straight into a [`MeshBuilder`]. Angles
//! on disks and cylinders follow the usual quadric convention: measured from
//! +Y toward +X in the local XY plane, with the axis along +Z.

use super::MeshBuilder;
use std::f32::consts::PI;

/// Point on a circle of `radius` at `angle` radians, quadric convention
fn ring_point(radius: f32, angle: f32, z: f32) -> [f32; 3] {
    [radius * angle.sin(), radius * angle.cos(), z]
}

impl MeshBuilder {
    /// Closed cylinder standing on the local origin and extending along +Y
    ///
    /// The side wall uses smooth radial normals; both caps face away from
    /// the body. `segments` below 3 gives degenerate geometry.
    pub fn cylinder(&mut self, radius: f32, height: f32, segments: u32) {
        self.with_transform(|b| {
            // Build along +Z, then tip the axis up to +Y
            b.rotate(-90.0, 1.0, 0.0, 0.0);

            let step = 2.0 * PI / segments.max(1) as f32;
            for i in 0..segments {
                let a0 = i as f32 * step;
                let a1 = (i + 1) as f32 * step;
                let n0 = [a0.sin(), a0.cos(), 0.0];
                let n1 = [a1.sin(), a1.cos(), 0.0];
                b.quad_smooth([
                    (ring_point(radius, a0, 0.0), n0),
                    (ring_point(radius, a1, 0.0), n1),
                    (ring_point(radius, a1, height), n1),
                    (ring_point(radius, a0, height), n0),
                ]);
            }

            let ring = |z: f32| -> Vec<[f32; 3]> {
                (0..=segments)
                    .map(|i| ring_point(radius, i as f32 * step, z))
                    .collect()
            };
            b.triangle_fan([0.0, 0.0, 0.0], &ring(0.0), [0.0, 0.0, -1.0]);
            b.triangle_fan([0.0, 0.0, height], &ring(height), [0.0, 0.0, 1.0]);
        });
    }

    /// Filled circular sector in the local XY plane, facing +Z
    ///
    /// The sector starts at `start_deg` and sweeps `sweep_deg` clockwise
    /// when seen from +Z, i.e. from +Y toward +X.
    pub fn partial_disk(&mut self, radius: f32, slices: u32, start_deg: f32, sweep_deg: f32) {
        let start = start_deg.to_radians();
        let step = sweep_deg.to_radians() / slices.max(1) as f32;
        let rim: Vec<[f32; 3]> = (0..=slices)
            .map(|i| ring_point(radius, start + i as f32 * step, 0.0))
            .collect();
        self.triangle_fan([0.0, 0.0, 0.0], &rim, [0.0, 0.0, 1.0]);
    }

    /// Axis-aligned cube of edge 1 centered at the local origin
    pub fn unit_cube(&mut self) {
        // (normal, four corners counter-clockwise seen from outside)
        #[rustfmt::skip]
        const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
            // Front face
            ([0.0, 0.0, 1.0],  [[-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5]]),
            // Back face
            ([0.0, 0.0, -1.0], [[-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5]]),
            // Left face
            ([-1.0, 0.0, 0.0], [[-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5]]),
            // Right face
            ([1.0, 0.0, 0.0],  [[ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5]]),
            // Top face
            ([0.0, 1.0, 0.0],  [[-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5]]),
            // Bottom face
            ([0.0, -1.0, 0.0], [[-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5]]),
        ];

        for (normal, [a, b, c, d]) in FACES {
            self.quad(a, b, c, d, normal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::Topology;

    #[test]
    fn test_cube_generation() {
        let mut b = MeshBuilder::new();
        b.unit_cube();
        let mesh = b.finish();
        let stats = mesh.stats();
        assert_eq!(stats.vertices, 24); // 6 faces * 4 vertices
        assert_eq!(stats.triangles, 12);
        for v in mesh.vertices() {
            assert!(v.position.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn test_cylinder_generation() {
        let mut b = MeshBuilder::new();
        b.cylinder(0.4, 0.2, 8);
        let mesh = b.finish();
        let stats = mesh.stats();
        // 8 side quads + two fans of 8 triangles
        assert_eq!(stats.triangles, 8 * 2 + 8 * 2);
        assert_eq!(mesh.batches[0].topology, Topology::Triangles);

        for v in mesh.vertices() {
            assert!(v.position[1] >= -1e-6 && v.position[1] <= 0.2 + 1e-6);
            let r = (v.position[0].powi(2) + v.position[2].powi(2)).sqrt();
            assert!(r <= 0.4 + 1e-5);
        }
    }

    #[test]
    fn test_cylinder_side_normals_are_radial() {
        let mut b = MeshBuilder::new();
        b.cylinder(2.0, 1.0, 12);
        let mesh = b.finish();
        // Side wall vertices come first; each normal points along its radius
        for v in &mesh.batches[0].vertices[..12 * 4] {
            let [x, _, z] = v.position;
            let [nx, ny, nz] = v.normal;
            assert!(ny.abs() < 1e-5);
            assert!((x / 2.0 - nx).abs() < 1e-5 && (z / 2.0 - nz).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cylinder_caps_face_away() {
        let mut b = MeshBuilder::new();
        b.cylinder(1.0, 3.0, 6);
        let mesh = b.finish();
        for v in &mesh.batches[0].vertices[6 * 4..] {
            if v.position[1].abs() < 1e-5 {
                assert!((v.normal[1] + 1.0).abs() < 1e-5);
            } else {
                assert!((v.normal[1] - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_partial_disk_covers_its_quadrant() {
        let mut b = MeshBuilder::new();
        b.partial_disk(0.5, 12, 0.0, 90.0);
        let mesh = b.finish();
        assert_eq!(mesh.stats().triangles, 12);
        for v in mesh.vertices() {
            assert!(v.position[0] >= -1e-6 && v.position[1] >= -1e-6);
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }
}
