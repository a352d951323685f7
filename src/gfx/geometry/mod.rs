//! # Procedural Geometry Generation
//!
//! Geometry is built on the CPU into a retained [`SceneMesh`]. A
//! [`MeshBuilder`] plays the role of an immediate-mode context: it keeps a
//! transform stack and a material stack, and every emitted primitive is
//! transformed into world space and appended to a batch tagged with the
//! active material and its topology.
//!
//! State changes are scoped. [`MeshBuilder::with_transform`] and
//! [`MeshBuilder::with_material`] restore the previous state when their
//! closure returns, so pushes and pops always pair up.
//!
//! ## Usage
//!
//! ```rust
//! use sortbin::gfx::geometry::MeshBuilder;
//! use sortbin::gfx::resources::material::Material;
//!
//! let mut builder = MeshBuilder::new();
//! builder.with_material(Material::flat([0.6, 0.6, 0.6]), |b| {
//!     b.with_transform(|b| {
//!         b.translate(0.0, 1.0, 0.0);
//!         b.cylinder(0.5, 2.0, 16);
//!     });
//! });
//! let mesh = builder.finish();
//! assert_eq!(mesh.batches.len(), 1);
//! ```

pub mod primitives;
pub mod transform_stack;

use cgmath::{Deg, InnerSpace, Vector3};

use crate::gfx::{resources::material::Material, scene::vertex::Vertex3D};

pub use transform_stack::TransformStack;

/// How the indices of a batch are assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Three indices per triangle
    Triangles,
    /// Two indices per line segment
    Lines,
}

/// Geometry sharing one material and one topology
#[derive(Debug, Clone)]
pub struct Batch {
    pub material: Material,
    pub topology: Topology,
    pub vertices: Vec<Vertex3D>,
    pub indices: Vec<u32>,
}

impl Batch {
    fn new(material: Material, topology: Topology) -> Self {
        Self {
            material,
            topology,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Number of triangles or line segments in this batch
    pub fn primitive_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => self.indices.len() / 2,
        }
    }
}

/// Summary of a built mesh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub batches: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub lines: usize,
}

/// Retained world-space geometry, ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct SceneMesh {
    pub batches: Vec<Batch>,
}

impl SceneMesh {
    pub fn stats(&self) -> MeshStats {
        self.batches.iter().fold(
            MeshStats {
                batches: self.batches.len(),
                ..Default::default()
            },
            |mut stats, batch| {
                stats.vertices += batch.vertices.len();
                match batch.topology {
                    Topology::Triangles => stats.triangles += batch.primitive_count(),
                    Topology::Lines => stats.lines += batch.primitive_count(),
                }
                stats
            },
        )
    }

    /// Iterates every vertex of every batch
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex3D> {
        self.batches.iter().flat_map(|b| b.vertices.iter())
    }
}

/// Emits world-space geometry under a transform stack and a material stack
#[derive(Debug)]
pub struct MeshBuilder {
    transforms: TransformStack,
    material: Material,
    saved_materials: Vec<Material>,
    batches: Vec<Batch>,
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder {
    /// Creates a builder with an identity transform and the default material
    pub fn new() -> Self {
        Self {
            transforms: TransformStack::new(),
            material: Material::default(),
            saved_materials: Vec::new(),
            batches: Vec::new(),
        }
    }

    /// Consumes the builder and returns the collected geometry
    pub fn finish(self) -> SceneMesh {
        debug_assert_eq!(self.transform_depth(), 1, "unbalanced transform stack");
        debug_assert_eq!(self.material_depth(), 1, "unbalanced material stack");
        SceneMesh {
            batches: self.batches.into_iter().filter(|b| !b.indices.is_empty()).collect(),
        }
    }

    pub fn transform_depth(&self) -> usize {
        self.transforms.depth()
    }

    pub fn material_depth(&self) -> usize {
        self.saved_materials.len() + 1
    }

    /// Runs `f` with a saved copy of the current transform, restoring it afterwards
    pub fn with_transform<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.transforms.push();
        let result = f(self);
        self.transforms.pop();
        result
    }

    /// Runs `f` with `material` active, restoring the previous material afterwards
    pub fn with_material<R>(&mut self, material: Material, f: impl FnOnce(&mut Self) -> R) -> R {
        self.saved_materials.push(self.material);
        self.material = material;
        let result = f(self);
        if let Some(previous) = self.saved_materials.pop() {
            self.material = previous;
        }
        result
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.transforms.translate(x, y, z);
    }

    /// Rotates by `degrees` around the axis (x, y, z)
    pub fn rotate(&mut self, degrees: f32, x: f32, y: f32, z: f32) {
        self.transforms.rotate(Deg(degrees), Vector3::new(x, y, z));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.transforms.scale(x, y, z);
    }

    fn batch(&mut self, topology: Topology) -> &mut Batch {
        let reuse = self
            .batches
            .last()
            .is_some_and(|b| b.topology == topology && b.material == self.material);
        if !reuse {
            self.batches.push(Batch::new(self.material, topology));
        }
        let last = self.batches.len() - 1;
        &mut self.batches[last]
    }

    /// Appends local-space vertices to the active batch and returns the base index
    fn emit(&mut self, topology: Topology, vertices: &[([f32; 3], [f32; 3])]) -> (usize, u32) {
        let world: Vec<Vertex3D> = vertices
            .iter()
            .map(|&(p, n)| Vertex3D {
                position: self.transforms.transform_point(p),
                normal: self.transforms.transform_normal(n),
            })
            .collect();
        let batch = self.batch(topology);
        let base = batch.vertices.len() as u32;
        batch.vertices.extend(world);
        (self.batches.len() - 1, base)
    }

    fn push_indices(&mut self, batch: usize, indices: impl IntoIterator<Item = u32>) {
        self.batches[batch].indices.extend(indices);
    }

    /// Flat triangle with a shared normal
    pub fn triangle(&mut self, a: [f32; 3], b: [f32; 3], c: [f32; 3], normal: [f32; 3]) {
        let (batch, base) = self.emit(Topology::Triangles, &[(a, normal), (b, normal), (c, normal)]);
        self.push_indices(batch, [base, base + 1, base + 2]);
    }

    /// Flat quad (two triangles) with a shared normal
    pub fn quad(&mut self, a: [f32; 3], b: [f32; 3], c: [f32; 3], d: [f32; 3], normal: [f32; 3]) {
        self.quad_smooth([(a, normal), (b, normal), (c, normal), (d, normal)]);
    }

    /// Quad with one normal per corner
    pub fn quad_smooth(&mut self, corners: [([f32; 3], [f32; 3]); 4]) {
        let (batch, base) = self.emit(Topology::Triangles, &corners);
        self.push_indices(batch, [base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Fan of triangles around `center`, one per consecutive pair of `rim` points
    pub fn triangle_fan(&mut self, center: [f32; 3], rim: &[[f32; 3]], normal: [f32; 3]) {
        if rim.len() < 2 {
            return;
        }
        let mut vertices = Vec::with_capacity(rim.len() + 1);
        vertices.push((center, normal));
        vertices.extend(rim.iter().map(|&p| (p, normal)));
        let (batch, base) = self.emit(Topology::Triangles, &vertices);
        let count = rim.len() as u32;
        self.push_indices(batch, (1..count).flat_map(|i| [base, base + i, base + i + 1]));
    }

    /// Strip of quads between consecutive `(first, second)` pairs
    ///
    /// Quad `i` spans pairs `i` and `i + 1`. Its normal is
    /// `(second_i - first_i) x (first_{i+1} - first_i)`, so a loop traversed
    /// with `second` below `first` and running counter-clockwise seen from
    /// above faces outward.
    pub fn quad_strip(&mut self, pairs: &[([f32; 3], [f32; 3])]) {
        for window in pairs.windows(2) {
            let (t0, b0) = window[0];
            let (t1, b1) = window[1];
            let down = Vector3::from(b0) - Vector3::from(t0);
            let along = Vector3::from(t1) - Vector3::from(t0);
            let n = down.cross(along);
            let normal = if n.magnitude2() > f32::EPSILON {
                n.normalize().into()
            } else {
                [0.0, 1.0, 0.0]
            };
            self.quad(t0, b0, b1, t1, normal);
        }
    }

    /// Single line segment
    pub fn line(&mut self, a: [f32; 3], b: [f32; 3], normal: [f32; 3]) {
        let (batch, base) = self.emit(Topology::Lines, &[(a, normal), (b, normal)]);
        self.push_indices(batch, [base, base + 1]);
    }

    /// Closed polyline through `points`
    pub fn line_loop(&mut self, points: &[[f32; 3]], normal: [f32; 3]) {
        if points.len() < 2 {
            return;
        }
        let vertices: Vec<_> = points.iter().map(|&p| (p, normal)).collect();
        let (batch, base) = self.emit(Topology::Lines, &vertices);
        let count = points.len() as u32;
        self.push_indices(batch, (0..count).flat_map(|i| [base + i, base + (i + 1) % count]));
    }
}
