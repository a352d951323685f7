//! Model transform stack
//!
//! Keeps the current model matrix together with its normal matrix so that
//! emitted normals stay perpendicular under non-uniform scale.

use cgmath::{
    Deg, EuclideanSpace, InnerSpace, Matrix, Matrix3, Matrix4, Point3, SquareMatrix, Transform,
    Vector3,
};

#[derive(Debug, Clone, Copy)]
struct Frame {
    model: Matrix4<f32>,
    normal: Matrix3<f32>,
}

impl Frame {
    fn identity() -> Self {
        Self {
            model: Matrix4::identity(),
            normal: Matrix3::identity(),
        }
    }

    fn from_model(model: Matrix4<f32>) -> Self {
        let linear = Matrix3::from_cols(model.x.truncate(), model.y.truncate(), model.z.truncate());
        // Singular transforms (zero scale) keep the linear part; the geometry is degenerate anyway
        let normal = linear.invert().map(|inv| inv.transpose()).unwrap_or(linear);
        Self { model, normal }
    }
}

/// Stack of model transforms with a permanent identity base frame
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Frame,
    saved: Vec<Frame>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            current: Frame::identity(),
            saved: Vec::new(),
        }
    }

    /// Number of frames, including the base frame
    pub fn depth(&self) -> usize {
        self.saved.len() + 1
    }

    /// Saves the current transform
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restores the last saved transform
    ///
    /// Returns false and leaves the base frame untouched if nothing was saved.
    pub fn pop(&mut self) -> bool {
        match self.saved.pop() {
            Some(frame) => {
                self.current = frame;
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, m: Matrix4<f32>) {
        self.current = Frame::from_model(self.current.model * m);
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.apply(Matrix4::from_translation(Vector3::new(x, y, z)));
    }

    /// Rotates by `angle` around `axis` (right-handed)
    pub fn rotate(&mut self, angle: Deg<f32>, axis: Vector3<f32>) {
        self.apply(Matrix4::from_axis_angle(axis.normalize(), angle));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.apply(Matrix4::from_nonuniform_scale(x, y, z));
    }

    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        self.current
            .model
            .transform_point(Point3::new(p[0], p[1], p[2]))
            .to_vec()
            .into()
    }

    /// Transforms and renormalises a normal; zero-length normals pass through
    pub fn transform_normal(&self, n: [f32; 3]) -> [f32; 3] {
        let v = self.current.normal * Vector3::from(n);
        let len = v.magnitude();
        if len > f32::EPSILON {
            (v / len).into()
        } else {
            v.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn test_push_pop_restores_transform() {
        let mut stack = TransformStack::new();
        stack.translate(1.0, 0.0, 0.0);
        stack.push();
        stack.translate(0.0, 5.0, 0.0);
        assert!(approx(stack.transform_point([0.0; 3]), [1.0, 5.0, 0.0]));
        assert!(stack.pop());
        assert!(approx(stack.transform_point([0.0; 3]), [1.0, 0.0, 0.0]));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_pop_never_removes_base_frame() {
        let mut stack = TransformStack::new();
        assert!(!stack.pop());
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_transforms_compose_in_call_order() {
        let mut stack = TransformStack::new();
        stack.translate(2.0, 0.0, 0.0);
        stack.rotate(Deg(90.0), Vector3::unit_y());
        // +X rotated 90 degrees about Y lands on -Z, then the translation applies
        assert!(approx(stack.transform_point([1.0, 0.0, 0.0]), [2.0, 0.0, -1.0]));
    }

    #[test]
    fn test_normals_survive_nonuniform_scale() {
        let mut stack = TransformStack::new();
        stack.scale(0.1, 5.0, 1.0);
        assert!(approx(stack.transform_normal([1.0, 0.0, 0.0]), [1.0, 0.0, 0.0]));

        // A slanted face normal must stay perpendicular to the scaled surface
        let n = stack.transform_normal([1.0, 1.0, 0.0]);
        let tangent = stack.transform_point([1.0, -1.0, 0.0]);
        let dot = n[0] * tangent[0] + n[1] * tangent[1] + n[2] * tangent[2];
        assert!(dot.abs() < 1e-5);
    }

    #[test]
    fn test_rotation_moves_normals() {
        let mut stack = TransformStack::new();
        stack.rotate(Deg(-90.0), Vector3::unit_x());
        assert!(approx(stack.transform_normal([0.0, 0.0, 1.0]), [0.0, 1.0, 0.0]));
    }
}
