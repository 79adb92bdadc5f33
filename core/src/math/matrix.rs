use crate::math::vector::Vec3;
use ndarray::{arr1, arr2, Array2, ArrayView2};

/// 4x4 homogeneous transforms backed by `ndarray` (column-vector convention).
pub struct MatrixHelper;

impl MatrixHelper {
    /// Multiply two 2D arrays (all f32 for simplicity).
    pub fn multiply(lhs: ArrayView2<f32>, rhs: ArrayView2<f32>) -> Array2<f32> {
        lhs.dot(&rhs)
    }

    pub fn translation(offset: Vec3) -> Array2<f32> {
        arr2(&[
            [1.0, 0.0, 0.0, offset.x],
            [0.0, 1.0, 0.0, offset.y],
            [0.0, 0.0, 1.0, offset.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_x(angle: f32) -> Array2<f32> {
        let (s, c) = angle.sin_cos();
        arr2(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle: f32) -> Array2<f32> {
        let (s, c) = angle.sin_cos();
        arr2(&[
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(angle: f32) -> Array2<f32> {
        let (s, c) = angle.sin_cos();
        arr2(&[
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed view matrix looking from `eye` towards `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Array2<f32> {
        let f = (target - eye).normalized();
        let s = f.cross(up).normalized();
        let u = s.cross(f);
        arr2(&[
            [s.x, s.y, s.z, -s.dot(eye)],
            [u.x, u.y, u.z, -u.dot(eye)],
            [-f.x, -f.y, -f.z, f.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// OpenGL-style projection; clip-space depth lands in `[-1, 1]` and `w` is the view depth.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Array2<f32> {
        let f = 1.0 / (fov_y / 2.0).tan();
        let range = near - far;
        arr2(&[
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (far + near) / range, 2.0 * far * near / range],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    pub fn transform_point(matrix: ArrayView2<f32>, point: Vec3) -> [f32; 4] {
        let out = matrix.dot(&arr1(&[point.x, point.y, point.z, 1.0]));
        [out[0], out[1], out[2], out[3]]
    }
}
