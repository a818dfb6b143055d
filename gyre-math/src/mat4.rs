use std::{fmt, ops::Mul};

use crate::Vec4;

/// Angles accepted by the rotation constructors.
///
/// `f64` angles are truncated to `f32` before any trigonometry happens, so
/// `Mat4::rotate_x(0.5_f64) == Mat4::rotate_x(0.5_f32)`.
pub trait Radians: Copy {
    fn as_radians(self) -> f32;
}

impl Radians for f32 {
    fn as_radians(self) -> f32 {
        self
    }
}

impl Radians for f64 {
    fn as_radians(self) -> f32 {
        self as f32
    }
}

/// Row-major 4x4 matrix in homogeneous coordinates.
///
/// Element `(row, col)` lives at `data[row * 4 + col]`. Transforms apply to
/// column vectors, i.e. `m * v`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub const fn new(
        a1: f32, a2: f32, a3: f32, a4: f32,
        b1: f32, b2: f32, b3: f32, b4: f32,
        c1: f32, c2: f32, c3: f32, c4: f32,
        d1: f32, d2: f32, d3: f32, d4: f32,
    ) -> Self {
        Self {
            data: [
                a1, a2, a3, a4,
                b1, b2, b3, b4,
                c1, c2, c3, c4,
                d1, d2, d3, d4,
            ],
        }
    }

    pub const fn from_array(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// All-zero matrix.
    pub const fn zero() -> Self {
        Self { data: [0.0; 16] }
    }

    pub fn identity() -> Self {
        let mut data = [0.0; 16];
        data[0] = 1.0;
        data[5] = 1.0;
        data[10] = 1.0;
        data[15] = 1.0;
        Self { data }
    }

    #[rustfmt::skip]
    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            x,   0.0, 0.0, 0.0,
            0.0, y,   0.0, 0.0,
            0.0, 0.0, z,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub fn translate(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            1.0, 0.0, 0.0, x,
            0.0, 1.0, 0.0, y,
            0.0, 0.0, 1.0, z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Right-handed rotation of `theta` radians about the x axis.
    #[rustfmt::skip]
    pub fn rotate_x(theta: impl Radians) -> Self {
        let (s, c) = theta.as_radians().sin_cos();
        Self::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   -s,  0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Right-handed rotation of `theta` radians about the y axis.
    #[rustfmt::skip]
    pub fn rotate_y(theta: impl Radians) -> Self {
        let (s, c) = theta.as_radians().sin_cos();
        Self::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
            -s,  0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Right-handed rotation of `theta` radians about the z axis.
    #[rustfmt::skip]
    pub fn rotate_z(theta: impl Radians) -> Self {
        let (s, c) = theta.as_radians().sin_cos();
        Self::new(
            c,   -s,  0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Perspective projection mapping the view frustum to clip space, with
    /// the near plane landing on `z = -1` after the perspective divide.
    ///
    /// `fov_y` is the vertical field of view in radians. A zero `fov_y` or
    /// `far == near` divides by zero; this is only checked in debug builds.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        debug_assert!(fov_y != 0.0, "perspective with zero field of view");
        debug_assert!(far != near, "perspective with far == near");

        let f = 1.0 / (fov_y / 2.0).tan();
        let d = far - near;

        let mut result = Self::zero();
        result.set(0, 0, f / aspect);
        result.set(1, 1, f);
        result.set(2, 2, -(near + far) / d);
        result.set(2, 3, -2.0 * near * far / d);
        result.set(3, 2, -1.0);
        result.set(3, 3, 0.0);
        result
    }

    pub fn orthographic_from_size(width: f32, height: f32) -> Self {
        Self::orthographic(0.0, width, height, 0.0, -1.0, 1.0)
    }

    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut result = Self::identity();
        let data = &mut result.data;

        data[0] = 2.0 / (right - left);
        data[5] = 2.0 / (top - bottom);
        data[10] = -2.0 / (far - near);

        // translation lives in the last column
        data[3] = -(right + left) / (right - left);
        data[7] = -(top + bottom) / (top - bottom);
        data[11] = -(far + near) / (far - near);

        result
    }

    /// View matrix for a camera at `eye` looking towards `at`.
    ///
    /// Returns the identity when `eye == at`. The rows are the camera basis
    /// `n` (right), `u` (up) and `-v` (backwards), each followed by its
    /// negated four-component dot product with `eye`. The basis vectors come
    /// out of [`Vec4::cross`] tagged as points, so their `w` takes part in
    /// that dot product.
    pub fn look_at(eye: Vec4, at: Vec4, up: Vec4) -> Self {
        if eye == at {
            return Self::identity();
        }

        let v = at.subtract(eye).normalized();
        let n = v.cross(up).normalized();
        let u = n.cross(v).normalized();
        let v = v.mult(-1.0);

        let n_dot = -n.dot(eye);
        let u_dot = -u.dot(eye);
        let v_dot = -v.dot(eye);

        #[rustfmt::skip]
        let result = Self::new(
            n.get(0), n.get(1), n.get(2), n_dot,
            u.get(0), u.get(1), u.get(2), u_dot,
            v.get(0), v.get(1), v.get(2), v_dot,
            0.0,      0.0,      0.0,      1.0,
        );
        result
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * 4 + col]
    }

    pub fn get_flat(&self, i: usize) -> f32 {
        self.data[i]
    }

    /// Sets element `(row, col)`, returning the value it replaced.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> f32 {
        std::mem::replace(&mut self.data[row * 4 + col], value)
    }

    /// Overwrites all sixteen elements with those of `other`.
    pub fn set_from(&mut self, other: &Mat4) {
        self.data = other.data;
    }

    /// Matrix product `self * other`.
    pub fn mult(&self, other: &Mat4) -> Mat4 {
        let mut product = [0.0; 16];

        for i in 0..4 {
            for j in 0..4 {
                product[i * 4 + j] = (0..4).map(|k| self.get(i, k) * other.get(k, j)).sum();
            }
        }

        Mat4::from_array(product)
    }

    /// Matrix-vector product `self * v`.
    pub fn mult_vec(&self, v: Vec4) -> Vec4 {
        Vec4::from_array(std::array::from_fn(|row| {
            (0..4).map(|i| self.get(row, i) * v.get(i)).sum()
        }))
    }

    pub fn transpose(&self) -> Mat4 {
        Mat4::from_array(std::array::from_fn(|i| self.get(i % 4, i / 4)))
    }

    pub fn determinant(&self) -> f32 {
        (0..4)
            .map(|col| {
                let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                sign * self.get(0, col) * self.minor(0, col)
            })
            .sum()
    }

    /// Determinant of the 3x3 matrix left after removing `row` and `col`.
    fn minor(&self, row: usize, col: usize) -> f32 {
        let mut m = [0.0; 9];
        let mut idx = 0;
        for r in (0..4).filter(|&r| r != row) {
            for c in (0..4).filter(|&c| c != col) {
                m[idx] = self.get(r, c);
                idx += 1;
            }
        }

        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    pub fn to_array(&self) -> [f32; 16] {
        self.data
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(data: [f32; 16]) -> Self {
        Self::from_array(data)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        self.mult(&rhs)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Vec4 {
        self.mult_vec(rhs)
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            for col in 0..4 {
                write!(f, "{:?}\t", self.get(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
