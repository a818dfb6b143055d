use std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

/// A 4-component homogeneous vector.
///
/// The fourth component distinguishes points (`w = 1`) from directions
/// (`w = 0`). Operations that would otherwise mix the two, such as
/// [`Vec4::norm`] and [`Vec4::normalize`], take an `ignore_last` flag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec4 {
    pub data: [f32; 4],
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// A point at `(x, y, z)`.
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// A direction along `(x, y, z)`.
    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 0.0)
    }

    pub const fn from_array(data: [f32; 4]) -> Self {
        Self { data }
    }

    pub fn to_array(&self) -> [f32; 4] {
        self.data
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn get(&self, i: usize) -> f32 {
        self.data[i]
    }

    pub fn set(&mut self, i: usize, value: f32) {
        self.data[i] = value;
    }

    /// Overwrites all four components with those of `other`.
    pub fn set_from(&mut self, other: &Vec4) {
        self.data = other.data;
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: Vec4) -> Vec4 {
        Vec4::from_array(std::array::from_fn(|i| self.data[i] + other.data[i]))
    }

    pub fn subtract(self, other: Vec4) -> Vec4 {
        Vec4::from_array(std::array::from_fn(|i| self.data[i] - other.data[i]))
    }

    /// Cross product of the xyz parts. The result is tagged as a point
    /// (`w = 1`).
    pub fn cross(self, other: Vec4) -> Vec4 {
        let [ux, uy, uz, _] = self.data;
        let [vx, vy, vz, _] = other.data;

        Vec4::new(uy * vz - uz * vy, uz * vx - ux * vz, ux * vy - uy * vx, 1.0)
    }

    /// Z component of the cross product of two vectors in the xy plane.
    pub fn cross_z(x0: f32, y0: f32, _z0: f32, x1: f32, y1: f32, _z1: f32) -> f32 {
        x0 * y1 - y0 * x1
    }

    /// Dot product over all four components. Callers wanting a pure 3D
    /// dot product must zero or align `w` themselves.
    pub fn dot(self, other: Vec4) -> f32 {
        self.data.iter().zip(other.data.iter()).map(|(a, b)| a * b).sum()
    }

    pub fn mult(self, scalar: f32) -> Vec4 {
        Vec4::from_array(self.data.map(|c| c * scalar))
    }

    /// Euclidean norm over xyz when `ignore_last` is set, otherwise over
    /// all four components.
    pub fn norm(self, ignore_last: bool) -> f32 {
        let last = if ignore_last { 3 } else { 4 };
        self.data[..last].iter().map(|c| c * c).sum::<f32>().sqrt()
    }

    /// Euclidean norm of the xyz part.
    pub fn length(self) -> f32 {
        self.norm(true)
    }

    /// Scales the vector to unit length.
    ///
    /// With `ignore_last` set, only xyz are divided by the xyz norm and `w`
    /// is carried over untouched. Otherwise all four components are divided
    /// by the 4D norm.
    ///
    /// The vector must not have zero length; no check is made in release
    /// builds and the result is then `NaN` or infinite.
    pub fn normalize(self, ignore_last: bool) -> Vec4 {
        let norm = self.norm(ignore_last);
        debug_assert!(norm != 0.0, "normalizing a zero-length vector");

        if ignore_last {
            let [x, y, z, w] = self.data;
            Vec4::new(x / norm, y / norm, z / norm, w)
        } else {
            self.mult(1.0 / norm)
        }
    }

    /// [`Vec4::normalize`] over the xyz part, keeping `w`.
    pub fn normalized(self) -> Vec4 {
        self.normalize(true)
    }
}

impl From<[f32; 4]> for Vec4 {
    fn from(data: [f32; 4]) -> Self {
        Self::from_array(data)
    }
}

impl Add for Vec4 {
    type Output = Vec4;

    fn add(self, rhs: Vec4) -> Vec4 {
        Vec4::add(self, rhs)
    }
}

impl Sub for Vec4 {
    type Output = Vec4;

    fn sub(self, rhs: Vec4) -> Vec4 {
        Vec4::subtract(self, rhs)
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: f32) -> Vec4 {
        Vec4::mult(self, rhs)
    }
}

impl Neg for Vec4 {
    type Output = Vec4;

    fn neg(self) -> Vec4 {
        Vec4::mult(self, -1.0)
    }
}

impl fmt::Display for Vec4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.data {
            writeln!(f, "{c:?}")?;
        }
        Ok(())
    }
}
