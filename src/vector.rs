//! Column vectors: the generic fixed-size [`Vector`] and the 3D [`Vec3`]
//! used by the rotation types.

use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use ndarray::{Array1, ArrayView1};

use crate::constants::DEFAULT_TOLERANCES;
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Fixed-size column vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const M: usize> {
    data: [f64; M],
}

impl<const M: usize> Vector<M> {
    /// Creates a new vector.
    pub const fn new(data: [f64; M]) -> Self {
        Self { data }
    }

    /// Creates a zero vector.
    pub const fn zeros() -> Self {
        Self { data: [0.0; M] }
    }

    /// Vector from a slice of exactly `M` elements.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let data: [f64; M] = values.try_into().map_err(|_| Error::DimensionMismatch {
            expected: M,
            received: values.len(),
        })?;
        Ok(Self { data })
    }

    /// Number of elements, `M`.
    pub const fn len(&self) -> usize {
        M
    }

    /// True only for `M = 0`.
    pub const fn is_empty(&self) -> bool {
        M == 0
    }

    /// Elements as an array.
    pub const fn as_array(&self) -> &[f64; M] {
        &self.data
    }

    /// Element `i`.
    pub fn get(&self, i: usize) -> Result<f64> {
        self.data.get(i).copied().ok_or(Error::IndexOutOfRange {
            rows: M,
            cols: 1,
            row: i,
            col: 0,
        })
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> f64 {
        self.data.iter().zip(&other.data).map(|(a, b)| a * b).sum()
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scale to unit length in place. A zero vector is left unchanged and
    /// reported as an error.
    pub fn normalize(&mut self) -> Result<()> {
        *self = self.unit()?;
        Ok(())
    }

    /// Unit vector in the same direction.
    pub fn unit(&self) -> Result<Self> {
        let norm = self.norm();
        if norm < DEFAULT_TOLERANCES.zero_norm {
            return Err(Error::ZeroNorm {
                operation: "vector normalize",
                norm,
            });
        }
        Ok(*self / norm)
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: self.data.map(f),
        }
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            data: std::array::from_fn(|i| f(self.data[i], other.data[i])),
        }
    }

    /// Copies the vector into an `ndarray` column.
    pub fn to_array1(&self) -> Array1<f64> {
        Array1::from(self.data.to_vec())
    }
}

impl<const M: usize> Default for Vector<M> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const M: usize> From<[f64; M]> for Vector<M> {
    fn from(data: [f64; M]) -> Self {
        Self { data }
    }
}

impl<const M: usize> From<Matrix<M, 1>> for Vector<M> {
    fn from(m: Matrix<M, 1>) -> Self {
        Self {
            data: m.data.map(|row| row[0]),
        }
    }
}

impl<const M: usize> From<Vector<M>> for Matrix<M, 1> {
    fn from(v: Vector<M>) -> Self {
        Matrix::new(v.data.map(|x| [x]))
    }
}

impl<const M: usize> TryFrom<ArrayView1<'_, f64>> for Vector<M> {
    type Error = Error;

    fn try_from(view: ArrayView1<'_, f64>) -> Result<Self> {
        if view.len() != M {
            return Err(Error::DimensionMismatch {
                expected: M,
                received: view.len(),
            });
        }
        Ok(Self {
            data: std::array::from_fn(|i| view[i]),
        })
    }
}

impl<const M: usize> Index<usize> for Vector<M> {
    type Output = f64;

    /// # Panics
    ///
    /// Panics when `i >= M`; use [`Vector::get`] for a checked read.
    fn index(&self, i: usize) -> &f64 {
        match self.data.get(i) {
            Some(v) => v,
            None => panic!("index out of range: size [{M},1], received [{i},0]"),
        }
    }
}

impl<const M: usize> IndexMut<usize> for Vector<M> {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match self.data.get_mut(i) {
            Some(v) => v,
            None => panic!("index out of range: size [{M},1], received [{i},0]"),
        }
    }
}

impl<const M: usize> Add for Vector<M> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl<const M: usize> Sub for Vector<M> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl<const M: usize> Neg for Vector<M> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

impl<const M: usize> Add<f64> for Vector<M> {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        self.map(|v| v + rhs)
    }
}

impl<const M: usize> Sub<f64> for Vector<M> {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        self.map(|v| v - rhs)
    }
}

impl<const M: usize> Mul<f64> for Vector<M> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|v| v * rhs)
    }
}

impl<const M: usize> Div<f64> for Vector<M> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.map(|v| v / rhs)
    }
}

impl<const M: usize, const N: usize> Mul<Vector<N>> for Matrix<M, N> {
    type Output = Vector<M>;

    fn mul(self, rhs: Vector<N>) -> Vector<M> {
        Vector {
            data: std::array::from_fn(|i| {
                self.data[i].iter().zip(&rhs.data).map(|(a, b)| a * b).sum()
            }),
        }
    }
}

impl<const M: usize> AbsDiffEq for Vector<M> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.data
            .iter()
            .zip(&other.data)
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const M: usize> RelativeEq for Vector<M> {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.data
            .iter()
            .zip(&other.data)
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

/// 3D vector with the geometric helpers the rotation code needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Unit vector along X.
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    /// Unit vector along Y.
    pub const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    /// Unit vector along Z.
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    /// Creates a new vector.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Zero vector.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Magnitude (length) of the vector.
    #[inline(always)]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_sq().sqrt()
    }

    /// Squared magnitude (avoids sqrt).
    #[inline(always)]
    pub fn magnitude_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Unit vector in the same direction.
    pub fn normalized(&self) -> Result<Self> {
        let norm = self.magnitude();
        if norm < DEFAULT_TOLERANCES.zero_norm {
            return Err(Error::ZeroNorm {
                operation: "vector normalize",
                norm,
            });
        }
        Ok(*self / norm)
    }

    /// Dot product.
    #[inline(always)]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product: self × other
    #[inline(always)]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Element-wise absolute value.
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Skew-symmetric matrix `[v]ₓ` such that `[v]ₓ w = v × w`.
    pub fn tilde(&self) -> Matrix<3, 3> {
        Matrix::new([
            [0.0, -self.z, self.y],
            [self.z, 0.0, -self.x],
            [-self.y, self.x, 0.0],
        ])
    }

    /// Angle between two vectors (in radians).
    /// Returns 0.0 if either vector has zero magnitude.
    pub fn angle_between(&self, other: &Self) -> f64 {
        let mag_self = self.magnitude();
        let mag_other = other.magnitude();
        if mag_self < DEFAULT_TOLERANCES.zero_norm || mag_other < DEFAULT_TOLERANCES.zero_norm {
            return 0.0;
        }
        let cos = self.dot(other) / (mag_self * mag_other);
        cos.clamp(-1.0, 1.0).acos()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).magnitude()
    }

    /// Linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        *self + (*other - *self) * t
    }

    /// Check if vector is approximately zero.
    pub fn is_zero(&self, eps: f64) -> bool {
        self.magnitude_sq() < eps * eps
    }

    /// Components as `[x, y, z]`.
    pub const fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Creates a vector from `[x, y, z]`.
    pub const fn from_array(arr: &[f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_array(&arr)
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl From<Vector<3>> for Vec3 {
    fn from(v: Vector<3>) -> Self {
        Self::from_array(v.as_array())
    }
}

impl From<Vec3> for Vector<3> {
    fn from(v: Vec3) -> Self {
        Vector::new(v.to_array())
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;

    /// # Panics
    ///
    /// Panics when `i > 2`.
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("index out of range: size [3,1], received [{i},0]"),
        }
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for Matrix<3, 3> {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        Vec3::from(self * Vector::<3>::from(rhs))
    }
}

impl AbsDiffEq for Vec3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vec3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
