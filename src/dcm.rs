//! Direction cosine matrix.
//!
//! A [`Dcm`] is a 3x3 rotation matrix held by value. It is not a
//! [`Matrix`]: products of two DCMs stay DCMs, and the generic matrix
//! operators only apply after an explicit [`Dcm::to_matrix`].

use std::fmt;
use std::ops::{Index, Mul};

use approx::{AbsDiffEq, RelativeEq};

use crate::constants::{DEFAULT_TOLERANCES, Tolerances};
use crate::error::{Error, Result};
use crate::euler::Euler;
use crate::matrix::Matrix;
use crate::quaternion::Quaternion;
use crate::sequence::{Axis, RotationSequence};
use crate::vector::Vec3;

/// Active rotation matrix: `R v` rotates `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dcm {
    data: [[f64; 3]; 3],
}

impl Dcm {
    /// Creates the identity DCM (no rotation).
    pub const fn identity() -> Self {
        Self {
            data: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// DCM from rows, taken as given. Use [`Dcm::is_rotation`] or
    /// [`Dcm::try_from`] a [`Matrix`] when orthonormality must be checked.
    pub const fn from_rows(data: [[f64; 3]; 3]) -> Self {
        Self { data }
    }

    /// DCM from nine row-major values.
    pub fn from_flat(values: &[f64]) -> Result<Self> {
        Matrix::<3, 3>::from_flat(values).map(|m| Self::from_rows(m.to_rows()))
    }

    /// Rows of the matrix.
    pub const fn to_rows(&self) -> [[f64; 3]; 3] {
        self.data
    }

    /// Copies the DCM into a generic [`Matrix`].
    pub fn to_matrix(&self) -> Matrix<3, 3> {
        Matrix::new(self.data)
    }

    /// Rotation of `angle` radians about X.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    /// Rotation of `angle` radians about Y.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    /// Rotation of `angle` radians about Z.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation of `angle` radians about a basis `axis`.
    pub fn elementary(axis: Axis, angle: f64) -> Self {
        match axis {
            Axis::X => Self::rotation_x(angle),
            Axis::Y => Self::rotation_y(angle),
            Axis::Z => Self::rotation_z(angle),
        }
    }

    /// DCM of a quaternion, normalizing it first.
    pub fn from_quaternion(q: &Quaternion) -> Result<Self> {
        let p = q.normalized()?;
        let (p0, p1, p2, p3) = (p.w, p.x, p.y, p.z);
        let (a, b, c, d) = (p0 * p0, p1 * p1, p2 * p2, p3 * p3);
        Ok(Self::from_rows([
            [a + b - c - d, 2.0 * (p1 * p2 - p0 * p3), 2.0 * (p1 * p3 + p0 * p2)],
            [2.0 * (p1 * p2 + p0 * p3), a - b + c - d, 2.0 * (p2 * p3 - p0 * p1)],
            [2.0 * (p1 * p3 - p0 * p2), 2.0 * (p2 * p3 + p0 * p1), a - b - c + d],
        ]))
    }

    /// DCM of an Euler triple, `R_a(θ₁) R_b(θ₂) R_c(θ₃)` for sequence
    /// `a-b-c`, expanded in closed form.
    pub fn from_euler(euler: &Euler) -> Self {
        let [a1, a2, a3] = euler.angles();
        let (s1, c1) = a1.sin_cos();
        let (s2, c2) = a2.sin_cos();
        let (s3, c3) = a3.sin_cos();

        use RotationSequence::*;
        let data = match euler.sequence() {
            ZXZ => [
                [c1 * c3 - s1 * c2 * s3, -c1 * s3 - s1 * c2 * c3, s1 * s2],
                [c1 * c2 * s3 + s1 * c3, c1 * c2 * c3 - s1 * s3, -c1 * s2],
                [s2 * s3, s2 * c3, c2],
            ],
            XYX => [
                [c2, s2 * s3, s2 * c3],
                [s1 * s2, c1 * c3 - s1 * c2 * s3, -c1 * s3 - s1 * c2 * c3],
                [-c1 * s2, c1 * c2 * s3 + s1 * c3, c1 * c2 * c3 - s1 * s3],
            ],
            YZY => [
                [c1 * c2 * c3 - s1 * s3, -c1 * s2, c1 * c2 * s3 + s1 * c3],
                [s2 * c3, c2, s2 * s3],
                [-c1 * s3 - s1 * c2 * c3, s1 * s2, c1 * c3 - s1 * c2 * s3],
            ],
            ZYZ => [
                [c1 * c2 * c3 - s1 * s3, -c1 * c2 * s3 - s1 * c3, c1 * s2],
                [c1 * s3 + s1 * c2 * c3, c1 * c3 - s1 * c2 * s3, s1 * s2],
                [-s2 * c3, s2 * s3, c2],
            ],
            XZX => [
                [c2, -s2 * c3, s2 * s3],
                [c1 * s2, c1 * c2 * c3 - s1 * s3, -c1 * c2 * s3 - s1 * c3],
                [s1 * s2, c1 * s3 + s1 * c2 * c3, c1 * c3 - s1 * c2 * s3],
            ],
            YXY => [
                [c1 * c3 - s1 * c2 * s3, s1 * s2, c1 * s3 + s1 * c2 * c3],
                [s2 * s3, c2, -s2 * c3],
                [-c1 * c2 * s3 - s1 * c3, c1 * s2, c1 * c2 * c3 - s1 * s3],
            ],
            XYZ => [
                [c2 * c3, -c2 * s3, s2],
                [c1 * s3 + s1 * s2 * c3, c1 * c3 - s1 * s2 * s3, -s1 * c2],
                [s1 * s3 - c1 * s2 * c3, c1 * s2 * s3 + s1 * c3, c1 * c2],
            ],
            YZX => [
                [c1 * c2, s1 * s3 - c1 * s2 * c3, c1 * s2 * s3 + s1 * c3],
                [s2, c2 * c3, -c2 * s3],
                [-s1 * c2, c1 * s3 + s1 * s2 * c3, c1 * c3 - s1 * s2 * s3],
            ],
            ZXY => [
                [c1 * c3 - s1 * s2 * s3, -s1 * c2, c1 * s3 + s1 * s2 * c3],
                [c1 * s2 * s3 + s1 * c3, c1 * c2, s1 * s3 - c1 * s2 * c3],
                [-c2 * s3, s2, c2 * c3],
            ],
            XZY => [
                [c2 * c3, -s2, c2 * s3],
                [c1 * s2 * c3 + s1 * s3, c1 * c2, c1 * s2 * s3 - s1 * c3],
                [s1 * s2 * c3 - c1 * s3, s1 * c2, c1 * c3 + s1 * s2 * s3],
            ],
            ZYX => [
                [c1 * c2, c1 * s2 * s3 - s1 * c3, c1 * s2 * c3 + s1 * s3],
                [s1 * c2, c1 * c3 + s1 * s2 * s3, s1 * s2 * c3 - c1 * s3],
                [-s2, c2 * s3, c2 * c3],
            ],
            YXZ => [
                [c1 * c3 + s1 * s2 * s3, s1 * s2 * c3 - c1 * s3, s1 * c2],
                [c2 * s3, c2 * c3, -s2],
                [c1 * s2 * s3 - s1 * c3, c1 * s2 * c3 + s1 * s3, c1 * c2],
            ],
        };
        Self::from_rows(data)
    }

    /// Element `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.to_matrix().get(row, col)
    }

    /// Inverse rotation.
    pub fn transpose(&self) -> Self {
        Self::from_rows(self.to_matrix().transpose().to_rows())
    }

    /// Sum of the diagonal, `1 + 2 cos θ` for a rotation by `θ`.
    pub fn trace(&self) -> f64 {
        self.data[0][0] + self.data[1][1] + self.data[2][2]
    }

    /// Determinant, +1 for a proper rotation.
    pub fn determinant(&self) -> f64 {
        let m = &self.data;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Largest element of `|R Rᵀ - I|`.
    pub fn orthonormality_error(&self) -> f64 {
        let m = self.to_matrix();
        (m * m.transpose() - Matrix::identity()).max_abs()
    }

    /// True for a proper rotation: orthonormal with determinant +1.
    pub fn is_rotation(&self) -> bool {
        self.is_rotation_with(&DEFAULT_TOLERANCES)
    }

    /// [`Dcm::is_rotation`] with an explicit orthonormality threshold.
    pub fn is_rotation_with(&self, tol: &Tolerances) -> bool {
        self.orthonormality_error() <= tol.orthonormality
            && (self.determinant() - 1.0).abs() <= tol.orthonormality
    }

    /// Rotate a vector.
    pub fn rotate_vector(&self, v: &Vec3) -> Vec3 {
        self.to_matrix() * *v
    }

    /// Quaternion of this rotation, see [`Quaternion::from_dcm`].
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_dcm(self)
    }

    /// Euler angles of this rotation in `sequence`.
    pub fn to_euler(&self, sequence: RotationSequence) -> Euler {
        Euler::from_dcm(self, sequence)
    }
}

impl Default for Dcm {
    fn default() -> Self {
        Self::identity()
    }
}

impl TryFrom<Matrix<3, 3>> for Dcm {
    type Error = Error;

    /// Accepts the matrix only if it is a proper rotation within the
    /// default orthonormality tolerance.
    fn try_from(m: Matrix<3, 3>) -> Result<Self> {
        let dcm = Self::from_rows(m.to_rows());
        if !dcm.is_rotation() {
            return Err(Error::NotRotation {
                deviation: dcm.orthonormality_error(),
                determinant: dcm.determinant(),
            });
        }
        Ok(dcm)
    }
}

impl From<Dcm> for Matrix<3, 3> {
    fn from(dcm: Dcm) -> Self {
        dcm.to_matrix()
    }
}

impl Index<(usize, usize)> for Dcm {
    type Output = f64;

    /// # Panics
    ///
    /// Panics when either index exceeds 2; use [`Dcm::get`] for a checked
    /// read.
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        if row > 2 || col > 2 {
            panic!("index out of range: size [3,3], received [{row},{col}]");
        }
        &self.data[row][col]
    }
}

/// Composition: `(A * B) v = A (B v)`.
impl Mul for Dcm {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_rows((self.to_matrix() * rhs.to_matrix()).to_rows())
    }
}

impl Mul<Vec3> for Dcm {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate_vector(&rhs)
    }
}

impl fmt::Display for Dcm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_matrix(), f)
    }
}

impl AbsDiffEq for Dcm {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.to_matrix().abs_diff_eq(&other.to_matrix(), epsilon)
    }
}

impl RelativeEq for Dcm {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_matrix()
            .relative_eq(&other.to_matrix(), epsilon, max_relative)
    }
}
