//! Scalar-first quaternion `(w, x, y, z)` and its construction from the
//! other rotation representations.
//!
//! Multiplication is the Hamilton product with `i·j = k`. Rotations are
//! active: `q ⊗ (0, v) ⊗ q*` rotates `v`, and the DCM of `q` maps the same
//! way.

use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign,
};

use approx::{AbsDiffEq, RelativeEq};
use tracing::{debug, trace};

use crate::constants::{DEFAULT_TOLERANCES, Tolerances};
use crate::dcm::Dcm;
use crate::error::{Error, Result};
use crate::euler::Euler;
use crate::sequence::RotationSequence;
use crate::vector::Vec3;

/// Quaternion for 3D rotations. Default is the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    /// Scalar part.
    pub w: f64,
    /// `i` component.
    pub x: f64,
    /// `j` component.
    pub y: f64,
    /// `k` component.
    pub z: f64,
}

impl Quaternion {
    /// Creates a new quaternion.
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Identity quaternion (no rotation).
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Quaternion from a scalar part and a vector part.
    pub const fn from_parts(w: f64, v: Vec3) -> Self {
        Self::new(w, v.x, v.y, v.z)
    }

    /// Quaternion from `[w, x, y, z]`. Not normalized.
    pub const fn from_array(q: [f64; 4]) -> Self {
        Self::new(q[0], q[1], q[2], q[3])
    }

    /// Components as `[w, x, y, z]`.
    pub const fn to_array(&self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Scalar part `w`.
    pub const fn scalar(&self) -> f64 {
        self.w
    }

    /// Vector part `(x, y, z)`.
    pub const fn vector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Component `i` in `w, x, y, z` order.
    pub fn get(&self, i: usize) -> Result<f64> {
        self.to_array()
            .get(i)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                rows: 4,
                cols: 1,
                row: i,
                col: 0,
            })
    }

    /// **Squared** norm, `w² + x² + y² + z²`.
    ///
    /// Use [`Quaternion::magnitude`] for the Euclidean length.
    #[inline(always)]
    pub fn norm(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length.
    #[inline(always)]
    pub fn magnitude(&self) -> f64 {
        self.norm().sqrt()
    }

    /// Four-component dot product.
    #[inline(always)]
    pub fn dot(&self, other: &Self) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Conjugate `(w, -x, -y, -z)`.
    pub const fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Multiplicative inverse, `q* / |q|²`.
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(&DEFAULT_TOLERANCES)
    }

    /// [`Quaternion::inverse`] with an explicit zero-norm threshold.
    pub fn inverse_with(&self, tol: &Tolerances) -> Result<Self> {
        let norm = self.norm();
        if norm < tol.zero_norm {
            return Err(zero_norm("quaternion inverse", norm));
        }
        Ok(self.conjugate() / norm)
    }

    /// Unit quaternion in the same direction.
    pub fn normalized(&self) -> Result<Self> {
        self.normalized_with(&DEFAULT_TOLERANCES)
    }

    /// [`Quaternion::normalized`] with an explicit zero-norm threshold.
    pub fn normalized_with(&self, tol: &Tolerances) -> Result<Self> {
        let magnitude = self.magnitude();
        if magnitude < tol.zero_norm {
            return Err(zero_norm("quaternion normalize", magnitude));
        }
        Ok(*self / magnitude)
    }

    /// Same rotation with a non-negative scalar part.
    pub fn canonical(&self) -> Self {
        if self.w < 0.0 { -*self } else { *self }
    }

    /// Rotation of `angle` radians about `axis`. The axis need not be unit.
    pub fn from_axis_angle(axis: &Vec3, angle: f64) -> Result<Self> {
        let axis = axis.normalized()?;
        let (s, c) = (angle / 2.0).sin_cos();
        Ok(Self::from_parts(c, axis * s))
    }

    /// Shortest-arc rotation taking the direction of `a` onto that of `b`.
    pub fn shortest_arc(a: &Vec3, b: &Vec3) -> Result<Self> {
        Self::shortest_arc_with(a, b, &DEFAULT_TOLERANCES)
    }

    /// Shortest-arc rotation with explicit thresholds.
    ///
    /// Anti-parallel inputs have no unique axis; the result is a half turn
    /// about `a × e`, where `e` is the basis axis along the smallest
    /// component of `a`.
    pub fn shortest_arc_with(a: &Vec3, b: &Vec3, tol: &Tolerances) -> Result<Self> {
        let cross = a.cross(b);
        let dot = a.dot(b);

        let q = if cross.magnitude() <= tol.parallel_vectors && dot < 0.0 {
            let m = a.abs();
            let chooser = if m.x < m.y {
                if m.x < m.z { Vec3::X } else { Vec3::Z }
            } else if m.y < m.z {
                Vec3::Y
            } else {
                Vec3::Z
            };
            Self::from_parts(0.0, a.cross(&chooser))
        } else {
            Self::from_parts(dot + (a.magnitude_sq() * b.magnitude_sq()).sqrt(), cross)
        };

        let magnitude = q.magnitude();
        if magnitude < tol.zero_norm {
            return Err(zero_norm("shortest arc", magnitude));
        }
        Ok(q / magnitude)
    }

    /// Quaternion of an Euler triple, `q_a(θ₁) ⊗ q_b(θ₂) ⊗ q_c(θ₃)` for
    /// sequence `a-b-c`. Unit length by construction.
    pub fn from_euler(euler: &Euler) -> Self {
        let [a1, a2, a3] = euler.angles();
        let (s1, c1) = (a1 / 2.0).sin_cos();
        let (s2, c2) = (a2 / 2.0).sin_cos();
        let (s3, c3) = (a3 / 2.0).sin_cos();
        // Proper sequences depend on the outer angles only through their
        // half sum and half difference.
        let (sp, cp) = ((a1 + a3) / 2.0).sin_cos();
        let (sm, cm) = ((a1 - a3) / 2.0).sin_cos();

        use RotationSequence::*;
        match euler.sequence() {
            ZXZ => Self::new(c2 * cp, s2 * cm, s2 * sm, c2 * sp),
            XYX => Self::new(c2 * cp, c2 * sp, s2 * cm, s2 * sm),
            YZY => Self::new(c2 * cp, s2 * sm, c2 * sp, s2 * cm),
            ZYZ => Self::new(c2 * cp, -s2 * sm, s2 * cm, c2 * sp),
            XZX => Self::new(c2 * cp, c2 * sp, -s2 * sm, s2 * cm),
            YXY => Self::new(c2 * cp, s2 * cm, c2 * sp, -s2 * sm),
            XYZ => Self::new(
                c1 * c2 * c3 - s1 * s2 * s3,
                c1 * s2 * s3 + s1 * c2 * c3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
            ),
            YZX => Self::new(
                c1 * c2 * c3 - s1 * s2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * s2 * s3 + s1 * c2 * c3,
                c1 * s2 * c3 - s1 * c2 * s3,
            ),
            ZXY => Self::new(
                c1 * c2 * c3 - s1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * s2 * s3 + s1 * c2 * c3,
            ),
            XZY => Self::new(
                c1 * c2 * c3 + s1 * s2 * s3,
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * s2 * c3 + s1 * c2 * s3,
            ),
            ZYX => Self::new(
                c1 * c2 * c3 + s1 * s2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * s2 * c3 + s1 * c2 * s3,
                s1 * c2 * c3 - c1 * s2 * s3,
            ),
            YXZ => Self::new(
                c1 * c2 * c3 + s1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
            ),
        }
    }

    /// Quaternion of a DCM by Shepperd's method: pivot on the largest of
    /// `q0²..q3²` (read off the trace and diagonal) so the divisor stays
    /// away from zero, then normalize.
    ///
    /// Any finite matrix gives a unit quaternion; for a non-rotation it is
    /// not meaningful. Non-finite entries give NaN components.
    pub fn from_dcm(dcm: &Dcm) -> Self {
        let r = dcm.to_rows();
        debug_assert!(
            r.iter().flatten().all(|v| v.is_finite()),
            "non-finite DCM entry: {r:?}"
        );
        let t = r[0][0] + r[1][1] + r[2][2];

        let q = if t > 0.0 {
            trace!(trace = t, "shepperd pivot q0");
            let q0 = 0.5 * (1.0 + t).sqrt();
            let f = 0.25 / q0;
            Self::new(
                q0,
                (r[2][1] - r[1][2]) * f,
                (r[0][2] - r[2][0]) * f,
                (r[1][0] - r[0][1]) * f,
            )
        } else if r[0][0] > r[1][1] && r[0][0] > r[2][2] {
            trace!(trace = t, "shepperd pivot q1");
            let q1 = 0.5 * (1.0 + r[0][0] - r[1][1] - r[2][2]).sqrt();
            let f = 0.25 / q1;
            Self::new(
                (r[2][1] - r[1][2]) * f,
                q1,
                (r[1][0] + r[0][1]) * f,
                (r[0][2] + r[2][0]) * f,
            )
        } else if r[1][1] > r[2][2] {
            trace!(trace = t, "shepperd pivot q2");
            let q2 = 0.5 * (1.0 - r[0][0] + r[1][1] - r[2][2]).sqrt();
            let f = 0.25 / q2;
            Self::new(
                (r[0][2] - r[2][0]) * f,
                (r[1][0] + r[0][1]) * f,
                q2,
                (r[2][1] + r[1][2]) * f,
            )
        } else {
            trace!(trace = t, "shepperd pivot q3");
            let q3 = 0.5 * (1.0 - r[0][0] - r[1][1] + r[2][2]).sqrt();
            let f = 0.25 / q3;
            Self::new(
                (r[1][0] - r[0][1]) * f,
                (r[0][2] + r[2][0]) * f,
                (r[2][1] + r[1][2]) * f,
                q3,
            )
        };

        // The chosen pivot is at least 0.5 for any finite matrix: with t <= 0
        // the largest diagonal entry is >= t/3, so its radicand is >= 1.
        q / q.magnitude()
    }

    /// DCM of this rotation. Fails for a zero quaternion.
    pub fn to_dcm(&self) -> Result<Dcm> {
        Dcm::from_quaternion(self)
    }

    /// Euler angles of this rotation in `sequence`.
    pub fn to_euler(&self, sequence: RotationSequence) -> Result<Euler> {
        Euler::from_quaternion(self, sequence)
    }

    /// Rotate `v` by the normalized quaternion: `q ⊗ (0, v) ⊗ q*`.
    pub fn rotate_vector(&self, v: &Vec3) -> Result<Vec3> {
        let q = self.normalized()?;
        Ok((q * Self::from_parts(0.0, *v) * q.conjugate()).vector())
    }

    /// Time derivative under body angular rate `omega` (rad/s):
    /// `q̇ = ½ q ⊗ (0, ω)`.
    pub fn derivative(&self, omega: &Vec3) -> Self {
        0.5 * (*self * Self::from_parts(0.0, *omega))
    }

    /// Component-wise linear interpolation, `t` clamped to `[0, 1]`.
    /// Not normalized.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        *self + (*other - *self) * t
    }

    /// Spherical linear interpolation along the shorter arc.
    pub fn slerp(&self, other: &Self, t: f64) -> Result<Self> {
        let t = t.clamp(0.0, 1.0);
        let q1 = self.normalized()?;
        let mut q2 = other.normalized()?;

        let mut dot = q1.dot(&q2);
        if dot < 0.0 {
            q2 = -q2;
            dot = -dot;
        }

        // Nearly identical: the sine below would vanish.
        if dot > 0.9995 {
            return q1.lerp(&q2, t).normalized();
        }

        let theta = dot.acos();
        let sin_theta = theta.sin();
        let a = ((1.0 - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;
        Ok(q1 * a + q2 * b)
    }

    /// Rotation angle in `[0, π]` between two orientations.
    pub fn angle_to(&self, other: &Self) -> Result<f64> {
        let q1 = self.normalized()?;
        let q2 = other.normalized()?;
        Ok(2.0 * q1.dot(&q2).abs().clamp(0.0, 1.0).acos())
    }
}

fn zero_norm(operation: &'static str, norm: f64) -> Error {
    debug!(operation, norm, "rejected zero-norm quaternion");
    Error::ZeroNorm { operation, norm }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(q: [f64; 4]) -> Self {
        Self::from_array(q)
    }
}

impl From<Quaternion> for [f64; 4] {
    fn from(q: Quaternion) -> Self {
        q.to_array()
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.w, self.x, self.y, self.z)
    }
}

impl Index<usize> for Quaternion {
    type Output = f64;

    /// # Panics
    ///
    /// Panics when `i > 3`.
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.w,
            1 => &self.x,
            2 => &self.y,
            3 => &self.z,
            _ => panic!("index out of range: size [4,1], received [{i},0]"),
        }
    }
}

/// Hamilton product.
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.w + rhs.w, self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.w - rhs.w, self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

/// Adds to the scalar part only.
impl Add<f64> for Quaternion {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        Self::new(self.w + rhs, self.x, self.y, self.z)
    }
}

/// Subtracts from the scalar part only.
impl Sub<f64> for Quaternion {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        Self::new(self.w - rhs, self.x, self.y, self.z)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.w * rhs, self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Quaternion> for f64 {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        rhs * self
    }
}

impl Div<f64> for Quaternion {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.w / rhs, self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl AddAssign for Quaternion {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Quaternion {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl AddAssign<f64> for Quaternion {
    fn add_assign(&mut self, rhs: f64) {
        *self = *self + rhs;
    }
}

impl SubAssign<f64> for Quaternion {
    fn sub_assign(&mut self, rhs: f64) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Quaternion {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl DivAssign<f64> for Quaternion {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Quaternion::default(), Quaternion::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_hamilton_basis() {
        let i = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(i * j, k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, Quaternion::new(-1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_hamilton_literal() {
        let p = Quaternion::new(1.3, 5.1, 3.2, 1.1);
        let q = Quaternion::new(0.2, 4.4, 6.1, -2.0);
        let r = p * q;
        assert_relative_eq!(r, Quaternion::new(-39.5, -6.37, 23.61, 14.65), epsilon = 1e-12);
    }

    #[test]
    fn test_norm_is_squared() {
        let q = Quaternion::new(1.0, 2.0, 2.0, 4.0);
        assert_eq!(q.norm(), 25.0);
        assert_eq!(q.magnitude(), 5.0);
        assert_relative_eq!(q.normalized().unwrap().magnitude(), 1.0);
    }

    #[test]
    fn test_inverse() {
        let q = Quaternion::new(1.3, 5.1, 3.2, 1.1);
        let inv = q.inverse().unwrap();
        assert_relative_eq!(q * inv, Quaternion::identity(), epsilon = 1e-12);
        assert_relative_eq!(inv * q, Quaternion::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_quaternion_is_rejected() {
        let zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert!(matches!(
            zero.inverse(),
            Err(Error::ZeroNorm { operation: "quaternion inverse", .. })
        ));
        assert!(zero.normalized().is_err());
        assert!(zero.to_dcm().is_err());
    }

    #[test]
    fn test_scalar_ops_touch_scalar_part() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q + 1.0, Quaternion::new(2.0, 2.0, 3.0, 4.0));
        assert_eq!(q - 1.0, Quaternion::new(0.0, 2.0, 3.0, 4.0));
        assert_eq!(2.0 * q, Quaternion::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(q / 2.0, Quaternion::new(0.5, 1.0, 1.5, 2.0));

        let mut m = q;
        m += 1.0;
        m -= q;
        m *= 3.0;
        m /= 3.0;
        assert_eq!(m, Quaternion::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_component_access() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q[0], 1.0);
        assert_eq!(q[3], 4.0);
        assert_eq!(q.get(2).unwrap(), 3.0);
        assert!(q.get(4).is_err());
    }

    #[test]
    fn test_axis_angle_rotates_vector() {
        let q = Quaternion::from_axis_angle(&Vec3::Z, FRAC_PI_2).unwrap();
        let rotated = q.rotate_vector(&Vec3::X).unwrap();
        assert_abs_diff_eq!(rotated, Vec3::Y, epsilon = 1e-12);
        assert!(Quaternion::from_axis_angle(&Vec3::zero(), 1.0).is_err());
    }

    #[test]
    fn test_shortest_arc_general() {
        let a = Vec3::new(1.0, 2.0, -0.5);
        let b = Vec3::new(-3.0, 0.2, 1.0);
        let q = Quaternion::shortest_arc(&a, &b).unwrap();
        assert_relative_eq!(q.magnitude(), 1.0, epsilon = 1e-12);
        let rotated = q.rotate_vector(&a).unwrap();
        assert_abs_diff_eq!(
            rotated,
            b * (a.magnitude() / b.magnitude()),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_shortest_arc_parallel_is_identity() {
        let a = Vec3::new(0.0, 2.0, 0.0);
        let q = Quaternion::shortest_arc(&a, &(a * 3.0)).unwrap();
        assert_abs_diff_eq!(q, Quaternion::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_shortest_arc_anti_parallel() {
        // Smallest component of a is y, so the axis is a × Y.
        let a = Vec3::new(2.0, 0.5, 1.0);
        let q = Quaternion::shortest_arc(&a, &-a).unwrap();
        assert_eq!(q.w, 0.0);
        let axis = a.cross(&Vec3::Y).normalized().unwrap();
        assert_abs_diff_eq!(q.vector(), axis, epsilon = 1e-12);
        assert_abs_diff_eq!(q.rotate_vector(&a).unwrap(), -a, epsilon = 1e-12);

        let along_x = Quaternion::shortest_arc(&Vec3::X, &-Vec3::X).unwrap();
        assert_abs_diff_eq!(along_x.rotate_vector(&Vec3::X).unwrap(), -Vec3::X, epsilon = 1e-12);
    }

    #[test]
    fn test_shortest_arc_zero_vector() {
        let err = Quaternion::shortest_arc(&Vec3::zero(), &Vec3::X).unwrap_err();
        assert!(matches!(err, Error::ZeroNorm { operation: "shortest arc", .. }));
    }

    #[test]
    fn test_from_euler_single_axis() {
        let half = FRAC_PI_2 / 2.0;
        let e = Euler::new(FRAC_PI_2, 0.0, 0.0, RotationSequence::XYZ);
        assert_relative_eq!(
            Quaternion::from_euler(&e),
            Quaternion::new(half.cos(), half.sin(), 0.0, 0.0),
            epsilon = 1e-15
        );
        let e = Euler::new(0.0, 0.0, FRAC_PI_2, RotationSequence::ZYX);
        assert_relative_eq!(
            Quaternion::from_euler(&e),
            Quaternion::new(half.cos(), half.sin(), 0.0, 0.0),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_from_dcm_pivots() {
        let cases = [
            (Dcm::rotation_x(0.0), Quaternion::identity()),
            (Dcm::rotation_x(PI), Quaternion::new(0.0, 1.0, 0.0, 0.0)),
            (Dcm::rotation_y(PI), Quaternion::new(0.0, 0.0, 1.0, 0.0)),
            (Dcm::rotation_z(PI), Quaternion::new(0.0, 0.0, 0.0, 1.0)),
            (
                Dcm::rotation_z(FRAC_PI_2),
                Quaternion::new(FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2),
            ),
        ];
        for (dcm, expected) in cases {
            let q = Quaternion::from_dcm(&dcm).canonical();
            assert_abs_diff_eq!(q, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_from_dcm_of_non_rotation_is_unit() {
        let zero = Dcm::from_rows([[0.0; 3]; 3]);
        let flip = Dcm::from_rows([[-1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, -1.0]]);
        let skewed = Dcm::from_rows([[0.2, 3.0, -1.0], [0.5, -4.0, 2.0], [7.0, 0.1, -0.3]]);
        for dcm in [zero, flip, skewed] {
            let q = Quaternion::from_dcm(&dcm);
            assert_relative_eq!(q.magnitude(), 1.0, epsilon = 1e-15);
        }
        assert_eq!(
            Quaternion::from_dcm(&zero),
            Quaternion::new(0.0, 0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn test_derivative() {
        let q = Quaternion::identity();
        let omega = Vec3::new(0.2, -0.4, 1.0);
        assert_relative_eq!(
            q.derivative(&omega),
            Quaternion::new(0.0, 0.1, -0.2, 0.5)
        );

        // Integrating a constant rate about Z for a short time.
        let rate = Vec3::new(0.0, 0.0, 1.0);
        let mut q = Quaternion::identity();
        let dt = 1e-4;
        for _ in 0..10_000 {
            q += q.derivative(&rate) * dt;
            q = q.normalized().unwrap();
        }
        let expected = Quaternion::from_axis_angle(&Vec3::Z, 1.0).unwrap();
        assert_abs_diff_eq!(q, expected, epsilon = 1e-4);
    }

    #[test]
    fn test_slerp() {
        let q0 = Quaternion::identity();
        let q1 = Quaternion::from_axis_angle(&Vec3::Z, FRAC_PI_2).unwrap();
        let mid = q0.slerp(&q1, 0.5).unwrap();
        let expected = Quaternion::from_axis_angle(&Vec3::Z, FRAC_PI_2 / 2.0).unwrap();
        assert_abs_diff_eq!(mid, expected, epsilon = 1e-12);
        assert_abs_diff_eq!(q0.slerp(&q1, 1.0).unwrap(), q1, epsilon = 1e-12);

        // Takes the short way round when the target is given as -q.
        let short = q0.slerp(&-q1, 0.5).unwrap();
        assert_abs_diff_eq!(short, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_to() {
        let q0 = Quaternion::identity();
        let q1 = Quaternion::from_axis_angle(&Vec3::Y, 0.75).unwrap();
        assert_relative_eq!(q0.angle_to(&q1).unwrap(), 0.75, epsilon = 1e-12);
        assert_relative_eq!(q0.angle_to(&-q1).unwrap(), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Quaternion::new(1.0, -2.0, 0.5, 0.0).to_string(), "(1, -2, 0.5, 0)");
    }
}
