//! Axis/angle rotation representation.

use crate::dcm::Dcm;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::quaternion::Quaternion;
use crate::vector::Vec3;

/// Rotation of `angle` radians about a unit `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisAngle {
    axis: Vec3,
    angle: f64,
}

impl AxisAngle {
    /// Normalizes `axis`; a zero axis fails with `ZeroNorm`.
    pub fn new(axis: Vec3, angle: f64) -> Result<Self> {
        Ok(Self {
            axis: axis.normalized()?,
            angle,
        })
    }

    /// Axis/angle from a rotation vector, whose length is the angle.
    /// The zero vector gives a null rotation about `+X`.
    pub fn from_rotation_vector(v: &Vec3) -> Self {
        match v.normalized() {
            Ok(axis) => Self {
                axis,
                angle: v.magnitude(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Unit rotation axis.
    pub const fn axis(&self) -> Vec3 {
        self.axis
    }

    /// Rotation angle in radians.
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// `axis * angle`.
    pub fn rotation_vector(&self) -> Vec3 {
        self.axis * self.angle
    }

    /// Axis/angle of a quaternion, with the angle in `[0, π]`.
    ///
    /// A null rotation has no defined axis and reports `+X`.
    pub fn from_quaternion(q: &Quaternion) -> Result<Self> {
        let q = q.normalized()?.canonical();
        let v = q.vector();
        let sin_half = v.magnitude();
        let angle = 2.0 * sin_half.atan2(q.w);
        Ok(match v.normalized() {
            Ok(axis) => Self { axis, angle },
            Err(_) => Self::default(),
        })
    }

    /// Unit quaternion of this rotation.
    pub fn to_quaternion(&self) -> Quaternion {
        let (s, c) = (self.angle / 2.0).sin_cos();
        Quaternion::from_parts(c, self.axis * s)
    }

    /// Rodrigues' formula, `I + sinθ [k]ₓ + (1 - cosθ) [k]ₓ²`.
    pub fn to_dcm(&self) -> Dcm {
        let k = self.axis.tilde();
        let (s, c) = self.angle.sin_cos();
        let m = Matrix::<3, 3>::identity() + k * s + (k * k) * (1.0 - c);
        Dcm::from_rows(m.to_rows())
    }

    /// Axis/angle of a DCM, through its quaternion.
    pub fn from_dcm(dcm: &Dcm) -> Result<Self> {
        Self::from_quaternion(&dcm.to_quaternion())
    }
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self {
            axis: Vec3::X,
            angle: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_new_normalizes_axis() {
        let aa = AxisAngle::new(Vec3::new(0.0, 0.0, 5.0), 1.0).unwrap();
        assert_eq!(aa.axis(), Vec3::Z);
        assert!(AxisAngle::new(Vec3::zero(), 1.0).is_err());
    }

    #[test]
    fn test_matches_quaternion_constructor() {
        let axis = Vec3::new(1.0, -2.0, 0.5);
        let aa = AxisAngle::new(axis, 0.8).unwrap();
        let q = Quaternion::from_axis_angle(&axis, 0.8).unwrap();
        assert_relative_eq!(aa.to_quaternion(), q, epsilon = 1e-15);
    }

    #[test]
    fn test_rodrigues_matches_quaternion_dcm() {
        let aa = AxisAngle::new(Vec3::new(0.3, 0.4, -1.0), 2.2).unwrap();
        let via_q = aa.to_quaternion().to_dcm().unwrap();
        assert_abs_diff_eq!(aa.to_dcm(), via_q, epsilon = 1e-14);
        let quarter = AxisAngle::new(Vec3::Z, FRAC_PI_2).unwrap();
        assert_abs_diff_eq!(quarter.to_dcm(), Dcm::rotation_z(FRAC_PI_2), epsilon = 1e-15);
    }

    #[test]
    fn test_from_quaternion_round_trip() {
        let aa = AxisAngle::new(Vec3::new(-1.0, 1.0, 1.0), 2.0).unwrap();
        let back = AxisAngle::from_quaternion(&aa.to_quaternion()).unwrap();
        assert_abs_diff_eq!(back.axis(), aa.axis(), epsilon = 1e-12);
        assert_relative_eq!(back.angle(), 2.0, epsilon = 1e-12);

        // -q is the same rotation.
        let back = AxisAngle::from_quaternion(&-aa.to_quaternion()).unwrap();
        assert_relative_eq!(back.angle(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_half_turn_from_dcm() {
        let back = AxisAngle::from_dcm(&Dcm::rotation_y(PI)).unwrap();
        assert_relative_eq!(back.angle(), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(back.axis().abs(), Vec3::Y, epsilon = 1e-12);
    }

    #[test]
    fn test_null_rotation() {
        let aa = AxisAngle::from_quaternion(&Quaternion::identity()).unwrap();
        assert_eq!(aa, AxisAngle::default());
        assert_eq!(aa.rotation_vector(), Vec3::zero());
        assert_eq!(AxisAngle::from_rotation_vector(&Vec3::zero()), AxisAngle::default());
    }

    #[test]
    fn test_rotation_vector() {
        let v = Vec3::new(0.0, -0.5, 0.0);
        let aa = AxisAngle::from_rotation_vector(&v);
        assert_eq!(aa.axis(), -Vec3::Y);
        assert_eq!(aa.angle(), 0.5);
        assert_relative_eq!(aa.rotation_vector(), v);
    }
}
