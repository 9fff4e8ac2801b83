//! Euler angle triples and their conversion to and from DCMs and
//! quaternions.
//!
//! Angles are radians and follow the active, intrinsic convention: for a
//! sequence `a-b-c` the rotation is `R_a(angle1) R_b(angle2) R_c(angle3)`.

use std::fmt;

use tracing::debug;

use crate::constants::{DEFAULT_TOLERANCES, Tolerances, rad_to_deg};
use crate::dcm::Dcm;
use crate::error::Result;
use crate::quaternion::Quaternion;
use crate::sequence::{Axis, RotationSequence};

/// Three rotation angles and the sequence they are applied in.
///
/// Angles are stored as given; nothing wraps them into a principal range.
/// Default is all zeros in `ZYX` order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Euler {
    angles: [f64; 3],
    sequence: RotationSequence,
}

impl Euler {
    /// Creates a new Euler triple.
    pub const fn new(angle1: f64, angle2: f64, angle3: f64, sequence: RotationSequence) -> Self {
        Self {
            angles: [angle1, angle2, angle3],
            sequence,
        }
    }

    /// Creates an Euler triple from `[angle1, angle2, angle3]`.
    pub const fn from_angles(angles: [f64; 3], sequence: RotationSequence) -> Self {
        Self { angles, sequence }
    }

    /// Euler triple whose sequence is given as a raw tag (`0..=11`, see
    /// [`RotationSequence`]). Unknown tags fail with `InvalidSequence`.
    pub fn from_raw(angles: [f64; 3], tag: u8) -> Result<Self> {
        Ok(Self::from_angles(angles, RotationSequence::try_from(tag)?))
    }

    /// `[angle1, angle2, angle3]` in radians.
    pub const fn angles(&self) -> [f64; 3] {
        self.angles
    }

    /// First rotation angle.
    pub const fn angle1(&self) -> f64 {
        self.angles[0]
    }

    /// Middle rotation angle.
    pub const fn angle2(&self) -> f64 {
        self.angles[1]
    }

    /// Last rotation angle.
    pub const fn angle3(&self) -> f64 {
        self.angles[2]
    }

    /// Axis sequence the angles apply in.
    pub const fn sequence(&self) -> RotationSequence {
        self.sequence
    }

    /// Angles converted to degrees.
    pub fn to_degrees(&self) -> [f64; 3] {
        self.angles.map(rad_to_deg)
    }

    /// DCM of this rotation.
    pub fn to_dcm(&self) -> Dcm {
        Dcm::from_euler(self)
    }

    /// Unit quaternion of this rotation.
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_euler(self)
    }

    /// The same rotation expressed in another sequence.
    pub fn with_sequence(&self, sequence: RotationSequence) -> Self {
        Self::from_dcm(&self.to_dcm(), sequence)
    }

    /// Euler angles of a DCM with the default gimbal-lock threshold.
    pub fn from_dcm(dcm: &Dcm, sequence: RotationSequence) -> Self {
        Self::from_dcm_with(dcm, sequence, &DEFAULT_TOLERANCES)
    }

    /// Euler angles of a DCM.
    ///
    /// `angle1` and `angle3` come back in `(-π, π]`. `angle2` is in
    /// `[-π/2, π/2]` for Tait-Bryan sequences and `[0, π]` for proper ones.
    /// At gimbal lock (the middle rotation aligns the first and third
    /// axes) only their combination is observable; `angle3` is then set to
    /// zero and the whole residual goes into `angle1`.
    pub fn from_dcm_with(dcm: &Dcm, sequence: RotationSequence, tol: &Tolerances) -> Self {
        let r = dcm.to_rows();

        use RotationSequence::*;
        let terms = match sequence {
            ZXZ => Terms::proper(r[2][0], r[2][1], r[2][2])
                .first(r[0][2], -r[1][2])
                .locked(r[1][0], r[0][0]),
            XYX => Terms::proper(r[0][1], r[0][2], r[0][0])
                .first(r[1][0], -r[2][0])
                .locked(r[2][1], r[1][1]),
            YZY => Terms::proper(r[1][2], r[1][0], r[1][1])
                .first(r[2][1], -r[0][1])
                .locked(r[0][2], r[2][2]),
            ZYZ => Terms::proper(r[2][1], r[2][0], r[2][2])
                .first(r[1][2], r[0][2])
                .locked(-r[0][1], r[1][1]),
            XZX => Terms::proper(r[0][2], r[0][1], r[0][0])
                .first(r[2][0], r[1][0])
                .locked(-r[1][2], r[2][2]),
            YXY => Terms::proper(r[1][0], r[1][2], r[1][1])
                .first(r[0][1], r[2][1])
                .locked(-r[2][0], r[0][0]),
            XYZ => Terms::tait_bryan(r[0][2], r[0][0], r[0][1])
                .first(-r[1][2], r[2][2])
                .locked(r[2][1], r[1][1]),
            YZX => Terms::tait_bryan(r[1][0], r[1][1], r[1][2])
                .first(-r[2][0], r[0][0])
                .locked(r[0][2], r[2][2]),
            ZXY => Terms::tait_bryan(r[2][1], r[2][2], r[2][0])
                .first(-r[0][1], r[1][1])
                .locked(r[1][0], r[0][0]),
            XZY => Terms::tait_bryan(-r[0][1], r[0][0], r[0][2])
                .first(r[2][1], r[1][1])
                .locked(-r[1][2], r[2][2]),
            ZYX => Terms::tait_bryan(-r[2][0], r[2][2], r[2][1])
                .first(r[1][0], r[0][0])
                .locked(-r[0][1], r[1][1]),
            YXZ => Terms::tait_bryan(-r[1][2], r[1][1], r[1][0])
                .first(r[0][2], r[2][2])
                .locked(-r[2][0], r[0][0]),
        };

        let [a1, a2, a3] = terms.resolve(dcm, sequence, tol);
        Self::new(a1, a2, a3, sequence)
    }

    /// Euler angles of a quaternion. Fails for a zero quaternion.
    pub fn from_quaternion(q: &Quaternion, sequence: RotationSequence) -> Result<Self> {
        Ok(Self::from_dcm(&Dcm::from_quaternion(q)?, sequence))
    }
}

/// DCM entries that determine each angle of one sequence.
struct Terms {
    middle: f64,
    // cos(angle2) for Tait-Bryan, sin(angle2) for proper sequences
    spread: f64,
    first: (f64, f64),
    locked: (f64, f64),
}

impl Terms {
    /// `angle2 = atan2(|(u, v)|, diagonal)`.
    fn proper(u: f64, v: f64, diagonal: f64) -> Self {
        let spread = u.hypot(v);
        Self::with_middle(spread.atan2(diagonal), spread)
    }

    /// `angle2 = atan2(sin2, |(u, v)|)`.
    fn tait_bryan(sin2: f64, u: f64, v: f64) -> Self {
        let spread = u.hypot(v);
        Self::with_middle(sin2.atan2(spread), spread)
    }

    fn with_middle(middle: f64, spread: f64) -> Self {
        Self {
            middle,
            spread,
            first: (0.0, 1.0),
            locked: (0.0, 1.0),
        }
    }

    fn first(mut self, sin: f64, cos: f64) -> Self {
        self.first = (sin, cos);
        self
    }

    /// `angle1` when `angle3` is pinned to zero.
    fn locked(mut self, sin: f64, cos: f64) -> Self {
        self.locked = (sin, cos);
        self
    }

    fn resolve(&self, dcm: &Dcm, sequence: RotationSequence, tol: &Tolerances) -> [f64; 3] {
        if self.spread < tol.gimbal_lock {
            let angle1 = self.locked.0.atan2(self.locked.1);
            debug!(%sequence, angle2 = self.middle, angle1, "gimbal lock, angle3 set to zero");
            return [angle1, self.middle, 0.0];
        }
        // angle3 comes from the residual `R_c(angle3) = (R_a(angle1) R_b(angle2))ᵀ R`
        // so it absorbs the error in angle1, whose entries shrink with `spread`.
        let angle1 = self.first.0.atan2(self.first.1);
        let [a, b, c] = sequence.axes();
        let head = Dcm::elementary(a, angle1) * Dcm::elementary(b, self.middle);
        let residual = head.transpose() * *dcm;
        [angle1, self.middle, elementary_angle(&residual, c)]
    }
}

/// Angle of a rotation about a single basis axis.
fn elementary_angle(dcm: &Dcm, axis: Axis) -> f64 {
    let r = dcm.to_rows();
    match axis {
        Axis::X => (r[2][1] - r[1][2]).atan2(r[1][1] + r[2][2]),
        Axis::Y => (r[0][2] - r[2][0]).atan2(r[0][0] + r[2][2]),
        Axis::Z => (r[1][0] - r[0][1]).atan2(r[0][0] + r[1][1]),
    }
}

impl Default for Euler {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, RotationSequence::ZYX)
    }
}

impl fmt::Display for Euler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a1, a2, a3] = self.angles;
        write!(f, "{} ({a1}, {a2}, {a3}) rad", self.sequence)
    }
}
