//! Rotation axes and the twelve Euler rotation sequences.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A body axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Body X axis.
    X,
    /// Body Y axis.
    Y,
    /// Body Z axis.
    Z,
}

impl Axis {
    /// Row/column index of the axis in a 3x3 matrix.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Conventional aerospace number: 1, 2 or 3.
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'X' | '1' => Some(Axis::X),
            'Y' | '2' => Some(Axis::Y),
            'Z' | '3' => Some(Axis::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        };
        write!(f, "{c}")
    }
}

/// Order of the three elementary rotations of an Euler triple.
///
/// The first six repeat their first axis (proper Euler), the last six use
/// three distinct axes (Tait-Bryan). Discriminants follow that order, so
/// `RotationSequence::try_from(0u8)` is `ZXZ` and `11u8` is `YXZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationSequence {
    /// 3-1-3
    ZXZ,
    /// 1-2-1
    XYX,
    /// 2-3-2
    YZY,
    /// 3-2-3
    ZYZ,
    /// 1-3-1
    XZX,
    /// 2-1-2
    YXY,
    /// 1-2-3
    XYZ,
    /// 2-3-1
    YZX,
    /// 3-1-2
    ZXY,
    /// 1-3-2
    XZY,
    /// 3-2-1, yaw-pitch-roll
    ZYX,
    /// 2-1-3
    YXZ,
}

impl RotationSequence {
    /// All sequences in discriminant order.
    pub const ALL: [RotationSequence; 12] = [
        RotationSequence::ZXZ,
        RotationSequence::XYX,
        RotationSequence::YZY,
        RotationSequence::ZYZ,
        RotationSequence::XZX,
        RotationSequence::YXY,
        RotationSequence::XYZ,
        RotationSequence::YZX,
        RotationSequence::ZXY,
        RotationSequence::XZY,
        RotationSequence::ZYX,
        RotationSequence::YXZ,
    ];

    /// The three rotation axes, first applied (outermost) first.
    pub const fn axes(self) -> [Axis; 3] {
        use Axis::*;
        match self {
            RotationSequence::ZXZ => [Z, X, Z],
            RotationSequence::XYX => [X, Y, X],
            RotationSequence::YZY => [Y, Z, Y],
            RotationSequence::ZYZ => [Z, Y, Z],
            RotationSequence::XZX => [X, Z, X],
            RotationSequence::YXY => [Y, X, Y],
            RotationSequence::XYZ => [X, Y, Z],
            RotationSequence::YZX => [Y, Z, X],
            RotationSequence::ZXY => [Z, X, Y],
            RotationSequence::XZY => [X, Z, Y],
            RotationSequence::ZYX => [Z, Y, X],
            RotationSequence::YXZ => [Y, X, Z],
        }
    }

    /// First and last axes coincide.
    pub const fn is_proper(self) -> bool {
        (self as u8) < 6
    }

    /// True for sequences with three distinct axes.
    pub const fn is_tait_bryan(self) -> bool {
        !self.is_proper()
    }

    /// Numeric form such as `321` for `ZYX`.
    pub const fn code(self) -> u16 {
        let [a, b, c] = self.axes();
        a.number() as u16 * 100 + b.number() as u16 * 10 + c.number() as u16
    }

    fn from_axes(axes: [Axis; 3]) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.axes() == axes)
    }
}

impl fmt::Display for RotationSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.axes();
        write!(f, "{a}{b}{c}")
    }
}

impl TryFrom<u8> for RotationSequence {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(tag))
            .copied()
            .ok_or_else(|| Error::InvalidSequence(format!("tag {tag}")))
    }
}

impl TryFrom<u16> for RotationSequence {
    type Error = Error;

    /// Decode an aerospace code such as `313` or `321`.
    fn try_from(code: u16) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or_else(|| Error::InvalidSequence(format!("code {code}")))
    }
}

impl FromStr for RotationSequence {
    type Err = Error;

    /// Accepts letters (`"ZYX"`, case-insensitive), digits (`"321"`) or
    /// both joined by an underscore (`"ZYX_321"`), in which case the two
    /// halves must agree.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSequence(s.to_string());
        let parse = |part: &str| -> Result<Self> {
            let axes: Vec<Axis> = part
                .chars()
                .map(Axis::from_char)
                .collect::<Option<_>>()
                .ok_or_else(invalid)?;
            let axes: [Axis; 3] = axes.try_into().map_err(|_| invalid())?;
            Self::from_axes(axes).ok_or_else(invalid)
        };

        match s.trim().split_once('_') {
            Some((letters, digits)) => {
                let seq = parse(letters)?;
                if parse(digits)? != seq {
                    return Err(invalid());
                }
                Ok(seq)
            }
            None => parse(s.trim()),
        }
    }
}
