//! Attitude representation library for guidance and navigation code.
//!
//! This library provides:
//! - Fixed-size matrices and vectors (`Matrix<M, N>`, `Vector<M>`, `Vec3`)
//! - Direction cosine matrices, quaternions, Euler angles and axis/angle
//! - Conversions between every pair of rotation representations, for all
//!   twelve Euler rotation sequences
//!
//! # Conventions
//!
//! - Quaternions are scalar-first `(w, x, y, z)` with the Hamilton product.
//! - Rotations are active: `R v` and `q ⊗ v ⊗ q*` rotate `v`.
//! - Euler angles are intrinsic: sequence `a-b-c` means
//!   `R = R_a(angle1) R_b(angle2) R_c(angle3)`.
//!
//! # Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` on the value types.
//!
//! ```
//! use attitude::{Euler, Quaternion, RotationSequence};
//!
//! let euler = Euler::new(0.3, -0.2, 1.0, RotationSequence::ZYX);
//! let q = Quaternion::from_euler(&euler);
//! let back = q.to_euler(RotationSequence::ZYX).unwrap();
//! assert!((back.angle1() - 0.3).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::doc_markdown)]

pub mod axis_angle;
pub mod constants;
pub mod dcm;
pub mod error;
pub mod euler;
pub mod matrix;
pub mod quaternion;
pub mod sequence;
mod square;
pub mod vector;

pub use axis_angle::AxisAngle;
pub use constants::Tolerances;
pub use dcm::Dcm;
pub use error::{Error, Result};
pub use euler::Euler;
pub use matrix::Matrix;
pub use quaternion::Quaternion;
pub use sequence::{Axis, RotationSequence};
pub use vector::{Vec3, Vector};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
