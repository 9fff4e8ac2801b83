//! Numeric tolerances and angle helpers used throughout the crate.
//!
//! Every threshold that decides between two code paths lives in
//! [`Tolerances`], so an application can tighten or relax them in one place
//! (and, with the `serde` feature, load them from its own configuration).

use std::f64::consts::PI;

/// Thresholds for degenerate-input detection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    /// Below this length a vector or quaternion is treated as zero
    /// and cannot be normalized or inverted.
    pub zero_norm: f64,

    /// Below this absolute determinant a 2x2/3x3 matrix is singular.
    pub singular_determinant: f64,

    /// Below this value the middle-angle cosine (Tait-Bryan) or sine
    /// (proper Euler) marks gimbal lock during Euler extraction.
    pub gimbal_lock: f64,

    /// Below this cross-product length two vectors count as parallel
    /// in the shortest-arc constructor.
    pub parallel_vectors: f64,

    /// Max element deviation of `R Rᵀ` from identity for a valid DCM.
    pub orthonormality: f64,
}

impl Tolerances {
    /// Default thresholds.
    pub const fn new() -> Self {
        Self {
            zero_norm: 1e-12,
            singular_determinant: 1e-9,
            gimbal_lock: 1e-12,
            parallel_vectors: 1e-6,
            orthonormality: 1e-9,
        }
    }

    /// Tight thresholds for inputs known to be well conditioned.
    pub const fn strict() -> Self {
        Self {
            zero_norm: 1e-15,
            singular_determinant: 1e-12,
            gimbal_lock: 1e-14,
            parallel_vectors: 1e-9,
            orthonormality: 1e-12,
        }
    }

    /// Loose thresholds for noisy sensor-derived data, e.g. a DCM assembled
    /// from measured axes.
    pub const fn relaxed() -> Self {
        Self {
            zero_norm: 1e-9,
            singular_determinant: 1e-6,
            gimbal_lock: 1e-6,
            parallel_vectors: 1e-4,
            orthonormality: 1e-6,
        }
    }

    /// Get a summary of the thresholds as a hash map for reporting.
    pub fn summary(&self) -> std::collections::HashMap<String, String> {
        let mut map = std::collections::HashMap::new();
        map.insert("zero norm".to_string(), format!("{:.1e}", self.zero_norm));
        map.insert(
            "singular determinant".to_string(),
            format!("{:.1e}", self.singular_determinant),
        );
        map.insert("gimbal lock".to_string(), format!("{:.1e}", self.gimbal_lock));
        map.insert(
            "parallel vectors".to_string(),
            format!("{:.1e}", self.parallel_vectors),
        );
        map.insert(
            "orthonormality".to_string(),
            format!("{:.1e}", self.orthonormality),
        );
        map
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new()
    }
}

/// Default thresholds as a constant, for the plain (non `_with`) functions.
pub const DEFAULT_TOLERANCES: Tolerances = Tolerances::new();

/// Degrees to radians.
#[inline(always)]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Radians to degrees.
#[inline(always)]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * 180.0 / PI
}
