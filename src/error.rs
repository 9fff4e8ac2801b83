//! Error type shared by the matrix containers and the rotation conversions.
//!
//! Every fallible operation in the crate returns [`Result`]. Variants carry the
//! offending values so a caller can report what was rejected without
//! re-deriving it.

/// Errors raised by matrix access, decoding and rotation conversions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A sequence tag, code or name that is not one of the twelve sequences.
    #[error("invalid rotation sequence: {0}")]
    InvalidSequence(String),

    /// Checked element access outside the container.
    #[error("index out of range: size [{rows},{cols}], received [{row},{col}]")]
    IndexOutOfRange {
        /// Rows of the container.
        rows: usize,
        /// Columns of the container.
        cols: usize,
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// A submatrix that would extend past the source matrix.
    #[error(
        "submatrix [{sub_rows},{sub_cols}] at ({row},{col}) does not fit in [{rows},{cols}]"
    )]
    SubmatrixOutOfRange {
        /// Rows of the source matrix.
        rows: usize,
        /// Columns of the source matrix.
        cols: usize,
        /// Rows of the requested submatrix.
        sub_rows: usize,
        /// Columns of the requested submatrix.
        sub_cols: usize,
        /// Top row of the submatrix.
        row: usize,
        /// Left column of the submatrix.
        col: usize,
    },

    /// A flat slice or array view with the wrong number of elements.
    #[error("dimension mismatch: expected {expected} elements, received {received}")]
    DimensionMismatch {
        /// Element count the container needs.
        expected: usize,
        /// Element count supplied.
        received: usize,
    },

    /// Inverse of a matrix whose determinant is below the threshold.
    #[error("{operation}: matrix is singular (determinant {determinant:e})")]
    Singular {
        /// Operation that rejected the matrix.
        operation: &'static str,
        /// Determinant of the rejected matrix.
        determinant: f64,
    },

    /// Normalizing or inverting a vector or quaternion of (near) zero length.
    #[error("{operation}: zero norm ({norm:e})")]
    ZeroNorm {
        /// Operation that rejected the input.
        operation: &'static str,
        /// Norm of the rejected input.
        norm: f64,
    },

    /// A matrix that is not orthonormal with determinant +1.
    #[error("not a rotation matrix: |R Rᵀ - I| = {deviation:e}, det = {determinant}")]
    NotRotation {
        /// Largest element of `|R Rᵀ - I|`.
        deviation: f64,
        /// Determinant of the matrix.
        determinant: f64,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_message_names_size_and_request() {
        let err = Error::IndexOutOfRange {
            rows: 3,
            cols: 3,
            row: 3,
            col: 0,
        };
        assert_eq!(
            err.to_string(),
            "index out of range: size [3,3], received [3,0]"
        );
    }

    #[test]
    fn test_singular_message_carries_determinant() {
        let err = Error::Singular {
            operation: "inverse",
            determinant: 0.0,
        };
        assert!(err.to_string().starts_with("inverse: matrix is singular"));
    }
}
