//! Square-matrix utilities: identity, trace, structure tests, minors,
//! determinant and closed-form small inverses.

use tracing::debug;

use crate::constants::{DEFAULT_TOLERANCES, Tolerances};
use crate::error::{Error, Result};
use crate::matrix::Matrix;

impl<const M: usize> Matrix<M, M> {
    /// Identity matrix.
    pub fn identity() -> Self {
        Self::from_fn(|i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> f64 {
        (0..M).map(|i| self.data[i][i]).sum()
    }

    /// Diagonal elements.
    pub fn diagonal(&self) -> [f64; M] {
        std::array::from_fn(|i| self.data[i][i])
    }

    /// True when every element below the diagonal is exactly zero.
    pub fn is_upper_triangular(&self) -> bool {
        (0..M).all(|i| (0..i).all(|j| self.data[i][j] == 0.0))
    }

    /// True when every element above the diagonal is exactly zero.
    pub fn is_lower_triangular(&self) -> bool {
        (0..M).all(|i| (i + 1..M).all(|j| self.data[i][j] == 0.0))
    }

    /// True when every off-diagonal element is zero.
    pub fn is_diagonal(&self) -> bool {
        self.is_upper_triangular() && self.is_lower_triangular()
    }

    /// True when the matrix equals its transpose.
    pub fn is_symmetric(&self) -> bool {
        *self == self.transpose()
    }

    /// Matrix with row `row` and column `col` removed. `P` must be `M - 1`.
    pub fn minor<const P: usize>(&self, row: usize, col: usize) -> Result<Matrix<P, P>> {
        if P + 1 != M || row >= M || col >= M {
            return Err(Error::SubmatrixOutOfRange {
                rows: M,
                cols: M,
                sub_rows: P,
                sub_cols: P,
                row,
                col,
            });
        }
        Ok(Matrix::from_fn(|i, j| {
            let r = if i < row { i } else { i + 1 };
            let c = if j < col { j } else { j + 1 };
            self.data[r][c]
        }))
    }

    /// Determinant by Gaussian elimination with partial pivoting.
    pub fn determinant(&self) -> f64 {
        let mut a = self.data;
        let mut det = 1.0;
        for k in 0..M {
            let pivot = (k..M)
                .max_by(|&p, &q| a[p][k].abs().total_cmp(&a[q][k].abs()))
                .unwrap_or(k);
            if a[pivot][k] == 0.0 {
                return 0.0;
            }
            if pivot != k {
                a.swap(pivot, k);
                det = -det;
            }
            det *= a[k][k];
            for i in k + 1..M {
                let factor = a[i][k] / a[k][k];
                for j in k..M {
                    a[i][j] -= factor * a[k][j];
                }
            }
        }
        det
    }
}

fn singular(operation: &'static str, determinant: f64) -> Error {
    debug!(operation, determinant, "rejected singular matrix");
    Error::Singular {
        operation,
        determinant,
    }
}

impl Matrix<2, 2> {
    /// Closed-form inverse with the default singularity threshold.
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(&DEFAULT_TOLERANCES)
    }

    /// Closed-form inverse; fails when `|det| < tol.singular_determinant`.
    pub fn inverse_with(&self, tol: &Tolerances) -> Result<Self> {
        let [[a, b], [c, d]] = self.data;
        let det = a * d - b * c;
        if det.abs() < tol.singular_determinant {
            return Err(singular("2x2 inverse", det));
        }
        Ok(Self::new([[d, -b], [-c, a]]) / det)
    }
}

impl Matrix<3, 3> {
    /// Closed-form inverse with the default singularity threshold.
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(&DEFAULT_TOLERANCES)
    }

    /// Adjugate over determinant; fails when `|det| < tol.singular_determinant`.
    pub fn inverse_with(&self, tol: &Tolerances) -> Result<Self> {
        let m = &self.data;
        let cofactor = |r0: usize, r1: usize, c0: usize, c1: usize| {
            m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]
        };
        let adjugate = [
            [cofactor(1, 2, 1, 2), -cofactor(0, 2, 1, 2), cofactor(0, 1, 1, 2)],
            [-cofactor(1, 2, 0, 2), cofactor(0, 2, 0, 2), -cofactor(0, 1, 0, 2)],
            [cofactor(1, 2, 0, 1), -cofactor(0, 2, 0, 1), cofactor(0, 1, 0, 1)],
        ];
        let det = m[0][0] * adjugate[0][0] + m[0][1] * adjugate[1][0] + m[0][2] * adjugate[2][0];
        if det.abs() < tol.singular_determinant {
            return Err(singular("3x3 inverse", det));
        }
        Ok(Self::new(adjugate) / det)
    }
}
