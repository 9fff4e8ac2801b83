//! Fixed-size, row-major `f64` matrix.
//!
//! `Matrix<M, N>` is a plain value type: dimensions are const generics, so
//! shape errors in arithmetic are caught at compile time and only runtime
//! indices need checking.

use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use approx::{AbsDiffEq, RelativeEq};
use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};

/// M×N matrix stored row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const M: usize, const N: usize> {
    pub(crate) data: [[f64; N]; M],
}

impl<const M: usize, const N: usize> Matrix<M, N> {
    /// Number of rows.
    pub const ROWS: usize = M;
    /// Number of columns.
    pub const COLS: usize = N;

    /// Matrix from a 2D array of rows.
    pub const fn new(data: [[f64; N]; M]) -> Self {
        Self { data }
    }

    /// All-zero matrix.
    pub const fn zeros() -> Self {
        Self {
            data: [[0.0; N]; M],
        }
    }

    /// Matrix with every element set to `value`.
    pub const fn filled(value: f64) -> Self {
        Self {
            data: [[value; N]; M],
        }
    }

    /// Matrix from a row-major flat slice of exactly `M * N` elements.
    pub fn from_flat(values: &[f64]) -> Result<Self> {
        if values.len() != M * N {
            return Err(Error::DimensionMismatch {
                expected: M * N,
                received: values.len(),
            });
        }
        Ok(Self::from_fn(|i, j| values[i * N + j]))
    }

    /// Matrix whose element `(i, j)` is `f(i, j)`.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = [[0.0; N]; M];
        for (i, row) in data.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = f(i, j);
            }
        }
        Self { data }
    }

    /// Rows as a 2D array.
    pub const fn to_rows(&self) -> [[f64; N]; M] {
        self.data
    }

    /// Row-major copy of the elements.
    pub fn to_flat(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    fn check(row: usize, col: usize) -> Result<()> {
        if row >= M || col >= N {
            return Err(Error::IndexOutOfRange {
                rows: M,
                cols: N,
                row,
                col,
            });
        }
        Ok(())
    }

    /// Element `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        Self::check(row, col)?;
        Ok(self.data[row][col])
    }

    /// Mutable reference to element `(row, col)`.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut f64> {
        Self::check(row, col)?;
        Ok(&mut self.data[row][col])
    }

    /// Overwrite element `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    /// Row `row` as an array.
    pub fn row(&self, row: usize) -> Result<[f64; N]> {
        Self::check(row, 0)?;
        Ok(self.data[row])
    }

    /// Column `col` as an array.
    pub fn col(&self, col: usize) -> Result<[f64; M]> {
        Self::check(0, col)?;
        Ok(std::array::from_fn(|i| self.data[i][col]))
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Matrix<N, M> {
        Matrix::from_fn(|i, j| self.data[j][i])
    }

    /// Swap two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        Self::check(a.max(b), 0)?;
        self.data.swap(a, b);
        Ok(())
    }

    /// Swap two columns in place.
    pub fn swap_cols(&mut self, a: usize, b: usize) -> Result<()> {
        Self::check(0, a.max(b))?;
        for row in self.data.iter_mut() {
            row.swap(a, b);
        }
        Ok(())
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data = [[value; N]; M];
    }

    /// Element-wise absolute value.
    pub fn abs(&self) -> Self {
        self.map(f64::abs)
    }

    /// Apply `f` to every element.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_fn(|i, j| f(self.data[i][j]))
    }

    /// Largest absolute element.
    pub fn max_abs(&self) -> f64 {
        self.data
            .iter()
            .flatten()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// The `P`×`Q` block whose top-left corner is `(row, col)`.
    pub fn submatrix<const P: usize, const Q: usize>(
        &self,
        row: usize,
        col: usize,
    ) -> Result<Matrix<P, Q>> {
        if row + P > M || col + Q > N {
            return Err(Error::SubmatrixOutOfRange {
                rows: M,
                cols: N,
                sub_rows: P,
                sub_cols: Q,
                row,
                col,
            });
        }
        Ok(Matrix::from_fn(|i, j| self.data[row + i][col + j]))
    }

    /// Copy into an `ndarray` matrix.
    pub fn to_array2(&self) -> Array2<f64> {
        Array2::from_shape_fn((M, N), |(i, j)| self.data[i][j])
    }
}

impl<const M: usize, const N: usize> Default for Matrix<M, N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const M: usize, const N: usize> From<[[f64; N]; M]> for Matrix<M, N> {
    fn from(data: [[f64; N]; M]) -> Self {
        Self { data }
    }
}

impl<const M: usize, const N: usize> TryFrom<ArrayView2<'_, f64>> for Matrix<M, N> {
    type Error = Error;

    fn try_from(view: ArrayView2<'_, f64>) -> Result<Self> {
        if view.dim() != (M, N) {
            return Err(Error::DimensionMismatch {
                expected: M * N,
                received: view.len(),
            });
        }
        Ok(Self::from_fn(|i, j| view[[i, j]]))
    }
}

impl<const M: usize, const N: usize> TryFrom<&Array2<f64>> for Matrix<M, N> {
    type Error = Error;

    fn try_from(array: &Array2<f64>) -> Result<Self> {
        Self::try_from(array.view())
    }
}

impl<const M: usize, const N: usize> Index<(usize, usize)> for Matrix<M, N> {
    type Output = f64;

    /// # Panics
    ///
    /// Panics when the index is outside the matrix; use [`Matrix::get`] for
    /// a checked read.
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        if let Err(e) = Self::check(row, col) {
            panic!("{e}");
        }
        &self.data[row][col]
    }
}

impl<const M: usize, const N: usize> IndexMut<(usize, usize)> for Matrix<M, N> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        if let Err(e) = Self::check(row, col) {
            panic!("{e}");
        }
        &mut self.data[row][col]
    }
}

impl<const M: usize, const N: usize> Add for Matrix<M, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_fn(|i, j| self.data[i][j] + rhs.data[i][j])
    }
}

impl<const M: usize, const N: usize> Sub for Matrix<M, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_fn(|i, j| self.data[i][j] - rhs.data[i][j])
    }
}

impl<const M: usize, const N: usize> Neg for Matrix<M, N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

impl<const M: usize, const N: usize, const P: usize> Mul<Matrix<N, P>> for Matrix<M, N> {
    type Output = Matrix<M, P>;

    fn mul(self, rhs: Matrix<N, P>) -> Matrix<M, P> {
        Matrix::from_fn(|i, j| (0..N).map(|k| self.data[i][k] * rhs.data[k][j]).sum())
    }
}

impl<const M: usize, const N: usize> Add<f64> for Matrix<M, N> {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        self.map(|v| v + rhs)
    }
}

impl<const M: usize, const N: usize> Sub<f64> for Matrix<M, N> {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        self.map(|v| v - rhs)
    }
}

impl<const M: usize, const N: usize> Mul<f64> for Matrix<M, N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|v| v * rhs)
    }
}

impl<const M: usize, const N: usize> Mul<Matrix<M, N>> for f64 {
    type Output = Matrix<M, N>;

    fn mul(self, rhs: Matrix<M, N>) -> Matrix<M, N> {
        rhs * self
    }
}

impl<const M: usize, const N: usize> Div<f64> for Matrix<M, N> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.map(|v| v / rhs)
    }
}

impl<const M: usize, const N: usize> AddAssign for Matrix<M, N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const M: usize, const N: usize> SubAssign for Matrix<M, N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const M: usize, const N: usize> AddAssign<f64> for Matrix<M, N> {
    fn add_assign(&mut self, rhs: f64) {
        *self = *self + rhs;
    }
}

impl<const M: usize, const N: usize> SubAssign<f64> for Matrix<M, N> {
    fn sub_assign(&mut self, rhs: f64) {
        *self = *self - rhs;
    }
}

impl<const M: usize, const N: usize> MulAssign<f64> for Matrix<M, N> {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl<const M: usize, const N: usize> DivAssign<f64> for Matrix<M, N> {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl<const M: usize, const N: usize> fmt::Display for Matrix<M, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            for value in row {
                write!(f, "{value}\t")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<const M: usize, const N: usize> AbsDiffEq for Matrix<M, N> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const M: usize, const N: usize> RelativeEq for Matrix<M, N> {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_flat_is_row_major() {
        let m = Matrix::<2, 3>::from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
    }

    #[test]
    fn test_from_flat_rejects_wrong_length() {
        let err = Matrix::<2, 2>::from_flat(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 4,
                received: 3
            }
        );
    }

    #[test]
    fn test_checked_access() {
        let mut m = Matrix::<3, 3>::zeros();
        m.set(1, 2, 7.5).unwrap();
        assert_eq!(m.get(1, 2).unwrap(), 7.5);
        assert_eq!(
            m.get(3, 0),
            Err(Error::IndexOutOfRange {
                rows: 3,
                cols: 3,
                row: 3,
                col: 0
            })
        );
        assert!(m.set(0, 3, 1.0).is_err());
    }

    #[test]
    #[should_panic(expected = "size [2,2], received [2,1]")]
    fn test_index_panics_out_of_range() {
        let m = Matrix::<2, 2>::zeros();
        let _ = m[(2, 1)];
    }

    #[test]
    fn test_arithmetic() {
        let a = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::new([[5.0, 6.0], [7.0, 8.0]]);
        assert_eq!(a + b, Matrix::new([[6.0, 8.0], [10.0, 12.0]]));
        assert_eq!(b - a, Matrix::filled(4.0));
        assert_eq!(-a, Matrix::new([[-1.0, -2.0], [-3.0, -4.0]]));
        assert_eq!(a * b, Matrix::new([[19.0, 22.0], [43.0, 50.0]]));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(a + 1.0, Matrix::new([[2.0, 3.0], [4.0, 5.0]]));
        assert_eq!(a - 1.0, Matrix::new([[0.0, 1.0], [2.0, 3.0]]));
        assert_eq!(b / 2.0, Matrix::new([[2.5, 3.0], [3.5, 4.0]]));
    }

    #[test]
    fn test_compound_assignment() {
        let mut m = Matrix::<2, 2>::filled(1.0);
        m += Matrix::filled(2.0);
        m *= 2.0;
        m -= 1.0;
        m /= 5.0;
        assert_eq!(m, Matrix::filled(1.0));
    }

    #[test]
    fn test_rectangular_product() {
        let a = Matrix::new([[1.0, 2.0, 3.0]]);
        let b = Matrix::new([[4.0], [5.0], [6.0]]);
        assert_eq!(a * b, Matrix::new([[32.0]]));
        assert_eq!((b * a)[(2, 2)], 18.0);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t = m.transpose();
        assert_eq!(t, Matrix::new([[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]));
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_swap_rows_and_cols() {
        let mut m = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
        m.swap_rows(0, 1).unwrap();
        assert_eq!(m, Matrix::new([[3.0, 4.0], [1.0, 2.0]]));
        m.swap_cols(0, 1).unwrap();
        assert_eq!(m, Matrix::new([[4.0, 3.0], [2.0, 1.0]]));
        assert!(m.swap_rows(0, 2).is_err());
        assert!(m.swap_cols(5, 0).is_err());
    }

    #[test]
    fn test_fill_and_abs() {
        let mut m = Matrix::new([[-1.0, 2.0], [-3.0, 0.0]]);
        assert_eq!(m.abs(), Matrix::new([[1.0, 2.0], [3.0, 0.0]]));
        assert_eq!(m.max_abs(), 3.0);
        m.fill(9.0);
        assert_eq!(m, Matrix::filled(9.0));
    }

    #[test]
    fn test_submatrix() {
        let m = Matrix::<3, 4>::from_fn(|i, j| (i * 4 + j) as f64);
        let sub: Matrix<2, 2> = m.submatrix(1, 2).unwrap();
        assert_eq!(sub, Matrix::new([[6.0, 7.0], [10.0, 11.0]]));
        assert!(m.submatrix::<2, 2>(2, 0).is_err());
        assert!(m.submatrix::<1, 3>(0, 2).is_err());
    }

    #[test]
    fn test_rows_and_cols() {
        let m = Matrix::new([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        assert_eq!(m.row(2).unwrap(), [5.0, 6.0]);
        assert_eq!(m.col(1).unwrap(), [2.0, 4.0, 6.0]);
        assert!(m.row(3).is_err());
        assert_eq!(m.to_flat(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_display_is_tab_separated() {
        let m = Matrix::new([[1.0, 2.0], [3.0, 4.5]]);
        assert_eq!(m.to_string(), "1\t2\t\n3\t4.5\t\n");
    }

    #[test]
    fn test_ndarray_interop() {
        let m = Matrix::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let array = m.to_array2();
        assert_eq!(array.dim(), (2, 3));
        assert_eq!(array[[1, 2]], 6.0);

        let back = Matrix::<2, 3>::try_from(&array).unwrap();
        assert_eq!(back, m);
        assert!(Matrix::<3, 2>::try_from(array.view()).is_err());
    }

    #[test]
    fn test_approx_traits() {
        let a = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
        let b = a + 1e-12;
        assert_relative_eq!(a, b, epsilon = 1e-9);
    }
}
