//! Fixed-size row-major matrices
//!
//! `Matrix<T, R, C>` stores `R` row vectors of length `C`. Points are row
//! vectors multiplied on the left (`v * M`), so composite transforms read
//! left to right in application order.
//!
//! Row and column operations take indices as `usize` and panic on an index
//! outside the matrix, the same way slice indexing does. Use [`Matrix::get`]
//! for a checked lookup.

use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use num_traits::{AsPrimitive, Float, Num, One, Zero};
use serde::{Deserialize, Serialize};

use super::vector::Vector;
use crate::error::MathError;

/// R×C numeric matrix, stored inline as rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Matrix<T, const R: usize, const C: usize> {
    #[serde(with = "crate::foundation::serde_array")]
    rows: [Vector<T, C>; R],
}

/// 3x3 matrix type
pub type Mat3 = Matrix<f32, 3, 3>;

/// 4x4 matrix type
pub type Mat4 = Matrix<f32, 4, 4>;

#[inline]
fn check_row<const R: usize>(row: usize) {
    assert!(row < R, "row index {row} out of range for a matrix with {R} rows");
}

#[inline]
fn check_col<const C: usize>(col: usize) {
    assert!(col < C, "column index {col} out of range for a matrix with {C} columns");
}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Create a matrix from its row vectors
    pub const fn from_rows(rows: [Vector<T, C>; R]) -> Self {
        Self { rows }
    }

    /// Build a matrix by evaluating `f(row, col)` for every element
    pub fn from_fn<F: FnMut(usize, usize) -> T>(mut f: F) -> Self {
        Self {
            rows: std::array::from_fn(|r| Vector::from_array(std::array::from_fn(|c| f(r, c)))),
        }
    }

    /// Number of rows
    pub const fn row_count(&self) -> usize {
        R
    }

    /// Number of columns
    pub const fn col_count(&self) -> usize {
        C
    }

    /// Borrow the row vectors
    pub const fn rows(&self) -> &[Vector<T, C>; R] {
        &self.rows
    }

    /// Checked element lookup
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.rows.get(row).and_then(|r| r.as_slice().get(col))
    }

    /// Checked mutable element lookup
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if col >= C {
            return None;
        }
        self.rows.get_mut(row).map(|r| &mut r[col])
    }
}

impl<T: Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Create a matrix from a raw row-major 2D array
    pub fn from_array(elements: [[T; C]; R]) -> Self {
        Self { rows: elements.map(Vector::from_array) }
    }

    /// Create a matrix from a flat row-major slice of exactly R×C elements
    pub fn from_slice(elements: &[T]) -> Result<Self, MathError> {
        if elements.len() != R * C {
            return Err(MathError::DimensionMismatch {
                expected: R * C,
                actual: elements.len(),
            });
        }
        Ok(Self::from_fn(|r, c| elements[r * C + c]))
    }

    /// Copy the elements out as a row-major 2D array
    pub fn to_array(&self) -> [[T; C]; R] {
        self.rows.map(Vector::into_array)
    }

    /// Copy of row `row`
    pub fn row(&self, row: usize) -> Vector<T, C> {
        check_row::<R>(row);
        self.rows[row]
    }

    /// Copy of column `col`
    pub fn col(&self, col: usize) -> Vector<T, R> {
        check_col::<C>(col);
        Vector::from_array(std::array::from_fn(|r| self.rows[r][col]))
    }

    /// Overwrite row `row`
    pub fn set_row(&mut self, row: usize, values: Vector<T, C>) {
        check_row::<R>(row);
        self.rows[row] = values;
    }

    /// Set every element of row `row` to `value`
    pub fn set_row_value(&mut self, row: usize, value: T) {
        self.set_row(row, Vector::splat(value));
    }

    /// Overwrite column `col`
    pub fn set_col(&mut self, col: usize, values: Vector<T, R>) {
        check_col::<C>(col);
        for (r, row) in self.rows.iter_mut().enumerate() {
            row[col] = values[r];
        }
    }

    /// Set every element of column `col` to `value`
    pub fn set_col_value(&mut self, col: usize, value: T) {
        self.set_col(col, Vector::splat(value));
    }

    /// Exchange two rows
    pub fn swap_rows(&mut self, first: usize, second: usize) {
        check_row::<R>(first);
        check_row::<R>(second);
        self.rows.swap(first, second);
    }

    /// Exchange two columns
    pub fn swap_cols(&mut self, first: usize, second: usize) {
        check_col::<C>(first);
        check_col::<C>(second);
        for row in &mut self.rows {
            let tmp = row[first];
            row[first] = row[second];
            row[second] = tmp;
        }
    }

    /// `row[dst] = row[src]`, leaving `row[src]` untouched
    pub fn copy_row(&mut self, src: usize, dst: usize) {
        let values = self.row(src);
        self.set_row(dst, values);
    }

    /// `col[dst] = col[src]`, leaving `col[src]` untouched
    pub fn copy_col(&mut self, src: usize, dst: usize) {
        let values = self.col(src);
        self.set_col(dst, values);
    }

    /// Apply `f` to every element
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Matrix<U, R, C> {
        Matrix { rows: self.rows.map(|row| row.map(&mut f)) }
    }

    /// Element-wise conversion from another numeric type
    pub fn cast<U>(self) -> Matrix<U, R, C>
    where
        T: AsPrimitive<U>,
        U: Copy + 'static,
    {
        self.map(AsPrimitive::as_)
    }

    /// New C×R matrix with rows and columns exchanged
    pub fn transposed(&self) -> Matrix<T, C, R> {
        Matrix::from_fn(|r, c| self.rows[c][r])
    }
}

impl<T: Copy + Zero, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The zero matrix
    pub fn zeros() -> Self {
        Self { rows: [Vector::zeros(); R] }
    }

    /// `row[dst] = row[src]`, then clear `row[src]` to zero
    ///
    /// Moving a row onto itself leaves it zeroed.
    pub fn move_row(&mut self, src: usize, dst: usize) {
        self.copy_row(src, dst);
        self.set_row_value(src, T::zero());
    }

    /// `col[dst] = col[src]`, then clear `col[src]` to zero
    ///
    /// Moving a column onto itself leaves it zeroed.
    pub fn move_col(&mut self, src: usize, dst: usize) {
        self.copy_col(src, dst);
        self.set_col_value(src, T::zero());
    }
}

impl<T: Copy + Zero, const R: usize, const C: usize> Default for Matrix<T, R, C> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Copy + Num, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Multiply row `row` by `k`
    pub fn scale_row(&mut self, row: usize, k: T) {
        check_row::<R>(row);
        self.rows[row] = self.rows[row].scale(k);
    }

    /// Multiply column `col` by `k`
    pub fn scale_col(&mut self, col: usize, k: T) {
        check_col::<C>(col);
        for row in &mut self.rows {
            row[col] = row[col] * k;
        }
    }

    /// Add `k` to every element of row `row`
    pub fn add_to_row(&mut self, row: usize, k: T) {
        check_row::<R>(row);
        self.rows[row] = self.rows[row].offset(k);
    }

    /// Add `k` to every element of column `col`
    pub fn add_to_col(&mut self, col: usize, k: T) {
        check_col::<C>(col);
        for row in &mut self.rows {
            row[col] = row[col] + k;
        }
    }

    /// `row[dst] += row[src]`
    pub fn add_row_to_row(&mut self, src: usize, dst: usize) {
        self.add_scaled_row_to_row(src, dst, T::one());
    }

    /// `row[dst] += row[src] * factor`
    pub fn add_scaled_row_to_row(&mut self, src: usize, dst: usize, factor: T) {
        let source = self.row(src);
        check_row::<R>(dst);
        self.rows[dst] += source.scale(factor);
    }

    /// `col[dst] += col[src]`
    pub fn add_col_to_col(&mut self, src: usize, dst: usize) {
        self.add_scaled_col_to_col(src, dst, T::one());
    }

    /// `col[dst] += col[src] * factor`
    pub fn add_scaled_col_to_col(&mut self, src: usize, dst: usize, factor: T) {
        check_col::<C>(src);
        check_col::<C>(dst);
        for row in &mut self.rows {
            row[dst] = row[dst] + row[src] * factor;
        }
    }

    /// Multiply every element by `k`
    #[must_use]
    pub fn scale(self, k: T) -> Self {
        self.map(|e| e * k)
    }

    /// Divide every element by `k`
    #[must_use]
    pub fn div_scalar(self, k: T) -> Self {
        self.map(|e| e / k)
    }

    /// Add `k` to every element
    #[must_use]
    pub fn offset(self, k: T) -> Self {
        self.map(|e| e + k)
    }

    /// `(R×C) · (C×K)` with the same element type
    pub fn mul_matrix<const K: usize>(&self, rhs: &Matrix<T, C, K>) -> Matrix<T, R, K> {
        Matrix::from_fn(|r, k| {
            (0..C).fold(T::zero(), |acc, c| acc + self.rows[r][c] * rhs.rows[c][k])
        })
    }

    /// `(R×C) · (C×K)` accumulated in a caller-chosen element type
    ///
    /// Both operands are converted element-wise to `RT` before multiplying,
    /// which allows e.g. `f32 × f64 → f64` or `i32 × i32 → i64`.
    pub fn mul_matrix_into<RT, U, const K: usize>(&self, rhs: &Matrix<U, C, K>) -> Matrix<RT, R, K>
    where
        T: AsPrimitive<RT>,
        U: AsPrimitive<RT>,
        RT: Copy + Num + 'static,
    {
        Matrix::from_fn(|r, k| {
            (0..C).fold(RT::zero(), |acc, c| {
                let a: RT = self.rows[r][c].as_();
                let b: RT = rhs.rows[c][k].as_();
                acc + a * b
            })
        })
    }

    /// Row vector times matrix: `v * M`
    pub fn transform_row(&self, v: &Vector<T, R>) -> Vector<T, C> {
        Vector::from_array(std::array::from_fn(|c| {
            (0..R).fold(T::zero(), |acc, r| acc + v[r] * self.rows[r][c])
        }))
    }

    /// Row vector times matrix, accumulated in a caller-chosen element type
    pub fn transform_row_into<RT, U>(&self, v: &Vector<U, R>) -> Vector<RT, C>
    where
        T: AsPrimitive<RT>,
        U: AsPrimitive<RT>,
        RT: Copy + Num + 'static,
    {
        Vector::from_array(std::array::from_fn(|c| {
            (0..R).fold(RT::zero(), |acc, r| {
                let a: RT = v[r].as_();
                let b: RT = self.rows[r][c].as_();
                acc + a * b
            })
        }))
    }

    /// Matrix times column vector: `M * v`, returned as an R×1 matrix
    pub fn mul_column(&self, v: &Vector<T, C>) -> Matrix<T, R, 1> {
        Matrix::from_fn(|r, _| self.rows[r].dot(v))
    }

    /// Matrix times column vector, accumulated in a caller-chosen element type
    pub fn mul_column_into<RT, U>(&self, v: &Vector<U, C>) -> Matrix<RT, R, 1>
    where
        T: AsPrimitive<RT>,
        U: AsPrimitive<RT>,
        RT: Copy + Num + 'static,
    {
        Matrix::from_fn(|r, _| {
            (0..C).fold(RT::zero(), |acc, c| {
                let a: RT = self.rows[r][c].as_();
                let b: RT = v[c].as_();
                acc + a * b
            })
        })
    }
}

impl<T: Copy + Zero + One, const N: usize> Matrix<T, N, N> {
    /// The identity matrix
    pub fn identity() -> Self {
        Self::from_fn(|r, c| if r == c { T::one() } else { T::zero() })
    }
}

impl<T: Copy, const N: usize> Matrix<T, N, N> {
    /// Transpose in place
    ///
    /// Only square matrices can be transposed in place; use
    /// [`Matrix::transposed`] for any shape.
    pub fn transpose(&mut self) {
        for r in 0..N {
            for c in (r + 1)..N {
                let tmp = self.rows[r][c];
                self.rows[r][c] = self.rows[c][r];
                self.rows[c][r] = tmp;
            }
        }
    }
}

impl<T: Copy + Num, const N: usize> Matrix<T, N, N> {
    /// Sum of the diagonal
    pub fn trace(&self) -> T {
        (0..N).fold(T::zero(), |acc, i| acc + self.rows[i][i])
    }
}

impl<T: Float, const N: usize> Matrix<T, N, N> {
    /// Whether every element is within `epsilon` of the identity
    pub fn is_identity(&self, epsilon: T) -> bool {
        self.rows.iter().enumerate().all(|(r, row)| {
            row.iter().enumerate().all(|(c, &e)| {
                let expected = if r == c { T::one() } else { T::zero() };
                (e - expected).abs() <= epsilon
            })
        })
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T, R, C>
where
    T: Copy,
{
    fn from(elements: [[T; C]; R]) -> Self {
        Self::from_array(elements)
    }
}

impl<T, const R: usize, const C: usize> From<[Vector<T, C>; R]> for Matrix<T, R, C> {
    fn from(rows: [Vector<T, C>; R]) -> Self {
        Self::from_rows(rows)
    }
}

impl<T, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.rows[row][col]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<T, R, C> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.rows[row][col]
    }
}

impl<T, const R: usize, const C: usize> Index<usize> for Matrix<T, R, C> {
    type Output = Vector<T, C>;

    fn index(&self, row: usize) -> &Vector<T, C> {
        &self.rows[row]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<usize> for Matrix<T, R, C> {
    fn index_mut(&mut self, row: usize) -> &mut Vector<T, C> {
        &mut self.rows[row]
    }
}

impl<T: Copy + Num, const R: usize, const C: usize> Add for Matrix<T, R, C> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_fn(|r, c| self.rows[r][c] + rhs.rows[r][c])
    }
}

impl<T: Copy + Num, const R: usize, const C: usize> Sub for Matrix<T, R, C> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_fn(|r, c| self.rows[r][c] - rhs.rows[r][c])
    }
}

impl<T: Copy + Neg<Output = T>, const R: usize, const C: usize> Neg for Matrix<T, R, C> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|e| -e)
    }
}

impl<T: Copy + Num, const R: usize, const C: usize> Mul<T> for Matrix<T, R, C> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.scale(rhs)
    }
}

impl<T: Copy + Num, const R: usize, const C: usize> Div<T> for Matrix<T, R, C> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        self.div_scalar(rhs)
    }
}

impl<T: Copy + Num, const R: usize, const C: usize, const K: usize> Mul<Matrix<T, C, K>>
    for Matrix<T, R, C>
{
    type Output = Matrix<T, R, K>;

    fn mul(self, rhs: Matrix<T, C, K>) -> Matrix<T, R, K> {
        self.mul_matrix(&rhs)
    }
}

impl<T: Copy + Num, const R: usize, const C: usize> Mul<Vector<T, C>> for Matrix<T, R, C> {
    type Output = Matrix<T, R, 1>;

    fn mul(self, rhs: Vector<T, C>) -> Matrix<T, R, 1> {
        self.mul_column(&rhs)
    }
}

impl<T: Copy + Num, const R: usize, const C: usize> Mul<Matrix<T, R, C>> for Vector<T, R> {
    type Output = Vector<T, C>;

    fn mul(self, rhs: Matrix<T, R, C>) -> Vector<T, C> {
        rhs.transform_row(&self)
    }
}

impl<T: Copy + Num, const R: usize, const C: usize> AddAssign for Matrix<T, R, C> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Copy + Num, const R: usize, const C: usize> SubAssign for Matrix<T, R, C> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Copy + Num, const R: usize, const C: usize> MulAssign<T> for Matrix<T, R, C> {
    fn mul_assign(&mut self, rhs: T) {
        *self = self.scale(rhs);
    }
}

impl<T: Copy + Num, const N: usize> MulAssign<Matrix<T, N, N>> for Matrix<T, N, N> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.mul_matrix(&rhs);
    }
}

impl<T, const R: usize, const C: usize> AbsDiffEq for Matrix<T, R, C>
where
    T: AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T, const R: usize, const C: usize> RelativeEq for Matrix<T, R, C>
where
    T: RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
