/*!
 * Dense matrix type
 *
 * A [Matrix] is stored as a list of row [Vector]s which all have the same length. Rows can
 * be borrowed directly, so modifying a row obtained from [row_mut](Matrix::row_mut)
 * modifies the matrix itself, while columns are always copied out into a new vector.
 *
 * As with vectors, methods ending in `_mut` modify the matrix in place and return a
 * mutable reference to it for chaining, and everything else allocates.
 *
 * ```
 * use rbm_algebra::matrices::Matrix;
 * use rbm_algebra::vectors::Vector;
 * let mut x = Matrix::new(3, 3, vec![
 *     1.0, 2.0, 3.0,
 *     4.0, 5.0, 6.0,
 *     7.0, 8.0, 9.0 ])?;
 * // add the same vector to every row
 * x.add_to_rows_mut(&Vector::from(vec![ 1.0, 2.0, 3.0 ]))?;
 * assert_eq!(
 *     vec![ 2.0, 4.0, 6.0, 5.0, 7.0, 9.0, 8.0, 10.0, 12.0 ],
 *     x.row_major_values());
 * # Ok::<(), rbm_algebra::errors::Error>(())
 * ```
 */

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Index, Shape};
use crate::linear_algebra;
use crate::vectors::Vector;

pub mod views;

pub use views::{MatrixRef, Transposed};

/// Rows and columns are indexed by usize, as the storage is backed by nested Vecs
pub type Row = usize;
pub type Column = usize;

/**
 * A dense rows x columns matrix of real numbers, stored in row major order.
 *
 * Elementwise operations between two matrices such as [sum_mut](Matrix::sum_mut) are only
 * defined for matrices of identical [size](Matrix::size).
 */
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MatrixDeserialize"))]
pub struct Matrix {
    columns: Column,
    rows: Vec<Vector>,
}

impl Matrix {
    /**
     * Creates a matrix from a flat list of values in row major order.
     *
     * Example of a 2 x 3 matrix:
     * ```
     * use rbm_algebra::matrices::Matrix;
     * let x = Matrix::new(2, 3, vec![
     *     1.0, 2.0, 4.0,
     *     8.0, 9.0, 3.0 ])?;
     * assert_eq!((2, 3), x.size());
     * assert_eq!(8.0, x.get(1, 0)?);
     * # Ok::<(), rbm_algebra::errors::Error>(())
     * ```
     *
     * Fails with [DimensionMismatch](Error::DimensionMismatch) if the number of values is
     * not `rows * columns`, including when `rows * columns` overflows.
     */
    pub fn new(rows: Row, columns: Column, values: Vec<f64>) -> Result<Matrix, Error> {
        if rows.checked_mul(columns) != Some(values.len()) {
            return Err(Error::mismatch(
                "matrix construction",
                Shape::Matrix(rows, columns),
                Shape::Vector(values.len()),
            ));
        }
        let rows = if columns == 0 {
            (0..rows).map(|_| Vector::zeros(0)).collect()
        } else {
            values
                .chunks(columns)
                .map(|row| Vector::new(row.to_vec()))
                .collect()
        };
        Ok(Matrix { columns, rows })
    }

    /**
     * Creates a matrix from a list of row vectors, which must all be the same length.
     * An empty list creates a 0x0 matrix.
     */
    pub fn from_rows(rows: Vec<Vector>) -> Result<Matrix, Error> {
        let columns = rows.first().map(Vector::size).unwrap_or(0);
        if let Some(row) = rows.iter().find(|row| row.size() != columns) {
            return Err(Error::mismatch(
                "matrix construction",
                Shape::Vector(columns),
                Shape::Vector(row.size()),
            ));
        }
        Ok(Matrix { columns, rows })
    }

    // callers must guarantee every row has this many columns
    pub(crate) fn from_rows_unchecked(rows: Vec<Vector>, columns: Column) -> Matrix {
        debug_assert!(rows.iter().all(|row| row.size() == columns));
        Matrix { columns, rows }
    }

    /**
     * Creates a matrix of this size with every element set to 0.
     */
    pub fn zeros(rows: Row, columns: Column) -> Matrix {
        Matrix {
            columns,
            rows: (0..rows).map(|_| Vector::zeros(columns)).collect(),
        }
    }

    /**
     * Creates a matrix of this size with every element drawn independently from the
     * uniform distribution over `[0, 1)`, filling in row major order.
     */
    pub fn random<R: Rng>(rows: Row, columns: Column, random_generator: &mut R) -> Matrix {
        Matrix {
            columns,
            rows: (0..rows)
                .map(|_| Vector::random(columns, random_generator))
                .collect(),
        }
    }

    /**
     * Returns the dimensionality of this matrix in Row, Column format
     */
    pub fn size(&self) -> (Row, Column) {
        (self.rows(), self.columns())
    }

    /**
     * Gets the number of rows in this matrix.
     */
    pub fn rows(&self) -> Row {
        self.rows.len()
    }

    /**
     * Gets the number of columns in this matrix.
     */
    pub fn columns(&self) -> Column {
        self.columns
    }

    /**
     * Gets the total number of elements in this matrix, `rows * columns`.
     */
    pub fn len(&self) -> usize {
        self.rows() * self.columns()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn shape(&self) -> Shape {
        Shape::Matrix(self.rows(), self.columns())
    }

    fn out_of_range(&self, row: Row, column: Column) -> Error {
        Error::IndexOutOfRange {
            index: Index::Matrix(row, column),
            shape: self.shape(),
        }
    }

    /**
     * Gets a reference to the value at this row and column. Rows and Columns are 0 indexed.
     */
    pub fn get_reference(&self, row: Row, column: Column) -> Result<&f64, Error> {
        self.rows
            .get(row)
            .and_then(|r| r.as_slice().get(column))
            .ok_or_else(|| self.out_of_range(row, column))
    }

    /**
     * Gets a copy of the value at this row and column. Rows and Columns are 0 indexed.
     */
    pub fn get(&self, row: Row, column: Column) -> Result<f64, Error> {
        self.get_reference(row, column).copied()
    }

    /**
     * Sets a new value to this row and column. Rows and Columns are 0 indexed.
     */
    pub fn set(&mut self, row: Row, column: Column, value: f64) -> Result<(), Error> {
        if row >= self.rows() || column >= self.columns() {
            return Err(self.out_of_range(row, column));
        }
        self.rows[row].values_mut()[column] = value;
        Ok(())
    }

    /**
     * Borrows a row of this matrix. The returned vector is the matrix's own storage for
     * that row, not a copy.
     */
    pub fn row(&self, row: Row) -> Result<&Vector, Error> {
        self.rows.get(row).ok_or_else(|| self.out_of_range(row, 0))
    }

    /**
     * Mutably borrows a row of this matrix. Any change made through the returned vector
     * is a change to the matrix.
     *
     * ```
     * use rbm_algebra::matrices::Matrix;
     * let mut x = Matrix::zeros(2, 2);
     * x.row_mut(1)?.map_mut(|_| 5.0);
     * assert_eq!(vec![ 0.0, 0.0, 5.0, 5.0 ], x.row_major_values());
     * # Ok::<(), rbm_algebra::errors::Error>(())
     * ```
     */
    pub fn row_mut(&mut self, row: Row) -> Result<&mut Vector, Error> {
        if row >= self.rows() {
            return Err(self.out_of_range(row, 0));
        }
        Ok(&mut self.rows[row])
    }

    /**
     * Copies a column of this matrix out into a new vector of length `rows`.
     */
    pub fn column(&self, column: Column) -> Result<Vector, Error> {
        if column >= self.columns() {
            return Err(self.out_of_range(0, column));
        }
        Ok(Vector::new(
            self.rows.iter().map(|row| row.as_slice()[column]).collect(),
        ))
    }

    /**
     * Returns an iterator over the rows of this matrix in order.
     */
    pub fn row_iter(&self) -> std::slice::Iter<'_, Vector> {
        self.rows.iter()
    }

    /**
     * Returns an independent copy of this matrix. Equivalent to `clone`.
     */
    pub fn copy(&self) -> Matrix {
        self.clone()
    }

    /**
     * Compares the two matrices element by element, failing if they are not the same size
     * rather than reporting them as unequal.
     */
    pub fn equals(&self, other: &Matrix) -> Result<bool, Error> {
        self.check_same_size("equality", other)?;
        Ok(self.rows == other.rows)
    }

    /**
     * Returns all values of this matrix flattened in row major order.
     */
    pub fn row_major_values(&self) -> Vec<f64> {
        self.rows
            .iter()
            .flat_map(|row| row.iter().copied())
            .collect()
    }

    /**
     * Computes and returns the transpose of this matrix, leaving this one unchanged.
     *
     * ```
     * use rbm_algebra::matrices::Matrix;
     * let x = Matrix::new(2, 3, vec![
     *     1.0, 2.0, 3.0,
     *     4.0, 5.0, 6.0 ])?;
     * let y = Matrix::new(3, 2, vec![
     *     1.0, 4.0,
     *     2.0, 5.0,
     *     3.0, 6.0 ])?;
     * assert_eq!(x.transpose(), y);
     * # Ok::<(), rbm_algebra::errors::Error>(())
     * ```
     */
    pub fn transpose(&self) -> Matrix {
        let rows = (0..self.columns())
            .map(|j| Vector::new(self.rows.iter().map(|row| row.as_slice()[j]).collect()))
            .collect();
        Matrix::from_rows_unchecked(rows, self.rows())
    }

    /**
     * Returns a view of this matrix transposed, without copying any data.
     */
    pub fn transpose_view(&self) -> Transposed<&Matrix> {
        Transposed::new(self)
    }

    /**
     * Applies a function to all values in the matrix, modifying the matrix.
     */
    pub fn map_mut(&mut self, mut mapping_function: impl FnMut(f64) -> f64) -> &mut Self {
        for row in self.rows.iter_mut() {
            row.map_mut(&mut mapping_function);
        }
        self
    }

    /**
     * Applies a function to all values in the matrix, modifying the matrix. The function
     * also receives the row and column of each value.
     */
    pub fn map_mut_with_index(
        &mut self,
        mut mapping_function: impl FnMut(Row, Column, f64) -> f64,
    ) -> &mut Self {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.map_mut_with_index(|j, x| mapping_function(i, j, x));
        }
        self
    }

    /**
     * Elementwise addition of a matrix of the same size, in place.
     */
    pub fn sum_mut(&mut self, other: &Matrix) -> Result<&mut Self, Error> {
        self.check_same_size("addition", other)?;
        Ok(self.zip_map_unchecked(other, |x, y| x + y))
    }

    /**
     * Elementwise subtraction of a matrix of the same size, in place.
     */
    pub fn sub_mut(&mut self, other: &Matrix) -> Result<&mut Self, Error> {
        self.check_same_size("subtraction", other)?;
        Ok(self.zip_map_unchecked(other, |x, y| x - y))
    }

    /**
     * Elementwise (Hadamard) multiplication by a matrix of the same size, in place.
     */
    pub fn mul_mut(&mut self, other: &Matrix) -> Result<&mut Self, Error> {
        self.check_same_size("elementwise multiplication", other)?;
        Ok(self.zip_map_unchecked(other, |x, y| x * y))
    }

    /**
     * Elementwise division by a matrix of the same size, in place.
     */
    pub fn div_mut(&mut self, other: &Matrix) -> Result<&mut Self, Error> {
        self.check_same_size("division", other)?;
        Ok(self.zip_map_unchecked(other, |x, y| x / y))
    }

    /**
     * Adds the vector to every row of this matrix, in place. The vector's size must equal
     * the number of columns.
     *
     * This is how a bias vector is added to every example in a batch.
     */
    pub fn add_to_rows_mut(&mut self, vector: &Vector) -> Result<&mut Self, Error> {
        if vector.size() != self.columns() {
            return Err(Error::mismatch("row broadcast", self.shape(), vector.shape()));
        }
        for row in self.rows.iter_mut() {
            row.zip_map_unchecked(vector, |x, y| x + y);
        }
        Ok(self)
    }

    /**
     * Multiplies this matrix by another, see [linear_algebra::multiply].
     */
    pub fn multiply<S: MatrixRef>(&self, other: &S) -> Result<Matrix, Error> {
        linear_algebra::multiply(self, other)
    }

    /**
     * Computes the elementwise mean of a batch of same sized matrices, see
     * [linear_algebra::matrix_mean].
     */
    pub fn mean_of(matrices: &[Matrix]) -> Result<Matrix, Error> {
        linear_algebra::matrix_mean(matrices)
    }

    // callers must have checked the sizes already
    fn zip_map_unchecked(
        &mut self,
        other: &Matrix,
        mapping_function: impl Fn(f64, f64) -> f64,
    ) -> &mut Self {
        for (left, right) in self.rows.iter_mut().zip(other.rows.iter()) {
            left.zip_map_unchecked(right, &mapping_function);
        }
        self
    }

    fn check_same_size(&self, operation: &'static str, other: &Matrix) -> Result<(), Error> {
        if self.size() != other.size() {
            return Err(Error::mismatch(operation, self.shape(), other.shape()));
        }
        Ok(())
    }
}

/**
 * Deserialised data for a Matrix, which is only converted into a Matrix if every row
 * has `columns` elements.
 */
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(rename = "Matrix")]
struct MatrixDeserialize {
    columns: Column,
    rows: Vec<Vector>,
}

#[cfg(feature = "serde")]
impl TryFrom<MatrixDeserialize> for Matrix {
    type Error = Error;

    fn try_from(data: MatrixDeserialize) -> Result<Self, Self::Error> {
        if let Some(row) = data.rows.iter().find(|row| row.size() != data.columns) {
            return Err(Error::mismatch(
                "matrix deserialization",
                Shape::Vector(data.columns),
                Shape::Vector(row.size()),
            ));
        }
        Ok(Matrix {
            columns: data.columns,
            rows: data.rows,
        })
    }
}

#[test]
fn test_zero_column_matrices_keep_their_rows() {
    let x = Matrix::new(3, 0, vec![]).unwrap();
    assert_eq!((3, 0), x.size());
    assert_eq!((0, 3), x.transpose().size());
    assert!(x.is_empty());
}
