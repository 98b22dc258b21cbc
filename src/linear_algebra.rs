/*!
 * Linear algebra algorithms on matrices
 *
 * These functions are also exposed as corresponding methods on the Matrix type
 * ([Matrix::multiply] and [Matrix::mean_of]), but in depth documentation is only
 * presented here.
 */

use crate::errors::{Error, Index, Shape};
use crate::matrices::{Column, Matrix, MatrixRef, Row};
use crate::vectors::Vector;

/**
 * Computes the matrix product of an MxN matrix and an NxL matrix, returning a new MxL
 * matrix.
 *
 * Each element `result[i][j]` is the inner product of row `i` of the left matrix and
 * column `j` of the right matrix, accumulated from left to right starting from zero, so
 * results are reproducible bit for bit.
 *
 * Fails with [DimensionMismatch](Error::DimensionMismatch) if the number of columns
 * in the left matrix is not equal to the number of rows in the right matrix, and with
 * [IndexOutOfRange](Error::IndexOutOfRange) if either input cannot return a value for an
 * index within the size it reports.
 *
 * ```
 * use rbm_algebra::matrices::Matrix;
 * use rbm_algebra::linear_algebra;
 * let a = Matrix::new(3, 3, vec![
 *     1.0, 2.0, 3.0,
 *     4.0, 5.0, 6.0,
 *     7.0, 8.0, 9.0 ])?;
 * let product = linear_algebra::multiply(&a, &a)?;
 * assert_eq!(
 *     vec![ 30.0, 36.0, 42.0, 66.0, 81.0, 96.0, 102.0, 126.0, 150.0 ],
 *     product.row_major_values());
 * # Ok::<(), rbm_algebra::errors::Error>(())
 * ```
 */
pub fn multiply<S1, S2>(left: &S1, right: &S2) -> Result<Matrix, Error>
where
    S1: MatrixRef + ?Sized,
    S2: MatrixRef + ?Sized,
{
    // LxM * MxN -> LxN
    let inner = left.view_columns();
    if inner != right.view_rows() {
        return Err(Error::mismatch(
            "matrix multiplication",
            Shape::Matrix(left.view_rows(), inner),
            Shape::Matrix(right.view_rows(), right.view_columns()),
        ));
    }

    let columns = right.view_columns();
    let rows = (0..left.view_rows())
        .map(|i| {
            (0..columns)
                .map(|j| dot_product(left, i, right, j, inner))
                .collect::<Result<Vec<f64>, Error>>()
                .map(Vector::new)
        })
        .collect::<Result<Vec<Vector>, Error>>()?;
    Ok(Matrix::from_rows_unchecked(rows, columns))
}

/*
 * Computes the dot product of the ith row of the left matrix and the jth column
 * of the right. Both must have at least `length` elements along those lines, a
 * MatrixRef that reports a larger size than it can index is an error.
 */
fn dot_product<S1, S2>(
    left: &S1,
    i: Row,
    right: &S2,
    j: Column,
    length: usize,
) -> Result<f64, Error>
where
    S1: MatrixRef + ?Sized,
    S2: MatrixRef + ?Sized,
{
    let mut sum = 0.0;
    for k in 0..length {
        let x = left
            .try_get_reference(i, k)
            .ok_or_else(|| out_of_view(left, i, k))?;
        let y = right
            .try_get_reference(k, j)
            .ok_or_else(|| out_of_view(right, k, j))?;
        sum += x * y;
    }
    Ok(sum)
}

fn out_of_view<S: MatrixRef + ?Sized>(source: &S, row: Row, column: Column) -> Error {
    Error::IndexOutOfRange {
        index: Index::Matrix(row, column),
        shape: Shape::Matrix(source.view_rows(), source.view_columns()),
    }
}

/**
 * Computes the elementwise arithmetic mean of a batch of matrices that all share the
 * same size.
 *
 * Each entry is computed by summing that entry across the batch in order and then
 * dividing by the number of matrices, rather than keeping a running average.
 *
 * Fails with [EmptyBatch](Error::EmptyBatch) for an empty slice and
 * [DimensionMismatch](Error::DimensionMismatch) if any matrix differs in size from the
 * first.
 *
 * ```
 * use rbm_algebra::matrices::Matrix;
 * use rbm_algebra::linear_algebra;
 * let a = Matrix::new(1, 2, vec![ 1.0, 2.0 ])?;
 * let b = Matrix::new(1, 2, vec![ 3.0, 6.0 ])?;
 * let mean = linear_algebra::matrix_mean(&[a, b])?;
 * assert_eq!(vec![ 2.0, 4.0 ], mean.row_major_values());
 * # Ok::<(), rbm_algebra::errors::Error>(())
 * ```
 */
pub fn matrix_mean(matrices: &[Matrix]) -> Result<Matrix, Error> {
    let first = matrices.first().ok_or(Error::EmptyBatch {
        operation: "matrix mean",
    })?;
    let (rows, columns) = first.size();
    if let Some(other) = matrices.iter().find(|m| m.size() != (rows, columns)) {
        return Err(Error::mismatch(
            "matrix mean",
            Shape::Matrix(rows, columns),
            Shape::Matrix(other.rows(), other.columns()),
        ));
    }

    let mut mean = Matrix::zeros(rows, columns);
    for matrix in matrices {
        mean.sum_mut(matrix)?;
    }
    let count = matrices.len() as f64;
    mean.map_mut(|x| x / count);
    Ok(mean)
}
