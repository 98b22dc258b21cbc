/*!
 * Read only access to matrix shaped data.
 *
 * [MatrixRef] is the capability the linear algebra functions need from their inputs,
 * which allows them to work over a [Matrix] or over a view of one such as
 * [Transposed] without first copying the data into a new dense matrix.
 *
 * ```
 * use rbm_algebra::matrices::{Matrix, MatrixRef};
 * let x = Matrix::new(2, 3, vec![
 *     1.0, 2.0, 3.0,
 *     4.0, 5.0, 6.0 ])?;
 * let transposed = x.transpose_view();
 * assert_eq!((3, 2), (transposed.view_rows(), transposed.view_columns()));
 * assert_eq!(Some(&6.0), transposed.try_get_reference(2, 1));
 * assert_eq!(None, transposed.try_get_reference(0, 2));
 * # Ok::<(), rbm_algebra::errors::Error>(())
 * ```
 */

use crate::matrices::{Column, Matrix, Row};

/**
 * A shared reference to some matrix shaped data.
 *
 * Implementations must report a fixed number of rows and columns for as long as they
 * are borrowed, and return `Some` from `try_get_reference` for every index within them.
 */
pub trait MatrixRef {
    /**
     * Gets a reference to the value at the index if the index is in range.
     */
    fn try_get_reference(&self, row: Row, column: Column) -> Option<&f64>;

    /**
     * The number of rows that this reference can view.
     */
    fn view_rows(&self) -> Row;

    /**
     * The number of columns that this reference can view.
     */
    fn view_columns(&self) -> Column;
}

impl MatrixRef for Matrix {
    fn try_get_reference(&self, row: Row, column: Column) -> Option<&f64> {
        self.get_reference(row, column).ok()
    }

    fn view_rows(&self) -> Row {
        self.rows()
    }

    fn view_columns(&self) -> Column {
        self.columns()
    }
}

impl<S: MatrixRef + ?Sized> MatrixRef for &S {
    fn try_get_reference(&self, row: Row, column: Column) -> Option<&f64> {
        S::try_get_reference(self, row, column)
    }

    fn view_rows(&self) -> Row {
        S::view_rows(self)
    }

    fn view_columns(&self) -> Column {
        S::view_columns(self)
    }
}

/**
 * A transposed view of some matrix data. Row `i` of the view is column `i` of the
 * source.
 */
#[derive(Debug, Clone)]
pub struct Transposed<S> {
    source: S,
}

impl<S: MatrixRef> Transposed<S> {
    pub fn new(source: S) -> Transposed<S> {
        Transposed { source }
    }
}

impl<S: MatrixRef> MatrixRef for Transposed<S> {
    fn try_get_reference(&self, row: Row, column: Column) -> Option<&f64> {
        self.source.try_get_reference(column, row)
    }

    fn view_rows(&self) -> Row {
        self.source.view_columns()
    }

    fn view_columns(&self) -> Column {
        self.source.view_rows()
    }
}
