/*!
 * Errors reported by vector, matrix and model operations.
 *
 * All of these indicate a mistake at the call site, such as passing matrices of the wrong
 * size, rather than a transient condition, so there is nothing to retry.
 */

use std::error;
use std::fmt;

use crate::matrices::{Column, Row};

/**
 * The dimensionality of an operand involved in a failed operation.
 */
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Shape {
    /// A vector of this length
    Vector(usize),
    /// A matrix of this many rows and columns
    Matrix(Row, Column),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Vector(length) => write!(f, "vector of length {}", length),
            Shape::Matrix(rows, columns) => write!(f, "{}x{} matrix", rows, columns),
        }
    }
}

/**
 * A position that was requested from a vector or matrix.
 */
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Index {
    /// The position of an element in a vector
    Vector(usize),
    /// The row and column of an element in a matrix
    Matrix(Row, Column),
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Vector(i) => write!(f, "[{}]", i),
            Index::Matrix(row, column) => write!(f, "[{}, {}]", row, column),
        }
    }
}

/**
 * An enumeration of the ways an operation can reject its inputs.
 *
 * Operations check their preconditions before doing any work, so when one of these is
 * returned from an in place operation the receiver has not been modified.
 */
#[non_exhaustive]
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /**
     * The operands' sizes disagree where the operation requires them to be equal or
     * compatible, such as adding a 2x3 matrix to a 3x2 one, or multiplying an MxN matrix by
     * a KxL matrix with N != K.
     */
    DimensionMismatch {
        operation: &'static str,
        left: Shape,
        right: Shape,
    },
    /**
     * An accessor was called with an index outside the valid bounds.
     */
    IndexOutOfRange { index: Index, shape: Shape },
    /**
     * An aggregate was requested over zero items, such as the mean of no matrices or a
     * training batch with no examples.
     */
    EmptyBatch { operation: &'static str },
}

impl Error {
    pub(crate) fn mismatch(operation: &'static str, left: Shape, right: Shape) -> Error {
        Error::DimensionMismatch {
            operation,
            left,
            right,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DimensionMismatch {
                operation,
                left,
                right,
            } => write!(
                f,
                "Mismatched dimensions for {}, left is a {}, right is a {}",
                operation, left, right
            ),
            Error::IndexOutOfRange { index, shape } => {
                write!(f, "Index {} is out of range for a {}", index, shape)
            }
            Error::EmptyBatch { operation } => {
                write!(f, "Cannot compute {} over an empty batch", operation)
            }
        }
    }
}

impl error::Error for Error {}

#[test]
fn test_error_messages() {
    let error = Error::mismatch("inner product", Shape::Vector(3), Shape::Vector(2));
    assert_eq!(
        "Mismatched dimensions for inner product, left is a vector of length 3, right is a vector of length 2",
        error.to_string()
    );
    let error = Error::IndexOutOfRange {
        index: Index::Matrix(2, 0),
        shape: Shape::Matrix(2, 2),
    };
    assert_eq!("Index [2, 0] is out of range for a 2x2 matrix", error.to_string());
}
