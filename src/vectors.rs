/*!
 * Dense vector type
 *
 * A [Vector] is a fixed length sequence of `f64` values. Its length is set on construction
 * and never changes afterwards.
 *
 * Methods ending in `_mut` modify the vector in place and return a mutable reference to the
 * same vector so calls can be chained. Everything else leaves the vector untouched and
 * allocates any result. To get a modified result without touching the original, take a
 * [copy](Vector::copy) first:
 *
 * ```
 * use rbm_algebra::vectors::Vector;
 * let a = Vector::from(vec![ 1.0, 2.0, 3.0 ]);
 * let b = Vector::from(vec![ 4.0, 5.0, 6.0 ]);
 * let mut c = a.copy();
 * c.sum_mut(&b)?.sub_mut(&b)?;
 * assert_eq!(a, c);
 * # Ok::<(), rbm_algebra::errors::Error>(())
 * ```
 */

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Index, Shape};
use crate::matrices::Matrix;

/**
 * A dense vector of real numbers.
 *
 * Binary elementwise operations such as [sum_mut](Vector::sum_mut) are only defined for
 * two vectors of the same [size](Vector::size), and return
 * [DimensionMismatch](Error::DimensionMismatch) otherwise.
 *
 * Equality via `==` compares element by element and is simply false for vectors of
 * different lengths. Use [equals](Vector::equals) to have a length mismatch reported as
 * an error instead.
 */
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vector {
    values: Vec<f64>,
}

impl Vector {
    /**
     * Creates a vector holding these values in order.
     */
    pub fn new(values: Vec<f64>) -> Vector {
        Vector { values }
    }

    /**
     * Creates a vector of this length with every element set to 0.
     */
    pub fn zeros(size: usize) -> Vector {
        Vector {
            values: vec![0.0; size],
        }
    }

    /**
     * Creates a vector of this length with every element drawn independently from the
     * uniform distribution over `[0, 1)`.
     *
     * ```
     * use rand::SeedableRng;
     * use rbm_algebra::vectors::Vector;
     * let mut random_generator = rand_chacha::ChaCha8Rng::seed_from_u64(3);
     * let v = Vector::random(4, &mut random_generator);
     * assert!(v.iter().all(|&x| (0.0..1.0).contains(&x)));
     * ```
     */
    pub fn random<R: Rng>(size: usize, random_generator: &mut R) -> Vector {
        Vector {
            values: (0..size).map(|_| random_generator.random::<f64>()).collect(),
        }
    }

    /**
     * The number of elements in this vector.
     */
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn shape(&self) -> Shape {
        Shape::Vector(self.size())
    }

    /**
     * Gets the value at this index. Indexes are 0 based.
     */
    pub fn get(&self, index: usize) -> Result<f64, Error> {
        self.values
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /**
     * Sets a new value at this index. Indexes are 0 based.
     */
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), Error> {
        let shape = self.shape();
        match self.values.get_mut(index) {
            Some(element) => {
                *element = value;
                Ok(())
            }
            None => Err(Error::IndexOutOfRange {
                index: Index::Vector(index),
                shape,
            }),
        }
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index: Index::Vector(index),
            shape: self.shape(),
        }
    }

    /**
     * Returns an independent copy of this vector. Equivalent to `clone`.
     */
    pub fn copy(&self) -> Vector {
        self.clone()
    }

    /**
     * Compares the two vectors element by element, failing if they are not the same size
     * rather than reporting them as unequal.
     */
    pub fn equals(&self, other: &Vector) -> Result<bool, Error> {
        self.check_same_size("equality", other)?;
        Ok(self.values == other.values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /**
     * Computes the inner (dot) product of two vectors of equal size, accumulating
     * `self[i] * other[i]` from left to right.
     *
     * ```
     * use rbm_algebra::vectors::Vector;
     * let a = Vector::from(vec![ 1.0, 2.0, 3.0 ]);
     * assert_eq!(14.0, a.inner(&a)?);
     * assert!(a.inner(&Vector::zeros(2)).is_err());
     * # Ok::<(), rbm_algebra::errors::Error>(())
     * ```
     */
    pub fn inner(&self, other: &Vector) -> Result<f64, Error> {
        self.check_same_size("inner product", other)?;
        Ok(inner_product(self.values.iter(), other.values.iter()))
    }

    /**
     * Computes the outer product of two vectors of any sizes, returning a
     * `self.size()` x `other.size()` matrix where `result[i][j] = self[i] * other[j]`.
     */
    pub fn outer(&self, other: &Vector) -> Matrix {
        let rows = self
            .values
            .iter()
            .map(|x| Vector {
                values: other.values.iter().map(|y| x * y).collect(),
            })
            .collect();
        Matrix::from_rows_unchecked(rows, other.size())
    }

    /**
     * Computes the Euclidean (L2) norm of this vector.
     */
    pub fn norm(&self) -> f64 {
        inner_product(self.values.iter(), self.values.iter()).sqrt()
    }

    /**
     * Applies a function to every element of this vector, replacing each value with the
     * function's output.
     */
    pub fn map_mut(&mut self, mut mapping_function: impl FnMut(f64) -> f64) -> &mut Self {
        for x in self.values.iter_mut() {
            *x = mapping_function(*x);
        }
        self
    }

    /**
     * Applies a function to every element of this vector, passing the index of each
     * element along with its value.
     */
    pub fn map_mut_with_index(
        &mut self,
        mut mapping_function: impl FnMut(usize, f64) -> f64,
    ) -> &mut Self {
        for (i, x) in self.values.iter_mut().enumerate() {
            *x = mapping_function(i, *x);
        }
        self
    }

    /**
     * Replaces every element `self[i]` with `f(self[i], other[i])`. Both vectors must be
     * the same size.
     */
    pub fn zip_map_mut(
        &mut self,
        other: &Vector,
        mapping_function: impl Fn(f64, f64) -> f64,
    ) -> Result<&mut Self, Error> {
        self.check_same_size("elementwise operation", other)?;
        Ok(self.zip_map_unchecked(other, mapping_function))
    }

    /**
     * Elementwise addition of another vector of the same size, in place.
     */
    pub fn sum_mut(&mut self, other: &Vector) -> Result<&mut Self, Error> {
        self.check_same_size("addition", other)?;
        Ok(self.zip_map_unchecked(other, |x, y| x + y))
    }

    /**
     * Elementwise subtraction of another vector of the same size, in place.
     */
    pub fn sub_mut(&mut self, other: &Vector) -> Result<&mut Self, Error> {
        self.check_same_size("subtraction", other)?;
        Ok(self.zip_map_unchecked(other, |x, y| x - y))
    }

    /**
     * Elementwise multiplication by another vector of the same size, in place.
     */
    pub fn mul_mut(&mut self, other: &Vector) -> Result<&mut Self, Error> {
        self.check_same_size("multiplication", other)?;
        Ok(self.zip_map_unchecked(other, |x, y| x * y))
    }

    /**
     * Elementwise division by another vector of the same size, in place. Division by zero
     * follows IEEE 754 rules.
     */
    pub fn div_mut(&mut self, other: &Vector) -> Result<&mut Self, Error> {
        self.check_same_size("division", other)?;
        Ok(self.zip_map_unchecked(other, |x, y| x / y))
    }

    // callers must have checked the sizes already
    pub(crate) fn zip_map_unchecked(
        &mut self,
        other: &Vector,
        mapping_function: impl Fn(f64, f64) -> f64,
    ) -> &mut Self {
        for (x, y) in self.values.iter_mut().zip(other.values.iter()) {
            *x = mapping_function(*x, *y);
        }
        self
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    fn check_same_size(&self, operation: &'static str, other: &Vector) -> Result<(), Error> {
        if self.size() != other.size() {
            return Err(Error::mismatch(operation, self.shape(), other.shape()));
        }
        Ok(())
    }
}

/**
 * Sums the pairwise products of two sequences in order, starting from 0.
 */
pub(crate) fn inner_product<'a, 'b>(
    left: impl Iterator<Item = &'a f64>,
    right: impl Iterator<Item = &'b f64>,
) -> f64 {
    left.zip(right).fold(0.0, |sum, (x, y)| sum + x * y)
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Vector {
        Vector::new(values)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(vector: Vector) -> Vec<f64> {
        vector.values
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[test]
fn test_inner_product_accumulates_from_zero() {
    let empty: [f64; 0] = [];
    assert_eq!(0.0, inner_product(empty.iter(), empty.iter()));
    assert_eq!(11.0, inner_product([1.0, 2.0].iter(), [3.0, 4.0].iter()));
}
