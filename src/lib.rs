/*!
 * Dense vectors and matrices of `f64`, and a Restricted Boltzmann Machine built on top of
 * them.
 *
 * If this is your first time using this crate you should start with the
 * [Matrix](./matrices/struct.Matrix.html) type and then the [rbm] module for an example
 * of training a model.
 *
 * Operations check the sizes of their inputs before doing any work and report a
 * mismatch as an [Error](errors::Error) rather than panicking or returning a
 * placeholder value.
 */

pub mod errors;
pub mod vectors;
pub mod matrices;
pub mod linear_algebra;
pub mod rbm;
