/*!
Restricted Boltzmann Machine trained by one step contrastive divergence (CD-1).

An [Rbm] has a layer of visible units and a layer of hidden units, with every visible unit
connected to every hidden unit by a weight and no connections within a layer. Training
batches are matrices with one example per row and one column per visible unit.

Each training epoch runs one round of alternating Gibbs sampling over the whole batch:

1. the hidden expectation `H0 = sigmoid(V0 * W + hidden_bias)` of the batch `V0`
2. a Bernoulli sample of `H0`
3. the visible expectation `V1 = sigmoid(sample * W^T + visible_bias)`
4. the hidden expectation `H1` of `V1`

and then moves the weights and biases by the learning rate times the difference between
the data driven and reconstruction driven statistics, averaged over the batch.

All randomness comes from the random number generator passed in, so training is
reproducible with a seeded generator.

```
use rand::SeedableRng;
use rbm_algebra::matrices::Matrix;
use rbm_algebra::rbm::Rbm;

let mut random_generator = rand_chacha::ChaCha8Rng::seed_from_u64(7);
let mut rbm = Rbm::new(6, 2, &mut random_generator);

let batch = Matrix::new(4, 6, vec![
    1.0, 1.0, 1.0, 0.0, 0.0, 0.0,
    1.0, 0.0, 1.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 1.0, 1.0, 1.0,
    0.0, 0.0, 0.0, 1.0, 0.0, 1.0 ])?;
rbm.learn(&batch, 100, &mut random_generator)?;

let reconstruction = rbm.reconstruct(&batch, &mut random_generator)?;
assert_eq!((4, 6), reconstruction.size());
assert!(reconstruction.row_major_values().iter().all(|&x| x == 0.0 || x == 1.0));
# Ok::<(), rbm_algebra::errors::Error>(())
```
*/

use rand::Rng;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Shape};
use crate::linear_algebra;
use crate::matrices::Matrix;
use crate::vectors::Vector;

/// The step size applied to each epoch's parameter update unless configured otherwise.
pub const DEFAULT_LEARNING_RATE: f64 = 0.09;

/**
 * The logistic function `1 / (1 + e^-x)`, mapping a pre-activation to a probability.
 */
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/**
 * A Restricted Boltzmann Machine with `visible_units` x `hidden_units` weights and a bias
 * per unit.
 *
 * The parameters are only modified by [run_epoch](Rbm::run_epoch) and
 * [learn](Rbm::learn), and the number of units never changes after construction.
 */
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RbmDeserialize"))]
pub struct Rbm {
    learning_rate: f64,
    visible_bias: Vector,
    hidden_bias: Vector,
    weights: Matrix,
}

/**
 * The four layers of one round of contrastive divergence over a batch, each with one row
 * per example.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    /// The input batch V0, which is never sampled
    pub visible: Matrix,
    /// The hidden expectation H0 of the input batch
    pub hidden: Matrix,
    /// The visible expectation V1 reconstructed from a sample of H0
    pub reconstructed_visible: Matrix,
    /// The hidden expectation H1 of the reconstruction
    pub reconstructed_hidden: Matrix,
}

/**
 * Batch averaged changes to each of the model's parameters.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterUpdate {
    pub weights: Matrix,
    pub visible_bias: Vector,
    pub hidden_bias: Vector,
}

impl Rbm {
    /**
     * Creates a model with weights drawn independently from the uniform distribution over
     * `[0, 1)` and all biases set to 0.
     */
    pub fn new<R: Rng>(
        visible_units: usize,
        hidden_units: usize,
        random_generator: &mut R,
    ) -> Rbm {
        Rbm {
            learning_rate: DEFAULT_LEARNING_RATE,
            visible_bias: Vector::zeros(visible_units),
            hidden_bias: Vector::zeros(hidden_units),
            weights: Matrix::random(visible_units, hidden_units, random_generator),
        }
    }

    /**
     * Creates a model from existing parameters, such as ones saved from an earlier
     * training run. The weights must be a `visible_bias.size()` x `hidden_bias.size()`
     * matrix.
     */
    pub fn from_parameters(
        weights: Matrix,
        visible_bias: Vector,
        hidden_bias: Vector,
    ) -> Result<Rbm, Error> {
        if weights.size() != (visible_bias.size(), hidden_bias.size()) {
            return Err(Error::mismatch(
                "model construction",
                Shape::Matrix(weights.rows(), weights.columns()),
                Shape::Matrix(visible_bias.size(), hidden_bias.size()),
            ));
        }
        Ok(Rbm {
            learning_rate: DEFAULT_LEARNING_RATE,
            visible_bias,
            hidden_bias,
            weights,
        })
    }

    /**
     * Sets the learning rate each parameter update is scaled by.
     */
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Rbm {
        self.learning_rate = learning_rate;
        self
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /**
     * The `visible_units` x `hidden_units` weight matrix.
     */
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn visible_bias(&self) -> &Vector {
        &self.visible_bias
    }

    pub fn hidden_bias(&self) -> &Vector {
        &self.hidden_bias
    }

    pub fn visible_units(&self) -> usize {
        self.visible_bias.size()
    }

    pub fn hidden_units(&self) -> usize {
        self.hidden_bias.size()
    }

    /**
     * Computes `sigmoid(visible * W + hidden_bias)`, adding the bias to every row, which
     * gives the probability of each hidden unit being on for each example.
     */
    pub fn hidden_expectation(&self, visible: &Matrix) -> Result<Matrix, Error> {
        if visible.columns() != self.visible_units() {
            return Err(Error::mismatch(
                "hidden expectation",
                Shape::Matrix(visible.rows(), visible.columns()),
                Shape::Matrix(self.weights.rows(), self.weights.columns()),
            ));
        }
        let mut expectation = linear_algebra::multiply(visible, &self.weights)?;
        expectation.add_to_rows_mut(&self.hidden_bias)?.map_mut(sigmoid);
        Ok(expectation)
    }

    /**
     * Computes `sigmoid(hidden * W^T + visible_bias)`, adding the bias to every row, which
     * gives the probability of each visible unit being on for each example.
     */
    pub fn visible_expectation(&self, hidden: &Matrix) -> Result<Matrix, Error> {
        if hidden.columns() != self.hidden_units() {
            return Err(Error::mismatch(
                "visible expectation",
                Shape::Matrix(hidden.rows(), hidden.columns()),
                Shape::Matrix(self.weights.columns(), self.weights.rows()),
            ));
        }
        let mut expectation = linear_algebra::multiply(hidden, &self.weights.transpose_view())?;
        expectation.add_to_rows_mut(&self.visible_bias)?.map_mut(sigmoid);
        Ok(expectation)
    }

    /**
     * Draws a Bernoulli sample for every entry of a matrix of probabilities, in row major
     * order. Each entry becomes 1 if a fresh uniform draw `u` is less than the
     * probability and 0 otherwise. The input is left unchanged.
     */
    pub fn sample<R: Rng>(probabilities: &Matrix, random_generator: &mut R) -> Matrix {
        let mut sample = probabilities.copy();
        sample.map_mut(|p| {
            if random_generator.random::<f64>() < p {
                1.0
            } else {
                0.0
            }
        });
        sample
    }

    /**
     * Runs one round of contrastive divergence over the batch, returning the input
     * alongside the hidden expectation, the reconstructed visible expectation and its
     * hidden expectation.
     */
    pub fn gradient<R: Rng>(
        &self,
        batch: &Matrix,
        random_generator: &mut R,
    ) -> Result<Gradient, Error> {
        self.check_batch("gradient", batch)?;
        let hidden = self.hidden_expectation(batch)?;
        let reconstructed_visible =
            self.visible_expectation(&Rbm::sample(&hidden, random_generator))?;
        let reconstructed_hidden = self.hidden_expectation(&reconstructed_visible)?;
        Ok(Gradient {
            visible: batch.copy(),
            hidden,
            reconstructed_visible,
            reconstructed_hidden,
        })
    }

    /**
     * Averages the per example parameter changes over the batch.
     *
     * For each example `i` this computes `V0[i] - V1[i]` for the visible bias,
     * `H0[i] - H1[i]` for the hidden bias and `outer(V0[i], H0[i]) - outer(V1[i], H1[i])`
     * for the weights, sums each of these over all examples and then divides the sums
     * by the number of examples.
     */
    pub fn expected_values(&self, gradient: &Gradient) -> Result<ParameterUpdate, Error> {
        let examples = gradient.visible.rows();
        if examples == 0 {
            return Err(Error::EmptyBatch {
                operation: "expected values",
            });
        }
        let visible_size = (examples, self.visible_units());
        let hidden_size = (examples, self.hidden_units());
        for (layer, size) in [
            (&gradient.visible, visible_size),
            (&gradient.reconstructed_visible, visible_size),
            (&gradient.hidden, hidden_size),
            (&gradient.reconstructed_hidden, hidden_size),
        ] {
            if layer.size() != size {
                return Err(Error::mismatch(
                    "expected values",
                    Shape::Matrix(layer.rows(), layer.columns()),
                    Shape::Matrix(size.0, size.1),
                ));
            }
        }

        let mut weights = Matrix::zeros(self.visible_units(), self.hidden_units());
        let mut visible_bias = Vector::zeros(self.visible_units());
        let mut hidden_bias = Vector::zeros(self.hidden_units());
        for i in 0..examples {
            let v0 = gradient.visible.row(i)?;
            let h0 = gradient.hidden.row(i)?;
            let v1 = gradient.reconstructed_visible.row(i)?;
            let h1 = gradient.reconstructed_hidden.row(i)?;

            visible_bias.sum_mut(v0.copy().sub_mut(v1)?)?;
            hidden_bias.sum_mut(h0.copy().sub_mut(h1)?)?;
            weights.sum_mut(v0.outer(h0).sub_mut(&v1.outer(h1))?)?;
        }

        let examples = examples as f64;
        weights.map_mut(|x| x / examples);
        visible_bias.map_mut(|x| x / examples);
        hidden_bias.map_mut(|x| x / examples);
        Ok(ParameterUpdate {
            weights,
            visible_bias,
            hidden_bias,
        })
    }

    /**
     * Runs one epoch of training on the batch, adding the learning rate times the
     * [expected values](Rbm::expected_values) of the [gradient](Rbm::gradient) to the
     * weights and biases.
     *
     * The model is only modified if every step succeeds.
     */
    pub fn run_epoch<R: Rng>(
        &mut self,
        batch: &Matrix,
        random_generator: &mut R,
    ) -> Result<(), Error> {
        let gradient = self.gradient(batch, random_generator)?;
        let mut update = self.expected_values(&gradient)?;
        debug!(
            visible_bias_gradient_norm = update.visible_bias.norm(),
            "computed contrastive divergence update"
        );

        let learning_rate = self.learning_rate;
        update.weights.map_mut(|x| x * learning_rate);
        update.visible_bias.map_mut(|x| x * learning_rate);
        update.hidden_bias.map_mut(|x| x * learning_rate);

        self.weights.sum_mut(&update.weights)?;
        self.hidden_bias.sum_mut(&update.hidden_bias)?;
        self.visible_bias.sum_mut(&update.visible_bias)?;
        Ok(())
    }

    /**
     * Trains on the same full batch for the given number of epochs. The batch is checked
     * up front, so an invalid batch is rejected even when `epochs` is 0.
     */
    pub fn learn<R: Rng>(
        &mut self,
        batch: &Matrix,
        epochs: usize,
        random_generator: &mut R,
    ) -> Result<(), Error> {
        self.check_batch("learn", batch)?;
        info!(
            examples = batch.rows(),
            epochs,
            learning_rate = self.learning_rate,
            "training restricted boltzmann machine"
        );
        for epoch in 0..epochs {
            debug!(epoch, "starting epoch");
            self.run_epoch(batch, random_generator)?;
        }
        Ok(())
    }

    /**
     * Reconstructs the batch through the model, returning a Bernoulli sample of the
     * reconstructed visible expectation. This does not modify the model.
     */
    pub fn reconstruct<R: Rng>(
        &self,
        batch: &Matrix,
        random_generator: &mut R,
    ) -> Result<Matrix, Error> {
        let gradient = self.gradient(batch, random_generator)?;
        Ok(Rbm::sample(&gradient.reconstructed_visible, random_generator))
    }

    fn check_batch(&self, operation: &'static str, batch: &Matrix) -> Result<(), Error> {
        if batch.rows() == 0 {
            return Err(Error::EmptyBatch { operation });
        }
        if batch.columns() != self.visible_units() {
            return Err(Error::mismatch(
                operation,
                Shape::Matrix(batch.rows(), batch.columns()),
                Shape::Matrix(batch.rows(), self.visible_units()),
            ));
        }
        Ok(())
    }
}

/**
 * Deserialised data for an Rbm, which is only converted into an Rbm if the weights and
 * biases agree on the number of units.
 */
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(rename = "Rbm")]
struct RbmDeserialize {
    learning_rate: f64,
    visible_bias: Vector,
    hidden_bias: Vector,
    weights: Matrix,
}

#[cfg(feature = "serde")]
impl TryFrom<RbmDeserialize> for Rbm {
    type Error = Error;

    fn try_from(data: RbmDeserialize) -> Result<Self, Self::Error> {
        Ok(Rbm::from_parameters(data.weights, data.visible_bias, data.hidden_bias)?
            .with_learning_rate(data.learning_rate))
    }
}

#[test]
fn test_sigmoid() {
    assert_eq!(0.5, sigmoid(0.0));
    assert!(sigmoid(40.0) > 0.999_999);
    assert!(sigmoid(-40.0) < 0.000_001);
    let x = 1.3;
    assert!((sigmoid(x) + sigmoid(-x) - 1.0).abs() < 1e-15);
}
