use crate::math::tensor::WeightTensor;

/// Feed-forward, fully-connected perceptron network with logistic-sigmoid
/// activations on every non-input layer.
///
/// Layer 0 is the input layer and the last layer is the output layer; a
/// network always has at least those two. The activation and pre-activation
/// caches are rebuilt from scratch on every `evaluate` call, so a gradient
/// computation always reads a cache produced by its own forward pass.
#[derive(Debug, Clone)]
pub struct Network {
    nodes_in_layer: Vec<usize>,
    weights: WeightTensor,
    activations: Vec<Vec<f64>>,
    dots: Vec<Vec<f64>>,
}

/// The threshold function: logistic sigmoid, strictly inside (0, 1).
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the threshold function.
fn dsigmoid(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}

impl Network {
    /// Builds a network with every weight drawn uniformly from
    /// `[weight_min, weight_max)`.
    ///
    /// `hidden_layers` may be empty, in which case the input layer feeds
    /// the output layer directly.
    pub fn new(
        input_count: usize,
        hidden_layers: &[usize],
        output_count: usize,
        weight_min: f64,
        weight_max: f64,
    ) -> Network {
        assert!(input_count > 0, "input layer must have at least one node");
        assert!(output_count > 0, "output layer must have at least one node");
        assert!(
            hidden_layers.iter().all(|&n| n > 0),
            "hidden layers must have at least one node"
        );

        let mut nodes_in_layer = Vec::with_capacity(hidden_layers.len() + 2);
        nodes_in_layer.push(input_count);
        nodes_in_layer.extend_from_slice(hidden_layers);
        nodes_in_layer.push(output_count);

        let weights = WeightTensor::uniform(&nodes_in_layer, weight_min, weight_max);
        Network::from_weights(nodes_in_layer, weights)
    }

    /// Builds a network around an existing weight tensor. The tensor shape
    /// must match the topology exactly.
    pub fn from_weights(nodes_in_layer: Vec<usize>, weights: WeightTensor) -> Network {
        assert!(
            nodes_in_layer.len() >= 2,
            "a network needs an input and an output layer"
        );
        assert!(
            weights.same_shape(&WeightTensor::zeros(&nodes_in_layer)),
            "weight tensor shape does not match the topology"
        );

        let activations = nodes_in_layer.iter().map(|&n| vec![0.0; n]).collect();
        let dots = nodes_in_layer.iter().map(|&n| vec![0.0; n]).collect();

        Network {
            nodes_in_layer,
            weights,
            activations,
            dots,
        }
    }

    /// Per-layer node counts, input layer first.
    pub fn topology(&self) -> &[usize] {
        &self.nodes_in_layer
    }

    pub fn layer_count(&self) -> usize {
        self.nodes_in_layer.len()
    }

    pub fn input_count(&self) -> usize {
        self.nodes_in_layer[0]
    }

    pub fn output_count(&self) -> usize {
        self.nodes_in_layer[self.layer_count() - 1]
    }

    pub fn weights(&self) -> &WeightTensor {
        &self.weights
    }

    /// Replaces the weight tensor wholesale. The replacement must have the
    /// same shape as the current tensor.
    pub fn set_weights(&mut self, weights: WeightTensor) {
        assert!(
            self.weights.same_shape(&weights),
            "replacement weight tensor shape does not match"
        );
        self.weights = weights;
    }

    /// Forward pass: loads `input` into the layer-0 activations, then for
    /// each later layer computes every node's input dot product and sigmoid
    /// activation. Returns a copy of the output layer's activations.
    pub fn evaluate(&mut self, input: &[f64]) -> Vec<f64> {
        assert_eq!(
            input.len(),
            self.input_count(),
            "input length does not match the input layer"
        );

        self.activations[0].copy_from_slice(input);

        for n in 1..self.layer_count() {
            for i in 0..self.nodes_in_layer[n] {
                let mut dot = 0.0;
                for j in 0..self.nodes_in_layer[n - 1] {
                    dot += self.activations[n - 1][j] * self.weights.layers[n - 1].data[j][i];
                }
                self.dots[n][i] = dot;
                self.activations[n][i] = sigmoid(dot);
            }
        }

        self.activations[self.layer_count() - 1].clone()
    }

    /// Partial derivatives of this case's total error with respect to every
    /// weight, via the reverse-mode chain rule.
    ///
    /// Runs `evaluate` first so the gradient always reads a fresh cache.
    /// With `omega` the backpropagated error signal (seeded at the output
    /// layer as `activation − target`) and `psi = omega × sigmoid'(dot)`,
    /// each weight's derivative is `activation[src] × psi[dst]`, and omega
    /// one layer earlier accumulates `psi × weight`.
    ///
    /// The result points toward increasing error; an update must subtract
    /// `learning_rate × gradient`.
    pub fn compute_gradient(&mut self, input: &[f64], target: &[f64]) -> WeightTensor {
        assert_eq!(
            target.len(),
            self.output_count(),
            "target length does not match the output layer"
        );

        let results = self.evaluate(input);
        let last = self.layer_count() - 1;

        let mut gradient = WeightTensor::zeros(&self.nodes_in_layer);
        let mut omega: Vec<f64> = results
            .iter()
            .zip(target.iter())
            .map(|(&a, &t)| a - t)
            .collect();

        for layer in (0..last).rev() {
            let mut prev_omega = vec![0.0; self.nodes_in_layer[layer]];
            for j in 0..self.nodes_in_layer[layer + 1] {
                let psi = omega[j] * dsigmoid(self.dots[layer + 1][j]);
                for i in 0..self.nodes_in_layer[layer] {
                    gradient.layers[layer].data[i][j] = self.activations[layer][i] * psi;
                    prev_omega[i] += psi * self.weights.layers[layer].data[i][j];
                }
            }
            omega = prev_omega;
        }

        gradient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;

    /// Fixed-weight 2-2-1 network shared by the gradient tests.
    fn fixed_network() -> Network {
        Network::from_weights(
            vec![2, 2, 1],
            WeightTensor::from_layers(vec![
                Matrix::from_data(vec![vec![0.5, 0.3], vec![0.2, 0.7]]),
                Matrix::from_data(vec![vec![0.4], vec![0.6]]),
            ]),
        )
    }

    /// Half the summed squared error of one case, matching the trainer's
    /// aggregate metric.
    fn case_error(network: &mut Network, input: &[f64], target: &[f64]) -> f64 {
        network
            .evaluate(input)
            .iter()
            .zip(target.iter())
            .map(|(&a, &t)| (t - a) * (t - a))
            .sum::<f64>()
            / 2.0
    }

    #[test]
    fn evaluate_output_is_sized_and_bounded() {
        let mut network = Network::new(3, &[5, 4], 2, -1.0, 1.0);
        let output = network.evaluate(&[0.0, 0.5, 1.0]);
        assert_eq!(output.len(), 2);
        for &o in &output {
            assert!(o > 0.0 && o < 1.0);
        }
    }

    #[test]
    fn evaluate_handles_no_hidden_layers() {
        let mut network = Network::new(2, &[], 1, -1.0, 1.0);
        assert_eq!(network.layer_count(), 2);
        let output = network.evaluate(&[1.0, 0.0]);
        assert_eq!(output.len(), 1);
        assert!(output[0] > 0.0 && output[0] < 1.0);
    }

    #[test]
    fn evaluate_is_deterministic_for_fixed_weights() {
        let mut network = fixed_network();
        let first = network.evaluate(&[1.0, 2.0]);
        let second = network.evaluate(&[1.0, 2.0]);
        assert_eq!(first, second);
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let input = [1.0, 2.0];
        let target = [0.8];
        let epsilon = 1e-6;

        let mut network = fixed_network();
        let gradient = network.compute_gradient(&input, &target);

        for layer in 0..2 {
            for i in 0..network.weights().layers[layer].rows {
                for j in 0..network.weights().layers[layer].cols {
                    let mut plus = network.clone();
                    let mut minus = network.clone();
                    let mut w = plus.weights().clone();
                    w.layers[layer].data[i][j] += epsilon;
                    plus.set_weights(w);
                    let mut w = minus.weights().clone();
                    w.layers[layer].data[i][j] -= epsilon;
                    minus.set_weights(w);

                    let numerical = (case_error(&mut plus, &input, &target)
                        - case_error(&mut minus, &input, &target))
                        / (2.0 * epsilon);
                    let analytical = gradient.layers[layer].data[i][j];
                    let denom = (numerical.abs() + analytical.abs()).max(1e-8);
                    assert!(
                        ((numerical - analytical) / denom).abs() < 1e-5,
                        "gradient mismatch at [{layer}][{i}][{j}]: numerical={numerical:.10}, analytical={analytical:.10}"
                    );
                }
            }
        }
    }

    #[test]
    fn small_step_against_gradient_decreases_case_error() {
        let input = [1.0, 0.5];
        // Target far below the initial output, so actual > target.
        let target = [0.05];

        let mut network = fixed_network();
        let before = case_error(&mut network, &input, &target);
        let gradient = network.compute_gradient(&input, &target);

        let stepped = network.weights().step(1e-3, &gradient);
        network.set_weights(stepped);
        let after = case_error(&mut network, &input, &target);

        assert!(after < before, "expected {after} < {before}");
    }

    #[test]
    fn gradient_shape_matches_weights() {
        let mut network = Network::new(4, &[3], 2, -1.0, 1.0);
        let gradient = network.compute_gradient(&[0.1, 0.2, 0.3, 0.4], &[1.0, 0.0]);
        assert!(gradient.same_shape(network.weights()));
    }

    #[test]
    #[should_panic(expected = "replacement weight tensor")]
    fn set_weights_panics_on_shape_mismatch() {
        let mut network = Network::new(2, &[2], 1, -1.0, 1.0);
        network.set_weights(WeightTensor::zeros(&[2, 3, 1]));
    }

    #[test]
    #[should_panic(expected = "input length")]
    fn evaluate_panics_on_wrong_input_length() {
        let mut network = Network::new(2, &[2], 1, -1.0, 1.0);
        network.evaluate(&[1.0]);
    }
}
