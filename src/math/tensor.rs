use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// The full set of connection weights for a network: one matrix per weight
/// layer, where layer `m` connects the nodes of layer `m` to those of layer
/// `m + 1` and has shape `nodes[m] × nodes[m + 1]`.
///
/// Storage is jagged: every stored entry is a real connection. Gradients
/// use the same type and must have the exact same shape as the weights they
/// were computed against; any disagreement is a programming error and the
/// mutating operations assert on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTensor {
    pub layers: Vec<Matrix>,
}

impl WeightTensor {
    /// Zero tensor shaped for the given per-layer node counts.
    pub fn zeros(nodes_in_layer: &[usize]) -> WeightTensor {
        let layers = nodes_in_layer
            .windows(2)
            .map(|pair| Matrix::zeros(pair[0], pair[1]))
            .collect();
        WeightTensor { layers }
    }

    /// Tensor with every entry drawn uniformly from `[min, max)`.
    pub fn uniform(nodes_in_layer: &[usize], min: f64, max: f64) -> WeightTensor {
        let layers = nodes_in_layer
            .windows(2)
            .map(|pair| Matrix::uniform(pair[0], pair[1], min, max))
            .collect();
        WeightTensor { layers }
    }

    pub fn from_layers(layers: Vec<Matrix>) -> WeightTensor {
        WeightTensor { layers }
    }

    pub fn same_shape(&self, other: &WeightTensor) -> bool {
        self.layers.len() == other.layers.len()
            && self
                .layers
                .iter()
                .zip(other.layers.iter())
                .all(|(a, b)| a.same_shape(b))
    }

    /// Adds `other` into `self`, entry by entry. Used to sum per-case
    /// gradients into the full-batch aggregate.
    pub fn accumulate(&mut self, other: &WeightTensor) {
        assert!(
            self.same_shape(other),
            "gradient tensor shape does not match the weight tensor"
        );
        for (acc, layer) in self.layers.iter_mut().zip(other.layers.iter()) {
            *acc = acc.clone() + layer.clone();
        }
    }

    /// Returns `self − lambda × gradient`, the tentative gradient-descent
    /// update. The gradient points toward increasing error, hence the
    /// subtraction.
    pub fn step(&self, lambda: f64, gradient: &WeightTensor) -> WeightTensor {
        assert!(
            self.same_shape(gradient),
            "gradient tensor shape does not match the weight tensor"
        );
        let layers = self
            .layers
            .iter()
            .zip(gradient.layers.iter())
            .map(|(w, g)| w.clone() - g.map(|x| x * lambda))
            .collect();
        WeightTensor { layers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_matches_topology() {
        let t = WeightTensor::zeros(&[3, 5, 2]);
        assert_eq!(t.layers.len(), 2);
        assert_eq!((t.layers[0].rows, t.layers[0].cols), (3, 5));
        assert_eq!((t.layers[1].rows, t.layers[1].cols), (5, 2));
    }

    #[test]
    fn same_shape_rejects_different_topologies() {
        let a = WeightTensor::zeros(&[2, 3, 1]);
        let b = WeightTensor::zeros(&[2, 4, 1]);
        let c = WeightTensor::zeros(&[2, 3]);
        assert!(a.same_shape(&a.clone()));
        assert!(!a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }

    #[test]
    fn accumulate_sums_entries() {
        let mut acc = WeightTensor::zeros(&[1, 2]);
        let g = WeightTensor::from_layers(vec![Matrix::from_data(vec![vec![1.0, -2.0]])]);
        acc.accumulate(&g);
        acc.accumulate(&g);
        assert_eq!(acc.layers[0].data[0], vec![2.0, -4.0]);
    }

    #[test]
    fn step_subtracts_scaled_gradient() {
        let w = WeightTensor::from_layers(vec![Matrix::from_data(vec![vec![1.0, 1.0]])]);
        let g = WeightTensor::from_layers(vec![Matrix::from_data(vec![vec![2.0, -2.0]])]);
        let next = w.step(0.25, &g);
        assert_eq!(next.layers[0].data[0], vec![0.5, 1.5]);
    }

    #[test]
    #[should_panic(expected = "shape does not match")]
    fn accumulate_panics_on_shape_mismatch() {
        let mut acc = WeightTensor::zeros(&[1, 2]);
        acc.accumulate(&WeightTensor::zeros(&[2, 2]));
    }
}
