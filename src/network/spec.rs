use serde::{Serialize, Deserialize};

use crate::network::network::Network;

/// A fully serializable description of a network architecture.
///
/// `NetworkSpec` can be saved to / loaded from JSON independently of the
/// trained weights, making it possible to store architecture configurations
/// before training starts. `build` turns one into a freshly randomized
/// [`Network`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name used as the model file stem.
    pub name: String,
    /// Number of input nodes.
    pub input_nodes: usize,
    /// Node counts of the hidden layers, in order; may be empty.
    #[serde(default)]
    pub hidden_layers: Vec<usize>,
    /// Number of output nodes.
    pub output_nodes: usize,
    /// Lower bound (inclusive) of the weight randomization range.
    pub weight_min: f64,
    /// Upper bound (exclusive) of the weight randomization range.
    pub weight_max: f64,
}

impl NetworkSpec {
    /// Builds a network with randomized weights matching this spec.
    pub fn build(&self) -> Network {
        Network::new(
            self.input_nodes,
            &self.hidden_layers,
            self.output_nodes,
            self.weight_min,
            self.weight_max,
        )
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_matches_declared_shape() {
        let spec = NetworkSpec {
            name: "xor".to_string(),
            input_nodes: 2,
            hidden_layers: vec![2],
            output_nodes: 1,
            weight_min: -1.0,
            weight_max: 1.0,
        };
        let network = spec.build();
        assert_eq!(network.topology(), &[2, 2, 1]);
    }

    #[test]
    fn json_round_trip() {
        let spec = NetworkSpec {
            name: "autoencoder".to_string(),
            input_nodes: 100,
            hidden_layers: vec![100],
            output_nodes: 100,
            weight_min: -0.5,
            weight_max: 0.5,
        };
        let text = serde_json::to_string(&spec).unwrap();
        let back: NetworkSpec = serde_json::from_str(&text).unwrap();
        assert_eq!(back.name, spec.name);
        assert_eq!(back.hidden_layers, spec.hidden_layers);
        assert_eq!(back.weight_max, spec.weight_max);
    }

    #[test]
    fn hidden_layers_default_to_empty() {
        let back: NetworkSpec = serde_json::from_str(
            r#"{"name":"direct","input_nodes":2,"output_nodes":1,"weight_min":-1.0,"weight_max":1.0}"#,
        )
        .unwrap();
        assert!(back.hidden_layers.is_empty());
        assert_eq!(back.build().layer_count(), 2);
    }
}
