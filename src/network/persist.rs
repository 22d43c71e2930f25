use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::info;

use crate::error::ModelError;
use crate::math::matrix::Matrix;
use crate::math::tensor::WeightTensor;
use crate::network::network::Network;

/// Flat-text persistence for [`Network`].
///
/// The format is whitespace-delimited: the layer count, the per-layer node
/// counts, then for each weight layer one row per source node holding the
/// weights toward every destination node at fixed 15-decimal precision.
/// Only real connections are written; the reader rebuilds the shape from
/// the header and must consume exactly the declared number of tokens.
impl Network {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        info!("saved network to {}", path.as_ref().display());
        Ok(())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), ModelError> {
        writeln!(writer, "{}", self.layer_count())?;

        let counts: Vec<String> = self.topology().iter().map(|n| n.to_string()).collect();
        writeln!(writer, "{}", counts.join(" "))?;

        for layer in &self.weights().layers {
            writeln!(writer)?;
            for row in &layer.data {
                let line: Vec<String> = row.iter().map(|w| format!("{w:.15}")).collect();
                writeln!(writer, "{}", line.join(" "))?;
            }
        }

        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Network, ModelError> {
        let mut text = String::new();
        File::open(path.as_ref())?.read_to_string(&mut text)?;
        let network = Network::from_text(&text)?;
        info!(
            "loaded network from {} ({:?} nodes per layer)",
            path.as_ref().display(),
            network.topology()
        );
        Ok(network)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Network, ModelError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Network::from_text(&text)
    }

    fn from_text(text: &str) -> Result<Network, ModelError> {
        let mut tokens = text.split_whitespace();

        let layer_count = next_usize(&mut tokens, "layer count")?;
        if layer_count < 2 {
            return Err(malformed(format!(
                "layer count must be at least 2, got {layer_count}"
            )));
        }

        let mut nodes_in_layer = Vec::new();
        for n in 0..layer_count {
            let count = next_usize(&mut tokens, &format!("node count for layer {n}"))?;
            if count == 0 {
                return Err(malformed(format!("layer {n} declares zero nodes")));
            }
            nodes_in_layer.push(count);
        }

        let mut layers = Vec::new();
        for m in 0..layer_count - 1 {
            let mut matrix = Matrix::zeros(nodes_in_layer[m], nodes_in_layer[m + 1]);
            for i in 0..matrix.rows {
                for j in 0..matrix.cols {
                    matrix.data[i][j] =
                        next_f64(&mut tokens, &format!("weight [{m}][{i}][{j}]"))?;
                }
            }
            layers.push(matrix);
        }

        if tokens.next().is_some() {
            return Err(malformed(
                "trailing data after the declared weights".to_string(),
            ));
        }

        Ok(Network::from_weights(
            nodes_in_layer,
            WeightTensor::from_layers(layers),
        ))
    }
}

fn malformed(detail: String) -> ModelError {
    ModelError::MalformedPersistedNetwork(detail)
}

fn next_usize<'a, I: Iterator<Item = &'a str>>(
    tokens: &mut I,
    what: &str,
) -> Result<usize, ModelError> {
    let token = tokens
        .next()
        .ok_or_else(|| malformed(format!("unexpected end of input reading {what}")))?;
    token
        .parse::<usize>()
        .map_err(|_| malformed(format!("expected {what}, got {token:?}")))
}

fn next_f64<'a, I: Iterator<Item = &'a str>>(
    tokens: &mut I,
    what: &str,
) -> Result<f64, ModelError> {
    let token = tokens
        .next()
        .ok_or_else(|| malformed(format!("unexpected end of input reading {what}")))?;
    token
        .parse::<f64>()
        .map_err(|_| malformed(format!("expected {what}, got {token:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(network: &Network) -> String {
        let mut buffer = Vec::new();
        network.write_to(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn round_trip_preserves_evaluation() {
        let mut network = Network::new(3, &[4, 2], 2, -1.0, 1.0);
        let mut reloaded = Network::from_reader(written(&network).as_bytes()).unwrap();

        let input = [0.25, 0.5, 0.75];
        let before = network.evaluate(&input);
        let after = reloaded.evaluate(&input);

        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(after.iter()) {
            assert!((b - a).abs() < 1e-12, "outputs diverged: {b} vs {a}");
        }
    }

    #[test]
    fn header_matches_topology() {
        let network = Network::new(2, &[3], 1, -1.0, 1.0);
        let text = written(&network);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("3"));
        assert_eq!(lines.next(), Some("2 3 1"));
    }

    #[test]
    fn weights_are_written_at_fixed_precision() {
        let text = written(&Network::new(2, &[], 1, -1.0, 1.0));
        // Every weight token has exactly 15 decimal places.
        for token in text.split_whitespace().skip(3) {
            let decimals = token.split('.').nth(1).unwrap();
            assert_eq!(decimals.len(), 15, "token {token:?}");
        }
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let network = Network::new(2, &[2], 1, -1.0, 1.0);
        let text = written(&network);
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let truncated = tokens[..tokens.len() - 1].join(" ");

        let result = Network::from_reader(truncated.as_bytes());
        assert!(matches!(
            result,
            Err(ModelError::MalformedPersistedNetwork(_))
        ));
    }

    #[test]
    fn non_numeric_weight_is_rejected() {
        let result = Network::from_reader("2\n2 1\n\n0.5\nnot-a-number\n".as_bytes());
        assert!(matches!(
            result,
            Err(ModelError::MalformedPersistedNetwork(_))
        ));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let network = Network::new(2, &[], 1, -1.0, 1.0);
        let text = format!("{} 0.5", written(&network).trim_end());
        let result = Network::from_reader(text.as_bytes());
        assert!(matches!(
            result,
            Err(ModelError::MalformedPersistedNetwork(_))
        ));
    }

    #[test]
    fn bad_header_is_rejected() {
        for text in ["", "1\n4", "x\n", "3\n2 0 1\n"] {
            let result = Network::from_reader(text.as_bytes());
            assert!(
                matches!(result, Err(ModelError::MalformedPersistedNetwork(_))),
                "accepted {text:?}"
            );
        }
    }
}
