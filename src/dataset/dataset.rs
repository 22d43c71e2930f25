use std::path::Path;

use log::info;

use crate::error::ModelError;

/// One supervised example: an input vector and the target output vector.
#[derive(Debug, Clone)]
pub struct TrainingCase {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

/// An ordered collection of training cases.
///
/// The set itself carries no dimensions; `validate` checks every case
/// against a network's declared input and output counts before a training
/// run starts.
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    cases: Vec<TrainingCase>,
}

impl TrainingSet {
    pub fn new() -> TrainingSet {
        TrainingSet { cases: Vec::new() }
    }

    pub fn from_pairs(pairs: Vec<(Vec<f64>, Vec<f64>)>) -> TrainingSet {
        let cases = pairs
            .into_iter()
            .map(|(input, target)| TrainingCase { input, target })
            .collect();
        TrainingSet { cases }
    }

    /// Loads cases from a whitespace-delimited text file: each non-empty
    /// line holds `input_count` input values followed by `output_count`
    /// target values.
    pub fn from_text<P: AsRef<Path>>(
        path: P,
        input_count: usize,
        output_count: usize,
    ) -> Result<TrainingSet, ModelError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let columns_per_line = input_count + output_count;
        let mut cases = Vec::new();

        for (line_idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut values = Vec::with_capacity(columns_per_line);
            for column in line.split_whitespace() {
                let value = column.parse::<f64>().map_err(|_| {
                    ModelError::MalformedTrainingData(format!(
                        "line {}: can't parse {:?} as a number",
                        line_idx + 1,
                        column
                    ))
                })?;
                values.push(value);
            }
            if values.len() != columns_per_line {
                return Err(ModelError::MalformedTrainingData(format!(
                    "line {}: expected {} columns, got {}",
                    line_idx + 1,
                    columns_per_line,
                    values.len()
                )));
            }
            let target = values.split_off(input_count);
            cases.push(TrainingCase {
                input: values,
                target,
            });
        }

        info!(
            "loaded {} training cases from {}",
            cases.len(),
            path.as_ref().display()
        );
        Ok(TrainingSet { cases })
    }

    pub fn push(&mut self, input: Vec<f64>, target: Vec<f64>) {
        self.cases.push(TrainingCase { input, target });
    }

    pub fn cases(&self) -> &[TrainingCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Checks every case against the declared input/output dimensions.
    pub fn validate(&self, input_count: usize, output_count: usize) -> Result<(), ModelError> {
        for (idx, case) in self.cases.iter().enumerate() {
            if case.input.len() != input_count {
                return Err(ModelError::DimensionMismatch {
                    context: format!("training case {idx} input"),
                    expected: input_count,
                    got: case.input.len(),
                });
            }
            if case.target.len() != output_count {
                return Err(ModelError::DimensionMismatch {
                    context: format!("training case {idx} target"),
                    expected: output_count,
                    got: case.target.len(),
                });
            }
        }
        Ok(())
    }
}
