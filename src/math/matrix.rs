use rand::prelude::*;
use serde::{Serialize, Deserialize};
use std::ops::{Add, Sub};

/// Dense 2-D matrix of `f64` values.
///
/// For a weight layer, `rows` is the number of source nodes and `cols` the
/// number of destination nodes; entry `data[i][j]` is the weight from source
/// node `i` to destination node `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills every entry with a value drawn uniformly from `[min, max)`.
    pub fn uniform(rows: usize, cols: usize, min: f64, max: f64) -> Matrix {
        let mut rng = rand::thread_rng();
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = min + (max - min) * rng.gen::<f64>();
            }
        }

        res
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |row| row.len()),
            data,
        }
    }

    pub fn same_shape(&self, other: &Matrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix::from_data(
            self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        )
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        if !self.same_shape(&rhs) {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        if !self.same_shape(&rhs) {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_requested_shape() {
        let m = Matrix::zeros(3, 2);
        assert_eq!(m.rows, 3);
        assert_eq!(m.cols, 2);
        assert!(m.data.iter().all(|row| row.iter().all(|&x| x == 0.0)));
    }

    #[test]
    fn uniform_stays_inside_bounds() {
        let m = Matrix::uniform(10, 10, -0.5, 0.5);
        for row in &m.data {
            for &x in row {
                assert!((-0.5..0.5).contains(&x));
            }
        }
    }

    #[test]
    fn add_and_sub_are_elementwise() {
        let a = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = Matrix::from_data(vec![vec![0.5, 0.5], vec![0.5, 0.5]]);
        let sum = a.clone() + b.clone();
        assert_eq!(sum.data[0][1], 2.5);
        let diff = a - b;
        assert_eq!(diff.data[1][0], 2.5);
    }

    #[test]
    #[should_panic(expected = "incorrect sizes")]
    fn add_panics_on_shape_mismatch() {
        let _ = Matrix::zeros(2, 2) + Matrix::zeros(2, 3);
    }

    #[test]
    fn map_applies_to_every_entry() {
        let m = Matrix::from_data(vec![vec![1.0, -2.0]]).map(|x| x * 2.0);
        assert_eq!(m.data[0], vec![2.0, -4.0]);
    }
}
