//! Decoded result arrays, in flat row-major storage.

use indexmap::IndexMap;

/// One task execution's decoded results, keyed by variable id.
///
/// Insertion-ordered so results come back in the order variables were
/// requested.
pub type TaskResult = IndexMap<String, ResultArray>;

/// A decoded, time-aligned numeric array for one variable.
///
/// Storage is a flat `Vec<f64>` in row-major order; the variants record
/// the logical shape. `Series` is one value per time step, `Matrix` is a
/// row of values per time step, `Grid` is a 2-D histogram per time step.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultArray {
    /// 1-D time series: one value per step.
    Series(Vec<f64>),
    /// 2-D per-step matrix: `rows` steps of `cols` values each.
    Matrix {
        /// Number of time steps.
        rows: usize,
        /// Values per step.
        cols: usize,
        /// Row-major data, `rows * cols` long.
        data: Vec<f64>,
    },
    /// 3-D per-step grid stack: `steps` grids of `rows * cols` each.
    Grid {
        /// Number of time steps.
        steps: usize,
        /// Grid rows per step.
        rows: usize,
        /// Grid columns per step.
        cols: usize,
        /// Row-major data, `steps * rows * cols` long.
        data: Vec<f64>,
    },
}

impl ResultArray {
    /// Number of time steps covered by this array.
    pub fn steps(&self) -> usize {
        match self {
            Self::Series(v) => v.len(),
            Self::Matrix { rows, .. } => *rows,
            Self::Grid { steps, .. } => *steps,
        }
    }

    /// Whether the array holds no data at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Series(v) => v.is_empty(),
            Self::Matrix { data, .. } => data.is_empty(),
            Self::Grid { data, .. } => data.is_empty(),
        }
    }

    /// The series values, if this is a `Series`.
    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            Self::Series(v) => Some(v),
            _ => None,
        }
    }

    /// One step's row, if this is a `Matrix`.
    pub fn matrix_row(&self, step: usize) -> Option<&[f64]> {
        match self {
            Self::Matrix { rows, cols, data } if step < *rows => {
                Some(&data[step * cols..(step + 1) * cols])
            }
            _ => None,
        }
    }

    /// One step's full grid (row-major `rows * cols`), if this is a `Grid`.
    pub fn grid_step(&self, step: usize) -> Option<&[f64]> {
        match self {
            Self::Grid {
                steps,
                rows,
                cols,
                data,
            } if step < *steps => {
                let per = rows * cols;
                Some(&data[step * per..(step + 1) * per])
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_row_slices_correctly() {
        let m = ResultArray::Matrix {
            rows: 2,
            cols: 3,
            data: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        };
        assert_eq!(m.matrix_row(1), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(m.matrix_row(2), None);
    }

    #[test]
    fn grid_step_slices_one_full_grid() {
        let g = ResultArray::Grid {
            steps: 2,
            rows: 2,
            cols: 2,
            data: vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
        };
        assert_eq!(g.grid_step(0), Some(&[0.0, 1.0, 2.0, 3.0][..]));
        assert_eq!(g.grid_step(1), Some(&[4.0, 5.0, 6.0, 7.0][..]));
        assert_eq!(g.steps(), 2);
    }

    #[test]
    fn empty_series_reports_empty() {
        assert!(ResultArray::Series(vec![]).is_empty());
        assert!(!ResultArray::Series(vec![0.0]).is_empty());
    }
}
