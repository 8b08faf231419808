//! Feature scaling.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Standardize features to zero mean and unit variance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-column means.
    pub means: Vec<f64>,
    /// Per-column standard deviations (degenerate columns get 1.0).
    pub stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit the scaler to a feature matrix.
    pub fn fit(data: &Array2<f64>) -> DataResult<Self> {
        if data.nrows() == 0 {
            return Err(DataError::EmptyDataset);
        }

        let n = data.nrows() as f64;
        let means: Vec<f64> = data
            .mean_axis(Axis(0))
            .expect("non-empty matrix has a mean")
            .to_vec();
        let stds: Vec<f64> = (0..data.ncols())
            .map(|c| {
                let var = data
                    .column(c)
                    .iter()
                    .map(|&v| (v - means[c]).powi(2))
                    .sum::<f64>()
                    / n;
                let sd = var.sqrt();
                if sd > 0.0 { sd } else { 1.0 }
            })
            .collect();

        Ok(Self { means, stds })
    }

    /// Transform a feature matrix.
    pub fn transform(&self, data: &Array2<f64>) -> DataResult<Array2<f64>> {
        self.check_width(data.ncols())?;
        let mut out = data.clone();
        for mut row in out.rows_mut() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = (*v - self.means[c]) / self.stds[c];
            }
        }
        Ok(out)
    }

    /// Fit and transform in one step.
    pub fn fit_transform(data: &Array2<f64>) -> DataResult<(Self, Array2<f64>)> {
        let scaler = Self::fit(data)?;
        let transformed = scaler.transform(data)?;
        Ok((scaler, transformed))
    }

    fn check_width(&self, ncols: usize) -> DataResult<()> {
        if ncols != self.means.len() {
            return Err(DataError::DimensionMismatch {
                message: format!(
                    "scaler fitted on {} columns, data has {}",
                    self.means.len(),
                    ncols
                ),
            });
        }
        Ok(())
    }
}

/// Rescale features onto the rotation-angle range [0, 2π].
///
/// Quantum encodings map features onto gate rotation angles, so each
/// column's observed [min, max] is stretched onto [0, 2π]. Degenerate
/// (constant) columns map to 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AngleScaler {
    /// Per-column minima.
    pub mins: Vec<f64>,
    /// Per-column maxima.
    pub maxs: Vec<f64>,
}

impl AngleScaler {
    /// Upper end of the output range.
    pub const RANGE_MAX: f64 = 2.0 * std::f64::consts::PI;

    /// Fit the scaler to a feature matrix.
    pub fn fit(data: &Array2<f64>) -> DataResult<Self> {
        if data.nrows() == 0 {
            return Err(DataError::EmptyDataset);
        }

        let mut mins = vec![f64::INFINITY; data.ncols()];
        let mut maxs = vec![f64::NEG_INFINITY; data.ncols()];
        for row in data.rows() {
            for (c, &v) in row.iter().enumerate() {
                mins[c] = mins[c].min(v);
                maxs[c] = maxs[c].max(v);
            }
        }

        Ok(Self { mins, maxs })
    }

    /// Transform a feature matrix onto [0, 2π].
    ///
    /// Values outside the fitted range are clamped.
    pub fn transform(&self, data: &Array2<f64>) -> DataResult<Array2<f64>> {
        if data.ncols() != self.mins.len() {
            return Err(DataError::DimensionMismatch {
                message: format!(
                    "scaler fitted on {} columns, data has {}",
                    self.mins.len(),
                    data.ncols()
                ),
            });
        }

        let mut out = data.clone();
        for mut row in out.rows_mut() {
            for (c, v) in row.iter_mut().enumerate() {
                let span = self.maxs[c] - self.mins[c];
                *v = if span > 0.0 {
                    ((*v - self.mins[c]) / span).clamp(0.0, 1.0) * Self::RANGE_MAX
                } else {
                    0.0
                };
            }
        }
        Ok(out)
    }

    /// Fit and transform in one step.
    pub fn fit_transform(data: &Array2<f64>) -> DataResult<(Self, Array2<f64>)> {
        let scaler = Self::fit(data)?;
        let transformed = scaler.transform(data)?;
        Ok((scaler, transformed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standard_scaler() {
        let data = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]];
        let (scaler, scaled) = StandardScaler::fit_transform(&data).unwrap();

        assert!((scaler.means[0] - 2.0).abs() < 1e-12);
        assert!((scaler.means[1] - 20.0).abs() < 1e-12);

        // Each column has zero mean after scaling
        for c in 0..2 {
            let mean: f64 = scaled.column(c).iter().sum::<f64>() / 3.0;
            assert!(mean.abs() < 1e-12);
        }
    }

    #[test]
    fn test_standard_scaler_constant_column() {
        let data = array![[5.0], [5.0], [5.0]];
        let (_, scaled) = StandardScaler::fit_transform(&data).unwrap();
        assert!(scaled.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_angle_scaler_range() {
        let data = array![[0.0, -1.0], [5.0, 0.0], [10.0, 1.0]];
        let (_, scaled) = AngleScaler::fit_transform(&data).unwrap();

        assert!((scaled[[0, 0]] - 0.0).abs() < 1e-12);
        assert!((scaled[[2, 0]] - AngleScaler::RANGE_MAX).abs() < 1e-12);
        assert!((scaled[[1, 0]] - AngleScaler::RANGE_MAX / 2.0).abs() < 1e-12);
        assert!((scaled[[1, 1]] - AngleScaler::RANGE_MAX / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_angle_scaler_clamps_unseen_values() {
        let train = array![[0.0], [1.0]];
        let (scaler, _) = AngleScaler::fit_transform(&train).unwrap();

        let test = array![[-5.0], [5.0]];
        let scaled = scaler.transform(&test).unwrap();
        assert!((scaled[[0, 0]] - 0.0).abs() < 1e-12);
        assert!((scaled[[1, 0]] - AngleScaler::RANGE_MAX).abs() < 1e-12);
    }

    #[test]
    fn test_width_mismatch() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let scaler = StandardScaler::fit(&data).unwrap();
        let narrow = array![[1.0], [2.0]];
        assert!(matches!(
            scaler.transform(&narrow),
            Err(DataError::DimensionMismatch { .. })
        ));
    }
}
