//! Feature Standardization
//!
//! Rescales features to zero mean and unit variance using statistics fixed at
//! build time. Query points are transformed with the same stored statistics.

/// Per-feature mean and population standard deviation
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler<const N: usize> {
    mean: [f64; N],
    scale: [f64; N],
}

impl<const N: usize> StandardScaler<N> {
    /// Fit on a set of rows
    ///
    /// Uses the population variance (divide by n). A feature with zero
    /// variance gets a scale of 1 so it maps to 0 instead of NaN.
    /// Returns None for an empty input.
    pub fn fit(rows: &[[f64; N]]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        let n = rows.len() as f64;

        let mut mean = [0.0; N];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in mean.iter_mut() {
            *m /= n;
        }

        let mut scale = [0.0; N];
        for row in rows {
            for ((s, v), m) in scale.iter_mut().zip(row).zip(&mean) {
                *s += (v - m).powi(2);
            }
        }
        for s in scale.iter_mut() {
            let std = (*s / n).sqrt();
            *s = if std > 0.0 && std.is_finite() { std } else { 1.0 };
        }

        Some(Self { mean, scale })
    }

    pub fn transform(&self, row: &[f64; N]) -> [f64; N] {
        std::array::from_fn(|i| (row[i] - self.mean[i]) / self.scale[i])
    }

    pub fn mean(&self) -> &[f64; N] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; N] {
        &self.scale
    }
}

/// Euclidean distance between two points
pub fn euclidean_distance<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
